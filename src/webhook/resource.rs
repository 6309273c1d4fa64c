// This file is part of the terraform-provider-terrakube project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use tf_provider::value::{ValueList, ValueString};

use crate::client::{Client, ClientError, DeleteCheck, Op, ResourceObject};
use crate::entity::Entity;
use crate::fields::{record, Field};
use crate::rest::RestResource;
use crate::utils::known;

use super::{apply, fetch, remove, EVENTS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub workspace_id: ValueString<'static>,
    pub path: ValueList<ValueString<'static>>,
    pub branch: ValueList<ValueString<'static>>,
    pub template_id: ValueString<'static>,
    pub remote_hook_id: ValueString<'static>,
    pub event: ValueString<'static>,
}

record!(WebhookState {
    id,
    organization_id,
    workspace_id,
    path,
    branch,
    template_id,
    remote_hook_id,
    event
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::path("workspace_id", "Terrakube workspace id"),
        Field::texts("path", "Changed files triggering the webhook"),
        Field::texts("branch", "Branches triggering the webhook"),
        Field::text("template_id", "Template run when the webhook fires").wire("templateId"),
        Field::text("remote_hook_id", "Identifier of the hook registered on the VCS")
            .wire("remoteHookId")
            .optional_computed(),
        Field::text("event", "VCS event triggering the webhook")
            .optional()
            .default_text("PUSH")
            .one_of(EVENTS),
    ];
}

/// Webhook of a VCS driven workspace
#[derive(Debug, Default, Clone)]
pub struct Webhook;

pub type WebhookResource = RestResource<Webhook>;

#[async_trait]
impl Entity for Webhook {
    const NAME: &'static str = "webhook";
    const KIND: &'static str = "webhook";
    const DESCRIPTION: &'static str =
        "Trigger a template on a workspace when its repository changes.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "workspace_id", "id"];

    type State = WebhookState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/workspace/{}/webhook",
            known(&state.organization_id)?,
            known(&state.workspace_id)?
        ))
    }

    async fn load(
        client: &Client,
        _state: &Self::State,
        path: &str,
    ) -> Result<Option<ResourceObject>, ClientError> {
        fetch(client, path).await
    }

    async fn insert(
        client: &Client,
        _state: &Self::State,
        collection: &str,
        object: ResourceObject,
    ) -> Result<ResourceObject, ClientError> {
        let id = apply(
            client,
            Op::Add,
            format!("/{collection}"),
            object.with_id(Uuid::new_v4().to_string()),
        )
        .await?;
        client.get(&format!("{collection}/{id}")).await
    }

    async fn replace(
        client: &Client,
        _state: &Self::State,
        path: &str,
        object: ResourceObject,
    ) -> Result<ResourceObject, ClientError> {
        apply(client, Op::Update, format!("/{path}"), object).await?;
        client.get(path).await
    }

    async fn remove(
        client: &Client,
        _state: &Self::State,
        path: &str,
        _check: DeleteCheck,
    ) -> Result<(), ClientError> {
        if fetch(client, path).await?.is_none() {
            info!(%path, "Webhook already deleted");
            return Ok(());
        }
        remove(client, format!("/{path}")).await
    }
}
