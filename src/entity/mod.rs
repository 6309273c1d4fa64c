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

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tf_provider::Diagnostics;

use crate::client::{Client, ClientError, DeleteCheck, ResourceObject};
use crate::fields::{Field, Record};

pub mod agent;
pub mod collection;
pub mod lookup;
pub mod module;
pub mod organization;
pub mod ssh;
pub mod team;
pub mod template;
pub mod variable;
pub mod vcs;
pub mod workspace;
pub mod workspace_access;
pub mod workspace_schedule;
pub mod workspace_tag;

/// How a resource is removed from Terrakube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Remove(DeleteCheck),
    /// Renamed with a random suffix and flagged `deleted`
    Archive,
    /// Flagged `disabled`
    Disable,
}

/// Descriptor of a Terrakube entity managed as a JSON:API resource
///
/// The async hooks default to plain JSON:API requests on the collection and
/// member paths. Entities only writable another way override them.
#[async_trait]
pub trait Entity: Debug + Default + Clone + Send + Sync + 'static {
    /// Resource type name, without the provider prefix
    const NAME: &'static str;
    /// JSON:API type
    const KIND: &'static str;
    const DESCRIPTION: &'static str;
    /// Attributes seeded, in order, from a comma separated import identifier
    const IMPORT_KEYS: &'static [&'static str];
    const DELETION: Deletion = Deletion::Remove(DeleteCheck::Success);

    type State: Record
        + Debug
        + Default
        + Clone
        + PartialEq
        + Send
        + Sync
        + Serialize
        + DeserializeOwned
        + 'static;

    fn fields() -> &'static [Field];

    /// Path of the collection, relative to the API root
    ///
    /// `None` when a parent identifier is not known.
    fn collection(state: &Self::State) -> Option<String>;

    fn member(state: &Self::State, id: &str) -> Option<String> {
        Self::collection(state).map(|collection| format!("{collection}/{id}"))
    }

    /// Add what the field table cannot express to an outgoing resource
    fn decorate(_state: &Self::State, _object: &mut ResourceObject) {}

    /// Compute provider-side values of a planned state
    fn plan(_state: &mut Self::State, _config: &Self::State) {}

    /// Notify the user about an applied state
    fn applied(_state: &Self::State, _diags: &mut Diagnostics) {}

    /// Server view of the resource at `path`
    ///
    /// `None` when the resource is gone and must leave the state.
    async fn load(
        client: &Client,
        _state: &Self::State,
        path: &str,
    ) -> Result<Option<ResourceObject>, ClientError> {
        client.get(path).await.map(Some)
    }

    /// Create `object` in `collection` and return the server view of it
    async fn insert(
        client: &Client,
        _state: &Self::State,
        collection: &str,
        object: ResourceObject,
    ) -> Result<ResourceObject, ClientError> {
        client.create(collection, object).await
    }

    /// Overwrite the resource at `path` and return the server view of it
    async fn replace(
        client: &Client,
        _state: &Self::State,
        path: &str,
        object: ResourceObject,
    ) -> Result<ResourceObject, ClientError> {
        client.update(path, object).await?;
        // PATCH answers without a body
        client.get(path).await
    }

    async fn remove(
        client: &Client,
        _state: &Self::State,
        path: &str,
        check: DeleteCheck,
    ) -> Result<(), ClientError> {
        client.delete(path, check).await
    }
}

/// Descriptor of a data source looking an entity up by name
pub trait Lookup: Debug + Default + Clone + Send + Sync + 'static {
    const KIND: &'static str;
    const DESCRIPTION: &'static str;
    /// Quote the filtered name
    const QUOTED: bool = false;

    type State: Record
        + Debug
        + Default
        + Clone
        + PartialEq
        + Send
        + Sync
        + Serialize
        + DeserializeOwned
        + 'static;

    fn fields() -> &'static [Field];

    fn collection(state: &Self::State) -> Option<String>;
}
