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

//! Webhooks are only writable through JSON:API atomic operations

mod event;
mod resource;

use tracing::debug;

use crate::client::{AtomicOperation, Client, ClientError, Op, ResourceObject};

pub use event::WebhookEventResource;
pub use resource::WebhookResource;

pub(crate) const EVENTS: &[&str] = &["PUSH"];

/// Submit a single `add` or `update` operation and return the identifier it reports
async fn apply(
    client: &Client,
    op: Op,
    href: String,
    data: ResourceObject,
) -> Result<String, ClientError> {
    debug!(?op, %href, "Submitting atomic operation");
    let results = client
        .operations(vec![AtomicOperation {
            op,
            href,
            data: Some(data),
        }])
        .await?;

    results
        .into_iter()
        .next()
        .and_then(|result| result.data)
        .and_then(|data| data.id)
        .ok_or_else(|| ClientError::Unmarshal {
            message: "the atomic operation reported no result".to_owned(),
            body: String::new(),
        })
}

async fn remove(client: &Client, href: String) -> Result<(), ClientError> {
    debug!(%href, "Submitting atomic removal");
    client
        .operations(vec![AtomicOperation {
            op: Op::Remove,
            href,
            data: None,
        }])
        .await?;
    Ok(())
}

/// `Ok(None)` when the server answers 404
async fn fetch(client: &Client, path: &str) -> Result<Option<ResourceObject>, ClientError> {
    match client.get(path).await {
        Ok(object) => Ok(Some(object)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}
