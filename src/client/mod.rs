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

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tf_provider::Diagnostics;
use tokio::sync::RwLock;
use tracing::debug;

mod jsonapi;
mod transport;

#[cfg(test)]
pub mod testing;

pub use jsonapi::{
    AtomicOperation, AtomicRequest, AtomicResponse, AtomicResult, Document, Identifier, Linkage,
    Op, Relationship, ResourceObject, ATOMIC_CONTENT_TYPE, CONTENT_TYPE,
};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Unable to marshal payload: {0}")]
    Marshal(#[source] serde_json::Error),
    #[error("Unable to reach Terrakube: {0:#}")]
    Transport(anyhow::Error),
    #[error("Unexpected response status {status}: {detail}\nResponse body: {body}")]
    Status {
        status: u16,
        detail: String,
        body: String,
    },
    #[error("Unable to unmarshal response: {message}\nResponse body: {body}")]
    Unmarshal { message: String, body: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }

    fn status(response: &ApiResponse) -> Self {
        let detail = jsonapi::error_detail(&response.body).unwrap_or_else(|| {
            StatusCode::from_u16(response.status)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or("request rejected")
                .to_owned()
        });
        ClientError::Status {
            status: response.status,
            detail,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }
    }

    fn unmarshal(err: serde_json::Error, response: &ApiResponse) -> Self {
        ClientError::Unmarshal {
            message: err.to_string(),
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }
    }
}

/// Accepted outcome of a DELETE request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteCheck {
    /// Only `204 No Content`
    NoContent,
    /// Any 2xx status
    Success,
}

/// Authenticated access to one Terrakube instance
#[derive(Clone)]
pub struct Client {
    endpoint: String,
    token: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("token", &"***")
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        Self {
            endpoint,
            token: token.into(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.endpoint, path.trim_start_matches('/'))
    }

    fn token_url(&self, path: &str) -> String {
        format!(
            "{}/access-token/v1/{}",
            self.endpoint,
            path.trim_start_matches('/')
        )
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        content_type: &'static str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, ClientError> {
        let mut headers = vec![
            ("Authorization", format!("Bearer {}", self.token)),
            ("Content-Type", content_type.to_owned()),
        ];
        if content_type == ATOMIC_CONTENT_TYPE {
            headers.push(("Accept", content_type.to_owned()));
        }

        debug!(%method, %url, "Sending request to Terrakube");
        let response = self
            .transport
            .send(ApiRequest {
                method: method.clone(),
                url: url.clone(),
                headers,
                body,
            })
            .await
            .map_err(ClientError::Transport)?;
        debug!(%method, %url, status = response.status, "Terrakube responded");

        if response.is_success() {
            Ok(response)
        } else {
            Err(ClientError::status(&response))
        }
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        url: String,
        content_type: &'static str,
        body: &B,
    ) -> Result<ApiResponse, ClientError> {
        let body = serde_json::to_vec(body).map_err(ClientError::Marshal)?;
        self.send(method, url, content_type, Some(body)).await
    }

    fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ClientError> {
        serde_json::from_slice(&response.body).map_err(|err| ClientError::unmarshal(err, response))
    }

    /// Fetch a single resource
    pub async fn get(&self, path: &str) -> Result<ResourceObject, ClientError> {
        let response = self
            .send(Method::GET, self.api_url(path), CONTENT_TYPE, None)
            .await?;
        Self::decode::<Document<ResourceObject>>(&response).map(|document| document.data)
    }

    /// Fetch a collection, optionally filtered by the query of `path`
    pub async fn list(&self, path: &str) -> Result<Vec<ResourceObject>, ClientError> {
        let response = self
            .send(Method::GET, self.api_url(path), CONTENT_TYPE, None)
            .await?;
        Self::decode::<Document<Vec<ResourceObject>>>(&response).map(|document| document.data)
    }

    pub async fn create(
        &self,
        path: &str,
        object: ResourceObject,
    ) -> Result<ResourceObject, ClientError> {
        let response = self
            .send_json(
                Method::POST,
                self.api_url(path),
                CONTENT_TYPE,
                &Document { data: object },
            )
            .await?;
        Self::decode::<Document<ResourceObject>>(&response).map(|document| document.data)
    }

    /// Patch a resource, the response body is ignored
    pub async fn update(&self, path: &str, object: ResourceObject) -> Result<(), ClientError> {
        self.send_json(
            Method::PATCH,
            self.api_url(path),
            CONTENT_TYPE,
            &Document { data: object },
        )
        .await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str, check: DeleteCheck) -> Result<(), ClientError> {
        let response = self
            .send(Method::DELETE, self.api_url(path), CONTENT_TYPE, None)
            .await?;
        match check {
            DeleteCheck::NoContent if response.status != 204 => Err(ClientError::status(&response)),
            _ => Ok(()),
        }
    }

    /// Submit a batch of atomic operations
    pub async fn operations(
        &self,
        operations: Vec<AtomicOperation>,
    ) -> Result<Vec<AtomicResult>, ClientError> {
        let response = self
            .send_json(
                Method::POST,
                self.api_url("operations"),
                ATOMIC_CONTENT_TYPE,
                &AtomicRequest { operations },
            )
            .await?;
        if response.body.is_empty() {
            return Ok(Vec::new());
        }
        Self::decode::<AtomicResponse>(&response).map(|response| response.results)
    }

    pub async fn get_token<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .send(Method::GET, self.token_url(path), "application/json", None)
            .await?;
        Self::decode(&response)
    }

    pub async fn post_token<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .send_json(Method::POST, self.token_url(path), "application/json", body)
            .await?;
        Self::decode(&response)
    }

    pub async fn delete_token(&self, path: &str) -> Result<(), ClientError> {
        self.send(Method::DELETE, self.token_url(path), "application/json", None)
            .await?;
        Ok(())
    }
}

/// Client slot filled at provider configuration and shared by every resource
#[derive(Debug, Clone, Default)]
pub struct ClientHandle(Arc<RwLock<Option<Client>>>);

impl ClientHandle {
    pub async fn set(&self, client: Client) {
        *self.0.write().await = Some(client);
    }

    pub async fn get(&self, diags: &mut Diagnostics) -> Option<Client> {
        let client = self.0.read().await.clone();
        if client.is_none() {
            diags.root_error(
                "Provider not configured",
                "The Terrakube client is not available, the provider must be configured before resources are used.",
            );
        }
        client
    }
}
