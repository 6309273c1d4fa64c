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

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value as Json;

use super::{ApiRequest, ApiResponse, Client, ClientHandle, Transport};

pub const ENDPOINT: &str = "https://terrakube.test";
pub const TOKEN: &str = "token-123";

/// Replays queued responses and records every request
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::default()
    }

    pub fn reply(&self, status: u16, body: Json) -> &Self {
        self.responses.lock().unwrap().push_back(ApiResponse {
            status,
            body: serde_json::to_vec(&body).unwrap().into(),
        });
        self
    }

    pub fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.responses.lock().unwrap().push_back(ApiResponse {
            status,
            body: body.to_owned().into(),
        });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn pending(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// Client and configured handle talking to this transport
    pub async fn handle(self: &Arc<Self>) -> ClientHandle {
        let handle = ClientHandle::default();
        handle
            .set(Client::new(ENDPOINT, TOKEN, self.clone()))
            .await;
        handle
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let description = format!("{} {}", request.method, request.url);
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no response queued for {description}"))
    }
}

/// JSON body of a recorded request
pub fn body(request: &ApiRequest) -> Json {
    serde_json::from_slice(request.body.as_deref().unwrap_or(b"null")).unwrap()
}
