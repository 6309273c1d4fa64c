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
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use tf_provider::value::{Value, ValueEmpty, ValueNumber, ValueString};
use tf_provider::{schema::Schema, AttributePath, Diagnostics, Resource};

use crate::client::ClientHandle;
use crate::fields::{plan_create, plan_update, record, schema, validate, Field, Record};
use crate::rest::imported;
use crate::utils::{known, Reported};

const TEAMS: &str = "teams";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamTokenState {
    pub id: ValueString<'static>,
    pub team_name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub days: ValueNumber,
    pub hours: ValueNumber,
    pub minutes: ValueNumber,
    pub value: ValueString<'static>,
}

record!(TeamTokenState {
    id,
    team_name,
    description,
    days,
    hours,
    minutes,
    value
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::text("team_name", "Team owning the token").wire("group").replace(),
        Field::text("description", "Token description").replace(),
        Field::number("days", "Days before expiration").replace(),
        Field::number("hours", "Hours before expiration").replace(),
        Field::number("minutes", "Minutes before expiration").replace(),
        Field::text("value", "Token value").computed().sensitive(),
    ];
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    group: &'a str,
    description: &'a str,
    days: i64,
    hours: i64,
    minutes: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct TokenEntry {
    id: String,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    days: Option<i64>,
    #[serde(default)]
    hours: Option<i64>,
    #[serde(default)]
    minutes: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Claims {
    jti: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("the token is not a JWT")]
    Malformed,
    #[error("the token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("the token payload has no usable `jti` claim: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Identifier of a token: its `jti` claim, read without verifying the signature
pub fn token_id(token: &str) -> Result<String, TokenError> {
    let payload = token.split('.').nth(1).ok_or(TokenError::Malformed)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: Claims = serde_json::from_slice(&bytes)?;
    Ok(claims.jti)
}

fn number(value: &ValueNumber) -> i64 {
    match value {
        Value::Value(value) => *value,
        _ => 0,
    }
}

/// API token of a team
#[derive(Debug, Default)]
pub struct TeamTokenResource {
    client: ClientHandle,
}

impl TeamTokenResource {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Resource for TeamTokenResource {
    type State<'a> = TeamTokenState;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(schema("Create an API token for a team.", &FIELDS))
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        validate(&FIELDS, &config, diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags).await?;
        let Some(id) = state.id() else {
            diags.root_error("Unable to read team token", "The token identifier is unknown.");
            return None;
        };

        let tokens: Vec<TokenEntry> = client
            .get_token(TEAMS)
            .await
            .reported(diags, "Unable to read team token")?;
        let Some(entry) = tokens.into_iter().find(|entry| entry.id == id) else {
            warn!(%id, "Team token no longer exists, removing it from state");
            return None;
        };

        let mut state = state;
        if let Some(group) = entry.group {
            state.team_name = Value::Value(group.into());
        }
        if let Some(description) = entry.description {
            state.description = Value::Value(description.into());
        }
        if let Some(days) = entry.days {
            state.days = Value::Value(days);
        }
        if let Some(hours) = entry.hours {
            state.hours = Value::Value(hours);
        }
        if let Some(minutes) = entry.minutes {
            state.minutes = Value::Value(minutes);
        }

        Some((state, private_state))
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        plan_create(&FIELDS, &mut state);

        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let mut state = proposed_state;
        let trigger_replace = plan_update(&FIELDS, &prior_state, &config_state, &mut state);

        Some((state, prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        Some(())
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let client = self.client.get(diags).await?;
        let summary = "Unable to create team token";

        let request = TokenRequest {
            group: known(&planned_state.team_name).unwrap_or_default(),
            description: known(&planned_state.description).unwrap_or_default(),
            days: number(&planned_state.days),
            hours: number(&planned_state.hours),
            minutes: number(&planned_state.minutes),
        };
        info!(team = request.group, "Creating team token");
        let response: TokenResponse = client
            .post_token(TEAMS, &request)
            .await
            .reported(diags, summary)?;
        let id = token_id(&response.token).reported(diags, summary)?;

        let mut state = planned_state;
        state.id = Value::Value(id.into());
        state.value = Value::Value(response.token.into());

        Some((state, private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        _planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        diags.root_error(
            "Unable to update team token",
            "Every attribute of a team token forces its replacement.",
        );
        None
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let client = self.client.get(diags).await?;
        let Some(id) = state.id() else {
            diags.root_error("Unable to delete team token", "The token identifier is unknown.");
            return None;
        };

        info!(%id, "Deleting team token");
        client
            .delete_token(&format!("{TEAMS}/{id}"))
            .await
            .reported(diags, "Unable to delete team token")?;

        Some(())
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let state = imported::<TeamTokenState>(&id, &["id"])
            .reported(diags, "Unable to import team token")?;

        Some((state, Default::default()))
    }
}
