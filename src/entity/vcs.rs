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

use std::borrow::Cow;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tf_provider::value::{Value, ValueString};
use tf_provider::Diagnostics;

use crate::client::DeleteCheck;
use crate::fields::{record, Field};
use crate::utils::known;

use super::{Deletion, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VcsType {
    Github,
    Gitlab,
    Bitbucket,
    AzureDevops,
}

impl VcsType {
    const NAMES: &'static [&'static str] = &["GITHUB", "GITLAB", "BITBUCKET", "AZURE_DEVOPS"];

    fn parse(name: &str) -> Option<Self> {
        match name {
            "GITHUB" => Some(VcsType::Github),
            "GITLAB" => Some(VcsType::Gitlab),
            "BITBUCKET" => Some(VcsType::Bitbucket),
            "AZURE_DEVOPS" => Some(VcsType::AzureDevops),
            _ => None,
        }
    }

    fn endpoint(self) -> &'static str {
        match self {
            VcsType::Github => "https://github.com",
            VcsType::Gitlab => "https://gitlab.com",
            VcsType::Bitbucket => "https://bitbucket.org",
            VcsType::AzureDevops => "https://dev.azure.com",
        }
    }

    fn api_url(self) -> &'static str {
        match self {
            VcsType::Github => "https://api.github.com",
            VcsType::Gitlab => "https://gitlab.com/api/v4",
            VcsType::Bitbucket => "https://api.bitbucket.org/2.0",
            VcsType::AzureDevops => "https://dev.azure.com",
        }
    }

    /// OAuth authorization page granting Terrakube access to the repositories
    fn connect_url(self, endpoint: &str, client_id: &str) -> String {
        match self {
            VcsType::Github => format!(
                "{endpoint}/login/oauth/authorize?client_id={client_id}&allow_signup=false&scope=repo"
            ),
            VcsType::Gitlab => format!(
                "{endpoint}/oauth/authorize?client_id={client_id}&response_type=code&scope=api"
            ),
            VcsType::Bitbucket => format!(
                "{endpoint}/site/oauth2/authorize?client_id={client_id}&response_type=code&scope=repository"
            ),
            VcsType::AzureDevops => format!(
                "{endpoint}/oauth2/authorize?client_id={client_id}&response_type=Assertion&scope=vso.code+vso.code_status"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VcsState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub vcs_type: ValueString<'static>,
    pub client_id: ValueString<'static>,
    pub client_secret: ValueString<'static>,
    pub endpoint: ValueString<'static>,
    pub api_url: ValueString<'static>,
    pub status: ValueString<'static>,
    pub connect_url: ValueString<'static>,
}

record!(VcsState {
    id,
    organization_id,
    name,
    description,
    vcs_type,
    client_id,
    client_secret,
    endpoint,
    api_url,
    status,
    connect_url
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::text("name", "VCS connection name"),
        Field::text("description", "VCS connection description").optional(),
        Field::text("vcs_type", "Kind of VCS (GITHUB, GITLAB, BITBUCKET or AZURE_DEVOPS)")
            .wire("vcsType")
            .optional()
            .default_text("GITHUB")
            .one_of(VcsType::NAMES),
        Field::text("client_id", "OAuth application client id").wire("clientId"),
        Field::text("client_secret", "OAuth application client secret")
            .wire("clientSecret")
            .sensitive(),
        Field::text("endpoint", "VCS web endpoint, defaults to the public service")
            .optional_computed()
            .url(),
        Field::text("api_url", "VCS API endpoint, defaults to the public service")
            .wire("apiUrl")
            .optional_computed()
            .url(),
        Field::text("status", "Connection status, PENDING until the OAuth flow completes")
            .computed()
            .default_text("PENDING"),
        Field::text("connect_url", "Page completing the OAuth connection")
            .computed()
            .local(),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct Vcs;

impl Entity for Vcs {
    const NAME: &'static str = "VCS connection";
    const KIND: &'static str = "vcs";
    const DESCRIPTION: &'static str =
        "Create an OAuth connection to a VCS hosting private repositories.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];
    const DELETION: Deletion = Deletion::Remove(DeleteCheck::NoContent);

    type State = VcsState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("organization/{}/vcs", known(&state.organization_id)?))
    }

    fn plan(state: &mut Self::State, config: &Self::State) {
        let Some(vcs_type) = known(&state.vcs_type).and_then(VcsType::parse) else {
            if config.endpoint.is_null() {
                state.endpoint = Value::Unknown;
            }
            if config.api_url.is_null() {
                state.api_url = Value::Unknown;
            }
            state.connect_url = Value::Unknown;
            return;
        };

        if config.endpoint.is_null() {
            state.endpoint = Value::Value(Cow::Borrowed(vcs_type.endpoint()));
        }
        if config.api_url.is_null() {
            state.api_url = Value::Value(Cow::Borrowed(vcs_type.api_url()));
        }
        state.connect_url = match (known(&state.endpoint), known(&state.client_id)) {
            (Some(endpoint), Some(client_id)) => {
                Value::Value(Cow::Owned(vcs_type.connect_url(endpoint, client_id)))
            }
            _ => Value::Unknown,
        };
    }

    fn applied(state: &Self::State, diags: &mut Diagnostics) {
        if known(&state.status) == Some("PENDING") {
            diags.root_warning(
                "VCS connection pending",
                format!(
                    "The connection `{}` must be authorized before Terrakube can use it, visit: {}",
                    known(&state.name).unwrap_or_default(),
                    known(&state.connect_url).unwrap_or("the Terrakube UI"),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &'static str) -> ValueString<'static> {
        Value::Value(Cow::Borrowed(value))
    }

    #[test]
    fn defaults_follow_vcs_type() {
        let config = VcsState {
            vcs_type: text("GITLAB"),
            client_id: text("abc"),
            ..Default::default()
        };
        let mut state = VcsState {
            endpoint: Value::Unknown,
            api_url: Value::Unknown,
            connect_url: Value::Unknown,
            ..config.clone()
        };
        Vcs::plan(&mut state, &config);

        assert_eq!(state.endpoint, text("https://gitlab.com"));
        assert_eq!(state.api_url, text("https://gitlab.com/api/v4"));
        assert_eq!(
            state.connect_url,
            text("https://gitlab.com/oauth/authorize?client_id=abc&response_type=code&scope=api")
        );
    }

    #[test]
    fn configured_endpoint_is_kept() {
        let config = VcsState {
            vcs_type: text("GITHUB"),
            client_id: text("abc"),
            endpoint: text("https://github.example.com"),
            ..Default::default()
        };
        let mut state = VcsState {
            api_url: Value::Unknown,
            connect_url: Value::Unknown,
            ..config.clone()
        };
        Vcs::plan(&mut state, &config);

        assert_eq!(state.endpoint, text("https://github.example.com"));
        assert_eq!(state.api_url, text("https://api.github.com"));
        assert_eq!(
            state.connect_url,
            text("https://github.example.com/login/oauth/authorize?client_id=abc&allow_signup=false&scope=repo")
        );
    }

    #[test]
    fn pending_status_warns() {
        let mut diags = Diagnostics::default();
        Vcs::applied(
            &VcsState {
                status: text("PENDING"),
                ..Default::default()
            },
            &mut diags,
        );
        assert_eq!(diags.warnings.len(), 1);

        let mut diags = Diagnostics::default();
        Vcs::applied(
            &VcsState {
                status: text("COMPLETED"),
                ..Default::default()
            },
            &mut diags,
        );
        assert!(diags.warnings.is_empty());
    }
}
