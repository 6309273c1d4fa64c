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

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::info;

use tf_provider::data_source::DynamicDataSource;
use tf_provider::resource::DynamicResource;
use tf_provider::value::{Value, ValueString};
use tf_provider::{map, AttributePath, Block, Description, Diagnostics, Provider, Schema, ValueEmpty};

use crate::client::{Client, ClientHandle, HttpTransport};
use crate::entity::{
    agent::Agent,
    collection::{Collection, CollectionItem, CollectionReference},
    lookup::{OrganizationLookup, SshLookup, TagLookup, TemplateLookup, VcsLookup},
    module::Module,
    organization::{Organization, OrganizationTag},
    ssh::Ssh,
    team::Team,
    template::Template,
    variable::{OrganizationVariable, WorkspaceVariable},
    vcs::Vcs,
    workspace::{WorkspaceCli, WorkspaceVcs},
    workspace_access::WorkspaceAccess,
    workspace_schedule::WorkspaceSchedule,
    workspace_tag::WorkspaceTag,
};
use crate::fields::{check, record, validate, Check, Field};
use crate::rest::{LookupDataSource, RestResource};
use crate::team_token::TeamTokenResource;
use crate::utils::Reported;
use crate::webhook::{WebhookEventResource, WebhookResource};

pub const ENDPOINT_VAR: &str = "TERRAKUBE_ENDPOINT";
pub const TOKEN_VAR: &str = "TERRAKUBE_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub endpoint: ValueString<'static>,
    pub token: ValueString<'static>,
    pub insecure_http_client: Value<bool>,
}

record!(ProviderConfig {
    endpoint,
    token,
    insecure_http_client
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::text("endpoint", "Terrakube API URL, defaults to $TERRAKUBE_ENDPOINT")
            .optional()
            .url(),
        Field::text("token", "Terrakube personal or team token, defaults to $TERRAKUBE_TOKEN")
            .optional()
            .sensitive(),
        Field::flag("insecure_http_client", "Skip the verification of TLS certificates").optional(),
    ];
}

/// Value of a setting, falling back to an environment variable
fn setting(
    value: &ValueString,
    name: &'static str,
    var: &str,
    diags: &mut Diagnostics,
) -> Option<String> {
    match value {
        Value::Value(value) if !value.is_empty() => Some(value.to_string()),
        Value::Unknown => {
            diags.error(
                "Unknown provider configuration",
                format!("`{name}` must be known when the provider is configured."),
                AttributePath::new(name),
            );
            None
        }
        _ => match std::env::var(var) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => {
                diags.error(
                    format!("Missing `{name}`"),
                    format!("Set `{name}` in the provider block or the {var} environment variable."),
                    AttributePath::new(name),
                );
                None
            }
        },
    }
}

#[derive(Debug, Default, Clone)]
pub struct TerrakubeProvider {
    client: ClientHandle,
}

impl TerrakubeProvider {
    /// Client of a configured provider, read from `config` and the environment
    fn client(config: &ProviderConfig, diags: &mut Diagnostics) -> Option<Client> {
        let endpoint = setting(&config.endpoint, "endpoint", ENDPOINT_VAR, diags);
        let token = setting(&config.token, "token", TOKEN_VAR, diags);
        let (endpoint, token) = (endpoint?, token?);

        check(Check::Url, &endpoint, AttributePath::new("endpoint"), diags);
        if !diags.errors.is_empty() {
            return None;
        }

        let insecure = matches!(config.insecure_http_client, Value::Value(true));
        let transport =
            HttpTransport::new(insecure).reported(diags, "Unable to build the HTTP client")?;
        Some(Client::new(endpoint, token, Arc::new(transport)))
    }
}

#[async_trait]
impl Provider for TerrakubeProvider {
    type Config<'a> = ProviderConfig;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                attributes: FIELDS
                    .iter()
                    .map(|field| (field.name.to_owned(), field.attribute()))
                    .collect(),
                description: Description::plain("terrakube"),
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        validate(&FIELDS, &config, diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let client = Self::client(&config, diags)?;
        info!(?client, %terraform_version, "Configuring Terrakube provider");
        self.client.set(client).await;
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
        let client = &self.client;
        Some(map! {
            "organization"            => RestResource::<Organization>::new(client.clone()),
            "organization_tag"        => RestResource::<OrganizationTag>::new(client.clone()),
            "organization_variable"   => RestResource::<OrganizationVariable>::new(client.clone()),
            "organization_template"   => RestResource::<Template>::new(client.clone()),
            "team"                    => RestResource::<Team>::new(client.clone()),
            "team_token"              => TeamTokenResource::new(client.clone()),
            "workspace_cli"           => RestResource::<WorkspaceCli>::new(client.clone()),
            "workspace_vcs"           => RestResource::<WorkspaceVcs>::new(client.clone()),
            "workspace_variable"      => RestResource::<WorkspaceVariable>::new(client.clone()),
            "workspace_tag"           => RestResource::<WorkspaceTag>::new(client.clone()),
            "workspace_access"        => RestResource::<WorkspaceAccess>::new(client.clone()),
            "workspace_schedule"      => RestResource::<WorkspaceSchedule>::new(client.clone()),
            "workspace_webhook"       => WebhookResource::new(client.clone()),
            "workspace_webhook_v2"    => WebhookResource::new(client.clone()),
            "workspace_webhook_event" => WebhookEventResource::new(client.clone()),
            "vcs"                     => RestResource::<Vcs>::new(client.clone()),
            "ssh"                     => RestResource::<Ssh>::new(client.clone()),
            "module"                  => RestResource::<Module>::new(client.clone()),
            "self_hosted_agent"       => RestResource::<Agent>::new(client.clone()),
            "collection"              => RestResource::<Collection>::new(client.clone()),
            "collection_item"         => RestResource::<CollectionItem>::new(client.clone()),
            "collection_reference"    => RestResource::<CollectionReference>::new(client.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
        let client = &self.client;
        Some(map! {
            "organization"          => LookupDataSource::<OrganizationLookup>::new(client.clone()),
            "organization_tag"      => LookupDataSource::<TagLookup>::new(client.clone()),
            "organization_template" => LookupDataSource::<TemplateLookup>::new(client.clone()),
            "ssh"                   => LookupDataSource::<SshLookup>::new(client.clone()),
            "vcs"                   => LookupDataSource::<VcsLookup>::new(client.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn text(value: &str) -> ValueString<'static> {
        Value::Value(value.to_owned().into())
    }

    fn clear_env() {
        std::env::remove_var(ENDPOINT_VAR);
        std::env::remove_var(TOKEN_VAR);
    }

    #[test]
    #[serial]
    fn configured_values_win() {
        clear_env();
        std::env::set_var(ENDPOINT_VAR, "https://env.example");
        let config = ProviderConfig {
            endpoint: text("https://terrakube.example/"),
            token: text("secret"),
            insecure_http_client: Value::Null,
        };

        let mut diags = Diagnostics::default();
        let client = TerrakubeProvider::client(&config, &mut diags).unwrap();
        assert!(diags.errors.is_empty());
        assert_eq!(client.endpoint(), "https://terrakube.example");
        assert!(!format!("{client:?}").contains("secret"));
        clear_env();
    }

    #[test]
    #[serial]
    fn environment_fallback() {
        clear_env();
        std::env::set_var(ENDPOINT_VAR, "https://env.example");
        std::env::set_var(TOKEN_VAR, "env-token");

        let mut diags = Diagnostics::default();
        let client = TerrakubeProvider::client(&ProviderConfig::default(), &mut diags).unwrap();
        assert!(diags.errors.is_empty());
        assert_eq!(client.endpoint(), "https://env.example");
        clear_env();
    }

    #[test]
    #[serial]
    fn missing_settings() {
        clear_env();
        let mut diags = Diagnostics::default();
        assert!(TerrakubeProvider::client(&ProviderConfig::default(), &mut diags).is_none());
        assert_eq!(diags.errors.len(), 2);
    }

    #[test]
    #[serial]
    fn unknown_settings() {
        clear_env();
        std::env::set_var(TOKEN_VAR, "env-token");
        let config = ProviderConfig {
            endpoint: Value::Unknown,
            ..Default::default()
        };
        let mut diags = Diagnostics::default();
        assert!(TerrakubeProvider::client(&config, &mut diags).is_none());
        assert_eq!(diags.errors.len(), 1);
        clear_env();
    }

    #[test]
    #[serial]
    fn invalid_endpoint() {
        clear_env();
        let config = ProviderConfig {
            endpoint: text("terrakube.example"),
            token: text("secret"),
            insecure_http_client: Value::Value(true),
        };
        let mut diags = Diagnostics::default();
        assert!(TerrakubeProvider::client(&config, &mut diags).is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[test]
    fn registry() {
        let provider = TerrakubeProvider::default();
        let mut diags = Diagnostics::default();
        let resources = provider.get_resources(&mut diags).unwrap();
        assert_eq!(resources.len(), 22);
        assert!(resources.contains_key("workspace_webhook_event"));
        let data_sources = provider.get_data_sources(&mut diags).unwrap();
        assert_eq!(data_sources.len(), 5);
    }
}
