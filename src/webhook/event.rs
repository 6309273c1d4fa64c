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
use tracing::{debug, info};
use uuid::Uuid;

use tf_provider::value::{ValueList, ValueNumber, ValueString};

use crate::client::{Client, ClientError, DeleteCheck, Op, ResourceObject};
use crate::entity::Entity;
use crate::fields::{record, Field, Record};
use crate::rest::RestResource;
use crate::utils::known;

use super::{apply, fetch, remove, EVENTS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookEventState {
    pub id: ValueString<'static>,
    pub webhook_id: ValueString<'static>,
    pub event: ValueString<'static>,
    pub branch: ValueList<ValueString<'static>>,
    pub path: ValueList<ValueString<'static>>,
    pub priority: ValueNumber,
    pub template_id: ValueString<'static>,
}

record!(WebhookEventState {
    id,
    webhook_id,
    event,
    branch,
    path,
    priority,
    template_id
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("webhook_id", "Webhook the event belongs to"),
        Field::text("event", "VCS event")
            .optional()
            .default_text("PUSH")
            .one_of(EVENTS),
        Field::texts("branch", "Branches matching the event"),
        Field::texts("path", "Changed files matching the event"),
        Field::number("priority", "Evaluation order among the webhook events").optional_computed(),
        Field::text("template_id", "Template run when the event matches").wire("templateId"),
    ];
}

/// Where the webhook stands regarding one of its events
enum Parent {
    Missing,
    Unrelated,
    Related(ResourceObject),
}

async fn parent(client: &Client, webhook_id: &str, id: &str) -> Result<Parent, ClientError> {
    Ok(match fetch(client, &format!("webhook/{webhook_id}")).await? {
        None => Parent::Missing,
        Some(webhook) if webhook.related_many("events").any(|event| event == id) => {
            Parent::Related(webhook)
        }
        Some(_) => Parent::Unrelated,
    })
}

fn unlinked(webhook_id: &str, relationship: &str) -> ClientError {
    ClientError::Unmarshal {
        message: format!("webhook `{webhook_id}` has no `{relationship}` relationship"),
        body: String::new(),
    }
}

/// Webhook path below its workspace, the only one serving the event list
async fn nested(client: &Client, webhook: &ResourceObject) -> Result<String, ClientError> {
    let webhook_id = webhook.id.as_deref().unwrap_or_default();
    let workspace_id = webhook
        .related("workspace")
        .ok_or_else(|| unlinked(webhook_id, "workspace"))?;
    let organization_id = match webhook.related("organization") {
        Some(organization_id) => organization_id.to_owned(),
        None => client
            .get(&format!("workspace/{workspace_id}"))
            .await?
            .related("organization")
            .map(str::to_owned)
            .ok_or_else(|| unlinked(webhook_id, "organization"))?,
    };
    Ok(format!(
        "organization/{organization_id}/workspace/{workspace_id}/webhook/{webhook_id}"
    ))
}

/// The webhook does not return its events inline, they are looked up in the event list
async fn scan(client: &Client, nested: &str, id: &str) -> Result<Option<ResourceObject>, ClientError> {
    debug!(%nested, %id, "Scanning webhook events");
    let events = client.list(&format!("{nested}/events")).await?;
    Ok(events
        .into_iter()
        .find(|event| event.id.as_deref() == Some(id)))
}

/// Event fetched back after a mutation, it must be listed
async fn written(client: &Client, nested: &str, id: &str) -> Result<ResourceObject, ClientError> {
    scan(client, nested, id)
        .await?
        .ok_or_else(|| ClientError::Unmarshal {
            message: format!("event `{id}` is not listed by `{nested}`"),
            body: String::new(),
        })
}

/// Event of a webhook, one per branch and path filter
#[derive(Debug, Default, Clone)]
pub struct WebhookEvent;

pub type WebhookEventResource = RestResource<WebhookEvent>;

#[async_trait]
impl Entity for WebhookEvent {
    const NAME: &'static str = "webhook event";
    const KIND: &'static str = "webhook_event";
    const DESCRIPTION: &'static str =
        "Trigger a template from a webhook for a set of branches and paths.";
    const IMPORT_KEYS: &'static [&'static str] = &["webhook_id", "id"];

    type State = WebhookEventState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("webhook/{}/events", known(&state.webhook_id)?))
    }

    async fn load(
        client: &Client,
        state: &Self::State,
        path: &str,
    ) -> Result<Option<ResourceObject>, ClientError> {
        let (Some(webhook_id), Some(id)) = (known(&state.webhook_id), state.id()) else {
            return Ok(None);
        };
        let Parent::Related(webhook) = parent(client, webhook_id, &id).await? else {
            info!(%path, "Webhook no longer holds the event");
            return Ok(None);
        };
        scan(client, &nested(client, &webhook).await?, &id).await
    }

    async fn insert(
        client: &Client,
        state: &Self::State,
        collection: &str,
        object: ResourceObject,
    ) -> Result<ResourceObject, ClientError> {
        let webhook_id = known(&state.webhook_id).unwrap_or_default();
        // The webhook must exist before an event is attached to it
        let webhook = client.get(&format!("webhook/{webhook_id}")).await?;
        let nested = nested(client, &webhook).await?;

        let id = apply(
            client,
            Op::Add,
            format!("/{collection}"),
            object.with_id(Uuid::new_v4().to_string()),
        )
        .await?;
        written(client, &nested, &id).await
    }

    async fn replace(
        client: &Client,
        state: &Self::State,
        _path: &str,
        object: ResourceObject,
    ) -> Result<ResourceObject, ClientError> {
        let webhook_id = known(&state.webhook_id).unwrap_or_default();
        let id = object.id.clone().unwrap_or_default();
        let webhook = client.get(&format!("webhook/{webhook_id}")).await?;
        let nested = nested(client, &webhook).await?;

        apply(client, Op::Update, format!("/{nested}/events/{id}"), object).await?;
        written(client, &nested, &id).await
    }

    async fn remove(
        client: &Client,
        state: &Self::State,
        path: &str,
        _check: DeleteCheck,
    ) -> Result<(), ClientError> {
        let webhook_id = known(&state.webhook_id).unwrap_or_default();
        let id = state.id().unwrap_or_default();
        if !matches!(parent(client, webhook_id, &id).await?, Parent::Related(_)) {
            info!(%path, "Webhook event already deleted");
            return Ok(());
        }
        remove(client, format!("/{path}")).await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::{json, Value as Json};
    use tf_provider::value::Value;
    use tf_provider::{Diagnostics, Resource};

    use crate::client::testing::{body, MockTransport, ENDPOINT};

    use super::*;

    const NESTED: &str = "organization/org-1/workspace/ws-1/webhook/wh-1";

    fn text(value: &str) -> ValueString<'static> {
        Value::Value(value.to_owned().into())
    }

    fn state(id: ValueString<'static>) -> WebhookEventState {
        WebhookEventState {
            id,
            webhook_id: text("wh-1"),
            event: text("PUSH"),
            branch: Value::Value(vec![text("main")]),
            path: Value::Value(vec![text("infra/*")]),
            priority: Value::Unknown,
            template_id: text("tpl-1"),
        }
    }

    fn webhook(events: &[&str]) -> Json {
        let events: Vec<Json> = events
            .iter()
            .map(|id| json!({"type": "webhook_event", "id": id}))
            .collect();
        json!({"data": {
            "type": "webhook",
            "id": "wh-1",
            "relationships": {
                "events": {"data": events},
                "workspace": {"data": {"type": "workspace", "id": "ws-1"}},
                "organization": {"data": {"type": "organization", "id": "org-1"}}
            }
        }})
    }

    fn events() -> Json {
        json!({"data": [
            {"type": "webhook_event", "id": "ev-0", "attributes": {
                "event": "PUSH", "branch": "develop", "path": "", "priority": 1, "templateId": "tpl-0"
            }},
            {"type": "webhook_event", "id": "ev-1", "attributes": {
                "event": "PUSH", "branch": "main", "path": "infra/*", "priority": 2, "templateId": "tpl-1"
            }}
        ]})
    }

    #[tokio::test]
    async fn create_then_scan() {
        let transport = MockTransport::new();
        transport
            .reply(200, webhook(&[]))
            .reply(
                200,
                json!({"atomic:results": [{"data": {"type": "webhook_event", "id": "ev-1"}}]}),
            )
            .reply(200, events());
        let resource = WebhookEventResource::new(transport.handle().await);

        let mut diags = Diagnostics::default();
        let planned = state(Value::Unknown);
        let (created, _) = Resource::create(
            &resource,
            &mut diags,
            planned.clone(),
            planned,
            Default::default(),
            Default::default(),
        )
        .await
        .unwrap();

        assert!(diags.errors.is_empty());
        assert_eq!(created.id, text("ev-1"));
        assert_eq!(created.priority, Value::Value(2));

        let requests = transport.requests();
        assert_eq!(requests[0].url, format!("{ENDPOINT}/api/v1/webhook/wh-1"));
        let operation = &body(&requests[1])["atomic:operations"][0];
        assert_eq!(operation["op"], "add");
        assert_eq!(operation["href"], "/webhook/wh-1/events");
        assert!(Uuid::parse_str(operation["data"]["id"].as_str().unwrap()).is_ok());
        assert!(operation["data"]["attributes"].get("priority").is_none());
        assert_eq!(requests[2].url, format!("{ENDPOINT}/api/v1/{NESTED}/events"));
    }

    #[tokio::test]
    async fn create_on_missing_webhook() {
        let transport = MockTransport::new();
        transport.reply(404, json!({"errors": [{"detail": "not found"}]}));
        let resource = WebhookEventResource::new(transport.handle().await);

        let mut diags = Diagnostics::default();
        let planned = state(Value::Unknown);
        let created = Resource::create(
            &resource,
            &mut diags,
            planned.clone(),
            planned,
            Default::default(),
            Default::default(),
        )
        .await;

        assert!(created.is_none());
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn update_addresses_nested_event() {
        let transport = MockTransport::new();
        transport
            .reply(200, webhook(&["ev-0", "ev-1"]))
            .reply(
                200,
                json!({"atomic:results": [{"data": {"type": "webhook_event", "id": "ev-1"}}]}),
            )
            .reply(200, events());
        let resource = WebhookEventResource::new(transport.handle().await);

        let mut prior = state(text("ev-1"));
        prior.priority = Value::Value(2);
        prior.branch = Value::Value(vec![text("develop")]);
        let mut planned = prior.clone();
        planned.branch = Value::Value(vec![text("main")]);

        let mut diags = Diagnostics::default();
        let (updated, _) = Resource::update(
            &resource,
            &mut diags,
            prior,
            planned.clone(),
            planned.clone(),
            Default::default(),
            Default::default(),
        )
        .await
        .unwrap();

        assert!(diags.errors.is_empty());
        assert_eq!(updated, planned);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].url, format!("{ENDPOINT}/api/v1/webhook/wh-1"));
        let operation = &body(&requests[1])["atomic:operations"][0];
        assert_eq!(operation["op"], "update");
        assert_eq!(operation["href"], format!("/{NESTED}/events/ev-1"));
        assert_eq!(operation["data"]["id"], "ev-1");
        assert_eq!(operation["data"]["attributes"]["branch"], "main");
        assert_eq!(requests[2].method, Method::GET);
        assert_eq!(requests[2].url, format!("{ENDPOINT}/api/v1/{NESTED}/events"));
    }

    #[tokio::test]
    async fn update_of_unlisted_event_fails() {
        let transport = MockTransport::new();
        transport
            .reply(200, webhook(&["ev-2"]))
            .reply(
                200,
                json!({"atomic:results": [{"data": {"type": "webhook_event", "id": "ev-2"}}]}),
            )
            .reply(200, events());
        let resource = WebhookEventResource::new(transport.handle().await);

        let mut prior = state(text("ev-2"));
        prior.priority = Value::Value(3);
        let mut diags = Diagnostics::default();
        let updated = Resource::update(
            &resource,
            &mut diags,
            prior.clone(),
            prior.clone(),
            prior,
            Default::default(),
            Default::default(),
        )
        .await;

        assert!(updated.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn read_unrelated_drops_state() {
        let transport = MockTransport::new();
        transport.reply(200, webhook(&["ev-0"]));
        let resource = WebhookEventResource::new(transport.handle().await);

        let mut diags = Diagnostics::default();
        let read = Resource::read(
            &resource,
            &mut diags,
            state(text("ev-1")),
            Default::default(),
            Default::default(),
        )
        .await;

        assert!(read.is_none());
        assert!(diags.errors.is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn read_scans_events() {
        let transport = MockTransport::new();
        transport.reply(200, webhook(&["ev-0", "ev-1"])).reply(200, events());
        let resource = WebhookEventResource::new(transport.handle().await);

        let mut diags = Diagnostics::default();
        let mut prior = state(text("ev-1"));
        prior.priority = Value::Value(2);
        let (read, _) = Resource::read(
            &resource,
            &mut diags,
            prior.clone(),
            Default::default(),
            Default::default(),
        )
        .await
        .unwrap();

        assert_eq!(read, prior);
        assert_eq!(
            transport.requests()[1].url,
            format!("{ENDPOINT}/api/v1/{NESTED}/events")
        );
    }

    #[tokio::test]
    async fn organization_from_workspace() {
        let transport = MockTransport::new();
        transport
            .reply(
                200,
                json!({"data": {
                    "type": "webhook",
                    "id": "wh-1",
                    "relationships": {
                        "events": {"data": [{"type": "webhook_event", "id": "ev-1"}]},
                        "workspace": {"data": {"type": "workspace", "id": "ws-1"}}
                    }
                }}),
            )
            .reply(
                200,
                json!({"data": {
                    "type": "workspace",
                    "id": "ws-1",
                    "relationships": {"organization": {"data": {"type": "organization", "id": "org-1"}}}
                }}),
            )
            .reply(200, events());
        let resource = WebhookEventResource::new(transport.handle().await);

        let mut diags = Diagnostics::default();
        let mut prior = state(text("ev-1"));
        prior.priority = Value::Value(2);
        let (read, _) = Resource::read(
            &resource,
            &mut diags,
            prior.clone(),
            Default::default(),
            Default::default(),
        )
        .await
        .unwrap();

        assert_eq!(read, prior);
        let requests = transport.requests();
        assert_eq!(requests[1].url, format!("{ENDPOINT}/api/v1/workspace/ws-1"));
        assert_eq!(requests[2].url, format!("{ENDPOINT}/api/v1/{NESTED}/events"));
    }

    #[tokio::test]
    async fn delete_skips_absent_event() {
        let transport = MockTransport::new();
        transport.reply(200, webhook(&["ev-0"]));
        let resource = WebhookEventResource::new(transport.handle().await);

        let mut diags = Diagnostics::default();
        Resource::destroy(
            &resource,
            &mut diags,
            state(text("ev-1")),
            Default::default(),
        )
        .await
        .unwrap();

        assert!(diags.errors.is_empty());
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(transport.pending(), 0);
    }

    #[tokio::test]
    async fn delete_removes_event() {
        let transport = MockTransport::new();
        transport
            .reply(200, webhook(&["ev-1"]))
            .reply(200, json!({"atomic:results": []}));
        let resource = WebhookEventResource::new(transport.handle().await);

        let mut diags = Diagnostics::default();
        Resource::destroy(
            &resource,
            &mut diags,
            state(text("ev-1")),
            Default::default(),
        )
        .await
        .unwrap();

        assert!(diags.errors.is_empty());
        let operation = &body(&transport.requests()[1])["atomic:operations"][0];
        assert_eq!(operation["op"], "remove");
        assert_eq!(operation["href"], "/webhook/wh-1/events/ev-1");
    }
}
