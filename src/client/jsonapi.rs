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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

pub const CONTENT_TYPE: &str = "application/vnd.api+json";
pub const ATOMIC_CONTENT_TYPE: &str = "application/vnd.api+json;ext=\"https://jsonapi.org/ext/atomic\"";

/// Top-level JSON:API document carrying primary data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Json>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
}

impl ResourceObject {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Json> {
        self.attributes.get(name).filter(|value| !value.is_null())
    }

    pub fn flag(&self, name: &str) -> bool {
        self.attribute(name)
            .and_then(Json::as_bool)
            .unwrap_or_default()
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(Json::as_str)
    }

    pub fn relate(&mut self, name: impl Into<String>, kind: impl Into<String>, id: impl Into<String>) {
        self.relationships.insert(
            name.into(),
            Relationship {
                data: Some(Linkage::One(Identifier {
                    kind: kind.into(),
                    id: id.into(),
                })),
            },
        );
    }

    /// Identifier of a to-one relationship
    pub fn related(&self, name: &str) -> Option<&str> {
        match self.relationships.get(name)?.data.as_ref()? {
            Linkage::One(identifier) => Some(identifier.id.as_str()),
            Linkage::Many(_) => None,
        }
    }

    /// Identifiers of a to-many relationship
    pub fn related_many(&self, name: &str) -> impl Iterator<Item = &str> {
        let many = match self.relationships.get(name).and_then(|rel| rel.data.as_ref()) {
            Some(Linkage::Many(many)) => many.as_slice(),
            _ => &[],
        };
        many.iter().map(|identifier| identifier.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    One(Identifier),
    Many(Vec<Identifier>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Add,
    Update,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicOperation {
    pub op: Op,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ResourceObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomicRequest {
    #[serde(rename = "atomic:operations")]
    pub operations: Vec<AtomicOperation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtomicResult {
    #[serde(default)]
    pub data: Option<ResourceObject>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtomicResponse {
    #[serde(rename = "atomic:results", default)]
    pub results: Vec<AtomicResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorObject {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDocument {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

/// Extract the first error detail of an error document, with HTML entities decoded
pub fn error_detail(body: &[u8]) -> Option<String> {
    let document: ErrorDocument = serde_json::from_slice(body).ok()?;
    let error = document.errors.into_iter().next()?;
    let detail = error.detail.or(error.title)?;
    Some(html_escape::decode_html_entities(&detail).into_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn relationship_linkage() {
        let object: ResourceObject = serde_json::from_value(json!({
            "type": "webhook",
            "id": "wh-1",
            "attributes": {"event": "PUSH", "templateId": null},
            "relationships": {
                "workspace": {"data": {"type": "workspace", "id": "ws-1"}},
                "events": {"data": [{"type": "webhook_event", "id": "ev-1"}, {"type": "webhook_event", "id": "ev-2"}]},
                "vcs": {"data": null}
            }
        }))
        .unwrap();

        assert_eq!(object.related("workspace"), Some("ws-1"));
        assert_eq!(object.related("vcs"), None);
        assert_eq!(
            object.related_many("events").collect::<Vec<_>>(),
            vec!["ev-1", "ev-2"]
        );
        assert_eq!(object.text("event"), Some("PUSH"));
        assert_eq!(object.attribute("templateId"), None);
    }

    #[test]
    fn atomic_envelope() {
        let request = AtomicRequest {
            operations: vec![AtomicOperation {
                op: Op::Remove,
                href: "/webhook/wh-1/events/ev-1".into(),
                data: None,
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"atomic:operations": [{"op": "remove", "href": "/webhook/wh-1/events/ev-1"}]})
        );
    }

    #[test]
    fn error_detail_is_unescaped() {
        let body = br#"{"errors":[{"detail":"Invalid value: &#39;main&#39; &amp; more"}]}"#;
        assert_eq!(
            error_detail(body).as_deref(),
            Some("Invalid value: 'main' & more")
        );
        assert_eq!(error_detail(b"<html>oops</html>"), None);
    }
}
