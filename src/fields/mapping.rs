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

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value as Json;
use tf_provider::Value;

use crate::client::{ClientError, Linkage, ResourceObject};
use crate::utils::DisplayJoinable;

use super::{Field, FieldValue, Kind, Record, Secret, Wire};

/// Build the JSON:API resource sent for `state`
///
/// Null and unknown values are left out of the payload.
pub fn marshal<S: Record>(kind: &str, fields: &[Field], state: &S) -> ResourceObject {
    let mut object = ResourceObject::new(kind);

    for field in fields {
        let Some(value) = state.get(field.name) else {
            continue;
        };
        match field.wire {
            Wire::Attribute(wire) => {
                if let Some(json) = encode(field.kind, &value) {
                    object.attributes.insert(wire.to_owned(), json);
                }
            }
            Wire::Relation { name, kind } => {
                if let FieldValue::Text(Value::Value(id)) = &value {
                    if !id.is_empty() {
                        object.relate(name, kind, id.as_ref());
                    }
                }
            }
            Wire::Path | Wire::Local => (),
        }
    }

    object
}

/// Copy the server view of a resource into `state`
///
/// Secrets withheld by the server keep their value from `known`.
pub fn unmarshal<S: Record>(
    fields: &[Field],
    object: &ResourceObject,
    known: &S,
    state: &mut S,
) -> Result<(), ClientError> {
    if let Some(id) = &object.id {
        state.set("id", FieldValue::text(id.as_str()));
    }

    for field in fields {
        let current = known
            .get(field.name)
            .unwrap_or_else(|| FieldValue::null(field.kind));

        let value = match field.wire {
            Wire::Attribute(wire) => {
                if withheld(field.secret, object) {
                    current
                } else {
                    let decoded = decode(field.kind, object.attribute(wire)).map_err(|message| {
                        ClientError::Unmarshal {
                            message: format!("attribute `{wire}`: {message}"),
                            body: serde_json::to_string(object).unwrap_or_default(),
                        }
                    })?;
                    keep_null(decoded, &current)
                }
            }
            Wire::Relation { name, .. } => match object.relationships.get(name) {
                Some(relationship) => match &relationship.data {
                    Some(Linkage::One(identifier)) => FieldValue::text(identifier.id.as_str()),
                    _ => FieldValue::null(field.kind),
                },
                None => current,
            },
            Wire::Path | Wire::Local => continue,
        };
        state.set(field.name, value);
    }

    Ok(())
}

fn withheld(secret: Secret, object: &ResourceObject) -> bool {
    match secret {
        Secret::Never => false,
        Secret::Always => true,
        Secret::WhenFlag(flag) => object.flag(flag),
    }
}

fn encode(kind: Kind, value: &FieldValue) -> Option<Json> {
    match (kind, value) {
        (Kind::Encoded, FieldValue::Text(Value::Value(text))) => {
            Some(Json::String(STANDARD.encode(text.as_bytes())))
        }
        (_, FieldValue::Text(Value::Value(text))) => Some(Json::String(text.to_string())),
        (_, FieldValue::Flag(Value::Value(flag))) => Some(Json::Bool(*flag)),
        (_, FieldValue::Number(Value::Value(number))) => Some(Json::from(*number)),
        (_, FieldValue::Texts(Value::Value(items))) => Some(Json::String(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Value(item) => Some(item.as_ref()),
                    _ => None,
                })
                .join_with(",")
                .to_string(),
        )),
        _ => None,
    }
}

fn decode(kind: Kind, json: Option<&Json>) -> Result<FieldValue, String> {
    let Some(json) = json else {
        return Ok(match kind {
            Kind::Text | Kind::Encoded => FieldValue::text(""),
            Kind::Flag => FieldValue::Flag(Value::Value(false)),
            Kind::Texts => FieldValue::Texts(Value::Value(Vec::new())),
            Kind::Number => FieldValue::Number(Value::Null),
        });
    };

    match kind {
        Kind::Text => Ok(FieldValue::text(match json {
            Json::String(text) => text.clone(),
            other => other.to_string(),
        })),
        Kind::Encoded => {
            let text = json.as_str().ok_or("expected a base64 string")?;
            let bytes = STANDARD.decode(text).map_err(|err| err.to_string())?;
            Ok(FieldValue::text(
                String::from_utf8(bytes).map_err(|err| err.to_string())?,
            ))
        }
        Kind::Flag => json
            .as_bool()
            .map(|flag| FieldValue::Flag(Value::Value(flag)))
            .ok_or_else(|| format!("expected a boolean, got {json}")),
        Kind::Number => json
            .as_i64()
            .map(|number| FieldValue::Number(Value::Value(number)))
            .ok_or_else(|| format!("expected an integer, got {json}")),
        Kind::Texts => match json {
            Json::String(text) => Ok(FieldValue::Texts(Value::Value(split(text)))),
            Json::Array(items) => Ok(FieldValue::Texts(Value::Value(
                items
                    .iter()
                    .filter_map(Json::as_str)
                    .map(|item| Value::Value(Cow::Owned(item.to_owned())))
                    .collect(),
            ))),
            other => Err(format!("expected a list of strings, got {other}")),
        },
    }
}

fn split(text: &str) -> Vec<tf_provider::value::ValueString<'static>> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',')
        .map(|item| Value::Value(Cow::Owned(item.to_owned())))
        .collect()
}

/// A blank server value stays null when it was not set locally
fn keep_null(decoded: FieldValue, current: &FieldValue) -> FieldValue {
    let blank = match &decoded {
        FieldValue::Text(Value::Value(text)) => text.is_empty(),
        FieldValue::Texts(Value::Value(items)) => items.is_empty(),
        _ => false,
    };
    if blank && current.is_null() {
        current.clone()
    } else {
        decoded
    }
}
