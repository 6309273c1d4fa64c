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

use tf_provider::{AttributePath, Value};

use super::{Field, FieldValue, Record, Wire};

/// Fill the planned state of a resource about to be created
pub fn plan_create<S: Record>(fields: &[Field], state: &mut S) {
    state.set("id", FieldValue::Text(Value::Unknown));

    for field in fields {
        let Some(value) = state.get(field.name) else {
            continue;
        };
        if !value.is_null() {
            continue;
        }
        if let Some(default) = &field.default {
            state.set(field.name, default.clone());
        } else if field.presence.is_computed() {
            state.set(field.name, FieldValue::unknown(field.kind));
        }
    }
}

/// Fill the planned state of an update, and return the attributes forcing a replacement
pub fn plan_update<S: Record>(
    fields: &[Field],
    prior: &S,
    config: &S,
    state: &mut S,
) -> Vec<AttributePath> {
    if let Some(id) = prior.get("id") {
        state.set("id", id);
    }

    let mut replace = Vec::new();
    for field in fields {
        let (Some(value), Some(previous)) = (state.get(field.name), prior.get(field.name)) else {
            continue;
        };
        let configured = config
            .get(field.name)
            .is_some_and(|value| !value.is_null());

        if value.is_null() {
            if let Some(default) = &field.default {
                state.set(field.name, default.clone());
            }
        } else if value.is_unknown()
            && !configured
            && field.presence.is_computed()
            && field.wire != Wire::Local
        {
            // Server-computed values do not change on update
            state.set(field.name, previous.clone());
        }

        if field.replace && state.get(field.name).as_ref() != Some(&previous) {
            replace.push(AttributePath::new(field.name));
        }
    }
    replace
}

/// Replace values left unknown after an apply by null
pub fn settle<S: Record>(fields: &[Field], state: &mut S) {
    for field in fields {
        if state.get(field.name).is_some_and(|value| value.is_unknown()) {
            state.set(field.name, FieldValue::null(field.kind));
        }
    }
}
