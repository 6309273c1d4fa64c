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

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tf_provider::value::ValueString;

use crate::fields::{record, Field};
use crate::utils::known;

use super::Entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub url: ValueString<'static>,
}

record!(AgentState {
    id,
    organization_id,
    name,
    description,
    url
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::text("name", "Agent name"),
        Field::text("description", "Agent description").optional(),
        Field::text("url", "URL the executor agent listens on").url(),
    ];
}

/// Executor agent hosted outside of Terrakube
#[derive(Debug, Default, Clone)]
pub struct Agent;

impl Entity for Agent {
    const NAME: &'static str = "self-hosted agent";
    const KIND: &'static str = "agent";
    const DESCRIPTION: &'static str = "Register a self-hosted executor agent.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];

    type State = AgentState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("organization/{}/agent", known(&state.organization_id)?))
    }
}
