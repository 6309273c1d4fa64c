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
use tf_provider::value::{Value, ValueString};

use crate::fields::{record, Field};
use crate::utils::known;

use super::Entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub manage_workspace: Value<bool>,
    pub manage_module: Value<bool>,
    pub manage_provider: Value<bool>,
    pub manage_vcs: Value<bool>,
    pub manage_template: Value<bool>,
}

record!(TeamState {
    id,
    organization_id,
    name,
    manage_workspace,
    manage_module,
    manage_provider,
    manage_vcs,
    manage_template
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::text("name", "Team name, matching the group of the identity provider"),
        Field::flag("manage_workspace", "Allow the team to manage workspaces")
            .wire("manageWorkspace")
            .optional()
            .default_flag(false),
        Field::flag("manage_module", "Allow the team to manage modules")
            .wire("manageModule")
            .optional()
            .default_flag(false),
        Field::flag("manage_provider", "Allow the team to manage providers")
            .wire("manageProvider")
            .optional()
            .default_flag(false),
        Field::flag("manage_vcs", "Allow the team to manage VCS connections")
            .wire("manageVcs")
            .optional()
            .default_flag(false),
        Field::flag("manage_template", "Allow the team to manage templates")
            .wire("manageTemplate")
            .optional()
            .default_flag(false),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct Team;

impl Entity for Team {
    const NAME: &'static str = "team";
    const KIND: &'static str = "team";
    const DESCRIPTION: &'static str = "Grant permissions on an organization to a team.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];

    type State = TeamState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("organization/{}/team", known(&state.organization_id)?))
    }
}
