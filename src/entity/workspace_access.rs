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
pub struct WorkspaceAccessState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub workspace_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub manage_state: Value<bool>,
    pub manage_workspace: Value<bool>,
    pub manage_job: Value<bool>,
}

record!(WorkspaceAccessState {
    id,
    organization_id,
    workspace_id,
    name,
    manage_state,
    manage_workspace,
    manage_job
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::path("workspace_id", "Terrakube workspace id"),
        Field::text("name", "Team granted access to the workspace").replace(),
        Field::flag("manage_state", "Allow the team to manage the workspace state")
            .wire("manageState")
            .optional()
            .default_flag(false),
        Field::flag("manage_workspace", "Allow the team to manage the workspace")
            .wire("manageWorkspace")
            .optional()
            .default_flag(false),
        Field::flag("manage_job", "Allow the team to run jobs on the workspace")
            .wire("manageJob")
            .optional()
            .default_flag(false),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct WorkspaceAccess;

impl Entity for WorkspaceAccess {
    const NAME: &'static str = "workspace access";
    const KIND: &'static str = "access";
    const DESCRIPTION: &'static str = "Grant a team access to a single workspace.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "workspace_id", "id"];

    type State = WorkspaceAccessState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/workspace/{}/access",
            known(&state.organization_id)?,
            known(&state.workspace_id)?
        ))
    }
}
