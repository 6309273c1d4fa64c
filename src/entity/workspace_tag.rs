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
pub struct WorkspaceTagState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub workspace_id: ValueString<'static>,
    pub tag_id: ValueString<'static>,
}

record!(WorkspaceTagState {
    id,
    organization_id,
    workspace_id,
    tag_id
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::path("workspace_id", "Terrakube workspace id"),
        Field::text("tag_id", "Organization tag attached to the workspace")
            .wire("tagId")
            .replace(),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct WorkspaceTag;

impl Entity for WorkspaceTag {
    const NAME: &'static str = "workspace tag";
    const KIND: &'static str = "workspacetag";
    const DESCRIPTION: &'static str = "Attach an organization tag to a workspace.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "workspace_id", "id"];

    type State = WorkspaceTagState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/workspace/{}/workspaceTag",
            known(&state.organization_id)?,
            known(&state.workspace_id)?
        ))
    }
}
