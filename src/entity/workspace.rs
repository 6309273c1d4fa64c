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
use serde_json::Value as Json;
use tf_provider::value::ValueString;

use crate::client::ResourceObject;
use crate::fields::{record, Field};
use crate::utils::known;

use super::organization::EXECUTION_MODES;
use super::{Deletion, Entity};

const IAC_TYPES: &[&str] = &["terraform", "tofu"];

fn common_fields() -> Vec<Field> {
    vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::text("name", "Workspace name"),
        Field::text("description", "Workspace description").optional(),
        Field::text("execution_mode", "Workspace execution mode (remote or local)")
            .wire("executionMode")
            .optional()
            .default_text("remote")
            .one_of(EXECUTION_MODES),
        Field::text("iac_type", "Infrastructure as code flavor (terraform or tofu)")
            .wire("iacType")
            .optional()
            .default_text("terraform")
            .one_of(IAC_TYPES),
        Field::text("iac_version", "Terraform or OpenTofu version").wire("terraformVersion"),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceCliState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub execution_mode: ValueString<'static>,
    pub iac_type: ValueString<'static>,
    pub iac_version: ValueString<'static>,
}

record!(WorkspaceCliState {
    id,
    organization_id,
    name,
    description,
    execution_mode,
    iac_type,
    iac_version
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceVcsState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub execution_mode: ValueString<'static>,
    pub iac_type: ValueString<'static>,
    pub iac_version: ValueString<'static>,
    pub repository: ValueString<'static>,
    pub branch: ValueString<'static>,
    pub folder: ValueString<'static>,
    pub vcs_id: ValueString<'static>,
}

record!(WorkspaceVcsState {
    id,
    organization_id,
    name,
    description,
    execution_mode,
    iac_type,
    iac_version,
    repository,
    branch,
    folder,
    vcs_id
});

lazy_static! {
    static ref CLI_FIELDS: Vec<Field> = common_fields();
    static ref VCS_FIELDS: Vec<Field> = {
        let mut fields = common_fields();
        fields.extend([
            Field::text("repository", "Git repository of the workspace code").wire("source"),
            Field::text("branch", "Git branch of the workspace code"),
            Field::text("folder", "Folder of the workspace code inside the repository")
                .optional()
                .default_text("/"),
            Field::text("vcs_id", "VCS connection used to clone a private repository")
                .optional()
                .relation("vcs", "vcs"),
        ]);
        fields
    };
}

/// Workspace driven by the CLI, without repository
#[derive(Debug, Default, Clone)]
pub struct WorkspaceCli;

impl Entity for WorkspaceCli {
    const NAME: &'static str = "workspace";
    const KIND: &'static str = "workspace";
    const DESCRIPTION: &'static str = "Create a CLI driven workspace.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];
    const DELETION: Deletion = Deletion::Archive;

    type State = WorkspaceCliState;

    fn fields() -> &'static [Field] {
        &CLI_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/workspace",
            known(&state.organization_id)?
        ))
    }

    fn decorate(_state: &Self::State, object: &mut ResourceObject) {
        object
            .attributes
            .insert("source".to_owned(), Json::from("empty"));
        object
            .attributes
            .insert("branch".to_owned(), Json::from("remote-content"));
    }
}

/// Workspace whose code lives in a git repository
#[derive(Debug, Default, Clone)]
pub struct WorkspaceVcs;

impl Entity for WorkspaceVcs {
    const NAME: &'static str = "workspace";
    const KIND: &'static str = "workspace";
    const DESCRIPTION: &'static str = "Create a VCS driven workspace.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];
    const DELETION: Deletion = Deletion::Archive;

    type State = WorkspaceVcsState;

    fn fields() -> &'static [Field] {
        &VCS_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/workspace",
            known(&state.organization_id)?
        ))
    }
}
