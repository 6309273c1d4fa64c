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

pub(crate) const CATEGORIES: &[&str] = &["TERRAFORM", "ENV"];

/// Fields shared by every kind of variable
pub(crate) fn variable_fields() -> Vec<Field> {
    vec![
        Field::text("key", "Variable key"),
        Field::text("value", "Variable value").withheld_when("sensitive"),
        Field::text("description", "Variable description").optional(),
        Field::text("category", "Variable category (TERRAFORM or ENV)").one_of(CATEGORIES),
        Field::flag("sensitive", "Hide the value once written")
            .optional()
            .default_flag(false),
        Field::flag("hcl", "Parse the value as HCL")
            .optional()
            .default_flag(false),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceVariableState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub workspace_id: ValueString<'static>,
    pub key: ValueString<'static>,
    pub value: ValueString<'static>,
    pub description: ValueString<'static>,
    pub category: ValueString<'static>,
    pub sensitive: Value<bool>,
    pub hcl: Value<bool>,
}

record!(WorkspaceVariableState {
    id,
    organization_id,
    workspace_id,
    key,
    value,
    description,
    category,
    sensitive,
    hcl
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationVariableState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub key: ValueString<'static>,
    pub value: ValueString<'static>,
    pub description: ValueString<'static>,
    pub category: ValueString<'static>,
    pub sensitive: Value<bool>,
    pub hcl: Value<bool>,
}

record!(OrganizationVariableState {
    id,
    organization_id,
    key,
    value,
    description,
    category,
    sensitive,
    hcl
});

lazy_static! {
    static ref WORKSPACE_FIELDS: Vec<Field> = {
        let mut fields = vec![
            Field::path("organization_id", "Terrakube organization id"),
            Field::path("workspace_id", "Terrakube workspace id"),
        ];
        fields.extend(variable_fields());
        fields
    };
    static ref ORGANIZATION_FIELDS: Vec<Field> = {
        let mut fields = vec![Field::path("organization_id", "Terrakube organization id")];
        fields.extend(variable_fields());
        fields
    };
}

#[derive(Debug, Default, Clone)]
pub struct WorkspaceVariable;

impl Entity for WorkspaceVariable {
    const NAME: &'static str = "workspace variable";
    const KIND: &'static str = "variable";
    const DESCRIPTION: &'static str = "Create a Terraform or environment variable of a workspace.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "workspace_id", "id"];

    type State = WorkspaceVariableState;

    fn fields() -> &'static [Field] {
        &WORKSPACE_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/workspace/{}/variable",
            known(&state.organization_id)?,
            known(&state.workspace_id)?
        ))
    }
}

/// Global variable, inherited by every workspace of the organization
#[derive(Debug, Default, Clone)]
pub struct OrganizationVariable;

impl Entity for OrganizationVariable {
    const NAME: &'static str = "organization variable";
    const KIND: &'static str = "globalvar";
    const DESCRIPTION: &'static str =
        "Create a global variable shared by every workspace of an organization.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];

    type State = OrganizationVariableState;

    fn fields() -> &'static [Field] {
        &ORGANIZATION_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/globalvar",
            known(&state.organization_id)?
        ))
    }
}
