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

use crate::client::DeleteCheck;
use crate::fields::{record, Field};
use crate::utils::known;

use super::{Deletion, Entity};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationState {
    pub id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub execution_mode: ValueString<'static>,
}

record!(OrganizationState {
    id,
    name,
    description,
    execution_mode
});

pub(crate) const EXECUTION_MODES: &[&str] = &["local", "remote"];

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::text("name", "Organization name"),
        Field::text("description", "Organization description").optional(),
        Field::text("execution_mode", "Default execution mode of the organization workspaces")
            .wire("executionMode")
            .optional()
            .default_text("remote")
            .one_of(EXECUTION_MODES),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct Organization;

impl Entity for Organization {
    const NAME: &'static str = "organization";
    const KIND: &'static str = "organization";
    const DESCRIPTION: &'static str =
        "Create an organization to group workspaces, modules, templates and teams.";
    const IMPORT_KEYS: &'static [&'static str] = &["id"];
    // Organizations are only disabled, never removed
    const DELETION: Deletion = Deletion::Disable;

    type State = OrganizationState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(_state: &Self::State) -> Option<String> {
        Some("organization".to_owned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationTagState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
}

record!(OrganizationTagState {
    id,
    organization_id,
    name
});

lazy_static! {
    static ref TAG_FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::text("name", "Tag name"),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct OrganizationTag;

impl Entity for OrganizationTag {
    const NAME: &'static str = "organization tag";
    const KIND: &'static str = "tag";
    const DESCRIPTION: &'static str = "Create a tag that can be attached to the organization workspaces.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];
    const DELETION: Deletion = Deletion::Remove(DeleteCheck::NoContent);

    type State = OrganizationTagState;

    fn fields() -> &'static [Field] {
        &TAG_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("organization/{}/tag", known(&state.organization_id)?))
    }
}
