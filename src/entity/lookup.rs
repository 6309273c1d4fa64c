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

use super::Lookup;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationLookupState {
    pub id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
}

record!(OrganizationLookupState {
    id,
    name,
    description
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagLookupState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
}

record!(TagLookupState {
    id,
    organization_id,
    name
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateLookupState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub version: ValueString<'static>,
}

record!(TemplateLookupState {
    id,
    organization_id,
    name,
    description,
    version
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SshLookupState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub ssh_type: ValueString<'static>,
}

record!(SshLookupState {
    id,
    organization_id,
    name,
    description,
    ssh_type
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VcsLookupState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub vcs_type: ValueString<'static>,
}

record!(VcsLookupState {
    id,
    organization_id,
    name,
    description,
    vcs_type
});

fn organization_id() -> Field {
    Field::path("organization_id", "Terrakube organization id")
}

fn description() -> Field {
    Field::text("description", "Description").computed()
}

lazy_static! {
    static ref ORGANIZATION_FIELDS: Vec<Field> = vec![
        Field::text("name", "Organization name"),
        description(),
    ];
    static ref TAG_FIELDS: Vec<Field> = vec![organization_id(), Field::text("name", "Tag name")];
    static ref TEMPLATE_FIELDS: Vec<Field> = vec![
        organization_id(),
        Field::text("name", "Template name"),
        description(),
        Field::text("version", "Template version").computed(),
    ];
    static ref SSH_FIELDS: Vec<Field> = vec![
        organization_id(),
        Field::text("name", "SSH key name"),
        description(),
        Field::text("ssh_type", "Key algorithm").wire("sshType").computed(),
    ];
    static ref VCS_FIELDS: Vec<Field> = vec![
        organization_id(),
        Field::text("name", "VCS connection name"),
        description(),
        Field::text("vcs_type", "Kind of VCS").wire("vcsType").computed(),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct OrganizationLookup;

impl Lookup for OrganizationLookup {
    const KIND: &'static str = "organization";
    const DESCRIPTION: &'static str = "Find an organization by name.";

    type State = OrganizationLookupState;

    fn fields() -> &'static [Field] {
        &ORGANIZATION_FIELDS
    }

    fn collection(_state: &Self::State) -> Option<String> {
        Some("organization".to_owned())
    }
}

#[derive(Debug, Default, Clone)]
pub struct TagLookup;

impl Lookup for TagLookup {
    const KIND: &'static str = "tag";
    const DESCRIPTION: &'static str = "Find an organization tag by name.";

    type State = TagLookupState;

    fn fields() -> &'static [Field] {
        &TAG_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("organization/{}/tag", known(&state.organization_id)?))
    }
}

/// Template names may contain spaces, they are quoted in the filter
#[derive(Debug, Default, Clone)]
pub struct TemplateLookup;

impl Lookup for TemplateLookup {
    const KIND: &'static str = "template";
    const DESCRIPTION: &'static str = "Find an organization template by name.";
    const QUOTED: bool = true;

    type State = TemplateLookupState;

    fn fields() -> &'static [Field] {
        &TEMPLATE_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/template",
            known(&state.organization_id)?
        ))
    }
}

#[derive(Debug, Default, Clone)]
pub struct SshLookup;

impl Lookup for SshLookup {
    const KIND: &'static str = "ssh";
    const DESCRIPTION: &'static str = "Find an SSH key by name.";

    type State = SshLookupState;

    fn fields() -> &'static [Field] {
        &SSH_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("organization/{}/ssh", known(&state.organization_id)?))
    }
}

#[derive(Debug, Default, Clone)]
pub struct VcsLookup;

impl Lookup for VcsLookup {
    const KIND: &'static str = "vcs";
    const DESCRIPTION: &'static str = "Find a VCS connection by name.";

    type State = VcsLookupState;

    fn fields() -> &'static [Field] {
        &VCS_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("organization/{}/vcs", known(&state.organization_id)?))
    }
}
