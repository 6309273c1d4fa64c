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
pub struct ModuleState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub provider_name: ValueString<'static>,
    pub source: ValueString<'static>,
    pub folder: ValueString<'static>,
    pub tag_prefix: ValueString<'static>,
    pub vcs_id: ValueString<'static>,
    pub ssh_id: ValueString<'static>,
}

record!(ModuleState {
    id,
    organization_id,
    name,
    description,
    provider_name,
    source,
    folder,
    tag_prefix,
    vcs_id,
    ssh_id
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::text("name", "Module name"),
        Field::text("description", "Module description"),
        Field::text("provider_name", "Provider of the module (aws, azurerm, google...)")
            .wire("provider"),
        Field::text("source", "Git repository of the module"),
        Field::text("folder", "Folder of the module inside a monorepo").optional(),
        Field::text("tag_prefix", "Prefix of the git tags of the module in a monorepo")
            .wire("tagPrefix")
            .optional(),
        Field::text("vcs_id", "VCS connection used to clone a private repository")
            .optional()
            .relation("vcs", "vcs"),
        Field::text("ssh_id", "SSH key used to clone a private repository")
            .optional()
            .relation("ssh", "ssh"),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct Module;

impl Entity for Module {
    const NAME: &'static str = "module";
    const KIND: &'static str = "module";
    const DESCRIPTION: &'static str = "Publish a module in the organization private registry.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];

    type State = ModuleState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/module",
            known(&state.organization_id)?
        ))
    }
}
