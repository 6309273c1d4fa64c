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
pub struct TemplateState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub version: ValueString<'static>,
    pub content: ValueString<'static>,
}

record!(TemplateState {
    id,
    organization_id,
    name,
    description,
    version,
    content
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::text("name", "Template name"),
        Field::text("description", "Template description").optional(),
        Field::text("version", "Template version").optional(),
        Field::encoded("content", "Template flow, in YAML").wire("tcl"),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct Template;

impl Entity for Template {
    const NAME: &'static str = "organization template";
    const KIND: &'static str = "template";
    const DESCRIPTION: &'static str = "Create a template describing the flow of a job.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];
    const DELETION: Deletion = Deletion::Remove(DeleteCheck::NoContent);

    type State = TemplateState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/template",
            known(&state.organization_id)?
        ))
    }
}
