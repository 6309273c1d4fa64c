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
pub struct WorkspaceScheduleState {
    pub id: ValueString<'static>,
    pub workspace_id: ValueString<'static>,
    pub schedule: ValueString<'static>,
    pub template_id: ValueString<'static>,
}

record!(WorkspaceScheduleState {
    id,
    workspace_id,
    schedule,
    template_id
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("workspace_id", "Terrakube workspace id"),
        Field::text("schedule", "Schedule expression using the Quartz cron notation").wire("cron"),
        Field::text("template_id", "Template run when the schedule triggers")
            .wire("templateReference"),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct WorkspaceSchedule;

impl Entity for WorkspaceSchedule {
    const NAME: &'static str = "workspace schedule";
    const KIND: &'static str = "schedule";
    const DESCRIPTION: &'static str = "Run a template on a workspace on a regular basis.";
    const IMPORT_KEYS: &'static [&'static str] = &["workspace_id", "id"];

    type State = WorkspaceScheduleState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("workspace/{}/schedule", known(&state.workspace_id)?))
    }
}
