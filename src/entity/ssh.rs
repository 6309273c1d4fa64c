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

pub(crate) const SSH_TYPES: &[&str] = &["rsa", "ed25519"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SshState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub private_key: ValueString<'static>,
    pub ssh_type: ValueString<'static>,
}

record!(SshState {
    id,
    organization_id,
    name,
    description,
    private_key,
    ssh_type
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::text("name", "SSH key name").replace(),
        Field::text("description", "SSH key description").optional(),
        Field::text("private_key", "Private key used to clone repositories")
            .wire("privateKey")
            .sensitive(),
        Field::text("ssh_type", "Key algorithm (rsa or ed25519)")
            .wire("sshType")
            .optional()
            .default_text("rsa")
            .one_of(SSH_TYPES),
    ];
}

#[derive(Debug, Default, Clone)]
pub struct Ssh;

impl Entity for Ssh {
    const NAME: &'static str = "SSH key";
    const KIND: &'static str = "ssh";
    const DESCRIPTION: &'static str = "Register an SSH private key used to clone repositories.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];

    type State = SshState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!("organization/{}/ssh", known(&state.organization_id)?))
    }
}
