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
use tf_provider::value::{Value, ValueNumber, ValueString};

use crate::client::ResourceObject;
use crate::fields::{record, Field, Presence};
use crate::utils::known;

use super::variable::variable_fields;
use super::Entity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub name: ValueString<'static>,
    pub description: ValueString<'static>,
    pub priority: ValueNumber,
}

record!(CollectionState {
    id,
    organization_id,
    name,
    description,
    priority
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionItemState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub collection_id: ValueString<'static>,
    pub key: ValueString<'static>,
    pub value: ValueString<'static>,
    pub description: ValueString<'static>,
    pub category: ValueString<'static>,
    pub sensitive: Value<bool>,
    pub hcl: Value<bool>,
}

record!(CollectionItemState {
    id,
    organization_id,
    collection_id,
    key,
    value,
    description,
    category,
    sensitive,
    hcl
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionReferenceState {
    pub id: ValueString<'static>,
    pub organization_id: ValueString<'static>,
    pub collection_id: ValueString<'static>,
    pub workspace_id: ValueString<'static>,
    pub description: ValueString<'static>,
}

record!(CollectionReferenceState {
    id,
    organization_id,
    collection_id,
    workspace_id,
    description
});

lazy_static! {
    static ref FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::text("name", "Collection name"),
        Field::text("description", "Collection description").optional(),
        Field::number(
            "priority",
            "Priority of the collection when several define the same variable"
        )
        .replace(),
    ];
    static ref ITEM_FIELDS: Vec<Field> = {
        let mut fields = vec![
            Field::path("organization_id", "Terrakube organization id"),
            Field::path("collection_id", "Terrakube collection id"),
        ];
        fields.extend(variable_fields().into_iter().map(|field| match field.name {
            "description" | "sensitive" | "hcl" => Field {
                presence: Presence::Required,
                default: None,
                ..field
            },
            _ => field,
        }));
        fields
    };
    static ref REFERENCE_FIELDS: Vec<Field> = vec![
        Field::path("organization_id", "Terrakube organization id"),
        Field::path("collection_id", "Terrakube collection id"),
        Field::text("workspace_id", "Workspace using the collection")
            .relation("workspace", "workspace"),
        Field::text("description", "Reference description").optional(),
    ];
}

/// Set of variables shared by several workspaces
#[derive(Debug, Default, Clone)]
pub struct Collection;

impl Entity for Collection {
    const NAME: &'static str = "collection";
    const KIND: &'static str = "collection";
    const DESCRIPTION: &'static str = "Create a collection of variables shared by workspaces.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "id"];

    type State = CollectionState;

    fn fields() -> &'static [Field] {
        &FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/collection",
            known(&state.organization_id)?
        ))
    }
}

#[derive(Debug, Default, Clone)]
pub struct CollectionItem;

impl Entity for CollectionItem {
    const NAME: &'static str = "collection item";
    const KIND: &'static str = "item";
    const DESCRIPTION: &'static str = "Create a variable inside a collection.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "collection_id", "id"];

    type State = CollectionItemState;

    fn fields() -> &'static [Field] {
        &ITEM_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/collection/{}/item",
            known(&state.organization_id)?,
            known(&state.collection_id)?
        ))
    }
}

/// Attachment of a collection to a workspace
#[derive(Debug, Default, Clone)]
pub struct CollectionReference;

impl Entity for CollectionReference {
    const NAME: &'static str = "collection reference";
    const KIND: &'static str = "reference";
    const DESCRIPTION: &'static str = "Make the variables of a collection available to a workspace.";
    const IMPORT_KEYS: &'static [&'static str] = &["organization_id", "collection_id", "id"];

    type State = CollectionReferenceState;

    fn fields() -> &'static [Field] {
        &REFERENCE_FIELDS
    }

    fn collection(state: &Self::State) -> Option<String> {
        Some(format!(
            "organization/{}/collection/{}/reference",
            known(&state.organization_id)?,
            known(&state.collection_id)?
        ))
    }

    // References are addressed from the API root once created
    fn member(_state: &Self::State, id: &str) -> Option<String> {
        Some(format!("reference/{id}"))
    }

    fn decorate(state: &Self::State, object: &mut ResourceObject) {
        if let Some(collection_id) = known(&state.collection_id) {
            object.relate("collection", "collection", collection_id);
        }
    }
}
