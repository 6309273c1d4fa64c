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

use tf_provider::{Attribute, AttributeConstraint, AttributeType, Block, Description, Schema};

use super::Field;

/// Schema of a block made of a computed `id` and the given fields
pub fn schema(description: &str, fields: &[Field]) -> Schema {
    let id = Attribute {
        attr_type: AttributeType::String,
        description: Description::plain("Identifier assigned by Terrakube"),
        constraint: AttributeConstraint::Computed,
        ..Default::default()
    };

    Schema {
        version: 1,
        block: Block {
            version: 1,
            attributes: std::iter::once(("id".to_owned(), id))
                .chain(
                    fields
                        .iter()
                        .map(|field| (field.name.to_owned(), field.attribute())),
                )
                .collect(),
            description: Description::plain(description),
            ..Default::default()
        },
    }
}
