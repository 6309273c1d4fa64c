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

use std::borrow::Cow;

use tf_provider::{Attribute, AttributeConstraint, AttributeType, Description, Value};

use super::FieldValue;

/// Shape of a local attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Flag,
    Number,
    /// List of strings, comma-joined on the wire
    Texts,
    /// String, base64 encoded on the wire
    Encoded,
}

impl Kind {
    fn attr_type(self) -> AttributeType {
        match self {
            Kind::Text | Kind::Encoded => AttributeType::String,
            Kind::Flag => AttributeType::Bool,
            Kind::Number => AttributeType::Number,
            Kind::Texts => AttributeType::List(AttributeType::String.into()),
        }
    }
}

/// Where a local attribute lives in the JSON:API payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    Attribute(&'static str),
    Relation {
        name: &'static str,
        kind: &'static str,
    },
    /// Key of the request path, never sent in a body
    Path,
    /// Computed by the provider, never sent
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

impl Presence {
    pub fn is_computed(self) -> bool {
        matches!(self, Presence::Computed | Presence::OptionalComputed)
    }

    fn constraint(self) -> AttributeConstraint {
        match self {
            Presence::Required => AttributeConstraint::Required,
            Presence::Optional => AttributeConstraint::Optional,
            Presence::Computed => AttributeConstraint::Computed,
            Presence::OptionalComputed => AttributeConstraint::OptionalComputed,
        }
    }
}

/// When the server value of a field is ignored in favor of the known local value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Secret {
    Never,
    Always,
    /// Withheld when the given wire flag is true in the response
    WhenFlag(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Any,
    OneOf(&'static [&'static str]),
    Url,
}

/// One row of the mapping table between a state record and a JSON:API resource
#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub wire: Wire,
    pub presence: Presence,
    pub sensitive: bool,
    pub secret: Secret,
    pub default: Option<FieldValue>,
    pub check: Check,
    pub replace: bool,
    pub description: &'static str,
}

impl Field {
    pub fn new(name: &'static str, kind: Kind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            wire: Wire::Attribute(name),
            presence: Presence::Required,
            sensitive: false,
            secret: Secret::Never,
            default: None,
            check: Check::Any,
            replace: false,
            description,
        }
    }

    pub fn text(name: &'static str, description: &'static str) -> Self {
        Self::new(name, Kind::Text, description)
    }

    pub fn flag(name: &'static str, description: &'static str) -> Self {
        Self::new(name, Kind::Flag, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, Kind::Number, description)
    }

    pub fn texts(name: &'static str, description: &'static str) -> Self {
        Self::new(name, Kind::Texts, description)
    }

    pub fn encoded(name: &'static str, description: &'static str) -> Self {
        Self::new(name, Kind::Encoded, description)
    }

    /// Parent identifier substituted in the request path
    pub fn path(name: &'static str, description: &'static str) -> Self {
        Self {
            wire: Wire::Path,
            replace: true,
            ..Self::text(name, description)
        }
    }

    pub fn optional(self) -> Self {
        Self {
            presence: Presence::Optional,
            ..self
        }
    }

    pub fn computed(self) -> Self {
        Self {
            presence: Presence::Computed,
            ..self
        }
    }

    pub fn optional_computed(self) -> Self {
        Self {
            presence: Presence::OptionalComputed,
            ..self
        }
    }

    pub fn wire(self, name: &'static str) -> Self {
        Self {
            wire: Wire::Attribute(name),
            ..self
        }
    }

    pub fn relation(self, name: &'static str, kind: &'static str) -> Self {
        Self {
            wire: Wire::Relation { name, kind },
            ..self
        }
    }

    pub fn local(self) -> Self {
        Self {
            wire: Wire::Local,
            ..self
        }
    }

    /// Secret never echoed back by the server
    pub fn sensitive(self) -> Self {
        Self {
            sensitive: true,
            secret: Secret::Always,
            ..self
        }
    }

    /// Secret withheld by the server when `flag` is set
    pub fn withheld_when(self, flag: &'static str) -> Self {
        Self {
            sensitive: true,
            secret: Secret::WhenFlag(flag),
            ..self
        }
    }

    pub fn default_text(self, value: &'static str) -> Self {
        self.with_default(FieldValue::Text(Value::Value(Cow::Borrowed(value))))
    }

    pub fn default_flag(self, value: bool) -> Self {
        self.with_default(FieldValue::Flag(Value::Value(value)))
    }

    fn with_default(self, value: FieldValue) -> Self {
        // A defaulted attribute is filled by the provider
        let presence = match self.presence {
            Presence::Optional => Presence::OptionalComputed,
            presence => presence,
        };
        Self {
            presence,
            default: Some(value),
            ..self
        }
    }

    pub fn one_of(self, values: &'static [&'static str]) -> Self {
        Self {
            check: Check::OneOf(values),
            ..self
        }
    }

    pub fn url(self) -> Self {
        Self {
            check: Check::Url,
            ..self
        }
    }

    /// Changing the value forces a new resource
    pub fn replace(self) -> Self {
        Self {
            replace: true,
            ..self
        }
    }

    pub fn attribute(&self) -> Attribute {
        Attribute {
            attr_type: self.kind.attr_type(),
            description: Description::plain(self.description),
            constraint: self.presence.constraint(),
            sensitive: self.sensitive,
            ..Default::default()
        }
    }
}
