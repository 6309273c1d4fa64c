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

use tf_provider::value::{Value, ValueList, ValueNumber, ValueString};

use super::Kind;

/// Value of a single attribute, whatever its shape
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(ValueString<'static>),
    Flag(Value<bool>),
    Number(ValueNumber),
    Texts(ValueList<ValueString<'static>>),
}

impl FieldValue {
    pub fn null(kind: Kind) -> Self {
        match kind {
            Kind::Text | Kind::Encoded => FieldValue::Text(Value::Null),
            Kind::Flag => FieldValue::Flag(Value::Null),
            Kind::Number => FieldValue::Number(Value::Null),
            Kind::Texts => FieldValue::Texts(Value::Null),
        }
    }

    pub fn unknown(kind: Kind) -> Self {
        match kind {
            Kind::Text | Kind::Encoded => FieldValue::Text(Value::Unknown),
            Kind::Flag => FieldValue::Flag(Value::Unknown),
            Kind::Number => FieldValue::Number(Value::Unknown),
            Kind::Texts => FieldValue::Texts(Value::Unknown),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(Value::Value(Cow::Owned(value.into())))
    }

    pub fn is_null(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.is_null(),
            FieldValue::Flag(value) => value.is_null(),
            FieldValue::Number(value) => value.is_null(),
            FieldValue::Texts(value) => value.is_null(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.is_unknown(),
            FieldValue::Flag(value) => value.is_unknown(),
            FieldValue::Number(value) => value.is_unknown(),
            FieldValue::Texts(value) => value.is_unknown(),
        }
    }
}

/// Name-based access to the attributes of a state struct
pub trait Record {
    fn get(&self, name: &str) -> Option<FieldValue>;
    fn set(&mut self, name: &str, value: FieldValue) -> bool;

    /// Known and non-empty identifier
    fn id(&self) -> Option<String> {
        match self.get("id")? {
            FieldValue::Text(Value::Value(id)) if !id.is_empty() => Some(id.into_owned()),
            _ => None,
        }
    }
}

/// A state struct member holding one attribute
pub trait Slot {
    fn load(&self) -> FieldValue;
    fn store(&mut self, value: FieldValue) -> bool;
}

macro_rules! impl_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Slot for $ty {
                fn load(&self) -> FieldValue {
                    FieldValue::$variant(self.clone())
                }
                fn store(&mut self, value: FieldValue) -> bool {
                    if let FieldValue::$variant(value) = value {
                        *self = value;
                        true
                    } else {
                        false
                    }
                }
            }
        )*
    };
}

impl_slot! {
    ValueString<'static> => Text,
    Value<bool> => Flag,
    ValueNumber => Number,
    ValueList<ValueString<'static>> => Texts,
}

/// Implement [`Record`] over the listed members of a state struct
macro_rules! record {
    ($state:ty { $($field:ident),* $(,)? }) => {
        impl $crate::fields::Record for $state {
            fn get(&self, name: &str) -> Option<$crate::fields::FieldValue> {
                match name {
                    $(stringify!($field) => Some($crate::fields::Slot::load(&self.$field)),)*
                    _ => None,
                }
            }
            fn set(&mut self, name: &str, value: $crate::fields::FieldValue) -> bool {
                match name {
                    $(stringify!($field) => $crate::fields::Slot::store(&mut self.$field, value),)*
                    _ => false,
                }
            }
        }
    };
}

pub(crate) use record;
