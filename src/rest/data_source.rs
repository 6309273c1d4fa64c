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

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

use tf_provider::{AttributePath, DataSource, Diagnostics, Schema, Value, ValueEmpty};

use crate::client::ClientHandle;
use crate::entity::Lookup;
use crate::fields::{schema, settle, unmarshal, validate, FieldValue, Record};
use crate::utils::Reported;

/// Characters of a filtered name left as is in the query string
const FILTER_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Terraform data source finding an entity by name
#[derive(Debug, Default)]
pub struct LookupDataSource<L: Lookup> {
    client: ClientHandle,
    lookup: PhantomData<L>,
}

impl<L: Lookup> LookupDataSource<L> {
    pub fn new(client: ClientHandle) -> Self {
        Self {
            client,
            lookup: PhantomData,
        }
    }

    /// Collection path with the name filter
    fn filtered(config: &L::State, diags: &mut Diagnostics) -> Option<(String, String)> {
        let name = match config.get("name") {
            Some(FieldValue::Text(Value::Value(name))) if !name.is_empty() => name.into_owned(),
            _ => {
                diags.error_short("`name` must be known", AttributePath::new("name"));
                return None;
            }
        };
        let Some(collection) = L::collection(config) else {
            diags.root_error(
                format!("Unable to look {} up", L::KIND),
                "A parent identifier is unknown or empty.",
            );
            return None;
        };

        let escaped = utf8_percent_encode(&name, FILTER_VALUE);
        let value = if L::QUOTED {
            format!("'{escaped}'")
        } else {
            escaped.to_string()
        };
        Some((
            format!("{collection}?filter[{}]=name=={value}", L::KIND),
            name,
        ))
    }
}

#[async_trait]
impl<L: Lookup> DataSource for LookupDataSource<L> {
    type State<'a> = L::State;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(schema(L::DESCRIPTION, L::fields()))
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        validate(L::fields(), &config, diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = self.client.get(diags).await?;
        let (path, name) = Self::filtered(&config, diags)?;
        let summary = format!("Unable to look {} up", L::KIND);

        debug!(kind = L::KIND, %path, "Looking entity up");
        let found = client.list(&path).await.reported(diags, summary.as_str())?;
        let Some(object) = found.first() else {
            diags.error(
                summary,
                format!("No {} named `{name}` was found.", L::KIND),
                AttributePath::new("name"),
            );
            return None;
        };

        let mut state = config.clone();
        unmarshal(L::fields(), object, &config, &mut state).reported(diags, summary)?;
        settle(L::fields(), &mut state);

        Some(state)
    }
}
