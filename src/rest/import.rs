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

use thiserror::Error;

use crate::fields::{FieldValue, Record};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Expected an import identifier of the form `{expected}`, got `{got}`")]
pub struct ImportError {
    expected: String,
    got: String,
}

/// Split a comma separated import identifier into one segment per key
pub fn parse_import_id<'a>(id: &'a str, keys: &[&str]) -> Result<Vec<&'a str>, ImportError> {
    let segments: Vec<&str> = id.split(',').collect();
    if segments.len() != keys.len() || segments.iter().any(|segment| segment.is_empty()) {
        return Err(ImportError {
            expected: keys.join(","),
            got: id.to_owned(),
        });
    }
    Ok(segments)
}

/// State seeded with the segments of an import identifier
pub fn imported<S: Record + Default>(id: &str, keys: &[&str]) -> Result<S, ImportError> {
    let segments = parse_import_id(id, keys)?;
    let mut state = S::default();
    for (key, segment) in keys.iter().zip(segments) {
        state.set(key, FieldValue::text(segment));
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use tf_provider::value::Value;

    use crate::entity::variable::WorkspaceVariableState;

    use super::*;

    #[test]
    fn segments() {
        assert_eq!(
            parse_import_id("org-1,res-1", &["organization_id", "id"]),
            Ok(vec!["org-1", "res-1"])
        );
        assert_eq!(parse_import_id("org-1", &["id"]), Ok(vec!["org-1"]));
    }

    #[test]
    fn wrong_arity() {
        let err = parse_import_id("org-1,res-1", &["organization_id", "workspace_id", "id"])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected an import identifier of the form `organization_id,workspace_id,id`, got `org-1,res-1`"
        );
        assert!(parse_import_id("org-1,ws-1,var-1", &["organization_id", "id"]).is_err());
    }

    #[test]
    fn empty_segment() {
        assert!(parse_import_id("org-1,", &["organization_id", "id"]).is_err());
        assert!(parse_import_id("", &["id"]).is_err());
    }

    #[test]
    fn seeded_state() {
        let state: WorkspaceVariableState =
            imported("org-1,ws-1,var-1", &["organization_id", "workspace_id", "id"]).unwrap();
        assert_eq!(state.organization_id, Value::Value("org-1".into()));
        assert_eq!(state.workspace_id, Value::Value("ws-1".into()));
        assert_eq!(state.id, Value::Value("var-1".into()));
        assert!(state.key.is_null());
    }
}
