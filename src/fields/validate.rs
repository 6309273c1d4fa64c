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
use regex::Regex;
use tf_provider::{AttributePath, Diagnostics, Value};

use crate::utils::DisplayJoinable;

use super::{Check, Field, FieldValue, Record};

lazy_static! {
    static ref URL: Regex = Regex::new(r"^https?://.*$").expect("valid url pattern");
}

/// Check every known value of `state` against the validators of its field
pub fn validate<S: Record>(fields: &[Field], state: &S, diags: &mut Diagnostics) {
    for field in fields {
        if let Some(FieldValue::Text(Value::Value(text))) = state.get(field.name) {
            check(field.check, &text, AttributePath::new(field.name), diags);
        }
    }
}

pub fn check(check: Check, text: &str, attr_path: AttributePath, diags: &mut Diagnostics) {
    match check {
        Check::Any => (),
        Check::OneOf(values) => {
            if !values.contains(&text) {
                diags.error(
                    "Invalid attribute value",
                    format!(
                        "Value must be one of: {}, got: \"{text}\"",
                        values.iter().join_with(", ")
                    ),
                    attr_path,
                );
            }
        }
        Check::Url => {
            if !URL.is_match(text) {
                diags.error(
                    "Invalid attribute value",
                    format!("Value must be a valid http(s) URL, got: \"{text}\""),
                    attr_path,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_of() {
        let mut diags = Diagnostics::default();
        check(
            Check::OneOf(&["rsa", "ed25519"]),
            "rsa",
            AttributePath::new("ssh_type"),
            &mut diags,
        );
        assert!(diags.errors.is_empty());

        check(
            Check::OneOf(&["rsa", "ed25519"]),
            "dsa",
            AttributePath::new("ssh_type"),
            &mut diags,
        );
        assert_eq!(diags.errors.len(), 1);
    }

    #[test]
    fn url() {
        let mut diags = Diagnostics::default();
        check(
            Check::Url,
            "https://gitlab.example.com",
            AttributePath::new("endpoint"),
            &mut diags,
        );
        check(Check::Url, "http://localhost:8080", AttributePath::new("endpoint"), &mut diags);
        assert!(diags.errors.is_empty());

        check(Check::Url, "ftp://example.com", AttributePath::new("endpoint"), &mut diags);
        assert_eq!(diags.errors.len(), 1);
    }
}
