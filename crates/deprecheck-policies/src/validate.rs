// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;

use regex::Regex;
use serde_json::{Map, Value};

use crate::limits::{DIAGNOSTIC_CODE_PATTERN, MAX_IGNORED_CODES};
use crate::schema::DeprecationPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyValidationError(pub String);

impl std::fmt::Display for PolicyValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PolicyValidationError {}

pub fn validate_policy(policy: &DeprecationPolicy) -> Result<(), PolicyValidationError> {
    let code_re = code_regex()?;

    let assigned = [
        ("codes.integration", policy.codes.integration.as_str()),
        ("codes.script", policy.codes.script.as_str()),
        ("codes.playbook", policy.codes.playbook.as_str()),
    ];
    let mut seen = BTreeSet::new();
    for (field, code) in assigned {
        if !code_re.is_match(code) {
            return Err(PolicyValidationError(format!(
                "{field} `{code}` must match {DIAGNOSTIC_CODE_PATTERN}"
            )));
        }
        if !seen.insert(code) {
            return Err(PolicyValidationError(format!(
                "{field} `{code}` is already assigned to another entity kind"
            )));
        }
    }

    if policy.ignored_codes.len() > MAX_IGNORED_CODES {
        return Err(PolicyValidationError(format!(
            "ignored_codes holds {} entries, max is {MAX_IGNORED_CODES}",
            policy.ignored_codes.len()
        )));
    }
    let mut ignored = BTreeSet::new();
    for code in &policy.ignored_codes {
        if !code_re.is_match(code) {
            return Err(PolicyValidationError(format!(
                "ignored_codes entry `{code}` must match {DIAGNOSTIC_CODE_PATTERN}"
            )));
        }
        if !ignored.insert(code.as_str()) {
            return Err(PolicyValidationError(format!(
                "ignored_codes entry duplicated: {code}"
            )));
        }
    }

    Ok(())
}

pub fn validate_diagnostic_code(code: &str) -> Result<(), PolicyValidationError> {
    if code_regex()?.is_match(code) {
        Ok(())
    } else {
        Err(PolicyValidationError(format!(
            "diagnostic code `{code}` must match {DIAGNOSTIC_CODE_PATTERN}"
        )))
    }
}

pub fn canonical_policy_json(policy: &DeprecationPolicy) -> Result<String, PolicyValidationError> {
    let value = serde_json::to_value(policy)
        .map_err(|e| PolicyValidationError(format!("encode policy failed: {e}")))?;
    serde_json::to_string_pretty(&normalize_json(value))
        .map_err(|e| PolicyValidationError(format!("print policy failed: {e}")))
}

fn code_regex() -> Result<Regex, PolicyValidationError> {
    Regex::new(DIAGNOSTIC_CODE_PATTERN)
        .map_err(|e| PolicyValidationError(format!("diagnostic code pattern invalid: {e}")))
}

pub(crate) fn normalize_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(k, v)| (k, normalize_json(v)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut out = Map::new();
            for (k, v) in entries {
                out.insert(k, v);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_json).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_diagnostic_code, validate_policy};
    use crate::schema::DeprecationPolicy;

    #[test]
    fn default_policy_is_valid() {
        assert!(validate_policy(&DeprecationPolicy::default()).is_ok());
    }

    #[test]
    fn code_shape_is_enforced() {
        assert!(validate_diagnostic_code("IN153").is_ok());
        assert!(validate_diagnostic_code("in153").is_err());
        assert!(validate_diagnostic_code("IN15").is_err());
        assert!(validate_diagnostic_code("[IN153]").is_err());
    }

    #[test]
    fn shared_code_between_kinds_is_rejected() {
        let mut policy = DeprecationPolicy::default();
        policy.codes.playbook = policy.codes.script.clone();
        let err = validate_policy(&policy).expect_err("duplicate code");
        assert!(err.0.contains("codes.playbook"), "{err}");
    }
}
