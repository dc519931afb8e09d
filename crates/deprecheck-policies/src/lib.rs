// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod adapters;
mod limits;
mod schema;
mod validate;

pub use adapters::{
    load_policy_from_path, load_policy_from_workspace, parse_policy_toml, policy_config_path,
    resolve_policy_path, ENV_DEPRECHECK_POLICY_PATH,
};
pub use limits::{
    DEFAULT_INTEGRATION_CODE, DEFAULT_PLAYBOOK_CODE, DEFAULT_SCRIPT_CODE,
    DIAGNOSTIC_CODE_PATTERN, MAX_IGNORED_CODES,
};
pub use schema::{DeprecationPolicy, DiagnosticCodes, PolicySchemaVersion};
pub use validate::{
    canonical_policy_json, validate_diagnostic_code, validate_policy, PolicyValidationError,
};

pub const CRATE_NAME: &str = "deprecheck-policies";
