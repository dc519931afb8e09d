// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::DeprecationPolicy;
use crate::validate::{validate_policy, PolicyValidationError};

const POLICY_CONFIG_PATH: &str = "configs/policy/deprecation.toml";

pub const ENV_DEPRECHECK_POLICY_PATH: &str = "DEPRECHECK_POLICY_PATH";

#[must_use]
pub fn policy_config_path(root: &Path) -> PathBuf {
    root.join(POLICY_CONFIG_PATH)
}

/// Explicit override from the environment wins over the workspace default.
/// Relative overrides are taken relative to `root`.
#[must_use]
pub fn resolve_policy_path(root: &Path) -> PathBuf {
    if let Ok(explicit) = std::env::var(ENV_DEPRECHECK_POLICY_PATH) {
        let trimmed = explicit.trim();
        if !trimmed.is_empty() {
            return root.join(trimmed);
        }
    }
    policy_config_path(root)
}

pub fn parse_policy_toml(raw: &str) -> Result<DeprecationPolicy, PolicyValidationError> {
    let policy: DeprecationPolicy = toml::from_str(raw)
        .map_err(|e| PolicyValidationError(format!("parse policy config failed: {e}")))?;
    validate_policy(&policy)?;
    Ok(policy)
}

pub fn load_policy_from_path(path: &Path) -> Result<DeprecationPolicy, PolicyValidationError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        PolicyValidationError(format!("read policy config {} failed: {e}", path.display()))
    })?;
    parse_policy_toml(&raw)
}

pub fn load_policy_from_workspace(root: &Path) -> Result<DeprecationPolicy, PolicyValidationError> {
    load_policy_from_path(&resolve_policy_path(root))
}
