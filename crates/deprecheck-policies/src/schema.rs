// SPDX-License-Identifier: Apache-2.0

use deprecheck_model::EntityKind;
use serde::{Deserialize, Serialize};

use crate::limits::{DEFAULT_INTEGRATION_CODE, DEFAULT_PLAYBOOK_CODE, DEFAULT_SCRIPT_CODE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PolicySchemaVersion {
    #[serde(rename = "1")]
    V1,
}

impl PolicySchemaVersion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeprecationPolicy {
    pub schema_version: PolicySchemaVersion,
    pub codes: DiagnosticCodes,
    /// Codes whose violations are waived: no diagnostic, check passes.
    #[serde(default)]
    pub ignored_codes: Vec<String>,
}

impl Default for DeprecationPolicy {
    fn default() -> Self {
        Self {
            schema_version: PolicySchemaVersion::V1,
            codes: DiagnosticCodes::default(),
            ignored_codes: Vec::new(),
        }
    }
}

impl DeprecationPolicy {
    #[must_use]
    pub fn is_ignored(&self, code: &str) -> bool {
        self.ignored_codes.iter().any(|c| c == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticCodes {
    pub integration: String,
    pub script: String,
    pub playbook: String,
}

impl Default for DiagnosticCodes {
    fn default() -> Self {
        Self {
            integration: DEFAULT_INTEGRATION_CODE.to_string(),
            script: DEFAULT_SCRIPT_CODE.to_string(),
            playbook: DEFAULT_PLAYBOOK_CODE.to_string(),
        }
    }
}

impl DiagnosticCodes {
    #[must_use]
    pub fn for_kind(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Integration => &self.integration,
            EntityKind::Script => &self.script,
            EntityKind::Playbook => &self.playbook,
        }
    }
}
