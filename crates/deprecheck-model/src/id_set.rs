// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StructuralError;

/// The id-set document as produced by the content indexer.
///
/// Each kind is a list of single-entry objects keyed by an opaque id. Kinds
/// this crate does not analyse (integrations, layouts, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSetDocument {
    #[serde(default)]
    pub scripts: Vec<BTreeMap<String, RawRecord>>,
    #[serde(default)]
    pub playbooks: Vec<BTreeMap<String, RawRecord>>,
    #[serde(default, rename = "TestPlaybooks")]
    pub test_playbooks: Vec<BTreeMap<String, RawRecord>>,
}

impl IdSetDocument {
    pub fn from_json_str(text: &str) -> Result<Self, StructuralError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Union of the script and playbook record fields, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub implementing_scripts: Vec<String>,
    #[serde(default)]
    pub implementing_playbooks: Vec<String>,
    #[serde(default)]
    pub command_to_integration: BTreeMap<String, String>,
}
