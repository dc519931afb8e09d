// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::StructuralError;
use crate::id_set::{IdSetDocument, RawRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerKind {
    Script,
    Playbook,
    TestPlaybook,
}

impl ConsumerKind {
    /// Fixed scan order used for name lookups and kind-ordered listings.
    pub const SCAN_ORDER: [Self; 3] = [Self::Script, Self::Playbook, Self::TestPlaybook];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Playbook => "playbook",
            Self::TestPlaybook => "test_playbook",
        }
    }
}

impl Display for ConsumerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRecord {
    pub id: String,
    pub name: String,
    pub file_path: String,
    #[serde(default)]
    pub deprecated: bool,
    /// Command names and script names this script invokes.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// Shared shape of playbooks and test-playbooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybookRecord {
    pub id: String,
    pub name: String,
    pub file_path: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub implementing_scripts: Vec<String>,
    #[serde(default)]
    pub implementing_playbooks: Vec<String>,
    #[serde(default)]
    pub command_to_integration: BTreeMap<String, String>,
}

/// A corpus entity seen from the side of the identifier it references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsumerRecord {
    pub name: String,
    pub file_path: String,
    pub deprecated: bool,
    pub kind: ConsumerKind,
}

impl ConsumerRecord {
    #[must_use]
    pub fn from_script(record: &ScriptRecord) -> Self {
        Self {
            name: record.name.clone(),
            file_path: record.file_path.clone(),
            deprecated: record.deprecated,
            kind: ConsumerKind::Script,
        }
    }

    #[must_use]
    pub fn from_playbook(record: &PlaybookRecord, kind: ConsumerKind) -> Self {
        Self {
            name: record.name.clone(),
            file_path: record.file_path.clone(),
            deprecated: record.deprecated,
            kind,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.deprecated
    }
}

/// Read-only, strongly typed view of one id-set. Built once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    pub scripts: Vec<ScriptRecord>,
    pub playbooks: Vec<PlaybookRecord>,
    pub test_playbooks: Vec<PlaybookRecord>,
}

impl CorpusSnapshot {
    pub fn from_id_set(doc: &IdSetDocument) -> Result<Self, StructuralError> {
        let scripts = flatten(&doc.scripts, ConsumerKind::Script)?
            .into_iter()
            .map(|(id, raw)| script_record(id, raw))
            .collect::<Result<Vec<_>, _>>()?;
        let playbooks = flatten(&doc.playbooks, ConsumerKind::Playbook)?
            .into_iter()
            .map(|(id, raw)| playbook_record(id, raw, ConsumerKind::Playbook))
            .collect::<Result<Vec<_>, _>>()?;
        let test_playbooks = flatten(&doc.test_playbooks, ConsumerKind::TestPlaybook)?
            .into_iter()
            .map(|(id, raw)| playbook_record(id, raw, ConsumerKind::TestPlaybook))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            scripts,
            playbooks,
            test_playbooks,
        })
    }

    pub fn from_id_set_json(text: &str) -> Result<Self, StructuralError> {
        Self::from_id_set(&IdSetDocument::from_json_str(text)?)
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.scripts.len() + self.playbooks.len() + self.test_playbooks.len()
    }
}

fn flatten(
    entries: &[BTreeMap<String, RawRecord>],
    kind: ConsumerKind,
) -> Result<Vec<(&str, &RawRecord)>, StructuralError> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let mut iter = entry.iter();
            match (iter.next(), iter.next()) {
                (Some((id, raw)), None) => Ok((id.as_str(), raw)),
                _ => Err(StructuralError::MalformedEntry {
                    kind,
                    position,
                    keys: entry.len(),
                }),
            }
        })
        .collect()
}

fn required(
    value: Option<&String>,
    kind: ConsumerKind,
    id: &str,
    field: &'static str,
) -> Result<String, StructuralError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(StructuralError::missing_field(kind, id, field)),
    }
}

fn script_record(id: &str, raw: &RawRecord) -> Result<ScriptRecord, StructuralError> {
    let kind = ConsumerKind::Script;
    Ok(ScriptRecord {
        id: id.to_string(),
        name: required(raw.name.as_ref(), kind, id, "name")?,
        file_path: required(raw.file_path.as_ref(), kind, id, "file_path")?,
        deprecated: raw.deprecated,
        depends_on: raw.depends_on.clone(),
    })
}

fn playbook_record(
    id: &str,
    raw: &RawRecord,
    kind: ConsumerKind,
) -> Result<PlaybookRecord, StructuralError> {
    Ok(PlaybookRecord {
        id: id.to_string(),
        name: required(raw.name.as_ref(), kind, id, "name")?,
        file_path: required(raw.file_path.as_ref(), kind, id, "file_path")?,
        deprecated: raw.deprecated,
        implementing_scripts: raw.implementing_scripts.clone(),
        implementing_playbooks: raw.implementing_playbooks.clone(),
        command_to_integration: raw.command_to_integration.clone(),
    })
}
