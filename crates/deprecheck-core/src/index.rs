// SPDX-License-Identifier: Apache-2.0

//! Reverse usage index over one corpus snapshot.
//!
//! Every relation a corpus record declares (`depends_on`,
//! `implementing_scripts`, `implementing_playbooks`, `command_to_integration`
//! keys) becomes an edge from the referenced identifier back to the record.
//! The index is built once per run and is read-only afterwards.

use std::collections::HashMap;

use deprecheck_model::{
    ConsumerKind, ConsumerRecord, CorpusSnapshot, IdSetDocument, PlaybookRecord, StructuralError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::fingerprint::corpus_fingerprint;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct KindEdges {
    scripts: Vec<usize>,
    playbooks: Vec<usize>,
    test_playbooks: Vec<usize>,
}

impl KindEdges {
    fn for_kind(&self, kind: ConsumerKind) -> &[usize] {
        match kind {
            ConsumerKind::Script => &self.scripts,
            ConsumerKind::Playbook => &self.playbooks,
            ConsumerKind::TestPlaybook => &self.test_playbooks,
        }
    }

    fn for_kind_mut(&mut self, kind: ConsumerKind) -> &mut Vec<usize> {
        match kind {
            ConsumerKind::Script => &mut self.scripts,
            ConsumerKind::Playbook => &mut self.playbooks,
            ConsumerKind::TestPlaybook => &mut self.test_playbooks,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub scripts: usize,
    pub playbooks: usize,
    pub test_playbooks: usize,
    pub identifiers: usize,
    pub edges: usize,
}

#[derive(Debug, Clone)]
pub struct CorpusIndex {
    records: Vec<ConsumerRecord>,
    by_name: HashMap<String, usize>,
    edges: HashMap<String, KindEdges>,
    stats: IndexStats,
    fingerprint: String,
}

impl CorpusIndex {
    pub fn build(snapshot: &CorpusSnapshot) -> Result<Self, StructuralError> {
        let mut builder = IndexBuilder::default();

        for script in &snapshot.scripts {
            check_required(ConsumerKind::Script, &script.id, &script.name, &script.file_path)?;
            let owner = builder.push(ConsumerRecord::from_script(script));
            for identifier in &script.depends_on {
                builder.edge(identifier, ConsumerKind::Script, owner);
            }
        }
        for playbook in &snapshot.playbooks {
            builder.push_playbook(playbook, ConsumerKind::Playbook)?;
        }
        for test_playbook in &snapshot.test_playbooks {
            builder.push_playbook(test_playbook, ConsumerKind::TestPlaybook)?;
        }

        let fingerprint = corpus_fingerprint(snapshot)?;
        let stats = IndexStats {
            scripts: snapshot.scripts.len(),
            playbooks: snapshot.playbooks.len(),
            test_playbooks: snapshot.test_playbooks.len(),
            identifiers: builder.edges.len(),
            edges: builder.edge_count,
        };
        info!(
            scripts = stats.scripts,
            playbooks = stats.playbooks,
            test_playbooks = stats.test_playbooks,
            identifiers = stats.identifiers,
            edges = stats.edges,
            fingerprint = %fingerprint,
            "corpus index built"
        );

        Ok(Self {
            records: builder.records,
            by_name: builder.by_name,
            edges: builder.edges,
            stats,
            fingerprint,
        })
    }

    pub fn from_id_set(doc: &IdSetDocument) -> Result<Self, StructuralError> {
        Self::build(&CorpusSnapshot::from_id_set(doc)?)
    }

    pub fn from_id_set_json(text: &str) -> Result<Self, StructuralError> {
        Self::build(&CorpusSnapshot::from_id_set_json(text)?)
    }

    /// Consumers of `identifier`: scripts, then playbooks, then test-playbooks,
    /// each in corpus order. Unknown identifiers have no consumers.
    #[must_use]
    pub fn consumers_of(&self, identifier: &str) -> Vec<&ConsumerRecord> {
        ConsumerKind::SCAN_ORDER
            .iter()
            .flat_map(|kind| self.consumers_of_kind(identifier, *kind))
            .collect()
    }

    #[must_use]
    pub fn consumers_of_kind(&self, identifier: &str, kind: ConsumerKind) -> Vec<&ConsumerRecord> {
        self.edge_indices(identifier, kind)
            .iter()
            .map(|idx| &self.records[*idx])
            .collect()
    }

    /// First record carrying `name`, scanning scripts, playbooks, test-playbooks.
    #[must_use]
    pub fn lookup_by_name(&self, name: &str) -> Option<&ConsumerRecord> {
        self.lookup_index(name).map(|idx| &self.records[idx])
    }

    #[must_use]
    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub(crate) fn record(&self, idx: usize) -> &ConsumerRecord {
        &self.records[idx]
    }

    pub(crate) fn lookup_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn edge_indices(&self, identifier: &str, kind: ConsumerKind) -> &[usize] {
        self.edges
            .get(identifier)
            .map_or(&[][..], |edges| edges.for_kind(kind))
    }

    pub(crate) fn has_edge(&self, identifier: &str, idx: usize) -> bool {
        self.edge_indices(identifier, self.records[idx].kind)
            .contains(&idx)
    }
}

#[derive(Default)]
struct IndexBuilder {
    records: Vec<ConsumerRecord>,
    by_name: HashMap<String, usize>,
    edges: HashMap<String, KindEdges>,
    edge_count: usize,
}

impl IndexBuilder {
    fn push(&mut self, record: ConsumerRecord) -> usize {
        let idx = self.records.len();
        self.by_name.entry(record.name.clone()).or_insert(idx);
        self.records.push(record);
        idx
    }

    fn push_playbook(
        &mut self,
        playbook: &PlaybookRecord,
        kind: ConsumerKind,
    ) -> Result<(), StructuralError> {
        check_required(kind, &playbook.id, &playbook.name, &playbook.file_path)?;
        let owner = self.push(ConsumerRecord::from_playbook(playbook, kind));
        let referenced = playbook
            .implementing_scripts
            .iter()
            .chain(&playbook.implementing_playbooks)
            .chain(playbook.command_to_integration.keys());
        for identifier in referenced {
            self.edge(identifier, kind, owner);
        }
        Ok(())
    }

    // Edges of one owner are added contiguously, so comparing against the
    // last entry is enough to record each owner once per identifier.
    fn edge(&mut self, identifier: &str, kind: ConsumerKind, owner: usize) {
        if identifier.trim().is_empty() {
            debug!(owner = %self.records[owner].name, kind = %kind, "blank identifier skipped");
            return;
        }
        let list = self
            .edges
            .entry(identifier.to_string())
            .or_default()
            .for_kind_mut(kind);
        if list.last() != Some(&owner) {
            list.push(owner);
            self.edge_count += 1;
        }
    }
}

fn check_required(
    kind: ConsumerKind,
    id: &str,
    name: &str,
    file_path: &str,
) -> Result<(), StructuralError> {
    if name.trim().is_empty() {
        return Err(StructuralError::missing_field(kind, id, "name"));
    }
    if file_path.trim().is_empty() {
        return Err(StructuralError::missing_field(kind, id, "file_path"));
    }
    Ok(())
}
