// SPDX-License-Identifier: Apache-2.0

//! Content fingerprint of a corpus snapshot, logged so two runs over the
//! same id-set can be correlated.

use deprecheck_model::{ConsumerKind, CorpusSnapshot, StructuralError};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 over each record's key-sorted JSON, one line per record, grouped
/// by kind in scan order.
pub fn corpus_fingerprint(snapshot: &CorpusSnapshot) -> Result<String, StructuralError> {
    let mut hasher = Sha256::new();
    hash_section(&mut hasher, ConsumerKind::Script, &snapshot.scripts)?;
    hash_section(&mut hasher, ConsumerKind::Playbook, &snapshot.playbooks)?;
    hash_section(&mut hasher, ConsumerKind::TestPlaybook, &snapshot.test_playbooks)?;
    Ok(format!("{:x}", hasher.finalize()))
}

fn hash_section<T: Serialize>(
    hasher: &mut Sha256,
    kind: ConsumerKind,
    records: &[T],
) -> Result<(), StructuralError> {
    hasher.update(format!("[{}:{}]\n", kind.as_str(), records.len()).as_bytes());
    for record in records {
        // `Value` objects are key-ordered, so field declaration order never leaks in.
        let line = serde_json::to_vec(&serde_json::to_value(record)?)?;
        hasher.update(&line);
        hasher.update(b"\n");
    }
    Ok(())
}
