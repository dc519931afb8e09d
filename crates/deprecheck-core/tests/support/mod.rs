// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::path::PathBuf;

use deprecheck_core::model::TestReference;
use deprecheck_core::CorpusIndex;

pub fn fixture(path: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(root.join(path)).expect("read fixture")
}

pub fn mocked_index() -> CorpusIndex {
    CorpusIndex::from_id_set_json(&fixture("tests/fixtures/id_set.json")).expect("build index")
}

pub fn tests(names: &[&str]) -> Vec<TestReference> {
    names.iter().map(|n| TestReference::parse(n)).collect()
}
