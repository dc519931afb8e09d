// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use deprecheck_model::{ConsumerKind, CorpusSnapshot, IdSetDocument, StructuralError};

fn fixture(path: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(root.join(path)).expect("read fixture")
}

#[test]
fn id_set_fixture_flattens_into_typed_records() {
    let snapshot =
        CorpusSnapshot::from_id_set_json(&fixture("tests/fixtures/id_set_minimal.json"))
            .expect("snapshot");

    assert_eq!(snapshot.record_count(), 3);
    let script = &snapshot.scripts[0];
    assert_eq!(script.id, "0c4b2f1e-script-a");
    assert_eq!(script.name, "ParseEmailFiles");
    assert!(!script.deprecated);
    assert_eq!(script.depends_on, vec!["rasterize-email", "ReadFile"]);

    let playbook = &snapshot.playbooks[0];
    assert!(playbook.deprecated);
    assert_eq!(
        playbook.command_to_integration.get("rasterize-email").map(String::as_str),
        Some("Rasterize")
    );

    let test_playbook = &snapshot.test_playbooks[0];
    assert_eq!(test_playbook.name, "ParseEmailFiles-test");
    assert!(test_playbook.implementing_playbooks.is_empty());
    assert!(test_playbook.command_to_integration.is_empty());
}

#[test]
fn corpus_order_is_preserved_per_kind() {
    let text = r#"{"scripts": [
        {"z-id": {"name": "first", "file_path": "first.yml"}},
        {"a-id": {"name": "second", "file_path": "second.yml"}}
    ]}"#;
    let snapshot = CorpusSnapshot::from_id_set_json(text).expect("snapshot");
    let names: Vec<&str> = snapshot.scripts.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn missing_name_is_a_structural_error() {
    let text = r#"{"TestPlaybooks": [{"tp-1": {"file_path": "tp.yml"}}]}"#;
    let err = CorpusSnapshot::from_id_set_json(text).expect_err("missing name");
    assert_eq!(
        err,
        StructuralError::missing_field(ConsumerKind::TestPlaybook, "tp-1", "name")
    );
    assert_eq!(
        err.to_string(),
        "test_playbook record `tp-1` is missing required field `name`"
    );
}

#[test]
fn names_and_paths_are_kept_verbatim() {
    let text = r#"{"scripts": [{"s-1": {"name": " padded ", "file_path": " p.yml "}}]}"#;
    let snapshot = CorpusSnapshot::from_id_set_json(text).expect("snapshot");
    assert_eq!(snapshot.scripts[0].name, " padded ");
    assert_eq!(snapshot.scripts[0].file_path, " p.yml ");
}

#[test]
fn wrong_field_types_surface_as_decode_errors() {
    let text = r#"{"scripts": [{"s": {"name": "s", "file_path": "s.yml", "depends_on": "oops"}}]}"#;
    let err = IdSetDocument::from_json_str(text).expect_err("bad type");
    assert!(matches!(err, StructuralError::Decode(_)));
}

#[test]
fn empty_document_is_an_empty_snapshot() {
    let snapshot = CorpusSnapshot::from_id_set_json("{}").expect("snapshot");
    assert_eq!(snapshot, CorpusSnapshot::default());
}
