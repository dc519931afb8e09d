// SPDX-License-Identifier: Apache-2.0

mod support;

use deprecheck_core::model::{EntityUnderTest, Playbook, Script};
use deprecheck_core::policies::{DeprecationPolicy, DiagnosticCodes};
use deprecheck_core::{CollectingSink, DeprecationValidator};
use support::{mocked_index, tests};

fn used_script() -> Script {
    Script {
        name: "script_case_2".to_string(),
        deprecated: true,
        tests: Vec::new(),
    }
}

#[test]
fn ignored_code_waives_the_violation() {
    let index = mocked_index();
    let policy = DeprecationPolicy {
        ignored_codes: vec!["SC107".to_string()],
        ..DeprecationPolicy::default()
    };
    let validator = DeprecationValidator::new(&index, policy);

    let mut sink = CollectingSink::default();
    assert!(validator.is_script_deprecated_and_used(&used_script(), &mut sink));
    assert!(sink.messages.is_empty());
    assert!(validator.script_diagnostic(&used_script()).is_some());

    let playbook = Playbook {
        name: "playbook_case_6".to_string(),
        deprecated: true,
        tests: tests(&["testplaybook_2"]),
    };
    assert!(!validator.is_playbook_deprecated_and_used(&playbook, &mut sink));
    assert_eq!(sink.messages.len(), 1);
    assert!(sink.messages[0].starts_with("[PB118] - playbook_case_6 "));
}

#[test]
fn custom_codes_appear_in_rendered_text() {
    let index = mocked_index();
    let policy = DeprecationPolicy {
        codes: DiagnosticCodes {
            integration: "XX001".to_string(),
            script: "XX002".to_string(),
            playbook: "XX003".to_string(),
        },
        ..DeprecationPolicy::default()
    };
    let validator = DeprecationValidator::new(&index, policy);

    let mut diagnostics = Vec::new();
    assert!(!validator.validate(&EntityUnderTest::Script(used_script()), &mut diagnostics));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, "XX002");
    assert_eq!(
        diagnostics[0].render(),
        "[XX002] - script_case_2 script is deprecated and being used in the following files:\nplaybook_2.yml"
    );
}
