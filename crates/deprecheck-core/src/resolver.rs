// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use deprecheck_model::{ConsumerKind, ConsumerRecord, TestReference};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::index::CorpusIndex;

/// Order in which consumer groups are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerOrder {
    /// Scripts, playbooks, test-playbooks, then declared tests.
    #[default]
    KindOrder,
    /// Scripts, declared tests, playbooks, test-playbooks.
    ScriptsFirst,
    /// Declared tests, playbooks, test-playbooks, scripts.
    PlaybooksFirst,
}

/// How an entity's own `tests` list contributes to its consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredTests {
    /// Every resolvable declared test is a consumer.
    #[default]
    Additive,
    /// A declared test counts only if it also references the identifier.
    Gated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    pub order: ConsumerOrder,
    pub declared_tests: DeclaredTests,
}

impl ResolveOptions {
    #[must_use]
    pub const fn new(order: ConsumerOrder, declared_tests: DeclaredTests) -> Self {
        Self {
            order,
            declared_tests,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Group {
    Kind(ConsumerKind),
    Declared,
}

impl ConsumerOrder {
    const fn groups(self) -> [Group; 4] {
        use ConsumerKind::{Playbook, Script, TestPlaybook};
        match self {
            Self::KindOrder => [
                Group::Kind(Script),
                Group::Kind(Playbook),
                Group::Kind(TestPlaybook),
                Group::Declared,
            ],
            Self::ScriptsFirst => [
                Group::Kind(Script),
                Group::Declared,
                Group::Kind(Playbook),
                Group::Kind(TestPlaybook),
            ],
            Self::PlaybooksFirst => [
                Group::Declared,
                Group::Kind(Playbook),
                Group::Kind(TestPlaybook),
                Group::Kind(Script),
            ],
        }
    }
}

/// Union of index edges and an entity's self-declared test references.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerResolver<'a> {
    index: &'a CorpusIndex,
}

impl<'a> ConsumerResolver<'a> {
    #[must_use]
    pub const fn new(index: &'a CorpusIndex) -> Self {
        Self { index }
    }

    #[must_use]
    pub fn resolve(&self, identifier: &str, own_tests: &[TestReference]) -> Vec<&'a ConsumerRecord> {
        self.resolve_with(identifier, own_tests, ResolveOptions::default())
    }

    /// Consumers deduplicated by `(name, kind, file_path)`, first position wins.
    #[must_use]
    pub fn resolve_with(
        &self,
        identifier: &str,
        own_tests: &[TestReference],
        options: ResolveOptions,
    ) -> Vec<&'a ConsumerRecord> {
        let index = self.index;
        let declared: Vec<usize> = own_tests
            .iter()
            .filter_map(TestReference::playbook_name)
            .filter_map(|name| index.lookup_index(name))
            .filter(|idx| match options.declared_tests {
                DeclaredTests::Additive => true,
                DeclaredTests::Gated => index.has_edge(identifier, *idx),
            })
            .collect();

        let mut seen: HashSet<(&str, ConsumerKind, &str)> = HashSet::new();
        let mut out = Vec::new();
        for group in options.order.groups() {
            let indices = match group {
                Group::Kind(kind) => index.edge_indices(identifier, kind),
                Group::Declared => &declared[..],
            };
            for idx in indices {
                let record = index.record(*idx);
                if seen.insert((record.name.as_str(), record.kind, record.file_path.as_str())) {
                    out.push(record);
                }
            }
        }

        trace!(
            identifier,
            declared = declared.len(),
            consumers = out.len(),
            "consumers resolved"
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsumerOrder, ConsumerResolver, DeclaredTests, ResolveOptions};
    use crate::index::CorpusIndex;
    use deprecheck_model::{CorpusSnapshot, PlaybookRecord, ScriptRecord, TestReference};

    fn corpus() -> CorpusIndex {
        let snapshot = CorpusSnapshot {
            scripts: vec![ScriptRecord {
                id: "s".to_string(),
                name: "caller".to_string(),
                file_path: "caller.yml".to_string(),
                deprecated: false,
                depends_on: vec!["target".to_string()],
            }],
            playbooks: Vec::new(),
            test_playbooks: vec![
                PlaybookRecord {
                    id: "t1".to_string(),
                    name: "tpb_uses".to_string(),
                    file_path: "tpb_uses.yml".to_string(),
                    deprecated: false,
                    implementing_scripts: vec!["target".to_string()],
                    implementing_playbooks: Vec::new(),
                    command_to_integration: Default::default(),
                },
                PlaybookRecord {
                    id: "t2".to_string(),
                    name: "tpb_unrelated".to_string(),
                    file_path: "tpb_unrelated.yml".to_string(),
                    deprecated: false,
                    implementing_scripts: Vec::new(),
                    implementing_playbooks: Vec::new(),
                    command_to_integration: Default::default(),
                },
            ],
        };
        CorpusIndex::build(&snapshot).expect("index")
    }

    fn names(records: &[&deprecheck_model::ConsumerRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn additive_tests_follow_kind_groups() {
        let index = corpus();
        let resolver = ConsumerResolver::new(&index);
        let tests = vec![
            TestReference::parse("tpb_unrelated"),
            TestReference::parse("tpb_uses"),
        ];
        let got = resolver.resolve("target", &tests);
        assert_eq!(names(&got), vec!["caller", "tpb_uses", "tpb_unrelated"]);
    }

    #[test]
    fn gated_tests_drop_non_consumers_and_lead_playbooks_first() {
        let index = corpus();
        let resolver = ConsumerResolver::new(&index);
        let tests = vec![
            TestReference::parse("tpb_unrelated"),
            TestReference::parse("tpb_uses"),
        ];
        let options = ResolveOptions::new(ConsumerOrder::PlaybooksFirst, DeclaredTests::Gated);
        let got = resolver.resolve_with("target", &tests, options);
        assert_eq!(names(&got), vec!["tpb_uses", "caller"]);
    }

    #[test]
    fn unknown_identifier_and_unknown_tests_resolve_to_nothing() {
        let index = corpus();
        let resolver = ConsumerResolver::new(&index);
        let tests = vec![TestReference::NoTests, TestReference::parse("missing")];
        assert!(resolver.resolve("nobody_calls_me", &tests).is_empty());
    }
}
