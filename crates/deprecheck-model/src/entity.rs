// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Literal used in a `tests` list to mean "deliberately untested".
pub const NO_TESTS_SENTINEL: &str = "No Tests";

/// One entry of an entity's `tests` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestReference {
    NoTests,
    Playbook(String),
}

impl TestReference {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == NO_TESTS_SENTINEL {
            Self::NoTests
        } else {
            Self::Playbook(raw.to_string())
        }
    }

    /// Test-playbook name to resolve against the corpus, if any.
    #[must_use]
    pub fn playbook_name(&self) -> Option<&str> {
        match self {
            Self::NoTests => None,
            Self::Playbook(name) => Some(name),
        }
    }
}

impl From<String> for TestReference {
    fn from(value: String) -> Self {
        if value == NO_TESTS_SENTINEL {
            Self::NoTests
        } else {
            Self::Playbook(value)
        }
    }
}

impl From<&str> for TestReference {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<TestReference> for String {
    fn from(value: TestReference) -> Self {
        match value {
            TestReference::NoTests => NO_TESTS_SENTINEL.to_string(),
            TestReference::Playbook(name) => name,
        }
    }
}

impl Display for TestReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTests => f.write_str(NO_TESTS_SENTINEL),
            Self::Playbook(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationCommand {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
}

impl IntegrationCommand {
    #[must_use]
    pub fn new(name: &str, deprecated: bool) -> Self {
        Self {
            name: name.to_string(),
            deprecated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub commands: Vec<IntegrationCommand>,
    #[serde(default)]
    pub tests: Vec<TestReference>,
}

impl Integration {
    /// A command inherits deprecation from its owning integration.
    #[must_use]
    pub fn is_command_deprecated(&self, command: &IntegrationCommand) -> bool {
        self.deprecated || command.deprecated
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub tests: Vec<TestReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playbook {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub tests: Vec<TestReference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Integration,
    Script,
    Playbook,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integration => "integration",
            Self::Script => "script",
            Self::Playbook => "playbook",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity handed to a validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityUnderTest {
    Integration(Integration),
    Script(Script),
    Playbook(Playbook),
}

impl EntityUnderTest {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Integration(_) => EntityKind::Integration,
            Self::Script(_) => EntityKind::Script,
            Self::Playbook(_) => EntityKind::Playbook,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Integration(i) => &i.name,
            Self::Script(s) => &s.name,
            Self::Playbook(p) => &p.name,
        }
    }
}
