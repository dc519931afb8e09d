// SPDX-License-Identifier: Apache-2.0

//! Diagnostic text for deprecated entities that are still in use.
//!
//! The rendered text is scraped by downstream log tooling, so its wording,
//! line breaks and location order are part of the contract.

use std::collections::HashSet;
use std::fmt;

use deprecheck_model::{ConsumerRecord, EntityKind};
use deprecheck_policies::DiagnosticCodes;
use serde::{Deserialize, Serialize};

/// Where one deprecated identifier is still used. `command` is set for
/// integration commands only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub command: Option<String>,
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub kind: EntityKind,
    pub entity: String,
    pub usages: Vec<Usage>,
}

impl Diagnostic {
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = match self.kind {
            EntityKind::Integration => format!(
                "[{}] - {} integration contain deprecated commands that are being used:",
                self.code, self.entity
            ),
            EntityKind::Script => format!(
                "[{}] - {} script is deprecated and being used in the following files:",
                self.code, self.entity
            ),
            EntityKind::Playbook => format!(
                "[{}] - {} playbook is deprecated and being used in the following files:",
                self.code, self.entity
            ),
        };
        for usage in &self.usages {
            if let Some(command) = &usage.command {
                out.push('\n');
                out.push_str(command);
                out.push_str(" is being used in the following locations:");
            }
            for location in &usage.locations {
                out.push('\n');
                out.push_str(location);
            }
        }
        out
    }

    #[must_use]
    pub fn location_count(&self) -> usize {
        self.usages.iter().map(|u| u.locations.len()).sum()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// File paths of `consumers`, first occurrence kept.
#[must_use]
pub fn dedup_locations(consumers: &[ConsumerRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    consumers
        .iter()
        .filter(|c| seen.insert(c.file_path.as_str()))
        .map(|c| c.file_path.clone())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticReporter {
    codes: DiagnosticCodes,
}

impl DiagnosticReporter {
    #[must_use]
    pub fn new(codes: DiagnosticCodes) -> Self {
        Self { codes }
    }

    #[must_use]
    pub fn codes(&self) -> &DiagnosticCodes {
        &self.codes
    }

    /// `flagged` keeps the order in which commands are declared on the integration.
    #[must_use]
    pub fn integration_diagnostic(
        &self,
        name: &str,
        flagged: &[(String, Vec<ConsumerRecord>)],
    ) -> Diagnostic {
        Diagnostic {
            code: self.codes.for_kind(EntityKind::Integration).to_string(),
            kind: EntityKind::Integration,
            entity: name.to_string(),
            usages: flagged
                .iter()
                .map(|(command, consumers)| Usage {
                    command: Some(command.clone()),
                    locations: dedup_locations(consumers),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn script_diagnostic(&self, name: &str, active: &[ConsumerRecord]) -> Diagnostic {
        self.entity_diagnostic(EntityKind::Script, name, active)
    }

    #[must_use]
    pub fn playbook_diagnostic(&self, name: &str, active: &[ConsumerRecord]) -> Diagnostic {
        self.entity_diagnostic(EntityKind::Playbook, name, active)
    }

    #[must_use]
    pub fn format_integration(&self, name: &str, flagged: &[(String, Vec<ConsumerRecord>)]) -> String {
        self.integration_diagnostic(name, flagged).render()
    }

    #[must_use]
    pub fn format_script(&self, name: &str, active: &[ConsumerRecord]) -> String {
        self.script_diagnostic(name, active).render()
    }

    #[must_use]
    pub fn format_playbook(&self, name: &str, active: &[ConsumerRecord]) -> String {
        self.playbook_diagnostic(name, active).render()
    }

    fn entity_diagnostic(&self, kind: EntityKind, name: &str, active: &[ConsumerRecord]) -> Diagnostic {
        Diagnostic {
            code: self.codes.for_kind(kind).to_string(),
            kind,
            entity: name.to_string(),
            usages: vec![Usage {
                command: None,
                locations: dedup_locations(active),
            }],
        }
    }
}

/// Caller-supplied destination for diagnostics.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Keeps rendered text only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingSink {
    pub messages: Vec<String>,
}

impl CollectingSink {
    #[must_use]
    pub fn joined(&self) -> String {
        self.messages.join("\n")
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.messages.push(diagnostic.render());
    }
}

/// Forwards each diagnostic as an error-level `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

pub const DIAGNOSTIC_TARGET: &str = "deprecheck::diagnostic";

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::error!(
            target: DIAGNOSTIC_TARGET,
            code = %diagnostic.code,
            kind = %diagnostic.kind,
            entity = %diagnostic.entity,
            locations = diagnostic.location_count(),
            "{}",
            diagnostic.render()
        );
    }
}
