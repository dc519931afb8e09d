// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use deprecheck_model::{
    ConsumerRecord, EntityKind, EntityUnderTest, Integration, Playbook, Script, TestReference,
};
use deprecheck_policies::DeprecationPolicy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::index::CorpusIndex;
use crate::report::{Diagnostic, DiagnosticReporter, DiagnosticSink};
use crate::resolver::{ConsumerOrder, ConsumerResolver, DeclaredTests, ResolveOptions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub ok: bool,
    pub active_consumers: Vec<ConsumerRecord>,
}

impl Verdict {
    #[must_use]
    pub fn clean() -> Self {
        Self {
            ok: true,
            active_consumers: Vec::new(),
        }
    }
}

/// Consumer ordering and test handling used for each entity kind.
#[must_use]
pub const fn resolve_options_for(kind: EntityKind) -> ResolveOptions {
    match kind {
        EntityKind::Integration => {
            ResolveOptions::new(ConsumerOrder::PlaybooksFirst, DeclaredTests::Gated)
        }
        EntityKind::Script => ResolveOptions::new(ConsumerOrder::ScriptsFirst, DeclaredTests::Additive),
        EntityKind::Playbook => {
            ResolveOptions::new(ConsumerOrder::PlaybooksFirst, DeclaredTests::Additive)
        }
    }
}

/// Pass/fail policy for deprecated entities. Every check is a pure function
/// of the entity and the shared, read-only index.
#[derive(Debug, Clone)]
pub struct DeprecationValidator<'a> {
    index: &'a CorpusIndex,
    policy: DeprecationPolicy,
    reporter: DiagnosticReporter,
}

impl<'a> DeprecationValidator<'a> {
    #[must_use]
    pub fn new(index: &'a CorpusIndex, policy: DeprecationPolicy) -> Self {
        let reporter = DiagnosticReporter::new(policy.codes.clone());
        Self {
            index,
            policy,
            reporter,
        }
    }

    #[must_use]
    pub fn with_default_policy(index: &'a CorpusIndex) -> Self {
        Self::new(index, DeprecationPolicy::default())
    }

    #[must_use]
    pub fn index(&self) -> &'a CorpusIndex {
        self.index
    }

    #[must_use]
    pub fn policy(&self) -> &DeprecationPolicy {
        &self.policy
    }

    #[must_use]
    pub fn reporter(&self) -> &DiagnosticReporter {
        &self.reporter
    }

    #[must_use]
    pub fn evaluate(
        &self,
        identifier: &str,
        effective_deprecated: bool,
        own_tests: &[TestReference],
    ) -> Verdict {
        self.evaluate_with(
            identifier,
            effective_deprecated,
            own_tests,
            ResolveOptions::default(),
        )
    }

    /// Non-deprecated identifiers are clean whatever their consumers are.
    /// Active consumers are listed once per file path, first occurrence kept.
    #[must_use]
    pub fn evaluate_with(
        &self,
        identifier: &str,
        effective_deprecated: bool,
        own_tests: &[TestReference],
        options: ResolveOptions,
    ) -> Verdict {
        if !effective_deprecated {
            return Verdict::clean();
        }
        let mut seen_paths = HashSet::new();
        let active_consumers: Vec<ConsumerRecord> = ConsumerResolver::new(self.index)
            .resolve_with(identifier, own_tests, options)
            .into_iter()
            .filter(|c| c.is_active())
            .filter(|c| seen_paths.insert(c.file_path.as_str()))
            .cloned()
            .collect();
        let ok = active_consumers.is_empty();
        debug!(identifier, ok, active = active_consumers.len(), "deprecation verdict");
        Verdict {
            ok,
            active_consumers,
        }
    }

    /// `true` when no deprecated command of the integration has an active consumer.
    pub fn is_integration_deprecated_and_used(
        &self,
        integration: &Integration,
        sink: &mut dyn DiagnosticSink,
    ) -> bool {
        match self.integration_diagnostic(integration) {
            None => true,
            Some(diagnostic) => self.report(diagnostic, sink),
        }
    }

    pub fn is_script_deprecated_and_used(&self, script: &Script, sink: &mut dyn DiagnosticSink) -> bool {
        match self.script_diagnostic(script) {
            None => true,
            Some(diagnostic) => self.report(diagnostic, sink),
        }
    }

    pub fn is_playbook_deprecated_and_used(
        &self,
        playbook: &Playbook,
        sink: &mut dyn DiagnosticSink,
    ) -> bool {
        match self.playbook_diagnostic(playbook) {
            None => true,
            Some(diagnostic) => self.report(diagnostic, sink),
        }
    }

    pub fn validate(&self, entity: &EntityUnderTest, sink: &mut dyn DiagnosticSink) -> bool {
        match entity {
            EntityUnderTest::Integration(integration) => {
                self.is_integration_deprecated_and_used(integration, sink)
            }
            EntityUnderTest::Script(script) => self.is_script_deprecated_and_used(script, sink),
            EntityUnderTest::Playbook(playbook) => {
                self.is_playbook_deprecated_and_used(playbook, sink)
            }
        }
    }

    /// The violation diagnostic for `integration`, before waivers are applied.
    #[must_use]
    pub fn integration_diagnostic(&self, integration: &Integration) -> Option<Diagnostic> {
        let options = resolve_options_for(EntityKind::Integration);
        let flagged: Vec<(String, Vec<ConsumerRecord>)> = integration
            .commands
            .iter()
            .filter_map(|command| {
                let verdict = self.evaluate_with(
                    &command.name,
                    integration.is_command_deprecated(command),
                    &integration.tests,
                    options,
                );
                (!verdict.ok).then(|| (command.name.clone(), verdict.active_consumers))
            })
            .collect();
        if flagged.is_empty() {
            return None;
        }
        Some(self.reporter.integration_diagnostic(&integration.name, &flagged))
    }

    #[must_use]
    pub fn script_diagnostic(&self, script: &Script) -> Option<Diagnostic> {
        let verdict = self.evaluate_with(
            &script.name,
            script.deprecated,
            &script.tests,
            resolve_options_for(EntityKind::Script),
        );
        (!verdict.ok).then(|| {
            self.reporter
                .script_diagnostic(&script.name, &verdict.active_consumers)
        })
    }

    #[must_use]
    pub fn playbook_diagnostic(&self, playbook: &Playbook) -> Option<Diagnostic> {
        let verdict = self.evaluate_with(
            &playbook.name,
            playbook.deprecated,
            &playbook.tests,
            resolve_options_for(EntityKind::Playbook),
        );
        (!verdict.ok).then(|| {
            self.reporter
                .playbook_diagnostic(&playbook.name, &verdict.active_consumers)
        })
    }

    fn report(&self, diagnostic: Diagnostic, sink: &mut dyn DiagnosticSink) -> bool {
        if self.policy.is_ignored(&diagnostic.code) {
            info!(
                code = %diagnostic.code,
                kind = %diagnostic.kind,
                entity = %diagnostic.entity,
                "deprecated usage waived by ignored code"
            );
            return true;
        }
        warn!(
            code = %diagnostic.code,
            kind = %diagnostic.kind,
            entity = %diagnostic.entity,
            locations = diagnostic.location_count(),
            "deprecated entity still in use"
        );
        sink.emit(diagnostic);
        false
    }
}
