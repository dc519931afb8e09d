// SPDX-License-Identifier: Apache-2.0

use deprecheck_model::{EntityKind, EntityUnderTest};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::report::{Diagnostic, DiagnosticSink};
use crate::validator::DeprecationValidator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityOutcome {
    pub kind: EntityKind,
    pub name: String,
    pub ok: bool,
    pub diagnostic: Option<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub corpus_fingerprint: String,
    pub outcomes: Vec<EntityOutcome>,
}

impl BatchReport {
    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.ok)
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.ok).count()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.outcomes.iter().filter_map(|o| o.diagnostic.as_ref())
    }

    /// Diagnostics in entity order, one block per failing entity.
    #[must_use]
    pub fn render(&self) -> String {
        self.diagnostics()
            .map(Diagnostic::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replays buffered diagnostics into `sink` in entity order.
    pub fn drain_into(self, sink: &mut dyn DiagnosticSink) {
        for diagnostic in self.outcomes.into_iter().filter_map(|o| o.diagnostic) {
            sink.emit(diagnostic);
        }
    }
}

/// Evaluates each entity independently. Diagnostics are buffered per entity,
/// so the report keeps input order whether or not the work runs in parallel.
#[must_use]
pub fn validate_batch(
    validator: &DeprecationValidator<'_>,
    entities: &[EntityUnderTest],
    parallel: bool,
) -> BatchReport {
    let outcomes: Vec<EntityOutcome> = if parallel {
        entities
            .par_iter()
            .map(|entity| evaluate_one(validator, entity))
            .collect()
    } else {
        entities
            .iter()
            .map(|entity| evaluate_one(validator, entity))
            .collect()
    };

    let report = BatchReport {
        corpus_fingerprint: validator.index().fingerprint().to_string(),
        outcomes,
    };
    info!(
        entities = entities.len(),
        failed = report.failed(),
        parallel,
        "deprecation batch validated"
    );
    report
}

fn evaluate_one(validator: &DeprecationValidator<'_>, entity: &EntityUnderTest) -> EntityOutcome {
    let mut buffered: Vec<Diagnostic> = Vec::new();
    let ok = validator.validate(entity, &mut buffered);
    EntityOutcome {
        kind: entity.kind(),
        name: entity.name().to_string(),
        ok,
        diagnostic: buffered.pop(),
    }
}
