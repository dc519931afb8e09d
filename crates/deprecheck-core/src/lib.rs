// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Deprecation usage consistency checks over one id-set snapshot.
//!
//! A run decodes the snapshot, builds a [`CorpusIndex`] once, and then asks a
//! [`DeprecationValidator`] whether each deprecated entity still has an
//! active (non-deprecated) consumer. Violations are reported as
//! [`Diagnostic`]s through a caller-supplied [`DiagnosticSink`].

mod batch;
mod fingerprint;
mod index;
mod report;
mod resolver;
mod validator;

pub use batch::{validate_batch, BatchReport, EntityOutcome};
pub use fingerprint::corpus_fingerprint;
pub use index::{CorpusIndex, IndexStats};
pub use report::{
    dedup_locations, CollectingSink, Diagnostic, DiagnosticReporter, DiagnosticSink,
    TracingSink, Usage, DIAGNOSTIC_TARGET,
};
pub use resolver::{ConsumerOrder, ConsumerResolver, DeclaredTests, ResolveOptions};
pub use validator::{resolve_options_for, DeprecationValidator, Verdict};

pub use deprecheck_model as model;
pub use deprecheck_policies as policies;

pub const CRATE_NAME: &str = "deprecheck-core";
