// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Deprecation usage model SSOT.
//!
//! Corpus records come from an id-set snapshot; entities under test are
//! supplied per validation call and are never part of the corpus.

mod corpus;
mod entity;
mod error;
mod id_set;

pub use corpus::{ConsumerKind, ConsumerRecord, CorpusSnapshot, PlaybookRecord, ScriptRecord};
pub use entity::{
    EntityKind, EntityUnderTest, Integration, IntegrationCommand, Playbook, Script,
    TestReference, NO_TESTS_SENTINEL,
};
pub use error::StructuralError;
pub use id_set::{IdSetDocument, RawRecord};

pub const CRATE_NAME: &str = "deprecheck-model";
