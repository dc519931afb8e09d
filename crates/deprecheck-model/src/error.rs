// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::corpus::ConsumerKind;

/// Raised when a corpus snapshot cannot be turned into a trustworthy index.
///
/// Lookup misses are never structural errors; an unknown identifier simply
/// has no consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StructuralError {
    Decode(String),
    MalformedEntry {
        kind: ConsumerKind,
        position: usize,
        keys: usize,
    },
    MissingField {
        kind: ConsumerKind,
        id: String,
        field: &'static str,
    },
}

impl StructuralError {
    #[must_use]
    pub fn missing_field(kind: ConsumerKind, id: &str, field: &'static str) -> Self {
        Self::MissingField {
            kind,
            id: id.to_string(),
            field,
        }
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(message) => write!(f, "id-set decode failed: {message}"),
            Self::MalformedEntry {
                kind,
                position,
                keys,
            } => write!(
                f,
                "{} entry #{position} must hold exactly one record, found {keys}",
                kind.as_str()
            ),
            Self::MissingField { kind, id, field } => {
                write!(f, "{} record `{id}` is missing required field `{field}`", kind.as_str())
            }
        }
    }
}

impl std::error::Error for StructuralError {}

impl From<serde_json::Error> for StructuralError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
