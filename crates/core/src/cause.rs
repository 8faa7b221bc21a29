// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! Cause and fingerprint keys for issue deduplication.
//!
//! A [`Cause`] says *what* is wrong; a [`Fingerprint`] says what is wrong
//! *where*. Two issues with equal causes are logically equivalent and may
//! merge into one displayed entity; two issues with equal fingerprints are
//! the same report and the later one is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The groupable key describing what is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cause {
    /// Validator-defined category (e.g. `missing_texture`).
    pub kind: String,
    /// The specific thing that is wrong (e.g. the texture name).
    pub subject: String,
}

impl Cause {
    /// Creates a cause from a kind and a subject.
    pub fn new(kind: impl Into<String>, subject: impl Into<String>) -> Self {
        Cause { kind: kind.into(), subject: subject.into() }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.subject)
    }
}

/// Reference to the scene object that reported a problem.
///
/// The format is owned by the document model (entity/brush path); this
/// layer only compares and displays it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin(pub String);

impl Origin {
    /// Creates an origin from a scene object path.
    pub fn new(path: impl Into<String>) -> Self {
        Origin(path.into())
    }

    /// Returns the scene object path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one problem at one site.
///
/// Re-validation reports the same fingerprint for an unchanged problem,
/// which is what makes repeated passes idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// What is wrong.
    pub cause: Cause,
    /// Which scene object reported it.
    pub origin: Origin,
}

impl Fingerprint {
    /// Creates a fingerprint from a cause and an origin.
    pub fn new(cause: Cause, origin: Origin) -> Self {
        Fingerprint { cause, origin }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.cause, self.origin)
    }
}

#[cfg(test)]
#[path = "cause_tests.rs"]
mod tests;
