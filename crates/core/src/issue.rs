// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! The [`Issue`] trait and the standard [`Problem`] leaf issue.
//!
//! An issue is one reported validation problem. Validators construct leaf
//! issues (usually [`Problem`]); the sequence owns them as boxed trait
//! objects so new validators can ship new issue kinds without touching
//! this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cause::{Cause, Fingerprint, Origin};

/// Result of offering a candidate issue to an existing entity.
///
/// Rejection is the normal outcome for unrelated issues, not an error.
/// Both boxes are handed back unchanged so the caller can restore the
/// existing entity and keep looking for a match.
#[derive(Debug)]
pub enum MergeOutcome {
    /// The two issues combined into one entity.
    Merged(Box<dyn Issue>),
    /// The issues are unrelated; both are returned untouched.
    Rejected {
        existing: Box<dyn Issue>,
        candidate: Box<dyn Issue>,
    },
}

/// One reported validation problem.
///
/// Object-safe so validator crates can add issue kinds of their own. A
/// composite kind ([`crate::IssueGroup`]) aggregates several problems that
/// share a cause while occupying a single sequence slot.
pub trait Issue: fmt::Debug {
    /// What is wrong. Entities with equal causes are merge candidates.
    fn cause(&self) -> &Cause;

    /// Identity of this report. A group answers with its first member's
    /// fingerprint, which keeps it merge-equivalent to that member.
    fn fingerprint(&self) -> Fingerprint;

    /// Human-readable rendering. Pure; no side effects.
    fn describe(&self) -> String;

    /// When the problem was first detected.
    fn detected_at(&self) -> DateTime<Utc>;

    /// Number of aggregated problems (1 for a leaf).
    fn count(&self) -> usize {
        1
    }

    /// Whether this entity already reports the problem with the given
    /// fingerprint. A group answers for all of its members.
    fn covers(&self, fingerprint: &Fingerprint) -> bool {
        self.fingerprint() == *fingerprint
    }

    /// Attempts to combine this entity with a candidate.
    ///
    /// On success the returned entity represents the union and is spliced
    /// into this entity's sequence slot by the caller. On rejection both
    /// entities come back unchanged.
    fn merge(self: Box<Self>, candidate: Box<dyn Issue>) -> MergeOutcome;

    /// Decomposes into leaf issues. A leaf yields itself; a group yields
    /// its members. Merging through this hook is what guarantees that
    /// groups never nest.
    fn into_members(self: Box<Self>) -> Vec<Box<dyn Issue>>;
}

/// The standard leaf issue reported by validators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    cause: Cause,
    origin: Origin,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    detected_at: DateTime<Utc>,
}

impl Problem {
    /// Creates a problem detected now, with no extra detail.
    pub fn new(cause: Cause, origin: Origin) -> Self {
        Problem { cause, origin, detail: None, detected_at: Utc::now() }
    }

    /// Sets free-form detail text (builder pattern).
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets a specific detection time (builder pattern).
    pub fn with_detected_at(mut self, detected_at: DateTime<Utc>) -> Self {
        self.detected_at = detected_at;
        self
    }

    /// The scene object that reported this problem.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Free-form detail text, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl Issue for Problem {
    fn cause(&self) -> &Cause {
        &self.cause
    }

    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(self.cause.clone(), self.origin.clone())
    }

    fn describe(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{} at {} ({detail})", self.cause, self.origin),
            None => format!("{} at {}", self.cause, self.origin),
        }
    }

    fn detected_at(&self) -> DateTime<Utc> {
        self.detected_at
    }

    fn merge(self: Box<Self>, candidate: Box<dyn Issue>) -> MergeOutcome {
        crate::group::merge_by_cause(self, candidate)
    }

    fn into_members(self: Box<Self>) -> Vec<Box<dyn Issue>> {
        vec![self as Box<dyn Issue>]
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
