// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! Incremental re-validation driver.
//!
//! Pass rules:
//! - an entity none of whose problems were re-reported is resolved and
//!   removed; everything else keeps its position and handle
//! - a detected problem whose fingerprint is already covered is dropped
//! - otherwise it merges into the first entity (in sequence order) that
//!   accepts it, which keeps that entity's slot
//! - otherwise it is appended at the tail as a new entity
//!
//! Scan order is sequence order, so identical validator output against
//! identical prior state always makes the same decisions, and running the
//! same pass twice changes nothing the second time.

use tracing::debug;

use crate::cause::Fingerprint;
use crate::issue::Issue;
use crate::sequence::{IssueId, IssueSequence, MergeAttempt};

/// Outcome of folding one detected issue into the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The exact problem is already reported; nothing changed.
    AlreadyReported(IssueId),
    /// An existing entity absorbed the issue and kept its position.
    Merged(IssueId),
    /// No match; the issue was appended as a new entity.
    Inserted(IssueId),
}

/// Counters for one validation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    /// Issues appended as new entities.
    pub inserted: usize,
    /// Issues absorbed by an existing entity.
    pub merged: usize,
    /// Issues dropped because they were already reported.
    pub unchanged: usize,
    /// Entities removed because their problems were resolved.
    pub removed: usize,
}

impl PassStats {
    /// True if the pass left the sequence structurally untouched.
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.merged == 0 && self.removed == 0
    }
}

/// Boundary for scene validators.
///
/// A validator inspects the document model and reports every problem it
/// can currently see as freshly constructed, unlinked issues. It never
/// touches the sequence itself.
pub trait Validator<S> {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Inspects the scene and reports detected problems.
    fn check(&self, scene: &S) -> Vec<Box<dyn Issue>>;
}

impl IssueSequence {
    /// Folds one freshly detected issue into the sequence.
    ///
    /// The merge scan visits entities in sequence order and offers the
    /// candidate to each via its merge hook; the first entity that accepts
    /// wins and keeps its slot.
    pub fn merge_or_append(&mut self, candidate: Box<dyn Issue>) -> Disposition {
        let fingerprint = candidate.fingerprint();

        let already = self
            .iter()
            .find(|(_, issue)| issue.covers(&fingerprint))
            .map(|(id, _)| id);
        if let Some(id) = already {
            debug!(%fingerprint, entity = %id, "problem already reported");
            return Disposition::AlreadyReported(id);
        }

        let ids: Vec<IssueId> = self.iter().map(|(id, _)| id).collect();
        let mut candidate = candidate;
        for id in ids {
            match self.merge_at(id, candidate) {
                MergeAttempt::Merged => {
                    debug!(%fingerprint, entity = %id, "merged into existing entity");
                    return Disposition::Merged(id);
                }
                MergeAttempt::Rejected(back) | MergeAttempt::Stale(back) => candidate = back,
            }
        }

        let id = self.push_back(candidate);
        debug!(%fingerprint, entity = %id, "inserted as new entity");
        Disposition::Inserted(id)
    }

    /// Removes and drops every entity matching `pred`.
    ///
    /// Non-matching entities keep their identity and position. Returns the
    /// number of entities removed.
    pub fn remove_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&dyn Issue) -> bool,
    {
        let doomed: Vec<IssueId> = self
            .iter()
            .filter(|(_, issue)| pred(*issue))
            .map(|(id, _)| id)
            .collect();
        let mut removed = 0;
        for id in doomed {
            if self.remove(id).is_ok() {
                removed += 1;
            }
        }
        removed
    }

    /// Runs one validation pass against a full fresh report.
    ///
    /// `detected` is everything the validators can currently see. Entities
    /// none of whose fingerprints appear in the report are resolved and
    /// removed first; each detected issue is then folded in via
    /// [`merge_or_append`](IssueSequence::merge_or_append).
    pub fn reconcile(&mut self, detected: Vec<Box<dyn Issue>>) -> PassStats {
        let mut stats = PassStats::default();

        let fresh: Vec<Fingerprint> = detected.iter().map(|issue| issue.fingerprint()).collect();
        stats.removed = self.remove_where(|issue| !fresh.iter().any(|fp| issue.covers(fp)));

        for candidate in detected {
            match self.merge_or_append(candidate) {
                Disposition::Inserted(_) => stats.inserted += 1,
                Disposition::Merged(_) => stats.merged += 1,
                Disposition::AlreadyReported(_) => stats.unchanged += 1,
            }
        }

        debug!(
            inserted = stats.inserted,
            merged = stats.merged,
            unchanged = stats.unchanged,
            removed = stats.removed,
            "validation pass complete"
        );
        stats
    }
}

/// Runs every validator against the scene and reconciles the combined
/// report in one pass.
pub fn run_validators<S>(
    sequence: &mut IssueSequence,
    validators: &[Box<dyn Validator<S>>],
    scene: &S,
) -> PassStats {
    let mut detected = Vec::new();
    for validator in validators {
        let found = validator.check(scene);
        debug!(validator = validator.name(), reported = found.len(), "validator finished");
        detected.extend(found);
    }
    sequence.reconcile(detected)
}

#[cfg(test)]
#[path = "revalidate_tests.rs"]
mod tests;
