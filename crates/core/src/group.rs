// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! Issue groups: several problems sharing a cause, one sequence slot.
//!
//! Grouping rules:
//! - all members share one cause; mixing causes is a construction error
//! - members are always leaves; group members are flattened on the way in
//! - the group is merge-equivalent to its first member (same fingerprint)
//! - absorbing a candidate appends to the member list in place, so the
//!   group keeps its outer-sequence slot

use chrono::{DateTime, Utc};

use crate::cause::{Cause, Fingerprint};
use crate::error::{Error, Result};
use crate::issue::{Issue, MergeOutcome};

/// A composite issue aggregating problems that share a cause.
#[derive(Debug)]
pub struct IssueGroup {
    cause: Cause,
    anchor: Fingerprint,
    members: Vec<Box<dyn Issue>>,
}

impl IssueGroup {
    /// Builds a group from issues sharing one cause.
    ///
    /// Members that are themselves groups are flattened, so the result
    /// never nests. Errors if given no members or members with differing
    /// causes.
    pub fn new(members: Vec<Box<dyn Issue>>) -> Result<Self> {
        let mut flat: Vec<Box<dyn Issue>> = Vec::with_capacity(members.len());
        for member in members {
            flat.extend(member.into_members());
        }

        let first = flat.first().ok_or(Error::EmptyGroup)?;
        let cause = first.cause().clone();
        let anchor = first.fingerprint();

        for member in &flat {
            if *member.cause() != cause {
                return Err(Error::MixedCauses {
                    expected: cause.to_string(),
                    found: member.cause().to_string(),
                });
            }
        }

        Ok(IssueGroup { cause, anchor, members: flat })
    }

    /// The aggregated problems, in the order they were merged in.
    pub fn members(&self) -> &[Box<dyn Issue>] {
        &self.members
    }

    /// Number of aggregated problems.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for a constructed group; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Issue for IssueGroup {
    fn cause(&self) -> &Cause {
        &self.cause
    }

    fn fingerprint(&self) -> Fingerprint {
        self.anchor.clone()
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.members.iter().map(|m| m.describe()).collect();
        format!("{} issues: {}", self.members.len(), parts.join("; "))
    }

    fn detected_at(&self) -> DateTime<Utc> {
        self.members.iter().map(|m| m.detected_at()).min().unwrap_or_else(Utc::now)
    }

    fn count(&self) -> usize {
        self.members.len()
    }

    fn covers(&self, fingerprint: &Fingerprint) -> bool {
        self.members.iter().any(|m| m.covers(fingerprint))
    }

    fn merge(mut self: Box<Self>, candidate: Box<dyn Issue>) -> MergeOutcome {
        if *candidate.cause() != self.cause {
            return MergeOutcome::Rejected { existing: self, candidate };
        }
        self.members.extend(candidate.into_members());
        MergeOutcome::Merged(self)
    }

    fn into_members(self: Box<Self>) -> Vec<Box<dyn Issue>> {
        self.members
    }
}

/// Cause-keyed merge shared by leaf issue kinds.
///
/// On a cause match the union of both sides' members becomes one flat
/// group; otherwise both issues are handed back unchanged.
pub fn merge_by_cause(existing: Box<dyn Issue>, candidate: Box<dyn Issue>) -> MergeOutcome {
    if existing.cause() != candidate.cause() {
        return MergeOutcome::Rejected { existing, candidate };
    }

    let cause = existing.cause().clone();
    let anchor = existing.fingerprint();
    let mut members = existing.into_members();
    members.extend(candidate.into_members());

    MergeOutcome::Merged(Box::new(IssueGroup { cause, anchor, members }))
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
