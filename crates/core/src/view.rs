// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! Observer-side rendering of the issue sequence.
//!
//! The issue browser consumes [`Row`] records rebuilt after every
//! validation pass. Rows carry the entity handle so the UI can map
//! selection back to the sequence, but a handle must be re-checked with
//! [`IssueSequence::contains`] after any later pass.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sequence::{IssueId, IssueSequence};

/// One display row of the issue browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Handle of the entity behind this row.
    pub issue: IssueId,
    /// Cause kind, for grouping and filter UI.
    pub kind: String,
    /// Rendered description.
    pub text: String,
    /// Number of aggregated problems (1 for a leaf, members for a group).
    pub count: usize,
    /// Earliest detection time of the underlying problems.
    pub detected_at: DateTime<Utc>,
}

/// Cause kinds the user has hidden from the issue browser.
#[derive(Debug, Default, Clone)]
pub struct HiddenKinds {
    kinds: HashSet<String>,
}

impl HiddenKinds {
    /// Creates an empty filter (everything visible).
    pub fn new() -> Self {
        HiddenKinds::default()
    }

    /// Hides a cause kind.
    pub fn hide(&mut self, kind: impl Into<String>) {
        self.kinds.insert(kind.into());
    }

    /// Shows a previously hidden kind. Returns true if it was hidden.
    pub fn show(&mut self, kind: &str) -> bool {
        self.kinds.remove(kind)
    }

    /// True if the kind is currently hidden.
    pub fn is_hidden(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }
}

/// Builds display rows for every visible entity, in sequence order.
pub fn rows(sequence: &IssueSequence, hidden: &HiddenKinds) -> Vec<Row> {
    sequence
        .iter()
        .filter(|(_, issue)| !hidden.is_hidden(&issue.cause().kind))
        .map(|(id, issue)| Row {
            issue: id,
            kind: issue.cause().kind.clone(),
            text: issue.describe(),
            count: issue.count(),
            detected_at: issue.detected_at(),
        })
        .collect()
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
