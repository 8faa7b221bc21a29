// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! Specs for incremental re-validation: the worked merge and resolution
//! scenarios, group flattening, and pass idempotence.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use maplint_core::{
    rows, Cause, Disposition, HiddenKinds, Issue, IssueGroup, IssueSequence, Origin, Problem,
};

fn problem(kind: &str, subject: &str, origin: &str) -> Box<dyn Issue> {
    Box::new(Problem::new(Cause::new(kind, subject), Origin::new(origin)))
}

/// Three unrelated issues, as in the worked scenarios: `[A, B, C]`.
fn abc() -> (IssueSequence, maplint_core::IssueId, maplint_core::IssueId, maplint_core::IssueId) {
    let mut seq = IssueSequence::new();
    let a = seq.push_back(problem("missing_model", "flame.mdl", "entity[1]"));
    let b = seq.push_back(problem("missing_texture", "wood3", "brush[2]"));
    let c = seq.push_back(problem("degenerate_face", "face#3", "brush[3]"));
    (seq, a, b, c)
}

#[test]
fn equivalent_report_replaces_b_with_group_in_place() {
    let (mut seq, a, b, c) = abc();

    // validator reports a new problem equivalent to B's cause
    let disposition = seq.merge_or_append(problem("missing_texture", "wood3", "brush[7]"));
    assert_eq!(disposition, Disposition::Merged(b));

    // resulting sequence is [A, G, C], length 3
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.next(a), Some(b));
    assert_eq!(seq.prev(c), Some(b));

    // G describes both original causes
    let text = seq.get(b).map(|issue| issue.describe()).unwrap();
    assert!(text.starts_with("2 issues:"));
    assert!(text.contains("brush[2]"));
    assert!(text.contains("brush[7]"));
}

#[test]
fn resolved_report_removes_b_and_relinks_neighbors() {
    let (mut seq, a, b, c) = abc();

    let removed = seq.remove_where(|issue| issue.cause().kind == "missing_texture");
    assert_eq!(removed, 1);
    assert!(!seq.contains(b));

    // resulting sequence [A, C] with A.next() == C and C.previous() == A
    assert_eq!(seq.len(), 2);
    assert_eq!(seq.next(a), Some(c));
    assert_eq!(seq.prev(c), Some(a));
    assert!(seq.links_consistent());
}

#[test]
fn merging_groups_never_nests() {
    let cause = Cause::new("missing_texture", "wood3");
    let g1 = IssueGroup::new(vec![
        problem("missing_texture", "wood3", "brush[1]"),
        problem("missing_texture", "wood3", "brush[2]"),
    ])
    .unwrap();
    let g2 = IssueGroup::new(vec![
        problem("missing_texture", "wood3", "brush[3]"),
        problem("missing_texture", "wood3", "brush[4]"),
    ])
    .unwrap();

    let mut seq = IssueSequence::new();
    let slot = seq.push_back(Box::new(g1));
    assert!(matches!(seq.merge_at(slot, Box::new(g2)), maplint_core::MergeAttempt::Merged));

    let merged = seq.remove(slot).unwrap();
    assert_eq!(*merged.cause(), cause);
    let members = merged.into_members();
    assert_eq!(members.len(), 4);
    for member in &members {
        assert_eq!(member.count(), 1, "a flattened group holds only leaves");
    }
}

#[test]
fn full_pass_cycle_matches_editor_workflow() {
    let mut seq = IssueSequence::new();

    // first validation of a freshly loaded map
    let first = seq.reconcile(vec![
        problem("missing_texture", "wood3", "brush[1]"),
        problem("missing_texture", "wood3", "brush[2]"),
        problem("missing_model", "flame.mdl", "entity[4]"),
    ]);
    assert_eq!(first.inserted, 2);
    assert_eq!(first.merged, 1);
    assert_eq!(seq.len(), 2);

    // the user fixes one brush and breaks an entity; re-validate
    let second = seq.reconcile(vec![
        problem("missing_texture", "wood3", "brush[1]"),
        problem("missing_model", "flame.mdl", "entity[4]"),
        problem("missing_classname", "light", "entity[9]"),
    ]);
    assert_eq!(second.inserted, 1);
    assert_eq!(second.removed, 0); // the texture group still has a live member
    assert_eq!(seq.len(), 3);

    // nothing changed since: the next pass is a no-op
    let third = seq.reconcile(vec![
        problem("missing_texture", "wood3", "brush[1]"),
        problem("missing_model", "flame.mdl", "entity[4]"),
        problem("missing_classname", "light", "entity[9]"),
    ]);
    assert!(third.is_noop());
    assert!(seq.links_consistent());
}

#[test]
fn idempotent_pass_keeps_every_row_stable() {
    let mut seq = IssueSequence::new();
    let report = || {
        vec![
            problem("missing_texture", "wood3", "brush[1]"),
            problem("missing_texture", "wood3", "brush[2]"),
            problem("degenerate_face", "face#3", "brush[3]"),
        ]
    };

    seq.reconcile(report());
    let before = rows(&seq, &HiddenKinds::new());

    let stats = seq.reconcile(report());
    assert!(stats.is_noop());

    let after = rows(&seq, &HiddenKinds::new());
    assert_eq!(before, after);
}

#[test]
fn observer_rows_reflect_merges_as_row_updates() {
    let (mut seq, _, b, _) = abc();
    let before = rows(&seq, &HiddenKinds::new());
    assert_eq!(before.len(), 3);

    seq.merge_or_append(problem("missing_texture", "wood3", "brush[7]"));

    let after = rows(&seq, &HiddenKinds::new());
    assert_eq!(after.len(), 3);
    // the same row (same handle, same position) now shows the group
    assert_eq!(after[1].issue, b);
    assert_eq!(before[1].issue, after[1].issue);
    assert_eq!(after[1].count, 2);
}
