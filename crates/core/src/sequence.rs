// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! The outer issue sequence.
//!
//! A doubly-linked ordering over a slot arena. The sequence exclusively
//! owns every entity; the links between neighbors are non-owning slot
//! indices, so no ownership cycles exist. Entities enter by value and are
//! therefore unlinked by construction; handles to removed entities go
//! stale (the slot generation is bumped) instead of dangling.
//!
//! `replace` and `merge_at` keep both the slot and the generation, so the
//! handle an observer holds stays valid when a merge updates a row in
//! place.

use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::issue::{Issue, MergeOutcome};

/// Generational handle to an entity in an [`IssueSequence`].
///
/// Copyable and cheap. A handle issued before an entity was removed no
/// longer resolves; operations taking one report [`Error::StaleHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueId {
    index: u32,
    generation: u32,
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug)]
enum Slot {
    Occupied {
        issue: Box<dyn Issue>,
        prev: Option<u32>,
        next: Option<u32>,
        generation: u32,
    },
    Vacant {
        generation: u32,
    },
}

/// Result of offering a candidate to the entity at a given position.
#[derive(Debug)]
pub enum MergeAttempt {
    /// Merge accepted; the combined entity occupies the same slot and the
    /// original handle remains valid.
    Merged,
    /// The entity declined; it was restored untouched and the candidate
    /// is handed back.
    Rejected(Box<dyn Issue>),
    /// The handle was stale; the candidate is handed back untouched.
    Stale(Box<dyn Issue>),
}

/// The live, ordered collection of reported issues.
#[derive(Debug, Default)]
pub struct IssueSequence {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
}

impl IssueSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        IssueSequence::default()
    }

    /// Number of entities in the sequence. A group counts as one.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no issues are currently reported.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the first entity, if any.
    pub fn head(&self) -> Option<IssueId> {
        self.head.map(|index| self.id_at(index))
    }

    /// Handle of the last entity, if any.
    pub fn tail(&self) -> Option<IssueId> {
        self.tail.map(|index| self.id_at(index))
    }

    /// Appends an entity at the tail. O(1).
    pub fn push_back(&mut self, issue: Box<dyn Issue>) -> IssueId {
        let tail = self.tail;
        let index = self.alloc(issue, tail, None);
        match tail {
            Some(t) => self.set_next(t, Some(index)),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        self.id_at(index)
    }

    /// Inserts an entity at the head. O(1).
    pub fn push_front(&mut self, issue: Box<dyn Issue>) -> IssueId {
        let head = self.head;
        let index = self.alloc(issue, None, head);
        match head {
            Some(h) => self.set_prev(h, Some(index)),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;
        self.id_at(index)
    }

    /// Splices an entity in immediately after `target`. O(1).
    pub fn insert_after(&mut self, target: IssueId, issue: Box<dyn Issue>) -> Result<IssueId> {
        let t = self.resolve(target).ok_or(Error::StaleHandle(target))?;
        let (_, old_next) = self.links(t);
        let index = self.alloc(issue, Some(t), old_next);
        self.set_next(t, Some(index));
        match old_next {
            Some(n) => self.set_prev(n, Some(index)),
            None => self.tail = Some(index),
        }
        self.len += 1;
        Ok(self.id_at(index))
    }

    /// Splices an entity in immediately before `target`. O(1).
    pub fn insert_before(&mut self, target: IssueId, issue: Box<dyn Issue>) -> Result<IssueId> {
        let t = self.resolve(target).ok_or(Error::StaleHandle(target))?;
        let (old_prev, _) = self.links(t);
        let index = self.alloc(issue, old_prev, Some(t));
        self.set_prev(t, Some(index));
        match old_prev {
            Some(p) => self.set_next(p, Some(index)),
            None => self.head = Some(index),
        }
        self.len += 1;
        Ok(self.id_at(index))
    }

    /// Unlinks the entity at `id`, repairing neighbor links, and hands
    /// ownership back to the caller. The handle goes stale. O(1).
    pub fn remove(&mut self, id: IssueId) -> Result<Box<dyn Issue>> {
        let index = self.resolve(id).ok_or(Error::StaleHandle(id))?;
        let slot = mem::replace(
            &mut self.slots[index as usize],
            Slot::Vacant { generation: id.generation.wrapping_add(1) },
        );
        let Slot::Occupied { issue, prev, next, .. } = slot else {
            return Err(Error::StaleHandle(id));
        };
        match prev {
            Some(p) => self.set_next(p, next),
            None => self.head = next,
        }
        match next {
            Some(n) => self.set_prev(n, prev),
            None => self.tail = prev,
        }
        self.free.push(index);
        self.len -= 1;
        Ok(issue)
    }

    /// Substitutes `issue` for the entity at `id`, at the same position.
    ///
    /// Neighbors are untouched and `id` remains valid, so an observer sees
    /// this as "the row changed". Returns the displaced entity. O(1).
    pub fn replace(&mut self, id: IssueId, issue: Box<dyn Issue>) -> Result<Box<dyn Issue>> {
        let index = self.resolve(id).ok_or(Error::StaleHandle(id))?;
        match &mut self.slots[index as usize] {
            Slot::Occupied { issue: slot_issue, .. } => Ok(mem::replace(slot_issue, issue)),
            Slot::Vacant { .. } => Err(Error::StaleHandle(id)),
        }
    }

    /// Offers `candidate` to the entity at `id` via its merge hook.
    ///
    /// On acceptance the combined entity takes over the slot (same handle,
    /// same neighbors). On rejection the existing entity is restored
    /// untouched.
    pub fn merge_at(&mut self, id: IssueId, candidate: Box<dyn Issue>) -> MergeAttempt {
        let Some(index) = self.resolve(id) else {
            return MergeAttempt::Stale(candidate);
        };
        let slot = mem::replace(
            &mut self.slots[index as usize],
            Slot::Vacant { generation: id.generation },
        );
        let Slot::Occupied { issue, prev, next, generation } = slot else {
            return MergeAttempt::Stale(candidate);
        };
        match issue.merge(candidate) {
            MergeOutcome::Merged(merged) => {
                self.slots[index as usize] =
                    Slot::Occupied { issue: merged, prev, next, generation };
                MergeAttempt::Merged
            }
            MergeOutcome::Rejected { existing, candidate } => {
                self.slots[index as usize] =
                    Slot::Occupied { issue: existing, prev, next, generation };
                MergeAttempt::Rejected(candidate)
            }
        }
    }

    /// Read access to the entity at `id`, or None if the handle is stale.
    pub fn get(&self, id: IssueId) -> Option<&dyn Issue> {
        let index = self.resolve(id)?;
        match &self.slots[index as usize] {
            Slot::Occupied { issue, .. } => Some(issue.as_ref()),
            Slot::Vacant { .. } => None,
        }
    }

    /// True if `id` still refers to a linked entity.
    pub fn contains(&self, id: IssueId) -> bool {
        self.resolve(id).is_some()
    }

    /// Handle of the entity before `id`, or None at the head or for a
    /// stale handle.
    pub fn prev(&self, id: IssueId) -> Option<IssueId> {
        let index = self.resolve(id)?;
        let (prev, _) = self.links(index);
        prev.map(|p| self.id_at(p))
    }

    /// Handle of the entity after `id`, or None at the tail or for a
    /// stale handle.
    pub fn next(&self, id: IssueId) -> Option<IssueId> {
        let index = self.resolve(id)?;
        let (_, next) = self.links(index);
        next.map(|n| self.id_at(n))
    }

    /// Iterates entities in sequence order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { seq: self, cursor: self.head }
    }

    /// Verifies the linkage invariant: every back link agrees with the
    /// forward link of its neighbor, the chain is acyclic, and head/tail/
    /// len caches match the chain. Diagnostic for tests.
    pub fn links_consistent(&self) -> bool {
        let mut count = 0usize;
        let mut prev: Option<u32> = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            if count >= self.len {
                // More linked slots than len admits: a cycle or a lost
                // decrement either way.
                return false;
            }
            let (p, n) = match self.slots.get(index as usize) {
                Some(Slot::Occupied { prev, next, .. }) => (*prev, *next),
                _ => return false,
            };
            if p != prev {
                return false;
            }
            prev = Some(index);
            cursor = n;
            count += 1;
        }
        count == self.len && self.tail == prev
    }

    fn resolve(&self, id: IssueId) -> Option<u32> {
        match self.slots.get(id.index as usize) {
            Some(Slot::Occupied { generation, .. }) if *generation == id.generation => {
                Some(id.index)
            }
            _ => None,
        }
    }

    fn id_at(&self, index: u32) -> IssueId {
        let generation = match &self.slots[index as usize] {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation } => *generation,
        };
        IssueId { index, generation }
    }

    fn links(&self, index: u32) -> (Option<u32>, Option<u32>) {
        match &self.slots[index as usize] {
            Slot::Occupied { prev, next, .. } => (*prev, *next),
            Slot::Vacant { .. } => (None, None),
        }
    }

    fn set_prev(&mut self, index: u32, prev: Option<u32>) {
        if let Slot::Occupied { prev: p, .. } = &mut self.slots[index as usize] {
            *p = prev;
        }
    }

    fn set_next(&mut self, index: u32, next: Option<u32>) {
        if let Slot::Occupied { next: n, .. } = &mut self.slots[index as usize] {
            *n = next;
        }
    }

    fn alloc(&mut self, issue: Box<dyn Issue>, prev: Option<u32>, next: Option<u32>) -> u32 {
        if let Some(index) = self.free.pop() {
            let generation = match &self.slots[index as usize] {
                Slot::Vacant { generation } | Slot::Occupied { generation, .. } => *generation,
            };
            self.slots[index as usize] = Slot::Occupied { issue, prev, next, generation };
            index
        } else {
            self.slots.push(Slot::Occupied { issue, prev, next, generation: 0 });
            (self.slots.len() - 1) as u32
        }
    }
}

/// Borrowing iterator over `(handle, entity)` pairs in sequence order.
pub struct Iter<'a> {
    seq: &'a IssueSequence,
    cursor: Option<u32>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (IssueId, &'a dyn Issue);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        match &self.seq.slots[index as usize] {
            Slot::Occupied { issue, next, generation, .. } => {
                self.cursor = *next;
                Some((IssueId { index, generation: *generation }, issue.as_ref()))
            }
            Slot::Vacant { .. } => None,
        }
    }
}

impl<'a> IntoIterator for &'a IssueSequence {
    type Item = (IssueId, &'a dyn Issue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Draining iterator yielding owned entities in sequence order.
pub struct IntoIter {
    seq: IssueSequence,
}

impl Iterator for IntoIter {
    type Item = Box<dyn Issue>;

    fn next(&mut self) -> Option<Box<dyn Issue>> {
        let head = self.seq.head()?;
        self.seq.remove(head).ok()
    }
}

impl IntoIterator for IssueSequence {
    type Item = Box<dyn Issue>;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter { seq: self }
    }
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
