// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! maplint-core: incremental issue tracking for scene validation
//!
//! This crate provides the live collection of validation problems detected
//! in an edited 3D scene. Validators report problems as [`Issue`] entities;
//! the [`IssueSequence`] keeps them in a stable order, merges equivalent
//! problems into [`IssueGroup`] entities that occupy a single slot, and
//! supports incremental re-validation without disturbing the identity of
//! entities an observer (the issue browser UI) is still displaying.

pub mod cause;
pub mod error;
pub mod group;
pub mod issue;
pub mod revalidate;
pub mod sequence;
pub mod view;

pub use cause::{Cause, Fingerprint, Origin};
pub use error::{Error, Result};
pub use group::IssueGroup;
pub use issue::{Issue, MergeOutcome, Problem};
pub use revalidate::{run_validators, Disposition, PassStats, Validator};
pub use sequence::{IssueId, IssueSequence, MergeAttempt};
pub use view::{rows, HiddenKinds, Row};
