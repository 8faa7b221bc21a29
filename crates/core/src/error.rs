// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! Error types for maplint-core operations.

use thiserror::Error;

use crate::sequence::IssueId;

/// All possible errors that can occur in maplint-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("stale issue handle: {0}\n  hint: the entity was removed or replaced since the handle was issued; re-fetch the sequence head")]
    StaleHandle(IssueId),

    #[error("cannot build an issue group with no members")]
    EmptyGroup,

    #[error("cannot group issues with different causes: expected '{expected}', found '{found}'")]
    MixedCauses { expected: String, found: String },
}

/// A specialized Result type for maplint-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
