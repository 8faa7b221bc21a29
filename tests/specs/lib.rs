// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Maplint Contributors

//! Spec-level tests for maplint. The test files under `core/` are wired
//! into the crates they exercise via `[[test]]` entries.
