// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for structural operations on a dropdown.
//!
//! Input handling never fails; only registry edits and configuration do.

use crate::registry::ItemId;

/// Error returned by registry and configuration operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DropdownError {
    /// The item is not (or no longer) registered.
    #[error("item {0:?} is not registered")]
    UnknownItem(ItemId),
    /// Insertion position lies past the end of the registry.
    #[error("position {position} is out of range for {len} registered items")]
    PositionOutOfRange {
        /// Requested insertion position.
        position: usize,
        /// Number of registered items at the time of the call.
        len: usize,
    },
    /// The pointer movement threshold is negative or not finite.
    #[error("pointer movement threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),
}
