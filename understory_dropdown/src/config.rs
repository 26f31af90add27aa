// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown configuration.

use alloc::string::String;

use crate::{DropdownError, PopoverPosition};

/// Default delay after opening before a pointer release may commit a selection.
pub const DEFAULT_READY_TO_SELECT_DELAY: u64 = 400;
/// Default delay after the last keystroke before the typeahead buffer clears.
pub const DEFAULT_TYPEAHEAD_RESET_DELAY: u64 = 1000;
/// Default per-axis pointer travel that counts as deliberate movement.
pub const DEFAULT_POINTER_MOVE_THRESHOLD: f64 = 8.0;

/// Tunables for a [`Dropdown`](crate::Dropdown) instance.
///
/// All durations are in milliseconds and are compared against the timestamps
/// carried on incoming events.
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownConfig {
    /// Identifier of the dropdown. Trigger and item ids are derived from it.
    pub id: String,
    /// How long after opening a pointer release is absorbed instead of selecting.
    pub ready_to_select_delay: u64,
    /// How long the typeahead buffer survives without a new keystroke.
    pub typeahead_reset_delay: u64,
    /// Pointer travel, in either axis, from the trigger press position that
    /// arms selection before the ready delay elapses.
    pub pointer_move_threshold: f64,
    /// Whether the popover renders into a top-level layer.
    pub portal: bool,
    /// Placement hint for the popover.
    pub position: PopoverPosition,
}

impl DropdownConfig {
    /// Create a configuration with default timings for the given dropdown id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Check that the configuration can drive a dropdown.
    pub fn validate(&self) -> Result<(), DropdownError> {
        let threshold = self.pointer_move_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(DropdownError::InvalidThreshold(threshold));
        }
        Ok(())
    }
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            id: String::from("menu"),
            ready_to_select_delay: DEFAULT_READY_TO_SELECT_DELAY,
            typeahead_reset_delay: DEFAULT_TYPEAHEAD_RESET_DELAY,
            pointer_move_threshold: DEFAULT_POINTER_MOVE_THRESHOLD,
            portal: true,
            position: PopoverPosition::Start,
        }
    }
}
