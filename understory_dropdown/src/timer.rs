// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable one-shot timeouts driven by host timestamps.
//!
//! A [`Timeout`] holds at most one pending deadline. Re-arming replaces the
//! previous deadline, and a cancelled or already fired timeout never fires
//! again until it is re-armed.

/// One-shot deadline in host milliseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeout {
    deadline: Option<u64>,
}

impl Timeout {
    /// A disarmed timeout.
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Schedule the timeout `delay` milliseconds after `now`, replacing any
    /// pending deadline.
    pub fn arm(&mut self, now: u64, delay: u64) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Pending deadline, if armed.
    pub const fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Whether a deadline is pending.
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed at `now`.
    ///
    /// Returns `true` exactly once per arming.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
