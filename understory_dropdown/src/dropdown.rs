// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget-instance context shared by every controller.
//!
//! [`Dropdown`] owns the state store, the item registry, the cross-controller
//! guards, the select-callback table, and both timers. Controllers are
//! `impl Dropdown` blocks in their own modules; they all funnel state changes
//! through [`Dropdown::dispatch`] (or its internal equivalent), which performs
//! the focus side effect of [`Action::SelectItemAtIndex`], reduces the state,
//! and then synchronises everything that depends on it: timers, focus on open,
//! index reconciliation, and typeahead matching.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::mem;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::event::{DropdownHost, FocusTarget};
use crate::registry::{Descendant, Descendants, ItemFlags, ItemId, ItemSpec};
use crate::state::{Action, DropdownState, reduce};
use crate::timer::Timeout;
use crate::{DropdownConfig, DropdownError};

/// Callback invoked when an item is committed.
pub type SelectCallback = Box<dyn FnMut()>;

/// Per-item state that is not part of the registry descriptor.
#[derive(Default)]
pub(crate) struct ItemSlot {
    pub(crate) on_select: Option<SelectCallback>,
    /// A primary pointer-down landed on this (link) item and no document
    /// pointer-up has been seen since.
    pub(crate) pointer_cycle_started: bool,
}

impl fmt::Debug for ItemSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemSlot")
            .field("on_select", &self.on_select.is_some())
            .field("pointer_cycle_started", &self.pointer_cycle_started)
            .finish()
    }
}

/// What dependents last observed, used to detect changes after a dispatch.
#[derive(Clone, Debug, Default)]
pub(crate) struct Snapshot {
    pub(crate) expanded: bool,
    pub(crate) len: usize,
    pub(crate) revision: u64,
    pub(crate) selection: Option<usize>,
    pub(crate) selected_key: Option<String>,
    pub(crate) query: String,
}

impl Snapshot {
    fn capture(state: &DropdownState, items: &Descendants) -> Self {
        Self {
            expanded: state.is_expanded,
            len: items.len(),
            revision: items.revision(),
            selection: state.selection_index,
            selected_key: state
                .selection_index
                .and_then(|index| items.get(index))
                .map(|item| String::from(item.key())),
            query: state.typeahead_query.clone(),
        }
    }
}

/// Interaction engine for one dropdown menu.
pub struct Dropdown {
    pub(crate) config: DropdownConfig,
    pub(crate) state: DropdownState,
    pub(crate) items: Descendants,
    pub(crate) slots: HashMap<ItemId, ItemSlot>,
    /// A pointer release may commit a selection.
    pub(crate) ready_to_select: bool,
    /// The menu was just opened by a trigger press; absorb that press's
    /// outside-pointer check.
    pub(crate) trigger_clicked: bool,
    /// Where the last primary trigger press started.
    pub(crate) pointer_start: Point,
    pub(crate) popover_bounds: Option<Rect>,
    pub(crate) ready_timer: Timeout,
    pub(crate) typeahead_timer: Timeout,
    pub(crate) seen: Snapshot,
    pub(crate) now: u64,
}

impl fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dropdown")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("items", &self.items)
            .field("ready_to_select", &self.ready_to_select)
            .field("trigger_clicked", &self.trigger_clicked)
            .field("pointer_start", &self.pointer_start)
            .field("popover_bounds", &self.popover_bounds)
            .field("ready_timer", &self.ready_timer)
            .field("typeahead_timer", &self.typeahead_timer)
            .finish_non_exhaustive()
    }
}

impl Dropdown {
    /// Create a dropdown with default timings.
    pub fn new(id: impl Into<String>) -> Self {
        Self::from_valid_config(DropdownConfig::new(id))
    }

    /// Create a dropdown from an explicit configuration.
    pub fn with_config(config: DropdownConfig) -> Result<Self, DropdownError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: DropdownConfig) -> Self {
        let state = DropdownState {
            trigger_id: Some(format!("menu-button--{}", config.id)),
            ..DropdownState::default()
        };
        let items = Descendants::new();
        let seen = Snapshot::capture(&state, &items);
        Self {
            config,
            state,
            items,
            slots: HashMap::new(),
            ready_to_select: false,
            trigger_clicked: false,
            pointer_start: Point::ZERO,
            popover_bounds: None,
            ready_timer: Timeout::new(),
            typeahead_timer: Timeout::new(),
            seen,
            now: 0,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    /// Identifier of the dropdown (and of the items container).
    pub fn id(&self) -> &str {
        &self.config.id
    }

    /// Current state.
    pub fn state(&self) -> &DropdownState {
        &self.state
    }

    /// Whether the menu is open.
    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded
    }

    /// Registry index of the active item.
    pub fn selection_index(&self) -> Option<usize> {
        self.state.selection_index
    }

    /// Current typeahead buffer.
    pub fn typeahead_query(&self) -> &str {
        &self.state.typeahead_query
    }

    /// Whether a pointer release may currently commit a selection.
    pub fn is_ready_to_select(&self) -> bool {
        self.ready_to_select
    }

    /// Read-only view of the registered items.
    pub fn items(&self) -> &Descendants {
        &self.items
    }

    /// Earliest pending timer deadline, for hosts that schedule wake-ups.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.ready_timer.deadline(), self.typeahead_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Register an item at the end of the menu.
    pub fn register_item<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        spec: ItemSpec,
    ) -> ItemId {
        let id = self.items.register(spec);
        self.slots.insert(id, ItemSlot::default());
        self.sync(host);
        id
    }

    /// Register an item at `position`, shifting later items.
    pub fn insert_item<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        position: usize,
        spec: ItemSpec,
    ) -> Result<ItemId, DropdownError> {
        let id = self.items.insert(position, spec)?;
        self.slots.insert(id, ItemSlot::default());
        self.sync(host);
        Ok(id)
    }

    /// Remove an item and its callback.
    pub fn unregister_item<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ItemId,
    ) -> Result<Descendant, DropdownError> {
        let removed = self.items.unregister(id)?;
        self.slots.remove(&id);
        self.sync(host);
        Ok(removed)
    }

    /// Report an item's rendered text content (see [`Descendants::set_text_content`]).
    pub fn set_item_text<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ItemId,
        text: &str,
    ) -> Result<(), DropdownError> {
        if self.items.set_text_content(id, text)? {
            self.sync(host);
        }
        Ok(())
    }

    /// Replace an item's flags.
    pub fn set_item_flags<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ItemId,
        flags: ItemFlags,
    ) -> Result<(), DropdownError> {
        self.items.set_flags(id, flags)?;
        self.sync(host);
        Ok(())
    }

    /// Record the callback to run when `id` is committed.
    ///
    /// Callbacks are keyed by item identity and resolved at commit time, so
    /// they follow their item when indices shift.
    pub fn set_on_select(
        &mut self,
        id: ItemId,
        callback: impl FnMut() + 'static,
    ) -> Result<(), DropdownError> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(DropdownError::UnknownItem(id))?;
        slot.on_select = Some(Box::new(callback));
        Ok(())
    }

    /// Apply `action` at host time `now`, with all of its consequences.
    pub fn dispatch<H: DropdownHost + ?Sized>(&mut self, host: &mut H, action: Action, now: u64) {
        self.advance(now);
        self.apply(host, action);
        self.sync(host);
    }

    /// Fire any timers due at `now`.
    pub fn tick<H: DropdownHost + ?Sized>(&mut self, host: &mut H, now: u64) {
        self.advance(now);
        if self.ready_timer.fire(now) {
            tracing::trace!("ready-to-select delay elapsed");
            self.ready_to_select = true;
        }
        if self.typeahead_timer.fire(now) && !self.state.typeahead_query.is_empty() {
            tracing::trace!(query = %self.state.typeahead_query, "typeahead buffer expired");
            self.apply(host, Action::SearchForItem(Some(String::new())));
        }
        self.sync(host);
    }

    pub(crate) fn advance(&mut self, time: u64) {
        self.now = self.now.max(time);
    }

    /// Run the side effect of `action`, then reduce it into the state.
    pub(crate) fn apply<H: DropdownHost + ?Sized>(&mut self, host: &mut H, action: Action) {
        if let Action::SelectItemAtIndex {
            index,
            focus_menu: true,
            ..
        } = action
        {
            if self.state.accepts_selection(index) {
                self.focus_menu(host);
            }
        }
        self.commit(&action);
    }

    /// Reduce `action` into the state without side effects.
    pub(crate) fn commit(&mut self, action: &Action) {
        let before = (self.state.is_expanded, self.state.selection_index);
        self.state = reduce(mem::take(&mut self.state), action);
        let after = (self.state.is_expanded, self.state.selection_index);
        if before != after {
            tracing::debug!(
                action = action.name(),
                expanded = after.0,
                selection = ?after.1,
                "dropdown state changed"
            );
        }
    }

    pub(crate) fn focus_menu<H: DropdownHost + ?Sized>(&self, host: &mut H) {
        if host.focused() != Some(FocusTarget::Menu) {
            host.focus(FocusTarget::Menu);
        }
    }

    /// Bring everything that depends on the state up to date.
    pub(crate) fn sync<H: DropdownHost + ?Sized>(&mut self, host: &mut H) {
        let now = self.now;

        if self.state.is_expanded != self.seen.expanded {
            host.set_tooltips_suppressed(self.state.is_expanded);
            if self.state.is_expanded {
                self.ready_timer.arm(now, self.config.ready_to_select_delay);
                self.focus_menu(host);
            } else {
                self.ready_timer.cancel();
                self.ready_to_select = false;
                self.trigger_clicked = false;
            }
        }

        let query_changed = self.state.typeahead_query != self.seen.query;
        if query_changed {
            if self.state.typeahead_query.is_empty() {
                self.typeahead_timer.cancel();
            } else {
                self.typeahead_timer
                    .arm(now, self.config.typeahead_reset_delay);
            }
        }

        let registry_changed = self.items.revision() != self.seen.revision;
        if registry_changed || self.state.selection_index != self.seen.selection {
            let previous = mem::take(&mut self.seen);
            self.reconcile(host, &previous);
        }
        // A leftover buffer must not move a closed menu.
        if self.state.is_expanded && (query_changed || registry_changed) {
            self.run_typeahead(host);
        }

        self.seen = Snapshot::capture(&self.state, &self.items);
    }

    pub(crate) fn slot_mut(&mut self, id: ItemId) -> Option<&mut ItemSlot> {
        self.slots.get_mut(&id)
    }
}
