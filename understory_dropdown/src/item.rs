// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item controller: per-item pointer, focus, and drag behavior, and commit.
//!
//! ## Ready to select
//!
//! Opening the menu with a trigger press and releasing over an item that
//! happens to sit under the pointer must not select it. A pointer release only
//! commits once the dropdown is *ready to select*, which happens when the
//! first of these occurs after opening:
//!
//! - the configured delay elapses (see [`Dropdown::tick`]),
//! - the pointer travels past the movement threshold from where the trigger
//!   was pressed,
//! - an item receives focus.
//!
//! The first release before that point is absorbed and arms selection.
//!
//! ## Link items
//!
//! Link items commit through their click handler so that the host's native
//! navigation runs. A press and release on the same link leaves commit to the
//! click that follows; a release without a preceding press (for example after
//! dragging in from the trigger) asks the host to synthesize that click.

use crate::event::{DropdownHost, FocusEvent, FocusTarget, Outcome, PointerEvent};
use crate::registry::ItemId;
use crate::state::Action;
use crate::{Dropdown, ItemProps, item_element_id};

impl Dropdown {
    /// Whether `id` is the active item. Disabled items are never active.
    pub fn is_item_selected(&self, id: ItemId) -> bool {
        self.items.index_of(id).is_some_and(|index| {
            self.state.selection_index == Some(index)
                && self.items.get(index).is_some_and(|item| !item.is_disabled())
        })
    }

    /// Commit `id`: focus the trigger, run its callback, and close the menu.
    pub fn select_item<H: DropdownHost + ?Sized>(&mut self, host: &mut H, id: ItemId) {
        self.commit_item(host, id);
        self.sync(host);
    }

    pub(crate) fn commit_item<H: DropdownHost + ?Sized>(&mut self, host: &mut H, id: ItemId) {
        host.focus(FocusTarget::Trigger);
        if let Some(callback) = self
            .slot_mut(id)
            .and_then(|slot| slot.on_select.as_mut())
        {
            callback();
        }
        self.apply(host, Action::ClickMenuItem);
    }

    /// Index of `id` if it can become active right now.
    fn selectable_index(&self, id: ItemId) -> Option<usize> {
        let index = self.items.index_of(id)?;
        let item = self.items.get(index)?;
        (!item.is_disabled() && self.state.accepts_selection(index)).then_some(index)
    }

    /// Native click on an item. Only link items act on clicks.
    pub fn on_item_click<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ItemId,
        event: &PointerEvent,
    ) -> Outcome {
        if event.default_prevented || !event.is_primary() {
            return Outcome::Ignored;
        }
        let Some(item) = self.items.find(|item| item.id() == id) else {
            return Outcome::Ignored;
        };
        if !item.is_link() {
            return Outcome::Ignored;
        }
        if item.is_disabled() {
            return Outcome::PreventDefault;
        }
        self.advance(event.time);
        self.select_item(host, id);
        Outcome::Handled
    }

    /// Drag start on an item. Native dragging of link items is suppressed.
    pub fn on_item_drag_start(&mut self, id: ItemId, event: &PointerEvent) -> Outcome {
        if event.default_prevented {
            return Outcome::Ignored;
        }
        match self.items.find(|item| item.id() == id) {
            Some(item) if item.is_link() => Outcome::PreventDefault,
            _ => Outcome::Ignored,
        }
    }

    /// Pointer pressed on an item.
    pub fn on_item_pointer_down(&mut self, id: ItemId, event: &PointerEvent) -> Outcome {
        if event.default_prevented || !event.is_primary() {
            return Outcome::Ignored;
        }
        let Some(is_link) = self
            .items
            .find(|item| item.id() == id)
            .map(|item| item.is_link())
        else {
            return Outcome::Ignored;
        };
        self.advance(event.time);
        if is_link {
            if let Some(slot) = self.slot_mut(id) {
                slot.pointer_cycle_started = true;
            }
            Outcome::Handled
        } else {
            // Keeps focus on the menu surface instead of flickering to the item.
            Outcome::PreventDefault
        }
    }

    /// Pointer entered an item.
    pub fn on_item_pointer_enter<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ItemId,
        event: &PointerEvent,
    ) -> Outcome {
        if event.default_prevented {
            return Outcome::Ignored;
        }
        let Some(index) = self.selectable_index(id) else {
            return Outcome::Ignored;
        };
        self.advance(event.time);
        let focused = host.focused();
        if focused != Some(FocusTarget::Menu) && focused != Some(FocusTarget::Item(id)) {
            host.focus(FocusTarget::Menu);
        }
        self.apply(host, Action::select(index, false));
        self.sync(host);
        Outcome::Handled
    }

    /// Pointer left an item (for example onto a separator).
    pub fn on_item_pointer_leave<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        _id: ItemId,
        event: &PointerEvent,
    ) -> Outcome {
        if event.default_prevented {
            return Outcome::Ignored;
        }
        self.advance(event.time);
        self.apply(host, Action::ClearSelectionIndex);
        self.sync(host);
        Outcome::Handled
    }

    /// Pointer moved over an item.
    pub fn on_item_pointer_move<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ItemId,
        event: &PointerEvent,
    ) -> Outcome {
        if event.default_prevented {
            return Outcome::Ignored;
        }
        self.advance(event.time);
        if !self.ready_to_select {
            let threshold = self.config.pointer_move_threshold;
            let dx = (event.position.x - self.pointer_start.x).abs();
            let dy = (event.position.y - self.pointer_start.y).abs();
            if dx > threshold || dy > threshold {
                tracing::trace!(dx, dy, "pointer travel armed selection");
                self.ready_to_select = true;
            }
        }
        if let Some(index) = self.selectable_index(id) {
            self.apply(host, Action::select(index, true));
            self.sync(host);
        }
        Outcome::Handled
    }

    /// An item received focus (keyboard or programmatic).
    pub fn on_item_focus<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ItemId,
        event: &FocusEvent,
    ) -> Outcome {
        if event.default_prevented {
            return Outcome::Ignored;
        }
        self.advance(event.time);
        self.ready_to_select = true;
        if let Some(index) = self.selectable_index(id) {
            self.apply(host, Action::select(index, false));
            self.sync(host);
        }
        Outcome::Handled
    }

    /// Pointer released over an item.
    pub fn on_item_pointer_up<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: ItemId,
        event: &PointerEvent,
    ) -> Outcome {
        if event.default_prevented || !event.is_primary() {
            return Outcome::Ignored;
        }
        let Some(item) = self.items.find(|item| item.id() == id) else {
            return Outcome::Ignored;
        };
        let (is_link, is_disabled) = (item.is_link(), item.is_disabled());
        self.advance(event.time);

        if !self.ready_to_select {
            tracing::trace!(?id, "absorbed first pointer release after open");
            self.ready_to_select = true;
            return Outcome::Handled;
        }

        if is_link {
            let started = self
                .slot_mut(id)
                .map(|slot| core::mem::take(&mut slot.pointer_cycle_started))
                .unwrap_or(false);
            if !started {
                host.click_item(id);
            }
        } else if !is_disabled {
            self.select_item(host, id);
        }
        Outcome::Handled
    }

    /// Pointer released anywhere in the document.
    ///
    /// Clears every item's pending press, so the flag never outlives the
    /// pointer cycle that set it. Hosts call this after the item handler for
    /// the same event.
    pub fn on_document_pointer_up(&mut self) {
        for slot in self.slots.values_mut() {
            slot.pointer_cycle_started = false;
        }
    }

    /// Attributes for an item, or `None` if `id` is not registered.
    pub fn item_props(&self, id: ItemId) -> Option<ItemProps> {
        let index = self.items.index_of(id)?;
        let item = self.items.get(index)?;
        Some(ItemProps {
            id: item_element_id(self.id(), index),
            selected: self.is_item_selected(id),
            disabled: item.is_disabled(),
            is_link: item.is_link(),
            value_text: alloc::string::String::from(item.key()),
            tab_index: -1,
        })
    }
}
