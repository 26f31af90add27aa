// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Items container controller: keyboard routing, typeahead, and index
//! reconciliation.

use alloc::string::String;

use crate::dropdown::Snapshot;
use crate::event::{DropdownHost, FocusTarget, Key, KeyEvent, Outcome};
use crate::registry::CursorMove;
use crate::state::Action;
use crate::{Dropdown, ItemsProps, item_element_id};

impl Dropdown {
    /// Key pressed while focus is inside the items container.
    ///
    /// Only acts while the menu is open.
    pub fn on_items_key_down<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &KeyEvent,
    ) -> Outcome {
        if event.default_prevented || !self.state.is_expanded {
            return Outcome::Ignored;
        }
        self.advance(event.time);

        let outcome = match event.key {
            Key::Enter | Key::Space => self.activate_selected(host),
            Key::Escape => {
                host.focus(FocusTarget::Trigger);
                self.apply(host, Action::CloseMenu);
                Outcome::Handled
            }
            // Focus stays inside the menu while it is open.
            Key::Tab => Outcome::PreventDefault,
            Key::ArrowDown => self.move_cursor(host, CursorMove::Next),
            Key::ArrowUp => self.move_cursor(host, CursorMove::Prev),
            Key::Home | Key::PageUp => self.move_cursor(host, CursorMove::First),
            Key::End | Key::PageDown => self.move_cursor(host, CursorMove::Last),
            Key::Character(c) => {
                let mut query = self.state.typeahead_query.clone();
                query.extend(c.to_lowercase());
                self.apply(host, Action::SearchForItem(Some(query)));
                Outcome::Handled
            }
            Key::ArrowLeft | Key::ArrowRight | Key::Other => Outcome::Ignored,
        };
        self.sync(host);
        outcome
    }

    fn activate_selected<H: DropdownHost + ?Sized>(&mut self, host: &mut H) -> Outcome {
        let Some(selected) = self
            .state
            .selection_index
            .and_then(|index| self.items.get(index))
        else {
            return Outcome::Ignored;
        };
        if selected.is_disabled() {
            return Outcome::Ignored;
        }
        let id = selected.id();
        if selected.is_link() {
            // Links commit through their own click handler.
            host.click_item(id);
        } else {
            self.commit_item(host, id);
        }
        Outcome::PreventDefault
    }

    fn move_cursor<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        movement: CursorMove,
    ) -> Outcome {
        if let Some(index) = self.items.step(self.state.selection_index, movement) {
            self.apply(host, Action::select(index, true));
        }
        Outcome::PreventDefault
    }

    /// Select the first enabled item matching the typeahead buffer.
    pub(crate) fn run_typeahead<H: DropdownHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(index) = self.items.find_by_prefix(&self.state.typeahead_query) {
            self.apply(host, Action::select(index, true));
        }
    }

    /// Keep the active index pointing at a valid, intended item after the
    /// registry or the selection changed.
    pub(crate) fn reconcile<H: DropdownHost + ?Sized>(&mut self, host: &mut H, previous: &Snapshot) {
        let Some(selection) = self.state.selection_index else {
            return;
        };
        let len = self.items.len();

        if selection >= len {
            // Items were removed from under the selection.
            match len.checked_sub(1) {
                Some(last) => {
                    tracing::debug!(selection, last, "selection past end, reselecting last item");
                    self.apply(
                        host,
                        Action::SelectItemAtIndex {
                            index: last,
                            max: Some(last),
                            focus_menu: true,
                        },
                    );
                }
                None => self.apply(host, Action::ClearSelectionIndex),
            }
            return;
        }

        let Some(previous_key) = previous.selected_key.as_deref() else {
            return;
        };
        let moved = previous.len != len
            && previous.selection == Some(selection)
            && self.items.get(selection).map(|item| item.key()) != Some(previous_key);
        if !moved {
            return;
        }
        match self.items.index_of_key(previous_key) {
            Some(index) => {
                tracing::debug!(from = selection, to = index, "following moved selection");
                self.apply(host, Action::select(index, true));
            }
            None => {
                tracing::debug!(selection, "selected item disappeared");
                self.apply(host, Action::ClearSelectionIndex);
            }
        }
    }

    /// Attributes for the items container.
    pub fn items_props(&self) -> ItemsProps {
        ItemsProps {
            id: String::from(self.id()),
            active_descendant: self
                .state
                .selection_index
                .map(|index| item_element_id(self.id(), index)),
            labelled_by: self.state.trigger_id.clone(),
            tab_index: -1,
        }
    }
}
