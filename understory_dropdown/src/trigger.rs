// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger controller: opening, closing, and seeding the active item.

use alloc::string::String;

use crate::event::{DropdownHost, Key, KeyEvent, Outcome, PointerEvent};
use crate::state::Action;
use crate::{Dropdown, TriggerProps};

impl Dropdown {
    /// Adopt an externally supplied trigger id.
    ///
    /// Only dispatches when the id actually differs, so calling this on every
    /// render is cheap and idempotent.
    pub fn sync_trigger_id(&mut self, id: &str) {
        if self.state.trigger_id.as_deref() != Some(id) {
            self.commit(&Action::SetButtonId(String::from(id)));
        }
    }

    /// Key pressed on the trigger.
    ///
    /// Arrow keys, Enter, and Space open the menu on the first enabled item.
    pub fn on_trigger_key_down<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &KeyEvent,
    ) -> Outcome {
        if event.default_prevented {
            return Outcome::Ignored;
        }
        let outcome = match event.key {
            // Arrows would otherwise scroll the page.
            Key::ArrowDown | Key::ArrowUp => Outcome::PreventDefault,
            Key::Enter | Key::Space => Outcome::Handled,
            _ => return Outcome::Ignored,
        };
        self.advance(event.time);
        let first = self.items.first_enabled();
        self.apply(host, Action::OpenMenuAtIndex(first));
        self.sync(host);
        outcome
    }

    /// Primary pointer pressed on the trigger: toggle the menu.
    ///
    /// Opening this way never preselects an item.
    pub fn on_trigger_pointer_down<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> Outcome {
        if event.default_prevented {
            return Outcome::Ignored;
        }
        if !event.is_primary() {
            tracing::trace!(button = ?event.button, "ignoring non-primary trigger press");
            return Outcome::Ignored;
        }
        self.advance(event.time);
        self.pointer_start = event.position;

        if self.state.is_expanded {
            self.apply(host, Action::CloseMenu);
        } else {
            self.trigger_clicked = true;
            self.apply(host, Action::OpenMenuCleared);
        }
        self.sync(host);
        Outcome::Handled
    }

    /// Attributes for the trigger.
    pub fn trigger_props(&self) -> TriggerProps {
        TriggerProps {
            id: self.state.trigger_id.clone(),
            expanded: self.state.is_expanded,
            controls: String::from(self.id()),
            has_popup: true,
        }
    }
}
