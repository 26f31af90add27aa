// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popover controller: visibility and outside-interaction dismissal.

use kurbo::Rect;

use crate::event::{DropdownHost, FocusEvent, Outcome, PointerEvent};
use crate::state::Action;
use crate::{Dropdown, PopoverProps};

impl Dropdown {
    /// Report where the placement service put the popover, in the same space
    /// as pointer positions. `None` while it is not laid out.
    pub fn set_popover_bounds(&mut self, bounds: Option<Rect>) {
        self.popover_bounds = bounds;
    }

    /// Whether `event` landed inside the popover.
    fn popover_contains(&self, event: &PointerEvent) -> bool {
        self.popover_bounds
            .is_some_and(|bounds| bounds.contains(event.position))
    }

    /// Pointer pressed anywhere in the document.
    ///
    /// Only listens while the menu is open. The press that opened the menu
    /// reaches this handler too (after the trigger handler) and is absorbed.
    pub fn on_document_pointer_down<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> Outcome {
        if !self.state.is_expanded {
            return Outcome::Ignored;
        }
        if self.trigger_clicked {
            tracing::trace!("absorbing the press that opened the menu");
            self.trigger_clicked = false;
            return Outcome::Ignored;
        }
        if self.popover_contains(event) {
            return Outcome::Ignored;
        }
        self.advance(event.time);
        self.apply(host, Action::CloseMenu);
        self.sync(host);
        Outcome::Handled
    }

    /// Focus left the popover. Closes unless focus moved to something inside it.
    pub fn on_popover_focus_out<H: DropdownHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &FocusEvent,
    ) -> Outcome {
        if event.default_prevented
            || event
                .related
                .is_some_and(|target| target.is_within_popover())
        {
            return Outcome::Ignored;
        }
        self.advance(event.time);
        self.apply(host, Action::CloseMenu);
        self.sync(host);
        Outcome::Handled
    }

    /// Attributes for the popover surface.
    pub fn popover_props(&self) -> PopoverProps {
        PopoverProps {
            hidden: !self.state.is_expanded,
            anchor: self.state.trigger_id.clone(),
            portal: self.config.portal,
            position: self.config.position,
        }
    }
}
