// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host event model: input payloads, handler outcomes, and the host seam.
//!
//! The engine never touches a real document. Hosts translate their native
//! pointer, keyboard, and focus events into the payloads here, call the
//! matching handler on [`Dropdown`](crate::Dropdown), and apply the returned
//! [`Outcome`] (for example by calling `preventDefault`).
//!
//! Every payload carries `default_prevented`. When an application handler
//! composed in front of the engine has already prevented the default, the
//! engine handler does nothing and reports [`Outcome::Ignored`].

use kurbo::Point;

use crate::registry::ItemId;

/// Pointer button that produced an event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main button (usually left).
    #[default]
    Primary,
    /// Secondary button (usually right). Ignored by the engine.
    Secondary,
    /// Auxiliary button (usually middle). Ignored by the engine.
    Auxiliary,
}

/// Pointer event payload (down, up, move, enter, leave, click, drag start).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in the host's viewport space.
    pub position: Point,
    /// Button involved in the event.
    pub button: PointerButton,
    /// Host timestamp in milliseconds.
    pub time: u64,
    /// Whether an earlier handler already prevented the default action.
    pub default_prevented: bool,
}

impl PointerEvent {
    /// Primary-button event at `position`.
    pub fn new(position: Point, time: u64) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            time,
            default_prevented: false,
        }
    }

    /// Replace the button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Mark the default as already prevented.
    #[must_use]
    pub fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }

    pub(crate) fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

/// Logical key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab, with or without shift.
    Tab,
    /// A single printable character other than space.
    Character(char),
    /// Anything else (modifiers, function keys, multi-character names).
    Other,
}

impl Key {
    /// Map a printable character, folding `' '` into [`Key::Space`].
    pub fn from_char(c: char) -> Self {
        if c == ' ' {
            Self::Space
        } else {
            Self::Character(c)
        }
    }
}

/// Keyboard event payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key pressed.
    pub key: Key,
    /// Host timestamp in milliseconds.
    pub time: u64,
    /// Whether an earlier handler already prevented the default action.
    pub default_prevented: bool,
}

impl KeyEvent {
    /// Key press at `time`.
    pub fn new(key: Key, time: u64) -> Self {
        Self {
            key,
            time,
            default_prevented: false,
        }
    }

    /// Mark the default as already prevented.
    #[must_use]
    pub fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

/// Focus event payload (focus, blur / focus out).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusEvent {
    /// For blur: where focus is going. For focus: where it came from.
    pub related: Option<FocusTarget>,
    /// Host timestamp in milliseconds.
    pub time: u64,
    /// Whether an earlier handler already prevented the default action.
    pub default_prevented: bool,
}

impl FocusEvent {
    /// Focus change at `time` with the given related target.
    pub fn new(related: Option<FocusTarget>, time: u64) -> Self {
        Self {
            related,
            time,
            default_prevented: false,
        }
    }
}

/// A focusable surface as seen by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The trigger button.
    Trigger,
    /// The items container (menu surface).
    Menu,
    /// A single item.
    Item(ItemId),
    /// Anything outside the dropdown.
    Outside,
}

impl FocusTarget {
    /// Whether the target lives inside the popover.
    pub fn is_within_popover(self) -> bool {
        matches!(self, Self::Menu | Self::Item(_))
    }
}

/// What the host should do with the native event after a handler ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub enum Outcome {
    /// The engine did not act on the event.
    Ignored,
    /// The engine acted; the native default may proceed.
    Handled,
    /// The engine acted and the native default must be suppressed.
    PreventDefault,
}

impl Outcome {
    /// Whether the host should call its `preventDefault` equivalent.
    pub fn is_default_prevented(self) -> bool {
        self == Self::PreventDefault
    }
}

/// Services the engine needs from its host.
///
/// All calls happen synchronously from inside a handler or [`tick`](crate::Dropdown::tick).
pub trait DropdownHost {
    /// Move focus to `target`.
    fn focus(&mut self, target: FocusTarget);

    /// Surface that currently holds focus, if known.
    fn focused(&self) -> Option<FocusTarget>;

    /// Dispatch a native click on a link item's element.
    ///
    /// The host routes the resulting click back through
    /// [`Dropdown::on_item_click`](crate::Dropdown::on_item_click).
    fn click_item(&mut self, item: ItemId);

    /// Tooltips elsewhere in the document should stay quiet while the menu
    /// is open. Called with `true` on open and `false` on close.
    fn set_tooltips_suppressed(&mut self, suppressed: bool) {
        let _ = suppressed;
    }
}
