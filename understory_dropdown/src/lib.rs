// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dropdown --heading-base-level=0

//! Understory Dropdown: a headless interaction engine for menu buttons.
//!
//! This crate decides, independently of any rendering technology, when a
//! dropdown menu is open, which item is active, how pointer, keyboard, and
//! typeahead input change that, and when focus has to move. It implements the
//! ARIA menu-button pattern as a state machine; hosts render the markup.
//!
//! ## Pieces
//!
//! - [`DropdownState`], [`Action`], and [`reduce`]: the state store. `reduce`
//!   is pure; the only side effect (moving focus when an item becomes active)
//!   lives in the dispatch wrapper.
//! - [`Descendants`]: the ordered item registry. Items keep a stable
//!   [`ItemId`]; their index is their current position.
//! - [`Dropdown`]: one widget instance. It owns the state, registry, guards,
//!   callbacks, and timers, and exposes the controllers as `on_*` handlers
//!   grouped by surface: trigger, items container, item, popover.
//! - [`DropdownHost`]: the seam to the host's focus and event model.
//! - [`TriggerProps`], [`PopoverProps`], [`ItemsProps`], [`ItemProps`]:
//!   attribute bundles for rendering.
//!
//! ## Time
//!
//! The crate has no clock. Events carry millisecond timestamps and the host
//! calls [`Dropdown::tick`] (using [`Dropdown::next_deadline`] to schedule it)
//! so the ready-to-select delay and the typeahead reset can fire.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_dropdown::{
//!     Dropdown, DropdownHost, FocusTarget, ItemId, ItemSpec, Key, KeyEvent, PointerEvent,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     focused: Option<FocusTarget>,
//! }
//!
//! impl DropdownHost for Host {
//!     fn focus(&mut self, target: FocusTarget) {
//!         self.focused = Some(target);
//!     }
//!     fn focused(&self) -> Option<FocusTarget> {
//!         self.focused
//!     }
//!     fn click_item(&mut self, _item: ItemId) {}
//! }
//!
//! let mut host = Host::default();
//! let mut menu = Dropdown::new("actions");
//! menu.register_item(&mut host, ItemSpec::new().value_text("Download"));
//! let copy = menu.register_item(&mut host, ItemSpec::new().value_text("Copy"));
//! menu.set_on_select(copy, || println!("copied")).unwrap();
//!
//! // Pressing the trigger opens the menu with nothing active...
//! let _ = menu.on_trigger_pointer_down(&mut host, &PointerEvent::new(Point::ZERO, 0));
//! assert!(menu.is_expanded());
//! assert_eq!(menu.selection_index(), None);
//!
//! // ...arrows move through the items...
//! let _ = menu.on_items_key_down(&mut host, &KeyEvent::new(Key::ArrowDown, 10));
//! let _ = menu.on_items_key_down(&mut host, &KeyEvent::new(Key::ArrowDown, 20));
//! assert_eq!(menu.selection_index(), Some(1));
//!
//! // ...and Enter commits, closes, and hands focus back to the trigger.
//! let _ = menu.on_items_key_down(&mut host, &KeyEvent::new(Key::Enter, 30));
//! assert!(!menu.is_expanded());
//! assert_eq!(host.focused, Some(FocusTarget::Trigger));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod dropdown;
mod error;
mod event;
mod item;
mod items;
mod popover;
mod props;
mod registry;
mod state;
mod timer;
mod trigger;

pub use config::{
    DEFAULT_POINTER_MOVE_THRESHOLD, DEFAULT_READY_TO_SELECT_DELAY, DEFAULT_TYPEAHEAD_RESET_DELAY,
    DropdownConfig,
};
pub use dropdown::{Dropdown, SelectCallback};
pub use error::DropdownError;
pub use event::{
    DropdownHost, FocusEvent, FocusTarget, Key, KeyEvent, Outcome, PointerButton, PointerEvent,
};
pub use props::{
    ItemProps, ItemsProps, PopoverPosition, PopoverProps, TriggerProps, item_element_id,
};
pub use registry::{CursorMove, Descendant, Descendants, ItemFlags, ItemId, ItemSpec};
pub use state::{Action, DropdownState, reduce};
pub use timer::Timeout;
