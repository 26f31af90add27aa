// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute bundles for the four dropdown surfaces.
//!
//! Hosts map these onto their markup (for example `aria-expanded`,
//! `aria-activedescendant`, `data-selected`). Event handlers are the
//! `on_*` methods of [`Dropdown`](crate::Dropdown).

use alloc::format;
use alloc::string::String;

/// Element id of the item at `index` in dropdown `dropdown_id`.
pub fn item_element_id(dropdown_id: &str, index: usize) -> String {
    format!("option-{index}--{dropdown_id}")
}

/// Trigger attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerProps {
    /// Trigger element id.
    pub id: Option<String>,
    /// `aria-expanded`.
    pub expanded: bool,
    /// `aria-controls`: id of the items container.
    pub controls: String,
    /// `aria-haspopup`.
    pub has_popup: bool,
}

/// Placement hint handed to the popover placement service.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PopoverPosition {
    /// Below the trigger, aligned to its start edge.
    #[default]
    Start,
    /// Below the trigger, aligned to its end edge.
    End,
    /// Below the trigger, stretched to the trigger's width.
    MatchWidth,
}

/// Popover attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopoverProps {
    /// The popover is hidden whenever the menu is closed.
    pub hidden: bool,
    /// Id of the element the placement service should anchor to.
    pub anchor: Option<String>,
    /// Render into a top-level layer and position against `anchor`. When
    /// `false` the host renders the popover in place.
    pub portal: bool,
    /// Where to place the popover relative to `anchor`.
    pub position: PopoverPosition,
}

/// Items container attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemsProps {
    /// Container element id (the dropdown id).
    pub id: String,
    /// `aria-activedescendant`: element id of the active item.
    pub active_descendant: Option<String>,
    /// `aria-labelledby`: the trigger id.
    pub labelled_by: Option<String>,
    /// Focusable programmatically, not in tab order.
    pub tab_index: i32,
}

/// Item attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemProps {
    /// Item element id.
    pub id: String,
    /// Active item (`data-selected`).
    pub selected: bool,
    /// `aria-disabled` / `data-disabled`.
    pub disabled: bool,
    /// Rendered as a link.
    pub is_link: bool,
    /// Search key (`data-valuetext`).
    pub value_text: String,
    /// Focusable programmatically, not in tab order.
    pub tab_index: i32,
}
