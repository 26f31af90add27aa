// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dropdown state store: state, actions, and the pure transition function.
//!
//! [`reduce`] is the only way [`DropdownState`] changes. It performs no side
//! effects; the one effectful action, [`Action::SelectItemAtIndex`] with
//! `focus_menu` set, has its focus transfer performed by the dispatch wrapper
//! in [`Dropdown`](crate::Dropdown) before the state is reduced.

use alloc::string::String;

/// Interaction state of one dropdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropdownState {
    /// Whether the menu is open.
    pub is_expanded: bool,
    /// Registry index of the active item, if any.
    pub selection_index: Option<usize>,
    /// Accumulated lowercase typeahead buffer. Empty when inactive.
    pub typeahead_query: String,
    /// Identifier of the trigger surface.
    pub trigger_id: Option<String>,
}

impl DropdownState {
    /// Whether selecting `index` would change the active item.
    #[must_use]
    pub fn accepts_selection(&self, index: usize) -> bool {
        self.selection_index != Some(index)
    }
}

/// A state transition request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Open the menu with the given item active (or none).
    OpenMenuAtIndex(Option<usize>),
    /// Open the menu with the first registry slot active.
    OpenMenuAtFirstItem,
    /// Open the menu with no active item.
    OpenMenuCleared,
    /// Close the menu and clear the active item.
    CloseMenu,
    /// An item was committed: close the menu and clear the active item.
    ClickMenuItem,
    /// Make the item at `index` active.
    ///
    /// Ignored when `index` is already active. When `max` is given the index
    /// is clamped to it. When `focus_menu` is set the menu surface receives
    /// focus before the state changes (performed by the dispatch wrapper).
    SelectItemAtIndex {
        /// Requested registry index.
        index: usize,
        /// Upper bound for the resulting index.
        max: Option<usize>,
        /// Move focus to the menu surface if it is not already focused.
        focus_menu: bool,
    },
    /// Clear the active item, leaving the menu open or closed as it is.
    ClearSelectionIndex,
    /// Replace the trigger identifier.
    SetButtonId(String),
    /// Replace the typeahead buffer. `None` leaves it untouched.
    SearchForItem(Option<String>),
}

impl Action {
    /// Shorthand for [`Action::SelectItemAtIndex`] without a bound.
    #[must_use]
    pub const fn select(index: usize, focus_menu: bool) -> Self {
        Self::SelectItemAtIndex {
            index,
            max: None,
            focus_menu,
        }
    }

    /// Stable name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenMenuAtIndex(_) => "OPEN_MENU_AT_INDEX",
            Self::OpenMenuAtFirstItem => "OPEN_MENU_AT_FIRST_ITEM",
            Self::OpenMenuCleared => "OPEN_MENU_CLEARED",
            Self::CloseMenu => "CLOSE_MENU",
            Self::ClickMenuItem => "CLICK_MENU_ITEM",
            Self::SelectItemAtIndex { .. } => "SELECT_ITEM_AT_INDEX",
            Self::ClearSelectionIndex => "CLEAR_SELECTION_INDEX",
            Self::SetButtonId(_) => "SET_BUTTON_ID",
            Self::SearchForItem(_) => "SEARCH_FOR_ITEM",
        }
    }
}

/// Compute the state that follows `state` under `action`.
#[must_use]
pub fn reduce(state: DropdownState, action: &Action) -> DropdownState {
    match action {
        Action::OpenMenuAtIndex(index) => DropdownState {
            is_expanded: true,
            selection_index: *index,
            ..state
        },
        Action::OpenMenuAtFirstItem => DropdownState {
            is_expanded: true,
            selection_index: Some(0),
            ..state
        },
        Action::OpenMenuCleared => DropdownState {
            is_expanded: true,
            selection_index: None,
            ..state
        },
        Action::CloseMenu | Action::ClickMenuItem => DropdownState {
            is_expanded: false,
            selection_index: None,
            ..state
        },
        Action::SelectItemAtIndex { index, max, .. } => {
            if !state.accepts_selection(*index) {
                return state;
            }
            let index = max.map_or(*index, |max| (*index).min(max));
            DropdownState {
                selection_index: Some(index),
                ..state
            }
        }
        Action::ClearSelectionIndex => DropdownState {
            selection_index: None,
            ..state
        },
        Action::SetButtonId(id) => DropdownState {
            trigger_id: Some(id.clone()),
            ..state
        },
        Action::SearchForItem(Some(query)) => DropdownState {
            typeahead_query: query.clone(),
            ..state
        },
        Action::SearchForItem(None) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_at(index: Option<usize>) -> DropdownState {
        reduce(DropdownState::default(), &Action::OpenMenuAtIndex(index))
    }

    #[test]
    fn open_variants_set_expected_selection() {
        assert_eq!(open_at(Some(2)).selection_index, Some(2));
        assert!(open_at(None).is_expanded);

        let first = reduce(DropdownState::default(), &Action::OpenMenuAtFirstItem);
        assert!(first.is_expanded);
        assert_eq!(first.selection_index, Some(0));

        let cleared = reduce(open_at(Some(3)), &Action::OpenMenuCleared);
        assert!(cleared.is_expanded);
        assert_eq!(cleared.selection_index, None);
    }

    #[test]
    fn close_and_click_both_collapse() {
        for action in [Action::CloseMenu, Action::ClickMenuItem] {
            let next = reduce(open_at(Some(1)), &action);
            assert!(!next.is_expanded);
            assert_eq!(next.selection_index, None);
        }
    }

    #[test]
    fn select_clamps_to_max() {
        let state = open_at(None);
        let next = reduce(
            state,
            &Action::SelectItemAtIndex {
                index: 9,
                max: Some(4),
                focus_menu: false,
            },
        );
        assert_eq!(next.selection_index, Some(4));
    }

    #[test]
    fn select_same_index_is_identity() {
        let state = open_at(Some(1));
        let next = reduce(state.clone(), &Action::select(1, true));
        assert_eq!(next, state);
    }

    #[test]
    fn clear_selection_keeps_menu_open() {
        let next = reduce(open_at(Some(1)), &Action::ClearSelectionIndex);
        assert!(next.is_expanded);
        assert_eq!(next.selection_index, None);
    }

    #[test]
    fn search_only_applies_defined_payloads() {
        let state = reduce(
            DropdownState::default(),
            &Action::SearchForItem(Some(String::from("do"))),
        );
        assert_eq!(state.typeahead_query, "do");
        let state = reduce(state, &Action::SearchForItem(None));
        assert_eq!(state.typeahead_query, "do");
    }

    #[test]
    fn set_button_id_replaces_trigger_id() {
        let state = reduce(
            DropdownState::default(),
            &Action::SetButtonId(String::from("actions-button")),
        );
        assert_eq!(state.trigger_id.as_deref(), Some("actions-button"));
    }
}
