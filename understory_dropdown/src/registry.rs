// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered registry of menu items (descendants).
//!
//! Items are identified by a stable [`ItemId`] for their whole lifetime, while
//! their *index* is simply their current position in the registry and shifts
//! as items are inserted or removed. Everything index-based in the engine is
//! resolved against the registry at the moment it is used.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::DropdownError;

/// Stable identity of a registered item.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ItemId(u64);

bitflags::bitflags! {
    /// Item flags controlling reachability and activation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// Item cannot become active or be committed.
        const DISABLED = 0b0000_0001;
        /// Item is rendered as a link; activation goes through a native click.
        const LINK     = 0b0000_0010;
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Registration input for an item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemSpec {
    /// Explicit search text. Takes precedence over rendered text content.
    pub value_text: Option<String>,
    /// Disabled/link flags.
    pub flags: ItemFlags,
}

impl ItemSpec {
    /// An enabled, non-link item with no explicit search text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit search text.
    #[must_use]
    pub fn value_text(mut self, text: impl Into<String>) -> Self {
        self.value_text = Some(text.into());
        self
    }

    /// Mark the item disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.flags.set(ItemFlags::DISABLED, disabled);
        self
    }

    /// Mark the item as a link.
    #[must_use]
    pub fn link(mut self, is_link: bool) -> Self {
        self.flags.set(ItemFlags::LINK, is_link);
        self
    }
}

/// A registered item as seen by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descendant {
    id: ItemId,
    key: String,
    explicit_key: bool,
    flags: ItemFlags,
}

impl Descendant {
    /// Stable identity.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Search key used by typeahead and reconciliation.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current flags.
    pub fn flags(&self) -> ItemFlags {
        self.flags
    }

    /// Whether the item is disabled.
    pub fn is_disabled(&self) -> bool {
        self.flags.contains(ItemFlags::DISABLED)
    }

    /// Whether the item is a link.
    pub fn is_link(&self) -> bool {
        self.flags.contains(ItemFlags::LINK)
    }
}

/// One step of cursor movement over enabled items.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CursorMove {
    /// Following enabled item.
    Next,
    /// Preceding enabled item.
    Prev,
    /// First enabled item.
    First,
    /// Last enabled item.
    Last,
}

/// Ordered collection of registered items.
#[derive(Clone, Debug, Default)]
pub struct Descendants {
    items: Vec<Descendant>,
    next_id: u64,
    revision: u64,
}

impl Descendants {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item and return its identity.
    pub fn register(&mut self, spec: ItemSpec) -> ItemId {
        let position = self.items.len();
        self.insert_unchecked(position, spec)
    }

    /// Insert an item at `position`, shifting later items down by one.
    pub fn insert(&mut self, position: usize, spec: ItemSpec) -> Result<ItemId, DropdownError> {
        if position > self.items.len() {
            return Err(DropdownError::PositionOutOfRange {
                position,
                len: self.items.len(),
            });
        }
        Ok(self.insert_unchecked(position, spec))
    }

    fn insert_unchecked(&mut self, position: usize, spec: ItemSpec) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        let explicit_key = spec.value_text.is_some();
        self.items.insert(
            position,
            Descendant {
                id,
                key: spec.value_text.unwrap_or_default(),
                explicit_key,
                flags: spec.flags,
            },
        );
        self.revision += 1;
        id
    }

    /// Remove an item, returning its last descriptor.
    pub fn unregister(&mut self, id: ItemId) -> Result<Descendant, DropdownError> {
        let index = self.index_of(id).ok_or(DropdownError::UnknownItem(id))?;
        self.revision += 1;
        Ok(self.items.remove(index))
    }

    /// Replace an item's flags.
    pub fn set_flags(&mut self, id: ItemId, flags: ItemFlags) -> Result<(), DropdownError> {
        let item = self.get_mut(id)?;
        if item.flags != flags {
            item.flags = flags;
            self.revision += 1;
        }
        Ok(())
    }

    /// Report an item's rendered text content.
    ///
    /// The text becomes the search key unless the item was registered with an
    /// explicit value text. Returns whether the key changed.
    pub fn set_text_content(&mut self, id: ItemId, text: &str) -> Result<bool, DropdownError> {
        let item = self.get_mut(id)?;
        if item.explicit_key || text.is_empty() || item.key == text {
            return Ok(false);
        }
        item.key = String::from(text);
        self.revision += 1;
        Ok(true)
    }

    fn get_mut(&mut self, id: ItemId) -> Result<&mut Descendant, DropdownError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(DropdownError::UnknownItem(id))
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Counter bumped by every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All items in registry order.
    pub fn all(&self) -> &[Descendant] {
        &self.items
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&Descendant> {
        self.items.get(index)
    }

    /// First item matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&Descendant) -> bool) -> Option<&Descendant> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Current index of `id`.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Index of the first item whose key equals `key`.
    ///
    /// Keys are not unique; with duplicates the earliest item wins.
    pub fn index_of_key(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }

    /// Index of the first enabled item.
    pub fn first_enabled(&self) -> Option<usize> {
        self.items.iter().position(|item| !item.is_disabled())
    }

    /// Index of the first enabled item whose key starts with `query`,
    /// compared case-insensitively. `query` is expected in lowercase.
    pub fn find_by_prefix(&self, query: &str) -> Option<usize> {
        if query.is_empty() {
            return None;
        }
        self.items
            .iter()
            .position(|item| !item.is_disabled() && item.key.to_lowercase().starts_with(query))
    }

    /// Move a cursor by one step over enabled items, without wrapping.
    ///
    /// With no current index, [`CursorMove::Next`] lands on the first enabled
    /// item and [`CursorMove::Prev`] on the last. At an edge the cursor stays
    /// where it is. Returns `None` only when there is nowhere to go.
    pub fn step(&self, current: Option<usize>, movement: CursorMove) -> Option<usize> {
        let enabled: SmallVec<[usize; 16]> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| (!item.is_disabled()).then_some(i))
            .collect();
        let (&first, &last) = (enabled.first()?, enabled.last()?);

        match movement {
            CursorMove::First => Some(first),
            CursorMove::Last => Some(last),
            CursorMove::Next => match current {
                None => Some(first),
                // Enabled items after `current`, or stay at `current` if it is the
                // last enabled one. A disabled `current` with nothing after it
                // yields no move.
                Some(current) => enabled
                    .iter()
                    .copied()
                    .find(|&i| i > current)
                    .or_else(|| (current == last).then_some(last)),
            },
            CursorMove::Prev => match current {
                None => Some(last),
                Some(current) => enabled
                    .iter()
                    .rev()
                    .copied()
                    .find(|&i| i < current)
                    .or_else(|| (current == first).then_some(first)),
            },
        }
    }
}
