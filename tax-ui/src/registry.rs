//! Line items currently on the form.
//!
//! Every entry has an [`ItemId`] handed out by an [`IdAllocator`]. Ids only
//! ever grow within a form session and are never reused after removal; a
//! full [`ItemRegistry::reset`] starts the sequence again at 1. The registry
//! is never left empty: removing the last entry immediately creates a fresh
//! blank one.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::debug;

const ITEM_KEY_PREFIX: &str = "item-";

/// Stable identity of a line item within one form session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u32);

impl ItemId {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Key of the item's input group, also used as the wire identifier.
    pub fn element_key(self) -> String {
        format!("{ITEM_KEY_PREFIX}{}", self.0)
    }

    /// Key of one input inside the item's group, e.g. `itemPrice-3`.
    pub fn field_key(
        self,
        field: ItemField,
    ) -> String {
        format!("{}-{}", field.key_prefix(), self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out item ids. Starts at 0 and increments before use, so the first
/// id is 1.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u32,
}

impl IdAllocator {
    pub fn next(&mut self) -> ItemId {
        self.last += 1;
        ItemId(self.last)
    }

    pub fn reset(&mut self) {
        self.last = 0;
    }
}

/// Editable inputs of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Name,
    Price,
    Quantity,
    Description,
}

impl ItemField {
    pub const ALL: [ItemField; 4] = [Self::Name, Self::Price, Self::Quantity, Self::Description];

    fn key_prefix(self) -> &'static str {
        match self {
            Self::Name => "itemName",
            Self::Price => "itemPrice",
            Self::Quantity => "itemQuantity",
            Self::Description => "itemDescription",
        }
    }
}

/// Raw, unvalidated text of a line item's inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
}

impl ItemDraft {
    pub fn field(
        &self,
        field: ItemField,
    ) -> &str {
        match field {
            ItemField::Name => &self.name,
            ItemField::Price => &self.price,
            ItemField::Quantity => &self.quantity,
            ItemField::Description => &self.description,
        }
    }

    pub fn set_field(
        &mut self,
        field: ItemField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match field {
            ItemField::Name => self.name = value,
            ItemField::Price => self.price = value,
            ItemField::Quantity => self.quantity = value,
            ItemField::Description => self.description = value,
        }
    }

    /// `true` when nothing but whitespace has been entered.
    pub fn is_blank(&self) -> bool {
        ItemField::ALL
            .iter()
            .all(|&field| self.field(field).trim().is_empty())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected name:price:quantity[:description], got '{0}'")]
pub struct ItemShorthandError(String);

/// Parses the command-line shorthand `name:price:quantity[:description]`.
/// The description may itself contain colons.
impl FromStr for ItemDraft {
    type Err = ItemShorthandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(4, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(price), Some(quantity)) => Ok(Self {
                name: name.to_string(),
                price: price.to_string(),
                quantity: quantity.to_string(),
                description: parts.next().unwrap_or_default().to_string(),
            }),
            _ => Err(ItemShorthandError(s.to_string())),
        }
    }
}

/// A line item as held by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    id: ItemId,
    pub draft: ItemDraft,
}

impl ItemEntry {
    pub fn id(&self) -> ItemId {
        self.id
    }
}

/// Ordered set of line items on the form, in creation order.
#[derive(Debug, Clone)]
pub struct ItemRegistry {
    entries: Vec<ItemEntry>,
    ids: IdAllocator,
}

impl ItemRegistry {
    /// A registry holding the single blank item shown when the form loads.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
            ids: IdAllocator::default(),
        };
        registry.add_item();
        registry
    }

    /// Appends a blank item and returns its id.
    pub fn add_item(&mut self) -> ItemId {
        self.add_draft(ItemDraft::default())
    }

    /// Appends an item with pre-filled inputs.
    pub fn add_draft(
        &mut self,
        draft: ItemDraft,
    ) -> ItemId {
        let id = self.ids.next();
        debug!(item = %id, "item added");
        self.entries.push(ItemEntry { id, draft });
        id
    }

    /// Removes the item if present. Unknown ids are ignored so stale
    /// references are harmless. Returns whether anything was removed.
    pub fn remove_item(
        &mut self,
        id: ItemId,
    ) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;

        if removed {
            debug!(item = %id, "item removed");
        }
        if self.entries.is_empty() {
            self.add_item();
        }
        removed
    }

    /// Drops every item, restarts id allocation and adds one blank item.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.ids.reset();
        self.add_item();
    }

    pub fn entries(&self) -> &[ItemEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(
        &self,
        id: ItemId,
    ) -> Option<&ItemEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Updates one input of an item. Returns `false` for an unknown id.
    pub fn set_field(
        &mut self,
        id: ItemId,
        field: ItemField,
        value: impl Into<String>,
    ) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.draft.set_field(field, value);
                true
            }
            None => false,
        }
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}
