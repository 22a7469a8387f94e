//! Turns the raw form inputs into a [`CalculationRequest`].
//!
//! Validation stops at the first problem, checked in this order:
//! state, ZIP code, presence of items, then each item's name, price and
//! quantity in display order. No request is built unless every check passes.

use rust_decimal::Decimal;
use tax_core::{Address, CalculationRequest, LineItemPayload};
use thiserror::Error;

use crate::registry::ItemEntry;
use crate::utils::{parse_count, parse_decimal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Street,
    City,
    State,
    Zipcode,
}

/// Raw text of the address inputs. Street and city are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

impl AddressInput {
    pub fn field(
        &self,
        field: AddressField,
    ) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Zipcode => &self.zipcode,
        }
    }

    pub fn set_field(
        &mut self,
        field: AddressField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match field {
            AddressField::Street => self.street = value,
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::Zipcode => self.zipcode = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// First problem found in the form. The `Display` text is what the user sees.
/// Item positions are 1-based display positions, not item ids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a state")]
    MissingState,

    #[error("Please enter a ZIP code")]
    MissingZipcode,

    #[error("Please add at least one item")]
    NoItems,

    #[error("Item {position}: Please enter an item name")]
    MissingName { position: usize },

    #[error("Item {position}: Please enter a valid price (0 or greater)")]
    InvalidPrice { position: usize },

    #[error("Item {position}: Please enter a valid quantity (1 or greater)")]
    InvalidQuantity { position: usize },
}

/// Validates the form and builds the request, trimming every text field.
pub fn extract(
    address: &AddressInput,
    items: &[ItemEntry],
) -> Result<CalculationRequest, ValidationError> {
    let state = address.state.trim();
    if state.is_empty() {
        return Err(ValidationError::MissingState);
    }

    let zipcode = address.zipcode.trim();
    if zipcode.is_empty() {
        return Err(ValidationError::MissingZipcode);
    }

    if items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    let items = items
        .iter()
        .enumerate()
        .map(|(index, entry)| extract_item(index + 1, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CalculationRequest {
        address: Address::new(address.street.trim(), address.city.trim(), state, zipcode),
        items,
    })
}

fn extract_item(
    position: usize,
    entry: &ItemEntry,
) -> Result<LineItemPayload, ValidationError> {
    let draft = &entry.draft;

    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName { position });
    }

    let price = parse_decimal(&draft.price)
        .ok()
        .filter(|price| *price >= Decimal::ZERO)
        .ok_or(ValidationError::InvalidPrice { position })?;

    let quantity = parse_count(&draft.quantity)
        .ok()
        .filter(|&quantity| quantity >= 1)
        .ok_or(ValidationError::InvalidQuantity { position })?;

    Ok(LineItemPayload {
        id: entry.id().element_key(),
        name: name.to_string(),
        price,
        quantity,
        description: draft.description.trim().to_string(),
    })
}
