use serde::{Deserialize, Serialize};

/// Country sent with every address. The calculation service only knows US
/// jurisdictions.
pub const DEFAULT_COUNTRY: &str = "US";

/// Shipping address as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zipcode: String,
}

impl Address {
    /// Builds an address in the default country.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            country: DEFAULT_COUNTRY.to_string(),
            zipcode: zipcode.into(),
        }
    }
}
