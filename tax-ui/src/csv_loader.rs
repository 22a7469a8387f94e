//! CSV import of line items.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter. Header
//! names are case-sensitive.
//!
//! | Column        | Required | Notes                         |
//! |---------------|----------|-------------------------------|
//! | `name`        | yes      |                               |
//! | `price`       | yes      | e.g. `999.99`                 |
//! | `quantity`    | yes      | whole number, e.g. `2`        |
//! | `description` | no       | column may be omitted or empty |
//!
//! Cells are loaded as raw text. They are validated together with the rest
//! of the form when a calculation is requested, so a bad price in row 3 is
//! reported as `Item 3: ...` like any hand-entered item.
//!
//! ```csv
//! name,price,quantity,description
//! Laptop,999.99,1,14-inch
//! USB cable,4.50,3,
//! ```
use std::path::Path;

use serde::Deserialize;

use crate::registry::ItemDraft;

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    price: String,
    quantity: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<CsvRow> for ItemDraft {
    fn from(row: CsvRow) -> Self {
        Self {
            name: row.name,
            price: row.price,
            quantity: row.quantity,
            description: row.description.unwrap_or_default(),
        }
    }
}

/// Errors that can occur while loading item CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Bad structure or a missing required column.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse CSV text and return one draft per row, in file order.
pub fn load_from_str(input: &str) -> Result<Vec<ItemDraft>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .map(|result| result.map(ItemDraft::from).map_err(CsvLoadError::from))
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<ItemDraft>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}
