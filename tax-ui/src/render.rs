//! Writes calculation outcomes into the [`ViewState`].

use tax_core::{CalculationResponse, ItemTaxDetail};

use crate::utils::{format_currency, format_percent};
use crate::view::{BreakdownBlock, Region, Summary, ViewState};

impl From<&ItemTaxDetail> for BreakdownBlock {
    fn from(item: &ItemTaxDetail) -> Self {
        Self {
            item_name: item.item_name.clone(),
            price: format_currency(item.price),
            quantity: item.quantity.to_string(),
            subtotal: format_currency(item.subtotal),
            tax_rate: format_percent(item.tax_rate),
            tax_amount: format_currency(item.tax_amount),
            total: format_currency(item.total_amount),
        }
    }
}

/// Fills the summary and replaces the breakdown with one block per response
/// item, in response order, then reveals the results.
pub fn render_results(
    view: &mut ViewState,
    response: &CalculationResponse,
) {
    view.set_summary(Summary {
        subtotal: format_currency(response.subtotal),
        total_tax: format_currency(response.total_tax),
        grand_total: format_currency(response.grand_total),
        jurisdiction: response.tax_jurisdiction.clone(),
    });

    view.clear_breakdown();
    for item in &response.items {
        view.push_breakdown(BreakdownBlock::from(item));
    }

    view.set_visible(Region::Results, true);
    view.scroll_into_view(Region::Results);
}

/// Shows `message` verbatim in the error region.
pub fn render_error(
    view: &mut ViewState,
    message: &str,
) {
    view.set_error_message(message);
    view.set_visible(Region::Error, true);
    view.scroll_into_view(Region::Error);
}
