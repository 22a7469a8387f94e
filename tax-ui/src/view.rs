//! Display state of the form's output regions.
//!
//! The controller never talks to a concrete rendering surface. It writes into
//! a [`ViewState`], and a front-end (the CLI, a test) reads it back.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// Output regions whose visibility the controller toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Results,
    Error,
    Loading,
}

/// Formatted aggregate figures of a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub subtotal: String,
    pub total_tax: String,
    pub grand_total: String,
    pub jurisdiction: String,
}

/// One item's block in the results breakdown, every figure preformatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownBlock {
    pub item_name: String,
    pub price: String,
    pub quantity: String,
    pub subtotal: String,
    pub tax_rate: String,
    pub tax_amount: String,
    pub total: String,
}

/// Shared handle on the loading indicator.
///
/// Clones observe the same flag, so a spinner task can poll it while the
/// controller is busy awaiting the calculator.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator(Arc<AtomicBool>);

impl LoadingIndicator {
    pub fn is_visible(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set_visible(
        &self,
        visible: bool,
    ) {
        self.0.store(visible, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    results_visible: bool,
    error_visible: bool,
    loading: LoadingIndicator,
    summary: Summary,
    breakdown: Vec<BreakdownBlock>,
    error_message: String,
    scrolled_to: Option<Region>,
}

impl ViewState {
    pub fn is_visible(
        &self,
        region: Region,
    ) -> bool {
        match region {
            Region::Results => self.results_visible,
            Region::Error => self.error_visible,
            Region::Loading => self.loading.is_visible(),
        }
    }

    pub fn set_visible(
        &mut self,
        region: Region,
        visible: bool,
    ) {
        match region {
            Region::Results => self.results_visible = visible,
            Region::Error => self.error_visible = visible,
            Region::Loading => self.loading.set_visible(visible),
        }
    }

    pub fn loading_indicator(&self) -> LoadingIndicator {
        self.loading.clone()
    }

    /// Hides the results and error regions ahead of a new submission or reset.
    pub fn hide_outcome(&mut self) {
        self.set_visible(Region::Results, false);
        self.set_visible(Region::Error, false);
    }

    pub fn scroll_into_view(
        &mut self,
        region: Region,
    ) {
        self.scrolled_to = Some(region);
    }

    /// Region most recently brought into view.
    pub fn scrolled_to(&self) -> Option<Region> {
        self.scrolled_to
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn breakdown(&self) -> &[BreakdownBlock] {
        &self.breakdown
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub(crate) fn set_summary(
        &mut self,
        summary: Summary,
    ) {
        self.summary = summary;
    }

    pub(crate) fn clear_breakdown(&mut self) {
        self.breakdown.clear();
    }

    pub(crate) fn push_breakdown(
        &mut self,
        block: BreakdownBlock,
    ) {
        self.breakdown.push(block);
    }

    pub(crate) fn set_error_message(
        &mut self,
        message: &str,
    ) {
        self.error_message = message.to_string();
    }
}

/// Prints the visible regions as plain text.
impl fmt::Display for ViewState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.loading.is_visible() {
            writeln!(f, "Calculating...")?;
        }

        if self.error_visible {
            writeln!(f, "Error: {}", self.error_message)?;
        }

        if self.results_visible {
            writeln!(f, "Jurisdiction: {}", self.summary.jurisdiction)?;
            for block in &self.breakdown {
                writeln!(f)?;
                writeln!(f, "{}  {}", block.item_name, block.total)?;
                writeln!(f, "  Price:      {}", block.price)?;
                writeln!(f, "  Quantity:   {}", block.quantity)?;
                writeln!(f, "  Subtotal:   {}", block.subtotal)?;
                writeln!(f, "  Tax Rate:   {}", block.tax_rate)?;
                writeln!(f, "  Tax Amount: {}", block.tax_amount)?;
                writeln!(f, "  Total:      {}", block.total)?;
            }
            writeln!(f)?;
            writeln!(f, "Subtotal:    {}", self.summary.subtotal)?;
            writeln!(f, "Total Tax:   {}", self.summary.total_tax)?;
            writeln!(f, "Grand Total: {}", self.summary.grand_total)?;
        }
        Ok(())
    }
}

/// Keeps the loading indicator visible for as long as it lives.
///
/// Dropping the guard hides the indicator, whether the call it wraps
/// succeeded, failed, or was abandoned.
pub struct LoadingGuard {
    indicator: LoadingIndicator,
}

impl LoadingGuard {
    pub fn show(view: &ViewState) -> Self {
        let indicator = view.loading_indicator();
        indicator.set_visible(true);
        Self { indicator }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.set_visible(false);
    }
}
