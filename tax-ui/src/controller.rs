//! Top-level form orchestration.
//!
//! A calculation runs `Idle -> Validating -> Submitting -> Succeeded | Failed`
//! and always lands back in `Idle`. A validation failure goes straight back
//! to `Idle` without touching the network.
//!
//! [`FormController::calculate`] takes `&mut self`, so one controller can
//! never have two submissions in flight: a second trigger has to wait for the
//! first to settle.

use tax_core::{CalculationError, HealthStatus, TaxCalculator};
use tracing::{debug, error, info, warn};

use crate::form::{self, AddressField, AddressInput, ValidationError};
use crate::registry::{ItemDraft, ItemField, ItemId, ItemRegistry};
use crate::render::{render_error, render_results};
use crate::view::{LoadingGuard, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// How a calculate action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Results were rendered.
    Rendered,
    /// The form was invalid; nothing was sent.
    Rejected(ValidationError),
    /// The service call failed.
    Failed(CalculationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// What had focus when a key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Button,
    Input,
    Page,
}

pub struct FormController {
    calculator: Box<dyn TaxCalculator>,
    address: AddressInput,
    items: ItemRegistry,
    view: ViewState,
    phase: ControllerPhase,
}

impl FormController {
    /// A freshly loaded form: empty address, one blank item, nothing shown.
    pub fn new(calculator: Box<dyn TaxCalculator>) -> Self {
        Self {
            calculator,
            address: AddressInput::default(),
            items: ItemRegistry::new(),
            view: ViewState::default(),
            phase: ControllerPhase::Idle,
        }
    }

    pub fn address(&self) -> &AddressInput {
        &self.address
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn set_address_field(
        &mut self,
        field: AddressField,
        value: impl Into<String>,
    ) {
        self.address.set_field(field, value);
    }

    /// Returns `false` when `id` no longer names an item on the form.
    pub fn set_item_field(
        &mut self,
        id: ItemId,
        field: ItemField,
        value: impl Into<String>,
    ) -> bool {
        self.items.set_field(id, field, value)
    }

    pub fn add_item(&mut self) -> ItemId {
        self.items.add_item()
    }

    pub fn remove_item(
        &mut self,
        id: ItemId,
    ) -> bool {
        self.items.remove_item(id)
    }

    /// Appends pre-filled items. Blank items already on the form are dropped
    /// once at least one draft has been added.
    pub fn import_items(
        &mut self,
        drafts: impl IntoIterator<Item = ItemDraft>,
    ) -> Vec<ItemId> {
        let blanks: Vec<_> = self
            .items
            .entries()
            .iter()
            .filter(|entry| entry.draft.is_blank())
            .map(|entry| entry.id())
            .collect();

        let added: Vec<_> = drafts
            .into_iter()
            .map(|draft| self.items.add_draft(draft))
            .collect();

        if !added.is_empty() {
            for id in blanks {
                self.items.remove_item(id);
            }
        }
        debug!(count = added.len(), "items imported");
        added
    }

    /// Clears the address and items and hides any previous outcome.
    pub fn reset(&mut self) {
        self.address.clear();
        self.items.reset();
        self.view.hide_outcome();
        self.transition(ControllerPhase::Idle);
        info!("form reset");
    }

    /// Validates the form, submits it and renders whatever comes back.
    pub async fn calculate(&mut self) -> Outcome {
        self.view.hide_outcome();
        self.transition(ControllerPhase::Validating);

        let request = match form::extract(&self.address, self.items.entries()) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "form rejected");
                render_error(&mut self.view, &err.to_string());
                self.transition(ControllerPhase::Idle);
                return Outcome::Rejected(err);
            }
        };

        self.transition(ControllerPhase::Submitting);
        let result = {
            let _loading = LoadingGuard::show(&self.view);
            self.calculator.calculate(&request).await
        };

        let outcome = match result {
            Ok(response) => {
                self.transition(ControllerPhase::Succeeded);
                info!(
                    items = response.items.len(),
                    grand_total = %response.grand_total,
                    jurisdiction = %response.tax_jurisdiction,
                    "tax calculated"
                );
                render_results(&mut self.view, &response);
                Outcome::Rendered
            }
            Err(err) => {
                self.transition(ControllerPhase::Failed);
                error!(error = %err, "tax calculation failed");
                render_error(&mut self.view, err.user_message());
                Outcome::Failed(err)
            }
        };

        self.transition(ControllerPhase::Idle);
        outcome
    }

    /// Enter submits the form unless a button has focus (the button handles
    /// its own activation). Returns `None` when the key was ignored.
    pub async fn on_key_press(
        &mut self,
        key: Key,
        target: FocusTarget,
    ) -> Option<Outcome> {
        if key != Key::Enter || target == FocusTarget::Button {
            return None;
        }
        Some(self.calculate().await)
    }

    pub async fn check_service(&self) -> Result<HealthStatus, CalculationError> {
        self.calculator.health().await
    }

    fn transition(
        &mut self,
        next: ControllerPhase,
    ) {
        if self.phase != next {
            debug!(from = ?self.phase, to = ?next, "controller phase");
            self.phase = next;
        }
    }
}
