pub mod app;
pub mod controller;
pub mod csv_loader;
pub mod form;
pub mod logging;
pub mod registry;
pub mod render;
pub mod settings;
pub mod utils;
pub mod view;

pub use controller::{ControllerPhase, FocusTarget, FormController, Key, Outcome};
pub use form::{AddressField, AddressInput, ValidationError};
pub use registry::{ItemDraft, ItemField, ItemId, ItemRegistry};
pub use view::{LoadingIndicator, Region, ViewState};
