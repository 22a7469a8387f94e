use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use tax_ui::{
    AddressField, FocusTarget, ItemDraft, Key, Outcome, app, csv_loader, logging,
    settings::Settings,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Sales tax estimator.
///
/// Fills the estimate form from the arguments, submits it to the tax
/// calculation service and prints the breakdown.
#[derive(Debug, Parser)]
#[command(name = "tax-estimator", version, about)]
struct Cli {
    /// Two-letter state code, e.g. `CA`.
    #[arg(long, default_value = "")]
    state: String,

    #[arg(long, default_value = "")]
    zipcode: String,

    #[arg(long, default_value = "")]
    city: String,

    #[arg(long, default_value = "")]
    street: String,

    /// CSV file of items (`name,price,quantity[,description]`).
    #[arg(long)]
    items: Option<PathBuf>,

    /// Item as `name:price:quantity[:description]`. Repeatable.
    #[arg(long = "item")]
    item: Vec<ItemDraft>,

    /// Settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Calculation service root URL. Overrides the settings file.
    #[arg(long)]
    api_url: Option<String>,

    /// Calculator backend. Overrides the settings file.
    #[arg(long)]
    backend: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Only check that the calculation service is up.
    #[arg(long, default_value_t = false)]
    health: bool,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(url) = &self.api_url {
            settings.api_url = url.clone();
        }
        if let Some(backend) = &self.backend {
            settings.backend = backend.clone();
        }
        if let Some(path) = &self.log_file {
            settings.log_file = Some(path.clone());
        }
        Ok(settings)
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging("info");

    let settings = cli.settings()?;
    if std::env::var_os("RUST_LOG").is_none() {
        logging::set_log_level(&settings.log_level)?;
    }
    if let Some(path) = &settings.log_file {
        logging::enable_file_logging(path)?;
    }

    let registry = app::build_registry();
    let mut controller = app::build_controller(&registry, &settings).await?;

    if cli.health {
        let health = controller
            .check_service()
            .await
            .with_context(|| format!("health check against {} failed", settings.api_url))?;
        println!("{} {} ({})", health.service, health.version, health.status);
        return Ok(if health.is_healthy() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    controller.set_address_field(AddressField::State, cli.state.as_str());
    controller.set_address_field(AddressField::Zipcode, cli.zipcode.as_str());
    controller.set_address_field(AddressField::City, cli.city.as_str());
    controller.set_address_field(AddressField::Street, cli.street.as_str());

    if let Some(path) = &cli.items {
        let drafts = csv_loader::load_from_file(path)
            .with_context(|| format!("failed to load items from {}", path.display()))?;
        info!(count = drafts.len(), file = %path.display(), "items loaded");
        controller.import_items(drafts);
    }
    controller.import_items(cli.item.iter().cloned());

    // Submitting from the command line behaves like pressing Enter in a field.
    let outcome = controller
        .on_key_press(Key::Enter, FocusTarget::Input)
        .await;

    print!("{}", controller.view());

    match outcome {
        Some(Outcome::Rendered) => Ok(ExitCode::SUCCESS),
        Some(other) => {
            warn!(?other, "no results");
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
