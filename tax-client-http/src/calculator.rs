use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, error, warn};
use url::Url;

use tax_core::{
    CalculationError, CalculationRequest, CalculationResponse, GENERIC_FAILURE_MESSAGE,
    HealthStatus, ServiceErrorBody, TaxCalculator,
};

pub const CALCULATE_PATH: &str = "api/v1/calculate-tax";
pub const HEALTH_PATH: &str = "api/v1/health";

pub struct HttpTaxCalculator {
    client: Client,
    calculate_url: Url,
    health_url: Url,
}

impl HttpTaxCalculator {
    /// Creates a calculator rooted at `base_url` with a default client.
    pub fn new(base_url: &str) -> Result<Self, CalculationError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
    ) -> Result<Self, CalculationError> {
        let base = parse_base_url(base_url)?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| CalculationError::Configuration(format!("invalid endpoint '{path}': {e}")))
        };

        Ok(Self {
            calculate_url: join(CALCULATE_PATH)?,
            health_url: join(HEALTH_PATH)?,
            client,
        })
    }

    pub fn calculate_url(&self) -> &Url {
        &self.calculate_url
    }
}

#[async_trait]
impl TaxCalculator for HttpTaxCalculator {
    async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResponse, CalculationError> {
        debug!(url = %self.calculate_url, items = request.items.len(), "posting calculation request");

        let response = self
            .client
            .post(self.calculate_url.clone())
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        response.json::<CalculationResponse>().await.map_err(|e| {
            error!(error = %e, "calculation response could not be decoded");
            CalculationError::Decode(e.to_string())
        })
    }

    async fn health(&self) -> Result<HealthStatus, CalculationError> {
        let response = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let response = ensure_success(response).await?;
        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| CalculationError::Decode(e.to_string()))
    }
}

/// Parses the service root, making sure its path ends with `/` so endpoint
/// paths are appended rather than replacing the last segment.
fn parse_base_url(base_url: &str) -> Result<Url, CalculationError> {
    let mut url = Url::parse(base_url.trim()).map_err(|e| {
        CalculationError::Configuration(format!("invalid base url '{base_url}': {e}"))
    })?;

    if url.cannot_be_a_base() {
        return Err(CalculationError::Configuration(format!(
            "base url '{base_url}' cannot carry a path"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn transport_error(e: reqwest::Error) -> CalculationError {
    error!(error = %e, "no response from calculation service");
    CalculationError::Transport(e.to_string())
}

/// Passes a success response through; turns anything else into a
/// [`CalculationError::Service`] carrying the body's `message`.
async fn ensure_success(response: Response) -> Result<Response, CalculationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // An unreadable body is treated like one without a message.
    let body = response.bytes().await.unwrap_or_default();
    let message = service_message(&body);
    warn!(%status, %message, "calculation service rejected the request");
    Err(CalculationError::Service(message))
}

/// Extracts the `message` field of an error body, falling back to the
/// generic text when the body is not JSON or the field is missing or empty.
fn service_message(body: &[u8]) -> String {
    serde_json::from_slice::<ServiceErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}
