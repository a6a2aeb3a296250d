use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    error::ValidationError,
    protocol::{OptionsCatalog, PredictErrorBody, PredictionRequest, PredictionResponse},
};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub mod display;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { message: String },
    #[error("unexpected status {0} from prediction endpoint")]
    UnexpectedStatus(StatusCode),
}

/// Seam between the form surfaces and the prediction backend, so the GUI
/// bridge and the CLI run against the same interface a test stub can satisfy.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn fetch_options(&self) -> Result<OptionsCatalog, ClientError>;
    async fn predict(&self, request: &PredictionRequest) -> Result<f64, ClientError>;
}

/// HTTP client for the two prediction-service endpoints.
pub struct PredictorClient {
    http: Client,
    base_url: Url,
}

impl PredictorClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl PredictionApi for PredictorClient {
    async fn fetch_options(&self) -> Result<OptionsCatalog, ClientError> {
        let url = self.endpoint("/api/options")?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        let catalog: OptionsCatalog = response.json().await?;
        info!(
            makes = catalog.makes.len(),
            models = catalog.models.len(),
            conditions = catalog.conditions.len(),
            "loaded options catalog"
        );
        Ok(catalog)
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<f64, ClientError> {
        let url = self.endpoint("/api/predict")?;
        let response = self.http.post(url).json(request).send().await?;
        let status = response.status();
        if status.is_success() {
            let body: PredictionResponse = response.json().await?;
            debug!(predicted_price = body.predicted_price, "prediction succeeded");
            return Ok(body.predicted_price);
        }
        // Rejections carry an {"error": ...} body; anything else is a
        // malformed failure and only the status is reportable.
        match response.json::<PredictErrorBody>().await {
            Ok(body) => {
                warn!(%status, error = %body.error, "prediction rejected by server");
                Err(ClientError::Api {
                    message: body.error,
                })
            }
            Err(_) => Err(ClientError::UnexpectedStatus(status)),
        }
    }
}

/// The visible contents of the Model selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelListing {
    Models(Vec<String>),
    /// A make is selected and no model in the catalog maps to it.
    NoModelsForMake,
}

/// Owned state of the prediction form.
///
/// Selections hold raw catalog tokens; the empty string means nothing is
/// selected. Numeric entries stay as text until submission. All operations
/// are pure, so the form flow is testable without widgets or network.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    catalog: Option<OptionsCatalog>,
    pub make: String,
    pub model: String,
    pub condition: String,
    pub age: String,
    pub engine_size: String,
    pub horse_power: String,
}

impl FormSession {
    pub fn catalog(&self) -> Option<&OptionsCatalog> {
        self.catalog.as_ref()
    }

    /// Installs a freshly fetched catalog, dropping any selection the new
    /// catalog no longer offers.
    pub fn set_catalog(&mut self, catalog: OptionsCatalog) {
        if !self.make.is_empty() && !catalog.makes.contains(&self.make) {
            self.make.clear();
        }
        if !self.condition.is_empty() && !catalog.conditions.contains(&self.condition) {
            self.condition.clear();
        }
        self.catalog = Some(catalog);
        self.reconcile_model();
    }

    /// The Model list consistent with the current Make: filtered by the
    /// model-make mapping when a make is selected, the full catalog
    /// otherwise.
    pub fn visible_models(&self) -> ModelListing {
        let Some(catalog) = &self.catalog else {
            return ModelListing::Models(Vec::new());
        };
        if self.make.is_empty() {
            return ModelListing::Models(catalog.models.clone());
        }
        let filtered: Vec<String> = catalog
            .models
            .iter()
            .filter(|model| {
                catalog
                    .makes_for_model(model)
                    .iter()
                    .any(|make| *make == self.make)
            })
            .cloned()
            .collect();
        if filtered.is_empty() {
            ModelListing::NoModelsForMake
        } else {
            ModelListing::Models(filtered)
        }
    }

    /// Records a Make selection (empty string clears it) and reconciles the
    /// Model selection: preserved while still valid, cleared otherwise.
    pub fn select_make(&mut self, make: String) {
        self.make = make;
        self.reconcile_model();
    }

    fn reconcile_model(&mut self) {
        if self.model.is_empty() {
            return;
        }
        let still_valid = match self.visible_models() {
            ModelListing::Models(models) => models.contains(&self.model),
            ModelListing::NoModelsForMake => false,
        };
        if !still_valid {
            self.model.clear();
        }
    }

    /// Validates the form and builds the request body. Callers must not
    /// issue any HTTP request when this fails.
    pub fn build_request(&self) -> Result<PredictionRequest, ValidationError> {
        if self.make.is_empty() || self.model.is_empty() || self.condition.is_empty() {
            return Err(ValidationError::MissingSelection);
        }
        Ok(PredictionRequest {
            make: self.make.clone(),
            model: self.model.clone(),
            condition: self.condition.clone(),
            age: parse_positive(&self.age)?,
            engine_size: parse_positive(&self.engine_size)?,
            horse_power: parse_positive(&self.horse_power)?,
        })
    }
}

fn parse_positive(raw: &str) -> Result<f64, ValidationError> {
    // Unparseable text counts as the zero it would coerce to, so it trips
    // the same message as an explicit non-positive entry.
    let value = raw.trim().parse::<f64>().unwrap_or(0.0);
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositiveNumeric)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
