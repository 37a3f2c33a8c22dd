//! Read-only client for the landscape modeling API.
//!
//! [`LandscapeApi`] is the seam the resolver talks to. [`HttpLandscapeApi`]
//! implements it over blocking HTTP; tests substitute an in-memory fake.

use log::{debug, trace};
use reqwest::{
    blocking::Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, InvalidHeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use flowseq_core::model::{Diagram, Flow, FlowSummary, ModelObject};

use crate::config::{ApiConfig, Credentials};

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read operations offered by the landscape API.
///
/// Every call is scoped to the landscape version the implementation was
/// created for.
pub trait LandscapeApi {
    /// Lists all flows of the landscape version.
    fn list_flows(&self) -> Result<Vec<FlowSummary>, ApiError>;

    /// Fetches a flow with its steps.
    fn flow(&self, flow_id: &str) -> Result<Flow, ApiError>;

    /// Fetches a diagram with all objects placed on it.
    fn diagram(&self, diagram_id: &str) -> Result<Diagram, ApiError>;

    /// Fetches a single model object.
    fn model_object(&self, model_object_id: &str) -> Result<ModelObject, ApiError>;
}

#[derive(Deserialize)]
struct FlowsEnvelope {
    flows: Vec<FlowSummary>,
}

#[derive(Deserialize)]
struct FlowEnvelope {
    flow: Flow,
}

#[derive(Deserialize)]
struct DiagramEnvelope {
    diagram: Diagram,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelObjectEnvelope {
    model_object: ModelObject,
}

/// [`LandscapeApi`] over blocking HTTP.
///
/// All requests carry an `Authorization: ApiKey <key>` header.
#[derive(Debug)]
pub struct HttpLandscapeApi {
    client: Client,
    version_url: String,
}

impl HttpLandscapeApi {
    /// Create a client for the landscape version named by `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidApiKey`] if the key cannot be sent as a
    /// header, or [`ApiError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, credentials: &Credentials) -> Result<Self, ApiError> {
        let mut auth = HeaderValue::from_str(&format!("ApiKey {}", credentials.api_key()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            version_url: version_url(config.base_url(), credentials),
        })
    }

    /// Returns the full URL of a resource below the landscape version.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.version_url)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = url.as_str(); "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;
        trace!(url = url.as_str(), bytes = body.len(); "Response received");

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

impl LandscapeApi for HttpLandscapeApi {
    fn list_flows(&self) -> Result<Vec<FlowSummary>, ApiError> {
        self.get::<FlowsEnvelope>("flows").map(|env| env.flows)
    }

    fn flow(&self, flow_id: &str) -> Result<Flow, ApiError> {
        self.get::<FlowEnvelope>(&format!("flows/{flow_id}"))
            .map(|env| env.flow)
    }

    fn diagram(&self, diagram_id: &str) -> Result<Diagram, ApiError> {
        self.get::<DiagramEnvelope>(&format!("diagrams/{diagram_id}"))
            .map(|env| env.diagram)
    }

    fn model_object(&self, model_object_id: &str) -> Result<ModelObject, ApiError> {
        self.get::<ModelObjectEnvelope>(&format!("model/objects/{model_object_id}"))
            .map(|env| env.model_object)
    }
}

fn version_url(base_url: &str, credentials: &Credentials) -> String {
    format!(
        "{}/landscapes/{}/versions/{}",
        base_url.trim_end_matches('/'),
        credentials.landscape_id(),
        credentials.version_id()
    )
}
