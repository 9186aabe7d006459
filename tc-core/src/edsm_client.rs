use async_trait::async_trait;
use mockall::automock;
use reqwest::{StatusCode, Url};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tc_domain::{RawBodiesPayload, RawSystemPayload};
use tracing::{debug, warn};

pub const DEFAULT_EDSM_BASE_URL: &str = "https://www.edsm.net";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid system name: {0}")]
    InvalidQuery(String),
    #[error("Could not reach the star map service: {0}")]
    TransportFailure(String),
    #[error("Star map service responded with status {0}")]
    HttpStatus(u16),
    #[error("Unexpected response from star map service at '{path}': {message}")]
    DecodeFailure { path: String, message: String },
}

#[automock]
#[async_trait]
pub trait EdsmClientTrait: Send + Sync + Debug {
    async fn fetch_system(&self, system_name: &str) -> Result<RawSystemPayload, FetchError>;

    async fn fetch_bodies(&self, system_name: &str) -> Result<RawBodiesPayload, FetchError>;
}

#[derive(Debug, Clone)]
pub struct EdsmClient {
    pub client: ClientWithMiddleware,
    base_url: String,
}

impl EdsmClient {
    pub fn new(client: ClientWithMiddleware, base_url: &str) -> Self {
        EdsmClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_url(&self, path: &str, system_name: &str, flags: &[&str]) -> Result<Url, FetchError> {
        let system_name = system_name.trim();
        if system_name.is_empty() {
            return Err(FetchError::InvalidQuery("system name must not be empty".to_string()));
        }

        let params = std::iter::once(("systemName", system_name)).chain(flags.iter().map(|flag| (*flag, "1")));

        Url::parse_with_params(&format!("{}{}", self.base_url, path), params).map_err(|e| FetchError::InvalidQuery(e.to_string()))
    }

    async fn make_api_call<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
        let resp = request.send().await.map_err(|e| FetchError::TransportFailure(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| FetchError::TransportFailure(e.to_string()))?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), body = body.as_str(), "API request failed");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| {
            debug!(body = body.as_str(), "Error decoding response");
            FetchError::DecodeFailure {
                path: e.path().to_string(),
                message: e.into_inner().to_string(),
            }
        })
    }
}

#[async_trait]
impl EdsmClientTrait for EdsmClient {
    async fn fetch_system(&self, system_name: &str) -> Result<RawSystemPayload, FetchError> {
        let url = self.build_url(
            "/api-v1/system",
            system_name,
            &["showCoordinates", "showInformation", "showStations", "showMarket"],
        )?;

        Self::make_api_call(self.client.get(url)).await
    }

    async fn fetch_bodies(&self, system_name: &str) -> Result<RawBodiesPayload, FetchError> {
        let url = self.build_url("/api-system-v1/bodies", system_name, &[])?;

        Self::make_api_call(self.client.get(url)).await
    }
}
