use crate::core::errors::BgwError;
use crate::core::kernel::codec::encode_body;
use crate::core::kernel::signer::Signer;
use crate::core::types::{ApiFailure, ApiResult};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument, trace};

/// REST client trait for making signed HTTP requests
///
/// Implementations send exactly one request per call. Transport failures come
/// back as `Err`; any response that arrives is normalized into [`ApiResult`].
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a signed POST request
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `body` - Optional JSON body; sent in canonical (sorted, compact) form
    ///
    /// # Returns
    /// `ApiResult::Success` with the parsed body on HTTP 200, otherwise
    /// `ApiResult::Failure` with the status and a truncated response text
    async fn post(&self, endpoint: &str, body: Option<&Value>) -> Result<ApiResult, BgwError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    /// Create a new configuration
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout_seconds: 30,
            user_agent: format!("bgw/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer used for every request
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, BgwError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                BgwError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Get the current timestamp in milliseconds
    fn get_timestamp() -> Result<u64, BgwError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|e| BgwError::Other(format!("Failed to get timestamp: {}", e)))
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Turn a received response into an `ApiResult`
    #[instrument(skip(self, response), fields(status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<ApiResult, BgwError> {
        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| BgwError::NetworkError(format!("Failed to read response body: {}", e)))?;

        trace!("Response body: {}", response_text);

        if status == StatusCode::OK {
            serde_json::from_str(&response_text)
                .map(ApiResult::Success)
                .map_err(|e| {
                    BgwError::DeserializationError(format!("Failed to parse JSON response: {}", e))
                })
        } else {
            debug!(status = status.as_u16(), "request rejected");
            Ok(ApiResult::Failure(ApiFailure::from_status(
                status.as_u16(),
                &response_text,
            )))
        }
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    async fn post(&self, endpoint: &str, body: Option<&Value>) -> Result<ApiResult, BgwError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            BgwError::AuthError("Authentication required but no signer provided".to_string())
        })?;

        let timestamp = Self::get_timestamp()?;
        let body_str = encode_body(body)?;
        let headers = signer.sign_request(endpoint, &body_str, timestamp)?;

        let mut request = self
            .client
            .post(self.build_url(endpoint))
            .header("Content-Type", "application/json");
        for (key, value) in headers {
            request = request.header(key, value);
        }
        if !body_str.is_empty() {
            request = request.body(body_str);
        }

        debug!("sending request");
        let response = request
            .send()
            .await
            .map_err(|e| BgwError::NetworkError(format!("Request failed: {}", e)))?;

        self.handle_response(response).await
    }
}
