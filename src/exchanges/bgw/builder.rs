use crate::core::config::BgwConfig;
use crate::core::errors::BgwError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::bgw::rest::BgwRestClient;
use crate::exchanges::bgw::signer::BgwSigner;
use std::sync::Arc;

/// Builder for the Bitget Wallet REST client
///
/// Wires the credentials from a [`BgwConfig`] into a [`BgwSigner`] and hands
/// that signer to the reqwest kernel.
#[derive(Default)]
pub struct BgwBuilder {
    config: BgwConfig,
    user_agent: Option<String>,
}

impl BgwBuilder {
    /// Create a new builder using the public demo credentials
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: BgwConfig) -> Self {
        self.config = config;
        self
    }

    /// Point requests at another host (staging, a local mock)
    pub fn with_base_url(mut self, base_url: String) -> Result<Self, BgwError> {
        self.config = self.config.base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config = self.config.timeout_seconds(timeout_seconds);
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<BgwRestClient<ReqwestRest>, BgwError> {
        if !self.config.has_credentials() {
            return Err(BgwError::ConfigurationError(
                "API key and secret are required for every request".to_string(),
            ));
        }

        let mut rest_config = RestClientConfig::new(self.config.base_url.clone())
            .with_timeout(self.config.timeout_seconds);
        if let Some(user_agent) = self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent);
        }

        let signer = Arc::new(BgwSigner::from_config(&self.config));
        let rest = RestClientBuilder::new(rest_config)
            .with_signer(signer)
            .build()?;

        Ok(BgwRestClient::new(rest))
    }
}

/// Build a client straight from a configuration
pub fn build_client(config: BgwConfig) -> Result<BgwRestClient<ReqwestRest>, BgwError> {
    BgwBuilder::new().with_config(config).build()
}
