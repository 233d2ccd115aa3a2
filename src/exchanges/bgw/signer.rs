use crate::core::config::BgwConfig;
use crate::core::errors::BgwError;
use crate::core::kernel::{to_canonical_json, SignatureResult, Signer};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use serde_json::json;
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// Path segment that marks the swap endpoint family
pub const SWAP_PATH_SEGMENT: &str = "/swapx/";

pub const HEADER_API_KEY: &str = "x-api-key";
pub const HEADER_TIMESTAMP: &str = "x-api-timestamp";
pub const HEADER_SIGNATURE: &str = "x-api-signature";
pub const HEADER_PARTNER_CODE: &str = "Partner-Code";

/// Whether `path` belongs to the swap family and needs the partner header
pub fn is_swap_path(path: &str) -> bool {
    path.contains(SWAP_PATH_SEGMENT)
}

pub struct BgwSigner {
    api_key: String,
    api_secret: Secret<String>,
    partner_code: String,
}

impl BgwSigner {
    pub fn new(api_key: String, api_secret: String, partner_code: String) -> Self {
        Self {
            api_key,
            api_secret: Secret::new(api_secret),
            partner_code,
        }
    }

    pub fn from_config(config: &BgwConfig) -> Self {
        Self::new(
            config.api_key().to_string(),
            config.api_secret().to_string(),
            config.partner_code.clone(),
        )
    }

    /// The signing input: `{apiPath, body, x-api-key, x-api-timestamp}` as
    /// sorted, compact JSON. `body` is the transmitted body text, `""` if none.
    pub fn canonical_payload(
        &self,
        path: &str,
        body: &str,
        timestamp: &str,
    ) -> Result<String, BgwError> {
        to_canonical_json(&json!({
            "apiPath": path,
            "body": body,
            "x-api-key": self.api_key,
            "x-api-timestamp": timestamp,
        }))
    }

    /// Base64 HMAC-SHA256 of the canonical payload, keyed by the API secret
    pub fn sign(&self, path: &str, body: &str, timestamp: &str) -> Result<String, BgwError> {
        let payload = self.canonical_payload(path, body, timestamp)?;

        let mut mac = HmacSha256::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .map_err(|e| BgwError::AuthError(format!("Failed to create HMAC: {}", e)))?;
        mac.update(payload.as_bytes());

        Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl Signer for BgwSigner {
    fn sign_request(&self, endpoint: &str, body: &str, timestamp: u64) -> SignatureResult {
        let timestamp = timestamp.to_string();
        let signature = self.sign(endpoint, body, &timestamp)?;

        let mut headers = HashMap::new();
        headers.insert(HEADER_API_KEY.to_string(), self.api_key.clone());
        headers.insert(HEADER_TIMESTAMP.to_string(), timestamp);
        headers.insert(HEADER_SIGNATURE.to_string(), signature);
        if is_swap_path(endpoint) {
            headers.insert(HEADER_PARTNER_CODE.to_string(), self.partner_code.clone());
        }

        Ok(headers)
    }
}
