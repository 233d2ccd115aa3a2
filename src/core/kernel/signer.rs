use crate::core::errors::BgwError;
use std::collections::HashMap;

/// Headers to attach to a signed request
pub type SignatureResult = Result<HashMap<String, String>, BgwError>;

/// Signer trait for request authentication
///
/// The REST kernel knows nothing about how a venue authenticates; it hands
/// the exact bytes it is about to send to the signer and attaches whatever
/// headers come back.
pub trait Signer: Send + Sync {
    /// Sign a request and return the headers to include
    ///
    /// # Arguments
    /// * `endpoint` - API endpoint path, without the base URL
    /// * `body` - Serialized request body, empty when the request has none
    /// * `timestamp` - Request timestamp in milliseconds since the epoch
    fn sign_request(&self, endpoint: &str, body: &str, timestamp: u64) -> SignatureResult;
}
