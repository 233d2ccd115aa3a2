//! Transport kernel shared by every command
//!
//! The kernel holds no venue knowledge. `RestClient` sends JSON POSTs and
//! normalizes HTTP outcomes into [`ApiResult`](crate::core::types::ApiResult);
//! `Signer` supplies the authentication headers for each request, and
//! `codec` fixes the byte form of every body that gets signed and sent.
//!
//! # Example
//! ```rust,no_run
//! use bgw::core::config::BgwConfig;
//! use bgw::core::kernel::{RestClient, RestClientBuilder, RestClientConfig};
//! use bgw::exchanges::bgw::signer::BgwSigner;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BgwConfig::default();
//! let rest = RestClientBuilder::new(RestClientConfig::new(config.base_url.clone()))
//!     .with_signer(Arc::new(BgwSigner::from_config(&config)))
//!     .build()?;
//!
//! let body = json!({"name": "topGainers"});
//! let result = rest.post("/bgw-pro/market/v3/topRank/detail", Some(&body)).await?;
//! println!("{}", result.data_list().len());
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod rest;
pub mod signer;

pub use codec::{encode_body, to_canonical_json};
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{SignatureResult, Signer};
