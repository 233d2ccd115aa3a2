pub mod builder;
pub mod endpoints;
pub mod rest;
pub mod signer;

// Re-export main types for easier importing
pub use builder::{build_client, BgwBuilder};
pub use endpoints::{MarketRequest, Operation, SwapQuoteRequest, TokenRef};
pub use rest::BgwRestClient;
pub use signer::BgwSigner;
