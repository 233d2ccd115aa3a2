pub mod cli;
pub mod core;
pub mod exchanges;
pub mod utils;

pub use crate::core::{config::BgwConfig, errors::BgwError, types::*};
pub use crate::exchanges::bgw::{build_client, BgwBuilder, BgwRestClient, MarketRequest, Operation};
