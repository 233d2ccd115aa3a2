//! Command-line surface: argument definitions, dispatch and rendering.

pub mod commands;
pub mod render;

use crate::core::errors::BgwError;
use crate::core::types::{KlinePeriod, RankKind};
use crate::exchanges::bgw::endpoints::{MarketRequest, SwapQuoteRequest, TokenRef};
use clap::{Parser, Subcommand};

pub const CHAIN_HELP: &str = "Chain (eth, sol, bnb, base, arbitrum, trx, ton, sui, optimism)";

#[derive(Parser, Debug)]
#[command(name = "bgw")]
#[command(version, about = "Bitget Wallet CLI: on-chain market data at your fingertips")]
pub struct Cli {
    /// Output raw JSON instead of formatted tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Get token price
    Price {
        #[arg(help = CHAIN_HELP)]
        chain: String,
        /// Contract address (omit for the native asset)
        contract: Option<String>,
    },
    /// Get detailed token info
    Info {
        #[arg(help = CHAIN_HELP)]
        chain: String,
        /// Contract address (omit for the native asset)
        contract: Option<String>,
    },
    /// Top gainers or losers
    Top {
        #[arg(value_enum, default_value_t = RankKind::Gainers)]
        kind: RankKind,
        /// Number of results
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
    /// Security audit for a token
    Audit {
        #[arg(help = CHAIN_HELP)]
        chain: String,
        contract: String,
    },
    /// Get K-line (candlestick) data
    Kline {
        #[arg(help = CHAIN_HELP)]
        chain: String,
        contract: String,
        /// Candle period
        #[arg(short, long, value_enum, default_value_t = KlinePeriod::Hours1)]
        period: KlinePeriod,
        /// Number of candles
        #[arg(short = 'n', long, default_value_t = 24)]
        size: u32,
    },
    /// Transaction volume stats
    Tx {
        #[arg(help = CHAIN_HELP)]
        chain: String,
        contract: String,
    },
    /// Get a swap quote
    Swap {
        /// Source chain
        #[arg(long)]
        from_chain: String,
        /// Source token (omit for the native asset)
        #[arg(long)]
        from_contract: Option<String>,
        /// Destination chain (defaults to the source chain)
        #[arg(long)]
        to_chain: Option<String>,
        /// Destination token contract
        #[arg(long)]
        to_contract: String,
        /// Amount to swap
        #[arg(long)]
        amount: String,
    },
    /// Liquidity pool info
    Lp {
        #[arg(help = CHAIN_HELP)]
        chain: String,
        contract: String,
        /// Number of pools to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
}

impl Commands {
    /// Validate arguments into a registry request. Nothing touches the
    /// network before this succeeds.
    pub fn to_request(&self) -> Result<MarketRequest, BgwError> {
        let request = match self {
            Self::Price { chain, contract } => {
                MarketRequest::Price(TokenRef::parse(chain, contract.as_deref().unwrap_or(""))?)
            }
            Self::Info { chain, contract } => {
                MarketRequest::Info(TokenRef::parse(chain, contract.as_deref().unwrap_or(""))?)
            }
            Self::Top { kind, .. } => MarketRequest::Top(*kind),
            Self::Audit { chain, contract } => {
                MarketRequest::Audit(TokenRef::parse(chain, contract)?)
            }
            Self::Kline {
                chain,
                contract,
                period,
                size,
            } => {
                if *size == 0 {
                    return Err(BgwError::InvalidParameters(
                        "kline size must be at least 1".to_string(),
                    ));
                }
                MarketRequest::Kline {
                    token: TokenRef::parse(chain, contract)?,
                    period: *period,
                    size: *size,
                }
            }
            Self::Tx { chain, contract } => MarketRequest::Tx(TokenRef::parse(chain, contract)?),
            Self::Swap {
                from_chain,
                from_contract,
                to_chain,
                to_contract,
                amount,
            } => MarketRequest::Swap(SwapQuoteRequest::parse(
                from_chain,
                from_contract.as_deref(),
                to_chain.as_deref(),
                to_contract,
                amount,
            )?),
            Self::Lp {
                chain, contract, ..
            } => MarketRequest::Liquidity(TokenRef::parse(chain, contract)?),
        };
        Ok(request)
    }

    /// Row cap for list-shaped output, where the command has one
    pub const fn row_limit(&self) -> Option<usize> {
        match self {
            Self::Top { limit, .. } | Self::Lp { limit, .. } => Some(*limit),
            Self::Kline { size, .. } => Some(*size as usize),
            _ => None,
        }
    }
}
