//! Endpoint registry: one entry per operation, pairing a remote path with the
//! pure function that builds its request body.

use crate::core::errors::BgwError;
use crate::core::types::{Chain, KlinePeriod, RankKind};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Price,
    Info,
    Top,
    Audit,
    Kline,
    Tx,
    Swap,
    Liquidity,
}

impl Operation {
    pub const ALL: [Self; 8] = [
        Self::Price,
        Self::Info,
        Self::Top,
        Self::Audit,
        Self::Kline,
        Self::Tx,
        Self::Swap,
        Self::Liquidity,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Price | Self::Info => "/bgw-pro/market/v3/coin/batchGetBaseInfo",
            Self::Top => "/bgw-pro/market/v3/topRank/detail",
            Self::Audit => "/bgw-pro/market/v3/coin/security/audits",
            Self::Kline => "/bgw-pro/market/v3/coin/getKline",
            Self::Tx => "/bgw-pro/market/v3/coin/getTxInfo",
            Self::Swap => "/bgw-pro/swapx/pro/quote",
            Self::Liquidity => "/bgw-pro/market/v3/poolList",
        }
    }

    /// CLI name of the operation
    pub const fn name(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Info => "info",
            Self::Top => "top",
            Self::Audit => "audit",
            Self::Kline => "kline",
            Self::Tx => "tx",
            Self::Swap => "swap",
            Self::Liquidity => "lp",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token on a chain; an empty contract means the chain's native asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef {
    pub chain: Chain,
    pub contract: String,
}

impl TokenRef {
    pub fn new(chain: Chain, contract: impl Into<String>) -> Self {
        Self {
            chain,
            contract: contract.into(),
        }
    }

    /// Resolve a chain name and contract, rejecting unknown chains
    pub fn parse(chain: &str, contract: &str) -> Result<Self, BgwError> {
        Ok(Self::new(chain.parse()?, contract.trim()))
    }

    pub fn is_native(&self) -> bool {
        self.contract.is_empty()
    }

    fn to_json(&self) -> Value {
        json!({"chain": self.chain.name(), "contract": self.contract})
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuoteRequest {
    pub from_chain: Chain,
    /// Empty for the native asset
    pub from_contract: String,
    pub to_chain: Chain,
    pub to_contract: String,
    pub from_amount: String,
}

impl SwapQuoteRequest {
    /// Validate raw CLI input. `to_chain` defaults to `from_chain`.
    pub fn parse(
        from_chain: &str,
        from_contract: Option<&str>,
        to_chain: Option<&str>,
        to_contract: &str,
        amount: &str,
    ) -> Result<Self, BgwError> {
        let from_chain: Chain = from_chain.parse()?;
        let to_chain = match to_chain.map(str::trim).filter(|c| !c.is_empty()) {
            Some(name) => name.parse()?,
            None => from_chain,
        };

        let to_contract = to_contract.trim();
        if to_contract.is_empty() {
            return Err(BgwError::InvalidParameters(
                "swap requires a destination contract (--to-contract)".to_string(),
            ));
        }

        let amount = amount.trim();
        if amount.is_empty() {
            return Err(BgwError::InvalidParameters(
                "swap requires an amount (--amount)".to_string(),
            ));
        }
        if !amount.parse::<f64>().is_ok_and(|v| v.is_finite() && v > 0.0) {
            return Err(BgwError::InvalidParameters(format!(
                "swap amount must be a positive number, got '{}'",
                amount
            )));
        }

        Ok(Self {
            from_chain,
            from_contract: from_contract.unwrap_or_default().trim().to_string(),
            to_chain,
            to_contract: to_contract.to_string(),
            from_amount: amount.to_string(),
        })
    }
}

/// A fully validated request for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketRequest {
    Price(TokenRef),
    Info(TokenRef),
    Top(RankKind),
    Audit(TokenRef),
    Kline {
        token: TokenRef,
        period: KlinePeriod,
        size: u32,
    },
    Tx(TokenRef),
    Swap(SwapQuoteRequest),
    Liquidity(TokenRef),
}

impl MarketRequest {
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Price(_) => Operation::Price,
            Self::Info(_) => Operation::Info,
            Self::Top(_) => Operation::Top,
            Self::Audit(_) => Operation::Audit,
            Self::Kline { .. } => Operation::Kline,
            Self::Tx(_) => Operation::Tx,
            Self::Swap(_) => Operation::Swap,
            Self::Liquidity(_) => Operation::Liquidity,
        }
    }

    pub const fn path(&self) -> &'static str {
        self.operation().path()
    }

    pub fn body(&self) -> Value {
        match self {
            Self::Price(token) | Self::Info(token) => token_list_body(token),
            Self::Top(kind) => top_rank_body(*kind),
            Self::Audit(token) => audit_body(token),
            Self::Kline {
                token,
                period,
                size,
            } => kline_body(token, *period, *size),
            Self::Tx(token) | Self::Liquidity(token) => token_body(token),
            Self::Swap(quote) => swap_quote_body(quote),
        }
    }
}

pub fn token_list_body(token: &TokenRef) -> Value {
    json!({"list": [token.to_json()]})
}

pub fn top_rank_body(kind: RankKind) -> Value {
    json!({"name": kind.rank_name()})
}

pub fn audit_body(token: &TokenRef) -> Value {
    json!({"list": [token.to_json()], "source": "bg"})
}

pub fn kline_body(token: &TokenRef, period: KlinePeriod, size: u32) -> Value {
    json!({
        "chain": token.chain.name(),
        "contract": token.contract,
        "period": period.as_str(),
        "size": size,
    })
}

pub fn token_body(token: &TokenRef) -> Value {
    token.to_json()
}

pub fn swap_quote_body(quote: &SwapQuoteRequest) -> Value {
    json!({
        "fromChain": quote.from_chain.name(),
        "fromContract": quote.from_contract,
        "toChain": quote.to_chain.name(),
        "toContract": quote.to_contract,
        "fromAmount": quote.from_amount,
        "estimateGas": true,
    })
}
