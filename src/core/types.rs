use crate::core::errors::BgwError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Supported chains, keyed by the short name the remote service uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Eth,
    Sol,
    Bnb,
    Base,
    Arbitrum,
    Trx,
    Ton,
    Sui,
    Optimism,
}

impl Chain {
    pub const ALL: [Self; 9] = [
        Self::Eth,
        Self::Sol,
        Self::Bnb,
        Self::Base,
        Self::Arbitrum,
        Self::Trx,
        Self::Ton,
        Self::Sui,
        Self::Optimism,
    ];

    /// Short name sent in request bodies
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eth => "eth",
            Self::Sol => "sol",
            Self::Bnb => "bnb",
            Self::Base => "base",
            Self::Arbitrum => "arbitrum",
            Self::Trx => "trx",
            Self::Ton => "ton",
            Self::Sui => "sui",
            Self::Optimism => "optimism",
        }
    }

    /// Network identifier. Non-EVM chains use the service's 1002xx range.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Eth => "1",
            Self::Sol => "100278",
            Self::Bnb => "56",
            Self::Base => "8453",
            Self::Arbitrum => "42161",
            Self::Trx => "6",
            Self::Ton => "100280",
            Self::Sui => "100281",
            Self::Optimism => "10",
        }
    }
}

impl FromStr for Chain {
    type Err = BgwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|chain| chain.name() == wanted)
            .ok_or_else(|| BgwError::UnsupportedChain(s.to_string()))
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Candle periods accepted by the kline endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum KlinePeriod {
    #[value(name = "1s")]
    Seconds1,
    #[value(name = "1m")]
    Minutes1,
    #[value(name = "5m")]
    Minutes5,
    #[value(name = "15m")]
    Minutes15,
    #[value(name = "30m")]
    Minutes30,
    #[value(name = "1h")]
    Hours1,
    #[value(name = "4h")]
    Hours4,
    #[value(name = "1d")]
    Days1,
    #[value(name = "1w")]
    Weeks1,
}

impl KlinePeriod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seconds1 => "1s",
            Self::Minutes1 => "1m",
            Self::Minutes5 => "5m",
            Self::Minutes15 => "15m",
            Self::Minutes30 => "30m",
            Self::Hours1 => "1h",
            Self::Hours4 => "4h",
            Self::Days1 => "1d",
            Self::Weeks1 => "1w",
        }
    }
}

impl fmt::Display for KlinePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which ranking the `top` operation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankKind {
    #[default]
    Gainers,
    Losers,
}

impl RankKind {
    /// Ranking name understood by the remote service
    pub const fn rank_name(self) -> &'static str {
        match self {
            Self::Gainers => "topGainers",
            Self::Losers => "topLosers",
        }
    }
}

/// Error record for a non-200 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    /// `HTTP <status>`
    pub error: String,
    /// Response text, capped at [`ApiFailure::MAX_MESSAGE_CHARS`] characters
    pub message: String,
}

impl ApiFailure {
    pub const MAX_MESSAGE_CHARS: usize = 500;

    pub fn from_status(status: u16, body: &str) -> Self {
        Self {
            error: format!("HTTP {}", status),
            message: body.chars().take(Self::MAX_MESSAGE_CHARS).collect(),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Outcome of a request that reached the server
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    Success(Value),
    Failure(ApiFailure),
}

impl ApiResult {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The `data` object of a successful response
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(body) => body.get("data").filter(|data| !data.is_null()),
            Self::Failure(_) => None,
        }
    }

    /// The `data.list` array of a successful response, empty when absent
    pub fn data_list(&self) -> &[Value] {
        self.data()
            .and_then(|data| data.get("list"))
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice)
    }

    /// JSON shape used for raw output: the body itself, or `{error, message}`
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success(body) => body.clone(),
            Self::Failure(failure) => json!({
                "error": failure.error,
                "message": failure.message,
            }),
        }
    }
}

/// Read a numeric field that may arrive as a JSON number or a numeric string.
///
/// Missing, null, empty and non-numeric values all read as `None`.
pub fn field_f64(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(value_f64)
}

/// First of `keys` that holds a usable number
pub fn first_f64(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| field_f64(value, key))
}

pub fn value_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Read a field as display text; numbers and booleans are stringified
pub fn field_str(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First of `keys` with non-empty display text
pub fn first_str(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| field_str(value, key))
}
