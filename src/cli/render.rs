use crate::core::errors::BgwError;
use crate::core::types::{
    field_f64, field_str, first_f64, first_str, value_f64, ApiResult, Chain, RankKind,
};
use crate::exchanges::bgw::endpoints::{MarketRequest, SwapQuoteRequest, TokenRef};
use crate::utils::format::{format_change, format_count, format_price, format_volume};
use chrono::{Local, TimeZone};
use serde_json::{json, Value};
use std::io::Write;

pub const DEFAULT_TOP_LIMIT: usize = 10;
pub const DEFAULT_POOL_LIMIT: usize = 10;

const TX_WINDOWS: [&str; 4] = ["5m", "1h", "4h", "24h"];

/// How a response should be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print JSON instead of formatted text
    pub raw_json: bool,
    /// Row cap for `top` and `lp`; kline windows by its own size
    pub limit: Option<usize>,
}

/// Write `result` for `request` to `out`.
///
/// Single-entity lookups (price, info, swap quote) that come back empty are
/// `BgwError::NotFound`; every other empty response prints a "no data" line.
pub fn render<W: Write>(
    request: &MarketRequest,
    result: &ApiResult,
    options: &RenderOptions,
    out: &mut W,
) -> Result<(), BgwError> {
    match request {
        MarketRequest::Price(token) => render_price(token, result, options.raw_json, out),
        MarketRequest::Info(token) => render_info(token, result, options.raw_json, out),
        MarketRequest::Top(kind) => render_top(
            *kind,
            result,
            options.limit.unwrap_or(DEFAULT_TOP_LIMIT),
            options.raw_json,
            out,
        ),
        MarketRequest::Audit(token) => render_audit(token, result, options.raw_json, out),
        MarketRequest::Kline { size, .. } => {
            render_kline(result, *size as usize, options.raw_json, out)
        }
        MarketRequest::Tx(token) => render_tx(token, result, options.raw_json, out),
        MarketRequest::Swap(quote) => render_swap(quote, result, options.raw_json, out),
        MarketRequest::Liquidity(_) => render_pools(
            result,
            options.limit.unwrap_or(DEFAULT_POOL_LIMIT),
            options.raw_json,
            out,
        ),
    }
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> Result<(), BgwError> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Raw mode prints the whole response; text mode reports a failure in one line.
/// Returns `true` when the caller should go on rendering data.
fn passthrough<W: Write>(
    result: &ApiResult,
    raw_json: bool,
    out: &mut W,
) -> Result<bool, BgwError> {
    if raw_json {
        write_json(out, &result.to_json())?;
        return Ok(false);
    }
    if let ApiResult::Failure(failure) = result {
        writeln!(out, "Error: {}", failure)?;
        return Ok(false);
    }
    Ok(true)
}

fn token_not_found(chain: Chain, result: &ApiResult) -> BgwError {
    match result {
        ApiResult::Failure(failure) => {
            BgwError::NotFound(format!("Token not found on {} ({})", chain, failure))
        }
        ApiResult::Success(_) => BgwError::NotFound(format!("Token not found on {}", chain)),
    }
}

fn text(value: &Value, key: &str) -> String {
    field_str(value, key).unwrap_or_else(|| "?".to_string())
}

fn render_price<W: Write>(
    token: &TokenRef,
    result: &ApiResult,
    raw_json: bool,
    out: &mut W,
) -> Result<(), BgwError> {
    let item = result
        .data_list()
        .first()
        .ok_or_else(|| token_not_found(token.chain, result))?;

    if raw_json {
        return write_json(
            out,
            &json!({
                "symbol": item.get("symbol"),
                "price": item.get("price"),
                "change_24h": item.get("change_24h"),
            }),
        );
    }

    writeln!(
        out,
        "{}  {}  {}",
        text(item, "symbol"),
        format_price(field_f64(item, "price")),
        format_change(field_f64(item, "change_24h"))
    )?;
    Ok(())
}

fn render_info<W: Write>(
    token: &TokenRef,
    result: &ApiResult,
    raw_json: bool,
    out: &mut W,
) -> Result<(), BgwError> {
    let item = result
        .data_list()
        .first()
        .ok_or_else(|| token_not_found(token.chain, result))?;

    if raw_json {
        return write_json(out, item);
    }

    let contract = if token.is_native() {
        "(native)"
    } else {
        token.contract.as_str()
    };
    let rows = [
        ("Symbol:", text(item, "symbol")),
        ("Name:", text(item, "name")),
        ("Price:", format_price(field_f64(item, "price"))),
        ("24h Change:", format_change(field_f64(item, "change_24h"))),
        ("Market Cap:", format_volume(field_f64(item, "market_cap"))),
        ("24h Volume:", format_volume(field_f64(item, "turnover_24h"))),
        ("Holders:", format_count(field_f64(item, "holders"))),
        ("Chain:", token.chain.to_string()),
        ("Contract:", contract.to_string()),
    ];
    for (label, value) in rows {
        writeln!(out, "{:<16} {}", label, value)?;
    }

    let socials = ["social_links", "socialLinks"]
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_object).filter(|m| !m.is_empty()));
    if let Some(socials) = socials {
        let links: Vec<String> = socials
            .iter()
            .filter_map(|(name, link)| match link {
                Value::String(s) if !s.is_empty() => Some(format!("{}: {}", name, s)),
                _ => None,
            })
            .collect();
        let joined = if links.is_empty() {
            "N/A".to_string()
        } else {
            links.join(" | ")
        };
        writeln!(out, "{:<16} {}", "Links:", joined)?;
    }
    Ok(())
}

fn render_top<W: Write>(
    kind: RankKind,
    result: &ApiResult,
    limit: usize,
    raw_json: bool,
    out: &mut W,
) -> Result<(), BgwError> {
    let items = result.data_list();
    let shown = &items[..items.len().min(limit)];

    if raw_json {
        if result.is_success() {
            return write_json(out, &Value::Array(shown.to_vec()));
        }
        return write_json(out, &result.to_json());
    }
    if !passthrough(result, false, out)? {
        return Ok(());
    }
    if shown.is_empty() {
        writeln!(out, "No ranking data.")?;
        return Ok(());
    }

    let title = match kind {
        RankKind::Gainers => "🟢 Top Gainers",
        RankKind::Losers => "🔴 Top Losers",
    };
    writeln!(out, "\n{}", title)?;
    writeln!(
        out,
        "{:<4} {:<12} {:<16} {:<14} {:<12}",
        "#", "Symbol", "Price", "24h Change", "Volume"
    )?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (rank, item) in shown.iter().enumerate() {
        writeln!(
            out,
            "{:<4} {:<12} {:<16} {:<14} {:<12}",
            rank + 1,
            text(item, "symbol"),
            format_price(field_f64(item, "price")),
            format_change(field_f64(item, "change_24h")),
            format_volume(field_f64(item, "turnover_24h"))
        )?;
    }
    Ok(())
}

fn risk_marker(level: &str) -> &'static str {
    match level {
        "low" => "🟢",
        "medium" => "🟡",
        "high" => "🔴",
        _ => "⚪",
    }
}

fn check_passed(outcome: &str) -> bool {
    matches!(outcome.to_ascii_lowercase().as_str(), "pass" | "true" | "1")
}

fn render_audit<W: Write>(
    token: &TokenRef,
    result: &ApiResult,
    raw_json: bool,
    out: &mut W,
) -> Result<(), BgwError> {
    if !passthrough(result, raw_json, out)? {
        return Ok(());
    }
    let Some(audit) = result.data_list().first() else {
        writeln!(out, "No audit data available.")?;
        return Ok(());
    };

    let risk = field_str(audit, "risk_level").unwrap_or_else(|| "unknown".to_string());
    writeln!(
        out,
        "\n{} Security Audit: {} ({} risk)",
        risk_marker(&risk),
        text(audit, "symbol"),
        risk.to_uppercase()
    )?;
    writeln!(out, "{:<20} {}", "Chain:", token.chain)?;
    writeln!(out, "{:<20} {}", "Contract:", token.contract)?;

    let checks = ["audit_items", "auditItems"]
        .iter()
        .find_map(|key| audit.get(*key).and_then(Value::as_array).filter(|a| !a.is_empty()));
    if let Some(checks) = checks {
        writeln!(out, "\n{:<30} {:<10}", "Check", "Result")?;
        writeln!(out, "{}", "-".repeat(42))?;
        for check in checks {
            let name = first_str(check, &["name", "audit_name"]).unwrap_or_else(|| "?".to_string());
            let outcome =
                first_str(check, &["result", "audit_result"]).unwrap_or_else(|| "?".to_string());
            let icon = if check_passed(&outcome) { "✅" } else { "❌" };
            writeln!(out, "{} {:<28} {}", icon, name, outcome)?;
        }
    }
    Ok(())
}

/// Candle open time as local `YYYY-MM-DD HH:MM`
fn candle_time(candle: &Value) -> String {
    field_f64(candle, "time")
        .filter(|ms| *ms > 0.0)
        .and_then(|ms| Local.timestamp_millis_opt(ms as i64).single())
        .map_or_else(|| "?".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

fn render_kline<W: Write>(
    result: &ApiResult,
    size: usize,
    raw_json: bool,
    out: &mut W,
) -> Result<(), BgwError> {
    if !passthrough(result, raw_json, out)? {
        return Ok(());
    }
    let candles = result.data_list();
    if candles.is_empty() {
        writeln!(out, "No kline data.")?;
        return Ok(());
    }

    writeln!(
        out,
        "\n{:<22} {:<14} {:<14} {:<14} {:<14} {:<14}",
        "Time", "Open", "High", "Low", "Close", "Volume"
    )?;
    writeln!(out, "{}", "-".repeat(94))?;
    for candle in &candles[candles.len().saturating_sub(size)..] {
        writeln!(
            out,
            "{:<22} {:<14} {:<14} {:<14} {:<14} {:<14}",
            candle_time(candle),
            format_price(field_f64(candle, "open")),
            format_price(field_f64(candle, "high")),
            format_price(field_f64(candle, "low")),
            format_price(field_f64(candle, "close")),
            format_volume(field_f64(candle, "volume"))
        )?;
    }
    Ok(())
}

fn render_tx<W: Write>(
    token: &TokenRef,
    result: &ApiResult,
    raw_json: bool,
    out: &mut W,
) -> Result<(), BgwError> {
    if !passthrough(result, raw_json, out)? {
        return Ok(());
    }

    let windows: Vec<(&str, &Value)> = result
        .data()
        .map(|data| {
            TX_WINDOWS
                .iter()
                .filter_map(|window| {
                    data.get(*window)
                        .filter(|stats| stats.as_object().is_some_and(|m| !m.is_empty()))
                        .map(|stats| (*window, stats))
                })
                .collect()
        })
        .unwrap_or_default();
    if windows.is_empty() {
        writeln!(out, "No transaction data.")?;
        return Ok(());
    }

    writeln!(out, "\nTransaction Stats: {}:{}", token.chain, token.contract)?;
    for (window, stats) in windows {
        writeln!(out, "\n  {}:", window)?;
        writeln!(out, "    Buy Volume:  {}", format_volume(field_f64(stats, "buyVolume")))?;
        writeln!(out, "    Sell Volume: {}", format_volume(field_f64(stats, "sellVolume")))?;
        writeln!(out, "    Buyers:      {}", format_count(field_f64(stats, "buyers")))?;
        writeln!(out, "    Sellers:     {}", format_count(field_f64(stats, "sellers")))?;
    }
    Ok(())
}

fn render_swap<W: Write>(
    quote: &SwapQuoteRequest,
    result: &ApiResult,
    raw_json: bool,
    out: &mut W,
) -> Result<(), BgwError> {
    if raw_json {
        return write_json(out, &result.to_json());
    }

    let data = result
        .data()
        .filter(|data| data.as_object().is_some_and(|m| !m.is_empty()));
    let Some(data) = data else {
        return Err(match result {
            ApiResult::Failure(failure) => {
                BgwError::NotFound(format!("No quote available ({})", failure))
            }
            ApiResult::Success(_) => BgwError::NotFound("No quote available.".to_string()),
        });
    };

    writeln!(out, "\n💱 Swap Quote")?;
    writeln!(
        out,
        "{:<16} {} ({})",
        "From:", quote.from_amount, quote.from_chain
    )?;
    writeln!(out, "{:<16} {} ({})", "To:", text(data, "toAmount"), quote.to_chain)?;
    writeln!(out, "{:<16} {}", "Market:", text(data, "market"))?;
    writeln!(out, "{:<16} {}%", "Slippage:", text(data, "slippage"))?;
    writeln!(out, "{:<16} {}", "Gas Limit:", text(data, "gasLimit"))?;
    Ok(())
}

fn render_pools<W: Write>(
    result: &ApiResult,
    limit: usize,
    raw_json: bool,
    out: &mut W,
) -> Result<(), BgwError> {
    if !passthrough(result, raw_json, out)? {
        return Ok(());
    }
    let pools = result.data_list();
    if pools.is_empty() {
        writeln!(out, "No liquidity pools found.")?;
        return Ok(());
    }

    writeln!(out, "\n{:<30} {:<16} {:<16}", "Pool", "Liquidity", "Volume 24h")?;
    writeln!(out, "{}", "-".repeat(64))?;
    for pool in pools.iter().take(limit) {
        let name = first_str(pool, &["name", "poolName"]).unwrap_or_else(|| "?".to_string());
        writeln!(
            out,
            "{:<30} {:<16} {:<16}",
            name,
            format_volume(pool.get("liquidity").and_then(value_f64)),
            format_volume(first_f64(pool, &["volume_24h", "volume24h"]))
        )?;
    }
    Ok(())
}
