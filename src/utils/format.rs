//! Display rules for prices, volumes, percentage changes and counts.
//!
//! Every formatter is total: absent input renders as [`NOT_AVAILABLE`] and
//! any number renders without panicking.

pub const NOT_AVAILABLE: &str = "N/A";

pub const UP: &str = "🟢";
pub const DOWN: &str = "🔴";

/// Price with precision that grows as the magnitude shrinks, so sub-cent
/// tokens keep their significant digits.
pub fn format_price(price: Option<f64>) -> String {
    let Some(p) = price else {
        return NOT_AVAILABLE.to_string();
    };

    if p >= 1.0 {
        format!("${}", group_thousands(&format!("{:.2}", p)))
    } else if p >= 0.01 {
        format!("${:.4}", p)
    } else if p >= 0.0001 {
        format!("${:.6}", p)
    } else {
        format!("${:.10}", p)
    }
}

/// Volume scaled to B / M / K with two decimals
pub fn format_volume(volume: Option<f64>) -> String {
    let Some(v) = volume else {
        return NOT_AVAILABLE.to_string();
    };

    if v >= 1_000_000_000.0 {
        format!("${:.2}B", v / 1_000_000_000.0)
    } else if v >= 1_000_000.0 {
        format!("${:.2}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("${:.2}K", v / 1_000.0)
    } else {
        format!("${:.2}", v)
    }
}

/// Signed percentage with a direction marker. Zero counts as up.
pub fn format_change(change: Option<f64>) -> String {
    let Some(c) = change else {
        return NOT_AVAILABLE.to_string();
    };

    // -0.0 would otherwise print as "+-0.00%"
    let c = if c == 0.0 { 0.0 } else { c };
    if c >= 0.0 {
        format!("{} +{:.2}%", UP, c)
    } else {
        format!("{} {:.2}%", DOWN, c)
    }
}

/// Whole number with thousands separators
pub fn format_count(count: Option<f64>) -> String {
    let Some(n) = count else {
        return NOT_AVAILABLE.to_string();
    };

    let rounded = format!("{:.0}", n);
    // "-0" after rounding a small negative
    if rounded == "-0" {
        return "0".to_string();
    }
    group_thousands(&rounded)
}

/// Insert `,` every three digits of the integer part of a plain decimal string
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = number
        .strip_prefix('-')
        .map_or(("", number), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
