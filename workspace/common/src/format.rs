//! Display formatting for metric cards and tables.

use num_format::{Locale, ToFormattedString};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Placeholder for values that are undefined (e.g. a ratio over zero revenue).
pub const UNDEFINED: &str = "—";

/// Integer with thousands separators: `12,345`.
pub fn format_count(value: i64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Signed integer delta: `+1,200`, `-35`, `0`.
pub fn format_count_delta(value: i64) -> String {
    if value > 0 {
        format!("+{}", format_count(value))
    } else {
        format_count(value)
    }
}

/// Currency-prefixed whole amount: `US$ 1,234`, `-US$ 20`.
pub fn format_money(amount: Decimal, prefix: &str) -> String {
    let whole = whole_units(amount);
    if whole < 0 {
        format!("-{} {}", prefix, format_count(-whole))
    } else {
        format!("{} {}", prefix, format_count(whole))
    }
}

/// Signed whole amount without prefix: `+1,234`, `-20`.
pub fn format_money_delta(amount: Decimal) -> String {
    format_count_delta(whole_units(amount))
}

/// Chart values arrive as floats; same rendering as [`format_money`].
pub fn format_money_f64(amount: f64, prefix: &str) -> String {
    format_money(Decimal::from_f64_retain(amount).unwrap_or_default(), prefix)
}

/// Two-decimal percentage: `20.00 %`, or [`UNDEFINED`].
pub fn format_percent(ratio: Option<Decimal>) -> String {
    match ratio {
        Some(ratio) => format!("{:.2} %", ratio.round_dp(2)),
        None => UNDEFINED.to_string(),
    }
}

/// Signed two-decimal percentage delta: `+1.25 %`, or [`UNDEFINED`].
pub fn format_percent_delta(delta: Option<Decimal>) -> String {
    match delta {
        Some(delta) if delta > Decimal::ZERO => format!("+{:.2} %", delta.round_dp(2)),
        Some(delta) => format!("{:.2} %", delta.round_dp(2)),
        None => UNDEFINED.to_string(),
    }
}

fn whole_units(amount: Decimal) -> i64 {
    amount.round().to_i64().unwrap_or_else(|| {
        tracing::warn!("Amount {} does not fit in i64, clamping", amount);
        if amount.is_sign_negative() { i64::MIN + 1 } else { i64::MAX }
    })
}
