//! Display formatting shared by the calculator, gallery and history chart.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a rate or amount with precision adapted to its magnitude.
///
/// Very small values switch to exponential notation with three fractional
/// digits. Ties round away from zero on the exact binary value, so
/// `10.125` renders as `"10.13"`. `None` and non-finite values render as
/// `"N/A"`.
pub fn format_rate(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "N/A".to_string();
    };
    if value == 0.0 {
        return "0.0000".to_string();
    }

    let magnitude = value.abs();
    if magnitude < 0.0001 {
        to_exponential(value).unwrap_or_else(|| format!("{value:.3e}"))
    } else {
        let places = if magnitude < 0.1 {
            6
        } else if magnitude < 10.0 {
            4
        } else {
            2
        };
        to_fixed(value, places).unwrap_or_else(|| format!("{value:.*}", places as usize))
    }
}

/// `None` when `value` is outside the range `Decimal` can hold exactly.
fn to_fixed(value: f64, places: u32) -> Option<String> {
    let mut rounded = Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    Some(rounded.to_string())
}

fn to_exponential(value: f64) -> Option<String> {
    let exact = Decimal::from_f64_retain(value).filter(|d| !d.is_zero())?;
    let mantissa = exact.mantissa();
    let shift = mantissa.unsigned_abs().ilog10();
    let mut exponent = i64::from(shift) - i64::from(exact.scale());
    let mut significand = Decimal::try_from_i128_with_scale(mantissa, shift)
        .ok()?
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
    if significand.abs() >= Decimal::TEN {
        significand /= Decimal::TEN;
        exponent += 1;
    }
    significand.rescale(3);
    Some(format!("{significand}e{exponent}"))
}

/// `MM-DD` label used on the chart's date axis.
pub fn format_chart_date(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

/// `YYYY-MM-DD` as the rate API expects it.
pub fn format_api_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
