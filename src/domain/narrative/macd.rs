//! MACD clause templates.
//!
//! Default parameters: fast=12, slow=26, signal=9

use crate::domain::narrative::{BoundParams, num};

pub const DEFAULT_FAST: f64 = 12.0;
pub const DEFAULT_SLOW: f64 = 26.0;
pub const DEFAULT_SIGNAL: f64 = 9.0;

pub fn render(condition: &str, params: BoundParams<'_>) -> Option<String> {
    let label = format!(
        "MACD({},{},{})",
        num(params.get("fast", DEFAULT_FAST)),
        num(params.get("slow", DEFAULT_SLOW)),
        num(params.get("signal", DEFAULT_SIGNAL)),
    );

    let clause = match condition {
        "macd_cross_up" => format!("the {label} line crosses above its signal line"),
        "macd_cross_down" => format!("the {label} line crosses below its signal line"),
        "macd_above_zero" => format!("the {label} line is above zero"),
        "macd_below_zero" => format!("the {label} line is below zero"),
        "macd_histogram_positive" => format!("the {label} histogram is positive"),
        "macd_histogram_negative" => format!("the {label} histogram is negative"),
        _ => return None,
    };
    Some(clause)
}
