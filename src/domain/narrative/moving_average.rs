//! Moving-average clause templates: SMA vs price, EMA vs price, EMA crosses.

use crate::domain::narrative::{BoundParams, num};

pub const DEFAULT_SMA_PERIOD: f64 = 20.0;
pub const DEFAULT_EMA_PRICE_PERIOD: f64 = 20.0;
pub const DEFAULT_EMA_FAST: f64 = 9.0;
pub const DEFAULT_EMA_SLOW: f64 = 21.0;

pub fn render_sma(condition: &str, params: BoundParams<'_>) -> Option<String> {
    let period = num(params.get("period", DEFAULT_SMA_PERIOD));
    let clause = match condition {
        "sma_price_above" => format!("price is above the {period}-period SMA"),
        "sma_price_below" => format!("price is below the {period}-period SMA"),
        "sma_rising" => format!("the {period}-period SMA is rising"),
        "sma_falling" => format!("the {period}-period SMA is falling"),
        _ => return None,
    };
    Some(clause)
}

pub fn render_ema_price(condition: &str, params: BoundParams<'_>) -> Option<String> {
    let period = num(params.get("period", DEFAULT_EMA_PRICE_PERIOD));
    let clause = match condition {
        "ema_price_above" => format!("price is above the {period}-period EMA"),
        "ema_price_below" => format!("price is below the {period}-period EMA"),
        "ema_price_cross_up" => format!("price crosses above the {period}-period EMA"),
        "ema_price_cross_down" => format!("price crosses below the {period}-period EMA"),
        _ => return None,
    };
    Some(clause)
}

pub fn render_ema_cross(condition: &str, params: BoundParams<'_>) -> Option<String> {
    let fast = num(params.get("fast", DEFAULT_EMA_FAST));
    let slow = num(params.get("slow", DEFAULT_EMA_SLOW));
    let clause = match condition {
        "ema_cross_up" => {
            format!("the {fast}-period EMA crosses above the {slow}-period EMA")
        }
        "ema_cross_down" => {
            format!("the {fast}-period EMA crosses below the {slow}-period EMA")
        }
        "ema_fast_above_slow" => format!("the {fast}-period EMA is above the {slow}-period EMA"),
        "ema_fast_below_slow" => format!("the {fast}-period EMA is below the {slow}-period EMA"),
        _ => return None,
    };
    Some(clause)
}
