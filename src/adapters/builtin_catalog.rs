//! Default catalog used when a session names no catalog file.
//!
//! Condition names carry the family prefixes the natural-language renderer
//! dispatches on (`rsi_`, `macd_`, `sma_`, `ema_price_`, `ema_`, `bb_`).

use crate::domain::catalog::{ConditionCatalog, IndicatorSpec};
use crate::domain::error::SigcomposeError;
use crate::domain::narrative::{bollinger, macd, moving_average, rsi};
use crate::ports::catalog_port::CatalogPort;

pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn catalog() -> ConditionCatalog {
        ConditionCatalog::new(vec![
            IndicatorSpec::new("RSI", "Relative Strength Index")
                .with_condition("rsi_oversold", "RSI({period}) below {oversold}")
                .with_condition("rsi_overbought", "RSI({period}) above {overbought}")
                .with_condition(
                    "rsi_cross_above_oversold",
                    "RSI({period}) crosses back above {oversold}",
                )
                .with_condition(
                    "rsi_cross_below_overbought",
                    "RSI({period}) crosses back below {overbought}",
                )
                .with_condition("rsi_above_50", "RSI({period}) above the midline")
                .with_condition("rsi_below_50", "RSI({period}) below the midline")
                .with_parameter("period", rsi::DEFAULT_PERIOD, 2.0, 100.0)
                .with_parameter("oversold", rsi::DEFAULT_OVERSOLD, 1.0, 50.0)
                .with_parameter("overbought", rsi::DEFAULT_OVERBOUGHT, 50.0, 99.0),
            IndicatorSpec::new("MACD", "Moving Average Convergence Divergence")
                .with_condition("macd_cross_up", "MACD line crosses above the signal line")
                .with_condition("macd_cross_down", "MACD line crosses below the signal line")
                .with_condition("macd_above_zero", "MACD line above zero")
                .with_condition("macd_below_zero", "MACD line below zero")
                .with_condition("macd_histogram_positive", "MACD histogram positive")
                .with_condition("macd_histogram_negative", "MACD histogram negative")
                .with_parameter("fast", macd::DEFAULT_FAST, 2.0, 50.0)
                .with_parameter("slow", macd::DEFAULT_SLOW, 5.0, 100.0)
                .with_parameter("signal", macd::DEFAULT_SIGNAL, 2.0, 50.0),
            IndicatorSpec::new("SMA", "Simple Moving Average")
                .with_condition("sma_price_above", "price above SMA({period})")
                .with_condition("sma_price_below", "price below SMA({period})")
                .with_condition("sma_rising", "SMA({period}) rising")
                .with_condition("sma_falling", "SMA({period}) falling")
                .with_parameter("period", moving_average::DEFAULT_SMA_PERIOD, 2.0, 400.0),
            IndicatorSpec::new("EMA", "Exponential Moving Average Cross")
                .with_condition("ema_cross_up", "EMA({fast}) crosses above EMA({slow})")
                .with_condition("ema_cross_down", "EMA({fast}) crosses below EMA({slow})")
                .with_condition("ema_fast_above_slow", "EMA({fast}) above EMA({slow})")
                .with_condition("ema_fast_below_slow", "EMA({fast}) below EMA({slow})")
                .with_parameter("fast", moving_average::DEFAULT_EMA_FAST, 2.0, 100.0)
                .with_parameter("slow", moving_average::DEFAULT_EMA_SLOW, 3.0, 400.0),
            IndicatorSpec::new("EMA_PRICE", "Price vs Exponential Moving Average")
                .with_condition("ema_price_above", "price above EMA({period})")
                .with_condition("ema_price_below", "price below EMA({period})")
                .with_condition("ema_price_cross_up", "price crosses above EMA({period})")
                .with_condition("ema_price_cross_down", "price crosses below EMA({period})")
                .with_parameter("period", moving_average::DEFAULT_EMA_PRICE_PERIOD, 2.0, 400.0),
            IndicatorSpec::new("BB", "Bollinger Bands")
                .with_condition("bb_lower_touch", "price touches the lower band")
                .with_condition("bb_upper_touch", "price touches the upper band")
                .with_condition("bb_breakout_up", "price closes above the upper band")
                .with_condition("bb_breakout_down", "price closes below the lower band")
                .with_condition("bb_squeeze", "band width contracting")
                .with_parameter("period", bollinger::DEFAULT_PERIOD, 2.0, 200.0)
                .with_parameter("std_dev", bollinger::DEFAULT_STD_DEV, 0.5, 5.0),
        ])
    }
}

impl CatalogPort for BuiltinCatalog {
    fn load_catalog(&self) -> Result<ConditionCatalog, SigcomposeError> {
        Ok(Self::catalog())
    }
}
