//! RSI clause templates.
//!
//! Default parameters: period=14, oversold=30, overbought=70

use crate::domain::narrative::{BoundParams, num};

pub const DEFAULT_PERIOD: f64 = 14.0;
pub const DEFAULT_OVERSOLD: f64 = 30.0;
pub const DEFAULT_OVERBOUGHT: f64 = 70.0;

pub fn render(condition: &str, params: BoundParams<'_>) -> Option<String> {
    let period = num(params.get("period", DEFAULT_PERIOD));
    let oversold = num(params.get("oversold", DEFAULT_OVERSOLD));
    let overbought = num(params.get("overbought", DEFAULT_OVERBOUGHT));

    let clause = match condition {
        "rsi_oversold" => format!("RSI({period}) is below {oversold} (oversold)"),
        "rsi_overbought" => format!("RSI({period}) is above {overbought} (overbought)"),
        "rsi_cross_above_oversold" => {
            format!("RSI({period}) crosses back above {oversold}")
        }
        "rsi_cross_below_overbought" => {
            format!("RSI({period}) crosses back below {overbought}")
        }
        "rsi_above_50" => format!("RSI({period}) is above 50"),
        "rsi_below_50" => format!("RSI({period}) is below 50"),
        _ => return None,
    };
    Some(clause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::IndicatorInstance;

    #[test]
    fn defaults_when_unbound() {
        let text = render("rsi_overbought", BoundParams::default()).unwrap();
        assert_eq!(text, "RSI(14) is above 70 (overbought)");
    }

    #[test]
    fn bound_values_win() {
        let rsi = IndicatorInstance::new("RSI")
            .with_param("period", 9.0)
            .with_param("oversold", 20.0);
        let text = render("rsi_cross_above_oversold", BoundParams::new(Some(&rsi))).unwrap();
        assert_eq!(text, "RSI(9) crosses back above 20");
    }

    #[test]
    fn unknown_rsi_condition_has_no_template() {
        assert!(render("rsi_divergence", BoundParams::default()).is_none());
    }
}
