//! Bollinger Band clause templates.
//!
//! Default parameters: period=20, std_dev=2

use crate::domain::narrative::{BoundParams, num};

pub const DEFAULT_PERIOD: f64 = 20.0;
pub const DEFAULT_STD_DEV: f64 = 2.0;

pub fn render(condition: &str, params: BoundParams<'_>) -> Option<String> {
    let bands = format!(
        "Bollinger Band ({}, {} std dev)",
        num(params.get("period", DEFAULT_PERIOD)),
        num(params.get("std_dev", DEFAULT_STD_DEV)),
    );

    let clause = match condition {
        "bb_lower_touch" => format!("price touches the lower {bands}"),
        "bb_upper_touch" => format!("price touches the upper {bands}"),
        "bb_breakout_up" => format!("price breaks above the upper {bands}"),
        "bb_breakout_down" => format!("price breaks below the lower {bands}"),
        "bb_squeeze" => format!("the {bands} width is contracting"),
        _ => return None,
    };
    Some(clause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::IndicatorInstance;

    #[test]
    fn fractional_multiplier() {
        let bb = IndicatorInstance::new("BB").with_param("std_dev", 2.5);
        assert_eq!(
            render("bb_lower_touch", BoundParams::new(Some(&bb))).unwrap(),
            "price touches the lower Bollinger Band (20, 2.5 std dev)"
        );
    }

    #[test]
    fn squeeze_defaults() {
        assert_eq!(
            render("bb_squeeze", BoundParams::default()).unwrap(),
            "the Bollinger Band (20, 2 std dev) width is contracting"
        );
    }
}
