//! Natural-language descriptions of signal expressions.
//!
//! Each resolved condition is rendered by the renderer of its indicator
//! family, chosen from the condition-name prefix:
//! - `rsi_` → [`rsi`]
//! - `macd_` → [`macd`]
//! - `sma_`, `ema_price_`, `ema_` → [`moving_average`]
//! - `bb_` → [`bollinger`]
//!
//! Unknown names, or names a family has no template for, fall back to the
//! catalog description with `{param}` placeholders substituted ([`generic`]).
//! Missing parameters use each family's documented defaults.

pub mod bollinger;
pub mod generic;
pub mod macd;
pub mod moving_average;
pub mod rsi;

use crate::domain::catalog::ConditionCatalog;
use crate::domain::resolver::resolve_expression;
use crate::domain::selection::{IndicatorInstance, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorFamily {
    Rsi,
    Macd,
    Sma,
    EmaPrice,
    EmaCross,
    Bollinger,
    Generic,
}

impl IndicatorFamily {
    pub fn from_condition(name: &str) -> Self {
        // ema_price_ must be tested before the wider ema_ prefix.
        if name.starts_with("rsi_") {
            IndicatorFamily::Rsi
        } else if name.starts_with("macd_") {
            IndicatorFamily::Macd
        } else if name.starts_with("sma_") {
            IndicatorFamily::Sma
        } else if name.starts_with("ema_price_") {
            IndicatorFamily::EmaPrice
        } else if name.starts_with("ema_") {
            IndicatorFamily::EmaCross
        } else if name.starts_with("bb_") {
            IndicatorFamily::Bollinger
        } else {
            IndicatorFamily::Generic
        }
    }
}

/// Parameter lookup that falls back to a caller-supplied default.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundParams<'a> {
    instance: Option<&'a IndicatorInstance>,
}

impl<'a> BoundParams<'a> {
    pub fn new(instance: Option<&'a IndicatorInstance>) -> Self {
        Self { instance }
    }

    pub fn get(&self, name: &str, default: f64) -> f64 {
        self.lookup(name).unwrap_or(default)
    }

    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.instance.and_then(|i| i.param(name))
    }
}

/// Renders one condition as a lower-case clause.
pub fn render_condition(condition: &str, description: &str, params: BoundParams<'_>) -> String {
    let rendered = match IndicatorFamily::from_condition(condition) {
        IndicatorFamily::Rsi => rsi::render(condition, params),
        IndicatorFamily::Macd => macd::render(condition, params),
        IndicatorFamily::Sma => moving_average::render_sma(condition, params),
        IndicatorFamily::EmaPrice => moving_average::render_ema_price(condition, params),
        IndicatorFamily::EmaCross => moving_average::render_ema_cross(condition, params),
        IndicatorFamily::Bollinger => bollinger::render(condition, params),
        IndicatorFamily::Generic => None,
    };
    rendered.unwrap_or_else(|| generic::render(condition, description, params))
}

/// Describes an expression as one sentence, joining clauses with "and"/"or"
/// in expression order. Unresolvable terms are left out; an expression with
/// no resolvable term describes as `""`.
pub fn describe(expression: &str, selection: &Selection, catalog: &ConditionCatalog) -> String {
    let mut sentence = String::new();

    for term in resolve_expression(expression, selection, catalog) {
        let indicator_id = &term.resolved.indicator_id;
        let condition = &term.resolved.condition;
        let description = catalog
            .condition(indicator_id, condition)
            .map(|c| c.description)
            .unwrap_or_default();
        let params = BoundParams::new(selection.get(indicator_id));
        let clause = render_condition(condition, &description, params);

        if sentence.is_empty() {
            sentence.push_str(&capitalize(&clause));
        } else {
            let word = term.operator.map(|op| op.word()).unwrap_or("and");
            sentence.push(' ');
            sentence.push_str(word);
            sentence.push(' ');
            sentence.push_str(&clause);
        }
    }

    sentence
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats a parameter value; whole numbers print without a decimal point.
pub(crate) fn num(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::IndicatorSpec;

    #[test]
    fn family_from_prefix() {
        assert_eq!(IndicatorFamily::from_condition("rsi_oversold"), IndicatorFamily::Rsi);
        assert_eq!(IndicatorFamily::from_condition("macd_cross_up"), IndicatorFamily::Macd);
        assert_eq!(IndicatorFamily::from_condition("sma_price_above"), IndicatorFamily::Sma);
        assert_eq!(
            IndicatorFamily::from_condition("ema_price_above"),
            IndicatorFamily::EmaPrice
        );
        assert_eq!(IndicatorFamily::from_condition("ema_cross_up"), IndicatorFamily::EmaCross);
        assert_eq!(IndicatorFamily::from_condition("bb_squeeze"), IndicatorFamily::Bollinger);
        assert_eq!(IndicatorFamily::from_condition("volume_spike"), IndicatorFamily::Generic);
        assert_eq!(IndicatorFamily::from_condition("rsi"), IndicatorFamily::Generic);
    }

    #[test]
    fn num_formats_whole_numbers_plainly() {
        assert_eq!(num(14.0), "14");
        assert_eq!(num(2.5), "2.5");
    }

    fn catalog() -> ConditionCatalog {
        ConditionCatalog::new(vec![
            IndicatorSpec::new("RSI", "RSI")
                .with_condition("rsi_oversold", "RSI below {oversold}")
                .with_parameter("period", 14.0, 2.0, 100.0)
                .with_parameter("oversold", 30.0, 1.0, 50.0),
            IndicatorSpec::new("MACD", "MACD").with_condition("macd_cross_up", ""),
            IndicatorSpec::new("VOL", "Volume")
                .with_condition("volume_spike", "volume exceeds {multiplier}x its average")
                .with_parameter("multiplier", 2.0, 1.0, 10.0),
        ])
    }

    #[test]
    fn describe_joins_with_lowercase_operators() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.add(&catalog, "RSI");
        selection.add(&catalog, "MACD");
        selection.add(&catalog, "VOL");
        let text = describe(
            "rsi_oversold AND macd_cross_up OR volume_spike",
            &selection,
            &catalog,
        );
        assert_eq!(
            text,
            "RSI(14) is below 30 (oversold) and the MACD(12,26,9) line crosses above its \
             signal line or volume exceeds 2x its average"
        );
    }

    #[test]
    fn describe_uses_bound_parameters() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.add(&catalog, "RSI");
        selection
            .get_mut("RSI")
            .unwrap()
            .set_param(&catalog, "oversold", 25.0);
        assert_eq!(
            describe("rsi_oversold", &selection, &catalog),
            "RSI(14) is below 25 (oversold)"
        );
    }

    #[test]
    fn describe_capitalizes_first_clause_only() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.add(&catalog, "MACD");
        selection.add(&catalog, "RSI");
        let text = describe("macd_cross_up OR rsi_oversold", &selection, &catalog);
        assert!(text.starts_with("The MACD"));
        assert!(text.contains(" or RSI(14)"));
    }

    #[test]
    fn describe_empty_when_nothing_resolves() {
        let catalog = catalog();
        let selection = Selection::new();
        assert_eq!(describe("rsi_oversold", &selection, &catalog), "");
        assert_eq!(describe("", &selection, &catalog), "");
    }
}
