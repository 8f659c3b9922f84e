//! Flat row model of a signal condition.
//!
//! Rows are positional: order is evaluation order and there is no grouping.
//! The first row never carries an operator; every later row does.

use crate::domain::catalog::ConditionCatalog;
use crate::domain::logic::LogicOp;
use crate::domain::resolver::resolve_expression;
use crate::domain::selection::Selection;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionRow {
    pub indicator_id: Option<String>,
    pub condition: Option<String>,
    pub operator: Option<LogicOp>,
}

impl ConditionRow {
    pub fn new(indicator_id: &str, condition: &str, operator: Option<LogicOp>) -> Self {
        Self {
            indicator_id: Some(indicator_id.to_string()),
            condition: Some(condition.to_string()),
            operator,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The condition name when one is set and non-blank.
    pub fn resolved_condition(&self) -> Option<&str> {
        self.condition
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Joins rows into a flat expression, skipping rows without a condition.
/// Never parenthesizes. Returns `""` when no row has a condition.
pub fn rows_to_expression(rows: &[ConditionRow]) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for row in rows {
        let Some(condition) = row.resolved_condition() else {
            continue;
        };
        if !parts.is_empty() {
            parts.push(row.operator.unwrap_or(LogicOp::And).keyword());
        }
        parts.push(condition);
    }

    parts.join(" ")
}

/// Best-effort reconstruction of rows from an expression.
///
/// Unresolvable terms are dropped. A non-empty expression in which nothing
/// resolves yields a single empty row so an editor has something to show.
pub fn expression_to_rows(
    expression: &str,
    selection: &Selection,
    catalog: &ConditionCatalog,
) -> Vec<ConditionRow> {
    let rows: Vec<ConditionRow> = resolve_expression(expression, selection, catalog)
        .into_iter()
        .map(|term| ConditionRow {
            indicator_id: Some(term.resolved.indicator_id),
            condition: Some(term.resolved.condition),
            operator: term.operator,
        })
        .collect();

    if rows.is_empty() && !expression.trim().is_empty() {
        debug!(expression, "no term resolved, emitting a single empty row");
        return vec![ConditionRow::empty()];
    }

    rows
}

/// Editable row list that keeps the first-row operator invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowList {
    rows: Vec<ConditionRow>,
}

impl RowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<ConditionRow>) -> Self {
        let mut list = Self { rows };
        list.normalize();
        list
    }

    pub fn from_expression(
        expression: &str,
        selection: &Selection,
        catalog: &ConditionCatalog,
    ) -> Self {
        Self::from_rows(expression_to_rows(expression, selection, catalog))
    }

    pub fn to_expression(&self) -> String {
        rows_to_expression(&self.rows)
    }

    pub fn rows(&self) -> &[ConditionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row drops its operator; later rows without one default to AND.
    pub fn normalize(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            if index == 0 {
                row.operator = None;
            } else if row.operator.is_none() {
                row.operator = Some(LogicOp::And);
            }
        }
    }

    pub fn push(&mut self, row: ConditionRow) {
        self.rows.push(row);
        self.normalize();
    }

    pub fn push_empty(&mut self) {
        self.push(ConditionRow::empty());
    }

    pub fn remove(&mut self, index: usize) -> Option<ConditionRow> {
        if index >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(index);
        self.normalize();
        Some(removed)
    }

    /// Changing the indicator clears a condition chosen for the old one.
    pub fn set_indicator(&mut self, index: usize, indicator_id: Option<&str>) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        let new_id = indicator_id.map(str::to_string);
        if row.indicator_id != new_id {
            row.condition = None;
        }
        row.indicator_id = new_id;
        true
    }

    pub fn set_condition(&mut self, index: usize, condition: Option<&str>) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        row.condition = condition.map(str::to_string);
        true
    }

    /// The first row has no operator, so setting one there is refused.
    pub fn set_operator(&mut self, index: usize, op: LogicOp) -> bool {
        if index == 0 {
            return false;
        }
        match self.rows.get_mut(index) {
            Some(row) => {
                row.operator = Some(op);
                true
            }
            None => false,
        }
    }

    /// Clears every row that references `indicator_id`.
    pub fn clear_indicator(&mut self, indicator_id: &str) {
        for row in &mut self.rows {
            if row.indicator_id.as_deref() == Some(indicator_id) {
                row.indicator_id = None;
                row.condition = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::IndicatorSpec;

    fn catalog() -> ConditionCatalog {
        ConditionCatalog::new(vec![
            IndicatorSpec::new("RSI", "RSI")
                .with_condition("rsi_oversold", "")
                .with_condition("rsi_overbought", ""),
            IndicatorSpec::new("MACD", "MACD").with_condition("macd_cross_up", ""),
        ])
    }

    fn selection() -> Selection {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.add(&catalog, "RSI");
        selection.add(&catalog, "MACD");
        selection
    }

    #[test]
    fn rows_to_expression_flat_join() {
        let rows = vec![
            ConditionRow::new("RSI", "rsi_oversold", None),
            ConditionRow::new("MACD", "macd_cross_up", Some(LogicOp::Or)),
            ConditionRow::new("RSI", "rsi_overbought", Some(LogicOp::And)),
        ];
        assert_eq!(
            rows_to_expression(&rows),
            "rsi_oversold OR macd_cross_up AND rsi_overbought"
        );
    }

    #[test]
    fn rows_to_expression_skips_unset_rows() {
        let rows = vec![
            ConditionRow::empty(),
            ConditionRow::new("MACD", "macd_cross_up", Some(LogicOp::Or)),
            ConditionRow {
                indicator_id: Some("RSI".into()),
                condition: None,
                operator: Some(LogicOp::And),
            },
            ConditionRow::new("RSI", "rsi_oversold", Some(LogicOp::Or)),
        ];
        assert_eq!(rows_to_expression(&rows), "macd_cross_up OR rsi_oversold");
    }

    #[test]
    fn rows_to_expression_empty() {
        assert_eq!(rows_to_expression(&[]), "");
        assert_eq!(rows_to_expression(&[ConditionRow::empty()]), "");
    }

    #[test]
    fn expression_to_rows_round_trip_scenario() {
        let rows = expression_to_rows("rsi_oversold AND macd_cross_up", &selection(), &catalog());
        assert_eq!(
            rows,
            vec![
                ConditionRow::new("RSI", "rsi_oversold", None),
                ConditionRow::new("MACD", "macd_cross_up", Some(LogicOp::And)),
            ]
        );
        assert_eq!(rows_to_expression(&rows), "rsi_oversold AND macd_cross_up");
    }

    #[test]
    fn expression_to_rows_unresolvable_yields_single_empty_row() {
        let rows = expression_to_rows("nothing OR matches", &selection(), &catalog());
        assert_eq!(rows, vec![ConditionRow::empty()]);
    }

    #[test]
    fn expression_to_rows_empty_expression_yields_no_rows() {
        assert!(expression_to_rows("", &selection(), &catalog()).is_empty());
        assert!(expression_to_rows("   ", &selection(), &catalog()).is_empty());
    }

    #[test]
    fn expression_to_rows_drops_parentheses() {
        let rows = expression_to_rows(
            "(rsi_oversold AND rsi_overbought) OR macd_cross_up",
            &selection(),
            &catalog(),
        );
        assert_eq!(
            rows_to_expression(&rows),
            "rsi_oversold AND rsi_overbought OR macd_cross_up"
        );
    }

    #[test]
    fn row_list_push_and_remove_keep_invariant() {
        let mut list = RowList::new();
        list.push(ConditionRow::new("RSI", "rsi_oversold", Some(LogicOp::Or)));
        list.push_empty();
        assert_eq!(list.rows()[0].operator, None);
        assert_eq!(list.rows()[1].operator, Some(LogicOp::And));

        list.set_operator(1, LogicOp::Or);
        list.remove(0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.rows()[0].operator, None);
    }

    #[test]
    fn row_list_set_operator_refuses_first_row() {
        let mut list = RowList::from_rows(vec![
            ConditionRow::new("RSI", "rsi_oversold", None),
            ConditionRow::new("MACD", "macd_cross_up", None),
        ]);
        assert!(!list.set_operator(0, LogicOp::Or));
        assert!(list.set_operator(1, LogicOp::Or));
        assert!(!list.set_operator(5, LogicOp::Or));
        assert_eq!(list.to_expression(), "rsi_oversold OR macd_cross_up");
    }

    #[test]
    fn row_list_set_indicator_clears_condition_on_change() {
        let mut list = RowList::from_rows(vec![ConditionRow::new("RSI", "rsi_oversold", None)]);
        assert!(list.set_indicator(0, Some("RSI")));
        assert_eq!(list.rows()[0].condition.as_deref(), Some("rsi_oversold"));
        assert!(list.set_indicator(0, Some("MACD")));
        assert_eq!(list.rows()[0].condition, None);
        assert!(list.set_condition(0, Some("macd_cross_up")));
        assert_eq!(list.to_expression(), "macd_cross_up");
    }

    #[test]
    fn row_list_clear_indicator() {
        let mut list = RowList::from_rows(vec![
            ConditionRow::new("RSI", "rsi_oversold", None),
            ConditionRow::new("MACD", "macd_cross_up", Some(LogicOp::Or)),
        ]);
        list.clear_indicator("RSI");
        assert_eq!(list.rows()[0], ConditionRow::empty());
        assert_eq!(list.to_expression(), "macd_cross_up");
    }
}
