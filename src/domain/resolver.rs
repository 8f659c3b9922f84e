//! Condition resolution: attributes a bare term to a selected indicator.
//!
//! Resolution tries an exact match across the whole selection first, then a
//! case-insensitive one. In both passes the earliest selected indicator that
//! declares the name wins. Unresolved terms are dropped by the callers here;
//! nothing in this module reports an error.

use crate::domain::catalog::ConditionCatalog;
use crate::domain::logic::LogicOp;
use crate::domain::selection::Selection;
use crate::domain::tokenizer::{Token, tokenize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCondition {
    pub indicator_id: String,
    /// Catalog spelling of the condition, even when matched case-insensitively.
    pub condition: String,
}

/// A resolved term paired with the operator token that preceded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTerm {
    pub operator: Option<LogicOp>,
    pub resolved: ResolvedCondition,
}

pub fn resolve(
    term: &str,
    selection: &Selection,
    catalog: &ConditionCatalog,
) -> Option<ResolvedCondition> {
    let exact = selection.ids().find_map(|id| {
        catalog
            .conditions(id)
            .iter()
            .find(|c| c.name == term)
            .map(|c| (id, c))
    });

    let found = exact.or_else(|| {
        let lowered = term.to_lowercase();
        selection.ids().find_map(|id| {
            catalog
                .conditions(id)
                .iter()
                .find(|c| c.name.to_lowercase() == lowered)
                .map(|c| (id, c))
        })
    });

    found.map(|(id, c)| ResolvedCondition {
        indicator_id: id.to_string(),
        condition: c.name.clone(),
    })
}

/// Tokenizes and resolves an expression, keeping only resolvable terms.
///
/// Each kept term carries the operator token immediately before it; the first
/// kept term always carries `None`, however many unresolved terms precede it.
pub fn resolve_expression(
    expression: &str,
    selection: &Selection,
    catalog: &ConditionCatalog,
) -> Vec<ResolvedTerm> {
    let mut resolved_terms: Vec<ResolvedTerm> = Vec::new();
    let mut pending_op: Option<LogicOp> = None;

    for token in tokenize(expression) {
        match token {
            Token::Operator(op) => pending_op = Some(op),
            Token::Term(text) => {
                match resolve(&text, selection, catalog) {
                    Some(resolved) => {
                        let operator = if resolved_terms.is_empty() {
                            None
                        } else {
                            Some(pending_op.unwrap_or(LogicOp::And))
                        };
                        resolved_terms.push(ResolvedTerm { operator, resolved });
                    }
                    None => debug!(term = %text, "dropping unresolved term"),
                }
                pending_op = None;
            }
        }
    }

    resolved_terms
}
