//! Logical operators joining conditions (AND / OR).

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    /// Canonical upper-case keyword used in expressions.
    pub fn keyword(self) -> &'static str {
        match self {
            LogicOp::And => "AND",
            LogicOp::Or => "OR",
        }
    }

    /// Lower-case word used when composing sentences.
    pub fn word(self) -> &'static str {
        match self {
            LogicOp::And => "and",
            LogicOp::Or => "or",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            LogicOp::And => LogicOp::Or,
            LogicOp::Or => LogicOp::And,
        }
    }
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown logical operator '{0}' (expected AND or OR)")]
pub struct UnknownOperator(pub String);

impl FromStr for LogicOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(LogicOp::And),
            "OR" => Ok(LogicOp::Or),
            _ => Err(UnknownOperator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_keyword() {
        assert_eq!(LogicOp::And.to_string(), "AND");
        assert_eq!(LogicOp::Or.to_string(), "OR");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("and".parse::<LogicOp>().unwrap(), LogicOp::And);
        assert_eq!(" Or ".parse::<LogicOp>().unwrap(), LogicOp::Or);
    }

    #[test]
    fn parse_rejects_other_words() {
        let err = "NOT".parse::<LogicOp>().unwrap_err();
        assert_eq!(err, UnknownOperator("NOT".to_string()));
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(LogicOp::And.toggled(), LogicOp::Or);
        assert_eq!(LogicOp::Or.toggled(), LogicOp::And);
    }
}
