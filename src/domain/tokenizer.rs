//! Expression tokenizer.
//!
//! Splits a raw expression on whitespace-delimited `AND` / `OR` keywords
//! (case-insensitive), keeping the operators as tokens. Parentheses are
//! stripped from terms and empty segments are dropped, so malformed input
//! yields fewer tokens instead of an error.

use crate::domain::logic::LogicOp;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static OPERATOR_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(AND|OR)\s+").expect("operator pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Operator(LogicOp),
    Term(String),
}

impl Token {
    pub fn term(&self) -> Option<&str> {
        match self {
            Token::Term(text) => Some(text),
            Token::Operator(_) => None,
        }
    }

    pub fn operator(&self) -> Option<LogicOp> {
        match self {
            Token::Operator(op) => Some(*op),
            Token::Term(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "OP {}", op),
            Token::Term(text) => write!(f, "TERM {}", text),
        }
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in OPERATOR_SPLIT.captures_iter(input) {
        let (Some(whole), Some(keyword)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_term(&mut tokens, &input[last..whole.start()]);
        if let Ok(op) = keyword.as_str().parse::<LogicOp>() {
            tokens.push(Token::Operator(op));
        }
        last = whole.end();
    }
    push_term(&mut tokens, &input[last..]);

    tokens
}

fn push_term(tokens: &mut Vec<Token>, segment: &str) {
    let cleaned: String = segment.chars().filter(|c| *c != '(' && *c != ')').collect();
    let cleaned = cleaned.trim();
    if !cleaned.is_empty() {
        tokens.push(Token::Term(cleaned.to_string()));
    }
}
