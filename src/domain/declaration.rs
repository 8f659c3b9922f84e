//! Parser for the compact list declarations used in session files.
//!
//! ```text
//! nodes = n1:RSI, n2:MACD
//! edges = n1->n2:AND, n2->n3
//! rows  = RSI:rsi_oversold, OR MACD:macd_cross_up
//! ```
//!
//! Lists are comma separated and may be empty. An edge without an operator
//! defaults to AND. Errors carry the character offset of the problem.

use crate::domain::error::DeclarationError;
use crate::domain::graph::{SignalEdge, SignalNode};
use crate::domain::logic::LogicOp;
use crate::domain::rows::ConditionRow;

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.input.len()
    }

    fn error(&self, message: String) -> DeclarationError {
        DeclarationError {
            message,
            position: self.pos,
        }
    }

    fn found(&self) -> String {
        self.peek()
            .map(|c| format!("'{}'", c))
            .unwrap_or_else(|| "end of input".to_string())
    }

    fn expect_char(&mut self, expected: char) -> Result<(), DeclarationError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(format!("expected '{}', found {}", expected, self.found()))),
        }
    }

    fn consume_exact(&mut self, s: &str) -> bool {
        if self.remaining().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn peek_word(&self) -> &'a str {
        let remaining = self.remaining();
        let end = remaining
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(remaining.len());
        &remaining[..end]
    }

    fn parse_ident(&mut self, what: &str) -> Result<String, DeclarationError> {
        self.skip_whitespace();
        let word = self.peek_word();
        if word.is_empty() {
            return Err(self.error(format!("expected {}, found {}", what, self.found())));
        }
        self.pos += word.len();
        Ok(word.to_string())
    }

    fn parse_operator(&mut self) -> Result<LogicOp, DeclarationError> {
        self.skip_whitespace();
        let start = self.pos;
        let word = self.peek_word();
        match word.parse::<LogicOp>() {
            Ok(op) => {
                self.pos += word.len();
                Ok(op)
            }
            Err(_) => Err(DeclarationError {
                message: format!("expected AND or OR, found '{}'", word),
                position: start,
            }),
        }
    }

    /// Leading `AND ` / `OR ` keyword, only when followed by whitespace.
    fn parse_leading_operator(&mut self) -> Option<LogicOp> {
        self.skip_whitespace();
        let word = self.peek_word();
        let op = word.parse::<LogicOp>().ok()?;
        let after = self.remaining()[word.len()..].chars().next();
        if after.is_some_and(char::is_whitespace) {
            self.pos += word.len();
            Some(op)
        } else {
            None
        }
    }

    fn parse_node(&mut self) -> Result<SignalNode, DeclarationError> {
        let id = self.parse_ident("node id")?;
        self.expect_char(':')?;
        let indicator = self.parse_ident("indicator id")?;
        Ok(SignalNode::new(&id, &indicator))
    }

    fn parse_edge(&mut self) -> Result<SignalEdge, DeclarationError> {
        let from = self.parse_ident("node id")?;
        self.skip_whitespace();
        if !self.consume_exact("->") {
            return Err(self.error(format!("expected '->', found {}", self.found())));
        }
        let to = self.parse_ident("node id")?;
        self.skip_whitespace();
        let op = if self.peek() == Some(':') {
            self.advance();
            self.parse_operator()?
        } else {
            LogicOp::And
        };
        Ok(SignalEdge::new(&from, &to, op))
    }

    fn parse_row(&mut self) -> Result<ConditionRow, DeclarationError> {
        let operator = self.parse_leading_operator();
        let indicator = self.parse_ident("indicator id")?;
        self.expect_char(':')?;
        let condition = self.parse_ident("condition name")?;
        Ok(ConditionRow::new(&indicator, &condition, operator))
    }

    fn parse_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, DeclarationError>,
    ) -> Result<Vec<T>, DeclarationError> {
        let mut items = Vec::new();
        if self.at_end() {
            return Ok(items);
        }
        loop {
            items.push(item(self)?);
            if self.at_end() {
                return Ok(items);
            }
            self.expect_char(',')?;
        }
    }
}

pub fn parse_nodes(input: &str) -> Result<Vec<SignalNode>, DeclarationError> {
    Parser::new(input).parse_list(Parser::parse_node)
}

pub fn parse_edges(input: &str) -> Result<Vec<SignalEdge>, DeclarationError> {
    Parser::new(input).parse_list(Parser::parse_edge)
}

pub fn parse_rows(input: &str) -> Result<Vec<ConditionRow>, DeclarationError> {
    Parser::new(input).parse_list(Parser::parse_row)
}
