//! Core domain types and logic.

pub mod logic;
pub mod catalog;
pub mod selection;
pub mod tokenizer;
pub mod resolver;
pub mod rows;
pub mod graph;
pub mod narrative;
pub mod declaration;
pub mod session;
pub mod session_config;
pub mod error;
