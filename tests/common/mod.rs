#![allow(dead_code)]

use sigcompose::domain::catalog::{ConditionCatalog, IndicatorSpec};
use sigcompose::domain::graph::{SignalEdge, SignalGraph, SignalNode};
use sigcompose::domain::logic::LogicOp;
use sigcompose::domain::selection::{IndicatorInstance, Selection};
use std::io::Write;

/// Catalog with one single-letter leaf condition per indicator (`A` declares
/// `a1`, `a2`; `B` declares `b1`; ...).
pub fn letter_catalog(ids: &[&str]) -> ConditionCatalog {
    ConditionCatalog::new(
        ids.iter()
            .map(|id| {
                let lower = id.to_lowercase();
                IndicatorSpec::new(id, id)
                    .with_condition(&format!("{lower}1"), "")
                    .with_condition(&format!("{lower}2"), "")
            })
            .collect(),
    )
}

/// RSI/MACD catalog used by the round-trip scenarios.
pub fn rsi_macd_catalog() -> ConditionCatalog {
    ConditionCatalog::new(vec![
        IndicatorSpec::new("RSI", "Relative Strength Index")
            .with_condition("rsi_oversold", "RSI({period}) below {oversold}")
            .with_condition("rsi_overbought", "RSI({period}) above {overbought}")
            .with_parameter("period", 14.0, 2.0, 100.0)
            .with_parameter("oversold", 30.0, 1.0, 50.0)
            .with_parameter("overbought", 70.0, 50.0, 99.0),
        IndicatorSpec::new("MACD", "MACD")
            .with_condition("macd_cross_up", "MACD crosses above signal")
            .with_condition("macd_cross_down", "MACD crosses below signal"),
    ])
}

pub fn select(catalog: &ConditionCatalog, ids: &[&str]) -> Selection {
    ids.iter()
        .filter_map(|id| catalog.indicator(id))
        .map(IndicatorInstance::from_spec)
        .collect()
}

/// Graph whose node ids equal their indicator ids.
pub fn graph(ids: &[&str], edges: &[(&str, &str, LogicOp)]) -> SignalGraph {
    SignalGraph::from_parts(
        ids.iter().map(|id| SignalNode::new(id, id)).collect(),
        edges
            .iter()
            .map(|(from, to, op)| SignalEdge::new(from, to, *op))
            .collect(),
    )
}

pub fn write_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
