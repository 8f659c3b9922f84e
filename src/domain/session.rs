//! Strategy session: the three editing surfaces over one selection.
//!
//! Whichever surface was edited last produces the canonical expression; the
//! other surfaces are re-derived from that string.

use crate::domain::catalog::ConditionCatalog;
use crate::domain::graph::{SignalGraph, SignalNode, expression_to_graph};
use crate::domain::narrative;
use crate::domain::rows::RowList;
use crate::domain::selection::Selection;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Surface {
    Graph,
    Rows,
    #[default]
    Expression,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Surface::Graph => "graph",
            Surface::Rows => "rows",
            Surface::Expression => "expression",
        };
        f.write_str(name)
    }
}

impl FromStr for Surface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graph" => Ok(Surface::Graph),
            "rows" => Ok(Surface::Rows),
            "expression" => Ok(Surface::Expression),
            other => Err(format!(
                "unknown surface '{}' (expected graph, rows or expression)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub catalog: ConditionCatalog,
    pub selection: Selection,
    pub graph: SignalGraph,
    pub rows: RowList,
    pub expression: String,
    pub surface: Surface,
}

impl Session {
    pub fn new(catalog: ConditionCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Selects an indicator and gives it a graph node whose id is the
    /// indicator id. Returns `false` for unknown or already selected ids.
    pub fn add_indicator(&mut self, id: &str) -> bool {
        if !self.selection.add(&self.catalog, id) {
            return false;
        }
        if self.graph.node(id).is_none() {
            self.graph.add_node(SignalNode::new(id, id));
        }
        true
    }

    /// Deselects an indicator, removing the node backed by it (with its
    /// edges) and clearing rows that reference it.
    pub fn remove_indicator(&mut self, id: &str) -> bool {
        if self.selection.remove(id).is_none() {
            return false;
        }
        let backing: Vec<String> = self
            .graph
            .nodes()
            .iter()
            .filter(|n| n.indicator_id == id)
            .map(|n| n.id.clone())
            .collect();
        for node_id in backing {
            self.graph.remove_node(&node_id);
        }
        self.rows.clear_indicator(id);
        true
    }

    pub fn canonical_expression(&self, surface: Surface) -> String {
        match surface {
            Surface::Graph => self.graph.synthesize(&self.catalog),
            Surface::Rows => self.rows.to_expression(),
            Surface::Expression => self.expression.trim().to_string(),
        }
    }

    pub fn rows_view(&self, surface: Surface) -> RowList {
        RowList::from_expression(
            &self.canonical_expression(surface),
            &self.selection,
            &self.catalog,
        )
    }

    pub fn describe(&self, surface: Surface) -> String {
        narrative::describe(
            &self.canonical_expression(surface),
            &self.selection,
            &self.catalog,
        )
    }

    /// Makes `surface` authoritative: stores its canonical expression and
    /// re-derives the row list from it. Unless the graph itself is the source,
    /// the graph is rebuilt from the expression as a flat chain.
    pub fn sync_from(&mut self, surface: Surface) -> String {
        let expression = self.canonical_expression(surface);
        self.rows = RowList::from_expression(&expression, &self.selection, &self.catalog);
        if surface != Surface::Graph {
            self.graph =
                expression_to_graph(&expression, &self.selection, &self.catalog, &self.graph);
        }
        self.expression = expression.clone();
        self.surface = surface;
        expression
    }
}
