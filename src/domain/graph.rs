//! Signal graph: indicator nodes joined by AND/OR edges.
//!
//! An edge `from -> to` says how the source's contribution combines into the
//! target's aggregate. Synthesis walks incoming edges recursively with one
//! visited set per call, which both breaks cycles and stops a node reachable
//! along several paths from being expanded twice.

use crate::domain::catalog::ConditionCatalog;
use crate::domain::logic::LogicOp;
use crate::domain::resolver::resolve_expression;
use crate::domain::selection::Selection;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalNode {
    pub id: String,
    pub indicator_id: String,
}

impl SignalNode {
    pub fn new(id: &str, indicator_id: &str) -> Self {
        Self {
            id: id.to_string(),
            indicator_id: indicator_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalEdge {
    pub from: String,
    pub to: String,
    pub op: LogicOp,
}

impl SignalEdge {
    pub fn new(from: &str, to: &str, op: LogicOp) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            op,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalGraph {
    nodes: Vec<SignalNode>,
    edges: Vec<SignalEdge>,
}

impl SignalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph as given, without the editing checks.
    pub fn from_parts(nodes: Vec<SignalNode>, edges: Vec<SignalEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[SignalNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[SignalEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&SignalNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_for_indicator(&self, indicator_id: &str) -> Option<&SignalNode> {
        self.nodes.iter().find(|n| n.indicator_id == indicator_id)
    }

    /// Adds a node. Refuses a duplicate node id, and an indicator that already
    /// backs another node.
    pub fn add_node(&mut self, node: SignalNode) -> bool {
        if self.node(&node.id).is_some() || self.node_for_indicator(&node.indicator_id).is_some() {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Removes a node together with every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> Option<SignalNode> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        self.edges.retain(|e| e.from != id && e.to != id);
        Some(self.nodes.remove(index))
    }

    /// Connects two existing, distinct nodes. A second edge for the same
    /// ordered pair is refused.
    pub fn connect(&mut self, from: &str, to: &str, op: LogicOp) -> bool {
        if from == to || self.node(from).is_none() || self.node(to).is_none() {
            return false;
        }
        if self.edge(from, to).is_some() {
            return false;
        }
        self.edges.push(SignalEdge::new(from, to, op));
        true
    }

    pub fn disconnect(&mut self, from: &str, to: &str) -> Option<SignalEdge> {
        let index = self
            .edges
            .iter()
            .position(|e| e.from == from && e.to == to)?;
        Some(self.edges.remove(index))
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&SignalEdge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }

    pub fn set_operator(&mut self, from: &str, to: &str, op: LogicOp) -> bool {
        match self
            .edges
            .iter_mut()
            .find(|e| e.from == from && e.to == to)
        {
            Some(edge) => {
                edge.op = op;
                true
            }
            None => false,
        }
    }

    pub fn toggle_operator(&mut self, from: &str, to: &str) -> Option<LogicOp> {
        let edge = self
            .edges
            .iter_mut()
            .find(|e| e.from == from && e.to == to)?;
        edge.op = edge.op.toggled();
        Some(edge.op)
    }

    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a SignalEdge> + 'a {
        self.edges.iter().filter(move |e| e.to == id)
    }

    /// Nodes with no incoming edge, in insertion order.
    pub fn entry_nodes(&self) -> Vec<&SignalNode> {
        self.nodes
            .iter()
            .filter(|n| !self.edges.iter().any(|e| e.to == n.id))
            .collect()
    }

    pub fn synthesize(&self, catalog: &ConditionCatalog) -> String {
        synthesize(self, catalog)
    }
}

/// Graph -> expression.
///
/// - No edges: every node's first condition, joined with AND.
/// - Edges and at least one entry node: each entry node synthesized in
///   insertion order with a shared visited set, joined with AND.
/// - Edges but no entry node: synthesis from the node with the lowest id.
pub fn synthesize(graph: &SignalGraph, catalog: &ConditionCatalog) -> String {
    if graph.edges.is_empty() {
        debug!(nodes = graph.nodes.len(), "graph has no edges, joining leaf conditions");
        return graph
            .nodes
            .iter()
            .filter_map(|n| catalog.first_condition(&n.indicator_id))
            .collect::<Vec<_>>()
            .join(" AND ");
    }

    let mut visited = HashSet::new();
    let entries = graph.entry_nodes();

    if entries.is_empty() {
        let Some(start) = graph.nodes.iter().min_by(|a, b| a.id.cmp(&b.id)) else {
            return String::new();
        };
        debug!(node = %start.id, "graph has no entry node, expanding lowest node id only");
        return synthesize_node(graph, catalog, &start.id, &mut visited);
    }

    entries
        .iter()
        .map(|n| synthesize_node(graph, catalog, &n.id, &mut visited))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Synthesizes one node's contribution. Returns `""` for a node already in
/// `visited`, for an unknown node, and for a leaf whose indicator declares no
/// conditions.
pub fn synthesize_node(
    graph: &SignalGraph,
    catalog: &ConditionCatalog,
    node_id: &str,
    visited: &mut HashSet<String>,
) -> String {
    if !visited.insert(node_id.to_string()) {
        return String::new();
    }

    let incoming: Vec<&SignalEdge> = graph.incoming(node_id).collect();

    if incoming.is_empty() {
        return graph
            .node(node_id)
            .and_then(|n| catalog.first_condition(&n.indicator_id))
            .unwrap_or_default()
            .to_string();
    }

    let mut and_bucket: Vec<String> = Vec::new();
    let mut or_bucket: Vec<String> = Vec::new();

    for edge in incoming {
        let part = synthesize_node(graph, catalog, &edge.from, visited);
        if part.is_empty() {
            continue;
        }
        match edge.op {
            LogicOp::And => and_bucket.push(part),
            LogicOp::Or => or_bucket.push(part),
        }
    }

    combine_buckets(&and_bucket, &or_bucket)
}

/// Best-effort expression -> graph.
///
/// One node per resolved indicator in first-appearance order, reusing the id
/// of the node that backed the indicator in `previous`. Consecutive resolved
/// terms are chained `earlier -> later` with the later term's operator; a link
/// that would duplicate an edge or close a self-loop is skipped. Unresolved
/// terms are dropped. Grouping is not recovered, and synthesizing the result
/// does not reproduce the text (leaves contribute their first condition).
///
/// When nothing resolves, every selected indicator gets an unconnected node.
pub fn expression_to_graph(
    expression: &str,
    selection: &Selection,
    catalog: &ConditionCatalog,
    previous: &SignalGraph,
) -> SignalGraph {
    let mut graph = SignalGraph::new();
    let terms = resolve_expression(expression, selection, catalog);

    if terms.is_empty() {
        debug!(expression, "no term resolved, rebuilding an unconnected graph");
        for id in selection.ids() {
            add_backing_node(&mut graph, previous, id);
        }
        return graph;
    }

    let mut last: Option<String> = None;
    for term in terms {
        let indicator = term.resolved.indicator_id.as_str();
        let node_id = match graph.node_for_indicator(indicator) {
            Some(node) => node.id.clone(),
            None => match add_backing_node(&mut graph, previous, indicator) {
                Some(id) => id,
                None => {
                    debug!(indicator, "no free node id, dropping term from graph");
                    continue;
                }
            },
        };

        if let Some(from) = last.as_deref() {
            let op = term.operator.unwrap_or(LogicOp::And);
            if !graph.connect(from, &node_id, op) {
                debug!(from, to = %node_id, "skipping repeated or self link");
            }
        }
        last = Some(node_id);
    }

    graph
}

/// Adds a node for `indicator`, preferring the id it had in `previous`, then
/// the indicator id itself.
fn add_backing_node(graph: &mut SignalGraph, previous: &SignalGraph, indicator: &str) -> Option<String> {
    let preferred = previous.node_for_indicator(indicator).map(|n| n.id.as_str());
    preferred
        .into_iter()
        .chain(std::iter::once(indicator))
        .find(|id| graph.add_node(SignalNode::new(id, indicator)))
        .map(str::to_string)
}

fn combine_buckets(and_bucket: &[String], or_bucket: &[String]) -> String {
    let and_part = and_bucket.join(" AND ");
    let or_part = or_bucket.join(" OR ");

    match (and_bucket.is_empty(), or_bucket.is_empty()) {
        (true, true) => String::new(),
        (false, true) => and_part,
        (true, false) => or_part,
        (false, false) => format!(
            "{} AND {}",
            group(and_part, and_bucket.len()),
            group(or_part, or_bucket.len())
        ),
    }
}

fn group(joined: String, count: usize) -> String {
    if count > 1 {
        format!("({joined})")
    } else {
        joined
    }
}
