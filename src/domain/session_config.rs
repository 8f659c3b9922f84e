//! Session configuration: builds and validates a [`Session`] from a config
//! source.
//!
//! ```ini
//! [session]
//! indicators = RSI, MACD
//! expression = rsi_oversold AND macd_cross_up
//! rows = RSI:rsi_oversold, AND MACD:macd_cross_up
//! surface = rows
//!
//! [params.RSI]
//! period = 10
//!
//! [graph]
//! nodes = n1:RSI, n2:MACD
//! edges = n1->n2:AND
//! ```

use crate::domain::catalog::ConditionCatalog;
use crate::domain::declaration::{parse_edges, parse_nodes, parse_rows};
use crate::domain::error::{DeclarationError, SigcomposeError};
use crate::domain::graph::{SignalGraph, SignalNode};
use crate::domain::rows::RowList;
use crate::domain::session::{Session, Surface};
use crate::ports::config_port::ConfigPort;

pub const SESSION_SECTION: &str = "session";
pub const GRAPH_SECTION: &str = "graph";

pub const PARAMS_PREFIX: &str = "params.";

pub fn params_section(indicator_id: &str) -> String {
    format!("{}{}", PARAMS_PREFIX, indicator_id)
}

pub fn validate_session_config(
    config: &dyn ConfigPort,
    catalog: &ConditionCatalog,
) -> Result<(), SigcomposeError> {
    build_session(config, catalog.clone()).map(|_| ())
}

pub fn build_session(
    config: &dyn ConfigPort,
    catalog: ConditionCatalog,
) -> Result<Session, SigcomposeError> {
    let mut session = Session::new(catalog);

    for id in parse_indicator_list(config)? {
        if !session.catalog.contains(&id) {
            return Err(SigcomposeError::UnknownIndicator { id });
        }
        if !session.selection.add(&session.catalog, &id) {
            return Err(invalid(
                SESSION_SECTION,
                "indicators",
                format!("indicator '{}' is selected twice", id),
            ));
        }
    }

    apply_params(config, &mut session)?;
    session.graph = build_graph(config, &session)?;
    session.rows = build_rows(config, &session)?;
    session.expression = config
        .get_string(SESSION_SECTION, "expression")
        .unwrap_or_default();
    session.surface = resolve_surface(config)?;

    Ok(session)
}

fn invalid(section: &str, key: &str, reason: String) -> SigcomposeError {
    SigcomposeError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn declaration(section: &str, key: &str, input: &str, source: DeclarationError) -> SigcomposeError {
    SigcomposeError::Declaration {
        section: section.to_string(),
        key: key.to_string(),
        input: input.to_string(),
        source,
    }
}

fn parse_indicator_list(config: &dyn ConfigPort) -> Result<Vec<String>, SigcomposeError> {
    let raw = config
        .get_string(SESSION_SECTION, "indicators")
        .ok_or_else(|| SigcomposeError::ConfigMissing {
            section: SESSION_SECTION.to_string(),
            key: "indicators".to_string(),
        })?;

    let mut ids = Vec::new();
    for token in raw.split(',') {
        let id = token.trim();
        if id.is_empty() {
            return Err(invalid(
                SESSION_SECTION,
                "indicators",
                "empty entry in indicator list".to_string(),
            ));
        }
        ids.push(id.to_string());
    }
    Ok(ids)
}

fn apply_params(config: &dyn ConfigPort, session: &mut Session) -> Result<(), SigcomposeError> {
    for section in config.sections() {
        let Some(id) = section.strip_prefix(PARAMS_PREFIX) else {
            continue;
        };
        if !session.selection.contains(id) {
            return Err(invalid(
                &section,
                "*",
                format!("parameters given for unselected indicator '{}'", id),
            ));
        }
    }

    let ids: Vec<String> = session.selection.ids().map(str::to_string).collect();

    for id in ids {
        let section = params_section(&id);
        for key in config.keys(&section) {
            let raw = config.get_string(&section, &key).unwrap_or_default();
            let value: f64 = raw.trim().parse().map_err(|_| {
                invalid(&section, &key, format!("'{}' is not a number", raw.trim()))
            })?;
            let accepted = session
                .selection
                .get_mut(&id)
                .is_some_and(|instance| instance.set_param(&session.catalog, &key, value));
            if !accepted {
                return Err(invalid(
                    &section,
                    &key,
                    format!("indicator '{}' has no parameter '{}'", id, key),
                ));
            }
        }
    }
    Ok(())
}

fn build_graph(config: &dyn ConfigPort, session: &Session) -> Result<SignalGraph, SigcomposeError> {
    let mut graph = SignalGraph::new();

    match config.get_string(GRAPH_SECTION, "nodes") {
        Some(raw) => {
            let nodes =
                parse_nodes(&raw).map_err(|e| declaration(GRAPH_SECTION, "nodes", &raw, e))?;
            for node in nodes {
                if !session.selection.contains(&node.indicator_id) {
                    return Err(invalid(
                        GRAPH_SECTION,
                        "nodes",
                        format!(
                            "node '{}' uses unselected indicator '{}'",
                            node.id, node.indicator_id
                        ),
                    ));
                }
                let id = node.id.clone();
                if !graph.add_node(node) {
                    return Err(invalid(
                        GRAPH_SECTION,
                        "nodes",
                        format!("node '{}' duplicates an existing node or indicator", id),
                    ));
                }
            }
        }
        None => {
            for id in session.selection.ids() {
                graph.add_node(SignalNode::new(id, id));
            }
        }
    }

    if let Some(raw) = config.get_string(GRAPH_SECTION, "edges") {
        let edges = parse_edges(&raw).map_err(|e| declaration(GRAPH_SECTION, "edges", &raw, e))?;
        for edge in edges {
            if !graph.connect(&edge.from, &edge.to, edge.op) {
                return Err(invalid(
                    GRAPH_SECTION,
                    "edges",
                    format!(
                        "cannot connect '{}' -> '{}' (unknown node, self-loop or duplicate)",
                        edge.from, edge.to
                    ),
                ));
            }
        }
    }

    Ok(graph)
}

fn build_rows(config: &dyn ConfigPort, session: &Session) -> Result<RowList, SigcomposeError> {
    let Some(raw) = config.get_string(SESSION_SECTION, "rows") else {
        return Ok(RowList::new());
    };
    let rows = parse_rows(&raw).map_err(|e| declaration(SESSION_SECTION, "rows", &raw, e))?;

    for row in &rows {
        let indicator = row.indicator_id.as_deref().unwrap_or_default();
        let condition = row.condition.as_deref().unwrap_or_default();
        if !session.selection.contains(indicator) {
            return Err(invalid(
                SESSION_SECTION,
                "rows",
                format!("row uses unselected indicator '{}'", indicator),
            ));
        }
        if !session.catalog.has_condition(indicator, condition) {
            return Err(invalid(
                SESSION_SECTION,
                "rows",
                format!("indicator '{}' has no condition '{}'", indicator, condition),
            ));
        }
    }

    Ok(RowList::from_rows(rows))
}

fn resolve_surface(config: &dyn ConfigPort) -> Result<Surface, SigcomposeError> {
    if let Some(raw) = config.get_string(SESSION_SECTION, "surface") {
        return raw
            .parse()
            .map_err(|reason| invalid(SESSION_SECTION, "surface", reason));
    }

    let has = |section: &str, key: &str| config.get_string(section, key).is_some();
    let surface = if has(SESSION_SECTION, "expression") {
        Surface::Expression
    } else if has(SESSION_SECTION, "rows") {
        Surface::Rows
    } else if has(GRAPH_SECTION, "edges") {
        Surface::Graph
    } else {
        Surface::Expression
    };
    Ok(surface)
}
