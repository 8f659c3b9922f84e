//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::builtin_catalog::BuiltinCatalog;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_catalog_adapter::JsonCatalogAdapter;
use crate::adapters::rows_csv;
use crate::domain::catalog::ConditionCatalog;
use crate::domain::error::SigcomposeError;
use crate::domain::rows::ConditionRow;
use crate::domain::session::{Session, Surface};
use crate::domain::session_config::{build_session, SESSION_SECTION};
use crate::domain::tokenizer::tokenize;
use crate::logging;
use crate::ports::catalog_port::CatalogPort;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "sigcompose", about = "Trading signal expression composer")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical expression of a session
    Compile {
        #[arg(short, long)]
        session: PathBuf,
        /// Surface to compile from (graph, rows or expression)
        #[arg(long)]
        surface: Option<Surface>,
    },
    /// Print the condition rows derived from a session's expression
    Rows {
        #[arg(short, long)]
        session: PathBuf,
        #[arg(long)]
        surface: Option<Surface>,
        /// Emit CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// Print a plain-English description of a session's expression
    Describe {
        #[arg(short, long)]
        session: PathBuf,
        #[arg(long)]
        surface: Option<Surface>,
    },
    /// Show how an expression splits into operators and terms
    Tokenize { expression: String },
    /// Validate a session file
    Validate {
        #[arg(short, long)]
        session: PathBuf,
    },
    /// List indicators and their conditions
    Catalog {
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Compile { session, surface } => run_compile(&session, surface),
        Command::Rows {
            session,
            surface,
            csv,
        } => run_rows(&session, surface, csv),
        Command::Describe { session, surface } => run_describe(&session, surface),
        Command::Tokenize { expression } => run_tokenize(&expression),
        Command::Validate { session } => run_validate(&session),
        Command::Catalog { catalog } => run_catalog(catalog.as_deref()),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SigcomposeError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Loads the catalog named by `[session] catalog`, resolved against the
/// session file's directory, or the built-in catalog when the key is absent.
pub fn load_catalog(
    config: &dyn ConfigPort,
    session_path: &Path,
) -> Result<ConditionCatalog, SigcomposeError> {
    match config.get_string(SESSION_SECTION, "catalog") {
        Some(file) => {
            let file = PathBuf::from(file.trim());
            let path = if file.is_absolute() {
                file
            } else {
                session_path
                    .parent()
                    .map(|dir| dir.join(&file))
                    .unwrap_or(file)
            };
            tracing::debug!(path = %path.display(), "loading catalog file");
            JsonCatalogAdapter::new(path).load_catalog()
        }
        None => BuiltinCatalog.load_catalog(),
    }
}

pub fn load_session(path: &Path) -> Result<Session, ExitCode> {
    let adapter = load_config(path)?;
    let report = |e: SigcomposeError| {
        match &e {
            SigcomposeError::Declaration { input, source, .. } => {
                eprintln!("error: {e}\n{}", source.display_with_context(input));
            }
            _ => eprintln!("error: {e}"),
        }
        ExitCode::from(&e)
    };

    let catalog = load_catalog(&adapter, path).map_err(report)?;
    let session = build_session(&adapter, catalog).map_err(report)?;
    tracing::debug!(
        indicators = session.selection.len(),
        nodes = session.graph.nodes().len(),
        edges = session.graph.edges().len(),
        rows = session.rows.len(),
        surface = %session.surface,
        "session loaded"
    );
    Ok(session)
}

fn run_compile(session_path: &Path, surface: Option<Surface>) -> ExitCode {
    let session = match load_session(session_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let surface = surface.unwrap_or(session.surface);
    println!("{}", session.canonical_expression(surface));
    ExitCode::SUCCESS
}

fn run_rows(session_path: &Path, surface: Option<Surface>, csv: bool) -> ExitCode {
    let session = match load_session(session_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let surface = surface.unwrap_or(session.surface);
    let rows = session.rows_view(surface);

    if csv {
        if let Err(e) = rows_csv::write_rows(rows.rows(), io::stdout().lock()) {
            eprintln!("error: {e}");
            return (&e).into();
        }
    } else {
        for (index, row) in rows.rows().iter().enumerate() {
            println!("{}", format_row(index, row));
        }
    }
    ExitCode::SUCCESS
}

pub fn format_row(index: usize, row: &ConditionRow) -> String {
    let op = row.operator.map(|op| op.keyword()).unwrap_or("");
    format!(
        "{:>3}  {:<3}  {}:{}",
        index,
        op,
        row.indicator_id.as_deref().unwrap_or("-"),
        row.condition.as_deref().unwrap_or("-")
    )
}

fn run_describe(session_path: &Path, surface: Option<Surface>) -> ExitCode {
    let session = match load_session(session_path) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let surface = surface.unwrap_or(session.surface);
    println!("{}", session.describe(surface));
    ExitCode::SUCCESS
}

fn run_tokenize(expression: &str) -> ExitCode {
    for token in tokenize(expression) {
        println!("{token}");
    }
    ExitCode::SUCCESS
}

fn run_validate(session_path: &Path) -> ExitCode {
    eprintln!("Validating session: {}", session_path.display());
    let session = match load_session(session_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    eprintln!(
        "  Indicators: {}",
        session.selection.ids().collect::<Vec<_>>().join(", ")
    );
    eprintln!(
        "  Graph:      {} nodes, {} edges",
        session.graph.nodes().len(),
        session.graph.edges().len()
    );
    eprintln!("  Rows:       {}", session.rows.len());
    eprintln!("  Surface:    {}", session.surface);
    eprintln!(
        "  Expression: {}",
        session.canonical_expression(session.surface)
    );
    eprintln!("\nSession is valid.");
    ExitCode::SUCCESS
}

fn run_catalog(catalog_path: Option<&Path>) -> ExitCode {
    let loaded = match catalog_path {
        Some(path) => JsonCatalogAdapter::new(path).load_catalog(),
        None => BuiltinCatalog.load_catalog(),
    };
    let catalog = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for spec in catalog.indicators() {
        if spec.name.is_empty() {
            println!("{}", spec.id);
        } else {
            println!("{} ({})", spec.id, spec.name);
        }
        for param in &spec.parameters {
            println!(
                "    param {} = {} [{}, {}]",
                param.name, param.default, param.min, param.max
            );
        }
        for condition in &spec.conditions {
            if condition.description.is_empty() {
                println!("    {}", condition.name);
            } else {
                println!("    {:<28} {}", condition.name, condition.description);
            }
        }
    }
    ExitCode::SUCCESS
}
