//! Error types for the configuration and catalog boundary.
//!
//! The expression compiler itself never fails; these errors only arise while
//! loading catalogs and session files.

/// A declaration parse error with position information (node, edge and row
/// lists in session files).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct DeclarationError {
    pub message: String,
    pub position: usize,
}

impl DeclarationError {
    /// Format the error with a caret pointing at the error position in the input.
    /// `position` is a byte offset; the caret is placed by character.
    pub fn display_with_context(&self, input: &str) -> String {
        let column = input
            .get(..self.position)
            .map_or(self.position, |prefix| prefix.chars().count());
        let caret = " ".repeat(column) + "^";
        format!(
            "{input}\n{caret}\n{err}",
            input = input,
            caret = caret,
            err = self
        )
    }
}

/// Top-level error type for sigcompose.
#[derive(Debug, thiserror::Error)]
pub enum SigcomposeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("catalog error in {source_name}: {reason}")]
    CatalogParse { source_name: String, reason: String },

    #[error("unknown indicator '{id}'")]
    UnknownIndicator { id: String },

    #[error("invalid declaration [{section}] {key}: {source}")]
    Declaration {
        section: String,
        key: String,
        input: String,
        source: DeclarationError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SigcomposeError> for std::process::ExitCode {
    fn from(err: &SigcomposeError) -> Self {
        let code: u8 = match err {
            SigcomposeError::Io(_) => 1,
            SigcomposeError::ConfigParse { .. }
            | SigcomposeError::ConfigMissing { .. }
            | SigcomposeError::ConfigInvalid { .. } => 2,
            SigcomposeError::CatalogParse { .. } => 3,
            SigcomposeError::UnknownIndicator { .. } | SigcomposeError::Declaration { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
