//! JSON condition catalog adapter.

use crate::domain::catalog::ConditionCatalog;
use crate::domain::error::SigcomposeError;
use crate::ports::catalog_port::CatalogPort;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

pub struct JsonCatalogAdapter {
    path: PathBuf,
}

impl JsonCatalogAdapter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Parses catalog JSON. `source_name` only labels errors.
    pub fn parse(content: &str, source_name: &str) -> Result<ConditionCatalog, SigcomposeError> {
        let catalog: ConditionCatalog =
            serde_json::from_str(content).map_err(|e| SigcomposeError::CatalogParse {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;
        check_catalog(&catalog, source_name)?;
        Ok(catalog)
    }
}

impl CatalogPort for JsonCatalogAdapter {
    fn load_catalog(&self) -> Result<ConditionCatalog, SigcomposeError> {
        let content = fs::read_to_string(&self.path)?;
        Self::parse(&content, &self.path.display().to_string())
    }
}

fn check_catalog(catalog: &ConditionCatalog, source_name: &str) -> Result<(), SigcomposeError> {
    let invalid = |reason: String| SigcomposeError::CatalogParse {
        source_name: source_name.to_string(),
        reason,
    };

    let mut ids = HashSet::new();
    for spec in catalog.indicators() {
        if spec.id.trim().is_empty() {
            return Err(invalid("indicator with empty id".to_string()));
        }
        if !ids.insert(spec.id.as_str()) {
            return Err(invalid(format!("duplicate indicator id '{}'", spec.id)));
        }

        let mut names = HashSet::new();
        for condition in &spec.conditions {
            if !names.insert(condition.name.as_str()) {
                return Err(invalid(format!(
                    "duplicate condition '{}' in indicator '{}'",
                    condition.name, spec.id
                )));
            }
        }

        for param in &spec.parameters {
            if param.min > param.max || param.default < param.min || param.default > param.max {
                return Err(invalid(format!(
                    "parameter '{}' of '{}' has default {} outside [{}, {}]",
                    param.name, spec.id, param.default, param.min, param.max
                )));
            }
        }
    }
    Ok(())
}
