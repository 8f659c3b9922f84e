//! Condition catalog source port trait.

use crate::domain::catalog::ConditionCatalog;
use crate::domain::error::SigcomposeError;

pub trait CatalogPort {
    fn load_catalog(&self) -> Result<ConditionCatalog, SigcomposeError>;
}
