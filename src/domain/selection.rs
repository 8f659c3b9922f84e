//! Selected indicator instances and their bound parameter values.
//!
//! Selection order matters: the resolver attributes a bare condition name to
//! the earliest selected indicator that declares it.

use crate::domain::catalog::{ConditionCatalog, IndicatorSpec};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorInstance {
    pub id: String,
    pub params: BTreeMap<String, f64>,
}

impl IndicatorInstance {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            params: BTreeMap::new(),
        }
    }

    /// Binds every catalog parameter to its default value.
    pub fn from_spec(spec: &IndicatorSpec) -> Self {
        let params = spec
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.default))
            .collect();
        Self {
            id: spec.id.clone(),
            params,
        }
    }

    pub fn with_param(mut self, name: &str, value: f64) -> Self {
        self.params.insert(name.to_string(), value);
        self
    }

    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }

    /// Sets a catalog-declared parameter, clamped to its `[min, max]` range.
    /// Returns `false` (and changes nothing) for parameters the catalog does
    /// not declare for this indicator.
    pub fn set_param(&mut self, catalog: &ConditionCatalog, name: &str, value: f64) -> bool {
        match catalog.parameter(&self.id, name) {
            Some(spec) => {
                self.params.insert(name.to_string(), spec.clamp(value));
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    instances: Vec<IndicatorInstance>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `id` with catalog defaults. Unknown and already-selected ids
    /// are rejected.
    pub fn add(&mut self, catalog: &ConditionCatalog, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        match catalog.indicator(id) {
            Some(spec) => {
                self.instances.push(IndicatorInstance::from_spec(spec));
                true
            }
            None => false,
        }
    }

    /// Appends a pre-built instance without consulting a catalog.
    pub fn push(&mut self, instance: IndicatorInstance) -> bool {
        if self.contains(&instance.id) {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<IndicatorInstance> {
        let index = self.instances.iter().position(|i| i.id == id)?;
        Some(self.instances.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&IndicatorInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut IndicatorInstance> {
        self.instances.iter_mut().find(|i| i.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.instances.iter().map(|i| i.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl FromIterator<IndicatorInstance> for Selection {
    fn from_iter<T: IntoIterator<Item = IndicatorInstance>>(iter: T) -> Self {
        let mut selection = Selection::new();
        for instance in iter {
            selection.push(instance);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn catalog() -> ConditionCatalog {
        ConditionCatalog::new(vec![
            IndicatorSpec::new("RSI", "RSI")
                .with_condition("rsi_oversold", "")
                .with_parameter("period", 14.0, 2.0, 100.0)
                .with_parameter("oversold", 30.0, 1.0, 50.0),
            IndicatorSpec::new("MACD", "MACD").with_condition("macd_cross_up", ""),
        ])
    }

    #[test]
    fn add_binds_defaults() {
        let catalog = catalog();
        let mut selection = Selection::new();
        assert!(selection.add(&catalog, "RSI"));
        let rsi = selection.get("RSI").unwrap();
        assert_relative_eq!(rsi.param("period").unwrap(), 14.0);
        assert_relative_eq!(rsi.param("oversold").unwrap(), 30.0);
    }

    #[test]
    fn add_rejects_unknown_and_duplicates() {
        let catalog = catalog();
        let mut selection = Selection::new();
        assert!(!selection.add(&catalog, "NOPE"));
        assert!(selection.add(&catalog, "MACD"));
        assert!(!selection.add(&catalog, "MACD"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn order_is_preserved() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.add(&catalog, "MACD");
        selection.add(&catalog, "RSI");
        assert_eq!(selection.ids().collect::<Vec<_>>(), vec!["MACD", "RSI"]);
    }

    #[test]
    fn set_param_clamps_to_range() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.add(&catalog, "RSI");
        let rsi = selection.get_mut("RSI").unwrap();
        assert!(rsi.set_param(&catalog, "period", 500.0));
        assert_relative_eq!(rsi.param("period").unwrap(), 100.0);
        assert!(rsi.set_param(&catalog, "oversold", 0.5));
        assert_relative_eq!(rsi.param("oversold").unwrap(), 1.0);
    }

    #[test]
    fn set_param_ignores_undeclared() {
        let catalog = catalog();
        let mut rsi = IndicatorInstance::new("RSI");
        assert!(!rsi.set_param(&catalog, "smoothing", 3.0));
        assert!(rsi.param("smoothing").is_none());
    }

    #[test]
    fn remove_returns_instance() {
        let catalog = catalog();
        let mut selection = Selection::new();
        selection.add(&catalog, "RSI");
        let removed = selection.remove("RSI").unwrap();
        assert_eq!(removed.id, "RSI");
        assert!(selection.is_empty());
        assert!(selection.remove("RSI").is_none());
    }
}
