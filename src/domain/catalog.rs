//! Condition catalog: per-indicator condition names and parameter ranges.
//!
//! The catalog is read-only reference data. Declaration order is significant:
//! indicators, conditions and parameters are kept in the order they were
//! declared, and graph synthesis uses an indicator's *first* condition.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl ParameterSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<ConditionSpec>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl IndicatorSpec {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            conditions: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn with_condition(mut self, name: &str, description: &str) -> Self {
        self.conditions.push(ConditionSpec {
            name: name.to_string(),
            description: description.to_string(),
        });
        self
    }

    pub fn with_parameter(mut self, name: &str, default: f64, min: f64, max: f64) -> Self {
        self.parameters.push(ParameterSpec {
            name: name.to_string(),
            default,
            min,
            max,
        });
        self
    }

    pub fn condition(&self, name: &str) -> Option<&ConditionSpec> {
        self.conditions.iter().find(|c| c.name == name)
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A named boolean predicate together with the indicator that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub name: String,
    pub description: String,
    pub indicator_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionCatalog {
    #[serde(default)]
    indicators: Vec<IndicatorSpec>,
}

impl ConditionCatalog {
    pub fn new(indicators: Vec<IndicatorSpec>) -> Self {
        Self { indicators }
    }

    /// Adds an indicator, replacing any earlier spec with the same id in place.
    pub fn insert(&mut self, spec: IndicatorSpec) {
        match self.indicators.iter_mut().find(|s| s.id == spec.id) {
            Some(existing) => *existing = spec,
            None => self.indicators.push(spec),
        }
    }

    pub fn indicator(&self, id: &str) -> Option<&IndicatorSpec> {
        self.indicators.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.indicator(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.indicators.iter().map(|s| s.id.as_str())
    }

    pub fn indicators(&self) -> &[IndicatorSpec] {
        &self.indicators
    }

    pub fn conditions(&self, id: &str) -> &[ConditionSpec] {
        self.indicator(id)
            .map(|s| s.conditions.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_condition(&self, id: &str) -> Option<&str> {
        self.conditions(id).first().map(|c| c.name.as_str())
    }

    pub fn has_condition(&self, id: &str, name: &str) -> bool {
        self.conditions(id).iter().any(|c| c.name == name)
    }

    pub fn condition(&self, id: &str, name: &str) -> Option<Condition> {
        let spec = self.indicator(id)?.condition(name)?;
        Some(Condition {
            name: spec.name.clone(),
            description: spec.description.clone(),
            indicator_id: id.to_string(),
        })
    }

    pub fn parameter(&self, id: &str, name: &str) -> Option<&ParameterSpec> {
        self.indicator(id)?.parameter(name)
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }
}
