//! Fallback rendering from the catalog description.

use crate::domain::narrative::{BoundParams, num};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// Substitutes `{name}` placeholders with bound parameter values. Unbound
/// placeholders are left as written. A blank description renders the
/// condition name with underscores as spaces.
pub fn render(condition: &str, description: &str, params: BoundParams<'_>) -> String {
    let description = description.trim();
    if description.is_empty() {
        return condition.replace('_', " ");
    }

    PLACEHOLDER
        .replace_all(description, |caps: &Captures<'_>| match params.lookup(&caps[1]) {
            Some(value) => num(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}
