//! Status catalog validation: non-empty sets, unique values, consistent default and active subset.

use crate::config::{StatusCatalog, StatusSet};
use crate::error::ConfigError;
use std::collections::HashSet;

pub fn validate(catalog: &StatusCatalog) -> Result<(), ConfigError> {
    validate_set(&catalog.apartment)?;
    validate_set(&catalog.reservation)?;
    Ok(())
}

fn validate_set(set: &StatusSet) -> Result<(), ConfigError> {
    if set.values.is_empty() {
        return Err(ConfigError::Validation(format!("{} statuses must not be empty", set.name)));
    }
    let mut seen = HashSet::new();
    for v in &set.values {
        if v.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} statuses contain a blank value", set.name)));
        }
        // Values end up inside the CHECK constraint literal.
        if v.chars().any(char::is_control) {
            return Err(ConfigError::Validation(format!(
                "{} status {:?} contains control characters",
                set.name, v
            )));
        }
        if !seen.insert(v.as_str()) {
            return Err(ConfigError::Validation(format!("{} status '{}' listed twice", set.name, v)));
        }
    }
    if !set.contains(&set.default) {
        return Err(ConfigError::Validation(format!(
            "{} default '{}' is not one of its statuses",
            set.name, set.default
        )));
    }
    for a in &set.active {
        if !set.contains(a) {
            return Err(ConfigError::Validation(format!(
                "{} active status '{}' is not one of its statuses",
                set.name, a
            )));
        }
    }
    Ok(())
}
