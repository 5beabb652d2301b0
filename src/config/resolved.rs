//! Resolved status catalog: validated and flattened for runtime use.

use serde::Serialize;

/// A named, closed set of allowed `estado` values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusSet {
    pub name: &'static str,
    pub values: Vec<String>,
    /// Applied when a create request omits `estado`; also the column DEFAULT.
    pub default: String,
    /// Non-terminal statuses. Empty for sets without a lifecycle.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active: Vec<String>,
}

impl StatusSet {
    pub fn contains(&self, status: &str) -> bool {
        self.values.iter().any(|v| v == status)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusCatalog {
    pub apartment: StatusSet,
    pub reservation: StatusSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact() {
        let set = StatusSet {
            name: "reservation",
            values: vec!["pendiente".into(), "cancelado".into()],
            default: "pendiente".into(),
            active: vec!["pendiente".into()],
        };
        assert!(set.contains("pendiente"));
        assert!(!set.contains("Pendiente"));
    }
}
