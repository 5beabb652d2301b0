//! Build the status catalog from built-in sets, an optional JSON file and env additions.

use crate::config::resolved::{StatusCatalog, StatusSet};
use crate::config::settings::Settings;
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::path::Path;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Built-in catalog: the union of the status sets ever used for each entity.
pub fn default_catalog() -> StatusCatalog {
    StatusCatalog {
        apartment: StatusSet {
            name: "apartment",
            values: strings(APARTMENT_STATUSES),
            default: APARTMENT_DEFAULT_STATUS.into(),
            active: Vec::new(),
        },
        reservation: StatusSet {
            name: "reservation",
            values: strings(RESERVATION_STATUSES),
            default: RESERVATION_DEFAULT_STATUS.into(),
            active: strings(RESERVATION_ACTIVE_STATUSES),
        },
    }
}

fn apply(set: &mut StatusSet, overrides: Option<&StatusSetConfig>, extra: &[String]) {
    if let Some(o) = overrides {
        if let Some(values) = &o.values {
            set.values = values.clone();
        }
        if let Some(default) = &o.default {
            set.default = default.clone();
        }
        if let Some(active) = &o.active {
            set.active = active.clone();
        }
    }
    for v in extra {
        if !set.contains(v) {
            set.values.push(v.clone());
        }
    }
}

/// Resolve the catalog (call with the parsed file, if any, and env additions). Validates the result.
pub fn resolve(
    config: &CatalogConfig,
    extra_apartment: &[String],
    extra_reservation: &[String],
) -> Result<StatusCatalog, ConfigError> {
    let mut catalog = default_catalog();
    apply(&mut catalog.apartment, config.apartment.as_ref(), extra_apartment);
    apply(&mut catalog.reservation, config.reservation.as_ref(), extra_reservation);
    validate(&catalog)?;
    Ok(catalog)
}

pub async fn load_catalog_file(path: &Path) -> Result<CatalogConfig, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&text).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
}

/// Load the catalog named by the settings.
pub async fn load_catalog(settings: &Settings) -> Result<StatusCatalog, ConfigError> {
    let file = match &settings.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading status catalog");
            load_catalog_file(path).await?
        }
        None => CatalogConfig::default(),
    };
    resolve(
        &file,
        &settings.extra_apartment_statuses,
        &settings.extra_reservation_statuses,
    )
}
