//! Shared application state for all routes.

use crate::config::{Settings, StatusCatalog};
use crate::store::Store;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub catalog: Arc<StatusCatalog>,
    pub settings: Arc<Settings>,
    /// Serializes reservation creation (check then insert) within this process.
    pub reservation_gate: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Store, catalog: StatusCatalog, settings: Settings) -> Self {
        AppState {
            store,
            catalog: Arc::new(catalog),
            settings: Arc::new(settings),
            reservation_gate: Arc::new(Mutex::new(())),
        }
    }
}
