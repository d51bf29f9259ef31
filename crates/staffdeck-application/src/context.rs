//! Application composition root.
//!
//! Builds the token cell, the HTTP client, both storage scopes, and both
//! stores, and owns them for the lifetime of the process. The view layer
//! borrows the stores from here; nothing in the system is reachable as an
//! ambient singleton.

use crate::auth_store::AuthStore;
use crate::employee_store::EmployeeStore;
use staffdeck_core::auth::AuthApi;
use staffdeck_core::employee::EmployeeApi;
use staffdeck_core::storage::KeyValueStore;
use staffdeck_infrastructure::{ClientConfig, HttpApi, JsonFileStore, MemoryStore, TokenCell};
use std::sync::Arc;

/// The wired-up application: both stores plus the shared token cell.
pub struct AppContext {
    pub auth: Arc<AuthStore>,
    pub employees: Arc<EmployeeStore>,
    pub token: TokenCell,
}

impl AppContext {
    /// Builds the production wiring from configuration: reqwest client
    /// against `config.base_url`, in-memory session scope, file-backed
    /// durable scope under `config.data_dir` (or the platform default).
    pub async fn bootstrap(config: ClientConfig) -> Self {
        let token = TokenCell::new();
        let api = Arc::new(HttpApi::new(config.base_url, token.clone()));
        let session: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let durable: Arc<dyn KeyValueStore> = match config.data_dir {
            Some(dir) => Arc::new(JsonFileStore::new(dir)),
            None => Arc::new(JsonFileStore::new_default()),
        };

        Self::bootstrap_with(api.clone(), api, session, durable, token).await
    }

    /// Builds the wiring from pre-constructed collaborators. This is the
    /// seam tests and alternative transports plug into.
    pub async fn bootstrap_with(
        auth_api: Arc<dyn AuthApi>,
        employee_api: Arc<dyn EmployeeApi>,
        session: Arc<dyn KeyValueStore>,
        durable: Arc<dyn KeyValueStore>,
        token: TokenCell,
    ) -> Self {
        let auth = Arc::new(AuthStore::new(auth_api, session, token.clone()).await);
        let employees = Arc::new(EmployeeStore::new(employee_api, durable).await);
        Self {
            auth,
            employees,
            token,
        }
    }
}
