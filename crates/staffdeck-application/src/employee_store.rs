//! Employee collection state container.
//!
//! Caches the server's employee list, tracks per-operation busy flags and
//! the last error, owns the search query, and mirrors the collection into
//! durable storage after every successful mutation so a restart shows the
//! latest locally-known state before the next fetch completes.

use crate::OpStatus;
use staffdeck_core::employee::{
    Employee, EmployeeApi, EmployeeDraft, EmployeeStats, filter_employees,
};
use staffdeck_core::storage::{KEY_EMPLOYEES, KeyValueStore, read_json, write_json};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// The only page this client ever requests.
const PAGE: u32 = 1;
const PAGE_SIZE: u32 = 100;

const FETCH_FALLBACK: &str = "Failed to fetch employees";
const CREATE_FALLBACK: &str = "Failed to create employee";
const UPDATE_FALLBACK: &str = "Failed to update employee";
const DELETE_FALLBACK: &str = "Failed to delete employee";

/// The async operations the store runs, used as per-operation busy keys.
///
/// Each operation gets its own pending flag so one operation completing
/// cannot mask a sibling still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeOp {
    Fetch,
    Create,
    Update,
    Delete,
}

struct EmployeeState {
    employees: Vec<Employee>,
    pending: HashSet<EmployeeOp>,
    error: Option<String>,
    search_query: String,
    /// Bumped on every applied change. A fetch records it at dispatch and
    /// discards its result if it moved, so a slow fetch cannot clobber a
    /// newer local mutation.
    generation: u64,
}

/// Dependency-injected employee store.
///
/// All mutations share one shape: mark the operation pending and clear
/// the error on dispatch; on success apply the collection update and
/// persist; on failure record the normalized message and leave the
/// collection untouched.
pub struct EmployeeStore {
    api: Arc<dyn EmployeeApi>,
    durable: Arc<dyn KeyValueStore>,
    state: Arc<RwLock<EmployeeState>>,
}

impl EmployeeStore {
    /// Creates the store, seeding the collection from durable storage.
    ///
    /// The seed is best-effort: possibly stale, possibly empty, replaced
    /// wholesale by the first successful fetch.
    pub async fn new(api: Arc<dyn EmployeeApi>, durable: Arc<dyn KeyValueStore>) -> Self {
        let employees: Vec<Employee> = read_json(durable.as_ref(), KEY_EMPLOYEES)
            .await
            .unwrap_or_default();
        if !employees.is_empty() {
            debug!(count = employees.len(), "employee cache restored from storage");
        }
        Self {
            api,
            durable,
            state: Arc::new(RwLock::new(EmployeeState {
                employees,
                pending: HashSet::new(),
                error: None,
                search_query: String::new(),
                generation: 0,
            })),
        }
    }

    /// Fetches page 1 (size 100) and replaces the whole collection with
    /// the returned sequence, in returned order.
    ///
    /// If any other change was applied while the request was in flight,
    /// the stale response is discarded (`OpStatus::Superseded`) rather
    /// than clobbering the newer local state.
    pub async fn fetch_employees(&self, cancel: &CancellationToken) -> OpStatus {
        let dispatched_at = {
            let mut state = self.state.write().await;
            state.pending.insert(EmployeeOp::Fetch);
            state.error = None;
            state.generation
        };

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                self.finish(EmployeeOp::Fetch).await;
                return OpStatus::Cancelled;
            }
            result = self.api.list(PAGE, PAGE_SIZE) => result,
        };
        if cancel.is_cancelled() {
            self.finish(EmployeeOp::Fetch).await;
            return OpStatus::Cancelled;
        }

        match result {
            Ok(page) => {
                let snapshot = {
                    let mut state = self.state.write().await;
                    state.pending.remove(&EmployeeOp::Fetch);
                    if state.generation != dispatched_at {
                        debug!("discarding stale fetch result");
                        return OpStatus::Superseded;
                    }
                    state.employees = page.employees;
                    state.generation += 1;
                    state.employees.clone()
                };
                self.persist(&snapshot).await;
                OpStatus::Completed
            }
            Err(err) => {
                self.fail(EmployeeOp::Fetch, err.display_message(FETCH_FALLBACK))
                    .await;
                OpStatus::Completed
            }
        }
    }

    /// Creates an employee and appends the server's returned record (with
    /// its server-assigned id) to the end of the collection. No re-sort,
    /// no re-fetch.
    pub async fn create_employee(
        &self,
        draft: &EmployeeDraft,
        cancel: &CancellationToken,
    ) -> OpStatus {
        self.begin(EmployeeOp::Create).await;

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                self.finish(EmployeeOp::Create).await;
                return OpStatus::Cancelled;
            }
            result = self.api.create(draft) => result,
        };
        if cancel.is_cancelled() {
            self.finish(EmployeeOp::Create).await;
            return OpStatus::Cancelled;
        }

        match result {
            Ok(employee) => {
                let snapshot = {
                    let mut state = self.state.write().await;
                    state.pending.remove(&EmployeeOp::Create);
                    state.employees.push(employee);
                    state.generation += 1;
                    state.employees.clone()
                };
                self.persist(&snapshot).await;
                OpStatus::Completed
            }
            Err(err) => {
                self.fail(EmployeeOp::Create, err.display_message(CREATE_FALLBACK))
                    .await;
                OpStatus::Completed
            }
        }
    }

    /// Updates the employee with the given id and replaces the matching
    /// element in place, position unchanged.
    ///
    /// If the id is missing from the local collection the server-side
    /// change still happened; that desync is resolved by an internal
    /// re-fetch instead of silently dropping the confirmed update.
    pub async fn update_employee(
        &self,
        id: i64,
        draft: &EmployeeDraft,
        cancel: &CancellationToken,
    ) -> OpStatus {
        self.begin(EmployeeOp::Update).await;

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                self.finish(EmployeeOp::Update).await;
                return OpStatus::Cancelled;
            }
            result = self.api.update(id, draft) => result,
        };
        if cancel.is_cancelled() {
            self.finish(EmployeeOp::Update).await;
            return OpStatus::Cancelled;
        }

        match result {
            Ok(updated) => {
                let applied = {
                    let mut state = self.state.write().await;
                    state.pending.remove(&EmployeeOp::Update);
                    match state.employees.iter().position(|e| e.id == updated.id) {
                        Some(index) => {
                            state.employees[index] = updated;
                            state.generation += 1;
                            Some(state.employees.clone())
                        }
                        None => None,
                    }
                };
                match applied {
                    Some(snapshot) => self.persist(&snapshot).await,
                    None => {
                        warn!(id, "updated employee missing from local cache; re-fetching");
                        self.fetch_employees(cancel).await;
                    }
                }
                OpStatus::Completed
            }
            Err(err) => {
                self.fail(EmployeeOp::Update, err.display_message(UPDATE_FALLBACK))
                    .await;
                OpStatus::Completed
            }
        }
    }

    /// Deletes the employee with the given id and removes every matching
    /// element from the collection (expected exactly one).
    pub async fn delete_employee(&self, id: i64, cancel: &CancellationToken) -> OpStatus {
        self.begin(EmployeeOp::Delete).await;

        let result = tokio::select! {
            _ = cancel.cancelled() => {
                self.finish(EmployeeOp::Delete).await;
                return OpStatus::Cancelled;
            }
            result = self.api.delete(id) => result,
        };
        if cancel.is_cancelled() {
            self.finish(EmployeeOp::Delete).await;
            return OpStatus::Cancelled;
        }

        match result {
            Ok(()) => {
                let snapshot = {
                    let mut state = self.state.write().await;
                    state.pending.remove(&EmployeeOp::Delete);
                    state.employees.retain(|e| e.id != id);
                    state.generation += 1;
                    state.employees.clone()
                };
                self.persist(&snapshot).await;
                OpStatus::Completed
            }
            Err(err) => {
                self.fail(EmployeeOp::Delete, err.display_message(DELETE_FALLBACK))
                    .await;
                OpStatus::Completed
            }
        }
    }

    /// Replaces the search query. Synchronous intent: no request, no
    /// persistence, the query only drives the `filtered` projection.
    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.state.write().await.search_query = query.into();
    }

    async fn begin(&self, op: EmployeeOp) {
        let mut state = self.state.write().await;
        state.pending.insert(op);
        state.error = None;
    }

    async fn finish(&self, op: EmployeeOp) {
        self.state.write().await.pending.remove(&op);
    }

    async fn fail(&self, op: EmployeeOp, message: String) {
        let mut state = self.state.write().await;
        state.pending.remove(&op);
        state.error = Some(message);
    }

    /// Mirrors the collection into durable storage, best-effort.
    async fn persist(&self, employees: &[Employee]) {
        if let Err(err) = write_json(self.durable.as_ref(), KEY_EMPLOYEES, &employees).await {
            warn!(%err, "failed to mirror employee cache into durable storage");
        }
    }

    /// The full collection, in fetch/insertion order.
    pub async fn employees(&self) -> Vec<Employee> {
        self.state.read().await.employees.clone()
    }

    /// The collection filtered by the current search query: a pure
    /// projection, the underlying collection is untouched.
    pub async fn filtered(&self) -> Vec<Employee> {
        let state = self.state.read().await;
        filter_employees(&state.employees, &state.search_query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Dashboard aggregation over the current collection.
    pub async fn stats(&self) -> EmployeeStats {
        EmployeeStats::from_employees(&self.state.read().await.employees)
    }

    /// The current search query.
    pub async fn search_query(&self) -> String {
        self.state.read().await.search_query.clone()
    }

    /// The last operation failure, normalized to a display message.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Clears the error field.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Whether the given operation is in flight.
    pub async fn is_pending(&self, op: EmployeeOp) -> bool {
        self.state.read().await.pending.contains(&op)
    }

    /// Whether any operation is in flight (the coarse busy indicator).
    pub async fn is_busy(&self) -> bool {
        !self.state.read().await.pending.is_empty()
    }
}
