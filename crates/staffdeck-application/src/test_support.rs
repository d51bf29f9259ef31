//! Scripted in-memory API implementations for store tests.
//!
//! Responses are queued per endpoint and popped in call order. A list
//! call can be gated on a oneshot channel to hold a fetch in flight while
//! the test drives a concurrent operation.

use staffdeck_core::auth::AuthApi;
use staffdeck_core::employee::{Employee, EmployeeApi, EmployeeDraft, EmployeePage};
use staffdeck_core::error::Result;
use staffdeck_core::user::UserProfile;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::{Mutex as AsyncMutex, oneshot};
use tokio_util::sync::CancellationToken;

/// Builds a test employee with fixed timestamps.
pub fn employee(id: i64, name: &str, is_active: bool) -> Employee {
    let ts = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    Employee {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        designation: "Engineer".to_string(),
        salary: 75000.0,
        is_active,
        created_at: ts,
        updated_at: ts,
    }
}

/// Wraps employees in the page-1 envelope the server returns.
pub fn page(employees: Vec<Employee>) -> EmployeePage {
    EmployeePage {
        total: employees.len() as u64,
        page: 1,
        page_size: 100,
        total_pages: 1,
        employees,
    }
}

#[derive(Default)]
pub struct MockAuthApi {
    login_responses: Mutex<VecDeque<Result<String>>>,
    me_responses: Mutex<VecDeque<Result<UserProfile>>>,
    logout_responses: Mutex<VecDeque<Result<()>>>,
}

impl MockAuthApi {
    pub fn push_login(&self, response: Result<String>) {
        self.login_responses.lock().unwrap().push_back(response);
    }

    pub fn push_me(&self, response: Result<UserProfile>) {
        self.me_responses.lock().unwrap().push_back(response);
    }

    pub fn push_logout(&self, response: Result<()>) {
        self.logout_responses.lock().unwrap().push_back(response);
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, _username: &str, _password: &str) -> Result<String> {
        self.login_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected login call")
    }

    async fn me(&self, _token: &str) -> Result<UserProfile> {
        self.me_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected me call")
    }

    async fn logout(&self) -> Result<()> {
        self.logout_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected logout call")
    }
}

#[derive(Default)]
pub struct MockEmployeeApi {
    list_responses: Mutex<VecDeque<Result<EmployeePage>>>,
    create_responses: Mutex<VecDeque<Result<Employee>>>,
    update_responses: Mutex<VecDeque<Result<Employee>>>,
    delete_responses: Mutex<VecDeque<Result<()>>>,
    list_gate: AsyncMutex<Option<oneshot::Receiver<()>>>,
    cancel_during_call: Mutex<Option<CancellationToken>>,
    calls: AsyncMutex<Vec<&'static str>>,
}

impl MockEmployeeApi {
    pub fn push_list(&self, response: Result<EmployeePage>) {
        self.list_responses.lock().unwrap().push_back(response);
    }

    pub fn push_create(&self, response: Result<Employee>) {
        self.create_responses.lock().unwrap().push_back(response);
    }

    pub fn push_update(&self, response: Result<Employee>) {
        self.update_responses.lock().unwrap().push_back(response);
    }

    pub fn push_delete(&self, response: Result<()>) {
        self.delete_responses.lock().unwrap().push_back(response);
    }

    /// Holds the next list call until the returned sender fires.
    pub fn gate_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.list_gate.try_lock().unwrap() = Some(rx);
        tx
    }

    /// Fires the given token from inside the next call, modelling a view
    /// torn down while its request is resolving.
    pub fn cancel_during_call(&self, token: CancellationToken) {
        *self.cancel_during_call.lock().unwrap() = Some(token);
    }

    /// Endpoint names in call order.
    pub async fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, endpoint: &'static str) {
        self.calls.lock().await.push(endpoint);
        if let Some(token) = self.cancel_during_call.lock().unwrap().take() {
            token.cancel();
        }
    }
}

#[async_trait]
impl EmployeeApi for MockEmployeeApi {
    async fn list(&self, _page: u32, _page_size: u32) -> Result<EmployeePage> {
        self.record("list").await;
        let gate = self.list_gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.list_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected list call")
    }

    async fn create(&self, _draft: &EmployeeDraft) -> Result<Employee> {
        self.record("create").await;
        self.create_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected create call")
    }

    async fn update(&self, _id: i64, _draft: &EmployeeDraft) -> Result<Employee> {
        self.record("update").await;
        self.update_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected update call")
    }

    async fn delete(&self, _id: i64) -> Result<()> {
        self.record("delete").await;
        self.delete_responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected delete call")
    }
}
