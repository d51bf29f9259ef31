//! HTTP implementation of the auth and employee API seams.
//!
//! A thin client over the server's resource endpoints: one request per
//! call, bearer token attached when present, non-2xx responses surfaced
//! as structured errors carrying the server's `detail` message.

use crate::token::TokenCell;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use staffdeck_core::auth::AuthApi;
use staffdeck_core::employee::{Employee, EmployeeApi, EmployeeDraft, EmployeePage};
use staffdeck_core::error::{Result, StaffdeckError};
use staffdeck_core::user::UserProfile;
use tracing::debug;

/// HTTP client for the Staffdeck server API.
///
/// Attaches `Authorization: Bearer <token>` from the shared [`TokenCell`]
/// to every request when a token is present. Does not retry, does not
/// queue, does not deduplicate: every call is a single attempt whose
/// resolution drives exactly one state transition in the calling store.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: TokenCell,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl HttpApi {
    /// Creates a client against `base_url` reading tokens from `token`.
    pub fn new(base_url: impl Into<String>, token: TokenCell) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the current bearer token, if any.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.get().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and resolves it to the response body on 2xx, or a
    /// structured API error otherwise.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| StaffdeckError::transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%status, "request rejected by server");
        Err(error_from_response(status, &body))
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|err| StaffdeckError::transport(format!("invalid response body: {err}")))
    }
}

/// Builds the API error for a non-2xx response, preferring the server's
/// `detail` field and leaving the message empty when there is none (the
/// store substitutes its per-operation fallback).
fn error_from_response(status: StatusCode, body: &str) -> StaffdeckError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .unwrap_or_default();
    StaffdeckError::api(status.as_u16(), detail)
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginRequest { username, password });
        let response = self.send(request).await?;
        let body: LoginResponse = Self::parse(response).await?;
        Ok(body.access_token)
    }

    async fn me(&self, token: &str) -> Result<UserProfile> {
        // Explicit token: this call happens mid-login, before the shared
        // cell has been updated.
        let request = self.client.get(self.url("/auth/me")).bearer_auth(token);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    async fn logout(&self) -> Result<()> {
        let request = self.authorize(self.client.post(self.url("/auth/logout"))).await;
        self.send(request).await?;
        Ok(())
    }
}

#[async_trait]
impl EmployeeApi for HttpApi {
    async fn list(&self, page: u32, page_size: u32) -> Result<EmployeePage> {
        let request = self
            .authorize(self.client.get(self.url("/employees")))
            .await
            .query(&[("page", page), ("page_size", page_size)]);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    async fn create(&self, draft: &EmployeeDraft) -> Result<Employee> {
        let request = self
            .authorize(self.client.post(self.url("/employees")))
            .await
            .json(draft);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    async fn update(&self, id: i64, draft: &EmployeeDraft) -> Result<Employee> {
        let request = self
            .authorize(self.client.put(self.url(&format!("/employees/{id}"))))
            .await
            .json(draft);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let request = self
            .authorize(self.client.delete(self.url(&format!("/employees/{id}"))))
            .await;
        self.send(request).await?;
        Ok(())
    }
}
