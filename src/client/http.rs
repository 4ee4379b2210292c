//! Async HTTP client for the task API.

use super::{ClientError, TaskDraft, TaskPatch, TaskRecord};
use crate::account::services::AuthSession;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

/// Client for one Tasklane server.
///
/// The bearer token is attached to every task request; account requests
/// are sent without it.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    code: Option<String>,
    message: Option<String>,
}

impl TaskApiClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] unless the URL uses `http` or
    /// `https`, or [`ClientError::Transport`] when the HTTP stack cannot be
    /// initialised.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(raw));
        }
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: trimmed.to_owned(),
            token: None,
        })
    }

    /// Returns a copy of this client that sends `token`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replaces or clears the bearer token.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Returns the server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks that the server answers its health probe.
    ///
    /// # Errors
    ///
    /// Returns transport or API errors.
    pub async fn health(&self) -> Result<(), ClientError> {
        let response = self.request(Method::GET, "/health").send().await?;
        check(response).await.map(drop)
    }

    /// Creates an account and returns its session.
    ///
    /// # Errors
    ///
    /// Returns transport or API errors, such as `ALREADY_EXISTS`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ClientError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let response = self
            .request(Method::POST, "/api/auth/register")
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    /// Signs in and returns the session.
    ///
    /// # Errors
    ///
    /// Returns transport or API errors, such as `UNAUTHENTICATED`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        let body = json!({ "email": email, "password": password });
        let response = self
            .request(Method::POST, "/api/auth/login")
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    /// Fetches every task of the signed-in user in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotSignedIn`] without a token, or transport or
    /// API errors.
    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>, ClientError> {
        let response = self.authorized(Method::GET, "/api/tasks")?.send().await?;
        decode(response).await
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// As for [`list_tasks`](Self::list_tasks), plus `VALIDATION_FAILED`.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<TaskRecord, ClientError> {
        let response = self
            .authorized(Method::POST, "/api/tasks")?
            .json(draft)
            .send()
            .await?;
        decode(response).await
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// As for [`list_tasks`](Self::list_tasks), plus `NOT_FOUND` and
    /// `PERMISSION_DENIED`.
    pub async fn get_task(&self, id: Uuid) -> Result<TaskRecord, ClientError> {
        let response = self
            .authorized(Method::GET, &format!("/api/tasks/{id}"))?
            .send()
            .await?;
        decode(response).await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// As for [`get_task`](Self::get_task), plus `VALIDATION_FAILED`.
    pub async fn update_task(&self, id: Uuid, patch: &TaskPatch) -> Result<TaskRecord, ClientError> {
        let response = self
            .authorized(Method::PUT, &format!("/api/tasks/{id}"))?
            .json(patch)
            .send()
            .await?;
        decode(response).await
    }

    /// Flips a task between pending and completed.
    ///
    /// # Errors
    ///
    /// As for [`get_task`](Self::get_task).
    pub async fn toggle_task(&self, id: Uuid) -> Result<TaskRecord, ClientError> {
        let response = self
            .authorized(Method::POST, &format!("/api/tasks/{id}/toggle"))?
            .send()
            .await?;
        decode(response).await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// As for [`get_task`](Self::get_task).
    pub async fn delete_task(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .authorized(Method::DELETE, &format!("/api/tasks/{id}"))?
            .send()
            .await?;
        check(response).await.map(drop)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotSignedIn)?;
        Ok(self.request(method, path).bearer_auth(token))
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(api_error(status, &text))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = check(response).await?.json::<T>().await?;
    Ok(body)
}

fn api_error(status: StatusCode, body: &str) -> ClientError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let code = envelope
        .as_ref()
        .and_then(|parsed| parsed.code.clone())
        .unwrap_or_else(|| "UNKNOWN".to_owned());
    let message = envelope
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| body.trim().to_owned());
    tracing::debug!(status = status.as_u16(), %code, "request rejected");
    ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    }
}
