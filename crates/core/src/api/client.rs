//! HTTP backend client
//!
//! Implements [`Backend`] against the remote HTTP+JSON API:
//!
//! - `POST /token/`: exchange credentials for a bearer token
//! - `GET /tasks/`: full collection read
//! - `POST /tasks/`: create (201)
//! - `PATCH /tasks/{id}/`: completion update
//! - `DELETE /tasks/{id}/`: delete (204)

use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{AuthError, FetchError, MutationError};
use crate::session::Credential;
use crate::task::{Task, TaskId};

use super::backend::Backend;
use async_trait::async_trait;

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CreateTaskRequest<'a> {
    title: &'a str,
    description: &'a str,
    completed: bool,
}

#[derive(Serialize)]
struct CompletionPatch {
    completed: bool,
}

/// HTTP client for the backend API
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read the backend's JSON error body, degrading to null when the body
    /// is missing or unparsable.
    async fn error_detail(resp: reqwest::Response) -> serde_json::Value {
        resp.json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null)
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn obtain_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Credential, AuthError> {
        let resp = self
            .client
            .post(self.url("/token/"))
            .json(&TokenRequest { username, password })
            .send()
            .await
            .map_err(|e| AuthError::BackendUnreachable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AuthError::InvalidCredentials);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AuthError::BackendUnreachable(e.to_string()))?;

        body.get("access")
            .and_then(|v| v.as_str())
            .map(Credential::new)
            .ok_or(AuthError::MalformedResponse)
    }

    async fn list_tasks(&self, credential: &Credential) -> Result<Vec<Task>, FetchError> {
        let resp = self
            .client
            .get(self.url("/tasks/"))
            .bearer_auth(credential.secret())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                status: resp.status(),
            });
        }

        resp.json()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    async fn create_task(
        &self,
        credential: &Credential,
        title: &str,
        description: &str,
    ) -> Result<(), MutationError> {
        let resp = self
            .client
            .post(self.url("/tasks/"))
            .bearer_auth(credential.secret())
            .json(&CreateTaskRequest {
                title,
                description,
                completed: false,
            })
            .send()
            .await
            .map_err(|e| MutationError::Network(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::CREATED {
            return Err(MutationError::Rejected {
                status,
                detail: Self::error_detail(resp).await,
            });
        }

        // The body echoes the created task; the refresh remains authoritative.
        match resp.json::<Task>().await {
            Ok(task) => debug!(id = task.id, "task created"),
            Err(err) => debug!("created-task response body not parsed: {err}"),
        }

        Ok(())
    }

    async fn set_completed(
        &self,
        credential: &Credential,
        id: TaskId,
        completed: bool,
    ) -> Result<(), MutationError> {
        let resp = self
            .client
            .patch(self.url(&format!("/tasks/{}/", id)))
            .bearer_auth(credential.secret())
            .json(&CompletionPatch { completed })
            .send()
            .await
            .map_err(|e| MutationError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MutationError::Rejected {
                status,
                detail: Self::error_detail(resp).await,
            });
        }

        Ok(())
    }

    async fn delete_task(
        &self,
        credential: &Credential,
        id: TaskId,
    ) -> Result<(), MutationError> {
        let resp = self
            .client
            .delete(self.url(&format!("/tasks/{}/", id)))
            .bearer_auth(credential.secret())
            .send()
            .await
            .map_err(|e| MutationError::Network(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::NO_CONTENT {
            return Err(MutationError::Rejected {
                status,
                detail: Self::error_detail(resp).await,
            });
        }

        Ok(())
    }
}
