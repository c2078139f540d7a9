//! HTTP client for the hosted task store.
//!
//! Speaks the service's PostgREST-style row interface: equality filters in
//! the query string, `Prefer: return=representation` to read back mutated
//! rows, and an API key presented as both the `apikey` and bearer headers.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;

use super::config::RestStoreConfig;
use super::models::{NewTaskRow, TaskRow, TaskRowPatch};
use crate::schedule::{
    domain::{Task, TaskDraft, TaskId, UserId},
    ports::{TaskPatch, TaskStore, TaskStoreError, TaskStoreResult},
};

const PREFER_REPRESENTATION: (&str, &str) = ("Prefer", "return=representation");

/// Task store backed by the hosted data service.
#[derive(Debug, Clone)]
pub struct RestTaskStore {
    client: Client,
    tasks_url: String,
}

impl RestTaskStore {
    /// Creates a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the API key is not a valid
    /// header value or the underlying client cannot be constructed.
    pub fn new(config: &RestStoreConfig) -> TaskStoreResult<Self> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(TaskStoreError::transport)?;
        bearer.set_sensitive(true);
        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(TaskStoreError::transport)?;
        api_key.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("apikey", api_key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TaskStoreError::transport)?;

        Ok(Self {
            client,
            tasks_url: format!("{}/tasks", config.base_url.trim_end_matches('/')),
        })
    }

    /// Reads the mutated rows from a representation response, expecting
    /// exactly one match.
    async fn single_row(response: Response, id: TaskId) -> TaskStoreResult<TaskRow> {
        let rows: Vec<TaskRow> = checked(response)
            .await?
            .json()
            .await
            .map_err(TaskStoreError::transport)?;
        rows.into_iter()
            .next()
            .ok_or(TaskStoreError::NotFound(id))
    }
}

/// Maps non-success statuses onto [`TaskStoreError::Rejected`], pulling the
/// service's `message` out of JSON error bodies where present.
async fn checked(response: Response) -> TaskStoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or(body);
    Err(TaskStoreError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl TaskStore for RestTaskStore {
    async fn list_for_user(&self, user_id: &UserId) -> TaskStoreResult<Vec<Task>> {
        let response = self
            .client
            .get(&self.tasks_url)
            .query(&[
                ("select", "*".to_owned()),
                ("user_id", format!("eq.{user_id}")),
                ("order", "created_at.desc".to_owned()),
            ])
            .send()
            .await
            .map_err(TaskStoreError::transport)?;
        let rows: Vec<TaskRow> = checked(response)
            .await?
            .json()
            .await
            .map_err(TaskStoreError::transport)?;
        rows.into_iter().map(Task::try_from).collect()
    }

    async fn insert(&self, owner: &UserId, draft: &TaskDraft) -> TaskStoreResult<Task> {
        let row = NewTaskRow::from_draft(owner, draft);
        let response = self
            .client
            .post(&self.tasks_url)
            .header(PREFER_REPRESENTATION.0, PREFER_REPRESENTATION.1)
            .json(&row)
            .send()
            .await
            .map_err(TaskStoreError::transport)?;
        let rows: Vec<TaskRow> = checked(response)
            .await?
            .json()
            .await
            .map_err(TaskStoreError::transport)?;
        let created = rows
            .into_iter()
            .next()
            .ok_or_else(|| TaskStoreError::Decode("insert returned no representation".to_owned()))?;
        Task::try_from(created)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Task> {
        let row = TaskRowPatch::from(patch);
        let response = self
            .client
            .patch(&self.tasks_url)
            .query(&[("id", format!("eq.{id}"))])
            .header(PREFER_REPRESENTATION.0, PREFER_REPRESENTATION.1)
            .json(&row)
            .send()
            .await
            .map_err(TaskStoreError::transport)?;
        let merged = Self::single_row(response, id).await?;
        Task::try_from(merged)
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let response = self
            .client
            .delete(&self.tasks_url)
            .query(&[("id", format!("eq.{id}"))])
            .header(PREFER_REPRESENTATION.0, PREFER_REPRESENTATION.1)
            .send()
            .await
            .map_err(TaskStoreError::transport)?;
        Self::single_row(response, id).await.map(|_| ())
    }
}
