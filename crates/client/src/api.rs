//! REST client for the TaskHive API.
//!
//! Wraps the `/api/taskpads` and `/api/tasks` endpoints using [`reqwest`].
//! Every call carries the identity provider's session token.

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use taskhive_core::types::DbId;

use crate::wire::{NewTaskRequest, PadBody, Task, TaskPad, TaskPatch};

/// Errors from the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("TaskHive API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The configured base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// HTTP client bound to one API server and one signed-in session.
#[derive(Debug)]
pub struct TaskHiveClient {
    client: reqwest::Client,
    base_url: Url,
    session_token: String,
}

impl TaskHiveClient {
    /// Create a client for the API at `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str, session_token: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url, session_token)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        session_token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            base_url,
            session_token: session_token.into(),
        })
    }

    /// Replace the session token after the identity provider refreshes it.
    pub fn set_session_token(&mut self, token: impl Into<String>) {
        self.session_token = token.into();
    }

    // ---- task pads ----

    /// `GET /api/taskpads/{userEmail}`
    pub async fn list_pads(&self, user_email: &str) -> Result<Vec<TaskPad>, ClientError> {
        let url = self.endpoint(&["taskpads", user_email])?;
        self.send_json(Method::GET, url, None::<&()>).await
    }

    /// `POST /api/taskpads`
    pub async fn create_pad(&self, user_email: &str, title: &str) -> Result<TaskPad, ClientError> {
        let url = self.endpoint(&["taskpads"])?;
        let body = PadBody {
            user_email: Some(user_email),
            title,
        };
        self.send_json(Method::POST, url, Some(&body)).await
    }

    /// `PUT /api/taskpads/{id}`
    pub async fn rename_pad(&self, id: DbId, title: &str) -> Result<TaskPad, ClientError> {
        let url = self.endpoint(&["taskpads", &id.to_string()])?;
        let body = PadBody {
            user_email: None,
            title,
        };
        self.send_json(Method::PUT, url, Some(&body)).await
    }

    /// `DELETE /api/taskpads/{id}`
    pub async fn delete_pad(&self, id: DbId) -> Result<(), ClientError> {
        let url = self.endpoint(&["taskpads", &id.to_string()])?;
        self.send_empty(Method::DELETE, url).await
    }

    // ---- tasks ----

    /// `GET /api/tasks/{userEmail}?taskPadId=`
    pub async fn list_tasks(
        &self,
        user_email: &str,
        task_pad_id: Option<DbId>,
    ) -> Result<Vec<Task>, ClientError> {
        let mut url = self.endpoint(&["tasks", user_email])?;
        if let Some(pad) = task_pad_id {
            url.query_pairs_mut()
                .append_pair("taskPadId", &pad.to_string());
        }
        self.send_json(Method::GET, url, None::<&()>).await
    }

    /// `POST /api/tasks`
    pub async fn create_task(&self, request: &NewTaskRequest) -> Result<Task, ClientError> {
        let url = self.endpoint(&["tasks"])?;
        self.send_json(Method::POST, url, Some(request)).await
    }

    /// `PUT /api/tasks/{id}`
    pub async fn update_task(&self, id: DbId, patch: &TaskPatch) -> Result<Task, ClientError> {
        let url = self.endpoint(&["tasks", &id.to_string()])?;
        self.send_json(Method::PUT, url, Some(patch)).await
    }

    /// `DELETE /api/tasks/{id}`
    pub async fn delete_task(&self, id: DbId) -> Result<(), ClientError> {
        let url = self.endpoint(&["tasks", &id.to_string()])?;
        self.send_empty(Method::DELETE, url).await
    }

    // ---- private helpers ----

    /// Build `{base}/api/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.session_token)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut builder = self.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, method: Method, url: Url) -> Result<(), ClientError> {
        let response = self.request(method, url).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Return the response unchanged on success, or a [`ClientError::Api`]
    /// with the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
