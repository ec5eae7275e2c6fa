//! Typed HTTP client for the four todo endpoints.
//!
//! One request per call, no retries, no timeouts beyond reqwest defaults; a
//! failed call is surfaced to the caller and needs a fresh user action.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use todo_model::{CreateTodo, Deleted, ErrorBody, Todo, UpdateTodo};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

pub struct TodoApi {
    http: Client,
    base_url: String,
}

impl TodoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub async fn list(&self, device_id: &str) -> Result<Vec<Todo>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/todos"))
            .query(&[("deviceId", device_id)])
            .send()
            .await?;

        decode(response).await
    }

    pub async fn create(&self, payload: &CreateTodo) -> Result<Todo, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/todos"))
            .json(payload)
            .send()
            .await?;

        decode(response).await
    }

    pub async fn update(&self, id: &str, payload: &UpdateTodo) -> Result<Todo, ApiError> {
        let response = self
            .http
            .put(self.endpoint(&format!("/todos/{id}")))
            .json(payload)
            .send()
            .await?;

        decode(response).await
    }

    pub async fn delete(&self, id: &str) -> Result<Deleted, ApiError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/todos/{id}")))
            .send()
            .await?;

        decode(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.status().is_success() {
        return Ok(response.json().await?);
    }

    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| "server error".to_string());

    Err(ApiError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let api = TodoApi::new("http://localhost:3000//");
        assert_eq!(api.endpoint("/todos"), "http://localhost:3000/todos");
    }

    #[test]
    fn api_error_reports_status_and_message() {
        let err = ApiError::Api {
            status: 404,
            message: "todo not found".into(),
        };
        assert_eq!(err.to_string(), "server returned 404: todo not found");
    }
}
