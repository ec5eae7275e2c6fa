//! # Todo Wire Types
//!
//! Payloads exchanged between the frontend and backend.
//!
//! All fields are camelCase on the wire to match the JSON contract. The
//! record id is an opaque string assigned by the store; clients never
//! fabricate one except for optimistic placeholders (`temp-` prefixed),
//! which carry `isOptimistic` locally and never send it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A todo record as it travels over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub device_id: String,
    pub notifications: bool,
    pub created_at: DateTime<Utc>,
    /// Client-only placeholder marker, never sent or persisted.
    #[serde(default, skip_serializing)]
    pub is_optimistic: bool,
}

/// Body of `POST /todos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    pub device_id: String,
    #[serde(default)]
    pub notifications: bool,
}

/// Body of `PUT /todos/{id}`.
///
/// This is a destructive full replace: optional fields left out of the body
/// are cleared on the record, not preserved. Callers resend the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    pub device_id: String,
    #[serde(default)]
    pub notifications: bool,
    #[serde(default)]
    pub completed: bool,
}

/// Body of a successful `DELETE /todos/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deleted {
    pub message: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
