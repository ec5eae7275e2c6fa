//! Stored shape of a todo record and the bson builders for writes.
//!
//! The collection keeps dates as native bson datetimes so the
//! newest-first sort on `createdAt` is a plain index-friendly sort,
//! converting to chrono only at the wire boundary.

use bson::{Document, doc, oid::ObjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_model::{CreateTodo, Priority, Todo, UpdateTodo};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<bson::DateTime>,
    pub priority: Priority,
    pub device_id: String,
    pub notifications: bool,
    pub created_at: bson::DateTime,
}

impl TodoDocument {
    pub fn new(create: CreateTodo, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: create.title,
            description: create.description,
            completed: false,
            due_date: create.due_date.map(bson::DateTime::from_chrono),
            priority: create.priority,
            device_id: create.device_id,
            notifications: create.notifications,
            created_at: bson::DateTime::from_chrono(created_at),
        }
    }
}

impl From<TodoDocument> for Todo {
    fn from(stored: TodoDocument) -> Self {
        Todo {
            id: stored.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: stored.title,
            description: stored.description,
            completed: stored.completed,
            due_date: stored.due_date.map(bson::DateTime::to_chrono),
            priority: stored.priority,
            device_id: stored.device_id,
            notifications: stored.notifications,
            created_at: stored.created_at.to_chrono(),
            is_optimistic: false,
        }
    }
}

fn priority_name(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

/// Builds the `$set`/`$unset` pair for a full-field replace.
///
/// Optional fields absent from the payload are unset on the record, so an
/// update never merges with what a caller left out. `_id` and `createdAt`
/// are never touched.
pub fn update_document(update: &UpdateTodo) -> Document {
    let mut set = doc! {
        "title": &update.title,
        "completed": update.completed,
        "priority": priority_name(update.priority),
        "deviceId": &update.device_id,
        "notifications": update.notifications,
    };
    let mut unset = Document::new();

    match &update.description {
        Some(description) => {
            set.insert("description", description);
        }
        None => {
            unset.insert("description", "");
        }
    }
    match update.due_date {
        Some(due_date) => {
            set.insert("dueDate", bson::DateTime::from_chrono(due_date));
        }
        None => {
            unset.insert("dueDate", "");
        }
    }

    if unset.is_empty() {
        doc! { "$set": set }
    } else {
        doc! { "$set": set, "$unset": unset }
    }
}
