//! # MongoDB
//!
//! Document store for todo records.
//!
//! ## Schema
//! - One `todos` collection, records keyed by the store-assigned `_id`
//! - Fields as on the wire, camelCase, dates as bson datetimes
//!
//! ## Requirements
//! - Unique id assignment on insert
//! - Fetch-by-filter on `deviceId` plus sort on `createdAt` descending
//! - Last-write-wins on racing updates; no locking layer on top
//!
//! The client is an internal connection pool, created once at startup and
//! handed to request handlers through [`crate::state::State`].

use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database, options::ReturnDocument};
use tracing::info;

use crate::document::{TodoDocument, update_document};
use todo_model::UpdateTodo;

const DEFAULT_DATABASE: &str = "todo_db";
const COLLECTION: &str = "todos";

pub async fn init_mongo(mongodb_uri: &str) -> Database {
    let client = Client::with_uri_str(mongodb_uri)
        .await
        .expect("MongoDB URI misconfigured!");

    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

    database
        .run_command(doc! { "ping": 1 })
        .await
        .expect("MongoDB unreachable!");

    info!("MongoDB connected: {}", database.name());

    database
}

#[derive(Clone)]
pub struct TodoStore {
    collection: Collection<TodoDocument>,
}

impl TodoStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// All records for one device, newest first.
    pub async fn list_for_device(
        &self,
        device_id: &str,
    ) -> Result<Vec<TodoDocument>, mongodb::error::Error> {
        self.collection
            .find(doc! { "deviceId": device_id })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await
    }

    pub async fn insert(
        &self,
        mut record: TodoDocument,
    ) -> Result<TodoDocument, mongodb::error::Error> {
        let result = self.collection.insert_one(&record).await?;
        record.id = result.inserted_id.as_object_id();

        Ok(record)
    }

    /// Destructive full-field replace; `None` when the id resolves to nothing.
    pub async fn replace(
        &self,
        id: ObjectId,
        update: &UpdateTodo,
    ) -> Result<Option<TodoDocument>, mongodb::error::Error> {
        self.collection
            .find_one_and_update(doc! { "_id": id }, update_document(update))
            .return_document(ReturnDocument::After)
            .await
    }

    pub async fn delete(
        &self,
        id: ObjectId,
    ) -> Result<Option<TodoDocument>, mongodb::error::Error> {
        self.collection.find_one_and_delete(doc! { "_id": id }).await
    }
}
