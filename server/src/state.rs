use std::sync::Arc;

use super::{
    config::Config,
    database::{TodoStore, init_mongo},
};

pub struct State {
    pub config: Config,
    pub todos: TodoStore,
}

impl State {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let database = init_mongo(&config.mongodb_uri).await;
        let todos = TodoStore::new(&database);

        Arc::new(Self { config, todos })
    }

    /// For in-process tests that never reach the store.
    pub fn with_parts(config: Config, todos: TodoStore) -> Arc<Self> {
        Arc::new(Self { config, todos })
    }
}
