//! Client-visible todo collection and its synchronization with the API.
//!
//! Creates are optimistic: a placeholder with a `temp-` id is prepended
//! before the POST and reconciled against the response. Updates and deletes
//! touch local state only after the server confirms. No retries, no conflict
//! detection; the last server write wins.

use chrono::{DateTime, Utc};
use todo_model::{CreateTodo, Todo, UpdateTodo};

use crate::api::{ApiError, TodoApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Active,
    Completed,
}

pub struct TodoAppState {
    todos: Vec<Todo>,
    loading: bool,
}

impl TodoAppState {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            loading: true,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Full reload from the server, replacing the local collection.
    pub async fn initialize(&mut self, api: &TodoApi, device_id: &str) -> Result<(), ApiError> {
        self.loading = true;
        let fetched = api.list(device_id).await;
        self.loading = false;

        self.todos = fetched?;

        Ok(())
    }

    /// Optimistic create: placeholder in, POST, reconcile. On failure the
    /// placeholder is rolled back and the error returned to the caller.
    pub async fn create(&mut self, api: &TodoApi, draft: CreateTodo) -> Result<(), ApiError> {
        let placeholder = optimistic_todo(&draft, Utc::now());
        let temp_id = placeholder.id.clone();
        self.add_optimistic(placeholder);

        match api.create(&draft).await {
            Ok(confirmed) => {
                self.reconcile_create(&temp_id, Some(confirmed));
                Ok(())
            }
            Err(err) => {
                self.reconcile_create(&temp_id, None);
                Err(err)
            }
        }
    }

    /// Confirmed-only update: nothing changes locally until the PUT lands.
    pub async fn update(
        &mut self,
        api: &TodoApi,
        id: &str,
        fields: UpdateTodo,
    ) -> Result<(), ApiError> {
        let confirmed = api.update(id, &fields).await?;
        self.apply_update(confirmed);

        Ok(())
    }

    pub async fn delete(&mut self, api: &TodoApi, id: &str) -> Result<(), ApiError> {
        api.delete(id).await?;
        self.apply_delete(id);

        Ok(())
    }

    pub fn add_optimistic(&mut self, todo: Todo) {
        self.todos.insert(0, todo);
    }

    /// `Some(confirmed)` swaps the placeholder for the server record in
    /// place; `None` drops the placeholder entirely.
    pub fn reconcile_create(&mut self, temp_id: &str, confirmed: Option<Todo>) {
        match confirmed {
            Some(confirmed) => {
                if let Some(entry) = self.todos.iter_mut().find(|t| t.id == temp_id) {
                    *entry = confirmed;
                }
            }
            None => self.todos.retain(|t| t.id != temp_id),
        }
    }

    pub fn apply_update(&mut self, todo: Todo) {
        if let Some(entry) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            *entry = todo;
        }
    }

    pub fn apply_delete(&mut self, id: &str) {
        self.todos.retain(|t| t.id != id);
    }

    /// Status filter plus case-insensitive search over title and
    /// description, preserving order.
    pub fn visible(&self, filter: StatusFilter, search: &str) -> Vec<&Todo> {
        let term = search.to_lowercase();

        self.todos
            .iter()
            .filter(|todo| match filter {
                StatusFilter::All => true,
                StatusFilter::Active => !todo.completed,
                StatusFilter::Completed => todo.completed,
            })
            .filter(|todo| {
                term.is_empty()
                    || todo.title.to_lowercase().contains(&term)
                    || todo
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&term))
            })
            .collect()
    }
}

/// Locally-fabricated record shown until the server answers.
pub fn optimistic_todo(draft: &CreateTodo, now: DateTime<Utc>) -> Todo {
    Todo {
        id: format!("temp-{}", now.timestamp_millis()),
        title: draft.title.clone(),
        description: draft.description.clone(),
        completed: false,
        due_date: draft.due_date,
        priority: draft.priority,
        device_id: draft.device_id.clone(),
        notifications: draft.notifications,
        created_at: now,
        is_optimistic: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_model::Priority;

    fn todo(id: &str, title: &str, completed: bool) -> Todo {
        Todo {
            id: id.into(),
            title: title.into(),
            description: None,
            completed,
            due_date: None,
            priority: Priority::Medium,
            device_id: "d1".into(),
            notifications: false,
            created_at: Utc::now(),
            is_optimistic: false,
        }
    }

    fn draft(title: &str) -> CreateTodo {
        CreateTodo {
            title: title.into(),
            description: None,
            due_date: None,
            priority: Priority::Medium,
            device_id: "d1".into(),
            notifications: false,
        }
    }

    #[test]
    fn optimistic_todo_is_marked_and_prepended() {
        let mut state = TodoAppState::new();
        state.add_optimistic(todo("a", "existing", false));

        let placeholder = optimistic_todo(&draft("milk"), Utc::now());
        assert!(placeholder.is_optimistic);
        assert!(placeholder.id.starts_with("temp-"));
        assert!(!placeholder.completed);

        state.add_optimistic(placeholder.clone());
        assert_eq!(state.todos()[0].id, placeholder.id);
    }

    #[test]
    fn reconcile_swaps_placeholder_for_server_record() {
        let mut state = TodoAppState::new();
        let placeholder = optimistic_todo(&draft("milk"), Utc::now());
        let temp_id = placeholder.id.clone();
        state.add_optimistic(placeholder);

        let confirmed = todo("server-id", "milk", false);
        state.reconcile_create(&temp_id, Some(confirmed));

        assert_eq!(state.todos().len(), 1);
        assert_eq!(state.todos()[0].id, "server-id");
        assert!(!state.todos()[0].is_optimistic);
    }

    #[test]
    fn reconcile_rolls_back_failed_placeholder() {
        let mut state = TodoAppState::new();
        state.add_optimistic(todo("kept", "other", false));

        let placeholder = optimistic_todo(&draft("milk"), Utc::now());
        let temp_id = placeholder.id.clone();
        state.add_optimistic(placeholder);

        state.reconcile_create(&temp_id, None);

        assert_eq!(state.todos().len(), 1);
        assert_eq!(state.todos()[0].id, "kept");
    }

    #[test]
    fn apply_update_replaces_matching_entry_only() {
        let mut state = TodoAppState::new();
        state.add_optimistic(todo("b", "second", false));
        state.add_optimistic(todo("a", "first", false));

        state.apply_update(todo("b", "second, done", true));

        assert_eq!(state.todos()[0].title, "first");
        assert_eq!(state.todos()[1].title, "second, done");
        assert!(state.todos()[1].completed);
    }

    #[test]
    fn apply_delete_removes_by_id() {
        let mut state = TodoAppState::new();
        state.add_optimistic(todo("a", "first", false));

        state.apply_delete("a");
        assert!(state.todos().is_empty());

        // Second delete of the same id is a no-op locally.
        state.apply_delete("a");
        assert!(state.todos().is_empty());
    }

    #[test]
    fn visible_applies_status_then_search() {
        let mut state = TodoAppState::new();
        state.add_optimistic(todo("c", "walk the dog", true));
        state.add_optimistic(todo("b", "buy milk", false));
        state.add_optimistic(todo("a", "buy bread", false));

        let active = state.visible(StatusFilter::Active, "");
        assert_eq!(active.len(), 2);

        let completed = state.visible(StatusFilter::Completed, "");
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "c");

        let milk = state.visible(StatusFilter::All, "MILK");
        assert_eq!(milk.len(), 1);
        assert_eq!(milk[0].id, "b");
    }

    #[test]
    fn visible_searches_descriptions_too() {
        let mut state = TodoAppState::new();
        let mut with_description = todo("a", "errand", false);
        with_description.description = Some("pick up the Dry Cleaning".into());
        state.add_optimistic(with_description);

        assert_eq!(state.visible(StatusFilter::All, "dry clean").len(), 1);
        assert!(state.visible(StatusFilter::All, "laundry").is_empty());
    }

    #[test]
    fn new_state_starts_loading() {
        assert!(TodoAppState::new().is_loading());
    }
}
