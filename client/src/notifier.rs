//! Due-soon reminders.
//!
//! Every 60 seconds (and once on start) the current collection is scanned
//! for incomplete, notification-enabled todos due within the next hour.
//! Each record alerts at most once per session, keyed by id; the
//! already-alerted set is never persisted, so a reload starts fresh.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use todo_model::Todo;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::info;

pub const SCAN_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// The toast primitive the host UI provides.
pub trait AlertSink: Send + Sync + 'static {
    fn toast(&self, todo: &Todo);
}

/// Logs reminders through `tracing`; stands in where no UI is attached.
pub struct LogToasts;

impl AlertSink for LogToasts {
    fn toast(&self, todo: &Todo) {
        let due = todo
            .due_date
            .map(|d| d.to_rfc3339())
            .unwrap_or_default();
        info!(title = %todo.title, due = %due, "Todo due soon!");
    }
}

/// Incomplete, notification-enabled, and due within `(now, now + 1h]`.
pub fn due_soon(todo: &Todo, now: DateTime<Utc>) -> bool {
    if !todo.notifications || todo.completed {
        return false;
    }

    let Some(due) = todo.due_date else {
        return false;
    };

    let remaining = due.signed_duration_since(now);
    remaining > Duration::zero() && remaining <= Duration::hours(1)
}

/// Session-scoped alert state. Ids move one way, unalerted to alerted; a
/// record never re-alerts within the session even if its fields change.
#[derive(Default)]
pub struct DueSoonNotifier {
    alerted: HashSet<String>,
}

impl DueSoonNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises one toast per newly-eligible record; returns how many fired.
    pub fn scan(&mut self, todos: &[Todo], now: DateTime<Utc>, sink: &impl AlertSink) -> usize {
        let mut raised = 0;

        for todo in todos {
            if due_soon(todo, now) && self.alerted.insert(todo.id.clone()) {
                sink.toast(todo);
                raised += 1;
            }
        }

        raised
    }
}

/// Aborts the scan task when stopped or dropped.
pub struct NotifierHandle {
    task: JoinHandle<()>,
}

impl NotifierHandle {
    pub fn stop(self) {}
}

impl Drop for NotifierHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Starts the periodic scan over a `watch` snapshot of the collection.
/// The first tick fires immediately, then every [`SCAN_INTERVAL`].
pub fn spawn<S: AlertSink>(todos: watch::Receiver<Vec<Todo>>, sink: S) -> NotifierHandle {
    let task = tokio::spawn(async move {
        let mut notifier = DueSoonNotifier::new();
        let mut ticker = time::interval(SCAN_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let snapshot = todos.borrow().clone();
            notifier.scan(&snapshot, Utc::now(), &sink);
        }
    });

    NotifierHandle { task }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use todo_model::Priority;

    fn todo_due_in(id: &str, minutes: i64, now: DateTime<Utc>) -> Todo {
        Todo {
            id: id.into(),
            title: format!("todo {id}"),
            description: None,
            completed: false,
            due_date: Some(now + Duration::minutes(minutes)),
            priority: Priority::Medium,
            device_id: "d1".into(),
            notifications: true,
            created_at: now,
            is_optimistic: false,
        }
    }

    #[derive(Clone, Default)]
    struct Seen(Arc<Mutex<Vec<String>>>);

    impl AlertSink for Seen {
        fn toast(&self, todo: &Todo) {
            self.0.lock().unwrap().push(todo.id.clone());
        }
    }

    #[test]
    fn due_soon_window_bounds() {
        let now = Utc::now();

        assert!(due_soon(&todo_due_in("a", 30, now), now));
        assert!(due_soon(&todo_due_in("b", 60, now), now));
        assert!(!due_soon(&todo_due_in("c", 61, now), now));
        assert!(!due_soon(&todo_due_in("d", -5, now), now));

        let mut due_now = todo_due_in("e", 0, now);
        due_now.due_date = Some(now);
        assert!(!due_soon(&due_now, now));
    }

    #[test]
    fn due_soon_requires_opt_in_and_incomplete() {
        let now = Utc::now();

        let mut completed = todo_due_in("a", 30, now);
        completed.completed = true;
        assert!(!due_soon(&completed, now));

        let mut muted = todo_due_in("b", 30, now);
        muted.notifications = false;
        assert!(!due_soon(&muted, now));

        let mut no_due = todo_due_in("c", 30, now);
        no_due.due_date = None;
        assert!(!due_soon(&no_due, now));
    }

    #[test]
    fn scan_alerts_each_record_once() {
        let now = Utc::now();
        let todos = vec![todo_due_in("a", 30, now), todo_due_in("b", 45, now)];
        let sink = Seen::default();
        let mut notifier = DueSoonNotifier::new();

        assert_eq!(notifier.scan(&todos, now, &sink), 2);
        // Next cadence, same records.
        assert_eq!(notifier.scan(&todos, now + Duration::seconds(60), &sink), 0);
        assert_eq!(sink.0.lock().unwrap().as_slice(), ["a", "b"]);
    }

    #[test]
    fn log_toasts_works_as_a_sink() {
        let now = Utc::now();
        let mut notifier = DueSoonNotifier::new();

        assert_eq!(notifier.scan(&[todo_due_in("a", 30, now)], now, &LogToasts), 1);
        assert_eq!(notifier.scan(&[todo_due_in("a", 30, now)], now, &LogToasts), 0);
    }

    #[test]
    fn scan_never_alerts_completed_records() {
        let now = Utc::now();
        let mut completed = todo_due_in("a", 30, now);
        completed.completed = true;

        let mut notifier = DueSoonNotifier::new();
        assert_eq!(notifier.scan(&[completed], now, &Seen::default()), 0);
    }

    #[test]
    fn alerted_is_one_way_within_a_session() {
        let now = Utc::now();
        let todo = todo_due_in("a", 30, now);
        let sink = Seen::default();
        let mut notifier = DueSoonNotifier::new();

        notifier.scan(std::slice::from_ref(&todo), now, &sink);

        // Field churn after the first alert changes nothing.
        let mut churned = todo.clone();
        churned.due_date = Some(now + Duration::minutes(50));
        assert_eq!(notifier.scan(&[churned], now, &sink), 0);
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_scan_fires_immediately_then_dedups() {
        let now = Utc::now();
        let (_tx, rx) = watch::channel(vec![todo_due_in("a", 30, now)]);
        let sink = Seen::default();

        let handle = spawn(rx, sink.clone());

        // First tick is immediate.
        time::sleep(std::time::Duration::from_millis(5)).await;
        assert_eq!(sink.0.lock().unwrap().len(), 1);

        // A full cadence later the same record stays quiet.
        time::sleep(std::time::Duration::from_secs(61)).await;
        assert_eq!(sink.0.lock().unwrap().len(), 1);

        handle.stop();
    }
}
