//! Hand-driven round-trip against a running server: create a due-soon todo,
//! list, scan it through the notifier, update, delete, then confirm the id
//! is gone.

use chrono::{Duration, Utc};
use clap::Parser;
use todo_client::{
    DueSoonNotifier, FileDeviceStore, LogToasts, TodoApi, get_or_create_device_id,
};
use todo_model::{CreateTodo, Priority, UpdateTodo};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(default_value = "http://localhost:3000")]
    base_url: String,

    /// Where the device identifier is cached between runs.
    #[arg(long, default_value = ".todo-tester")]
    device_dir: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt().init();

    let api = TodoApi::new(args.base_url);
    let device_id = get_or_create_device_id(&FileDeviceStore::new(args.device_dir)).unwrap();
    println!("Device: {device_id}");

    let created = api
        .create(&CreateTodo {
            title: "tester round-trip".into(),
            description: Some("created by todo-tester".into()),
            due_date: Some(Utc::now() + Duration::minutes(30)),
            priority: Priority::High,
            device_id: device_id.clone(),
            notifications: true,
        })
        .await
        .unwrap();
    println!("Created: {} ({})", created.title, created.id);

    let listed = api.list(&device_id).await.unwrap();
    println!("Listed {} record(s) for this device", listed.len());
    assert!(listed.iter().any(|t| t.id == created.id));

    // The fresh record is due within the hour, so one toast fires and the
    // repeat scan stays quiet.
    let mut notifier = DueSoonNotifier::new();
    let raised = notifier.scan(&listed, Utc::now(), &LogToasts);
    assert!(raised >= 1);
    assert_eq!(notifier.scan(&listed, Utc::now(), &LogToasts), 0);
    println!("Notifier raised {raised} toast(s)");

    let updated = api
        .update(
            &created.id,
            &UpdateTodo {
                title: "tester round-trip (done)".into(),
                description: None,
                due_date: None,
                priority: Priority::Low,
                device_id: device_id.clone(),
                notifications: false,
                completed: true,
            },
        )
        .await
        .unwrap();
    println!("Updated: completed={}", updated.completed);
    assert!(updated.description.is_none());

    let deleted = api.delete(&created.id).await.unwrap();
    println!("Deleted: {}", deleted.message);

    match api.delete(&created.id).await {
        Err(err) => println!("Second delete refused as expected: {err}"),
        Ok(_) => panic!("second delete should be not-found"),
    }

    let remaining = api.list(&device_id).await.unwrap();
    assert!(remaining.iter().all(|t| t.id != created.id));
    println!("Round-trip OK");
}
