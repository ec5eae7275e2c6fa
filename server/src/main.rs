#[tokio::main]
async fn main() {
    todo_server::start_server().await;
}
