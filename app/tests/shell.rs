//! Drives the terminal front-end with scripted input against a live mock server.

use todo_app::{HttpTransport, Shell};
use todo_core::{HttpMethod, HttpRequest, ListQuery, TodoClient, TodoView};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}/")
}

async fn run_script(base_url: &str, script: &str) -> String {
    let view = TodoView::new(TodoClient::new(base_url));
    let shell = Shell::new(view, HttpTransport::new(), Vec::new());
    let out = shell.run(script.as_bytes()).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn add_renders_refetched_list_and_clears_draft() {
    let base_url = start_server().await;

    let out = run_script(&base_url, "add buy milk\n").await;
    // The initial load may race the refetch, so look for the refetched render anywhere.
    assert!(out.contains("  [1] buy milk\ndraft: \"\"\n"), "{out}");

    // A fresh view on the same server loads what the first one created.
    let out = run_script(&base_url, "").await;
    assert!(out.contains("[1] buy milk"), "{out}");
}

#[tokio::test]
async fn failed_delete_shows_alert() {
    let base_url = start_server().await;

    let out = run_script(&base_url, "delete 99\n").await;
    assert!(out.contains("[alert] Failed to delete the todo."), "{out}");
}

#[tokio::test]
async fn unreachable_api_alerts_on_load() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    let out = run_script(&format!("http://{addr}"), "").await;
    assert_eq!(out.matches("[alert] Failed to load the todo list.").count(), 1, "{out}");
    assert!(out.contains("(no todos)"), "{out}");
}

#[tokio::test]
async fn bad_commands_are_reported_and_skipped() {
    let base_url = start_server().await;

    let out = run_script(&base_url, "frobnicate\ndelete x\nquit\n").await;
    assert!(out.contains("unknown command: frobnicate"), "{out}");
    assert!(out.contains("not a todo id: x"), "{out}");
}

#[tokio::test]
async fn transport_returns_status_headers_and_body() {
    let base_url = start_server().await;
    let client = TodoClient::new(&base_url);

    let request: HttpRequest = client.build_list_todos(&ListQuery::new());
    assert_eq!(request.method, HttpMethod::Get);
    let transport = HttpTransport::new();
    let response = tokio::task::spawn_blocking(move || transport.execute(&request))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "[]");
    assert!(response
        .headers
        .iter()
        .any(|(name, value)| name == "content-type" && value == "application/json"));
}
