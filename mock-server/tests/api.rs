use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, ErrorResponse, Todo};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Send one request through a shared router, keeping state between calls.
async fn call(app: &mut axum::routing::RouterIntoService<String>, req: Request<String>) -> axum::response::Response {
    use tower::Service;
    ServiceExt::ready(app).await.unwrap().call(req).await.unwrap()
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_todos_bad_pagination_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/todos?skip=abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_todos_honours_skip_and_limit() {
    let mut app = app().into_service();
    for content in ["one", "two", "three", "four"] {
        let body = format!(r#"{{"content":"{content}"}}"#);
        call(&mut app, json_request("POST", "/todos", &body)).await;
    }

    let resp = call(&mut app, empty_request("GET", "/todos?skip=1&limit=2")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    let contents: Vec<&str> = todos.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec!["two", "three"]);
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_todo() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"content":"Buy milk"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.id, 1);
    assert_eq!(todo.content, "Buy milk");
}

#[tokio::test]
async fn create_todo_accepts_whitespace_content() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"content":"  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.content, "  ");
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/todos", r#"{"not_content":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = app().oneshot(empty_request("GET", "/todos/9999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: ErrorResponse = body_json(resp).await;
    assert_eq!(err.detail, "Todo not found");
}

#[tokio::test]
async fn get_todo_bad_id_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/todos/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/todos/9999", r#"{"content":"Nope"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/todos/9999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    let mut app = app().into_service();

    // create
    let resp = call(&mut app, json_request("POST", "/todos", r#"{"content":"Walk dog"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Todo = body_json(resp).await;
    let id = created.id;

    // list contains it
    let resp = call(&mut app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![created.clone()]);

    // update content
    let resp = call(
        &mut app,
        json_request("PUT", &format!("/todos/{id}"), r#"{"content":"Walk cat"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.content, "Walk cat");

    // empty update leaves content alone
    let resp = call(&mut app, json_request("PUT", &format!("/todos/{id}"), "{}")).await;
    let unchanged: Todo = body_json(resp).await;
    assert_eq!(unchanged.content, "Walk cat");

    // delete returns the removed todo
    let resp = call(&mut app, empty_request("DELETE", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let removed: Todo = body_json(resp).await;
    assert_eq!(removed.id, id);

    // get after delete
    let resp = call(&mut app, empty_request("GET", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // ids are not reused
    let resp = call(&mut app, json_request("POST", "/todos", r#"{"content":"Next"}"#)).await;
    let next: Todo = body_json(resp).await;
    assert_eq!(next.id, id + 1);

    let resp = call(&mut app, empty_request("GET", "/todos")).await;
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos, vec![next]);
}
