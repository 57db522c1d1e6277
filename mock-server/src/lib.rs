//! In-memory stand-in for the todo backend.
//!
//! Ids are sequential integers starting at 1 and never reused; listing
//! returns todos in id order, paged by `skip` / `limit`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const DEFAULT_LIMIT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub content: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug)]
pub struct Store {
    next_id: i64,
    todos: BTreeMap<i64, Todo>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            todos: BTreeMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            detail: "Todo not found".to_string(),
        }),
    )
}

async fn list_todos(State(db): State<Db>, Query(page): Query<Pagination>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(
        store
            .todos
            .values()
            .skip(page.skip)
            .take(page.limit)
            .cloned()
            .collect(),
    )
}

async fn create_todo(State(db): State<Db>, Json(input): Json<CreateTodo>) -> Json<Todo> {
    let mut store = db.write().await;
    let todo = Todo {
        id: store.next_id,
        content: input.content,
    };
    store.next_id += 1;
    store.todos.insert(todo.id, todo.clone());
    tracing::debug!(id = todo.id, "todo created");
    Json(todo)
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Todo> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> ApiResult<Todo> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or_else(not_found)?;
    if let Some(content) = input.content {
        todo.content = content;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Todo> {
    let mut store = db.write().await;
    let removed = store.todos.remove(&id).ok_or_else(not_found)?;
    tracing::debug!(id, "todo deleted");
    Ok(Json(removed))
}
