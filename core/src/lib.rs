//! API client and view state for the todo front-end.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `TodoView` sits on top of
//! the client and turns user actions into requests, always refetching the
//! full list after a successful create or delete.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`, injected from
//!   `ClientConfig` at construction.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoView` communicates with its host through `Effect`s and
//!   `TodoView::resolve`, which keeps races between overlapping requests
//!   reproducible in tests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::ListQuery;
pub use types::{CreateTodo, Todo, TodoId};
pub use view::{Action, Alert, Effect, Phase, RefetchPolicy, RequestId, TodoView};
