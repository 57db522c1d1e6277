//! Todo view state as an explicit, I/O-free state machine.
//!
//! # Design
//! The view owns the rendered todo list and the draft input. User actions
//! (`mount`, `submit`, `delete`) return `Effect`s for the host to carry out;
//! the host reports each round-trip back through `resolve`. Every successful
//! mutation is followed by a full refetch, never a local patch.
//!
//! Requests are not serialized or cancelled. Completions are applied in the
//! order the host delivers them, so with `RefetchPolicy::LastArrival` two
//! overlapping refetches race and the one that arrives last is what stays on
//! screen. `RefetchPolicy::LatestIssued` drops list responses older than one
//! already applied.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::ListQuery;
use crate::types::{CreateTodo, Todo, TodoId};

/// Pairs a dispatched request with the response the host reports for it.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Load,
    Create,
    Delete,
}

/// Lifecycle of one kind of action. `InFlight` wins while any request of
/// that kind is outstanding; otherwise the most recent outcome is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Blocking, user-facing notification raised when an action fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    LoadFailed,
    CreateFailed,
    DeleteFailed,
}

impl Alert {
    fn for_action(action: Action) -> Self {
        match action {
            Action::Load => Alert::LoadFailed,
            Action::Create => Alert::CreateFailed,
            Action::Delete => Alert::DeleteFailed,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Alert::LoadFailed => Action::Load,
            Alert::CreateFailed => Action::Create,
            Alert::DeleteFailed => Action::Delete,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Alert::LoadFailed => "Failed to load the todo list.",
            Alert::CreateFailed => "Failed to add the todo.",
            Alert::DeleteFailed => "Failed to delete the todo.",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Work the host must perform on behalf of the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Execute `request` and hand the outcome back via `TodoView::resolve(id, ..)`.
    Send { id: RequestId, request: HttpRequest },
    /// The todo list or the draft changed.
    Render,
    Alert(Alert),
}

/// How overlapping refetches are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefetchPolicy {
    /// Whichever list response arrives last is shown.
    #[default]
    LastArrival,
    /// A list response is dropped if a newer one has already been applied.
    LatestIssued,
}

#[derive(Debug, Clone, Copy)]
enum Pending {
    Load,
    Create,
    Delete(TodoId),
}

impl Pending {
    fn action(&self) -> Action {
        match self {
            Pending::Load => Action::Load,
            Pending::Create => Action::Create,
            Pending::Delete(_) => Action::Delete,
        }
    }
}

#[derive(Debug)]
pub struct TodoView {
    client: TodoClient,
    query: ListQuery,
    policy: RefetchPolicy,
    todos: Vec<Todo>,
    draft: String,
    pending: HashMap<RequestId, Pending>,
    outcomes: HashMap<Action, Phase>,
    next_request: RequestId,
    latest_applied_load: Option<RequestId>,
    mounted: bool,
}

impl TodoView {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            query: ListQuery::new(),
            policy: RefetchPolicy::default(),
            todos: Vec::new(),
            draft: String::new(),
            pending: HashMap::new(),
            outcomes: HashMap::new(),
            next_request: 1,
            latest_applied_load: None,
            mounted: false,
        }
    }

    pub fn with_policy(mut self, policy: RefetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Query parameters sent with every load.
    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn policy(&self) -> RefetchPolicy {
        self.policy
    }

    /// Number of requests dispatched but not yet resolved.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn phase(&self, action: Action) -> Phase {
        if self.pending.values().any(|p| p.action() == action) {
            return Phase::InFlight;
        }
        self.outcomes.get(&action).copied().unwrap_or(Phase::Idle)
    }

    /// Initial render plus the one load a view performs on its own.
    /// Mounting an already mounted view does nothing.
    pub fn mount(&mut self) -> Vec<Effect> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        vec![Effect::Render, self.start_load()]
    }

    /// Submit the draft as a new todo. Blank drafts are sent as they are,
    /// and nothing stops a second submit while the first is in flight.
    pub fn submit(&mut self) -> Vec<Effect> {
        let input = CreateTodo::new(self.draft.clone());
        match self.client.build_create_todo(&input) {
            Ok(request) => vec![self.dispatch(Pending::Create, request)],
            Err(err) => self.fail(Action::Create, &err),
        }
    }

    pub fn delete(&mut self, id: TodoId) -> Vec<Effect> {
        let request = self.client.build_delete_todo(id);
        vec![self.dispatch(Pending::Delete(id), request)]
    }

    /// Apply the outcome of a request previously handed out in `Effect::Send`.
    pub fn resolve(&mut self, id: RequestId, result: Result<HttpResponse, ApiError>) -> Vec<Effect> {
        let Some(pending) = self.pending.remove(&id) else {
            warn!(request_id = id, "response for unknown request ignored");
            return Vec::new();
        };

        match pending {
            Pending::Load => self.finish_load(id, result),
            Pending::Create => match result.and_then(|r| self.client.parse_create_todo(r)) {
                Ok(_) => {
                    self.outcomes.insert(Action::Create, Phase::Succeeded);
                    let refetch = self.start_load();
                    self.draft.clear();
                    vec![refetch, Effect::Render]
                }
                Err(err) => self.fail(Action::Create, &err),
            },
            Pending::Delete(todo_id) => match result.and_then(|r| self.client.parse_delete_todo(r)) {
                Ok(_) => {
                    debug!(request_id = id, todo_id, "todo deleted");
                    self.outcomes.insert(Action::Delete, Phase::Succeeded);
                    vec![self.start_load()]
                }
                Err(err) => self.fail(Action::Delete, &err),
            },
        }
    }

    fn finish_load(&mut self, id: RequestId, result: Result<HttpResponse, ApiError>) -> Vec<Effect> {
        if self.policy == RefetchPolicy::LatestIssued
            && self.latest_applied_load.is_some_and(|applied| applied > id)
        {
            debug!(request_id = id, "stale list response dropped");
            return Vec::new();
        }

        match result.and_then(|r| self.client.parse_list_todos(r)) {
            Ok(todos) => {
                debug!(request_id = id, count = todos.len(), "todo list replaced");
                self.todos = todos;
                self.latest_applied_load = Some(id);
                self.outcomes.insert(Action::Load, Phase::Succeeded);
                vec![Effect::Render]
            }
            Err(err) => self.fail(Action::Load, &err),
        }
    }

    fn start_load(&mut self) -> Effect {
        let request = self.client.build_list_todos(&self.query);
        self.dispatch(Pending::Load, request)
    }

    fn dispatch(&mut self, pending: Pending, request: HttpRequest) -> Effect {
        let id = self.next_request;
        self.next_request += 1;
        debug!(
            request_id = id,
            action = ?pending.action(),
            method = request.method.as_str(),
            url = %request.url,
            "dispatching request"
        );
        self.pending.insert(id, pending);
        Effect::Send { id, request }
    }

    fn fail(&mut self, action: Action, err: &ApiError) -> Vec<Effect> {
        error!(?action, error = %err, "request failed");
        self.outcomes.insert(action, Phase::Failed);
        vec![Effect::Alert(Alert::for_action(action))]
    }
}
