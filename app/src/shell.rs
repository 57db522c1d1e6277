//! Event loop connecting stdin, the view and the network.
//!
//! # Design
//! The view is only touched from this loop. Each `Effect::Send` is executed
//! on a blocking worker thread and its completion is queued back to the
//! loop, so responses are resolved strictly in arrival order. Nothing is
//! cancelled: overlapping refetches race and the view's refetch policy
//! decides what is shown.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use todo_core::{ApiError, Effect, HttpResponse, RequestId, TodoView};

use crate::command::{self, Command, HELP};
use crate::transport::HttpTransport;

type Completion = (RequestId, Result<HttpResponse, ApiError>);

/// Text rendering of the list and the draft.
pub fn render(view: &TodoView) -> String {
    let mut out = String::from("Todo App\n");
    if view.todos().is_empty() {
        out.push_str("  (no todos)\n");
    }
    for todo in view.todos() {
        out.push_str(&format!("  [{}] {}\n", todo.id, todo.content));
    }
    out.push_str(&format!("draft: {:?}\n", view.draft()));
    out
}

pub struct Shell<W> {
    view: TodoView,
    transport: HttpTransport,
    out: W,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl<W: Write> Shell<W> {
    pub fn new(view: TodoView, transport: HttpTransport, out: W) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            view,
            transport,
            out,
            tx,
            rx,
        }
    }

    /// Mount the view and process commands until `quit`, or until input
    /// ends and every outstanding request has been resolved.
    /// Hands back the output sink.
    pub async fn run<R>(mut self, input: R) -> anyhow::Result<W>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut input_open = true;

        let effects = self.view.mount();
        self.apply(effects)?;

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => match line? {
                    Some(line) => {
                        if !self.handle_line(&line)? {
                            break;
                        }
                    }
                    None => input_open = false,
                },
                Some((id, result)) = self.rx.recv() => {
                    let effects = self.view.resolve(id, result);
                    self.apply(effects)?;
                }
            }

            if !input_open && self.view.in_flight() == 0 {
                break;
            }
        }

        self.out.flush()?;
        Ok(self.out)
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> std::io::Result<bool> {
        let command = match command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(true);
            }
        };

        let effects = match command {
            Command::Type(text) => {
                self.view.set_draft(text);
                vec![Effect::Render]
            }
            Command::Submit => self.view.submit(),
            Command::Add(text) => {
                self.view.set_draft(text);
                self.view.submit()
            }
            Command::Delete(id) => self.view.delete(id),
            Command::Show => vec![Effect::Render],
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                Vec::new()
            }
            Command::Quit => return Ok(false),
        };
        self.apply(effects)?;
        Ok(true)
    }

    fn apply(&mut self, effects: Vec<Effect>) -> std::io::Result<()> {
        for effect in effects {
            match effect {
                Effect::Send { id, request } => {
                    let transport = self.transport.clone();
                    let tx = self.tx.clone();
                    tokio::task::spawn_blocking(move || {
                        let result = transport.execute(&request);
                        // The loop may already be gone after `quit`.
                        let _ = tx.send((id, result));
                    });
                }
                Effect::Render => write!(self.out, "{}", render(&self.view))?,
                Effect::Alert(alert) => writeln!(self.out, "[alert] {alert}")?,
            }
        }
        self.out.flush()
    }
}
