//! Terminal front-end for the todo API.
//!
//! Drives a `todo_core::TodoView` from line commands on stdin, executes its
//! requests with ureq and prints the list after every change.

pub mod command;
pub mod shell;
pub mod transport;

pub use shell::{render, Shell};
pub use transport::HttpTransport;
