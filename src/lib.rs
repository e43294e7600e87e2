//! tasky library
//!
//! An in-memory task store served over a JSON REST API, a typed client for
//! that API, and the client-side shell and table view state.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod shell;
pub mod store;
pub mod types;
pub mod view;
