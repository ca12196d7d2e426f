//! Kasfolio HTTP server.
//!
//! Library surface mirroring the binary so integration tests can build the
//! router and application state in-process.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod main_lib;
pub mod update_stream;
pub mod view_cache;

pub use main_lib::{build_state, init_tracing, AppState};
