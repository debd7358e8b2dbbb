//! HTTP API module.
//!
//! The axum server, its shared state, the JSON contracts and the log
//! broadcaster feeding `/api/logs`.

pub mod logs;
pub mod server;
pub mod state;
pub mod types;

pub use logs::*;
pub use server::{build_router, start_server};
pub use state::AppState;
pub use types::*;
