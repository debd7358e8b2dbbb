//! Backend communication.
//!
//! # Services
//!
//! - [`api`] - upload, save, export and listing calls to the audit log backend

pub mod api;

pub use api::*;
