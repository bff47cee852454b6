//! Konversi API Server module
//!
//! Provides the HTTP REST API for student records and score conversion.
//! Run with `konversi-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server};
