//! kino-api: liveness endpoint for kino-bot
//!
//! A single static route used by external uptime checks.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{bind, serve};
