//! Shared types for the hotel reporting stack
//!
//! Row types fetched from the hosted backend, derived report records,
//! the unified error system, and small formatting utilities. Consumed by
//! report-server (and by any other department surface that renders the
//! same rows).

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResponse, AppResult};
pub use serde::{Deserialize, Serialize};
