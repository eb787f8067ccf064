//! Core module - configuration, state, and server bootstrap

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::{build_app, Server};
pub use state::ServerState;
