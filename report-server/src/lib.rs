//! Hotel Report Server
//!
//! Reporting node for the hotel management stack. Orders, menu recipes
//! and inventory live in the hosted backend; this service fetches them
//! and serves recipe-based COGS, P&L and sync-verification reports.
//!
//! # Module structure
//!
//! ```text
//! report-server/src/
//! ├── core/       # configuration, state, server bootstrap
//! ├── backend/    # hosted backend REST client + snapshot cache
//! ├── costing/    # unit conversion + recipe COGS engine
//! ├── reporting/  # periods, P&L metrics, sync verification
//! ├── api/        # HTTP routes and handlers
//! └── utils/      # logging, time helpers
//! ```

pub mod api;
pub mod backend;
pub mod core;
pub mod costing;
pub mod reporting;
pub mod utils;

// Re-export public types
pub use backend::{BackendClient, ReportSnapshot};
pub use core::{build_app, Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(std::env::var("LOG_LEVEL").ok().as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
 ____                       _     ____
|  _ \ ___ _ __   ___  _ __| |_  / ___|  ___ _ ____   _____ _ __
| |_) / _ \ '_ \ / _ \| '__| __| \___ \ / _ \ '__\ \ / / _ \ '__|
|  _ <  __/ |_) | (_) | |  | |_   ___) |  __/ |   \ V /  __/ |
|_| \_\___| .__/ \___/|_|   \__| |____/ \___|_|    \_/ \___|_|
          |_|
"#
    );
}
