//! Reports API module
//!
//! P&L reports, two-period comparisons, and COGS sync verification.

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub use handler::{PLComparisonResponse, PLReportResponse, SyncResponse};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/pl", get(handler::get_pl_report))
        .route("/pl/comparison", get(handler::get_pl_comparison))
        .route("/cogs-sync", get(handler::get_cogs_sync))
}
