//! Reports API Handlers

use std::collections::{BTreeSet, HashSet};

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use shared::models::{DepartmentCogs, PLComparison, SyncReport};

use crate::core::ServerState;
use crate::costing::{
    compute_cogs, compute_cogs_by_department, to_decimal, to_f64, UNASSIGNED_DEPARTMENT,
};
use crate::reporting::{
    build_pl_report, comparison_period, compare_pl_metrics, filter_orders, ComparisonMode,
    PLReport, Period,
};
use crate::utils::time::parse_period;
use crate::utils::AppResult;
use rust_decimal::Decimal;

// ============================================================================
// Response Types
// ============================================================================

/// P&L report response
#[derive(Debug, Serialize)]
pub struct PLReportResponse {
    #[serde(flatten)]
    pub report: PLReport,
    /// Share of COGS derived from the estimation fallback rather than
    /// recipes, so screens can flag partially-estimated figures
    pub estimated_share_pct: f64,
    pub currency: String,
}

/// Two-period comparison response
#[derive(Debug, Serialize)]
pub struct PLComparisonResponse {
    pub current_period: Period,
    pub comparison_period: Period,
    pub comparison_type: ComparisonMode,
    #[serde(flatten)]
    pub comparison: PLComparison,
    pub currency: String,
}

/// COGS sync verification response
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub period: Period,
    #[serde(flatten)]
    pub report: SyncReport,
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PLReportQuery {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PLComparisonQuery {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    #[serde(rename = "comparisonType", default = "default_comparison_type")]
    pub comparison_type: ComparisonMode,
    pub department: Option<String>,
}

fn default_comparison_type() -> ComparisonMode {
    ComparisonMode::Previous
}

#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

// ============================================================================
// Handlers
// ============================================================================

fn estimated_share(estimated_cost: f64, total_cogs: f64) -> f64 {
    if total_cogs > 0.0 {
        to_f64(to_decimal(estimated_cost) / to_decimal(total_cogs) * Decimal::ONE_HUNDRED)
    } else {
        0.0
    }
}

/// GET /api/reports/pl - P&L report for a period
pub async fn get_pl_report(
    State(state): State<ServerState>,
    Query(query): Query<PLReportQuery>,
) -> AppResult<Json<PLReportResponse>> {
    let period = parse_period(&query.start_date, &query.end_date)?;

    tracing::debug!(
        start = %period.start,
        end = %period.end,
        department = ?query.department,
        "Building P&L report"
    );

    let snapshot = state.backend.fetch_snapshot(&period).await?;
    let report = build_pl_report(
        &snapshot.orders,
        &snapshot.order_items,
        &snapshot.menu_items,
        &snapshot.inventory,
        &period,
        query.department.as_deref(),
    );

    if !report.cogs.data_quality.is_clean() {
        tracing::warn!(
            missing_menu_items = report.cogs.data_quality.missing_menu_items,
            missing_inventory_items = report.cogs.data_quality.missing_inventory_items,
            unconvertible_lines = report.cogs.data_quality.unconvertible_lines,
            unknown_units = ?report.cogs.data_quality.unknown_units,
            line_total_mismatches = report.cogs.data_quality.line_total_mismatches,
            "P&L report built over degraded data"
        );
    }

    let estimated_share_pct = estimated_share(report.cogs.estimated_cost, report.cogs.total_cogs);

    Ok(Json(PLReportResponse {
        report,
        estimated_share_pct,
        currency: state.config.currency_symbol.clone(),
    }))
}

/// GET /api/reports/pl/comparison - current period vs a derived prior window
pub async fn get_pl_comparison(
    State(state): State<ServerState>,
    Query(query): Query<PLComparisonQuery>,
) -> AppResult<Json<PLComparisonResponse>> {
    let current_period = parse_period(&query.start_date, &query.end_date)?;
    let prior_period = comparison_period(&current_period, query.comparison_type);

    tracing::debug!(
        current = ?current_period,
        prior = ?prior_period,
        mode = ?query.comparison_type,
        "Building P&L comparison"
    );

    let current_snapshot = state.backend.fetch_snapshot(&current_period).await?;
    let prior_snapshot = state.backend.fetch_snapshot(&prior_period).await?;

    let department = query.department.as_deref();
    let current = build_pl_report(
        &current_snapshot.orders,
        &current_snapshot.order_items,
        &current_snapshot.menu_items,
        &current_snapshot.inventory,
        &current_period,
        department,
    );
    let prior = build_pl_report(
        &prior_snapshot.orders,
        &prior_snapshot.order_items,
        &prior_snapshot.menu_items,
        &prior_snapshot.inventory,
        &prior_period,
        department,
    );

    let comparison = compare_pl_metrics(&current.metrics, &prior.metrics);

    Ok(Json(PLComparisonResponse {
        current_period,
        comparison_period: prior_period,
        comparison_type: query.comparison_type,
        comparison,
        currency: state.config.currency_symbol.clone(),
    }))
}

/// GET /api/reports/cogs-sync - reconcile the hotel-wide per-department
/// COGS split against each department's own recomputed figure
pub async fn get_cogs_sync(
    State(state): State<ServerState>,
    Query(query): Query<SyncQuery>,
) -> AppResult<Json<SyncResponse>> {
    let period = parse_period(&query.start_date, &query.end_date)?;
    let snapshot = state.backend.fetch_snapshot(&period).await?;

    let filtered = filter_orders(&snapshot.orders, &period, None);

    // Path one: single grouped pass over the whole hotel's order set
    let hotel_side = compute_cogs_by_department(
        &filtered,
        &snapshot.order_items,
        &snapshot.menu_items,
        &snapshot.inventory,
    );

    // Path two: each department recomputed in isolation, the way its own
    // report screen would. Kept decoupled from path one so the check
    // stays meaningful.
    let departments: BTreeSet<&str> = filtered
        .iter()
        .map(|o| o.department.as_deref().unwrap_or(UNASSIGNED_DEPARTMENT))
        .collect();

    let dept_side: Vec<DepartmentCogs> = departments
        .into_iter()
        .map(|department| {
            let order_ids: HashSet<String> = filtered
                .iter()
                .filter(|o| {
                    o.department.as_deref().unwrap_or(UNASSIGNED_DEPARTMENT) == department
                })
                .map(|o| o.id.clone())
                .collect();
            let cogs = compute_cogs(
                &order_ids,
                &snapshot.order_items,
                &snapshot.menu_items,
                &snapshot.inventory,
            );
            DepartmentCogs {
                department: department.to_string(),
                total_cogs: cogs.total_cogs,
            }
        })
        .collect();

    let report = crate::reporting::verify_cogs_sync(
        &hotel_side,
        &dept_side,
        &state.config.currency_symbol,
    );

    if !report.all_synced {
        tracing::warn!(
            hotel_total = report.hotel_total,
            dept_total = report.dept_total,
            total_difference = report.total_difference,
            "COGS figures out of sync"
        );
    }

    Ok(Json(SyncResponse { period, report }))
}
