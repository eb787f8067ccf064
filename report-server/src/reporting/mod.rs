//! Reporting layer
//!
//! Periods and comparison windows, P&L metrics, report assembly, and the
//! COGS sync verifier. Everything here is a pure function over rows
//! already fetched into memory, safe to re-invoke on every request.

pub mod metrics;
pub mod period;
pub mod report;
pub mod sync;

pub use metrics::{calculate_pl_metrics, compare_pl_metrics};
pub use period::{comparison_period, ComparisonMode, Period};
pub use report::{build_pl_report, filter_orders, PLReport};
pub use sync::verify_cogs_sync;
