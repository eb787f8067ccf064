//! COGS sync verification
//!
//! Reconciles two independently computed per-department COGS figures for
//! the same period. The two inputs must come from separate aggregation
//! passes over the backend rows; one side must never derive from the
//! other's cached result, or the check becomes tautological.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;

use shared::models::{DepartmentCogs, SyncReport, SyncResult};
use shared::util::format_money;

use crate::costing::{to_decimal, to_f64};

/// Absolute tolerance: differences under one currency unit are rounding
pub const SYNC_ABS_TOLERANCE: Decimal = Decimal::ONE;

/// Relative tolerance in percent of the average of the two figures
pub const SYNC_PCT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Likely causes surfaced when any figure is out of sync
fn likely_causes() -> Vec<String> {
    [
        "Date-range mismatch between the two report screens",
        "Different order-status filters (e.g. one side includes pending orders)",
        "Per-line rounding accumulating across a large order set",
        "Recipe or inventory cost edits mid-period",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Compare per-department COGS from the hotel-wide pass against the
/// department screens' own figures.
///
/// A department missing on one side is compared against zero: that is
/// the strongest possible desync signal, not an error. `currency_symbol`
/// is only used to render the directional hints.
pub fn verify_cogs_sync(
    hotel_side: &[DepartmentCogs],
    dept_side: &[DepartmentCogs],
    currency_symbol: &str,
) -> SyncReport {
    let hotel: HashMap<&str, f64> = hotel_side
        .iter()
        .map(|d| (d.department.as_str(), d.total_cogs))
        .collect();
    let dept: HashMap<&str, f64> = dept_side
        .iter()
        .map(|d| (d.department.as_str(), d.total_cogs))
        .collect();

    let departments: BTreeSet<&str> = hotel.keys().chain(dept.keys()).copied().collect();

    let mut results = Vec::with_capacity(departments.len());
    let mut hotel_total = Decimal::ZERO;
    let mut dept_total = Decimal::ZERO;

    for department in departments {
        let hotel_value = hotel.get(department).copied().unwrap_or(0.0);
        let dept_value = dept.get(department).copied().unwrap_or(0.0);
        hotel_total += to_decimal(hotel_value);
        dept_total += to_decimal(dept_value);

        let difference = (to_decimal(hotel_value) - to_decimal(dept_value)).abs();
        let avg = (to_decimal(hotel_value) + to_decimal(dept_value)) / Decimal::TWO;
        let percentage_diff = if avg > Decimal::ZERO {
            difference / avg * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        let is_synced = difference < SYNC_ABS_TOLERANCE || percentage_diff < SYNC_PCT_TOLERANCE;

        let hint = if is_synced {
            None
        } else if hotel_value > dept_value {
            Some(format!(
                "Hotel-wide figure is larger by {}; the hotel report likely covers a wider date range or includes orders the {} screen filters out",
                format_money(currency_symbol, to_f64(difference)),
                department,
            ))
        } else {
            Some(format!(
                "The {} screen's figure is larger by {}; it likely covers a wider date range or includes orders the hotel report filters out",
                department,
                format_money(currency_symbol, to_f64(difference)),
            ))
        };

        results.push(SyncResult {
            department: department.to_string(),
            hotel_value,
            dept_value,
            difference: to_f64(difference),
            percentage_diff: to_f64(percentage_diff),
            is_synced,
            hint,
        });
    }

    // Departments drifting in offsetting directions can each sit inside
    // tolerance while the books still disagree, so the grand totals get
    // their own (absolute-only) check.
    let total_difference = (hotel_total - dept_total).abs();
    let all_synced =
        results.iter().all(|r| r.is_synced) && total_difference < SYNC_ABS_TOLERANCE;

    SyncReport {
        results,
        hotel_total: to_f64(hotel_total),
        dept_total: to_f64(dept_total),
        total_difference: to_f64(total_difference),
        all_synced,
        likely_causes: if all_synced { vec![] } else { likely_causes() },
    }
}
