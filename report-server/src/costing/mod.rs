//! Recipe costing engine using rust_decimal for precision
//!
//! Pure, synchronous computation over rows already fetched into memory.
//! All calculations are done using `Decimal` internally, then converted
//! to `f64` for serialization. Dirty data (missing references, units that
//! cannot be converted) degrades to zero-cost contributions and is
//! counted in [`shared::models::DataQuality`]: a report must always
//! render something rather than throw on one broken recipe line.

use rust_decimal::prelude::*;

pub mod cogs;
pub mod units;

pub use cogs::{
    compute_cogs, compute_cogs_by_department, ESTIMATED_CATEGORY, UNASSIGNED_DEPARTMENT,
};
pub use units::{convert_to_inventory_unit, ingredient_line_cost, UnitFamily};

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub(crate) const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Backend rows should never carry NaN/Infinity; if one somehow does,
/// log and treat it as zero rather than poisoning a whole report.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for serialization, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
