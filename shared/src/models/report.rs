//! Report Models
//!
//! Derived records produced by the costing and reporting layers. None of
//! these are persisted; every report render rebuilds them from the
//! order/menu/inventory rows.

use serde::{Deserialize, Serialize};

/// Profit & loss metrics for one period
///
/// `net_profit = gross_profit - tax`. Discount is NOT subtracted again
/// here: it already reduced `total_amount` (and hence revenue) upstream,
/// and is carried as a separate informational figure for the waterfall
/// display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PLMetrics {
    pub revenue: f64,
    pub cogs: f64,
    pub gross_profit: f64,
    pub tax: f64,
    pub discount: f64,
    pub net_profit: f64,
    /// net_profit / revenue * 100, 0 when revenue is 0
    pub profit_margin: f64,
    pub order_count: usize,
}

/// Change in a single metric between two periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    /// current - previous
    pub value: f64,
    /// (value / |previous|) * 100; None when previous is 0 so renderers
    /// show a neutral indicator instead of dividing by zero
    pub percentage: Option<f64>,
}

/// Per-metric deltas between the current and comparison periods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricDeltas {
    pub revenue: MetricDelta,
    pub cogs: MetricDelta,
    pub gross_profit: MetricDelta,
    pub tax: MetricDelta,
    pub discount: MetricDelta,
    pub net_profit: MetricDelta,
    pub profit_margin: MetricDelta,
    pub order_count: MetricDelta,
}

/// Two-period P&L comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PLComparison {
    pub current: PLMetrics,
    pub previous: PLMetrics,
    pub deltas: MetricDeltas,
}

/// One ingredient's contribution inside a category bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDetail {
    pub name: String,
    /// Inventory stocked unit ("" for estimated lines)
    pub unit: String,
    /// Cost per stocked unit (0 for estimated lines)
    pub cost_price: f64,
    /// Total quantity consumed, in the stocked unit
    pub total_quantity: f64,
    pub total_cost: f64,
    /// Menu item names using this ingredient, deduplicated
    pub used_in: Vec<String>,
}

/// Per-category COGS bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCostBreakdown {
    pub category: String,
    pub total_cost: f64,
    /// Share of overall COGS, 0 when total COGS is 0 (never NaN)
    pub percentage: f64,
    pub ingredients: Vec<IngredientDetail>,
}

/// Data-quality findings accumulated while costing a period
///
/// These count degraded lines. Every one of them was costed at zero (or
/// flagged without correction) rather than aborting the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataQuality {
    /// Order items whose menu_item_id no longer resolves
    pub missing_menu_items: usize,
    /// Recipe lines whose inventory_id no longer resolves
    pub missing_inventory_items: usize,
    /// Recipe lines whose unit family differs from the stocked unit's
    pub unconvertible_lines: usize,
    /// Distinct unit strings that matched no known family (costed as count)
    pub unknown_units: Vec<String>,
    /// Order items where total_price disagrees with quantity * unit_price
    pub line_total_mismatches: usize,
}

impl DataQuality {
    /// Whether any finding was recorded
    pub fn is_clean(&self) -> bool {
        self.missing_menu_items == 0
            && self.missing_inventory_items == 0
            && self.unconvertible_lines == 0
            && self.unknown_units.is_empty()
            && self.line_total_mismatches == 0
    }
}

/// Aggregated COGS for a filtered order set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CogsBreakdown {
    pub total_cogs: f64,
    /// Portion of total_cogs derived from the estimation fallback
    pub estimated_cost: f64,
    pub recipe_based_item_count: usize,
    pub estimated_item_count: usize,
    /// Category buckets sorted by descending cost
    pub breakdown: Vec<CategoryCostBreakdown>,
    pub data_quality: DataQuality,
}

/// One department's COGS figure, as produced by one computation path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentCogs {
    pub department: String,
    pub total_cogs: f64,
}

/// Reconciliation verdict for one department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResult {
    pub department: String,
    pub hotel_value: f64,
    pub dept_value: f64,
    pub difference: f64,
    /// difference / average * 100, 0 when the average is 0
    pub percentage_diff: f64,
    pub is_synced: bool,
    /// Directional hint when out of sync
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Full sync-verification report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub results: Vec<SyncResult>,
    pub hotel_total: f64,
    pub dept_total: f64,
    pub total_difference: f64,
    /// Every department synced AND the grand totals within tolerance
    pub all_synced: bool,
    /// Likely causes to surface when anything is out of sync
    pub likely_causes: Vec<String>,
}
