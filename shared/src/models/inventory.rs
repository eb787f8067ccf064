//! Inventory Model

use serde::{Deserialize, Serialize};

/// Inventory item entity
///
/// Owned by a department's inventory collection. Stock adjustments are
/// written by the department screens against the backend; the costing
/// engine only ever reads these rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    /// Free-form category (e.g. "Dairy", "Spirits")
    pub category: String,
    /// Stocked unit (e.g. "kg", "l", "pcs")
    pub unit: String,
    /// Cost per stocked unit, non-negative
    pub cost_price: f64,
    /// Owning department tag (e.g. "kitchen", "bar")
    #[serde(default)]
    pub department: Option<String>,
}
