//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order statuses excluded from revenue and COGS
pub const EXCLUDED_ORDER_STATUSES: &[&str] = &["void", "cancelled"];

/// Order entity
///
/// The filtering unit for all reporting: an order belongs to a period if
/// `created_at` falls on a calendar day inside the closed interval.
/// Totals are written by the order-entry screens at sale time and are
/// never recosted when tax or recipe settings change later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    /// e.g. "paid", "pending", "refunded"
    pub payment_status: String,
    /// e.g. "completed", "preparing", "void", "cancelled"
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// Originating department (e.g. "restaurant", "bar", "spa")
    #[serde(default)]
    pub department: Option<String>,
    /// e.g. "dine_in", "room_service", "takeaway"
    #[serde(default)]
    pub order_type: Option<String>,
}

impl Order {
    /// Whether this order counts toward revenue and COGS
    pub fn is_countable(&self) -> bool {
        let status = self.status.to_lowercase();
        !EXCLUDED_ORDER_STATUSES.contains(&status.as_str())
    }
}

/// Order line entity
///
/// `item_name` is denormalized so the line outlives menu edits, and
/// `total_price` is trusted as written at sale time; the costing engine
/// flags (but never corrects) lines where it disagrees with
/// `quantity * unit_price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    /// May be absent when the menu item was deleted or renamed
    #[serde(default)]
    pub menu_item_id: Option<String>,
    pub item_name: String,
    /// Units sold, positive
    pub quantity: i32,
    pub unit_price: f64,
    /// Line total as written at sale time (= quantity * unit_price)
    pub total_price: f64,
}
