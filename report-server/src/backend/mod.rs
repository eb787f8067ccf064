//! Hosted backend access
//!
//! All persistence lives in the hosted relational backend; this module
//! only reads rows from its REST surface. [`ReportSnapshot`] is the
//! in-memory snapshot the pure calculators consume.

mod client;

pub use client::BackendClient;

use shared::models::{InventoryItem, MenuItem, Order, OrderItem};

/// Everything a report render needs, fetched in one round of requests
#[derive(Debug, Clone, Default)]
pub struct ReportSnapshot {
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub menu_items: Vec<MenuItem>,
    pub inventory: Vec<InventoryItem>,
}
