//! Report assembly
//!
//! Wires the order filter, the COGS aggregator and the metrics
//! calculator into the records the API serves.

use serde::Serialize;

use shared::models::{CogsBreakdown, InventoryItem, MenuItem, Order, OrderItem, PLMetrics};

use crate::costing::compute_cogs;
use crate::reporting::Period;

/// P&L report for one period (optionally one department)
#[derive(Debug, Clone, Serialize)]
pub struct PLReport {
    pub period: Period,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub metrics: PLMetrics,
    pub cogs: CogsBreakdown,
}

/// Orders that count toward a report: inside the period, not
/// void/cancelled, and matching the department filter when one is given.
pub fn filter_orders<'a>(
    orders: &'a [Order],
    period: &Period,
    department: Option<&str>,
) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| o.is_countable())
        .filter(|o| period.contains(o.created_at))
        .filter(|o| match department {
            Some(dept) => o
                .department
                .as_deref()
                .is_some_and(|d| d.eq_ignore_ascii_case(dept)),
            None => true,
        })
        .collect()
}

/// Build the full P&L report for a period.
pub fn build_pl_report(
    orders: &[Order],
    order_items: &[OrderItem],
    menu_items: &[MenuItem],
    inventory: &[InventoryItem],
    period: &Period,
    department: Option<&str>,
) -> PLReport {
    let filtered = filter_orders(orders, period, department);
    let order_ids = filtered.iter().map(|o| o.id.clone()).collect();

    let cogs = compute_cogs(&order_ids, order_items, menu_items, inventory);
    let metrics = super::calculate_pl_metrics(&filtered, cogs.total_cogs);

    PLReport {
        period: *period,
        department: department.map(String::from),
        metrics,
        cogs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn order(id: &str, created_at: &str, status: &str, department: Option<&str>) -> Order {
        Order {
            id: id.to_string(),
            subtotal: 100.0,
            tax_amount: 10.0,
            discount_amount: 0.0,
            total_amount: 100.0,
            payment_status: "paid".to_string(),
            status: status.to_string(),
            created_at: created_at.parse().unwrap(),
            department: department.map(String::from),
            order_type: None,
        }
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_filter_excludes_void_and_out_of_period() {
        let orders = vec![
            order("o1", "2026-03-10T09:00:00Z", "completed", Some("bar")),
            order("o2", "2026-03-10T10:00:00Z", "VOID", Some("bar")),
            order("o3", "2026-03-20T10:00:00Z", "completed", Some("bar")),
        ];
        let period = Period::new(d("2026-03-09"), d("2026-03-11"));

        let filtered = filter_orders(&orders, &period, None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "o1");
    }

    #[test]
    fn test_department_filter_is_case_insensitive() {
        let orders = vec![
            order("o1", "2026-03-10T09:00:00Z", "completed", Some("Bar")),
            order("o2", "2026-03-10T10:00:00Z", "completed", Some("spa")),
            order("o3", "2026-03-10T11:00:00Z", "completed", None),
        ];
        let period = Period::new(d("2026-03-10"), d("2026-03-10"));

        let filtered = filter_orders(&orders, &period, Some("bar"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "o1");
    }

    #[test]
    fn test_empty_period_builds_zeroed_report() {
        let orders = vec![order("o1", "2026-03-10T09:00:00Z", "completed", None)];
        let period = Period::new(d("2026-01-01"), d("2026-01-31"));

        let report = build_pl_report(&orders, &[], &[], &[], &period, None);
        assert_eq!(report.metrics.revenue, 0.0);
        assert_eq!(report.cogs.total_cogs, 0.0);
        assert_eq!(report.metrics.order_count, 0);
    }
}
