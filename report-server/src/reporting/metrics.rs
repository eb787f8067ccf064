//! P&L metrics
//!
//! Combines aggregated COGS with order totals into profit figures, and
//! compares two periods metric by metric. Every division is guarded:
//! a zero-revenue period or a zero previous value yields a literal 0 or
//! a neutral delta, never NaN/Infinity.

use rust_decimal::Decimal;

use shared::models::{MetricDelta, MetricDeltas, Order, PLComparison, PLMetrics};

use crate::costing::{to_decimal, to_f64};

/// Compute P&L metrics for a set of already-filtered orders.
///
/// `net_profit = gross_profit - tax`. Discount is not subtracted again:
/// it already reduced `total_amount` upstream and is carried as an
/// informational line only.
pub fn calculate_pl_metrics(orders: &[&Order], cogs: f64) -> PLMetrics {
    let mut revenue = Decimal::ZERO;
    let mut tax = Decimal::ZERO;
    let mut discount = Decimal::ZERO;

    for order in orders {
        revenue += to_decimal(order.total_amount);
        tax += to_decimal(order.tax_amount);
        discount += to_decimal(order.discount_amount);
    }

    let cogs_dec = to_decimal(cogs);
    let gross_profit = revenue - cogs_dec;
    let net_profit = gross_profit - tax;
    let profit_margin = if revenue > Decimal::ZERO {
        net_profit / revenue * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    PLMetrics {
        revenue: to_f64(revenue),
        cogs: to_f64(cogs_dec),
        gross_profit: to_f64(gross_profit),
        tax: to_f64(tax),
        discount: to_f64(discount),
        net_profit: to_f64(net_profit),
        profit_margin: to_f64(profit_margin),
        order_count: orders.len(),
    }
}

/// Delta for one metric. Percentage is `None` when the previous value is
/// zero so renderers show a neutral indicator instead of dividing.
fn delta(current: f64, previous: f64) -> MetricDelta {
    let value_dec = to_decimal(current) - to_decimal(previous);
    let percentage = if previous == 0.0 {
        None
    } else {
        Some(to_f64(
            value_dec / to_decimal(previous).abs() * Decimal::ONE_HUNDRED,
        ))
    };
    MetricDelta {
        value: to_f64(value_dec),
        percentage,
    }
}

/// Compare the current period's metrics against a prior window's.
pub fn compare_pl_metrics(current: &PLMetrics, previous: &PLMetrics) -> PLComparison {
    let deltas = MetricDeltas {
        revenue: delta(current.revenue, previous.revenue),
        cogs: delta(current.cogs, previous.cogs),
        gross_profit: delta(current.gross_profit, previous.gross_profit),
        tax: delta(current.tax, previous.tax),
        discount: delta(current.discount, previous.discount),
        net_profit: delta(current.net_profit, previous.net_profit),
        profit_margin: delta(current.profit_margin, previous.profit_margin),
        order_count: delta(current.order_count as f64, previous.order_count as f64),
    };

    PLComparison {
        current: current.clone(),
        previous: previous.clone(),
        deltas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(total: f64, tax: f64, discount: f64) -> Order {
        Order {
            id: "o".to_string(),
            subtotal: total - tax,
            tax_amount: tax,
            discount_amount: discount,
            total_amount: total,
            payment_status: "paid".to_string(),
            status: "completed".to_string(),
            created_at: Utc::now(),
            department: None,
            order_type: None,
        }
    }

    fn metrics(revenue: f64) -> PLMetrics {
        PLMetrics {
            revenue,
            cogs: 0.0,
            gross_profit: revenue,
            tax: 0.0,
            discount: 0.0,
            net_profit: revenue,
            profit_margin: if revenue > 0.0 { 100.0 } else { 0.0 },
            order_count: 1,
        }
    }

    #[test]
    fn test_pl_metrics() {
        let orders = [order(1000.0, 100.0, 50.0), order(500.0, 50.0, 0.0)];
        let refs: Vec<&Order> = orders.iter().collect();

        let m = calculate_pl_metrics(&refs, 450.0);

        assert_eq!(m.revenue, 1500.0);
        assert_eq!(m.cogs, 450.0);
        assert_eq!(m.gross_profit, 1050.0);
        assert_eq!(m.tax, 150.0);
        assert_eq!(m.discount, 50.0);
        // Discount is not subtracted again from net profit
        assert_eq!(m.net_profit, 900.0);
        assert_eq!(m.profit_margin, 60.0);
        assert_eq!(m.order_count, 2);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let m = calculate_pl_metrics(&[], 0.0);
        assert_eq!(m.profit_margin, 0.0);
        assert_eq!(m.order_count, 0);
    }

    #[test]
    fn test_comparison_deltas() {
        let comparison = compare_pl_metrics(&metrics(200.0), &metrics(100.0));
        assert_eq!(comparison.deltas.revenue.value, 100.0);
        assert_eq!(comparison.deltas.revenue.percentage, Some(100.0));
    }

    #[test]
    fn test_zero_previous_gives_neutral_percentage() {
        let comparison = compare_pl_metrics(&metrics(100.0), &metrics(0.0));
        assert_eq!(comparison.deltas.revenue.value, 100.0);
        assert_eq!(comparison.deltas.revenue.percentage, None);
    }

    #[test]
    fn test_negative_previous_uses_absolute_base() {
        let mut current = metrics(0.0);
        current.net_profit = 50.0;
        let mut previous = metrics(0.0);
        previous.net_profit = -100.0;

        let comparison = compare_pl_metrics(&current, &previous);
        assert_eq!(comparison.deltas.net_profit.value, 150.0);
        assert_eq!(comparison.deltas.net_profit.percentage, Some(150.0));
    }
}
