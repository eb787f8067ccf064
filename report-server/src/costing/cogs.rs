//! Recipe-based COGS aggregation
//!
//! Single pass over the order items of a filtered order set. Items whose
//! menu item carries a recipe are costed ingredient by ingredient against
//! inventory unit costs; items without one fall back to a flat estimation
//! rule. Recipe cost is defined per single sold unit, so the sold
//! quantity multiplies it.
//!
//! Every invocation starts from fresh zeroed accumulators; repeated
//! calls with identical inputs yield identical outputs.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use rust_decimal::Decimal;

use shared::models::{
    CategoryCostBreakdown, CogsBreakdown, DataQuality, DepartmentCogs, IngredientDetail,
    InventoryItem, MenuItem, Order, OrderItem,
};

use super::units::{convert_to_inventory_unit, resolve_unit};
use super::{to_decimal, to_f64, MONEY_TOLERANCE};

/// Synthetic category for items costed without a recipe
pub const ESTIMATED_CATEGORY: &str = "Estimated";

/// Flat estimation rule for recipe-less items: 30% of line revenue
pub const ESTIMATED_COST_RATIO: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Department bucket for orders carrying no department tag
pub const UNASSIGNED_DEPARTMENT: &str = "unassigned";

#[derive(Default)]
struct IngredientAcc {
    unit: String,
    cost_price: f64,
    quantity: Decimal,
    cost: Decimal,
    used_in: BTreeSet<String>,
}

#[derive(Default)]
struct CategoryAcc {
    total: Decimal,
    ingredients: BTreeMap<String, IngredientAcc>,
}

/// Aggregate COGS over the order items belonging to `order_ids`.
///
/// Missing menu items, missing inventory items and non-convertible units
/// all degrade to zero-cost contributions for that one line; they never
/// abort aggregation of the rest. The findings are counted in
/// [`DataQuality`] so screens can surface how much of the figure is
/// degraded or estimated.
pub fn compute_cogs(
    order_ids: &HashSet<String>,
    order_items: &[OrderItem],
    menu_items: &[MenuItem],
    inventory: &[InventoryItem],
) -> CogsBreakdown {
    let mut quality = DataQuality::default();

    // No orders => no COGS. This overrides any residual estimation math
    // on stray order items in the inputs.
    if order_ids.is_empty() {
        return CogsBreakdown {
            total_cogs: 0.0,
            estimated_cost: 0.0,
            recipe_based_item_count: 0,
            estimated_item_count: 0,
            breakdown: vec![],
            data_quality: quality,
        };
    }

    let menu_by_id: HashMap<&str, &MenuItem> =
        menu_items.iter().map(|m| (m.id.as_str(), m)).collect();
    let inventory_by_id: HashMap<&str, &InventoryItem> =
        inventory.iter().map(|i| (i.id.as_str(), i)).collect();

    let mut total = Decimal::ZERO;
    let mut estimated_total = Decimal::ZERO;
    let mut recipe_based_item_count = 0usize;
    let mut estimated_item_count = 0usize;
    let mut categories: BTreeMap<String, CategoryAcc> = BTreeMap::new();
    let mut unknown_units: BTreeSet<String> = BTreeSet::new();

    for item in order_items {
        if !order_ids.contains(&item.order_id) {
            continue;
        }

        // Reconcile the stored line total against quantity * unit_price.
        // Flag only; historical lines are never recosted.
        let recomputed = to_decimal(item.unit_price) * Decimal::from(item.quantity);
        if (to_decimal(item.total_price) - recomputed).abs() > MONEY_TOLERANCE {
            quality.line_total_mismatches += 1;
            tracing::warn!(
                order_item = %item.id,
                total_price = item.total_price,
                recomputed = %recomputed,
                "Stored line total disagrees with quantity * unit_price"
            );
        }

        let menu_item = item.menu_item_id.as_deref().and_then(|id| {
            let found = menu_by_id.get(id).copied();
            if found.is_none() {
                quality.missing_menu_items += 1;
            }
            found
        });

        match menu_item {
            Some(menu_item) if menu_item.has_recipe() => {
                recipe_based_item_count += 1;
                let sold_qty = Decimal::from(item.quantity);

                for ingredient in &menu_item.ingredients {
                    let Some(inv) = inventory_by_id.get(ingredient.inventory_id.as_str()) else {
                        quality.missing_inventory_items += 1;
                        tracing::warn!(
                            menu_item = %menu_item.name,
                            inventory_id = %ingredient.inventory_id,
                            "Recipe references a missing inventory item"
                        );
                        continue;
                    };

                    for unit in [ingredient.unit.as_str(), inv.unit.as_str()] {
                        if !resolve_unit(unit).recognized {
                            unknown_units.insert(unit.trim().to_lowercase());
                        }
                    }

                    let converted =
                        convert_to_inventory_unit(ingredient.quantity, &ingredient.unit, &inv.unit);
                    let Some(converted) = converted else {
                        quality.unconvertible_lines += 1;
                        tracing::warn!(
                            menu_item = %menu_item.name,
                            ingredient = %inv.name,
                            recipe_unit = %ingredient.unit,
                            inventory_unit = %inv.unit,
                            "Recipe unit not convertible to stocked unit, costing line at zero"
                        );
                        continue;
                    };

                    let line_cost = to_decimal(converted) * to_decimal(inv.cost_price) * sold_qty;
                    let consumed = to_decimal(converted) * sold_qty;

                    total += line_cost;
                    let category = categories.entry(inv.category.clone()).or_default();
                    category.total += line_cost;

                    let acc = category.ingredients.entry(inv.name.clone()).or_default();
                    acc.unit = inv.unit.clone();
                    acc.cost_price = inv.cost_price;
                    acc.quantity += consumed;
                    acc.cost += line_cost;
                    acc.used_in.insert(menu_item.name.clone());
                }
            }
            _ => {
                // Recipe-less (or dangling) item: 30% of line revenue,
                // filed under a synthetic category grouped by item name.
                estimated_item_count += 1;
                let cost = to_decimal(item.total_price) * ESTIMATED_COST_RATIO;

                total += cost;
                estimated_total += cost;
                let category = categories
                    .entry(ESTIMATED_CATEGORY.to_string())
                    .or_default();
                category.total += cost;

                let acc = category.ingredients.entry(item.item_name.clone()).or_default();
                acc.quantity += Decimal::from(item.quantity);
                acc.cost += cost;
                acc.used_in.insert(item.item_name.clone());
            }
        }
    }

    quality.unknown_units = unknown_units.into_iter().collect();

    let mut breakdown: Vec<CategoryCostBreakdown> = categories
        .into_iter()
        .map(|(category, acc)| {
            let percentage = if total > Decimal::ZERO {
                to_f64(acc.total / total * Decimal::ONE_HUNDRED)
            } else {
                0.0
            };
            CategoryCostBreakdown {
                category,
                total_cost: to_f64(acc.total),
                percentage,
                ingredients: acc
                    .ingredients
                    .into_iter()
                    .map(|(name, ing)| IngredientDetail {
                        name,
                        unit: ing.unit,
                        cost_price: ing.cost_price,
                        total_quantity: to_f64(ing.quantity),
                        total_cost: to_f64(ing.cost),
                        used_in: ing.used_in.into_iter().collect(),
                    })
                    .collect(),
            }
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.total_cost
            .partial_cmp(&a.total_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    CogsBreakdown {
        total_cogs: to_f64(total),
        estimated_cost: to_f64(estimated_total),
        recipe_based_item_count,
        estimated_item_count,
        breakdown,
        data_quality: quality,
    }
}

/// Cost of a single order item, without breakdown bookkeeping.
///
/// Same costing rules as [`compute_cogs`]; used by the grouped
/// department pass so the sync screen gets a second aggregation path
/// that does not reuse the detailed report's results.
fn order_item_cost(
    item: &OrderItem,
    menu_by_id: &HashMap<&str, &MenuItem>,
    inventory_by_id: &HashMap<&str, &InventoryItem>,
) -> Decimal {
    let menu_item = item
        .menu_item_id
        .as_deref()
        .and_then(|id| menu_by_id.get(id).copied());

    match menu_item {
        Some(menu_item) if menu_item.has_recipe() => {
            let sold_qty = Decimal::from(item.quantity);
            menu_item
                .ingredients
                .iter()
                .map(|ingredient| {
                    let Some(inv) = inventory_by_id.get(ingredient.inventory_id.as_str()) else {
                        return Decimal::ZERO;
                    };
                    super::units::ingredient_line_cost(
                        ingredient.quantity,
                        &ingredient.unit,
                        inv.cost_price,
                        &inv.unit,
                    ) * sold_qty
                })
                .sum()
        }
        _ => to_decimal(item.total_price) * ESTIMATED_COST_RATIO,
    }
}

/// Per-department COGS in one pass over the whole hotel's order set.
///
/// Orders with no department tag land in [`UNASSIGNED_DEPARTMENT`].
/// Departments are returned sorted by name.
pub fn compute_cogs_by_department(
    orders: &[&Order],
    order_items: &[OrderItem],
    menu_items: &[MenuItem],
    inventory: &[InventoryItem],
) -> Vec<DepartmentCogs> {
    let menu_by_id: HashMap<&str, &MenuItem> =
        menu_items.iter().map(|m| (m.id.as_str(), m)).collect();
    let inventory_by_id: HashMap<&str, &InventoryItem> =
        inventory.iter().map(|i| (i.id.as_str(), i)).collect();

    let department_by_order: HashMap<&str, &str> = orders
        .iter()
        .map(|o| {
            (
                o.id.as_str(),
                o.department.as_deref().unwrap_or(UNASSIGNED_DEPARTMENT),
            )
        })
        .collect();

    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for item in order_items {
        let Some(&department) = department_by_order.get(item.order_id.as_str()) else {
            continue;
        };
        let cost = order_item_cost(item, &menu_by_id, &inventory_by_id);
        *totals.entry(department).or_insert(Decimal::ZERO) += cost;
    }

    totals
        .into_iter()
        .map(|(department, total)| DepartmentCogs {
            department: department.to_string(),
            total_cogs: to_f64(total),
        })
        .collect()
}
