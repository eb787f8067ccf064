//! Unit conversion table
//!
//! Translates a recipe-stated quantity/unit pair into the inventory
//! item's stocked unit. Families never mix: converting "ml" to "kg"
//! fails instead of silently computing a nonsensical number.

use rust_decimal::Decimal;

use super::to_decimal;

/// Unit family a measurement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    Mass,
    Volume,
    Count,
}

/// A unit string resolved against the conversion table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedUnit {
    pub family: UnitFamily,
    /// Scale to the family base: grams, millilitres, or pieces
    pub base_factor: f64,
    /// false when the text matched nothing and fell back to count
    pub recognized: bool,
}

/// Resolve a unit string, case-insensitive and whitespace-tolerant.
///
/// Unknown text resolves to the count family (factor 1): an
/// unrecognized unit is more often a typo than an exotic family, and a
/// broken recipe line must not take down a whole P&L report. Callers
/// record the fallback as a data-quality finding.
pub fn resolve_unit(unit: &str) -> ResolvedUnit {
    use UnitFamily::*;

    let u = unit.trim().to_lowercase();
    let (family, base_factor) = match u.as_str() {
        // Mass (base: gram)
        "mg" | "milligram" | "milligrams" => (Mass, 0.001),
        "g" | "gm" | "gram" | "grams" => (Mass, 1.0),
        "kg" | "kgs" | "kilo" | "kilogram" | "kilograms" => (Mass, 1000.0),

        // Volume (base: millilitre)
        "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => (Volume, 1.0),
        "cl" => (Volume, 10.0),
        "l" | "lt" | "ltr" | "liter" | "liters" | "litre" | "litres" => (Volume, 1000.0),

        // Count (base: piece)
        "pc" | "pcs" | "piece" | "pieces" | "unit" | "units" | "nos" | "no" | "each" | "ea" => {
            (Count, 1.0)
        }

        _ => {
            return ResolvedUnit {
                family: Count,
                base_factor: 1.0,
                recognized: false,
            };
        }
    };

    ResolvedUnit {
        family,
        base_factor,
        recognized: true,
    }
}

/// Rescale `quantity` from `from_unit` into `to_unit`.
///
/// Returns `None` when the two units belong to different families.
pub fn convert_to_inventory_unit(quantity: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    let from = resolve_unit(from_unit);
    let to = resolve_unit(to_unit);

    if from.family != to.family {
        return None;
    }

    Some(quantity * from.base_factor / to.base_factor)
}

/// Monetary cost of one recipe line for a single sold unit.
///
/// Resolves the recipe quantity into the inventory's stocked unit and
/// multiplies by the cost per stocked unit. A failed conversion is
/// absorbed as zero; callers count it and reports keep rendering.
/// Deterministic and side-effect-free.
pub fn ingredient_line_cost(
    recipe_qty: f64,
    recipe_unit: &str,
    inventory_cost_per_unit: f64,
    inventory_unit: &str,
) -> Decimal {
    match convert_to_inventory_unit(recipe_qty, recipe_unit, inventory_unit) {
        Some(converted) => to_decimal(converted) * to_decimal(inventory_cost_per_unit),
        None => Decimal::ZERO,
    }
}
