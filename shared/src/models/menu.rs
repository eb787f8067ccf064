//! Menu Model

use serde::{Deserialize, Serialize};

/// One line of a menu item's recipe
///
/// `unit` may differ from the referenced inventory item's stocked unit
/// (recipe states grams, inventory is tracked in kilograms). A line whose
/// unit cannot be converted contributes zero cost and is surfaced as a
/// data-quality finding, never a hard error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Inventory item reference
    pub inventory_id: String,
    /// Quantity per single sold unit of the menu item, > 0
    pub quantity: f64,
    pub unit: String,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Sale price per unit
    pub price: f64,
    /// Recipe lines; empty means the item is costed by estimation
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

impl MenuItem {
    /// Whether the item carries a recipe (non-empty ingredient list)
    pub fn has_recipe(&self) -> bool {
        !self.ingredients.is_empty()
    }
}
