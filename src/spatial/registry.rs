//! Arena of items with their immutable attributes and placement results
//!
//! Items are addressed by a stable [`ItemId`] (their index in input order) and
//! categories are interned once into [`CategoryId`]s, so the layout engine can
//! keep per-category state in plain vectors.

use crate::io::configuration::DEFAULT_CATEGORY;
use crate::io::error::{CloudError, Result, WeightViolation};
use crate::math::radius::is_valid_weight;

/// Stable index of an item within its registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

/// Interned category index within a registry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub usize);

/// Position and size assigned to an item by the layout engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Circle center in canvas pixels `[x, y]`
    pub center: [i32; 2],
    /// Circle radius in pixels
    pub radius: u32,
}

/// A single placeable icon
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// Identifier from the input file, also used to locate the icon
    pub key: String,
    /// Human readable name
    pub display_name: String,
    /// Grouping category
    pub category: CategoryId,
    /// Relative weight in `(0, 1]`
    pub weight: f64,
    placement: Option<Placement>,
}

impl Item {
    /// Placement written by the last successful layout, if any
    pub const fn placement(&self) -> Option<Placement> {
        self.placement
    }
}

/// Ordered collection of items and their interned categories
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemRegistry {
    items: Vec<Item>,
    categories: Vec<String>,
}

impl ItemRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, interning its category
    ///
    /// A missing or blank category falls back to `Other`. Weights are stored as
    /// given and checked by [`ItemRegistry::validate_weights`].
    pub fn push(
        &mut self,
        key: impl Into<String>,
        display_name: impl Into<String>,
        category: Option<&str>,
        weight: f64,
    ) -> ItemId {
        let category_name = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);
        let category = self.intern_category(category_name);

        let id = ItemId(self.items.len());
        self.items.push(Item {
            key: key.into(),
            display_name: display_name.into(),
            category,
            weight,
            placement: None,
        });
        id
    }

    fn intern_category(&mut self, name: &str) -> CategoryId {
        if let Some(index) = self.categories.iter().position(|c| c == name) {
            return CategoryId(index);
        }
        self.categories.push(name.to_string());
        CategoryId(self.categories.len() - 1)
    }

    /// Number of items
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry holds no items
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct categories
    pub const fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// All items in input order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    /// Look up an item by its input key
    pub fn find(&self, key: &str) -> Option<ItemId> {
        self.items.iter().position(|item| item.key == key).map(ItemId)
    }

    /// Name of an interned category
    pub fn category_name(&self, id: CategoryId) -> Option<&str> {
        self.categories.get(id.0).map(String::as_str)
    }

    /// Look up the interned id of a category name
    pub fn category_id(&self, name: &str) -> Option<CategoryId> {
        self.categories.iter().position(|c| c == name).map(CategoryId)
    }

    /// Category names in interning order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Check every weight lies in `(0, 1]`
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidWeight`] listing every offending item
    pub fn validate_weights(&self) -> Result<()> {
        let violations: Vec<WeightViolation> = self
            .items
            .iter()
            .filter(|item| !is_valid_weight(item.weight))
            .map(|item| WeightViolation {
                item: item.key.clone(),
                weight: item.weight,
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CloudError::InvalidWeight { violations })
        }
    }

    /// Record a placement for an item
    pub fn set_placement(&mut self, id: ItemId, placement: Placement) {
        if let Some(item) = self.items.get_mut(id.0) {
            item.placement = Some(placement);
        }
    }

    /// Forget every placement
    pub fn clear_placements(&mut self) {
        for item in &mut self.items {
            item.placement = None;
        }
    }

    /// Number of items currently holding a placement
    pub fn placed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.placement.is_some())
            .count()
    }

    /// Whether every item holds a placement
    pub fn is_fully_placed(&self) -> bool {
        self.items.iter().all(|item| item.placement.is_some())
    }
}
