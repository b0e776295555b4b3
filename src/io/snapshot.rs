//! Saved layouts that can be re-rendered without running placement again

use crate::algorithm::executor::{LayoutResult, PlacedItem};
use crate::io::error::{Result, WithContext, invalid_snapshot};
use crate::spatial::{Canvas, ItemId, ItemRegistry, Placement};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a finished layout
///
/// Centers are grouped by category in placement order; radii are keyed by item.
/// Because placement follows registry order, the n-th center of a category
/// belongs to the n-th item of that category.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LayoutSnapshot {
    /// Canvas side in pixels
    pub canvas_size: u32,
    /// Centers per category
    pub clusters: IndexMap<String, Vec<[i32; 2]>>,
    /// Radius per item key
    pub radii: IndexMap<String, u32>,
}

impl LayoutSnapshot {
    /// Capture a finished layout
    pub fn from_result(result: &LayoutResult) -> Self {
        Self {
            canvas_size: result.canvas_size,
            clusters: result.clusters.clone(),
            radii: result
                .items
                .iter()
                .map(|item| (item.key.clone(), item.radius))
                .collect(),
        }
    }

    /// Write the snapshot as pretty JSON, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }
        let json = serde_json::to_string_pretty(self).with_path(path, "serialize snapshot")?;
        std::fs::write(path, json).with_path(path, "write snapshot")
    }

    /// Read a snapshot written by [`LayoutSnapshot::save`]
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_path(path, "read snapshot")?;
        serde_json::from_str(&text).with_path(path, "parse snapshot")
    }

    /// Apply the snapshot to `registry` and rebuild the layout result
    ///
    /// All placements are written only once the whole snapshot has been matched,
    /// so a mismatch leaves the registry without placements.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CloudError::InvalidSnapshot`] if the canvas size is
    /// unusable, an item has no radius or one that does not fit the canvas, a
    /// center lies off the canvas, or a category has too few or too many centers
    pub fn restore(&self, registry: &mut ItemRegistry) -> Result<LayoutResult> {
        registry.clear_placements();
        let canvas = Canvas::new(self.canvas_size, 0.0).map_err(|e| invalid_snapshot(&e))?;
        let max_radius = canvas.size / 2;

        let mut cursors: IndexMap<&str, usize> = IndexMap::new();
        let mut items = Vec::with_capacity(registry.len());

        for (index, item) in registry.items().iter().enumerate() {
            let category = registry.category_name(item.category).unwrap_or_default();
            let radius = self
                .radii
                .get(&item.key)
                .copied()
                .ok_or_else(|| invalid_snapshot(&format!("no radius for '{}'", item.key)))?;
            if radius == 0 || radius > max_radius {
                return Err(invalid_snapshot(&format!(
                    "radius {radius} of '{}' is outside 1..={max_radius}",
                    item.key
                )));
            }

            let cursor = cursors.entry(category).or_insert(0);
            let center = self
                .clusters
                .get(category)
                .and_then(|centers| centers.get(*cursor))
                .copied()
                .ok_or_else(|| {
                    invalid_snapshot(&format!("category '{category}' has too few centers"))
                })?;
            if !canvas.contains(center) {
                return Err(invalid_snapshot(&format!(
                    "center {center:?} of '{}' lies off the {}px canvas",
                    item.key, canvas.size
                )));
            }
            *cursor += 1;

            items.push(PlacedItem {
                id: ItemId(index),
                key: item.key.clone(),
                display_name: item.display_name.clone(),
                category: category.to_string(),
                weight: item.weight,
                center,
                radius,
            });
        }

        for (category, centers) in &self.clusters {
            let used = cursors.get(category.as_str()).copied().unwrap_or(0);
            if used != centers.len() {
                return Err(invalid_snapshot(&format!(
                    "category '{category}' has {} centers for {used} items",
                    centers.len()
                )));
            }
        }

        for placed in &items {
            registry.set_placement(
                placed.id,
                Placement {
                    center: placed.center,
                    radius: placed.radius,
                },
            );
        }

        Ok(LayoutResult {
            canvas_size: self.canvas_size,
            items,
            clusters: self.clusters.clone(),
            attempts: 0,
            total_draws: 0,
        })
    }
}
