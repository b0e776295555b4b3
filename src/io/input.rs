//! Item description files
//!
//! The input is a JSON document with an `imgs` object keyed by icon name and an
//! optional `theme` object mapping categories to RGB triples:
//!
//! ```json
//! {
//!   "imgs": {
//!     "Python": { "name": "Python", "type": "Language", "fluency": 0.8 },
//!     "Postman": { "name": "Postman", "fluency": 0.2 }
//!   },
//!   "theme": { "Language": [0, 205, 255], "Other": [47, 56, 64] }
//! }
//! ```
//!
//! Key order is kept, so items are laid out in the order they are listed.

use crate::io::error::{Result, WithContext};
use crate::io::theme::Theme;
use crate::spatial::ItemRegistry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry of the `imgs` object
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ItemSpec {
    /// Display name; defaults to the entry key
    #[serde(default)]
    pub name: Option<String>,
    /// Category; defaults to `Other`
    #[serde(default, rename = "type")]
    pub category: Option<String>,
    /// Relative weight in `(0, 1]`
    #[serde(alias = "weight")]
    pub fluency: f64,
}

/// Parsed item description file
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CloudInput {
    /// Items keyed by icon name, in file order
    pub imgs: IndexMap<String, ItemSpec>,
    /// Category colors
    #[serde(default)]
    pub theme: IndexMap<String, [u8; 3]>,
}

impl CloudInput {
    /// Parse an input document from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid input document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse an input file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_path(path, "read input")?;
        Self::from_json(&text).with_path(path, "parse input")
    }

    /// Build the item registry, preserving file order
    pub fn registry(&self) -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        for (key, spec) in &self.imgs {
            let name = spec.name.as_deref().unwrap_or(key);
            registry.push(key.as_str(), name, spec.category.as_deref(), spec.fluency);
        }
        registry
    }

    /// Category colors as a theme
    pub fn theme(&self) -> Theme {
        Theme::new(self.theme.clone())
    }
}
