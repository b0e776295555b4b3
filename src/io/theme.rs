//! Category color lookup

use crate::io::configuration::{DEFAULT_CATEGORY, FALLBACK_THEME_COLOR};
use indexmap::IndexMap;

/// Mapping from category name to RGB color
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Theme {
    colors: IndexMap<String, [u8; 3]>,
}

impl Theme {
    /// Create a theme from explicit category colors
    pub const fn new(colors: IndexMap<String, [u8; 3]>) -> Self {
        Self { colors }
    }

    /// Color for `category`
    ///
    /// Unknown categories use the `Other` color when the theme defines one,
    /// and a neutral slate otherwise.
    pub fn color(&self, category: &str) -> [u8; 3] {
        self.colors
            .get(category)
            .or_else(|| self.colors.get(DEFAULT_CATEGORY))
            .copied()
            .unwrap_or(FALLBACK_THEME_COLOR)
    }

    /// Whether the theme names `category` explicitly
    pub fn defines(&self, category: &str) -> bool {
        self.colors.contains_key(category)
    }
}
