//! Product catalog types.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Number of stars in a rating display.
pub const MAX_STARS: usize = 5;

/// A selectable color swatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorOption {
    /// Display name, also the selection value.
    pub name: String,
    /// CSS hex color, e.g. "#EF4444".
    pub hex: String,
}

impl ColorOption {
    /// Create a new color option.
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }

    /// White swatches need an outline to be visible.
    pub fn needs_outline(&self) -> bool {
        self.hex.eq_ignore_ascii_case("#FFFFFF")
    }
}

/// A product as shown on its detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: String,
    /// Product name.
    pub name: String,
    /// Current price.
    pub price: Money,
    /// Price before the discount, if any.
    #[serde(default)]
    pub old_price: Option<Money>,
    /// Average rating out of five.
    pub rating: f32,
    /// Number of reviews.
    #[serde(default)]
    pub reviews: u32,
    /// Gallery image URLs in display order.
    pub images: Vec<String>,
    /// Available sizes.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Available colors.
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// Number of gallery images.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Image URL at `index`.
    pub fn image(&self, index: usize) -> Option<&str> {
        self.images.get(index).map(String::as_str)
    }

    /// Rounded discount percentage; zero without an old price.
    pub fn discount_percent(&self) -> i64 {
        self.old_price
            .map(|old| self.price.discount_from(&old))
            .unwrap_or(0)
    }

    /// Value of one of `parts` interest-free installments.
    pub fn installment(&self, parts: u32) -> Money {
        self.price.installment(parts)
    }

    /// Number of filled stars: the rating rounded down, capped at five.
    pub fn filled_stars(&self) -> usize {
        if self.rating.is_nan() || self.rating <= 0.0 {
            return 0;
        }
        (self.rating.floor() as usize).min(MAX_STARS)
    }

    /// Check if a size is offered.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Find a color by name.
    pub fn color(&self, name: &str) -> Option<&ColorOption> {
        self.colors.iter().find(|c| c.name == name)
    }
}
