//! Wire shape of the persisted page state.
//!
//! Stored under a single key as
//! `{selectedSize, selectedColor, selectedImage, cep, address, quantity, isFavorite, timestamp}`;
//! the timestamp is added by [`vitrine_cache::SnapshotStore`].

use serde::{Deserialize, Deserializer, Serialize};
use vitrine_commerce::Address;

/// Everything the page restores on mount.
///
/// Missing or null fields read as their defaults. Empty strings mean
/// "nothing selected", matching what the page writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistedSelection {
    #[serde(deserialize_with = "null_as_default")]
    pub selected_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub selected_color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub selected_image: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cep: String,
    pub address: Option<Address>,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_favorite: bool,
}

impl Default for PersistedSelection {
    fn default() -> Self {
        Self {
            selected_size: String::new(),
            selected_color: String::new(),
            selected_image: 0,
            cep: String::new(),
            address: None,
            quantity: 1,
            is_favorite: false,
        }
    }
}

impl PersistedSelection {
    /// Selected size, treating an empty string as none.
    pub fn size(&self) -> Option<&str> {
        Some(self.selected_size.as_str()).filter(|s| !s.is_empty())
    }

    /// Selected color, treating an empty string as none.
    pub fn color(&self) -> Option<&str> {
        Some(self.selected_color.as_str()).filter(|s| !s.is_empty())
    }

    /// Image index clamped into `[0, image_count - 1]`.
    pub fn image_index(&self, image_count: usize) -> usize {
        let last = image_count.saturating_sub(1);
        usize::try_from(self.selected_image).map_or(0, |index| index.min(last))
    }

    /// Quantity raised to at least 1.
    pub fn quantity(&self) -> u32 {
        u32::try_from(self.quantity.max(1)).unwrap_or(u32::MAX)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
