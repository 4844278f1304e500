//! Selection state: gallery position, variant choice, quantity, favorite.
//!
//! Every mutator reports whether it changed anything so callers persist only
//! on real changes. No mutator fails: out-of-range requests are clamped.

/// The shopper's current choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    image_index: usize,
    image_count: usize,
    size: Option<String>,
    color: Option<String>,
    quantity: u32,
    favorite: bool,
}

impl SelectionState {
    /// Defaults for a gallery of `image_count` images: first image, no size
    /// or color, quantity 1, not a favorite.
    pub fn new(image_count: usize) -> Self {
        Self {
            image_index: 0,
            image_count,
            size: None,
            color: None,
            quantity: 1,
            favorite: false,
        }
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    /// Both a size and a color are chosen.
    pub fn can_purchase(&self) -> bool {
        self.size.is_some() && self.color.is_some()
    }

    fn last_index(&self) -> usize {
        self.image_count.saturating_sub(1)
    }

    /// Step back one image, stopping at the first.
    pub fn previous_image(&mut self) -> bool {
        self.select_image(self.image_index.saturating_sub(1))
    }

    /// Step forward one image, stopping at the last.
    pub fn next_image(&mut self) -> bool {
        self.select_image(self.image_index.saturating_add(1))
    }

    /// Jump to `index`, clamped to the last image.
    pub fn select_image(&mut self, index: usize) -> bool {
        let index = index.min(self.last_index());
        replace(&mut self.image_index, index)
    }

    /// Choose a size. An empty string clears the choice.
    pub fn select_size(&mut self, size: &str) -> bool {
        replace(&mut self.size, non_empty(size))
    }

    /// Choose a color. An empty string clears the choice.
    pub fn select_color(&mut self, color: &str) -> bool {
        replace(&mut self.color, non_empty(color))
    }

    pub fn increment_quantity(&mut self) -> bool {
        self.set_quantity(self.quantity.saturating_add(1))
    }

    /// Decrease by one, never below 1.
    pub fn decrement_quantity(&mut self) -> bool {
        self.set_quantity(self.quantity.saturating_sub(1))
    }

    /// Set the quantity, raising anything below 1 to 1.
    pub fn set_quantity(&mut self, quantity: u32) -> bool {
        replace(&mut self.quantity, quantity.max(1))
    }

    pub fn toggle_favorite(&mut self) -> bool {
        self.favorite = !self.favorite;
        true
    }

    pub fn set_favorite(&mut self, favorite: bool) -> bool {
        replace(&mut self.favorite, favorite)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
