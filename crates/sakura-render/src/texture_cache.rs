//! Petal sprite cache: renders each size class once and shares it

use crate::petal_sprite::render_petal;
use crate::sprite::{SizeClass, Sprite};
use std::collections::HashMap;
use std::sync::Arc;

/// Cache of petal sprites keyed by rounded radius.
///
/// Entries are immutable and never evicted; the configured size range keeps
/// the key space small.
#[derive(Default)]
pub struct TextureCache {
    sprites: HashMap<SizeClass, Arc<Sprite>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprite for a petal of radius `size`, rendering it on first use
    pub fn get(&mut self, size: f32) -> Arc<Sprite> {
        self.get_class(SizeClass::from_size(size))
    }

    pub fn get_class(&mut self, class: SizeClass) -> Arc<Sprite> {
        self.sprites
            .entry(class)
            .or_insert_with(|| Arc::new(render_petal(class)))
            .clone()
    }

    /// Number of cached sprites
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
