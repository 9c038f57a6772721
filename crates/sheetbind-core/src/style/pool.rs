//! Style pool for deduplication

use super::Style;
use ahash::AHashMap;

/// Deduplicated style storage for one worksheet
///
/// Converters derive a new style from a cell's current one on every write;
/// the pool keeps one copy per distinct style and hands out indices.
/// Index 0 is always the default style.
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    indices: AHashMap<Style, u32>,
}

impl StylePool {
    /// Create a pool holding only the default style
    pub fn new() -> Self {
        let mut indices = AHashMap::with_capacity(16);
        indices.insert(Style::default(), 0);
        Self {
            styles: vec![Style::default()],
            indices,
        }
    }

    /// Index of an identical style, inserting it when absent
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&idx) = self.indices.get(&style) {
            return idx;
        }
        let idx = self.styles.len() as u32;
        self.indices.insert(style.clone(), idx);
        self.styles.push(style);
        idx
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Number of distinct styles, the default included
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// True when only the default style exists
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}
