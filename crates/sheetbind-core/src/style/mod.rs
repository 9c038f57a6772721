//! Cell presentation types
//!
//! Converters touch only a small part of a cell's look:
//! - [`Alignment`] - wrap text and shrink-to-fit flags
//! - [`NumberFormat`] - the native format string that makes a number render as a date
//! - [`StylePool`] - deduplicated storage of [`Style`] values per sheet

mod alignment;
mod number_format;
mod pool;

pub use alignment::Alignment;
pub use number_format::NumberFormat;
pub use pool::StylePool;

/// Complete cell style
///
/// Styles are deduplicated via [`StylePool`]; cells refer to them by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Text alignment
    pub alignment: Alignment,
    /// Number format
    pub number_format: NumberFormat,
}

impl Style {
    /// Create a new default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = NumberFormat::Custom(format.into());
        self
    }

    /// Enable text wrapping
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.alignment.wrap_text = wrap;
        self
    }

    /// Enable shrink-to-fit
    pub fn shrink_to_fit(mut self, shrink: bool) -> Self {
        self.alignment.shrink_to_fit = shrink;
        self
    }
}
