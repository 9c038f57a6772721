//! Text fitting flags

/// How text is fitted into the cell box
///
/// Only the two flags a converter can request on write are modeled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    /// Break long text across lines
    pub wrap_text: bool,
    /// Scale the font down until the text fits
    pub shrink_to_fit: bool,
}

