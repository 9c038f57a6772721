//! Cell hyperlinks
//!
//! ## Example
//!
//! ```rust
//! use sheetbind_core::{Hyperlink, HyperlinkType, Worksheet};
//!
//! let mut sheet = Worksheet::new("Links");
//! sheet
//!     .set_hyperlink("A1", Hyperlink::new(HyperlinkType::Url, "https://example.com"))
//!     .unwrap();
//! assert_eq!(sheet.hyperlink("A1").unwrap().unwrap().address, "https://example.com");
//! ```

use std::fmt;

/// What a hyperlink points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HyperlinkType {
    /// A location inside the same workbook (`Sheet1!A1`)
    Document,
    /// A mail address (`mailto:`)
    Email,
    /// A web or other URI
    Url,
    /// A local or network file path
    File,
}

impl fmt::Display for HyperlinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HyperlinkType::Document => "document",
            HyperlinkType::Email => "email",
            HyperlinkType::Url => "url",
            HyperlinkType::File => "file",
        })
    }
}

/// A hyperlink attached to a cell
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperlink {
    /// Link kind
    pub kind: HyperlinkType,
    /// Link target as stored in the file
    pub address: String,
    /// Text shown for the link, when it differs from the cell text
    pub label: Option<String>,
}

impl Hyperlink {
    /// Create a hyperlink without a separate label
    pub fn new(kind: HyperlinkType, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
            label: None,
        }
    }

    /// Set the link label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
