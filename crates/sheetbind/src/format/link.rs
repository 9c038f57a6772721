use once_cell::sync::Lazy;
use regex::Regex;

use super::TextFormatter;
use crate::error::TextParseError;
use crate::value::{CellLink, FieldValue};

static LINK_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*<([^<>]*)>$").expect("Failed to build link text pattern"));

/// Hyperlink text
///
/// The bracket form `label <address>` carries both parts and is used for
/// list elements. The label form reads all text as a label, which is how a
/// cell without a hyperlink is read.
#[derive(Debug, Clone, Default)]
pub struct CellLinkFormatter {
    label_only: bool,
}

impl CellLinkFormatter {
    /// `label <address>` text
    pub fn new() -> Self {
        Self { label_only: false }
    }

    /// Plain label text
    pub fn label_only() -> Self {
        Self { label_only: true }
    }
}

impl TextFormatter for CellLinkFormatter {
    fn parse(&self, text: &str) -> Result<FieldValue, TextParseError> {
        if self.label_only {
            return Ok(FieldValue::Link(CellLink::label_only(text)));
        }
        let link = match LINK_TEXT_RE.captures(text) {
            Some(caps) => CellLink {
                link: Some(caps[2].to_string()).filter(|s| !s.is_empty()),
                label: Some(caps[1].to_string()).filter(|s| !s.is_empty()),
            },
            None => CellLink::label_only(text),
        };
        Ok(FieldValue::Link(link))
    }

    fn format(&self, value: &FieldValue) -> Result<String, TextParseError> {
        match value {
            FieldValue::Null => Ok(String::new()),
            FieldValue::Link(link) if self.label_only => {
                Ok(link.label.clone().or_else(|| link.link.clone()).unwrap_or_default())
            }
            FieldValue::Link(link) => Ok(link.to_string()),
            other => Err(TextParseError::new(other.to_string(), "link", "not a link value")),
        }
    }
}
