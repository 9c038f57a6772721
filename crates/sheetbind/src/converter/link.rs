use once_cell::sync::Lazy;
use regex::Regex;
use sheetbind_core::{CellValue, Hyperlink, HyperlinkType};

use super::{CellCodec, CellRef, WrittenCell};
use crate::config::Configuration;
use crate::error::{ConfigError, TextParseError};
use crate::format::{CellLinkFormatter, TextFormatter};
use crate::rule::{Direction, FieldAdapter};
use crate::value::{CellLink, FieldValue};

static SHEET_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:'[^']+'|[^'!\s]+)!\$?[A-Za-z]{1,3}\$?[0-9]+(?::\$?[A-Za-z]{1,3}\$?[0-9]+)?$")
        .expect("Failed to build sheet reference pattern")
});

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s:/]+@[^@\s]+\.[^@\s]+$").expect("Failed to build email pattern"));

static URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("Failed to build URI pattern"));

/// Build a hyperlink whose type follows the shape of `address`
///
/// - `#Sheet!A1` and `Sheet!A1`: document, without the `#`
/// - `mailto:` and bare mail addresses: email, with `mailto:` added
/// - `scheme://...`: URL
/// - anything else: file path
pub fn infer_hyperlink(address: &str) -> Hyperlink {
    let address = address.trim();
    if let Some(location) = address.strip_prefix('#') {
        return Hyperlink::new(HyperlinkType::Document, location);
    }
    if SHEET_REF_RE.is_match(address) {
        return Hyperlink::new(HyperlinkType::Document, address);
    }
    if address.get(..7).map_or(false, |scheme| scheme.eq_ignore_ascii_case("mailto:")) {
        return Hyperlink::new(HyperlinkType::Email, address);
    }
    if EMAIL_RE.is_match(address) {
        return Hyperlink::new(HyperlinkType::Email, format!("mailto:{}", address));
    }
    if URI_RE.is_match(address) {
        return Hyperlink::new(HyperlinkType::Url, address);
    }
    Hyperlink::new(HyperlinkType::File, address)
}

/// Hyperlinked cells
///
/// A cell with a hyperlink reads as its address with the cell text as label
/// (the hyperlink's own label when the text is empty); a cell without one
/// reads as a label only.
#[derive(Debug)]
pub struct LinkCodec {
    formatter: CellLinkFormatter,
}

impl CellCodec for LinkCodec {
    fn build(_field: &FieldAdapter, _direction: Direction, _config: &Configuration) -> Result<Self, ConfigError> {
        Ok(Self {
            formatter: CellLinkFormatter::label_only(),
        })
    }

    fn formatter(&self) -> &dyn TextFormatter {
        &self.formatter
    }

    fn read_native(&self, cell: &CellRef<'_>, config: &Configuration) -> Option<Result<FieldValue, TextParseError>> {
        let hyperlink = cell.hyperlink()?;
        let text = config.cell_formatter().format(cell);
        let label = if text.is_empty() { hyperlink.label.clone() } else { Some(text) };
        Some(Ok(FieldValue::Link(CellLink {
            link: Some(hyperlink.address.clone()),
            label,
        })))
    }

    fn write(&self, value: &FieldValue, _date_1904: bool) -> Result<WrittenCell, TextParseError> {
        let link = match value {
            FieldValue::Link(link) => link,
            other => return Err(TextParseError::new(other.to_string(), "link", "not a link value")),
        };
        let text = link.label.clone().or_else(|| link.link.clone()).unwrap_or_default();
        let hyperlink = link
            .link
            .as_deref()
            .filter(|address| !address.trim().is_empty())
            .map(|address| {
                let mut h = infer_hyperlink(address);
                h.label = link.label.clone();
                h
            });
        Ok(WrittenCell {
            value: CellValue::string(text),
            hyperlink,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{BasicConverter, CellConverter};
    use crate::value::FieldType;
    use pretty_assertions::assert_eq;
    use sheetbind_core::{CellAddress, Worksheet};

    #[test]
    fn test_inference() {
        let kind = |s: &str| infer_hyperlink(s).kind;
        assert_eq!(kind("#Sheet2!A1"), HyperlinkType::Document);
        assert_eq!(infer_hyperlink("#Sheet2!A1").address, "Sheet2!A1");
        assert_eq!(kind("'My Sheet'!$B$3"), HyperlinkType::Document);
        assert_eq!(kind("mailto:someone@example.com"), HyperlinkType::Email);
        assert_eq!(infer_hyperlink("someone@example.com").address, "mailto:someone@example.com");
        assert_eq!(kind("https://example.com/a?b=c"), HyperlinkType::Url);
        assert_eq!(kind("ftp://files.example.com"), HyperlinkType::Url);
        assert_eq!(kind("C:\\reports\\q1.xlsx"), HyperlinkType::File);
        assert_eq!(kind("../shared/readme.txt"), HyperlinkType::File);
    }

    #[test]
    fn test_read() {
        let config = Configuration::default();
        let c = BasicConverter::<LinkCodec>::new(&FieldAdapter::new("site", FieldType::Link), &config).unwrap();

        let mut sheet = Worksheet::new("S");
        sheet.set_cell_value_at(0, 0, "Example").unwrap();
        sheet
            .set_hyperlink_at(0, 0, Hyperlink::new(HyperlinkType::Url, "https://example.com"))
            .unwrap();
        sheet.set_cell_value_at(1, 0, "just text").unwrap();

        assert_eq!(
            c.to_object(CellRef::new(&sheet, CellAddress::new(0, 0)), &config).unwrap(),
            FieldValue::Link(CellLink::new("https://example.com", "Example"))
        );
        assert_eq!(
            c.to_object(CellRef::new(&sheet, CellAddress::new(1, 0)), &config).unwrap(),
            FieldValue::Link(CellLink::label_only("just text"))
        );
    }

    #[test]
    fn test_write() {
        let config = Configuration::default();
        let c = BasicConverter::<LinkCodec>::new(&FieldAdapter::new("site", FieldType::Link), &config).unwrap();
        let mut sheet = Worksheet::new("S");

        c.to_cell(
            &FieldValue::Link(CellLink::new("Summary!A1", "Back to summary")),
            &mut sheet,
            CellAddress::new(0, 0),
            &config,
        )
        .unwrap();
        assert_eq!(sheet.get_value_at(0, 0), CellValue::string("Back to summary"));
        let h = sheet.hyperlink_at(0, 0).unwrap();
        assert_eq!(h.kind, HyperlinkType::Document);
        assert_eq!(h.label.as_deref(), Some("Back to summary"));

        // a label-only link drops the old hyperlink
        c.to_cell(
            &FieldValue::Link(CellLink::label_only("plain")),
            &mut sheet,
            CellAddress::new(0, 0),
            &config,
        )
        .unwrap();
        assert!(sheet.hyperlink_at(0, 0).is_none());
    }
}
