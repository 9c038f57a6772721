//! Cell converters
//!
//! A [`CellConverter`] moves one field between a cell and a [`FieldValue`].
//! It is created once per field by a [`CellConverterFactory`], which
//! resolves formatters, lookup tables and element types up front; malformed
//! rules fail there with [`ConfigError`], before any cell is touched.
//!
//! Every built-in converter is a [`BasicConverter`] around a per-family
//! [`CellCodec`]:
//!
//! | family | codec | native cells read |
//! |--------|-------|-------------------|
//! | boolean | [`BooleanCodec`] | booleans |
//! | numbers | [`NumberCodec`] | numbers |
//! | char, string | [`CharCodec`], [`StringCodec`] | none |
//! | dates | [`DateCodec`] | numbers as date serials |
//! | enums | [`EnumCodec`] | none |
//! | list, set, array | [`CollectionCodec`] | none |
//! | link | [`LinkCodec`] | hyperlinks |

mod base;
mod boolean;
mod collection;
mod date;
mod enums;
mod link;
mod number;
mod text;

use std::fmt::Debug;

use sheetbind_core::{CellAddress, CellValue, Hyperlink, Style, Worksheet};

pub use base::{BasicConverter, CellCodec, CodecFactory, WrittenCell};
pub use boolean::BooleanCodec;
pub use collection::CollectionCodec;
pub use date::DateCodec;
pub use enums::EnumCodec;
pub use link::{infer_hyperlink, LinkCodec};
pub use number::NumberCodec;
pub use text::{CharCodec, StringCodec};

use crate::config::Configuration;
use crate::error::{ConfigError, TypeBindError};
use crate::rule::FieldAdapter;
use crate::value::FieldValue;

static BLANK: CellValue = CellValue::Empty;

/// A read-only view of one cell of a worksheet
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    sheet: &'a Worksheet,
    address: CellAddress,
}

impl<'a> CellRef<'a> {
    pub fn new(sheet: &'a Worksheet, address: CellAddress) -> Self {
        Self { sheet, address }
    }

    pub fn sheet(&self) -> &'a Worksheet {
        self.sheet
    }

    pub fn address(&self) -> CellAddress {
        self.address
    }

    /// Stored content, formulas included
    pub fn raw_value(&self) -> &'a CellValue {
        self.sheet
            .cell_at(self.address.row, self.address.col)
            .map(|c| &c.value)
            .unwrap_or(&BLANK)
    }

    /// Content with formulas replaced by their cached result
    pub fn value(&self) -> &'a CellValue {
        self.raw_value().effective_value()
    }

    pub fn style(&self) -> &'a Style {
        self.sheet.cell_style_at(self.address.row, self.address.col)
    }

    pub fn hyperlink(&self) -> Option<&'a Hyperlink> {
        self.sheet.hyperlink_at(self.address.row, self.address.col)
    }

    pub fn is_date_formatted(&self) -> bool {
        self.style().number_format.is_date_format()
    }

    /// Whether the sheet counts dates from 1904
    pub fn is_date_1904(&self) -> bool {
        self.sheet.is_date_1904()
    }
}

/// Converts one field between a cell and a value
pub trait CellConverter: Send + Sync + Debug {
    /// Read the cell as the field's type
    fn to_object(&self, cell: CellRef<'_>, config: &Configuration) -> Result<FieldValue, TypeBindError>;

    /// Write a value into the cell at `address`
    ///
    /// `Null` leaves the cell blank, never an empty string.
    fn to_cell(
        &self,
        value: &FieldValue,
        sheet: &mut Worksheet,
        address: CellAddress,
        config: &Configuration,
    ) -> Result<(), TypeBindError>;
}

/// Creates the converter of one field
pub trait CellConverterFactory: Send + Sync + Debug {
    fn create(&self, field: &FieldAdapter, config: &Configuration) -> Result<Box<dyn CellConverter>, ConfigError>;
}
