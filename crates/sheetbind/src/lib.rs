//! # sheetbind
//!
//! Typed conversion between spreadsheet cells and record fields.
//!
//! Each field is declared with a [`FieldType`] and a [`ConversionRule`]
//! (patterns, locale, separators, boolean literals, defaults). A
//! [`ConverterRegistry`] picks the converter for the type, and the converter
//! reads the cell into a [`FieldValue`] or writes a value back into the cell.
//!
//! ## Features
//!
//! - Booleans, every numeric width, decimals, chars and strings
//! - Dates and times from text or date serials, in either date system
//! - Enums by constant name, display label or named accessor
//! - Lists, sets and arrays from delimited text
//! - Hyperlinks with their target type inferred
//! - Continue-on-failure passes that collect every bad cell
//!
//! ## Example
//!
//! ```rust
//! use sheetbind::prelude::*;
//!
//! let mut sheet = Worksheet::new("Users");
//! sheet.set_cell_value("A1", "Alice").unwrap();
//! sheet.set_cell_value("B1", "forty").unwrap();
//!
//! let config = Configuration::default().with_continue_type_bind_failure(true);
//! let processor = SheetProcessor::new(
//!     config,
//!     [
//!         FieldMapping::new(FieldAdapter::new("name", FieldType::String), CellAddress::new(0, 0)),
//!         FieldMapping::new(FieldAdapter::new("age", FieldType::Int), CellAddress::new(0, 1))
//!             .with_label("Age"),
//!     ],
//! )
//! .unwrap();
//!
//! let mut user = FieldMap::new();
//! let errors = processor.load(&sheet, &mut user).unwrap();
//!
//! assert_eq!(user.get("name"), Some(&FieldValue::from("Alice")));
//! assert_eq!(user.get("age"), Some(&FieldValue::Null));
//! assert!(errors.has_field_errors("age"));
//! ```

pub mod binding;
pub mod cell_format;
pub mod config;
pub mod converter;
pub mod error;
pub mod format;
pub mod locale;
pub mod messages;
pub mod prelude;
pub mod processor;
pub mod registry;
pub mod rule;
pub mod value;

// Re-export the cell model
pub use sheetbind_core::{
    CellAddress, CellError, CellValue, Hyperlink, HyperlinkType, NumberFormat, Style, Worksheet,
};

pub use binding::{FieldError, FieldErrorKind, SheetBindingErrors};
pub use cell_format::{CellFormatter, DefaultCellFormatter};
pub use config::Configuration;
pub use converter::{CellConverter, CellConverterFactory, CellRef};
pub use error::{
    ConfigError, FieldAccessError, MessageVars, ProcessError, Result, TextParseError, TypeBindError,
};
pub use format::{FormatterResolver, TextFormatter};
pub use locale::Locale;
pub use messages::MessageInterpolator;
pub use processor::{BindTarget, FieldMap, FieldMapping, SheetProcessor};
pub use registry::ConverterRegistry;
pub use rule::{ArrayRule, BooleanRule, ConversionRule, Direction, EnumRule, FieldAdapter};
pub use value::{
    CellLink, EnumType, EnumValue, FieldType, FieldValue, HasDisplayLabel, SheetEnum, TypeFamily,
};
