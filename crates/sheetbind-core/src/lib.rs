//! # sheetbind-core
//!
//! The spreadsheet model that sheetbind converters read from and write to.
//!
//! This crate provides:
//! - [`CellValue`] - Raw cell content (number, string, boolean, error, formula, blank)
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`Worksheet`] - Sparse cell storage with styles and hyperlinks
//! - [`Style`], [`Alignment`], [`NumberFormat`] - The presentation hints a converter may set
//! - [`Hyperlink`] - Link targets attached to cells
//! - [`date_serial`] - Excel serial date conversion for both date systems
//!
//! ## Example
//!
//! ```rust
//! use sheetbind_core::{CellValue, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value_at(0, 1, CellValue::Number(42.0)).unwrap();
//!
//! assert_eq!(sheet.get_value("B1").unwrap().as_number(), Some(42.0));
//! ```

pub mod cell;
pub mod date_serial;
pub mod error;
pub mod hyperlink;
pub mod style;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellError, CellValue, SharedString};
pub use error::{Error, Result};
pub use hyperlink::{Hyperlink, HyperlinkType};
pub use style::{Alignment, NumberFormat, Style, StylePool};
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
