//! Cell-related types
//!
//! This module contains:
//! - [`CellValue`] - The raw value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellData`] - A cell's value plus its style index

mod address;
mod storage;
mod value;

pub use address::{CellAddress, SheetReference};
pub use storage::{CellData, CellStorage};
pub use value::{CellError, CellValue, SharedString};
