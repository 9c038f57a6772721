//! Worksheet type

use std::collections::HashMap;

use crate::cell::{CellAddress, CellData, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::hyperlink::Hyperlink;
use crate::style::Style;
use crate::{MAX_COLS, MAX_ROWS};

/// A single sheet: cells, their styles and hyperlinks
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
    /// Hyperlinks keyed by (row, col)
    hyperlinks: HashMap<(u32, u16), Hyperlink>,
    /// Serial dates count from 1904-01-01 instead of 1900-01-01
    date_1904: bool,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            hyperlinks: HashMap::new(),
            date_1904: false,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// True when serial dates use the 1904 date system
    pub fn is_date_1904(&self) -> bool {
        self.date_1904
    }

    /// Switch the date system
    pub fn set_date_1904(&mut self, date_1904: bool) {
        self.date_1904 = date_1904;
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get cell value (convenience method)
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// The style applied to a cell; the default style for absent cells
    pub fn cell_style_at(&self, row: u32, col: u16) -> &Style {
        let idx = self.cells.get(row, col).map(|c| c.style_index).unwrap_or(0);
        self.cells
            .style_pool()
            .get(idx)
            .or_else(|| self.cells.style_pool().get(0))
            .unwrap_or(&DEFAULT_STYLE)
    }

    /// The style applied to a cell by address
    pub fn cell_style(&self, address: &str) -> Result<&Style> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_style_at(addr.row, addr.col))
    }

    /// Number of non-vacant cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Iterate over stored cells in row order
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, &CellData)> {
        self.cells
            .iter()
            .map(|(row, col, data)| (CellAddress::new(row, col), data))
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices, keeping the cell's style
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Set a cell style by address string
    pub fn set_cell_style(&mut self, address: &str, style: &Style) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_style_at(addr.row, addr.col, style)
    }

    /// Set a cell style by row and column indices, keeping the cell's value
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        self.validate_cell_position(row, col)?;
        let style_index = self.cells.style_pool_mut().get_or_insert(style.clone());
        self.cells.set_style(row, col, style_index);
        Ok(())
    }

    /// Clear a cell's value, style and hyperlink
    pub fn clear_cell(&mut self, address: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.clear_cell_at(addr.row, addr.col);
        Ok(())
    }

    /// Clear a cell by indices
    pub fn clear_cell_at(&mut self, row: u32, col: u16) {
        self.cells.remove(row, col);
        self.hyperlinks.remove(&(row, col));
    }

    // === Hyperlinks ===

    /// Get the hyperlink of a cell by address
    pub fn hyperlink(&self, address: &str) -> Result<Option<&Hyperlink>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.hyperlink_at(addr.row, addr.col))
    }

    /// Get the hyperlink of a cell by indices
    pub fn hyperlink_at(&self, row: u32, col: u16) -> Option<&Hyperlink> {
        self.hyperlinks.get(&(row, col))
    }

    /// Attach a hyperlink to a cell by address
    pub fn set_hyperlink(&mut self, address: &str, link: Hyperlink) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_hyperlink_at(addr.row, addr.col, link)
    }

    /// Attach a hyperlink to a cell, replacing any previous one
    pub fn set_hyperlink_at(&mut self, row: u32, col: u16, link: Hyperlink) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.hyperlinks.insert((row, col), link);
        Ok(())
    }

    /// Detach a cell's hyperlink
    pub fn remove_hyperlink_at(&mut self, row: u32, col: u16) -> Option<Hyperlink> {
        self.hyperlinks.remove(&(row, col))
    }

    /// Number of hyperlinks on the sheet
    pub fn hyperlink_count(&self) -> usize {
        self.hyperlinks.len()
    }

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }
}

static DEFAULT_STYLE: Style = Style {
    alignment: crate::style::Alignment {
        wrap_text: false,
        shrink_to_fit: false,
    },
    number_format: crate::style::NumberFormat::General,
};
