use std::fmt;
use std::marker::PhantomData;

use sheetbind_core::{CellAddress, CellValue, Hyperlink, NumberFormat, Worksheet};

use super::{CellConverter, CellConverterFactory, CellRef};
use crate::config::Configuration;
use crate::error::{ConfigError, TextParseError, TypeBindError};
use crate::format::TextFormatter;
use crate::rule::{ConversionRule, Direction, FieldAdapter};
use crate::value::{FieldType, FieldValue};

/// What a codec puts into a cell
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenCell {
    pub value: CellValue,
    /// Hyperlink to attach; `None` removes an existing one
    pub hyperlink: Option<Hyperlink>,
}

impl WrittenCell {
    pub fn new(value: CellValue) -> Self {
        Self { value, hyperlink: None }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(CellValue::string(text))
    }
}

/// The type-specific half of a converter
///
/// One codec is built per field and direction, so loading and saving rules
/// may differ.
pub trait CellCodec: Sized + Send + Sync + fmt::Debug {
    fn build(field: &FieldAdapter, direction: Direction, config: &Configuration) -> Result<Self, ConfigError>;

    /// Parses cell text and default literals
    fn formatter(&self) -> &dyn TextFormatter;

    /// Read a cell whose native type already fits, skipping text
    fn read_native(&self, _cell: &CellRef<'_>, _config: &Configuration) -> Option<Result<FieldValue, TextParseError>> {
        None
    }

    /// Native content for a non-null value
    fn write(&self, value: &FieldValue, _date_1904: bool) -> Result<WrittenCell, TextParseError> {
        Ok(WrittenCell::text(self.formatter().format(value)?))
    }

    /// Number format to set on written cells; `None` keeps the cell's own
    fn number_format(&self) -> Option<NumberFormat> {
        None
    }
}

/// The shared read and write algorithm around a [`CellCodec`]
#[derive(Debug)]
pub struct BasicConverter<C: CellCodec> {
    field: String,
    field_type: FieldType,
    primitive: bool,
    trim: bool,
    force_wrap_text: bool,
    force_shrink_to_fit: bool,
    loader: C,
    saver: C,
    load_default: Option<FieldValue>,
    save_default: Option<FieldValue>,
}

impl<C: CellCodec> BasicConverter<C> {
    pub fn new(field: &FieldAdapter, config: &Configuration) -> Result<Self, ConfigError> {
        let loader = C::build(field, Direction::Load, config)?;
        let saver = C::build(field, Direction::Save, config)?;
        let load_rule = field.conversion_rule(Direction::Load);
        let save_rule = field.conversion_rule(Direction::Save);

        let load_default = parse_default(field.name(), loader.formatter(), load_rule)?;
        let save_default = parse_default(field.name(), saver.formatter(), save_rule)?;

        log::debug!("created {} converter for field '{}'", field.field_type(), field.name());

        Ok(Self {
            field: field.name().to_string(),
            field_type: field.field_type().clone(),
            primitive: field.is_primitive(),
            trim: load_rule.trim,
            force_wrap_text: save_rule.force_wrap_text,
            force_shrink_to_fit: save_rule.force_shrink_to_fit,
            loader,
            saver,
            load_default,
            save_default,
        })
    }

    /// The value of a field whose cell holds nothing
    fn absent(&self) -> FieldValue {
        if let Some(default) = &self.load_default {
            return default.clone();
        }
        if self.primitive {
            if let Some(zero) = self.field_type.zero_value() {
                return zero;
            }
        }
        FieldValue::Null
    }

    fn bind_error(&self, value: FieldValue, cause: TextParseError) -> TypeBindError {
        TypeBindError::from_parse(self.field.clone(), self.field_type.clone(), value, cause)
    }

    fn sheet_error(&self, value: &FieldValue, cause: sheetbind_core::Error) -> TypeBindError {
        TypeBindError::from_sheet(self.field.clone(), self.field_type.clone(), value.clone(), cause)
    }
}

fn parse_default(
    field: &str,
    formatter: &dyn TextFormatter,
    rule: &ConversionRule,
) -> Result<Option<FieldValue>, ConfigError> {
    rule.default_value
        .as_deref()
        .map(|literal| formatter.parse(literal))
        .transpose()
        .map_err(|e| ConfigError::invalid(field, "defaultValue", e.to_string()))
}

impl<C: CellCodec> CellConverter for BasicConverter<C> {
    fn to_object(&self, cell: CellRef<'_>, config: &Configuration) -> Result<FieldValue, TypeBindError> {
        let display = config.cell_formatter();
        if display.is_empty(&cell) {
            return Ok(self.absent());
        }

        if let Some(native) = self.loader.read_native(&cell, config) {
            return native.map_err(|e| {
                let raw = FieldValue::String(display.format(&cell));
                self.bind_error(raw, e)
            });
        }

        let text = display.format(&cell);
        let text = if self.trim { text.trim() } else { text.as_str() };
        if text.is_empty() {
            return Ok(self.absent());
        }
        self.loader
            .formatter()
            .parse(text)
            .map_err(|e| self.bind_error(FieldValue::String(text.to_string()), e))
    }

    fn to_cell(
        &self,
        value: &FieldValue,
        sheet: &mut Worksheet,
        address: CellAddress,
        _config: &Configuration,
    ) -> Result<(), TypeBindError> {
        let value = match (value, &self.save_default) {
            (FieldValue::Null, Some(default)) => default,
            _ => value,
        };
        let (row, col) = (address.row, address.col);

        let mut style = sheet.cell_style_at(row, col).clone();
        if self.force_wrap_text {
            style.alignment.wrap_text = true;
        }
        if self.force_shrink_to_fit {
            style.alignment.shrink_to_fit = true;
        }
        if let Some(format) = self.saver.number_format() {
            style.number_format = format;
        }
        if style != *sheet.cell_style_at(row, col) {
            sheet
                .set_cell_style_at(row, col, &style)
                .map_err(|e| self.sheet_error(value, e))?;
        }

        if value.is_null() {
            sheet
                .set_cell_value_at(row, col, CellValue::Empty)
                .map_err(|e| self.sheet_error(value, e))?;
            sheet.remove_hyperlink_at(row, col);
            return Ok(());
        }

        let written = self
            .saver
            .write(value, sheet.is_date_1904())
            .map_err(|e| self.bind_error(value.clone(), e))?;
        sheet
            .set_cell_value_at(row, col, written.value)
            .map_err(|e| self.sheet_error(value, e))?;
        match written.hyperlink {
            Some(link) => sheet
                .set_hyperlink_at(row, col, link)
                .map_err(|e| self.sheet_error(value, e))?,
            None => {
                sheet.remove_hyperlink_at(row, col);
            }
        }
        Ok(())
    }
}

/// Factory of [`BasicConverter`]s for one codec type
pub struct CodecFactory<C>(PhantomData<fn() -> C>);

impl<C> CodecFactory<C> {
    pub fn new() -> Self {
        CodecFactory(PhantomData)
    }
}

impl<C> Default for CodecFactory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for CodecFactory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<C>();
        write!(f, "CodecFactory<{}>", name.rsplit("::").next().unwrap_or(name))
    }
}

impl<C: CellCodec + 'static> CellConverterFactory for CodecFactory<C> {
    fn create(
        &self,
        field: &FieldAdapter,
        config: &Configuration,
    ) -> Result<Box<dyn super::CellConverter>, ConfigError> {
        Ok(Box::new(BasicConverter::<C>::new(field, config)?))
    }
}
