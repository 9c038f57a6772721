use sheetbind_core::CellValue;

use super::{CellCodec, CellRef, WrittenCell};
use crate::config::Configuration;
use crate::error::{ConfigError, TextParseError};
use crate::format::{BooleanFormatter, TextFormatter};
use crate::rule::{Direction, FieldAdapter};
use crate::value::FieldValue;

/// Booleans; native boolean cells are read directly
///
/// With the default `true`/`false` save literals a native boolean is
/// written, otherwise the configured literal as text.
#[derive(Debug)]
pub struct BooleanCodec {
    formatter: BooleanFormatter,
}

impl CellCodec for BooleanCodec {
    fn build(field: &FieldAdapter, direction: Direction, _config: &Configuration) -> Result<Self, ConfigError> {
        let rule = field.conversion_rule(direction);
        Ok(Self {
            formatter: BooleanFormatter::from_rule(field.name(), &rule.boolean)?,
        })
    }

    fn formatter(&self) -> &dyn TextFormatter {
        &self.formatter
    }

    fn read_native(&self, cell: &CellRef<'_>, _config: &Configuration) -> Option<Result<FieldValue, TextParseError>> {
        match cell.value() {
            CellValue::Boolean(b) => Some(Ok(FieldValue::Bool(*b))),
            _ => None,
        }
    }

    fn write(&self, value: &FieldValue, _date_1904: bool) -> Result<WrittenCell, TextParseError> {
        match value {
            FieldValue::Bool(b) if self.formatter.saves_as_default() => Ok(WrittenCell::new(CellValue::Boolean(*b))),
            other => Ok(WrittenCell::text(self.formatter.format(other)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{BasicConverter, CellConverter};
    use crate::rule::{BooleanRule, ConversionRule};
    use crate::value::FieldType;
    use sheetbind_core::{CellAddress, Worksheet};

    #[test]
    fn test_native_and_text_cells() {
        let config = Configuration::default();
        let field = FieldAdapter::new("active", FieldType::Bool);
        let c = BasicConverter::<BooleanCodec>::new(&field, &config).unwrap();

        let mut sheet = Worksheet::new("S");
        sheet.set_cell_value_at(0, 0, true).unwrap();
        sheet.set_cell_value_at(1, 0, "No").unwrap();
        sheet.set_cell_value_at(2, 0, "perhaps").unwrap();

        let read = |row| c.to_object(CellRef::new(&sheet, CellAddress::new(row, 0)), &config);
        assert_eq!(read(0).unwrap(), FieldValue::Bool(true));
        assert_eq!(read(1).unwrap(), FieldValue::Bool(false));
        assert!(read(2).is_err());
    }

    #[test]
    fn test_write_literals() {
        let config = Configuration::default();
        let mut sheet = Worksheet::new("S");

        let plain = BasicConverter::<BooleanCodec>::new(&FieldAdapter::new("a", FieldType::Bool), &config).unwrap();
        plain
            .to_cell(&FieldValue::Bool(true), &mut sheet, CellAddress::new(0, 0), &config)
            .unwrap();
        assert_eq!(sheet.get_value_at(0, 0), CellValue::Boolean(true));

        let marks = FieldAdapter::new("b", FieldType::Bool).rule(ConversionRule::new().boolean(BooleanRule {
            load_for_true: vec!["○".into()],
            load_for_false: vec!["×".into()],
            save_as_true: "○".into(),
            save_as_false: "×".into(),
            ..Default::default()
        }));
        let marked = BasicConverter::<BooleanCodec>::new(&marks, &config).unwrap();
        marked
            .to_cell(&FieldValue::Bool(false), &mut sheet, CellAddress::new(0, 1), &config)
            .unwrap();
        assert_eq!(sheet.get_value_at(0, 1), CellValue::string("×"));
    }
}
