use super::CellCodec;
use crate::config::Configuration;
use crate::error::ConfigError;
use crate::format::{CharFormatter, StringFormatter, TextFormatter};
use crate::rule::{Direction, FieldAdapter};

/// A single character: the first character of the cell text
///
/// A primitive `char` field with nothing to read holds `'\0'`.
#[derive(Debug)]
pub struct CharCodec {
    formatter: CharFormatter,
}

impl CellCodec for CharCodec {
    fn build(_field: &FieldAdapter, _direction: Direction, _config: &Configuration) -> Result<Self, ConfigError> {
        Ok(Self {
            formatter: CharFormatter,
        })
    }

    fn formatter(&self) -> &dyn TextFormatter {
        &self.formatter
    }
}

/// Cell text as-is
#[derive(Debug)]
pub struct StringCodec {
    formatter: StringFormatter,
}

impl CellCodec for StringCodec {
    fn build(_field: &FieldAdapter, _direction: Direction, _config: &Configuration) -> Result<Self, ConfigError> {
        Ok(Self {
            formatter: StringFormatter,
        })
    }

    fn formatter(&self) -> &dyn TextFormatter {
        &self.formatter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{BasicConverter, CellConverter, CellRef};
    use crate::value::{FieldType, FieldValue};
    use sheetbind_core::{CellAddress, CellValue, Worksheet};

    #[test]
    fn test_char() {
        let config = Configuration::default();
        let mut sheet = Worksheet::new("S");
        sheet.set_cell_value_at(0, 0, "Yes").unwrap();

        let field = FieldAdapter::new("initial", FieldType::Char).primitive(true);
        let c = BasicConverter::<CharCodec>::new(&field, &config).unwrap();
        assert_eq!(
            c.to_object(CellRef::new(&sheet, CellAddress::new(0, 0)), &config).unwrap(),
            FieldValue::Char('Y')
        );
        assert_eq!(
            c.to_object(CellRef::new(&sheet, CellAddress::new(5, 5)), &config).unwrap(),
            FieldValue::Char('\0')
        );
    }

    #[test]
    fn test_string_reads_display_text() {
        let config = Configuration::default();
        let mut sheet = Worksheet::new("S");
        sheet.set_cell_value_at(0, 0, CellValue::Number(12.0)).unwrap();

        let c = BasicConverter::<StringCodec>::new(&FieldAdapter::new("code", FieldType::String), &config).unwrap();
        assert_eq!(
            c.to_object(CellRef::new(&sheet, CellAddress::new(0, 0)), &config).unwrap(),
            FieldValue::from("12")
        );
    }
}
