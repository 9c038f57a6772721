use rust_decimal::prelude::ToPrimitive;
use sheetbind_core::{CellValue, NumberFormat};

use super::{CellCodec, CellRef, WrittenCell};
use crate::cell_format::round_significant;
use crate::config::Configuration;
use crate::error::{ConfigError, TextParseError};
use crate::format::{number_formatter, NumberFormatter, NumberKind, TextFormatter};
use crate::rule::{Direction, FieldAdapter};
use crate::value::FieldValue;

/// Numbers, always written as native numbers
///
/// Numeric cells are read without going through text. Floating point
/// targets are first rounded to the rule's precision in significant digits.
#[derive(Debug)]
pub struct NumberCodec {
    formatter: NumberFormatter,
    precision: u32,
    excel_format: Option<String>,
}

impl CellCodec for NumberCodec {
    fn build(field: &FieldAdapter, direction: Direction, config: &Configuration) -> Result<Self, ConfigError> {
        let rule = field.conversion_rule(direction);
        let kind = NumberKind::of(field.field_type())
            .ok_or_else(|| ConfigError::invalid(field.name(), "type", "not a number type"))?;
        if rule.precision == 0 {
            return Err(ConfigError::invalid(field.name(), "precision", "must be positive"));
        }

        Ok(Self {
            formatter: number_formatter(field.name(), kind, rule, config.default_locale())?,
            precision: rule.precision,
            excel_format: rule.excel_pattern.clone().or_else(|| rule.pattern.clone()),
        })
    }

    fn formatter(&self) -> &dyn TextFormatter {
        &self.formatter
    }

    fn read_native(&self, cell: &CellRef<'_>, _config: &Configuration) -> Option<Result<FieldValue, TextParseError>> {
        let n = match cell.value() {
            CellValue::Number(n) => *n,
            _ => return None,
        };
        let n = match self.formatter.kind() {
            NumberKind::Float | NumberKind::Double | NumberKind::Decimal => round_significant(n, self.precision),
            _ => n,
        };
        Some(self.formatter.from_number(n))
    }

    fn write(&self, value: &FieldValue, _date_1904: bool) -> Result<WrittenCell, TextParseError> {
        let n = match value {
            FieldValue::Byte(v) => *v as f64,
            FieldValue::Short(v) => *v as f64,
            FieldValue::Int(v) => *v as f64,
            FieldValue::Long(v) => *v as f64,
            FieldValue::BigInteger(v) => *v as f64,
            // through text so 0.1f32 stays 0.1
            FieldValue::Float(v) => v.to_string().parse().unwrap_or(*v as f64),
            FieldValue::Double(v) => *v,
            FieldValue::Decimal(v) => v
                .to_f64()
                .ok_or_else(|| self.formatter.error(&v.to_string(), "not representable".into()))?,
            other => return Err(self.formatter.error(&other.to_string(), "not a number value".into())),
        };
        Ok(WrittenCell::new(CellValue::Number(n)))
    }

    fn number_format(&self) -> Option<NumberFormat> {
        self.excel_format.as_deref().map(NumberFormat::from_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{BasicConverter, CellConverter};
    use crate::rule::ConversionRule;
    use crate::value::FieldType;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use sheetbind_core::{CellAddress, Worksheet};
    use std::str::FromStr;

    fn read(field: FieldAdapter, value: CellValue) -> Result<FieldValue, crate::TypeBindError> {
        let config = Configuration::default();
        let mut sheet = Worksheet::new("S");
        sheet.set_cell_value_at(0, 0, value).unwrap();
        BasicConverter::<NumberCodec>::new(&field, &config)
            .unwrap()
            .to_object(CellRef::new(&sheet, CellAddress::new(0, 0)), &config)
    }

    #[test]
    fn test_native_numbers() {
        assert_eq!(
            read(FieldAdapter::new("n", FieldType::Int), CellValue::Number(41.6)).unwrap(),
            FieldValue::Int(42)
        );
        assert_eq!(
            read(FieldAdapter::new("d", FieldType::Double), CellValue::Number(0.1 + 0.2)).unwrap(),
            FieldValue::Double(0.3)
        );
        assert_eq!(
            read(FieldAdapter::new("m", FieldType::Decimal), CellValue::Number(12.34)).unwrap(),
            FieldValue::Decimal(Decimal::from_str("12.34").unwrap())
        );
    }

    #[test]
    fn test_range_rejected() {
        assert!(read(FieldAdapter::new("b", FieldType::Byte), CellValue::Number(200.0)).is_err());
        let err = read(FieldAdapter::new("b", FieldType::Byte), CellValue::string("200")).unwrap_err();
        assert_eq!(err.target_value(), &FieldValue::from("200"));
        assert_eq!(err.message_vars()["max"], 127.0);
    }

    #[test]
    fn test_precision() {
        let field = FieldAdapter::new("d", FieldType::Double).rule(ConversionRule::new().precision(3));
        assert_eq!(
            read(field, CellValue::Number(3.14159)).unwrap(),
            FieldValue::Double(3.14)
        );
    }

    #[test]
    fn test_write_native_with_format() {
        let config = Configuration::default();
        let mut sheet = Worksheet::new("S");
        let field = FieldAdapter::new("price", FieldType::Decimal).rule(ConversionRule::new().pattern("#,##0.00"));
        let c = BasicConverter::<NumberCodec>::new(&field, &config).unwrap();

        c.to_cell(
            &FieldValue::Decimal(Decimal::from_str("1234.5").unwrap()),
            &mut sheet,
            CellAddress::new(0, 0),
            &config,
        )
        .unwrap();
        assert_eq!(sheet.get_value_at(0, 0), CellValue::Number(1234.5));
        assert_eq!(sheet.cell_style_at(0, 0).number_format.format_string(), "#,##0.00");

        // read back through the pattern as text would also work
        assert_eq!(
            c.to_object(CellRef::new(&sheet, CellAddress::new(0, 0)), &config).unwrap(),
            FieldValue::Decimal(Decimal::from_str("1234.5").unwrap())
        );
    }

    #[test]
    fn test_float_write_keeps_short_form() {
        let c = NumberCodec::build(
            &FieldAdapter::new("f", FieldType::Float),
            Direction::Save,
            &Configuration::default(),
        )
        .unwrap();
        assert_eq!(
            c.write(&FieldValue::Float(0.1), false).unwrap().value,
            CellValue::Number(0.1)
        );
    }
}
