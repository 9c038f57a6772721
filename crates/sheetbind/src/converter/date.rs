use chrono::FixedOffset;
use sheetbind_core::{date_serial, CellValue, NumberFormat};

use super::{CellCodec, CellRef, WrittenCell};
use crate::config::Configuration;
use crate::error::{ConfigError, TextParseError};
use crate::format::{date_formatter, to_excel_pattern, DateKind, DateTimeFormatter, TextFormatter};
use crate::rule::{Direction, FieldAdapter};
use crate::value::FieldValue;

/// Every date kind through one routine, narrowed per kind
///
/// Numeric cells are date serials in the sheet's date system. Values are
/// written as serials with a date number format: the rule's Excel pattern,
/// else its date pattern translated, else the kind's default.
#[derive(Debug)]
pub struct DateCodec {
    kind: DateKind,
    formatter: DateTimeFormatter,
    excel_format: String,
}

impl DateCodec {
    fn zone(&self) -> FixedOffset {
        self.formatter.zone()
    }

    fn serial_error(&self, text: String, reason: &str) -> TextParseError {
        TextParseError::new(text, self.kind.field_type().type_name(), reason)
            .with_var("pattern", self.formatter.pattern())
    }
}

impl CellCodec for DateCodec {
    fn build(field: &FieldAdapter, direction: Direction, config: &Configuration) -> Result<Self, ConfigError> {
        let kind = DateKind::of(field.field_type())
            .ok_or_else(|| ConfigError::invalid(field.name(), "type", "not a date type"))?;
        let rule = field.conversion_rule(direction);
        let formatter = date_formatter(field.name(), kind, rule, config.default_locale())?;

        let excel_format = match (&rule.excel_pattern, &rule.pattern) {
            (Some(excel), _) => excel.clone(),
            (None, Some(pattern)) => {
                to_excel_pattern(pattern).map_err(|msg| ConfigError::invalid(field.name(), "pattern", msg))?
            }
            (None, None) => kind.default_excel_pattern().to_string(),
        };

        Ok(Self {
            kind,
            formatter,
            excel_format,
        })
    }

    fn formatter(&self) -> &dyn TextFormatter {
        &self.formatter
    }

    fn read_native(&self, cell: &CellRef<'_>, _config: &Configuration) -> Option<Result<FieldValue, TextParseError>> {
        let serial = match cell.value() {
            CellValue::Number(n) => *n,
            _ => return None,
        };
        Some(
            date_serial::to_datetime(serial, cell.is_date_1904())
                .and_then(|local| self.kind.narrow(local, self.zone()))
                .ok_or_else(|| self.serial_error(serial.to_string(), "not a date serial")),
        )
    }

    fn write(&self, value: &FieldValue, date_1904: bool) -> Result<WrittenCell, TextParseError> {
        let serial = match value {
            FieldValue::Time(t) => date_serial::time_fraction(*t),
            other => {
                let local = DateKind::widen(other, self.zone())
                    .ok_or_else(|| self.serial_error(other.to_string(), "not a date value"))?;
                date_serial::from_datetime(local, date_1904)
                    .map_err(|e| self.serial_error(other.to_string(), &e.to_string()))?
            }
        };
        Ok(WrittenCell::new(CellValue::Number(serial)))
    }

    fn number_format(&self) -> Option<NumberFormat> {
        Some(NumberFormat::from_string(self.excel_format.clone()))
    }
}
