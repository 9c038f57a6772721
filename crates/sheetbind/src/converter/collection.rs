use super::CellCodec;
use crate::config::Configuration;
use crate::error::ConfigError;
use crate::format::{CollectionKind, ListFormatter, TextFormatter};
use crate::rule::{Direction, FieldAdapter};

/// Lists, sets and arrays as delimited text
///
/// The element type is the rule's item type, else the field's declared
/// element type, else the array component; a field with none of these is
/// rejected when the converter is created. Elements use the formatter of
/// their type configured by the same rule.
#[derive(Debug)]
pub struct CollectionCodec {
    formatter: ListFormatter,
}

impl CellCodec for CollectionCodec {
    fn build(field: &FieldAdapter, direction: Direction, config: &Configuration) -> Result<Self, ConfigError> {
        let kind = CollectionKind::of(field.field_type())
            .ok_or_else(|| ConfigError::invalid(field.name(), "type", "not a collection type"))?;
        let element_type = field
            .resolve_element_type(direction)
            .ok_or_else(|| ConfigError::MissingElementType {
                field: field.name().to_string(),
                field_type: field.field_type().type_name(),
            })?;

        let rule = field.conversion_rule(direction);
        if rule.array.separator.is_empty() {
            return Err(ConfigError::invalid(field.name(), "separator", "must not be empty"));
        }

        let element = config
            .formatters()
            .create(field.name(), &element_type, rule, config.default_locale())?
            .ok_or_else(|| ConfigError::NoConverter {
                field: field.name().to_string(),
                field_type: element_type.type_name(),
            })?;

        Ok(Self {
            formatter: ListFormatter::new(kind, element_type, element)
                .separator(rule.array.separator.clone())
                .ignore_empty_item(rule.array.ignore_empty_item)
                .trim(rule.trim),
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
    use crate::rule::ConversionRule;
    use crate::value::{FieldType, FieldValue};
    use pretty_assertions::assert_eq;
    use sheetbind_core::{CellAddress, CellValue, Worksheet};

    #[test]
    fn test_missing_element_type() {
        let field = FieldAdapter::new("tags", FieldType::List);
        let err = BasicConverter::<CollectionCodec>::new(&field, &Configuration::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingElementType { .. }));
    }

    #[test]
    fn test_int_array() {
        let config = Configuration::default();
        let field = FieldAdapter::new("codes", FieldType::array_of(FieldType::Int))
            .rule(ConversionRule::new().separator(";").trim(true));
        let c = BasicConverter::<CollectionCodec>::new(&field, &config).unwrap();

        let mut sheet = Worksheet::new("S");
        sheet.set_cell_value_at(0, 0, "1; 2 ;3").unwrap();
        assert_eq!(
            c.to_object(CellRef::new(&sheet, CellAddress::new(0, 0)), &config).unwrap(),
            FieldValue::Array(vec![FieldValue::Int(1), FieldValue::Int(2), FieldValue::Int(3)])
        );

        c.to_cell(&FieldValue::Array(vec![]), &mut sheet, CellAddress::new(1, 0), &config)
            .unwrap();
        assert_eq!(sheet.get_value_at(1, 0), CellValue::string(""));
    }

    #[test]
    fn test_date_elements_follow_rule_pattern() {
        let config = Configuration::default();
        let field = FieldAdapter::new("days", FieldType::List)
            .element_type(FieldType::Date)
            .rule(ConversionRule::new().pattern("yyyy/MM/dd"));
        let c = BasicConverter::<CollectionCodec>::new(&field, &config).unwrap();

        let mut sheet = Worksheet::new("S");
        sheet.set_cell_value_at(0, 0, "2024/01/02,2024/01/03").unwrap();
        let value = c.to_object(CellRef::new(&sheet, CellAddress::new(0, 0)), &config).unwrap();
        assert_eq!(value.items().map(<[FieldValue]>::len), Some(2));
    }
}
