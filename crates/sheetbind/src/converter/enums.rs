use super::CellCodec;
use crate::config::Configuration;
use crate::error::ConfigError;
use crate::format::{EnumFormatter, TextFormatter};
use crate::rule::{Direction, FieldAdapter};
use crate::value::FieldType;

/// Enum constants by name, label or alias accessor
#[derive(Debug)]
pub struct EnumCodec {
    formatter: EnumFormatter,
}

impl CellCodec for EnumCodec {
    fn build(field: &FieldAdapter, direction: Direction, _config: &Configuration) -> Result<Self, ConfigError> {
        let enum_type = match field.field_type() {
            FieldType::Enum(ty) => ty.clone(),
            other => {
                return Err(ConfigError::invalid(
                    field.name(),
                    "type",
                    format!("{} carries no enum constants", other),
                ))
            }
        };
        let rule = field.conversion_rule(direction);
        Ok(Self {
            formatter: EnumFormatter::from_rule(field.name(), enum_type, &rule.enumeration)?,
        })
    }

    fn formatter(&self) -> &dyn TextFormatter {
        &self.formatter
    }
}
