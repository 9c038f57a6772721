//! Fixed-address load and save
//!
//! [`SheetProcessor`] binds a set of fields, each at a known cell, to any
//! [`BindTarget`]. Converters are created once when the processor is built.
//! Each field is converted exactly once per pass. A failure either stops the
//! pass or, in continue mode, is recorded while the field is left empty.

use std::collections::BTreeMap;

use sheetbind_core::{CellAddress, CellValue, Worksheet};

use crate::binding::SheetBindingErrors;
use crate::config::Configuration;
use crate::converter::{CellConverter, CellRef};
use crate::error::{ConfigError, FieldAccessError, ProcessError, TypeBindError};
use crate::rule::FieldAdapter;
use crate::value::FieldValue;

/// A record whose fields can be read and written by name
pub trait BindTarget {
    fn field_value(&self, field: &str) -> Result<FieldValue, FieldAccessError>;

    fn set_field_value(&mut self, field: &str, value: FieldValue) -> Result<(), FieldAccessError>;
}

/// A record kept as a map of field names to values
///
/// Missing fields read as `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    values: BTreeMap<String, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl BindTarget for FieldMap {
    fn field_value(&self, field: &str) -> Result<FieldValue, FieldAccessError> {
        Ok(self.values.get(field).cloned().unwrap_or_default())
    }

    fn set_field_value(&mut self, field: &str, value: FieldValue) -> Result<(), FieldAccessError> {
        self.values.insert(field.to_string(), value);
        Ok(())
    }
}

/// A field bound to one cell
#[derive(Debug, Clone)]
pub struct FieldMapping {
    adapter: FieldAdapter,
    address: CellAddress,
    label: Option<String>,
}

impl FieldMapping {
    pub fn new(adapter: FieldAdapter, address: CellAddress) -> Self {
        Self {
            adapter,
            address,
            label: None,
        }
    }

    /// Human-readable name used in messages
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn adapter(&self) -> &FieldAdapter {
        &self.adapter
    }

    pub fn address(&self) -> CellAddress {
        self.address
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[derive(Debug)]
struct BoundField {
    mapping: FieldMapping,
    converter: Box<dyn CellConverter>,
}

/// Loads and saves records through fixed cells
#[derive(Debug)]
pub struct SheetProcessor {
    config: Configuration,
    fields: Vec<BoundField>,
}

impl SheetProcessor {
    /// Create a converter for every mapping
    ///
    /// Fails on the first field with no converter or a malformed rule.
    pub fn new(config: Configuration, mappings: impl IntoIterator<Item = FieldMapping>) -> Result<Self, ConfigError> {
        let mut fields = Vec::new();
        for mapping in mappings {
            let adapter = mapping.adapter();
            let factory = config
                .registry()
                .resolve(adapter.field_type())
                .ok_or_else(|| ConfigError::NoConverter {
                    field: adapter.name().to_string(),
                    field_type: adapter.field_type().to_string(),
                })?;
            let converter = factory.create(adapter, &config)?;
            log::debug!(
                "bound field '{}' at {} to {:?}",
                adapter.name(),
                mapping.address(),
                converter
            );
            fields.push(BoundField { mapping, converter });
        }
        Ok(Self { config, fields })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read every field from `sheet` into `target`
    pub fn load<T: BindTarget + ?Sized>(
        &self,
        sheet: &Worksheet,
        target: &mut T,
    ) -> Result<SheetBindingErrors, ProcessError> {
        let mut errors = SheetBindingErrors::new(sheet.name());
        for field in &self.fields {
            let cell = CellRef::new(sheet, field.mapping.address);
            let value = match field.converter.to_object(cell, &self.config) {
                Ok(value) => value,
                Err(e) => {
                    self.recover(&mut errors, &field.mapping, e)?;
                    FieldValue::Null
                }
            };
            target.set_field_value(field.mapping.adapter.name(), value)?;
        }
        Ok(errors)
    }

    /// Write every field of `source` into `sheet`
    pub fn save<T: BindTarget + ?Sized>(
        &self,
        source: &T,
        sheet: &mut Worksheet,
    ) -> Result<SheetBindingErrors, ProcessError> {
        let mut errors = SheetBindingErrors::new(sheet.name());
        for field in &self.fields {
            let address = field.mapping.address;
            let value = source.field_value(field.mapping.adapter.name())?;
            if let Err(e) = field.converter.to_cell(&value, sheet, address, &self.config) {
                self.recover(&mut errors, &field.mapping, e)?;
                sheet.set_cell_value_at(address.row, address.col, CellValue::Empty)?;
            }
        }
        Ok(errors)
    }

    fn recover(
        &self,
        errors: &mut SheetBindingErrors,
        mapping: &FieldMapping,
        error: TypeBindError,
    ) -> Result<(), ProcessError> {
        if !self.config.continue_type_bind_failure() {
            return Err(ProcessError::TypeBind {
                address: mapping.address,
                label: mapping.label.clone(),
                source: error,
            });
        }
        log::warn!("{}: {}; continuing", mapping.address, error);
        errors.push_type_bind(mapping.address, mapping.label.clone(), &error);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ConversionRule;
    use crate::value::FieldType;
    use pretty_assertions::assert_eq;

    fn mappings() -> Vec<FieldMapping> {
        vec![
            FieldMapping::new(FieldAdapter::new("name", FieldType::String), CellAddress::new(0, 0)),
            FieldMapping::new(FieldAdapter::new("age", FieldType::Int), CellAddress::new(0, 1)).with_label("Age"),
            FieldMapping::new(FieldAdapter::new("active", FieldType::Bool), CellAddress::new(0, 2)),
        ]
    }

    fn sheet() -> Worksheet {
        let mut sheet = Worksheet::new("Users");
        sheet.set_cell_value("A1", "Alice").unwrap();
        sheet.set_cell_value("B1", "abc").unwrap();
        sheet.set_cell_value("C1", "yes").unwrap();
        sheet
    }

    #[test]
    fn test_strict_mode_stops_at_first_failure() {
        let processor = SheetProcessor::new(Configuration::default(), mappings()).unwrap();
        let mut record = FieldMap::new();

        let err = processor.load(&sheet(), &mut record).unwrap_err();
        match err {
            ProcessError::TypeBind { address, label, .. } => {
                assert_eq!(address, CellAddress::new(0, 1));
                assert_eq!(label.as_deref(), Some("Age"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(record.get("active"), None);
    }

    #[test]
    fn test_continue_mode_records_and_proceeds() {
        let config = Configuration::default().with_continue_type_bind_failure(true);
        let processor = SheetProcessor::new(config, mappings()).unwrap();
        let mut record = FieldMap::new();

        let errors = processor.load(&sheet(), &mut record).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.sheet_name(), "Users");
        assert!(errors.has_field_errors("age"));
        assert_eq!(record.get("name"), Some(&FieldValue::from("Alice")));
        assert_eq!(record.get("age"), Some(&FieldValue::Null));
        assert_eq!(record.get("active"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_unregistered_type_is_config_error() {
        let mapping = FieldMapping::new(
            FieldAdapter::new("money", FieldType::named("Money", crate::value::TypeFamily::Plain)),
            CellAddress::new(0, 0),
        );
        let err = SheetProcessor::new(Configuration::default(), [mapping]).unwrap_err();
        assert!(matches!(err, ConfigError::NoConverter { .. }));
    }

    #[test]
    fn test_malformed_rule_fails_at_creation() {
        let mapping = FieldMapping::new(
            FieldAdapter::new("age", FieldType::Int).rule(ConversionRule::new().default_value("x")),
            CellAddress::new(0, 0),
        );
        assert!(SheetProcessor::new(Configuration::default(), [mapping]).is_err());
    }

    #[test]
    fn test_save_writes_every_field() {
        let processor = SheetProcessor::new(Configuration::default(), mappings()).unwrap();
        let record = FieldMap::new().with("name", "Bob").with("age", 41).with("active", false);
        let mut sheet = Worksheet::new("Out");

        let errors = processor.save(&record, &mut sheet).unwrap();
        assert!(errors.is_empty());
        assert_eq!(sheet.get_value("A1").unwrap(), CellValue::string("Bob"));
        assert_eq!(sheet.get_value("B1").unwrap(), CellValue::Number(41.0));
        assert_eq!(sheet.get_value("C1").unwrap(), CellValue::Boolean(false));
    }
}
