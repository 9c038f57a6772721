//! Converter resolution and registration

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use sheetbind::converter::{CodecFactory, NumberCodec, StringCodec};
use sheetbind::prelude::*;
use sheetbind::{CellConverter, CellConverterFactory, CellRef};

/// Reads every cell as a fixed string
#[derive(Debug)]
struct Constant(&'static str);

impl CellConverter for Constant {
    fn to_object(&self, _cell: CellRef<'_>, _config: &Configuration) -> Result<FieldValue, TypeBindError> {
        Ok(FieldValue::from(self.0))
    }

    fn to_cell(
        &self,
        _value: &FieldValue,
        sheet: &mut Worksheet,
        address: CellAddress,
        _config: &Configuration,
    ) -> Result<(), TypeBindError> {
        sheet.set_cell_value_at(address.row, address.col, self.0).unwrap();
        Ok(())
    }
}

#[derive(Debug)]
struct ConstantFactory(&'static str);

impl CellConverterFactory for ConstantFactory {
    fn create(&self, _field: &FieldAdapter, _config: &Configuration) -> Result<Box<dyn CellConverter>, ConfigError> {
        Ok(Box::new(Constant(self.0)))
    }
}

fn read_with(registry: Arc<ConverterRegistry>, field_type: FieldType) -> FieldValue {
    let config = Configuration::default().with_registry(registry);
    let field = FieldAdapter::new("f", field_type);
    let converter = config
        .registry()
        .resolve(field.field_type())
        .unwrap()
        .create(&field, &config)
        .unwrap();
    let sheet = Worksheet::new("Sheet1");
    converter
        .to_object(CellRef::new(&sheet, CellAddress::new(0, 0)), &config)
        .unwrap()
}

#[test]
fn test_fallback_order() {
    let registry = Arc::new(ConverterRegistry::new());
    registry.register_family(TypeFamily::Array, Arc::new(ConstantFactory("array")));
    registry.register_family(TypeFamily::Set, Arc::new(ConstantFactory("set")));
    registry.register_family(TypeFamily::List, Arc::new(ConstantFactory("list")));
    registry.register_family(TypeFamily::Enum, Arc::new(ConstantFactory("enum")));

    let cases = [
        (FieldType::enumeration(EnumType::new("Status", ["On", "Off"])), "enum"),
        (FieldType::named("ArrayList", TypeFamily::List), "list"),
        (FieldType::named("LinkedHashSet", TypeFamily::Set), "set"),
        (FieldType::array_of(FieldType::Long), "array"),
    ];
    for (ty, expected) in cases {
        assert_eq!(read_with(registry.clone(), ty), FieldValue::from(expected));
    }
    assert!(registry.resolve(&FieldType::Int).is_none());
}

#[test]
fn test_user_registration_overrides_builtin() {
    let registry = Arc::new(ConverterRegistry::with_defaults());
    registry.register(FieldType::String, Arc::new(ConstantFactory("custom")));

    assert_eq!(read_with(registry.clone(), FieldType::String), FieldValue::from("custom"));
    // other built-ins are untouched
    assert_eq!(read_with(registry, FieldType::Int), FieldValue::Null);
}

#[test]
fn test_user_type_registration() {
    let registry = Arc::new(ConverterRegistry::with_defaults());
    let money = FieldType::named("Money", TypeFamily::Plain);
    assert!(!registry.contains(&money));

    registry.register(money.clone(), Arc::new(CodecFactory::<StringCodec>::new()));
    assert!(registry.contains(&money));

    let config = Configuration::default().with_registry(registry);
    let processor = SheetProcessor::new(
        config,
        [FieldMapping::new(FieldAdapter::new("price", money), CellAddress::new(0, 0))],
    )
    .unwrap();

    let mut sheet = Worksheet::new("Sheet1");
    sheet.set_cell_value("A1", "12.50 EUR").unwrap();
    let mut record = FieldMap::new();
    processor.load(&sheet, &mut record).unwrap();
    assert_eq!(record.get("price"), Some(&FieldValue::from("12.50 EUR")));
}

#[test]
fn test_registration_during_concurrent_resolution() {
    let registry = Arc::new(ConverterRegistry::with_defaults());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    assert!(registry.resolve(&FieldType::Int).is_some());
                    assert!(registry.resolve(&FieldType::array_of(FieldType::String)).is_some());
                }
            })
        })
        .collect();

    let writer = {
        let registry = registry.clone();
        thread::spawn(move || {
            for i in 0..100 {
                let ty = FieldType::named(format!("User{}", i), TypeFamily::Plain);
                registry.register(ty, Arc::new(CodecFactory::<NumberCodec>::new()));
            }
        })
    };

    for reader in readers {
        reader.join().unwrap();
    }
    writer.join().unwrap();

    for i in 0..100 {
        assert!(registry.contains(&FieldType::named(format!("User{}", i), TypeFamily::Plain)));
    }
}
