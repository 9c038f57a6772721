//! Conversion throughput
//!
//! Measures converter creation and per-cell load and save for the common
//! field types.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sheetbind::prelude::*;
use sheetbind::{CellConverter, CellRef};

const ROWS: u32 = 1_000;

fn fields() -> Vec<FieldAdapter> {
    vec![
        FieldAdapter::new("id", FieldType::Long),
        FieldAdapter::new("name", FieldType::String),
        FieldAdapter::new("active", FieldType::Bool),
        FieldAdapter::new("joined", FieldType::Date).rule(ConversionRule::new().pattern("yyyy/MM/dd")),
        FieldAdapter::new("tags", FieldType::List).element_type(FieldType::String),
    ]
}

fn filled_sheet() -> Worksheet {
    let mut sheet = Worksheet::new("Bench");
    for row in 0..ROWS {
        sheet.set_cell_value_at(row, 0, row as f64).unwrap();
        sheet.set_cell_value_at(row, 1, format!("user{}", row)).unwrap();
        sheet.set_cell_value_at(row, 2, if row % 2 == 0 { "yes" } else { "no" }).unwrap();
        sheet.set_cell_value_at(row, 3, "2024/06/30").unwrap();
        sheet.set_cell_value_at(row, 4, "red,green,blue").unwrap();
    }
    sheet
}

fn benchmark_create(c: &mut Criterion) {
    let config = Configuration::default();
    let fields = fields();

    c.bench_function("create_converters", |b| {
        b.iter(|| {
            for field in &fields {
                let factory = config.registry().resolve(field.field_type()).unwrap();
                black_box(factory.create(field, &config).unwrap());
            }
        })
    });
}

fn benchmark_load(c: &mut Criterion) {
    let config = Configuration::default();
    let converters: Vec<_> = fields()
        .iter()
        .map(|f| config.registry().resolve(f.field_type()).unwrap().create(f, &config).unwrap())
        .collect();
    let sheet = filled_sheet();

    let mut group = c.benchmark_group("load");
    group.throughput(Throughput::Elements(ROWS as u64 * converters.len() as u64));
    group.bench_function("rows", |b| {
        b.iter(|| {
            for row in 0..ROWS {
                for (col, converter) in converters.iter().enumerate() {
                    let cell = CellRef::new(&sheet, CellAddress::new(row, col as u16));
                    black_box(converter.to_object(cell, &config).unwrap());
                }
            }
        })
    });
    group.finish();
}

fn benchmark_save(c: &mut Criterion) {
    let config = Configuration::default();
    let field = FieldAdapter::new("amount", FieldType::Double).rule(ConversionRule::new().excel_pattern("#,##0.00"));
    let converter = config
        .registry()
        .resolve(field.field_type())
        .unwrap()
        .create(&field, &config)
        .unwrap();

    let mut group = c.benchmark_group("save");
    group.throughput(Throughput::Elements(ROWS as u64));
    group.bench_function("doubles", |b| {
        b.iter(|| {
            let mut sheet = Worksheet::new("Out");
            for row in 0..ROWS {
                let value = FieldValue::Double(row as f64 * 1.25);
                converter
                    .to_cell(&value, &mut sheet, CellAddress::new(row, 0), &config)
                    .unwrap();
            }
            black_box(sheet)
        })
    });
    group.finish();
}

criterion_group!(benches, benchmark_create, benchmark_load, benchmark_save);
criterion_main!(benches);
