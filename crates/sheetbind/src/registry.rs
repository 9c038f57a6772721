//! Converter registry
//!
//! Resolution is an exact type match first, then an ordered list of family
//! fallbacks: enum, list, set, array. The table is copy-on-write: a
//! registration builds a new table and swaps it in, so resolution only holds
//! the lock long enough to clone an `Arc`.

use std::sync::{Arc, RwLock};

use ahash::AHashMap;

use crate::converter::{
    BooleanCodec, CellConverterFactory, CharCodec, CodecFactory, CollectionCodec, DateCodec, EnumCodec, LinkCodec,
    NumberCodec, StringCodec,
};
use crate::format::{DateKind, NumberKind};
use crate::value::{FieldType, TypeFamily};

/// Fallback order after an exact miss
const FALLBACK_ORDER: [TypeFamily; 4] = [TypeFamily::Enum, TypeFamily::List, TypeFamily::Set, TypeFamily::Array];

#[derive(Debug, Clone, Default)]
struct Table {
    exact: AHashMap<FieldType, Arc<dyn CellConverterFactory>>,
    fallbacks: Vec<(TypeFamily, Arc<dyn CellConverterFactory>)>,
}

/// Converter factories by field type
#[derive(Debug, Default)]
pub struct ConverterRegistry {
    table: RwLock<Arc<Table>>,
}

impl ConverterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with a factory for every built-in type
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register_scalar_converters();
        registry.register_collection_converters();
        registry
    }

    fn register_scalar_converters(&self) {
        self.register(FieldType::Bool, Arc::new(CodecFactory::<BooleanCodec>::new()));
        for kind in NumberKind::ALL {
            self.register(kind.field_type(), Arc::new(CodecFactory::<NumberCodec>::new()));
        }
        for kind in DateKind::ALL {
            self.register(kind.field_type(), Arc::new(CodecFactory::<DateCodec>::new()));
        }
        self.register(FieldType::Char, Arc::new(CodecFactory::<CharCodec>::new()));
        self.register(FieldType::String, Arc::new(CodecFactory::<StringCodec>::new()));
        self.register(FieldType::Link, Arc::new(CodecFactory::<LinkCodec>::new()));
    }

    fn register_collection_converters(&self) {
        self.register_family(TypeFamily::Enum, Arc::new(CodecFactory::<EnumCodec>::new()));
        for family in [TypeFamily::List, TypeFamily::Set, TypeFamily::Array] {
            self.register_family(family, Arc::new(CodecFactory::<CollectionCodec>::new()));
        }
        self.register(FieldType::List, Arc::new(CodecFactory::<CollectionCodec>::new()));
        self.register(FieldType::Set, Arc::new(CodecFactory::<CollectionCodec>::new()));
    }

    fn update(&self, edit: impl FnOnce(&mut Table)) {
        let mut guard = self.table.write().unwrap_or_else(|e| e.into_inner());
        let mut next = Table::clone(&guard);
        edit(&mut next);
        *guard = Arc::new(next);
    }

    fn snapshot(&self) -> Arc<Table> {
        self.table.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Register a factory for one type, replacing any earlier one
    pub fn register(&self, field_type: FieldType, factory: Arc<dyn CellConverterFactory>) {
        self.update(|table| {
            table.exact.insert(field_type, factory);
        });
    }

    /// Register the fallback factory of a family, replacing any earlier one
    ///
    /// `TypeFamily::Plain` has no fallback; registering it does nothing.
    pub fn register_family(&self, family: TypeFamily, factory: Arc<dyn CellConverterFactory>) {
        if family == TypeFamily::Plain {
            return;
        }
        self.update(|table| {
            table.fallbacks.retain(|(f, _)| *f != family);
            table.fallbacks.push((family, factory));
            table
                .fallbacks
                .sort_by_key(|(f, _)| FALLBACK_ORDER.iter().position(|o| o == f));
        });
    }

    /// Find the factory for a type
    pub fn resolve(&self, field_type: &FieldType) -> Option<Arc<dyn CellConverterFactory>> {
        let table = self.snapshot();
        if let Some(factory) = table.exact.get(field_type) {
            return Some(factory.clone());
        }

        let family = field_type.family();
        let found = table
            .fallbacks
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, factory)| factory.clone());
        if found.is_some() {
            log::debug!("resolved {} through the {:?} fallback", field_type, family);
        }
        found
    }

    /// Whether a factory is registered for exactly this type
    pub fn contains(&self, field_type: &FieldType) -> bool {
        self.snapshot().exact.contains_key(field_type)
    }
}
