//! Common imports for sheetbind users
//!
//! ```rust
//! use sheetbind::prelude::*;
//! ```

pub use crate::{
    // Records and processing
    BindTarget,
    // Cell model
    CellAddress,
    CellLink,
    CellValue,
    ConfigError,
    Configuration,
    ConversionRule,
    ConverterRegistry,
    EnumType,
    FieldAdapter,
    FieldMap,
    FieldMapping,
    FieldType,
    FieldValue,
    Locale,
    ProcessError,
    SheetBindingErrors,
    SheetProcessor,
    TypeBindError,
    TypeFamily,
    Worksheet,
};
