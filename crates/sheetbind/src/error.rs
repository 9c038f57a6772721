//! Error types for sheetbind
//!
//! - [`TextParseError`]: text could not be parsed by a formatter
//! - [`TypeBindError`]: a cell could not be converted for a field
//! - [`ConfigError`]: a field's conversion rule is malformed; always fatal
//! - [`ProcessError`]: what a load or save pass stops with

use serde_json::{Map, Value};
use sheetbind_core::CellAddress;
use thiserror::Error;

use crate::value::{FieldType, FieldValue};

/// Named values describing a failure, for message templates
pub type MessageVars = Map<String, Value>;

/// Result type alias for rule resolution
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A text-level parse failure, independent of any cell
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot parse '{text}' as {target}: {reason}")]
pub struct TextParseError {
    text: String,
    target: String,
    reason: String,
    message_vars: MessageVars,
}

impl TextParseError {
    pub fn new(text: impl Into<String>, target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: target.into(),
            reason: reason.into(),
            message_vars: MessageVars::new(),
        }
    }

    /// Add a message variable
    pub fn with_var(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.message_vars.insert(name.to_string(), value.into());
        self
    }

    /// Add every variable of `vars`, keeping ones already set
    pub fn with_vars(mut self, vars: &MessageVars) -> Self {
        for (k, v) in vars {
            self.message_vars.entry(k.clone()).or_insert_with(|| v.clone());
        }
        self
    }

    /// The offending text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Name of the type the text was parsed as
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn message_vars(&self) -> &MessageVars {
        &self.message_vars
    }
}

/// Underlying cause of a [`TypeBindError`]
#[derive(Debug, Error)]
pub enum BindCause {
    #[error(transparent)]
    Parse(#[from] TextParseError),

    #[error(transparent)]
    Sheet(#[from] sheetbind_core::Error),
}

/// A cell could not be converted to or from a field's type
///
/// Carries the field, the type it is bound as, the rejected value, and the
/// message variables of the failed parse.
#[derive(Debug, Error)]
#[error("field '{field}': cannot convert '{target_value}' to {bind_type}")]
pub struct TypeBindError {
    field: String,
    bind_type: FieldType,
    target_value: FieldValue,
    message_vars: MessageVars,
    #[source]
    source: Option<BindCause>,
}

impl TypeBindError {
    /// A failure with no underlying cause
    pub fn new(field: impl Into<String>, bind_type: FieldType, target_value: FieldValue) -> Self {
        Self {
            field: field.into(),
            bind_type,
            target_value,
            message_vars: MessageVars::new(),
            source: None,
        }
    }

    /// Wrap a parse failure; its message variables are carried over
    pub fn from_parse(
        field: impl Into<String>,
        bind_type: FieldType,
        target_value: FieldValue,
        cause: TextParseError,
    ) -> Self {
        let message_vars = cause.message_vars().clone();
        Self {
            field: field.into(),
            bind_type,
            target_value,
            message_vars,
            source: Some(BindCause::Parse(cause)),
        }
    }

    /// Wrap a worksheet failure raised while writing
    pub fn from_sheet(
        field: impl Into<String>,
        bind_type: FieldType,
        target_value: FieldValue,
        cause: sheetbind_core::Error,
    ) -> Self {
        let mut err = Self::new(field, bind_type, target_value);
        err.source = Some(BindCause::Sheet(cause));
        err
    }

    pub fn with_var(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.message_vars.insert(name.to_string(), value.into());
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The type the field is bound as
    pub fn bind_type(&self) -> &FieldType {
        &self.bind_type
    }

    /// The value that could not be converted
    pub fn target_value(&self) -> &FieldValue {
        &self.target_value
    }

    pub fn message_vars(&self) -> &MessageVars {
        &self.message_vars
    }

    /// The parse failure behind this error, if any
    pub fn parse_error(&self) -> Option<&TextParseError> {
        match &self.source {
            Some(BindCause::Parse(e)) => Some(e),
            _ => None,
        }
    }
}

/// A field's conversion rule is malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("field '{field}': no converter for type {field_type}")]
    NoConverter { field: String, field_type: String },

    #[error("field '{field}': attribute '{attribute}' is invalid: {message}")]
    InvalidAttribute {
        field: String,
        attribute: String,
        message: String,
    },

    #[error("field '{field}': cannot determine the element type of {field_type}")]
    MissingElementType { field: String, field_type: String },

    #[error("field '{field}': enum {enum_type} has no accessor '{accessor}'")]
    UnknownAccessor {
        field: String,
        enum_type: String,
        accessor: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, attribute: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidAttribute {
            field: field.to_string(),
            attribute: attribute.to_string(),
            message: message.into(),
        }
    }
}

/// A bean field could not be read or written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldAccessError {
    #[error("no field named '{0}'")]
    UnknownField(String),

    #[error("field '{field}' cannot hold a {value_kind} value")]
    Incompatible { field: String, value_kind: String },
}

/// What stops a load or save pass
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{address}{}: {source}", .label.as_deref().map(|l| format!(" ({})", l)).unwrap_or_default())]
    TypeBind {
        address: CellAddress,
        label: Option<String>,
        #[source]
        source: TypeBindError,
    },

    #[error(transparent)]
    FieldAccess(#[from] FieldAccessError),

    #[error(transparent)]
    Sheet(#[from] sheetbind_core::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_vars() {
        let err = TextParseError::new("abc", "int", "not a number").with_var("pattern", "#,##0");
        assert_eq!(err.to_string(), "cannot parse 'abc' as int: not a number");
        assert_eq!(err.message_vars()["pattern"], "#,##0");
    }

    #[test]
    fn test_bind_error_carries_cause() {
        let cause = TextParseError::new("abc", "int", "not a number").with_var("min", -1);
        let err = TypeBindError::from_parse("age", FieldType::Int, FieldValue::from("abc"), cause);

        assert_eq!(err.bind_type(), &FieldType::Int);
        assert_eq!(err.target_value(), &FieldValue::from("abc"));
        assert_eq!(err.message_vars()["min"], -1);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "field 'age': cannot convert 'abc' to int");
    }

    #[test]
    fn test_process_error_display() {
        let err = ProcessError::TypeBind {
            address: CellAddress::new(1, 1),
            label: Some("Age".into()),
            source: TypeBindError::new("age", FieldType::Int, FieldValue::from("x")),
        };
        assert_eq!(err.to_string(), "B2 (Age): field 'age': cannot convert 'x' to int");
    }
}
