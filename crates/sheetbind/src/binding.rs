//! Per-pass error collection
//!
//! A load or save pass in continue mode records every failed field here
//! instead of stopping. The collection only grows; one is created per pass
//! and never shared between passes.

use serde_json::Value;
use sheetbind_core::CellAddress;

use crate::error::{MessageVars, TypeBindError};
use crate::format::{DateKind, NumberKind};
use crate::messages::MessageInterpolator;
use crate::value::{FieldType, FieldValue, TypeFamily};

/// Message code of type-bind failures
pub const TYPE_BIND_FAILURE: &str = "typeBindFailure";

/// What went wrong with a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    /// The cell could not be converted to the field's type
    TypeBind {
        bind_type: FieldType,
        rejected_value: FieldValue,
        vars: MessageVars,
    },
    /// A business rule rejected the value
    Validation { code: String, vars: MessageVars },
}

/// One recorded failure, attributable to a field and a cell
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    field: String,
    address: Option<CellAddress>,
    label: Option<String>,
    kind: FieldErrorKind,
}

impl FieldError {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn address(&self) -> Option<CellAddress> {
        self.address
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> &FieldErrorKind {
        &self.kind
    }

    pub fn is_type_bind(&self) -> bool {
        matches!(self.kind, FieldErrorKind::TypeBind { .. })
    }

    /// Message codes, most specific first
    pub fn codes(&self) -> Vec<String> {
        match &self.kind {
            FieldErrorKind::TypeBind { bind_type, .. } => {
                let mut codes = vec![format!("{}.{}", TYPE_BIND_FAILURE, bind_type.type_name())];
                if let Some(category) = category(bind_type) {
                    codes.push(format!("{}.{}", TYPE_BIND_FAILURE, category));
                }
                codes.push(TYPE_BIND_FAILURE.to_string());
                codes
            }
            FieldErrorKind::Validation { code, .. } => vec![code.clone()],
        }
    }

    /// Variables for rendering this error's message
    ///
    /// The error's own variables plus `sheetName`, `cellAddress`, `label`,
    /// `fieldName`, `validatedValue` and, for type-bind failures, `bindType`.
    pub fn message_vars(&self, sheet_name: &str) -> MessageVars {
        let mut vars = match &self.kind {
            FieldErrorKind::TypeBind { vars, .. } | FieldErrorKind::Validation { vars, .. } => vars.clone(),
        };
        vars.insert("sheetName".into(), Value::from(sheet_name));
        vars.insert(
            "cellAddress".into(),
            self.address.map_or(Value::Null, |a| Value::from(a.to_a1_string())),
        );
        vars.insert(
            "label".into(),
            Value::from(self.label.clone().unwrap_or_else(|| self.field.clone())),
        );
        vars.insert("fieldName".into(), Value::from(self.field.clone()));
        if let FieldErrorKind::TypeBind {
            bind_type,
            rejected_value,
            ..
        } = &self.kind
        {
            vars.insert("bindType".into(), Value::from(bind_type.type_name()));
            vars.insert("validatedValue".into(), Value::from(rejected_value.to_string()));
        }
        vars
    }
}

fn category(bind_type: &FieldType) -> Option<&'static str> {
    match bind_type.family() {
        TypeFamily::Enum => return Some("enum"),
        TypeFamily::List | TypeFamily::Set | TypeFamily::Array => return Some("collection"),
        TypeFamily::Plain => {}
    }
    if NumberKind::of(bind_type).is_some() {
        Some("number")
    } else if DateKind::of(bind_type).is_some() {
        Some("date")
    } else {
        None
    }
}

/// The failures of one sheet pass, in the order they happened
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetBindingErrors {
    sheet_name: String,
    errors: Vec<FieldError>,
}

impl SheetBindingErrors {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            errors: Vec::new(),
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Record a conversion failure
    pub fn push_type_bind(&mut self, address: CellAddress, label: Option<String>, error: &TypeBindError) {
        self.errors.push(FieldError {
            field: error.field().to_string(),
            address: Some(address),
            label,
            kind: FieldErrorKind::TypeBind {
                bind_type: error.bind_type().clone(),
                rejected_value: error.target_value().clone(),
                vars: error.message_vars().clone(),
            },
        });
    }

    /// Record a business-rule failure
    pub fn push_validation(
        &mut self,
        field: impl Into<String>,
        address: Option<CellAddress>,
        label: Option<String>,
        code: impl Into<String>,
        vars: MessageVars,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            address,
            label,
            kind: FieldErrorKind::Validation {
                code: code.into(),
                vars,
            },
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Failures of one field
    pub fn field_errors<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.field_errors(field).next().is_some()
    }

    pub fn type_bind_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(|e| e.is_type_bind())
    }

    /// Render every failure through `messages`
    pub fn messages(&self, messages: &MessageInterpolator) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| messages.render(e, &self.sheet_name))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SheetBindingErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
