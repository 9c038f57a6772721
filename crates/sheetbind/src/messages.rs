//! Error message templates
//!
//! Templates use `{name}` placeholders filled from an error's message
//! variables. A type-bind failure looks up `typeBindFailure.<type>`, then
//! `typeBindFailure.<category>` (number, date, enum, collection), then
//! `typeBindFailure`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::binding::FieldError;
use crate::error::MessageVars;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_.]+)\}").expect("Failed to build placeholder regex"));

const HEAD: &str = "[{sheetName}]:{cellAddress} - '{label}'";

const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("typeBindFailure", "{head} could not be converted to {bindType}: '{validatedValue}'."),
    (
        "typeBindFailure.boolean",
        "{head} must be one of [{loadForTrue}] or [{loadForFalse}]: '{validatedValue}'.",
    ),
    ("typeBindFailure.char", "{head} must be a single character: '{validatedValue}'."),
    (
        "typeBindFailure.number",
        "{head} must be a number between {min} and {max}: '{validatedValue}'.",
    ),
    ("typeBindFailure.float", "{head} must be a number: '{validatedValue}'."),
    ("typeBindFailure.double", "{head} must be a number: '{validatedValue}'."),
    ("typeBindFailure.decimal", "{head} must be a number: '{validatedValue}'."),
    ("typeBindFailure.biginteger", "{head} must be an integer: '{validatedValue}'."),
    (
        "typeBindFailure.date",
        "{head} must be a date in the format '{pattern}': '{validatedValue}'.",
    ),
    ("typeBindFailure.enum", "{head} must be one of [{candidates}]: '{validatedValue}'."),
    (
        "typeBindFailure.collection",
        "{head} must be a list of {itemType} separated by '{separator}': '{validatedValue}'.",
    ),
];

/// Renders [`FieldError`]s to text
#[derive(Debug, Clone)]
pub struct MessageInterpolator {
    templates: HashMap<String, String>,
}

impl Default for MessageInterpolator {
    fn default() -> Self {
        let templates = DEFAULT_TEMPLATES
            .iter()
            .map(|(code, tpl)| (code.to_string(), tpl.replace("{head}", HEAD)))
            .collect();
        Self { templates }
    }
}

impl MessageInterpolator {
    /// An interpolator with no templates
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Add or replace the template of `code`
    pub fn with_template(mut self, code: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(code.into(), template.into());
        self
    }

    pub fn template(&self, code: &str) -> Option<&str> {
        self.templates.get(code).map(String::as_str)
    }

    /// Fill `{name}` placeholders from `vars`
    ///
    /// Unknown names are left as written. Arrays are joined with ", " and
    /// null renders as nothing.
    pub fn interpolate(&self, template: &str, vars: &MessageVars) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures<'_>| match vars.get(&caps[1]) {
                Some(value) => display_value(value),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// The message of one recorded failure
    ///
    /// Falls back to the first code itself when no template matches.
    pub fn render(&self, error: &FieldError, sheet_name: &str) -> String {
        let codes = error.codes();
        let vars = error.message_vars(sheet_name);
        match codes.iter().find_map(|code| self.template(code)) {
            Some(template) => self.interpolate(template, &vars),
            None => codes.first().cloned().unwrap_or_default(),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e18 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::SheetBindingErrors;
    use crate::error::{TextParseError, TypeBindError};
    use crate::value::{FieldType, FieldValue};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sheetbind_core::CellAddress;

    fn vars(value: Value) -> MessageVars {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_interpolate() {
        let messages = MessageInterpolator::empty();
        let vars = vars(json!({"name": "age", "items": ["a", "b"], "none": null, "n": 3.0}));

        assert_eq!(
            messages.interpolate("{name} in [{items}]{none} x{n} {missing}", &vars),
            "age in [a, b] x3 {missing}"
        );
    }

    #[test]
    fn test_most_specific_template_wins() {
        let cause = TextParseError::new("abc", "int", "not a number")
            .with_var("min", -2147483648i64)
            .with_var("max", 2147483647i64);
        let err = TypeBindError::from_parse("age", FieldType::Int, FieldValue::from("abc"), cause);
        let mut errors = SheetBindingErrors::new("Users");
        errors.push_type_bind(CellAddress::new(1, 2), Some("Age".into()), &err);

        let messages = MessageInterpolator::default();
        assert_eq!(
            errors.messages(&messages),
            vec!["[Users]:C2 - 'Age' must be a number between -2147483648 and 2147483647: 'abc'."]
        );

        let custom = messages.with_template("typeBindFailure.int", "{fieldName} needs an int");
        assert_eq!(errors.messages(&custom), vec!["age needs an int"]);
    }

    #[test]
    fn test_unknown_code_renders_code() {
        let mut errors = SheetBindingErrors::new("Users");
        errors.push_validation("name", None, None, "name.required", MessageVars::new());
        assert_eq!(errors.messages(&MessageInterpolator::default()), vec!["name.required"]);
    }
}
