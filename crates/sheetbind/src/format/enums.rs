use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::TextFormatter;
use crate::error::{ConfigError, TextParseError};
use crate::rule::EnumRule;
use crate::value::{EnumType, EnumValue, FieldValue};

/// Where an [`EnumFormatter`] takes its keys from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumKeySource {
    /// A named accessor registered on the enum type
    Accessor(String),
    /// [`HasDisplayLabel`](crate::HasDisplayLabel) labels
    Label,
    /// Constant names
    Name,
}

/// Enum text through two lookup tables built once
#[derive(Debug, Clone)]
pub struct EnumFormatter {
    enum_type: Arc<EnumType>,
    ignore_case: bool,
    source: EnumKeySource,
    /// constant name -> display key
    to_key: HashMap<String, String>,
    /// display key (lowercased when ignoring case) -> constant name
    to_name: HashMap<String, String>,
    /// display keys in declaration order
    keys: Vec<String>,
}

impl EnumFormatter {
    /// Keys come from the alias accessor when one is named, else labels, else names
    pub fn from_rule(field: &str, enum_type: Arc<EnumType>, rule: &EnumRule) -> Result<Self, ConfigError> {
        let (source, keys): (EnumKeySource, Vec<String>) = match &rule.alias_name {
            Some(alias) => {
                let keys = enum_type.accessor(alias).ok_or_else(|| ConfigError::UnknownAccessor {
                    field: field.to_string(),
                    enum_type: enum_type.name().to_string(),
                    accessor: alias.clone(),
                })?;
                (EnumKeySource::Accessor(alias.clone()), keys.to_vec())
            }
            None => match enum_type.labels() {
                Some(labels) => (EnumKeySource::Label, labels.to_vec()),
                None => (EnumKeySource::Name, enum_type.constants().to_vec()),
            },
        };

        if keys.len() != enum_type.constants().len() {
            return Err(ConfigError::invalid(
                field,
                "aliasName",
                format!("{} keys for {} constants", keys.len(), enum_type.constants().len()),
            ));
        }

        let mut to_key = HashMap::with_capacity(keys.len());
        let mut to_name = HashMap::with_capacity(keys.len());
        for (name, key) in enum_type.constants().iter().zip(&keys) {
            to_key.insert(name.clone(), key.clone());
            let lookup = if rule.ignore_case { key.to_lowercase() } else { key.clone() };
            to_name.entry(lookup).or_insert_with(|| name.clone());
        }

        Ok(Self {
            enum_type,
            ignore_case: rule.ignore_case,
            source,
            to_key,
            to_name,
            keys,
        })
    }

    /// A case-sensitive formatter keyed by labels or names
    pub fn new(enum_type: Arc<EnumType>) -> Result<Self, ConfigError> {
        let name = enum_type.name().to_string();
        Self::from_rule(&name, enum_type, &EnumRule::default())
    }

    pub fn key_source(&self) -> &EnumKeySource {
        &self.source
    }

    /// Every accepted display string, in declaration order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl TextFormatter for EnumFormatter {
    fn parse(&self, text: &str) -> Result<FieldValue, TextParseError> {
        let lookup = if self.ignore_case {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        if let Some(name) = self.to_name.get(&lookup) {
            return Ok(FieldValue::Enum(EnumValue::new(self.enum_type.name(), name.clone())));
        }

        let alias = match &self.source {
            EnumKeySource::Accessor(name) => Value::from(name.clone()),
            _ => Value::Null,
        };
        Err(
            TextParseError::new(text, self.enum_type.name(), "not one of the enum's values")
                .with_var("type", self.enum_type.name())
                .with_var("ignoreCase", self.ignore_case)
                .with_var("aliasMethod", alias)
                .with_var("candidates", Value::from(self.keys.clone())),
        )
    }

    fn format(&self, value: &FieldValue) -> Result<String, TextParseError> {
        match value {
            FieldValue::Enum(v) => Ok(self.to_key.get(&v.name).cloned().unwrap_or_else(|| v.name.clone())),
            FieldValue::Null => Ok(String::new()),
            other => Err(TextParseError::new(
                other.to_string(),
                self.enum_type.name(),
                "not an enum value",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role() -> Arc<EnumType> {
        Arc::new(
            EnumType::new("Role", ["Admin", "Editor", "Viewer"])
                .with_accessor("localized", ["管理者", "編集者", "閲覧者"]),
        )
    }

    #[test]
    fn test_names() {
        let f = EnumFormatter::new(role()).unwrap();
        assert_eq!(f.key_source(), &EnumKeySource::Name);
        assert_eq!(f.parse("Editor").unwrap(), FieldValue::Enum(EnumValue::new("Role", "Editor")));
        assert!(f.parse("editor").is_err());
    }

    #[test]
    fn test_ignore_case() {
        let rule = EnumRule {
            ignore_case: true,
            alias_name: None,
        };
        let f = EnumFormatter::from_rule("role", role(), &rule).unwrap();
        assert_eq!(f.parse("VIEWER").unwrap(), FieldValue::Enum(EnumValue::new("Role", "Viewer")));
    }

    #[test]
    fn test_alias_accessor() {
        let rule = EnumRule {
            ignore_case: false,
            alias_name: Some("localized".into()),
        };
        let f = EnumFormatter::from_rule("role", role(), &rule).unwrap();
        assert_eq!(f.parse("編集者").unwrap(), FieldValue::Enum(EnumValue::new("Role", "Editor")));
        assert_eq!(
            f.format(&FieldValue::Enum(EnumValue::new("Role", "Admin"))).unwrap(),
            "管理者"
        );

        let err = f.parse("Editor").unwrap_err();
        let candidates = err.message_vars()["candidates"].as_array().unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(err.message_vars()["aliasMethod"], "localized");
    }

    #[test]
    fn test_unknown_accessor() {
        let rule = EnumRule {
            ignore_case: false,
            alias_name: Some("missing".into()),
        };
        assert!(matches!(
            EnumFormatter::from_rule("role", role(), &rule),
            Err(ConfigError::UnknownAccessor { .. })
        ));
    }

    #[test]
    fn test_format_falls_back_to_name() {
        let f = EnumFormatter::new(role()).unwrap();
        let stray = FieldValue::Enum(EnumValue::new("Role", "Guest"));
        assert_eq!(f.format(&stray).unwrap(), "Guest");
    }
}
