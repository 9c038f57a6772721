use serde_json::Value;

use super::TextFormatter;
use crate::error::{ConfigError, TextParseError};
use crate::rule::{BooleanRule, DEFAULT_LOAD_FOR_FALSE, DEFAULT_LOAD_FOR_TRUE};
use crate::value::FieldValue;

/// Boolean text: membership in a `true` set, then a `false` set
#[derive(Debug, Clone)]
pub struct BooleanFormatter {
    load_for_true: Vec<String>,
    load_for_false: Vec<String>,
    save_as_true: String,
    save_as_false: String,
    ignore_case: bool,
    fail_to_false: bool,
}

impl Default for BooleanFormatter {
    fn default() -> Self {
        Self {
            load_for_true: DEFAULT_LOAD_FOR_TRUE.iter().map(|s| s.to_string()).collect(),
            load_for_false: DEFAULT_LOAD_FOR_FALSE.iter().map(|s| s.to_string()).collect(),
            save_as_true: "true".into(),
            save_as_false: "false".into(),
            ignore_case: true,
            fail_to_false: false,
        }
    }
}

impl BooleanFormatter {
    pub fn from_rule(field: &str, rule: &BooleanRule) -> Result<Self, ConfigError> {
        if rule.save_as_true.is_empty() {
            return Err(ConfigError::invalid(field, "saveAsTrue", "must not be empty"));
        }
        if rule.save_as_false.is_empty() {
            return Err(ConfigError::invalid(field, "saveAsFalse", "must not be empty"));
        }

        let defaults = Self::default();
        Ok(Self {
            load_for_true: if rule.load_for_true.is_empty() {
                defaults.load_for_true
            } else {
                rule.load_for_true.clone()
            },
            load_for_false: if rule.load_for_false.is_empty() {
                defaults.load_for_false
            } else {
                rule.load_for_false.clone()
            },
            save_as_true: rule.save_as_true.clone(),
            save_as_false: rule.save_as_false.clone(),
            ignore_case: rule.ignore_case,
            fail_to_false: rule.fail_to_false,
        })
    }

    /// True when the save literals are the plain `true`/`false`
    pub fn saves_as_default(&self) -> bool {
        self.save_as_true == "true" && self.save_as_false == "false"
    }

    fn matches(&self, candidates: &[String], text: &str) -> bool {
        if self.ignore_case {
            let lower = text.to_lowercase();
            candidates.iter().any(|c| c.to_lowercase() == lower)
        } else {
            candidates.iter().any(|c| c == text)
        }
    }
}

impl TextFormatter for BooleanFormatter {
    fn parse(&self, text: &str) -> Result<FieldValue, TextParseError> {
        if self.matches(&self.load_for_true, text) {
            return Ok(FieldValue::Bool(true));
        }
        if self.matches(&self.load_for_false, text) {
            return Ok(FieldValue::Bool(false));
        }
        if self.fail_to_false {
            return Ok(FieldValue::Bool(false));
        }

        Err(TextParseError::new(text, "boolean", "not a recognized boolean")
            .with_var("loadForTrue", Value::from(self.load_for_true.clone()))
            .with_var("loadForFalse", Value::from(self.load_for_false.clone()))
            .with_var("ignoreCase", self.ignore_case)
            .with_var("failToFalse", self.fail_to_false))
    }

    fn format(&self, value: &FieldValue) -> Result<String, TextParseError> {
        match value {
            FieldValue::Bool(true) => Ok(self.save_as_true.clone()),
            FieldValue::Bool(false) => Ok(self.save_as_false.clone()),
            FieldValue::Null => Ok(String::new()),
            other => Err(TextParseError::new(other.to_string(), "boolean", "not a boolean value")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sets_ignore_case() {
        let f = BooleanFormatter::default();
        for text in ["YES", "yes", "Y", "true", "1", "On"] {
            assert_eq!(f.parse(text).unwrap(), FieldValue::Bool(true), "{}", text);
        }
        for text in ["no", "OFF", "0", "F"] {
            assert_eq!(f.parse(text).unwrap(), FieldValue::Bool(false), "{}", text);
        }
    }

    #[test]
    fn test_unrecognized() {
        let err = BooleanFormatter::default().parse("maybe").unwrap_err();
        assert_eq!(err.message_vars()["failToFalse"], false);
        assert_eq!(err.message_vars()["loadForTrue"][0], "true");

        let lenient = BooleanFormatter::from_rule(
            "flag",
            &BooleanRule {
                fail_to_false: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(lenient.parse("maybe").unwrap(), FieldValue::Bool(false));
    }

    #[test]
    fn test_case_sensitive_custom_sets() {
        let f = BooleanFormatter::from_rule(
            "flag",
            &BooleanRule {
                load_for_true: vec!["○".into(), "Yes".into()],
                load_for_false: vec!["×".into()],
                save_as_true: "○".into(),
                save_as_false: "×".into(),
                ignore_case: false,
                fail_to_false: false,
            },
        )
        .unwrap();
        assert_eq!(f.parse("○").unwrap(), FieldValue::Bool(true));
        assert!(f.parse("yes").is_err());
        assert!(f.parse("true").is_err());
        assert_eq!(f.format(&FieldValue::Bool(false)).unwrap(), "×");
        assert!(!f.saves_as_default());
    }

    #[test]
    fn test_empty_save_literal_rejected() {
        let rule = BooleanRule {
            save_as_true: String::new(),
            ..Default::default()
        };
        assert!(BooleanFormatter::from_rule("flag", &rule).is_err());
    }
}
