use super::TextFormatter;
use crate::error::TextParseError;
use crate::value::FieldValue;

/// Single character text: the first character of the input
#[derive(Debug, Clone, Copy, Default)]
pub struct CharFormatter;

impl TextFormatter for CharFormatter {
    fn parse(&self, text: &str) -> Result<FieldValue, TextParseError> {
        text.chars()
            .next()
            .map(FieldValue::Char)
            .ok_or_else(|| TextParseError::new(text, "char", "no character"))
    }

    fn format(&self, value: &FieldValue) -> Result<String, TextParseError> {
        match value {
            FieldValue::Char('\0') | FieldValue::Null => Ok(String::new()),
            FieldValue::Char(c) => Ok(c.to_string()),
            other => Err(TextParseError::new(other.to_string(), "char", "not a character value")),
        }
    }
}

/// Text as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFormatter;

impl TextFormatter for StringFormatter {
    fn parse(&self, text: &str) -> Result<FieldValue, TextParseError> {
        Ok(FieldValue::String(text.to_string()))
    }

    fn format(&self, value: &FieldValue) -> Result<String, TextParseError> {
        match value {
            FieldValue::Null => Ok(String::new()),
            FieldValue::String(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_takes_first() {
        assert_eq!(CharFormatter.parse("xyz").unwrap(), FieldValue::Char('x'));
        assert_eq!(CharFormatter.parse("日本").unwrap(), FieldValue::Char('日'));
        assert!(CharFormatter.parse("").is_err());
        assert_eq!(CharFormatter.format(&FieldValue::Char('\0')).unwrap(), "");
    }

    #[test]
    fn test_string_keeps_whitespace() {
        assert_eq!(StringFormatter.parse(" a ").unwrap(), FieldValue::from(" a "));
        assert_eq!(StringFormatter.format(&FieldValue::Int(3)).unwrap(), "3");
    }
}
