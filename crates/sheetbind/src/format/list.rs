use std::sync::Arc;

use super::TextFormatter;
use crate::error::TextParseError;
use crate::value::{FieldType, FieldValue};

/// The collection a [`ListFormatter`] produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Set,
    Array,
}

impl CollectionKind {
    pub fn of(field_type: &FieldType) -> Option<CollectionKind> {
        use crate::value::TypeFamily;
        match field_type.family() {
            TypeFamily::List => Some(CollectionKind::List),
            TypeFamily::Set => Some(CollectionKind::Set),
            TypeFamily::Array => Some(CollectionKind::Array),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            CollectionKind::List => "list",
            CollectionKind::Set => "set",
            CollectionKind::Array => "array",
        }
    }

    fn collect(self, items: Vec<FieldValue>) -> FieldValue {
        match self {
            CollectionKind::List => FieldValue::List(items),
            CollectionKind::Set => FieldValue::set_of(items),
            CollectionKind::Array => FieldValue::Array(items),
        }
    }
}

/// Delimited text such as `a, b, c`
///
/// Blank input is an empty collection. Each token is trimmed when `trim` is
/// set and skipped when empty and `ignore_empty_item` is set; every other
/// token, empty ones included, goes to the element formatter. One failing
/// element fails the whole parse.
#[derive(Debug, Clone)]
pub struct ListFormatter {
    kind: CollectionKind,
    element_type: FieldType,
    element: Arc<dyn TextFormatter>,
    separator: String,
    ignore_empty_item: bool,
    trim: bool,
}

impl ListFormatter {
    /// Comma separated, keeping empty items, untrimmed
    pub fn new(kind: CollectionKind, element_type: FieldType, element: Arc<dyn TextFormatter>) -> Self {
        Self {
            kind,
            element_type,
            element,
            separator: ",".into(),
            ignore_empty_item: false,
            trim: false,
        }
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn ignore_empty_item(mut self, ignore: bool) -> Self {
        self.ignore_empty_item = ignore;
        self
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn element_type(&self) -> &FieldType {
        &self.element_type
    }

    fn error(&self, text: &str, reason: impl Into<String>) -> TextParseError {
        TextParseError::new(text, format!("{}<{}>", self.kind.name(), self.element_type), reason)
            .with_var("separator", self.separator.clone())
            .with_var("ignoreEmptyItem", self.ignore_empty_item)
            .with_var("trim", self.trim)
            .with_var("itemType", self.element_type.type_name())
    }
}

impl TextFormatter for ListFormatter {
    fn parse(&self, text: &str) -> Result<FieldValue, TextParseError> {
        if text.trim().is_empty() {
            return Ok(self.kind.collect(Vec::new()));
        }

        let mut items = Vec::new();
        for (index, token) in text.split(self.separator.as_str()).enumerate() {
            let token = if self.trim { token.trim() } else { token };
            if token.is_empty() && self.ignore_empty_item {
                continue;
            }
            let item = self.element.parse(token).map_err(|e| {
                self.error(text, format!("item {}: {}", index, e.reason()))
                    .with_vars(e.message_vars())
            })?;
            items.push(item);
        }
        Ok(self.kind.collect(items))
    }

    fn format(&self, value: &FieldValue) -> Result<String, TextParseError> {
        if value.is_null() {
            return Ok(String::new());
        }
        let items = value
            .items()
            .ok_or_else(|| self.error(&value.to_string(), "not a collection value"))?;

        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let text = self.element.format(item)?;
            let text = if self.trim { text.trim().to_string() } else { text };
            if text.is_empty() && self.ignore_empty_item {
                continue;
            }
            parts.push(text);
        }
        Ok(parts.join(&self.separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{NumberFormatter, NumberKind, StringFormatter};
    use pretty_assertions::assert_eq;

    fn strings() -> ListFormatter {
        ListFormatter::new(CollectionKind::List, FieldType::String, Arc::new(StringFormatter))
    }

    fn ints() -> ListFormatter {
        ListFormatter::new(
            CollectionKind::List,
            FieldType::Int,
            Arc::new(NumberFormatter::new(NumberKind::Int)),
        )
    }

    fn list(items: &[&str]) -> FieldValue {
        FieldValue::List(items.iter().map(|s| FieldValue::from(*s)).collect())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strings().parse("").unwrap(), FieldValue::List(vec![]));
        assert_eq!(strings().parse("   ").unwrap(), FieldValue::List(vec![]));
        assert_eq!(strings().format(&FieldValue::List(vec![])).unwrap(), "");
        assert_eq!(strings().format(&FieldValue::Null).unwrap(), "");
    }

    #[test]
    fn test_ignore_empty_item() {
        assert_eq!(strings().parse("a,,b").unwrap(), list(&["a", "", "b"]));
        assert_eq!(
            strings().ignore_empty_item(true).parse("a,,b").unwrap(),
            list(&["a", "b"])
        );
    }

    #[test]
    fn test_empty_token_rejected_by_numbers() {
        let err = ints().parse("1,,3").unwrap_err();
        assert_eq!(err.message_vars()["itemType"], "int");
        assert_eq!(err.message_vars()["separator"], ",");
        assert_eq!(err.message_vars()["ignoreEmptyItem"], false);

        assert_eq!(
            ints().ignore_empty_item(true).parse("1,,3").unwrap(),
            FieldValue::List(vec![FieldValue::Int(1), FieldValue::Int(3)])
        );
    }

    #[test]
    fn test_trim_and_separator() {
        let f = strings().separator("; ").trim(true);
        assert_eq!(f.parse(" a ;  b").unwrap(), list(&["a", "b"]));
        assert_eq!(f.format(&list(&[" a", "b "])).unwrap(), "a; b");
    }

    #[test]
    fn test_no_partial_lists() {
        assert!(ints().parse("1,two,3").is_err());
    }

    #[test]
    fn test_set_dedupes() {
        let f = ListFormatter::new(CollectionKind::Set, FieldType::String, Arc::new(StringFormatter));
        assert_eq!(
            f.parse("b,a,b").unwrap(),
            FieldValue::Set(vec![FieldValue::from("b"), FieldValue::from("a")])
        );
    }
}
