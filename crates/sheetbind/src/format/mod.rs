//! Text formatters
//!
//! A formatter is a pure pair of functions between text and a typed value,
//! configured once and free of any spreadsheet concept. Converters use them
//! for cell text; [`ListFormatter`] uses them for its elements.

mod boolean;
mod datetime;
mod enums;
mod link;
mod list;
mod number;
mod text;

use std::fmt::Debug;
use std::sync::Arc;

use ahash::AHashMap;
use chrono::FixedOffset;

pub use boolean::BooleanFormatter;
pub use datetime::{parse_zone, to_excel_pattern, DateKind, DateTimeFormatter};
pub use enums::{EnumFormatter, EnumKeySource};
pub use link::CellLinkFormatter;
pub use list::{CollectionKind, ListFormatter};
pub use number::{DecimalPattern, NumberFormatter, NumberKind};
pub use text::{CharFormatter, StringFormatter};

use crate::error::{ConfigError, TextParseError};
use crate::locale::Locale;
use crate::rule::ConversionRule;
use crate::value::{FieldType, FieldValue};

/// Conversion between text and one value type
pub trait TextFormatter: Send + Sync + Debug {
    /// Parse text into a value
    fn parse(&self, text: &str) -> Result<FieldValue, TextParseError>;

    /// Format a value as text; `Null` formats as `""`
    fn format(&self, value: &FieldValue) -> Result<String, TextParseError>;
}

/// The locale named by a rule, or `default` when the rule names none
pub fn rule_locale(field: &str, rule: &ConversionRule, default: &Locale) -> Result<Locale, ConfigError> {
    match &rule.locale {
        Some(name) if !name.is_empty() => Locale::parse(name)
            .ok_or_else(|| ConfigError::invalid(field, "locale", format!("'{}' is not a locale", name))),
        _ => Ok(default.clone()),
    }
}

/// The time zone named by a rule; UTC when the rule names none
pub fn rule_zone(field: &str, rule: &ConversionRule) -> Result<FixedOffset, ConfigError> {
    match &rule.timezone {
        Some(name) if !name.is_empty() => parse_zone(name)
            .ok_or_else(|| ConfigError::invalid(field, "timezone", format!("'{}' is not a time zone", name))),
        _ => parse_zone("UTC").ok_or_else(|| ConfigError::invalid(field, "timezone", "UTC unavailable")),
    }
}

/// Formatters by field type
///
/// Holds one default formatter per scalar type and builds rule-aware ones on
/// request. Registrations made with [`FormatterResolver::with_formatter`]
/// take precedence over both.
#[derive(Debug, Clone)]
pub struct FormatterResolver {
    defaults: AHashMap<FieldType, Arc<dyn TextFormatter>>,
    overrides: AHashMap<FieldType, Arc<dyn TextFormatter>>,
}

impl Default for FormatterResolver {
    fn default() -> Self {
        let mut defaults: AHashMap<FieldType, Arc<dyn TextFormatter>> = AHashMap::new();
        defaults.insert(FieldType::Bool, Arc::new(BooleanFormatter::default()));
        for kind in NumberKind::ALL {
            defaults.insert(kind.field_type(), Arc::new(NumberFormatter::new(kind)));
        }
        for kind in DateKind::ALL {
            defaults.insert(kind.field_type(), Arc::new(DateTimeFormatter::with_defaults(kind)));
        }
        defaults.insert(FieldType::Char, Arc::new(CharFormatter));
        defaults.insert(FieldType::String, Arc::new(StringFormatter));
        defaults.insert(FieldType::Link, Arc::new(CellLinkFormatter::new()));

        Self {
            defaults,
            overrides: AHashMap::new(),
        }
    }
}

impl FormatterResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `formatter` for every field of type `field_type`
    pub fn with_formatter(mut self, field_type: FieldType, formatter: Arc<dyn TextFormatter>) -> Self {
        self.overrides.insert(field_type, formatter);
        self
    }

    /// The default formatter of a type
    ///
    /// Enum types get a name-keyed formatter built on the fly.
    pub fn resolve(&self, field_type: &FieldType) -> Option<Arc<dyn TextFormatter>> {
        if let Some(f) = self.overrides.get(field_type).or_else(|| self.defaults.get(field_type)) {
            return Some(f.clone());
        }
        match field_type {
            FieldType::Enum(ty) => EnumFormatter::new(ty.clone())
                .ok()
                .map(|f| Arc::new(f) as Arc<dyn TextFormatter>),
            _ => None,
        }
    }

    /// A formatter for `field_type` configured by a field's rule
    ///
    /// Returns `Ok(None)` for types without a text form (collections, user
    /// types).
    pub fn create(
        &self,
        field: &str,
        field_type: &FieldType,
        rule: &ConversionRule,
        default_locale: &Locale,
    ) -> Result<Option<Arc<dyn TextFormatter>>, ConfigError> {
        if let Some(f) = self.overrides.get(field_type) {
            return Ok(Some(f.clone()));
        }

        let formatter: Arc<dyn TextFormatter> = match field_type {
            FieldType::Bool => Arc::new(BooleanFormatter::from_rule(field, &rule.boolean)?),
            FieldType::Char => Arc::new(CharFormatter),
            FieldType::String => Arc::new(StringFormatter),
            FieldType::Link => Arc::new(CellLinkFormatter::new()),
            FieldType::Enum(ty) => Arc::new(EnumFormatter::from_rule(field, ty.clone(), &rule.enumeration)?),
            other => {
                if let Some(kind) = NumberKind::of(other) {
                    Arc::new(number_formatter(field, kind, rule, default_locale)?)
                } else if let Some(kind) = DateKind::of(other) {
                    Arc::new(date_formatter(field, kind, rule, default_locale)?)
                } else {
                    return Ok(None);
                }
            }
        };
        Ok(Some(formatter))
    }
}

/// Number text per the rule's pattern and locale
pub(crate) fn number_formatter(
    field: &str,
    kind: NumberKind,
    rule: &ConversionRule,
    default_locale: &Locale,
) -> Result<NumberFormatter, ConfigError> {
    match rule.pattern.as_deref() {
        None => Ok(NumberFormatter::new(kind)),
        Some("") => Err(ConfigError::invalid(field, "pattern", "must not be empty")),
        Some(pattern) => {
            let locale = rule_locale(field, rule, default_locale)?;
            NumberFormatter::with_pattern(kind, pattern, locale)
                .map_err(|msg| ConfigError::invalid(field, "pattern", msg))
        }
    }
}

/// Date text per the rule's pattern, locale, zone and leniency
pub(crate) fn date_formatter(
    field: &str,
    kind: DateKind,
    rule: &ConversionRule,
    default_locale: &Locale,
) -> Result<DateTimeFormatter, ConfigError> {
    let pattern = rule.pattern.as_deref().unwrap_or(kind.default_pattern());
    let locale = rule_locale(field, rule, default_locale)?;
    let zone = rule_zone(field, rule)?;
    DateTimeFormatter::new(kind, pattern, locale, zone, rule.lenient)
        .map_err(|msg| ConfigError::invalid(field, "pattern", msg))
}
