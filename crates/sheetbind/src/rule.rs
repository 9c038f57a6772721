//! Per-field conversion rules
//!
//! A [`ConversionRule`] is the resolved configuration of one field for one
//! direction. A [`FieldAdapter`] pairs the field's declared type with a
//! loading rule and a saving rule; the two may differ.

use crate::value::FieldType;

/// Default significant digits kept when reading floating point cells
pub const DEFAULT_PRECISION: u32 = 15;

/// Strings accepted as `true` when no list is configured
pub const DEFAULT_LOAD_FOR_TRUE: [&str; 6] = ["true", "1", "yes", "on", "y", "t"];

/// Strings accepted as `false` when no list is configured
pub const DEFAULT_LOAD_FOR_FALSE: [&str; 6] = ["false", "0", "no", "off", "f", "n"];

/// Boolean text settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanRule {
    /// Accepted `true` strings; empty means the defaults
    pub load_for_true: Vec<String>,
    /// Accepted `false` strings; empty means the defaults
    pub load_for_false: Vec<String>,
    pub save_as_true: String,
    pub save_as_false: String,
    pub ignore_case: bool,
    /// Unrecognized text reads as `false` instead of failing
    pub fail_to_false: bool,
}

impl Default for BooleanRule {
    fn default() -> Self {
        Self {
            load_for_true: Vec::new(),
            load_for_false: Vec::new(),
            save_as_true: "true".into(),
            save_as_false: "false".into(),
            ignore_case: true,
            fail_to_false: false,
        }
    }
}

/// Enum text settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnumRule {
    pub ignore_case: bool,
    /// Named accessor whose values are the cell text
    pub alias_name: Option<String>,
}

/// Delimited collection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayRule {
    pub separator: String,
    pub ignore_empty_item: bool,
    /// Element type; the field's declared element type when unset
    pub item_type: Option<FieldType>,
}

impl Default for ArrayRule {
    fn default() -> Self {
        Self {
            separator: ",".into(),
            ignore_empty_item: false,
            item_type: None,
        }
    }
}

/// Resolved conversion settings of one field in one direction
///
/// Built with `Default` and the chaining setters:
///
/// ```
/// use sheetbind::ConversionRule;
///
/// let rule = ConversionRule::new()
///     .trim(true)
///     .pattern("yyyy/MM/dd")
///     .default_value("2000/01/01");
/// assert_eq!(rule.pattern.as_deref(), Some("yyyy/MM/dd"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRule {
    /// Trim cell text before parsing
    pub trim: bool,
    /// Literal used when the cell (on load) or the value (on save) is absent
    pub default_value: Option<String>,
    pub force_wrap_text: bool,
    pub force_shrink_to_fit: bool,
    /// Text pattern for numbers and dates
    pub pattern: Option<String>,
    /// Native number format written to cells
    pub excel_pattern: Option<String>,
    /// `language[_COUNTRY]`; the configuration's default locale when unset
    pub locale: Option<String>,
    /// `UTC`, `GMT+09:00`, `+0900`...
    pub timezone: Option<String>,
    /// Accept out-of-range date fields by rolling them over
    pub lenient: bool,
    /// Significant digits kept when reading floating point cells
    pub precision: u32,
    pub boolean: BooleanRule,
    pub enumeration: EnumRule,
    pub array: ArrayRule,
}

impl Default for ConversionRule {
    fn default() -> Self {
        Self {
            trim: false,
            default_value: None,
            force_wrap_text: false,
            force_shrink_to_fit: false,
            pattern: None,
            excel_pattern: None,
            locale: None,
            timezone: None,
            lenient: false,
            precision: DEFAULT_PRECISION,
            boolean: BooleanRule::default(),
            enumeration: EnumRule::default(),
            array: ArrayRule::default(),
        }
    }
}

impl ConversionRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn force_wrap_text(mut self, wrap: bool) -> Self {
        self.force_wrap_text = wrap;
        self
    }

    pub fn force_shrink_to_fit(mut self, shrink: bool) -> Self {
        self.force_shrink_to_fit = shrink;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn excel_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.excel_pattern = Some(pattern.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn precision(mut self, digits: u32) -> Self {
        self.precision = digits;
        self
    }

    pub fn boolean(mut self, boolean: BooleanRule) -> Self {
        self.boolean = boolean;
        self
    }

    pub fn enumeration(mut self, enumeration: EnumRule) -> Self {
        self.enumeration = enumeration;
        self
    }

    pub fn array(mut self, array: ArrayRule) -> Self {
        self.array = array;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.array.separator = separator.into();
        self
    }

    pub fn ignore_empty_item(mut self, ignore: bool) -> Self {
        self.array.ignore_empty_item = ignore;
        self
    }

    pub fn item_type(mut self, item_type: FieldType) -> Self {
        self.array.item_type = Some(item_type);
        self
    }
}

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Cell to field
    Load,
    /// Field to cell
    Save,
}

/// A field as the converters see it
#[derive(Debug, Clone)]
pub struct FieldAdapter {
    name: String,
    field_type: FieldType,
    primitive: bool,
    loading: ConversionRule,
    saving: ConversionRule,
    loading_element_type: Option<FieldType>,
    saving_element_type: Option<FieldType>,
}

impl FieldAdapter {
    /// A field with default rules in both directions
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            primitive: false,
            loading: ConversionRule::default(),
            saving: ConversionRule::default(),
            loading_element_type: None,
            saving_element_type: None,
        }
    }

    /// Mark the field as primitive: absent values read as the type's zero
    pub fn primitive(mut self, primitive: bool) -> Self {
        self.primitive = primitive;
        self
    }

    /// Use `rule` for both directions
    pub fn rule(mut self, rule: ConversionRule) -> Self {
        self.saving = rule.clone();
        self.loading = rule;
        self
    }

    pub fn loading_rule(mut self, rule: ConversionRule) -> Self {
        self.loading = rule;
        self
    }

    pub fn saving_rule(mut self, rule: ConversionRule) -> Self {
        self.saving = rule;
        self
    }

    /// Declared element type of a collection field, for both directions
    pub fn element_type(mut self, element: FieldType) -> Self {
        self.saving_element_type = Some(element.clone());
        self.loading_element_type = Some(element);
        self
    }

    pub fn loading_element_type(mut self, element: FieldType) -> Self {
        self.loading_element_type = Some(element);
        self
    }

    pub fn saving_element_type(mut self, element: FieldType) -> Self {
        self.saving_element_type = Some(element);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_primitive(&self) -> bool {
        self.primitive
    }

    pub fn conversion_rule(&self, direction: Direction) -> &ConversionRule {
        match direction {
            Direction::Load => &self.loading,
            Direction::Save => &self.saving,
        }
    }

    /// Declared generic element type for `direction`
    pub fn generic_element_type(&self, direction: Direction) -> Option<&FieldType> {
        match direction {
            Direction::Load => self.loading_element_type.as_ref(),
            Direction::Save => self.saving_element_type.as_ref(),
        }
    }

    /// Element type of a collection field: the rule's item type, else the
    /// declared element type, else an array's component type
    pub fn resolve_element_type(&self, direction: Direction) -> Option<FieldType> {
        self.conversion_rule(direction)
            .array
            .item_type
            .clone()
            .or_else(|| self.generic_element_type(direction).cloned())
            .or_else(|| match &self.field_type {
                FieldType::Array(component) => Some((**component).clone()),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_defaults() {
        let rule = ConversionRule::default();
        assert_eq!(rule.precision, 15);
        assert_eq!(rule.array.separator, ",");
        assert!(rule.boolean.ignore_case);
        assert!(!rule.enumeration.ignore_case);
        assert_eq!(rule.boolean.save_as_true, "true");
    }

    #[test]
    fn test_directions() {
        let field = FieldAdapter::new("when", FieldType::Date)
            .loading_rule(ConversionRule::new().pattern("yyyy/MM/dd"))
            .saving_rule(ConversionRule::new().pattern("yyyy-MM-dd"));
        assert_eq!(field.conversion_rule(Direction::Load).pattern.as_deref(), Some("yyyy/MM/dd"));
        assert_eq!(field.conversion_rule(Direction::Save).pattern.as_deref(), Some("yyyy-MM-dd"));
    }

    #[test]
    fn test_element_type_resolution() {
        let list = FieldAdapter::new("tags", FieldType::List).element_type(FieldType::String);
        assert_eq!(list.resolve_element_type(Direction::Load), Some(FieldType::String));

        let overridden = list.clone().rule(ConversionRule::new().item_type(FieldType::Int));
        assert_eq!(overridden.resolve_element_type(Direction::Save), Some(FieldType::Int));

        let array = FieldAdapter::new("codes", FieldType::array_of(FieldType::Long));
        assert_eq!(array.resolve_element_type(Direction::Load), Some(FieldType::Long));

        let raw = FieldAdapter::new("raw", FieldType::List);
        assert_eq!(raw.resolve_element_type(Direction::Load), None);
    }
}
