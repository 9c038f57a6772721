//! Field values and field types
//!
//! [`FieldValue`] is the record-side representation of one field; [`FieldType`]
//! names the type a field is declared with, which selects its converter.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// A typed field value
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    /// Absent value
    #[default]
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    BigInteger(i128),
    Char(char),
    String(String),
    /// Date with time of day
    DateTime(NaiveDateTime),
    /// Date only
    Date(NaiveDate),
    /// Time of day only
    Time(NaiveTime),
    /// Date-time with millisecond precision
    Timestamp(NaiveDateTime),
    /// Date-time with a UTC offset
    Calendar(DateTime<FixedOffset>),
    Enum(EnumValue),
    List(Vec<FieldValue>),
    /// Insertion ordered, without duplicates
    Set(Vec<FieldValue>),
    Array(Vec<FieldValue>),
    Link(CellLink),
}

impl FieldValue {
    /// True for [`FieldValue::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Short name of the variant, used in messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Byte(_) => "byte",
            FieldValue::Short(_) => "short",
            FieldValue::Int(_) => "int",
            FieldValue::Long(_) => "long",
            FieldValue::Float(_) => "float",
            FieldValue::Double(_) => "double",
            FieldValue::Decimal(_) => "decimal",
            FieldValue::BigInteger(_) => "biginteger",
            FieldValue::Char(_) => "char",
            FieldValue::String(_) => "string",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Date(_) => "date",
            FieldValue::Time(_) => "time",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Calendar(_) => "calendar",
            FieldValue::Enum(_) => "enum",
            FieldValue::List(_) => "list",
            FieldValue::Set(_) => "set",
            FieldValue::Array(_) => "array",
            FieldValue::Link(_) => "link",
        }
    }

    /// Elements of a list, set or array
    pub fn items(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(v) | FieldValue::Set(v) | FieldValue::Array(v) => Some(v),
            _ => None,
        }
    }

    /// The string content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Build a set, dropping later duplicates
    pub fn set_of(items: impl IntoIterator<Item = FieldValue>) -> FieldValue {
        let mut out: Vec<FieldValue> = Vec::new();
        for item in items {
            if !out.contains(&item) {
                out.push(item);
            }
        }
        FieldValue::Set(out)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Byte(v) => write!(f, "{}", v),
            FieldValue::Short(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Long(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Double(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
            FieldValue::BigInteger(v) => write!(f, "{}", v),
            FieldValue::Char(v) => write!(f, "{}", v),
            FieldValue::String(v) => f.write_str(v),
            FieldValue::DateTime(v) | FieldValue::Timestamp(v) => write!(f, "{}", v),
            FieldValue::Date(v) => write!(f, "{}", v),
            FieldValue::Time(v) => write!(f, "{}", v),
            FieldValue::Calendar(v) => write!(f, "{}", v),
            FieldValue::Enum(v) => f.write_str(&v.name),
            FieldValue::List(items) | FieldValue::Set(items) | FieldValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            FieldValue::Link(link) => write!(f, "{}", link),
        }
    }
}

macro_rules! field_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(v: $ty) -> Self {
                    FieldValue::$variant(v)
                }
            }

            impl TryFrom<FieldValue> for $ty {
                type Error = FieldValue;

                fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
                    match value {
                        FieldValue::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

field_value_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Decimal => Decimal,
    i128 => BigInteger,
    char => Char,
    String => String,
    NaiveDate => Date,
    NaiveTime => Time,
    DateTime<FixedOffset> => Calendar,
    EnumValue => Enum,
    CellLink => Link,
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(v: NaiveDateTime) -> Self {
        FieldValue::DateTime(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A constant of an enum type, identified by its name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    /// Name of the enum type
    pub type_name: String,
    /// Constant name
    pub name: String,
}

impl EnumValue {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    /// The value for a Rust enum constant
    pub fn of<E: SheetEnum>(constant: &E) -> Self {
        Self::new(E::TYPE_NAME, constant.name())
    }

    /// Back to the Rust enum constant, when the type and name match
    pub fn to_constant<E: SheetEnum>(&self) -> Option<E> {
        if self.type_name != E::TYPE_NAME {
            return None;
        }
        E::constants().iter().copied().find(|c| c.name() == self.name)
    }
}

/// A hyperlink target paired with its display label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellLink {
    /// Link target (URL, mail address, `Sheet!A1`, file path)
    pub link: Option<String>,
    /// Text shown in the cell
    pub label: Option<String>,
}

impl CellLink {
    pub fn new(link: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            label: Some(label.into()),
        }
    }

    /// A link that only carries a label
    pub fn label_only(label: impl Into<String>) -> Self {
        Self {
            link: None,
            label: Some(label.into()),
        }
    }
}

impl fmt::Display for CellLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.label, &self.link) {
            (Some(label), Some(link)) => write!(f, "{} <{}>", label, link),
            (Some(label), None) => f.write_str(label),
            (None, Some(link)) => write!(f, "<{}>", link),
            (None, None) => Ok(()),
        }
    }
}

/// A Rust enum that can be bound to cells
///
/// ```
/// use sheetbind::{EnumValue, SheetEnum};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Color { Red, Blue }
///
/// impl SheetEnum for Color {
///     const TYPE_NAME: &'static str = "Color";
///     fn constants() -> &'static [Self] { &[Color::Red, Color::Blue] }
///     fn name(&self) -> &'static str {
///         match self { Color::Red => "Red", Color::Blue => "Blue" }
///     }
/// }
///
/// let value = EnumValue::of(&Color::Blue);
/// assert_eq!(value.to_constant::<Color>(), Some(Color::Blue));
/// ```
pub trait SheetEnum: Copy + 'static {
    const TYPE_NAME: &'static str;

    /// Every constant, in declaration order
    fn constants() -> &'static [Self];

    /// Constant name
    fn name(&self) -> &'static str;
}

/// Enums whose cell text is a display label rather than the constant name
pub trait HasDisplayLabel {
    fn label(&self) -> &str;
}

/// Runtime description of an enum type
///
/// Cell text maps to constants by one of three key sources: a named
/// accessor table registered with [`EnumType::with_accessor`] (selected per
/// field by alias name), the display labels of a [`HasDisplayLabel`] type,
/// or the constant names.
#[derive(Debug, Clone)]
pub struct EnumType {
    name: String,
    constants: Vec<String>,
    labels: Option<Vec<String>>,
    accessors: HashMap<String, Vec<String>>,
}

impl EnumType {
    /// An enum keyed by constant names
    pub fn new<S: Into<String>>(name: impl Into<String>, constants: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            constants: constants.into_iter().map(Into::into).collect(),
            labels: None,
            accessors: HashMap::new(),
        }
    }

    /// Describe a Rust enum keyed by constant names
    pub fn of<E: SheetEnum>() -> Self {
        Self::new(E::TYPE_NAME, E::constants().iter().map(|c| c.name()))
    }

    /// Describe a Rust enum keyed by its display labels
    pub fn labeled<E: SheetEnum + HasDisplayLabel>() -> Self {
        let mut ty = Self::of::<E>();
        ty.labels = Some(E::constants().iter().map(|c| c.label().to_string()).collect());
        ty
    }

    /// Register a named accessor: one key per constant, in declaration order
    ///
    /// Fields choose it through the `alias_name` rule attribute. This is the
    /// path for enums that cannot implement [`HasDisplayLabel`].
    pub fn with_accessor<S: Into<String>>(
        mut self,
        accessor: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.accessors
            .insert(accessor.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Register a named accessor computed from a Rust enum
    pub fn with_accessor_fn<E: SheetEnum>(self, accessor: impl Into<String>, f: fn(&E) -> String) -> Self {
        self.with_accessor(accessor, E::constants().iter().map(f))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constants(&self) -> &[String] {
        &self.constants
    }

    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Keys of a named accessor, if registered
    pub fn accessor(&self, name: &str) -> Option<&[String]> {
        self.accessors.get(name).map(Vec::as_slice)
    }

    /// The value for the constant `name`, if it exists
    pub fn value(&self, name: &str) -> Option<EnumValue> {
        self.constants
            .iter()
            .any(|c| c == name)
            .then(|| EnumValue::new(&self.name, name))
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EnumType {}

impl Hash for EnumType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// The family a type belongs to for converter fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFamily {
    Plain,
    Enum,
    List,
    Set,
    Array,
}

/// The declared type of a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    BigInteger,
    Char,
    String,
    DateTime,
    Date,
    Time,
    Timestamp,
    Calendar,
    Enum(Arc<EnumType>),
    List,
    Set,
    /// Array with its component type
    Array(Box<FieldType>),
    Link,
    /// A user type, assignable to `family`
    Named { name: String, family: TypeFamily },
}

impl FieldType {
    /// Enum field type for a Rust enum keyed by constant names
    pub fn enumeration(ty: EnumType) -> Self {
        FieldType::Enum(Arc::new(ty))
    }

    pub fn array_of(component: FieldType) -> Self {
        FieldType::Array(Box::new(component))
    }

    pub fn named(name: impl Into<String>, family: TypeFamily) -> Self {
        FieldType::Named {
            name: name.into(),
            family,
        }
    }

    pub fn family(&self) -> TypeFamily {
        match self {
            FieldType::Enum(_) => TypeFamily::Enum,
            FieldType::List => TypeFamily::List,
            FieldType::Set => TypeFamily::Set,
            FieldType::Array(_) => TypeFamily::Array,
            FieldType::Named { family, .. } => *family,
            _ => TypeFamily::Plain,
        }
    }

    /// Name used in messages and message codes
    pub fn type_name(&self) -> String {
        match self {
            FieldType::Bool => "boolean".into(),
            FieldType::Byte => "byte".into(),
            FieldType::Short => "short".into(),
            FieldType::Int => "int".into(),
            FieldType::Long => "long".into(),
            FieldType::Float => "float".into(),
            FieldType::Double => "double".into(),
            FieldType::Decimal => "decimal".into(),
            FieldType::BigInteger => "biginteger".into(),
            FieldType::Char => "char".into(),
            FieldType::String => "string".into(),
            FieldType::DateTime => "datetime".into(),
            FieldType::Date => "date".into(),
            FieldType::Time => "time".into(),
            FieldType::Timestamp => "timestamp".into(),
            FieldType::Calendar => "calendar".into(),
            FieldType::Enum(ty) => ty.name().to_string(),
            FieldType::List => "list".into(),
            FieldType::Set => "set".into(),
            FieldType::Array(component) => format!("{}[]", component.type_name()),
            FieldType::Link => "link".into(),
            FieldType::Named { name, .. } => name.clone(),
        }
    }

    /// The value a primitive field of this type holds when nothing was read
    pub fn zero_value(&self) -> Option<FieldValue> {
        Some(match self {
            FieldType::Bool => FieldValue::Bool(false),
            FieldType::Byte => FieldValue::Byte(0),
            FieldType::Short => FieldValue::Short(0),
            FieldType::Int => FieldValue::Int(0),
            FieldType::Long => FieldValue::Long(0),
            FieldType::Float => FieldValue::Float(0.0),
            FieldType::Double => FieldValue::Double(0.0),
            FieldType::Char => FieldValue::Char('\0'),
            _ => return None,
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Size {
        Small,
        Large,
    }

    impl SheetEnum for Size {
        const TYPE_NAME: &'static str = "Size";

        fn constants() -> &'static [Self] {
            &[Size::Small, Size::Large]
        }

        fn name(&self) -> &'static str {
            match self {
                Size::Small => "Small",
                Size::Large => "Large",
            }
        }
    }

    impl HasDisplayLabel for Size {
        fn label(&self) -> &str {
            match self {
                Size::Small => "S",
                Size::Large => "L",
            }
        }
    }

    #[test]
    fn test_enum_type_sources() {
        let ty = EnumType::labeled::<Size>().with_accessor_fn::<Size>("code", |s| {
            format!("{:?}", s).to_uppercase()
        });
        assert_eq!(ty.constants(), ["Small", "Large"]);
        assert_eq!(ty.labels(), Some(&["S".to_string(), "L".to_string()][..]));
        assert_eq!(ty.accessor("code"), Some(&["SMALL".to_string(), "LARGE".to_string()][..]));
        assert_eq!(ty.accessor("missing"), None);
        assert_eq!(ty.value("Large"), Some(EnumValue::new("Size", "Large")));
        assert_eq!(ty.value("Medium"), None);
    }

    #[test]
    fn test_enum_value_roundtrip() {
        let v = EnumValue::of(&Size::Large);
        assert_eq!(v.to_constant::<Size>(), Some(Size::Large));
        assert_eq!(EnumValue::new("Other", "Large").to_constant::<Size>(), None);
    }

    #[test]
    fn test_families() {
        assert_eq!(FieldType::Int.family(), TypeFamily::Plain);
        assert_eq!(FieldType::enumeration(EnumType::of::<Size>()).family(), TypeFamily::Enum);
        assert_eq!(FieldType::array_of(FieldType::Int).family(), TypeFamily::Array);
        assert_eq!(FieldType::named("LinkedList", TypeFamily::List).family(), TypeFamily::List);
        assert_eq!(FieldType::array_of(FieldType::Int).type_name(), "int[]");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(FieldValue::from(5i32), FieldValue::Int(5));
        assert_eq!(i32::try_from(FieldValue::Int(5)), Ok(5));
        assert!(i32::try_from(FieldValue::Long(5)).is_err());
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        assert_eq!(
            FieldValue::set_of(vec!["a".into(), "b".into(), "a".into()]),
            FieldValue::Set(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::List(vec![1i32.into(), 2i32.into()]).to_string(), "[1, 2]");
        assert_eq!(CellLink::new("http://x", "X").to_string(), "X <http://x>");
    }
}
