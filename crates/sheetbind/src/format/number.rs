use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

use super::TextFormatter;
use crate::error::TextParseError;
use crate::locale::Locale;
use crate::value::{FieldType, FieldValue};

/// The numeric field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    BigInteger,
}

impl NumberKind {
    pub const ALL: [NumberKind; 8] = [
        NumberKind::Byte,
        NumberKind::Short,
        NumberKind::Int,
        NumberKind::Long,
        NumberKind::Float,
        NumberKind::Double,
        NumberKind::Decimal,
        NumberKind::BigInteger,
    ];

    pub fn of(field_type: &FieldType) -> Option<NumberKind> {
        Some(match field_type {
            FieldType::Byte => NumberKind::Byte,
            FieldType::Short => NumberKind::Short,
            FieldType::Int => NumberKind::Int,
            FieldType::Long => NumberKind::Long,
            FieldType::Float => NumberKind::Float,
            FieldType::Double => NumberKind::Double,
            FieldType::Decimal => NumberKind::Decimal,
            FieldType::BigInteger => NumberKind::BigInteger,
            _ => return None,
        })
    }

    pub fn field_type(self) -> FieldType {
        match self {
            NumberKind::Byte => FieldType::Byte,
            NumberKind::Short => FieldType::Short,
            NumberKind::Int => FieldType::Int,
            NumberKind::Long => FieldType::Long,
            NumberKind::Float => FieldType::Float,
            NumberKind::Double => FieldType::Double,
            NumberKind::Decimal => FieldType::Decimal,
            NumberKind::BigInteger => FieldType::BigInteger,
        }
    }

    fn name(self) -> &'static str {
        match self {
            NumberKind::Byte => "byte",
            NumberKind::Short => "short",
            NumberKind::Int => "int",
            NumberKind::Long => "long",
            NumberKind::Float => "float",
            NumberKind::Double => "double",
            NumberKind::Decimal => "decimal",
            NumberKind::BigInteger => "biginteger",
        }
    }

    /// Representable range as doubles; `None` for unbounded doubles
    pub fn bounds(self) -> Option<(f64, f64)> {
        Some(match self {
            NumberKind::Byte => (i8::MIN as f64, i8::MAX as f64),
            NumberKind::Short => (i16::MIN as f64, i16::MAX as f64),
            NumberKind::Int => (i32::MIN as f64, i32::MAX as f64),
            NumberKind::Long => (i64::MIN as f64, i64::MAX as f64),
            NumberKind::Float => (-(f32::MAX as f64), f32::MAX as f64),
            NumberKind::Decimal => (
                Decimal::MIN.to_f64().unwrap_or(f64::MIN),
                Decimal::MAX.to_f64().unwrap_or(f64::MAX),
            ),
            NumberKind::BigInteger => (i128::MIN as f64, i128::MAX as f64),
            NumberKind::Double => return None,
        })
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            NumberKind::Byte | NumberKind::Short | NumberKind::Int | NumberKind::Long | NumberKind::BigInteger
        )
    }

    fn check_range(self, n: f64) -> Result<(), String> {
        if !n.is_finite() {
            return Err("not a finite number".into());
        }
        match self.bounds() {
            Some((min, max)) if n < min || n > max => Err(format!("out of range [{}, {}]", min, max)),
            _ => Ok(()),
        }
    }

    /// Narrow a double; integer targets round half away from zero
    pub fn from_f64(self, n: f64) -> Result<FieldValue, String> {
        self.check_range(n)?;
        let rounded = n.round();
        Ok(match self {
            NumberKind::Byte => FieldValue::Byte(rounded as i8),
            NumberKind::Short => FieldValue::Short(rounded as i16),
            NumberKind::Int => FieldValue::Int(rounded as i32),
            NumberKind::Long => FieldValue::Long(rounded as i64),
            NumberKind::BigInteger => FieldValue::BigInteger(rounded as i128),
            NumberKind::Float => FieldValue::Float(n as f32),
            NumberKind::Double => FieldValue::Double(n),
            NumberKind::Decimal => {
                FieldValue::Decimal(Decimal::from_f64(n).ok_or_else(|| "out of decimal range".to_string())?)
            }
        })
    }

    /// Narrow an exact decimal; integer targets round half away from zero
    pub fn from_decimal(self, d: Decimal) -> Result<FieldValue, String> {
        match self {
            NumberKind::Float | NumberKind::Double => {
                return self.from_f64(d.to_f64().ok_or_else(|| "not representable".to_string())?)
            }
            NumberKind::Decimal => return Ok(FieldValue::Decimal(d)),
            _ => {}
        }

        self.check_range(d.to_f64().unwrap_or(f64::NAN))?;
        let rounded = d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let out_of_range = || format!("out of range for {}", self.name());
        Ok(match self {
            NumberKind::Byte => FieldValue::Byte(rounded.to_i8().ok_or_else(out_of_range)?),
            NumberKind::Short => FieldValue::Short(rounded.to_i16().ok_or_else(out_of_range)?),
            NumberKind::Int => FieldValue::Int(rounded.to_i32().ok_or_else(out_of_range)?),
            NumberKind::Long => FieldValue::Long(rounded.to_i64().ok_or_else(out_of_range)?),
            _ => FieldValue::BigInteger(rounded.to_i128().ok_or_else(out_of_range)?),
        })
    }

    /// Parse plain `[-]digits[.digits][e[-]digits]` text
    fn parse_plain(self, s: &str, divisor: u32) -> Result<FieldValue, String> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
            return Err("not a number".into());
        }

        match self {
            NumberKind::Float | NumberKind::Double => {
                let n: f64 = s.parse().map_err(|_| "not a number".to_string())?;
                self.from_f64(n / divisor as f64)
            }
            NumberKind::BigInteger if divisor == 1 && i128::from_str(s).is_ok() => {
                Ok(FieldValue::BigInteger(i128::from_str(s).map_err(|e| e.to_string())?))
            }
            _ => {
                let d = Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .map_err(|_| match s.parse::<f64>() {
                        Ok(n) if n.is_finite() => match self.check_range(n) {
                            Err(range) => range,
                            Ok(()) => "not a number".to_string(),
                        },
                        _ => "not a number".to_string(),
                    })?;
                let d = if divisor == 1 { d } else { d / Decimal::from(divisor) };
                self.from_decimal(d)
            }
        }
    }
}

/// Numeric value as a decimal, for pattern formatting
fn to_decimal(value: &FieldValue) -> Option<Decimal> {
    match value {
        FieldValue::Byte(v) => Some(Decimal::from(*v)),
        FieldValue::Short(v) => Some(Decimal::from(*v)),
        FieldValue::Int(v) => Some(Decimal::from(*v)),
        FieldValue::Long(v) => Some(Decimal::from(*v)),
        FieldValue::BigInteger(v) => Decimal::from_i128(*v),
        FieldValue::Float(v) => Decimal::from_f32(*v),
        FieldValue::Double(v) => Decimal::from_f64(*v),
        FieldValue::Decimal(v) => Some(*v),
        _ => None,
    }
}

/// A `DecimalFormat`-style pattern: `prefix #,##0.00 suffix`
///
/// Only the positive sub-pattern is used; negatives get a leading `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalPattern {
    prefix: String,
    suffix: String,
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    grouping: Option<usize>,
    multiplier: u32,
}

impl DecimalPattern {
    pub fn parse(pattern: &str) -> Result<Self, String> {
        #[derive(PartialEq)]
        enum Phase {
            Prefix,
            Number,
            Suffix,
        }

        let mut phase = Phase::Prefix;
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut min_int = 0;
        let mut int_digits = 0;
        let mut min_frac = 0;
        let mut max_frac = 0;
        let mut in_fraction = false;
        let mut last_group: Option<usize> = None;
        let mut multiplier = 1;

        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            if c == ';' {
                break;
            }
            let is_number_char = matches!(c, '0' | '#' | ',' | '.');
            if phase == Phase::Prefix && is_number_char {
                phase = Phase::Number;
            } else if phase == Phase::Number && !is_number_char {
                phase = Phase::Suffix;
            }

            match phase {
                Phase::Number => match c {
                    '0' if in_fraction => {
                        if max_frac > min_frac {
                            return Err("'0' after '#' in fraction".into());
                        }
                        min_frac += 1;
                        max_frac += 1;
                    }
                    '#' if in_fraction => max_frac += 1,
                    '0' => {
                        min_int += 1;
                        int_digits += 1;
                        last_group = last_group.map(|g| g + 1);
                    }
                    '#' => {
                        if min_int > 0 {
                            return Err("'#' after '0' in integer part".into());
                        }
                        int_digits += 1;
                        last_group = last_group.map(|g| g + 1);
                    }
                    ',' if !in_fraction => last_group = Some(0),
                    '.' if !in_fraction => in_fraction = true,
                    _ => return Err(format!("unexpected '{}' in number part", c)),
                },
                Phase::Prefix | Phase::Suffix => {
                    let out = if phase == Phase::Prefix { &mut prefix } else { &mut suffix };
                    match c {
                        '\'' => {
                            if chars.peek() == Some(&'\'') {
                                chars.next();
                                out.push('\'');
                                continue;
                            }
                            for q in chars.by_ref() {
                                if q == '\'' {
                                    break;
                                }
                                out.push(q);
                            }
                        }
                        '%' => {
                            multiplier = 100;
                            out.push('%');
                        }
                        '\u{2030}' => {
                            multiplier = 1000;
                            out.push('\u{2030}');
                        }
                        'E' => return Err("exponent patterns are not supported".into()),
                        '0' | '#' | ',' | '.' => return Err("number part appears twice".into()),
                        _ => out.push(c),
                    }
                }
            }
        }

        if int_digits == 0 && max_frac == 0 {
            return Err("no digit placeholder".into());
        }
        if last_group == Some(0) {
            return Err("grouping separator without digits".into());
        }

        Ok(Self {
            prefix,
            suffix,
            min_int,
            min_frac,
            max_frac,
            grouping: last_group,
            multiplier,
        })
    }

    /// Strip prefix, suffix and locale symbols; returns plain text and the divisor
    fn normalize(&self, text: &str, locale: &Locale) -> Option<(String, u32)> {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let body = rest.strip_prefix(self.prefix.as_str())?.strip_suffix(self.suffix.as_str())?;
        if body.is_empty() {
            return None;
        }

        let decimal = locale.decimal_separator();
        let grouping = locale.grouping_separator();
        let mut plain = String::with_capacity(body.len() + 1);
        if negative {
            plain.push('-');
        }
        let mut seen_decimal = false;
        for c in body.chars() {
            if c.is_ascii_digit() {
                plain.push(c);
            } else if c == decimal && !seen_decimal {
                seen_decimal = true;
                plain.push('.');
            } else if self.grouping.is_some()
                && !seen_decimal
                && (c == grouping || (grouping == '\u{a0}' && c == ' '))
            {
                continue;
            } else {
                return None;
            }
        }
        Some((plain, self.multiplier))
    }

    pub fn format(&self, value: Decimal, locale: &Locale) -> String {
        let scaled = value * Decimal::from(self.multiplier);
        let rounded = scaled.round_dp_with_strategy(self.max_frac as u32, RoundingStrategy::MidpointNearestEven);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let digits = rounded.abs().to_string();
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i.to_string(), f.to_string()),
            None => (digits, String::new()),
        };

        let mut frac = frac_part.trim_end_matches('0').to_string();
        while frac.len() < self.min_frac {
            frac.push('0');
        }

        let mut int = int_part.trim_start_matches('0').to_string();
        while int.len() < self.min_int {
            int.insert(0, '0');
        }
        if int.is_empty() && frac.is_empty() {
            int.push('0');
        }

        let int = match self.grouping {
            Some(size) if size > 0 && int.len() > size => {
                let sep = locale.grouping_separator();
                let mut grouped = String::with_capacity(int.len() + int.len() / size);
                for (i, c) in int.chars().enumerate() {
                    if i > 0 && (int.len() - i) % size == 0 {
                        grouped.push(sep);
                    }
                    grouped.push(c);
                }
                grouped
            }
            _ => int,
        };

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.prefix);
        out.push_str(&int);
        if !frac.is_empty() {
            out.push(locale.decimal_separator());
            out.push_str(&frac);
        }
        out.push_str(&self.suffix);
        out
    }
}

/// Numeric text, plain or through a [`DecimalPattern`]
#[derive(Debug, Clone)]
pub struct NumberFormatter {
    kind: NumberKind,
    pattern: Option<(String, DecimalPattern)>,
    locale: Locale,
}

impl NumberFormatter {
    /// Plain text: `-12.5`, `1e3`
    pub fn new(kind: NumberKind) -> Self {
        Self {
            kind,
            pattern: None,
            locale: Locale::en_us(),
        }
    }

    pub fn with_pattern(kind: NumberKind, pattern: &str, locale: Locale) -> Result<Self, String> {
        Ok(Self {
            kind,
            pattern: Some((pattern.to_string(), DecimalPattern::parse(pattern)?)),
            locale,
        })
    }

    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    /// Narrow a native cell number, with the same range checks as text
    pub fn from_number(&self, n: f64) -> Result<FieldValue, TextParseError> {
        self.kind.from_f64(n).map_err(|reason| self.error(&n.to_string(), reason))
    }

    pub(crate) fn error(&self, text: &str, reason: String) -> TextParseError {
        let (min, max) = match self.kind.bounds() {
            Some((min, max)) => (Value::from(min), Value::from(max)),
            None => (Value::Null, Value::Null),
        };
        TextParseError::new(text, self.kind.name(), reason)
            .with_var("pattern", self.pattern.as_ref().map(|(p, _)| p.clone()))
            .with_var("locale", self.locale.to_string())
            .with_var("min", min)
            .with_var("max", max)
    }
}

impl TextFormatter for NumberFormatter {
    fn parse(&self, text: &str) -> Result<FieldValue, TextParseError> {
        let (plain, divisor) = match &self.pattern {
            Some((_, pattern)) => pattern
                .normalize(text, &self.locale)
                .ok_or_else(|| self.error(text, "does not match the pattern".into()))?,
            None => (text.to_string(), 1),
        };
        self.kind
            .parse_plain(&plain, divisor)
            .map_err(|reason| self.error(text, reason))
    }

    fn format(&self, value: &FieldValue) -> Result<String, TextParseError> {
        if value.is_null() {
            return Ok(String::new());
        }
        if let Some((_, pattern)) = &self.pattern {
            if let Some(d) = to_decimal(value) {
                return Ok(pattern.format(d, &self.locale));
            }
        }
        match value {
            FieldValue::Byte(_)
            | FieldValue::Short(_)
            | FieldValue::Int(_)
            | FieldValue::Long(_)
            | FieldValue::Float(_)
            | FieldValue::Double(_)
            | FieldValue::Decimal(_)
            | FieldValue::BigInteger(_) => Ok(value.to_string()),
            other => Err(self.error(&other.to_string(), "not a number value".into())),
        }
    }
}
