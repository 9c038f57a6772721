//! Date and time text with `SimpleDateFormat`-style patterns
//!
//! Supported letters: `y M L d H k K h m s S E a Z X`. Text between single
//! quotes is literal and `''` is a quote. Parsing must consume the whole
//! input. Strict mode rejects out-of-range fields (month 13, February 30);
//! lenient mode rolls them over into the next unit.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Timelike, Utc,
};
use once_cell::sync::Lazy;
use regex::Regex;

use super::TextFormatter;
use crate::error::TextParseError;
use crate::locale::Locale;
use crate::value::{FieldType, FieldValue};

static ZONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:UTC|GMT|UT)?([+-])(\d{1,2})(?::?(\d{2}))?$").expect("Failed to build zone pattern")
});

/// Date and time field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateKind {
    DateTime,
    Date,
    Time,
    Timestamp,
    Calendar,
}

impl DateKind {
    pub const ALL: [DateKind; 5] = [
        DateKind::DateTime,
        DateKind::Date,
        DateKind::Time,
        DateKind::Timestamp,
        DateKind::Calendar,
    ];

    pub fn of(field_type: &FieldType) -> Option<DateKind> {
        Some(match field_type {
            FieldType::DateTime => DateKind::DateTime,
            FieldType::Date => DateKind::Date,
            FieldType::Time => DateKind::Time,
            FieldType::Timestamp => DateKind::Timestamp,
            FieldType::Calendar => DateKind::Calendar,
            _ => return None,
        })
    }

    pub fn field_type(self) -> FieldType {
        match self {
            DateKind::DateTime => FieldType::DateTime,
            DateKind::Date => FieldType::Date,
            DateKind::Time => FieldType::Time,
            DateKind::Timestamp => FieldType::Timestamp,
            DateKind::Calendar => FieldType::Calendar,
        }
    }

    /// Pattern used when a field declares none
    pub fn default_pattern(self) -> &'static str {
        match self {
            DateKind::DateTime | DateKind::Calendar => "yyyy-MM-dd HH:mm:ss",
            DateKind::Date => "yyyy-MM-dd",
            DateKind::Time => "HH:mm:ss",
            DateKind::Timestamp => "yyyy-MM-dd HH:mm:ss.SSS",
        }
    }

    /// Native cell format used when a field declares no pattern
    pub fn default_excel_pattern(self) -> &'static str {
        match self {
            DateKind::DateTime | DateKind::Calendar => "yyyy-mm-dd hh:mm:ss",
            DateKind::Date => "yyyy-mm-dd",
            DateKind::Time => "hh:mm:ss",
            DateKind::Timestamp => "yyyy-mm-dd hh:mm:ss.000",
        }
    }

    /// Narrow a wall-clock time in `zone` to this kind
    ///
    /// `None` when the instant falls outside the representable range.
    pub fn narrow(self, local: NaiveDateTime, zone: FixedOffset) -> Option<FieldValue> {
        let value = match self {
            DateKind::DateTime => FieldValue::DateTime(local),
            DateKind::Date => FieldValue::Date(local.date()),
            DateKind::Time => FieldValue::Time(local.time()),
            DateKind::Timestamp => FieldValue::Timestamp(local),
            DateKind::Calendar => {
                let utc = shift(local, -(zone.local_minus_utc() as i64))?;
                FieldValue::Calendar(DateTime::from_naive_utc_and_offset(utc, zone))
            }
        };
        Some(value)
    }

    /// Wall-clock time of a date value in `zone`
    ///
    /// Time-only values sit on 1970-01-01.
    pub fn widen(value: &FieldValue, zone: FixedOffset) -> Option<NaiveDateTime> {
        match value {
            FieldValue::DateTime(v) | FieldValue::Timestamp(v) => Some(*v),
            FieldValue::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            FieldValue::Time(t) => Some(epoch_date().and_time(*t)),
            FieldValue::Calendar(c) => Some(c.with_timezone(&zone).naive_local()),
            _ => None,
        }
    }
}

fn epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parse `UTC`, `GMT+09:00`, `+0900`, `-05` or a few fixed abbreviations
pub fn parse_zone(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    match s.to_ascii_uppercase().as_str() {
        "UTC" | "GMT" | "UT" | "Z" => return FixedOffset::east_opt(0),
        "JST" | "ASIA/TOKYO" => return FixedOffset::east_opt(9 * 3600),
        "KST" | "ASIA/SEOUL" => return FixedOffset::east_opt(9 * 3600),
        "IST" | "ASIA/KOLKATA" => return FixedOffset::east_opt(5 * 3600 + 1800),
        _ => {}
    }
    let caps = ZONE_RE.captures(s)?;
    let hours: i32 = caps.get(2)?.as_str().parse().ok()?;
    let minutes: i32 = caps.get(3).map_or(Some(0), |m| m.as_str().parse().ok())?;
    if hours > 18 || minutes > 59 {
        return None;
    }
    let secs = hours * 3600 + minutes * 60;
    FixedOffset::east_opt(if &caps[1] == "-" { -secs } else { secs })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field { letter: char, count: usize },
}

impl Token {
    fn is_numeric(&self) -> bool {
        match self {
            Token::Field { letter, count } => match letter {
                'M' | 'L' => *count < 3,
                'y' | 'd' | 'H' | 'k' | 'K' | 'h' | 'm' | 's' | 'S' => true,
                _ => false,
            },
            Token::Literal(_) => false,
        }
    }
}

fn compile(pattern: &str) -> Result<Vec<Token>, String> {
    if pattern.is_empty() {
        return Err("pattern is empty".into());
    }

    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                literal.push('\'');
                continue;
            }
            let mut closed = false;
            for q in chars.by_ref() {
                if q == '\'' {
                    closed = true;
                    break;
                }
                literal.push(q);
            }
            if !closed {
                return Err("unterminated quote".into());
            }
        } else if c.is_ascii_alphabetic() {
            if !"yMLdHkKhmsSEaZX".contains(c) {
                return Err(format!("unsupported pattern letter '{}'", c));
            }
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            let mut count = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }
            tokens.push(Token::Field { letter: c, count });
        } else {
            literal.push(c);
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

/// Translate a date pattern into a native cell number format
///
/// `yyyy/MM/dd HH:mm` becomes `yyyy/mm/dd hh:mm`; zone letters are dropped.
pub fn to_excel_pattern(pattern: &str) -> Result<String, String> {
    let tokens = compile(pattern)?;
    let mut out = String::new();
    for token in &tokens {
        match token {
            Token::Literal(text) => {
                if text.chars().all(|c| " -/:.,()".contains(c)) {
                    out.push_str(text);
                } else {
                    out.push('"');
                    out.push_str(&text.replace('"', ""));
                    out.push('"');
                }
            }
            Token::Field { letter, count } => {
                let n = *count;
                match letter {
                    'y' => out.push_str(if n == 2 { "yy" } else { "yyyy" }),
                    'M' | 'L' => out.push_str(&"m".repeat(n.min(4))),
                    'd' => out.push_str(&"d".repeat(n.min(2))),
                    'E' => out.push_str(if n >= 4 { "dddd" } else { "ddd" }),
                    'H' | 'k' | 'K' | 'h' => out.push_str(&"h".repeat(n.min(2))),
                    'm' => out.push_str(&"m".repeat(n.min(2))),
                    's' => out.push_str(&"s".repeat(n.min(2))),
                    'S' => out.push_str(&"0".repeat(n.min(3))),
                    'a' => out.push_str("AM/PM"),
                    _ => {}
                }
            }
        }
    }
    Ok(out)
}

#[derive(Debug, Default)]
struct Parsed {
    year: Option<i64>,
    month: Option<i64>,
    day: Option<i64>,
    hour24: Option<i64>,
    hour12: Option<i64>,
    pm: Option<bool>,
    minute: Option<i64>,
    second: Option<i64>,
    millis: Option<i64>,
    offset: Option<FixedOffset>,
}

/// Date text for one date kind
#[derive(Debug, Clone)]
pub struct DateTimeFormatter {
    kind: DateKind,
    pattern: String,
    tokens: Vec<Token>,
    locale: Locale,
    zone: FixedOffset,
    lenient: bool,
}

impl DateTimeFormatter {
    pub fn new(
        kind: DateKind,
        pattern: &str,
        locale: Locale,
        zone: FixedOffset,
        lenient: bool,
    ) -> Result<Self, String> {
        Ok(Self {
            kind,
            pattern: pattern.to_string(),
            tokens: compile(pattern)?,
            locale,
            zone,
            lenient,
        })
    }

    /// The kind's default pattern, `en_US`, UTC, strict
    pub fn with_defaults(kind: DateKind) -> Self {
        Self {
            kind,
            pattern: kind.default_pattern().to_string(),
            tokens: compile(kind.default_pattern()).unwrap_or_default(),
            locale: Locale::en_us(),
            zone: utc(),
            lenient: false,
        }
    }

    pub fn kind(&self) -> DateKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    fn error(&self, text: &str, reason: impl Into<String>) -> TextParseError {
        TextParseError::new(text, self.kind.field_type().type_name(), reason)
            .with_var("pattern", self.pattern.clone())
            .with_var("locale", self.locale.to_string())
            .with_var("lenient", self.lenient)
    }

    fn scan(&self, text: &str) -> Result<Parsed, String> {
        let mut parsed = Parsed::default();
        let mut rest = text;

        for (i, token) in self.tokens.iter().enumerate() {
            let (letter, count) = match token {
                Token::Literal(lit) => {
                    rest = rest
                        .strip_prefix(lit.as_str())
                        .ok_or_else(|| format!("expected '{}'", lit))?;
                    continue;
                }
                Token::Field { letter, count } => (*letter, *count),
            };

            if token.is_numeric() {
                let abutting = self.tokens.get(i + 1).map_or(false, Token::is_numeric);
                let digits = take_digits(rest, if abutting { Some(count) } else { None })
                    .ok_or_else(|| format!("expected digits for '{}'", letter))?;
                rest = &rest[digits.len()..];
                let value: i64 = digits.parse().map_err(|_| "number too large".to_string())?;

                match letter {
                    'y' if count <= 2 && digits.len() == 2 => parsed.year = Some(resolve_two_digit_year(value)),
                    'y' => parsed.year = Some(value),
                    'M' | 'L' => parsed.month = Some(value),
                    'd' => parsed.day = Some(value),
                    'H' => parsed.hour24 = Some(value),
                    'k' => {
                        if !self.lenient && !(1..=24).contains(&value) {
                            return Err("hour out of range".into());
                        }
                        parsed.hour24 = Some(value % 24);
                    }
                    'K' => {
                        if !self.lenient && !(0..=11).contains(&value) {
                            return Err("hour out of range".into());
                        }
                        parsed.hour12 = Some(value);
                    }
                    'h' => {
                        if !self.lenient && !(1..=12).contains(&value) {
                            return Err("hour out of range".into());
                        }
                        parsed.hour12 = Some(value % 12);
                    }
                    'm' => parsed.minute = Some(value),
                    's' => parsed.second = Some(value),
                    'S' => parsed.millis = Some(value),
                    _ => {}
                }
                continue;
            }

            match letter {
                'M' | 'L' => {
                    let (len, month) = self
                        .locale
                        .month_candidates()
                        .into_iter()
                        .find_map(|(name, m)| starts_with_ignore_case(rest, name).map(|len| (len, m)))
                        .ok_or_else(|| "expected a month name".to_string())?;
                    parsed.month = Some(month as i64);
                    rest = &rest[len..];
                }
                'E' => {
                    let len = self
                        .locale
                        .weekday_candidates()
                        .into_iter()
                        .find_map(|name| starts_with_ignore_case(rest, name))
                        .ok_or_else(|| "expected a weekday name".to_string())?;
                    rest = &rest[len..];
                }
                'a' => {
                    let [am, pm] = self.locale.am_pm();
                    if let Some(len) = starts_with_ignore_case(rest, am) {
                        parsed.pm = Some(false);
                        rest = &rest[len..];
                    } else if let Some(len) = starts_with_ignore_case(rest, pm) {
                        parsed.pm = Some(true);
                        rest = &rest[len..];
                    } else {
                        return Err("expected an AM/PM marker".into());
                    }
                }
                'Z' | 'X' => {
                    let (len, offset) = take_offset(rest, letter == 'X').ok_or("expected a zone offset")?;
                    parsed.offset = Some(offset);
                    rest = &rest[len..];
                }
                _ => return Err(format!("unsupported pattern letter '{}'", letter)),
            }
        }

        if !rest.is_empty() {
            return Err(format!("unparsed text '{}'", rest));
        }
        Ok(parsed)
    }

    fn resolve(&self, p: Parsed) -> Result<NaiveDateTime, String> {
        let year = p.year.unwrap_or(1970);
        let month = p.month.unwrap_or(1);
        let day = p.day.unwrap_or(1);
        let hour = match (p.hour24, p.hour12) {
            (Some(h), _) => h,
            (None, Some(h)) => h.saturating_add(if p.pm == Some(true) { 12 } else { 0 }),
            (None, None) => 0,
        };
        let minute = p.minute.unwrap_or(0);
        let second = p.second.unwrap_or(0);
        let millis = p.millis.unwrap_or(0);

        if self.lenient {
            let months = year
                .checked_mul(12)
                .and_then(|m| m.checked_add(month - 1))
                .ok_or("year out of range")?;
            let first = i32::try_from(months.div_euclid(12))
                .ok()
                .and_then(|y| NaiveDate::from_ymd_opt(y, months.rem_euclid(12) as u32 + 1, 1))
                .ok_or("year out of range")?;
            return Duration::try_days(day - 1)
                .and_then(|days| first.and_time(NaiveTime::MIN).checked_add_signed(days))
                .and_then(|at| at.checked_add_signed(Duration::try_hours(hour)?))
                .and_then(|at| at.checked_add_signed(Duration::try_minutes(minute)?))
                .and_then(|at| at.checked_add_signed(Duration::try_seconds(second)?))
                .and_then(|at| at.checked_add_signed(Duration::try_milliseconds(millis)?))
                .ok_or_else(|| "date out of range".to_string());
        }

        let date = i32::try_from(year)
            .ok()
            .zip(u32::try_from(month).ok())
            .zip(u32::try_from(day).ok())
            .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
            .ok_or("no such date")?;
        if !(0..1000).contains(&millis) {
            return Err("millisecond out of range".into());
        }
        let time = u32::try_from(hour)
            .ok()
            .zip(u32::try_from(minute).ok())
            .zip(u32::try_from(second).ok())
            .and_then(|((h, m), s)| NaiveTime::from_hms_milli_opt(h, m, s, millis as u32))
            .ok_or("no such time")?;
        Ok(date.and_time(time))
    }

    fn render(&self, local: NaiveDateTime) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let (letter, count) = match token {
                Token::Literal(text) => {
                    out.push_str(text);
                    continue;
                }
                Token::Field { letter, count } => (*letter, *count),
            };
            let pad = |out: &mut String, n: i64| out.push_str(&format!("{:0width$}", n, width = count));
            match letter {
                'y' if count == 2 => pad(&mut out, (local.year() % 100) as i64),
                'y' => pad(&mut out, local.year() as i64),
                'M' | 'L' if count >= 3 => out.push_str(self.locale.month_name(local.month(), count == 3)),
                'M' | 'L' => pad(&mut out, local.month() as i64),
                'd' => pad(&mut out, local.day() as i64),
                'H' => pad(&mut out, local.hour() as i64),
                'k' => pad(&mut out, if local.hour() == 0 { 24 } else { local.hour() as i64 }),
                'K' => pad(&mut out, (local.hour() % 12) as i64),
                'h' => pad(&mut out, if local.hour() % 12 == 0 { 12 } else { (local.hour() % 12) as i64 }),
                'm' => pad(&mut out, local.minute() as i64),
                's' => pad(&mut out, local.second() as i64),
                'S' => pad(&mut out, (local.nanosecond() / 1_000_000).min(999) as i64),
                'E' => out.push_str(
                    self.locale
                        .weekday_name(local.weekday().num_days_from_monday(), count < 4),
                ),
                'a' => out.push_str(self.locale.am_pm()[(local.hour() >= 12) as usize]),
                'Z' => out.push_str(&format_offset(self.zone, false, false)),
                'X' => out.push_str(&format_offset(self.zone, count >= 3, true)),
                _ => {}
            }
        }
        out
    }
}

impl TextFormatter for DateTimeFormatter {
    fn parse(&self, text: &str) -> Result<FieldValue, TextParseError> {
        let parsed = self.scan(text).map_err(|reason| self.error(text, reason))?;
        let offset = parsed.offset;
        let mut local = self.resolve(parsed).map_err(|reason| self.error(text, reason))?;

        if let Some(offset) = offset {
            // re-express the parsed instant in the formatter's zone
            let delta = self.zone.local_minus_utc() as i64 - offset.local_minus_utc() as i64;
            local = shift(local, delta).ok_or_else(|| self.error(text, "date out of range"))?;
        }
        self.kind
            .narrow(local, self.zone)
            .ok_or_else(|| self.error(text, "date out of range"))
    }

    fn format(&self, value: &FieldValue) -> Result<String, TextParseError> {
        if value.is_null() {
            return Ok(String::new());
        }
        let local = DateKind::widen(value, self.zone)
            .ok_or_else(|| self.error(&value.to_string(), "not a date value"))?;
        Ok(self.render(local))
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn shift(local: NaiveDateTime, seconds: i64) -> Option<NaiveDateTime> {
    local.checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Two-digit years land within 80 years before and 20 after the current year
fn resolve_two_digit_year(yy: i64) -> i64 {
    let start = Utc::now().year() as i64 - 80;
    let mut year = (start / 100) * 100 + yy;
    if year < start {
        year += 100;
    }
    year
}

fn take_digits(s: &str, width: Option<usize>) -> Option<&str> {
    let available = s.bytes().take_while(u8::is_ascii_digit).count();
    let len = match width {
        Some(w) if available >= w => w,
        Some(_) => return None,
        None => available,
    };
    (len > 0).then(|| &s[..len])
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> Option<usize> {
    let head = s.get(..prefix.len())?;
    (head.to_lowercase() == prefix.to_lowercase()).then_some(prefix.len())
}

fn take_offset(s: &str, allow_z: bool) -> Option<(usize, FixedOffset)> {
    if allow_z && s.starts_with('Z') {
        return Some((1, FixedOffset::east_opt(0)?));
    }
    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let hours: i32 = s.get(1..3)?.parse().ok()?;
    let mut len = 3;
    let mut minutes = 0;
    let tail = &s[3..];
    let tail_offset = usize::from(tail.starts_with(':'));
    if let Some(mm) = tail.get(tail_offset..tail_offset + 2).filter(|m| m.bytes().all(|b| b.is_ascii_digit())) {
        minutes = mm.parse().ok()?;
        len += tail_offset + 2;
    }
    Some((len, FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?))
}

fn format_offset(zone: FixedOffset, colon: bool, z_for_utc: bool) -> String {
    let secs = zone.local_minus_utc();
    if z_for_utc && secs == 0 {
        return "Z".into();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let abs = secs.abs();
    if colon {
        format!("{}{:02}:{:02}", sign, abs / 3600, abs % 3600 / 60)
    } else {
        format!("{}{:02}{:02}", sign, abs / 3600, abs % 3600 / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    fn formatter(kind: DateKind, pattern: &str) -> DateTimeFormatter {
        DateTimeFormatter::new(kind, pattern, Locale::en_us(), utc(), false).unwrap()
    }

    #[test]
    fn test_default_patterns() {
        let f = DateTimeFormatter::with_defaults(DateKind::DateTime);
        assert_eq!(
            f.parse("2024-02-29 13:45:10").unwrap(),
            FieldValue::DateTime(dt(2024, 2, 29, 13, 45, 10))
        );

        let t = DateTimeFormatter::with_defaults(DateKind::Time);
        assert_eq!(
            t.parse("08:30:00").unwrap(),
            FieldValue::Time(NaiveTime::from_hms_opt(8, 30, 0).unwrap())
        );

        let ts = DateTimeFormatter::with_defaults(DateKind::Timestamp);
        let v = ts.parse("2024-01-02 03:04:05.678").unwrap();
        assert_eq!(ts.format(&v).unwrap(), "2024-01-02 03:04:05.678");
    }

    #[test]
    fn test_strict_vs_lenient() {
        let strict = formatter(DateKind::Date, "yyyy-MM-dd");
        assert!(strict.parse("2024-13-01").is_err());
        assert!(strict.parse("2023-02-29").is_err());

        let lenient = DateTimeFormatter::new(DateKind::Date, "yyyy-MM-dd", Locale::en_us(), utc(), true).unwrap();
        assert_eq!(
            lenient.parse("2024-13-01").unwrap(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(
            lenient.parse("2023-02-29").unwrap(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_lenient_overflow_is_an_error() {
        let lenient = |pattern| DateTimeFormatter::new(DateKind::DateTime, pattern, Locale::en_us(), utc(), true).unwrap();

        let date = lenient("yyyy-MM-dd");
        assert!(date.parse("2024-01-999999999999999").is_err());
        assert!(date.parse("999999999999999999-01-01").is_err());
        assert!(date.parse("2024-9223372036854775807-01").is_err());

        let hours = lenient("yyyy-MM-dd HH");
        assert!(hours.parse("2024-01-01 9999999999999999").is_err());
        let err = hours.parse("2024-01-01 999999999999").unwrap_err();
        assert_eq!(err.message_vars()["lenient"], true);

        let clock = lenient("yyyy-MM-dd HH:mm:ss.SSS");
        assert!(clock.parse("2024-01-01 00:9999999999999999:00.000").is_err());
        assert!(clock.parse("2024-01-01 00:00:9999999999999999.000").is_err());
        assert!(clock.parse("2024-01-01 00:00:00.9999999999999999").is_err());

        let twelve = lenient("yyyy-MM-dd K a");
        assert!(twelve.parse("2024-01-01 9223372036854775807 PM").is_err());

        // a large but representable roll-over still resolves
        assert_eq!(
            hours.parse("2024-01-01 48").unwrap(),
            FieldValue::DateTime(dt(2024, 1, 3, 0, 0, 0))
        );
    }

    #[test]
    fn test_offset_at_range_edge_is_an_error() {
        let f = formatter(DateKind::Calendar, "yyyy-MM-dd HH:mmXXX");
        let edge = NaiveDate::MAX.year();
        let err = f.parse(&format!("{}-12-31 23:59-12:00", edge)).unwrap_err();
        assert_eq!(err.reason(), "date out of range");

        let low = NaiveDate::MIN.year();
        assert!(f.parse(&format!("{}-01-01 00:00+12:00", low)).is_err());

        let dated = formatter(DateKind::DateTime, "yyyy-MM-dd HH:mmZ");
        assert!(dated.parse(&format!("{}-12-31 23:59-1200", edge)).is_err());
    }

    #[test]
    fn test_whole_text_consumed() {
        let f = formatter(DateKind::Date, "yyyy-MM-dd");
        assert!(f.parse("2024-01-01 extra").is_err());
        assert!(f.parse("2024/01/01").is_err());
    }

    #[test]
    fn test_abutting_fields() {
        let f = formatter(DateKind::Date, "yyyyMMdd");
        assert_eq!(
            f.parse("20240315").unwrap(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
    }

    #[test]
    fn test_month_names_and_am_pm() {
        let f = formatter(DateKind::DateTime, "EEE, d MMM yyyy h:mm a");
        let v = FieldValue::DateTime(dt(2024, 6, 3, 15, 5, 0));
        assert_eq!(f.format(&v).unwrap(), "Mon, 3 Jun 2024 3:05 PM");
        assert_eq!(f.parse("mon, 3 jun 2024 3:05 pm").unwrap(), v);
    }

    #[test]
    fn test_japanese_literals() {
        let f = DateTimeFormatter::new(
            DateKind::Date,
            "yyyy'年'M'月'd'日'(E)",
            Locale::parse("ja_JP").unwrap(),
            utc(),
            false,
        )
        .unwrap();
        let v = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(f.format(&v).unwrap(), "2024年1月7日(日)");
        assert_eq!(f.parse("2024年1月7日(日)").unwrap(), v);
    }

    #[test]
    fn test_calendar_zone() {
        let jst = parse_zone("GMT+09:00").unwrap();
        let f = DateTimeFormatter::new(DateKind::Calendar, "yyyy-MM-dd HH:mmXXX", Locale::en_us(), jst, false)
            .unwrap();
        let v = f.parse("2024-01-01 10:00+09:00").unwrap();
        assert_eq!(f.format(&v).unwrap(), "2024-01-01 10:00+09:00");

        // an instant given in another zone is the same instant
        assert_eq!(f.parse("2024-01-01 01:00Z").unwrap(), v);
    }

    #[test]
    fn test_parse_zone() {
        assert_eq!(parse_zone("UTC"), FixedOffset::east_opt(0));
        assert_eq!(parse_zone("+0530"), FixedOffset::east_opt(5 * 3600 + 1800));
        assert_eq!(parse_zone("GMT-05"), FixedOffset::east_opt(-5 * 3600));
        assert_eq!(parse_zone("Mars/Olympus"), None);
    }

    #[test]
    fn test_excel_translation() {
        assert_eq!(to_excel_pattern("yyyy-MM-dd HH:mm:ss").unwrap(), "yyyy-mm-dd hh:mm:ss");
        assert_eq!(to_excel_pattern("yyyy-MM-dd HH:mm:ss.SSS").unwrap(), "yyyy-mm-dd hh:mm:ss.000");
        assert_eq!(to_excel_pattern("yyyy'年'M'月'd'日'").unwrap(), "yyyy\"年\"m\"月\"d\"日\"");
        assert_eq!(to_excel_pattern("h:mm a").unwrap(), "h:mm AM/PM");
    }

    #[test]
    fn test_bad_patterns() {
        assert!(compile("").is_err());
        assert!(compile("yyyy-MM-dd Q").is_err());
        assert!(compile("'open").is_err());
    }
}
