//! Display text of cells
//!
//! Converters that parse text read what the spreadsheet would show: numbers
//! rendered through the cell's number format, dates through the date tokens
//! of that format, formulas through their cached result.

use std::fmt::Debug;

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sheetbind_core::{date_serial, CellValue, NumberFormat};

use crate::converter::CellRef;
use crate::format::DecimalPattern;
use crate::locale::Locale;

/// Renders a cell as the text a user sees
pub trait CellFormatter: Send + Sync + Debug {
    /// Display text of the cell
    fn format(&self, cell: &CellRef<'_>) -> String;

    /// True when the cell shows nothing
    fn is_empty(&self, cell: &CellRef<'_>) -> bool {
        self.format(cell).is_empty()
    }
}

/// Format-aware rendering with English names
#[derive(Debug, Clone)]
pub struct DefaultCellFormatter {
    locale: Locale,
}

impl Default for DefaultCellFormatter {
    fn default() -> Self {
        Self {
            locale: Locale::en_us(),
        }
    }
}

impl DefaultCellFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn format_number(&self, n: f64, format: &NumberFormat, date_1904: bool) -> String {
        if format.is_date_format() {
            if let Some(dt) = date_serial::to_datetime(n, date_1904) {
                return render_date(dt, format.format_string(), &self.locale);
            }
        }
        match format {
            NumberFormat::General => general(n),
            _ if format.is_text_format() => general(n),
            _ => {
                let section = first_section(format.format_string());
                match (DecimalPattern::parse(&strip_excel_decorations(section)), Decimal::from_f64(n)) {
                    (Ok(pattern), Some(d)) => pattern.format(d, &self.locale),
                    _ => general(n),
                }
            }
        }
    }
}

impl CellFormatter for DefaultCellFormatter {
    fn format(&self, cell: &CellRef<'_>) -> String {
        match cell.value() {
            CellValue::Empty => String::new(),
            CellValue::Boolean(true) => "TRUE".into(),
            CellValue::Boolean(false) => "FALSE".into(),
            CellValue::String(s) => s.as_str().to_string(),
            CellValue::Error(e) => e.as_str().to_string(),
            CellValue::Number(n) => self.format_number(*n, &cell.style().number_format, cell.is_date_1904()),
            // formula without a cached result
            CellValue::Formula { .. } => String::new(),
        }
    }
}

/// Excel's General rendering: integers bare, others to 15 significant digits
pub fn general(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    match Decimal::from_f64(n).and_then(|d| d.round_sf(15)) {
        Some(d) => d.normalize().to_string(),
        None => n.to_string(),
    }
}

/// Round to `digits` significant digits
pub(crate) fn round_significant(n: f64, digits: u32) -> f64 {
    if !n.is_finite() || n == 0.0 || digits == 0 {
        return n;
    }
    Decimal::from_f64(n)
        .and_then(|d| d.round_sf(digits))
        .and_then(|d| d.to_f64())
        .unwrap_or(n)
}

fn first_section(format: &str) -> &str {
    let mut in_quote = false;
    for (i, c) in format.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            ';' if !in_quote => return &format[..i],
            _ => {}
        }
    }
    format
}

/// Turn an Excel number format into a decimal pattern
///
/// Escapes become literals, padding and fill markers and bracketed sections
/// are dropped.
fn strip_excel_decorations(format: &str) -> String {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let literal: String = chars.by_ref().take_while(|&q| q != '"').collect();
                if !literal.is_empty() {
                    out.push('\'');
                    out.push_str(&literal.replace('\'', "''"));
                    out.push('\'');
                }
            }
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push('\'');
                    out.push(escaped);
                    out.push('\'');
                }
            }
            '_' | '*' => {
                chars.next();
            }
            '[' => {
                for b in chars.by_ref() {
                    if b == ']' {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
enum DatePart {
    Literal(String),
    Year(usize),
    Month(usize),
    Minute(usize),
    Day(usize),
    Hour(usize),
    Second(usize),
    Fraction(usize),
    AmPm,
    AP,
}

fn tokenize_date(format: &str) -> Vec<DatePart> {
    let chars: Vec<char> = first_section(format).chars().collect();
    let mut parts = Vec::new();
    let mut i = 0;
    let run = |i: usize, c: char| chars[i..].iter().take_while(|x| x.eq_ignore_ascii_case(&c)).count();

    while i < chars.len() {
        let c = chars[i];
        let lower = c.to_ascii_lowercase();
        match lower {
            'y' | 'd' | 'h' | 's' | 'm' => {
                let n = run(i, c);
                parts.push(match lower {
                    'y' => DatePart::Year(n),
                    'd' => DatePart::Day(n),
                    'h' => DatePart::Hour(n),
                    's' => DatePart::Second(n),
                    _ => DatePart::Month(n),
                });
                i += n;
            }
            '"' => {
                let literal: String = chars[i + 1..].iter().take_while(|&&q| q != '"').collect();
                i += literal.chars().count() + 2;
                parts.push(DatePart::Literal(literal));
            }
            '\\' => {
                if let Some(&escaped) = chars.get(i + 1) {
                    parts.push(DatePart::Literal(escaped.to_string()));
                }
                i += 2;
            }
            '[' => {
                let inner: String = chars[i + 1..].iter().take_while(|&&b| b != ']').collect();
                i += inner.chars().count() + 2;
                let l = inner.to_ascii_lowercase();
                if l.starts_with('h') {
                    parts.push(DatePart::Hour(l.len()));
                } else if l.starts_with('m') {
                    parts.push(DatePart::Minute(l.len()));
                } else if l.starts_with('s') {
                    parts.push(DatePart::Second(l.len()));
                }
            }
            'a' if chars[i..].iter().take(5).collect::<String>().eq_ignore_ascii_case("am/pm") => {
                parts.push(DatePart::AmPm);
                i += 5;
            }
            'a' if chars[i..].iter().take(3).collect::<String>().eq_ignore_ascii_case("a/p") => {
                parts.push(DatePart::AP);
                i += 3;
            }
            '.' if matches!(chars.get(i + 1), Some('0'))
                && matches!(parts.last(), Some(DatePart::Second(_))) =>
            {
                let n = chars[i + 1..].iter().take_while(|&&z| z == '0').count();
                parts.push(DatePart::Literal(".".into()));
                parts.push(DatePart::Fraction(n));
                i += n + 1;
            }
            '_' | '*' => i += 2,
            _ => {
                parts.push(DatePart::Literal(c.to_string()));
                i += 1;
            }
        }
    }

    // m after an hour or before a second is a minute
    let date_tokens: Vec<usize> = (0..parts.len())
        .filter(|&k| !matches!(parts[k], DatePart::Literal(_)))
        .collect();
    for (pos, &k) in date_tokens.iter().enumerate() {
        if let DatePart::Month(n) = parts[k] {
            let after_hour = pos > 0 && matches!(parts[date_tokens[pos - 1]], DatePart::Hour(_));
            let before_second = date_tokens
                .get(pos + 1)
                .map_or(false, |&next| matches!(parts[next], DatePart::Second(_)));
            if n <= 2 && (after_hour || before_second) {
                parts[k] = DatePart::Minute(n);
            }
        }
    }
    parts
}

fn render_date(dt: NaiveDateTime, format: &str, locale: &Locale) -> String {
    let parts = tokenize_date(format);
    let twelve_hour = parts.iter().any(|p| matches!(p, DatePart::AmPm | DatePart::AP));
    let fraction_digits = parts
        .iter()
        .find_map(|p| match p {
            DatePart::Fraction(n) => Some(*n),
            _ => None,
        })
        .unwrap_or(0);

    // seconds shown without a fraction are rounded, not truncated
    let dt = if fraction_digits == 0 {
        let millis = dt.nanosecond() / 1_000_000;
        let truncated = dt - Duration::milliseconds(millis as i64);
        if millis >= 500 {
            truncated + Duration::seconds(1)
        } else {
            truncated
        }
    } else {
        dt
    };

    let mut out = String::new();
    for part in &parts {
        match part {
            DatePart::Literal(s) => out.push_str(s),
            DatePart::Year(n) if *n <= 2 => out.push_str(&format!("{:02}", dt.year() % 100)),
            DatePart::Year(_) => out.push_str(&format!("{:04}", dt.year())),
            DatePart::Month(1) => out.push_str(&dt.month().to_string()),
            DatePart::Month(2) => out.push_str(&format!("{:02}", dt.month())),
            DatePart::Month(3) => out.push_str(locale.month_name(dt.month(), true)),
            DatePart::Month(5) => out.push_str(&locale.month_name(dt.month(), false)[..1]),
            DatePart::Month(_) => out.push_str(locale.month_name(dt.month(), false)),
            DatePart::Day(1) => out.push_str(&dt.day().to_string()),
            DatePart::Day(2) => out.push_str(&format!("{:02}", dt.day())),
            DatePart::Day(3) => out.push_str(locale.weekday_name(dt.weekday().num_days_from_monday(), true)),
            DatePart::Day(_) => out.push_str(locale.weekday_name(dt.weekday().num_days_from_monday(), false)),
            DatePart::Hour(n) => {
                let h = if twelve_hour {
                    match dt.hour() % 12 {
                        0 => 12,
                        h => h,
                    }
                } else {
                    dt.hour()
                };
                out.push_str(&pad(h, *n));
            }
            DatePart::Minute(n) => out.push_str(&pad(dt.minute(), *n)),
            DatePart::Second(n) => out.push_str(&pad(dt.second(), *n)),
            DatePart::Fraction(n) => {
                let millis = format!("{:03}", dt.nanosecond() / 1_000_000);
                out.push_str(&format!("{:0<width$}", &millis[..(*n).min(3)], width = *n));
            }
            DatePart::AmPm => out.push_str(if dt.hour() < 12 { "AM" } else { "PM" }),
            DatePart::AP => out.push_str(if dt.hour() < 12 { "A" } else { "P" }),
        }
    }
    out
}

fn pad(n: u32, width: usize) -> String {
    if width >= 2 {
        format!("{:02}", n)
    } else {
        n.to_string()
    }
}
