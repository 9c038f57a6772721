//! Locales for number and date text

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static LOCALE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{2,3})(?:[_-]([A-Za-z]{2}|[0-9]{3}))?$").expect("Failed to build locale pattern")
});

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const EN_WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const EN_WEEKDAYS_SHORT: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const JA_MONTHS: [&str; 12] = [
    "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
];
const JA_WEEKDAYS: [&str; 7] = [
    "月曜日",
    "火曜日",
    "水曜日",
    "木曜日",
    "金曜日",
    "土曜日",
    "日曜日",
];
const JA_WEEKDAYS_SHORT: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// A `language[_COUNTRY]` locale
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: Option<String>,
}

impl Locale {
    /// Parse `ja`, `ja_JP` or `ja-JP`
    pub fn parse(s: &str) -> Option<Locale> {
        let caps = LOCALE_RE.captures(s.trim())?;
        Some(Locale {
            language: caps.get(1)?.as_str().to_ascii_lowercase(),
            country: caps.get(2).map(|c| c.as_str().to_ascii_uppercase()),
        })
    }

    pub fn en_us() -> Locale {
        Locale {
            language: "en".into(),
            country: Some("US".into()),
        }
    }

    /// The process locale from `LC_ALL` or `LANG`, else `en_US`
    pub fn platform_default() -> Locale {
        ["LC_ALL", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|value| {
                let base = value.split(['.', '@']).next().unwrap_or("");
                if base.is_empty() || base == "C" || base == "POSIX" {
                    None
                } else {
                    Locale::parse(base)
                }
            })
            .unwrap_or_else(Locale::en_us)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn decimal_separator(&self) -> char {
        if self.uses_comma_decimal() {
            ','
        } else {
            '.'
        }
    }

    pub fn grouping_separator(&self) -> char {
        match self.language.as_str() {
            "fr" | "ru" | "sv" | "fi" | "cs" | "pl" => '\u{a0}',
            "de" if self.country.as_deref() == Some("CH") => '\'',
            _ if self.uses_comma_decimal() => '.',
            _ => ',',
        }
    }

    fn uses_comma_decimal(&self) -> bool {
        match self.language.as_str() {
            "de" => self.country.as_deref() != Some("CH"),
            "fr" | "es" | "it" | "pt" | "nl" | "ru" | "sv" | "fi" | "da" | "nb" | "cs" | "pl"
            | "tr" | "id" => true,
            _ => false,
        }
    }

    fn is_japanese(&self) -> bool {
        self.language == "ja"
    }

    /// Month name (`month` is 1-based)
    pub fn month_name(&self, month: u32, abbreviated: bool) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        if self.is_japanese() {
            JA_MONTHS[idx]
        } else if abbreviated {
            EN_MONTHS_SHORT[idx]
        } else {
            EN_MONTHS[idx]
        }
    }

    /// Weekday name, Monday = 0
    pub fn weekday_name(&self, weekday: u32, abbreviated: bool) -> &'static str {
        let idx = (weekday % 7) as usize;
        match (self.is_japanese(), abbreviated) {
            (true, true) => JA_WEEKDAYS_SHORT[idx],
            (true, false) => JA_WEEKDAYS[idx],
            (false, true) => EN_WEEKDAYS_SHORT[idx],
            (false, false) => EN_WEEKDAYS[idx],
        }
    }

    /// Every month spelling accepted when parsing, with its 1-based month
    pub(crate) fn month_candidates(&self) -> Vec<(&'static str, u32)> {
        let mut out = Vec::with_capacity(24);
        for m in 1..=12 {
            out.push((self.month_name(m, false), m));
            out.push((self.month_name(m, true), m));
        }
        // longest first so "June" wins over "Jun"
        out.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        out
    }

    pub(crate) fn weekday_candidates(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = (0..7)
            .flat_map(|d| [self.weekday_name(d, false), self.weekday_name(d, true)])
            .collect();
        out.sort_by(|a, b| b.len().cmp(&a.len()));
        out
    }

    pub fn am_pm(&self) -> [&'static str; 2] {
        if self.is_japanese() {
            ["午前", "午後"]
        } else {
            ["AM", "PM"]
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::platform_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}_{}", self.language, country),
            None => f.write_str(&self.language),
        }
    }
}
