//! Number format types

/// Number format for cell display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format string
    Custom(String),
}

impl NumberFormat {
    /// 14 - mm-dd-yy
    pub const ID_DATE_SHORT: u32 = 14;
    /// 21 - h:mm:ss
    pub const ID_TIME_24H_SEC: u32 = 21;
    /// 22 - m/d/yy h:mm
    pub const ID_DATETIME: u32 = 22;
    /// 49 - @
    pub const ID_TEXT: u32 = 49;

    /// Create a number format from a format string
    ///
    /// `"General"` and empty strings map to [`NumberFormat::General`].
    pub fn from_string<S: Into<String>>(format: S) -> Self {
        let format = format.into();
        if format.is_empty() || format.eq_ignore_ascii_case("general") {
            NumberFormat::General
        } else {
            NumberFormat::Custom(format)
        }
    }

    /// Get the format string
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => Self::builtin_format_string(*id),
            NumberFormat::Custom(s) => s,
        }
    }

    fn builtin_format_string(id: u32) -> &'static str {
        match id {
            1 => "0",
            2 => "0.00",
            3 => "#,##0",
            4 => "#,##0.00",
            9 => "0%",
            10 => "0.00%",
            11 => "0.00E+00",
            14 => "mm-dd-yy",
            15 => "d-mmm-yy",
            16 => "d-mmm",
            17 => "mmm-yy",
            18 => "h:mm AM/PM",
            19 => "h:mm:ss AM/PM",
            20 => "h:mm",
            21 => "h:mm:ss",
            22 => "m/d/yy h:mm",
            45 => "mm:ss",
            46 => "[h]:mm:ss",
            47 => "mmss.0",
            49 => "@",
            _ => "General",
        }
    }

    /// Check if this is a date/time format
    ///
    /// Quoted literals, bracketed sections (colors, locales, conditions) and
    /// escaped characters are skipped before looking for date tokens, so a
    /// format such as `"0.00 \"days\""` is not mistaken for a date.
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::General => false,
            NumberFormat::BuiltIn(id) => matches!(id, 14..=22 | 45..=47),
            NumberFormat::Custom(s) => {
                let section = s.split(';').next().unwrap_or("");
                let mut chars = section.chars();
                while let Some(c) = chars.next() {
                    match c {
                        '"' => {
                            for q in chars.by_ref() {
                                if q == '"' {
                                    break;
                                }
                            }
                        }
                        '[' => {
                            let mut inner = String::new();
                            for b in chars.by_ref() {
                                if b == ']' {
                                    break;
                                }
                                inner.push(b);
                            }
                            // elapsed-time sections like [h] or [mm] are date tokens
                            let lower = inner.to_ascii_lowercase();
                            if !lower.is_empty() && lower.chars().all(|c| matches!(c, 'h' | 'm' | 's')) {
                                return true;
                            }
                        }
                        '\\' | '_' | '*' => {
                            chars.next();
                        }
                        'y' | 'Y' | 'm' | 'M' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' => return true,
                        _ => {}
                    }
                }
                false
            }
        }
    }

    /// Check if this is the text format (`@`)
    pub fn is_text_format(&self) -> bool {
        self.format_string() == "@"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_date_ids() {
        assert!(NumberFormat::BuiltIn(14).is_date_format());
        assert!(NumberFormat::BuiltIn(22).is_date_format());
        assert!(NumberFormat::BuiltIn(46).is_date_format());
        assert!(!NumberFormat::BuiltIn(4).is_date_format());
        assert!(!NumberFormat::General.is_date_format());
    }

    #[test]
    fn test_custom_date_detection() {
        assert!(NumberFormat::from_string("yyyy-mm-dd").is_date_format());
        assert!(NumberFormat::from_string("[$-411]ggge\"年\"m\"月\"d\"日\"").is_date_format());
        assert!(NumberFormat::from_string("[h]:mm").is_date_format());
        assert!(!NumberFormat::from_string("#,##0.00").is_date_format());
        assert!(!NumberFormat::from_string("0.0 \"days\"").is_date_format());
        assert!(!NumberFormat::from_string("[Red]0.00").is_date_format());
    }

    #[test]
    fn test_general_and_text() {
        assert_eq!(NumberFormat::from_string("General"), NumberFormat::General);
        assert_eq!(NumberFormat::from_string(""), NumberFormat::General);
        assert!(NumberFormat::BuiltIn(NumberFormat::ID_TEXT).is_text_format());
        assert_eq!(NumberFormat::BuiltIn(3).format_string(), "#,##0");
    }
}
