//! Cell addresses and sheet-qualified references

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell position (e.g., "A1")
///
/// Rows and columns are 0-based internally; the A1 form is 1-based.
/// Absolute markers (`$`) are accepted when parsing and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based, A=0)
    pub col: u16,
}

impl CellAddress {
    /// Create an address from 0-based indices
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse an A1-style address
    ///
    /// # Examples
    /// ```
    /// use sheetbind_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("$C$12").unwrap();
    /// assert_eq!((addr.row, addr.col), (11, 2));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let body: String = s.chars().filter(|c| *c != '$').collect();
        let split = body
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(body.len());
        let (letters, digits) = body.split_at(split);

        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!("no column letters in '{}'", s)));
        }
        if digits.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        let col = Self::letters_to_column(letters)?;
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!("row number must be >= 1 in '{}'", s)));
        }
        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row - 1, MAX_ROWS - 1));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Convert a column index to letters (0 = A, 26 = AA)
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = Vec::new();
        let mut n = col as u32 + 1;
        while n > 0 {
            n -= 1;
            letters.push((b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        letters.iter().rev().collect()
    }

    /// Convert column letters to an index (A = 0, AA = 26)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!("invalid column letter '{}'", c)));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS as u32 {
                return Err(Error::ColumnOutOfBounds(u16::MAX, MAX_COLS - 1));
            }
        }

        Ok((col - 1) as u16)
    }

    /// Format as an A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }

    /// The address shifted by the given row and column deltas, if still on the grid
    pub fn offset(&self, rows: i64, cols: i64) -> Option<CellAddress> {
        let row = self.row as i64 + rows;
        let col = self.col as i64 + cols;
        if (0..MAX_ROWS as i64).contains(&row) && (0..MAX_COLS as i64).contains(&col) {
            Some(CellAddress::new(row as u32, col as u16))
        } else {
            None
        }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A cell reference that may name its sheet (`Sheet1!A1`, `'My Sheet'!B2`)
///
/// A leading `#` (the in-document hyperlink form) is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReference {
    /// Sheet name, if the reference is qualified
    pub sheet: Option<String>,
    /// Target cell
    pub address: CellAddress,
}

impl SheetReference {
    /// Parse a possibly sheet-qualified reference
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        match s.rfind('!') {
            Some(bang) => {
                let (sheet, cell) = (&s[..bang], &s[bang + 1..]);
                let sheet = match sheet.strip_prefix('\'') {
                    Some(quoted) => quoted
                        .strip_suffix('\'')
                        .ok_or_else(|| Error::InvalidAddress(format!("unterminated quote in '{}'", s)))?
                        .replace("''", "'"),
                    None => sheet.to_string(),
                };
                if sheet.is_empty() {
                    return Err(Error::InvalidAddress(format!("empty sheet name in '{}'", s)));
                }
                Ok(Self {
                    sheet: Some(sheet),
                    address: CellAddress::parse(cell)?,
                })
            }
            None => Ok(Self {
                sheet: None,
                address: CellAddress::parse(s)?,
            }),
        }
    }
}

impl fmt::Display for SheetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sheet {
            Some(sheet) if sheet.chars().any(|c| !c.is_alphanumeric() && c != '_') => {
                write!(f, "'{}'!{}", sheet.replace('\'', "''"), self.address)
            }
            Some(sheet) => write!(f, "{}!{}", sheet, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(25), "Z");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(16383), "XFD");

        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellAddress::letters_to_column("aa").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("XFD").unwrap(), 16383);
        assert!(CellAddress::letters_to_column("XFE").is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::parse("$B$2").unwrap(), CellAddress::new(1, 1));
        assert_eq!(
            CellAddress::parse("XFD1048576").unwrap(),
            CellAddress::new(1_048_575, 16383)
        );

        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("12").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("A1048577").is_err());
        assert!(CellAddress::parse("A1B").is_err());
    }

    #[test]
    fn test_display_and_offset() {
        assert_eq!(CellAddress::new(99, 2).to_string(), "C100");
        assert_eq!(CellAddress::new(0, 0).offset(1, 2), Some(CellAddress::new(1, 2)));
        assert_eq!(CellAddress::new(0, 0).offset(-1, 0), None);
    }

    #[test]
    fn test_sheet_reference() {
        let r = SheetReference::parse("#Sheet1!B3").unwrap();
        assert_eq!(r.sheet.as_deref(), Some("Sheet1"));
        assert_eq!(r.address, CellAddress::new(2, 1));

        let r = SheetReference::parse("'My ''Data'''!A1").unwrap();
        assert_eq!(r.sheet.as_deref(), Some("My 'Data'"));
        assert_eq!(r.to_string(), "'My ''Data'''!A1");

        let r = SheetReference::parse("C5").unwrap();
        assert_eq!(r.sheet, None);

        assert!(SheetReference::parse("!A1").is_err());
        assert!(SheetReference::parse("http://example.com").is_err());
    }
}
