//! Excel serial date conversion
//!
//! Excel stores dates as the number of days since an epoch, with the time of
//! day as the fractional part.
//!
//! - 1900 system: serial 1 is 1900-01-01. Excel treats 1900 as a leap year, so
//!   serial 60 is the non-existent 1900-02-29; it is read as 1900-03-01.
//!   Serial 0 (the fictional 1900-01-00) is read as 1899-12-31, which is also
//!   where time-only values land.
//! - 1904 system: serial 0 is 1904-01-01.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{Error, Result};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

fn epoch_1900() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 31).unwrap_or(NaiveDate::MIN)
}

fn epoch_1904() -> NaiveDate {
    NaiveDate::from_ymd_opt(1904, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn first_real_march_1900() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 3, 1).unwrap_or(NaiveDate::MIN)
}

/// Convert a serial number to a date-time, rounding to the millisecond
///
/// Returns `None` for negative or non-finite serials and for serials past year 9999.
pub fn to_datetime(serial: f64, date_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let total_millis = (serial * MILLIS_PER_DAY).round() as i64;
    let mut days = total_millis.div_euclid(MILLIS_PER_DAY as i64);
    let millis = total_millis.rem_euclid(MILLIS_PER_DAY as i64);

    let epoch = if date_1904 {
        epoch_1904()
    } else {
        // serials after the phantom leap day are one ahead of the calendar
        if days > 60 {
            days -= 1;
        }
        epoch_1900()
    };

    let date = epoch.checked_add_signed(Duration::days(days))?;
    if date > NaiveDate::from_ymd_opt(9999, 12, 31)? {
        return None;
    }
    Some(date.and_time(NaiveTime::MIN) + Duration::milliseconds(millis))
}

/// Convert a date-time to a serial number
pub fn from_datetime(value: NaiveDateTime, date_1904: bool) -> Result<f64> {
    let date = value.date();
    let epoch = if date_1904 { epoch_1904() } else { epoch_1900() };
    if date < epoch {
        return Err(Error::DateOutOfRange(value.to_string()));
    }

    let mut days = (date - epoch).num_days();
    if !date_1904 && date >= first_real_march_1900() {
        days += 1;
    }

    Ok(days as f64 + time_fraction(value.time()))
}

/// The fraction of a day a time-of-day represents (the serial of a time-only value)
pub fn time_fraction(time: NaiveTime) -> f64 {
    let millis = time.num_seconds_from_midnight() as f64 * 1000.0
        + (time.nanosecond() / 1_000_000) as f64;
    millis / MILLIS_PER_DAY
}
