//! Canonicalization of store date keys to `YYYY-MM-DD`.
//!
//! Store keys keep the upstream form, e.g. `A.D. 2023-Jan-01 00:00:00.0000 TDB`.
//! Range queries compare the canonical form lexically, which orders
//! chronologically because every field is zero-padded.

use chrono::NaiveDate;
use crate::api::error::EngineError;

const ERA_AD: [&str; 2] = ["A.D.", "AD"];
const ERA_BC: [&str; 2] = ["B.C.", "BC"];

/// Named months (`Jan`, `january`, any case) first, then numeric.
const DATE_FORMATS: [&str; 2] = ["%Y-%B-%d", "%Y-%m-%d"];

/// Convert a store date key (or an already canonical date) to `YYYY-MM-DD`.
///
/// Accepts an optional `A.D.` era prefix, a numeric or named month, and any
/// time/timescale suffix after the date (separated by whitespace or `T`).
/// Dates before the common era are rejected: their lexical order would invert.
/// Calendar validity (month lengths, leap years) is enforced.
pub fn canonical_date(raw: &str) -> Result<String, EngineError> {
    let invalid = || EngineError::InvalidDate(raw.to_string());

    let mut rest = raw.trim();
    if ERA_BC.iter().any(|era| rest.starts_with(era)) {
        return Err(invalid());
    }
    if let Some(era) = ERA_AD.iter().find(|era| rest.starts_with(*era)) {
        rest = rest[era.len()..].trim_start();
    }

    let token = rest.split_whitespace().next().ok_or_else(invalid)?;

    // Exactly four plain digits; chrono would also take short or signed years.
    let year = token.split('-').next().unwrap_or("");
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| parse_date(token, fmt))
        .ok_or_else(invalid)?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Parse the leading date; anything after it must be a `T` time suffix.
fn parse_date(token: &str, fmt: &str) -> Option<NaiveDate> {
    let (date, tail) = NaiveDate::parse_and_remainder(token, fmt).ok()?;
    (tail.is_empty() || tail.starts_with('T')).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizons_key() {
        assert_eq!(
            canonical_date("A.D. 2023-Jan-01 00:00:00.0000 TDB").unwrap(),
            "2023-01-01"
        );
        assert_eq!(
            canonical_date("  A.D. 2024-Dec-31 12:00:00.0000 TDB ").unwrap(),
            "2024-12-31"
        );
    }

    #[test]
    fn every_month_name() {
        let names = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        for (i, name) in names.iter().enumerate() {
            let key = format!("A.D. 2020-{name}-15 00:00:00.0000 TDB");
            assert_eq!(canonical_date(&key).unwrap(), format!("2020-{:02}-15", i + 1));
        }
    }

    #[test]
    fn pads_single_digits() {
        assert_eq!(canonical_date("2023-6-1").unwrap(), "2023-06-01");
        assert_eq!(canonical_date("A.D. 2023-Sep-5").unwrap(), "2023-09-05");
    }

    #[test]
    fn canonical_input_is_unchanged() {
        assert_eq!(canonical_date("2023-06-01").unwrap(), "2023-06-01");
        assert_eq!(canonical_date("2023-06-01T08:30:00").unwrap(), "2023-06-01");
        assert_eq!(canonical_date("AD 2023-06-01").unwrap(), "2023-06-01");
    }

    #[test]
    fn full_and_lowercase_month_names() {
        assert_eq!(canonical_date("2023-january-02").unwrap(), "2023-01-02");
        assert_eq!(canonical_date("2023-MAR-02").unwrap(), "2023-03-02");
    }

    #[test]
    fn leap_days() {
        assert_eq!(canonical_date("A.D. 2024-Feb-29 00:00:00.0000 TDB").unwrap(), "2024-02-29");
        assert_eq!(canonical_date("2000-02-29").unwrap(), "2000-02-29");
        assert!(canonical_date("1900-Feb-29").is_err());
    }

    #[test]
    fn canonical_order_is_chronological() {
        let apr = canonical_date("A.D. 2023-Apr-01 00:00:00.0000 TDB").unwrap();
        let jan = canonical_date("A.D. 2023-Jan-01 00:00:00.0000 TDB").unwrap();
        // Raw keys sort "Apr" before "Jan"; canonical keys do not.
        assert!(jan < apr);
    }

    #[test]
    fn rejects_garbage() {
        for raw in [
            "",
            "Date",
            "2023-Foo-01",
            "2023-13-01",
            "2023-01-32",
            "23-01-01",
            "+2023-01-01",
            "12023-01-01",
            "2023-01",
            "2023-01-01x",
            "2023-01-011",
            "B.C. 0500-Jan-01",
            "A.D. 2023-Feb-31 00:00:00.0000 TDB",
            "2023-02-30",
            "2023-Apr-31",
            "2023-Janxyz-01",
            "2023-02-29",
        ] {
            assert!(canonical_date(raw).is_err(), "accepted {raw:?}");
        }
    }
}
