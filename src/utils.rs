//! # Utilities - *Internal Helper Utilities*
//!
//! A small collection of internal utilities that support validation, bit
//! packing, and timestamp parsing elsewhere within the crate.

use crate::structs::bitmask::Bitmask;

#[inline(always)]
pub fn validate_null_mask_len(data_len: usize, null_mask: &Option<Bitmask>) {
    if let Some(mask) = null_mask {
        assert_eq!(
            mask.len(),
            data_len,
            "Validation Error: Null mask length ({}) does not match data length ({})",
            mask.len(),
            data_len
        );
    }
}

/// Number of bytes needed to pack `bits` validity bits.
#[inline(always)]
pub fn packed_byte_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Parses a string into nanoseconds since the Unix epoch.
/// Returns `Some(i128)` on success, or `None` if the string could not be
/// parsed. `None` surfaces as a `ParseFailure` in the cast kernels.
///
/// Attempts RFC3339, `%Y-%m-%d %H:%M:%S`, and `%Y-%m-%d` formats; a bare
/// integer is taken as epoch seconds.
#[cfg(feature = "datetime")]
pub fn parse_timestamp_nanos(s: &str) -> Option<i128> {
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;
    use time::{Date, OffsetDateTime, PrimitiveDateTime};

    // Empty string is always None/null
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(dt.unix_timestamp_nanos());
    }
    let datetime_format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(s, datetime_format) {
        return Some(dt.assume_utc().unix_timestamp_nanos());
    }
    let date_format = format_description!("[year]-[month]-[day]");
    if let Ok(date) = Date::parse(s, date_format) {
        return Some(date.midnight().assume_utc().unix_timestamp_nanos());
    }

    // Fallback: bare integer, epoch seconds
    if let Ok(secs) = s.parse::<i64>() {
        return Some(secs as i128 * 1_000_000_000);
    }

    None
}

/// Formats epoch nanoseconds as an RFC3339 string.
/// Returns `None` when the value is outside the representable range.
#[cfg(feature = "datetime")]
pub fn format_timestamp_nanos(nanos: i128) -> Option<String> {
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
    dt.format(&Rfc3339).ok()
}
