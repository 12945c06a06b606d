//! Row-wise search kernels: byte length and substring / pattern containment.
//!
//! Each kernel runs as a one-shot data-parallel pass over rows and writes a
//! fresh fixed-stride device array. Null rows produce the slot default; the
//! column layer re-applies the validity mask.

use memchr::memmem;
use rayon::prelude::*;

use crate::enums::error::TextcolError;
use crate::pattern::Pattern;
use crate::structs::device_buffer::DeviceBuffer;
use crate::structs::string_storage::StringStorage;

/// Per-row byte length into an `i32` device array.
pub fn length_kernel(storage: &StringStorage) -> Result<DeviceBuffer, TextcolError> {
    let offsets = storage.offsets();
    let lengths: Vec<i32> = (0..storage.len())
        .into_par_iter()
        .map(|i| offsets[i + 1] - offsets[i])
        .collect();
    DeviceBuffer::from_slice(&lengths)
}

/// Per-row literal substring containment into a `bool` device array.
///
/// The empty needle matches every non-null row, including empty strings.
pub fn contains_literal(
    storage: &StringStorage,
    needle: &str,
) -> Result<DeviceBuffer, TextcolError> {
    let finder = memmem::Finder::new(needle.as_bytes());
    let hits: Vec<bool> = (0..storage.len())
        .into_par_iter()
        .map(|i| match storage.value(i) {
            Some(s) => finder.find(s.as_bytes()).is_some(),
            None => false,
        })
        .collect();
    DeviceBuffer::from_slice(&hits)
}

/// Per-row regex containment into a `bool` device array.
pub fn contains_pattern(
    storage: &StringStorage,
    pattern: &str,
) -> Result<DeviceBuffer, TextcolError> {
    let pat = Pattern::compile(pattern)?;
    let hits: Vec<bool> = (0..storage.len())
        .into_par_iter()
        .map(|i| match storage.value(i) {
            Some(s) => pat.is_match(s),
            None => false,
        })
        .collect();
    DeviceBuffer::from_slice(&hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_kernel() {
        let s = StringStorage::from_host(&[Some("abc"), None, Some("")]).unwrap();
        let out = length_kernel(&s).unwrap();
        assert_eq!(out.as_slice::<i32>(), &[3, 0, 0]);
    }

    #[test]
    fn test_contains_literal() {
        let s = StringStorage::from_host(&[Some("haystack"), Some("hay"), None]).unwrap();
        let out = contains_literal(&s, "stack").unwrap();
        assert_eq!(out.as_slice::<bool>(), &[true, false, false]);
    }

    #[test]
    fn test_contains_empty_needle_matches_empty_rows() {
        let s = StringStorage::from_strs(&["", ""]).unwrap();
        let out = contains_literal(&s, "").unwrap();
        assert_eq!(out.as_slice::<bool>(), &[true, true]);
    }

    #[test]
    fn test_contains_pattern() {
        let s = StringStorage::from_host(&[Some("a1"), Some("bb"), None]).unwrap();
        let out = contains_pattern(&s, r"\d").unwrap();
        assert_eq!(out.as_slice::<bool>(), &[true, false, false]);
    }

    #[test]
    fn test_contains_pattern_bad_regex() {
        let s = StringStorage::from_strs(&["a"]).unwrap();
        assert!(matches!(
            contains_pattern(&s, "("),
            Err(TextcolError::InvalidPattern { .. })
        ));
    }
}
