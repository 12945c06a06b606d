//! Row-wise transformation kernels: replace, case mapping, concatenation,
//! null filling, and index gathering.
//!
//! Every kernel produces a fresh storage; the input is never touched. Rows
//! are processed independently in parallel, then packed into new device
//! buffers in one pass.

use memchr::memmem;
use rayon::prelude::*;

use crate::enums::error::TextcolError;
use crate::pattern::Pattern;
use crate::structs::string_storage::StringStorage;

/// Replaces up to `max_count` leftmost, non-overlapping occurrences per row.
///
/// `max_count <= 0` means unlimited (`0` is accepted as "all" to match the
/// upstream engines). A replaced span is never rescanned; once the budget is
/// spent the remainder of the row is copied verbatim.
pub fn replace_kernel(
    storage: &StringStorage,
    pattern: &str,
    replacement: &str,
    max_count: i64,
    is_regex: bool,
) -> Result<StringStorage, TextcolError> {
    let rows: Vec<Option<String>> = if is_regex {
        let pat = Pattern::compile(pattern)?;
        // Pattern::replacen treats 0 as "replace all"
        let limit = if max_count <= 0 { 0 } else { max_count as usize };
        (0..storage.len())
            .into_par_iter()
            .map(|i| storage.value(i).map(|s| pat.replacen(s, limit, replacement)))
            .collect()
    } else {
        let limit = if max_count <= 0 {
            usize::MAX
        } else {
            max_count as usize
        };
        let finder = memmem::Finder::new(pattern.as_bytes());
        (0..storage.len())
            .into_par_iter()
            .map(|i| {
                storage
                    .value(i)
                    .map(|s| replace_literal_row(s, pattern.len(), &finder, replacement, limit))
            })
            .collect()
    };
    StringStorage::from_host(&rows)
}

/// Leftmost, non-overlapping literal replacement within one row.
fn replace_literal_row(
    row: &str,
    pattern_len: usize,
    finder: &memmem::Finder,
    replacement: &str,
    limit: usize,
) -> String {
    // the empty literal matches nothing
    if pattern_len == 0 {
        return row.to_string();
    }
    let mut out = String::with_capacity(row.len());
    let mut rest = row;
    let mut done = 0usize;
    while done < limit {
        match finder.find(rest.as_bytes()) {
            Some(pos) => {
                out.push_str(&rest[..pos]);
                out.push_str(replacement);
                rest = &rest[pos + pattern_len..];
                done += 1;
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Simple (ASCII) case mapping; non-locale-aware.
pub fn case_kernel(storage: &StringStorage, to_upper: bool) -> Result<StringStorage, TextcolError> {
    let rows: Vec<Option<String>> = (0..storage.len())
        .into_par_iter()
        .map(|i| {
            storage.value(i).map(|s| {
                if to_upper {
                    s.to_ascii_uppercase()
                } else {
                    s.to_ascii_lowercase()
                }
            })
        })
        .collect();
    StringStorage::from_host(&rows)
}

/// Element-wise concatenation of two equal-length storages.
///
/// A null operand nulls the result row unless `na_rep` substitutes for it.
pub fn cat_kernel(
    lhs: &StringStorage,
    rhs: &StringStorage,
    sep: &str,
    na_rep: Option<&str>,
) -> Result<StringStorage, TextcolError> {
    if lhs.len() != rhs.len() {
        return Err(TextcolError::LengthMismatch {
            expected: lhs.len(),
            found: rhs.len(),
        });
    }
    let rows: Vec<Option<String>> = (0..lhs.len())
        .into_par_iter()
        .map(|i| {
            let l = lhs.value(i).or(na_rep);
            let r = rhs.value(i).or(na_rep);
            match (l, r) {
                (Some(l), Some(r)) => {
                    let mut s = String::with_capacity(l.len() + sep.len() + r.len());
                    s.push_str(l);
                    s.push_str(sep);
                    s.push_str(r);
                    Some(s)
                }
                _ => None,
            }
        })
        .collect();
    StringStorage::from_host(&rows)
}

/// Joins all rows into one host string; null rows are omitted unless
/// `na_rep` substitutes for them.
pub fn join_rows(storage: &StringStorage, sep: &str, na_rep: Option<&str>) -> String {
    let mut out = String::new();
    let mut first = true;
    for i in 0..storage.len() {
        let piece = match storage.value(i) {
            Some(s) => Some(s),
            None => na_rep,
        };
        if let Some(piece) = piece {
            if !first {
                out.push_str(sep);
            }
            out.push_str(piece);
            first = false;
        }
    }
    out
}

/// Replaces every null row with the scalar `value`.
pub fn fillna_scalar(storage: &StringStorage, value: &str) -> Result<StringStorage, TextcolError> {
    let rows: Vec<Option<&str>> = (0..storage.len())
        .into_par_iter()
        .map(|i| Some(storage.value(i).unwrap_or(value)))
        .collect();
    StringStorage::from_host(&rows)
}

/// Replaces every null row with the corresponding row of `other`, which must
/// be at least as long as `storage`.
pub fn fillna_column(
    storage: &StringStorage,
    other: &StringStorage,
) -> Result<StringStorage, TextcolError> {
    if other.len() < storage.len() {
        return Err(TextcolError::LengthMismatch {
            expected: storage.len(),
            found: other.len(),
        });
    }
    let rows: Vec<Option<&str>> = (0..storage.len())
        .into_par_iter()
        .map(|i| storage.value(i).or_else(|| other.value(i)))
        .collect();
    StringStorage::from_host(&rows)
}

/// Gathers rows by index into a new storage.
///
/// # Panics
/// Panics on a negative or out-of-range index; callers produce indices from
/// `order`, so anything else is a bug.
pub fn gather_kernel(
    storage: &StringStorage,
    indices: &[i32],
) -> Result<StringStorage, TextcolError> {
    let rows: Vec<Option<&str>> = indices
        .par_iter()
        .map(|&idx| {
            assert!(idx >= 0, "gather index must be non-negative");
            storage.value(idx as usize)
        })
        .collect();
    StringStorage::from_host(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_literal_unlimited() {
        let s = StringStorage::from_host(&[Some("aaa"), None, Some("b")]).unwrap();
        let out = replace_kernel(&s, "a", "x", -1, false).unwrap();
        assert_eq!(
            out.to_host(),
            vec![Some("xxx".into()), None, Some("b".into())]
        );
    }

    #[test]
    fn test_replace_literal_bounded_non_overlapping() {
        let s = StringStorage::from_strs(&["aaaa"]).unwrap();
        let out = replace_kernel(&s, "aa", "b", 1, false).unwrap();
        assert_eq!(out.value(0), Some("baa"));
    }

    #[test]
    fn test_replace_zero_means_all() {
        let s = StringStorage::from_strs(&["aa"]).unwrap();
        let out = replace_kernel(&s, "a", "b", 0, false).unwrap();
        assert_eq!(out.value(0), Some("bb"));
    }

    #[test]
    fn test_replace_regex() {
        let s = StringStorage::from_strs(&["a1b22c"]).unwrap();
        let out = replace_kernel(&s, r"\d+", "_", -1, true).unwrap();
        assert_eq!(out.value(0), Some("a_b_c"));
    }

    #[test]
    fn test_case_kernels() {
        let s = StringStorage::from_host(&[Some("MiXeD"), None]).unwrap();
        assert_eq!(case_kernel(&s, false).unwrap().value(0), Some("mixed"));
        assert_eq!(case_kernel(&s, true).unwrap().value(0), Some("MIXED"));
        assert!(case_kernel(&s, false).unwrap().is_null(1));
    }

    #[test]
    fn test_cat_null_propagation_and_na_rep() {
        let lhs = StringStorage::from_host(&[Some("a"), None]).unwrap();
        let rhs = StringStorage::from_host(&[None, Some("b")]).unwrap();

        let strict = cat_kernel(&lhs, &rhs, "-", None).unwrap();
        assert_eq!(strict.to_host(), vec![None, None]);

        let subbed = cat_kernel(&lhs, &rhs, "-", Some("X")).unwrap();
        assert_eq!(
            subbed.to_host(),
            vec![Some("a-X".into()), Some("X-b".into())]
        );
    }

    #[test]
    fn test_cat_length_mismatch() {
        let lhs = StringStorage::from_strs(&["a"]).unwrap();
        let rhs = StringStorage::from_strs(&["a", "b"]).unwrap();
        assert!(matches!(
            cat_kernel(&lhs, &rhs, "", None),
            Err(TextcolError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_join_rows_omits_nulls() {
        let s = StringStorage::from_host(&[Some("a"), None, Some("c")]).unwrap();
        assert_eq!(join_rows(&s, ",", None), "a,c");
        assert_eq!(join_rows(&s, ",", Some("?")), "a,?,c");
    }

    #[test]
    fn test_fillna_scalar() {
        let s = StringStorage::from_host(&[Some("x"), None]).unwrap();
        let out = fillna_scalar(&s, "y").unwrap();
        assert_eq!(out.to_host(), vec![Some("x".into()), Some("y".into())]);
        assert_eq!(out.null_count(), 0);
    }

    #[test]
    fn test_fillna_column() {
        let s = StringStorage::from_host(&[None, Some("b"), None]).unwrap();
        let fill = StringStorage::from_strs(&["1", "2", "3"]).unwrap();
        let out = fillna_column(&s, &fill).unwrap();
        assert_eq!(
            out.to_host(),
            vec![Some("1".into()), Some("b".into()), Some("3".into())]
        );
    }

    #[test]
    fn test_gather() {
        let s = StringStorage::from_host(&[Some("a"), None, Some("c")]).unwrap();
        let out = gather_kernel(&s, &[2, 0, 1]).unwrap();
        assert_eq!(
            out.to_host(),
            vec![Some("c".into()), Some("a".into()), None]
        );
    }
}
