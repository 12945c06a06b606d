//! Row-restructuring kernels: delimiter splitting and capture-group
//! extraction.
//!
//! Both kernels fan one input storage out into an ordered sequence of output
//! storages (one per column). Output columns compute their own validity:
//! a ragged row is null in the trailing columns it does not reach, and an
//! extraction row is null in every group when the overall match fails.

use rayon::prelude::*;

use crate::enums::error::TextcolError;
use crate::pattern::Pattern;
use crate::structs::string_storage::StringStorage;

/// Splits each row around a literal delimiter.
///
/// `max_splits <= 0` means unlimited. The number of output columns is the
/// maximum part count observed across all rows; split-produced empty strings
/// stay empty strings and are never nulls.
pub fn split_kernel(
    storage: &StringStorage,
    delimiter: &str,
    max_splits: i64,
) -> Result<Vec<StringStorage>, TextcolError> {
    let unlimited = max_splits <= 0;
    let parts: Vec<Option<Vec<&str>>> = (0..storage.len())
        .into_par_iter()
        .map(|i| {
            storage.value(i).map(|s| {
                if unlimited {
                    s.split(delimiter).collect::<Vec<&str>>()
                } else {
                    s.splitn(max_splits as usize + 1, delimiter)
                        .collect::<Vec<&str>>()
                }
            })
        })
        .collect();

    let n_cols = parts
        .iter()
        .filter_map(|p| p.as_ref().map(Vec::len))
        .max()
        .unwrap_or(0);

    let mut columns = Vec::with_capacity(n_cols);
    for col in 0..n_cols {
        let rows: Vec<Option<&str>> = parts
            .iter()
            .map(|p| p.as_ref().and_then(|v| v.get(col).copied()))
            .collect();
        columns.push(StringStorage::from_host(&rows)?);
    }
    Ok(columns)
}

/// Extracts the capturing groups of `pattern` from the first match of each
/// row: one output storage per group.
pub fn extract_kernel(
    storage: &StringStorage,
    pattern: &str,
) -> Result<Vec<StringStorage>, TextcolError> {
    let pat = Pattern::compile(pattern)?;
    let n_groups = pat.group_count();
    if n_groups == 0 {
        return Err(TextcolError::InvalidPattern {
            message: format!("pattern '{}' contains no capture groups", pattern),
        });
    }

    let captured: Vec<Option<Vec<Option<String>>>> = (0..storage.len())
        .into_par_iter()
        .map(|i| storage.value(i).and_then(|s| pat.extract_groups(s)))
        .collect();

    let mut columns = Vec::with_capacity(n_groups);
    for group in 0..n_groups {
        let rows: Vec<Option<&str>> = captured
            .iter()
            .map(|row| {
                row.as_ref()
                    .and_then(|groups| groups[group].as_deref())
            })
            .collect();
        columns.push(StringStorage::from_host(&rows)?);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_empty_parts() {
        let s = StringStorage::from_strs(&["a,b,,c"]).unwrap();
        let cols = split_kernel(&s, ",", -1).unwrap();
        assert_eq!(cols.len(), 4);
        assert_eq!(cols[0].value(0), Some("a"));
        assert_eq!(cols[1].value(0), Some("b"));
        assert_eq!(cols[2].value(0), Some(""));
        assert_eq!(cols[3].value(0), Some("c"));
    }

    #[test]
    fn test_split_ragged_rows_get_trailing_nulls() {
        let s = StringStorage::from_host(&[Some("a,b,c"), Some("x"), None]).unwrap();
        let cols = split_kernel(&s, ",", -1).unwrap();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].to_host(), vec![Some("a".into()), Some("x".into()), None]);
        assert_eq!(cols[1].to_host(), vec![Some("b".into()), None, None]);
        assert_eq!(cols[2].to_host(), vec![Some("c".into()), None, None]);
    }

    #[test]
    fn test_split_bounded() {
        let s = StringStorage::from_strs(&["a-b-c"]).unwrap();
        let cols = split_kernel(&s, "-", 1).unwrap();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].value(0), Some("a"));
        assert_eq!(cols[1].value(0), Some("b-c"));
    }

    #[test]
    fn test_split_all_null_input() {
        let s = StringStorage::all_null(2).unwrap();
        let cols = split_kernel(&s, ",", -1).unwrap();
        assert!(cols.is_empty());
    }

    #[test]
    fn test_extract_groups_per_column() {
        let s = StringStorage::from_host(&[Some("a1"), Some("b2"), Some("zz"), None]).unwrap();
        let cols = extract_kernel(&s, r"([ab])(\d)").unwrap();
        assert_eq!(cols.len(), 2);
        assert_eq!(
            cols[0].to_host(),
            vec![Some("a".into()), Some("b".into()), None, None]
        );
        assert_eq!(
            cols[1].to_host(),
            vec![Some("1".into()), Some("2".into()), None, None]
        );
    }

    #[test]
    fn test_extract_requires_groups() {
        let s = StringStorage::from_strs(&["a"]).unwrap();
        assert!(matches!(
            extract_kernel(&s, "a"),
            Err(TextcolError::InvalidPattern { .. })
        ));
    }
}
