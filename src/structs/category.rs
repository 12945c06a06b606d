//! # **Category Module** - *Dictionary-Encoded View of a String Column*
//!
//! A Category is the derived cache that accelerates uniqueness, grouping,
//! and dictionary-style workloads: a deduplicated table of unique string
//! values plus one `i32` code per row referencing that table.
//!
//! ## Behaviour
//! - Keys are interned in **first-seen order**, which makes `unique()`
//!   deterministic and stable across runs.
//! - Null rows take the zero code sentinel and do not participate in the
//!   dictionary; the owning column's mask is the only truth for nullness.
//! - A Category is rebuilt from scratch for a new column, never updated
//!   incrementally; the owning column memoizes it behind a
//!   computed-or-absent cell.

#[cfg(feature = "fast_hash")]
use ahash::AHashMap as DictMap;
#[cfg(not(feature = "fast_hash"))]
use std::collections::HashMap as DictMap;

use crate::enums::error::TextcolError;
use crate::structs::device_buffer::DeviceBuffer;
use crate::structs::string_storage::StringStorage;

/// # Category
///
/// Unique-value table plus per-row codes.
///
/// ## Example
/// ```rust
/// use textcol::{Category, StringStorage};
///
/// let s = StringStorage::from_host(&[Some("b"), Some("a"), Some("b"), None]).unwrap();
/// let cat = Category::build(&s).unwrap();
/// assert_eq!(cat.num_keys(), 2);
/// assert_eq!(cat.keys().value(0), Some("b")); // first-seen order
/// assert_eq!(cat.codes(), &[0, 1, 0, 0]);     // null row holds the sentinel
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    /// Dictionary of unique values, first-seen order, no nulls.
    keys: StringStorage,
    /// Per-row `i32` code into `keys`; zero sentinel for null rows.
    codes: DeviceBuffer,
}

impl Category {
    /// Interns the unique values of `storage` and encodes every row.
    pub fn build(storage: &StringStorage) -> Result<Self, TextcolError> {
        let mut dict: DictMap<&str, i32> = DictMap::default();
        let mut uniques: Vec<&str> = Vec::new();
        let mut codes: Vec<i32> = Vec::with_capacity(storage.len());

        for i in 0..storage.len() {
            match storage.value(i) {
                // nulls get the sentinel code and do not enter the dictionary
                None => codes.push(0),
                Some(s) => {
                    if let Some(&code) = dict.get(s) {
                        codes.push(code);
                    } else {
                        let code = i32::try_from(uniques.len()).map_err(|_| {
                            TextcolError::Overflow {
                                value: uniques.len().to_string(),
                                target: "i32",
                            }
                        })?;
                        uniques.push(s);
                        dict.insert(s, code);
                        codes.push(code);
                    }
                }
            }
        }

        Ok(Category {
            keys: StringStorage::from_strs(&uniques)?,
            codes: DeviceBuffer::from_slice(&codes)?,
        })
    }

    /// The dictionary of distinct values, first-seen order.
    #[inline]
    pub fn keys(&self) -> &StringStorage {
        &self.keys
    }

    /// Per-row codes into the dictionary. Undefined (sentinel) for rows the
    /// owning column's mask marks null.
    #[inline]
    pub fn codes(&self) -> &[i32] {
        self.codes.as_slice::<i32>()
    }

    /// The backing code buffer.
    #[inline]
    pub fn codes_buffer(&self) -> &DeviceBuffer {
        &self.codes
    }

    /// Number of distinct non-null values.
    #[inline]
    pub fn num_keys(&self) -> usize {
        self.keys.len()
    }
}
