//! Ordering kernel: the permutation that sorts rows lexicographically by
//! raw bytes.
//!
//! Nulls never participate in the byte comparison; they are routed to the
//! position `nulls_first` dictates regardless of sort direction. Ties keep
//! their original relative order (the sort is stable), so the permutation is
//! deterministic.

use rayon::prelude::*;

use crate::enums::error::TextcolError;
use crate::structs::device_buffer::DeviceBuffer;
use crate::structs::string_storage::StringStorage;

/// Produces an `i32` permutation of row indices.
pub fn order_kernel(
    storage: &StringStorage,
    ascending: bool,
    nulls_first: bool,
) -> Result<DeviceBuffer, TextcolError> {
    let mut valid: Vec<i32> = Vec::with_capacity(storage.len() - storage.null_count());
    let mut nulls: Vec<i32> = Vec::with_capacity(storage.null_count());
    for i in 0..storage.len() {
        if storage.is_null(i) {
            nulls.push(i as i32);
        } else {
            valid.push(i as i32);
        }
    }

    valid.par_sort_by(|&a, &b| {
        let ord = storage
            .value_bytes(a as usize)
            .cmp(storage.value_bytes(b as usize));
        if ascending { ord } else { ord.reverse() }
    });

    let mut perm = Vec::with_capacity(storage.len());
    if nulls_first {
        perm.extend_from_slice(&nulls);
        perm.extend_from_slice(&valid);
    } else {
        perm.extend_from_slice(&valid);
        perm.extend_from_slice(&nulls);
    }
    DeviceBuffer::from_slice(&perm)
}
