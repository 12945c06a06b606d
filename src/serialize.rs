//! # Serialize Module - *Cross-Process Column Transport*
//!
//! A self-describing header plus three opaque transport frames, enabling a
//! column to be rebuilt in a different process or on a different device
//! without the sender's context.
//!
//! ## Wire format
//! - Header: `{row_count, null_count, type_tag, subheaders[3], frame_count}`;
//!   each subheader carries the frame's element tag and element count.
//! - Frames, in fixed order: `[validity, chars, offsets]`. The validity frame
//!   is always present (all bits set when the column has no mask); the
//!   offsets frame is the native-endian `i32` image.
//!
//! Serialization is the one place state crosses an isolation boundary, so it
//! always copies: frames are host-owned byte vectors, and `deserialize`
//! uploads them into buffers owned by the receiver rather than aliasing the
//! sender's device memory.

use crate::enums::dtype::DType;
use crate::enums::error::TextcolError;
use crate::structs::bitmask::Bitmask;
use crate::structs::device_buffer::DeviceBuffer;
use crate::structs::string_column::StringColumn;
use crate::structs::string_storage::StringStorage;
use crate::utils::packed_byte_len;

/// One opaque transport frame: a host-owned byte image of a device buffer.
pub type Frame = Vec<u8>;

/// Per-frame descriptor: element tag plus element count, enough to rebuild
/// the frame's typed view on the receiving side.
#[derive(Debug, Clone, PartialEq)]
pub struct SubHeader {
    pub elem: &'static str,
    pub len: usize,
}

/// The self-describing column header.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedHeader {
    pub row_count: usize,
    pub null_count: usize,
    pub type_tag: DType,
    pub subheaders: Vec<SubHeader>,
    pub frame_count: usize,
}

impl StringColumn {
    /// Copies the column out of the device ownership domain into a header
    /// plus `[validity, chars, offsets]` frames.
    pub fn serialize(&self) -> Result<(SerializedHeader, Vec<Frame>), TextcolError> {
        let mut validity = vec![0u8; packed_byte_len(self.len())];
        self.storage().set_null_bitmask(&mut validity)?;

        let chars: Frame = self.storage().chars().to_vec();
        let offsets: Frame = self
            .storage()
            .offsets()
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();

        let header = SerializedHeader {
            row_count: self.len(),
            null_count: self.null_count(),
            type_tag: DType::Str,
            subheaders: vec![
                SubHeader {
                    elem: "u8",
                    len: validity.len(),
                },
                SubHeader {
                    elem: "u8",
                    len: chars.len(),
                },
                SubHeader {
                    elem: "i32",
                    len: self.len() + 1,
                },
            ],
            frame_count: 3,
        };
        Ok((header, vec![validity, chars, offsets]))
    }

    /// Rebuilds a column from a header and its three frames, uploading into
    /// buffers the receiver owns. The column name does not travel on the
    /// wire; the caller supplies one.
    pub fn deserialize(
        name: impl Into<String>,
        header: &SerializedHeader,
        frames: &[Frame],
    ) -> Result<StringColumn, TextcolError> {
        if header.frame_count != 3 || frames.len() != 3 {
            return Err(TextcolError::LengthMismatch {
                expected: 3,
                found: frames.len(),
            });
        }
        if header.type_tag != DType::Str {
            return Err(TextcolError::TypeMismatch {
                from: "serialized column",
                to: "str",
                message: Some(format!("unexpected type tag {}", header.type_tag)),
            });
        }

        let offsets_bytes = &frames[2];
        if offsets_bytes.len() != (header.row_count + 1) * size_of::<i32>() {
            return Err(TextcolError::LengthMismatch {
                expected: (header.row_count + 1) * size_of::<i32>(),
                found: offsets_bytes.len(),
            });
        }
        let offsets: Vec<i32> = offsets_bytes
            .chunks_exact(size_of::<i32>())
            .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        let null_mask = if header.null_count > 0 {
            Some(Bitmask::from_bytes(&frames[0], header.row_count)?)
        } else {
            None
        };

        let storage = StringStorage::from_parts(
            DeviceBuffer::from_slice(&offsets)?,
            DeviceBuffer::from_slice(&frames[1])?,
            null_mask,
        );
        Ok(StringColumn::new(name, storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_with_nulls() {
        let col = StringColumn::from_host("c", &[Some("ab"), None, Some("xyz")]).unwrap();
        let (header, frames) = col.serialize().unwrap();
        assert_eq!(header.row_count, 3);
        assert_eq!(header.null_count, 1);
        assert_eq!(header.frame_count, 3);
        assert_eq!(header.subheaders.len(), 3);
        assert_eq!(header.subheaders[2].elem, "i32");
        assert_eq!(header.subheaders[2].len, 4);

        let back = StringColumn::deserialize("c", &header, &frames).unwrap();
        assert_eq!(back.len(), col.len());
        assert_eq!(back.null_count(), col.null_count());
        assert_eq!(back, col);
    }

    #[test]
    fn test_roundtrip_dense_and_all_null() {
        let dense = StringColumn::from_strs("c", &["a", "b"]).unwrap();
        let (header, frames) = dense.serialize().unwrap();
        // validity frame always present, all bits set
        assert_eq!(frames[0], vec![0b0000_0011]);
        let back = StringColumn::deserialize("c", &header, &frames).unwrap();
        assert_eq!(back, dense);
        assert!(back.mask().is_none());

        let nulls = StringColumn::from_host::<&str>("c", &[None, None]).unwrap();
        let (header, frames) = nulls.serialize().unwrap();
        let back = StringColumn::deserialize("c", &header, &frames).unwrap();
        assert_eq!(back, nulls);
        assert_eq!(back.null_count(), 2);
    }

    #[test]
    fn test_frames_are_receiver_owned() {
        let col = StringColumn::from_strs("c", &["abc"]).unwrap();
        let (header, frames) = col.serialize().unwrap();
        let back = StringColumn::deserialize("c", &header, &frames).unwrap();
        assert_ne!(
            back.storage().chars_buffer().as_slice::<u8>().as_ptr(),
            col.storage().chars_buffer().as_slice::<u8>().as_ptr()
        );
    }

    #[test]
    fn test_deserialize_rejects_wrong_frame_count() {
        let col = StringColumn::from_strs("c", &["a"]).unwrap();
        let (header, mut frames) = col.serialize().unwrap();
        frames.pop();
        assert!(matches!(
            StringColumn::deserialize("c", &header, &frames),
            Err(TextcolError::LengthMismatch { .. })
        ));
    }
}
