//! # **DeviceBuffer** — *Reference-counted fixed-size device storage*
//!
//! DeviceBuffer backs every column in *Textcol* (`StringStorage`,
//! `PrimitiveColumn`, `Bitmask`).
//!
//! # Design
//! The device memory model is fixed-stride: a buffer is a contiguous,
//! 256-byte aligned region of a known byte size that never grows, shrinks,
//! or reallocates. Ownership is reference-counted; dropping the last owner
//! releases the region back to the allocator. Two independently allocated
//! buffers never alias.
//!
//! ## Purpose
//! - Provide the unit of ownership for all raw column storage.
//! - Route every allocation through the pluggable [`DeviceAllocator`] seam,
//!   so exhaustion surfaces as `AllocationFailure` at the triggering
//!   operation and test harnesses can install failing allocators.
//! - Offer zero-copy typed read views (`as_slice`) plus one explicit
//!   host-transfer point (`to_host_vec`).
//!
//! ## Behaviour
//! - [`DeviceBufferMut`] is the exclusive, writable stage a kernel fills
//!   before `freeze()`-ing into an immutable, shareable [`DeviceBuffer`].
//! - Frozen buffers are read-only; concurrent readers never race.
//! - Cloning a `DeviceBuffer` bumps the reference count; it never copies.

use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::fmt;
use std::ptr::NonNull;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::enums::error::TextcolError;
use crate::traits::type_unions::DeviceValue;

/// Alignment of every device allocation, in bytes.
///
/// Matches the base alignment device allocators hand out, so any
/// fixed-width element type can view the region without adjustment.
pub const DEVICE_ALIGN: usize = 256;

/// A raw allocation handed out by a [`DeviceAllocator`].
///
/// Owns the region and releases it on drop. Zero-byte regions hold a
/// well-aligned dangling pointer and never touch the allocator.
pub struct DeviceRegion {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl DeviceRegion {
    /// A zero-byte region.
    #[inline]
    pub fn empty() -> Self {
        // Aligned dangling pointer; valid for zero-length views only.
        let ptr = unsafe { NonNull::new_unchecked(DEVICE_ALIGN as *mut u8) };
        DeviceRegion {
            ptr,
            layout: Layout::from_size_align(0, DEVICE_ALIGN).expect("zero layout"),
        }
    }

    /// Wraps an allocation made elsewhere.
    ///
    /// # Safety
    /// `ptr` must point to a live allocation of exactly `layout`, which this
    /// region takes ownership of and will `dealloc` on drop.
    #[inline]
    pub unsafe fn from_raw(ptr: NonNull<u8>, layout: Layout) -> Self {
        DeviceRegion { ptr, layout }
    }

    /// Size of the region in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.layout.size()
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

impl Drop for DeviceRegion {
    fn drop(&mut self) {
        if self.layout.size() > 0 {
            unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
        }
    }
}

// SAFETY: the region is uniquely owned until frozen behind an Arc, after
// which access is read-only.
unsafe impl Send for DeviceRegion {}
unsafe impl Sync for DeviceRegion {}

/// The allocation seam every output buffer goes through.
///
/// The provider behind it (a real accelerator heap, a pool, a test stub) is
/// an external concern; this crate only requires that exhaustion comes back
/// as an error rather than a panic.
pub trait DeviceAllocator: Send + Sync {
    /// Allocates a zero-initialised region of `bytes` bytes, aligned to
    /// [`DEVICE_ALIGN`].
    fn allocate(&self, bytes: usize) -> Result<DeviceRegion, TextcolError>;
}

/// Default allocator: the process heap standing in for the device heap,
/// with device-style alignment and zero-initialisation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDevice;

impl DeviceAllocator for SystemDevice {
    fn allocate(&self, bytes: usize) -> Result<DeviceRegion, TextcolError> {
        if bytes == 0 {
            return Ok(DeviceRegion::empty());
        }
        let layout = Layout::from_size_align(bytes, DEVICE_ALIGN)
            .map_err(|_| TextcolError::AllocationFailure { bytes })?;
        let ptr = unsafe { alloc_zeroed(layout) };
        match NonNull::new(ptr) {
            Some(ptr) => Ok(unsafe { DeviceRegion::from_raw(ptr, layout) }),
            None => Err(TextcolError::AllocationFailure { bytes }),
        }
    }
}

static DEVICE_ALLOCATOR: OnceLock<RwLock<Arc<dyn DeviceAllocator>>> = OnceLock::new();

fn allocator_cell() -> &'static RwLock<Arc<dyn DeviceAllocator>> {
    DEVICE_ALLOCATOR.get_or_init(|| RwLock::new(Arc::new(SystemDevice)))
}

fn read_cell() -> RwLockReadGuard<'static, Arc<dyn DeviceAllocator>> {
    match allocator_cell().read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_cell() -> RwLockWriteGuard<'static, Arc<dyn DeviceAllocator>> {
    match allocator_cell().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Returns the process-wide device allocator.
pub fn device_allocator() -> Arc<dyn DeviceAllocator> {
    read_cell().clone()
}

/// Installs a new process-wide device allocator. Buffers already allocated
/// keep their regions; only future allocations are affected.
pub fn set_device_allocator(allocator: Arc<dyn DeviceAllocator>) {
    *write_cell() = allocator;
}

/// # DeviceBufferMut
///
/// Exclusive, writable staging buffer.
///
/// A kernel allocates one, fills it through a typed mutable view, then
/// `freeze()`s it into an immutable [`DeviceBuffer`]. The region is
/// zero-initialised at allocation, so partially written buffers are still
/// well-defined.
pub struct DeviceBufferMut {
    region: DeviceRegion,
    bytes: usize,
}

impl DeviceBufferMut {
    /// Allocates `bytes` zeroed bytes through the process-wide allocator.
    pub fn allocate(bytes: usize) -> Result<Self, TextcolError> {
        let region = device_allocator().allocate(bytes)?;
        assert!(
            region.byte_len() >= bytes,
            "allocator returned {} bytes for a {} byte request",
            region.byte_len(),
            bytes
        );
        Ok(DeviceBufferMut { region, bytes })
    }

    /// Logical size in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes
    }

    /// Mutable typed view over the whole buffer.
    ///
    /// # Panics
    /// Panics if the byte size is not a multiple of `size_of::<T>()`.
    #[inline]
    pub fn as_mut_slice<T: DeviceValue>(&mut self) -> &mut [T] {
        assert_eq!(
            self.bytes % size_of::<T>(),
            0,
            "byte size {} is not a whole number of {} elements",
            self.bytes,
            std::any::type_name::<T>()
        );
        unsafe {
            std::slice::from_raw_parts_mut(
                self.region.as_ptr() as *mut T,
                self.bytes / size_of::<T>(),
            )
        }
    }

    /// Copies `src` into the front of the buffer.
    #[inline]
    pub fn copy_from_slice<T: DeviceValue>(&mut self, src: &[T]) {
        self.as_mut_slice::<T>()[..src.len()].copy_from_slice(src);
    }

    /// Seals the buffer; it becomes immutable and shareable.
    #[inline]
    pub fn freeze(self) -> DeviceBuffer {
        DeviceBuffer {
            region: Arc::new(self.region),
            bytes: self.bytes,
        }
    }
}

/// # DeviceBuffer
///
/// Immutable, reference-counted, fixed-size region of device memory.
///
/// ## Role
/// The unit of ownership for every column's raw storage: string character
/// data, offsets, validity bits, and fixed-stride kernel outputs all live in
/// one of these. Released when the last owner drops it.
///
/// ## Example
/// ```rust
/// use textcol::DeviceBuffer;
///
/// let buf = DeviceBuffer::from_slice(&[1i32, 2, 3]).unwrap();
/// assert_eq!(buf.byte_len(), 12);
/// assert_eq!(buf.as_slice::<i32>(), &[1, 2, 3]);
/// ```
#[derive(Clone)]
pub struct DeviceBuffer {
    region: Arc<DeviceRegion>,
    bytes: usize,
}

impl DeviceBuffer {
    /// A zero-byte buffer. Does not consult the allocator.
    #[inline]
    pub fn empty() -> Self {
        DeviceBuffer {
            region: Arc::new(DeviceRegion::empty()),
            bytes: 0,
        }
    }

    /// Uploads a host slice wholesale into a fresh device region.
    pub fn from_slice<T: DeviceValue>(src: &[T]) -> Result<Self, TextcolError> {
        let bytes = std::mem::size_of_val(src);
        let mut staged = DeviceBufferMut::allocate(bytes)?;
        if !src.is_empty() {
            staged.copy_from_slice(src);
        }
        Ok(staged.freeze())
    }

    /// Size in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes == 0
    }

    /// Number of `T` elements the buffer holds.
    #[inline]
    pub fn typed_len<T: DeviceValue>(&self) -> usize {
        debug_assert_eq!(self.bytes % size_of::<T>(), 0);
        self.bytes / size_of::<T>()
    }

    /// Zero-copy typed read view over the whole buffer.
    ///
    /// # Panics
    /// Panics if the byte size is not a multiple of `size_of::<T>()`.
    #[inline]
    pub fn as_slice<T: DeviceValue>(&self) -> &[T] {
        assert_eq!(
            self.bytes % size_of::<T>(),
            0,
            "byte size {} is not a whole number of {} elements",
            self.bytes,
            std::any::type_name::<T>()
        );
        unsafe {
            std::slice::from_raw_parts(
                self.region.as_ptr() as *const T,
                self.bytes / size_of::<T>(),
            )
        }
    }

    /// Explicit host transfer: copies the buffer contents out of the device
    /// ownership domain.
    #[inline]
    pub fn to_host_vec<T: DeviceValue>(&self) -> Vec<T> {
        self.as_slice::<T>().to_vec()
    }

    /// Deep copy into a freshly allocated region.
    pub fn to_owned_copy(&self) -> Result<Self, TextcolError> {
        Self::from_slice(self.as_slice::<u8>())
    }

    /// Number of live owners of the underlying region.
    #[inline]
    pub fn reference_count(&self) -> usize {
        Arc::strong_count(&self.region)
    }
}

impl PartialEq for DeviceBuffer {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice::<u8>() == other.as_slice::<u8>()
    }
}

impl fmt::Debug for DeviceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceBuffer")
            .field("bytes", &self.bytes)
            .field("owners", &self.reference_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_is_zeroed() {
        let mut staged = DeviceBufferMut::allocate(16).unwrap();
        assert_eq!(staged.as_mut_slice::<u8>(), &[0u8; 16]);
    }

    #[test]
    fn test_write_freeze_read() {
        let mut staged = DeviceBufferMut::allocate(12).unwrap();
        staged.as_mut_slice::<i32>().copy_from_slice(&[7, 8, 9]);
        let buf = staged.freeze();
        assert_eq!(buf.as_slice::<i32>(), &[7, 8, 9]);
        assert_eq!(buf.typed_len::<i32>(), 3);
        assert_eq!(buf.byte_len(), 12);
    }

    #[test]
    fn test_from_slice_roundtrip() {
        let buf = DeviceBuffer::from_slice(&[1.5f64, -2.5]).unwrap();
        assert_eq!(buf.to_host_vec::<f64>(), vec![1.5, -2.5]);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = DeviceBuffer::empty();
        assert!(buf.is_empty());
        assert_eq!(buf.as_slice::<u8>(), &[] as &[u8]);
        assert_eq!(buf.typed_len::<i64>(), 0);
    }

    #[test]
    fn test_alignment() {
        let buf = DeviceBuffer::from_slice(&[1u8, 2, 3]).unwrap();
        assert_eq!(buf.as_slice::<u8>().as_ptr() as usize % DEVICE_ALIGN, 0);
    }

    #[test]
    fn test_reference_counting() {
        let buf = DeviceBuffer::from_slice(&[1i32]).unwrap();
        assert_eq!(buf.reference_count(), 1);
        let shared = buf.clone();
        assert_eq!(buf.reference_count(), 2);
        drop(shared);
        assert_eq!(buf.reference_count(), 1);
    }

    #[test]
    fn test_deep_copy_does_not_alias() {
        let buf = DeviceBuffer::from_slice(&[5u8, 6]).unwrap();
        let copy = buf.to_owned_copy().unwrap();
        assert_eq!(buf, copy);
        assert_eq!(copy.reference_count(), 1);
        assert_ne!(
            buf.as_slice::<u8>().as_ptr(),
            copy.as_slice::<u8>().as_ptr()
        );
    }

    #[test]
    fn test_bool_view() {
        let buf = DeviceBuffer::from_slice(&[true, false, true]).unwrap();
        assert_eq!(buf.as_slice::<bool>(), &[true, false, true]);
    }
}
