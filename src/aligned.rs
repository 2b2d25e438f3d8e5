use std::ptr::{self, NonNull};
use std::slice;

use libc::{c_void, posix_memalign};

use crate::error::{BenchError, Result};

/// Alignment O_DIRECT needs for the buffer address, file offset and length.
pub const DIRECT_ALIGN: usize = 4096;

/// Heap block whose address is a multiple of [`DIRECT_ALIGN`].
///
/// Released with `free` on drop.
pub struct AlignedBlock {
    ptr: NonNull<u8>,
    len: usize,
}

impl AlignedBlock {
    /// Allocate `len` zeroed bytes. `len` must be a non-zero multiple of the alignment.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 || len % DIRECT_ALIGN != 0 {
            return Err(BenchError::Misaligned {
                what: "staging block",
                value: len,
                align: DIRECT_ALIGN,
            });
        }

        let mut raw: *mut c_void = ptr::null_mut();
        // SAFETY: `raw` is a valid out-pointer and DIRECT_ALIGN is a power of
        // two multiple of size_of::<*mut c_void>().
        let rc = unsafe { posix_memalign(&mut raw, DIRECT_ALIGN, len) };
        let ptr = match NonNull::new(raw as *mut u8) {
            Some(ptr) if rc == 0 => ptr,
            _ => {
                return Err(BenchError::Alloc {
                    size: len,
                    align: DIRECT_ALIGN,
                });
            }
        };

        // SAFETY: the allocation is `len` bytes long.
        unsafe { ptr::write_bytes(ptr.as_ptr(), 0, len) };
        Ok(Self { ptr, len })
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr covers `len` initialized bytes owned by self.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, and &mut self guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBlock {
    fn drop(&mut self) {
        // SAFETY: ptr came from posix_memalign and is freed exactly once.
        unsafe { libc::free(self.ptr.as_ptr() as *mut c_void) };
    }
}
