//! Adopt-and-release wrapper for native-owned buffers.

use std::ffi::CStr;
use std::fmt;
use std::os::raw::c_char;
use std::ptr::NonNull;

use super::types::NativeApi;
use crate::error::SdkError;

/// Owns a native-allocated C string from the moment a call returns until
/// it is released.
///
/// Release happens exactly once, in `Drop`, on every exit path, including
/// when the copy out of the buffer fails. Both operations share this one
/// wrapper instead of freeing at each call site.
pub struct NativeBuf<'lib> {
    ptr: NonNull<c_char>,
    api: &'lib dyn NativeApi,
}

impl<'lib> NativeBuf<'lib> {
    /// Adopt `ptr` if the native side populated it. A null slot was never
    /// populated and stays unowned.
    pub(crate) fn adopt(api: &'lib dyn NativeApi, ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr, api })
    }

    /// Copy the buffer's contents into an owned `String`.
    ///
    /// The copy happens before release; the buffer is released when `self`
    /// drops whether or not the copy succeeded.
    pub fn into_string(self) -> Result<String, SdkError> {
        // Safety: the pointer is non-null and the native side hands out
        // NUL-terminated strings through the output slots.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
            .to_str()
            .map(str::to_owned)
            .map_err(|e| SdkError::Internal(format!("native buffer is not valid UTF-8: {}", e)))
    }
}

impl fmt::Debug for NativeBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBuf").field("ptr", &self.ptr).finish()
    }
}

impl Drop for NativeBuf<'_> {
    fn drop(&mut self) {
        // Safety: adopt() took sole ownership; this is the single release.
        unsafe { self.api.release(self.ptr.as_ptr()) };
    }
}
