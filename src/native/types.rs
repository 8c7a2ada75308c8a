//! Native calling convention.
//!
//! Every entry point follows the same shape: argument strings in, two
//! output slots (result buffer, error buffer) out, integer status code
//! back. A negative status means failure with the error slot populated;
//! zero or positive means success with the result slot populated. The
//! status code alone selects the branch.

use std::fmt;
use std::os::raw::{c_char, c_int};
use std::ptr;

use super::buffer::NativeBuf;
use crate::error::SdkError;

/// Exported symbol for the repository listing entry point.
pub const LIST_REPOS_SYMBOL: &str = "depot_list_repos";

/// Exported symbol for the bundle listing entry point.
pub const LIST_BUNDLES_SYMBOL: &str = "depot_list_bundles";

/// `int depot_list_repos(const char *config, char **result, char **err)`
pub type ListReposFn =
    unsafe extern "C" fn(*const c_char, *mut *mut c_char, *mut *mut c_char) -> c_int;

/// `int depot_list_bundles(const char *config, const char *repo, char **result, char **err)`
pub type ListBundlesFn =
    unsafe extern "C" fn(*const c_char, *const c_char, *mut *mut c_char, *mut *mut c_char) -> c_int;

/// Failure iff the status code is negative. Zero and positive codes are
/// both success; nothing beyond the sign is interpreted.
pub fn is_failure(status: c_int) -> bool {
    status < 0
}

/// The two native entry points plus the buffer release routine, behind one
/// trait so the test suite can substitute an instrumented stand-in.
///
/// Implementations must honor the output-slot convention: populate the
/// error slot on failure, the result slot on success, and allocate both so
/// that `release` frees them.
pub trait NativeApi: Send + Sync {
    /// Raw repository listing call. The caller initializes both slots to
    /// null before the call.
    ///
    /// # Safety
    ///
    /// `config` must be a valid NUL-terminated string and both slots must
    /// be valid for writes for the duration of the call.
    unsafe fn list_repos(
        &self,
        config: *const c_char,
        result: *mut *mut c_char,
        err: *mut *mut c_char,
    ) -> c_int;

    /// Raw bundle listing call, same contract as [`NativeApi::list_repos`].
    ///
    /// # Safety
    ///
    /// `config` and `repo` must be valid NUL-terminated strings and both
    /// slots must be valid for writes for the duration of the call.
    unsafe fn list_bundles(
        &self,
        config: *const c_char,
        repo: *const c_char,
        result: *mut *mut c_char,
        err: *mut *mut c_char,
    ) -> c_int;

    /// Release a buffer previously returned through an output slot.
    ///
    /// # Safety
    ///
    /// `buf` must have been populated into an output slot by this
    /// implementation and not released before.
    unsafe fn release(&self, buf: *mut c_char);
}

/// A native call collapsed into a safe tagged result immediately after it
/// returns. Exactly one branch holds the populated, non-null buffer.
pub enum Outcome<'lib> {
    /// Status was zero or positive; holds the result buffer.
    Success(NativeBuf<'lib>),
    /// Status was negative; holds the error buffer.
    Failure(NativeBuf<'lib>),
}

impl fmt::Debug for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(buf) => f.debug_tuple("Success").field(buf).finish(),
            Outcome::Failure(buf) => f.debug_tuple("Failure").field(buf).finish(),
        }
    }
}

/// Run `call` with two null-initialized output slots and collapse the
/// status code plus slots into an [`Outcome`].
///
/// Both slots are adopted before the status is inspected, so a buffer the
/// native side populated on the wrong branch is still released. A call
/// that leaves its own branch's slot null violates the convention and is
/// reported as an internal error.
pub fn capture<'lib, F>(api: &'lib dyn NativeApi, call: F) -> Result<Outcome<'lib>, SdkError>
where
    F: FnOnce(*mut *mut c_char, *mut *mut c_char) -> c_int,
{
    let mut result: *mut c_char = ptr::null_mut();
    let mut err: *mut c_char = ptr::null_mut();
    let status = call(&mut result, &mut err);

    let result = NativeBuf::adopt(api, result);
    let err = NativeBuf::adopt(api, err);

    if is_failure(status) {
        match err {
            Some(buf) => Ok(Outcome::Failure(buf)),
            None => Err(SdkError::Internal(format!(
                "native call failed with status {} but populated no error buffer",
                status
            ))),
        }
    } else {
        match result {
            Some(buf) => Ok(Outcome::Success(buf)),
            None => Err(SdkError::Internal(format!(
                "native call succeeded with status {} but populated no result buffer",
                status
            ))),
        }
    }
}
