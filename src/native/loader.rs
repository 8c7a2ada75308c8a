//! Shared library loading for the native engine.
//!
//! The engine ships as a C-shared library (for example a cgo `c-shared`
//! build) exporting the entry points declared in [`super::types`]. Both
//! symbols are resolved once at open time; the resulting function pointers
//! stay valid because the mapping is kept alive for the process lifetime.
//!
//! Buffers handed back through the output slots come from the engine's C
//! allocator, so release is `free(3)`.

use std::os::raw::{c_char, c_int};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use super::types::{
    ListBundlesFn, ListReposFn, NativeApi, LIST_BUNDLES_SYMBOL, LIST_REPOS_SYMBOL,
};
use crate::config;
use crate::error::SdkError;

/// The native engine, opened and resolved.
#[derive(Debug)]
pub struct SharedLibrary {
    path: PathBuf,
    list_repos: ListReposFn,
    list_bundles: ListBundlesFn,
    /// Keeps the mapping alive for as long as the resolved pointers are used.
    _library: Library,
}

impl SharedLibrary {
    /// Open the library at `path` and resolve both entry points.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        let path = path.as_ref().to_path_buf();

        // Safety: loading a shared library runs its initializers; the
        // resolved path is trusted the same way the host process trusts
        // any library on its search path.
        let library = unsafe {
            Library::new(&path).map_err(|e| {
                let mut msg = format!("failed to open '{}': {}", path.display(), e);
                if !config::is_explicit_path(&path) {
                    msg.push_str(&format!(
                        " (set {} to the library's location)",
                        config::LIBRARY_ENV
                    ));
                }
                SdkError::Load(msg)
            })?
        };

        let list_repos = resolve::<ListReposFn>(&library, LIST_REPOS_SYMBOL, &path)?;
        let list_bundles = resolve::<ListBundlesFn>(&library, LIST_BUNDLES_SYMBOL, &path)?;

        Ok(Self {
            path,
            list_repos,
            list_bundles,
            _library: library,
        })
    }

    /// Open the library found by the discovery rules in [`config`].
    pub fn open_default() -> Result<Self, SdkError> {
        Self::open(config::resolve_library_path())
    }

    /// The path the library was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Resolve `symbol` as a function pointer of type `T`.
fn resolve<T: Copy>(library: &Library, symbol: &str, path: &Path) -> Result<T, SdkError> {
    // Safety: the signature is fixed by the exported C contract; a
    // mismatched symbol type is undefined behavior the same way it is in C.
    let resolved: Symbol<'_, T> = unsafe {
        library.get(symbol.as_bytes()).map_err(|e| {
            SdkError::Load(format!(
                "symbol '{}' not found in '{}': {}",
                symbol,
                path.display(),
                e
            ))
        })?
    };
    Ok(*resolved)
}

impl NativeApi for SharedLibrary {
    unsafe fn list_repos(
        &self,
        config: *const c_char,
        result: *mut *mut c_char,
        err: *mut *mut c_char,
    ) -> c_int {
        (self.list_repos)(config, result, err)
    }

    unsafe fn list_bundles(
        &self,
        config: *const c_char,
        repo: *const c_char,
        result: *mut *mut c_char,
        err: *mut *mut c_char,
    ) -> c_int {
        (self.list_bundles)(config, repo, result, err)
    }

    unsafe fn release(&self, buf: *mut c_char) {
        libc::free(buf as *mut libc::c_void);
    }
}
