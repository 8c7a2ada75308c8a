//! Native library discovery.
//!
//! The caller's configuration string is opaque to this crate and passes
//! through to the native side untouched. The only configuration the bridge
//! owns is where to find the native shared library: an explicit path via
//! the `DEPOT_LIBRARY` environment variable, or the platform library file
//! name searched through the conventional directories.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the shared library path.
pub const LIBRARY_ENV: &str = "DEPOT_LIBRARY";

/// Base name of the native engine library (`libdepot.so` on Linux).
pub const LIBRARY_BASE_NAME: &str = "depot";

/// Resolve the path to load the native library from.
///
/// Order: `DEPOT_LIBRARY` if set, then the first search-path hit for the
/// platform file name, then the bare file name so the dynamic linker runs
/// its own search.
pub fn resolve_library_path() -> PathBuf {
    if let Ok(path) = env::var(LIBRARY_ENV) {
        return PathBuf::from(path);
    }

    let file_name = library_filename(LIBRARY_BASE_NAME);
    for search_path in default_search_paths() {
        let candidate = search_path.join(&file_name);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(file_name)
}

/// Default library search paths for this platform.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // Current directory
    if let Ok(cwd) = env::current_dir() {
        paths.push(cwd);
    }

    // Standard system paths
    #[cfg(target_os = "linux")]
    {
        paths.push(PathBuf::from("/usr/lib"));
        paths.push(PathBuf::from("/usr/local/lib"));
        paths.push(PathBuf::from("/lib"));
        paths.push(PathBuf::from("/lib64"));
        paths.push(PathBuf::from("/usr/lib64"));

        // LD_LIBRARY_PATH
        if let Ok(ld_path) = env::var("LD_LIBRARY_PATH") {
            for p in ld_path.split(':') {
                paths.push(PathBuf::from(p));
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        paths.push(PathBuf::from("/usr/lib"));
        paths.push(PathBuf::from("/usr/local/lib"));
        paths.push(PathBuf::from("/opt/homebrew/lib"));

        // DYLD_LIBRARY_PATH
        if let Ok(dyld_path) = env::var("DYLD_LIBRARY_PATH") {
            for p in dyld_path.split(':') {
                paths.push(PathBuf::from(p));
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        paths.push(PathBuf::from("C:\\Windows\\System32"));

        // PATH
        if let Ok(path) = env::var("PATH") {
            for p in path.split(';') {
                paths.push(PathBuf::from(p));
            }
        }
    }

    paths
}

/// Construct the platform-specific library file name.
pub fn library_filename(name: &str) -> String {
    #[cfg(target_os = "linux")]
    {
        if name.starts_with("lib") && name.ends_with(".so") {
            name.to_string()
        } else {
            format!("lib{}.so", name)
        }
    }

    #[cfg(target_os = "macos")]
    {
        if name.starts_with("lib") && name.ends_with(".dylib") {
            name.to_string()
        } else {
            format!("lib{}.dylib", name)
        }
    }

    #[cfg(target_os = "windows")]
    {
        if name.ends_with(".dll") {
            name.to_string()
        } else {
            format!("{}.dll", name)
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        name.to_string()
    }
}

/// True if `path` names an explicit location rather than a bare file name.
pub fn is_explicit_path(path: &Path) -> bool {
    path.components().count() > 1 || path.is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn test_library_filename() {
        assert_eq!(library_filename("depot"), "libdepot.so");
        assert_eq!(library_filename("libdepot.so"), "libdepot.so");
    }

    #[test]
    #[cfg(target_os = "macos")]
    fn test_library_filename() {
        assert_eq!(library_filename("depot"), "libdepot.dylib");
        assert_eq!(library_filename("libdepot.dylib"), "libdepot.dylib");
    }

    #[test]
    fn test_search_paths_not_empty() {
        // At minimum the current directory is searched.
        assert!(!default_search_paths().is_empty());
    }

    #[test]
    fn test_explicit_path_detection() {
        assert!(is_explicit_path(Path::new("/usr/lib/libdepot.so")));
        assert!(is_explicit_path(Path::new("./libdepot.so")));
        assert!(!is_explicit_path(Path::new("libdepot.so")));
    }
}
