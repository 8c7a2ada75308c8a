//! depot-sdk - scripting-runtime bridge for the depot data engine
//!
//! depot manages versioned data as repositories and bundles. The engine
//! ships as a C-shared library; this crate bridges its listing operations
//! to dynamically-typed callers and owns exactly one hard problem: the
//! calling-convention contract at the native boundary, i.e. argument
//! marshaling, status-code success/failure signaling, and the
//! copy-then-release ownership transfer of native-allocated buffers.
//!
//! # Architecture
//!
//! ```text
//! depot.list_repos("cfg.yaml")          Python caller
//!       │
//!       ▼
//! arity/type validation                 [ops]  fails fast with the
//!       │                                      operation's usage line
//!       ▼
//! depot_list_repos(cfg, &result, &err)  [native] two output slots,
//!       │                                        integer status back
//!       ▼
//! status < 0 ?                          [native::capture]
//!   no: copy result, release, return str
//!   yes: copy err, release, raise depot.DepotError
//! ```
//!
//! The repository/bundle semantics, storage access, and the listing
//! format all belong to the native engine; the configuration string is
//! passed through untouched.
//!
//! # Example (Rust core, no Python interpreter needed)
//!
//! ```
//! use depot::native::{MockNative, MockOutcome};
//! use depot::ops::Registry;
//!
//! let api = MockNative::with_script(vec![MockOutcome::success("repo-a\nrepo-b")]);
//! let registry = Registry::new();
//!
//! let listing = registry.invoke(&api, "list_repos", &["cfg.yaml"]).unwrap();
//! assert_eq!(listing, "repo-a\nrepo-b");
//! ```
//!
//! The Python module (`depot`, feature `python`) exposes `list_repos` and
//! `list_bundles` and registers the shared `DepotError` exception type.

pub mod config;
pub mod error;
pub mod native;
pub mod ops;

#[cfg(feature = "python")]
mod python;

pub use error::{SdkError, SdkResult};
