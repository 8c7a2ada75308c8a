//! Error types for the bridge.
//!
//! Every kind surfaces to the scripting caller through the single
//! registered exception type; the variants exist so the Rust core can
//! distinguish a native failure from a failure of the bridge itself.

use thiserror::Error;

/// Errors produced by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// Arity or type mismatch detected before any native call. The message
    /// is the operation's fixed usage line.
    #[error("{0}")]
    InvalidArguments(String),

    /// The native entry point reported failure (negative status). The
    /// message is the native-supplied text, verbatim.
    #[error("{0}")]
    Native(String),

    /// The bridge failed after the native call returned, e.g. while copying
    /// a buffer out. Distinct from `Native`; the buffer is still released.
    #[error("bridge internal error: {0}")]
    Internal(String),

    /// The native shared library could not be opened or an entry point
    /// could not be resolved.
    #[error("failed to load native library: {0}")]
    Load(String),

    /// Dispatch for an operation name that was never registered.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

/// Result type for bridge operations.
pub type SdkResult<T> = Result<T, SdkError>;
