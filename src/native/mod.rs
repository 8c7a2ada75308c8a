//! Native boundary: calling convention, buffer ownership, library loading.
//!
//! # Architecture
//!
//! ```text
//! caller arguments (CStrings)
//!       │
//!       ▼
//! entry point: (args..., &result, &err) -> status     [types]
//!       │
//!       ▼
//! capture(): status sign + slots -> Outcome           [types]
//!       │
//!       ▼
//! Success(NativeBuf) | Failure(NativeBuf)             [buffer]
//!       │
//!       ▼
//! copy into owned String, release native buffer
//! ```
//!
//! The raw two-output-slot convention is collapsed into [`Outcome`]
//! immediately after the call returns; no other code touches raw slots.
//! [`NativeBuf`] guarantees each adopted buffer is released exactly once,
//! on every exit path.
//!
//! [`SharedLibrary`] resolves the real engine's exported symbols;
//! [`MockNative`] is the instrumented stand-in the test suite scripts.

mod buffer;
mod loader;
mod mock;
mod types;

pub use buffer::NativeBuf;
pub use loader::SharedLibrary;
pub use mock::{MockNative, MockOutcome};
pub use types::{
    capture, is_failure, ListBundlesFn, ListReposFn, NativeApi, Outcome, LIST_BUNDLES_SYMBOL,
    LIST_REPOS_SYMBOL,
};

#[cfg(test)]
mod tests;
