//! Instrumented stand-in for the native engine.
//!
//! Mirrors the output-slot convention exactly: scripted outcomes are
//! handed out as heap-allocated C strings through the same slots the real
//! engine populates. The allocation ledger records every buffer handed out
//! and every release, so tests can assert no leak and no double free.

use std::collections::VecDeque;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::types::NativeApi;

/// A scripted reply for one native call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Status `0`, payload through the result slot.
    Success(Vec<u8>),
    /// A chosen non-negative status, payload through the result slot.
    SuccessWithStatus(c_int, Vec<u8>),
    /// Status `-1`, message through the error slot.
    Failure(Vec<u8>),
    /// Negative status with the error slot left null (convention violation).
    FailureWithoutBuffer,
    /// Status `0` with the result slot left null (convention violation).
    SuccessWithoutBuffer,
    /// Status `0` with both slots populated (convention violation).
    BothSlots(Vec<u8>, Vec<u8>),
}

impl MockOutcome {
    /// Status `0` with `text` as the payload.
    pub fn success(text: &str) -> Self {
        MockOutcome::Success(text.as_bytes().to_vec())
    }

    /// Status `-1` with `text` as the error message.
    pub fn failure(text: &str) -> Self {
        MockOutcome::Failure(text.as_bytes().to_vec())
    }
}

/// Scripted [`NativeApi`] with per-operation call counters and an
/// allocation ledger.
#[derive(Default)]
pub struct MockNative {
    script: Mutex<VecDeque<MockOutcome>>,
    list_repos_calls: AtomicUsize,
    list_bundles_calls: AtomicUsize,
    allocated: AtomicUsize,
    released: AtomicUsize,
    last_config: Mutex<Option<String>>,
    last_repo: Mutex<Option<String>>,
}

impl MockNative {
    /// Empty mock; every call fails the test unless an outcome is pushed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock primed with `outcomes`, consumed one per native call.
    pub fn with_script(outcomes: Vec<MockOutcome>) -> Self {
        let mock = Self::new();
        *mock.script.lock().unwrap() = outcomes.into();
        mock
    }

    /// Queue one more outcome.
    pub fn push(&self, outcome: MockOutcome) {
        self.script.lock().unwrap().push_back(outcome);
    }

    pub fn list_repos_calls(&self) -> usize {
        self.list_repos_calls.load(Ordering::SeqCst)
    }

    pub fn list_bundles_calls(&self) -> usize {
        self.list_bundles_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.list_repos_calls() + self.list_bundles_calls()
    }

    /// Buffers handed out and not yet released.
    pub fn live_buffers(&self) -> usize {
        self.allocated.load(Ordering::SeqCst) - self.released.load(Ordering::SeqCst)
    }

    pub fn allocated_buffers(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }

    pub fn released_buffers(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// The `config` argument of the most recent call, as marshaled.
    pub fn last_config(&self) -> Option<String> {
        self.last_config.lock().unwrap().clone()
    }

    /// The `repo` argument of the most recent bundle listing call.
    pub fn last_repo(&self) -> Option<String> {
        self.last_repo.lock().unwrap().clone()
    }

    fn alloc(&self, bytes: &[u8]) -> *mut c_char {
        self.allocated.fetch_add(1, Ordering::SeqCst);
        // Marshaling rejects interior NULs before any native call, so a
        // scripted payload containing one is a broken test.
        CString::new(bytes.to_vec())
            .expect("mock payload contains interior NUL")
            .into_raw()
    }

    /// Pop the next scripted outcome and populate the slots accordingly.
    fn reply(&self, result: *mut *mut c_char, err: *mut *mut c_char) -> c_int {
        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock script exhausted: native called more often than scripted");

        unsafe {
            match outcome {
                MockOutcome::Success(payload) => {
                    *result = self.alloc(&payload);
                    0
                }
                MockOutcome::SuccessWithStatus(status, payload) => {
                    *result = self.alloc(&payload);
                    status
                }
                MockOutcome::Failure(message) => {
                    *err = self.alloc(&message);
                    -1
                }
                MockOutcome::FailureWithoutBuffer => -1,
                MockOutcome::SuccessWithoutBuffer => 0,
                MockOutcome::BothSlots(payload, message) => {
                    *result = self.alloc(&payload);
                    *err = self.alloc(&message);
                    0
                }
            }
        }
    }
}

impl NativeApi for MockNative {
    unsafe fn list_repos(
        &self,
        config: *const c_char,
        result: *mut *mut c_char,
        err: *mut *mut c_char,
    ) -> c_int {
        self.list_repos_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_config.lock().unwrap() =
            Some(CStr::from_ptr(config).to_string_lossy().into_owned());
        self.reply(result, err)
    }

    unsafe fn list_bundles(
        &self,
        config: *const c_char,
        repo: *const c_char,
        result: *mut *mut c_char,
        err: *mut *mut c_char,
    ) -> c_int {
        self.list_bundles_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_config.lock().unwrap() =
            Some(CStr::from_ptr(config).to_string_lossy().into_owned());
        *self.last_repo.lock().unwrap() =
            Some(CStr::from_ptr(repo).to_string_lossy().into_owned());
        self.reply(result, err)
    }

    unsafe fn release(&self, buf: *mut c_char) {
        // Reclaim through the same allocator alloc() used.
        drop(CString::from_raw(buf));
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
