//! Native boundary tests.

use std::ffi::CString;

use super::*;
use crate::error::SdkError;

fn cstr(text: &str) -> CString {
    CString::new(text).unwrap()
}

#[test]
fn test_capture_success_adopts_result_buffer() {
    let api = MockNative::with_script(vec![MockOutcome::success("payload")]);
    let config = cstr("cfg");

    let outcome = capture(&api, |result, err| unsafe {
        api.list_repos(config.as_ptr(), result, err)
    })
    .unwrap();

    match outcome {
        Outcome::Success(buf) => assert_eq!(buf.into_string().unwrap(), "payload"),
        Outcome::Failure(_) => panic!("expected success"),
    }
    assert_eq!(api.allocated_buffers(), 1);
    assert_eq!(api.released_buffers(), 1);
    assert_eq!(api.live_buffers(), 0);
}

#[test]
fn test_capture_failure_adopts_error_buffer() {
    let api = MockNative::with_script(vec![MockOutcome::failure("boom")]);
    let config = cstr("cfg");

    let outcome = capture(&api, |result, err| unsafe {
        api.list_repos(config.as_ptr(), result, err)
    })
    .unwrap();

    match outcome {
        Outcome::Failure(buf) => assert_eq!(buf.into_string().unwrap(), "boom"),
        Outcome::Success(_) => panic!("expected failure"),
    }
    assert_eq!(api.live_buffers(), 0);
}

#[test]
fn test_positive_status_is_success() {
    let api = MockNative::with_script(vec![MockOutcome::SuccessWithStatus(
        7,
        b"still fine".to_vec(),
    )]);
    let config = cstr("cfg");

    let outcome = capture(&api, |result, err| unsafe {
        api.list_repos(config.as_ptr(), result, err)
    })
    .unwrap();

    assert!(matches!(outcome, Outcome::Success(_)));
}

#[test]
fn test_missing_error_buffer_is_internal() {
    let api = MockNative::with_script(vec![MockOutcome::FailureWithoutBuffer]);
    let config = cstr("cfg");

    let err = capture(&api, |result, err| unsafe {
        api.list_repos(config.as_ptr(), result, err)
    })
    .unwrap_err();

    assert!(matches!(err, SdkError::Internal(_)));
    assert_eq!(api.live_buffers(), 0);
}

#[test]
fn test_missing_result_buffer_is_internal() {
    let api = MockNative::with_script(vec![MockOutcome::SuccessWithoutBuffer]);
    let config = cstr("cfg");

    let err = capture(&api, |result, err| unsafe {
        api.list_repos(config.as_ptr(), result, err)
    })
    .unwrap_err();

    assert!(matches!(err, SdkError::Internal(_)));
}

#[test]
fn test_surplus_buffer_is_still_released() {
    // The native side populating both slots violates the convention; the
    // stray buffer must not leak and the status stays authoritative.
    let api = MockNative::with_script(vec![MockOutcome::BothSlots(
        b"ok".to_vec(),
        b"stray".to_vec(),
    )]);
    let config = cstr("cfg");

    let outcome = capture(&api, |result, err| unsafe {
        api.list_repos(config.as_ptr(), result, err)
    })
    .unwrap();

    match outcome {
        Outcome::Success(buf) => assert_eq!(buf.into_string().unwrap(), "ok"),
        Outcome::Failure(_) => panic!("status 0 must select the success branch"),
    }
    assert_eq!(api.allocated_buffers(), 2);
    assert_eq!(api.released_buffers(), 2);
}

#[test]
fn test_copy_failure_still_releases_buffer() {
    let api = MockNative::with_script(vec![MockOutcome::Success(vec![0xff, 0xfe])]);
    let config = cstr("cfg");

    let outcome = capture(&api, |result, err| unsafe {
        api.list_repos(config.as_ptr(), result, err)
    })
    .unwrap();

    let err = match outcome {
        Outcome::Success(buf) => buf.into_string().unwrap_err(),
        Outcome::Failure(_) => panic!("expected success branch"),
    };
    assert!(matches!(err, SdkError::Internal(_)));
    assert_eq!(api.live_buffers(), 0);
}

#[test]
fn test_status_sign_classification() {
    assert!(is_failure(-1));
    assert!(is_failure(-128));
    assert!(!is_failure(0));
    assert!(!is_failure(1));
}

#[test]
fn test_open_missing_library_fails_cleanly() {
    let err = SharedLibrary::open("/nonexistent/libdepot.so").unwrap_err();
    match err {
        SdkError::Load(msg) => assert!(msg.contains("/nonexistent/libdepot.so")),
        other => panic!("expected Load error, got {:?}", other),
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_library_without_entry_points_fails_on_symbols() {
    // libc is loadable on any Linux box but exports none of the engine's
    // entry points, so resolution must fail with the symbol name.
    if let Err(SdkError::Load(msg)) = SharedLibrary::open("libc.so.6") {
        assert!(msg.contains(LIST_REPOS_SYMBOL) || msg.contains("libc.so.6"));
    }
}
