//! End-to-end tests through the public crate surface, driving the bridge
//! the way an embedding caller would.

use depot::native::{MockNative, MockOutcome};
use depot::ops::Registry;
use depot::SdkError;

#[test]
fn list_repos_end_to_end() {
    let api = MockNative::with_script(vec![MockOutcome::success("repo-a\nrepo-b")]);
    let registry = Registry::new();

    let listing = registry.invoke(&api, "list_repos", &["cfg.yaml"]).unwrap();

    assert_eq!(listing, "repo-a\nrepo-b");
    assert_eq!(api.list_repos_calls(), 1);
    assert_eq!(api.live_buffers(), 0);
}

#[test]
fn list_bundles_end_to_end_failure() {
    let api = MockNative::with_script(vec![MockOutcome::failure("repo-a: not found")]);
    let registry = Registry::new();

    let err = registry
        .invoke(&api, "list_bundles", &["cfg.yaml", "repo-a"])
        .unwrap_err();

    assert_eq!(err.to_string(), "repo-a: not found");
    assert!(matches!(err, SdkError::Native(_)));
    assert_eq!(api.live_buffers(), 0);
}

#[test]
fn list_repos_without_arguments_never_reaches_native() {
    let api = MockNative::new();
    let registry = Registry::new();

    let err = registry.invoke(&api, "list_repos", &[]).unwrap_err();

    assert_eq!(err.to_string(), "list_repos requires 1 parameter: config");
    assert_eq!(api.total_calls(), 0);
}

#[test]
fn repeated_calls_share_one_registry_and_leak_nothing() {
    let api = MockNative::new();
    let registry = Registry::new();

    for i in 0..16 {
        if i % 2 == 0 {
            api.push(MockOutcome::success("repo-a"));
            let listing = registry.invoke(&api, "list_repos", &["cfg.yaml"]).unwrap();
            assert_eq!(listing, "repo-a");
        } else {
            api.push(MockOutcome::failure("transient backend error"));
            let err = registry.invoke(&api, "list_repos", &["cfg.yaml"]).unwrap_err();
            assert_eq!(err.to_string(), "transient backend error");
        }
    }

    assert_eq!(api.allocated_buffers(), 16);
    assert_eq!(api.released_buffers(), 16);
    assert_eq!(api.live_buffers(), 0);
}
