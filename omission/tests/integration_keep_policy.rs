//! Integration tests for keep policies.
//!
//! These tests verify that:
//! - `KeepSignal::KeepKey` keeps a single target entry,
//! - `BREAK` keeps a whole subtree by original reference, and
//! - `KeepPaths` expresses the same rules declaratively.

use std::cell::RefCell;

use omission::{
    omit_deep_with, path, policy_fn, value, Key, KeepPaths, KeepSignal, Path, Value, BREAK,
};

fn field(value: &Value, key: impl Into<Key>) -> Value {
    value.get(key).unwrap()
}

// ============================================================================
// KeepKey
// ============================================================================

#[test]
fn test_keep_key_by_path() {
    let input = value!({
        "omit": true,
        "foo": { "omit": false, "bar": "bar" },
        "omitFirst": [
            { "omit": true, "foo": "bar" },
            { "omit": false, "foo": "bar" }
        ]
    });

    let keep = policy_fn(|path: &Path, _: &Key| {
        (*path == path!["foo", "omit"] || *path == path!["omitFirst", 1, "omit"])
            .then_some(KeepSignal::KeepKey)
    });
    let output = omit_deep_with(&input, "omit", &keep);

    assert_eq!(
        output,
        value!({
            "foo": { "omit": false, "bar": "bar" },
            "omitFirst": [{ "foo": "bar" }, { "omit": false, "foo": "bar" }]
        })
    );
}

#[test]
fn test_kept_key_value_is_still_traversed() {
    let input = value!({ "omit": { "omit": 1, "keep": 2 } });
    let keep = policy_fn(|path: &Path, _: &Key| {
        (*path == path!["omit"]).then_some(KeepSignal::KeepKey)
    });
    let output = omit_deep_with(&input, "omit", &keep);
    assert_eq!(output, value!({ "omit": { "keep": 2 } }));
}

#[test]
fn test_remove_signal_is_the_default_rule() {
    let input = value!({ "omit": 1, "keep": 2 });
    let output = omit_deep_with(&input, "omit", &|_: &Path, _: &Key| {
        Some(KeepSignal::Remove)
    });
    assert_eq!(output, value!({ "keep": 2 }));
}

// ============================================================================
// BreakSubtree
// ============================================================================

#[test]
fn test_break_keeps_subtrees_by_reference() {
    let input = value!({
        "omit": true,
        "foo": {
            "omit": false,
            "bar": "bar",
            "baz": { "foo": "bar", "omit": false }
        },
        "keepAll": [
            { "omit": false, "foo": "bar" },
            { "omit": false, "foo": "bar" }
        ],
        "keepOne": [
            { "omit": false, "nested": { "omit": false, "foo": "bar" } },
            { "omit": true, "nested": { "omit": true, "foo": "bar" } }
        ]
    });

    let keep = policy_fn(|path: &Path, _: &Key| {
        (*path == path!["foo"] || *path == path!["keepAll"] || *path == path!["keepOne", 0])
            .then_some(BREAK)
    });
    let output = omit_deep_with(&input, "omit", &keep);

    assert_eq!(
        output,
        value!({
            "foo": { "omit": false, "bar": "bar", "baz": { "foo": "bar", "omit": false } },
            "keepAll": [
                { "omit": false, "foo": "bar" },
                { "omit": false, "foo": "bar" }
            ],
            "keepOne": [
                { "omit": false, "nested": { "omit": false, "foo": "bar" } },
                { "nested": { "foo": "bar" } }
            ]
        })
    );

    assert!(field(&output, "foo").ptr_eq(&field(&input, "foo")));
    assert!(field(&output, "keepAll").ptr_eq(&field(&input, "keepAll")));
    assert!(field(&field(&output, "keepOne"), 0).ptr_eq(&field(&field(&input, "keepOne"), 0)));
}

#[test]
fn test_mix_keep_key_and_break() {
    let input = value!({
        "omit": true,
        "foo": {
            "omit": false,
            "bar": "bar",
            "baz": { "foo": "bar", "omit": false }
        },
        "omitFirst": [
            { "omit": false, "foo": "bar" },
            { "omit": true, "foo": "bar" }
        ]
    });

    let keep = policy_fn(|path: &Path, _: &Key| {
        if *path == path!["foo"] {
            Some(BREAK)
        } else if *path == path!["omitFirst", 0, "omit"] {
            Some(KeepSignal::KeepKey)
        } else {
            None
        }
    });
    let output = omit_deep_with(&input, "omit", &keep);

    assert_eq!(
        output,
        value!({
            "foo": { "omit": false, "bar": "bar", "baz": { "foo": "bar", "omit": false } },
            "omitFirst": [{ "omit": false, "foo": "bar" }, { "foo": "bar" }]
        })
    );
    assert!(field(&output, "foo").ptr_eq(&field(&input, "foo")));
}

#[test]
fn test_break_on_the_target_key_keeps_its_entry() {
    let input = value!({ "omit": { "omit": 1 }, "other": { "omit": 2 } });
    let keep = policy_fn(|path: &Path, _: &Key| (*path == path!["omit"]).then_some(BREAK));
    let output = omit_deep_with(&input, "omit", &keep);

    assert_eq!(output, value!({ "omit": { "omit": 1 }, "other": {} }));
    assert!(field(&output, "omit").ptr_eq(&field(&input, "omit")));
}

// ============================================================================
// Policy invocation contract
// ============================================================================

#[test]
fn test_policy_sees_every_present_entry_once() {
    let input = value!({ "a": { "omit": 1 }, "list": [10, { "b": 2 }] });
    let calls: RefCell<Vec<(String, Key)>> = RefCell::new(Vec::new());
    let record = |path: &Path, key: &Key| {
        assert_eq!(path.last(), Some(key));
        calls.borrow_mut().push((path.to_string(), key.clone()));
        None
    };

    let _ = omit_deep_with(&input, "omit", &record);

    let paths: Vec<String> = calls.into_inner().into_iter().map(|(path, _)| path).collect();
    assert_eq!(
        paths,
        vec![
            "$.a",
            "$.a.omit",
            "$.list",
            "$.list[0]",
            "$.list[1]",
            "$.list[1].b"
        ]
    );
}

#[test]
fn test_policy_is_not_consulted_for_primitive_roots() {
    let calls = RefCell::new(0_usize);
    let count = |_: &Path, _: &Key| {
        *calls.borrow_mut() += 1;
        None
    };
    let _ = omit_deep_with(&value!("omit"), "omit", &count);
    assert_eq!(calls.into_inner(), 0);
}

// ============================================================================
// KeepPaths
// ============================================================================

#[test]
fn test_keep_paths_matches_closure_results() {
    let input = value!({
        "omit": true,
        "foo": {
            "omit": false,
            "bar": "bar",
            "baz": { "foo": "bar", "omit": false }
        },
        "omitFirst": [
            { "omit": false, "foo": "bar" },
            { "omit": true, "foo": "bar" }
        ]
    });

    let policy = KeepPaths::new()
        .break_at(path!["foo"])
        .keep_key(path!["omitFirst", 0, "omit"]);
    let output = omit_deep_with(&input, "omit", &policy);

    assert_eq!(
        output,
        value!({
            "foo": { "omit": false, "bar": "bar", "baz": { "foo": "bar", "omit": false } },
            "omitFirst": [{ "omit": false, "foo": "bar" }, { "foo": "bar" }]
        })
    );
    assert!(field(&output, "foo").ptr_eq(&field(&input, "foo")));
}

#[test]
fn test_empty_keep_paths_behaves_like_omit_all() {
    let policy = KeepPaths::new();
    assert!(policy.is_empty());
    let input = value!({ "omit": 1, "nested": [{ "omit": 2 }] });
    assert_eq!(
        omit_deep_with(&input, "omit", &policy),
        value!({ "nested": [{}] })
    );
}
