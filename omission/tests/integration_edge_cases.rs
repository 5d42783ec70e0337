//! Edge case tests for the traversal engine.
//!
//! Covers cyclic and aliased graphs, opaque values, non-string keys, and the
//! algebraic properties callers rely on (idempotence, sharing).

use omission::{omit_deep, value, Array, Atom, Key, Object, Opaque, Value};

fn field(value: &Value, key: impl Into<Key>) -> Value {
    value.get(key).unwrap()
}

fn contains_key_anywhere(value: &Value, key: &Key, seen: &mut Vec<Value>) -> bool {
    if seen.iter().any(|visited| visited.ptr_eq(value)) {
        return false;
    }
    match value {
        Value::Object(object) => {
            seen.push(value.clone());
            object.contains_key(key)
                || object
                    .entries()
                    .iter()
                    .any(|(_, child)| contains_key_anywhere(child, key, seen))
        }
        Value::Array(array) => {
            seen.push(value.clone());
            array
                .to_vec()
                .iter()
                .any(|child| contains_key_anywhere(child, key, seen))
        }
        _ => false,
    }
}

// ============================================================================
// Cycles and aliasing
// ============================================================================

#[test]
fn test_handles_circular_references() {
    let a = Object::new();
    let b = Object::new();
    a.insert("omit", "foo");
    a.insert("b", b.clone());
    b.insert("a", a.clone());
    b.insert("omit", "foo");
    let variables = value!({ "a": (a.clone()), "b": (b.clone()), "omit": "foo" });

    let output = omit_deep(&variables, "omit");

    let omit = Key::from("omit");
    assert!(!contains_key_anywhere(&output, &omit, &mut Vec::new()));
    assert!(!output.has_key("omit"));
    assert!(!field(&output, "a").has_key("omit"));
    assert!(!field(&output, "b").has_key("omit"));

    // One output per input container, and the cycle is preserved.
    let out_a = field(&output, "a");
    let out_b = field(&output, "b");
    assert!(field(&out_a, "b").ptr_eq(&out_b));
    assert!(field(&out_b, "a").ptr_eq(&out_a));

    for object in [a, b] {
        object.clear();
    }
    for object in [out_a, out_b] {
        object.as_object().unwrap().clear();
    }
}

#[test]
fn test_self_referencing_object_without_target_is_returned_as_is() {
    let node = Object::new();
    node.insert("name", "root");
    node.insert("me", node.clone());
    let input = Value::Object(node.clone());

    let output = omit_deep(&input, "omit");

    assert!(output.ptr_eq(&input));
    node.clear();
}

#[test]
fn test_two_node_cycle_without_target_is_shared() {
    let a = Object::new();
    let b = Object::new();
    a.insert("name", "a");
    a.insert("next", b.clone());
    b.insert("name", "b");
    b.insert("next", a.clone());
    let input = Value::Object(a.clone());

    let output = omit_deep(&input, "omit");

    assert!(output.ptr_eq(&input));
    assert!(field(&output, "next").ptr_eq(&Value::Object(b.clone())));

    a.clear();
    b.clear();
}

#[test]
fn test_unchanged_cycle_under_changed_root_is_shared() {
    let node = Object::new();
    node.insert("name", "n");
    node.insert("me", node.clone());
    let input = value!({ "omit": 1, "n": (node.clone()) });

    let output = omit_deep(&input, "omit");

    assert!(!output.ptr_eq(&input));
    assert!(!output.has_key("omit"));
    assert!(field(&output, "n").ptr_eq(&Value::Object(node.clone())));

    node.clear();
}

#[test]
fn test_cycle_reaching_a_change_is_rebuilt_as_a_cycle() {
    let a = Object::new();
    let b = Object::new();
    a.insert("next", b.clone());
    b.insert("next", a.clone());
    b.insert("leaf", value!({ "omit": 1, "keep": 2 }));
    let input = Value::Object(a.clone());

    let output = omit_deep(&input, "omit");

    let out_b = field(&output, "next");
    assert!(!output.ptr_eq(&input));
    assert!(!out_b.ptr_eq(&Value::Object(b.clone())));
    assert!(field(&out_b, "next").ptr_eq(&output));
    assert_eq!(field(&out_b, "leaf"), value!({ "keep": 2 }));

    a.clear();
    b.clear();
    output.as_object().unwrap().clear();
    out_b.as_object().unwrap().clear();
}

#[test]
fn test_self_referencing_array_is_rebuilt_once() {
    let array = Array::new();
    array.push(value!({ "omit": 1, "keep": 2 }));
    array.push(array.clone());
    let input = Value::Array(array.clone());

    let output = omit_deep(&input, "omit");

    assert!(!output.ptr_eq(&input));
    assert_eq!(field(&output, 0), value!({ "keep": 2 }));
    assert!(field(&output, 1).ptr_eq(&output));

    array.clear();
    output.as_array().unwrap().clear();
}

#[test]
fn test_aliased_subtree_produces_one_shared_output() {
    let shared = value!({ "omit": 1, "keep": 2 });
    let input = value!({ "left": (shared.clone()), "right": [(shared.clone())] });

    let output = omit_deep(&input, "omit");

    let left = field(&output, "left");
    let right = field(&field(&output, "right"), 0);
    assert!(left.ptr_eq(&right));
    assert!(!left.ptr_eq(&shared));
    assert_eq!(left, value!({ "keep": 2 }));
}

#[test]
fn test_equal_but_distinct_inputs_are_processed_independently() {
    let input = value!({
        "first": { "omit": 1, "keep": 2 },
        "second": { "omit": 1, "keep": 2 }
    });

    let output = omit_deep(&input, "omit");

    assert_eq!(field(&output, "first"), field(&output, "second"));
    assert!(!field(&output, "first").ptr_eq(&field(&output, "second")));
}

// ============================================================================
// Opaque values
// ============================================================================

#[derive(Debug)]
struct Thing {
    foo: &'static str,
    omit: bool,
}

#[test]
fn test_opaque_values_are_never_opened() {
    let thing = Opaque::new(Thing {
        foo: "bar",
        omit: false,
    });
    let input = value!({ "thing": (thing.clone()) });

    let output = omit_deep(&input, "omit");
    assert!(output.ptr_eq(&input));

    let kept = field(&output, "thing");
    let kept = kept.as_opaque().unwrap();
    assert!(kept.ptr_eq(&thing));
    let inner = kept.downcast_ref::<Thing>().unwrap();
    assert_eq!(inner.foo, "bar");
    assert!(!inner.omit);
}

#[test]
fn test_opaque_root_is_returned_by_reference() {
    let thing = Value::Opaque(Opaque::new(Thing {
        foo: "bar",
        omit: false,
    }));
    assert!(omit_deep(&thing, "omit").ptr_eq(&thing));
}

// ============================================================================
// Non-string keys
// ============================================================================

#[test]
fn test_atom_targets_only_match_atom_keys() {
    let input = value!({ (Atom::new("k")): 1, "k": 2 });

    assert_eq!(omit_deep(&input, Atom::new("k")), value!({ "k": 2 }));
    assert_eq!(omit_deep(&input, "k"), value!({ (Atom::new("k")): 1 }));
}

#[test]
fn test_index_targets_remove_object_entries_not_array_elements() {
    let input = value!({ 1: "x", "1": "y", "list": ["a", "b"] });

    let output = omit_deep(&input, 1_usize);

    assert_eq!(output, value!({ "1": "y", "list": ["a", "b"] }));
    assert!(field(&output, "list").ptr_eq(&field(&input, "list")));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_omission_is_idempotent() {
    let input = value!({
        "omit": 1,
        "nested": [{ "omit": 2, "keep": [{ "omit": 3 }] }, "text", null]
    });

    let once = omit_deep(&input, "omit");
    let twice = omit_deep(&once, "omit");

    assert_eq!(once, twice);
    assert!(twice.ptr_eq(&once));
}

#[test]
fn test_nan_leaves_survive_equality_checks() {
    let input = value!({ "omit": 1, "ratio": (f64::NAN), "list": [(f64::NAN)] });

    let once = omit_deep(&input, "omit");

    assert_eq!(once, value!({ "ratio": (f64::NAN), "list": [(f64::NAN)] }));
    assert_eq!(omit_deep(&once, "omit"), once);
}

#[test]
fn test_empty_containers_are_returned_as_is() {
    let object = value!({});
    let array = value!([]);
    assert!(omit_deep(&object, "omit").ptr_eq(&object));
    assert!(omit_deep(&array, "omit").ptr_eq(&array));
}

#[test]
fn test_object_with_only_the_target_becomes_empty() {
    let input = value!({ "omit": { "deep": true } });
    let output = omit_deep(&input, "omit");
    assert_eq!(output, value!({}));
    assert!(!output.ptr_eq(&input));
}

#[test]
fn test_undefined_entries_survive() {
    let input = value!({ "omit": 1, "missing": undefined });
    assert_eq!(omit_deep(&input, "omit"), value!({ "missing": undefined }));
}
