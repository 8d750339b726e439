//! Pretty-printing helper tests.

use schema_studio::format::prettify;

#[test]
fn prettify_reindents_with_two_spaces() {
    let out = prettify("{\"a\":{\"b\":1}}").unwrap();
    assert_eq!(out, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
}

#[test]
fn prettify_rejects_invalid_json() {
    assert!(
        prettify("{ nope").is_err(),
        "Callers keep the original text on error"
    );
}
