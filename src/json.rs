//! serde_json shorthands for data that is known to be valid, such as
//! constants and values built by the program itself.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

/// Serialize `value` to compact JSON.
///
/// # Panics
///
/// Panics if `value` cannot be serialized, for example a map with
/// non-string keys.
#[track_caller]
pub fn must_marshal<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    match serde_json::to_vec(value) {
        Ok(json) => json,
        Err(e) => panic!("must_marshal: {e}"),
    }
}

/// Serialize `value` to JSON with every nesting level indented by `indent`.
/// Lines after the first also start with `prefix`.
///
/// # Panics
///
/// Panics if `value` cannot be serialized.
#[track_caller]
pub fn must_marshal_indent<T: Serialize + ?Sized>(value: &T, prefix: &str, indent: &str) -> Vec<u8> {
    let mut json = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut json, formatter);
    if let Err(e) = value.serialize(&mut serializer) {
        panic!("must_marshal_indent: {e}");
    }

    if prefix.is_empty() {
        return json;
    }
    let mut prefixed = Vec::with_capacity(json.len());
    for &b in &json {
        prefixed.push(b);
        if b == b'\n' {
            prefixed.extend_from_slice(prefix.as_bytes());
        }
    }
    prefixed
}

/// Deserialize `data`.
///
/// # Panics
///
/// Panics if `data` is not valid JSON for `T`.
#[track_caller]
pub fn must_unmarshal<T: DeserializeOwned>(data: &[u8]) -> T {
    match serde_json::from_slice(data) {
        Ok(value) => value,
        Err(e) => panic!("must_unmarshal: {e}"),
    }
}

/// Re-indent `data` by decoding it as `T` and encoding it again with
/// [`must_marshal_indent`]. Decoding into `serde_json::Value` sorts object
/// keys.
///
/// # Panics
///
/// Panics if `data` is not valid JSON for `T`.
#[track_caller]
pub fn must_indent<T: Serialize + DeserializeOwned>(data: &[u8], prefix: &str, indent: &str) -> Vec<u8> {
    let value: T = must_unmarshal(data);
    must_marshal_indent(&value, prefix, indent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_must_marshal() {
        assert_eq!(must_marshal("Hello"), br#""Hello""#);
        assert_eq!(must_marshal(&vec![1, 2]), b"[1,2]");
    }

    #[test]
    fn test_must_marshal_indent() {
        let map = BTreeMap::from([("hello", "world"), ("a", "b")]);
        let out = must_marshal_indent(&map, "", "  ");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n  \"a\": \"b\",\n  \"hello\": \"world\"\n}"
        );

        let out = must_marshal_indent(&map, "> ", "\t");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n> \t\"a\": \"b\",\n> \t\"hello\": \"world\"\n> }"
        );
    }

    #[test]
    fn test_must_indent() {
        let out = must_indent::<serde_json::Value>(br#"{"hello": "world", "a": "b"}"#, "", "  ");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n  \"a\": \"b\",\n  \"hello\": \"world\"\n}"
        );
    }

    #[test]
    fn test_must_unmarshal() {
        #[derive(Deserialize)]
        struct Greeting {
            hello: String,
        }
        let out: Greeting = must_unmarshal(br#"{"hello":"world"}"#);
        assert_eq!(out.hello, "world");
    }

    #[test]
    #[should_panic(expected = "must_unmarshal")]
    fn test_must_unmarshal_panics() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Stamp {
            hello: chrono::DateTime<chrono::Utc>,
        }
        let _: Stamp = must_unmarshal(br#"{"hello":"world"}"#);
    }

    #[test]
    #[should_panic(expected = "must_marshal")]
    fn test_must_marshal_panics() {
        let map = HashMap::from([(vec![1u8], 1)]);
        must_marshal(&map);
    }
}
