//! Serde adapter for floats that may be infinite.
//!
//! JSON has no literal for infinity or NaN, so those values are written as the
//! strings `"Infinity"`, `"-Infinity"` and `"NaN"`. Finite values stay numbers.
//! Documents written by Python's `json` module carry the same names as bare
//! tokens; [`quote_bare_tokens`] turns those into strings before parsing.

use std::borrow::Cow;

use serde::{de, Deserialize, Deserializer, Serializer};

const BARE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Wraps every `Infinity`, `-Infinity` or `NaN` token outside of a JSON
/// string in quotes.
pub(super) fn quote_bare_tokens(json: &str) -> Cow<'_, str> {
    let bytes = json.as_bytes();
    let mut quoted = String::new();
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
        } else if byte == b'"' {
            in_string = true;
        } else if let Some(token) = BARE_TOKENS
            .iter()
            .find(|token| bytes[i..].starts_with(token.as_bytes()))
        {
            quoted.push_str(&json[copied..i]);
            quoted.push('"');
            quoted.push_str(token);
            quoted.push('"');
            i += token.len();
            copied = i;
            continue;
        }
        i += 1;
    }

    if copied == 0 {
        Cow::Borrowed(json)
    } else {
        quoted.push_str(&json[copied..]);
        Cow::Owned(quoted)
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Named(String),
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Repr::deserialize(deserializer)? {
        Repr::Number(value) => Ok(value),
        Repr::Named(name) => match name.as_str() {
            "Infinity" | "inf" => Ok(f64::INFINITY),
            "-Infinity" | "-inf" => Ok(f64::NEG_INFINITY),
            "NaN" | "nan" => Ok(f64::NAN),
            _ => Err(de::Error::invalid_value(
                de::Unexpected::Str(&name),
                &"a number, \"Infinity\", \"-Infinity\" or \"NaN\"",
            )),
        },
    }
}
