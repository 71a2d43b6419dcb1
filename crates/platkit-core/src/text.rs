//! Small string helpers: tokenising, filtering and numeric checks.

use crate::error::{CoreError, CoreResult};

/// A three-component float vector parsed from text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Splits `input` on `delimiter`.
///
/// Empty tokens between delimiters are kept, but a single trailing delimiter
/// does not produce a trailing empty token and empty input yields nothing:
/// `"a,,b,"` → `["a", "", "b"]`.
pub fn split(input: &str, delimiter: char) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    let trimmed = input.strip_suffix(delimiter).unwrap_or(input);
    trimmed.split(delimiter).map(str::to_owned).collect()
}

/// Keeps only the items containing `needle`.
///
/// If no item contains it, the input is returned unchanged.
pub fn retain_containing(items: &[String], needle: &str) -> Vec<String> {
    if !items.iter().any(|s| s.contains(needle)) {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|s| s.contains(needle))
        .cloned()
        .collect()
}

/// Returns the items sorted with duplicates removed.
pub fn dedup_sorted(items: &[String]) -> Vec<String> {
    let mut out = items.to_vec();
    out.sort();
    out.dedup();
    out
}

/// Parses exactly three float components into a [`Vec3`].
///
/// # Errors
///
/// - [`CoreError::Parse`] if there are not three parts or one is not a float.
pub fn parse_vec3<S: AsRef<str>>(parts: &[S]) -> CoreResult<Vec3> {
    let [x, y, z] = parts else {
        return Err(CoreError::Parse(format!(
            "expected 3 components, got {}",
            parts.len()
        )));
    };
    let component = |s: &S| {
        let s = s.as_ref().trim();
        s.parse::<f32>()
            .map_err(|e| CoreError::Parse(format!("'{s}': {e}")))
    };
    Ok(Vec3 {
        x: component(x)?,
        y: component(y)?,
        z: component(z)?,
    })
}

/// `true` if the whole of `value` parses as a signed integer.
pub fn is_int(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}

/// `true` if the whole of `value` parses as a float.
pub fn is_float(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}

/// ASCII letters, digits, `-`, `_` and space.
pub fn is_valid_path_symbol(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ')
}
