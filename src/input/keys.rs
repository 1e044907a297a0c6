//! Key identifier derivation and normalization.
//!
//! Every key press maps to one canonical string space: physical codes are
//! preferred, logical values are folded into the same `KeyW` / `Digit1` names
//! where possible, and comparisons always use the lower-cased form.

use std::collections::BTreeSet;

/// Identifier used when a raw key event carries neither a code nor a key value.
pub const UNIDENTIFIED: &str = "Unidentified";

/// Separator between keys in a canonical shortcut id.
pub const CHORD_SEPARATOR: &str = "+";

/// Derives the key identifier for a raw key event.
///
/// Preference order:
/// 1. the physical code (`"KeyW"`, `"ArrowRight"`) when present and not blank
/// 2. the logical key value, with single ASCII letters mapped to `Key<UPPER>`,
///    single digits to `Digit<N>`, a space to `Space`, and anything else
///    (including `Arrow*`) passed through unchanged
/// 3. [`UNIDENTIFIED`]
///
/// Surrounding whitespace is dropped from both values, matching
/// [`normalize_key`]. A lone space is still the space key. Never returns an
/// empty string.
pub fn key_identifier(code: Option<&str>, key: Option<&str>) -> String {
    if let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) {
        return code.to_string();
    }

    let key = key.map(|k| if k == " " { k } else { k.trim() });
    let Some(key) = key.filter(|k| !k.is_empty()) else {
        return UNIDENTIFIED.to_string();
    };

    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
        (Some(c), None) if c.is_ascii_digit() => format!("Digit{c}"),
        (Some(' '), None) => "Space".to_string(),
        _ => key.to_string(),
    }
}

/// Lower-cases a key name for membership tests. Blank names yield `None`.
pub fn normalize_key(key: &str) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes a list of key names into a deduplicated, ordered set.
pub fn normalize_keys<I, S>(keys: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .filter_map(|key| normalize_key(key.as_ref()))
        .collect()
}

/// Joins a normalized key set into its canonical id, e.g. `controlleft+keyq`.
pub fn canonical_id(keys: &BTreeSet<String>) -> String {
    keys.iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(CHORD_SEPARATOR)
}
