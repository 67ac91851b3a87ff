//! JSON Model Transformer
//!
//! Textual rewrite of a JSON model document into the body of an ES6 model
//! module. The input is never parsed; every step is a plain substitution on
//! the output of the previous one.

use once_cell::sync::Lazy;
use regex::Regex;

/// Name of the parameter of the generated factory function.
pub const MODEL_OWNER_PARAM_NAME: &str = "modelOwner";

/// Stand-in for `\"` while double quotes are converted.
const ESCAPED_REPLACEMENT: &str = "@@@_@@@escaped@@@_@@@";

/// A quoted word immediately followed by a colon.
static KEY_PAT: Lazy<Regex> = Lazy::new(|| Regex::new(r#""((?-u:\w)+)":"#).unwrap());

/// Removes the quotes around object keys: `"name":` becomes `name:`.
pub fn unquote_keys(source: &str) -> String {
    KEY_PAT.replace_all(source, "${1}:").into_owned()
}

/// Converts double-quoted strings to single-quoted ones, keeping escapes intact.
pub fn to_single_quotes(source: &str) -> String {
    source
        .replace("\\\"", ESCAPED_REPLACEMENT)
        .replace('"', "'")
        .replace(ESCAPED_REPLACEMENT, "\\'")
}

/// Drops one ASCII whitespace character (space, `\t`, `\n`, `\x0B`, `\x0C`
/// or `\r`) at the very end. `\r\n` counts as one.
pub fn strip_trailing_whitespace(source: &str) -> &str {
    if let Some(stripped) = source.strip_suffix("\r\n") {
        return stripped;
    }
    match source.as_bytes().last() {
        Some(b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r') => &source[..source.len() - 1],
        _ => source,
    }
}

/// Wraps an object literal into the default exported factory function.
pub fn wrap_in_factory(object_literal: &str) -> String {
    format!(
        "export default function({}) {{\n  return {};\n}}\n",
        MODEL_OWNER_PARAM_NAME, object_literal
    )
}

/// Full JSON to module rewrite, before placeholder migration.
pub fn json_to_module(source: &str) -> String {
    let unquoted = unquote_keys(source);
    let single_quoted = to_single_quotes(&unquoted);
    wrap_in_factory(strip_trailing_whitespace(&single_quoted))
}
