//! JSON Model Placeholders
//!
//! A placeholder is an attribute whose single-quoted value has the shape
//! `'${type:value}'`, e.g. `label: '${textKey:Name}'`. Placeholders are
//! resolved at migration time into JavaScript expressions.

pub mod mapper;
pub mod substitution;

use std::fmt;
use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

pub use substitution::{migrate_placeholders, substitute, Substitution};

/// `key: '${type:value}'`. The value may contain `:` but no `}`.
static PLACEHOLDER_PAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"((?-u:\w)+):(?-u:\s)*'\$\{((?-u:\w)+):([^}]+)\}'").unwrap());

/// The recognized placeholder types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    TextKey,
    Const,
    IconId,
}

impl PlaceholderKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "textKey" => Some(PlaceholderKind::TextKey),
            "const" => Some(PlaceholderKind::Const),
            "iconId" => Some(PlaceholderKind::IconId),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceholderKind::TextKey => "textKey",
            PlaceholderKind::Const => "const",
            PlaceholderKind::IconId => "iconId",
        }
    }
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One placeholder occurrence in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderToken<'a> {
    /// Model attribute name.
    pub key: &'a str,
    /// Raw type, not yet validated.
    pub kind: &'a str,
    pub value: &'a str,
    /// Byte range of the whole `key: '${type:value}'` match.
    pub span: Range<usize>,
}

/// All placeholders of `source`, left to right, non-overlapping.
pub fn scan(source: &str) -> impl Iterator<Item = PlaceholderToken<'_>> {
    PLACEHOLDER_PAT.captures_iter(source).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(PlaceholderToken {
            key: caps.get(1)?.as_str(),
            kind: caps.get(2)?.as_str(),
            value: caps.get(3)?.as_str(),
            span: whole.range(),
        })
    })
}

/// Whether `s` contains at least one non-whitespace character.
pub(crate) fn has_text(s: &str) -> bool {
    s.chars().any(|c| !c.is_whitespace())
}
