//! Identifier derivation for generated headers.
//!
//! A header's array name comes from the asset's file name: the final
//! extension is dropped, `-` becomes `_`, and the result is looked up in an
//! [`OverrideTable`] so names that clash with C keywords (or with assets the
//! embedding program already names differently) get a fixed replacement.

use std::collections::BTreeMap;
use std::path::Path;

/// Built-in identifier substitutions.
///
/// `default` is a C keyword; `controller_base` is the legacy name of the
/// keypad frame asset.
pub const BUILTIN_OVERRIDES: &[(&str, &str)] = &[
    ("controller_base", "keypad_frame_graphic"),
    ("default", "default_keypad_image"),
];

/// C89/C99/C11 keywords. A derived name that lands on one of these will not
/// compile as an array name.
const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool",
    "_Complex", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert", "_Thread_local",
];

/// Exact-match map from a derived name to the identifier actually emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, String>,
}

impl Default for OverrideTable {
    fn default() -> Self {
        let entries = BUILTIN_OVERRIDES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self { entries }
    }
}

impl OverrideTable {
    /// A table with no entries at all, not even the built-ins.
    pub fn empty() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Add extra entries on top of the current ones. Later entries win.
    pub fn with_extra<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (from, to) in extra {
            self.entries.insert(from.into(), to.into());
        }
        self
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) -> Option<String> {
        self.entries.insert(from.into(), to.into())
    }

    /// Resolve `name` through the table, returning it unchanged on a miss.
    pub fn apply<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// File name without its final extension, the way the array name sees it.
///
/// Leading-dot names such as `.png` keep their full text, matching
/// [`Path::file_stem`].
pub fn asset_stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/// Mechanical part of the derivation: stem with `-` replaced by `_`.
pub fn raw_identifier(path: &Path) -> String {
    asset_stem(path).replace('-', "_")
}

/// Full derivation: [`raw_identifier`] followed by the override lookup.
pub fn derive_identifier(path: &Path, overrides: &OverrideTable) -> String {
    let raw = raw_identifier(path);
    overrides.apply(&raw).to_string()
}

/// Whether `name` is usable as a C identifier: non-empty, starts with a
/// letter or `_`, contains only ASCII alphanumerics and `_`, and is not a
/// keyword.
pub fn is_valid_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    !is_c_keyword(name)
}

pub fn is_c_keyword(name: &str) -> bool {
    C_KEYWORDS.contains(&name)
}
