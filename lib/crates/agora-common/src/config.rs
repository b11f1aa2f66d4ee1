//! `ConfigSet` and the env-text codec.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::keys;

/// An ordered mapping of configuration keys to string values.
///
/// Keys are case-sensitive and unique. Iteration and serialization order is
/// imposed deterministically (lexicographic) rather than tracking insertion
/// order, so two equal sets always render identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigSet {
    entries: BTreeMap<String, String>,
}

impl ConfigSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is present with a non-empty (after trim) value.
    #[must_use]
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Insert or overwrite a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Insert only when the key is absent. Returns `true` if the default
    /// was inserted. This is the precedence primitive: user/base values and
    /// earlier-layer values always win over later defaults.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value.into());
        true
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in deterministic (lexicographic) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ConfigSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ConfigSet {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ── Env text codec ───────────────────────────────────────────────────────────

/// Parse `KEY=VALUE` text into a [`ConfigSet`].
///
/// Blank lines and `#` comments are ignored; lines without `=` are skipped;
/// the split happens on the first `=` only; one level of matching single or
/// double quotes around the value is stripped.
#[must_use]
pub fn parse_env(text: &str) -> ConfigSet {
    let mut set = ConfigSet::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        set.set(key, strip_quotes(value.trim()));
    }
    set
}

/// Strip one level of matching surrounding quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Render a [`ConfigSet`] as env-file text.
///
/// Entries are grouped under the section headers from
/// [`keys::ENV_SECTIONS`]; keys outside every section land under
/// `Additional settings` in lexicographic order. `header_lines` are emitted
/// as leading comments. Re-parsing the output yields an equal set.
#[must_use]
pub fn render_env(set: &ConfigSet, header_lines: &[&str]) -> String {
    let mut out = String::new();
    out.push_str("# Agora stack configuration\n");
    for line in header_lines {
        out.push_str(&format!("# {line}\n"));
    }

    let mut written: Vec<&str> = Vec::with_capacity(set.len());
    for (section, section_keys) in keys::ENV_SECTIONS {
        let present: Vec<&str> = section_keys.iter().copied().filter(|k| set.get(k).is_some()).collect();
        if present.is_empty() {
            continue;
        }
        out.push_str(&format!("\n# {section}\n"));
        for key in present {
            // set.get cannot miss here; the key was filtered on presence.
            let value = set.get(key).unwrap_or_default();
            out.push_str(&format!("{key}={value}\n"));
            written.push(key);
        }
    }

    let remaining: Vec<(&str, &str)> = set
        .iter()
        .filter(|(k, _)| !written.contains(k))
        .collect();
    if !remaining.is_empty() {
        out.push_str("\n# Additional settings\n");
        for (key, value) in remaining {
            out.push_str(&format!("{key}={value}\n"));
        }
    }

    out
}

// ── Unit tests ───────────────────────────────────────────────────────────────
