//! Reading and writing `.properties` translation files.
//!
//! Format notes:
//! - `#` and `!` start comment lines; blank lines are ignored.
//! - The separator is the first unescaped `=`. `:` is an ordinary character,
//!   so namespaced keys like `ns:menu.title` are stored verbatim.
//! - A line ending in an odd number of backslashes continues on the next line.
//! - `\n`, `\r`, `\t`, `\f` and `\uXXXX` are unescaped, including UTF-16
//!   surrogate pairs; `\c` becomes `c`. A malformed `\u` escape is kept
//!   verbatim, backslash included.
//! - A leading byte order mark is ignored.

use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::Path,
    str::Chars,
};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Comment line opening the block of retained unused entries.
pub const UNUSED_MARKER: &str = "### Unused keys: ###";

/// Character produced when a file contained bytes that were not valid UTF-8.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// A single `key=value` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// True if the value carries a replacement character from a broken encoding.
    pub fn has_invalid_character(&self) -> bool {
        self.value.contains(REPLACEMENT_CHARACTER)
    }
}

/// Ordered key/value content of one translation file.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps the
/// position of the first declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].value = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(Entry { key, value });
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].value.as_str())
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose value contains [`REPLACEMENT_CHARACTER`].
    pub fn invalid_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.has_invalid_character())
    }
}

impl FromIterator<Entry> for Translations {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        let mut translations = Translations::new();
        for entry in iter {
            translations.insert(entry.key, entry.value);
        }
        translations
    }
}

// ============================================================
// Reader
// ============================================================

/// Load a translation file.
///
/// Invalid UTF-8 does not fail the load: offending bytes decode to
/// [`REPLACEMENT_CHARACTER`] so the entry can be flagged and written back.
pub fn load(path: &Path) -> Result<Translations> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(parse(&String::from_utf8_lossy(&bytes)))
}

/// Parse `.properties` text.
pub fn parse(content: &str) -> Translations {
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);
    let mut translations = Translations::new();
    for line in logical_lines(content) {
        let (key, value) = split_entry(&line);
        translations.insert(key, value);
    }
    translations
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// Join continued lines and drop comments and blank lines.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in content.split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = raw.trim_start_matches(is_whitespace);

        let line = match current.take() {
            Some(mut pending) => {
                pending.push_str(trimmed);
                pending
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };

        let trailing_backslashes = line.chars().rev().take_while(|&c| c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            let mut line = line;
            line.pop();
            current = Some(line);
        } else {
            lines.push(line);
        }
    }

    // A continuation at end of input still yields its entry.
    if let Some(line) = current {
        lines.push(line);
    }

    lines
}

/// Split a logical line into an unescaped key and value.
fn split_entry(line: &str) -> (String, String) {
    let mut chars = line.chars();
    let mut key = String::new();
    // Unescaped whitespace seen in the key, only kept if more key text follows.
    let mut pending_ws = String::new();
    let mut has_separator = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                key.push_str(&pending_ws);
                pending_ws.clear();
                unescape_next(&mut chars, &mut key);
            }
            '=' => {
                has_separator = true;
                break;
            }
            c if is_whitespace(c) => pending_ws.push(c),
            c => {
                key.push_str(&pending_ws);
                pending_ws.clear();
                key.push(c);
            }
        }
    }

    if !has_separator {
        return (key, String::new());
    }

    let rest = chars.as_str().trim_start_matches(is_whitespace);
    (key, unescape(rest))
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            unescape_next(&mut chars, &mut out);
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode the escape sequence following a backslash into `out`.
///
/// A backslash at the very end of the text is dropped.
fn unescape_next(chars: &mut Chars<'_>, out: &mut String) {
    let Some(c) = chars.next() else {
        return;
    };
    match c {
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        't' => out.push('\t'),
        'f' => out.push('\u{000C}'),
        'u' => match decode_unicode_escape(chars) {
            Some(decoded) => out.push(decoded),
            // Malformed escape or unpaired surrogate: the hex digits that
            // follow are read as plain text.
            None => out.push_str("\\u"),
        },
        other => out.push(other),
    }
}

/// Decode the `XXXX` after `\u`, joining a high surrogate with the `\uXXXX`
/// low surrogate that must follow it. Input is consumed only on success.
fn decode_unicode_escape(chars: &mut Chars<'_>) -> Option<char> {
    let rest = chars.as_str();
    let unit = hex_unit(rest)?;

    if let Some(decoded) = char::from_u32(unit) {
        chars.nth(3);
        return Some(decoded);
    }
    if !(0xD800..0xDC00).contains(&unit) {
        return None;
    }

    // `hex_unit` matched four ASCII digits, so byte 4 is a char boundary.
    let low = rest[4..]
        .strip_prefix("\\u")
        .and_then(hex_unit)
        .filter(|low| (0xDC00..0xE000).contains(low))?;
    let decoded = char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))?;
    // XXXX\uXXXX
    chars.nth(9);
    Some(decoded)
}

fn hex_unit(text: &str) -> Option<u32> {
    let hex = text
        .get(..4)
        .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()))?;
    u32::from_str_radix(hex, 16).ok()
}

// ============================================================
// Writer
// ============================================================

/// Render entries as `.properties` text.
///
/// `kept` entries come first. A non-empty `unused` slice is appended after a
/// blank line and the [`UNUSED_MARKER`] comment.
pub fn render(kept: &[Entry], unused: Option<&[Entry]>) -> String {
    let mut out = String::new();
    for entry in kept {
        write_entry(&mut out, entry);
    }

    if let Some(unused) = unused.filter(|u| !u.is_empty()) {
        out.push('\n');
        out.push_str(UNUSED_MARKER);
        out.push('\n');
        for entry in unused {
            write_entry(&mut out, entry);
        }
    }

    out
}

fn write_entry(out: &mut String, entry: &Entry) {
    escape_key(out, &entry.key);
    out.push('=');
    escape_value(out, &entry.value);
    out.push('\n');
}

fn escape_key(out: &mut String, key: &str) {
    for (i, c) in key.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '=' => out.push_str("\\="),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ' ' => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\u{000C}' => out.push_str("\\f"),
            '#' | '!' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}

fn escape_value(out: &mut String, value: &str) {
    let mut leading = true;
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ' ' if leading => out.push_str("\\ "),
            '\t' if leading => out.push_str("\\t"),
            '\u{000C}' if leading => out.push_str("\\f"),
            c => out.push(c),
        }
        leading = leading && is_whitespace(c);
    }
}

/// Replace the content of `path` atomically.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the target, so readers never observe a partial file and a
/// failure leaves the previous content in place. An existing target keeps
/// its permissions.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush temporary file for {}", path.display()))?;
    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
    }
    tmp.persist(path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}
