//! Symbolic key names to platform key codes.
//!
//! The table is data, not code: the Windows virtual-key table ships as
//! `keycodes/windows.json` and any other table with the same shape can be
//! loaded with [`KeyTable::from_json`].

use crate::errors::{InputError, Result};
use crate::events::{Chord, KeyCode, Stroke};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const WINDOWS_KEYCODES: &str = include_str!("../keycodes/windows.json");

/// Short names people write in hotkey strings, resolved to table names
const ALIASES: &[(&str, &str)] = &[
    ("CTRL", "CONTROL"),
    ("ALT", "MENU"),
    ("WIN", "LWIN"),
    ("ESC", "ESCAPE"),
    ("ENTER", "RETURN"),
    ("PGUP", "PRIOR"),
    ("PGDN", "NEXT"),
    ("DEL", "DELETE"),
    ("INS", "INSERT"),
    ("BACKSPACE", "BACK"),
];

const DIGITS: [&str; 10] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE",
];

/// Immutable name to code mapping
#[derive(Debug, Clone)]
pub struct KeyTable {
    codes: HashMap<String, KeyCode>,
}

impl KeyTable {
    /// Windows virtual-key codes
    pub fn windows() -> Result<Self> {
        Self::from_json(WINDOWS_KEYCODES)
    }

    /// Parse a JSON object of `"NAME": code` pairs
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, u16> = serde_json::from_str(json)?;
        Ok(Self::from_pairs(raw))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_pairs<N: AsRef<str>>(pairs: impl IntoIterator<Item = (N, u16)>) -> Self {
        let codes = pairs
            .into_iter()
            .map(|(name, code)| (normalize(name.as_ref()), KeyCode(code)))
            .collect();
        Self { codes }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Table names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.codes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Case-insensitive lookup, also accepting common aliases and single digits
    pub fn get(&self, name: &str) -> Option<KeyCode> {
        let name = normalize(name);
        if let Some(code) = self.codes.get(&name) {
            return Some(*code);
        }

        let resolved = ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, target)| *target)
            .or_else(|| match name.as_bytes() {
                [digit @ b'0'..=b'9'] => Some(DIGITS[(digit - b'0') as usize]),
                _ => None,
            })?;
        self.codes.get(resolved).copied()
    }

    pub fn lookup(&self, name: &str) -> Result<KeyCode> {
        self.get(name)
            .ok_or_else(|| InputError::UnknownKey(name.trim().to_string()))
    }

    /// Parse `"ctrl+shift+r"` style text; the last token is the primary key
    /// and the rest are modifiers in the order written.
    pub fn parse_chord(&self, text: &str) -> Result<Chord> {
        let mut codes = text
            .split('+')
            .map(|token| {
                if token.trim().is_empty() {
                    Err(InputError::UnknownKey(text.to_string()))
                } else {
                    self.lookup(token)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        // split('+') always yields at least one token
        let key = codes.pop().ok_or_else(|| InputError::UnknownKey(text.to_string()))?;
        Ok(Chord::new(key).with_modifiers(codes))
    }

    /// Parse whitespace-separated strokes, e.g. `"ctrl+a ctrl+c esc"`
    pub fn parse_strokes(&self, text: &str) -> Result<Vec<Stroke>> {
        text.split_whitespace()
            .map(|token| {
                let chord = self.parse_chord(token)?;
                Ok(if chord.modifiers.is_empty() {
                    Stroke::Key(chord.key)
                } else {
                    Stroke::Chord(chord)
                })
            })
            .collect()
    }
}

/// Drop zero-width and non-breaking characters, trim and uppercase
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| {
            !matches!(
                *c,
                '\u{200B}' | // zero-width space
                '\u{200C}' | // zero-width non-joiner
                '\u{200D}' | // zero-width joiner
                '\u{00A0}' | // non-breaking space
                '\u{FEFF}' // zero-width no-break space
            )
        })
        .collect::<String>()
        .trim()
        .to_uppercase()
}
