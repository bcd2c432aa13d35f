use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque platform identifier for a key or mouse button.
///
/// The sequencer only compares codes; their meaning comes from the key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

impl From<u16> for KeyCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Represents the type of mouse button
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

/// A primary key pressed while the modifiers are held.
///
/// Modifiers go down in listed order and come back up in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub key: KeyCode,
    #[serde(default)]
    pub modifiers: Vec<KeyCode>,
}

impl Chord {
    pub fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: KeyCode) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = KeyCode>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }
}

impl From<KeyCode> for Chord {
    fn from(key: KeyCode) -> Self {
        Chord::new(key)
    }
}

/// One entry of a sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stroke {
    Key(KeyCode),
    Chord(Chord),
}

impl From<KeyCode> for Stroke {
    fn from(key: KeyCode) -> Self {
        Stroke::Key(key)
    }
}

impl From<Chord> for Stroke {
    fn from(chord: Chord) -> Self {
        Stroke::Chord(chord)
    }
}

/// A primitive emitted through an input backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Key {
        code: KeyCode,
        is_down: bool,
    },
    MouseButton {
        button: MouseButton,
        is_down: bool,
        x: i32,
        y: i32,
    },
    CursorMove {
        x: i32,
        y: i32,
    },
}

impl InputEvent {
    pub fn key_down(code: KeyCode) -> Self {
        InputEvent::Key { code, is_down: true }
    }

    pub fn key_up(code: KeyCode) -> Self {
        InputEvent::Key {
            code,
            is_down: false,
        }
    }

    pub fn is_down(&self) -> bool {
        match self {
            InputEvent::Key { is_down, .. } | InputEvent::MouseButton { is_down, .. } => *is_down,
            InputEvent::CursorMove { .. } => false,
        }
    }
}
