//! Logical keys and held-key tracking

use serde::{Deserialize, Serialize};

use crate::consts::ROTATE_STEP;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    RotateLeft,
    RotateRight,
    Hook,
}

impl Key {
    /// Logical name, or the raw toolkit name the window layer forwards
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rotate_left" | "Left" => Some(Key::RotateLeft),
            "rotate_right" | "Right" => Some(Key::RotateRight),
            "hook" | "space" => Some(Key::Hook),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::RotateLeft => "rotate_left",
            Key::RotateRight => "rotate_right",
            Key::Hook => "hook",
        }
    }

    /// Heading change applied when the key goes down
    pub fn rotation(&self) -> Option<f64> {
        match self {
            Key::RotateLeft => Some(-ROTATE_STEP),
            Key::RotateRight => Some(ROTATE_STEP),
            Key::Hook => None,
        }
    }
}

/// Keys currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    keys: Vec<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the key was already held
    pub fn press(&mut self, key: Key) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Returns false if the key was not held
    pub fn release(&mut self, key: Key) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| *k != key);
        self.keys.len() != before
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}
