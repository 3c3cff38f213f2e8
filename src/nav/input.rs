//! Platform-neutral input events and the key-to-intent table.

use crate::nav::state::Intent;

/// Normalized key symbol. Presenters translate platform key codes into this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySym {
    /// A printable character.
    Char(char),
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Anything the player has no use for.
    Other,
}

impl KeySym {
    /// Case-fold letters and map `' '` to [`KeySym::Space`].
    pub fn normalized(self) -> Self {
        match self {
            Self::Char(' ') => Self::Space,
            Self::Char(c) => Self::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// Raw input record delivered by a presenter. Coordinates are canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary pointer button pressed.
    PointerDown {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
    },
    /// Primary pointer button released.
    PointerUp {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
    },
    /// Pointer moved.
    PointerMove {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
    },
    /// Key pressed.
    Key(KeySym),
    /// The display surface was asked to close.
    CloseRequested,
}

/// Event-to-intent table keyed by normalized [`KeySym`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    table: Vec<(KeySym, Intent)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            table: vec![
                (KeySym::Char('s'), Intent::Advance),
                (KeySym::ArrowDown, Intent::Advance),
                (KeySym::Char('w'), Intent::Retreat),
                (KeySym::ArrowUp, Intent::Retreat),
                (KeySym::Space, Intent::TogglePause),
                (KeySym::Char('h'), Intent::ToggleUi),
                (KeySym::Char('q'), Intent::Quit),
            ],
        }
    }
}

impl KeyBindings {
    /// An empty table.
    pub fn empty() -> Self {
        Self { table: Vec::new() }
    }

    /// Bind `key` to `intent`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: KeySym, intent: Intent) {
        let key = key.normalized();
        self.table.retain(|(k, _)| *k != key);
        self.table.push((key, intent));
    }

    /// Intent bound to `key`, if any.
    pub fn lookup(&self, key: KeySym) -> Option<Intent> {
        let key = key.normalized();
        self.table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, intent)| *intent)
    }

    /// All bindings in table order.
    pub fn iter(&self) -> impl Iterator<Item = &(KeySym, Intent)> {
        self.table.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/input.rs"]
mod tests;
