//! Key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
    /// Shown in the status bar hints.
    pub label: &'static str,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode, label: &'static str) -> Self {
        Self {
            modifiers,
            code,
            label,
        }
    }

    pub const fn key(code: KeyCode, label: &'static str) -> Self {
        Self::new(KeyModifiers::NONE, code, label)
    }

    pub const fn ctrl(code: KeyCode, label: &'static str) -> Self {
        Self::new(KeyModifiers::CONTROL, code, label)
    }

    /// Shift is ignored so that `+` works on layouts that need it.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers.difference(KeyModifiers::SHIFT) == self.modifiers && key.code == self.code
    }
}

pub struct DefaultKeymap;

impl DefaultKeymap {
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'), "q");
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'), "^c");
    pub const CLOSE: KeyBinding = KeyBinding::key(KeyCode::Esc, "esc");
    pub const REFRESH: KeyBinding = KeyBinding::key(KeyCode::Char('r'), "r");

    pub const ZOOM_IN: KeyBinding = KeyBinding::key(KeyCode::Char('+'), "+");
    pub const ZOOM_IN_ALT: KeyBinding = KeyBinding::key(KeyCode::Char('='), "=");
    pub const ZOOM_OUT: KeyBinding = KeyBinding::key(KeyCode::Char('-'), "-");
    pub const NEXT_PIN: KeyBinding = KeyBinding::key(KeyCode::Char('n'), "n");
    pub const SELECT_CENTER: KeyBinding = KeyBinding::key(KeyCode::Char('l'), "l");
    pub const CYCLE_STYLE: KeyBinding = KeyBinding::key(KeyCode::Char('s'), "s");
    pub const TOGGLE_THEME: KeyBinding = KeyBinding::key(KeyCode::Char('t'), "t");

    pub const SEARCH: KeyBinding = KeyBinding::key(KeyCode::Char('/'), "/");
    pub const FILTER: KeyBinding = KeyBinding::key(KeyCode::Char('f'), "f");
    pub const MODAL: KeyBinding = KeyBinding::key(KeyCode::Char('m'), "m");
    pub const SHARE: KeyBinding = KeyBinding::key(KeyCode::Char('y'), "y");
    pub const ADD_PIN: KeyBinding = KeyBinding::key(KeyCode::Char('a'), "a");
}
