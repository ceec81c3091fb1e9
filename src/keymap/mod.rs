//! Keyboard shortcut table

use crate::state::FormatKind;

/// A key press as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Ctrl on most platforms, Cmd on macOS
    pub fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Format(FormatKind),
    Undo,
    Redo,
}

/// Shift requirement of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShiftRule {
    Any,
    Required,
    Forbidden,
}

#[derive(Debug, Clone)]
struct Binding {
    key: char,
    shift: ShiftRule,
    action: ShortcutAction,
}

/// Command-modifier shortcuts, checked in order
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Default for Keymap {
    fn default() -> Self {
        let binding = |key, shift, action| Binding { key, shift, action };
        Self {
            bindings: vec![
                binding('b', ShiftRule::Any, ShortcutAction::Format(FormatKind::Bold)),
                binding('i', ShiftRule::Any, ShortcutAction::Format(FormatKind::Italic)),
                binding('u', ShiftRule::Any, ShortcutAction::Format(FormatKind::Underline)),
                binding('z', ShiftRule::Required, ShortcutAction::Redo),
                binding('z', ShiftRule::Forbidden, ShortcutAction::Undo),
                binding('y', ShiftRule::Any, ShortcutAction::Redo),
            ],
        }
    }
}

impl Keymap {
    /// Resolve a chord; `None` means the host keeps its default handling
    pub fn resolve(&self, chord: &KeyChord) -> Option<ShortcutAction> {
        if !chord.has_command_modifier() {
            return None;
        }
        let mut chars = chord.key.chars();
        let key = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() {
            return None;
        }

        self.bindings
            .iter()
            .find(|b| {
                b.key == key
                    && match b.shift {
                        ShiftRule::Any => true,
                        ShiftRule::Required => chord.shift,
                        ShiftRule::Forbidden => !chord.shift,
                    }
            })
            .map(|b| b.action)
    }
}
