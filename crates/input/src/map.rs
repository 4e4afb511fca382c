//! Key mapping from terminal events to engine commands and menu actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Command;

/// Parse a key identifier from configuration.
///
/// Accepts `ArrowLeft`/`ArrowRight`/`ArrowUp`/`ArrowDown`, `Space` (or a
/// literal `" "`), `Enter`, `Escape`, `Tab`, `Backspace`, or any single
/// character. Named keys are case-insensitive.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match name.to_ascii_lowercase().as_str() {
        "arrowleft" | "left" => Some(KeyCode::Left),
        "arrowright" | "right" => Some(KeyCode::Right),
        "arrowup" | "up" => Some(KeyCode::Up),
        "arrowdown" | "down" => Some(KeyCode::Down),
        "space" => Some(KeyCode::Char(' ')),
        "enter" => Some(KeyCode::Enter),
        "escape" | "esc" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        _ => None,
    }
}

/// Display name of a key, in the same vocabulary [`parse_key`] accepts.
pub fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        other => format!("{:?}", other),
    }
}

fn same_key(bound: KeyCode, pressed: KeyCode) -> bool {
    match (bound, pressed) {
        (KeyCode::Char(a), KeyCode::Char(b)) => a.eq_ignore_ascii_case(&b),
        (a, b) => a == b,
    }
}

/// Command -> key table.
///
/// Letters match regardless of shift state. When two commands share a key the
/// one earlier in [`Command::ALL`] wins; [`KeyBindings::shadowed`] lists the
/// losers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    keys: [KeyCode; Command::ALL.len()],
}

impl KeyBindings {
    fn slot(command: Command) -> usize {
        Command::ALL
            .iter()
            .position(|&c| c == command)
            .unwrap_or_default()
    }

    pub fn key_for(&self, command: Command) -> KeyCode {
        self.keys[Self::slot(command)]
    }

    pub fn set(&mut self, command: Command, key: KeyCode) {
        self.keys[Self::slot(command)] = key;
    }

    /// Builder-style [`KeyBindings::set`].
    pub fn with(mut self, command: Command, key: KeyCode) -> Self {
        self.set(command, key);
        self
    }

    /// `(command, key)` pairs in binding-table order.
    pub fn iter(&self) -> impl Iterator<Item = (Command, KeyCode)> + '_ {
        Command::ALL.iter().copied().zip(self.keys.iter().copied())
    }

    /// `(shadowed, winner)` pairs for commands whose key is already taken by
    /// a command earlier in the table.
    pub fn shadowed(&self) -> Vec<(Command, Command)> {
        let mut out = Vec::new();
        for (i, (command, key)) in self.iter().enumerate() {
            if let Some((winner, _)) = self.iter().take(i).find(|&(_, k)| same_key(k, key)) {
                out.push((command, winner));
            }
        }
        out
    }

    /// Map a key event to a command. Key releases map to nothing; terminal
    /// auto-repeat maps like a fresh press.
    pub fn command_for(&self, key: KeyEvent) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        self.iter()
            .find(|&(_, bound)| same_key(bound, key.code))
            .map(|(command, _)| command)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            keys: [
                KeyCode::Left,
                KeyCode::Right,
                KeyCode::Down,
                KeyCode::Up,
                KeyCode::Char('a'),
                KeyCode::Char('f'),
                KeyCode::Char(' '),
                KeyCode::Char('p'),
            ],
        }
    }
}

/// Navigation on the title, settings, pause and game-over screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Up,
    Down,
    Select,
    Back,
}

/// Map a key event to a menu action.
pub fn menu_action(key: KeyEvent) -> Option<MenuAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(MenuAction::Up),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(MenuAction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(MenuAction::Select),
        KeyCode::Esc | KeyCode::Backspace => Some(MenuAction::Back),
        _ => None,
    }
}

/// Keys that always quit and so can never be bound to a command.
pub fn is_reserved(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q' | 'Q'))
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    is_reserved(key.code)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
