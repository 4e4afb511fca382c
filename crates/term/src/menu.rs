//! Menus shown outside of active play, and the cursor that walks them.

use crate::types::{Command, SessionPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Settings,
    Resume,
    Retry,
    BackToTitle,
    /// Cycles the look-ahead length.
    NextPieces,
    /// Waits for the next key press and binds it to the command.
    Rebind(Command),
    Back,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Start => "Start",
            MenuItem::Settings => "Settings",
            MenuItem::Resume => "Resume",
            MenuItem::Retry => "Retry",
            MenuItem::BackToTitle => "Back to Title",
            MenuItem::NextPieces => "Next pieces",
            MenuItem::Rebind(command) => command.as_str(),
            MenuItem::Back => "Back",
        }
    }
}

const TITLE_MENU: &[MenuItem] = &[MenuItem::Start, MenuItem::Settings];
const SETTINGS_MENU: &[MenuItem] = &[
    MenuItem::NextPieces,
    MenuItem::Rebind(Command::MoveLeft),
    MenuItem::Rebind(Command::MoveRight),
    MenuItem::Rebind(Command::SoftDrop),
    MenuItem::Rebind(Command::HardDrop),
    MenuItem::Rebind(Command::RotateLeft),
    MenuItem::Rebind(Command::RotateRight),
    MenuItem::Rebind(Command::Hold),
    MenuItem::Rebind(Command::TogglePause),
    MenuItem::Back,
];
const PAUSE_MENU: &[MenuItem] = &[MenuItem::Resume, MenuItem::Retry, MenuItem::BackToTitle];
const GAME_OVER_MENU: &[MenuItem] = &[MenuItem::Retry, MenuItem::BackToTitle];

/// Items offered in a phase; empty while playing.
pub fn menu_for(phase: SessionPhase) -> &'static [MenuItem] {
    match phase {
        SessionPhase::Title => TITLE_MENU,
        SessionPhase::Settings => SETTINGS_MENU,
        SessionPhase::Paused => PAUSE_MENU,
        SessionPhase::GameOver => GAME_OVER_MENU,
        SessionPhase::Playing => &[],
    }
}

/// Selection within the current phase's menu.
///
/// The cursor returns to the first item whenever the phase changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCursor {
    phase: SessionPhase,
    index: usize,
}

impl MenuCursor {
    pub fn new(phase: SessionPhase) -> Self {
        Self { phase, index: 0 }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Follow the session into `phase`, resetting the selection on change.
    pub fn sync(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            *self = Self::new(phase);
        }
    }

    pub fn items(&self) -> &'static [MenuItem] {
        menu_for(self.phase)
    }

    pub fn selected(&self) -> Option<MenuItem> {
        self.items().get(self.index).copied()
    }

    pub fn up(&mut self) {
        let len = self.items().len();
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }

    pub fn down(&mut self) {
        let len = self.items().len();
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }
}

impl Default for MenuCursor {
    fn default() -> Self {
        Self::new(SessionPhase::Title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_both_ways() {
        let mut c = MenuCursor::new(SessionPhase::Paused);
        assert_eq!(c.selected(), Some(MenuItem::Resume));
        c.up();
        assert_eq!(c.selected(), Some(MenuItem::BackToTitle));
        c.down();
        c.down();
        assert_eq!(c.selected(), Some(MenuItem::Retry));
    }

    #[test]
    fn sync_resets_only_on_phase_change() {
        let mut c = MenuCursor::new(SessionPhase::Title);
        c.down();
        c.sync(SessionPhase::Title);
        assert_eq!(c.selected(), Some(MenuItem::Settings));
        c.sync(SessionPhase::Settings);
        assert_eq!(c.index(), 0);
        assert_eq!(c.selected(), Some(MenuItem::NextPieces));
    }

    #[test]
    fn settings_offers_every_command_for_rebinding() {
        let rebinds: Vec<Command> = menu_for(SessionPhase::Settings)
            .iter()
            .filter_map(|item| match item {
                MenuItem::Rebind(command) => Some(*command),
                _ => None,
            })
            .collect();
        assert_eq!(rebinds, Command::ALL);

        let mut c = MenuCursor::new(SessionPhase::Settings);
        c.up();
        assert_eq!(c.selected(), Some(MenuItem::Back));
    }

    #[test]
    fn playing_has_no_menu() {
        let mut c = MenuCursor::new(SessionPhase::Playing);
        c.down();
        assert_eq!(c.selected(), None);
        assert_eq!(c.index(), 0);
    }
}
