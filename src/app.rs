//! Front-end controller: routes key events and frame time into a session.
//!
//! Everything here is synchronous and terminal-free so it can be driven from
//! tests; the binary only supplies crossterm events, elapsed time and a
//! framebuffer to draw.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::AppConfig;
use crate::core::{GameSnapshot, Session, SessionEvent};
use crate::input::{is_reserved, key_name, menu_action, should_quit, KeyBindings, MenuAction};
use crate::term::{FrameBuffer, GameView, MenuCursor, MenuItem, Screen, Viewport};
use crate::types::{Command, SessionPhase, MAX_NEXT_PIECES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub score: u32,
    pub level: u32,
}

pub struct App {
    session: Session,
    bindings: KeyBindings,
    binding_rows: Vec<(Command, String)>,
    menu: MenuCursor,
    /// Settings row waiting for its new key.
    capturing: Option<Command>,
    snapshot: GameSnapshot,
    results: Vec<GameResult>,
    drawn: Option<(u64, MenuCursor, Option<Command>, Viewport)>,
}

impl App {
    pub fn new(config: &AppConfig, seed: u32) -> Self {
        Self {
            session: Session::new(config.game, seed),
            bindings: config.bindings,
            binding_rows: binding_rows(&config.bindings),
            menu: MenuCursor::new(SessionPhase::Title),
            capturing: None,
            snapshot: GameSnapshot::default(),
            results: Vec::new(),
            drawn: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn menu(&self) -> MenuCursor {
        self.menu
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Command whose new key is being awaited on the settings screen.
    pub fn capturing(&self) -> Option<Command> {
        self.capturing
    }

    /// Games finished so far, oldest first.
    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if let Some(command) = self.capturing {
            return self.capture_key(command, key);
        }
        if should_quit(key) {
            return Flow::Quit;
        }

        let phase = self.session.phase();
        let consumed = match self.bindings.command_for(key) {
            // While playing every bound key belongs to the game, even when
            // the command is rejected.
            Some(command) if phase == SessionPhase::Playing => {
                self.session.apply(command);
                true
            }
            Some(Command::TogglePause) if phase == SessionPhase::Paused => {
                self.session.toggle_pause()
            }
            _ => false,
        };

        if !consumed && phase != SessionPhase::Playing {
            if let Some(action) = menu_action(key) {
                self.handle_menu(action);
            }
        }

        self.after_update();
        Flow::Continue
    }

    /// Bind the next pressed key to `command`. Esc cancels and the reserved
    /// quit keys are ignored; Ctrl-C still quits.
    fn capture_key(&mut self, command: Command, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }
        match key.code {
            KeyCode::Esc => self.capturing = None,
            code if is_reserved(code) => {}
            KeyCode::Char(c) => self.rebind(command, KeyCode::Char(c.to_ascii_lowercase())),
            code => self.rebind(command, code),
        }
        Flow::Continue
    }

    fn rebind(&mut self, command: Command, code: KeyCode) {
        self.bindings.set(command, code);
        self.binding_rows = binding_rows(&self.bindings);
        self.capturing = None;
    }

    fn handle_menu(&mut self, action: MenuAction) {
        match action {
            MenuAction::Up => self.menu.up(),
            MenuAction::Down => self.menu.down(),
            MenuAction::Back => match self.session.phase() {
                SessionPhase::Settings => {
                    self.session.close_settings();
                }
                SessionPhase::Paused => {
                    self.session.toggle_pause();
                }
                _ => {}
            },
            MenuAction::Select => {
                if let Some(item) = self.menu.selected() {
                    self.select(item);
                }
            }
        }
    }

    fn select(&mut self, item: MenuItem) {
        match item {
            MenuItem::Start => self.session.start(),
            MenuItem::Settings => self.session.open_settings(),
            MenuItem::Resume => self.session.toggle_pause(),
            MenuItem::Retry => self.session.retry(),
            MenuItem::BackToTitle => self.session.back_to_title(),
            MenuItem::NextPieces => {
                let next = self.session.config().next_pieces_count() % MAX_NEXT_PIECES + 1;
                self.session.set_next_pieces_count(next)
            }
            MenuItem::Rebind(command) => {
                self.capturing = Some(command);
                true
            }
            MenuItem::Back => self.session.close_settings(),
        };
    }

    /// Feed elapsed wall time to the gravity clock.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let ticks = self.session.tick(elapsed_ms);
        self.after_update();
        ticks
    }

    fn after_update(&mut self) {
        self.menu.sync(self.session.phase());
        for event in self.session.take_events() {
            if let SessionEvent::GameOver { score, level } = event {
                self.results.push(GameResult { score, level });
            }
        }
    }

    /// Whether the last rendered frame is out of date.
    pub fn needs_redraw(&self, viewport: Viewport) -> bool {
        self.drawn != Some(self.frame_key(viewport))
    }

    fn frame_key(&self, viewport: Viewport) -> (u64, MenuCursor, Option<Command>, Viewport) {
        (self.session.revision(), self.menu, self.capturing, viewport)
    }

    /// Force the next [`App::needs_redraw`] to report true.
    pub fn invalidate(&mut self) {
        self.drawn = None;
    }

    pub fn render_into(&mut self, view: &GameView, viewport: Viewport, fb: &mut FrameBuffer) {
        self.session.snapshot_into(&mut self.snapshot);
        let screen = Screen::new(&self.snapshot)
            .with_menu(self.menu)
            .with_bindings(&self.binding_rows)
            .with_capture(self.capturing);
        view.render_screen_into(&screen, viewport, fb);
        self.drawn = Some(self.frame_key(viewport));
    }
}

fn binding_rows(bindings: &KeyBindings) -> Vec<(Command, String)> {
    bindings
        .iter()
        .map(|(command, key)| (command, key_name(key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(app: &mut App, code: KeyCode) -> Flow {
        app.handle_key(KeyEvent::from(code))
    }

    fn app() -> App {
        App::new(&AppConfig::default(), 42)
    }

    #[test]
    fn enter_on_title_starts_game() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().phase(), SessionPhase::Playing);
        assert_eq!(app.menu().phase(), SessionPhase::Playing);
    }

    #[test]
    fn settings_cycle_next_pieces_and_return() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().phase(), SessionPhase::Settings);

        // 5 wraps to 1, then 2.
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().config().next_pieces_count(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session().phase(), SessionPhase::Title);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().queue().len(), 2);
    }

    #[test]
    fn bound_keys_drive_the_game() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        let x = app.session().active().unwrap().x;
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session().active().unwrap().x, x - 1);
        press(&mut app, KeyCode::Up);
        assert!(app.session().grid().filled_count() >= 4);
    }

    #[test]
    fn pause_menu_navigation() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.session().phase(), SessionPhase::Paused);

        // Arrow keys navigate the menu instead of moving pieces.
        press(&mut app, KeyCode::Down);
        assert_eq!(app.menu().selected(), Some(MenuItem::Retry));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().phase(), SessionPhase::Title);
    }

    #[test]
    fn pause_key_resumes() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.session().phase(), SessionPhase::Playing);
    }

    fn open_rebind(app: &mut App, command: Command) {
        press(app, KeyCode::Down);
        press(app, KeyCode::Enter);
        let row = Command::ALL.iter().position(|&c| c == command).unwrap() + 1;
        for _ in 0..row {
            press(app, KeyCode::Down);
        }
        assert_eq!(app.menu().selected(), Some(MenuItem::Rebind(command)));
        press(app, KeyCode::Enter);
        assert_eq!(app.capturing(), Some(command));
    }

    #[test]
    fn rebound_hold_key_drives_the_game() {
        let mut app = app();
        open_rebind(&mut app, Command::Hold);
        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.capturing(), None);
        assert_eq!(app.bindings().key_for(Command::Hold), KeyCode::Char('c'));

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().phase(), SessionPhase::Playing);
        assert_eq!(app.session().held(), None);

        // Space is no longer bound to anything.
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session().held(), None);
        press(&mut app, KeyCode::Char('c'));
        assert!(app.session().held().is_some());
    }

    #[test]
    fn capture_ignores_quit_key_and_esc_cancels() {
        let mut app = app();
        open_rebind(&mut app, Command::HardDrop);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Continue);
        assert_eq!(app.capturing(), Some(Command::HardDrop));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.capturing(), None);
        assert_eq!(app.session().phase(), SessionPhase::Settings);
        assert_eq!(app.bindings().key_for(Command::HardDrop), KeyCode::Up);
    }

    #[test]
    fn capture_prompt_is_drawn() {
        let mut app = app();
        let view = GameView::default();
        let vp = Viewport::new(60, 24);
        let mut fb = FrameBuffer::new(60, 24);
        open_rebind(&mut app, Command::MoveLeft);
        assert!(app.needs_redraw(vp));
        app.render_into(&view, vp, &mut fb);
        assert!(fb.text().contains("press a key"));

        press(&mut app, KeyCode::Char('h'));
        assert!(app.needs_redraw(vp));
        app.render_into(&view, vp, &mut fb);
        assert!(!fb.text().contains("press a key"));
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Flow::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Quit
        );
    }

    #[test]
    fn game_over_is_recorded() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        for _ in 0..100 {
            if app.session().game_over() {
                break;
            }
            press(&mut app, KeyCode::Up);
        }
        assert!(app.session().game_over());
        assert_eq!(app.results().len(), 1);
        assert_eq!(app.menu().selected(), Some(MenuItem::Retry));
    }

    #[test]
    fn redraw_tracks_changes() {
        let mut app = app();
        let view = GameView::default();
        let vp = Viewport::new(60, 24);
        let mut fb = FrameBuffer::new(60, 24);
        assert!(app.needs_redraw(vp));
        app.render_into(&view, vp, &mut fb);
        assert!(!app.needs_redraw(vp));
        press(&mut app, KeyCode::Down);
        assert!(app.needs_redraw(vp));
    }
}
