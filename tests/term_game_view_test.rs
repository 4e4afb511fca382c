use tui_blockfall::core::{GameConfig, GameSnapshot, Piece, Session};
use tui_blockfall::term::{AnchorY, GameView, MenuCursor, Screen, Viewport};
use tui_blockfall::types::{Color, Command, PieceKind, SessionPhase};

fn playing_snapshot() -> GameSnapshot {
    let mut session = Session::new(GameConfig::default(), 1);
    session.start();
    session.snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = playing_snapshot();
    let view = GameView::default();

    // cell_w=2, cell_h=1: 20x20 well plus border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = playing_snapshot();
    snap.board[19][0] = Some(Color::Cyan);
    snap.active = None;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_ghost_below_active_piece() {
    let snap = playing_snapshot();
    let active = snap.active.unwrap();
    let ghost_y = snap.ghost_y.unwrap();
    assert!(ghost_y > active.y);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let (dx, dy) = active.piece.cells().next().unwrap();
    let x = 1 + (active.x + dx) as u16 * 2;
    assert_eq!(fb.get(x, 1 + (active.y + dy) as u16).unwrap().ch, '█');
    assert_eq!(fb.get(x, 1 + (ghost_y + dy) as u16).unwrap().ch, '░');
}

#[test]
fn term_view_draws_side_panels_when_wide_enough() {
    let mut snap = playing_snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.hold = Some(Piece::new(PieceKind::T));

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let text = fb.text();
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("LEVEL"));
    assert!(text.contains("HOLD"));
    assert!(text.contains("NEXT"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = playing_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));
    // start_y = (30 - 22) / 2 = 4
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = playing_snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_title_screen_lists_menu() {
    let snap = GameSnapshot::default();
    let fb = GameView::default().render(&snap, Viewport::new(60, 20));
    let text = fb.text();
    assert!(text.contains("B L O C K F A L L"));
    assert!(text.contains("> Start"));
    assert!(text.contains("Settings"));
    assert!(!text.contains('┌'));
}

#[test]
fn term_view_settings_lists_count_and_bindings() {
    let mut snap = GameSnapshot::default();
    snap.phase = SessionPhase::Settings;
    snap.next_pieces_count = 3;
    let bindings = vec![
        (Command::MoveLeft, "ArrowLeft".to_string()),
        (Command::Hold, "Space".to_string()),
    ];

    let screen = Screen::new(&snap).with_bindings(&bindings);
    let fb = GameView::default().render_screen(&screen, Viewport::new(60, 24));
    let text = fb.text();
    assert!(text.contains("Next pieces: 3"));
    assert!(text.contains("moveLeft"));
    assert!(text.contains("ArrowLeft"));
    assert!(text.contains("Space"));
}

#[test]
fn term_view_game_over_shows_score_and_menu() {
    let mut snap = playing_snapshot();
    snap.phase = SessionPhase::GameOver;
    snap.active = None;
    snap.score = 4300;

    let mut menu = MenuCursor::new(SessionPhase::GameOver);
    menu.down();
    let screen = Screen::new(&snap).with_menu(menu);
    let text = GameView::default().render_screen(&screen, Viewport::new(60, 22)).text();
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("4300"));
    assert!(text.contains("> Back to Title"));
}
