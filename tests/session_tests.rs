//! Session tests - lifecycle, commands, scoring and game over through the
//! public API

use tui_blockfall::core::{GameConfig, Session, SessionEvent};
use tui_blockfall::types::{Color, Command, PieceKind, SessionPhase, COLS, SPAWN_X, SPAWN_Y};

fn started(seed: u32) -> Session {
    let mut session = Session::new(GameConfig::default(), seed);
    assert!(session.start());
    session
}

/// First seed whose opening piece is `kind`.
fn started_with(kind: PieceKind) -> Session {
    (1..10_000)
        .map(started)
        .find(|s| s.active().map(|a| a.piece.kind) == Some(kind))
        .expect("some seed opens with the requested piece")
}

fn fill_row_except(session: &mut Session, y: i8, gap: std::ops::RangeInclusive<i8>) {
    for x in 0..COLS as i8 {
        if !gap.contains(&x) {
            session.grid_mut().set(x, y, Some(Color::Blue));
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut session = Session::new(GameConfig::default(), 12345);
    assert_eq!(session.phase(), SessionPhase::Title);
    assert!(session.active().is_none());

    assert!(session.start());
    assert_eq!(session.phase(), SessionPhase::Playing);
    let active = session.active().unwrap();
    assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
    assert_eq!(session.queue().len(), 5);
    assert_eq!(session.score(), 0);
    assert_eq!(session.level(), 1);
}

#[test]
fn test_i_piece_clears_bottom_row() {
    let mut session = started_with(PieceKind::I);
    fill_row_except(&mut session, 19, 3..=6);

    assert!(session.move_left());
    while session.active().unwrap().y < 19 {
        assert!(session.soft_drop());
    }
    assert_eq!(session.active().unwrap().x, 3);
    assert!(session.soft_drop());

    assert_eq!(session.score(), 100);
    assert_eq!(session.grid().filled_count(), 0);
}

#[test]
fn test_vertical_i_scores_four_rows() {
    let mut session = started_with(PieceKind::I);
    for y in 16..20 {
        fill_row_except(&mut session, y, 0..=0);
    }

    assert!(session.rotate_right());
    while session.move_left() {}
    assert_eq!(session.active().unwrap().x, 0);
    assert!(session.hard_drop());

    assert_eq!(session.score(), 4000);
    assert_eq!(session.level(), 1);
    assert_eq!(session.grid().filled_count(), 0);
    assert!(session.take_events().contains(&SessionEvent::PieceLocked {
        kind: PieceKind::I,
        lines_cleared: 4,
        score_delta: 4000,
    }));
}

#[test]
fn test_hard_drop_lands_where_soft_drops_do() {
    for seed in 1..20 {
        let mut hard = started(seed);
        for x in 0..COLS as i8 {
            if x % 2 == 0 {
                hard.grid_mut().set(x, 15 + (x % 5), Some(Color::Red));
            }
        }
        let mut soft = hard.clone();

        assert_eq!(hard.ghost_y(), soft.ghost_y());
        hard.hard_drop();

        let before = soft.grid().filled_count();
        while soft.grid().filled_count() == before {
            assert!(soft.soft_drop());
        }
        assert_eq!(hard.grid(), soft.grid(), "seed {}", seed);
    }
}

#[test]
fn test_hold_with_empty_slot() {
    let mut session = started(12345);
    let old_active = session.active().unwrap().piece;
    let old_front = *session.queue().front().unwrap();

    assert!(session.hold());
    assert_eq!(session.held(), Some(old_active));
    assert_eq!(session.active().unwrap().piece, old_front);
    assert_eq!(session.queue().len(), 5);
}

#[test]
fn test_spawn_collision_ends_game_and_stops_ticks() {
    let mut session = started(3);
    for y in 1..=2 {
        fill_row_except(&mut session, y, 9..=9);
    }

    assert_eq!(session.tick(1000), 1);
    assert_eq!(session.phase(), SessionPhase::GameOver);
    assert!(session.active().is_none());
    assert!(!session.gravity().is_armed());

    let filled = session.grid().filled_count();
    assert_eq!(session.tick(60_000), 0);
    assert!(!session.apply(Command::HardDrop));
    assert_eq!(session.grid().filled_count(), filled);
}

#[test]
fn test_pause_blocks_commands_and_gravity() {
    let mut session = started(7);
    assert!(session.apply(Command::TogglePause));
    let snap = session.snapshot();
    assert!(snap.paused);

    for command in [Command::MoveLeft, Command::HardDrop, Command::Hold] {
        assert!(!session.apply(command));
    }
    assert_eq!(session.tick(5000), 0);
    assert_eq!(session.snapshot().active, snap.active);

    assert!(session.apply(Command::TogglePause));
    assert_eq!(session.tick(1000), 1);
}

#[test]
fn test_retry_and_back_to_title() {
    let mut session = started(9);
    session.hard_drop();
    session.toggle_pause();

    assert!(session.retry());
    assert_eq!(session.grid().filled_count(), 0);
    assert_eq!(session.phase(), SessionPhase::Playing);

    session.toggle_pause();
    assert!(session.back_to_title());
    assert_eq!(session.phase(), SessionPhase::Title);
    assert!(session.active().is_none());
    assert!(session.queue().is_empty());
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        Command::MoveLeft,
        Command::RotateRight,
        Command::HardDrop,
        Command::Hold,
        Command::MoveRight,
        Command::MoveRight,
        Command::HardDrop,
        Command::SoftDrop,
        Command::RotateLeft,
        Command::HardDrop,
    ];
    let mut a = started(777);
    let mut b = started(777);
    for command in script {
        assert_eq!(a.apply(command), b.apply(command));
        a.tick(250);
        b.tick(250);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_score_never_decreases() {
    let mut session = started(31);
    let mut last = 0;
    for i in 0..200 {
        if session.game_over() {
            break;
        }
        let command = [Command::MoveLeft, Command::MoveRight, Command::RotateRight][i % 3];
        session.apply(command);
        session.apply(Command::HardDrop);
        assert!(session.score() >= last);
        last = session.score();
    }
}
