//! Terminal runner (default binary).
//!
//! Reads configuration from the environment, then runs the game with
//! crossterm input and the framebuffer renderer until the player quits.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_blockfall::app::{App, Flow};
use tui_blockfall::config::AppConfig;
use tui_blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::TICK_MS;

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    for warning in &config.warnings {
        eprintln!("[config] {}", warning);
    }

    let mut app = App::new(&config, clock_seed());
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    for game in app.results() {
        eprintln!("[session] game over: score {} level {}", game.score, game.level);
    }
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        if app.needs_redraw(viewport) {
            app.render_into(&view, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    app.invalidate();
                }
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            app.advance(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}
