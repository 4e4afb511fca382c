//! GameView: maps a `GameSnapshot` (plus menu state) into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{ActiveSnapshot, GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::menu::{MenuCursor, MenuItem};
use crate::types::{Color, Command, SessionPhase, COLS, ROWS};

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Width of a hold/next preview: four cells of two columns.
const PREVIEW_W: u16 = 8;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything a frame shows: the session snapshot plus front-end state.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub snapshot: &'a GameSnapshot,
    pub menu: MenuCursor,
    /// `(command, key name)` pairs shown on the settings screen.
    pub bindings: &'a [(Command, String)],
    /// Command waiting for a new key, if any.
    pub capturing: Option<Command>,
}

impl<'a> Screen<'a> {
    pub fn new(snapshot: &'a GameSnapshot) -> Self {
        Self {
            snapshot,
            menu: MenuCursor::new(snapshot.phase),
            bindings: &[],
            capturing: None,
        }
    }

    pub fn with_menu(mut self, menu: MenuCursor) -> Self {
        self.menu = menu;
        self
    }

    pub fn with_bindings(mut self, bindings: &'a [(Command, String)]) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_capture(mut self, capturing: Option<Command>) -> Self {
        self.capturing = capturing;
        self
    }

    fn key_label(&self, command: Command) -> &str {
        self.bindings
            .iter()
            .find(|(c, _)| *c == command)
            .map_or("?", |(_, key)| key.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a full screen into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_screen_into(
        &self,
        screen: &Screen<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let snap = screen.snapshot;
        match snap.phase {
            SessionPhase::Title => self.draw_title(fb, screen, viewport),
            SessionPhase::Settings => self.draw_settings(fb, screen, viewport),
            SessionPhase::Playing => {
                self.draw_playfield(fb, snap, viewport);
            }
            SessionPhase::Paused => {
                let frame = self.draw_playfield(fb, snap, viewport);
                self.draw_menu_box(fb, frame, "PAUSED", None, &screen.menu);
            }
            SessionPhase::GameOver => {
                let frame = self.draw_playfield(fb, snap, viewport);
                self.draw_menu_box(fb, frame, "GAME OVER", Some(snap.score), &screen.menu);
            }
        }
    }

    pub fn render_screen(&self, screen: &Screen<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_screen_into(screen, viewport, &mut fb);
        fb
    }

    /// Render a snapshot with a default menu cursor and no binding list.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_screen_into(&Screen::new(snap), viewport, fb);
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        self.render_screen(&Screen::new(snap), viewport)
    }

    // ============== Title / settings ==============

    fn draw_title(&self, fb: &mut FrameBuffer, screen: &Screen<'_>, viewport: Viewport) {
        let heading = CellStyle::new(Rgb::new(80, 220, 220), BLACK).bold();
        let hint = CellStyle::default().dim();
        let items = screen.menu.items();

        let block_h = 4 + items.len() as u16;
        let mut y = viewport.height.saturating_sub(block_h) / 2;
        put_centered(fb, viewport, y, "B L O C K F A L L", heading);
        y = y.saturating_add(2);
        for (i, item) in items.iter().enumerate() {
            self.draw_menu_line(fb, viewport, y, item.label(), i == screen.menu.index());
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);
        put_centered(fb, viewport, y, "Up/Down move  Enter select  q quit", hint);
    }

    fn draw_settings(&self, fb: &mut FrameBuffer, screen: &Screen<'_>, viewport: Viewport) {
        let heading = CellStyle::default().bold();
        let hint = CellStyle::default().dim();
        let items = screen.menu.items();

        let block_h = 4 + items.len() as u16;
        let mut y = viewport.height.saturating_sub(block_h) / 2;
        put_centered(fb, viewport, y, "SETTINGS", heading);
        y = y.saturating_add(2);

        for (i, item) in items.iter().enumerate() {
            let selected = i == screen.menu.index();
            let text = match *item {
                MenuItem::NextPieces => {
                    format!("{}: {}", item.label(), screen.snapshot.next_pieces_count)
                }
                MenuItem::Rebind(command) if screen.capturing == Some(command) => {
                    format!("{:<12} {:>11}", item.label(), "press a key")
                }
                MenuItem::Rebind(command) => {
                    format!("{:<12} {:>11}", item.label(), screen.key_label(command))
                }
                _ => item.label().to_string(),
            };
            self.draw_menu_line(fb, viewport, y, &text, selected);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        let text = if screen.capturing.is_some() {
            "Press the new key  Esc cancel"
        } else {
            "Enter change/select  Esc back"
        };
        put_centered(fb, viewport, y, text, hint);
    }

    fn draw_menu_line(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        y: u16,
        label: &str,
        selected: bool,
    ) {
        let line = format!("{} {}", if selected { '>' } else { ' ' }, label);
        let style = if selected {
            CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold()
        } else {
            CellStyle::default()
        };
        put_centered(fb, viewport, y, &line, style);
    }

    // ============== Playfield ==============

    /// Draw the well, pieces and side panels; returns the well's frame.
    fn draw_playfield(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
    ) -> Rect {
        let board_px_w = (COLS as u16) * self.cell_w;
        let board_px_h = (ROWS as u16) * self.cell_h;
        let frame = Rect {
            x: viewport.width.saturating_sub(board_px_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_px_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_px_w + 2,
            h: board_px_h + 2,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), WELL_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), BLACK));

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell {
                    Some(color) => self.draw_block(fb, frame, x, y, *color),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost_style = CellStyle::new(Rgb::new(140, 140, 140), WELL_BG).dim();
            let ghost = ActiveSnapshot { y: ghost_y, ..active };
            for (x, y) in ghost.cells().filter_map(on_board) {
                self.fill_cell_rect(fb, frame, x, y, '░', ghost_style);
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells().filter_map(on_board) {
                self.draw_block(fb, frame, x, y, active.piece.color());
            }
        }

        self.draw_hold_panel(fb, snap, frame);
        self.draw_side_panel(fb, snap, viewport, frame);
        frame
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Rect, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Rect, x: u16, y: u16, color: Color) {
        let style = CellStyle::new(color_rgb(color), WELL_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Rect,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Draw a piece's shape with its top-left at (x, y); returns rows used.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece) -> u16 {
        let style = CellStyle::new(color_rgb(piece.color()), BLACK).bold();
        for (dx, dy) in piece.cells() {
            fb.fill_rect(
                x.saturating_add(dx as u16 * 2),
                y.saturating_add(dy as u16),
                2,
                1,
                '█',
                style,
            );
        }
        piece.shape.rows() as u16
    }

    /// Hold slot, left of the well when there is room.
    fn draw_hold_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Rect) {
        if frame.x < PREVIEW_W + 2 {
            return;
        }
        let x = frame.x - PREVIEW_W - 2;
        fb.put_str(x, frame.y, "HOLD", label_style());
        match &snap.hold {
            Some(piece) => {
                self.draw_preview(fb, x, frame.y.saturating_add(2), piece);
            }
            None => fb.put_str(x, frame.y.saturating_add(2), "-", value_style()),
        }
    }

    /// Score, level and the next queue, right of the well.
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Rect,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PREVIEW_W + 2 {
            return;
        }

        let (label, value) = (label_style(), value_style());
        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for piece in snap.next_queue.iter() {
            if y >= viewport.height {
                break;
            }
            let used = self.draw_preview(fb, panel_x, y, piece);
            y = y.saturating_add(used + 1);
        }
    }

    /// Boxed menu centered over the well (pause and game over).
    fn draw_menu_box(
        &self,
        fb: &mut FrameBuffer,
        frame: Rect,
        title: &str,
        score: Option<u32>,
        menu: &MenuCursor,
    ) {
        let items = menu.items();
        let widest = items
            .iter()
            .map(|i| i.label().chars().count() as u16 + 2)
            .chain(std::iter::once(title.chars().count() as u16))
            .max()
            .unwrap_or_default();
        let w = (widest + 4).max(16);
        let h = items.len() as u16 + if score.is_some() { 6 } else { 5 };
        let rect = Rect {
            x: frame.x.saturating_add(frame.w.saturating_sub(w) / 2),
            y: frame.y.saturating_add(frame.h.saturating_sub(h) / 2),
            w,
            h,
        };

        let fill = CellStyle::default();
        fb.fill_rect(rect.x, rect.y, rect.w, rect.h, ' ', fill);
        draw_border(fb, rect, CellStyle::new(Rgb::new(200, 200, 200), BLACK));

        let inner_x = rect.x + 2;
        let mut y = rect.y + 1;
        let heading = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
        let title_x = rect.x + w.saturating_sub(title.chars().count() as u16) / 2;
        fb.put_str(title_x, y, title, heading);
        y += 1;

        if let Some(score) = score {
            fb.put_str(inner_x, y, "Score", label_style());
            fb.put_u32(inner_x + 6, y, score, value_style());
            y += 1;
        }
        y += 1;

        for (i, item) in items.iter().enumerate() {
            let selected = i == menu.index();
            let style = if selected { heading } else { value_style() };
            fb.put_char(inner_x, y, if selected { '>' } else { ' ' }, style);
            fb.put_str(inner_x + 2, y, item.label(), style);
            y += 1;
        }
    }
}

fn on_board((x, y): (i8, i8)) -> Option<(u16, u16)> {
    if (0..COLS as i8).contains(&x) && (0..ROWS as i8).contains(&y) {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

fn draw_border(fb: &mut FrameBuffer, r: Rect, style: CellStyle) {
    if r.w < 2 || r.h < 2 {
        return;
    }
    let (right, bottom) = (r.x + r.w - 1, r.y + r.h - 1);
    fb.put_char(r.x, r.y, '┌', style);
    fb.put_char(right, r.y, '┐', style);
    fb.put_char(r.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for x in r.x + 1..right {
        fb.put_char(x, r.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in r.y + 1..bottom {
        fb.put_char(r.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}

fn put_centered(fb: &mut FrameBuffer, viewport: Viewport, y: u16, text: &str, style: CellStyle) {
    let w = text.chars().count() as u16;
    fb.put_str(viewport.width.saturating_sub(w) / 2, y, text, style);
}

fn label_style() -> CellStyle {
    CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold()
}

fn value_style() -> CellStyle {
    CellStyle::new(Rgb::new(200, 200, 200), BLACK)
}

pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
    }
}
