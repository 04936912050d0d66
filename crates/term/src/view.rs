//! SessionView: draws a [`SessionSnapshot`] into a framebuffer.
//!
//! Pure (no I/O), so every screen can be checked in unit tests by reading the
//! framebuffer back.

use crate::core::{ActiveSnapshot, GameSnapshot, RotationState};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::session::SessionSnapshot;
use crate::types::{MainMenuItem, PauseMenuItem, PieceKind, SessionMode, GRID_COLS, GRID_ROWS};

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

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const TEXT: Style = Style::new(Rgb::new(210, 210, 210), SCREEN_BG);
const LABEL: Style = TEXT.bold();
const TITLE: Style = Style::new(Rgb::new(240, 200, 80), SCREEN_BG).bold();
const SELECTED: Style = Style::new(Rgb::new(0, 0, 0), Rgb::new(240, 200, 80)).bold();
const DISABLED: Style = Style::new(Rgb::new(90, 90, 90), SCREEN_BG).dim();
const BORDER: Style = Style::new(Rgb::new(200, 200, 200), SCREEN_BG);
const EMPTY: Style = Style::new(Rgb::new(90, 90, 100), WELL_BG).dim();
const GHOST: Style = Style::new(Rgb::new(140, 140, 140), WELL_BG).dim();
const OVERLAY: Style = Style::new(Rgb::new(255, 255, 255), Rgb::new(50, 50, 70));

const PANEL_W: u16 = 14;
const MENU_W: u16 = 16;

/// Draws every session screen: main menu, game, pause menu, game over and
/// the credits page.
#[derive(Debug, Clone, Copy)]
pub struct SessionView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for SessionView {
    fn default() -> Self {
        // Two columns per cell roughly squares the cells on common fonts.
        Self { cell_w: 2 }
    }
}

impl SessionView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render the screen for the current session mode.
    ///
    /// `fb` is resized to the viewport and fully overwritten; reuse one buffer
    /// across frames.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Style::new(TEXT.fg, SCREEN_BG).glyph(' '));

        match snap.mode {
            SessionMode::MainMenu => self.draw_main_menu(fb, snap, viewport),
            SessionMode::Playing => {
                self.draw_game(fb, snap, viewport);
            }
            SessionMode::Paused => {
                let well = self.draw_game(fb, snap, viewport);
                self.draw_pause_menu(fb, well, snap.pause_selection);
            }
            SessionMode::GameOver => {
                let well = self.draw_game(fb, snap, viewport);
                self.draw_game_over(fb, well, snap.game.score);
            }
        }
    }

    /// Render the credits page, shown over any mode until a key is pressed.
    pub fn render_credits_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Style::new(TEXT.fg, SCREEN_BG).glyph(' '));

        let lines: [(&str, Style); 6] = [
            ("RUSSIAN BLOCKS", TITLE),
            ("", TEXT),
            ("A falling block puzzle", TEXT),
            ("for the terminal", TEXT),
            ("", TEXT),
            ("press any key", DISABLED),
        ];
        let top = viewport.height.saturating_sub(lines.len() as u16) / 2;
        for (i, (text, style)) in lines.iter().enumerate() {
            fb.text_centered(0, viewport.width, top + i as u16, text, *style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_main_menu(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, viewport: Viewport) {
        let rows = MainMenuItem::ALL.len() as u16 + 4;
        let top = viewport.height.saturating_sub(rows) / 2;
        fb.text_centered(0, viewport.width, top, "RUSSIAN BLOCKS", TITLE);

        let menu_x = viewport.width.saturating_sub(MENU_W) / 2;
        for item in MainMenuItem::ALL {
            let y = top + 2 + item.index() as u16;
            let style = if !snap.main_enabled[item.index()] {
                DISABLED
            } else if snap.main_selection == Some(item) {
                SELECTED
            } else {
                TEXT
            };
            menu_row(fb, menu_x, y, item.label(), style);
        }

        fb.text_centered(
            0,
            viewport.width,
            top + rows - 1,
            "up/down select  enter start",
            DISABLED,
        );
    }

    /// Draws the well and side panel; returns the well frame rectangle.
    fn draw_game(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, viewport: Viewport) -> Rect {
        let game = &snap.game;
        let well_w = GRID_COLS as u16 * self.cell_w + 2;
        let well_h = GRID_ROWS as u16 + 2;
        let total_w = well_w + 2 + PANEL_W;
        let well = Rect {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(well_h) / 2,
            w: well_w,
            h: well_h,
        };

        draw_border(fb, well, BORDER);
        for (y, row) in game.board.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                let glyph = match PieceKind::from_id(id) {
                    Some(kind) => piece_style(kind).glyph('█'),
                    None => EMPTY.glyph('·'),
                };
                self.fill_cell(fb, well, x as i8, y as i8, glyph.ch, glyph.style);
            }
        }

        if let Some(active) = game.active {
            if let Some(ghost_y) = game.ghost_y {
                if ghost_y != active.y {
                    let ghost = ActiveSnapshot {
                        y: ghost_y,
                        ..active
                    };
                    self.draw_piece(fb, well, &ghost, '░', GHOST);
                }
            }
            self.draw_piece(fb, well, &active, '█', piece_style(active.kind));
        }

        self.draw_panel(fb, snap, well, viewport);
        well
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        well: Rect,
        viewport: Viewport,
    ) {
        let x = well.x + well.w + 2;
        if x >= viewport.width {
            return;
        }
        let game: &GameSnapshot = &snap.game;

        let mut y = well.y;
        for (label, value) in [("SCORE", game.score), ("LINES", game.lines)] {
            fb.text(x, y, label, LABEL);
            fb.number(x, y + 1, value, TEXT);
            y += 3;
        }

        fb.text(x, y, "LEVEL", LABEL);
        fb.text(x, y + 1, snap.difficulty.as_str(), TEXT);
        y += 3;

        fb.text(x, y, "NEXT", LABEL);
        y += 1;
        let preview = crate::core::shape_of(game.next, 0);
        self.draw_preview(fb, x, y, &preview, piece_style(game.next));
        y += 5;

        fb.text(x, y, "p pause", DISABLED);
        fb.text(x, y + 1, "esc menu", DISABLED);
    }

    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        shape: &RotationState,
        style: Style,
    ) {
        for (dx, dy) in shape.cells() {
            let px = x + dx as u16 * self.cell_w;
            fb.fill_rect(px, y + dy as u16, self.cell_w, 1, style.glyph('█'));
        }
    }

    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        well: Rect,
        piece: &ActiveSnapshot,
        ch: char,
        style: Style,
    ) {
        for (dx, dy) in piece.shape().cells() {
            self.fill_cell(fb, well, piece.x + dx, piece.y + dy, ch, style);
        }
    }

    /// Fill one board cell; cells outside the grid are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, well: Rect, x: i8, y: i8, ch: char, style: Style) {
        if !(0..GRID_COLS as i8).contains(&x) || !(0..GRID_ROWS as i8).contains(&y) {
            return;
        }
        let px = well.x + 1 + x as u16 * self.cell_w;
        let py = well.y + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, style.glyph(ch));
    }

    fn draw_pause_menu(&self, fb: &mut FrameBuffer, well: Rect, selection: PauseMenuItem) {
        let h = PauseMenuItem::ALL.len() as u16 + 4;
        let boxed = overlay_box(fb, well, h);
        fb.text_centered(boxed.x, boxed.w, boxed.y + 1, "PAUSED", OVERLAY.bold());
        for item in PauseMenuItem::ALL {
            let style = if item == selection { SELECTED } else { OVERLAY };
            let y = boxed.y + 3 + item.index() as u16;
            menu_row(fb, boxed.x + 1, y, item.label(), style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, well: Rect, score: u32) {
        let boxed = overlay_box(fb, well, 7);
        fb.text_centered(boxed.x, boxed.w, boxed.y + 1, "GAME OVER", OVERLAY.bold());
        fb.text_centered(boxed.x, boxed.w, boxed.y + 3, "SCORE", OVERLAY);
        let digits = digit_count(score);
        fb.number(
            boxed.x + boxed.w.saturating_sub(digits) / 2,
            boxed.y + 4,
            score,
            OVERLAY.bold(),
        );
        fb.text_centered(boxed.x, boxed.w, boxed.y + 5, "enter: menu", OVERLAY);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

fn piece_style(kind: PieceKind) -> Style {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    Style::new(fg, WELL_BG)
}

/// A fixed-width menu line with the label centred.
fn menu_row(fb: &mut FrameBuffer, x: u16, y: u16, label: &str, style: Style) {
    fb.fill_rect(x, y, MENU_W, 1, style.glyph(' '));
    fb.text_centered(x, MENU_W, y, label, style);
}

/// Clear a box `h` rows tall centred on the well; returns it.
fn overlay_box(fb: &mut FrameBuffer, well: Rect, h: u16) -> Rect {
    let w = (MENU_W + 2).min(well.w);
    let rect = Rect {
        x: well.x + well.w.saturating_sub(w) / 2,
        y: well.y + well.h.saturating_sub(h) / 2,
        w,
        h,
    };
    fb.fill_rect(rect.x, rect.y, rect.w, rect.h, OVERLAY.glyph(' '));
    rect
}

fn draw_border(fb: &mut FrameBuffer, r: Rect, style: Style) {
    if r.w < 2 || r.h < 2 {
        return;
    }
    let (right, bottom) = (r.x + r.w - 1, r.y + r.h - 1);
    fb.set(r.x, r.y, style.glyph('┌'));
    fb.set(right, r.y, style.glyph('┐'));
    fb.set(r.x, bottom, style.glyph('└'));
    fb.set(right, bottom, style.glyph('┘'));
    fb.fill_rect(r.x + 1, r.y, r.w - 2, 1, style.glyph('─'));
    fb.fill_rect(r.x + 1, bottom, r.w - 2, 1, style.glyph('─'));
    fb.fill_rect(r.x, r.y + 1, 1, r.h - 2, style.glyph('│'));
    fb.fill_rect(right, r.y + 1, 1, r.h - 2, style.glyph('│'));
}

fn digit_count(mut n: u32) -> u16 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
