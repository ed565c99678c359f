//! GameView: maps an engine [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::engine::core::get_shape;
use crate::engine::{GameSnapshot, GameState, MenuLabel, MAIN_MENU, PAUSE_MENU};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const TITLE: &str = "S T A C K F A L L";

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);

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

/// Where the board frame sits on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for every screen of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render the current snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        match snap.state {
            GameState::Menu => self.draw_main_menu(fb, snap, viewport),
            GameState::Rankings => self.draw_rankings(fb, snap, viewport),
            GameState::Settings => self.draw_settings(fb, viewport),
            GameState::Playing | GameState::Paused | GameState::GameOver => {
                let frame = self.draw_board(fb, snap, viewport);
                self.draw_side_panel(fb, snap, viewport, frame);
                if snap.state == GameState::Paused {
                    self.draw_pause_overlay(fb, snap, frame);
                } else if snap.state == GameState::GameOver {
                    self.draw_game_over_overlay(fb, snap, frame);
                }
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let (w, h) = (board_px_w + 2, board_px_h + 2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), WELL_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(fb, frame, border);

        // Locked cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                let cell = snap.board[y as usize][x as usize];
                match PieceKind::from_id(cell) {
                    Some(kind) => self.draw_board_cell(fb, frame, x, y, kind),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        // Active piece; cells still in the hidden buffer are not drawn.
        if let Some(active) = snap.active {
            for &(dx, dy) in get_shape(active.kind, active.rotation).iter() {
                let x = active.x + dx;
                let y = active.y + dy;
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    self.draw_board_cell(fb, frame, x as u16, y as u16, active.kind);
                }
            }
        }

        frame
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(kind.color().into(), WELL_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("HIGH", snap.highscore),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, v, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for kind in snap.next_queue.iter() {
            if y.saturating_add(2) >= viewport.height {
                break;
            }
            self.draw_preview(fb, panel_x, y, *kind);
            y = y.saturating_add(3);
        }
    }

    /// Small spawn-orientation drawing of a queued piece, two rows tall.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(kind.color().into(), BLACK);
        for &(dx, dy) in get_shape(kind, Rotation::North).iter() {
            // Spawn shapes occupy rows 0..=1 except I, which sits on row 1.
            let row = if kind == PieceKind::I { dy - 1 } else { dy };
            if !(0..2).contains(&row) {
                continue;
            }
            let px = x + dx as u16 * 2;
            let py = y + row as u16;
            fb.put_str(px, py, "██", style);
        }
    }

    fn draw_pause_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let title = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
        center_in(fb, frame, mid_y.saturating_sub(3), "PAUSED", title);

        for (i, item) in PAUSE_MENU.iter().enumerate() {
            let y = mid_y.saturating_sub(1).saturating_add(i as u16);
            draw_menu_entry(fb, frame, y, item.label(), i == snap.menu_selected);
        }
    }

    fn draw_game_over_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let title = CellStyle::new(Rgb::new(255, 80, 80), BLACK).bold();
        let text = CellStyle::new(Rgb::new(255, 255, 255), BLACK);
        center_in(fb, frame, mid_y.saturating_sub(3), "GAME OVER", title);

        center_label_value(fb, frame, mid_y.saturating_sub(1), "Score: ", snap.score, text);

        if snap.name_entry {
            center_in(fb, frame, mid_y.saturating_add(1), "NEW HIGHSCORE!", title);
            let prompt_x = frame.x.saturating_add(2);
            let end = fb.put_str(prompt_x, mid_y.saturating_add(2), "Name: ", text);
            let end = fb.put_str(end, mid_y.saturating_add(2), &snap.player_name, text.bold());
            fb.put_char(end, mid_y.saturating_add(2), '_', text.dim());
            center_in(fb, frame, mid_y.saturating_add(4), "Enter to save", text.dim());
        } else {
            center_in(fb, frame, mid_y.saturating_add(1), "Enter for menu", text.dim());
        }
    }

    fn draw_main_menu(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let screen = Frame {
            x: 0,
            y: 0,
            w: viewport.width,
            h: viewport.height,
        };
        let top = viewport.height.saturating_sub(MAIN_MENU.len() as u16 + 6) / 2;

        let title = CellStyle::new(Rgb::new(80, 220, 220), BLACK).bold();
        center_in(fb, screen, top, TITLE, title);

        for (i, item) in MAIN_MENU.iter().enumerate() {
            let y = top.saturating_add(2).saturating_add(i as u16);
            draw_menu_entry(fb, screen, y, item.label(), i == snap.menu_selected);
        }

        let y = top.saturating_add(MAIN_MENU.len() as u16 + 3);
        let dim = CellStyle::default().dim();
        center_label_value(fb, screen, y, "High score: ", snap.highscore, dim);
    }

    fn draw_rankings(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        // rank(3) name(16) score(9) level(6) lines
        let table_w: u16 = 3 + 16 + 9 + 6 + 5;
        let x = viewport.width.saturating_sub(table_w) / 2;
        let mut y = viewport.height.saturating_sub(snap.rankings.len() as u16 + 5) / 2;

        let screen = Frame {
            x: 0,
            y: 0,
            w: viewport.width,
            h: viewport.height,
        };
        center_in(fb, screen, y, "RANKINGS", label);
        y = y.saturating_add(2);

        fb.put_str(x + 3, y, "NAME", label);
        fb.put_str(x + 19, y, "SCORE", label);
        fb.put_str(x + 28, y, "LVL", label);
        fb.put_str(x + 34, y, "LINES", label);
        y = y.saturating_add(1);

        if snap.rankings.is_empty() {
            fb.put_str(x + 3, y, "No scores yet", value.dim());
            y = y.saturating_add(1);
        }
        for (i, record) in snap.rankings.iter().enumerate() {
            fb.put_u32(x, y, i as u32 + 1, value.dim());
            fb.put_str(x + 3, y, &record.name, value);
            fb.put_u32(x + 19, y, record.score, value);
            fb.put_u32(x + 28, y, record.level, value);
            fb.put_u32(x + 34, y, record.lines, value);
            y = y.saturating_add(1);
        }

        center_in(fb, screen, y.saturating_add(1), "Esc to return", value.dim());
    }

    fn draw_settings(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let screen = Frame {
            x: 0,
            y: 0,
            w: viewport.width,
            h: viewport.height,
        };
        let mid_y = viewport.height / 2;
        center_in(fb, screen, mid_y.saturating_sub(1), "SETTINGS", CellStyle::default().bold());
        center_in(fb, screen, mid_y.saturating_add(1), "Nothing to configure yet", CellStyle::default());
        center_in(fb, screen, mid_y.saturating_add(2), "Press any key", CellStyle::default().dim());
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn center_in(fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, style);
}

fn draw_menu_entry(fb: &mut FrameBuffer, frame: Frame, y: u16, label: &str, selected: bool) {
    let style = if selected {
        CellStyle::new(BLACK, Rgb::new(220, 220, 220)).bold()
    } else {
        CellStyle::default()
    };
    // Fixed width so the highlight bar lines up across entries.
    let mut buf = [b' '; 14];
    let bytes = label.as_bytes();
    let n = bytes.len().min(buf.len() - 2);
    buf[1..1 + n].copy_from_slice(&bytes[..n]);
    let text = std::str::from_utf8(&buf).unwrap_or(label);
    center_in(fb, frame, y, text, style);
    if selected {
        let x = frame.x.saturating_add(frame.w.saturating_sub(buf.len() as u16) / 2);
        fb.put_char(x.saturating_sub(2), y, '>', CellStyle::default().bold());
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

fn center_label_value(fb: &mut FrameBuffer, frame: Frame, y: u16, label: &str, value: u32, style: CellStyle) {
    let width = label.chars().count() as u16 + digit_count(value);
    let x = frame.x.saturating_add(frame.w.saturating_sub(width) / 2);
    let end = fb.put_str(x, y, label, style);
    fb.put_u32(end, y, value, style);
}
