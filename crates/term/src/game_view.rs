//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::net::SocketAddr;

use crate::core::{cell_glyph, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

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

/// What the side panel shows about the network view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterStatusView {
    pub addr: Option<SocketAddr>,
    pub client_count: u16,
}

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell compensates for the usual glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

const HIDDEN_CH: char = '░';
const PANEL_GAP: u16 = 2;

fn board_bg() -> CellStyle {
    CellStyle {
        fg: Rgb::new(80, 80, 90),
        bg: Rgb::new(30, 30, 40),
        bold: false,
        dim: false,
    }
}

fn hidden_style() -> CellStyle {
    CellStyle {
        fg: Rgb::new(110, 110, 125),
        bg: Rgb::new(30, 30, 40),
        bold: false,
        dim: true,
    }
}

fn cursor_bg() -> Rgb {
    Rgb::new(90, 90, 150)
}

fn label_style() -> CellStyle {
    CellStyle {
        fg: Rgb::new(150, 150, 160),
        bold: true,
        ..CellStyle::default()
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport when needed.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board = &snap.board;
        let board_px_w = board.width().saturating_mul(self.cell_w);
        let board_px_h = board.height();
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);

        let panel_w = 18;
        let total_w = frame_w.saturating_add(PANEL_GAP + panel_w);
        let start_x = if viewport.width >= total_w {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', board_bg());
        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for (y, row) in board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let is_cursor = x == snap.cursor.x as usize && y == snap.cursor.y as usize;
                let (ch, mut style) = if !cell.is_revealed() {
                    (HIDDEN_CH, hidden_style())
                } else {
                    let fg = cell
                        .tile()
                        .and_then(|id| board.catalog().get(id))
                        .and_then(|t| Rgb::from_hex(&t.color))
                        .unwrap_or(CellStyle::default().fg);
                    let style = CellStyle {
                        bold: true,
                        ..board_bg()
                    };
                    (cell_glyph(board, cell), style.with_fg(fg))
                };
                if is_cursor {
                    style = style.with_bg(cursor_bg());
                    style.dim = false;
                }

                let px = (start_x + 1).saturating_add((x as u16).saturating_mul(self.cell_w));
                let py = (start_y + 1).saturating_add(y as u16);
                fb.put_char(px, py, ch, style);
                let pad = if cell.is_revealed() { ' ' } else { HIDDEN_CH };
                for dx in 1..self.cell_w {
                    fb.put_char(px.saturating_add(dx), py, pad, style);
                }
            }
        }

        let panel_x = start_x.saturating_add(frame_w + PANEL_GAP);
        if panel_x.saturating_add(panel_w) <= viewport.width {
            self.draw_side_panel(fb, snap, adapter, panel_x, start_y);
        }

        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, adapter, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle {
            fg: Rgb::new(200, 200, 200),
            ..CellStyle::default()
        };
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        for cx in x + 1..right {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            fb.put_char(x, cy, '│', style);
            fb.put_char(right, cy, '│', style);
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        adapter: Option<&AdapterStatusView>,
        x: u16,
        y: u16,
    ) {
        let value = CellStyle::default();
        let mut row = y + 1;
        let mut line = |fb: &mut FrameBuffer, text: &str, style: CellStyle| {
            fb.put_str(x, row, text, style);
            row += 1;
        };

        line(fb, "SCORE", label_style());
        line(fb, &snap.score.to_string(), value);
        line(fb, "", value);
        line(fb, "TILES", label_style());
        let total = snap.board.tile_count();
        line(fb, &format!("{}/{}", snap.revealed(), total), value);
        line(fb, "", value);
        line(fb, "VIEW", label_style());
        match adapter.and_then(|a| a.addr.map(|addr| (addr, a.client_count))) {
            Some((addr, clients)) => {
                line(fb, &addr.to_string(), value);
                line(fb, &format!("{} watching", clients), value);
            }
            None => line(fb, "off", value),
        }
        line(fb, "", value);
        line(fb, "arrows move", label_style());
        line(fb, "space hit", label_style());
        line(fb, "q quit", label_style());
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        text: &str,
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(140, 30, 30),
            bold: true,
            dim: false,
        };
        let len = text.chars().count() as u16;
        let tx = x + w.saturating_sub(len) / 2;
        let ty = y + h / 2;
        fb.put_str(tx, ty, text, style);
    }
}
