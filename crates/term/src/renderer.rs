//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! A full redraw happens after `enter`, after a resize or size change, and
//! after any frame that failed to reach the terminal. Every other frame only
//! emits the runs of cells that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Last frame that reached the terminal
    shown: FrameBuffer,
    full_redraw: bool,
    buf: Vec<u8>,
    key_release_events: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: FrameBuffer::new(0, 0),
            full_redraw: true,
            buf: Vec::with_capacity(64 * 1024),
            key_release_events: false,
        }
    }

    /// Raw mode and the alternate screen. Key releases are requested when the
    /// terminal speaks the keyboard enhancement protocol.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        self.key_release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.queue_release_reporting(true)?;
        info!(
            "Terminal entered, key release events: {}",
            self.key_release_events
        );

        self.full_redraw = true;
        self.flush_buf().context("initializing terminal")
    }

    /// Whether the terminal will report key releases itself
    pub fn key_release_events(&self) -> bool {
        self.key_release_events
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.queue_release_reporting(false)?;
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf().context("restoring terminal")?;
        terminal::disable_raw_mode().context("disabling raw mode")
    }

    fn queue_release_reporting(&mut self, on: bool) -> Result<()> {
        match (self.key_release_events, on) {
            (false, _) => {}
            (true, true) => {
                self.buf.queue(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))?;
            }
            (true, false) => {
                self.buf.queue(PopKeyboardEnhancementFlags)?;
            }
        }
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.full_redraw = true;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers should keep one `FrameBuffer` and pass it in every frame.
    /// On success the caller gets the previously shown buffer back to reuse.
    /// On failure `fb` is left untouched and the next draw is a full redraw.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let full = self.full_redraw
            || self.shown.width() != fb.width()
            || self.shown.height() != fb.height();

        self.buf.clear();
        let written = if full {
            debug!("Full redraw at {}x{}", fb.width(), fb.height());
            encode_full_into(fb, &mut self.buf)
        } else {
            encode_diff_into(&self.shown, fb, &mut self.buf)
        }
        .and_then(|()| self.flush_buf());

        if let Err(err) = written {
            self.full_redraw = true;
            return Err(err);
        }
        self.full_redraw = false;
        std::mem::swap(&mut self.shown, fb);
        Ok(())
    }

    /// Draw a frame, logging a failure instead of returning it.
    ///
    /// Returns whether the frame reached the terminal.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> bool {
        match self.draw_swap(fb) {
            Ok(()) => true,
            Err(err) => {
                warn!("Frame not drawn, redrawing next frame: {err:#}");
                false
            }
        }
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Queues cells, emitting style changes only where the style differs from
/// the previous cell.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn cell(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            apply_style_into(self.out, cell.style)?;
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?
        .queue(cursor::MoveTo(0, 0))?;

    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        if y > 0 {
            painter.out.queue(Print("\r\n"))?;
        }
        for x in 0..fb.width() {
            painter.cell(fb.get(x, y).unwrap_or_default())?;
        }
    }
    painter.finish()
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// Cells outside `prev` count as changed.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    for run in changed_runs(prev, next) {
        painter.out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            painter.cell(next.get(x, run.y).unwrap_or_default())?;
        }
    }
    painter.finish()
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?
        .queue(SetBackgroundColor(rgb_to_color(style.bg)))?
        .queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Horizontal span of changed cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Maximal runs of cells in `next` that differ from `prev`, row by row.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = Run> + 'a {
    let width = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < width && !differs(x) {
                x += 1;
            }
            if x == width {
                return None;
            }
            let start = x;
            while x < width && differs(x) {
                x += 1;
            }
            Some(Run {
                x: start,
                y,
                len: x - start,
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(out: &[u8]) -> String {
        String::from_utf8_lossy(out).into_owned()
    }

    /// Terminal stand-in whose first write fails like a broken pipe.
    #[derive(Default)]
    struct FlakyTerminal {
        failed_once: bool,
        written: Vec<u8>,
    }

    impl Write for FlakyTerminal {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            if !self.failed_once {
                self.failed_once = true;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"));
            }
            self.written.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn frame(text: &str) -> FrameBuffer {
        let mut fb = FrameBuffer::new(text.len() as u16, 1);
        fb.put_str(0, 0, text, CellStyle::default());
        fb
    }

    #[test]
    fn full_redraw_prints_every_cell() {
        let mut fb = FrameBuffer::new(2, 2);
        let style = CellStyle::default();
        fb.set(0, 0, Cell { ch: 'A', style });
        fb.set(1, 0, Cell { ch: 'B', style });
        fb.set(0, 1, Cell { ch: 'C', style });
        fb.set(1, 1, Cell { ch: 'D', style });

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = text_of(&out);
        assert!(text.contains("AB\r\nCD"));
    }

    #[test]
    fn diff_of_identical_frames_prints_no_cells() {
        let mut a = FrameBuffer::new(4, 2);
        a.put_str(0, 0, "same", CellStyle::default());
        let b = a.clone();

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        assert!(!text_of(&out).contains("same"));
    }

    #[test]
    fn diff_prints_only_changed_run() {
        let a = FrameBuffer::new(6, 1);
        let mut b = FrameBuffer::new(6, 1);
        b.put_str(2, 0, "XY", CellStyle::default());

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let text = text_of(&out);
        assert!(text.contains("XY"));
        // MoveTo is 1-based in ANSI: column 3, row 1.
        assert!(text.contains("\x1b[1;3H"));
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 2);
        let mut b = FrameBuffer::new(5, 2);
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: 'X', style });
        }
        b.set(0, 1, Cell { ch: 'Y', style });
        b.set(4, 1, Cell { ch: 'Z', style });

        let runs: Vec<Run> = changed_runs(&a, &b).collect();
        assert_eq!(
            runs,
            vec![
                Run { x: 1, y: 0, len: 3 },
                Run { x: 0, y: 1, len: 1 },
                Run { x: 4, y: 1, len: 1 },
            ]
        );
    }

    #[test]
    fn second_identical_frame_sends_no_cells() {
        let mut term = TerminalRenderer::with_writer(Vec::new());
        let mut fb = frame("abc");
        term.draw_swap(&mut fb).unwrap();
        assert!(text_of(&term.out).contains("\x1b[2J"));

        term.out.clear();
        let mut fb = frame("abc");
        term.draw_swap(&mut fb).unwrap();
        assert!(!text_of(&term.out).contains("abc"));
    }

    #[test]
    fn failed_frame_is_redrawn_in_full() {
        let mut term = TerminalRenderer::with_writer(FlakyTerminal::default());
        let mut fb = frame("abc");

        assert!(!term.present(&mut fb));
        // The caller still holds the frame it asked for.
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('a'));

        assert!(term.present(&mut fb));
        let text = text_of(&term.out.written);
        assert!(text.contains("\x1b[2J"));
        assert!(text.contains("abc"));
    }

    #[test]
    fn invalidate_forces_full_redraw() {
        let mut term = TerminalRenderer::with_writer(Vec::new());
        term.draw_swap(&mut frame("abc")).unwrap();
        term.out.clear();

        term.invalidate();
        term.draw_swap(&mut frame("abc")).unwrap();
        let text = text_of(&term.out);
        assert!(text.contains("\x1b[2J"));
        assert!(text.contains("abc"));
    }

    #[test]
    fn style_maps_to_rgb_color() {
        let style = CellStyle::default();
        assert_eq!(
            rgb_to_color(style.fg),
            Color::Rgb {
                r: style.fg.r,
                g: style.fg.g,
                b: style.fg.b
            }
        );
    }
}
