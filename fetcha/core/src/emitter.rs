//! Width-Bounded Emitter
//!
//! Every byte of a rendered row goes through [`RowWriter`]. It tracks the
//! current column against the terminal width and is the only place that
//! decides truncation.
//!
//! When the next character would bring the column to `target_width - 2`, the
//! writer stops, optionally prints `" " + marker` in the line-break color,
//! and marks the row as wrapped. The two reserved columns hold the marker
//! and its leading space. Every later [`RowWriter::emit`] in the same row is
//! a no-op that reports `true`, so callers can chain label, separator and
//! value writes without re-checking.

use std::io::{self, Write};

/// SGR reset sequence
pub const RESET: &str = "\x1b[0m";

/// Columns held back at the right edge for the wrap marker
const MARKER_RESERVE: usize = 2;

/// Spaces written per step by [`RowWriter::pad_to`]
const PAD: &str = "                                ";

/// Column-tracking writer for one render pass
pub struct RowWriter<W: Write> {
    out: W,
    /// Column limit for wrapping (0 = unbounded)
    target_width: usize,
    /// Columns written in the current row
    column: usize,
    /// Whether the current row has been truncated
    wrapped: bool,
    /// Wrap marker glyph
    marker: char,
    /// SGR code for the wrap marker
    marker_color: u8,
    /// Whether SGR sequences are written at all
    color_enabled: bool,
    /// SGR code currently in effect, resumed after the marker
    active: Option<u8>,
}

impl<W: Write> RowWriter<W> {
    /// Create a writer
    ///
    /// `target_width` of 0 disables wrapping.
    pub fn new(
        out: W,
        target_width: usize,
        marker: char,
        marker_color: u8,
        color_enabled: bool,
    ) -> Self {
        Self {
            out,
            target_width,
            column: 0,
            wrapped: false,
            marker,
            marker_color,
            color_enabled,
            active: None,
        }
    }

    /// Current column in the row
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Whether the current row was truncated
    #[must_use]
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Columns left before the right edge, `None` when unbounded
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        (self.target_width > 0).then(|| self.target_width.saturating_sub(self.column))
    }

    /// Write `text`, truncating at the width limit
    ///
    /// Returns `true` if the row wrapped during (or before) this call; the
    /// unwritten remainder of `text` is dropped.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying writer.
    pub fn emit(&mut self, text: &str, emit_marker: bool) -> io::Result<bool> {
        if self.wrapped {
            return Ok(true);
        }

        let limit = self.target_width.checked_sub(MARKER_RESERVE);
        let mut buf = [0u8; 4];
        for c in text.chars() {
            if self.target_width > 0 && self.column + 1 >= limit.unwrap_or(0) {
                self.wrap(emit_marker)?;
                return Ok(true);
            }
            self.out.write_all(c.encode_utf8(&mut buf).as_bytes())?;
            self.column += 1;
        }
        Ok(false)
    }

    /// Pad with spaces up to `column`, without a marker
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying writer.
    pub fn pad_to(&mut self, column: usize) -> io::Result<bool> {
        let mut gap = column.saturating_sub(self.column);
        while gap > 0 && !self.wrapped {
            let chunk = gap.min(PAD.len());
            self.emit(&PAD[..chunk], false)?;
            gap -= chunk;
        }
        Ok(self.wrapped)
    }

    /// Switch the active SGR code
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying writer.
    pub fn set_color(&mut self, code: u8) -> io::Result<()> {
        self.active = Some(code);
        if self.color_enabled {
            write!(self.out, "\x1b[{code}m")?;
        }
        Ok(())
    }

    /// Reset all attributes
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying writer.
    pub fn reset(&mut self) -> io::Result<()> {
        self.active = None;
        if self.color_enabled {
            self.out.write_all(RESET.as_bytes())?;
        }
        Ok(())
    }

    /// Finish the row: reset color, newline, column back to 0
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying writer.
    pub fn end_row(&mut self) -> io::Result<()> {
        self.reset()?;
        self.out.write_all(b"\n")?;
        self.column = 0;
        self.wrapped = false;
        Ok(())
    }

    /// Flush the underlying writer
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn wrap(&mut self, emit_marker: bool) -> io::Result<()> {
        if emit_marker {
            let resume = self.active;
            if self.color_enabled {
                write!(self.out, "{RESET}\x1b[{}m", self.marker_color)?;
            }
            write!(self.out, " {}", self.marker)?;
            if self.color_enabled {
                self.out.write_all(RESET.as_bytes())?;
                if let Some(code) = resume {
                    write!(self.out, "\x1b[{code}m")?;
                }
            }
        }
        tracing::trace!(column = self.column, width = self.target_width, "Row wrapped");
        self.column = self.target_width;
        self.wrapped = true;
        Ok(())
    }
}
