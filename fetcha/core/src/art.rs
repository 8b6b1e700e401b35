//! Art Model
//!
//! Parses the decorative glyph block shown on the left of the display.
//!
//! Art text may contain color directives: `$` followed by one decimal digit
//! selects a palette slot for the glyphs that follow. Directives take no
//! columns, so sizing ignores them entirely and padding stays stable no
//! matter which colors the art picks.
//!
//! # Sizing rules
//!
//! - Each line terminator closes a row.
//! - A trailing unterminated line is a row only if it has a visible glyph.
//!   Directives on such a line are appended to the last row, so the color
//!   they select still applies to the rows that follow the art.
//! - Art without any visible glyph is empty: width 0, height 0, no rows.
//!   This covers `""`, `"\n"` and directive-only text.

use std::path::Path;

/// Directive prefix
const DIRECTIVE: char = '$';

/// One element of an art row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtToken {
    /// A visible character, one column wide
    Glyph(char),
    /// Switch to palette slot `0..=9`
    Color(u8),
}

/// Parsed art block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Art {
    lines: Vec<Vec<ArtToken>>,
    width: usize,
}

impl Art {
    /// Parse raw art text
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut current = Vec::new();
        let mut column = 0usize;
        let mut width = 0usize;

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\n' => {
                    width = width.max(column);
                    column = 0;
                    lines.push(std::mem::take(&mut current));
                }
                DIRECTIVE => match chars.peek().and_then(|d| d.to_digit(10)) {
                    Some(digit) => {
                        chars.next();
                        current.push(ArtToken::Color(digit as u8));
                    }
                    None => {
                        current.push(ArtToken::Glyph(c));
                        column += 1;
                    }
                },
                _ => {
                    current.push(ArtToken::Glyph(c));
                    column += 1;
                }
            }
        }

        if column > 0 {
            width = width.max(column);
            lines.push(current);
        } else if let Some(last) = lines.last_mut() {
            // directives after the final newline still set the color
            last.append(&mut current);
        }

        if width == 0 {
            return Self::default();
        }

        Self { lines, width }
    }

    /// Built-in art used when no art file is configured
    #[must_use]
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_ART)
    }

    /// Load art from a file
    ///
    /// A missing or unreadable file degrades to empty art; the panel still
    /// renders on its own.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let art = Self::parse(&text);
                tracing::debug!(
                    path = %path.display(),
                    width = art.width(),
                    height = art.height(),
                    "Loaded art"
                );
                art
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Art file unavailable, rendering without art");
                Self::default()
            }
        }
    }

    /// Widest row in columns, directives excluded
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Whether the art has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Tokens of one row
    #[must_use]
    pub fn line(&self, row: usize) -> Option<&[ArtToken]> {
        self.lines.get(row).map(Vec::as_slice)
    }
}

/// Default art: the Arch Linux logo, accented with `$1` and `$3`
pub const BUILTIN_ART: &str = concat!(
    "                   $1-` \n",
    "                  .o+`\n",
    "                 `ooo/\n",
    "                `+oooo:\n",
    "               `+oooooo:\n",
    "               -+oooooo+:\n",
    "             `/:-:++oooo+:\n",
    "            $3`/++++/+++++++:\n",
    "           `/++++++++++++++:\n",
    "          `/+++$1ooooooooooooo/`\n",
    "         ./ooosssso++osssssso+`\n",
    "        .oossssso-````/ossssss+`\n",
    "       -osssssso.      :ssssssso.\n",
    "      :osssssss/        osssso+++. \n",
    "     /ossssssss/        +ssssooo/-  \n",
    "   `/ossssso+/:-        -:/+osssso+-   \n",
    "  `+sso+:-`                 `.-/+oso:     \n",
    " `++:.                           `-/+/   \n",
    " .`                                 `/  \n",
);
