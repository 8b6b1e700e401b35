//! Color Palette
//!
//! Ten ANSI foreground codes indexed by art directives (`$0`..`$9`) and by
//! semantic [`Role`]s for the panel text.

use thiserror::Error;

/// Number of palette entries
pub const PALETTE_SIZE: usize = 10;

/// Foreground code used when a color number is outside 0-15
const DEFAULT_FOREGROUND: u8 = 39;

/// Errors from building a palette out of config values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Wrong number of entries
    #[error("colors must have exactly {PALETTE_SIZE} entries, got {0}")]
    WrongLength(usize),

    /// Entry is neither a color number nor a foreground code
    #[error("color entry {index} = {value} is not a color number (0-15) or foreground code (30-37, 39, 90-97)")]
    OutOfRange {
        /// Position in the list
        index: usize,
        /// Offending value
        value: i64,
    },
}

/// What a palette slot is used for in the panel
///
/// Art directives address slots by number directly; roles name the slots the
/// panel reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Info labels and the user name
    Accent,
    /// Host name
    AccentAlt,
    /// Info values
    InfoText,
    /// Separator between label and value
    InfoSep,
    /// Separator between user and host
    HeaderSep,
    /// Boundary row under the header
    Boundary,
    /// Wrap marker
    LineBreak,
    /// Art color before the first directive
    ArtDefault,
}

impl Role {
    /// Palette slot for this role
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Accent => 1,
            Self::AccentAlt => 2,
            Self::InfoText => 5,
            Self::InfoSep => 6,
            Self::HeaderSep | Self::ArtDefault => 7,
            Self::Boundary => 8,
            Self::LineBreak => 9,
        }
    }
}

/// Map a color number to an ANSI foreground code
///
/// `0-7` become `30-37`, `8-15` become `90-97`, anything else is the
/// terminal default foreground (`39`).
#[must_use]
pub fn color_to_ansi(n: i64) -> u8 {
    match n {
        0..=7 => 30 + n as u8,
        8..=15 => 90 + (n - 8) as u8,
        _ => DEFAULT_FOREGROUND,
    }
}

/// Ten foreground SGR codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([u8; PALETTE_SIZE]);

impl Default for Palette {
    fn default() -> Self {
        Self([30, 31, 32, 33, 34, 35, 36, 37, 90, 91])
    }
}

impl Palette {
    /// Build from raw SGR codes
    #[must_use]
    pub const fn new(codes: [u8; PALETTE_SIZE]) -> Self {
        Self(codes)
    }

    /// Build from config values: color numbers or SGR foreground codes
    ///
    /// # Errors
    ///
    /// Returns an error on a wrong entry count or an unusable value.
    pub fn from_config(values: &[i64]) -> Result<Self, PaletteError> {
        if values.len() != PALETTE_SIZE {
            return Err(PaletteError::WrongLength(values.len()));
        }

        let mut codes = [0u8; PALETTE_SIZE];
        for (index, (&value, slot)) in values.iter().zip(codes.iter_mut()).enumerate() {
            *slot = match value {
                0..=15 => color_to_ansi(value),
                30..=37 | 39 | 90..=97 => value as u8,
                _ => return Err(PaletteError::OutOfRange { index, value }),
            };
        }
        Ok(Self(codes))
    }

    /// Code at a slot; out-of-range slots give the default foreground
    #[must_use]
    pub fn get(&self, index: usize) -> u8 {
        self.0.get(index).copied().unwrap_or(DEFAULT_FOREGROUND)
    }

    /// Code for a semantic role
    #[must_use]
    pub fn role(&self, role: Role) -> u8 {
        self.get(role.index())
    }

    /// All codes in slot order
    #[must_use]
    pub fn codes(&self) -> &[u8; PALETTE_SIZE] {
        &self.0
    }
}
