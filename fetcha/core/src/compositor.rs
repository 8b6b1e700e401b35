//! Compositor
//!
//! Drives one render pass: walks the art row by row and, next to each art
//! row, renders exactly one item of the right-hand panel.
//!
//! ```text
//!  art rows ─────────────┐   panel items (cursor advances once per row)
//!                        │
//!  ....$1-`      ␣␣␣␣␣␣  │   Header       alice@box
//!  ...oo+`       ␣␣␣␣␣␣  │   Boundary     =========
//!  ..$3/oooo:    ␣␣␣␣␣␣  │   InfoRow      OS    : Arch Linux x86_64
//!  ...           ␣␣␣␣␣␣  │   ...
//!                        │   Blank
//!                        │   PaletteRow   (normal)
//!                        │   PaletteRow   (bright)
//! ```
//!
//! The pass continues while either side has rows left. Rows past the end of
//! the art get an empty art segment padded to the art width, so the panel
//! stays aligned.

use std::io::{self, Write};

use thiserror::Error;

use crate::art::{Art, ArtToken};
use crate::config::{RenderConfig, Role};
use crate::emitter::RowWriter;
use crate::facts::{render_facts, FactOptions, FactSource, RenderedFacts, RenderedRow};
use crate::identity::{Identity, IdentityError, IdentitySource};
use crate::terminal::wrap_width;

/// Columns that must remain for a panel item to be drawn at all
const SAFETY_MARGIN: usize = 2;

/// One palette swatch
const SWATCH: &str = "   ";

/// Base background SGR codes for the two palette rows
const NORMAL_BACKGROUND: u8 = 40;
const BRIGHT_BACKGROUND: u8 = 100;

/// Number of swatches per palette row
const SWATCH_COUNT: u8 = 8;

// ============================================================================
// Errors
// ============================================================================

/// Errors that abort a render pass
#[derive(Debug, Error)]
pub enum RenderError {
    /// The header could not name the user or host
    #[error("header unavailable: {0}")]
    Identity(#[from] IdentityError),

    /// Writing the output failed
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Panel
// ============================================================================

/// Which palette row to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    /// Backgrounds 40-47
    Normal,
    /// Backgrounds 100-107
    Bright,
}

impl PaletteKind {
    fn base(self) -> u8 {
        match self {
            Self::Normal => NORMAL_BACKGROUND,
            Self::Bright => BRIGHT_BACKGROUND,
        }
    }
}

/// One row of the right-hand panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelItem {
    /// `user<sep>host`
    Header(Identity),
    /// Boundary glyph repeated this many times
    Boundary(usize),
    /// One fact row
    InfoRow(RenderedRow),
    /// Empty spacer above the palette
    Blank,
    /// Eight color swatches
    PaletteRow(PaletteKind),
}

/// The full ordered panel for one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    items: Vec<PanelItem>,
}

impl Panel {
    /// Assemble header, facts and palette in display order
    ///
    /// `header` is `None` when the header is disabled.
    #[must_use]
    pub fn new(config: &RenderConfig, header: Option<Identity>, facts: RenderedFacts) -> Self {
        let extra = if config.color_palette_show { 3 } else { 0 };
        let mut items = Vec::with_capacity(facts.rows.len() + 2 + extra);

        if let Some(identity) = header {
            let length = identity.user.chars().count()
                + config.header_sep.chars().count()
                + identity.host.chars().count();
            items.push(PanelItem::Header(identity));
            items.push(PanelItem::Boundary(length));
        }

        items.extend(facts.rows.into_iter().map(PanelItem::InfoRow));

        if config.color_palette_show {
            items.push(PanelItem::Blank);
            items.push(PanelItem::PaletteRow(PaletteKind::Normal));
            items.push(PanelItem::PaletteRow(PaletteKind::Bright));
        }

        Self { items }
    }

    /// Items in display order
    #[must_use]
    pub fn items(&self) -> &[PanelItem] {
        &self.items
    }

    /// Number of rows the panel occupies
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the panel has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Compositor
// ============================================================================

/// Interleaves art rows with panel items
pub struct Compositor<'a> {
    config: &'a RenderConfig,
    art: &'a Art,
    panel: &'a Panel,
}

impl<'a> Compositor<'a> {
    /// Create a compositor over parsed inputs
    #[must_use]
    pub fn new(config: &'a RenderConfig, art: &'a Art, panel: &'a Panel) -> Self {
        Self { config, art, panel }
    }

    /// Column where every panel item starts (when the art is non-empty)
    #[must_use]
    pub fn panel_column(&self) -> usize {
        if self.art.is_empty() {
            0
        } else {
            self.art.width().saturating_add(self.config.ascii_pad)
        }
    }

    /// Write every row to `out`, returning the number of rows written
    ///
    /// `target_width` of 0 disables truncation.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_to<W: Write>(&self, out: W, target_width: usize) -> io::Result<usize> {
        let mut writer = RowWriter::new(
            out,
            target_width,
            self.config.line_break_char,
            self.config.color(Role::LineBreak),
            self.config.color_enabled,
        );

        let items = self.panel.items();
        let mut art_color = self.config.color(Role::ArtDefault);
        let mut row = 0;
        let mut cursor = 0;

        while row < self.art.height() || cursor < items.len() {
            writer.set_color(art_color)?;
            if let Some(line) = self.art.line(row) {
                self.write_art_line(&mut writer, line, &mut art_color)?;
            }
            row += 1;

            if let Some(item) = items.get(cursor) {
                cursor += 1;
                writer.pad_to(self.panel_column())?;
                writer.reset()?;

                if writer.remaining().map_or(true, |left| left >= SAFETY_MARGIN) {
                    self.write_item(&mut writer, item)?;
                } else {
                    tracing::trace!(row, "No room for panel item, skipped");
                }
            }

            writer.end_row()?;
        }

        writer.flush()?;
        Ok(row)
    }

    /// Art glyphs go out in runs between directives; after a wrap the
    /// remaining glyphs are dropped but directives still take effect.
    fn write_art_line<W: Write>(
        &self,
        writer: &mut RowWriter<W>,
        line: &[ArtToken],
        art_color: &mut u8,
    ) -> io::Result<()> {
        let mut run = String::new();
        for token in line {
            match *token {
                ArtToken::Glyph(c) => run.push(c),
                ArtToken::Color(index) => {
                    writer.emit(&run, true)?;
                    run.clear();
                    *art_color = self.config.colors.get(usize::from(index));
                    writer.set_color(*art_color)?;
                }
            }
        }
        writer.emit(&run, true)?;
        Ok(())
    }

    fn write_item<W: Write>(&self, writer: &mut RowWriter<W>, item: &PanelItem) -> io::Result<()> {
        let config = self.config;
        match item {
            PanelItem::Header(identity) => {
                write_segments(
                    writer,
                    &[
                        (config.color(Role::Accent), identity.user.as_str()),
                        (config.color(Role::HeaderSep), config.header_sep.as_str()),
                        (config.color(Role::AccentAlt), identity.host.as_str()),
                    ],
                )?;
            }
            PanelItem::Boundary(length) => {
                writer.set_color(config.color(Role::Boundary))?;
                writer.emit(&config.boundary_char.repeat(*length), true)?;
            }
            PanelItem::InfoRow(row) => {
                write_segments(
                    writer,
                    &[
                        (config.color(Role::Accent), row.label.as_str()),
                        (config.color(Role::InfoSep), config.info_sep.as_str()),
                        (config.color(Role::InfoText), row.value.as_str()),
                    ],
                )?;
            }
            PanelItem::Blank => {}
            PanelItem::PaletteRow(kind) => {
                for offset in 0..SWATCH_COUNT {
                    writer.set_color(kind.base() + offset)?;
                    if writer.emit(SWATCH, true)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Write colored segments, stopping at the first one that wraps
fn write_segments<W: Write>(writer: &mut RowWriter<W>, segments: &[(u8, &str)]) -> io::Result<()> {
    for &(color, text) in segments {
        writer.set_color(color)?;
        if writer.emit(text, true)? {
            break;
        }
    }
    Ok(())
}

// ============================================================================
// Entry points
// ============================================================================

/// Run a full render pass
///
/// Resolves the header identity first (when enabled), so an identity failure
/// aborts before anything is written or any fact is produced. Returns the
/// number of rows written.
///
/// # Errors
///
/// Returns [`RenderError::Identity`] if the header is enabled and the user or
/// host cannot be determined, and [`RenderError::Io`] if writing fails.
pub fn render<W: Write>(
    config: &RenderConfig,
    art: &Art,
    sources: &[Box<dyn FactSource>],
    identity: &dyn IdentitySource,
    terminal_width: Option<usize>,
    out: W,
) -> Result<usize, RenderError> {
    let header = if config.header_show {
        Some(identity.resolve()?)
    } else {
        None
    };

    let facts = render_facts(sources, FactOptions::from_config(config));
    let panel = Panel::new(config, header, facts);
    let target_width = wrap_width(config.line_break, terminal_width);

    tracing::debug!(
        art_width = art.width(),
        art_height = art.height(),
        panel_rows = panel.len(),
        target_width,
        "Rendering"
    );

    let rows = Compositor::new(config, art, &panel).write_to(out, target_width)?;
    Ok(rows)
}

/// [`render`] into a `String`
///
/// # Errors
///
/// Same as [`render`].
pub fn render_to_string(
    config: &RenderConfig,
    art: &Art,
    sources: &[Box<dyn FactSource>],
    identity: &dyn IdentitySource,
    terminal_width: Option<usize>,
) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    render(config, art, sources, identity, terminal_width, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::StaticFact;
    use pretty_assertions::assert_eq;

    struct NoHost;

    impl IdentitySource for NoHost {
        fn user(&self) -> Option<String> {
            Some("alice".to_string())
        }

        fn host(&self) -> Option<String> {
            None
        }
    }

    struct NoIdentity;

    impl IdentitySource for NoIdentity {
        fn user(&self) -> Option<String> {
            None
        }

        fn host(&self) -> Option<String> {
            Some("box".to_string())
        }
    }

    fn plain_config() -> RenderConfig {
        RenderConfig {
            ascii_pad: 1,
            info_align: false,
            header_show: false,
            color_palette_show: false,
            color_enabled: false,
            ..RenderConfig::default()
        }
    }

    fn facts(pairs: &[(&str, &str)]) -> Vec<Box<dyn FactSource>> {
        pairs
            .iter()
            .map(|&(l, v)| Box::new(StaticFact::new(l, v)) as Box<dyn FactSource>)
            .collect()
    }

    fn alice() -> Identity {
        Identity::new("alice", "box")
    }

    fn run(config: &RenderConfig, art: &str, sources: &[Box<dyn FactSource>], width: Option<usize>) -> String {
        render_to_string(config, &Art::parse(art), sources, &alice(), width).unwrap()
    }

    // ========================================================================
    // Panel
    // ========================================================================

    #[test]
    fn test_panel_full_sequence() {
        let config = RenderConfig::default();
        let rendered = render_facts(&facts(&[("X", "1")]), FactOptions::from_config(&config));
        let panel = Panel::new(&config, Some(alice()), rendered);

        assert_eq!(
            panel.items(),
            &[
                PanelItem::Header(alice()),
                PanelItem::Boundary(9),
                PanelItem::InfoRow(RenderedRow {
                    label: "X".to_string(),
                    value: "1".to_string()
                }),
                PanelItem::Blank,
                PanelItem::PaletteRow(PaletteKind::Normal),
                PanelItem::PaletteRow(PaletteKind::Bright),
            ]
        );
    }

    #[test]
    fn test_panel_without_header_or_palette() {
        let config = plain_config();
        let rendered = render_facts(&facts(&[("X", "1"), ("Y", "2")]), FactOptions::from_config(&config));
        let panel = Panel::new(&config, None, rendered);
        assert_eq!(panel.len(), 2);
        assert!(matches!(panel.items()[0], PanelItem::InfoRow(_)));
    }

    #[test]
    fn test_panel_with_nothing_to_show_is_empty() {
        let config = plain_config();
        let panel = Panel::new(&config, None, RenderedFacts::default());
        assert!(panel.is_empty());
        assert_eq!(panel.len(), 0);
    }

    #[test]
    fn test_boundary_length_counts_separator() {
        let config = RenderConfig {
            header_sep: " at ".to_string(),
            ..RenderConfig::default()
        };
        let panel = Panel::new(&config, Some(alice()), RenderedFacts::default());
        assert_eq!(panel.items()[1], PanelItem::Boundary(12));
    }

    // ========================================================================
    // Row layout
    // ========================================================================

    #[test]
    fn test_art_taller_than_panel() {
        let out = run(&plain_config(), "AB\nCD\n", &facts(&[("X", "1")]), None);
        assert_eq!(out, "AB X: 1\nCD\n");
    }

    #[test]
    fn test_panel_taller_than_art_keeps_alignment() {
        let out = run(&plain_config(), "A\n", &facts(&[("X", "1"), ("Y", "2")]), None);
        assert_eq!(out, "A X: 1\n  Y: 2\n");
    }

    #[test]
    fn test_short_art_rows_padded_to_widest() {
        let out = run(&plain_config(), "ABC\nD\n", &facts(&[("X", "1"), ("Y", "2")]), None);
        assert_eq!(out, "ABC X: 1\nD   Y: 2\n");
    }

    #[test]
    fn test_directives_do_not_shift_panel() {
        let out = run(&plain_config(), "$1AB\nC$2D\n", &facts(&[("X", "1"), ("Y", "2")]), None);
        assert_eq!(out, "AB X: 1\nCD Y: 2\n");
    }

    #[test]
    fn test_empty_art_with_palette_rows() {
        let config = RenderConfig {
            color_palette_show: true,
            ..plain_config()
        };
        let mut buf = Vec::new();
        let rows = render(
            &config,
            &Art::parse(""),
            &facts(&[("X", "1"), ("Y", "2"), ("Z", "3")]),
            &alice(),
            None,
            &mut buf,
        )
        .unwrap();

        assert_eq!(rows, 6);
        let out = String::from_utf8(buf).unwrap();
        let swatches = " ".repeat(24);
        let expected: Vec<&str> = vec!["X: 1", "Y: 2", "Z: 3", "", swatches.as_str(), swatches.as_str()];
        assert_eq!(out.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_header_and_boundary() {
        let config = RenderConfig {
            header_show: true,
            ..plain_config()
        };
        let out = run(&config, "", &facts(&[("X", "1")]), None);
        assert_eq!(out, "alice@box\n=========\nX: 1\n");
    }

    #[test]
    fn test_multi_char_boundary_repeats() {
        let config = RenderConfig {
            header_show: true,
            boundary_char: "-=".to_string(),
            ..plain_config()
        };
        let out = run(&config, "", &[], None);
        assert_eq!(out.lines().nth(1), Some("-=".repeat(9).as_str()));
    }

    #[test]
    fn test_aligned_labels() {
        let config = RenderConfig {
            info_align: true,
            ..plain_config()
        };
        let out = run(&config, "", &facts(&[("OS", "Arch"), ("Kernel", "6.10")]), None);
        assert_eq!(out, "OS    : Arch\nKernel: 6.10\n");
    }

    #[test]
    fn test_no_art_no_panel_renders_nothing() {
        let out = run(&plain_config(), "", &[], None);
        assert_eq!(out, "");
    }

    // ========================================================================
    // Wrapping
    // ========================================================================

    #[test]
    fn test_long_value_wraps_with_marker() {
        let out = run(&plain_config(), "", &facts(&[("V", "abcdefghijklmnopqrst")]), Some(10));
        assert_eq!(out, "V: abcd >\n");
    }

    #[test]
    fn test_wrap_in_label_skips_rest_of_row() {
        let out = run(&plain_config(), "", &facts(&[("LongLabel", "value")]), Some(8));
        assert_eq!(out, "LongL >\n");
    }

    #[test]
    fn test_wide_art_truncated_and_panel_elided() {
        let out = run(&plain_config(), "ABCDEFGHIJ\n", &facts(&[("X", "1"), ("Y", "2")]), Some(8));
        assert_eq!(out, "ABCDE >\n     \n");
    }

    #[test]
    fn test_panel_elided_when_margin_too_small() {
        // panel column 5, but width 7 stops writing at column 4
        let out = run(&plain_config(), "ABCD\n", &facts(&[("X", "1")]), Some(7));
        assert_eq!(out, "ABCD\n");
    }

    #[test]
    fn test_huge_pad_is_bounded_by_width() {
        for ascii_pad in [usize::MAX / 2, usize::MAX] {
            let config = RenderConfig {
                ascii_pad,
                ..plain_config()
            };
            let out = run(&config, "AB\n", &facts(&[("X", "1")]), Some(80));
            assert_eq!(out, format!("AB{}\n", " ".repeat(75)), "pad {ascii_pad}");
        }
    }

    #[test]
    fn test_header_wraps_with_marker() {
        let config = RenderConfig {
            header_show: true,
            ..plain_config()
        };
        let out = run(&config, "", &[], Some(6));
        assert_eq!(out, "ali >\n=== >\n");
    }

    #[test]
    fn test_line_break_disabled_ignores_width() {
        let config = RenderConfig {
            line_break: false,
            ..plain_config()
        };
        let out = run(&config, "", &facts(&[("V", "abcdefghijklmnopqrst")]), Some(10));
        assert_eq!(out, "V: abcdefghijklmnopqrst\n");
    }

    #[test]
    fn test_palette_row_stops_at_wrap() {
        let config = RenderConfig {
            color_palette_show: true,
            ..plain_config()
        };
        let out = run(&config, "", &[], Some(12));
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        // 9 columns writable before the marker: three full swatches
        assert_eq!(rows[1], format!("{} >", " ".repeat(9)));
    }

    #[test]
    fn test_art_directive_after_wrap_still_applies() {
        let config = RenderConfig {
            color_enabled: true,
            ..plain_config()
        };
        let out = run(&config, "ABCDEFGH$2\nI\n", &[], Some(6));
        let second = out.split('\n').nth(1).unwrap();
        assert!(second.starts_with("\x1b[32mI"), "second row: {second:?}");
    }

    // ========================================================================
    // Color output
    // ========================================================================

    #[test]
    fn test_trailing_art_directive_colors_following_rows() {
        let config = RenderConfig {
            color_enabled: true,
            ..plain_config()
        };
        let out = run(&config, "A\n$2", &facts(&[("X", "1"), ("Y", "2")]), None);
        let rows: Vec<&str> = out.split('\n').collect();
        assert!(rows[0].starts_with("\x1b[37mA\x1b[32m"), "first row: {:?}", rows[0]);
        assert!(rows[1].starts_with("\x1b[32m"), "second row: {:?}", rows[1]);
    }

    #[test]
    fn test_colored_info_row() {
        let config = RenderConfig {
            color_enabled: true,
            ..plain_config()
        };
        let out = run(&config, "$1A\n", &facts(&[("X", "1")]), None);
        assert_eq!(
            out,
            "\x1b[37m\x1b[31mA \x1b[0m\x1b[31mX\x1b[36m: \x1b[35m1\x1b[0m\n"
        );
    }

    #[test]
    fn test_art_color_persists_across_rows() {
        let config = RenderConfig {
            color_enabled: true,
            ..plain_config()
        };
        let out = run(&config, "$1A\nB\n", &[], None);
        assert_eq!(out, "\x1b[37m\x1b[31mA\x1b[0m\n\x1b[31mB\x1b[0m\n");
    }

    #[test]
    fn test_palette_uses_background_codes() {
        let config = RenderConfig {
            color_enabled: true,
            color_palette_show: true,
            ..plain_config()
        };
        let out = run(&config, "", &[], None);
        let rows: Vec<&str> = out.split('\n').collect();
        for code in 40..48 {
            assert!(rows[1].contains(&format!("\x1b[{code}m   ")));
        }
        for code in 100..108 {
            assert!(rows[2].contains(&format!("\x1b[{code}m   ")));
        }
    }

    // ========================================================================
    // Failure and determinism
    // ========================================================================

    #[test]
    fn test_missing_identity_is_fatal_and_writes_nothing() {
        let config = RenderConfig {
            header_show: true,
            ..plain_config()
        };
        let mut buf = Vec::new();
        let err = render(
            &config,
            &Art::parse("AB\n"),
            &facts(&[("X", "1")]),
            &NoIdentity,
            None,
            &mut buf,
        )
        .unwrap_err();

        assert!(matches!(err, RenderError::Identity(IdentityError::User)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_missing_host_is_fatal_and_writes_nothing() {
        let config = RenderConfig {
            header_show: true,
            ..plain_config()
        };
        let mut buf = Vec::new();
        let err = render(&config, &Art::parse("AB\n"), &facts(&[("X", "1")]), &NoHost, None, &mut buf)
            .unwrap_err();

        assert!(matches!(err, RenderError::Identity(IdentityError::Host)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_identity_not_consulted_without_header() {
        let out = render_to_string(&plain_config(), &Art::parse("A\n"), &[], &NoIdentity, None).unwrap();
        assert_eq!(out, "A\n");
    }

    #[test]
    fn test_missing_fact_renders_placeholder() {
        let sources: Vec<Box<dyn FactSource>> = vec![Box::new(StaticFact::missing("GPU"))];
        let out = run(&plain_config(), "", &sources, None);
        assert_eq!(out, "GPU: (null)\n");
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = RenderConfig {
            ascii_pad: 4,
            ..RenderConfig::default()
        };
        let sources = facts(&[("OS", "Arch Linux x86_64"), ("CPU", "a\nb")]);
        let first = render_to_string(&config, &Art::builtin(), &sources, &alice(), Some(60)).unwrap();
        let second = render_to_string(&config, &Art::builtin(), &sources, &alice(), Some(60)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.matches('\n').count(), 19);
    }
}
