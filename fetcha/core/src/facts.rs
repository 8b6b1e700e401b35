//! Fact Renderer
//!
//! Turns fact sources into display rows. A source yields one blob of text
//! that may hold several values separated by `\n` (one per CPU package, one
//! per GPU, ...). Each value becomes its own row; with numbering enabled the
//! rows of a multi-value source are labeled `CPU1`, `CPU2`, and so on.

use crate::config::RenderConfig;

/// Value shown when a source produces nothing
pub const PLACEHOLDER: &str = "(null)";

/// Separator between sub-values of one fact
const LINE_SEPARATOR: char = '\n';

/// A labeled, lazily produced piece of system information
///
/// `produce` is called exactly once per render pass.
pub trait FactSource {
    /// Label shown in front of the value
    fn label(&self) -> &str;

    /// Produce the value; `None` if it could not be determined
    fn produce(&self) -> Option<String>;
}

/// A fact with a fixed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFact {
    label: String,
    value: Option<String>,
}

impl StaticFact {
    /// Create a fact that always produces `value`
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
        }
    }

    /// Create a fact that never produces a value
    pub fn missing(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }
}

impl FactSource for StaticFact {
    fn label(&self) -> &str {
        &self.label
    }

    fn produce(&self) -> Option<String> {
        self.value.clone()
    }
}

/// One display row of the fact panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Label, already padded when alignment is on
    pub label: String,
    /// Value text (a single line)
    pub value: String,
}

/// Fact rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactOptions {
    /// Append ordinals to labels of multi-value facts
    pub numerate: bool,
    /// Pad labels to the longest one
    pub align: bool,
}

impl FactOptions {
    /// Take the switches from the render configuration
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            numerate: config.numerate_same,
            align: config.info_align,
        }
    }
}

/// Result of rendering all fact sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFacts {
    /// Rows in source order
    pub rows: Vec<RenderedRow>,
    /// Longest label after numbering, in columns
    pub max_label: usize,
}

/// Produce every source once and expand the results into rows
pub fn render_facts(sources: &[Box<dyn FactSource>], options: FactOptions) -> RenderedFacts {
    let mut rows = Vec::with_capacity(sources.len());

    for source in sources {
        let label = source.label();
        let value = source.produce().unwrap_or_else(|| {
            tracing::debug!(label, "Fact unavailable, using placeholder");
            PLACEHOLDER.to_string()
        });

        let parts: Vec<&str> = value.split(LINE_SEPARATOR).collect();
        let numbered = options.numerate && parts.len() > 1;
        for (ordinal, part) in parts.iter().enumerate() {
            rows.push(RenderedRow {
                label: if numbered {
                    numbered_label(label, ordinal + 1)
                } else {
                    label.to_string()
                },
                value: (*part).to_string(),
            });
        }
    }

    let max_label = rows
        .iter()
        .map(|row| display_len(&row.label))
        .max()
        .unwrap_or(0);

    if options.align {
        for row in &mut rows {
            row.label = pad_right(&row.label, max_label);
        }
    }

    RenderedFacts { rows, max_label }
}

fn numbered_label(label: &str, ordinal: usize) -> String {
    format!("{label}{ordinal}")
}

/// Width in columns, one per character
fn display_len(text: &str) -> usize {
    text.chars().count()
}

fn pad_right(text: &str, width: usize) -> String {
    let len = display_len(text);
    let mut out = String::with_capacity(text.len() + width.saturating_sub(len));
    out.push_str(text);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}
