//! Terminal width query
//!
//! Sampled once at the start of a pass. Resizes during the pass are not
//! observed.

/// Current terminal width in columns
///
/// Returns `None` when the query fails or reports zero columns; callers treat
/// that as "no width limit".
#[must_use]
pub fn terminal_width() -> Option<usize> {
    match crossterm::terminal::size() {
        Ok((0, _)) => {
            tracing::debug!("Terminal reported zero columns, wrapping disabled");
            None
        }
        Ok((cols, _)) => Some(usize::from(cols)),
        Err(e) => {
            tracing::debug!(error = %e, "Terminal size unavailable, wrapping disabled");
            None
        }
    }
}

/// Column limit for the emitter (0 = unbounded)
///
/// Wrapping applies only when enabled in the config and a width is known.
#[must_use]
pub fn wrap_width(line_break: bool, width: Option<usize>) -> usize {
    match width {
        Some(cols) if line_break => cols,
        _ => 0,
    }
}
