//! Facts taken from the process environment

use std::path::Path;

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// First variable in `keys` with a non-empty value
fn first_set(lookup: impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|&key| lookup(key))
        .find(|value| !value.trim().is_empty())
}

/// Last path component of a program path (`/usr/bin/zsh` -> `zsh`)
pub(crate) fn basename(program: &str) -> Option<String> {
    // `$EDITOR` may carry arguments, e.g. `code --wait`
    let command = program.split_whitespace().next()?;
    Path::new(command)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

pub(crate) fn wm_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    first_set(
        lookup,
        &["XDG_CURRENT_DESKTOP", "DESKTOP_SESSION", "XDG_SESSION_DESKTOP"],
    )
}

pub(crate) fn shell_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    first_set(lookup, &["SHELL"]).and_then(|s| basename(&s))
}

pub(crate) fn editor_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    first_set(lookup, &["VISUAL", "EDITOR"]).and_then(|s| basename(&s))
}

pub(crate) fn terminal_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    first_set(lookup, &["TERM_PROGRAM", "TERM"])
}

pub(super) fn wm() -> Option<String> {
    wm_from(var)
}

pub(super) fn shell() -> Option<String> {
    shell_from(var)
}

pub(super) fn editor() -> Option<String> {
    editor_from(var)
}

pub(super) fn terminal() -> Option<String> {
    terminal_from(var)
}
