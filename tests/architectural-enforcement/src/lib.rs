//! Architectural Enforcement Integration Tests
//!
//! Source scans that keep the rendering core honest:
//! - No ambient global state
//! - No direct writes to the process's stdout or stderr
//! - No `unwrap()`/`expect()` in production code
//!
//! The helpers here walk a crate's `src/` tree and hand each production line
//! (test modules and comments stripped) to a rule.

use std::fs;
use std::path::{Path, PathBuf};

/// Marker that starts the unit-test module at the bottom of a source file
const TEST_MODULE_MARKER: &str = "#[cfg(test)]";

/// Path to a directory relative to the workspace root
pub fn workspace_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

/// Source directory of the rendering core
pub fn core_src() -> PathBuf {
    workspace_path("fetcha/core/src")
}

/// Every `.rs` file under `dir`, sorted for stable reports
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// Production lines of a file as `(line_number, code)`
///
/// Stops at the test module and drops `//` comments (doc comments included).
pub fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };

    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != TEST_MODULE_MARKER)
        .filter_map(|(idx, line)| {
            let code = line.split("//").next().unwrap_or(line).trim();
            (!code.is_empty()).then(|| (idx + 1, code.to_string()))
        })
        .collect()
}

/// Run `rule` over every production line under `dir`, collecting violations
///
/// `rule` returns a short description when a line breaks it.
pub fn scan<F>(dir: &Path, rule: F) -> Vec<String>
where
    F: Fn(&str) -> Option<&'static str>,
{
    assert!(dir.is_dir(), "source directory missing: {}", dir.display());

    let mut violations = Vec::new();
    for file in rust_files(dir) {
        for (line_number, code) in production_lines(&file) {
            if let Some(what) = rule(&code) {
                violations.push(format!("{}:{} - {what}: {code}", file.display(), line_number));
            }
        }
    }
    violations
}

/// Print violations and fail the test if there are any
pub fn report(title: &str, violations: &[String]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {title}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }

    panic!(
        "\nFound {} violation(s): {title}\nFix these before merging!",
        violations.len()
    );
}
