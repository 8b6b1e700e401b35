//! Integration Test: Rendering Core Purity
//!
//! **Policy**: The rendering core receives everything it needs as arguments.
//! It keeps no process-wide state and writes only to the sink it is handed.
//! Configuration is an immutable value, facts and identity are capabilities,
//! and output goes through `io::Write`.

use architectural_enforcement::{core_src, report, scan};

/// Global state forbidden in the core
fn global_state(code: &str) -> Option<&'static str> {
    if code.starts_with("static ") || code.starts_with("pub static ") {
        return Some("Static item");
    }
    if code.contains("static mut") {
        return Some("Mutable static");
    }
    for pattern in ["thread_local!", "lazy_static!", "OnceLock", "OnceCell", "LazyLock"] {
        if code.contains(pattern) {
            return Some("Lazily initialized global");
        }
    }
    None
}

/// Direct process output forbidden in the core
fn process_output(code: &str) -> Option<&'static str> {
    for pattern in ["println!", "print!(", "eprintln!", "eprint!(", "dbg!("] {
        if code.contains(pattern) {
            return Some("Print macro");
        }
    }
    if code.contains("stdout()") || code.contains("stderr()") {
        return Some("Process stream handle");
    }
    None
}

#[test]
fn test_no_global_state_in_core() {
    let violations = scan(&core_src(), global_state);
    report("Global state in the rendering core", &violations);
}

#[test]
fn test_no_direct_output_in_core() {
    let violations = scan(&core_src(), process_output);
    report("Direct stdout/stderr writes in the rendering core", &violations);
}

#[test]
fn test_rules_catch_known_patterns() {
    assert!(global_state("static mut WIDTH: usize = 0;").is_some());
    assert!(global_state("static CONFIG: OnceLock<RenderConfig> = OnceLock::new();").is_some());
    assert!(global_state("fn label(&self) -> &'static str {").is_none());
    assert!(process_output("println!(\"{row}\");").is_some());
    assert!(process_output("let out = std::io::stdout();").is_some());
    assert!(process_output("writer.emit(text, true)?;").is_none());
}
