//! CLI output formatting.
//!
//! Each reporting concern has a pure `format_*` function (returns
//! `Vec<String>`, no I/O) for testability, and a `print_*` wrapper that
//! writes to stdout.

use std::path::{Path, PathBuf};

/// Format the result of one build pass: each written file relative to the
/// output root, followed by a summary line.
pub fn format_build_output(written: &[PathBuf], output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = written
        .iter()
        .map(|path| {
            let rel = path.strip_prefix(output_dir).unwrap_or(path);
            format!("  {}", rel.display())
        })
        .collect();
    lines.push(format!(
        "Built {} pages into {}",
        written.len(),
        output_dir.display()
    ));
    lines
}

pub fn print_build_output(written: &[PathBuf], output_dir: &Path) {
    for line in format_build_output(written, output_dir) {
        println!("{line}");
    }
}
