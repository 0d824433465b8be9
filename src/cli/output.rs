//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: names, paths, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info

use std::fmt::Display;

use console::{style, StyledObject};

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Apply `f` to `text` only when colors are enabled.
fn paint<D: Display>(text: D, f: impl FnOnce(StyledObject<D>) -> StyledObject<D>) -> String {
    if colors_enabled() {
        f(style(text)).to_string()
    } else {
        text.to_string()
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ initialized`
pub fn success(msg: &str) {
    println!("{} {}", paint("✓", |s| s.green()), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ identity not found`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint("✗", |s| s.red()), msg);
}

/// Print a warning message to stderr (yellow).
pub fn warn(msg: &str) {
    eprintln!("{} {}", paint("⚠", |s| s.yellow()), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: chef-identity init`
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint("→", |s| s.cyan()), paint(msg, |s| s.cyan()));
}

/// Print a bold header.
pub fn header(title: &str) {
    println!("{}", paint(title, |s| s.bold()));
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  host:  10.0.0.5`
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(label, |s| s.dim()),
        paint(value.to_string(), |s| s.bold())
    );
}

/// Print a list item with bullet.
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", paint("─".repeat(RULE_WIDTH), |s| s.dim()));
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", paint(msg, |s| s.dim()));
}

/// Print raw data (JSON etc.) without decoration.
pub fn data(s: &str) {
    println!("{}", s);
}

pub fn blank() {
    println!();
}

/// Format an identity name in cyan for inline use.
pub fn name(n: &str) -> String {
    paint(n, |s| s.cyan())
}

/// Format a path in cyan for inline use.
pub fn path(p: impl Display) -> String {
    paint(p.to_string(), |s| s.cyan())
}

/// Format a command in green for inline use.
pub fn cmd(c: &str) -> String {
    paint(c, |s| s.green())
}

/// Format a count in bold for inline use.
pub fn count(n: usize) -> String {
    paint(n, |s| s.bold())
}

/// Print a build progress line, prefixed so it stands out in CI logs.
pub fn step(msg: &str) {
    println!("{} {}", paint("[chef-identity]", |s| s.dim()), msg);
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}
