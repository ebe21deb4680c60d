use std::fmt::Display;

use crate::terminal::colors;
use colored::*;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    println!("{msg}");
}

/// Draws `text` inside a rounded box:
///
/// ```text
/// ╭───────────╮
/// │ Diagnosis │
/// ╰───────────╯
/// ```
pub fn boxed(text: &str) -> [String; 3] {
    let inner: String = format!(" {text} ");
    let bar: String = "─".repeat(UnicodeWidthStr::width(inner.as_str()));
    [
        format!("╭{bar}╮"),
        format!("│{inner}│"),
        format!("╰{bar}╯"),
    ]
}

pub fn title(text: &str) {
    let [top, middle, bottom] = boxed(text);
    print(&format!("{}", top.color(colors::SEPARATOR)));
    let middle: String = middle.replace(text, &text.color(colors::PRIMARY).bold().to_string());
    print(&middle);
    print(&format!("{}", bottom.color(colors::SEPARATOR)));
}

pub fn separator() {
    let sep: ColoredString = "─".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
}

pub fn no_services() {
    print(&format!("{}", "No services to check".yellow().bold()));
}

/// Reports a fatal error on stderr.
pub fn error<E: Display + ?Sized>(err: &E) {
    eprintln!("{} {}", "error:".red().bold(), err);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
