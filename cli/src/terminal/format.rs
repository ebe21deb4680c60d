use crate::terminal::colors;
use colored::*;
use hcheck_core::report::{ReportLine, Status};

pub fn status_glyph(status: Status) -> ColoredString {
    let glyph: String = status.glyph().to_string();
    match status {
        Status::Pass => glyph.color(colors::PASS).bold(),
        Status::Fail => glyph.color(colors::FAIL).bold(),
    }
}

/// A report line with its glyph colored by status.
pub fn report_line(line: &ReportLine) -> String {
    let message: ColoredString = match line.status {
        Status::Pass => line.message.color(colors::TEXT_DEFAULT),
        Status::Fail => line.message.normal(),
    };
    format!("{} {}{}", status_glyph(line.status), line.label.bold(), message)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
