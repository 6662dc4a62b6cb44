//! Welcome banner: the app name in figlet, a rule underneath, version and disclaimer.

use crossterm::queue;
use crossterm::style::{Print, Stylize};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TITLE: &str = "MEDSCAN";
const DISCLAIMER: &str = "For information only. Not a substitute for professional medical advice.";

/// Figure rows with trailing blanks dropped. Plain title if the font fails.
fn figure(title: &str) -> Vec<String> {
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(title).map(|f| f.to_string()))
        .unwrap_or_else(|| title.to_string());
    let mut rows: Vec<String> = art.lines().map(|l| l.trim_end().to_string()).collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows
}

/// Rule as wide as the widest row.
fn rule(rows: &[String]) -> String {
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    "─".repeat(width)
}

pub fn print_welcome() {
    let rows = figure(TITLE);
    let mut out = stdout();
    for row in &rows {
        let _ = queue!(out, Print(row.as_str().cyan().bold()), Print("\r\n"));
    }
    let _ = queue!(
        out,
        Print(rule(&rows).dark_cyan()),
        Print("\r\n"),
        Print(format!("v{}  ", env!("CARGO_PKG_VERSION")).bold()),
        Print(DISCLAIMER.dim()),
        Print("\r\n\r\n"),
    );
    let _ = out.flush();
}
