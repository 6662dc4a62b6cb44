//! Terminal renderer. Implements RenderPort.
//!
//! Prints the markdown source as-is (it reads fine as plain text) and shows
//! an indicatif spinner while a request or translation is pending.

use crate::domain::{DisplayLanguage, Region, RenderHints};
use crate::ports::RenderPort;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// What is on screen. Result and error frames carry the generation they were
/// produced under, so a repeated outcome is drawn again.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    Idle,
    Busy(&'static str),
    Result(u64, DisplayLanguage, String),
    Error(u64, String),
}

impl Frame {
    fn from_hints(hints: &RenderHints) -> Self {
        if hints.translating {
            return Frame::Busy(hints.translate_button.label);
        }
        match hints.region {
            Region::Idle => Frame::Idle,
            Region::Loading => Frame::Busy("Analyzing..."),
            Region::Result => Frame::Result(
                hints.generation,
                hints.language,
                hints.display_text.clone().unwrap_or_default(),
            ),
            Region::Error => Frame::Error(
                hints.generation,
                hints.error_message.clone().unwrap_or_default(),
            ),
        }
    }
}

#[derive(Default)]
struct Screen {
    last: Option<Frame>,
    spinner: Option<ProgressBar>,
}

/// Draws only when the visible frame changes (mode switches re-render the same frame).
#[derive(Default)]
pub struct TerminalRenderer {
    screen: Mutex<Screen>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

impl RenderPort for TerminalRenderer {
    fn render(&self, hints: &RenderHints) {
        let frame = Frame::from_hints(hints);
        let mut screen = self.screen.lock().unwrap_or_else(|e| e.into_inner());
        if screen.last.as_ref() == Some(&frame) {
            return;
        }
        if let Some(pb) = screen.spinner.take() {
            pb.finish_and_clear();
        }

        match &frame {
            Frame::Idle => {}
            Frame::Busy(message) => screen.spinner = Some(spinner(message)),
            Frame::Result(_, lang, text) => {
                println!();
                println!("{}", format!("── Analysis ({}) ──", lang).bold().cyan());
                println!("{}", text);
                println!();
            }
            Frame::Error(_, message) => {
                println!("{} {}", "Error:".bold().red(), message);
            }
        }
        screen.last = Some(frame);
    }
}
