//! Console presenter. Status markers in color, report as plain text.

use crate::usecases::RunOutcome;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

/// Status marker printed before a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Start,
    Processing,
    Success,
    Error,
}

impl Marker {
    fn label(self) -> &'static str {
        match self {
            Marker::Start => "[START]",
            Marker::Processing => "[PROCESSING]",
            Marker::Success => "[SUCCESS]",
            Marker::Error => "[ERROR]",
        }
    }

    fn color(self) -> Color {
        match self {
            Marker::Start | Marker::Processing => Color::Cyan,
            Marker::Success => Color::Green,
            Marker::Error => Color::Red,
        }
    }
}

/// Print a marker in its color followed by `message`.
pub fn print_status(marker: Marker, message: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(marker.color()));
    let _ = out.execute(Print(marker.label()));
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print(format!(" {}\n", message)));
    let _ = out.flush();
}

/// Final console output for a run: the pipeline error, or the report followed by
/// where it was saved (or why saving failed).
pub fn present_outcome(outcome: &RunOutcome) {
    if let Some(e) = outcome.state.error() {
        print_status(Marker::Error, &format!("Error: {}", e));
        return;
    }
    if let Some(text) = outcome.state.output() {
        println!("{}", text);
    }
    if let Some((marker, message)) = closing_line(outcome) {
        print_status(marker, &message);
    }
}

fn closing_line(outcome: &RunOutcome) -> Option<(Marker, String)> {
    if let Some(e) = &outcome.save_error {
        return Some((Marker::Error, format!("Error: {}", e)));
    }
    outcome
        .saved_to
        .as_ref()
        .map(|saved_to| (Marker::Success, format!("Results saved to {}", saved_to)))
}
