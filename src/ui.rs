use crate::view::{ResultView, Severity};

/// Submit control state, the one piece of UI the submission flow owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    /// Control disabled, showing a loading label.
    Pending { label: String },
    /// Control enabled, showing its regular label.
    Ready { label: String },
}

/// Rendering collaborator. The submission flow computes what to show and
/// hands it over; how it appears on screen lives behind this trait.
pub trait Ui {
    fn set_submit(&self, state: SubmitState);
    /// Blocking notification, the terminal stand-in for `alert()`.
    fn notify(&self, message: &str);
    /// Reveal the result region and bring it into view.
    fn show_result(&self, view: &ResultView);
}

/// Restores the submit control when dropped, covering every exit path of a
/// submission.
pub struct SubmitGuard<'a> {
    ui: &'a dyn Ui,
    original_label: String,
}

impl<'a> SubmitGuard<'a> {
    pub fn engage(ui: &'a dyn Ui, original_label: &str, pending_label: &str) -> Self {
        ui.set_submit(SubmitState::Pending {
            label: pending_label.to_string(),
        });
        Self {
            ui,
            original_label: original_label.to_string(),
        }
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.ui.set_submit(SubmitState::Ready {
            label: std::mem::take(&mut self.original_label),
        });
    }
}

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

#[derive(Default)]
pub struct TerminalUi;

impl TerminalUi {
    pub fn new() -> Self {
        Self
    }

    fn color(severity: Severity) -> &'static str {
        match severity {
            Severity::Danger => RED,
            Severity::Success => GREEN,
        }
    }
}

impl Ui for TerminalUi {
    fn set_submit(&self, state: SubmitState) {
        match state {
            SubmitState::Pending { label } => eprintln!("{DIM}{label}{RESET}"),
            // The prompt returning to the shell is the restored control.
            SubmitState::Ready { .. } => {}
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("{RED}{BOLD}{message}{RESET}");
    }

    fn show_result(&self, view: &ResultView) {
        let color = Self::color(view.severity);
        println!();
        println!("{color}{BOLD}{} {}{RESET}", view.severity.icon(), view.title);
        println!("  Attrition probability: {}", view.attrition_probability);
        println!("  Retention probability: {}", view.retention_probability);
        println!("  Risk level: {color}[{}]{RESET}", view.risk_badge);
        println!("  Recommendations:");
        for action in view.recommendations.iter() {
            println!("    - {action}");
        }
    }
}
