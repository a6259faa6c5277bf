use repair_core::{Confirmation, LogLine, Notice, Outcome, Prompt, RepairViewModel};

/// Presentation collaborator: renders progress and log lines and answers prompts.
///
/// `confirm` and `notify` block the workflow until the user responds.
pub trait Presenter {
    fn log(&mut self, line: &LogLine);
    fn progress(&mut self, view: &RepairViewModel);
    fn confirm(&mut self, prompt: &Prompt) -> Confirmation;
    fn notify(&mut self, notice: Notice);
    fn finished(&mut self, _outcome: Outcome) {}
}
