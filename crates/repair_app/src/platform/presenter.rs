use std::io::{BufRead, Write};

use repair_core::{Confirmation, LogKind, LogLine, Notice, Outcome, Prompt, RepairViewModel};
use repair_engine::Presenter;

/// Line-oriented presenter: prints progress and log lines, asks `y/n` questions.
///
/// With `assume` set, prompts are answered without reading input and notices
/// do not wait for Enter. Without it, prompts block until a line is read; end
/// of input counts as "no".
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
    assume: Option<Confirmation>,
    last_percent: Option<u8>,
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W, assume: Option<Confirmation>) -> Self {
        Self {
            input,
            output,
            assume,
            last_percent: None,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> Option<Confirmation> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Some(Confirmation::No),
            Ok(_) => match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => Some(Confirmation::Yes),
                "" | "n" | "no" => Some(Confirmation::No),
                _ => None,
            },
        }
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn log(&mut self, line: &LogLine) {
        if line.kind == LogKind::Paragraph {
            let _ = writeln!(self.output);
        }
        let _ = writeln!(self.output, "{line}");
    }

    fn progress(&mut self, view: &RepairViewModel) {
        if self.last_percent == Some(view.percent) {
            return;
        }
        self.last_percent = Some(view.percent);
        let _ = writeln!(self.output, "[{:>3}%]", view.percent);
    }

    fn confirm(&mut self, prompt: &Prompt) -> Confirmation {
        let _ = writeln!(self.output);
        let _ = writeln!(self.output, "{}", prompt.title());
        if prompt.message() != prompt.title() {
            let _ = writeln!(self.output, "{}", prompt.message());
        }
        if let Some(detail) = prompt.detail() {
            let _ = writeln!(self.output, "{detail}");
        }

        if let Some(answer) = self.assume {
            let _ = writeln!(self.output, "[y/N] {}", answer_label(answer));
            return answer;
        }

        loop {
            let _ = write!(self.output, "[y/N] ");
            let _ = self.output.flush();
            if let Some(answer) = self.read_answer() {
                return answer;
            }
            let _ = writeln!(self.output, "Please answer y or n.");
        }
    }

    fn notify(&mut self, notice: Notice) {
        let _ = writeln!(self.output);
        let _ = writeln!(self.output, "{}: {}", notice.title(), notice.message());
        if self.assume.is_none() {
            let _ = write!(self.output, "Press Enter to continue...");
            let _ = self.output.flush();
            let mut line = String::new();
            let _ = self.input.read_line(&mut line);
        }
    }

    fn finished(&mut self, outcome: Outcome) {
        let text = match outcome {
            Outcome::Succeeded => "Done.",
            Outcome::Failed => "Failed. See the log for details.",
        };
        let _ = writeln!(self.output);
        let _ = writeln!(self.output, "{text}");
    }
}

fn answer_label(answer: Confirmation) -> &'static str {
    match answer {
        Confirmation::Yes => "yes",
        Confirmation::No => "no",
    }
}
