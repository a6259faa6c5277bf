use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Starts a new phase; presenters separate it from the previous block.
    Paragraph,
    Info,
    Success,
    Warning,
    Failure,
}

/// Human-readable progress line shown to the user and forwarded to the log sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub kind: LogKind,
    pub text: String,
}

impl LogLine {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(LogKind::Paragraph, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(LogKind::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(LogKind::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(LogKind::Warning, text)
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self::new(LogKind::Failure, text)
    }

    fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn marker(&self) -> Option<&'static str> {
        match self.kind {
            LogKind::Success => Some("✅"),
            LogKind::Warning => Some("⚠️"),
            LogKind::Failure => Some("❌"),
            LogKind::Paragraph | LogKind::Info => None,
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.marker() {
            Some(marker) => write!(f, "{marker} {}", self.text),
            None => f.write_str(&self.text),
        }
    }
}
