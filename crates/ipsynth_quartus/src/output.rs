//! Classification of Quartus console messages.
//!
//! Quartus prefixes every message with its severity and usually a numeric
//! message ID, e.g. `Warning (10541): VHDL Signal Declaration warning ...`.
//! Nested messages are indented; the indentation is ignored here.

use std::fmt;

/// Severity of a Quartus message, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageSeverity {
    /// `Info` and `Extra Info` messages.
    Info,
    /// `Warning` messages.
    Warning,
    /// `Critical Warning` messages.
    CriticalWarning,
    /// `Error` messages.
    Error,
}

impl fmt::Display for MessageSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::CriticalWarning => write!(f, "critical warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

const SEVERITY_PREFIXES: &[(&str, MessageSeverity)] = &[
    ("Critical Warning", MessageSeverity::CriticalWarning),
    ("Extra Info", MessageSeverity::Info),
    ("Warning", MessageSeverity::Warning),
    ("Error", MessageSeverity::Error),
    ("Info", MessageSeverity::Info),
];

/// One classified line of Quartus output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolMessage {
    /// Message severity.
    pub severity: MessageSeverity,
    /// Quartus message ID, if the line carried one.
    pub id: Option<u32>,
    /// Message text after the `:`.
    pub text: String,
}

impl ToolMessage {
    /// Emits the message through the `log` facade.
    ///
    /// Info messages are only visible at `info` level when `show_logs` is set.
    pub fn log(&self, show_logs: bool) {
        match self.severity {
            MessageSeverity::Error => log::error!("quartus_map: {}", self),
            MessageSeverity::CriticalWarning | MessageSeverity::Warning => {
                log::warn!("quartus_map: {}", self)
            }
            MessageSeverity::Info if show_logs => log::info!("quartus_map: {}", self),
            MessageSeverity::Info => log::trace!("quartus_map: {}", self),
        }
    }
}

impl fmt::Display for ToolMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "{} ({id}): {}", self.severity, self.text),
            None => write!(f, "{}: {}", self.severity, self.text),
        }
    }
}

/// Classifies one output line; returns `None` for lines without a severity.
pub fn classify_line(line: &str) -> Option<ToolMessage> {
    let line = line.trim_start();
    let (severity, rest) = SEVERITY_PREFIXES
        .iter()
        .find_map(|(prefix, severity)| line.strip_prefix(prefix).map(|rest| (*severity, rest)))?;

    let (id, rest) = match rest.strip_prefix(" (") {
        Some(inner) => {
            let close = inner.find(')')?;
            let id = inner[..close].parse().ok()?;
            (Some(id), &inner[close + 1..])
        }
        None => (None, rest),
    };

    let text = rest.strip_prefix(':')?.trim();
    Some(ToolMessage {
        severity,
        id,
        text: text.to_string(),
    })
}

/// Messages collected from one `quartus_map` run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapReport {
    /// Classified messages in output order.
    pub messages: Vec<ToolMessage>,
}

impl MapReport {
    /// Returns the error messages.
    pub fn errors(&self) -> impl Iterator<Item = &ToolMessage> {
        self.messages
            .iter()
            .filter(|m| m.severity == MessageSeverity::Error)
    }

    /// Number of error messages.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warnings, critical ones included.
    pub fn warning_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| {
                matches!(
                    m.severity,
                    MessageSeverity::Warning | MessageSeverity::CriticalWarning
                )
            })
            .count()
    }
}
