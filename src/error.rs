//! Error taxonomy for an inkshed session.
//!
//! Every failure is terminal for the invocation. Each variant maps onto the
//! process exit status via [`InkshedError::exit_code`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status for usage and configuration errors.
pub const EXIT_USAGE: u8 = 2;
/// Exit status when a tool could not be started at all.
pub const EXIT_LAUNCH: u8 = 127;

#[derive(Debug, Error)]
pub enum InkshedError {
    #[error("invalid label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: &'static str },

    #[error("configuration error: {0:#}")]
    Config(#[from] anyhow::Error),

    #[error("failed to write template to {}: {source}", path.display())]
    WriteTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch {tool} ({program}): {source}")]
    Launch {
        tool: Tool,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} ({program}) {}", describe_status(*code))]
    ToolFailed {
        tool: Tool,
        program: String,
        code: Option<i32>,
    },
}

/// Which external collaborator a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Editor,
    Converter,
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tool::Editor => f.write_str("editor"),
            Tool::Converter => f.write_str("converter"),
        }
    }
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

impl InkshedError {
    /// The exit status the launcher should report for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            InkshedError::InvalidLabel { .. } | InkshedError::Config(_) => EXIT_USAGE,
            InkshedError::WriteTemplate { .. } => 1,
            InkshedError::Launch { .. } => EXIT_LAUNCH,
            InkshedError::ToolFailed { code, .. } => match code {
                // Out-of-range statuses (e.g. Windows) must still read as failure.
                Some(code) if (1..=255).contains(code) => *code as u8,
                _ => 1,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, InkshedError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(code: Option<i32>) -> InkshedError {
        InkshedError::ToolFailed {
            tool: Tool::Editor,
            program: "vi".to_string(),
            code,
        }
    }

    #[test]
    fn tool_exit_status_is_propagated() {
        assert_eq!(failed(Some(3)).exit_code(), 3);
        assert_eq!(failed(Some(255)).exit_code(), 255);
    }

    #[test]
    fn signal_and_out_of_range_statuses_map_to_one() {
        assert_eq!(failed(None).exit_code(), 1);
        assert_eq!(failed(Some(-1)).exit_code(), 1);
        assert_eq!(failed(Some(4096)).exit_code(), 1);
    }

    #[test]
    fn launch_failure_uses_not_found_status() {
        let err = InkshedError::Launch {
            tool: Tool::Converter,
            program: "pandoc".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.exit_code(), EXIT_LAUNCH);
        assert!(err.to_string().contains("converter (pandoc)"));
    }

    #[test]
    fn usage_errors_exit_two() {
        let err = InkshedError::InvalidLabel {
            label: String::new(),
            reason: "label is empty",
        };
        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert_eq!(
            InkshedError::Config(anyhow::anyhow!("bad")).exit_code(),
            EXIT_USAGE
        );
    }

    #[test]
    fn failure_messages_describe_status() {
        assert_eq!(failed(Some(2)).to_string(), "editor (vi) exited with status 2");
        assert_eq!(failed(None).to_string(), "editor (vi) was terminated by a signal");
    }
}
