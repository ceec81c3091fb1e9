//! Error taxonomy for recoverable editor failures

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditorError>;

/// Failures surfaced by the host, the converter or configuration loading.
///
/// None of these are fatal. The [`Editor`](crate::Editor) catches them, logs
/// them and turns them into a status notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// The selection could not be wrapped in a style scope
    #[error("cannot wrap selection: {reason}")]
    SelectionWrap { reason: String },

    /// A built-in host command (format, justify, style) failed
    #[error("host command `{command}` failed: {reason}")]
    HostCommand { command: String, reason: String },

    /// The document converter or the download failed
    #[error("export failed: {reason}")]
    Export { reason: String },

    /// Export was requested for a surface without visible text
    #[error("nothing to save")]
    NothingToSave,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EditorError {
    pub fn selection_wrap(reason: impl Into<String>) -> Self {
        Self::SelectionWrap {
            reason: reason.into(),
        }
    }

    pub fn host_command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::HostCommand {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn export(reason: impl Into<String>) -> Self {
        Self::Export {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EditorError::host_command("bold", "not supported");
        assert_eq!(err.to_string(), "host command `bold` failed: not supported");
        assert_eq!(EditorError::NothingToSave.to_string(), "nothing to save");
    }

    #[test]
    fn test_json_error_becomes_config() {
        let err: EditorError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, EditorError::Config(_)));
    }
}
