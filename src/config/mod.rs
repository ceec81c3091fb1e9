//! Editor configuration

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::export::DEFAULT_FILE_NAME;
use crate::history::HistoryPolicy;
use crate::state::EditorState;
use crate::status::DEFAULT_NOTICE_TIMEOUT_MS;
use crate::style::StyleMap;

/// Settings an embedder can pass when creating an editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub history: HistoryPolicy,
    /// Status message lifetime (ms)
    pub notice_timeout_ms: u64,
    /// Property to rendering-attribute table
    pub style_map: StyleMap,
    pub export_file_name: String,
    /// Declared style at mount
    pub initial_state: EditorState,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history: HistoryPolicy::default(),
            notice_timeout_ms: DEFAULT_NOTICE_TIMEOUT_MS,
            style_map: StyleMap::standard(),
            export_file_name: DEFAULT_FILE_NAME.to_string(),
            initial_state: EditorState::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.notice_timeout_ms == 0 {
            return Err(EditorError::Config(
                "noticeTimeoutMs must be greater than zero".into(),
            ));
        }
        if self.history.max_entries == Some(0) {
            return Err(EditorError::Config(
                "history.maxEntries must be at least 1".into(),
            ));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(EditorError::Config("exportFileName must not be empty".into()));
        }
        Ok(())
    }
}
