//! Rich-Pad: the core of a browser rich-text editing widget
//!
//! This crate provides:
//! - A linear, truncating undo/redo history of surface snapshots
//! - Style dispatch to either the active selection or the whole surface
//! - Keyboard shortcuts, transient status notices and document export
//! - WASM bindings driving a content-editable element through the DOM
//!
//! All text editing is done by the host engine behind [`HostEngine`], so the
//! same [`Editor`] runs against the browser or against [`MemoryHost`].

pub mod config;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod history;
pub mod host;
pub mod keymap;
pub mod state;
pub mod status;
pub mod style;
pub mod toolbar;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmEditor;

// Re-export primary types
pub use config::EditorConfig;
pub use dispatch::StyleDispatcher;
pub use error::{EditorError, Result};
pub use export::{DocumentConverter, ExportArtifact};
pub use history::{History, HistoryPolicy, Snapshot};
pub use host::{HostEngine, MemoryHost};
pub use keymap::{KeyChord, Keymap, ShortcutAction};
pub use state::{Alignment, EditorState, FormatKind, StyleProperty};
pub use status::{NoticeToken, StatusBar};
pub use style::{style_target, StyleMap, StyleTarget};
pub use toolbar::ToolbarState;

use tracing::{debug, info, warn};

pub const NOTHING_TO_SAVE: &str = "Nothing to save";
pub const NOTHING_TO_UNDO: &str = "Nothing to undo";
pub const NOTHING_TO_REDO: &str = "Nothing to redo";

/// The editing widget: declared style, history and status around a host
pub struct Editor<H: HostEngine> {
    host: H,
    state: EditorState,
    history: History,
    dispatcher: StyleDispatcher,
    status: StatusBar,
    keymap: Keymap,
    export_file_name: String,
}

impl<H: HostEngine> Editor<H> {
    /// Create an editor with the default configuration
    pub fn new(host: H) -> Self {
        Self::with_config(host, EditorConfig::default())
    }

    pub fn with_config(host: H, config: EditorConfig) -> Self {
        Self {
            host,
            state: config.initial_state,
            history: History::new(config.history),
            dispatcher: StyleDispatcher::new(config.style_map),
            status: StatusBar::new(config.notice_timeout_ms),
            keymap: Keymap::default(),
            export_file_name: config.export_file_name,
        }
    }

    /// Record the initial snapshot; later calls do nothing
    pub fn mount(&mut self) {
        if self.history.is_empty() {
            self.history.record(self.host.content());
            debug!("editor mounted");
        }
    }

    /// Snapshot the surface after the user typed into it
    pub fn record_input(&mut self) {
        self.history.record(self.host.content());
    }

    /// Declare a style and apply it to the selection or the whole surface
    pub fn change_style(&mut self, property: &str, value: &str) {
        if let Err(err) =
            self.dispatcher
                .change_style(&mut self.state, &mut self.host, property, value)
        {
            warn!(%err, property, value, "style change failed");
            let notice = match err {
                EditorError::SelectionWrap { .. } => "Could not apply style to selection",
                _ => "Could not apply style",
            };
            self.notify(notice);
        }
        self.record_input();
    }

    /// Toggle bold, italic or underline on the selection
    pub fn apply_formatting(&mut self, kind: FormatKind) {
        let result = self.dispatcher.apply_formatting(&mut self.host, kind);
        self.record_input();
        match result {
            Ok(()) => {
                self.notify(format!("{} applied", kind.label()));
            }
            Err(err) => {
                warn!(%err, command = kind.command(), "format command failed");
                self.notify(format!("Failed to apply {}", kind.command()));
            }
        }
    }

    pub fn apply_alignment(&mut self, alignment: Alignment) {
        let result = self
            .dispatcher
            .apply_alignment(&mut self.state, &mut self.host, alignment);
        self.record_input();
        match result {
            Ok(()) => {
                self.notify(alignment.notice());
            }
            Err(err) => {
                warn!(%err, command = alignment.command(), "justify command failed");
                self.notify("Failed to align text");
            }
        }
    }

    /// Restore the previous snapshot; returns false at the oldest entry
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.host.set_content(snapshot.content());
                true
            }
            None => {
                self.notify(NOTHING_TO_UNDO);
                false
            }
        }
    }

    /// Restore the next snapshot; returns false at the newest entry
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.host.set_content(snapshot.content());
                true
            }
            None => {
                self.notify(NOTHING_TO_REDO);
                false
            }
        }
    }

    /// Run the action bound to `chord`.
    ///
    /// Returns true when the chord was handled and the host's default
    /// handling must be suppressed.
    pub fn handle_shortcut(&mut self, chord: &KeyChord) -> bool {
        let Some(action) = self.keymap.resolve(chord) else {
            return false;
        };
        debug!(?action, key = %chord.key, "shortcut");
        match action {
            ShortcutAction::Format(kind) => self.apply_formatting(kind),
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
        }
        true
    }

    /// Export the surface; failures become notices and yield `None`
    pub fn save<C: DocumentConverter + ?Sized>(&mut self, converter: &C) -> Option<ExportArtifact> {
        let content = self.host.content();
        match export::export(&content, &self.state, &self.export_file_name, converter) {
            Ok(artifact) => {
                info!(
                    file = %artifact.file_name,
                    bytes = artifact.bytes.len(),
                    "document exported"
                );
                self.notify("Document saved");
                Some(artifact)
            }
            Err(EditorError::NothingToSave) => {
                self.notify(NOTHING_TO_SAVE);
                None
            }
            Err(err) => {
                warn!(%err, "export failed");
                self.notify("Failed to save document");
                None
            }
        }
    }

    /// Show a transient status message
    pub fn notify(&mut self, message: impl Into<String>) -> NoticeToken {
        let message = message.into();
        self.host.show_status(Some(&message));
        self.status.post(message)
    }

    /// Clear the notice identified by `token` if nothing newer replaced it
    pub fn expire_notice(&mut self, token: NoticeToken) -> bool {
        let cleared = self.status.expire(token);
        if cleared {
            self.host.show_status(None);
        }
        cleared
    }

    pub fn toolbar(&self) -> ToolbarState {
        ToolbarState {
            font_family: self.state.font_family.clone(),
            font_size: self.state.font_size.clone(),
            text_color: self.state.text_color.clone(),
            background_color: self.state.background_color.clone(),
            alignment: self.state.alignment,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            status: self.status.message().map(str::to_string),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn status(&self) -> &StatusBar {
        &self.status
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn export_file_name(&self) -> &str {
        &self.export_file_name
    }
}
