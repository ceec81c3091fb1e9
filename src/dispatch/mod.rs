//! Style dispatch: route toolbar changes to the selection or the surface

use tracing::{debug, warn};

use crate::error::Result;
use crate::host::HostEngine;
use crate::state::{Alignment, EditorState, FormatKind, StyleProperty};
use crate::style::{style_target, StyleMap, StyleTarget};

/// Applies style changes through a [`HostEngine`].
///
/// The dispatcher never records history or posts notices. The
/// [`Editor`](crate::Editor) does both after every dispatch.
#[derive(Debug, Clone, Default)]
pub struct StyleDispatcher {
    map: StyleMap,
}

impl StyleDispatcher {
    pub fn new(map: StyleMap) -> Self {
        Self { map }
    }

    /// Declare `property = value` and apply it to the selection or surface.
    ///
    /// The declared state is updated before the host is touched, so it holds
    /// the new value even when the host fails.
    pub fn change_style<H: HostEngine>(
        &self,
        state: &mut EditorState,
        host: &mut H,
        property: &str,
        value: &str,
    ) -> Result<StyleTarget> {
        let parsed = StyleProperty::parse(property);
        if !state.set(&parsed, value) {
            debug!(property, value, "property not tracked in editor state");
        }

        let attribute = self.map.attribute(property);
        let target = style_target(host.has_selection());
        debug!(property, attribute, value, ?target, "dispatching style");

        match target {
            StyleTarget::Selection => {
                if let Err(err) = host.wrap_selection(attribute, value) {
                    warn!(%err, attribute, "selection wrap failed");
                    return Err(err);
                }
                host.clear_selection();
            }
            StyleTarget::Surface => host.set_surface_style(attribute, value)?,
        }
        Ok(target)
    }

    /// Toggle bold, italic or underline on the selection
    pub fn apply_formatting<H: HostEngine>(&self, host: &mut H, kind: FormatKind) -> Result<()> {
        host.exec_format(kind)
    }

    /// Declare and apply a paragraph alignment
    pub fn apply_alignment<H: HostEngine>(
        &self,
        state: &mut EditorState,
        host: &mut H,
        alignment: Alignment,
    ) -> Result<()> {
        state.alignment = alignment;
        host.exec_justify(alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use crate::host::MemoryHost;

    #[test]
    fn test_style_selection() {
        let dispatcher = StyleDispatcher::default();
        let mut state = EditorState::default();
        let mut host = MemoryHost::with_content("one two");
        host.select_text("two");

        let target = dispatcher
            .change_style(&mut state, &mut host, "fontSize", "24px")
            .unwrap();

        assert_eq!(target, StyleTarget::Selection);
        assert_eq!(state.font_size, "24px");
        assert_eq!(
            host.content(),
            "one <span style=\"font-size: 24px;\">two</span>"
        );
        assert!(!host.has_selection());
        assert_eq!(host.surface_style("font-size"), None);
    }

    #[test]
    fn test_style_surface() {
        let dispatcher = StyleDispatcher::default();
        let mut state = EditorState::default();
        let mut host = MemoryHost::with_content("<p>one</p>");

        let target = dispatcher
            .change_style(&mut state, &mut host, "textColor", "#ff0000")
            .unwrap();

        assert_eq!(target, StyleTarget::Surface);
        assert_eq!(state.text_color, "#ff0000");
        assert_eq!(host.surface_style("color"), Some("#ff0000"));
        assert_eq!(host.content(), "<p>one</p>");
    }

    #[test]
    fn test_unmapped_property_passes_through() {
        let dispatcher = StyleDispatcher::new(StyleMap::empty());
        let mut state = EditorState::default();
        let mut host = MemoryHost::new();

        dispatcher
            .change_style(&mut state, &mut host, "letter-spacing", "2px")
            .unwrap();
        assert_eq!(host.surface_style("letter-spacing"), Some("2px"));
        assert_eq!(state, EditorState::default());
    }

    #[test]
    fn test_failed_wrap_keeps_declared_state() {
        let dispatcher = StyleDispatcher::default();
        let mut state = EditorState::default();
        let mut host = MemoryHost::with_content("<b>Hello</b> world");
        host.select_text("llo</b> wo");

        let err = dispatcher
            .change_style(&mut state, &mut host, "backgroundColor", "yellow")
            .unwrap_err();

        assert!(matches!(err, EditorError::SelectionWrap { .. }));
        assert_eq!(state.background_color, "yellow");
        assert!(host.has_selection());
    }

    #[test]
    fn test_alignment_updates_state_even_on_failure() {
        let dispatcher = StyleDispatcher::default();
        let mut state = EditorState::default();
        let mut host = MemoryHost::new();
        host.fail_commands(true);

        assert!(dispatcher
            .apply_alignment(&mut state, &mut host, Alignment::Center)
            .is_err());
        assert_eq!(state.alignment, Alignment::Center);
    }
}
