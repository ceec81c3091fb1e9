//! In-memory host operating on a markup string

use std::ops::Range;

use smallvec::SmallVec;

use crate::error::{EditorError, Result};
use crate::host::HostEngine;
use crate::state::{Alignment, FormatKind};

/// Elements that never have a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "wbr"];

/// A markup surface with a byte-range selection.
///
/// Wrapping follows the rules of DOM `Range.surroundContents`: a range that
/// cuts through a tag or only partially covers an element is rejected.
/// Justify commands change markup the way a browser does, by placing the
/// content in an aligned block; this host treats the whole surface as one
/// paragraph.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    markup: String,
    selection: Option<Range<usize>>,
    surface_style: SmallVec<[(String, String); 4]>,
    status: Option<String>,
    fail_commands: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            ..Self::default()
        }
    }

    /// Select a byte range of the markup; returns false if out of bounds
    pub fn select(&mut self, range: Range<usize>) -> bool {
        let valid = range.start <= range.end
            && range.end <= self.markup.len()
            && self.markup.is_char_boundary(range.start)
            && self.markup.is_char_boundary(range.end);
        if valid {
            self.selection = Some(range);
        }
        valid
    }

    /// Select the first occurrence of `needle`
    pub fn select_text(&mut self, needle: &str) -> bool {
        match self.markup.find(needle) {
            Some(start) => self.select(start..start + needle.len()),
            None => false,
        }
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn selected_markup(&self) -> Option<&str> {
        self.selection.clone().map(|r| &self.markup[r])
    }

    /// Value of a declaration on the surface element
    pub fn surface_style(&self, attribute: &str) -> Option<&str> {
        self.surface_style
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, value)| value.as_str())
    }

    /// Last status text shown, if still visible
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Make every host command fail, as an engine without support would
    pub fn fail_commands(&mut self, fail: bool) {
        self.fail_commands = fail;
    }

    fn check_command(&self, command: &str) -> Result<()> {
        if self.fail_commands {
            return Err(EditorError::host_command(command, "command not supported"));
        }
        Ok(())
    }

    fn wrappable_selection(&self) -> Result<Range<usize>> {
        let range = self
            .selection
            .clone()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| EditorError::selection_wrap("no selection"))?;

        if inside_tag(&self.markup, range.start) || inside_tag(&self.markup, range.end) {
            return Err(EditorError::selection_wrap("range boundary splits a tag"));
        }
        if !is_balanced(&self.markup[range.clone()]) {
            return Err(EditorError::selection_wrap(
                "range partially selects a non-text node",
            ));
        }
        Ok(range)
    }

    fn replace_selection(&mut self, range: Range<usize>, replacement: String) {
        let start = range.start;
        let len = replacement.len();
        self.markup.replace_range(range, &replacement);
        self.selection = Some(start..start + len);
    }
}

impl HostEngine for MemoryHost {
    fn content(&self) -> String {
        self.markup.clone()
    }

    fn set_content(&mut self, markup: &str) {
        self.markup = markup.to_string();
        self.selection = None;
    }

    fn has_selection(&self) -> bool {
        self.selection.as_ref().is_some_and(|r| !r.is_empty())
    }

    fn wrap_selection(&mut self, attribute: &str, value: &str) -> Result<()> {
        let range = self.wrappable_selection()?;
        let wrapped = format!(
            "<span style=\"{}: {};\">{}</span>",
            attribute,
            value,
            &self.markup[range.clone()]
        );
        self.replace_selection(range, wrapped);
        Ok(())
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn set_surface_style(&mut self, attribute: &str, value: &str) -> Result<()> {
        match self.surface_style.iter_mut().find(|(name, _)| name == attribute) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .surface_style
                .push((attribute.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn exec_format(&mut self, kind: FormatKind) -> Result<()> {
        self.check_command(kind.command())?;
        if !self.has_selection() {
            // Collapsed caret: the engine only arms the typing style
            return Ok(());
        }
        let range = self
            .wrappable_selection()
            .map_err(|e| EditorError::host_command(kind.command(), e.to_string()))?;

        let fragment = &self.markup[range.clone()];
        let open = format!("<{}>", kind.tag());
        let close = format!("</{}>", kind.tag());
        let replacement = match fragment
            .strip_prefix(open.as_str())
            .and_then(|rest| rest.strip_suffix(close.as_str()))
        {
            Some(inner) if is_balanced(inner) => inner.to_string(),
            _ => format!("{}{}{}", open, fragment, close),
        };
        self.replace_selection(range, replacement);
        Ok(())
    }

    fn exec_justify(&mut self, alignment: Alignment) -> Result<()> {
        self.check_command(alignment.command())?;
        let inner = aligned_block_inner(&self.markup).unwrap_or(&self.markup);
        self.markup = format!(
            "<div style=\"text-align: {};\">{}</div>",
            alignment.css_value(),
            inner
        );
        self.selection = None;
        Ok(())
    }

    fn show_status(&mut self, message: Option<&str>) {
        self.status = message.map(str::to_string);
    }
}

/// Whether byte `pos` falls between a `<` and its `>`
fn inside_tag(markup: &str, pos: usize) -> bool {
    let before = &markup[..pos];
    match (before.rfind('<'), before.rfind('>')) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Whether every element opened in `fragment` is closed inside it, and vice versa
fn is_balanced(fragment: &str) -> bool {
    let mut stack: SmallVec<[&str; 8]> = SmallVec::new();
    let mut rest = fragment;

    while let Some(open) = rest.find('<') {
        if rest[..open].contains('>') {
            return false;
        }
        let Some(len) = rest[open..].find('>') else {
            return false;
        };
        let tag = &rest[open + 1..open + len];
        rest = &rest[open + len + 1..];

        if let Some(name) = tag.strip_prefix('/') {
            if stack.pop() != Some(tag_name(name)) {
                return false;
            }
        } else if !tag.ends_with('/') && !VOID_ELEMENTS.contains(&tag_name(tag)) {
            stack.push(tag_name(tag));
        }
    }

    !rest.contains('>') && stack.is_empty()
}

/// Content of an alignment block spanning the whole markup
fn aligned_block_inner(markup: &str) -> Option<&str> {
    let rest = markup.strip_prefix("<div style=\"text-align: ")?;
    let open_end = rest.find("\">")?;
    let inner = rest[open_end + 2..].strip_suffix("</div>")?;
    is_balanced(inner).then_some(inner)
}

fn tag_name(tag: &str) -> &str {
    tag.split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_fragments() {
        assert!(is_balanced("plain text"));
        assert!(is_balanced("<b>bold</b> and <i>it</i>"));
        assert!(is_balanced("line<br>break"));
        assert!(is_balanced("<span style=\"color: red;\">x</span>"));
        assert!(!is_balanced("<b>open"));
        assert!(!is_balanced("close</b>"));
        assert!(!is_balanced("<b><i>x</b></i>"));
        assert!(!is_balanced("b>x"));
    }

    #[test]
    fn test_inside_tag() {
        let markup = "a<b>c</b>";
        assert!(!inside_tag(markup, 1));
        assert!(inside_tag(markup, 2));
        assert!(!inside_tag(markup, 4));
    }

    #[test]
    fn test_wrap_selection() {
        let mut host = MemoryHost::with_content("Hello world");
        assert!(host.select_text("world"));
        host.wrap_selection("font-size", "24px").unwrap();
        assert_eq!(
            host.content(),
            "Hello <span style=\"font-size: 24px;\">world</span>"
        );
        assert_eq!(
            host.selected_markup(),
            Some("<span style=\"font-size: 24px;\">world</span>")
        );
    }

    #[test]
    fn test_wrap_rejects_partial_element() {
        let mut host = MemoryHost::with_content("<b>Hello</b> world");
        assert!(host.select_text("llo</b> wo"));
        let err = host.wrap_selection("color", "red").unwrap_err();
        assert!(matches!(err, EditorError::SelectionWrap { .. }));
        assert_eq!(host.content(), "<b>Hello</b> world");
    }

    #[test]
    fn test_wrap_rejects_split_tag() {
        let mut host = MemoryHost::with_content("<b>Hello</b>");
        assert!(host.select(1..5));
        assert!(host.wrap_selection("color", "red").is_err());
    }

    #[test]
    fn test_wrap_requires_selection() {
        let mut host = MemoryHost::with_content("text");
        assert!(host.wrap_selection("color", "red").is_err());
        assert!(host.select(2..2));
        assert!(!host.has_selection());
    }

    #[test]
    fn test_select_bounds() {
        let mut host = MemoryHost::with_content("héllo");
        assert!(!host.select(0..10));
        assert!(!host.select(0..2));
        assert!(host.select(0..3));
    }

    #[test]
    fn test_format_toggles() {
        let mut host = MemoryHost::with_content("make this bold");
        host.select_text("bold");
        host.exec_format(FormatKind::Bold).unwrap();
        assert_eq!(host.content(), "make this <b>bold</b>");

        host.exec_format(FormatKind::Bold).unwrap();
        assert_eq!(host.content(), "make this bold");
    }

    #[test]
    fn test_format_without_selection_is_noop() {
        let mut host = MemoryHost::with_content("text");
        host.exec_format(FormatKind::Italic).unwrap();
        assert_eq!(host.content(), "text");
    }

    #[test]
    fn test_failing_commands() {
        let mut host = MemoryHost::with_content("text");
        host.fail_commands(true);
        assert!(matches!(
            host.exec_format(FormatKind::Underline),
            Err(EditorError::HostCommand { .. })
        ));
        assert!(host.exec_justify(Alignment::Center).is_err());
        assert_eq!(host.content(), "text");
    }

    #[test]
    fn test_surface_style_upsert() {
        let mut host = MemoryHost::new();
        host.set_surface_style("color", "#000").unwrap();
        host.set_surface_style("color", "#ff0000").unwrap();
        assert_eq!(host.surface_style("color"), Some("#ff0000"));
        assert_eq!(host.content(), "");
    }

    #[test]
    fn test_justify_changes_markup() {
        let mut host = MemoryHost::with_content("<b>Title</b> text");
        host.select_text("text");
        host.exec_justify(Alignment::Center).unwrap();
        assert_eq!(
            host.content(),
            "<div style=\"text-align: center;\"><b>Title</b> text</div>"
        );
        assert!(!host.has_selection());
        assert_eq!(host.surface_style("text-align"), None);

        // Realigning replaces the block instead of nesting another
        host.exec_justify(Alignment::Full).unwrap();
        assert_eq!(
            host.content(),
            "<div style=\"text-align: justify;\"><b>Title</b> text</div>"
        );
    }

    #[test]
    fn test_justify_keeps_unrelated_blocks() {
        let mut host = MemoryHost::with_content("<div>a</div><div>b</div>");
        host.exec_justify(Alignment::Right).unwrap();
        assert_eq!(
            host.content(),
            "<div style=\"text-align: right;\"><div>a</div><div>b</div></div>"
        );
    }
}
