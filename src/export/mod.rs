//! Export of the surface to a word-processor document

use crate::error::{EditorError, Result};
use crate::state::EditorState;

pub const DEFAULT_FILE_NAME: &str = "document.docx";

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Turns an HTML document into document bytes
pub trait DocumentConverter {
    fn convert(&self, html: &str) -> Result<Vec<u8>>;
}

impl<F> DocumentConverter for F
where
    F: Fn(&str) -> Result<Vec<u8>>,
{
    fn convert(&self, html: &str) -> Result<Vec<u8>> {
        self(html)
    }
}

/// A finished export, ready to be handed to a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Wrap surface markup in a standalone HTML document with the declared body font
pub fn compose_html(content: &str, state: &EditorState) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\nbody {{ font-family: {}; font-size: {}; }}\n</style>\n</head>\n<body>{}</body>\n</html>\n",
        state.font_family, state.font_size, content
    )
}

/// True when the markup has no visible text
pub fn is_blank(content: &str) -> bool {
    let mut in_tag = false;
    let mut text = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ").trim().is_empty()
}

/// Convert `content` into an artifact named `file_name`
pub fn export<C: DocumentConverter + ?Sized>(
    content: &str,
    state: &EditorState,
    file_name: &str,
    converter: &C,
) -> Result<ExportArtifact> {
    if is_blank(content) {
        return Err(EditorError::NothingToSave);
    }
    let html = compose_html(content, state);
    let bytes = converter.convert(&html)?;
    if bytes.is_empty() {
        return Err(EditorError::export("converter produced no output"));
    }
    Ok(ExportArtifact {
        file_name: file_name.to_string(),
        mime_type: DOCX_MIME_TYPE,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(html: &str) -> Result<Vec<u8>> {
        Ok(html.as_bytes().to_vec())
    }

    #[test]
    fn test_compose_html() {
        let state = EditorState {
            font_family: "Georgia".into(),
            font_size: "18px".into(),
            ..EditorState::default()
        };
        let html = compose_html("<p>Hi</p>", &state);
        assert!(html.contains("body { font-family: Georgia; font-size: 18px; }"));
        assert!(html.contains("<body><p>Hi</p></body>"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \n\t"));
        assert!(is_blank("<p><br></p>"));
        assert!(is_blank("<div>&nbsp;</div>"));
        assert!(!is_blank("<p>x</p>"));
        assert!(!is_blank("x"));
    }

    #[test]
    fn test_export_refuses_blank() {
        let err = export(" ", &EditorState::default(), DEFAULT_FILE_NAME, &echo).unwrap_err();
        assert_eq!(err, EditorError::NothingToSave);
    }

    #[test]
    fn test_export_artifact() {
        let artifact = export("Hello", &EditorState::default(), DEFAULT_FILE_NAME, &echo).unwrap();
        assert_eq!(artifact.file_name, "document.docx");
        assert_eq!(artifact.mime_type, DOCX_MIME_TYPE);
        let html = String::from_utf8(artifact.bytes).unwrap();
        assert!(html.contains("font-family: Arial; font-size: 16px;"));
        assert!(html.contains("<body>Hello</body>"));
    }

    #[test]
    fn test_converter_failure() {
        let failing = |_: &str| -> Result<Vec<u8>> { Err(EditorError::export("boom")) };
        let err = export("Hello", &EditorState::default(), DEFAULT_FILE_NAME, &failing).unwrap_err();
        assert_eq!(err, EditorError::export("boom"));

        let empty = |_: &str| -> Result<Vec<u8>> { Ok(Vec::new()) };
        assert!(export("Hello", &EditorState::default(), DEFAULT_FILE_NAME, &empty).is_err());
    }
}
