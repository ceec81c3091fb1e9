//! Toolbar choices and the state the toolbar renders from

use serde::Serialize;

use crate::state::Alignment;

/// Font families offered in the family dropdown
pub const FONT_FAMILIES: [&str; 30] = [
    "Arial",
    "Arial Black",
    "Book Antiqua",
    "Calibri",
    "Cambria",
    "Candara",
    "Century Gothic",
    "Comic Sans MS",
    "Consolas",
    "Constantia",
    "Corbel",
    "Courier New",
    "Franklin Gothic Medium",
    "Garamond",
    "Georgia",
    "Helvetica",
    "Impact",
    "Lucida Console",
    "Lucida Sans Unicode",
    "Monaco",
    "Palatino Linotype",
    "Segoe UI",
    "Tahoma",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
];

/// Pixel sizes offered in the size dropdown
pub const FONT_SIZES: [u32; 15] = [4, 8, 10, 12, 14, 16, 18, 20, 24, 32, 36, 42, 48, 56, 60];

/// Everything the toolbar needs to render its controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarState {
    pub font_family: String,
    pub font_size: String,
    pub text_color: String,
    pub background_color: String,
    pub alignment: Alignment,
    /// Undo button enabled
    pub can_undo: bool,
    /// Redo button enabled
    pub can_redo: bool,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_sizes_ascending() {
        assert!(FONT_SIZES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(FONT_SIZES[0], 4);
        assert_eq!(FONT_SIZES[FONT_SIZES.len() - 1], 60);
    }

    #[test]
    fn test_font_families_unique() {
        let mut names = FONT_FAMILIES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FONT_FAMILIES.len());
    }

    #[test]
    fn test_toolbar_state_json() {
        let state = ToolbarState {
            font_family: "Arial".into(),
            font_size: "16px".into(),
            text_color: "#000000".into(),
            background_color: "#ffffff".into(),
            alignment: Alignment::Full,
            can_undo: false,
            can_redo: true,
            status: None,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["canUndo"], false);
        assert_eq!(json["canRedo"], true);
        assert_eq!(json["alignment"], "full");
        assert!(json["status"].is_null());
    }
}
