//! Declared editor style and the small vocabulary types around it

use serde::{Deserialize, Serialize};

/// Paragraph alignment, as offered by the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    /// Justified text
    #[serde(alias = "justify")]
    Full,
}

impl Alignment {
    /// Parse a toolbar direction; accepts both `full` and `justify`
    pub fn parse(direction: &str) -> Option<Self> {
        match direction.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            "full" | "justify" => Some(Alignment::Full),
            _ => None,
        }
    }

    /// CSS `text-align` value
    pub fn css_value(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Full => "justify",
        }
    }

    /// Name of the host's built-in justify command
    pub fn command(&self) -> &'static str {
        match self {
            Alignment::Left => "justifyLeft",
            Alignment::Center => "justifyCenter",
            Alignment::Right => "justifyRight",
            Alignment::Full => "justifyFull",
        }
    }

    pub fn notice(&self) -> &'static str {
        match self {
            Alignment::Left => "Aligned left",
            Alignment::Center => "Aligned center",
            Alignment::Right => "Aligned right",
            Alignment::Full => "Justified",
        }
    }
}

/// Inline toggle formats delegated to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Bold,
    Italic,
    Underline,
}

impl FormatKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "bold" => Some(FormatKind::Bold),
            "italic" => Some(FormatKind::Italic),
            "underline" => Some(FormatKind::Underline),
            _ => None,
        }
    }

    /// Name of the host's built-in toggle command
    pub fn command(&self) -> &'static str {
        match self {
            FormatKind::Bold => "bold",
            FormatKind::Italic => "italic",
            FormatKind::Underline => "underline",
        }
    }

    /// Human-readable label used in notices
    pub fn label(&self) -> &'static str {
        match self {
            FormatKind::Bold => "Bold",
            FormatKind::Italic => "Italic",
            FormatKind::Underline => "Underline",
        }
    }

    /// Element name the format renders as
    pub fn tag(&self) -> &'static str {
        match self {
            FormatKind::Bold => "b",
            FormatKind::Italic => "i",
            FormatKind::Underline => "u",
        }
    }
}

/// A style property named by a toolbar control
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    FontFamily,
    FontSize,
    TextColor,
    BackgroundColor,
    Alignment,
    /// Anything else; applied to the surface under its own name
    Other(String),
}

impl StyleProperty {
    pub fn parse(name: &str) -> Self {
        match name {
            "fontFamily" => StyleProperty::FontFamily,
            "fontSize" => StyleProperty::FontSize,
            "textColor" => StyleProperty::TextColor,
            "backgroundColor" => StyleProperty::BackgroundColor,
            "alignment" => StyleProperty::Alignment,
            other => StyleProperty::Other(other.to_string()),
        }
    }
}

/// The currently declared style.
///
/// This is what the toolbar shows and what export uses for the body font. It
/// is not necessarily what every span on the surface renders with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorState {
    pub font_family: String,
    pub font_size: String,
    pub text_color: String,
    pub background_color: String,
    pub alignment: Alignment,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: "16px".to_string(),
            text_color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
            alignment: Alignment::Left,
        }
    }
}

impl EditorState {
    /// Store `value` under `property`.
    ///
    /// Returns false when the state has no field for the property, or when an
    /// alignment value does not parse.
    pub fn set(&mut self, property: &StyleProperty, value: &str) -> bool {
        match property {
            StyleProperty::FontFamily => self.font_family = value.to_string(),
            StyleProperty::FontSize => self.font_size = value.to_string(),
            StyleProperty::TextColor => self.text_color = value.to_string(),
            StyleProperty::BackgroundColor => self.background_color = value.to_string(),
            StyleProperty::Alignment => match Alignment::parse(value) {
                Some(alignment) => self.alignment = alignment,
                None => return false,
            },
            StyleProperty::Other(_) => return false,
        }
        true
    }
}
