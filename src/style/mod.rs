//! Property-to-attribute mapping and the selection/surface decision

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Where a style change lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    /// Wrap the active selection in a styled span
    Selection,
    /// Set the attribute on the surface element itself
    Surface,
}

/// Decide where a style change applies
pub fn style_target(has_selection: bool) -> StyleTarget {
    if has_selection {
        StyleTarget::Selection
    } else {
        StyleTarget::Surface
    }
}

/// Maps toolbar property names to rendering attributes.
///
/// Deserialized entries are layered over [`StyleMap::standard`], so a
/// configuration only lists the properties it remaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyleMap {
    attributes: FxHashMap<String, String>,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let overrides = FxHashMap::<String, String>::deserialize(deserializer)?;
        let mut map = Self::standard();
        map.attributes.extend(overrides);
        Ok(map)
    }
}

impl StyleMap {
    /// An empty map; every property passes through unchanged
    pub fn empty() -> Self {
        Self {
            attributes: FxHashMap::default(),
        }
    }

    /// The CSS table used by the toolbar controls
    pub fn standard() -> Self {
        Self::empty()
            .with("fontFamily", "font-family")
            .with("fontSize", "font-size")
            .with("textColor", "color")
            .with("backgroundColor", "background-color")
            .with("alignment", "text-align")
    }

    pub fn with(mut self, property: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.attributes.insert(property.into(), attribute.into());
        self
    }

    /// Resolve a property; unknown properties map to themselves
    pub fn attribute<'a>(&'a self, property: &'a str) -> &'a str {
        self.attributes
            .get(property)
            .map(String::as_str)
            .unwrap_or(property)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_target() {
        assert_eq!(style_target(true), StyleTarget::Selection);
        assert_eq!(style_target(false), StyleTarget::Surface);
    }

    #[test]
    fn test_standard_table() {
        let map = StyleMap::standard();
        assert_eq!(map.len(), 5);
        assert_eq!(map.attribute("fontFamily"), "font-family");
        assert_eq!(map.attribute("fontSize"), "font-size");
        assert_eq!(map.attribute("textColor"), "color");
        assert_eq!(map.attribute("backgroundColor"), "background-color");
        assert_eq!(map.attribute("alignment"), "text-align");
    }

    #[test]
    fn test_unknown_passes_through() {
        let map = StyleMap::standard();
        assert_eq!(map.attribute("letter-spacing"), "letter-spacing");
        assert_eq!(StyleMap::empty().attribute("fontSize"), "fontSize");
    }

    #[test]
    fn test_deserialize_overrides_standard_table() {
        let map: StyleMap =
            serde_json::from_str(r#"{"textColor":"-webkit-text-fill-color","letterSpacing":"letter-spacing"}"#)
                .unwrap();
        assert_eq!(map.attribute("textColor"), "-webkit-text-fill-color");
        assert_eq!(map.attribute("letterSpacing"), "letter-spacing");
        assert_eq!(map.attribute("fontSize"), "font-size");
        assert_eq!(map.attribute("alignment"), "text-align");
        assert_eq!(map.len(), 6);
    }
}
