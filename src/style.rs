//! Paint rules for the boundary overlay, derived from the current selection.

use crate::boundaries::CODE_PROPERTY;
use crate::models::CountryCode;
use serde_json::{Map, Value};

pub const FILL_LAYER_ID: &str = "countries";
pub const BORDER_LAYER_ID: &str = "countries-border";

pub const HIGHLIGHT_COLOR: &str = "red";
pub const DEFAULT_FILL_COLOR: &str = "transparent";
pub const FILL_OPACITY: f64 = 0.5;
pub const BORDER_COLOR: &str = "blue";
pub const BORDER_WIDTH: f64 = 1.25;

#[derive(Clone, Debug, PartialEq)]
pub struct FillLayerStyle {
    selected: Option<CountryCode>,
}

impl FillLayerStyle {
    pub fn for_selection(selected: Option<&CountryCode>) -> Self {
        Self {
            selected: selected.cloned(),
        }
    }

    pub fn id(&self) -> &'static str {
        FILL_LAYER_ID
    }

    pub fn opacity(&self) -> f64 {
        FILL_OPACITY
    }

    fn fill_for(&self, code: Option<&CountryCode>) -> &'static str {
        match (code, &self.selected) {
            (Some(code), Some(selected)) if code == selected => HIGHLIGHT_COLOR,
            _ => DEFAULT_FILL_COLOR,
        }
    }

    /// Fill colour for a feature, read from its raw properties.
    pub fn evaluate(&self, properties: &Map<String, Value>) -> &'static str {
        let code = properties
            .get(CODE_PROPERTY)
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<CountryCode>().ok());
        self.fill_for(code.as_ref())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderLayerStyle;

impl BorderLayerStyle {
    pub fn id(&self) -> &'static str {
        BORDER_LAYER_ID
    }

    pub fn color(&self) -> &'static str {
        BORDER_COLOR
    }

    pub fn width(&self) -> f64 {
        BORDER_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CountryCode {
        s.parse().unwrap()
    }

    fn props(iso2: &str) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert(CODE_PROPERTY.to_string(), Value::String(iso2.to_string()));
        m
    }

    #[test]
    fn test_fill_highlights_only_selected() {
        let fr = code("FR");
        let style = FillLayerStyle::for_selection(Some(&fr));
        assert_eq!(style.fill_for(Some(&fr)), HIGHLIGHT_COLOR);
        assert_eq!(style.fill_for(Some(&code("DE"))), DEFAULT_FILL_COLOR);
        assert_eq!(style.fill_for(None), DEFAULT_FILL_COLOR);
        assert_eq!(style.evaluate(&props("FR")), HIGHLIGHT_COLOR);
        assert_eq!(style.evaluate(&props("-99")), DEFAULT_FILL_COLOR);
        assert_eq!(style.opacity(), 0.5);
    }

    #[test]
    fn test_no_selection_is_all_transparent() {
        let style = FillLayerStyle::for_selection(None);
        for iso in ["FR", "DE", "US"] {
            assert_eq!(style.evaluate(&props(iso)), DEFAULT_FILL_COLOR);
        }
        let mut unlabelled = Map::new();
        unlabelled.insert("NAME".to_string(), Value::String("Somaliland".to_string()));
        assert_eq!(style.evaluate(&unlabelled), DEFAULT_FILL_COLOR);
    }

    #[test]
    fn test_border_is_selection_independent() {
        let border = BorderLayerStyle;
        assert_eq!(border.id(), "countries-border");
        assert_eq!(border.color(), "blue");
        assert_eq!(border.width(), 1.25);
    }
}
