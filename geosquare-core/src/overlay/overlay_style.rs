use serde::{Deserialize, Serialize};

/// presentation settings for the drawn overlay.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OverlayStyle {
    pub rectangle: RectangleStyle,
    /// text color of the cell label
    pub label_color: String,
    /// hover title of the position marker
    pub position_title: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RectangleStyle {
    pub stroke_color: String,
    pub stroke_opacity: f32,
    pub stroke_weight: u32,
    pub fill_color: String,
    pub fill_opacity: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            rectangle: RectangleStyle::default(),
            label_color: String::from("#FF0000"),
            position_title: String::from("Your Location"),
        }
    }
}

impl Default for RectangleStyle {
    fn default() -> Self {
        Self {
            stroke_color: String::from("#FF0000"),
            stroke_opacity: 0.1,
            stroke_weight: 1,
            fill_color: String::from("#FF0000"),
            fill_opacity: 0.2,
        }
    }
}
