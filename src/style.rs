use rgb::RGBA8;
use smol_str::SmolStr;

use crate::math::Angle;

/// The font the rendering collaborator should use for the angle labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontProperties {
    pub family: SmolStr,
    /// The size in points.
    pub size: f32,
}

impl Default for FontProperties {
    fn default() -> Self {
        Self {
            family: SmolStr::new_static("sans-serif"),
            size: 17.0,
        }
    }
}

/// Pass-through drawing configuration.
///
/// No core logic depends on these values; changing any of them only raises
/// `UpdateFlags::REDRAW` for the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtractorStyle {
    /// The color of the needle and the step button glyphs.
    pub tint_color: RGBA8,
    /// The control background.
    pub back_color: RGBA8,
    /// The color of the arc, the tick lines and the angle labels.
    pub arc_color: RGBA8,
    /// The color of the separator line along the top edge.
    pub separator_color: RGBA8,
    /// The font used for the angle labels.
    pub font: FontProperties,
    /// Whether to draw the separator line along the top edge.
    ///
    /// By default this is set to `true`.
    pub should_draw_separator_line: bool,
    /// Whether to draw the label showing the selected value.
    ///
    /// By default this is set to `true`.
    pub should_draw_value_label: bool,
    /// The angle between tick lines along the arc.
    ///
    /// By default this is set to `10` degrees.
    pub lines_step: Angle,
}

impl Default for ProtractorStyle {
    fn default() -> Self {
        Self {
            tint_color: RGBA8::new(0, 122, 255, 255),
            back_color: RGBA8::new(207, 211, 216, 255),
            arc_color: RGBA8::new(169, 177, 186, 255),
            separator_color: RGBA8::new(180, 188, 199, 255),
            font: FontProperties::default(),
            should_draw_separator_line: true,
            should_draw_value_label: true,
            lines_step: Angle::degrees(10.0),
        }
    }
}
