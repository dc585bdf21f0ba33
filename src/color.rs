use palette::Srgb;
use palette::named;
use serde::Serialize;

use crate::data::model::Category;

// ---------------------------------------------------------------------------
// Category palette
// ---------------------------------------------------------------------------

/// Display colour per category, in legend order.
pub const CATEGORY_COLORS: [(Category, Srgb<u8>); 5] = [
    (Category::MainSequence, named::YELLOW),
    (Category::RedGiant, named::RED),
    (Category::SuperGiant, named::MAGENTA),
    (Category::WhiteDwarf, named::WHITE),
    (Category::Other, named::GREY),
];

/// Marker opacity shared by every scatter series.
pub const MARKER_ALPHA: f32 = 0.5;

/// Look up the display colour for a category.
pub fn color_for(category: Category) -> Srgb<u8> {
    CATEGORY_COLORS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, color)| *color)
        .unwrap_or(named::GREY)
}

/// `#rrggbb` form understood by most plotting front-ends.
pub fn hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Figure theme
// ---------------------------------------------------------------------------

/// Figure and axes background.
pub const BACKGROUND: Srgb<u8> = Srgb::new(0x33, 0x33, 0x33);
/// Axes edges, labels, ticks, text and grid lines.
pub const FOREGROUND: Srgb<u8> = Srgb::new(0xfc, 0xfc, 0xfc);

/// Serializable theme handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub background: String,
    pub foreground: String,
    pub marker_alpha: f32,
    /// `(label, #rrggbb)` in legend order.
    pub categories: Vec<(String, String)>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: hex(BACKGROUND),
            foreground: hex(FOREGROUND),
            marker_alpha: MARKER_ALPHA,
            categories: legend_entries(),
        }
    }
}

/// Return the legend entries (label → colour) in legend order.
pub fn legend_entries() -> Vec<(String, String)> {
    CATEGORY_COLORS
        .iter()
        .map(|(category, color)| (category.label().to_string(), hex(*color)))
        .collect()
}
