use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    #[serde(default)]
    pub theme: SvgLayoutThemes,
    /// Draws the corner exclusion zones, even if the layout does not show them as islands
    #[serde(default)]
    pub exclusion_zones: bool,
    /// Adds a label with the stall count and density
    #[serde(default = "default_true")]
    pub label: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutThemes::default(),
            exclusion_zones: false,
            label: true,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum SvgLayoutThemes {
    #[default]
    Asphalt,
    Gray,
}

impl SvgLayoutThemes {
    pub fn get_theme(&self) -> SvgLayoutTheme {
        match self {
            SvgLayoutThemes::Asphalt => ASPHALT_THEME,
            SvgLayoutThemes::Gray => GRAY_THEME,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub lot_fill: &'static str,
    /// Stalls opening up or right
    pub stall_fill: &'static str,
    /// Stalls opening down or left
    pub stall_fill_alt: &'static str,
    pub island_fill: &'static str,
    pub label_color: &'static str,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        ASPHALT_THEME
    }
}

pub static ASPHALT_THEME: SvgLayoutTheme = SvgLayoutTheme {
    stroke_width_multiplier: 2.0,
    lot_fill: "#4A4A4A",
    stall_fill: "#F2D16B",
    stall_fill_alt: "#E0B84A",
    island_fill: "#6FAF5B",
    label_color: "#FFFFFF",
};

pub static GRAY_THEME: SvgLayoutTheme = SvgLayoutTheme {
    stroke_width_multiplier: 2.5,
    lot_fill: "#C3C3C3",
    stall_fill: "#8F8F8F",
    stall_fill_alt: "#7A7A7A",
    island_fill: "#E6E6E6",
    label_color: "#000000",
};

/// Scales the channels of a `#RRGGBB` color by `fraction`.
/// Colors that cannot be parsed are returned unchanged.
pub fn change_brightness(color: &str, fraction: f64) -> String {
    let hex = color.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .map(|c| (c as f64 * fraction).clamp(0.0, 255.0) as u8)
    };
    match (hex.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        _ => color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness() {
        assert_eq!(change_brightness("#FF8000", 0.5), "#7F4000");
        assert_eq!(change_brightness("black", 0.5), "black");
    }
}
