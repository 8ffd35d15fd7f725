mod layout_to_svg;
mod svg_util;

pub use layout_to_svg::layout_to_svg;
pub use svg_util::{SvgDrawOptions, SvgLayoutTheme, SvgLayoutThemes, change_brightness};
