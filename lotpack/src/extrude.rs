use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::entities::Stall;
use crate::geometry::primitives::{Point, Rect};

/// Light to dark blues, one per level above ground
pub const ABOVEGROUND_PALETTE: [&str; 8] = [
    "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c", "#08306b", "#062454", "#041a3d",
];

/// Warm ochres to browns, one per level below ground
pub const UNDERGROUND_PALETTE: [&str; 8] = [
    "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f", "#b30000", "#7f0000", "#4d0000",
];

pub const DEFAULT_FLOOR_HEIGHT: f64 = 3.0;

/// Horizontal spread of the levels in exploded view, relative to the extent of the layout
const EXPLODE_FACTOR: f64 = 0.3;
const FOCUSED_OPACITY: f64 = 1.0;
const UNFOCUSED_OPACITY: f64 = 0.2;
const DEFAULT_OPACITY: f64 = 0.8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    #[default]
    Surface,
    Aboveground,
    Underground,
}

impl StructureType {
    /// Surface lots always have a single level, structures at least one.
    pub fn effective_levels(&self, levels: usize) -> usize {
        match self {
            StructureType::Surface => 1,
            _ => levels.max(1),
        }
    }

    /// Elevation of the floor of level `i` (in meters, negative below ground)
    pub fn elevation(&self, i: usize, floor_height: f64) -> f64 {
        match self {
            StructureType::Surface => 0.0,
            StructureType::Aboveground => i as f64 * floor_height,
            StructureType::Underground => -floor_height * (i + 1) as f64,
        }
    }

    /// Fill color of level `i`, levels beyond the palette share its last color
    pub fn color(&self, i: usize) -> &'static str {
        let palette = match self {
            StructureType::Underground => &UNDERGROUND_PALETTE,
            _ => &ABOVEGROUND_PALETTE,
        };
        palette[i.min(palette.len() - 1)]
    }
}

/// How the levels are presented, never affects the counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "level", rename_all = "snake_case")]
pub enum DisplayMode {
    /// All levels drawn on top of each other
    #[default]
    Stacked,
    /// Levels shifted sideways so each one is visible
    Exploded,
    /// Only the given level is highlighted
    Focus(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub structure: StructureType,
    pub levels: usize,
    /// Height of a single level (in meters)
    pub floor_height: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            structure: StructureType::Surface,
            levels: 1,
            floor_height: DEFAULT_FLOOR_HEIGHT,
        }
    }
}

/// One replicated level of the structure
#[derive(Clone, Debug, PartialEq)]
pub struct LevelLayer {
    pub index: usize,
    pub elevation: f64,
    pub color: &'static str,
    pub opacity: f64,
    /// Stall outlines as closed rings, shifted for display if requested
    pub rings: Vec<[Point; 5]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Extrusion {
    pub structure: StructureType,
    pub levels: Vec<LevelLayer>,
    pub stalls_per_level: usize,
    pub total_spaces: usize,
}

/// Replicates the stalls of a single level vertically.
/// Works in whatever planar frame the stalls are given (local meters or degrees).
pub fn extrude(stalls: &[Stall], config: &LevelConfig, display: DisplayMode) -> Extrusion {
    let n_levels = config.structure.effective_levels(config.levels);
    //diagonal of the bounding box of all stalls
    let range = Rect::enclosing(stalls.iter().flat_map(|s| s.corners))
        .map_or(0.0, |bb| bb.width().hypot(bb.height()));

    let levels = (0..n_levels)
        .map(|i| {
            let offset = match display {
                DisplayMode::Exploded => (i as f64 - n_levels as f64 / 2.0) * range * EXPLODE_FACTOR,
                _ => 0.0,
            };
            let opacity = match display {
                DisplayMode::Focus(f) if f == i => FOCUSED_OPACITY,
                DisplayMode::Focus(_) => UNFOCUSED_OPACITY,
                _ => DEFAULT_OPACITY,
            };
            let rings = stalls
                .iter()
                .map(|s| s.ring().map(|p| p.translate(offset, offset)))
                .collect();
            LevelLayer {
                index: i,
                elevation: config.structure.elevation(i, config.floor_height),
                color: config.structure.color(i),
                opacity,
                rings,
            }
        })
        .collect::<Vec<_>>();

    if let DisplayMode::Focus(f) = display {
        if f >= n_levels {
            debug!("[EXTRUDE] focus level {f} does not exist, all levels dimmed");
        }
    }

    let stalls_per_level = stalls.len();
    let total_spaces = stalls_per_level * n_levels;
    info!(
        "[EXTRUDE] {:?}: {} level(s) x {} stalls = {} spaces",
        config.structure, n_levels, stalls_per_level, total_spaces
    );

    Extrusion {
        structure: config.structure,
        levels,
        stalls_per_level,
        total_spaces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_enums::Facing;
    use float_cmp::approx_eq;
    use test_case::test_case;

    fn two_stalls() -> Vec<Stall> {
        vec![
            Stall::from_rect(Rect::try_new(0.0, 0.0, 2.5, 5.0).unwrap(), Facing::Up),
            Stall::from_rect(Rect::try_new(2.5, 0.0, 5.0, 5.0).unwrap(), Facing::Up),
        ]
    }

    #[test_case(StructureType::Aboveground, 4, &[0.0, 3.0, 6.0, 9.0]; "aboveground")]
    #[test_case(StructureType::Underground, 3, &[-3.0, -6.0, -9.0]; "underground")]
    #[test_case(StructureType::Surface, 5, &[0.0]; "surface ignores levels")]
    fn level_elevations(structure: StructureType, levels: usize, expected: &[f64]) {
        let config = LevelConfig {
            structure,
            levels,
            floor_height: 3.0,
        };
        let ext = extrude(&two_stalls(), &config, DisplayMode::Stacked);
        let elevations = ext.levels.iter().map(|l| l.elevation).collect::<Vec<_>>();
        assert_eq!(elevations, expected);
        assert_eq!(ext.total_spaces, 2 * expected.len());
    }

    #[test]
    fn palette_clamps() {
        assert_eq!(StructureType::Aboveground.color(0), ABOVEGROUND_PALETTE[0]);
        assert_eq!(StructureType::Aboveground.color(12), ABOVEGROUND_PALETTE[7]);
        assert_eq!(StructureType::Underground.color(9), UNDERGROUND_PALETTE[7]);
    }

    #[test]
    fn display_modes_keep_counts() {
        let config = LevelConfig {
            structure: StructureType::Aboveground,
            levels: 2,
            floor_height: 3.0,
        };
        let stacked = extrude(&two_stalls(), &config, DisplayMode::Stacked);
        let exploded = extrude(&two_stalls(), &config, DisplayMode::Exploded);
        let focus = extrude(&two_stalls(), &config, DisplayMode::Focus(1));
        assert_eq!(stacked.total_spaces, exploded.total_spaces);
        assert_eq!(stacked.total_spaces, focus.total_spaces);

        //range is the 5 x 5 diagonal, level 0 shifts by -1 * 5√2 * 0.3
        let shift = -5.0 * 2f64.sqrt() * 0.3;
        let Point(x, y) = exploded.levels[0].rings[0][0];
        assert!(approx_eq!(f64, x, shift, epsilon = 1e-9));
        assert!(approx_eq!(f64, y, shift, epsilon = 1e-9));
        assert_eq!(exploded.levels[1].rings[0][0], Point(0.0, 0.0));

        let opacities = focus.levels.iter().map(|l| l.opacity).collect::<Vec<_>>();
        assert_eq!(opacities, vec![0.2, 1.0]);
        assert!(stacked.levels.iter().all(|l| l.opacity == 0.8));
    }
}
