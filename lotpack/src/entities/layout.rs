use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::entities::Stall;
use crate::geometry::primitives::Rect;

/// Non-fatal condition raised while packing a layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// The lot boundary has fewer than 3 distinct vertices, nothing was packed
    DegenerateBoundary,
    /// The center zone is too shallow for the requested number of double-loaded rows,
    /// only the perimeter was packed
    InsufficientCenterSpace {
        rows: usize,
        available: f64,
        required: f64,
    },
}

impl Display for LayoutWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutWarning::DegenerateBoundary => {
                write!(f, "lot boundary is degenerate, no stalls placed")
            }
            LayoutWarning::InsufficientCenterSpace {
                rows,
                available,
                required,
            } => write!(
                f,
                "center zone is {available:.1}m deep but {rows} row(s) need {required:.1}m, center rows skipped"
            ),
        }
    }
}

/// Result of a packing run, in the local metric frame of the lot.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    /// Accepted stalls, in scan order
    pub stalls: Vec<Stall>,
    /// Corner exclusion zones (perimeter + center strategy only)
    pub islands: Vec<Rect>,
    /// Whether the corner zones should be drawn as landscaped islands
    pub show_islands: bool,
    pub warnings: Vec<LayoutWarning>,
}

impl Layout {
    pub fn n_stalls(&self) -> usize {
        self.stalls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stalls.is_empty()
    }
}
