use serde::{Deserialize, Serialize};

/// Axis along which a band of stalls runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Bands run along x and are stacked bottom-to-top
    Horizontal,
    /// Bands run along y and are stacked left-to-right
    Vertical,
}

/// Direction in which the open (driving) end of a stall points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}
