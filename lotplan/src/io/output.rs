use serde::Serialize;

use lotpack::estimate::{CalculationResult, CapacityDelta};
use lotpack::io::ext_repr::{ExtLayout, ExtLevel};

use crate::config::LotConfig;
use crate::map::MapView;
use crate::session::{LayoutParams, StatusMessage};

/// Everything a planning run produced, written as a single JSON document
#[derive(Serialize, Clone)]
pub struct LotOutput {
    pub estimate: Option<CalculationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutSection>,
    pub map: MapView,
    pub messages: Vec<StatusMessage>,
    pub run_time_ms: u128,
    pub config: LotConfig,
}

#[derive(Serialize, Clone)]
pub struct LayoutSection {
    pub params: LayoutParams,
    pub layout: ExtLayout,
    pub levels: Vec<ExtLevel>,
    pub total_spaces: usize,
    pub delta: CapacityDelta,
}
