use thousands::Separable;

use lotpack::estimate::{CalcMethod, CalculationResult};
use lotpack::extrude::StructureType;
use lotpack::units::UnitSystem;

use crate::session::LayoutOutcome;

fn area(value: f64) -> String {
    format!("{value:.1}").separate_with_commas()
}

/// Human readable breakdown of a capacity estimate
pub fn estimate_report(result: &CalculationResult, unit_system: UnitSystem) -> Vec<String> {
    let dims = result.dimensions.dims;
    let l = |meters: f64| {
        format!(
            "{:.1}{}",
            unit_system.from_meters(meters),
            unit_system.length_label()
        )
    };

    let mut lines = vec![
        format!(
            "Total area: {} m² ({} ft²)",
            area(result.area_m2),
            area(UnitSystem::Imperial.area_from_sq_meters(result.area_m2))
        ),
        format!(
            "Estimated parking spaces: {}",
            result.estimated_spaces.separate_with_commas()
        ),
    ];
    if result.structure != StructureType::Surface {
        lines.push(format!(
            "  {} per level x {} level(s), {:?}",
            result.estimated_spaces_per_level.separate_with_commas(),
            result.levels,
            result.structure
        ));
    }
    lines.push(format!("Space size: {} x {}", l(dims.width), l(dims.length)));
    lines.push(format!("Space area: {:.1} m²", dims.stall_area()));
    lines.push(format!("Aisle width: {}", l(dims.aisle)));
    lines.push(match result.method {
        CalcMethod::EfficiencyFactor => {
            format!("Efficiency: {:.0}%", result.dimensions.efficiency * 100.0)
        }
        CalcMethod::IteAreaPerSpace => {
            format!("Area per space: {:.1} m²", result.dimensions.area_per_space)
        }
    });
    lines.push(format!("Density: {:.2} spaces per 100m²", result.density()));
    lines
}

/// Human readable summary of a packed layout
pub fn layout_report(outcome: &LayoutOutcome) -> Vec<String> {
    let ext = &outcome.extrusion;
    let mut lines = vec![
        format!("Strategy: {:?}", outcome.params.strategy()),
        format!(
            "Placed stalls: {} per level x {} level(s) = {}",
            ext.stalls_per_level.separate_with_commas(),
            ext.levels.len(),
            ext.total_spaces.separate_with_commas()
        ),
        format!(
            "Versus estimate: {:+} ({:+.1}%)",
            outcome.delta.delta, outcome.delta.delta_pct
        ),
    ];
    lines.extend(
        outcome
            .layout
            .warnings
            .iter()
            .map(|w| format!("Warning: {w}")),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotpack::entities::{DimensionSet, StallDims};
    use lotpack::estimate::estimate;

    #[test]
    fn report_lists_breakdown() {
        let dims = StallDims {
            width: 2.5,
            length: 5.0,
            aisle: 6.0,
        };
        let result = estimate(
            100_000.0,
            DimensionSet::from_efficiency(dims, 0.85),
            CalcMethod::EfficiencyFactor,
            StructureType::Aboveground,
            2,
        );
        let lines = estimate_report(&result, UnitSystem::Metric);
        assert_eq!(lines[1], "Estimated parking spaces: 13,600");
        assert_eq!(lines[2], "  6,800 per level x 2 level(s), Aboveground");
        assert_eq!(lines[3], "Space size: 2.5m x 5.0m");
        assert!(lines.contains(&"Efficiency: 85%".to_string()));
    }
}
