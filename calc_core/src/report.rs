//! # Calculation Summary
//!
//! Plain-text summary of one building's calculation, in four sections:
//! PROJECT SUMMARY, INPUT PARAMETERS, CALCULATION PROCESS and RESULTS,
//! followed by the jurisdiction notice and the cited code sections.
//!
//! Values are shown in the unit system the calculation was entered in.
//! The calculation steps show widths in inches (the unit the arithmetic is
//! done in); the RESULTS section converts them for display.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::calculations::{CalculationResult, MIN_DOOR_WIDTH_IN};
use crate::code_tables::{CodeReference, DOOR_WIDTH_REF, EGRESS_WIDTH_REF, EXIT_ACCESS_REF, OCCUPANT_LOAD_REF};
use crate::egress_factors::lookup_egress_factors;
use crate::project::Project;
use crate::units::{format_width, group_thousands};

const TEXAS_NOTICE: &str = "Texas Jurisdiction Notice: Texas adopts the IBC statewide, but local \
jurisdictions like Houston, Dallas, and Austin have their own amendments and may use different \
code versions. Always verify with the local authority having jurisdiction.";

const GENERIC_NOTICE: &str = "Code Compliance Notice: This calculation is based on the standard IBC. \
Always verify local and state-specific amendments before finalizing any design.";

/// Notice shown alongside results for the selected jurisdiction.
pub fn jurisdiction_notice(state: &str) -> &'static str {
    if state.trim().eq_ignore_ascii_case("Texas") {
        TEXAS_NOTICE
    } else {
        GENERIC_NOTICE
    }
}

/// Code sections cited for a result. Travel distance and door width are
/// only cited when a door width was computed.
pub fn code_references(result: &CalculationResult) -> Vec<CodeReference> {
    let mut refs = vec![OCCUPANT_LOAD_REF, EGRESS_WIDTH_REF];
    if result.door_width_in.is_some() {
        refs.push(EXIT_ACCESS_REF);
        refs.push(DOOR_WIDTH_REF);
    }
    refs
}

/// File name for a saved summary: `egress_summary_YYYYMMDD_HHMMSS.txt`
pub fn summary_file_name(at: DateTime<Utc>) -> String {
    format!("egress_summary_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

fn format_number(value: f64) -> String {
    group_thousands(&value.to_string())
}

/// Render the summary for the project's current building.
pub fn generate_calculation_summary(project: &Project, result: &CalculationResult, at: DateTime<Utc>) -> String {
    let input = &result.input;
    let units = input.units;
    let area_units = units.area_label();
    let factors = lookup_egress_factors(input.sprinklered);

    let mut out = String::new();

    // writeln! into a String cannot fail
    let _ = writeln!(out, "PROJECT SUMMARY");
    let _ = writeln!(out, "Project: {}", project.display_name());
    let _ = writeln!(
        out,
        "Building: {} of {}",
        project.current_building_ordinal(),
        project.building_count()
    );
    let _ = writeln!(out, "Date: {}", at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Units: {}", units);
    out.push('\n');

    let _ = writeln!(out, "INPUT PARAMETERS");
    let _ = writeln!(out, "- State/Jurisdiction: {}", input.state);
    let _ = writeln!(out, "- IBC Code Version: {}", input.code_version);
    let _ = writeln!(out, "- Occupancy Classification: {}", input.occupancy);
    let _ = writeln!(
        out,
        "- Floor Area: {} {} ({})",
        format_number(input.floor_area),
        area_units,
        result.area_type
    );
    let _ = writeln!(
        out,
        "- Occupant Load Factor: {:.2} {}/occupant",
        result.occupant_load_factor, area_units
    );
    let _ = writeln!(
        out,
        "- Automatic Sprinkler System: {}",
        if input.sprinklered { "Yes" } else { "No" }
    );
    if let Some(distance) = input.travel_distance {
        let _ = writeln!(out, "- Max Travel Distance: {} {}", distance, units.distance_label());
    }
    if let Some(doors) = input.exit_doors {
        let _ = writeln!(out, "- Number of Exit Doors: {}", doors);
    }
    out.push('\n');

    let _ = writeln!(out, "CALCULATION PROCESS");
    let _ = writeln!(
        out,
        "1. Occupant Load = ceil({} / {:.2}) = {} occupants",
        format_number(input.floor_area),
        result.occupant_load_factor,
        result.occupant_load
    );
    let _ = writeln!(
        out,
        "2. Stair Width = {} x {} = {} inches",
        result.occupant_load, factors.stair_in_per_occupant, result.stair_width_in
    );
    let _ = writeln!(
        out,
        "3. Other Components Width = {} x {} = {} inches",
        result.occupant_load, factors.other_in_per_occupant, result.other_width_in
    );
    if let (Some(door), Some(total), Some(doors)) = (result.door_width_in, result.total_exit_width_in, input.exit_doors) {
        let _ = writeln!(
            out,
            "4. Door Width (per door) = max(ceil({} / {}), {}) = {} inches",
            total, doors, MIN_DOOR_WIDTH_IN, door
        );
    }
    out.push('\n');

    let _ = writeln!(out, "RESULTS");
    let _ = writeln!(out, "- Occupant Load: {} occupants", result.occupant_load);
    let _ = writeln!(out, "- Required Stair Width: {}", format_width(result.stair_width_in, units));
    let _ = writeln!(
        out,
        "- Required Other Components Width: {}",
        format_width(result.other_width_in, units)
    );
    if let (Some(door), Some(total)) = (result.door_width_in, result.total_exit_width_in) {
        let _ = writeln!(out, "- Minimum Door Width: {}", format_width(door, units));
        let _ = writeln!(out, "- Total Required Exit Width: {}", format_width(total, units));
    }
    out.push('\n');

    let _ = writeln!(out, "{}", jurisdiction_notice(&input.state));
    out.push('\n');

    let _ = writeln!(out, "CODE REFERENCES");
    for reference in code_references(result) {
        let _ = writeln!(out, "- {}: {}", reference.citation(), reference.link);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate, CalculationInput};
    use crate::code_tables::{CodeVersion, OccupancyClass};
    use crate::units::UnitSystem;

    fn result(advanced: bool, units: UnitSystem) -> CalculationResult {
        calculate(&CalculationInput {
            state: "Texas".to_string(),
            code_version: CodeVersion::Ibc2021,
            occupancy: OccupancyClass::Business,
            floor_area: 10_000.0,
            sprinklered: true,
            travel_distance: Some(200.0),
            exit_doors: if advanced { Some(2) } else { None },
            units,
            advanced,
        })
        .unwrap()
    }

    fn at() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T14:05:09Z").unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_sections_in_order() {
        let project = Project::new("Campus");
        let summary = generate_calculation_summary(&project, &result(false, UnitSystem::Imperial), at());

        let positions: Vec<usize> = ["PROJECT SUMMARY", "INPUT PARAMETERS", "CALCULATION PROCESS", "RESULTS"]
            .iter()
            .map(|h| summary.find(h).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(summary.contains("Project: Campus"));
        assert!(summary.contains("Building: 1 of 1"));
        assert!(summary.contains("Date: 2025-03-01 14:05:09"));
        assert!(summary.contains("Floor Area: 10,000 sq. ft. (Gross)"));
        assert!(summary.contains("Occupant Load Factor: 150.00 sq. ft./occupant"));
        assert!(summary.contains("Max Travel Distance: 200 ft"));
        assert!(summary.contains("1. Occupant Load = ceil(10,000 / 150.00) = 67 occupants"));
        assert!(summary.contains("2. Stair Width = 67 x 0.2 = 14 inches"));
        assert!(summary.contains("Required Other Components Width: 11 inches"));
    }

    #[test]
    fn test_basic_mode_has_no_door_lines() {
        let summary = generate_calculation_summary(&Project::new(""), &result(false, UnitSystem::Imperial), at());
        assert!(summary.contains("Project: Untitled Project"));
        assert!(!summary.contains("Door Width"));
        assert!(!summary.contains(DOOR_WIDTH_REF.section));
    }

    #[test]
    fn test_references_follow_door_width() {
        let basic: Vec<&str> = code_references(&result(false, UnitSystem::Imperial))
            .iter()
            .map(|r| r.section)
            .collect();
        assert_eq!(basic, vec![OCCUPANT_LOAD_REF.section, EGRESS_WIDTH_REF.section]);

        let advanced: Vec<&str> = code_references(&result(true, UnitSystem::Imperial))
            .iter()
            .map(|r| r.section)
            .collect();
        assert_eq!(
            advanced,
            vec![OCCUPANT_LOAD_REF.section, EGRESS_WIDTH_REF.section, EXIT_ACCESS_REF.section, DOOR_WIDTH_REF.section]
        );
    }

    #[test]
    fn test_advanced_mode_door_lines() {
        let summary = generate_calculation_summary(&Project::new("P"), &result(true, UnitSystem::Imperial), at());
        assert!(summary.contains("Number of Exit Doors: 2"));
        assert!(summary.contains("4. Door Width (per door) = max(ceil(11 / 2), 32) = 32 inches"));
        assert!(summary.contains("Minimum Door Width: 32 inches"));
        assert!(summary.contains("Total Required Exit Width: 11 inches"));
        assert!(summary.contains("IBC 1010.1.1"));
    }

    #[test]
    fn test_metric_results() {
        let summary = generate_calculation_summary(&Project::new("P"), &result(true, UnitSystem::Metric), at());
        assert!(summary.contains("Units: Metric"));
        // 10,000 sq. m at 13.94 sq. m each = 718 occupants, 108 in over 2 doors
        assert!(summary.contains("= 718 occupants"));
        assert!(summary.contains("Minimum Door Width: 1,372 mm"));
        assert!(summary.contains("sq. m/occupant"));
    }

    #[test]
    fn test_jurisdiction_notice() {
        assert!(jurisdiction_notice("Texas").starts_with("Texas Jurisdiction Notice"));
        assert!(jurisdiction_notice("Ohio").starts_with("Code Compliance Notice"));
    }

    #[test]
    fn test_summary_file_name() {
        assert_eq!(summary_file_name(at()), "egress_summary_20250301_140509.txt");
    }
}
