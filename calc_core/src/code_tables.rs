//! # IBC Code Tables
//!
//! Occupant load factors (IBC Table 1004.5) keyed by code edition and
//! occupancy classification, plus the code section references and
//! jurisdiction list the calculator reports against.
//!
//! Factors are stored in square feet per occupant only. Metric callers go
//! through [`CodeTable::load_factor_for_units`], which converts on every
//! lookup; a metric factor is never stored.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::code_tables::{lookup_load_factor, AreaType, CodeVersion, OccupancyClass};
//!
//! let (factor, area_type) = lookup_load_factor(CodeVersion::Ibc2021, OccupancyClass::Business).unwrap();
//! assert_eq!(factor, 150.0);
//! assert_eq!(area_type, AreaType::Gross);
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{convert, Direction, QuantityKind, UnitSystem};

// ============================================================================
// Code Versions
// ============================================================================

/// International Building Code edition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CodeVersion {
    #[serde(rename = "2021")]
    Ibc2021,
    #[serde(rename = "2018")]
    Ibc2018,
    #[serde(rename = "2015")]
    Ibc2015,
    #[serde(rename = "2012")]
    Ibc2012,
}

impl CodeVersion {
    /// All editions, newest first (UI selection order)
    pub const ALL: [CodeVersion; 4] = [
        CodeVersion::Ibc2021,
        CodeVersion::Ibc2018,
        CodeVersion::Ibc2015,
        CodeVersion::Ibc2012,
    ];

    /// Edition year
    pub fn year(&self) -> u16 {
        match self {
            CodeVersion::Ibc2021 => 2021,
            CodeVersion::Ibc2018 => 2018,
            CodeVersion::Ibc2015 => 2015,
            CodeVersion::Ibc2012 => 2012,
        }
    }

    /// Parse from common string representations ("2021", "IBC2021", "ibc 2021")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let cleaned = s.to_uppercase().replace([' ', '-', '_'], "");
        match cleaned.trim_start_matches("IBC") {
            "2021" | "21" => Ok(CodeVersion::Ibc2021),
            "2018" | "18" => Ok(CodeVersion::Ibc2018),
            "2015" | "15" => Ok(CodeVersion::Ibc2015),
            "2012" | "12" => Ok(CodeVersion::Ibc2012),
            _ => Err(CalcError::invalid_input(
                "code_version",
                s,
                "Supported IBC editions are 2021, 2018, 2015 and 2012",
            )),
        }
    }
}

impl fmt::Display for CodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year())
    }
}

// ============================================================================
// Occupancy Classes
// ============================================================================

/// Occupancy classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OccupancyClass {
    #[serde(rename = "Assembly (Less Concentrated)")]
    AssemblyLessConcentrated,
    #[serde(rename = "Assembly (Standing Space)")]
    AssemblyStandingSpace,
    Business,
    Educational,
    Mercantile,
    Residential,
}

impl OccupancyClass {
    /// All occupancy classes for UI selection
    pub const ALL: [OccupancyClass; 6] = [
        OccupancyClass::AssemblyLessConcentrated,
        OccupancyClass::AssemblyStandingSpace,
        OccupancyClass::Business,
        OccupancyClass::Educational,
        OccupancyClass::Mercantile,
        OccupancyClass::Residential,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            OccupancyClass::AssemblyLessConcentrated => "Assembly (Less Concentrated)",
            OccupancyClass::AssemblyStandingSpace => "Assembly (Standing Space)",
            OccupancyClass::Business => "Business",
            OccupancyClass::Educational => "Educational",
            OccupancyClass::Mercantile => "Mercantile",
            OccupancyClass::Residential => "Residential",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let cleaned: String = s
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match cleaned.as_str() {
            "ASSEMBLYLESSCONCENTRATED" | "ASSEMBLY" | "A" | "ALESS" => {
                Ok(OccupancyClass::AssemblyLessConcentrated)
            }
            "ASSEMBLYSTANDINGSPACE" | "STANDING" | "ASTANDING" => Ok(OccupancyClass::AssemblyStandingSpace),
            "BUSINESS" | "B" => Ok(OccupancyClass::Business),
            "EDUCATIONAL" | "E" => Ok(OccupancyClass::Educational),
            "MERCANTILE" | "M" => Ok(OccupancyClass::Mercantile),
            "RESIDENTIAL" | "R" => Ok(OccupancyClass::Residential),
            _ => Err(CalcError::invalid_input(
                "occupancy",
                s,
                "Unknown occupancy classification",
            )),
        }
    }
}

impl fmt::Display for OccupancyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Area Type
// ============================================================================

/// Which floor area a load factor applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaType {
    Gross,
    Net,
}

impl AreaType {
    /// Help text shown next to the floor area input
    pub fn description(&self) -> &'static str {
        match self {
            AreaType::Gross => "Gross area includes the entire floor area within the exterior walls.",
            AreaType::Net => {
                "Net area excludes non-occupiable spaces like mechanical rooms, stairs, and walls."
            }
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaType::Gross => write!(f, "Gross"),
            AreaType::Net => write!(f, "Net"),
        }
    }
}

// ============================================================================
// Factor Table
// ============================================================================

/// One row of the occupant load factor table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CodeFactorEntry {
    pub code_version: CodeVersion,
    pub occupancy: OccupancyClass,
    /// Floor area per occupant (sq. ft.)
    pub load_factor_sqft: f64,
    pub area_type: AreaType,
}

const fn entry(
    code_version: CodeVersion,
    occupancy: OccupancyClass,
    load_factor_sqft: f64,
    area_type: AreaType,
) -> CodeFactorEntry {
    CodeFactorEntry {
        code_version,
        occupancy,
        load_factor_sqft,
        area_type,
    }
}

macro_rules! edition_rows {
    ($version:expr, business = $business:expr) => {
        [
            entry($version, OccupancyClass::AssemblyLessConcentrated, 15.0, AreaType::Net),
            entry($version, OccupancyClass::AssemblyStandingSpace, 5.0, AreaType::Net),
            entry($version, OccupancyClass::Business, $business, AreaType::Gross),
            entry($version, OccupancyClass::Educational, 20.0, AreaType::Net),
            entry($version, OccupancyClass::Mercantile, 60.0, AreaType::Gross),
            entry($version, OccupancyClass::Residential, 200.0, AreaType::Gross),
        ]
    };
}

/// IBC 2018 raised the business factor from 100 to 150 gross.
const IBC_2021: [CodeFactorEntry; 6] = edition_rows!(CodeVersion::Ibc2021, business = 150.0);
const IBC_2018: [CodeFactorEntry; 6] = edition_rows!(CodeVersion::Ibc2018, business = 150.0);
const IBC_2015: [CodeFactorEntry; 6] = edition_rows!(CodeVersion::Ibc2015, business = 100.0);
const IBC_2012: [CodeFactorEntry; 6] = edition_rows!(CodeVersion::Ibc2012, business = 100.0);

static STANDARD_TABLE: Lazy<CodeTable> = Lazy::new(|| {
    CodeTable::from_entries(
        IBC_2021
            .iter()
            .chain(IBC_2018.iter())
            .chain(IBC_2015.iter())
            .chain(IBC_2012.iter())
            .copied(),
    )
});

/// Occupant load factor table.
///
/// Every (edition, occupancy) pair resolves to exactly one entry or is
/// absent; absence means the combination is unsupported.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    entries: HashMap<(CodeVersion, OccupancyClass), CodeFactorEntry>,
}

impl CodeTable {
    /// The built-in IBC table
    pub fn standard() -> &'static CodeTable {
        &STANDARD_TABLE
    }

    /// Build a table from rows. A later row for the same pair replaces an
    /// earlier one.
    pub fn from_entries(rows: impl IntoIterator<Item = CodeFactorEntry>) -> Self {
        let entries = rows
            .into_iter()
            .map(|row| ((row.code_version, row.occupancy), row))
            .collect();
        CodeTable { entries }
    }

    /// Look up a row
    pub fn entry(&self, version: CodeVersion, occupancy: OccupancyClass) -> Option<&CodeFactorEntry> {
        self.entries.get(&(version, occupancy))
    }

    /// Factor (sq. ft. per occupant) and area type for a combination.
    pub fn lookup(&self, version: CodeVersion, occupancy: OccupancyClass) -> CalcResult<(f64, AreaType)> {
        self.entry(version, occupancy)
            .map(|row| (row.load_factor_sqft, row.area_type))
            .ok_or_else(|| CalcError::unsupported_combination(version.to_string(), occupancy.display_name()))
    }

    /// Factor expressed per occupant in the active unit system.
    pub fn load_factor_for_units(
        &self,
        version: CodeVersion,
        occupancy: OccupancyClass,
        units: UnitSystem,
    ) -> CalcResult<(f64, AreaType)> {
        let (factor, area_type) = self.lookup(version, occupancy)?;
        let factor = match units {
            UnitSystem::Imperial => factor,
            UnitSystem::Metric => convert(factor, QuantityKind::Area, Direction::ToMetric),
        };
        Ok((factor, area_type))
    }

    /// Whether the pair is present
    pub fn contains(&self, version: CodeVersion, occupancy: OccupancyClass) -> bool {
        self.entries.contains_key(&(version, occupancy))
    }

    /// Rows sorted newest edition first, then by occupancy
    pub fn rows(&self) -> Vec<CodeFactorEntry> {
        let mut rows: Vec<_> = self.entries.values().copied().collect();
        rows.sort_by_key(|row| (row.code_version, row.occupancy));
        rows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Look up a factor in the built-in table.
pub fn lookup_load_factor(version: CodeVersion, occupancy: OccupancyClass) -> CalcResult<(f64, AreaType)> {
    CodeTable::standard().lookup(version, occupancy)
}

// ============================================================================
// Code References
// ============================================================================

/// A cited IBC section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeReference {
    pub section: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

impl CodeReference {
    /// "IBC 1004 - Occupant Load"
    pub fn citation(&self) -> String {
        format!("{} - {}", self.section, self.description)
    }
}

pub const OCCUPANT_LOAD_REF: CodeReference = CodeReference {
    section: "IBC 1004",
    description: "Occupant Load",
    link: "https://codes.iccsafe.org/content/IBC2021P1/chapter-10-means-of-egress#IBC2021P1_Ch10_Sec1004",
};

pub const EGRESS_WIDTH_REF: CodeReference = CodeReference {
    section: "IBC 1005",
    description: "Egress Width",
    link: "https://codes.iccsafe.org/content/IBC2021P1/chapter-10-means-of-egress#IBC2021P1_Ch10_Sec1005",
};

pub const EXIT_ACCESS_REF: CodeReference = CodeReference {
    section: "IBC 1017",
    description: "Exit Access Travel Distance",
    link: "https://codes.iccsafe.org/content/IBC2021P1/chapter-10-means-of-egress#IBC2021P1_Ch10_Sec1017",
};

pub const DOOR_WIDTH_REF: CodeReference = CodeReference {
    section: "IBC 1010.1.1",
    description: "Door Width",
    link: "https://codes.iccsafe.org/content/IBC2021P1/chapter-10-means-of-egress#IBC2021P1_Ch10_Sec1010.1.1",
};

// ============================================================================
// Jurisdictions
// ============================================================================

/// Selectable jurisdictions. Texas leads the list.
pub const US_STATES: [&str; 50] = [
    "Texas", "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado",
    "Connecticut", "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois",
    "Indiana", "Iowa", "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland",
    "Massachusetts", "Michigan", "Minnesota", "Mississippi", "Missouri", "Montana",
    "Nebraska", "Nevada", "New Hampshire", "New Jersey", "New Mexico", "New York",
    "North Carolina", "North Dakota", "Ohio", "Oklahoma", "Oregon", "Pennsylvania",
    "Rhode Island", "South Carolina", "South Dakota", "Tennessee", "Utah", "Vermont",
    "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
];

/// Case-insensitive match against [`US_STATES`], returning the canonical name.
pub fn canonical_jurisdiction(name: &str) -> Option<&'static str> {
    let name = name.trim();
    US_STATES.iter().copied().find(|s| s.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_factor_by_edition() {
        assert_eq!(lookup_load_factor(CodeVersion::Ibc2021, OccupancyClass::Business).unwrap().0, 150.0);
        assert_eq!(lookup_load_factor(CodeVersion::Ibc2018, OccupancyClass::Business).unwrap().0, 150.0);
        assert_eq!(lookup_load_factor(CodeVersion::Ibc2015, OccupancyClass::Business).unwrap().0, 100.0);
        assert_eq!(lookup_load_factor(CodeVersion::Ibc2012, OccupancyClass::Business).unwrap().0, 100.0);
    }

    #[test]
    fn test_standard_table_is_complete() {
        let table = CodeTable::standard();
        assert_eq!(table.len(), CodeVersion::ALL.len() * OccupancyClass::ALL.len());
        for version in CodeVersion::ALL {
            for occupancy in OccupancyClass::ALL {
                assert!(table.contains(version, occupancy), "{} {}", version, occupancy);
            }
        }
    }

    #[test]
    fn test_area_types() {
        let table = CodeTable::standard();
        let (_, net) = table.lookup(CodeVersion::Ibc2021, OccupancyClass::Educational).unwrap();
        let (_, gross) = table.lookup(CodeVersion::Ibc2021, OccupancyClass::Mercantile).unwrap();
        assert_eq!(net, AreaType::Net);
        assert_eq!(gross, AreaType::Gross);
    }

    #[test]
    fn test_missing_pair_is_unsupported() {
        let table = CodeTable::from_entries(IBC_2021.iter().copied());
        let err = table.lookup(CodeVersion::Ibc2012, OccupancyClass::Business).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_COMBINATION");
    }

    #[test]
    fn test_metric_factor_converted_on_lookup() {
        let table = CodeTable::standard();
        let (metric, _) = table
            .load_factor_for_units(CodeVersion::Ibc2021, OccupancyClass::Business, UnitSystem::Metric)
            .unwrap();
        assert!((metric - 150.0 * 0.092903).abs() < 1e-12);

        let (imperial, _) = table
            .load_factor_for_units(CodeVersion::Ibc2021, OccupancyClass::Business, UnitSystem::Imperial)
            .unwrap();
        assert_eq!(imperial, 150.0);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(CodeVersion::from_str_flexible("IBC 2015").unwrap(), CodeVersion::Ibc2015);
        assert_eq!(CodeVersion::from_str_flexible("2021").unwrap(), CodeVersion::Ibc2021);
        assert!(CodeVersion::from_str_flexible("2009").is_err());

        assert_eq!(OccupancyClass::from_str_flexible("business").unwrap(), OccupancyClass::Business);
        assert_eq!(
            OccupancyClass::from_str_flexible("Assembly (Standing Space)").unwrap(),
            OccupancyClass::AssemblyStandingSpace
        );
        assert!(OccupancyClass::from_str_flexible("hangar").is_err());
    }

    #[test]
    fn test_serialization_uses_labels() {
        assert_eq!(serde_json::to_string(&CodeVersion::Ibc2018).unwrap(), "\"2018\"");
        assert_eq!(
            serde_json::to_string(&OccupancyClass::AssemblyLessConcentrated).unwrap(),
            "\"Assembly (Less Concentrated)\""
        );
    }

    #[test]
    fn test_rows_sorted_newest_first() {
        let rows = CodeTable::standard().rows();
        assert_eq!(rows.first().unwrap().code_version, CodeVersion::Ibc2021);
        assert_eq!(rows.last().unwrap().code_version, CodeVersion::Ibc2012);
    }

    #[test]
    fn test_jurisdictions() {
        assert_eq!(US_STATES[0], "Texas");
        assert_eq!(canonical_jurisdiction("new york"), Some("New York"));
        assert_eq!(canonical_jurisdiction("Atlantis"), None);
    }

    #[test]
    fn test_citation() {
        assert_eq!(OCCUPANT_LOAD_REF.citation(), "IBC 1004 - Occupant Load");
    }
}
