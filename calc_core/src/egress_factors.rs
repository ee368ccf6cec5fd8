//! # Egress Capacity Factors
//!
//! Width required per occupant (IBC 1005.3), in inches. Sprinklered buildings
//! get the reduced factors.

use serde::{Deserialize, Serialize};

/// Per-occupant width factors for one sprinkler condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EgressFactors {
    /// Inches per occupant for stairways
    pub stair_in_per_occupant: f64,
    /// Inches per occupant for all other egress components
    pub other_in_per_occupant: f64,
}

/// Building with an automatic sprinkler system
pub const SPRINKLERED: EgressFactors = EgressFactors {
    stair_in_per_occupant: 0.2,
    other_in_per_occupant: 0.15,
};

/// Building without an automatic sprinkler system
pub const UNSPRINKLERED: EgressFactors = EgressFactors {
    stair_in_per_occupant: 0.3,
    other_in_per_occupant: 0.2,
};

/// Factor pair for a sprinkler condition.
pub fn lookup_egress_factors(sprinklered: bool) -> EgressFactors {
    if sprinklered {
        SPRINKLERED
    } else {
        UNSPRINKLERED
    }
}
