//! # calc_core - Occupant Load and Egress Calculation Engine
//!
//! `calc_core` computes building-code occupant loads and means-of-egress
//! widths from floor area, occupancy classification and IBC edition, and
//! keeps multi-building projects and a calculation history on local
//! storage. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Pure calculations**: the engine is a function from validated input to result
//! - **JSON-First**: persisted and exported records are plain serde types
//! - **Rich Errors**: structured error types, not just strings
//! - **Injected storage**: persistence goes through the [`store::Store`] trait
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::code_tables::{CodeVersion, OccupancyClass};
//! use calc_core::validation::{validate, InputDraft};
//! use calc_core::{calculate, CalculatorConfig, UnitSystem};
//!
//! let draft = InputDraft {
//!     state: Some("Texas".to_string()),
//!     code_version: Some(CodeVersion::Ibc2021),
//!     occupancy: Some(OccupancyClass::Business),
//!     floor_area: Some(10_000.0),
//!     sprinklered: Some(true),
//!     ..InputDraft::default()
//! };
//!
//! let validated = validate(&draft, UnitSystem::Imperial, false, &CalculatorConfig::default()).unwrap();
//! let result = calculate(&validated.input).unwrap();
//! assert_eq!(result.occupant_load, 67);
//! ```
//!
//! ## Modules
//!
//! - [`code_tables`] - IBC load factors, code references, jurisdictions
//! - [`egress_factors`] - Width per occupant by sprinkler status
//! - [`units`] - Unit systems, conversion, display formatting
//! - [`calculations`] - Occupant load, egress width, door width
//! - [`validation`] - Form drafts to calculation inputs
//! - [`project`] - Projects and buildings
//! - [`history`] - Bounded calculation log
//! - [`session`] - Application state container
//! - [`store`] - Key-value storage capability
//! - [`file_io`] - Session persistence, named projects, export/import
//! - [`report`] - Plain-text calculation summary
//! - [`config`] - Tunable limits
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod code_tables;
pub mod config;
pub mod egress_factors;
pub mod errors;
pub mod file_io;
pub mod history;
pub mod project;
pub mod report;
pub mod session;
pub mod store;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, CalculationInput, CalculationResult};
pub use config::{load_config, CalculatorConfig};
pub use errors::{CalcError, CalcResult};
pub use file_io::{export_project, import_project, load_session, save_session};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::FileStore;
pub use project::{Building, Project};
pub use session::{CalculationOutcome, SanityDecision, Session};
pub use store::{MemoryStore, Store};
pub use units::UnitSystem;
