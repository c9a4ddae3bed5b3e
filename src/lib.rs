//! Pension simulator - deterministic demographic and pension fund projection
//!
//! This library provides:
//! - Person records with identifiers issued by a single-owner factory
//! - Deterministic mortality by age bracket (no randomness)
//! - Yearly aging, mortality and births
//! - Pay-as-you-go pension fund settlement
//! - File-driven runs with typed configuration

pub mod error;
pub mod population;
pub mod assumptions;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ConfigError, PopulationError, SimulationError};
pub use population::{Person, PersonFactory, Gender};
pub use assumptions::{Assumptions, MortalityTable, PensionRules, SimulationConfig};
pub use projection::{SimulationEngine, SimulationResult, SimulationState, YearRecord};
pub use scenario::SimulationRunner;
