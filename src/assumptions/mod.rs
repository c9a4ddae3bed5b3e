//! Simulation assumptions: mortality brackets, pension rules, and run parameters

mod mortality;
mod pension;
pub mod config;
pub mod expr;
pub mod loader;

pub use mortality::{MortalityTable, MortalityBracket, MortalityTableError};
pub use pension::{PensionRules, CONTRIBUTION_RATE, RETIREMENT_AGE};
pub use config::SimulationConfig;
pub use loader::RawConfig;

/// Container for the fixed demographic and pension assumptions
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub mortality: MortalityTable,
    pub pension: PensionRules,
}

impl Assumptions {
    /// Standard mortality table with the default pension rules
    pub fn standard() -> Self {
        Self::default()
    }

    /// Custom mortality table with the default pension rules
    pub fn with_mortality(mortality: MortalityTable) -> Self {
        Self {
            mortality,
            pension: PensionRules::default(),
        }
    }
}
