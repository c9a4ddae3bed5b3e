//! Year-by-year projection of the population and the pension fund

mod state;
mod engine;
mod ledger;
mod results;
pub mod selector;

pub use state::SimulationState;
pub use engine::{SimulationEngine, TransitionSummary, simulate_year, simulate_year_detailed};
pub use ledger::{LedgerEntry, collect_social_security, settle_year};
pub use results::{SimulationResult, SimulationSummary, YearRecord};
pub use selector::exclude_entities;
