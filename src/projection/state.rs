//! Mutable state carried from one simulated year to the next

use crate::assumptions::SimulationConfig;
use crate::population::{Person, PersonFactory};

/// State of the simulation between two yearly steps
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Year the next step will simulate
    pub year: i64,

    /// Pension fund balance
    pub fund: f64,

    /// Current population
    pub population: Vec<Person>,

    /// Owner of the identifier counter for births
    pub factory: PersonFactory,

    /// Number of steps taken so far
    pub periods_run: u32,
}

impl SimulationState {
    /// Start a run at `year` with the given fund and population
    pub fn new(year: i64, fund: f64, population: Vec<Person>, factory: PersonFactory) -> Self {
        Self {
            year,
            fund,
            population,
            factory,
            periods_run: 0,
        }
    }

    /// Start a run from the configured initial year and fund
    pub fn from_config(config: &SimulationConfig, population: Vec<Person>, factory: PersonFactory) -> Self {
        Self::new(config.initial_year, config.initial_fund, population, factory)
    }

    /// Last year actually simulated (the year before the first one if none ran)
    pub fn last_simulated_year(&self) -> i64 {
        self.year - 1
    }
}
