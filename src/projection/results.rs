//! Per-year records and run summaries

use crate::population::Person;
use serde::{Deserialize, Serialize};

/// Outcome of one simulated year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i64,
    /// Population after deaths and births
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
    /// Persons who aged past the last mortality bracket
    pub dropped: usize,
    pub contributions: f64,
    pub payouts: f64,
    /// Fund balance at the end of the year
    pub fund: f64,
}

impl YearRecord {
    pub fn is_deficit(&self) -> bool {
        self.fund < 0.0
    }
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub initial_year: i64,
    pub initial_population: usize,
    pub initial_fund: f64,
    pub records: Vec<YearRecord>,
    pub final_population: Vec<Person>,
    pub final_fund: f64,
    /// Last simulated year
    pub final_year: i64,
}

/// Summary statistics for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub initial_year: i64,
    pub final_year: i64,
    pub periods_run: usize,
    pub initial_population: usize,
    pub final_population: usize,
    pub initial_fund: f64,
    pub final_fund: f64,
    pub min_fund: f64,
    pub first_deficit_year: Option<i64>,
    pub deficit_years: usize,
    pub total_births: usize,
    pub total_deaths: usize,
    pub total_dropped: usize,
    pub total_contributions: f64,
    pub total_payouts: f64,
}

impl SimulationResult {
    pub fn summary(&self) -> SimulationSummary {
        let min_fund = self
            .records
            .iter()
            .map(|r| r.fund)
            .fold(self.initial_fund, f64::min);

        SimulationSummary {
            initial_year: self.initial_year,
            final_year: self.final_year,
            periods_run: self.records.len(),
            initial_population: self.initial_population,
            final_population: self.final_population.len(),
            initial_fund: self.initial_fund,
            final_fund: self.final_fund,
            min_fund,
            first_deficit_year: self.records.iter().find(|r| r.is_deficit()).map(|r| r.year),
            deficit_years: self.records.iter().filter(|r| r.is_deficit()).count(),
            total_births: self.records.iter().map(|r| r.births).sum(),
            total_deaths: self.records.iter().map(|r| r.deaths).sum(),
            total_dropped: self.records.iter().map(|r| r.dropped).sum(),
            total_contributions: self.records.iter().map(|r| r.contributions).sum(),
            total_payouts: self.records.iter().map(|r| r.payouts).sum(),
        }
    }
}
