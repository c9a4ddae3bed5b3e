//! Yearly demographic transition and the simulation loop

use crate::assumptions::{Assumptions, MortalityTable};
use crate::population::{Person, PersonFactory};
use super::ledger::settle_year;
use super::results::{SimulationResult, YearRecord};
use super::selector::exclude_entities;
use super::state::SimulationState;
use std::convert::Infallible;

/// Demographic counts for one year transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionSummary {
    /// Persons aged by one year
    pub aged: usize,
    /// Persons excluded by their mortality bracket
    pub deaths: usize,
    /// Persons whose new age fits no bracket
    pub dropped: usize,
    pub births: usize,
}

/// Advance a population by one year: aging, mortality, then births.
///
/// `year` only feeds the deterministic exclusion order.
pub fn simulate_year(
    population: Vec<Person>,
    year: i64,
    mortality: &MortalityTable,
    natality: usize,
    factory: &mut PersonFactory,
) -> Vec<Person> {
    simulate_year_detailed(population, year, mortality, natality, factory).0
}

/// Same as [`simulate_year`], also returning the demographic counts
pub fn simulate_year_detailed(
    mut population: Vec<Person>,
    year: i64,
    mortality: &MortalityTable,
    natality: usize,
    factory: &mut PersonFactory,
) -> (Vec<Person>, TransitionSummary) {
    let mut summary = TransitionSummary {
        aged: population.len(),
        ..Default::default()
    };

    // Everyone ages before any exclusion. Saturating keeps the largest
    // accepted age out of every bracket instead of wrapping to 0.
    for person in population.iter_mut() {
        person.age = person.age.saturating_add(1);
    }

    // Group by bracket, keeping population order inside each group.
    // Persons outside every bracket are dropped without a trace. This is an
    // intentional quirk; existing outputs depend on it.
    let mut groups: Vec<Vec<Person>> = mortality.brackets().iter().map(|_| Vec::new()).collect();
    for person in population {
        match mortality.bracket_index(person.age) {
            Some(i) => groups[i].push(person),
            None => summary.dropped += 1,
        }
    }

    let mut next = Vec::new();
    for (bracket, group) in mortality.brackets().iter().zip(groups) {
        let before = group.len();
        let survivors = exclude_entities(group, bracket.exclusion_fraction, year);
        summary.deaths += before - survivors.len();
        next.extend(survivors);
    }

    // A zero divisor yields no births
    summary.births = next.len().checked_div(natality).unwrap_or(0);
    for _ in 0..summary.births {
        next.push(factory.create_newborn());
    }

    (next, summary)
}

/// Runs yearly steps against a [`SimulationState`]
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    assumptions: Assumptions,
    natality: usize,
}

impl SimulationEngine {
    pub fn new(assumptions: Assumptions, natality: usize) -> Self {
        Self { assumptions, natality }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn natality(&self) -> usize {
        self.natality
    }

    /// Simulate `state.year`: transition, then fund settlement, then move to
    /// the next year
    pub fn step(&self, state: &mut SimulationState) -> YearRecord {
        let year = state.year;
        let population = std::mem::take(&mut state.population);

        let (population, transition) = simulate_year_detailed(
            population,
            year,
            &self.assumptions.mortality,
            self.natality,
            &mut state.factory,
        );
        let entry = settle_year(year, state.fund, &population, &self.assumptions.pension);

        log::debug!(
            "Year {}: population {} (births {}, deaths {}, dropped {}), fund {:.1} -> {:.1}",
            year,
            population.len(),
            transition.births,
            transition.deaths,
            transition.dropped,
            entry.opening,
            entry.closing,
        );

        state.population = population;
        state.fund = entry.closing;
        state.year += 1;
        state.periods_run += 1;

        YearRecord {
            year,
            population: state.population.len(),
            births: transition.births,
            deaths: transition.deaths,
            dropped: transition.dropped,
            contributions: entry.contributions,
            payouts: entry.payouts,
            fund: entry.closing,
        }
    }

    /// Run `periods` steps and collect the results
    pub fn run(&self, state: SimulationState, periods: u32) -> SimulationResult {
        match self.run_with(state, periods, |_| Ok::<(), Infallible>(())) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Run `periods` steps, handing each year's record to `on_year` as soon
    /// as it is settled. The first error from `on_year` stops the run.
    pub fn run_with<F, E>(&self, mut state: SimulationState, periods: u32, mut on_year: F) -> Result<SimulationResult, E>
    where
        F: FnMut(&YearRecord) -> Result<(), E>,
    {
        let initial_year = state.year;
        let initial_population = state.population.len();
        let initial_fund = state.fund;

        let mut records = Vec::new();
        for _ in 0..periods {
            let record = self.step(&mut state);
            on_year(&record)?;
            records.push(record);
        }

        log::info!(
            "Simulated {} years from {}: population {} -> {}, fund {:.1} -> {:.1}",
            periods,
            initial_year,
            initial_population,
            state.population.len(),
            initial_fund,
            state.fund,
        );

        Ok(SimulationResult {
            initial_year,
            initial_population,
            initial_fund,
            records,
            final_year: state.last_simulated_year(),
            final_fund: state.fund,
            final_population: state.population,
        })
    }
}
