//! Yearly pension fund accounting

use crate::assumptions::PensionRules;
use crate::population::Person;
use serde::{Deserialize, Serialize};

/// Itemised fund movement for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub year: i64,
    pub opening: f64,
    pub contributions: f64,
    pub payouts: f64,
    pub closing: f64,
    /// Persons in the active bracket
    pub contributors: usize,
    /// Persons in the retiree bracket
    pub retirees: usize,
}

/// Settle one year of contributions and payouts against the fund.
///
/// Active members pay `contribution_rate * salary`, retirees draw `pension`.
/// The balance has no floor and may go negative. `year` only labels the entry.
pub fn settle_year(year: i64, fund: f64, population: &[Person], rules: &PensionRules) -> LedgerEntry {
    let mut contributions = 0.0;
    let mut payouts = 0.0;
    let mut contributors = 0;
    let mut retirees = 0;

    for person in population {
        if rules.is_active(person.age) {
            contributions += rules.contribution_rate * person.salary.as_f64();
            contributors += 1;
        } else if rules.is_retiree(person.age) {
            payouts += person.pension.as_f64();
            retirees += 1;
        }
    }

    // contributions are added before payouts are subtracted
    let closing = fund + contributions - payouts;

    LedgerEntry {
        year,
        opening: fund,
        contributions,
        payouts,
        closing,
        contributors,
        retirees,
    }
}

/// Updated fund balance after one year under the default rules
pub fn collect_social_security(year: i64, fund: f64, population: &[Person]) -> f64 {
    settle_year(year, fund, population, &PensionRules::default()).closing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::PersonFactory;
    use approx::assert_relative_eq;

    fn people(ages: &[u32], salary: f64, pension: f64) -> Vec<Person> {
        let mut factory = PersonFactory::new(1, salary, pension);
        ages.iter().map(|&age| factory.create(age)).collect()
    }

    #[test]
    fn test_single_contributor() {
        let population = people(&[40], 1000.0, 0.0);
        let fund = collect_social_security(2024, 1000.0, &population);
        assert_relative_eq!(fund, 1230.0, epsilon = 1e-9);
    }

    #[test]
    fn test_contributions_and_payouts() {
        let population = people(&[22, 23, 50, 67, 68, 90, 101, 102], 2000.0, 700.0);
        let entry = settle_year(2024, 500.0, &population, &PensionRules::default());

        assert_eq!(entry.contributors, 3);
        assert_eq!(entry.retirees, 3);
        assert_relative_eq!(entry.contributions, 3.0 * 0.23 * 2000.0, epsilon = 1e-9);
        assert_relative_eq!(entry.payouts, 3.0 * 700.0, epsilon = 1e-9);
        assert_relative_eq!(entry.closing, 500.0 + 1380.0 - 2100.0, epsilon = 1e-9);
        assert_eq!(entry.opening, 500.0);
        assert_eq!(entry.year, 2024);
    }

    #[test]
    fn test_fund_can_go_negative() {
        let population = people(&[80, 80], 0.0, 1000.0);
        let fund = collect_social_security(2024, 100.0, &population);
        assert_relative_eq!(fund, -1900.0, epsilon = 1e-9);
    }

    #[test]
    fn test_outside_brackets_have_no_effect() {
        let population = people(&[0, 10, 22, 102, 110], 5000.0, 5000.0);
        let fund = collect_social_security(2024, 42.0, &population);
        assert_eq!(fund, 42.0);
    }

    #[test]
    fn test_empty_population() {
        assert_eq!(collect_social_security(2024, -3.5, &[]), -3.5);
    }
}
