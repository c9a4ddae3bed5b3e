//! Pay-as-you-go social security rules

use std::ops::RangeInclusive;

/// Share of salary paid into the fund by active members
pub const CONTRIBUTION_RATE: f64 = 0.23;

/// Last age at which members still contribute
pub const RETIREMENT_AGE: u32 = 67;

/// First age at which members contribute
pub const FIRST_ACTIVE_AGE: u32 = 23;

/// Last age at which retirees still draw a pension
pub const LAST_RETIREE_AGE: u32 = 101;

/// Contribution rate and the active/retiree age brackets.
///
/// Ages outside both brackets neither pay in nor draw out.
#[derive(Debug, Clone, PartialEq)]
pub struct PensionRules {
    pub contribution_rate: f64,
    pub active_ages: RangeInclusive<u32>,
    pub retiree_ages: RangeInclusive<u32>,
}

impl PensionRules {
    pub fn is_active(&self, age: u32) -> bool {
        self.active_ages.contains(&age)
    }

    pub fn is_retiree(&self, age: u32) -> bool {
        self.retiree_ages.contains(&age)
    }
}

impl Default for PensionRules {
    fn default() -> Self {
        Self {
            contribution_rate: CONTRIBUTION_RATE,
            active_ages: FIRST_ACTIVE_AGE..=RETIREMENT_AGE,
            retiree_ages: (RETIREMENT_AGE + 1)..=LAST_RETIREE_AGE,
        }
    }
}
