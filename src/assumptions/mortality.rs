//! Deterministic mortality by age bracket
//!
//! Each bracket covers an inclusive age range and carries the fraction of its
//! members excluded per simulated year. Brackets are applied in table order.

use std::ops::RangeInclusive;
use thiserror::Error;

/// Problems detected when building a custom table
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MortalityTableError {
    #[error("bracket '{0}' has an empty age range")]
    EmptyRange(String),
    #[error("bracket '{label}' exclusion fraction {fraction} is outside [0, 1]")]
    FractionOutOfRange { label: String, fraction: f64 },
    #[error("brackets '{first}' and '{second}' overlap")]
    Overlap { first: String, second: String },
}

/// One age bracket of the mortality table
#[derive(Debug, Clone, PartialEq)]
pub struct MortalityBracket {
    pub label: String,
    /// Inclusive at both ends
    pub ages: RangeInclusive<u32>,
    /// Fraction of the bracket excluded each year
    pub exclusion_fraction: f64,
}

impl MortalityBracket {
    pub fn new(label: impl Into<String>, ages: RangeInclusive<u32>, exclusion_fraction: f64) -> Self {
        Self {
            label: label.into(),
            ages,
            exclusion_fraction,
        }
    }

    pub fn contains(&self, age: u32) -> bool {
        self.ages.contains(&age)
    }
}

/// Ordered, non-overlapping set of mortality brackets
#[derive(Debug, Clone, PartialEq)]
pub struct MortalityTable {
    brackets: Vec<MortalityBracket>,
}

/// (label, first age, last age, exclusion fraction)
const STANDARD_BRACKETS: [(&str, u32, u32, f64); 8] = [
    ("0-4", 0, 4, 0.01),
    ("5-19", 5, 19, 0.002),
    ("20-39", 20, 39, 0.005),
    ("40-59", 40, 59, 0.01),
    ("60-69", 60, 69, 0.02),
    ("70-79", 70, 79, 0.05),
    ("80-89", 80, 89, 0.12),
    ("90-110", 90, 110, 0.3),
];

impl MortalityTable {
    /// Build a table, checking that ranges are non-empty and disjoint and that
    /// fractions lie in [0, 1]
    pub fn new(brackets: Vec<MortalityBracket>) -> Result<Self, MortalityTableError> {
        for bracket in &brackets {
            if bracket.ages.is_empty() {
                return Err(MortalityTableError::EmptyRange(bracket.label.clone()));
            }
            if !(0.0..=1.0).contains(&bracket.exclusion_fraction) {
                return Err(MortalityTableError::FractionOutOfRange {
                    label: bracket.label.clone(),
                    fraction: bracket.exclusion_fraction,
                });
            }
        }

        for (i, first) in brackets.iter().enumerate() {
            for second in &brackets[i + 1..] {
                let disjoint = first.ages.end() < second.ages.start() || second.ages.end() < first.ages.start();
                if !disjoint {
                    return Err(MortalityTableError::Overlap {
                        first: first.label.clone(),
                        second: second.label.clone(),
                    });
                }
            }
        }

        Ok(Self { brackets })
    }

    /// The standard table used by file-driven runs.
    ///
    /// Persons older than the last bracket fall outside the table and are
    /// removed by the year transition.
    pub fn standard() -> Self {
        Self {
            brackets: STANDARD_BRACKETS
                .iter()
                .map(|&(label, first, last, fraction)| MortalityBracket::new(label, first..=last, fraction))
                .collect(),
        }
    }

    /// A single bracket covering `ages` with the same fraction for everyone
    pub fn uniform(ages: RangeInclusive<u32>, exclusion_fraction: f64) -> Result<Self, MortalityTableError> {
        Self::new(vec![MortalityBracket::new("uniform", ages, exclusion_fraction)])
    }

    pub fn brackets(&self) -> &[MortalityBracket] {
        &self.brackets
    }

    /// Position of the bracket containing `age`, if any
    pub fn bracket_index(&self, age: u32) -> Option<usize> {
        self.brackets.iter().position(|b| b.contains(age))
    }

    /// The bracket containing `age`, if any
    pub fn bracket_for(&self, age: u32) -> Option<&MortalityBracket> {
        self.bracket_index(age).map(|i| &self.brackets[i])
    }

    /// Highest age still covered by the table
    pub fn max_age(&self) -> Option<u32> {
        self.brackets.iter().map(|b| *b.ages.end()).max()
    }
}

impl Default for MortalityTable {
    fn default() -> Self {
        Self::standard()
    }
}
