//! Person records and the factory that issues their identifiers

use crate::assumptions::expr::Number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender derived from identifier parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Even identifiers
    M,
    /// Odd identifiers
    F,
}

impl Gender {
    /// `M` for even identifiers, `F` for odd ones
    pub fn from_id(id: u64) -> Self {
        if id % 2 == 0 {
            Gender::M
        } else {
            Gender::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single member of the simulated population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier, assigned at creation and never reused
    pub id: u64,

    /// Display name derived from the identifier
    pub name: String,

    /// Gender derived from identifier parity
    pub gender: Gender,

    /// Age in whole years, incremented once per simulated year
    pub age: u32,

    /// Yearly salary, contributes while of working age
    pub salary: Number,

    /// Yearly pension benefit, paid out while retired
    pub pension: Number,
}

impl Person {
    /// Display name for a given identifier
    pub fn name_for(id: u64) -> String {
        format!("Pessoa_{}", id)
    }
}

/// Issues persons with strictly increasing identifiers.
///
/// The factory is the single owner of the identifier counter. Callers borrow
/// it mutably, so two parts of a run can never hand out the same identifier.
#[derive(Debug, Clone)]
pub struct PersonFactory {
    next_id: u64,
    base_salary: Number,
    base_pension: Number,
}

impl PersonFactory {
    /// Create a factory whose first person gets `first_id`
    pub fn new(first_id: u64, base_salary: impl Into<Number>, base_pension: impl Into<Number>) -> Self {
        Self {
            next_id: first_id,
            base_salary: base_salary.into(),
            base_pension: base_pension.into(),
        }
    }

    /// Build a person of the given age, consuming one identifier
    pub fn create(&mut self, age: u32) -> Person {
        let id = self.next_id;
        self.next_id += 1;

        Person {
            id,
            name: Person::name_for(id),
            gender: Gender::from_id(id),
            age,
            salary: self.base_salary,
            pension: self.base_pension,
        }
    }

    /// Build a newborn (age 0)
    pub fn create_newborn(&mut self) -> Person {
        self.create(0)
    }

    /// Identifier the next call to `create` will use
    pub fn peek_next_id(&self) -> u64 {
        self.next_id
    }

    pub fn base_salary(&self) -> Number {
        self.base_salary
    }

    pub fn base_pension(&self) -> Number {
        self.base_pension
    }
}
