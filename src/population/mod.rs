//! Population records, identifier issuing, and population file I/O

mod person;
pub mod loader;

pub use person::{Person, Gender, PersonFactory};
pub use loader::{load_population, load_population_from_reader, read_initial_ages, write_population, write_population_to_writer};
