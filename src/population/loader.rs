//! Read initial populations and write final populations
//!
//! Input rows are comma-separated; only the age column is consumed; identifiers
//! and names are regenerated by the [`PersonFactory`].

use super::{Person, PersonFactory};
use crate::error::PopulationError;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Column holding the age in population files (0-indexed)
pub const AGE_COLUMN: usize = 3;

/// Parse the age column of a row, rejecting anything but a plain digit run
fn parse_age(field: &str) -> Option<u32> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Read the ages of all well-formed rows from any reader.
///
/// A row is accepted when it has at least `AGE_COLUMN + 1` fields and its age
/// field is a non-negative integer literal. Other rows are skipped.
pub fn read_initial_ages<R: Read>(reader: R) -> Vec<u32> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut ages = Vec::new();

    for (line, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Skipping unreadable population row {}: {}", line + 1, e);
                continue;
            }
        };

        match record.get(AGE_COLUMN).and_then(parse_age) {
            Some(age) => ages.push(age),
            None => log::debug!("Skipping malformed population row {}", line + 1),
        }
    }

    ages
}

/// Build the initial population from any reader
pub fn load_population_from_reader<R: Read>(reader: R, factory: &mut PersonFactory) -> Vec<Person> {
    read_initial_ages(reader)
        .into_iter()
        .map(|age| factory.create(age))
        .collect()
}

/// Build the initial population from a file
pub fn load_population<P: AsRef<Path>>(
    path: P,
    factory: &mut PersonFactory,
) -> Result<Vec<Person>, PopulationError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PopulationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let population = load_population_from_reader(file, factory);
    log::info!("Loaded {} persons from {}", population.len(), path.display());
    Ok(population)
}

/// Salary and pension keep their configured kind: `1000` or `1400.0`
fn write_rows<W: Write>(writer: W, population: &[Person]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(writer);

    for person in population {
        writeln!(
            writer,
            "{}, {}, {}, {}, {}, {}",
            person.id, person.name, person.gender, person.age, person.salary, person.pension,
        )?;
    }

    writer.flush()
}

/// Write one row per person: id, name, gender, age, salary, pension
pub fn write_population_to_writer<W: Write>(writer: W, population: &[Person]) -> Result<(), PopulationError> {
    write_rows(writer, population)?;
    Ok(())
}

/// Write the population to a file, replacing any existing content
pub fn write_population<P: AsRef<Path>>(path: P, population: &[Person]) -> Result<(), PopulationError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| PopulationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write_rows(file, population).map_err(|source| PopulationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {} persons to {}", population.len(), path.display());
    Ok(())
}
