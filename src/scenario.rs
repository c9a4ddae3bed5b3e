//! File-driven simulation runs
//!
//! A run is identified by a simulation code `S` which names its three files:
//! `config_{S}.txt`, `populacao_inicial_{S}.txt` and `populacao_final_{S}.txt`.

use crate::assumptions::{Assumptions, SimulationConfig};
use crate::error::SimulationError;
use crate::population::{load_population, write_population, PersonFactory};
use crate::projection::{SimulationEngine, SimulationResult, SimulationState, SimulationSummary};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Paths used by one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationFiles {
    pub config: PathBuf,
    pub initial_population: PathBuf,
    pub final_population: PathBuf,
}

impl SimulationFiles {
    /// Standard file names for simulation `code` inside `dir`
    pub fn for_code<P: AsRef<Path>>(dir: P, code: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            config: dir.join(format!("config_{}.txt", code)),
            initial_population: dir.join(format!("populacao_inicial_{}.txt", code)),
            final_population: dir.join(format!("populacao_final_{}.txt", code)),
        }
    }
}

pub fn start_message(year: i64, population: usize, fund: f64) -> String {
    format!(
        "A simulação começou no ano {}, com população total de {}, e o fundo de pensões a valer {:.1}.",
        year, population, fund
    )
}

pub fn deficit_message(year: i64, population: usize, fund: f64) -> String {
    format!(
        "No ano {}, a população foi {} e o fundo de pensões foi negativo, com valor {:.1}.",
        year, population, fund
    )
}

pub fn end_message(year: i64, population: usize, fund: f64) -> String {
    format!(
        "A simulação terminou no ano {}, com população total de {} pessoas e o fundo de pensões vale {:.1}.",
        year, population, fund
    )
}

/// Runs file-driven simulations with a fixed set of assumptions
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    assumptions: Assumptions,
}

impl SimulationRunner {
    /// Runner with the standard mortality table and pension rules
    pub fn new() -> Self {
        Self {
            assumptions: Assumptions::standard(),
        }
    }

    /// Runner with custom assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Run simulation `code` from files in `dir`, reporting to stdout
    pub fn run_code<P: AsRef<Path>>(&self, dir: P, code: &str) -> Result<SimulationResult, SimulationError> {
        let files = SimulationFiles::for_code(dir, code);
        let stdout = std::io::stdout();
        self.run_files(&files, &mut stdout.lock())
    }

    /// Load inputs, simulate every configured year while reporting progress
    /// to `out`, then write the final population
    pub fn run_files<W: Write>(&self, files: &SimulationFiles, out: &mut W) -> Result<SimulationResult, SimulationError> {
        let config = SimulationConfig::load(&files.config)?;
        log::info!(
            "Config {}: {} years from {}, fund {:.1}",
            files.config.display(),
            config.periods,
            config.initial_year,
            config.initial_fund,
        );

        let mut factory = PersonFactory::new(config.first_id, config.base_salary, config.base_pension);
        let population = load_population(&files.initial_population, &mut factory)?;

        let state = SimulationState::from_config(&config, population, factory);
        let engine = SimulationEngine::new(self.assumptions.clone(), config.natality);

        writeln!(out, "{}", start_message(state.year, state.population.len(), state.fund))?;

        let result = engine.run_with(state, config.periods, |record| {
            if record.is_deficit() {
                writeln!(out, "{}", deficit_message(record.year, record.population, record.fund))?;
            }
            Ok::<(), std::io::Error>(())
        })?;

        writeln!(
            out,
            "{}",
            end_message(result.final_year, result.final_population.len(), result.final_fund)
        )?;

        write_population(&files.final_population, &result.final_population)?;

        Ok(result)
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }
}

impl Default for SimulationRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a run summary as pretty-printed JSON
pub fn write_summary_json<P: AsRef<Path>>(path: P, summary: &SimulationSummary) -> Result<(), SimulationError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| SimulationError::Summary {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.flush().map_err(|source| SimulationError::Summary {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let files = SimulationFiles::for_code("runs", "3");
        assert_eq!(files.config, Path::new("runs").join("config_3.txt"));
        assert_eq!(files.initial_population, Path::new("runs").join("populacao_inicial_3.txt"));
        assert_eq!(files.final_population, Path::new("runs").join("populacao_final_3.txt"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            start_message(2024, 100, 1000.0),
            "A simulação começou no ano 2024, com população total de 100, e o fundo de pensões a valer 1000.0."
        );
        assert_eq!(
            deficit_message(2030, 57, -1234.56),
            "No ano 2030, a população foi 57 e o fundo de pensões foi negativo, com valor -1234.6."
        );
        assert_eq!(
            end_message(2033, 60, 12.04),
            "A simulação terminou no ano 2033, com população total de 60 pessoas e o fundo de pensões vale 12.0."
        );
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let files = SimulationFiles::for_code("no/such/dir", "1");
        let mut out = Vec::new();
        let result = SimulationRunner::new().run_files(&files, &mut out);
        assert!(matches!(result, Err(SimulationError::Config(_))));
        assert!(out.is_empty());
    }

    /// Accepts `lines_left` complete lines, then fails every write
    struct FailingWriter {
        lines_left: usize,
        text: String,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.lines_left == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
            }
            let chunk = String::from_utf8_lossy(buf);
            self.lines_left -= chunk.matches('\n').count().min(self.lines_left);
            self.text.push_str(&chunk);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_progress_failure_stops_before_final_population() {
        let dir = tempfile::tempdir().unwrap();
        let files = SimulationFiles::for_code(dir.path(), "9");
        std::fs::write(
            &files.config,
            "FUNDO_PENSOES_INICIAL = 0\nANO_INICIAL = 2024\nEPOCAS = 5\nSALARIO_BASE = 0\nPENSAO_BASE = 100\nNATALIDADE = 1000\n",
        )
        .unwrap();
        std::fs::write(&files.initial_population, "1, a, F, 80, 1, 1\n").unwrap();

        let mut out = FailingWriter { lines_left: 1, text: String::new() };
        let result = SimulationRunner::new().run_files(&files, &mut out);

        assert!(matches!(result, Err(SimulationError::Progress(_))));
        assert_eq!(out.text, format!("{}\n", start_message(2024, 1, 0.0)));
        assert!(!files.final_population.exists());
    }
}
