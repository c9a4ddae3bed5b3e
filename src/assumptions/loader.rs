//! Raw `KEY = VALUE` config file reader
//!
//! Values are evaluated as arithmetic expressions, except for the reserved
//! marker keys which are kept verbatim. Problems are reported and reading
//! stops at the first malformed line, keeping whatever was parsed before it.

use super::expr::{evaluate, Number};
use crate::error::ExprError;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Keys whose values are never evaluated
pub const RAW_STRING_KEYS: [&str; 2] = ["ACTIVO", "PENSIONISTA"];

/// A single value as read from the config file
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(Number),
    Text(String),
    /// A numeric key whose value failed to evaluate
    Rejected { raw: String, error: ExprError },
}

/// Something wrong with the config file that did not stop the run
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigProblem {
    /// The file does not exist
    NotFound { path: String },
    /// The file exists but could not be read
    Unreadable { path: String, reason: String },
    /// A non-comment line without `=`; nothing after it was read
    MalformedLine { line: usize, content: String },
    /// A numeric value that did not evaluate
    RejectedValue { key: String, raw: String, error: ExprError },
}

/// Key/value pairs read from a config file, before typing
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    values: HashMap<String, RawValue>,
    problems: Vec<ConfigProblem>,
}

impl RawConfig {
    /// Parse config text
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                config.report(ConfigProblem::MalformedLine {
                    line: index + 1,
                    content: line.to_string(),
                });
                break;
            };

            let key = key.trim().to_string();
            let value = value.trim();

            let parsed = if RAW_STRING_KEYS.contains(&key.as_str()) {
                RawValue::Text(value.to_string())
            } else {
                match evaluate(value) {
                    Ok(number) => RawValue::Number(number),
                    Err(error) => {
                        config.report(ConfigProblem::RejectedValue {
                            key: key.clone(),
                            raw: value.to_string(),
                            error: error.clone(),
                        });
                        RawValue::Rejected { raw: value.to_string(), error }
                    }
                }
            };

            config.values.insert(key, parsed);
        }

        config
    }

    /// Read and parse a config file; an unreadable file yields an empty config
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => {
                let mut config = Self::default();
                let path = path.display().to_string();
                let problem = if e.kind() == io::ErrorKind::NotFound {
                    ConfigProblem::NotFound { path }
                } else {
                    ConfigProblem::Unreadable { path, reason: e.to_string() }
                };
                config.report(problem);
                config
            }
        }
    }

    fn report(&mut self, problem: ConfigProblem) {
        match &problem {
            ConfigProblem::NotFound { path } => {
                eprintln!("Erro: O ficheiro '{}' não foi encontrado.", path);
                log::warn!("Config file {} not found", path);
            }
            ConfigProblem::Unreadable { path, reason } => {
                eprintln!("Erro ao ler o ficheiro de configuração: {}", reason);
                log::warn!("Config file {} unreadable: {}", path, reason);
            }
            ConfigProblem::MalformedLine { line, content } => {
                eprintln!("Erro ao ler o ficheiro de configuração: linha {} inválida: '{}'", line, content);
                log::warn!("Malformed config line {}: '{}'", line, content);
            }
            ConfigProblem::RejectedValue { key, raw, error } => {
                log::warn!("Config value for {} rejected ('{}'): {}", key, raw, error);
            }
        }
        self.problems.push(problem);
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn problems(&self) -> &[ConfigProblem] {
        &self.problems
    }
}
