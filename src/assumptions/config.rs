//! Typed simulation parameters built from a raw config file

use super::expr::Number;
use super::loader::{RawConfig, RawValue};
use crate::error::ConfigError;
use serde::Serialize;
use std::path::Path;

pub const KEY_INITIAL_FUND: &str = "FUNDO_PENSOES_INICIAL";
pub const KEY_INITIAL_YEAR: &str = "ANO_INICIAL";
pub const KEY_PERIODS: &str = "EPOCAS";
pub const KEY_BASE_SALARY: &str = "SALARIO_BASE";
pub const KEY_BASE_PENSION: &str = "PENSAO_BASE";
pub const KEY_NATALITY: &str = "NATALIDADE";
pub const KEY_FIRST_ID: &str = "CC_INICIAL";
pub const KEY_ACTIVE_MARKER: &str = "ACTIVO";
pub const KEY_RETIREE_MARKER: &str = "PENSIONISTA";

/// All keys the simulator understands
pub const KNOWN_KEYS: [&str; 9] = [
    KEY_INITIAL_FUND,
    KEY_INITIAL_YEAR,
    KEY_PERIODS,
    KEY_BASE_SALARY,
    KEY_BASE_PENSION,
    KEY_NATALITY,
    KEY_FIRST_ID,
    KEY_ACTIVE_MARKER,
    KEY_RETIREE_MARKER,
];

/// Identifier given to the first person when `CC_INICIAL` is absent
pub const DEFAULT_FIRST_ID: u64 = 1;

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationConfig {
    /// Pension fund balance before the first year
    pub initial_fund: f64,

    /// First simulated year
    pub initial_year: i64,

    /// Number of simulated years
    pub periods: u32,

    /// Salary given to every new person
    pub base_salary: Number,

    /// Pension given to every new person
    pub base_pension: Number,

    /// Surviving population needed for one birth
    pub natality: usize,

    /// Identifier of the first person created
    pub first_id: u64,

    /// Reserved, kept verbatim
    pub active_marker: Option<String>,

    /// Reserved, kept verbatim
    pub retiree_marker: Option<String>,
}

impl SimulationConfig {
    /// Read a config file and type its values
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_raw(&RawConfig::load(path))
    }

    /// Type the values of an already parsed config
    pub fn from_raw(raw: &RawConfig) -> Result<Self, ConfigError> {
        for key in raw.keys() {
            if !KNOWN_KEYS.contains(&key) {
                log::warn!("Ignoring unknown config key {}", key);
            }
        }

        let natality = required_int(raw, KEY_NATALITY)?;
        if natality < 1 {
            return Err(ConfigError::InvalidValue {
                key: KEY_NATALITY,
                reason: format!("must be at least 1, got {}", natality),
            });
        }

        let first_id = match optional_number(raw, KEY_FIRST_ID)? {
            Some(number) => to_int(KEY_FIRST_ID, number)?,
            None => DEFAULT_FIRST_ID as i64,
        };

        Ok(Self {
            initial_fund: required_number(raw, KEY_INITIAL_FUND)?.as_f64(),
            initial_year: required_int(raw, KEY_INITIAL_YEAR)?,
            periods: non_negative(KEY_PERIODS, required_int(raw, KEY_PERIODS)?)?,
            base_salary: required_number(raw, KEY_BASE_SALARY)?,
            base_pension: required_number(raw, KEY_BASE_PENSION)?,
            natality: non_negative(KEY_NATALITY, natality)?,
            first_id: non_negative(KEY_FIRST_ID, first_id)?,
            active_marker: text(raw, KEY_ACTIVE_MARKER),
            retiree_marker: text(raw, KEY_RETIREE_MARKER),
        })
    }
}

fn optional_number(raw: &RawConfig, key: &'static str) -> Result<Option<Number>, ConfigError> {
    match raw.get(key) {
        None => Ok(None),
        Some(RawValue::Number(number)) => Ok(Some(*number)),
        Some(RawValue::Rejected { raw, error }) => Err(ConfigError::InvalidValue {
            key,
            reason: format!("'{}' is not a number ({})", raw, error),
        }),
        Some(RawValue::Text(text)) => Err(ConfigError::InvalidValue {
            key,
            reason: format!("'{}' is not a number", text),
        }),
    }
}

fn required_number(raw: &RawConfig, key: &'static str) -> Result<Number, ConfigError> {
    optional_number(raw, key)?.ok_or(ConfigError::MissingKey(key))
}

fn required_int(raw: &RawConfig, key: &'static str) -> Result<i64, ConfigError> {
    to_int(key, required_number(raw, key)?)
}

fn to_int(key: &'static str, number: Number) -> Result<i64, ConfigError> {
    number.as_i64().ok_or_else(|| ConfigError::InvalidValue {
        key,
        reason: format!("expected an integer, got {}", number),
    })
}

fn non_negative<T: TryFrom<i64>>(key: &'static str, value: i64) -> Result<T, ConfigError> {
    T::try_from(value).map_err(|_| ConfigError::InvalidValue {
        key,
        reason: format!("{} is out of range", value),
    })
}

fn text(raw: &RawConfig, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(RawValue::Text(text)) => Some(text.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "\
FUNDO_PENSOES_INICIAL = 1_000_000
ANO_INICIAL = 2024
EPOCAS = 10
SALARIO_BASE = 1000
PENSAO_BASE = 500.5
NATALIDADE = 50
ACTIVO = range(23, 68)
";

    #[test]
    fn test_full_config() {
        let config = SimulationConfig::from_raw(&RawConfig::parse(FULL)).unwrap();

        assert_eq!(config.initial_fund, 1_000_000.0);
        assert_eq!(config.initial_year, 2024);
        assert_eq!(config.periods, 10);
        assert_eq!(config.base_salary, Number::Int(1000));
        assert_eq!(config.base_pension, Number::Float(500.5));
        assert_eq!(config.natality, 50);
        assert_eq!(config.first_id, DEFAULT_FIRST_ID);
        assert_eq!(config.active_marker.as_deref(), Some("range(23, 68)"));
        assert_eq!(config.retiree_marker, None);
    }

    #[test]
    fn test_float_salary_keeps_kind() {
        let text = FULL
            .replace("SALARIO_BASE = 1000", "SALARIO_BASE = 1_200 * 14 / 12")
            .replace("PENSAO_BASE = 500.5", "PENSAO_BASE = 650.0");
        let config = SimulationConfig::from_raw(&RawConfig::parse(&text)).unwrap();

        assert_eq!(config.base_salary, Number::Float(1400.0));
        assert_eq!(config.base_pension, Number::Float(650.0));
    }

    #[test]
    fn test_first_id_override() {
        let text = format!("{}CC_INICIAL = 1000\n", FULL);
        let config = SimulationConfig::from_raw(&RawConfig::parse(&text)).unwrap();
        assert_eq!(config.first_id, 1000);
    }

    #[test]
    fn test_missing_required_key() {
        let text = FULL.replace("EPOCAS = 10\n", "");
        let result = SimulationConfig::from_raw(&RawConfig::parse(&text));
        assert_eq!(result, Err(ConfigError::MissingKey(KEY_PERIODS)));
    }

    #[test]
    fn test_float_where_integer_expected() {
        let text = FULL.replace("EPOCAS = 10", "EPOCAS = 10 / 2");
        let result = SimulationConfig::from_raw(&RawConfig::parse(&text));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key: KEY_PERIODS, .. })));
    }

    #[test]
    fn test_negative_periods_rejected() {
        let text = FULL.replace("EPOCAS = 10", "EPOCAS = -1");
        let result = SimulationConfig::from_raw(&RawConfig::parse(&text));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key: KEY_PERIODS, .. })));
    }

    #[test]
    fn test_zero_natality_rejected() {
        let text = FULL.replace("NATALIDADE = 50", "NATALIDADE = 0");
        let result = SimulationConfig::from_raw(&RawConfig::parse(&text));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key: KEY_NATALITY, .. })));
    }

    #[test]
    fn test_rejected_value_surfaces() {
        let text = FULL.replace("SALARIO_BASE = 1000", "SALARIO_BASE = mil");
        let result = SimulationConfig::from_raw(&RawConfig::parse(&text));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key: KEY_BASE_SALARY, .. })));
    }

    #[test]
    fn test_empty_config_reports_missing_key() {
        let result = SimulationConfig::from_raw(&RawConfig::default());
        assert!(matches!(result, Err(ConfigError::MissingKey(_))));
    }
}
