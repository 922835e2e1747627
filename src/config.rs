//! Session configuration: seed state, mode defaults and the toggle policy.
//!
//! Every key is optional; anything missing falls back to the built-in seed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::amount::{Amount, Rate};
use crate::model::{Budget, Debt, Mode, WorkShift};
use crate::session::{ModeDefaults, Progress, TogglePolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("seed degree progress {0} is above 100")]
    DegreeOutOfRange(u8),

    #[error("hourly rate must be positive, got {0}")]
    InvalidHourlyRate(Amount),
}

/// Everything needed to start a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pay per hour, used for earnings and "hours of work" conversions.
    pub hourly_rate: Amount,
    pub policy: TogglePolicy,
    pub seed: Seed,
    pub defaults: ModeDefaults,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hourly_rate: Amount::from_float(8.5),
            policy: TogglePolicy::default(),
            seed: Seed::default(),
            defaults: ModeDefaults::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed.degree_progress > Progress::MAX_DEGREE {
            return Err(ConfigError::DegreeOutOfRange(self.seed.degree_progress));
        }
        if self.hourly_rate <= Amount::ZERO {
            return Err(ConfigError::InvalidHourlyRate(self.hourly_rate));
        }
        Ok(())
    }
}

/// Initial session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub mode: Mode,
    pub work_hours: f64,
    pub credit_score: i32,
    pub degree_progress: u8,
    /// In display order, most recent first.
    pub shifts: Vec<WorkShift>,
    pub debts: Vec<Debt>,
    pub budget: Budget,
}

impl Default for Seed {
    fn default() -> Self {
        let shift = |id, date: &str, hours, location: &str| WorkShift {
            id,
            date: date.to_string(),
            hours,
            location: location.to_string(),
        };
        let inr = Rate::from_float(0.00862);

        Self {
            mode: Mode::Term,
            work_hours: 18.0,
            credit_score: 580,
            degree_progress: 35,
            shifts: vec![
                shift(1, "2025-11-20", 6.0, "Costa Coffee"),
                shift(2, "2025-11-22", 8.0, "Costa Coffee"),
                shift(3, "2025-11-23", 4.0, "Library Support"),
            ],
            debts: vec![
                Debt::local(1, "Monzo Flex", Amount::from_float(150.0), "GBP"),
                Debt::foreign(2, "Student Loan", Amount::from_float(3_500_000.0), "INR", inr),
                Debt::foreign(3, "Credit Card", Amount::from_float(85_000.0), "INR", inr),
            ],
            budget: Budget {
                monthly_income: Amount::from_float(800.0),
                rent: Amount::from_float(400.0),
                bills: Amount::from_float(60.0),
                tuition: Amount::from_float(100.0),
                visa_buffer: Amount::from_float(100.0),
                debt_repayment: Amount::from_float(50.0),
            },
        }
    }
}

/// Parse and validate a TOML config.
pub fn load_config_from_str(toml_content: &str) -> Result<SessionConfig, ConfigError> {
    let config: SessionConfig = toml::from_str(toml_content)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a TOML config file.
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<SessionConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_config_from_str(&content)
}
