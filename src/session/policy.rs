//! What a mode toggle resets, and whether it may touch the budget.

use serde::{Deserialize, Serialize};

use crate::Amount;
use crate::model::Mode;

/// Values a mode toggle installs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeProfile {
    pub work_hours: f64,
    pub monthly_income: Amount,
    pub debt_repayment: Amount,
}

impl ModeProfile {
    pub fn term() -> Self {
        Self {
            work_hours: 18.0,
            monthly_income: Amount::from_float(800.0),
            debt_repayment: Amount::from_float(50.0),
        }
    }

    pub fn holiday() -> Self {
        Self {
            work_hours: 0.0,
            monthly_income: Amount::from_float(1500.0),
            debt_repayment: Amount::from_float(200.0),
        }
    }
}

/// Per-mode reset values.
///
/// Deserializes key by key: a field missing from a `[defaults.<mode>]`
/// table keeps that mode's built-in value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ModeDefaultsFile")]
pub struct ModeDefaults {
    pub term: ModeProfile,
    pub holiday: ModeProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModeDefaultsFile {
    term: ProfileOverrides,
    holiday: ProfileOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileOverrides {
    work_hours: Option<f64>,
    monthly_income: Option<Amount>,
    debt_repayment: Option<Amount>,
}

impl ProfileOverrides {
    fn over(self, base: ModeProfile) -> ModeProfile {
        ModeProfile {
            work_hours: self.work_hours.unwrap_or(base.work_hours),
            monthly_income: self.monthly_income.unwrap_or(base.monthly_income),
            debt_repayment: self.debt_repayment.unwrap_or(base.debt_repayment),
        }
    }
}

impl From<ModeDefaultsFile> for ModeDefaults {
    fn from(file: ModeDefaultsFile) -> Self {
        Self {
            term: file.term.over(ModeProfile::term()),
            holiday: file.holiday.over(ModeProfile::holiday()),
        }
    }
}

impl ModeDefaults {
    pub fn profile(&self, mode: Mode) -> &ModeProfile {
        match mode {
            Mode::Term => &self.term,
            Mode::Holiday => &self.holiday,
        }
    }
}

impl Default for ModeDefaults {
    fn default() -> Self {
        Self {
            term: ModeProfile::term(),
            holiday: ModeProfile::holiday(),
        }
    }
}

/// Precedence between mode defaults and manual budget edits on toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TogglePolicy {
    /// Mode defaults replace income and debt repayment; last writer wins.
    #[default]
    OverwriteBudget,
    /// Only work hours are reset; the budget keeps manual edits.
    PreserveBudget,
}

impl TogglePolicy {
    pub fn overwrites_budget(self) -> bool {
        matches!(self, TogglePolicy::OverwriteBudget)
    }
}
