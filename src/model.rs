//! Core domain types for the finance session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::amount::{Amount, Rate};

/// Work shift identifier.
pub type ShiftId = u32;

/// Debt identifier.
pub type DebtId = u32;

/// Visa period. Governs the weekly work-hour ceiling and the budget defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Term,
    Holiday,
}

impl Mode {
    /// Weekly work-hour ceiling for this period.
    pub fn weekly_limit(self) -> f64 {
        match self {
            Mode::Term => 20.0,
            Mode::Holiday => 40.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Term => "term",
            Mode::Holiday => "holiday",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged shift. Never edited once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkShift {
    pub id: ShiftId,
    pub date: String,
    pub hours: f64,
    pub location: String,
}

/// Shift details as submitted by a form, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftEntry {
    pub hours: f64,
    pub location: String,
    pub date: String,
}

impl ShiftEntry {
    pub fn new(hours: f64, location: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            hours,
            location: location.into(),
            date: date.into(),
        }
    }
}

/// Whether a debt is held in the local currency or needs conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DebtKind {
    Local,
    Foreign {
        original_amount: Amount,
        /// Native-currency to local-currency multiplier.
        exchange_rate: Rate,
    },
}

/// An outstanding debt in its native currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    pub name: String,
    pub amount: Amount,
    pub currency: String,
    #[serde(flatten)]
    pub kind: DebtKind,
}

impl Debt {
    pub fn local(id: DebtId, name: impl Into<String>, amount: Amount, currency: &str) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            currency: currency.to_string(),
            kind: DebtKind::Local,
        }
    }

    pub fn foreign(
        id: DebtId,
        name: impl Into<String>,
        amount: Amount,
        currency: &str,
        exchange_rate: Rate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            currency: currency.to_string(),
            kind: DebtKind::Foreign {
                original_amount: amount,
                exchange_rate,
            },
        }
    }
}

/// Budget expense line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Rent,
    Bills,
    Tuition,
    VisaBuffer,
    DebtRepayment,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Rent,
        ExpenseCategory::Bills,
        ExpenseCategory::Tuition,
        ExpenseCategory::VisaBuffer,
        ExpenseCategory::DebtRepayment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Bills => "Bills & Utilities",
            ExpenseCategory::Tuition => "Tuition Allocation",
            ExpenseCategory::VisaBuffer => "Visa Buffer",
            ExpenseCategory::DebtRepayment => "Debt Repayment",
        }
    }
}

/// Monthly allocation. Expenses may exceed income; nothing here is validated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Budget {
    pub monthly_income: Amount,
    pub rent: Amount,
    pub bills: Amount,
    pub tuition: Amount,
    pub visa_buffer: Amount,
    pub debt_repayment: Amount,
}

impl Budget {
    pub fn expense(&self, category: ExpenseCategory) -> Amount {
        match category {
            ExpenseCategory::Rent => self.rent,
            ExpenseCategory::Bills => self.bills,
            ExpenseCategory::Tuition => self.tuition,
            ExpenseCategory::VisaBuffer => self.visa_buffer,
            ExpenseCategory::DebtRepayment => self.debt_repayment,
        }
    }

    /// Expense lines in display order.
    pub fn expenses(&self) -> impl Iterator<Item = (ExpenseCategory, Amount)> + '_ {
        ExpenseCategory::ALL
            .into_iter()
            .map(|category| (category, self.expense(category)))
    }
}

/// An input to the session, as produced by a screen or a replayed log.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch visa period; resets hours and budget defaults.
    ToggleMode(Mode),
    /// Record a worked shift.
    LogShift(ShiftEntry),
    /// Report an on-time rent payment.
    ReportRent,
    /// Replace the whole budget.
    UpdateBudget(Budget),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ToggleMode(_) => "mode toggle",
            Action::LogShift(_) => "shift",
            Action::ReportRent => "rent report",
            Action::UpdateBudget(_) => "budget update",
        }
    }
}
