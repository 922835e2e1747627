//! Derived, read-only views over session state.
//!
//! Everything here is a pure function recomputed on each call; nothing is
//! cached. Screens should classify through [`gauge_severity`] and
//! [`credit_tier`] instead of repeating threshold math.

use std::fmt;

use crate::Amount;
use crate::model::{Budget, Debt, DebtKind, ExpenseCategory, Mode, WorkShift};
use crate::session::{ModeDefaults, Session};

/// Days a monthly remainder is spread over.
pub const DAYS_PER_MONTH: i64 = 30;
/// Weeks used to project weekly figures to a month.
pub const WEEKS_PER_MONTH: f64 = 4.0;

/// Three-tier traffic light shared by every gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Emerald,
    Amber,
    Rose,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Emerald => "emerald",
            Severity::Amber => "amber",
            Severity::Rose => "rose",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local-currency value of a debt.
pub fn gbp_equivalent(debt: &Debt) -> Amount {
    match debt.kind {
        DebtKind::Local => debt.amount,
        DebtKind::Foreign { exchange_rate, .. } => debt.amount.convert(exchange_rate),
    }
}

pub fn total_debt<'a>(debts: impl IntoIterator<Item = &'a Debt>) -> Amount {
    debts.into_iter().map(gbp_equivalent).sum()
}

pub fn total_expenses(budget: &Budget) -> Amount {
    budget.expenses().map(|(_, amount)| amount).sum()
}

/// Income left after expenses. Negative when over budget.
pub fn remaining(budget: &Budget) -> Amount {
    budget.monthly_income - total_expenses(budget)
}

pub fn daily_safe_spend(budget: &Budget) -> Amount {
    remaining(budget) / DAYS_PER_MONTH
}

pub fn is_over_budget(budget: &Budget) -> bool {
    remaining(budget).is_negative()
}

/// Expenses as a percentage of income; `None` without income.
pub fn allocation_percent(budget: &Budget) -> Option<f64> {
    total_expenses(budget).percent_of(budget.monthly_income)
}

/// [`allocation_percent`] capped at 100, for progress bars.
pub fn allocation_bar(budget: &Budget) -> Option<f64> {
    allocation_percent(budget).map(|p| p.min(100.0))
}

pub fn category_share(budget: &Budget, category: ExpenseCategory) -> Option<f64> {
    budget.expense(category).percent_of(budget.monthly_income)
}

pub fn weekly_limit(mode: Mode) -> f64 {
    mode.weekly_limit()
}

/// `Rose` from 90% of the limit, `Amber` from 70%, `Emerald` below.
///
/// Both bounds are inclusive. Compared on scaled values so that e.g. 18 of 20
/// lands exactly on the 90% line.
pub fn gauge_severity(hours: f64, limit: f64) -> Severity {
    let scaled = hours * 10.0;
    if scaled >= limit * 9.0 {
        Severity::Rose
    } else if scaled >= limit * 7.0 {
        Severity::Amber
    } else {
        Severity::Emerald
    }
}

/// Near the limit is the same line as the rose tier.
pub fn approaching_limit(hours: f64, limit: f64) -> bool {
    gauge_severity(hours, limit) == Severity::Rose
}

pub fn remaining_hours(hours: f64, limit: f64) -> f64 {
    (limit - hours).max(0.0)
}

pub fn would_exceed_limit(current: f64, extra: f64, limit: f64) -> bool {
    current + extra > limit
}

pub fn weekly_earnings(hours: f64, hourly_rate: Amount) -> Amount {
    Amount::from_float(hours * hourly_rate.to_float())
}

pub fn monthly_earnings(hours: f64, hourly_rate: Amount) -> Amount {
    Amount::from_float(hours * WEEKS_PER_MONTH * hourly_rate.to_float())
}

pub fn monthly_hours(hours: f64) -> f64 {
    hours * WEEKS_PER_MONTH
}

pub fn shift_earnings(shift: &WorkShift, hourly_rate: Amount) -> Amount {
    weekly_earnings(shift.hours, hourly_rate)
}

/// Hours of work it takes to pay for `cost`.
pub fn hours_of_work(cost: Amount, hourly_rate: Amount) -> f64 {
    cost.to_float() / hourly_rate.to_float()
}

pub fn recommended_repayment(defaults: &ModeDefaults, mode: Mode) -> Amount {
    defaults.profile(mode).debt_repayment
}

/// Credit passport band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CreditTier {
    Building,
    Fair,
    Good,
}

impl CreditTier {
    pub fn label(self) -> &'static str {
        match self {
            CreditTier::Building => "Building",
            CreditTier::Fair => "Fair",
            CreditTier::Good => "Good",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            CreditTier::Building => Severity::Rose,
            CreditTier::Fair => Severity::Amber,
            CreditTier::Good => Severity::Emerald,
        }
    }
}

impl fmt::Display for CreditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn credit_tier(score: i32) -> CreditTier {
    if score >= 700 {
        CreditTier::Good
    } else if score >= 600 {
        CreditTier::Fair
    } else {
        CreditTier::Building
    }
}

/// Degree level shown on the profile: one level per 25 points, starting at 1.
pub fn degree_level(progress: u8) -> u8 {
    progress / 25 + 1
}

/// Percentage points left until graduation.
pub fn to_graduation(progress: u8) -> u8 {
    100u8.saturating_sub(progress)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Achievement {
    FirstPayment,
    ConsistentReporter,
    CreditBuilder,
    GraduateReady,
}

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::FirstPayment,
        Achievement::ConsistentReporter,
        Achievement::CreditBuilder,
        Achievement::GraduateReady,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Achievement::FirstPayment => "First Payment",
            Achievement::ConsistentReporter => "Consistent Reporter",
            Achievement::CreditBuilder => "Credit Builder",
            Achievement::GraduateReady => "Graduate Ready",
        }
    }

    pub fn is_unlocked(self, session: &Session) -> bool {
        match self {
            Achievement::FirstPayment => session.rent_reports() >= 1,
            Achievement::ConsistentReporter => session.rent_reports() >= 3,
            Achievement::CreditBuilder => session.credit_score() >= 600,
            Achievement::GraduateReady => degree_level(session.degree_progress()) >= 4,
        }
    }
}

pub fn achievements(session: &Session) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| a.is_unlocked(session))
        .collect()
}

/// Headline values of a session, as one screen would render them.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mode: Mode,
    pub work_hours: f64,
    pub weekly_limit: f64,
    pub severity: Severity,
    pub remaining_hours: f64,
    pub credit_score: i32,
    pub credit_tier: CreditTier,
    pub degree_progress: u8,
    pub shifts: usize,
    pub total_debt: Amount,
    pub remaining: Amount,
    pub daily_safe_spend: Amount,
    pub over_budget: bool,
}

impl Summary {
    pub fn of(session: &Session) -> Self {
        let budget = session.budget();
        Self {
            mode: session.mode(),
            work_hours: session.work_hours(),
            weekly_limit: session.weekly_limit(),
            severity: session.severity(),
            remaining_hours: session.remaining_hours(),
            credit_score: session.credit_score(),
            credit_tier: credit_tier(session.credit_score()),
            degree_progress: session.degree_progress(),
            shifts: session.shifts().count(),
            total_debt: session.total_debt(),
            remaining: remaining(budget),
            daily_safe_spend: daily_safe_spend(budget),
            over_budget: is_over_budget(budget),
        }
    }
}
