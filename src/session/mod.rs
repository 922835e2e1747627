//! The financial state of one user session.
//!
//! A [`Session`] owns the visa mode, weekly work hours, credit and degree
//! progress, the shift log, the debt list and the budget. Readers borrow it,
//! mutators need `&mut`. Mutations never fail; input checks live in
//! [`Session::check_shift`] and run only on the [`Session::submit`] path.
//! Also supports an async stream of actions.

use std::collections::VecDeque;
use tokio_stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::Amount;
use crate::config::SessionConfig;
use crate::model::{Action, Budget, Debt, Mode, ShiftEntry, ShiftId, WorkShift};
use crate::query;

mod state;
pub use state::Progress;

mod policy;
pub use policy::{ModeDefaults, ModeProfile, TogglePolicy};

mod error;
pub use error::{SessionError, ShiftFormError};

/// Degree progress earned per logged shift.
const SHIFT_DEGREE_POINTS: u8 = 2;
/// Degree progress earned per rent report.
const RENT_DEGREE_POINTS: u8 = 3;
/// Credit score points per rent report.
const RENT_CREDIT_POINTS: i32 = 5;

/// Session-scoped financial state.
///
/// `work_hours` is a running counter, not the sum of `shifts`: a mode toggle
/// resets it to the mode default. See [`Session::logged_hours`] for the sum.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    work_hours: f64,
    progress: Progress,
    /// Most recent first
    shifts: VecDeque<WorkShift>,
    debts: Vec<Debt>,
    budget: Budget,
    next_shift_id: ShiftId,
    policy: TogglePolicy,
    defaults: ModeDefaults,
    hourly_rate: Amount,
}

/// Public API
impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        let seed = &config.seed;
        let next_shift_id = seed.shifts.iter().map(|s| s.id).max().unwrap_or(0) + 1;

        Self {
            mode: seed.mode,
            work_hours: seed.work_hours,
            progress: Progress::new(seed.credit_score, seed.degree_progress),
            shifts: seed.shifts.iter().cloned().collect(),
            debts: seed.debts.clone(),
            budget: seed.budget,
            next_shift_id,
            policy: config.policy,
            defaults: config.defaults,
            hourly_rate: config.hourly_rate,
        }
    }

    /// Run the session with the given action stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Action> + Unpin) {
        while let Some(action) = stream.next().await {
            // a rejected action must not stop the session
            if let Err(e) = self.submit(action) {
                warn!("{e}");
            }
        }
    }

    /// Validate an action the way a form would, then apply it.
    pub fn submit(&mut self, action: Action) -> Result<(), SessionError> {
        if let Action::LogShift(entry) = &action {
            if let Err(e) = self.check_shift(entry) {
                info!(
                    action = action.name(),
                    hours = entry.hours,
                    reason = %e,
                    "action skipped"
                );
                return Err(e.into());
            }
        }
        self.apply(action);
        Ok(())
    }

    /// Apply a single action on top of the current state. Never fails.
    pub fn apply(&mut self, action: Action) {
        let name = action.name();
        match action {
            Action::ToggleMode(mode) => self.toggle_mode(mode),
            Action::LogShift(ShiftEntry {
                hours,
                location,
                date,
            }) => {
                self.add_shift(hours, location, date);
            }
            Action::ReportRent => self.report_rent(),
            Action::UpdateBudget(budget) => self.update_budget(budget),
        }
        info!(
            action = name,
            mode = %self.mode,
            work_hours = self.work_hours,
            credit_score = self.progress.credit_score(),
            degree_progress = self.progress.degree(),
            "action applied"
        );
    }

    /// Checks a form performs before a shift may be logged:
    /// - hours must be a finite positive number
    /// - location must not be blank
    /// - in term time, the shift must fit under the weekly limit
    ///
    /// During holidays going over the limit is allowed and only logged.
    pub fn check_shift(&self, entry: &ShiftEntry) -> Result<(), ShiftFormError> {
        if !entry.hours.is_finite() || entry.hours <= 0.0 {
            return Err(ShiftFormError::InvalidHours(entry.hours));
        }

        if entry.location.trim().is_empty() {
            return Err(ShiftFormError::MissingLocation);
        }

        let limit = self.weekly_limit();
        if query::would_exceed_limit(self.work_hours, entry.hours, limit) {
            match self.mode {
                Mode::Term => {
                    return Err(ShiftFormError::ExceedsVisaLimit {
                        requested: entry.hours,
                        remaining: query::remaining_hours(self.work_hours, limit),
                    });
                }
                Mode::Holiday => {
                    warn!(
                        work_hours = self.work_hours,
                        requested = entry.hours,
                        limit,
                        "shift goes over the holiday weekly limit"
                    );
                }
            }
        }

        Ok(())
    }

    /// Switch visa period.
    ///
    /// Work hours reset to the mode default. Under
    /// [`TogglePolicy::OverwriteBudget`] monthly income and debt repayment are
    /// also replaced by the mode defaults, discarding manual edits.
    pub fn toggle_mode(&mut self, mode: Mode) {
        let profile = *self.defaults.profile(mode);
        self.mode = mode;
        self.work_hours = profile.work_hours;

        if self.policy.overwrites_budget() {
            self.budget.monthly_income = profile.monthly_income;
            self.budget.debt_repayment = profile.debt_repayment;
        }
    }

    /// Log a shift. No validation: the weekly limit is advisory here.
    pub fn add_shift(
        &mut self,
        hours: f64,
        location: impl Into<String>,
        date: impl Into<String>,
    ) -> ShiftId {
        let id = self.next_shift_id;
        self.next_shift_id += 1;

        self.shifts.push_front(WorkShift {
            id,
            date: date.into(),
            hours,
            location: location.into(),
        });
        self.work_hours += hours;
        self.progress.advance_degree(SHIFT_DEGREE_POINTS);

        id
    }

    /// Report a rent payment. Not idempotent: every call counts.
    pub fn report_rent(&mut self) {
        self.progress.raise_credit(RENT_CREDIT_POINTS);
        self.progress.advance_degree(RENT_DEGREE_POINTS);
        self.progress.record_rent_report();
    }

    /// Replace the whole budget. Negative values and overspending are accepted.
    pub fn update_budget(&mut self, budget: Budget) {
        let remaining = query::remaining(&budget);
        if remaining.is_negative() {
            warn!(
                income = %budget.monthly_income,
                expenses = %query::total_expenses(&budget),
                remaining = %remaining,
                "budget is over-allocated"
            );
        }
        self.budget = budget;
    }
}

/// Read access
impl Session {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn work_hours(&self) -> f64 {
        self.work_hours
    }

    /// Sum of every shift in the log, independent of the weekly counter.
    pub fn logged_hours(&self) -> f64 {
        self.shifts.iter().map(|s| s.hours).sum()
    }

    pub fn credit_score(&self) -> i32 {
        self.progress.credit_score()
    }

    pub fn degree_progress(&self) -> u8 {
        self.progress.degree()
    }

    pub fn rent_reports(&self) -> u32 {
        self.progress.rent_reports()
    }

    /// Shifts, most recently logged first.
    pub fn shifts(&self) -> impl Iterator<Item = &WorkShift> + '_ {
        self.shifts.iter()
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn policy(&self) -> TogglePolicy {
        self.policy
    }

    pub fn defaults(&self) -> &ModeDefaults {
        &self.defaults
    }

    pub fn hourly_rate(&self) -> Amount {
        self.hourly_rate
    }

    pub fn weekly_limit(&self) -> f64 {
        query::weekly_limit(self.mode)
    }

    pub fn severity(&self) -> query::Severity {
        query::gauge_severity(self.work_hours, self.weekly_limit())
    }

    pub fn remaining_hours(&self) -> f64 {
        query::remaining_hours(self.work_hours, self.weekly_limit())
    }

    pub fn total_debt(&self) -> Amount {
        query::total_debt(&self.debts)
    }

    pub fn remaining(&self) -> Amount {
        query::remaining(&self.budget)
    }

    pub fn daily_safe_spend(&self) -> Amount {
        query::daily_safe_spend(&self.budget)
    }

    pub fn weekly_earnings(&self) -> Amount {
        query::weekly_earnings(self.work_hours, self.hourly_rate)
    }

    pub fn recommended_repayment(&self) -> Amount {
        query::recommended_repayment(&self.defaults, self.mode)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
