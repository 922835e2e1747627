use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::Amount;
use crate::model::{Action, Budget, Mode, ShiftEntry};
use crate::query::Summary;

/// Errors that can occur when reading the action log or writing the summary
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized action '{action}'")]
    UnrecognizedAction { line: usize, action: String },

    #[error("line {line}: {action} missing {field}")]
    MissingField {
        line: usize,
        action: String,
        field: &'static str,
    },

    #[error("line {line}: {field} {value} is not a representable amount")]
    InvalidAmount {
        line: usize,
        field: &'static str,
        value: f64,
    },

    #[error("failed to write summary: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to flush summary: {0}")]
    Flush(#[from] io::Error),
}

#[derive(Debug, Deserialize)]
struct InputRow {
    action: String,
    hours: Option<f64>,
    location: Option<String>,
    date: Option<String>,
    mode: Option<Mode>,
    income: Option<f64>,
    rent: Option<f64>,
    bills: Option<f64>,
    tuition: Option<f64>,
    visa_buffer: Option<f64>,
    debt_repayment: Option<f64>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    mode: Mode,
    work_hours: f64,
    weekly_limit: f64,
    severity: String,
    remaining_hours: f64,
    credit_score: i32,
    credit_tier: String,
    degree_progress: u8,
    shifts: usize,
    total_debt: String,
    remaining: String,
    daily_safe_spend: String,
    over_budget: bool,
}

impl InputRow {
    fn require<T>(
        value: Option<T>,
        line: usize,
        action: &str,
        field: &'static str,
    ) -> Result<T, CsvError> {
        value.ok_or_else(|| CsvError::MissingField {
            line,
            action: action.to_string(),
            field,
        })
    }

    fn into_action(self, line: usize) -> Result<Action, CsvError> {
        let name = self.action.as_str();
        match name {
            "shift" => Ok(Action::LogShift(ShiftEntry {
                hours: Self::require(self.hours, line, name, "hours")?,
                location: Self::require(self.location, line, name, "location")?,
                date: self.date.unwrap_or_default(),
            })),
            "rent" => Ok(Action::ReportRent),
            "mode" => Ok(Action::ToggleMode(Self::require(self.mode, line, name, "mode")?)),
            "budget" => {
                let money = |value: Option<f64>, field| {
                    let value = Self::require(value, line, name, field)?;
                    Amount::checked_from_float(value).ok_or(CsvError::InvalidAmount {
                        line,
                        field,
                        value,
                    })
                };
                Ok(Action::UpdateBudget(Budget {
                    monthly_income: money(self.income, "income")?,
                    rent: money(self.rent, "rent")?,
                    bills: money(self.bills, "bills")?,
                    tuition: money(self.tuition, "tuition")?,
                    visa_buffer: money(self.visa_buffer, "visa_buffer")?,
                    debt_repayment: money(self.debt_repayment, "debt_repayment")?,
                }))
            }
            other => Err(CsvError::UnrecognizedAction {
                line,
                action: other.to_string(),
            }),
        }
    }
}

/// Actions read from a csv file, one result per row
pub struct ActionReader {
    records: csv::DeserializeRecordsIntoIter<File, InputRow>,
    line: usize,
}

impl Iterator for ActionReader {
    type Item = Result<Action, CsvError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        self.line += 1; // 1-indexed, header is line 1
        let line = self.line;
        Some(
            result
                .map_err(|source| CsvError::Parse { line, source })
                .and_then(|row| row.into_action(line)),
        )
    }
}

/// Open an action log
pub fn read_actions(path: impl AsRef<Path>) -> Result<ActionReader, CsvError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.display().to_string(),
            source,
        })?;

    Ok(ActionReader {
        records: reader.into_deserialize(),
        line: 1,
    })
}

/// Write a session summary in csv format
pub fn write_summary(writer: impl io::Write, summary: &Summary) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(writer);

    let row = OutputRow {
        mode: summary.mode,
        work_hours: summary.work_hours,
        weekly_limit: summary.weekly_limit,
        severity: summary.severity.to_string(),
        remaining_hours: summary.remaining_hours,
        credit_score: summary.credit_score,
        credit_tier: summary.credit_tier.to_string(),
        degree_progress: summary.degree_progress,
        shifts: summary.shifts,
        total_debt: format!("{:.2}", summary.total_debt),
        remaining: format!("{:.2}", summary.remaining),
        daily_safe_spend: format!("{:.2}", summary.daily_safe_spend),
        over_budget: summary.over_budget,
    };
    writer.serialize(&row)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "action,hours,location,date,mode,income,rent,bills,tuition,visa_buffer,debt_repayment\n";

    fn write_csv(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(rows.as_bytes()).unwrap();
        file
    }

    fn read(rows: &str) -> Vec<Result<Action, CsvError>> {
        let file = write_csv(rows);
        read_actions(file.path()).unwrap().collect()
    }

    #[test]
    fn read_shift() {
        let results = read("shift,6.5,Costa Coffee,2025-11-24,,,,,,,\n");
        assert_eq!(results.len(), 1);

        let action = results.into_iter().next().unwrap().unwrap();
        assert_eq!(
            action,
            Action::LogShift(ShiftEntry::new(6.5, "Costa Coffee", "2025-11-24"))
        );
    }

    #[test]
    fn read_shift_without_date() {
        let results = read("shift,2,Library,,,,,,,,\n");
        let action = results.into_iter().next().unwrap().unwrap();
        assert_eq!(action, Action::LogShift(ShiftEntry::new(2.0, "Library", "")));
    }

    #[test]
    fn read_rent_and_mode() {
        let results = read("rent,,,,,,,,,,\nmode,,,,holiday,,,,,,\n");
        assert_eq!(results.len(), 2);
        assert_eq!(*results[0].as_ref().unwrap(), Action::ReportRent);
        assert_eq!(
            *results[1].as_ref().unwrap(),
            Action::ToggleMode(Mode::Holiday)
        );
    }

    #[test]
    fn read_budget() {
        let results = read("budget,,,,,800,600,120,200,100,60\n");
        let action = results.into_iter().next().unwrap().unwrap();
        match action {
            Action::UpdateBudget(budget) => {
                assert_eq!(budget.monthly_income, Amount::from_float(800.0));
                assert_eq!(budget.debt_repayment, Amount::from_float(60.0));
            }
            other => panic!("expected budget update, got {other:?}"),
        }
    }

    #[test]
    fn read_with_whitespace() {
        let results = read("shift, 2 , Library , 2025-11-24 ,,,,,,,\n");
        let action = results.into_iter().next().unwrap().unwrap();
        assert_eq!(
            action,
            Action::LogShift(ShiftEntry::new(2.0, "Library", "2025-11-24"))
        );
    }

    #[test]
    fn read_returns_error_for_unknown_action() {
        let results = read("overtime,,,,,,,,,,\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedAction { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_missing_field() {
        let results = read("rent,,,,,,,,,,\nshift,,Library,,,,,,,,\nbudget,,,,,800,,,,,\n");
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1].as_ref().unwrap_err(),
            CsvError::MissingField { line: 3, field: "hours", .. }
        ));
        assert!(matches!(
            results[2].as_ref().unwrap_err(),
            CsvError::MissingField { line: 4, field: "rent", .. }
        ));
    }

    #[test]
    fn read_returns_error_for_unrepresentable_money() {
        let results = read("budget,,,,,800,1e15,60,100,100,50\nbudget,,,,,inf,400,60,100,100,50\n");
        assert!(matches!(
            results[0].as_ref().unwrap_err(),
            CsvError::InvalidAmount { line: 2, field: "rent", .. }
        ));
        assert!(matches!(
            results[1].as_ref().unwrap_err(),
            CsvError::InvalidAmount { line: 3, field: "income", .. }
        ));
    }

    #[test]
    fn read_returns_error_for_bad_mode() {
        let results = read("mode,,,,summer,,,,,,\n");
        assert!(matches!(
            results[0].as_ref().unwrap_err(),
            CsvError::Parse { line: 2, .. }
        ));
    }

    #[test]
    fn read_missing_file_fails() {
        assert!(matches!(
            read_actions("/nonexistent/actions.csv"),
            Err(CsvError::Open { .. })
        ));
    }

    #[test]
    fn write_seeded_summary() {
        let mut out = Vec::new();
        write_summary(&mut out, &Summary::of(&Session::default())).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "mode,work_hours,weekly_limit,severity,remaining_hours,credit_score,credit_tier,degree_progress,shifts,total_debt,remaining,daily_safe_spend,over_budget"
        );
        assert_eq!(
            lines[1],
            "term,18.0,20.0,rose,2.0,580,Building,35,3,31052.70,90.00,3.00,false"
        );
    }
}
