use std::process::Command;

const HEADER: &str = "mode,work_hours,weekly_limit,severity,remaining_hours,credit_score,credit_tier,degree_progress,shifts,total_debt,remaining,daily_safe_spend,over_budget";

fn run(fixture: &str, config: Option<&str>) -> (String, String, bool) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_visa-budget"));
    command.arg(format!("tests/fixtures/{fixture}"));
    if let Some(config) = config {
        command.arg(format!("tests/fixtures/{config}"));
    }
    let output = command
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn term_week() {
    let (stdout, stderr, success) = run("term_week.csv", None);

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert_eq!(
        lines[1],
        "term,20.0,20.0,rose,0.0,585,Building,40,4,31052.70,90.00,3.00,false"
    );
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run("with_errors.csv", None);

    assert!(success);
    assert!(stderr.contains("unrecognized action 'overtime'"));
    assert!(stderr.contains("shift missing hours"));
    assert!(stderr.contains("hours must be a positive number"));
    assert!(stderr.contains("would exceed the visa work limit, only 2h left this week"));
    assert!(stderr.contains("line 7: rent 1000000000000000 is not a representable amount"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert_eq!(
        lines[1],
        "term,18.0,20.0,rose,2.0,585,Building,38,3,31052.70,90.00,3.00,false"
    );
}

#[test]
fn holiday_round_trip_restores_term_defaults() {
    let (stdout, _, success) = run("holiday_round_trip.csv", None);

    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[1],
        "term,18.0,20.0,rose,2.0,580,Building,37,4,31052.70,90.00,3.00,false"
    );
}

#[test]
fn preserve_policy_keeps_edited_budget() {
    let (stdout, _, success) = run("holiday_round_trip.csv", Some("preserve_budget.toml"));

    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[1],
        "term,18.0,20.0,rose,2.0,700,Good,100,4,31052.70,1040.00,34.67,false"
    );
}

#[test]
fn over_budget_renders_negative_daily_spend() {
    let (stdout, stderr, success) = run("over_budget.csv", None);

    assert!(success);
    assert!(stderr.contains("budget is over-allocated"));
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[1],
        "term,18.0,20.0,rose,2.0,580,Building,35,3,31052.70,-280.00,-9.33,true"
    );
}

#[test]
fn missing_input_fails() {
    let (stdout, stderr, success) = run("does_not_exist.csv", None);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("failed to open"));
}
