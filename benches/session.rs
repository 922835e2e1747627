use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use visa_budget::{Action, Amount, Budget, Mode, Session, ShiftEntry, Summary};

/// Generates a plausible stream of user actions.
///
/// Pattern (repeating):
/// 1. Log a 2 hour shift
/// 2. Log a 3 hour shift
/// 3. Report rent
/// 4. Edit the budget
/// 5. Toggle the mode
pub struct ActionGenerator {
    remaining: u32,
    step: u32,
}

impl ActionGenerator {
    pub fn new(count: u32) -> Self {
        Self {
            remaining: count,
            step: 0,
        }
    }
}

impl Iterator for ActionGenerator {
    type Item = Action;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let action = match self.step % 5 {
            0 => Action::LogShift(ShiftEntry::new(2.0, "Costa Coffee", "2025-11-24")),
            1 => Action::LogShift(ShiftEntry::new(3.0, "Library Support", "2025-11-25")),
            2 => Action::ReportRent,
            3 => Action::UpdateBudget(Budget {
                monthly_income: Amount::from_float(900.0),
                rent: Amount::from_float(450.0),
                bills: Amount::from_float(80.0),
                tuition: Amount::from_float(100.0),
                visa_buffer: Amount::from_float(100.0),
                debt_repayment: Amount::from_float(60.0),
            }),
            _ if self.step % 10 == 4 => Action::ToggleMode(Mode::Holiday),
            _ => Action::ToggleMode(Mode::Term),
        };
        self.step += 1;

        Some(action)
    }
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");

    for count in [1_000u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut session = Session::default();
                for action in ActionGenerator::new(count) {
                    session.apply(black_box(action));
                }
                session
            });
        });
    }

    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit");

    for count in [1_000u32, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut session = Session::default();
                for action in ActionGenerator::new(count) {
                    let _ = black_box(session.submit(action));
                }
                session
            });
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let mut session = Session::default();
    for action in ActionGenerator::new(10_000) {
        session.apply(action);
    }

    c.bench_function("summary_10k_shifts", |b| {
        b.iter(|| Summary::of(black_box(&session)));
    });
}

criterion_group!(benches, bench_apply, bench_submit, bench_summary);
criterion_main!(benches);
