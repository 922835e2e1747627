/// Gamified standing: credit score, degree progress and rent reports.
///
/// Degree progress never exceeds 100 and never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    credit_score: i32,
    degree: u8,
    rent_reports: u32,
}

impl Progress {
    pub const MAX_DEGREE: u8 = 100;

    pub fn new(credit_score: i32, degree: u8) -> Self {
        Self {
            credit_score,
            degree: degree.min(Self::MAX_DEGREE),
            rent_reports: 0,
        }
    }

    pub fn credit_score(&self) -> i32 {
        self.credit_score
    }

    pub fn degree(&self) -> u8 {
        self.degree
    }

    pub fn rent_reports(&self) -> u32 {
        self.rent_reports
    }

    /// Unclamped; only saturates at the integer limit.
    pub fn raise_credit(&mut self, points: i32) {
        self.credit_score = self.credit_score.saturating_add(points);
    }

    pub fn advance_degree(&mut self, points: u8) {
        self.degree = self.degree.saturating_add(points).min(Self::MAX_DEGREE);
    }

    pub fn record_rent_report(&mut self) {
        self.rent_reports = self.rent_reports.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_degree() {
        assert_eq!(Progress::new(580, 35).degree(), 35);
        assert_eq!(Progress::new(580, 150).degree(), 100);
    }

    #[test]
    fn advance_degree_clamps_at_max() {
        let mut progress = Progress::new(580, 99);
        progress.advance_degree(3);
        assert_eq!(progress.degree(), 100);
        progress.advance_degree(2);
        assert_eq!(progress.degree(), 100);
    }

    #[test]
    fn credit_is_not_clamped_to_score_range() {
        let mut progress = Progress::new(848, 0);
        progress.raise_credit(5);
        assert_eq!(progress.credit_score(), 853);
    }

    #[test]
    fn credit_saturates_at_integer_limit() {
        let mut progress = Progress::new(i32::MAX - 1, 0);
        progress.raise_credit(5);
        assert_eq!(progress.credit_score(), i32::MAX);
    }
}
