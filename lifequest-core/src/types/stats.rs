//! Per-quest outcome counts with a smoothing prior

use serde::{Deserialize, Serialize};

/// Success and failure counts for one quest.
///
/// Counts start at `{1, 1}` rather than zero so the Beta posterior built
/// from them always has shape parameters of at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestStats {
    pub success: u32,
    pub fail: u32,
}

impl Default for QuestStats {
    fn default() -> Self {
        Self {
            success: 1,
            fail: 1,
        }
    }
}

impl QuestStats {
    pub fn new(success: u32, fail: u32) -> Self {
        Self { success, fail }
    }

    /// Beta alpha parameter
    pub fn alpha(&self) -> f64 {
        1.0 + f64::from(self.success)
    }

    /// Beta beta parameter
    pub fn beta(&self) -> f64 {
        1.0 + f64::from(self.fail)
    }

    pub fn total(&self) -> u64 {
        u64::from(self.success) + u64::from(self.fail)
    }

    /// Observed success rate; 1.0 when nothing has been recorded
    pub fn success_rate(&self) -> f64 {
        match self.total() {
            0 => 1.0,
            total => f64::from(self.success) / total as f64,
        }
    }

    /// Posterior mean `alpha / (alpha + beta)`
    pub fn mean_success_probability(&self) -> f64 {
        self.alpha() / (self.alpha() + self.beta())
    }

    pub fn record_success(&mut self) {
        self.success = self.success.saturating_add(1);
    }

    pub fn record_failure(&mut self) {
        self.fail = self.fail.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_laplace_prior() {
        let stats = QuestStats::default();
        assert_eq!(stats, QuestStats::new(1, 1));
        assert_eq!(stats.total(), 2);
    }

    #[test]
    fn test_fresh_mean_is_one_half() {
        let stats = QuestStats::default();
        assert!((stats.alpha() - 2.0).abs() < f64::EPSILON);
        assert!((stats.beta() - 2.0).abs() < f64::EPSILON);
        assert!((stats.mean_success_probability() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_moves_toward_successes() {
        let stats = QuestStats::new(8, 1);
        // alpha = 9, beta = 2
        assert!((stats.mean_success_probability() - 9.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_success_rate() {
        assert!((QuestStats::new(3, 1).success_rate() - 0.75).abs() < f64::EPSILON);
        assert!((QuestStats::new(0, 0).success_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_outcomes() {
        let mut stats = QuestStats::default();
        stats.record_success();
        stats.record_failure();
        stats.record_failure();
        assert_eq!(stats, QuestStats::new(2, 3));
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_string(&QuestStats::new(4, 2)).unwrap();
        assert_eq!(json, r#"{"success":4,"fail":2}"#);
    }
}
