use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_THRESHOLD_PERCENTAGE;

/// Rubric-wide settings applied on top of each position's own configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Threshold used when a position does not define one.
    pub default_threshold_percentage: f64,
    /// Multiplier at or above which a criterion is reported as a strength.
    pub strong_multiplier: f64,
    /// Share of a criterion's max points below which it is named as a weakness.
    pub weak_ratio: f64,
    /// Dedicated pool size for batch scoring; `None` uses the global rayon pool.
    pub worker_threads: Option<usize>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            default_threshold_percentage: DEFAULT_THRESHOLD_PERCENTAGE,
            strong_multiplier: 0.8,
            weak_ratio: 0.5,
            worker_threads: None,
        }
    }
}
