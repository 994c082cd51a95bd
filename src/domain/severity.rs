// src/domain/severity.rs

use serde::Serialize;

/// Severity tier of a case, derived only from its estimated delay in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// `>= 3` is high, `[1, 3)` is medium, everything else is low.
    pub fn classify(delay_days: f64) -> Self {
        if delay_days >= 3.0 {
            Severity::High
        } else if delay_days >= 1.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::High => "#FF0000",
            Severity::Medium => "#FFA500",
            Severity::Low => "#FFD700",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}
