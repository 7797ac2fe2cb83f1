//! Vital-sign classification and alerting
//!
//! The monitoring engine is made of three pure pieces:
//! - `sampler`: picks the current reading out of a series
//! - `classifier`: maps a patient's current vitals and age to a `Status`
//! - `alerts`: scans a patient collection and produces the alert list

pub mod alerts;
pub mod classifier;
pub mod sampler;

pub use alerts::{scan, Alert, AlertKind, AlertValue};
pub use classifier::{classify, AgeTier, Band};
pub use sampler::latest;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinical status of a patient, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Stable,
    Watch,
    Critical,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Stable => write!(f, "STABLE"),
            Status::Watch => write!(f, "WATCH"),
            Status::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_severity_order() {
        assert!(Status::Critical > Status::Watch);
        assert!(Status::Watch > Status::Stable);
        assert_eq!(serde_json::to_string(&Status::Critical).unwrap(), "\"CRITICAL\"");
        assert_eq!(Status::Watch.to_string(), "WATCH");
    }
}
