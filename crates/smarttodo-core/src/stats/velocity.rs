//! Completion velocity buckets.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// How long a task took from creation to completion, in whole days.
///
/// Variants are declared in chart order; `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VelocityBucket {
    SameDay,
    OneDay,
    TwoDays,
    ThreeDays,
    FourDays,
    FiveOrMore,
}

impl VelocityBucket {
    pub const ALL: [VelocityBucket; 6] = [
        VelocityBucket::SameDay,
        VelocityBucket::OneDay,
        VelocityBucket::TwoDays,
        VelocityBucket::ThreeDays,
        VelocityBucket::FourDays,
        VelocityBucket::FiveOrMore,
    ];

    /// Bucket for a creation-to-completion latency.
    ///
    /// Days are truncated, so 47 hours is one day. Negative latencies
    /// (clock skew between writers) count as same day.
    pub fn from_latency(latency: Duration) -> Self {
        match latency.num_days() {
            i64::MIN..=0 => VelocityBucket::SameDay,
            1 => VelocityBucket::OneDay,
            2 => VelocityBucket::TwoDays,
            3 => VelocityBucket::ThreeDays,
            4 => VelocityBucket::FourDays,
            _ => VelocityBucket::FiveOrMore,
        }
    }

    /// Chart label.
    pub fn label(self) -> &'static str {
        match self {
            VelocityBucket::SameDay => "same day",
            VelocityBucket::OneDay => "1 days",
            VelocityBucket::TwoDays => "2 days",
            VelocityBucket::ThreeDays => "3 days",
            VelocityBucket::FourDays => "4 days",
            VelocityBucket::FiveOrMore => "≥5 days",
        }
    }

    /// Inverse of [`VelocityBucket::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.label() == label)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}
