//! Task importance.
//!
//! Tasks arrive with importance either as a category ("High", "Medium",
//! "Low") or as a number on the 1-10 slider scale. Both are folded into one
//! [`Importance`] value and resolved through [`Importance::weight`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categorical importance level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ImportanceLevel {
    High,
    Medium,
    Low,
}

impl ImportanceLevel {
    /// Numeric weight on the 1-10 scale.
    pub fn weight(self) -> f64 {
        match self {
            ImportanceLevel::High => 10.0,
            ImportanceLevel::Medium => 5.0,
            ImportanceLevel::Low => 2.0,
        }
    }

    /// Tier used by the plain task list (higher first).
    pub fn rank(self) -> u8 {
        match self {
            ImportanceLevel::High => 3,
            ImportanceLevel::Medium => 2,
            ImportanceLevel::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImportanceLevel::High => "High",
            ImportanceLevel::Medium => "Medium",
            ImportanceLevel::Low => "Low",
        }
    }
}

impl fmt::Display for ImportanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportanceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("high") {
            Ok(ImportanceLevel::High)
        } else if s.eq_ignore_ascii_case("medium") {
            Ok(ImportanceLevel::Medium)
        } else if s.eq_ignore_ascii_case("low") {
            Ok(ImportanceLevel::Low)
        } else {
            Err(format!("unknown importance level: {s}"))
        }
    }
}

/// Importance as stored on a task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawImportance", into = "RawImportance")]
pub enum Importance {
    /// One of the three known categories.
    Categorical(ImportanceLevel),
    /// Slider value, nominally 1-10.
    Numeric(f64),
    /// Free-form text that is not exactly a known category.
    Label(String),
}

impl Importance {
    /// Resolve to a positive numeric weight on the 1-10 scale.
    ///
    /// Free-form labels are matched by case-insensitive substring, so
    /// "Very High" weighs the same as `High`. Anything unresolvable weighs 1.
    pub fn weight(&self) -> f64 {
        match self {
            Importance::Categorical(level) => level.weight(),
            Importance::Numeric(value) if value.is_finite() && *value > 0.0 => *value,
            Importance::Numeric(_) => 1.0,
            Importance::Label(label) => {
                let label = label.to_lowercase();
                if label.contains("high") {
                    ImportanceLevel::High.weight()
                } else if label.contains("medium") {
                    ImportanceLevel::Medium.weight()
                } else if label.contains("low") {
                    ImportanceLevel::Low.weight()
                } else {
                    tracing::debug!(label = %label, "unrecognized importance label, using weight 1");
                    1.0
                }
            }
        }
    }

    /// Tier used by the plain task list. Non-categorical values sit in the
    /// middle tier.
    pub fn rank(&self) -> u8 {
        match self {
            Importance::Categorical(level) => level.rank(),
            _ => ImportanceLevel::Medium.rank(),
        }
    }

    /// Normalize a slider value into a category, as done when a task is
    /// created from the numeric input.
    pub fn from_slider(value: f64) -> Self {
        let level = if value >= 8.0 {
            ImportanceLevel::High
        } else if value >= 4.0 {
            ImportanceLevel::Medium
        } else {
            ImportanceLevel::Low
        };
        Importance::Categorical(level)
    }
}

impl Default for Importance {
    fn default() -> Self {
        Importance::Categorical(ImportanceLevel::Medium)
    }
}

impl From<ImportanceLevel> for Importance {
    fn from(level: ImportanceLevel) -> Self {
        Importance::Categorical(level)
    }
}

impl From<&str> for Importance {
    fn from(text: &str) -> Self {
        match text.parse::<ImportanceLevel>() {
            Ok(level) => Importance::Categorical(level),
            Err(_) => Importance::Label(text.to_string()),
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Importance::Categorical(level) => write!(f, "{level}"),
            Importance::Numeric(value) => write!(f, "{value}"),
            Importance::Label(label) => f.write_str(label),
        }
    }
}

/// Wire shape: a JSON string, a JSON number, or null.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawImportance {
    Number(f64),
    Text(String),
    Missing,
}

impl From<RawImportance> for Importance {
    fn from(raw: RawImportance) -> Self {
        match raw {
            RawImportance::Number(value) => Importance::Numeric(value),
            RawImportance::Text(text) => Importance::from(text.as_str()),
            RawImportance::Missing => Importance::default(),
        }
    }
}

impl From<Importance> for RawImportance {
    fn from(importance: Importance) -> Self {
        match importance {
            Importance::Categorical(level) => RawImportance::Text(level.as_str().to_string()),
            Importance::Numeric(value) => RawImportance::Number(value),
            Importance::Label(label) => RawImportance::Text(label),
        }
    }
}
