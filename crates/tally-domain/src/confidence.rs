//! Per-field extraction confidence

use serde::{Deserialize, Serialize};
use std::fmt;

/// An extracted field of a transaction record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    Vendor,
    Amount,
    Category,
    Type,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::Vendor => "vendor",
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Type => "type",
        };
        write!(f, "{name}")
    }
}

/// Per-field confidence scores in [0.0, 1.0]
///
/// Supplied by the upstream extractor alongside each draft record.
/// Fields the extractor did not report default to 0.0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfidence {
    #[serde(default)]
    pub vendor: f64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub date: f64,
    #[serde(default)]
    pub category: f64,
}

impl FieldConfidence {
    /// Same confidence for every field
    pub fn uniform(value: f64) -> Self {
        Self {
            vendor: value,
            amount: value,
            date: value,
            category: value,
        }
    }

    /// Confidence for a single field; `Type` is structural and always 1.0
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Vendor => self.vendor,
            Field::Amount => self.amount,
            Field::Date => self.date,
            Field::Category => self.category,
            Field::Type => 1.0,
        }
    }
}

/// Human-readable confidence band
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    VeryLow,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            ConfidenceLevel::High
        } else if score >= 0.7 {
            ConfidenceLevel::Medium
        } else if score >= 0.5 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::VeryLow => "Very Low",
        };
        write!(f, "{label}")
    }
}
