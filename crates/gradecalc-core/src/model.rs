//! Core data model types for gradecalc.
//!
//! These are the fundamental types shared by every calculator: the raw score
//! entry typed in by the student, the calculator identity, and the addressable
//! input fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a recompute: `None` while any mandatory input is incomplete.
pub type AverageResult = Option<f64>;

/// Parse user-typed score text.
///
/// Surrounding whitespace is ignored. Empty text, non-numeric text and
/// non-finite values (`inf`, `NaN`) are all "not a number".
pub fn parse_score(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A single input value as typed, kept alongside its parsed number.
///
/// Serialized as the raw text only; deserializing re-parses it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ScoreEntry {
    raw: String,
    value: Option<f64>,
}

impl ScoreEntry {
    /// Create an entry from raw text.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = parse_score(&raw);
        Self { raw, value }
    }

    /// Create an empty entry (an unfilled slot).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the raw text and re-parse it.
    pub fn set(&mut self, raw: impl Into<String>) {
        *self = Self::new(raw);
    }

    /// The text exactly as entered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed value, if the text is a finite number.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Whether nothing (other than whitespace) has been entered.
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

impl From<&str> for ScoreEntry {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ScoreEntry {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<ScoreEntry> for String {
    fn from(entry: ScoreEntry) -> Self {
        entry.raw
    }
}

/// The four calculator tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorKind {
    Subject,
    Semester,
    Yearly,
    Target,
}

impl CalculatorKind {
    /// All tools, in menu order.
    pub const ALL: [CalculatorKind; 4] = [
        CalculatorKind::Subject,
        CalculatorKind::Semester,
        CalculatorKind::Yearly,
        CalculatorKind::Target,
    ];

    /// Human-readable tool name.
    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::Subject => "Subject Average",
            CalculatorKind::Semester => "Semester Average",
            CalculatorKind::Yearly => "Yearly Average",
            CalculatorKind::Target => "Target Exam Score",
        }
    }

    /// One-line description shown next to the tool name.
    pub fn description(&self) -> &'static str {
        match self {
            CalculatorKind::Subject => {
                "Average for one subject from oral, 15-minute, midterm and final scores."
            }
            CalculatorKind::Semester => "Semester average across all subjects.",
            CalculatorKind::Yearly => "Whole-year average from both semesters.",
            CalculatorKind::Target => "Score the next exam needs to reach a goal average.",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculatorKind::Subject => write!(f, "subject"),
            CalculatorKind::Semester => write!(f, "semester"),
            CalculatorKind::Yearly => write!(f, "yearly"),
            CalculatorKind::Target => write!(f, "target"),
        }
    }
}

impl FromStr for CalculatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "subject" | "tbm" => Ok(CalculatorKind::Subject),
            "semester" | "tbhk" => Ok(CalculatorKind::Semester),
            "yearly" | "year" | "tbcn" => Ok(CalculatorKind::Yearly),
            "target" => Ok(CalculatorKind::Target),
            other => Err(format!("unknown calculator: {other}")),
        }
    }
}

/// An addressable input of a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Coefficient-1 score slot of the subject calculator.
    Regular(usize),
    Midterm,
    Final,
    Semester1,
    Semester2,
    CurrentAverage,
    Target,
    CurrentWeight,
    ExamWeight,
    Math,
    Literature,
    English,
    /// Coefficient-1 subject slot of the semester calculator.
    Other(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Regular(i) => write!(f, "regular[{i}]"),
            Field::Midterm => write!(f, "midterm"),
            Field::Final => write!(f, "final"),
            Field::Semester1 => write!(f, "semester1"),
            Field::Semester2 => write!(f, "semester2"),
            Field::CurrentAverage => write!(f, "current_average"),
            Field::Target => write!(f, "target"),
            Field::CurrentWeight => write!(f, "current_weight"),
            Field::ExamWeight => write!(f, "exam_weight"),
            Field::Math => write!(f, "math"),
            Field::Literature => write!(f, "literature"),
            Field::English => write!(f, "english"),
            Field::Other(i) => write!(f, "other[{i}]"),
        }
    }
}
