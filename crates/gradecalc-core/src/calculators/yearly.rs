use serde::{Deserialize, Serialize};

use super::Calculator;
use crate::error::CalcError;
use crate::model::{AverageResult, CalculatorKind, Field, ScoreEntry};
use crate::weighted::{weighted_average, WeightedTerm};

pub const SEMESTER1_COEFFICIENT: f64 = 1.0;
pub const SEMESTER2_COEFFICIENT: f64 = 2.0;

/// Whole-year average: `(s1 + 2 * s2) / 3`. Both semesters are mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyAverageCalculator {
    semester1: ScoreEntry,
    semester2: ScoreEntry,
}

impl YearlyAverageCalculator {
    pub fn from_raw(semester1: &str, semester2: &str) -> Self {
        Self {
            semester1: ScoreEntry::new(semester1),
            semester2: ScoreEntry::new(semester2),
        }
    }
}

impl Calculator for YearlyAverageCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Yearly
    }

    fn compute(&self) -> AverageResult {
        let s1 = self.semester1.value()?;
        let s2 = self.semester2.value()?;
        weighted_average([
            WeightedTerm::new(s1, SEMESTER1_COEFFICIENT),
            WeightedTerm::new(s2, SEMESTER2_COEFFICIENT),
        ])
    }

    fn update(&mut self, field: Field, raw: &str) -> Result<AverageResult, CalcError> {
        match field {
            Field::Semester1 => self.semester1.set(raw),
            Field::Semester2 => self.semester2.set(raw),
            other => {
                return Err(CalcError::UnknownField {
                    kind: self.kind(),
                    field: other,
                })
            }
        }
        Ok(self.compute())
    }
}
