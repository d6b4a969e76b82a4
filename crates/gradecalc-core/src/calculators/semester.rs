use serde::{Deserialize, Serialize};

use super::{entries, remove_entry, slot_mut, Calculator};
use crate::error::CalcError;
use crate::model::{AverageResult, CalculatorKind, Field, ScoreEntry};
use crate::weighted::{weighted_average, WeightedTerm};

/// Math, literature and english count double.
pub const CORE_SUBJECT_COEFFICIENT: f64 = 2.0;
pub const OTHER_SUBJECT_COEFFICIENT: f64 = 1.0;

const DEFAULT_OTHER_SLOTS: usize = 5;

/// Semester average across subjects.
///
/// Every field is optional: a blank core subject is left out of both the sum
/// and the coefficient total rather than counted as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterAverageCalculator {
    math: ScoreEntry,
    literature: ScoreEntry,
    english: ScoreEntry,
    others: Vec<ScoreEntry>,
}

impl Default for SemesterAverageCalculator {
    fn default() -> Self {
        Self {
            math: ScoreEntry::empty(),
            literature: ScoreEntry::empty(),
            english: ScoreEntry::empty(),
            others: vec![ScoreEntry::empty(); DEFAULT_OTHER_SLOTS],
        }
    }
}

impl SemesterAverageCalculator {
    pub fn from_raw<I, S>(math: &str, literature: &str, english: &str, others: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            math: ScoreEntry::new(math),
            literature: ScoreEntry::new(literature),
            english: ScoreEntry::new(english),
            others: entries(others),
        }
    }

    pub fn others(&self) -> &[ScoreEntry] {
        &self.others
    }
}

impl Calculator for SemesterAverageCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Semester
    }

    fn compute(&self) -> AverageResult {
        let core = [&self.math, &self.literature, &self.english]
            .into_iter()
            .filter_map(ScoreEntry::value)
            .map(|v| WeightedTerm::new(v, CORE_SUBJECT_COEFFICIENT));

        let others = self
            .others
            .iter()
            .filter_map(ScoreEntry::value)
            .map(|v| WeightedTerm::new(v, OTHER_SUBJECT_COEFFICIENT));

        weighted_average(core.chain(others))
    }

    fn update(&mut self, field: Field, raw: &str) -> Result<AverageResult, CalcError> {
        match field {
            Field::Math => self.math.set(raw),
            Field::Literature => self.literature.set(raw),
            Field::English => self.english.set(raw),
            Field::Other(i) => slot_mut(&mut self.others, i)?.set(raw),
            other => {
                return Err(CalcError::UnknownField {
                    kind: self.kind(),
                    field: other,
                })
            }
        }
        Ok(self.compute())
    }

    fn slot_count(&self) -> usize {
        self.others.len()
    }

    fn add_slot(&mut self) -> Result<AverageResult, CalcError> {
        self.others.push(ScoreEntry::empty());
        Ok(self.compute())
    }

    fn remove_slot(&mut self, index: usize) -> Result<AverageResult, CalcError> {
        remove_entry(&mut self.others, index)?;
        Ok(self.compute())
    }
}
