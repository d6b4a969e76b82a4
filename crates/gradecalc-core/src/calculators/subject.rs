use serde::{Deserialize, Serialize};

use super::{entries, remove_entry, slot_mut, Calculator};
use crate::error::CalcError;
use crate::model::{AverageResult, CalculatorKind, Field, ScoreEntry};
use crate::weighted::{weighted_average, WeightedTerm};

pub const REGULAR_COEFFICIENT: f64 = 1.0;
pub const MIDTERM_COEFFICIENT: f64 = 2.0;
pub const FINAL_COEFFICIENT: f64 = 3.0;

/// Oral plus 15-minute tests are usually four columns.
const DEFAULT_REGULAR_SLOTS: usize = 4;

/// Average for one subject.
///
/// Coefficient-1 scores are optional (blank or unparseable slots are
/// dropped, never counted as zero); midterm and final are mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAverageCalculator {
    regulars: Vec<ScoreEntry>,
    midterm: ScoreEntry,
    final_exam: ScoreEntry,
}

impl Default for SubjectAverageCalculator {
    fn default() -> Self {
        Self {
            regulars: vec![ScoreEntry::empty(); DEFAULT_REGULAR_SLOTS],
            midterm: ScoreEntry::empty(),
            final_exam: ScoreEntry::empty(),
        }
    }
}

impl SubjectAverageCalculator {
    /// Build a calculator from raw text. An empty regular list still gets one
    /// blank slot.
    pub fn from_raw<I, S>(regulars: I, midterm: &str, final_exam: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut regulars = entries(regulars);
        if regulars.is_empty() {
            regulars.push(ScoreEntry::empty());
        }
        Self {
            regulars,
            midterm: ScoreEntry::new(midterm),
            final_exam: ScoreEntry::new(final_exam),
        }
    }

    pub fn regulars(&self) -> &[ScoreEntry] {
        &self.regulars
    }

    pub fn midterm(&self) -> &ScoreEntry {
        &self.midterm
    }

    pub fn final_exam(&self) -> &ScoreEntry {
        &self.final_exam
    }
}

impl Calculator for SubjectAverageCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Subject
    }

    fn compute(&self) -> AverageResult {
        let midterm = self.midterm.value()?;
        let final_exam = self.final_exam.value()?;

        let regulars = self
            .regulars
            .iter()
            .filter_map(ScoreEntry::value)
            .map(|v| WeightedTerm::new(v, REGULAR_COEFFICIENT));

        weighted_average(regulars.chain([
            WeightedTerm::new(midterm, MIDTERM_COEFFICIENT),
            WeightedTerm::new(final_exam, FINAL_COEFFICIENT),
        ]))
    }

    fn update(&mut self, field: Field, raw: &str) -> Result<AverageResult, CalcError> {
        match field {
            Field::Regular(i) => slot_mut(&mut self.regulars, i)?.set(raw),
            Field::Midterm => self.midterm.set(raw),
            Field::Final => self.final_exam.set(raw),
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
        self.regulars.len()
    }

    fn add_slot(&mut self) -> Result<AverageResult, CalcError> {
        self.regulars.push(ScoreEntry::empty());
        Ok(self.compute())
    }

    fn remove_slot(&mut self, index: usize) -> Result<AverageResult, CalcError> {
        if self.regulars.len() == 1 && index == 0 {
            return Err(CalcError::LastSlot);
        }
        remove_entry(&mut self.regulars, index)?;
        Ok(self.compute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: AverageResult, expected: f64) {
        let actual = actual.expect("expected a result");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn weighs_regular_midterm_and_final() {
        let calc = SubjectAverageCalculator::from_raw(["8", "9"], "7", "6");
        assert_close(calc.compute(), 7.0);
    }

    #[test]
    fn blank_regulars_are_dropped_not_zeroed() {
        let calc = SubjectAverageCalculator::from_raw(["8", "", "9", "abc"], "7", "6");
        assert_close(calc.compute(), 7.0);
    }

    #[test]
    fn no_regulars_uses_midterm_and_final_only() {
        let calc = SubjectAverageCalculator::from_raw(Vec::<String>::new(), "5", "10");
        assert_close(calc.compute(), 8.0);
        assert_eq!(calc.regulars().len(), 1);
    }

    #[test]
    fn missing_midterm_is_none() {
        let calc = SubjectAverageCalculator::from_raw(["10", "10", "10"], "", "8");
        assert_eq!(calc.compute(), None);
    }

    #[test]
    fn missing_final_is_none() {
        let calc = SubjectAverageCalculator::from_raw(["10"], "8", "n/a");
        assert_eq!(calc.compute(), None);
    }

    #[test]
    fn overflow_is_none() {
        let calc = SubjectAverageCalculator::from_raw(Vec::<String>::new(), "1e308", "1e308");
        assert_eq!(calc.compute(), None);
    }

    #[test]
    fn update_recomputes() {
        let mut calc = SubjectAverageCalculator::default();
        assert_eq!(calc.update(Field::Midterm, "7").unwrap(), None);
        assert_close(calc.update(Field::Final, "7").unwrap(), 7.0);
        assert_close(calc.update(Field::Regular(0), "2").unwrap(), 37.0 / 6.0);
    }

    #[test]
    fn update_rejects_foreign_field() {
        let mut calc = SubjectAverageCalculator::default();
        assert_eq!(
            calc.update(Field::Math, "9"),
            Err(CalcError::UnknownField {
                kind: CalculatorKind::Subject,
                field: Field::Math,
            })
        );
    }

    #[test]
    fn update_rejects_missing_slot() {
        let mut calc = SubjectAverageCalculator::default();
        assert_eq!(
            calc.update(Field::Regular(4), "9"),
            Err(CalcError::SlotOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn add_and_remove_preserve_order() {
        let mut calc = SubjectAverageCalculator::from_raw(["1", "2", "3"], "", "");
        calc.add_slot().unwrap();
        assert_eq!(calc.regulars().len(), 4);

        calc.remove_slot(1).unwrap();
        let raw: Vec<&str> = calc.regulars().iter().map(ScoreEntry::raw).collect();
        assert_eq!(raw, vec!["1", "3", ""]);
    }

    #[test]
    fn cannot_remove_last_slot() {
        let mut calc = SubjectAverageCalculator::from_raw(["9"], "8", "8");
        assert_eq!(calc.remove_slot(0), Err(CalcError::LastSlot));
        assert_eq!(calc.regulars().len(), 1);
    }
}
