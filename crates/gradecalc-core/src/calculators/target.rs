use serde::{Deserialize, Serialize};

use super::Calculator;
use crate::error::CalcError;
use crate::model::{AverageResult, CalculatorKind, Field, ScoreEntry};

/// Typical coefficient total already counted before the final exam.
pub const DEFAULT_CURRENT_WEIGHT: &str = "7";
/// A final exam usually carries coefficient 3.
pub const DEFAULT_EXAM_WEIGHT: &str = "3";

/// Score the upcoming exam needs so the overall average reaches a target.
///
/// Solves `target = (current * cw + x * fw) / (cw + fw)` for `x`. The result
/// is not clamped: a negative value means the goal is already secured and a
/// value above 10 means it is out of reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetScoreCalculator {
    current_average: ScoreEntry,
    target: ScoreEntry,
    current_weight: ScoreEntry,
    exam_weight: ScoreEntry,
}

impl Default for TargetScoreCalculator {
    fn default() -> Self {
        Self {
            current_average: ScoreEntry::empty(),
            target: ScoreEntry::empty(),
            current_weight: ScoreEntry::new(DEFAULT_CURRENT_WEIGHT),
            exam_weight: ScoreEntry::new(DEFAULT_EXAM_WEIGHT),
        }
    }
}

impl TargetScoreCalculator {
    pub fn from_raw(
        current_average: &str,
        target: &str,
        current_weight: &str,
        exam_weight: &str,
    ) -> Self {
        Self {
            current_average: ScoreEntry::new(current_average),
            target: ScoreEntry::new(target),
            current_weight: ScoreEntry::new(current_weight),
            exam_weight: ScoreEntry::new(exam_weight),
        }
    }
}

impl Calculator for TargetScoreCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Target
    }

    fn compute(&self) -> AverageResult {
        let current = self.current_average.value()?;
        let target = self.target.value()?;
        let cw = self.current_weight.value()?;
        let fw = self.exam_weight.value()?;

        if fw <= 0.0 {
            return None;
        }

        let required = (target * (cw + fw) - current * cw) / fw;
        required.is_finite().then_some(required)
    }

    fn update(&mut self, field: Field, raw: &str) -> Result<AverageResult, CalcError> {
        match field {
            Field::CurrentAverage => self.current_average.set(raw),
            Field::Target => self.target.set(raw),
            Field::CurrentWeight => self.current_weight.set(raw),
            Field::ExamWeight => self.exam_weight.set(raw),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_for_required_exam_score() {
        let required = TargetScoreCalculator::from_raw("7.2", "8.0", "7", "3")
            .compute()
            .unwrap();
        assert!((required - 29.6 / 3.0).abs() < 1e-9, "got {required}");
        assert_eq!(format!("{required:.2}"), "9.87");
    }

    #[test]
    fn unreachable_target_is_returned_unclamped() {
        let required = TargetScoreCalculator::from_raw("5", "9", "7", "3")
            .compute()
            .unwrap();
        assert!(required > 10.0, "got {required}");
    }

    #[test]
    fn exceeded_target_may_be_negative() {
        let required = TargetScoreCalculator::from_raw("9.5", "6", "7", "3")
            .compute()
            .unwrap();
        assert!(required < 0.0, "got {required}");
    }

    #[test]
    fn zero_exam_weight_is_none() {
        assert_eq!(
            TargetScoreCalculator::from_raw("7", "8", "7", "0").compute(),
            None
        );
    }

    #[test]
    fn negative_exam_weight_is_none() {
        assert_eq!(
            TargetScoreCalculator::from_raw("7", "8", "7", "-3").compute(),
            None
        );
    }

    #[test]
    fn defaults_prefill_weights() {
        let mut calc = TargetScoreCalculator::default();
        assert_eq!(calc.update(Field::CurrentAverage, "7.2").unwrap(), None);
        let required = calc.update(Field::Target, "8").unwrap().unwrap();
        assert!((required - 29.6 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn blank_weight_is_none() {
        let mut calc = TargetScoreCalculator::from_raw("7", "8", "7", "3");
        assert_eq!(calc.update(Field::CurrentWeight, "").unwrap(), None);
    }
}
