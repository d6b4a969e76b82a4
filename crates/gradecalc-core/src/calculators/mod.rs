//! The four grade calculators.
//!
//! Each calculator exclusively owns its input set. Mutations return the
//! recomputed result so the caller can report it upward; nothing is shared
//! between calculators.

mod semester;
mod subject;
mod target;
mod yearly;

pub use semester::SemesterAverageCalculator;
pub use subject::SubjectAverageCalculator;
pub use target::TargetScoreCalculator;
pub use yearly::YearlyAverageCalculator;

use crate::error::CalcError;
use crate::model::{AverageResult, CalculatorKind, Field, ScoreEntry};
use crate::notify::ResultListener;

/// Common interface of every calculator tool.
pub trait Calculator: Send + Sync {
    /// Which tool this is.
    fn kind(&self) -> CalculatorKind;

    /// Evaluate the formula over the current inputs.
    fn compute(&self) -> AverageResult;

    /// Replace the raw text of one field and recompute.
    fn update(&mut self, field: Field, raw: &str) -> Result<AverageResult, CalcError>;

    /// Number of slots in the resizable score list (zero when there is none).
    fn slot_count(&self) -> usize {
        0
    }

    /// Append an empty slot to the resizable score list and recompute.
    fn add_slot(&mut self) -> Result<AverageResult, CalcError> {
        Err(CalcError::NoSlots(self.kind()))
    }

    /// Remove a slot from the resizable score list and recompute.
    fn remove_slot(&mut self, _index: usize) -> Result<AverageResult, CalcError> {
        Err(CalcError::NoSlots(self.kind()))
    }

    /// Recompute and report the outcome to `listener`.
    fn recompute(&self, listener: &mut dyn ResultListener) -> AverageResult {
        let result = self.compute();
        match result {
            Some(value) => listener.on_result_change(value),
            None => listener.on_result_cleared(),
        }
        result
    }
}

/// Create a calculator in its initial state.
pub fn new_calculator(kind: CalculatorKind) -> Box<dyn Calculator> {
    match kind {
        CalculatorKind::Subject => Box::new(SubjectAverageCalculator::default()),
        CalculatorKind::Semester => Box::new(SemesterAverageCalculator::default()),
        CalculatorKind::Yearly => Box::new(YearlyAverageCalculator::default()),
        CalculatorKind::Target => Box::new(TargetScoreCalculator::default()),
    }
}

fn slot_mut(slots: &mut [ScoreEntry], index: usize) -> Result<&mut ScoreEntry, CalcError> {
    let len = slots.len();
    slots
        .get_mut(index)
        .ok_or(CalcError::SlotOutOfRange { index, len })
}

fn remove_entry(slots: &mut Vec<ScoreEntry>, index: usize) -> Result<(), CalcError> {
    if index >= slots.len() {
        return Err(CalcError::SlotOutOfRange {
            index,
            len: slots.len(),
        });
    }
    slots.remove(index);
    Ok(())
}

fn entries<I, S>(raw: I) -> Vec<ScoreEntry>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    raw.into_iter().map(ScoreEntry::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::ResultEvent;

    #[test]
    fn factory_builds_requested_kind() {
        for kind in CalculatorKind::ALL {
            assert_eq!(new_calculator(kind).kind(), kind);
        }
    }

    #[test]
    fn fresh_calculators_have_no_result() {
        for kind in CalculatorKind::ALL {
            assert_eq!(new_calculator(kind).compute(), None, "{kind}");
        }
    }

    #[test]
    fn recompute_notifies_every_time() {
        let mut calc = new_calculator(CalculatorKind::Yearly);
        calc.update(Field::Semester1, "6").unwrap();
        calc.update(Field::Semester2, "9").unwrap();

        let mut events: Vec<ResultEvent> = Vec::new();
        let first = calc.recompute(&mut events);
        let second = calc.recompute(&mut events);

        assert_eq!(first, Some(8.0));
        assert_eq!(first.map(f64::to_bits), second.map(f64::to_bits));
        assert_eq!(
            events,
            vec![ResultEvent::Changed(8.0), ResultEvent::Changed(8.0)]
        );
    }

    #[test]
    fn recompute_reports_cleared() {
        let calc = new_calculator(CalculatorKind::Subject);
        let mut events: Vec<ResultEvent> = Vec::new();
        assert_eq!(calc.recompute(&mut events), None);
        assert_eq!(events, vec![ResultEvent::Cleared]);
    }

    #[test]
    fn overflow_clears_instead_of_reporting_inf() {
        let calc = YearlyAverageCalculator::from_raw("1e308", "1e308");
        let mut events: Vec<ResultEvent> = Vec::new();
        assert_eq!(calc.recompute(&mut events), None);
        assert_eq!(events, vec![ResultEvent::Cleared]);
    }

    #[test]
    fn fixed_calculators_have_no_slots() {
        let mut calc = new_calculator(CalculatorKind::Target);
        assert_eq!(
            calc.add_slot(),
            Err(CalcError::NoSlots(CalculatorKind::Target))
        );
        assert_eq!(
            calc.remove_slot(0),
            Err(CalcError::NoSlots(CalculatorKind::Target))
        );
        assert_eq!(calc.slot_count(), 0);
    }

    #[test]
    fn initial_slot_counts() {
        assert_eq!(new_calculator(CalculatorKind::Subject).slot_count(), 4);
        assert_eq!(new_calculator(CalculatorKind::Semester).slot_count(), 5);
        assert_eq!(new_calculator(CalculatorKind::Yearly).slot_count(), 0);
    }
}
