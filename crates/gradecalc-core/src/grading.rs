//! Classification bands and annotations attached to computed results.
//!
//! None of this changes a result; it only describes it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::CalculatorKind;

pub const EXCELLENT_THRESHOLD: f64 = 8.0;
pub const GOOD_THRESHOLD: f64 = 6.5;
pub const PASS_THRESHOLD: f64 = 5.0;
pub const MAX_SCORE: f64 = 10.0;

/// Academic standing for an average on the 0–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Weak,
    Average,
    Good,
    Excellent,
}

impl Standing {
    pub fn of(score: f64) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            Standing::Excellent
        } else if score >= GOOD_THRESHOLD {
            Standing::Good
        } else if score >= PASS_THRESHOLD {
            Standing::Average
        } else {
            Standing::Weak
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standing::Weak => write!(f, "weak"),
            Standing::Average => write!(f, "average"),
            Standing::Good => write!(f, "good"),
            Standing::Excellent => write!(f, "excellent"),
        }
    }
}

/// How achievable a required exam score is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    /// Above the maximum score.
    Unreachable,
    /// Below zero: the goal is met whatever the exam score.
    AlreadySecured,
    Reachable,
}

impl Feasibility {
    pub fn of(required: f64) -> Self {
        if required > MAX_SCORE {
            Feasibility::Unreachable
        } else if required < 0.0 {
            Feasibility::AlreadySecured
        } else {
            Feasibility::Reachable
        }
    }
}

/// Short note shown under a result, depending on the tool.
pub fn annotate(kind: CalculatorKind, score: f64) -> String {
    match kind {
        CalculatorKind::Subject => {
            if score >= PASS_THRESHOLD {
                "Subject passed! Congratulations 🎉".to_string()
            } else {
                "A little more effort needed! 💪".to_string()
            }
        }
        CalculatorKind::Target => match Feasibility::of(score) {
            Feasibility::Unreachable => "⚠️ Tough one! (needs more than 10)".to_string(),
            Feasibility::AlreadySecured => "Already secured! (anything above 0)".to_string(),
            Feasibility::Reachable => "You can do it!".to_string(),
        },
        CalculatorKind::Semester | CalculatorKind::Yearly => {
            honor_banner(kind, score).unwrap_or_default()
        }
    }
}

/// Congratulation banner for an excellent semester or yearly average.
pub fn honor_banner(kind: CalculatorKind, score: f64) -> Option<String> {
    if score < EXCELLENT_THRESHOLD {
        return None;
    }
    let headline = match kind {
        CalculatorKind::Yearly => "Excellent student for the whole year! 🎉",
        CalculatorKind::Semester => "Excellent student this semester! 🏆",
        _ => return None,
    };
    Some(format!("{headline} Final average {score:.2}. Outstanding!"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standing_bands() {
        assert_eq!(Standing::of(8.0), Standing::Excellent);
        assert_eq!(Standing::of(7.99), Standing::Good);
        assert_eq!(Standing::of(6.5), Standing::Good);
        assert_eq!(Standing::of(5.0), Standing::Average);
        assert_eq!(Standing::of(4.99), Standing::Weak);
    }

    #[test]
    fn feasibility_edges() {
        assert_eq!(Feasibility::of(10.0), Feasibility::Reachable);
        assert_eq!(Feasibility::of(10.01), Feasibility::Unreachable);
        assert_eq!(Feasibility::of(0.0), Feasibility::Reachable);
        assert_eq!(Feasibility::of(-2.0), Feasibility::AlreadySecured);
    }

    #[test]
    fn subject_note_depends_on_pass_mark() {
        assert!(annotate(CalculatorKind::Subject, 5.0).contains("passed"));
        assert!(annotate(CalculatorKind::Subject, 4.9).contains("effort"));
    }

    #[test]
    fn banner_only_for_excellent_semester_or_year() {
        assert!(honor_banner(CalculatorKind::Yearly, 8.2).is_some());
        assert!(honor_banner(CalculatorKind::Semester, 7.9).is_none());
        assert!(honor_banner(CalculatorKind::Subject, 9.0).is_none());
        assert_eq!(annotate(CalculatorKind::Semester, 6.0), "");
    }
}
