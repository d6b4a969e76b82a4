//! gradecalc-core: grade formulas, calculators, and the advice contract.
//!
//! This crate defines the weighted-average formulas, the four calculator
//! tools built on them, the result notification contract, and the traits
//! that advice backends implement.

pub mod calculators;
pub mod error;
pub mod formula;
pub mod grading;
pub mod model;
pub mod notify;
pub mod session;
pub mod traits;
pub mod weighted;

pub use calculators::{new_calculator, Calculator};
pub use error::CalcError;
pub use model::{AverageResult, CalculatorKind, Field, ScoreEntry};
pub use notify::{ResultEvent, ResultListener};
pub use session::{AdvicePhase, AdviceTicket, Session};
