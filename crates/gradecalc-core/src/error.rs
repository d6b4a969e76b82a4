//! Calculator error types.
//!
//! Incomplete input is never an error: it yields an empty result. These
//! variants cover structural misuse of a calculator or session instead, such
//! as addressing a field the active tool does not have.

use thiserror::Error;

use crate::model::{CalculatorKind, Field};

/// Errors raised by calculators and the session.
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    /// The field does not belong to the calculator.
    #[error("{kind} calculator has no field {field}")]
    UnknownField { kind: CalculatorKind, field: Field },

    /// A list slot index is past the end of the list.
    #[error("slot {index} out of range ({len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    /// The subject calculator must keep at least one coefficient-1 slot.
    #[error("cannot remove the last remaining slot")]
    LastSlot,

    /// The calculator has no resizable list.
    #[error("{0} calculator has no resizable score list")]
    NoSlots(CalculatorKind),

    /// An advice request is already in flight.
    #[error("an advice request is already pending")]
    AdvicePending,

    /// Advice needs a computed result to talk about.
    #[error("no result to ask advice about")]
    NoResult,
}
