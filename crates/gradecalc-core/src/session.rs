//! The active-tool session.
//!
//! A session owns exactly one calculator and the latest result. Every
//! mutation recomputes, replaces the current result wholesale and notifies the
//! listener. Switching tools discards the old calculator and its result.
//!
//! The session also tracks the advice exchange so that at most one request
//! is outstanding at a time:
//!
//! ```text
//! Idle ──begin_advice──▶ Pending ──finish_advice──▶ Resolved | Rejected
//!   ▲                                                   │
//!   └──────────────── switch_tool / begin_advice ◀──────┘
//! ```

use tracing::{debug, info};

use crate::calculators::{new_calculator, Calculator};
use crate::error::CalcError;
use crate::model::{AverageResult, CalculatorKind, Field};
use crate::notify::ResultListener;
use crate::traits::{AdviceRequest, AdviceResponse};

/// Where the advice exchange stands.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvicePhase {
    Idle,
    Pending,
    /// Advice text was delivered.
    Resolved(AdviceResponse),
    /// A fallback message came back instead of advice.
    Rejected(AdviceResponse),
}

/// Proof that an advice request was started, carrying what to send.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceTicket {
    generation: u64,
    pub request: AdviceRequest,
}

/// Single-writer holder of the active calculator and its result.
pub struct Session<L: ResultListener> {
    calculator: Box<dyn Calculator>,
    current: AverageResult,
    advice: AdvicePhase,
    /// Bumped on every tool switch so stale advice is ignored.
    generation: u64,
    listener: L,
}

impl<L: ResultListener> Session<L> {
    /// Start a session on `kind` with a fresh calculator.
    pub fn new(kind: CalculatorKind, listener: L) -> Self {
        Self {
            calculator: new_calculator(kind),
            current: None,
            advice: AdvicePhase::Idle,
            generation: 0,
            listener,
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        self.calculator.kind()
    }

    /// Latest result of the active calculator.
    pub fn current(&self) -> AverageResult {
        self.current
    }

    pub fn calculator(&self) -> &dyn Calculator {
        self.calculator.as_ref()
    }

    pub fn advice(&self) -> &AdvicePhase {
        &self.advice
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Replace the active calculator with a fresh `kind` calculator.
    pub fn switch_tool(&mut self, kind: CalculatorKind) {
        info!(from = %self.kind(), to = %kind, "switching tool");
        self.calculator = new_calculator(kind);
        self.current = None;
        self.advice = AdvicePhase::Idle;
        self.generation += 1;
        self.listener.on_result_cleared();
    }

    /// Set the raw text of one field.
    pub fn edit(&mut self, field: Field, raw: &str) -> Result<AverageResult, CalcError> {
        debug!(%field, raw, "edit");
        let result = self.calculator.update(field, raw)?;
        Ok(self.publish(result))
    }

    /// Append an empty slot to the active calculator's score list.
    pub fn add_slot(&mut self) -> Result<AverageResult, CalcError> {
        let result = self.calculator.add_slot()?;
        Ok(self.publish(result))
    }

    /// Remove a slot from the active calculator's score list.
    pub fn remove_slot(&mut self, index: usize) -> Result<AverageResult, CalcError> {
        let result = self.calculator.remove_slot(index)?;
        Ok(self.publish(result))
    }

    /// Recompute with unchanged inputs and notify again.
    pub fn recompute(&mut self) -> AverageResult {
        let result = self.calculator.recompute(&mut self.listener);
        self.current = result;
        result
    }

    fn publish(&mut self, result: AverageResult) -> AverageResult {
        self.current = result;
        match result {
            Some(value) => self.listener.on_result_change(value),
            None => self.listener.on_result_cleared(),
        }
        result
    }

    /// Move to `Pending` and hand out the request to send.
    ///
    /// Fails while another request is pending or when there is no result.
    pub fn begin_advice(&mut self) -> Result<AdviceTicket, CalcError> {
        if self.advice == AdvicePhase::Pending {
            return Err(CalcError::AdvicePending);
        }
        let score = self.current.ok_or(CalcError::NoResult)?;
        self.advice = AdvicePhase::Pending;
        Ok(AdviceTicket {
            generation: self.generation,
            request: AdviceRequest::for_result(self.kind(), score),
        })
    }

    /// Record the response for `ticket`.
    ///
    /// Returns `false` and leaves the phase untouched when the tool was
    /// switched after the ticket was issued.
    pub fn finish_advice(&mut self, ticket: AdviceTicket, response: AdviceResponse) -> bool {
        if ticket.generation != self.generation {
            debug!("dropping advice for a previous tool");
            return false;
        }
        self.advice = if response.is_delivered() {
            AdvicePhase::Resolved(response)
        } else {
            AdvicePhase::Rejected(response)
        };
        true
    }
}
