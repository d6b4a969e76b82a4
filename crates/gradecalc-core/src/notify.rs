//! Result-change notification contract.
//!
//! The active calculator reports every recompute upward: a value on success,
//! a cleared signal when inputs become incomplete.

/// Receiver of recompute notifications (the presentation layer).
pub trait ResultListener {
    /// Called on every successful recompute, even if the value is unchanged.
    fn on_result_change(&mut self, value: f64);

    /// Called when a recompute yields no result or the tool is switched.
    fn on_result_cleared(&mut self) {}
}

/// A recorded notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultEvent {
    Changed(f64),
    Cleared,
}

/// Records every notification in order.
impl ResultListener for Vec<ResultEvent> {
    fn on_result_change(&mut self, value: f64) {
        self.push(ResultEvent::Changed(value));
    }

    fn on_result_cleared(&mut self) {
        self.push(ResultEvent::Cleared);
    }
}

/// Discards notifications.
impl ResultListener for () {
    fn on_result_change(&mut self, _value: f64) {}
}

/// Logs notifications through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl ResultListener for TracingListener {
    fn on_result_change(&mut self, value: f64) {
        tracing::debug!(value, "result changed");
    }

    fn on_result_cleared(&mut self) {
        tracing::debug!("result cleared");
    }
}
