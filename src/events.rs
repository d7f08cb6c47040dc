//! Audit events emitted over the course of a round
//!
//! Events are observable side effects only: they are never retried and never
//! feed back into control flow. When a round aborts, the host reverts the
//! events emitted so far along with the rest of the round's state changes,
//! so sinks do not need to buffer or compensate.

use crate::types::Outcome;
use serde::Serialize;
use std::sync::Mutex;

/// One audit record in the life of a round.
///
/// Serialize-only: events flow outward to sinks and are never read back.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    /// Who placed the bet, and when.
    BetSource { origin: String, timestamp: u64 },
    /// A value transfer leg: the stake moving in, or winnings moving out.
    FundTransfer {
        recipient: String,
        amount: u128,
        note: String,
    },
    /// The accepted main bet.
    BetPlaced { amount: u128, upper: u8, lower: u8 },
    /// The drawn outcome and the round's total payout.
    BetResult {
        raw_spin: String,
        winning_number: u8,
        payout: u128,
    },
    /// Payout split across the two bet legs.
    PayoutBreakdown { total: u128, main: u128, side: u128 },
}

impl RoundEvent {
    pub fn bet_result(outcome: &Outcome, payout: u128) -> Self {
        RoundEvent::BetResult {
            raw_spin: outcome.raw_spin_display(),
            winning_number: outcome.winning_number,
            payout,
        }
    }
}

/// Receives audit events as a round progresses.
pub trait EventSink {
    fn emit(&self, event: RoundEvent);
}

/// Logs each event as single-line JSON under the `rangedice::audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: RoundEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => tracing::info!(target: "rangedice::audit", "{}", json),
            Err(e) => tracing::warn!("failed to encode audit event: {}", e),
        }
    }
}

/// Collects events in memory, for tests and the simulator.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<RoundEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clones the events emitted so far.
    pub fn snapshot(&self) -> Vec<RoundEvent> {
        self.events.lock().expect("event sink poisoned").clone()
    }

    /// Drains and returns the events emitted so far.
    pub fn take(&self) -> Vec<RoundEvent> {
        std::mem::take(&mut *self.events.lock().expect("event sink poisoned"))
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, event: RoundEvent) {
        self.events.lock().expect("event sink poisoned").push(event);
    }
}
