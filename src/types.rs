//! Core data model for a single wagering round
//!
//! Amounts are expressed in the smallest currency unit (1 token = 10^18
//! units) and carried as `u128` once validated. The request type keeps
//! signed fields so out-of-range and negative inputs stay representable at
//! the boundary and are rejected by the validator instead of the type
//! system.

use serde::{Deserialize, Serialize};

/// Smallest playable number.
pub const LOWER_LIMIT: u8 = 0;

/// Largest playable number.
pub const UPPER_LIMIT: u8 = 99;

/// Largest allowed `upper - lower` distance (gap of 96 numbers).
pub const MAX_SPAN: i32 = 95;

/// A player's wager for one round. Immutable once validation begins.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetRequest {
    /// Upper end of the chosen range, inclusive. Must land in [0, 99].
    pub upper: i32,
    /// Lower end of the chosen range, inclusive. Must land in [0, 99].
    pub lower: i32,
    /// 'Lucky phrase' mixed into the outcome entropy. Defaults to "".
    #[serde(default)]
    pub user_seed: String,
    /// Portion of the attached stake wagered on the side bet, if any.
    #[serde(default)]
    pub side_bet_amount: i128,
    /// Side bet variant name; `None` when no side bet is placed.
    #[serde(default)]
    pub side_bet_type: Option<String>,
}

impl BetRequest {
    /// Main bet over `[lower, upper]` with no side bet.
    pub fn range(lower: i32, upper: i32) -> Self {
        Self {
            upper,
            lower,
            user_seed: String::new(),
            side_bet_amount: 0,
            side_bet_type: None,
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.user_seed = seed.into();
        self
    }

    pub fn with_side_bet(mut self, kind: impl Into<String>, amount: i128) -> Self {
        self.side_bet_type = Some(kind.into());
        self.side_bet_amount = amount;
        self
    }
}

/// Caller-identifying transaction metadata attached to a round by the host.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundContext {
    /// Hash of the transaction carrying the bet.
    pub transaction_id: [u8; 32],
    /// Block timestamp supplied by the host.
    pub block_timestamp: u64,
    /// Originating player address, used for audit events and the payout leg.
    pub origin: String,
    /// Contract accounts are rejected before any stake handling.
    pub caller_is_contract: bool,
}

impl RoundContext {
    pub fn new(transaction_id: [u8; 32], block_timestamp: u64, origin: impl Into<String>) -> Self {
        Self {
            transaction_id,
            block_timestamp,
            origin: origin.into(),
            caller_is_contract: false,
        }
    }
}

/// Winning number plus the raw spin it was derived from.
///
/// Produced once per round and consumed immediately; never stored.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    /// Drawn number in [0, 99].
    pub winning_number: u8,
    /// Spin residue in ticks of 1/100_000, so the value lies in [0, 1).
    pub raw_spin: u32,
}

impl Outcome {
    /// Renders the raw spin as the decimal fraction it represents.
    pub fn raw_spin_display(&self) -> String {
        format!("0.{:05}", self.raw_spin)
    }
}

/// Terminal value of a settled round.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementResult {
    pub main_bet_won: bool,
    pub side_bet_won: bool,
    pub main_bet_payout: u128,
    pub side_bet_payout: u128,
    /// Sum of both payout legs; zero when neither bet won.
    pub total_payout: u128,
    pub winning_number: u8,
    pub raw_spin: u32,
}

/// Lifecycle of a settlement round.
///
/// `Rejected` is reachable from any state up to `Validated`; `PayoutFailed`
/// from `Settled` when the treasury rejects the payout transfer. Both are
/// terminal, as is `Settled`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    Received,
    StakeForwarded,
    Validated,
    OutcomeDrawn,
    Evaluated,
    Settled,
    Rejected,
    PayoutFailed,
}
