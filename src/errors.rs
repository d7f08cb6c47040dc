//! Error types for the rangedice wagering engine
//!
//! Every bet error is fatal to the round it occurs in: the round aborts as a
//! whole and the host reverts all of its state changes. Nothing is retried
//! internally and no partial settlement exists.

use thiserror::Error;

/// Failure raised by the treasury collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreasuryError {
    #[error("transfer of {amount} failed: {reason}")]
    TransferFailed { amount: u128, reason: String },
}

/// Round-fatal errors raised while placing and settling a bet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BetError {
    #[error("game is not active")]
    GameInactive,

    #[error("invalid bet: choose numbers between 0 and 99 (upper={upper}, lower={lower})")]
    RangeOutOfBounds { upper: i32, lower: i32 },

    #[error("invalid gap: upper - lower must be between 0 and 95 (got {span})")]
    InvalidGap { span: i32 },

    #[error("side bet type and side bet amount must be set together")]
    InconsistentSideBet,

    #[error("side bet amount cannot be negative (got {amount})")]
    NegativeSideBetAmount { amount: i128 },

    #[error("unknown side bet type: {found}")]
    UnknownSideBetType { found: String },

    #[error("side bet amount {amount} out of range ({min}, {max})")]
    SideBetAmountOutOfRange { amount: u128, min: u128, max: u128 },

    #[error("no main bet amount provided")]
    NoMainBetAmount,

    #[error("main bet amount {amount} out of range ({min}, {max})")]
    MainBetAmountOutOfRange { amount: u128, min: u128, max: u128 },

    #[error("treasury reserve {reserve} cannot cover worst-case payout {required}")]
    InsufficientReserve { required: u128, reserve: u128 },

    #[error("contract accounts cannot place bets")]
    NonHumanCaller,

    #[error("payout transfer failed, returning funds: {0}")]
    PayoutTransfer(#[from] TreasuryError),
}

/// Configuration load and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing required field: {0}")]
    MissingRequired(String),
}
