//! Rangedice - single-round wagering engine for a number-range dice game
//!
//! A player stakes value on an inclusive range in [0, 99] (the main bet)
//! and, optionally, one supplementary proposition about the drawn number
//! (the side bet). The engine validates the stake against dynamic,
//! reserve-derived bet ceilings, draws a deterministic pseudo-random
//! outcome from request-bound entropy, evaluates both bets independently,
//! and settles with an external treasury collaborator.
//!
//! Each round is one atomic, synchronous unit of work: the host serializes
//! rounds and guarantees all-or-nothing application of their state changes,
//! including the treasury's ledger movements. The engine holds no mutable
//! state of its own across rounds.

pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod limits;
pub mod outcome;
pub mod side_bet;
pub mod treasury;
pub mod types;
pub mod validator;

pub use config::{ConfigBuilder, ConfigLoader, DiceConfig, GameConfig, SimulationConfig};
pub use engine::Round;
pub use errors::{BetError, ConfigError, TreasuryError};
pub use events::{EventSink, MemoryEventSink, RoundEvent, TracingEventSink};
pub use limits::{BetLimitSnapshot, MIN_STAKE};
pub use side_bet::SideBetType;
pub use treasury::{InMemoryTreasury, Treasury};
pub use types::{BetRequest, Outcome, RoundContext, RoundState, SettlementResult};
