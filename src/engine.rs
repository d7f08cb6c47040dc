//! Round orchestration
//!
//! One [`Round`] value drives exactly one game round through its lifecycle:
//! stake forwarding, validation, outcome draw, evaluation, settlement. The
//! full stake moves to the treasury before validation; the host's
//! all-or-nothing round semantics revert that transfer when the round
//! aborts later. The payout request is the final action of a winning round,
//! with no core state mutation after it.

use crate::config::GameConfig;
use crate::errors::BetError;
use crate::events::{EventSink, RoundEvent};
use crate::outcome;
use crate::treasury::Treasury;
use crate::types::{BetRequest, RoundContext, RoundState, SettlementResult};
use crate::validator;

/// A single settlement round over injected collaborators.
///
/// Construct one per incoming bet; `place_bet` consumes it, so a value can
/// never settle twice.
pub struct Round<'a, T, S>
where
    T: Treasury + ?Sized,
    S: EventSink + ?Sized,
{
    config: &'a GameConfig,
    treasury: &'a mut T,
    events: &'a S,
    state: RoundState,
}

impl<'a, T, S> Round<'a, T, S>
where
    T: Treasury + ?Sized,
    S: EventSink + ?Sized,
{
    pub fn new(config: &'a GameConfig, treasury: &'a mut T, events: &'a S) -> Self {
        Self {
            config,
            treasury,
            events,
            state: RoundState::Received,
        }
    }

    /// Entry point for one game round: a bet request plus the attached
    /// stake value, with caller-identifying transaction metadata.
    ///
    /// Every error is a whole-round abort; nothing is retried and no bet is
    /// partially settled.
    pub fn place_bet(
        mut self,
        ctx: &RoundContext,
        request: &BetRequest,
        stake: u128,
    ) -> Result<SettlementResult, BetError> {
        let result = self.run(ctx, request, stake);
        match &result {
            Ok(settlement) => {
                tracing::debug!(
                    winning_number = settlement.winning_number,
                    total_payout = %settlement.total_payout,
                    "round settled"
                );
            }
            Err(error) => {
                self.state = match self.state {
                    RoundState::Settled => RoundState::PayoutFailed,
                    _ => RoundState::Rejected,
                };
                tracing::warn!(state = ?self.state, %error, "round aborted");
            }
        }
        result
    }

    fn run(
        &mut self,
        ctx: &RoundContext,
        request: &BetRequest,
        stake: u128,
    ) -> Result<SettlementResult, BetError> {
        // Contract callers are turned away before any stake handling.
        if ctx.caller_is_contract {
            return Err(BetError::NonHumanCaller);
        }

        self.events.emit(RoundEvent::BetSource {
            origin: ctx.origin.clone(),
            timestamp: ctx.block_timestamp,
        });

        // Limit basis: the reserve floor as quoted before the stake moves.
        let reserve_floor = self.treasury.reserve_floor();

        self.events.emit(RoundEvent::FundTransfer {
            recipient: self.config.treasury_address.clone(),
            amount: stake,
            note: "forwarding stake to treasury".to_string(),
        });
        self.treasury.take_wager(stake);
        self.transition(RoundState::StakeForwarded);

        // Second reserve reading: the figure the worst-case payout must fit
        // in. A treasury whose quote dropped since the first reading fails
        // the cover check here.
        let reserve_available = self.treasury.reserve_floor();
        let bet = validator::validate(
            request,
            stake,
            self.config.active,
            reserve_floor,
            reserve_available,
        )?;
        self.transition(RoundState::Validated);

        self.events.emit(RoundEvent::BetPlaced {
            amount: bet.main_bet_amount,
            upper: bet.upper,
            lower: bet.lower,
        });

        let outcome = outcome::generate(
            &ctx.transaction_id,
            ctx.block_timestamp,
            &request.user_seed,
        );
        self.transition(RoundState::OutcomeDrawn);

        let main_bet_won = (bet.lower..=bet.upper).contains(&outcome.winning_number);
        let side_bet_won = bet
            .side_bet
            .map(|(kind, _)| kind.wins(outcome.winning_number))
            .unwrap_or(false);
        let main_bet_payout = if main_bet_won { bet.main_payout_if_win } else { 0 };
        let side_bet_payout = if side_bet_won { bet.side_payout_if_win } else { 0 };
        let total_payout = main_bet_payout + side_bet_payout;
        self.transition(RoundState::Evaluated);

        self.events.emit(RoundEvent::bet_result(&outcome, total_payout));
        self.events.emit(RoundEvent::PayoutBreakdown {
            total: total_payout,
            main: main_bet_payout,
            side: side_bet_payout,
        });

        self.transition(RoundState::Settled);
        if total_payout > 0 {
            self.events.emit(RoundEvent::FundTransfer {
                recipient: ctx.origin.clone(),
                amount: total_payout,
                note: "paying out winnings".to_string(),
            });
            self.treasury.payout(total_payout)?;
        }

        Ok(SettlementResult {
            main_bet_won,
            side_bet_won,
            main_bet_payout,
            side_bet_payout,
            total_payout,
            winning_number: outcome.winning_number,
            raw_spin: outcome.raw_spin,
        })
    }

    fn transition(&mut self, next: RoundState) {
        tracing::debug!(from = ?self.state, to = ?next, "round state");
        self.state = next;
    }
}
