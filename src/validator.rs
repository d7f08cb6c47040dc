//! Wager validation
//!
//! Checks run in a fixed order and the first failure aborts the round. The
//! output is a normalized [`ValidatedBet`] carrying unsigned amounts, the
//! derived limit snapshot, and the winning payout of each leg computed up
//! front. The optimistic sum of those payouts is what the reserve-cover
//! check compares against.

use crate::errors::BetError;
use crate::limits::{self, BetLimitSnapshot, MIN_STAKE};
use crate::side_bet::SideBetType;
use crate::types::{BetRequest, LOWER_LIMIT, MAX_SPAN, UPPER_LIMIT};

/// A bet that passed every check, with amounts normalized to `u128`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedBet {
    pub upper: u8,
    pub lower: u8,
    /// Width of the chosen range, `upper - lower + 1`, in [1, 96].
    pub gap: u8,
    pub main_bet_amount: u128,
    pub side_bet: Option<(SideBetType, u128)>,
    /// Main-bet payout if the drawn number lands in range.
    pub main_payout_if_win: u128,
    /// Side-bet payout if the proposition holds; zero without a side bet.
    pub side_payout_if_win: u128,
    pub limits: BetLimitSnapshot,
}

impl ValidatedBet {
    /// Worst-case liability of this bet: both legs winning.
    pub fn worst_case_payout(&self) -> u128 {
        self.main_payout_if_win + self.side_payout_if_win
    }
}

/// Validates a bet request against the game state and the treasury's
/// reserve readings.
///
/// `reserve_floor` is the figure read before stake forwarding and is the
/// basis for every bet ceiling; `reserve_available` is a second reading
/// taken at validation time and must cover the worst-case payout.
pub fn validate(
    request: &BetRequest,
    stake: u128,
    game_active: bool,
    reserve_floor: u128,
    reserve_available: u128,
) -> Result<ValidatedBet, BetError> {
    if !game_active {
        return Err(BetError::GameInactive);
    }

    let bounds = i32::from(LOWER_LIMIT)..=i32::from(UPPER_LIMIT);
    if !bounds.contains(&request.upper) || !bounds.contains(&request.lower) {
        return Err(BetError::RangeOutOfBounds {
            upper: request.upper,
            lower: request.lower,
        });
    }

    let span = request.upper - request.lower;
    if !(0..=MAX_SPAN).contains(&span) {
        return Err(BetError::InvalidGap { span });
    }

    let side_type_set = request.side_bet_type.is_some();
    let side_amount_set = request.side_bet_amount != 0;
    if side_type_set != side_amount_set {
        return Err(BetError::InconsistentSideBet);
    }

    if request.side_bet_amount < 0 {
        return Err(BetError::NegativeSideBetAmount {
            amount: request.side_bet_amount,
        });
    }

    let gap = (span + 1) as u8;
    let mut side_bet = None;
    let mut side_payout_if_win = 0;
    if let Some(name) = request.side_bet_type.as_deref() {
        let kind: SideBetType = name.parse()?;
        let amount = request.side_bet_amount as u128;
        let side_bet_max = limits::side_bet_limit(reserve_floor, kind);
        if amount < MIN_STAKE || amount > side_bet_max {
            return Err(BetError::SideBetAmountOutOfRange {
                amount,
                min: MIN_STAKE,
                max: side_bet_max,
            });
        }
        side_bet = Some((kind, amount));
        side_payout_if_win = kind.payout(amount);
    }

    let limits = BetLimitSnapshot::compute(reserve_floor, gap, side_bet.map(|(kind, _)| kind));

    let side_amount = side_bet.map(|(_, amount)| amount).unwrap_or(0);
    let main_bet_amount = match stake.checked_sub(side_amount) {
        Some(amount) if amount > 0 => amount,
        _ => return Err(BetError::NoMainBetAmount),
    };
    if main_bet_amount < limits.main_bet_min || main_bet_amount > limits.main_bet_max {
        return Err(BetError::MainBetAmountOutOfRange {
            amount: main_bet_amount,
            min: limits.main_bet_min,
            max: limits.main_bet_max,
        });
    }

    let bet = ValidatedBet {
        upper: request.upper as u8,
        lower: request.lower as u8,
        gap,
        main_bet_amount,
        side_bet,
        main_payout_if_win: limits::main_bet_payout(main_bet_amount, gap),
        side_payout_if_win,
        limits,
    };

    if bet.worst_case_payout() > reserve_available {
        return Err(BetError::InsufficientReserve {
            required: bet.worst_case_payout(),
            reserve: reserve_available,
        });
    }

    Ok(bet)
}
