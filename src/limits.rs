//! Dynamic bet ceilings and payout curves
//!
//! Every ceiling derives from the treasury's live reserve floor and is
//! recomputed each round; nothing here is cached, since the reserve moves
//! between rounds. The reference curve uses fractional constants (1.5,
//! 681.34, 98.5); they are carried here in hundredths so all
//! payout-affecting arithmetic stays on integers with an explicit floor at
//! each division.

use crate::side_bet::SideBetType;
use serde::{Deserialize, Serialize};

/// Smallest stake accepted for either bet kind: 0.1 token.
pub const MIN_STAKE: u128 = 100_000_000_000_000_000;

/// Main bet payout multiplier, hundredths (98.5x before the gap division).
pub const MAIN_BET_MULTIPLIER_X100: u128 = 9_850;

// Main-bet ceiling curve, hundredths:
//   max = reserve * 1.5 * gap / (68134 - 681.34 * gap)
const MAIN_LIMIT_FACTOR_X100: u128 = 150;
const MAIN_LIMIT_BASE_X100: u128 = 6_813_400;
const MAIN_LIMIT_SLOPE_X100: u128 = 68_134;

/// Maximum main-bet stake the house accepts for a range of width `gap`.
///
/// The curve caps the stake so the worst-case payout (near-98.5x divided by
/// gap) stays a small fraction of the reserve; the denominator shrinks as
/// the gap widens, so wider (lower-multiplier) ranges tolerate larger
/// stakes. The curve is undefined from gap 100 upward; the ceiling is zero
/// there rather than a divide fault, even though gap validation keeps that
/// region unreachable.
pub fn main_bet_limit(reserve_floor: u128, gap: u8) -> u128 {
    let slope = MAIN_LIMIT_SLOPE_X100 * gap as u128;
    if slope >= MAIN_LIMIT_BASE_X100 {
        return 0;
    }
    let denominator = MAIN_LIMIT_BASE_X100 - slope;
    reserve_floor.saturating_mul(MAIN_LIMIT_FACTOR_X100 * gap as u128) / denominator
}

/// Maximum side-bet stake for `kind`, a fixed fraction of the reserve.
pub fn side_bet_limit(reserve_floor: u128, kind: SideBetType) -> u128 {
    reserve_floor / kind.limit_ratio()
}

/// Winning payout for a main bet of `amount` over a range of width `gap`.
pub fn main_bet_payout(amount: u128, gap: u8) -> u128 {
    debug_assert!((1..=96).contains(&gap));
    MAIN_BET_MULTIPLIER_X100.saturating_mul(amount) / (100 * gap as u128)
}

/// Bet ceilings for one round, derived from the reserve floor at round
/// start. Never persisted and never reused across rounds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetLimitSnapshot {
    pub main_bet_min: u128,
    pub main_bet_max: u128,
    pub side_bet_min: u128,
    /// Zero when the round carries no side bet.
    pub side_bet_max: u128,
}

impl BetLimitSnapshot {
    pub fn compute(reserve_floor: u128, gap: u8, side_bet: Option<SideBetType>) -> Self {
        Self {
            main_bet_min: MIN_STAKE,
            main_bet_max: main_bet_limit(reserve_floor, gap),
            side_bet_min: MIN_STAKE,
            side_bet_max: side_bet
                .map(|kind| side_bet_limit(reserve_floor, kind))
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESERVE: u128 = 1_000_000_000_000_000_000_000_000; // 1,000,000 tokens

    #[test]
    fn test_main_limit_exact_values() {
        assert_eq!(main_bet_limit(RESERVE, 1), 22_237_818_345_488_524_840);
        assert_eq!(main_bet_limit(RESERVE, 2), 44_929_469_718_435_999_168);
        assert_eq!(main_bet_limit(RESERVE, 48), 2_032_194_476_495_412_885_467);
        assert_eq!(main_bet_limit(RESERVE, 96), 52_837_056_388_880_735_022_162);
    }

    #[test]
    fn test_main_limit_grows_with_gap() {
        let mut previous = 0;
        for gap in 1..=96 {
            let limit = main_bet_limit(RESERVE, gap);
            assert!(limit > previous, "ceiling must grow with gap (gap {gap})");
            previous = limit;
        }
    }

    #[test]
    fn test_main_limit_denominator_guard() {
        // From gap 100 on the curve's denominator reaches zero and below.
        assert_eq!(main_bet_limit(RESERVE, 100), 0);
        assert_eq!(main_bet_limit(RESERVE, 255), 0);
    }

    #[test]
    fn test_main_limit_zero_reserve() {
        assert_eq!(main_bet_limit(0, 1), 0);
        assert_eq!(main_bet_limit(0, 96), 0);
    }

    #[test]
    fn test_side_limit_exact_values() {
        assert_eq!(
            side_bet_limit(RESERVE, SideBetType::DigitsMatch),
            877_192_982_456_140_350_877
        );
        assert_eq!(
            side_bet_limit(RESERVE, SideBetType::IconLogo1),
            1_851_851_851_851_851_851_851
        );
        assert_eq!(
            side_bet_limit(RESERVE, SideBetType::IconLogo2),
            79_693_975_135_479_757_730
        );
    }

    #[test]
    fn test_main_payout_exact() {
        let token: u128 = 1_000_000_000_000_000_000;
        assert_eq!(main_bet_payout(token, 1), 98_500_000_000_000_000_000);
        assert_eq!(main_bet_payout(token, 2), 49_250_000_000_000_000_000);
        // Floor, not rounding: 9850 * 3 / (100 * 96) = 3.077...
        assert_eq!(main_bet_payout(3, 96), 3);
        assert_eq!(main_bet_payout(1, 96), 1);
    }

    #[test]
    fn test_worst_case_payout_stays_under_reserve() {
        // A stake at the ceiling must never let the worst-case payout reach
        // the reserve the ceiling was derived from.
        for gap in 1..=96 {
            let max_stake = main_bet_limit(RESERVE, gap);
            assert!(main_bet_payout(max_stake, gap) < RESERVE, "gap {gap}");
        }
        for kind in SideBetType::ALL {
            let max_stake = side_bet_limit(RESERVE, kind);
            assert!(kind.payout(max_stake) < RESERVE, "{kind}");
        }
    }

    #[test]
    fn test_snapshot_reflects_request_shape() {
        let snapshot = BetLimitSnapshot::compute(RESERVE, 1, Some(SideBetType::IconLogo2));
        assert_eq!(snapshot.main_bet_min, MIN_STAKE);
        assert_eq!(snapshot.main_bet_max, main_bet_limit(RESERVE, 1));
        assert_eq!(
            snapshot.side_bet_max,
            side_bet_limit(RESERVE, SideBetType::IconLogo2)
        );

        let no_side = BetLimitSnapshot::compute(RESERVE, 1, None);
        assert_eq!(no_side.side_bet_max, 0);
    }

    #[test]
    fn test_snapshot_tracks_reserve_movement() {
        let before = BetLimitSnapshot::compute(RESERVE, 10, None);
        let after = BetLimitSnapshot::compute(RESERVE * 2, 10, None);
        assert_eq!(after.main_bet_max, before.main_bet_max * 2);
    }
}
