//! Side bet variants and their win conditions
//!
//! A side bet is a single supplementary proposition about the drawn number,
//! independent of the main bet's range. Each variant carries a fixed payout
//! multiplier and a matching bet-limit divisor; multipliers are held in
//! hundredths so payout math stays integral.

use crate::errors::BetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The supported side bet propositions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SideBetType {
    /// Both digits of the drawn number match (0, 11, 22, ... 99).
    DigitsMatch,
    /// The drawn number shows a single logo: it contains the digit zero or
    /// is a single nonzero digit. The 1-9 inclusion is a deliberate widening
    /// of the rule, not an oversight.
    IconLogo1,
    /// The drawn number is exactly zero.
    IconLogo2,
}

impl SideBetType {
    pub const ALL: [SideBetType; 3] = [
        SideBetType::DigitsMatch,
        SideBetType::IconLogo1,
        SideBetType::IconLogo2,
    ];

    /// Payout multiplier in hundredths (9.5x, 5x and 95x).
    pub fn multiplier_x100(self) -> u128 {
        match self {
            SideBetType::DigitsMatch => 950,
            SideBetType::IconLogo1 => 500,
            SideBetType::IconLogo2 => 9_500,
        }
    }

    /// Divisor applied to the treasury reserve floor to obtain the maximum
    /// stake for this variant. Calibrated to the payout multiplier: a higher
    /// multiplier gets a larger divisor and therefore a smaller ceiling.
    pub fn limit_ratio(self) -> u128 {
        match self {
            SideBetType::DigitsMatch => 1_140,
            SideBetType::IconLogo1 => 540,
            SideBetType::IconLogo2 => 12_548,
        }
    }

    /// Whether the drawn number satisfies this variant's win condition.
    pub fn wins(self, winning_number: u8) -> bool {
        match self {
            SideBetType::DigitsMatch => winning_number % 11 == 0,
            SideBetType::IconLogo1 => {
                winning_number.to_string().contains('0') || (1..=9).contains(&winning_number)
            }
            SideBetType::IconLogo2 => winning_number == 0,
        }
    }

    /// Winning payout for `amount` staked on this variant, floor division.
    pub fn payout(self, amount: u128) -> u128 {
        self.multiplier_x100().saturating_mul(amount) / 100
    }
}

impl fmt::Display for SideBetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SideBetType::DigitsMatch => "digits_match",
            SideBetType::IconLogo1 => "icon_logo1",
            SideBetType::IconLogo2 => "icon_logo2",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SideBetType {
    type Err = BetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "digits_match" => Ok(SideBetType::DigitsMatch),
            "icon_logo1" => Ok(SideBetType::IconLogo1),
            "icon_logo2" => Ok(SideBetType::IconLogo2),
            other => Err(BetError::UnknownSideBetType {
                found: other.to_string(),
            }),
        }
    }
}

/// Per-variant payout multipliers in hundredths, for read-only reporting.
pub fn multiplier_table() -> [(SideBetType, u128); 3] {
    [
        (SideBetType::DigitsMatch, 950),
        (SideBetType::IconLogo1, 500),
        (SideBetType::IconLogo2, 9_500),
    ]
}
