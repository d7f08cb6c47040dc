//! Treasury collaborator interface
//!
//! The engine never mutates the treasury's reserve directly: it reads the
//! reserve floor for limit computation and requests the two ledger
//! movements (stake in, payout out). The treasury must observe each call
//! atomically; serializing concurrent rounds is its concern, not the
//! engine's.

use crate::errors::TreasuryError;

/// The treasury the engine settles against.
pub trait Treasury {
    /// Minimum guaranteed reserve, the basis for bet-limit computation.
    /// Must reflect state at call time.
    fn reserve_floor(&self) -> u128;

    /// Registers an incoming stake. Called exactly once per round with the
    /// round's full attached stake, before validation.
    fn take_wager(&mut self, amount: u128);

    /// Transfers `amount` back to the player. A failure here aborts the
    /// whole round; the engine never swallows it.
    fn payout(&mut self, amount: u128) -> Result<(), TreasuryError>;
}

/// In-memory treasury for tests and simulations.
///
/// The balance doubles as the reserve floor. `Clone` is what stands in for
/// the host's all-or-nothing round semantics: callers clone before a round
/// and restore the clone when the round aborts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InMemoryTreasury {
    balance: u128,
    fail_payouts: bool,
}

impl InMemoryTreasury {
    pub fn new(balance: u128) -> Self {
        Self {
            balance,
            fail_payouts: false,
        }
    }

    /// A treasury whose payout leg always fails, for abort-path tests.
    pub fn with_failing_payouts(balance: u128) -> Self {
        Self {
            balance,
            fail_payouts: true,
        }
    }

    pub fn balance(&self) -> u128 {
        self.balance
    }
}

impl Treasury for InMemoryTreasury {
    fn reserve_floor(&self) -> u128 {
        self.balance
    }

    fn take_wager(&mut self, amount: u128) {
        self.balance = self.balance.saturating_add(amount);
    }

    fn payout(&mut self, amount: u128) -> Result<(), TreasuryError> {
        if self.fail_payouts {
            return Err(TreasuryError::TransferFailed {
                amount,
                reason: "simulated transport fault".to_string(),
            });
        }
        if amount > self.balance {
            return Err(TreasuryError::TransferFailed {
                amount,
                reason: format!("insufficient balance {}", self.balance),
            });
        }
        self.balance -= amount;
        Ok(())
    }
}
