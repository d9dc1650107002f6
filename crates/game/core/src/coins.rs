//! Local soft-currency wallet.
//!
//! Coins never touch the remote store; the wallet only guards against
//! overspending and underflows.

use crate::error::{CoreError, ErrorSeverity};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoinWallet {
    coins: u32,
}

impl CoinWallet {
    pub fn new(coins: u32) -> Self {
        Self { coins }
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn add(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    pub fn spend(&mut self, amount: u32) -> Result<(), CoinError> {
        if amount > self.coins {
            return Err(CoinError::Insufficient {
                requested: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }
}

/// Errors raised by wallet mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoinError {
    #[error("cannot spend {requested} coins ({available} available)")]
    Insufficient { requested: u32, available: u32 },
}

impl CoreError for CoinError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CoinError::Insufficient { .. } => ErrorSeverity::Recoverable,
        }
    }
}
