//! Operator and pause middleware.
//!
//! Administrative operations check `require_operator`; creation- and
//! purchase-type operations check `require_open`. Exit paths (cancellation,
//! auction settlement, pending-withdrawal claims) never consult the gate —
//! a paused market must never trap assets or funds.

use serde::{Deserialize, Serialize};

use bazaar_types::{AccountId, MarketError, Result};

/// Policy-check middleware wrapping the administrative surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminGate {
    operator: AccountId,
    paused: bool,
}

impl AdminGate {
    #[must_use]
    pub fn new(operator: AccountId) -> Self {
        Self {
            operator,
            paused: false,
        }
    }

    #[must_use]
    pub fn operator(&self) -> AccountId {
        self.operator
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn require_operator(&self, caller: AccountId) -> Result<()> {
        if caller == self.operator {
            Ok(())
        } else {
            Err(MarketError::NotOperator)
        }
    }

    pub fn require_open(&self) -> Result<()> {
        if self.paused {
            Err(MarketError::MarketPaused)
        } else {
            Ok(())
        }
    }

    pub fn pause(&mut self, caller: AccountId) -> Result<()> {
        self.require_operator(caller)?;
        self.paused = true;
        tracing::warn!("market paused");
        Ok(())
    }

    pub fn unpause(&mut self, caller: AccountId) -> Result<()> {
        self.require_operator(caller)?;
        self.paused = false;
        tracing::info!("market unpaused");
        Ok(())
    }

    pub fn set_operator(&mut self, caller: AccountId, new_operator: AccountId) -> Result<()> {
        self.require_operator(caller)?;
        self.operator = new_operator;
        Ok(())
    }
}
