//! Marketplace configuration.

use serde::{Deserialize, Serialize};

use crate::{constants, AccountId, MarketError, Result};

/// Operator-level configuration for a marketplace instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Marketplace fee rate in basis points, capped at
    /// [`constants::MAX_FEE_RATE_BPS`].
    pub fee_rate_bps: u32,
    /// Recipient of the marketplace fee.
    pub fee_recipient: AccountId,
    /// Minimum allowed auction duration in seconds.
    pub min_auction_duration: u64,
    /// Maximum allowed auction duration in seconds.
    pub max_auction_duration: u64,
    /// Anti-snipe window and extension in seconds.
    pub anti_snipe_window: u64,
    /// Maximum number of assets in a bundle listing.
    pub max_bundle_assets: usize,
}

impl MarketConfig {
    /// A configuration with platform defaults and the given fee recipient.
    #[must_use]
    pub fn with_fee_recipient(fee_recipient: AccountId) -> Self {
        Self {
            fee_rate_bps: constants::DEFAULT_FEE_RATE_BPS,
            fee_recipient,
            min_auction_duration: constants::DEFAULT_MIN_AUCTION_DURATION_SECS,
            max_auction_duration: constants::DEFAULT_MAX_AUCTION_DURATION_SECS,
            anti_snipe_window: constants::ANTI_SNIPE_WINDOW_SECS,
            max_bundle_assets: constants::MAX_BUNDLE_ASSETS,
        }
    }

    /// Validate the configuration invariants.
    pub fn validate(&self) -> Result<()> {
        if self.fee_rate_bps > constants::MAX_FEE_RATE_BPS {
            return Err(MarketError::FeeRateTooHigh {
                bps: self.fee_rate_bps,
                cap: constants::MAX_FEE_RATE_BPS,
            });
        }
        if self.min_auction_duration == 0 || self.min_auction_duration > self.max_auction_duration
        {
            return Err(MarketError::Internal(format!(
                "auction duration band [{}, {}] is invalid",
                self.min_auction_duration, self.max_auction_duration,
            )));
        }
        Ok(())
    }

    /// Check that an auction duration falls inside the configured band.
    pub fn check_duration(&self, duration: u64) -> Result<()> {
        if duration < self.min_auction_duration || duration > self.max_auction_duration {
            return Err(MarketError::DurationOutOfBand {
                min: self.min_auction_duration,
                max: self.max_auction_duration,
                got: duration,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = MarketConfig::with_fee_recipient(AccountId::new());
        cfg.validate().unwrap();
        assert_eq!(cfg.fee_rate_bps, 250);
        assert_eq!(cfg.anti_snipe_window, 600);
        assert_eq!(cfg.max_bundle_assets, 20);
    }

    #[test]
    fn fee_cap_enforced() {
        let mut cfg = MarketConfig::with_fee_recipient(AccountId::new());
        cfg.fee_rate_bps = 1_001;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, MarketError::FeeRateTooHigh { .. }));
    }

    #[test]
    fn duration_band_checked() {
        let cfg = MarketConfig::with_fee_recipient(AccountId::new());
        assert!(cfg.check_duration(600).is_ok());
        assert!(cfg.check_duration(599).is_err());
        let err = cfg
            .check_duration(31 * 24 * 60 * 60)
            .unwrap_err();
        assert!(matches!(err, MarketError::DurationOutOfBand { .. }));
    }

    #[test]
    fn invalid_band_rejected() {
        let mut cfg = MarketConfig::with_fee_recipient(AccountId::new());
        cfg.min_auction_duration = 100;
        cfg.max_auction_duration = 50;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = MarketConfig::with_fee_recipient(AccountId::new());
        let json = serde_json::to_string(&cfg).unwrap();
        let back: MarketConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.fee_rate_bps, back.fee_rate_bps);
        assert_eq!(cfg.fee_recipient, back.fee_recipient);
    }
}
