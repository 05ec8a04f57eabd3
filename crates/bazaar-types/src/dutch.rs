//! Dutch (descending-price) auction entity.

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetRef, DutchAuctionId, PaymentMedium};

/// Lifecycle status of a Dutch auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DutchAuctionStatus {
    Active,
    Sold,
    Cancelled,
}

impl std::fmt::Display for DutchAuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Sold => write!(f, "SOLD"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A descending-price auction with linear decay from `start_price` to
/// `end_price` over `[start_time, end_time]`.
///
/// There is no automatic expiry: once `end_time` passes the asking price
/// floors at `end_price` and the auction stays buyable until bought or
/// cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutchAuction {
    pub id: DutchAuctionId,
    pub seller: AccountId,
    pub asset: AssetRef,
    pub medium: PaymentMedium,
    pub start_price: u128,
    pub end_price: u128,
    pub start_time: u64,
    pub end_time: u64,
    pub status: DutchAuctionStatus,
}

impl DutchAuction {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == DutchAuctionStatus::Active
    }

    /// Current asking price at `now`: linear decay, floor-rounded, exactly
    /// `end_price` at or after `end_time`.
    #[must_use]
    pub fn price_at(&self, now: u64) -> u128 {
        if now >= self.end_time {
            return self.end_price;
        }
        if now <= self.start_time {
            return self.start_price;
        }
        let elapsed = u128::from(now - self.start_time);
        let span = u128::from(self.end_time - self.start_time);
        let delta = self.start_price - self.end_price;
        // floor(delta * elapsed / span) without forming the full product,
        // which overflows for price deltas above ~2^64. Exact because
        // delta = (delta / span) * span + delta % span.
        let drop = (delta / span) * elapsed + (delta % span) * elapsed / span;
        self.start_price - drop
    }
}
