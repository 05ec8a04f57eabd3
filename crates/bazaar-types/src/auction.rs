//! English (ascending-price) auction entity.

use serde::{Deserialize, Serialize};

use crate::{constants, AccountId, AssetRef, AuctionId, PaymentMedium};

/// Lifecycle status of an English auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionStatus {
    Active,
    Ended,
    Cancelled,
}

impl std::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Ended => write!(f, "ENDED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// An ascending-bid auction with minimum increment, optional reserve,
/// optional buy-now shortcut, scheduled start, and anti-snipe extension.
///
/// `reserve_price == 0` and `buy_now_price == 0` mean "not set".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub id: AuctionId,
    pub seller: AccountId,
    pub asset: AssetRef,
    pub medium: PaymentMedium,
    pub start_price: u128,
    pub reserve_price: u128,
    pub buy_now_price: u128,
    pub highest_bid: u128,
    pub highest_bidder: Option<AccountId>,
    pub start_time: u64,
    pub end_time: u64,
    pub bid_count: u32,
    pub status: AuctionStatus,
}

impl Auction {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AuctionStatus::Active
    }

    #[must_use]
    pub fn has_bids(&self) -> bool {
        self.bid_count > 0
    }

    /// Minimum acceptable next bid: the start price while no bid stands,
    /// otherwise the standing bid plus a floored 5% increment.
    #[must_use]
    pub fn min_next_bid(&self) -> u128 {
        if self.highest_bidder.is_none() {
            self.start_price
        } else {
            self.highest_bid + self.highest_bid / constants::MIN_BID_INCREMENT_DIVISOR
        }
    }

    /// Whether the reserve (if set) is met by the standing bid.
    #[must_use]
    pub fn reserve_met(&self) -> bool {
        self.reserve_price == 0 || self.highest_bid >= self.reserve_price
    }

    /// Whether an amount triggers the buy-now shortcut.
    #[must_use]
    pub fn triggers_buy_now(&self, amount: u128) -> bool {
        self.buy_now_price > 0 && amount >= self.buy_now_price
    }
}
