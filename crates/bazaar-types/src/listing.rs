//! Fixed-price single-asset listing.

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetRef, ListingId, PaymentMedium};

/// Lifecycle status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    Active,
    Sold,
    Cancelled,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Sold => write!(f, "SOLD"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A fixed-price listing of a single asset. The asset itself sits in escrow
/// for the lifetime of the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub seller: AccountId,
    pub asset: AssetRef,
    pub medium: PaymentMedium,
    pub price: u128,
    pub expires_at: u64,
    pub status: ListingStatus,
    pub created_at: u64,
}

impl Listing {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }

    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}
