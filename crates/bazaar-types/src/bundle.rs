//! Atomic multi-asset bundle listing.

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetRef, BundleId, PaymentMedium};

/// Lifecycle status of a bundle listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleStatus {
    Active,
    Sold,
    Cancelled,
}

impl std::fmt::Display for BundleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Sold => write!(f, "SOLD"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A fixed-price sale of several assets as one unit. All assets are
/// escrowed together and transfer together; no partial state is ever
/// observable.
///
/// Royalty for the whole bundle is looked up from the *first* asset only —
/// an intentional simplification kept for integration compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleListing {
    pub id: BundleId,
    pub seller: AccountId,
    pub assets: Vec<AssetRef>,
    pub medium: PaymentMedium,
    pub price: u128,
    pub expires_at: u64,
    pub status: BundleStatus,
    pub created_at: u64,
}

impl BundleListing {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == BundleStatus::Active
    }

    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    /// The asset whose royalty configuration prices the whole bundle.
    #[must_use]
    pub fn royalty_asset(&self) -> Option<&AssetRef> {
        self.assets.first()
    }
}
