//! Settlement receipts.
//!
//! Every completed sale produces a receipt recording the exact
//! fee / royalty / seller split, sealed with a SHA-256 digest over a
//! domain-separated encoding so receipts can be checked after the fact.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, PaymentMedium};

/// Which kind of entity produced a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleKind {
    Listing,
    Offer,
    CollectionOffer,
    Auction,
    DutchAuction,
    Bundle,
}

impl SaleKind {
    /// Stable single-byte tag used in the receipt digest.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            Self::Listing => 1,
            Self::Offer => 2,
            Self::CollectionOffer => 3,
            Self::Auction => 4,
            Self::DutchAuction => 5,
            Self::Bundle => 6,
        }
    }
}

impl std::fmt::Display for SaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listing => write!(f, "listing"),
            Self::Offer => write!(f, "offer"),
            Self::CollectionOffer => write!(f, "collection offer"),
            Self::Auction => write!(f, "auction"),
            Self::DutchAuction => write!(f, "dutch auction"),
            Self::Bundle => write!(f, "bundle"),
        }
    }
}

/// Record of one executed settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub kind: SaleKind,
    pub entity_id: u64,
    pub seller: AccountId,
    pub buyer: AccountId,
    pub medium: PaymentMedium,
    pub total: u128,
    pub fee: u128,
    pub royalty: u128,
    pub seller_amount: u128,
    pub settled_at: u64,
    /// SHA-256 over the domain-separated receipt fields.
    pub digest: [u8; 32],
}

impl SettlementReceipt {
    /// Build a receipt, computing its digest.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        kind: SaleKind,
        entity_id: u64,
        seller: AccountId,
        buyer: AccountId,
        medium: PaymentMedium,
        total: u128,
        fee: u128,
        royalty: u128,
        seller_amount: u128,
        settled_at: u64,
    ) -> Self {
        let digest = Self::compute_digest(
            kind,
            entity_id,
            seller,
            buyer,
            total,
            fee,
            royalty,
            seller_amount,
            settled_at,
        );
        Self {
            kind,
            entity_id,
            seller,
            buyer,
            medium,
            total,
            fee,
            royalty,
            seller_amount,
            settled_at,
            digest,
        }
    }

    /// Exact-split invariant: nothing leaked, nothing lost.
    #[must_use]
    pub fn conserves_total(&self) -> bool {
        self.fee + self.royalty + self.seller_amount == self.total
    }

    /// Recompute the digest and compare against the stored one.
    #[must_use]
    pub fn verify(&self) -> bool {
        let expected = Self::compute_digest(
            self.kind,
            self.entity_id,
            self.seller,
            self.buyer,
            self.total,
            self.fee,
            self.royalty,
            self.seller_amount,
            self.settled_at,
        );
        expected == self.digest
    }

    /// Hex form of the digest, for logs.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    #[allow(clippy::too_many_arguments)]
    fn compute_digest(
        kind: SaleKind,
        entity_id: u64,
        seller: AccountId,
        buyer: AccountId,
        total: u128,
        fee: u128,
        royalty: u128,
        seller_amount: u128,
        settled_at: u64,
    ) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"bazaar:receipt:v1:");
        hasher.update([kind.tag()]);
        hasher.update(entity_id.to_le_bytes());
        hasher.update(seller.0.as_bytes());
        hasher.update(buyer.0.as_bytes());
        hasher.update(total.to_le_bytes());
        hasher.update(fee.to_le_bytes());
        hasher.update(royalty.to_le_bytes());
        hasher.update(seller_amount.to_le_bytes());
        hasher.update(settled_at.to_le_bytes());
        hasher.finalize().into()
    }
}
