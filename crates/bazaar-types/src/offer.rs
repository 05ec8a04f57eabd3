//! Buyer-initiated price proposals: per-asset offers and collection offers.
//!
//! Pull-funded (`Approval`) offers are denominated in a whitelisted fungible
//! token; the amount is pulled from the offerer only at acceptance, but the
//! balance and allowance are checked eagerly at creation so a doomed offer is
//! rejected up front. Escrowed offers wrap attached native value at creation
//! and hold it in the ledger until acceptance or cancellation.

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetRef, CollectionId, CollectionOfferId, OfferId, PaymentMedium};

/// Lifecycle status of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferStatus {
    Active,
    Accepted,
    Cancelled,
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Accepted => write!(f, "ACCEPTED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// How the offer amount is funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferFunding {
    /// Pulled from the offerer's pre-authorized token balance at acceptance.
    Approval,
    /// Native value escrowed by the ledger at creation; no pull at acceptance,
    /// refunded directly on cancellation.
    Escrowed,
}

/// An offer on one specific asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub offerer: AccountId,
    pub asset: AssetRef,
    pub medium: PaymentMedium,
    pub amount: u128,
    pub expires_at: u64,
    pub funding: OfferFunding,
    pub status: OfferStatus,
    pub created_at: u64,
}

impl Offer {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == OfferStatus::Active
    }

    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

/// An offer on any asset within a collection. The accepting holder nominates
/// which asset is sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionOffer {
    pub id: CollectionOfferId,
    pub offerer: AccountId,
    pub collection: CollectionId,
    pub medium: PaymentMedium,
    pub amount: u128,
    pub expires_at: u64,
    pub funding: OfferFunding,
    pub status: OfferStatus,
    pub created_at: u64,
}

impl CollectionOffer {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == OfferStatus::Active
    }

    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContractId, TokenId};

    #[test]
    fn offer_predicates() {
        let offer = Offer {
            id: OfferId(1),
            offerer: AccountId::new(),
            asset: AssetRef::new(CollectionId::new(), TokenId(4)),
            medium: PaymentMedium::Token(ContractId::new()),
            amount: 250,
            expires_at: 2_000,
            funding: OfferFunding::Approval,
            status: OfferStatus::Active,
            created_at: 1_000,
        };
        assert!(offer.is_active());
        assert!(!offer.is_expired(1_999));
        assert!(offer.is_expired(2_000));
    }

    #[test]
    fn collection_offer_terminal_status() {
        let mut offer = CollectionOffer {
            id: CollectionOfferId(1),
            offerer: AccountId::new(),
            collection: CollectionId::new(),
            medium: PaymentMedium::Native,
            amount: 90,
            expires_at: 2_000,
            funding: OfferFunding::Escrowed,
            status: OfferStatus::Active,
            created_at: 1_000,
        };
        offer.status = OfferStatus::Accepted;
        assert!(!offer.is_active());
    }
}
