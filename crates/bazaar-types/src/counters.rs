//! Per-kind entity id allocation.
//!
//! Every entity kind has its own counter starting at 1. Counters are part of
//! the durable snapshot and only ever move forward, so an id is never reused
//! — not within a run, and not across a restore.

use serde::{Deserialize, Serialize};

use crate::{AuctionId, BundleId, CollectionOfferId, DutchAuctionId, ListingId, OfferId};

/// Monotonic id allocator for all entity kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounters {
    listings: u64,
    offers: u64,
    collection_offers: u64,
    auctions: u64,
    dutch_auctions: u64,
    bundles: u64,
}

impl EntityCounters {
    /// Fresh counters; the first allocated id of every kind is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_listing(&mut self) -> ListingId {
        self.listings += 1;
        ListingId(self.listings)
    }

    pub fn next_offer(&mut self) -> OfferId {
        self.offers += 1;
        OfferId(self.offers)
    }

    pub fn next_collection_offer(&mut self) -> CollectionOfferId {
        self.collection_offers += 1;
        CollectionOfferId(self.collection_offers)
    }

    pub fn next_auction(&mut self) -> AuctionId {
        self.auctions += 1;
        AuctionId(self.auctions)
    }

    pub fn next_dutch_auction(&mut self) -> DutchAuctionId {
        self.dutch_auctions += 1;
        DutchAuctionId(self.dutch_auctions)
    }

    pub fn next_bundle(&mut self) -> BundleId {
        self.bundles += 1;
        BundleId(self.bundles)
    }
}
