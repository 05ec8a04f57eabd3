//! Durable entity storage.
//!
//! The store is plain data behind a versioned snapshot boundary: entity maps
//! plus the id counters, all `serde`-serializable. The engine's logic is
//! indifferent to whether a store was freshly created or restored — counters
//! and entity maps are loaded state, never reinitialized.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use bazaar_escrow::{AdminGate, LedgerBook, PaymentPolicy};
use bazaar_types::{
    Auction, AuctionId, BundleId, BundleListing, CollectionOffer, CollectionOfferId, DutchAuction,
    DutchAuctionId, EntityCounters, Listing, ListingId, MarketConfig, MarketError, Offer, OfferId,
    Result,
};

/// Current snapshot schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// All entity records and counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketStore {
    pub(crate) counters: EntityCounters,
    pub(crate) listings: HashMap<ListingId, Listing>,
    pub(crate) offers: HashMap<OfferId, Offer>,
    pub(crate) collection_offers: HashMap<CollectionOfferId, CollectionOffer>,
    pub(crate) auctions: HashMap<AuctionId, Auction>,
    pub(crate) dutch_auctions: HashMap<DutchAuctionId, DutchAuction>,
    pub(crate) bundles: HashMap<BundleId, BundleListing>,
}

impl MarketStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listing(&self, id: ListingId) -> Result<&Listing> {
        self.listings.get(&id).ok_or(MarketError::ListingNotFound(id))
    }

    pub(crate) fn listing_mut(&mut self, id: ListingId) -> Result<&mut Listing> {
        self.listings
            .get_mut(&id)
            .ok_or(MarketError::ListingNotFound(id))
    }

    pub fn offer(&self, id: OfferId) -> Result<&Offer> {
        self.offers.get(&id).ok_or(MarketError::OfferNotFound(id))
    }

    pub(crate) fn offer_mut(&mut self, id: OfferId) -> Result<&mut Offer> {
        self.offers.get_mut(&id).ok_or(MarketError::OfferNotFound(id))
    }

    pub fn collection_offer(&self, id: CollectionOfferId) -> Result<&CollectionOffer> {
        self.collection_offers
            .get(&id)
            .ok_or(MarketError::CollectionOfferNotFound(id))
    }

    pub(crate) fn collection_offer_mut(
        &mut self,
        id: CollectionOfferId,
    ) -> Result<&mut CollectionOffer> {
        self.collection_offers
            .get_mut(&id)
            .ok_or(MarketError::CollectionOfferNotFound(id))
    }

    pub fn auction(&self, id: AuctionId) -> Result<&Auction> {
        self.auctions.get(&id).ok_or(MarketError::AuctionNotFound(id))
    }

    pub(crate) fn auction_mut(&mut self, id: AuctionId) -> Result<&mut Auction> {
        self.auctions
            .get_mut(&id)
            .ok_or(MarketError::AuctionNotFound(id))
    }

    pub fn dutch_auction(&self, id: DutchAuctionId) -> Result<&DutchAuction> {
        self.dutch_auctions
            .get(&id)
            .ok_or(MarketError::DutchAuctionNotFound(id))
    }

    pub(crate) fn dutch_auction_mut(&mut self, id: DutchAuctionId) -> Result<&mut DutchAuction> {
        self.dutch_auctions
            .get_mut(&id)
            .ok_or(MarketError::DutchAuctionNotFound(id))
    }

    pub fn bundle(&self, id: BundleId) -> Result<&BundleListing> {
        self.bundles.get(&id).ok_or(MarketError::BundleNotFound(id))
    }

    pub(crate) fn bundle_mut(&mut self, id: BundleId) -> Result<&mut BundleListing> {
        self.bundles.get_mut(&id).ok_or(MarketError::BundleNotFound(id))
    }
}

/// Versioned durable snapshot of a whole marketplace instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub schema_version: u32,
    pub config: MarketConfig,
    pub store: MarketStore,
    pub book: LedgerBook,
    pub policy: PaymentPolicy,
    pub gate: AdminGate,
}
