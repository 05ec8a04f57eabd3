//! # bazaar-types
//!
//! Shared types, errors, and configuration for the **Bazaar** marketplace
//! escrow and settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`ContractId`], [`CollectionId`], [`TokenId`],
//!   [`AssetRef`], plus the per-kind entity ids ([`ListingId`], [`OfferId`],
//!   [`CollectionOfferId`], [`AuctionId`], [`DutchAuctionId`], [`BundleId`])
//! - **Id allocation**: [`EntityCounters`] (monotonic, never reused)
//! - **Payment medium**: [`PaymentMedium`]
//! - **Entities**: [`Listing`], [`Offer`], [`CollectionOffer`], [`Auction`],
//!   [`DutchAuction`], [`BundleListing`] with their status enums
//! - **Receipts**: [`SettlementReceipt`], [`SaleKind`]
//! - **Configuration**: [`MarketConfig`]
//! - **Errors**: [`MarketError`] with `BZR_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod auction;
pub mod bundle;
pub mod config;
pub mod constants;
pub mod counters;
pub mod dutch;
pub mod error;
pub mod ids;
pub mod listing;
pub mod medium;
pub mod offer;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use bazaar_types::{Listing, Auction, MarketError, ...};

pub use auction::*;
pub use bundle::*;
pub use config::*;
pub use counters::*;
pub use dutch::*;
pub use error::*;
pub use ids::*;
pub use listing::*;
pub use medium::*;
pub use offer::*;
pub use receipt::*;

// Constants are accessed via `bazaar_types::constants::FOO`
// (not re-exported to avoid name collisions).
