//! # bazaar-escrow
//!
//! Custody plane of the Bazaar engine: the [`EscrowLedger`] (single source of
//! truth for custodied assets, custodied funds, and pending withdrawals), the
//! [`PaymentPolicy`] whitelist, the [`AdminGate`] pause/operator middleware,
//! and the capability traits the core calls through but never implements:
//!
//! - [`AssetCustody`] — "transfer asset X from A to B", "who holds X"
//! - [`FungibleToken`] — balance / allowance / pull / push
//! - [`NativeChannel`] — native payout delivery (the only fallible-by-design leg)
//! - [`RoyaltyOracle`] — optional royalty lookup with a tagged result
//! - [`Clock`] — time source, injectable for tests
//!
//! Mock collaborators live in [`mock`] behind the `test-helpers` feature.

pub mod gate;
pub mod ledger;
pub mod policy;
pub mod providers;

#[cfg(any(test, feature = "test-helpers"))]
pub mod mock;

pub use gate::AdminGate;
pub use ledger::{EscrowLedger, LedgerBook};
pub use policy::PaymentPolicy;
pub use providers::{
    AssetCustody, Clock, FungibleToken, NativeChannel, RoyaltyOracle, RoyaltyQuote, SystemClock,
};
