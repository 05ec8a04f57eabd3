//! # bazaar-settlement
//!
//! Fund-distribution plane of the Bazaar engine.
//!
//! Given a total sale amount, the [`SettlementEngine`]:
//! 1. Computes the marketplace fee (basis points, floored)
//! 2. Queries the optional royalty oracle and validates its quote
//! 3. Pays fee → royalty → seller through the escrow ledger
//! 4. Emits a digest-sealed [`bazaar_types::SettlementReceipt`]
//!
//! The split is exact on every path: `fee + royalty + seller == total`,
//! with no rounding remainder left unaccounted.

pub mod engine;
pub mod split;

pub use engine::{SaleContext, SettlementEngine};
pub use split::FundSplit;
