//! System-wide constants for the Bazaar engine.

/// Basis-point denominator: rates are expressed out of 10 000.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Hard platform-wide cap on the marketplace fee rate (10%).
pub const MAX_FEE_RATE_BPS: u32 = 1_000;

/// Minimum-increment divisor for English auction bids:
/// the next bid must be at least `highest + highest / 20` (5%, floored).
pub const MIN_BID_INCREMENT_DIVISOR: u128 = 20;

/// Anti-snipe window and extension for English auctions (10 minutes).
/// A bid landing with less than this remaining pushes the end out to
/// `now + ANTI_SNIPE_WINDOW_SECS`.
pub const ANTI_SNIPE_WINDOW_SECS: u64 = 600;

/// Maximum number of assets in a single bundle listing.
pub const MAX_BUNDLE_ASSETS: usize = 20;

/// Default minimum English/Dutch auction duration (10 minutes).
pub const DEFAULT_MIN_AUCTION_DURATION_SECS: u64 = 600;

/// Default maximum English/Dutch auction duration (30 days).
pub const DEFAULT_MAX_AUCTION_DURATION_SECS: u64 = 30 * 24 * 60 * 60;

/// Default marketplace fee rate (2.5%).
pub const DEFAULT_FEE_RATE_BPS: u32 = 250;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Bazaar";
