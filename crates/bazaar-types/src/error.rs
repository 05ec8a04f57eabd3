//! Error types for the Bazaar engine.
//!
//! All errors use the `BZR_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by class:
//! - 1xx: Validation errors (bad price/amount/expiry/duration/bundle shape)
//! - 2xx: Authorization errors (caller is not seller/offerer/holder/operator)
//! - 3xx: State errors (entity missing, not active, expired, wrong phase)
//! - 4xx: Payment errors (attached value, balance, allowance, transfer)
//! - 5xx: Escrow errors (custody transfer, payout delivery, claims)
//! - 6xx: Policy errors (medium not whitelisted, market paused)
//! - 9xx: General / internal errors
//!
//! Only one error class is ever absorbed instead of propagated: a failed
//! native delivery on the safe-payout path degrades to a pending-withdrawal
//! credit inside the escrow ledger and never surfaces here.

use thiserror::Error;

use crate::{
    AssetRef, AuctionId, BundleId, CollectionId, CollectionOfferId, DutchAuctionId, ListingId,
    OfferId, PaymentMedium, SaleKind,
};

/// Central error enum for all Bazaar operations.
#[derive(Debug, Error)]
pub enum MarketError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// Prices must be strictly positive.
    #[error("BZR_ERR_100: Price must be positive")]
    InvalidPrice,

    /// Offer and bid amounts must be strictly positive.
    #[error("BZR_ERR_101: Amount must be positive")]
    InvalidAmount,

    /// The expiry timestamp is not in the future.
    #[error("BZR_ERR_102: Expiry {expires_at} is not after now ({now})")]
    ExpiryInPast { expires_at: u64, now: u64 },

    /// Auction duration is outside the operator-configured band.
    #[error("BZR_ERR_103: Duration {got}s outside allowed band [{min}s, {max}s]")]
    DurationOutOfBand { min: u64, max: u64, got: u64 },

    /// Auction parameters violate a relational invariant
    /// (reserve vs. start price, buy-now vs. reserve, end price vs. start).
    #[error("BZR_ERR_104: Invalid auction parameters: {reason}")]
    InvalidAuctionParams { reason: String },

    /// The bundle asset list is empty, too long, or contains duplicates.
    #[error("BZR_ERR_105: Invalid bundle: {reason}")]
    InvalidBundle { reason: String },

    /// The bid does not meet the current minimum.
    #[error("BZR_ERR_106: Bid {offered} below minimum {minimum}")]
    BidTooLow { minimum: u128, offered: u128 },

    /// The requested fee rate exceeds the platform-wide cap.
    #[error("BZR_ERR_107: Fee rate {bps}bps exceeds cap {cap}bps")]
    FeeRateTooHigh { bps: u32, cap: u32 },

    /// Buyer and seller are the same account.
    #[error("BZR_ERR_108: Buyer and seller are the same account")]
    SelfDeal,

    // =================================================================
    // Authorization Errors (2xx)
    // =================================================================
    /// Only the seller may perform this operation.
    #[error("BZR_ERR_200: Caller is not the seller")]
    NotSeller,

    /// Only the offerer may perform this operation.
    #[error("BZR_ERR_201: Caller is not the offerer")]
    NotOfferer,

    /// The caller does not currently hold the referenced asset.
    #[error("BZR_ERR_202: Caller does not hold asset {asset}")]
    NotAssetHolder { asset: AssetRef },

    /// Only the operator may perform administrative operations.
    #[error("BZR_ERR_203: Caller is not the operator")]
    NotOperator,

    // =================================================================
    // State Errors (3xx)
    // =================================================================
    /// No listing with this id.
    #[error("BZR_ERR_300: Listing not found: {0}")]
    ListingNotFound(ListingId),

    /// No offer with this id.
    #[error("BZR_ERR_301: Offer not found: {0}")]
    OfferNotFound(OfferId),

    /// No collection offer with this id.
    #[error("BZR_ERR_302: Collection offer not found: {0}")]
    CollectionOfferNotFound(CollectionOfferId),

    /// No auction with this id.
    #[error("BZR_ERR_303: Auction not found: {0}")]
    AuctionNotFound(AuctionId),

    /// No Dutch auction with this id.
    #[error("BZR_ERR_304: Dutch auction not found: {0}")]
    DutchAuctionNotFound(DutchAuctionId),

    /// No bundle listing with this id.
    #[error("BZR_ERR_305: Bundle not found: {0}")]
    BundleNotFound(BundleId),

    /// The entity is no longer (or not yet) in the Active state.
    #[error("BZR_ERR_306: {kind} is not active")]
    NotActive { kind: SaleKind },

    /// The entity's expiry has passed.
    #[error("BZR_ERR_307: {kind} expired at {expired_at} (now {now})")]
    Expired {
        kind: SaleKind,
        expired_at: u64,
        now: u64,
    },

    /// Bidding on an auction before its scheduled start.
    #[error("BZR_ERR_308: Auction starts at {starts_at} (now {now})")]
    AuctionNotStarted { starts_at: u64, now: u64 },

    /// Settling an auction before its end time.
    #[error("BZR_ERR_309: Auction still running until {ends_at} (now {now})")]
    AuctionStillRunning { ends_at: u64, now: u64 },

    /// Bidding on an auction after its end time.
    #[error("BZR_ERR_310: Auction bidding closed at {ended_at} (now {now})")]
    AuctionClosed { ended_at: u64, now: u64 },

    /// Cancelling an auction that has already received bids.
    #[error("BZR_ERR_311: Auction has {bid_count} bid(s) and cannot be cancelled")]
    AuctionHasBids { bid_count: u32 },

    /// The nominated asset does not belong to the offered collection.
    #[error("BZR_ERR_312: Asset collection {got} does not match offer collection {expected}")]
    WrongCollection {
        expected: CollectionId,
        got: CollectionId,
    },

    // =================================================================
    // Payment Errors (4xx)
    // =================================================================
    /// Not enough native value attached to the call.
    #[error("BZR_ERR_400: Attached value {attached} below required {needed}")]
    InsufficientAttached { needed: u128, attached: u128 },

    /// Native value attached to a token-denominated operation.
    #[error("BZR_ERR_401: Unexpected attached value {attached} for token payment")]
    UnexpectedAttached { attached: u128 },

    /// The payer's token balance does not cover the amount.
    #[error("BZR_ERR_402: Insufficient token balance: need {needed}, have {available}")]
    InsufficientTokenBalance { needed: u128, available: u128 },

    /// The payer has not pre-authorized the engine for the amount.
    #[error("BZR_ERR_403: Insufficient allowance: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u128, approved: u128 },

    /// The token contract rejected a transfer.
    #[error("BZR_ERR_404: Token transfer failed: {reason}")]
    TokenTransferFailed { reason: String },

    // =================================================================
    // Escrow Errors (5xx)
    // =================================================================
    /// The asset custody provider rejected a transfer.
    #[error("BZR_ERR_500: Asset transfer failed for {asset}: {reason}")]
    AssetTransferFailed { asset: AssetRef, reason: String },

    /// A hard-path native payout could not be delivered.
    #[error("BZR_ERR_501: Payout of {amount} could not be delivered")]
    PayoutFailed { amount: u128 },

    /// The caller has no pending-withdrawal balance to claim.
    #[error("BZR_ERR_502: Nothing to claim")]
    NothingToClaim,

    // =================================================================
    // Policy Errors (6xx)
    // =================================================================
    /// The payment medium is not accepted for this operation.
    #[error("BZR_ERR_600: Payment medium {medium} is not whitelisted")]
    MediumNotAccepted { medium: PaymentMedium },

    /// Offers must be denominated in a fungible token (or escrowed natively).
    #[error("BZR_ERR_601: Native medium not allowed for pull-funded offers")]
    NativeNotAllowedForOffers,

    /// The market is paused; only exit operations are permitted.
    #[error("BZR_ERR_602: Market is paused")]
    MarketPaused,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error (bookkeeping invariant broken).
    #[error("BZR_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = MarketError::ListingNotFound(ListingId(3));
        let msg = format!("{err}");
        assert!(msg.starts_with("BZR_ERR_300"), "Got: {msg}");
        assert!(msg.contains("listing:3"));
    }

    #[test]
    fn bid_too_low_display() {
        let err = MarketError::BidTooLow {
            minimum: 105,
            offered: 104,
        };
        let msg = format!("{err}");
        assert!(msg.contains("BZR_ERR_106"));
        assert!(msg.contains("105"));
        assert!(msg.contains("104"));
    }

    #[test]
    fn allowance_error_carries_both_amounts() {
        let err = MarketError::InsufficientAllowance {
            needed: 500,
            approved: 100,
        };
        let msg = format!("{err}");
        assert!(msg.contains("500"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn all_errors_have_bzr_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(MarketError::InvalidPrice),
            Box::new(MarketError::SelfDeal),
            Box::new(MarketError::NotSeller),
            Box::new(MarketError::MarketPaused),
            Box::new(MarketError::NothingToClaim),
            Box::new(MarketError::Internal("test".into())),
            Box::new(MarketError::AuctionHasBids { bid_count: 2 }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("BZR_ERR_"),
                "Error missing BZR_ERR_ prefix: {msg}"
            );
        }
    }
}
