//! Capability traits for the engine's external collaborators.
//!
//! Every external call is synchronous and returns a success/failure result;
//! the engine never suspends. Implementations wrap whatever substrate hosts
//! the engine (a chain runtime, a database, an RPC client); the core only
//! ever sees these traits.

use bazaar_types::{AccountId, AssetRef, ContractId, Result};

/// Asset custody provider: moves non-fungible assets between accounts and
/// answers holder queries. Transfers must fail cleanly when `from` does not
/// hold the asset or the engine is not authorized.
pub trait AssetCustody {
    /// Current holder of the asset.
    fn holder_of(&self, asset: &AssetRef) -> Result<AccountId>;

    /// Move `asset` from `from` to `to`.
    fn transfer(&mut self, asset: &AssetRef, from: AccountId, to: AccountId) -> Result<()>;
}

/// Fungible-token payment provider with pull/push semantics.
///
/// `allowance` reports what `owner` has pre-authorized *the engine* to pull;
/// `pull` consumes that allowance, `push` spends the engine's own balance.
pub trait FungibleToken {
    fn balance_of(&self, contract: ContractId, account: AccountId) -> u128;

    fn allowance(&self, contract: ContractId, owner: AccountId) -> u128;

    /// Pull `amount` from `from` (against its allowance) to `to`.
    fn pull(
        &mut self,
        contract: ContractId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<()>;

    /// Push `amount` from the engine's own balance to `to`.
    fn push(&mut self, contract: ContractId, to: AccountId, amount: u128) -> Result<()>;
}

/// Native-currency delivery channel.
///
/// Unlike token transfers, native delivery can be refused by the recipient.
/// The ledger decides per call site whether a refusal is a hard error or
/// degrades into a pending-withdrawal credit.
pub trait NativeChannel {
    fn send(&mut self, recipient: AccountId, amount: u128) -> Result<()>;
}

/// Tagged result of a royalty lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoyaltyQuote {
    /// Pay `amount` to `receiver`.
    Supported { receiver: AccountId, amount: u128 },
    /// The asset's collection does not configure royalties.
    Unsupported,
    /// The lookup answered but the answer is unusable.
    Invalid,
}

/// Optional royalty lookup collaborator. All non-`Supported` answers are
/// treated identically: the royalty leg is skipped entirely.
pub trait RoyaltyOracle {
    fn quote(&self, asset: &AssetRef, sale_amount: u128) -> RoyaltyQuote;
}

/// Time source, in whole seconds since the UNIX epoch.
pub trait Clock {
    fn now(&self) -> u64;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_past_2020() {
        let now = SystemClock.now();
        assert!(now > 1_577_836_800, "clock reads {now}");
    }

    #[test]
    fn royalty_quote_variants_compare() {
        let receiver = AccountId::new();
        let a = RoyaltyQuote::Supported {
            receiver,
            amount: 10,
        };
        let b = RoyaltyQuote::Supported {
            receiver,
            amount: 10,
        };
        assert_eq!(a, b);
        assert_ne!(a, RoyaltyQuote::Unsupported);
        assert_ne!(RoyaltyQuote::Unsupported, RoyaltyQuote::Invalid);
    }
}
