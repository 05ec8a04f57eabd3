//! Mock collaborators for tests.
//!
//! Every mock hands out cheap clones sharing one inner state, so a test can
//! keep a handle for assertions after moving a clone into the ledger.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use bazaar_types::{AccountId, AssetRef, ContractId, MarketError, Result};

use crate::providers::{
    AssetCustody, Clock, FungibleToken, NativeChannel, RoyaltyOracle, RoyaltyQuote,
};

// ---------------------------------------------------------------------------
// MockCustody
// ---------------------------------------------------------------------------

/// In-memory asset registry. Transfers succeed only when `from` is the
/// current holder, mirroring a custody provider that rejects unauthorized
/// calls.
#[derive(Clone, Default)]
pub struct MockCustody {
    inner: Arc<Mutex<HashMap<AssetRef, AccountId>>>,
}

impl MockCustody {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&self, asset: AssetRef, owner: AccountId) {
        self.inner.lock().unwrap().insert(asset, owner);
    }

    #[must_use]
    pub fn holder(&self, asset: &AssetRef) -> Option<AccountId> {
        self.inner.lock().unwrap().get(asset).copied()
    }
}

impl AssetCustody for MockCustody {
    fn holder_of(&self, asset: &AssetRef) -> Result<AccountId> {
        self.inner
            .lock()
            .unwrap()
            .get(asset)
            .copied()
            .ok_or_else(|| MarketError::AssetTransferFailed {
                asset: *asset,
                reason: "unknown asset".into(),
            })
    }

    fn transfer(&mut self, asset: &AssetRef, from: AccountId, to: AccountId) -> Result<()> {
        let mut assets = self.inner.lock().unwrap();
        match assets.get(asset) {
            Some(holder) if *holder == from => {
                assets.insert(*asset, to);
                Ok(())
            }
            Some(_) => Err(MarketError::AssetTransferFailed {
                asset: *asset,
                reason: format!("{from} is not the holder"),
            }),
            None => Err(MarketError::AssetTransferFailed {
                asset: *asset,
                reason: "unknown asset".into(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// MockToken
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TokenInner {
    balances: HashMap<(ContractId, AccountId), u128>,
    /// Allowance granted by an owner to the engine, per contract.
    allowances: HashMap<(ContractId, AccountId), u128>,
}

/// In-memory fungible-token provider covering any number of contracts.
#[derive(Clone)]
pub struct MockToken {
    engine: AccountId,
    inner: Arc<Mutex<TokenInner>>,
}

impl MockToken {
    /// `engine` is the marketplace escrow account allowances are granted to.
    #[must_use]
    pub fn new(engine: AccountId) -> Self {
        Self {
            engine,
            inner: Arc::new(Mutex::new(TokenInner::default())),
        }
    }

    pub fn mint(&self, contract: ContractId, account: AccountId, amount: u128) {
        *self
            .inner
            .lock()
            .unwrap()
            .balances
            .entry((contract, account))
            .or_insert(0) += amount;
    }

    /// Owner approves the engine to pull up to `amount`.
    pub fn approve(&self, contract: ContractId, owner: AccountId, amount: u128) {
        self.inner
            .lock()
            .unwrap()
            .allowances
            .insert((contract, owner), amount);
    }

    #[must_use]
    pub fn balance(&self, contract: ContractId, account: AccountId) -> u128 {
        self.inner
            .lock()
            .unwrap()
            .balances
            .get(&(contract, account))
            .copied()
            .unwrap_or(0)
    }
}

impl FungibleToken for MockToken {
    fn balance_of(&self, contract: ContractId, account: AccountId) -> u128 {
        self.balance(contract, account)
    }

    fn allowance(&self, contract: ContractId, owner: AccountId) -> u128 {
        self.inner
            .lock()
            .unwrap()
            .allowances
            .get(&(contract, owner))
            .copied()
            .unwrap_or(0)
    }

    fn pull(
        &mut self,
        contract: ContractId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();

        let approved = inner.allowances.get(&(contract, from)).copied().unwrap_or(0);
        if approved < amount {
            return Err(MarketError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        let available = inner.balances.get(&(contract, from)).copied().unwrap_or(0);
        if available < amount {
            return Err(MarketError::InsufficientTokenBalance {
                needed: amount,
                available,
            });
        }

        inner.allowances.insert((contract, from), approved - amount);
        inner.balances.insert((contract, from), available - amount);
        *inner.balances.entry((contract, to)).or_insert(0) += amount;
        Ok(())
    }

    fn push(&mut self, contract: ContractId, to: AccountId, amount: u128) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let engine = self.engine;
        let held = inner.balances.get(&(contract, engine)).copied().unwrap_or(0);
        if held < amount {
            return Err(MarketError::TokenTransferFailed {
                reason: format!("engine holds {held}, pushing {amount}"),
            });
        }
        inner.balances.insert((contract, engine), held - amount);
        *inner.balances.entry((contract, to)).or_insert(0) += amount;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockNative
// ---------------------------------------------------------------------------

#[derive(Default)]
struct NativeInner {
    balances: HashMap<AccountId, u128>,
    refusing: HashSet<AccountId>,
}

/// In-memory native-currency channel. Individual recipients can be made to
/// refuse delivery, exercising the pending-withdrawal fallback.
#[derive(Clone, Default)]
pub struct MockNative {
    inner: Arc<Mutex<NativeInner>>,
}

impl MockNative {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn balance(&self, account: AccountId) -> u128 {
        self.inner
            .lock()
            .unwrap()
            .balances
            .get(&account)
            .copied()
            .unwrap_or(0)
    }

    /// Make every delivery to `account` fail from now on.
    pub fn refuse_deliveries_to(&self, account: AccountId) {
        self.inner.lock().unwrap().refusing.insert(account);
    }

    pub fn accept_deliveries_to(&self, account: AccountId) {
        self.inner.lock().unwrap().refusing.remove(&account);
    }
}

impl NativeChannel for MockNative {
    fn send(&mut self, recipient: AccountId, amount: u128) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.refusing.contains(&recipient) {
            return Err(MarketError::PayoutFailed { amount });
        }
        *inner.balances.entry(recipient).or_insert(0) += amount;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockRoyalty
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum RoyaltyRule {
    Bps { receiver: AccountId, bps: u32 },
    Fixed { receiver: AccountId, amount: u128 },
    Invalid,
}

/// Configurable royalty oracle keyed by collection.
#[derive(Clone, Default)]
pub struct MockRoyalty {
    rules: Arc<Mutex<HashMap<bazaar_types::CollectionId, RoyaltyRule>>>,
}

impl MockRoyalty {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection pays `bps` of the sale amount to `receiver`.
    pub fn set_rate(&self, collection: bazaar_types::CollectionId, receiver: AccountId, bps: u32) {
        self.rules
            .lock()
            .unwrap()
            .insert(collection, RoyaltyRule::Bps { receiver, bps });
    }

    /// Collection quotes a fixed amount regardless of the sale price.
    pub fn set_fixed(
        &self,
        collection: bazaar_types::CollectionId,
        receiver: AccountId,
        amount: u128,
    ) {
        self.rules
            .lock()
            .unwrap()
            .insert(collection, RoyaltyRule::Fixed { receiver, amount });
    }

    /// Collection answers with an unusable quote.
    pub fn set_invalid(&self, collection: bazaar_types::CollectionId) {
        self.rules
            .lock()
            .unwrap()
            .insert(collection, RoyaltyRule::Invalid);
    }
}

impl RoyaltyOracle for MockRoyalty {
    fn quote(&self, asset: &AssetRef, sale_amount: u128) -> RoyaltyQuote {
        match self.rules.lock().unwrap().get(&asset.collection) {
            Some(RoyaltyRule::Bps { receiver, bps }) => RoyaltyQuote::Supported {
                receiver: *receiver,
                amount: sale_amount * u128::from(*bps) / bazaar_types::constants::BPS_DENOMINATOR,
            },
            Some(RoyaltyRule::Fixed { receiver, amount }) => RoyaltyQuote::Supported {
                receiver: *receiver,
                amount: *amount,
            },
            Some(RoyaltyRule::Invalid) => RoyaltyQuote::Invalid,
            None => RoyaltyQuote::Unsupported,
        }
    }
}

// ---------------------------------------------------------------------------
// TestClock
// ---------------------------------------------------------------------------

/// Manually driven clock. Clones share the same instant.
#[derive(Clone, Default)]
pub struct TestClock {
    now: Arc<AtomicU64>,
}

impl TestClock {
    #[must_use]
    pub fn at(start: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, instant: u64) {
        self.now.store(instant, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_types::{CollectionId, TokenId};

    #[test]
    fn custody_enforces_holder() {
        let custody = MockCustody::new();
        let mut handle = custody.clone();
        let owner = AccountId::new();
        let asset = AssetRef::new(CollectionId::new(), TokenId(1));
        custody.mint(asset, owner);

        let thief = AccountId::new();
        assert!(handle.transfer(&asset, thief, thief).is_err());
        handle.transfer(&asset, owner, thief).unwrap();
        assert_eq!(custody.holder(&asset), Some(thief));
    }

    #[test]
    fn token_pull_consumes_allowance() {
        let engine = AccountId::new();
        let token = MockToken::new(engine);
        let mut handle = token.clone();
        let contract = ContractId::new();
        let owner = AccountId::new();
        token.mint(contract, owner, 100);
        token.approve(contract, owner, 60);

        handle.pull(contract, owner, engine, 60).unwrap();
        assert_eq!(handle.allowance(contract, owner), 0);
        let err = handle.pull(contract, owner, engine, 1).unwrap_err();
        assert!(matches!(err, MarketError::InsufficientAllowance { .. }));
    }

    #[test]
    fn native_refusal_toggles() {
        let native = MockNative::new();
        let mut handle = native.clone();
        let acct = AccountId::new();

        handle.send(acct, 10).unwrap();
        native.refuse_deliveries_to(acct);
        assert!(handle.send(acct, 10).is_err());
        native.accept_deliveries_to(acct);
        handle.send(acct, 5).unwrap();
        assert_eq!(native.balance(acct), 15);
    }

    #[test]
    fn royalty_rules() {
        let oracle = MockRoyalty::new();
        let coll = CollectionId::new();
        let receiver = AccountId::new();
        let asset = AssetRef::new(coll, TokenId(1));

        assert_eq!(oracle.quote(&asset, 1_000), RoyaltyQuote::Unsupported);

        oracle.set_rate(coll, receiver, 500); // 5%
        assert_eq!(
            oracle.quote(&asset, 1_000),
            RoyaltyQuote::Supported {
                receiver,
                amount: 50
            }
        );

        oracle.set_invalid(coll);
        assert_eq!(oracle.quote(&asset, 1_000), RoyaltyQuote::Invalid);
    }

    #[test]
    fn clock_advances() {
        let clock = TestClock::at(1_000);
        let view = clock.clone();
        clock.advance(500);
        assert_eq!(view.now(), 1_500);
        clock.set(99);
        assert_eq!(view.now(), 99);
    }
}
