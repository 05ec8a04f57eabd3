//! # bazaar-market
//!
//! The transaction plane of the Bazaar engine: five entity state machines
//! (fixed-price listings, offers, English auctions, Dutch auctions, bundle
//! listings) behind one [`Marketplace`] facade.
//!
//! ## Execution model
//!
//! Every mutating operation takes `&mut self`; the exclusive borrow is the
//! serialization point — two operations can never interleave against the
//! same entity. Within an operation the ordering discipline is fixed:
//! validation first, then fallible payment collection, then the status
//! write, and only then outbound transfers (check-effects-interactions), so
//! a terminal status is reached at most once and is written before any
//! external transfer for that settlement is attempted.
//!
//! ## Exit paths
//!
//! Cancellations, auction settlement, and pending-withdrawal claims bypass
//! the pause gate: a suspended market must never trap assets or funds.

pub mod auction;
pub mod bundle;
pub mod dutch;
pub mod listing;
pub mod offer;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use store::{MarketSnapshot, MarketStore, SCHEMA_VERSION};

use bazaar_escrow::{
    AdminGate, AssetCustody, Clock, EscrowLedger, FungibleToken, NativeChannel, PaymentPolicy,
    RoyaltyOracle,
};
use bazaar_settlement::{SaleContext, SettlementEngine};
use bazaar_types::{
    AccountId, AssetRef, ContractId, MarketConfig, MarketError, PaymentMedium, Result, SaleKind,
    SettlementReceipt,
};

/// External capabilities the marketplace calls through but never implements.
pub struct Collaborators {
    /// The account the marketplace custodies assets and funds under.
    pub escrow_account: AccountId,
    pub custody: Box<dyn AssetCustody>,
    pub tokens: Box<dyn FungibleToken>,
    pub native: Box<dyn NativeChannel>,
    /// Optional royalty lookup; absence simply skips the royalty leg.
    pub royalty: Option<Box<dyn RoyaltyOracle>>,
    pub clock: Box<dyn Clock>,
}

/// Marketplace escrow and settlement engine.
pub struct Marketplace {
    pub(crate) config: MarketConfig,
    pub(crate) store: MarketStore,
    pub(crate) ledger: EscrowLedger,
    pub(crate) policy: PaymentPolicy,
    pub(crate) gate: AdminGate,
    pub(crate) settlement: SettlementEngine,
    pub(crate) royalty: Option<Box<dyn RoyaltyOracle>>,
    pub(crate) clock: Box<dyn Clock>,
}

impl Marketplace {
    /// Create a fresh marketplace.
    pub fn new(config: MarketConfig, operator: AccountId, collab: Collaborators) -> Result<Self> {
        config.validate()?;
        let settlement = SettlementEngine::new(config.fee_rate_bps, config.fee_recipient)?;
        Ok(Self {
            config,
            store: MarketStore::new(),
            ledger: EscrowLedger::new(
                collab.escrow_account,
                collab.custody,
                collab.tokens,
                collab.native,
            ),
            policy: PaymentPolicy::new(),
            gate: AdminGate::new(operator),
            settlement,
            royalty: collab.royalty,
            clock: collab.clock,
        })
    }

    /// Rebuild a marketplace from a durable snapshot. Counters continue
    /// where they left off; ids are never reissued.
    pub fn restore(snapshot: MarketSnapshot, collab: Collaborators) -> Result<Self> {
        if snapshot.schema_version != SCHEMA_VERSION {
            return Err(MarketError::Internal(format!(
                "unsupported snapshot schema version {}",
                snapshot.schema_version
            )));
        }
        snapshot.config.validate()?;
        let settlement =
            SettlementEngine::new(snapshot.config.fee_rate_bps, snapshot.config.fee_recipient)?;
        Ok(Self {
            config: snapshot.config,
            store: snapshot.store,
            ledger: EscrowLedger::with_book(
                collab.escrow_account,
                collab.custody,
                collab.tokens,
                collab.native,
                snapshot.book,
            ),
            policy: snapshot.policy,
            gate: snapshot.gate,
            settlement,
            royalty: collab.royalty,
            clock: collab.clock,
        })
    }

    /// Serialize the durable state of this instance.
    #[must_use]
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            schema_version: SCHEMA_VERSION,
            config: self.config.clone(),
            store: self.store.clone(),
            book: self.ledger.book().clone(),
            policy: self.policy.clone(),
            gate: self.gate.clone(),
        }
    }

    // -----------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------

    #[must_use]
    pub fn store(&self) -> &MarketStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.gate.is_paused()
    }

    /// The caller's accrued pending-withdrawal balance.
    #[must_use]
    pub fn pending_of(&self, account: AccountId) -> u128 {
        self.ledger.pending_of(account)
    }

    /// Whether an asset currently sits in marketplace escrow.
    #[must_use]
    pub fn holds_in_escrow(&self, asset: &AssetRef) -> bool {
        self.ledger.holds_asset(asset)
    }

    // -----------------------------------------------------------------
    // Pending withdrawals
    // -----------------------------------------------------------------

    /// Withdraw the caller's full pending balance in the native medium.
    /// Callable by anyone, paused or not.
    pub fn claim_pending(&mut self, caller: AccountId) -> Result<u128> {
        self.ledger.claim_pending(caller)
    }

    // -----------------------------------------------------------------
    // Administrative surface (operator-gated)
    // -----------------------------------------------------------------

    pub fn set_fee_rate(&mut self, caller: AccountId, fee_rate_bps: u32) -> Result<()> {
        self.gate.require_operator(caller)?;
        self.settlement.set_fee_rate(fee_rate_bps)?;
        self.config.fee_rate_bps = fee_rate_bps;
        tracing::info!(fee_rate_bps, "fee rate updated");
        Ok(())
    }

    pub fn set_fee_recipient(&mut self, caller: AccountId, recipient: AccountId) -> Result<()> {
        self.gate.require_operator(caller)?;
        self.settlement.set_fee_recipient(recipient);
        self.config.fee_recipient = recipient;
        Ok(())
    }

    pub fn whitelist_token(&mut self, caller: AccountId, contract: ContractId) -> Result<()> {
        self.gate.require_operator(caller)?;
        self.policy.whitelist_token(contract);
        tracing::info!(%contract, "payment token whitelisted");
        Ok(())
    }

    pub fn delist_token(&mut self, caller: AccountId, contract: ContractId) -> Result<()> {
        self.gate.require_operator(caller)?;
        self.policy.delist_token(contract);
        tracing::info!(%contract, "payment token delisted");
        Ok(())
    }

    pub fn pause(&mut self, caller: AccountId) -> Result<()> {
        self.gate.pause(caller)
    }

    pub fn unpause(&mut self, caller: AccountId) -> Result<()> {
        self.gate.unpause(caller)
    }

    pub fn set_operator(&mut self, caller: AccountId, new_operator: AccountId) -> Result<()> {
        self.gate.set_operator(caller, new_operator)
    }

    // -----------------------------------------------------------------
    // Shared internals
    // -----------------------------------------------------------------

    pub(crate) fn now(&self) -> u64 {
        self.clock.now()
    }

    pub(crate) fn require_future_expiry(&self, expires_at: u64, now: u64) -> Result<()> {
        if expires_at <= now {
            return Err(MarketError::ExpiryInPast { expires_at, now });
        }
        Ok(())
    }

    /// Run the settlement engine for a completed sale. The funds must
    /// already sit in escrow and the entity's terminal status must already
    /// be written.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn settle_sale(
        &mut self,
        kind: SaleKind,
        entity_id: u64,
        seller: AccountId,
        buyer: AccountId,
        royalty_asset: AssetRef,
        medium: PaymentMedium,
        total: u128,
    ) -> Result<SettlementReceipt> {
        let sale = SaleContext {
            kind,
            entity_id,
            seller,
            buyer,
            royalty_asset,
            medium,
            total,
            now: self.now(),
        };
        self.settlement
            .settle(&mut self.ledger, self.royalty.as_deref(), &sale)
    }
}
