//! Escrow ledger — custodied assets, custodied funds, pending withdrawals.
//!
//! The ledger is the only component that touches the custody and payment
//! collaborators. It keeps its own bookkeeping ([`LedgerBook`]) of everything
//! it holds so conservation can be checked and snapshots taken.
//!
//! Two payout paths exist on purpose:
//! - [`EscrowLedger::send_payment`] — delivery failure is a hard error,
//!   used where failure must propagate (refunding a buyer's excess, claims).
//! - [`EscrowLedger::safe_payout`] — a refused native delivery is absorbed
//!   into the pending-withdrawal map instead of aborting the operation, so
//!   one unreachable recipient can never block settlement for everyone else.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use bazaar_types::{AccountId, AssetRef, ContractId, MarketError, PaymentMedium, Result};

use crate::providers::{AssetCustody, FungibleToken, NativeChannel};

/// Serializable bookkeeping state of the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerBook {
    /// Assets currently in marketplace custody.
    held_assets: HashSet<AssetRef>,
    /// Total custodied native funds, pending withdrawals included.
    custodied_native: u128,
    /// Total custodied funds per token contract.
    custodied_tokens: HashMap<ContractId, u128>,
    /// Amounts owed in the native medium to recipients whose direct payout
    /// could not be delivered. Cleared on claim.
    pending: HashMap<AccountId, u128>,
}

/// Custody plane of the marketplace.
pub struct EscrowLedger {
    escrow_account: AccountId,
    custody: Box<dyn AssetCustody>,
    tokens: Box<dyn FungibleToken>,
    native: Box<dyn NativeChannel>,
    book: LedgerBook,
}

impl EscrowLedger {
    #[must_use]
    pub fn new(
        escrow_account: AccountId,
        custody: Box<dyn AssetCustody>,
        tokens: Box<dyn FungibleToken>,
        native: Box<dyn NativeChannel>,
    ) -> Self {
        Self::with_book(escrow_account, custody, tokens, native, LedgerBook::default())
    }

    /// Rebuild a ledger from a durable snapshot.
    #[must_use]
    pub fn with_book(
        escrow_account: AccountId,
        custody: Box<dyn AssetCustody>,
        tokens: Box<dyn FungibleToken>,
        native: Box<dyn NativeChannel>,
        book: LedgerBook,
    ) -> Self {
        Self {
            escrow_account,
            custody,
            tokens,
            native,
            book,
        }
    }

    #[must_use]
    pub fn escrow_account(&self) -> AccountId {
        self.escrow_account
    }

    #[must_use]
    pub fn book(&self) -> &LedgerBook {
        &self.book
    }

    // -----------------------------------------------------------------
    // Asset custody
    // -----------------------------------------------------------------

    /// Current holder of an asset, per the custody provider.
    pub fn holder_of(&self, asset: &AssetRef) -> Result<AccountId> {
        self.custody.holder_of(asset)
    }

    #[must_use]
    pub fn holds_asset(&self, asset: &AssetRef) -> bool {
        self.book.held_assets.contains(asset)
    }

    /// Move an asset from its owner into marketplace custody.
    pub fn take_asset(&mut self, owner: AccountId, asset: &AssetRef) -> Result<()> {
        self.custody.transfer(asset, owner, self.escrow_account)?;
        self.book.held_assets.insert(*asset);
        Ok(())
    }

    /// Release a custodied asset to `to`.
    pub fn release_asset(&mut self, asset: &AssetRef, to: AccountId) -> Result<()> {
        if !self.book.held_assets.contains(asset) {
            return Err(MarketError::Internal(format!(
                "release of {asset} which is not in custody"
            )));
        }
        self.custody.transfer(asset, self.escrow_account, to)?;
        self.book.held_assets.remove(asset);
        Ok(())
    }

    /// Direct transfer between two accounts, bypassing custody
    /// (offer acceptance moves the asset holder → offerer without escrow).
    pub fn transfer_asset(
        &mut self,
        asset: &AssetRef,
        from: AccountId,
        to: AccountId,
    ) -> Result<()> {
        self.custody.transfer(asset, from, to)
    }

    // -----------------------------------------------------------------
    // Fund movement
    // -----------------------------------------------------------------

    /// Eager funding check for offer creation: the offerer must currently
    /// hold the amount and have pre-authorized the engine to pull it.
    pub fn verify_offer_funding(
        &self,
        payer: AccountId,
        contract: ContractId,
        amount: u128,
    ) -> Result<()> {
        let available = self.tokens.balance_of(contract, payer);
        if available < amount {
            return Err(MarketError::InsufficientTokenBalance {
                needed: amount,
                available,
            });
        }
        let approved = self.tokens.allowance(contract, payer);
        if approved < amount {
            return Err(MarketError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        Ok(())
    }

    /// Collect `amount` from `payer` into escrow.
    ///
    /// Native: the attached value must cover the amount; any excess is
    /// refunded to the payer immediately on the hard-error path. Token: no
    /// native value may be attached; exactly `amount` is pulled against the
    /// payer's pre-authorized allowance.
    pub fn collect_payment(
        &mut self,
        payer: AccountId,
        medium: PaymentMedium,
        amount: u128,
        attached: u128,
    ) -> Result<()> {
        match medium {
            PaymentMedium::Native => {
                if attached < amount {
                    return Err(MarketError::InsufficientAttached {
                        needed: amount,
                        attached,
                    });
                }
                let excess = attached - amount;
                if excess > 0 {
                    self.native.send(payer, excess)?;
                }
                self.book.custodied_native += amount;
                Ok(())
            }
            PaymentMedium::Token(contract) => {
                if attached != 0 {
                    return Err(MarketError::UnexpectedAttached { attached });
                }
                self.tokens.pull(contract, payer, self.escrow_account, amount)?;
                *self.book.custodied_tokens.entry(contract).or_insert(0) += amount;
                Ok(())
            }
        }
    }

    /// Unconditional payout from escrow. Delivery failure is a hard error.
    pub fn send_payment(
        &mut self,
        recipient: AccountId,
        medium: PaymentMedium,
        amount: u128,
    ) -> Result<()> {
        match medium {
            PaymentMedium::Native => {
                self.debit_native(amount)?;
                if let Err(err) = self.native.send(recipient, amount) {
                    self.book.custodied_native += amount;
                    return Err(err);
                }
                Ok(())
            }
            PaymentMedium::Token(contract) => {
                self.debit_token(contract, amount)?;
                if let Err(err) = self.tokens.push(contract, recipient, amount) {
                    *self.book.custodied_tokens.entry(contract).or_insert(0) += amount;
                    return Err(err);
                }
                Ok(())
            }
        }
    }

    /// Payout that must not block the triggering operation.
    ///
    /// A refused native delivery is credited to the recipient's pending
    /// withdrawal balance; the funds stay in custody until claimed. Token
    /// deliveries are push transfers and failure remains a hard error.
    pub fn safe_payout(
        &mut self,
        recipient: AccountId,
        medium: PaymentMedium,
        amount: u128,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        match medium {
            PaymentMedium::Native => {
                self.debit_native(amount)?;
                if self.native.send(recipient, amount).is_err() {
                    self.book.custodied_native += amount;
                    *self.book.pending.entry(recipient).or_insert(0) += amount;
                    tracing::warn!(
                        recipient = %recipient,
                        amount,
                        "native payout refused; credited to pending withdrawals"
                    );
                }
                Ok(())
            }
            PaymentMedium::Token(_) => self.send_payment(recipient, medium, amount),
        }
    }

    /// Withdraw the caller's full pending balance. The balance is cleared
    /// before the transfer; if the caller's own transfer fails it is
    /// restored so the claim can be retried.
    pub fn claim_pending(&mut self, caller: AccountId) -> Result<u128> {
        let amount = self
            .book
            .pending
            .remove(&caller)
            .ok_or(MarketError::NothingToClaim)?;
        if let Err(err) = self.native.send(caller, amount) {
            self.book.pending.insert(caller, amount);
            return Err(err);
        }
        self.debit_native(amount)?;
        tracing::info!(caller = %caller, amount, "pending withdrawal claimed");
        Ok(amount)
    }

    #[must_use]
    pub fn pending_of(&self, account: AccountId) -> u128 {
        self.book.pending.get(&account).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn pending_total(&self) -> u128 {
        self.book.pending.values().sum()
    }

    #[must_use]
    pub fn custodied_native(&self) -> u128 {
        self.book.custodied_native
    }

    #[must_use]
    pub fn custodied_token(&self, contract: ContractId) -> u128 {
        self.book
            .custodied_tokens
            .get(&contract)
            .copied()
            .unwrap_or(0)
    }

    fn debit_native(&mut self, amount: u128) -> Result<()> {
        if self.book.custodied_native < amount {
            return Err(MarketError::Internal(format!(
                "native custody underflow: holding {}, paying {amount}",
                self.book.custodied_native
            )));
        }
        self.book.custodied_native -= amount;
        Ok(())
    }

    fn debit_token(&mut self, contract: ContractId, amount: u128) -> Result<()> {
        let held = self
            .book
            .custodied_tokens
            .get_mut(&contract)
            .ok_or_else(|| MarketError::Internal(format!("no custody for {contract}")))?;
        if *held < amount {
            return Err(MarketError::Internal(format!(
                "token custody underflow: holding {held}, paying {amount}"
            )));
        }
        *held -= amount;
        Ok(())
    }
}
