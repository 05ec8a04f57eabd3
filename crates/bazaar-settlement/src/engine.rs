//! Settlement execution: fee → royalty → seller, through the escrow ledger.

use serde::{Deserialize, Serialize};

use bazaar_escrow::{EscrowLedger, RoyaltyOracle, RoyaltyQuote};
use bazaar_types::{
    constants, AccountId, AssetRef, MarketError, PaymentMedium, Result, SaleKind,
    SettlementReceipt,
};

use crate::split::{fee_of, FundSplit};

/// Everything the engine needs to know about one completed sale.
#[derive(Debug, Clone)]
pub struct SaleContext {
    pub kind: SaleKind,
    pub entity_id: u64,
    pub seller: AccountId,
    pub buyer: AccountId,
    /// The asset whose royalty configuration applies. For a bundle this is
    /// the first asset only.
    pub royalty_asset: AssetRef,
    pub medium: PaymentMedium,
    pub total: u128,
    pub now: u64,
}

/// Executes the deterministic fee/royalty/seller split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementEngine {
    fee_rate_bps: u32,
    fee_recipient: AccountId,
}

impl SettlementEngine {
    pub fn new(fee_rate_bps: u32, fee_recipient: AccountId) -> Result<Self> {
        Self::check_rate(fee_rate_bps)?;
        Ok(Self {
            fee_rate_bps,
            fee_recipient,
        })
    }

    #[must_use]
    pub fn fee_rate_bps(&self) -> u32 {
        self.fee_rate_bps
    }

    #[must_use]
    pub fn fee_recipient(&self) -> AccountId {
        self.fee_recipient
    }

    pub fn set_fee_rate(&mut self, fee_rate_bps: u32) -> Result<()> {
        Self::check_rate(fee_rate_bps)?;
        self.fee_rate_bps = fee_rate_bps;
        Ok(())
    }

    pub fn set_fee_recipient(&mut self, recipient: AccountId) {
        self.fee_recipient = recipient;
    }

    /// Distribute the custodied sale amount.
    ///
    /// The funds must already sit in escrow. Native payouts ride the safe
    /// path: a refused delivery becomes a pending-withdrawal credit, never a
    /// failed sale.
    pub fn settle(
        &self,
        ledger: &mut EscrowLedger,
        royalty_oracle: Option<&dyn RoyaltyOracle>,
        sale: &SaleContext,
    ) -> Result<SettlementReceipt> {
        let fee = fee_of(sale.total, self.fee_rate_bps);
        let remaining = sale.total - fee;
        let royalty = resolve_royalty(royalty_oracle, &sale.royalty_asset, sale.total, remaining);

        let (royalty_receiver, royalty_amount) = match royalty {
            Some((receiver, amount)) => (Some(receiver), amount),
            None => (None, 0),
        };
        let split = FundSplit::compute(sale.total, self.fee_rate_bps, royalty_amount);

        if split.fee > 0 {
            ledger.safe_payout(self.fee_recipient, sale.medium, split.fee)?;
        }
        if let Some(receiver) = royalty_receiver {
            ledger.safe_payout(receiver, sale.medium, split.royalty)?;
        }
        if split.seller > 0 {
            ledger.safe_payout(sale.seller, sale.medium, split.seller)?;
        }

        let receipt = SettlementReceipt::new(
            sale.kind,
            sale.entity_id,
            sale.seller,
            sale.buyer,
            sale.medium,
            sale.total,
            split.fee,
            split.royalty,
            split.seller,
            sale.now,
        );
        debug_assert!(receipt.conserves_total());

        tracing::info!(
            kind = %sale.kind,
            entity = sale.entity_id,
            total = sale.total,
            fee = split.fee,
            royalty = split.royalty,
            seller = split.seller,
            digest = receipt.digest_hex(),
            "sale settled"
        );
        Ok(receipt)
    }

    fn check_rate(bps: u32) -> Result<()> {
        if bps > constants::MAX_FEE_RATE_BPS {
            return Err(MarketError::FeeRateTooHigh {
                bps,
                cap: constants::MAX_FEE_RATE_BPS,
            });
        }
        Ok(())
    }
}

/// Validate the oracle's answer. Absent oracle, `Unsupported`, `Invalid`, a
/// nil receiver, a zero amount, or an amount exceeding the post-fee
/// remainder all mean the royalty leg is skipped entirely — there is no
/// partial royalty.
fn resolve_royalty(
    oracle: Option<&dyn RoyaltyOracle>,
    asset: &AssetRef,
    total: u128,
    remaining: u128,
) -> Option<(AccountId, u128)> {
    let quote = oracle?.quote(asset, total);
    match quote {
        RoyaltyQuote::Supported { receiver, amount } => {
            if receiver.is_zero() || amount == 0 {
                return None;
            }
            if amount > remaining {
                tracing::debug!(
                    asset = %asset,
                    amount,
                    remaining,
                    "royalty quote exceeds remainder; skipped"
                );
                return None;
            }
            Some((receiver, amount))
        }
        RoyaltyQuote::Unsupported | RoyaltyQuote::Invalid => None,
    }
}
