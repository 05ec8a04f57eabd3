//! Offer operations: per-asset offers and collection-wide offers.
//!
//! Two funding modes. Pull-funded offers are token-denominated; balance and
//! allowance are verified eagerly at creation and the amount is pulled only
//! at acceptance. Escrowed offers wrap attached native value at creation;
//! acceptance spends the custodied funds and cancellation refunds them on
//! the hard-error path.
//!
//! The offered-on asset is never escrowed — the holder keeps it until they
//! accept, at which point it transfers directly to the offerer.

use bazaar_types::{
    AccountId, AssetRef, CollectionId, CollectionOffer, CollectionOfferId, MarketError, Offer,
    OfferFunding, OfferId, OfferStatus, PaymentMedium, Result, SaleKind, SettlementReceipt,
};

use crate::Marketplace;

impl Marketplace {
    /// Make a pull-funded offer on a specific asset. Token medium only; the
    /// offerer must already hold the amount and have approved the engine.
    pub fn make_offer(
        &mut self,
        caller: AccountId,
        asset: AssetRef,
        medium: PaymentMedium,
        amount: u128,
        expires_at: u64,
    ) -> Result<OfferId> {
        self.gate.require_open()?;
        if amount == 0 {
            return Err(MarketError::InvalidAmount);
        }
        self.policy.check_offer_medium(medium)?;
        let now = self.now();
        self.require_future_expiry(expires_at, now)?;
        if let Some(contract) = medium.token_contract() {
            self.ledger.verify_offer_funding(caller, contract, amount)?;
        }

        let id = self.store.counters.next_offer();
        self.store.offers.insert(
            id,
            Offer {
                id,
                offerer: caller,
                asset,
                medium,
                amount,
                expires_at,
                funding: OfferFunding::Approval,
                status: OfferStatus::Active,
                created_at: now,
            },
        );
        tracing::info!(%id, offerer = %caller.short(), %asset, amount, "offer created");
        Ok(id)
    }

    /// Make an offer funded by attached native value. The attachment is
    /// escrowed in full as the offer amount.
    pub fn make_escrowed_offer(
        &mut self,
        caller: AccountId,
        asset: AssetRef,
        expires_at: u64,
        attached: u128,
    ) -> Result<OfferId> {
        self.gate.require_open()?;
        if attached == 0 {
            return Err(MarketError::InvalidAmount);
        }
        let now = self.now();
        self.require_future_expiry(expires_at, now)?;
        self.ledger
            .collect_payment(caller, PaymentMedium::Native, attached, attached)?;

        let id = self.store.counters.next_offer();
        self.store.offers.insert(
            id,
            Offer {
                id,
                offerer: caller,
                asset,
                medium: PaymentMedium::Native,
                amount: attached,
                expires_at,
                funding: OfferFunding::Escrowed,
                status: OfferStatus::Active,
                created_at: now,
            },
        );
        tracing::info!(%id, offerer = %caller.short(), %asset, amount = attached, "escrowed offer created");
        Ok(id)
    }

    /// Accept an offer on an asset the caller holds. The asset moves
    /// directly from the holder to the offerer.
    pub fn accept_offer(&mut self, caller: AccountId, id: OfferId) -> Result<SettlementReceipt> {
        self.gate.require_open()?;
        let now = self.now();
        let offer = self.store.offer(id)?.clone();
        check_acceptable(
            offer.status,
            offer.expires_at,
            offer.offerer,
            caller,
            SaleKind::Offer,
            now,
        )?;
        if self.ledger.holder_of(&offer.asset)? != caller {
            return Err(MarketError::NotAssetHolder { asset: offer.asset });
        }

        // Escrowed funds are already custodied; pull-funded offers collect now.
        if offer.funding == OfferFunding::Approval {
            self.ledger
                .collect_payment(offer.offerer, offer.medium, offer.amount, 0)?;
        }
        self.store.offer_mut(id)?.status = OfferStatus::Accepted;

        let receipt = self.settle_sale(
            SaleKind::Offer,
            id.0,
            caller,
            offer.offerer,
            offer.asset,
            offer.medium,
            offer.amount,
        )?;
        self.ledger
            .transfer_asset(&offer.asset, caller, offer.offerer)?;
        Ok(receipt)
    }

    /// Cancel an offer. Offerer only; bypasses the pause gate. Escrowed
    /// funds are refunded on the hard path — the offerer initiated the call
    /// and a failed refund must surface, not degrade.
    pub fn cancel_offer(&mut self, caller: AccountId, id: OfferId) -> Result<()> {
        let offer = self.store.offer(id)?.clone();
        if offer.offerer != caller {
            return Err(MarketError::NotOfferer);
        }
        if !offer.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::Offer,
            });
        }
        self.store.offer_mut(id)?.status = OfferStatus::Cancelled;
        if offer.funding == OfferFunding::Escrowed {
            self.ledger
                .send_payment(offer.offerer, PaymentMedium::Native, offer.amount)?;
        }
        tracing::info!(%id, "offer cancelled");
        Ok(())
    }

    /// Make a pull-funded offer on any asset of a collection.
    pub fn make_collection_offer(
        &mut self,
        caller: AccountId,
        collection: CollectionId,
        medium: PaymentMedium,
        amount: u128,
        expires_at: u64,
    ) -> Result<CollectionOfferId> {
        self.gate.require_open()?;
        if amount == 0 {
            return Err(MarketError::InvalidAmount);
        }
        self.policy.check_offer_medium(medium)?;
        let now = self.now();
        self.require_future_expiry(expires_at, now)?;
        if let Some(contract) = medium.token_contract() {
            self.ledger.verify_offer_funding(caller, contract, amount)?;
        }

        let id = self.store.counters.next_collection_offer();
        self.store.collection_offers.insert(
            id,
            CollectionOffer {
                id,
                offerer: caller,
                collection,
                medium,
                amount,
                expires_at,
                funding: OfferFunding::Approval,
                status: OfferStatus::Active,
                created_at: now,
            },
        );
        tracing::info!(%id, offerer = %caller.short(), %collection, amount, "collection offer created");
        Ok(id)
    }

    /// Make a collection offer funded by attached native value.
    pub fn make_escrowed_collection_offer(
        &mut self,
        caller: AccountId,
        collection: CollectionId,
        expires_at: u64,
        attached: u128,
    ) -> Result<CollectionOfferId> {
        self.gate.require_open()?;
        if attached == 0 {
            return Err(MarketError::InvalidAmount);
        }
        let now = self.now();
        self.require_future_expiry(expires_at, now)?;
        self.ledger
            .collect_payment(caller, PaymentMedium::Native, attached, attached)?;

        let id = self.store.counters.next_collection_offer();
        self.store.collection_offers.insert(
            id,
            CollectionOffer {
                id,
                offerer: caller,
                collection,
                medium: PaymentMedium::Native,
                amount: attached,
                expires_at,
                funding: OfferFunding::Escrowed,
                status: OfferStatus::Active,
                created_at: now,
            },
        );
        Ok(id)
    }

    /// Accept a collection offer with an asset the caller holds. The caller
    /// nominates which asset of the collection is sold; its royalty
    /// configuration prices the sale.
    pub fn accept_collection_offer(
        &mut self,
        caller: AccountId,
        id: CollectionOfferId,
        asset: AssetRef,
    ) -> Result<SettlementReceipt> {
        self.gate.require_open()?;
        let now = self.now();
        let offer = self.store.collection_offer(id)?.clone();
        check_acceptable(
            offer.status,
            offer.expires_at,
            offer.offerer,
            caller,
            SaleKind::CollectionOffer,
            now,
        )?;
        if asset.collection != offer.collection {
            return Err(MarketError::WrongCollection {
                expected: offer.collection,
                got: asset.collection,
            });
        }
        if self.ledger.holder_of(&asset)? != caller {
            return Err(MarketError::NotAssetHolder { asset });
        }

        if offer.funding == OfferFunding::Approval {
            self.ledger
                .collect_payment(offer.offerer, offer.medium, offer.amount, 0)?;
        }
        self.store.collection_offer_mut(id)?.status = OfferStatus::Accepted;

        let receipt = self.settle_sale(
            SaleKind::CollectionOffer,
            id.0,
            caller,
            offer.offerer,
            asset,
            offer.medium,
            offer.amount,
        )?;
        self.ledger.transfer_asset(&asset, caller, offer.offerer)?;
        Ok(receipt)
    }

    /// Cancel a collection offer. Offerer only; bypasses the pause gate.
    pub fn cancel_collection_offer(
        &mut self,
        caller: AccountId,
        id: CollectionOfferId,
    ) -> Result<()> {
        let offer = self.store.collection_offer(id)?.clone();
        if offer.offerer != caller {
            return Err(MarketError::NotOfferer);
        }
        if !offer.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::CollectionOffer,
            });
        }
        self.store.collection_offer_mut(id)?.status = OfferStatus::Cancelled;
        if offer.funding == OfferFunding::Escrowed {
            self.ledger
                .send_payment(offer.offerer, PaymentMedium::Native, offer.amount)?;
        }
        tracing::info!(%id, "collection offer cancelled");
        Ok(())
    }

}

/// Common gate for accepting either offer flavor: must be active, unexpired,
/// and not the offerer's own.
fn check_acceptable(
    status: OfferStatus,
    expires_at: u64,
    offerer: AccountId,
    caller: AccountId,
    kind: SaleKind,
    now: u64,
) -> Result<()> {
    if status != OfferStatus::Active {
        return Err(MarketError::NotActive { kind });
    }
    if now >= expires_at {
        return Err(MarketError::Expired {
            kind,
            expired_at: expires_at,
            now,
        });
    }
    if offerer == caller {
        return Err(MarketError::SelfDeal);
    }
    Ok(())
}
