//! Bundle listing operations: several assets sold atomically as one unit.
//!
//! Escrow of the whole set happens at creation, so the sale itself cannot
//! fail halfway through the assets — by purchase time every asset is
//! already in custody. If escrowing the set fails partway at creation, the
//! assets taken so far are handed back and the bundle is never recorded.

use bazaar_types::{
    AccountId, AssetRef, BundleId, BundleListing, BundleStatus, MarketError, PaymentMedium,
    Result, SaleKind, SettlementReceipt,
};

use crate::Marketplace;

impl Marketplace {
    /// List a set of assets at one fixed price. The caller must hold every
    /// asset; all of them are escrowed together.
    pub fn create_bundle(
        &mut self,
        caller: AccountId,
        assets: Vec<AssetRef>,
        medium: PaymentMedium,
        price: u128,
        expires_at: u64,
    ) -> Result<BundleId> {
        self.gate.require_open()?;
        if price == 0 {
            return Err(MarketError::InvalidPrice);
        }
        if assets.is_empty() {
            return Err(MarketError::InvalidBundle {
                reason: "bundle has no assets".into(),
            });
        }
        if assets.len() > self.config.max_bundle_assets {
            return Err(MarketError::InvalidBundle {
                reason: format!(
                    "{} assets exceeds the limit of {}",
                    assets.len(),
                    self.config.max_bundle_assets
                ),
            });
        }
        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].contains(asset) {
                return Err(MarketError::InvalidBundle {
                    reason: format!("duplicate asset {asset}"),
                });
            }
        }
        self.policy.check_sale_medium(medium)?;
        let now = self.now();
        self.require_future_expiry(expires_at, now)?;

        let mut taken: Vec<AssetRef> = Vec::with_capacity(assets.len());
        for asset in &assets {
            if let Err(err) = self.take_bundle_asset(caller, asset) {
                self.return_taken(caller, &taken);
                return Err(err);
            }
            taken.push(*asset);
        }

        let id = self.store.counters.next_bundle();
        self.store.bundles.insert(
            id,
            BundleListing {
                id,
                seller: caller,
                assets,
                medium,
                price,
                expires_at,
                status: BundleStatus::Active,
                created_at: now,
            },
        );
        tracing::info!(%id, seller = %caller.short(), count = taken.len(), price, "bundle created");
        Ok(id)
    }

    /// Buy a bundle at its asking price. All assets transfer; the royalty
    /// for the whole sale follows the bundle's first asset.
    pub fn buy_bundle(
        &mut self,
        caller: AccountId,
        id: BundleId,
        attached: u128,
    ) -> Result<SettlementReceipt> {
        self.gate.require_open()?;
        let now = self.now();
        let bundle = self.store.bundle(id)?.clone();
        if !bundle.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::Bundle,
            });
        }
        if bundle.is_expired(now) {
            return Err(MarketError::Expired {
                kind: SaleKind::Bundle,
                expired_at: bundle.expires_at,
                now,
            });
        }
        if caller == bundle.seller {
            return Err(MarketError::SelfDeal);
        }
        let royalty_asset = *bundle
            .royalty_asset()
            .ok_or_else(|| MarketError::Internal(format!("bundle {id} has no assets")))?;

        self.ledger
            .collect_payment(caller, bundle.medium, bundle.price, attached)?;
        self.store.bundle_mut(id)?.status = BundleStatus::Sold;

        let receipt = self.settle_sale(
            SaleKind::Bundle,
            id.0,
            bundle.seller,
            caller,
            royalty_asset,
            bundle.medium,
            bundle.price,
        )?;
        for asset in &bundle.assets {
            self.ledger.release_asset(asset, caller)?;
        }
        Ok(receipt)
    }

    /// Cancel an active bundle and return every asset to the seller.
    /// Seller only; bypasses the pause gate.
    pub fn cancel_bundle(&mut self, caller: AccountId, id: BundleId) -> Result<()> {
        let bundle = self.store.bundle(id)?.clone();
        if bundle.seller != caller {
            return Err(MarketError::NotSeller);
        }
        if !bundle.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::Bundle,
            });
        }
        self.store.bundle_mut(id)?.status = BundleStatus::Cancelled;
        for asset in &bundle.assets {
            self.ledger.release_asset(asset, bundle.seller)?;
        }
        tracing::info!(%id, "bundle cancelled");
        Ok(())
    }

    fn take_bundle_asset(&mut self, caller: AccountId, asset: &AssetRef) -> Result<()> {
        if self.ledger.holder_of(asset)? != caller {
            return Err(MarketError::NotAssetHolder { asset: *asset });
        }
        self.ledger.take_asset(caller, asset)
    }

    fn return_taken(&mut self, caller: AccountId, taken: &[AssetRef]) {
        for asset in taken {
            if let Err(err) = self.ledger.release_asset(asset, caller) {
                tracing::error!(%asset, error = %err, "failed to roll back bundle escrow");
            }
        }
    }
}
