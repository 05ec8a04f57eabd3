//! Fixed-price listing operations.
//!
//! The asset moves into marketplace custody at creation and leaves it
//! exactly once: to the buyer on sale, or back to the seller on
//! cancellation. An expired listing can no longer be bought but stays
//! cancellable so the asset is never trapped.

use bazaar_types::{
    AccountId, AssetRef, ListingId, ListingStatus, MarketError, PaymentMedium, Result, SaleKind,
    SettlementReceipt,
};

use crate::Marketplace;

impl Marketplace {
    /// List an asset at a fixed price. The caller must hold the asset; it is
    /// escrowed until the listing resolves.
    pub fn list(
        &mut self,
        caller: AccountId,
        asset: AssetRef,
        medium: PaymentMedium,
        price: u128,
        expires_at: u64,
    ) -> Result<ListingId> {
        self.gate.require_open()?;
        if price == 0 {
            return Err(MarketError::InvalidPrice);
        }
        self.policy.check_sale_medium(medium)?;
        let now = self.now();
        self.require_future_expiry(expires_at, now)?;
        if self.ledger.holder_of(&asset)? != caller {
            return Err(MarketError::NotAssetHolder { asset });
        }

        self.ledger.take_asset(caller, &asset)?;
        let id = self.store.counters.next_listing();
        self.store.listings.insert(
            id,
            bazaar_types::Listing {
                id,
                seller: caller,
                asset,
                medium,
                price,
                expires_at,
                status: ListingStatus::Active,
                created_at: now,
            },
        );
        tracing::info!(%id, seller = %caller.short(), %asset, price, "listing created");
        Ok(id)
    }

    /// Change the asking price of an active listing. Seller only.
    pub fn update_listing_price(
        &mut self,
        caller: AccountId,
        id: ListingId,
        new_price: u128,
    ) -> Result<()> {
        self.gate.require_open()?;
        if new_price == 0 {
            return Err(MarketError::InvalidPrice);
        }
        let now = self.now();
        let listing = self.store.listing_mut(id)?;
        if listing.seller != caller {
            return Err(MarketError::NotSeller);
        }
        if !listing.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::Listing,
            });
        }
        if listing.is_expired(now) {
            return Err(MarketError::Expired {
                kind: SaleKind::Listing,
                expired_at: listing.expires_at,
                now,
            });
        }
        listing.price = new_price;
        tracing::info!(%id, new_price, "listing repriced");
        Ok(())
    }

    /// Buy a listed asset at its asking price.
    ///
    /// `attached` is native value accompanying the call; any excess over the
    /// price is refunded before escrow is credited. Token-denominated
    /// listings pull the price against the buyer's allowance and accept no
    /// attached value.
    pub fn buy(
        &mut self,
        caller: AccountId,
        id: ListingId,
        attached: u128,
    ) -> Result<SettlementReceipt> {
        self.gate.require_open()?;
        let now = self.now();
        let listing = self.store.listing(id)?.clone();
        if !listing.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::Listing,
            });
        }
        if listing.is_expired(now) {
            return Err(MarketError::Expired {
                kind: SaleKind::Listing,
                expired_at: listing.expires_at,
                now,
            });
        }
        if caller == listing.seller {
            return Err(MarketError::SelfDeal);
        }

        // Funds first: the only fallible step before the terminal status.
        self.ledger
            .collect_payment(caller, listing.medium, listing.price, attached)?;
        self.store.listing_mut(id)?.status = ListingStatus::Sold;

        let receipt = self.settle_sale(
            SaleKind::Listing,
            id.0,
            listing.seller,
            caller,
            listing.asset,
            listing.medium,
            listing.price,
        )?;
        self.ledger.release_asset(&listing.asset, caller)?;
        Ok(receipt)
    }

    /// Cancel an active listing and return the asset to the seller.
    /// Bypasses the pause gate.
    pub fn cancel_listing(&mut self, caller: AccountId, id: ListingId) -> Result<()> {
        let listing = self.store.listing(id)?.clone();
        if listing.seller != caller {
            return Err(MarketError::NotSeller);
        }
        if !listing.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::Listing,
            });
        }
        self.store.listing_mut(id)?.status = ListingStatus::Cancelled;
        self.ledger.release_asset(&listing.asset, listing.seller)?;
        tracing::info!(%id, "listing cancelled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::Harness;
    use bazaar_types::{ListingId, ListingStatus, MarketError, PaymentMedium, SaleKind};

    #[test]
    fn list_escrows_the_asset() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);

        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now() + 1_000)
            .unwrap();
        assert_eq!(id, ListingId(1));
        assert_eq!(h.custody.holder(&asset), Some(h.escrow));
        assert!(h.mkt.store().listing(id).unwrap().is_active());
    }

    #[test]
    fn listing_requires_holding_the_asset() {
        let mut h = Harness::new();
        let owner = h.account();
        let asset = h.mint_asset(owner);

        let err = h
            .mkt
            .list(h.account(), asset, PaymentMedium::Native, 100, h.now() + 1_000)
            .unwrap_err();
        assert!(matches!(err, MarketError::NotAssetHolder { .. }));
    }

    #[test]
    fn zero_price_and_past_expiry_rejected() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);

        let err = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 0, h.now() + 1_000)
            .unwrap_err();
        assert!(matches!(err, MarketError::InvalidPrice));

        let err = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now())
            .unwrap_err();
        assert!(matches!(err, MarketError::ExpiryInPast { .. }));
    }

    #[test]
    fn buy_settles_and_transfers() {
        let mut h = Harness::new();
        let seller = h.account();
        let buyer = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now() + 1_000)
            .unwrap();

        let receipt = h.mkt.buy(buyer, id, 100).unwrap();
        assert_eq!(receipt.total, 100);
        assert_eq!(receipt.fee, 2);
        assert_eq!(receipt.seller_amount, 98);
        assert_eq!(h.custody.holder(&asset), Some(buyer));
        assert_eq!(h.native.balance(seller), 98);
        assert_eq!(h.native.balance(h.fee_recipient), 2);
        assert_eq!(
            h.mkt.store().listing(id).unwrap().status,
            ListingStatus::Sold
        );
    }

    #[test]
    fn buy_refunds_excess_attachment() {
        let mut h = Harness::new();
        let seller = h.account();
        let buyer = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now() + 1_000)
            .unwrap();

        h.mkt.buy(buyer, id, 140).unwrap();
        assert_eq!(h.native.balance(buyer), 40);
    }

    #[test]
    fn underfunded_buy_leaves_listing_intact() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now() + 1_000)
            .unwrap();

        let err = h.mkt.buy(h.account(), id, 99).unwrap_err();
        assert!(matches!(err, MarketError::InsufficientAttached { .. }));
        assert!(h.mkt.store().listing(id).unwrap().is_active());
        assert_eq!(h.custody.holder(&asset), Some(h.escrow));
    }

    #[test]
    fn seller_cannot_buy_own_listing() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now() + 1_000)
            .unwrap();

        assert!(matches!(
            h.mkt.buy(seller, id, 100).unwrap_err(),
            MarketError::SelfDeal
        ));
    }

    #[test]
    fn expired_listing_cannot_be_bought_but_cancels() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now() + 500)
            .unwrap();

        h.clock.advance(500); // expiry instant is inclusive
        let err = h.mkt.buy(h.account(), id, 100).unwrap_err();
        assert!(matches!(
            err,
            MarketError::Expired {
                kind: SaleKind::Listing,
                ..
            }
        ));

        h.mkt.cancel_listing(seller, id).unwrap();
        assert_eq!(h.custody.holder(&asset), Some(seller));
    }

    #[test]
    fn cancel_is_seller_only_and_single_shot() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now() + 1_000)
            .unwrap();

        assert!(matches!(
            h.mkt.cancel_listing(h.account(), id).unwrap_err(),
            MarketError::NotSeller
        ));
        h.mkt.cancel_listing(seller, id).unwrap();
        assert!(matches!(
            h.mkt.cancel_listing(seller, id).unwrap_err(),
            MarketError::NotActive { .. }
        ));
    }

    #[test]
    fn reprice_applies_to_next_buyer() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now() + 1_000)
            .unwrap();

        h.mkt.update_listing_price(seller, id, 250).unwrap();
        let err = h.mkt.buy(h.account(), id, 100).unwrap_err();
        assert!(matches!(err, MarketError::InsufficientAttached { .. }));

        let receipt = h.mkt.buy(h.account(), id, 250).unwrap();
        assert_eq!(receipt.total, 250);
    }

    #[test]
    fn token_listing_pulls_price() {
        let mut h = Harness::new();
        let contract = bazaar_types::ContractId::new();
        h.mkt.whitelist_token(h.operator, contract).unwrap();

        let seller = h.account();
        let buyer = h.account();
        let asset = h.mint_asset(seller);
        h.token.mint(contract, buyer, 500);
        h.token.approve(contract, buyer, 500);

        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Token(contract), 200, h.now() + 1_000)
            .unwrap();
        let receipt = h.mkt.buy(buyer, id, 0).unwrap();

        assert_eq!(receipt.fee, 5);
        assert_eq!(h.token.balance(contract, buyer), 300);
        assert_eq!(h.token.balance(contract, seller), 195);
        assert_eq!(h.token.balance(contract, h.fee_recipient), 5);
        assert_eq!(h.custody.holder(&asset), Some(buyer));
    }

    #[test]
    fn pause_blocks_purchase_but_not_cancel() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .list(seller, asset, PaymentMedium::Native, 100, h.now() + 1_000)
            .unwrap();

        h.mkt.pause(h.operator).unwrap();
        assert!(matches!(
            h.mkt.buy(h.account(), id, 100).unwrap_err(),
            MarketError::MarketPaused
        ));
        let other = h.mint_asset(seller);
        assert!(matches!(
            h.mkt
                .list(seller, other, PaymentMedium::Native, 100, h.now() + 1_000)
                .unwrap_err(),
            MarketError::MarketPaused
        ));

        h.mkt.cancel_listing(seller, id).unwrap();
        assert_eq!(h.custody.holder(&asset), Some(seller));
    }
}
