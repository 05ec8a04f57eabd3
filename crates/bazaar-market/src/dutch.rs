//! Dutch auction operations.
//!
//! The asking price decays linearly from the start price to the end price
//! over the configured window, then floors at the end price. There is no
//! expiry: a floored auction stays buyable until someone takes it or the
//! seller cancels.

use bazaar_types::{
    AccountId, AssetRef, DutchAuction, DutchAuctionId, DutchAuctionStatus, MarketError,
    PaymentMedium, Result, SaleKind, SettlementReceipt,
};

use crate::Marketplace;

impl Marketplace {
    /// Create a Dutch auction and escrow the asset. The end price must be
    /// strictly below the start price (decaying to zero is allowed); a past
    /// `start_time` is normalized to now.
    #[allow(clippy::too_many_arguments)]
    pub fn create_dutch_auction(
        &mut self,
        caller: AccountId,
        asset: AssetRef,
        medium: PaymentMedium,
        start_price: u128,
        end_price: u128,
        start_time: u64,
        duration: u64,
    ) -> Result<DutchAuctionId> {
        self.gate.require_open()?;
        if start_price <= end_price {
            return Err(MarketError::InvalidAuctionParams {
                reason: "start price must exceed end price".into(),
            });
        }
        self.policy.check_sale_medium(medium)?;
        self.config.check_duration(duration)?;
        let now = self.now();
        let start_time = start_time.max(now);
        if self.ledger.holder_of(&asset)? != caller {
            return Err(MarketError::NotAssetHolder { asset });
        }

        self.ledger.take_asset(caller, &asset)?;
        let id = self.store.counters.next_dutch_auction();
        self.store.dutch_auctions.insert(
            id,
            DutchAuction {
                id,
                seller: caller,
                asset,
                medium,
                start_price,
                end_price,
                start_time,
                end_time: start_time + duration,
                status: DutchAuctionStatus::Active,
            },
        );
        tracing::info!(%id, seller = %caller.short(), %asset, start_price, end_price, "dutch auction created");
        Ok(id)
    }

    /// Current asking price of an active Dutch auction.
    pub fn current_dutch_price(&self, id: DutchAuctionId) -> Result<u128> {
        let auction = self.store.dutch_auction(id)?;
        if !auction.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::DutchAuction,
            });
        }
        Ok(auction.price_at(self.now()))
    }

    /// Buy at the current decayed price. The charge is the price at the
    /// instant of the call, never the attached amount — excess is refunded.
    pub fn buy_dutch(
        &mut self,
        caller: AccountId,
        id: DutchAuctionId,
        attached: u128,
    ) -> Result<SettlementReceipt> {
        self.gate.require_open()?;
        let now = self.now();
        let auction = self.store.dutch_auction(id)?.clone();
        if !auction.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::DutchAuction,
            });
        }
        if now < auction.start_time {
            return Err(MarketError::AuctionNotStarted {
                starts_at: auction.start_time,
                now,
            });
        }
        if caller == auction.seller {
            return Err(MarketError::SelfDeal);
        }

        let price = auction.price_at(now);
        self.ledger
            .collect_payment(caller, auction.medium, price, attached)?;
        self.store.dutch_auction_mut(id)?.status = DutchAuctionStatus::Sold;

        let receipt = self.settle_sale(
            SaleKind::DutchAuction,
            id.0,
            auction.seller,
            caller,
            auction.asset,
            auction.medium,
            price,
        )?;
        self.ledger.release_asset(&auction.asset, caller)?;
        tracing::info!(%id, buyer = %caller.short(), price, "dutch auction bought");
        Ok(receipt)
    }

    /// Cancel an active Dutch auction and return the asset. Seller only;
    /// bypasses the pause gate.
    pub fn cancel_dutch_auction(&mut self, caller: AccountId, id: DutchAuctionId) -> Result<()> {
        let auction = self.store.dutch_auction(id)?.clone();
        if auction.seller != caller {
            return Err(MarketError::NotSeller);
        }
        if !auction.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::DutchAuction,
            });
        }
        self.store.dutch_auction_mut(id)?.status = DutchAuctionStatus::Cancelled;
        self.ledger.release_asset(&auction.asset, auction.seller)?;
        tracing::info!(%id, "dutch auction cancelled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::Harness;
    use bazaar_types::{DutchAuctionStatus, MarketError, PaymentMedium};

    /// 1000 → 100 over 1000 seconds, starting now.
    fn decaying(h: &mut Harness) -> (bazaar_types::AccountId, bazaar_types::AssetRef, bazaar_types::DutchAuctionId) {
        let seller = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .create_dutch_auction(seller, asset, PaymentMedium::Native, 1_000, 100, 0, 1_000)
            .unwrap();
        (seller, asset, id)
    }

    #[test]
    fn create_validates_price_band() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);

        let err = h
            .mkt
            .create_dutch_auction(seller, asset, PaymentMedium::Native, 100, 100, 0, 1_000)
            .unwrap_err();
        assert!(matches!(err, MarketError::InvalidAuctionParams { .. }));

        let err = h
            .mkt
            .create_dutch_auction(seller, asset, PaymentMedium::Native, 100, 200, 0, 1_000)
            .unwrap_err();
        assert!(matches!(err, MarketError::InvalidAuctionParams { .. }));
    }

    #[test]
    fn decay_to_zero_is_allowed() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .create_dutch_auction(seller, asset, PaymentMedium::Native, 1_000, 0, 0, 1_000)
            .unwrap();

        h.clock.advance(2_000);
        assert_eq!(h.mkt.current_dutch_price(id).unwrap(), 0);
        let receipt = h.mkt.buy_dutch(h.account(), id, 0).unwrap();
        assert_eq!(receipt.total, 0);
        assert_eq!(receipt.fee + receipt.royalty + receipt.seller_amount, 0);
        assert_eq!(
            h.mkt.store().dutch_auction(id).unwrap().status,
            DutchAuctionStatus::Sold
        );
    }

    #[test]
    fn price_decays_and_floors() {
        let mut h = Harness::new();
        let (_, _, id) = decaying(&mut h);

        assert_eq!(h.mkt.current_dutch_price(id).unwrap(), 1_000);
        h.clock.advance(500);
        assert_eq!(h.mkt.current_dutch_price(id).unwrap(), 550);
        h.clock.advance(500);
        assert_eq!(h.mkt.current_dutch_price(id).unwrap(), 100);
        // No expiry: floored price persists.
        h.clock.advance(1_000_000);
        assert_eq!(h.mkt.current_dutch_price(id).unwrap(), 100);
    }

    #[test]
    fn buy_charges_the_decayed_price() {
        let mut h = Harness::new();
        let (seller, asset, id) = decaying(&mut h);
        let buyer = h.account();

        h.clock.advance(500);
        // Attaches the full start price; charged 550, refunded 450.
        let receipt = h.mkt.buy_dutch(buyer, id, 1_000).unwrap();
        assert_eq!(receipt.total, 550);
        assert_eq!(h.native.balance(buyer), 450);
        assert_eq!(h.native.balance(seller), 550 - receipt.fee);
        assert_eq!(h.custody.holder(&asset), Some(buyer));
        assert_eq!(
            h.mkt.store().dutch_auction(id).unwrap().status,
            DutchAuctionStatus::Sold
        );
    }

    #[test]
    fn floored_auction_still_buyable() {
        let mut h = Harness::new();
        let (_, asset, id) = decaying(&mut h);
        let buyer = h.account();

        h.clock.advance(50_000);
        let receipt = h.mkt.buy_dutch(buyer, id, 100).unwrap();
        assert_eq!(receipt.total, 100);
        assert_eq!(h.custody.holder(&asset), Some(buyer));
    }

    #[test]
    fn cannot_buy_before_start() {
        let mut h = Harness::new();
        let seller = h.account();
        let asset = h.mint_asset(seller);
        let id = h
            .mkt
            .create_dutch_auction(
                seller,
                asset,
                PaymentMedium::Native,
                1_000,
                100,
                h.now() + 500,
                1_000,
            )
            .unwrap();

        let err = h.mkt.buy_dutch(h.account(), id, 1_000).unwrap_err();
        assert!(matches!(err, MarketError::AuctionNotStarted { .. }));
        // Price before start holds at start_price.
        assert_eq!(h.mkt.current_dutch_price(id).unwrap(), 1_000);
    }

    #[test]
    fn sold_auction_cannot_be_bought_again() {
        let mut h = Harness::new();
        let (_, _, id) = decaying(&mut h);
        h.mkt.buy_dutch(h.account(), id, 1_000).unwrap();

        let err = h.mkt.buy_dutch(h.account(), id, 1_000).unwrap_err();
        assert!(matches!(err, MarketError::NotActive { .. }));
    }

    #[test]
    fn cancel_returns_asset() {
        let mut h = Harness::new();
        let (seller, asset, id) = decaying(&mut h);

        assert!(matches!(
            h.mkt.cancel_dutch_auction(h.account(), id).unwrap_err(),
            MarketError::NotSeller
        ));
        h.mkt.cancel_dutch_auction(seller, id).unwrap();
        assert_eq!(h.custody.holder(&asset), Some(seller));

        let err = h.mkt.buy_dutch(h.account(), id, 1_000).unwrap_err();
        assert!(matches!(err, MarketError::NotActive { .. }));
    }

    #[test]
    fn self_deal_rejected() {
        let mut h = Harness::new();
        let (seller, _, id) = decaying(&mut h);
        assert!(matches!(
            h.mkt.buy_dutch(seller, id, 1_000).unwrap_err(),
            MarketError::SelfDeal
        ));
    }
}
