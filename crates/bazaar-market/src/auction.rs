//! English auction operations.
//!
//! Each new bid is escrowed before the previous bidder is refunded, so
//! exactly one standing bid is custodied at any time. Refunds to the outbid
//! ride the safe path — a bidder who refuses delivery cannot wedge the
//! auction. Settlement after close is permissionless: anyone may crank it.

use bazaar_types::{
    AccountId, AssetRef, Auction, AuctionId, AuctionStatus, MarketError, PaymentMedium, Result,
    SaleKind, SettlementReceipt,
};

use crate::Marketplace;

impl Marketplace {
    /// Create an auction and escrow the asset.
    ///
    /// A `start_time` in the past is normalized to now. `reserve_price` and
    /// `buy_now_price` are optional (0 = unset); when set, the reserve must
    /// be at least the start price and buy-now must exceed the start price
    /// and cover the reserve.
    #[allow(clippy::too_many_arguments)]
    pub fn create_auction(
        &mut self,
        caller: AccountId,
        asset: AssetRef,
        medium: PaymentMedium,
        start_price: u128,
        reserve_price: u128,
        buy_now_price: u128,
        start_time: u64,
        duration: u64,
    ) -> Result<AuctionId> {
        self.gate.require_open()?;
        if start_price == 0 {
            return Err(MarketError::InvalidPrice);
        }
        self.policy.check_sale_medium(medium)?;
        self.config.check_duration(duration)?;
        if reserve_price > 0 && reserve_price < start_price {
            return Err(MarketError::InvalidAuctionParams {
                reason: "reserve price below start price".into(),
            });
        }
        if buy_now_price > 0 {
            if buy_now_price <= start_price {
                return Err(MarketError::InvalidAuctionParams {
                    reason: "buy-now price must exceed start price".into(),
                });
            }
            if buy_now_price < reserve_price {
                return Err(MarketError::InvalidAuctionParams {
                    reason: "buy-now price below reserve".into(),
                });
            }
        }
        let now = self.now();
        let start_time = start_time.max(now);
        if self.ledger.holder_of(&asset)? != caller {
            return Err(MarketError::NotAssetHolder { asset });
        }

        self.ledger.take_asset(caller, &asset)?;
        let id = self.store.counters.next_auction();
        self.store.auctions.insert(
            id,
            Auction {
                id,
                seller: caller,
                asset,
                medium,
                start_price,
                reserve_price,
                buy_now_price,
                highest_bid: 0,
                highest_bidder: None,
                start_time,
                end_time: start_time + duration,
                bid_count: 0,
                status: AuctionStatus::Active,
            },
        );
        tracing::info!(%id, seller = %caller.short(), %asset, start_price, "auction created");
        Ok(id)
    }

    /// Place a bid. For the native medium the bid amount is the attached
    /// value; for a token medium it is `amount`, pulled against allowance.
    ///
    /// A bid at or above the buy-now price short-circuits: exactly the
    /// buy-now price is taken (native excess refunded), the standing bidder
    /// is refunded, and the sale settles immediately — the receipt is
    /// returned. Otherwise `None`, and a bid landing inside the anti-snipe
    /// window pushes the close out to one full window from now.
    pub fn bid(
        &mut self,
        caller: AccountId,
        id: AuctionId,
        amount: u128,
        attached: u128,
    ) -> Result<Option<SettlementReceipt>> {
        self.gate.require_open()?;
        let now = self.now();
        let auction = self.store.auction(id)?.clone();
        if !auction.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::Auction,
            });
        }
        if now < auction.start_time {
            return Err(MarketError::AuctionNotStarted {
                starts_at: auction.start_time,
                now,
            });
        }
        if now >= auction.end_time {
            return Err(MarketError::AuctionClosed {
                ended_at: auction.end_time,
                now,
            });
        }
        if caller == auction.seller {
            return Err(MarketError::SelfDeal);
        }
        let effective = if auction.medium.is_native() {
            attached
        } else {
            amount
        };

        if auction.triggers_buy_now(effective) {
            // Take exactly the buy-now price; collect_payment refunds any
            // attached excess.
            self.ledger
                .collect_payment(caller, auction.medium, auction.buy_now_price, attached)?;
            {
                let stored = self.store.auction_mut(id)?;
                stored.highest_bid = auction.buy_now_price;
                stored.highest_bidder = Some(caller);
                stored.bid_count += 1;
                // end_time only ever extends; Ended records the close.
                stored.status = AuctionStatus::Ended;
            }
            self.refund_standing_bid(&auction)?;
            let receipt = self.settle_sale(
                SaleKind::Auction,
                id.0,
                auction.seller,
                caller,
                auction.asset,
                auction.medium,
                auction.buy_now_price,
            )?;
            self.ledger.release_asset(&auction.asset, caller)?;
            tracing::info!(%id, buyer = %caller.short(), price = auction.buy_now_price, "auction bought out");
            return Ok(Some(receipt));
        }

        let minimum = auction.min_next_bid();
        if effective < minimum {
            return Err(MarketError::BidTooLow {
                minimum,
                offered: effective,
            });
        }

        self.ledger
            .collect_payment(caller, auction.medium, effective, attached)?;
        {
            let stored = self.store.auction_mut(id)?;
            stored.highest_bid = effective;
            stored.highest_bidder = Some(caller);
            stored.bid_count += 1;
            if stored.end_time - now < self.config.anti_snipe_window {
                stored.end_time = now + self.config.anti_snipe_window;
                tracing::debug!(%id, new_end = stored.end_time, "anti-snipe extension");
            }
        }
        self.refund_standing_bid(&auction)?;
        Ok(None)
    }

    /// Settle an auction whose end time has passed. Permissionless and not
    /// pause-gated. Returns a receipt only if a sale actually happened:
    /// with no bids, or with a reserve left unmet, the asset goes back to
    /// the seller (and the standing bid is refunded).
    pub fn settle_auction(&mut self, id: AuctionId) -> Result<Option<SettlementReceipt>> {
        let now = self.now();
        let auction = self.store.auction(id)?.clone();
        if !auction.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::Auction,
            });
        }
        if now < auction.end_time {
            return Err(MarketError::AuctionStillRunning {
                ends_at: auction.end_time,
                now,
            });
        }
        self.store.auction_mut(id)?.status = AuctionStatus::Ended;

        let Some(winner) = auction.highest_bidder else {
            self.ledger.release_asset(&auction.asset, auction.seller)?;
            tracing::info!(%id, "auction ended without bids");
            return Ok(None);
        };

        if !auction.reserve_met() {
            self.ledger
                .safe_payout(winner, auction.medium, auction.highest_bid)?;
            self.ledger.release_asset(&auction.asset, auction.seller)?;
            tracing::info!(
                %id,
                reserve = auction.reserve_price,
                highest = auction.highest_bid,
                "reserve not met; bid refunded"
            );
            return Ok(None);
        }

        let receipt = self.settle_sale(
            SaleKind::Auction,
            id.0,
            auction.seller,
            winner,
            auction.asset,
            auction.medium,
            auction.highest_bid,
        )?;
        self.ledger.release_asset(&auction.asset, winner)?;
        Ok(Some(receipt))
    }

    /// Cancel an auction that has no bids. Seller only; bypasses the pause
    /// gate.
    pub fn cancel_auction(&mut self, caller: AccountId, id: AuctionId) -> Result<()> {
        let auction = self.store.auction(id)?.clone();
        if auction.seller != caller {
            return Err(MarketError::NotSeller);
        }
        if !auction.is_active() {
            return Err(MarketError::NotActive {
                kind: SaleKind::Auction,
            });
        }
        if auction.has_bids() {
            return Err(MarketError::AuctionHasBids {
                bid_count: auction.bid_count,
            });
        }
        self.store.auction_mut(id)?.status = AuctionStatus::Cancelled;
        self.ledger.release_asset(&auction.asset, auction.seller)?;
        tracing::info!(%id, "auction cancelled");
        Ok(())
    }

    /// Refund the outbid standing bid, if any, on the safe path. Runs after
    /// the new bid has been recorded, so a refused native delivery lands in
    /// pending withdrawals without disturbing the auction.
    fn refund_standing_bid(&mut self, auction: &Auction) -> Result<()> {
        if let Some(previous) = auction.highest_bidder {
            self.ledger
                .safe_payout(previous, auction.medium, auction.highest_bid)?;
        }
        Ok(())
    }
}
