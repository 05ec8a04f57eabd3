//! Shared harness for in-crate tests: a marketplace wired to mock
//! collaborators, with handles kept for assertions.

use bazaar_escrow::mock::{MockCustody, MockNative, MockRoyalty, MockToken, TestClock};
use bazaar_escrow::Clock;
use bazaar_types::{AccountId, AssetRef, CollectionId, MarketConfig, TokenId};

use crate::{Collaborators, Marketplace};

/// Instant all harness clocks start at.
pub(crate) const T0: u64 = 1_000_000;

pub(crate) struct Harness {
    pub mkt: Marketplace,
    pub operator: AccountId,
    pub escrow: AccountId,
    pub fee_recipient: AccountId,
    pub custody: MockCustody,
    pub token: MockToken,
    pub native: MockNative,
    pub royalty: MockRoyalty,
    pub clock: TestClock,
    next_token: u64,
}

impl Harness {
    /// Marketplace with platform-default config (2.5% fee).
    pub fn new() -> Self {
        let fee_recipient = AccountId::new();
        Self::with_config(MarketConfig::with_fee_recipient(fee_recipient))
    }

    pub fn with_config(config: MarketConfig) -> Self {
        let operator = AccountId::new();
        let escrow = AccountId::new();
        let fee_recipient = config.fee_recipient;
        let custody = MockCustody::new();
        let token = MockToken::new(escrow);
        let native = MockNative::new();
        let royalty = MockRoyalty::new();
        let clock = TestClock::at(T0);

        let mkt = Marketplace::new(
            config,
            operator,
            Collaborators {
                escrow_account: escrow,
                custody: Box::new(custody.clone()),
                tokens: Box::new(token.clone()),
                native: Box::new(native.clone()),
                royalty: Some(Box::new(royalty.clone())),
                clock: Box::new(clock.clone()),
            },
        )
        .unwrap();

        Self {
            mkt,
            operator,
            escrow,
            fee_recipient,
            custody,
            token,
            native,
            royalty,
            clock,
            next_token: 0,
        }
    }

    /// Fresh collaborator set sharing this harness's mock state, for
    /// restoring from a snapshot.
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            escrow_account: self.escrow,
            custody: Box::new(self.custody.clone()),
            tokens: Box::new(self.token.clone()),
            native: Box::new(self.native.clone()),
            royalty: Some(Box::new(self.royalty.clone())),
            clock: Box::new(self.clock.clone()),
        }
    }

    pub fn account(&self) -> AccountId {
        AccountId::new()
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Mint an asset in a fresh collection.
    pub fn mint_asset(&mut self, owner: AccountId) -> AssetRef {
        self.mint_asset_in(CollectionId::new(), owner)
    }

    pub fn mint_asset_in(&mut self, collection: CollectionId, owner: AccountId) -> AssetRef {
        self.next_token += 1;
        let asset = AssetRef::new(collection, TokenId(self.next_token));
        self.custody.mint(asset, owner);
        asset
    }
}
