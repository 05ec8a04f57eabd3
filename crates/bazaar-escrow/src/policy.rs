//! Payment policy: which media are acceptable for which operation.
//!
//! The native medium is always implicitly eligible for sales. Tokens must be
//! whitelisted by the operator. Pull-funded offers can never be denominated
//! natively — there is no allowance to pull against.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use bazaar_types::{ContractId, MarketError, PaymentMedium, Result};

/// Whitelist of fungible-token payment media.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentPolicy {
    whitelist: HashSet<ContractId>,
}

impl PaymentPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn whitelist_token(&mut self, contract: ContractId) {
        self.whitelist.insert(contract);
    }

    pub fn delist_token(&mut self, contract: ContractId) {
        self.whitelist.remove(&contract);
    }

    #[must_use]
    pub fn is_whitelisted(&self, contract: ContractId) -> bool {
        self.whitelist.contains(&contract)
    }

    /// Media acceptable for sale-side entities (listings, auctions, bundles):
    /// native, or any whitelisted token.
    pub fn check_sale_medium(&self, medium: PaymentMedium) -> Result<()> {
        match medium {
            PaymentMedium::Native => Ok(()),
            PaymentMedium::Token(contract) if self.is_whitelisted(contract) => Ok(()),
            PaymentMedium::Token(_) => Err(MarketError::MediumNotAccepted { medium }),
        }
    }

    /// Media acceptable for pull-funded offers: whitelisted tokens only.
    pub fn check_offer_medium(&self, medium: PaymentMedium) -> Result<()> {
        match medium {
            PaymentMedium::Native => Err(MarketError::NativeNotAllowedForOffers),
            PaymentMedium::Token(contract) if self.is_whitelisted(contract) => Ok(()),
            PaymentMedium::Token(_) => Err(MarketError::MediumNotAccepted { medium }),
        }
    }
}
