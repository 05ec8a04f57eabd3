//! Payment medium: the currency a sale is denominated in.
//!
//! Either the host's native currency (attach-value-with-call semantics) or a
//! whitelisted fungible token (pull/push semantics). Amounts are always in
//! the smallest unit of the medium.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ContractId;

/// The currency used for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMedium {
    /// The host's native currency.
    Native,
    /// A fungible token identified by its contract.
    Token(ContractId),
}

impl PaymentMedium {
    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// The token contract, if this medium is a token.
    #[must_use]
    pub fn token_contract(&self) -> Option<ContractId> {
        match self {
            Self::Native => None,
            Self::Token(contract) => Some(*contract),
        }
    }
}

impl fmt::Display for PaymentMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Token(contract) => write!(f, "{contract}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_predicates() {
        assert!(PaymentMedium::Native.is_native());
        assert_eq!(PaymentMedium::Native.token_contract(), None);
    }

    #[test]
    fn token_predicates() {
        let contract = ContractId::new();
        let medium = PaymentMedium::Token(contract);
        assert!(!medium.is_native());
        assert_eq!(medium.token_contract(), Some(contract));
    }

    #[test]
    fn display_forms() {
        assert_eq!(PaymentMedium::Native.to_string(), "native");
        let medium = PaymentMedium::Token(ContractId::new());
        assert!(medium.to_string().starts_with("token:"));
    }
}
