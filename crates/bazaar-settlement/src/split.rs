//! Pure fee/royalty/seller arithmetic.

use serde::{Deserialize, Serialize};

use bazaar_types::constants::BPS_DENOMINATOR;

/// The three-way division of a sale amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundSplit {
    pub fee: u128,
    pub royalty: u128,
    pub seller: u128,
}

impl FundSplit {
    /// Split `total` into fee (floored basis points), royalty (already
    /// validated against the post-fee remainder), and the seller remainder.
    ///
    /// The caller must ensure `royalty <= total - fee`; the seller leg soaks
    /// up every unit not taken by the other two, so the split always sums
    /// back to `total` exactly.
    #[must_use]
    pub fn compute(total: u128, fee_rate_bps: u32, royalty: u128) -> Self {
        let fee = fee_of(total, fee_rate_bps);
        debug_assert!(royalty <= total - fee);
        Self {
            fee,
            royalty,
            seller: total - fee - royalty,
        }
    }

    /// Sum of all three legs.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.fee + self.royalty + self.seller
    }
}

/// `floor(total * bps / 10000)`, exact for any `u128` total.
///
/// Computed as `(total / D) * bps + (total % D) * bps / D`, which equals the
/// floored product without ever forming `total * bps` (that intermediate
/// overflows above roughly 2^114 for the fee-rate cap).
#[must_use]
pub fn fee_of(total: u128, bps: u32) -> u128 {
    let bps = u128::from(bps);
    (total / BPS_DENOMINATOR) * bps + (total % BPS_DENOMINATOR) * bps / BPS_DENOMINATOR
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn fee_is_floored() {
        // 100 * 250 / 10000 = 2.5 → 2
        assert_eq!(fee_of(100, 250), 2);
        assert_eq!(fee_of(0, 250), 0);
        assert_eq!(fee_of(39, 250), 0);
        assert_eq!(fee_of(40, 250), 1);
    }

    #[test]
    fn fee_survives_extreme_totals() {
        // 2^123 * 1000 would overflow a u128; the floored quotient must not.
        // 2^123 mod 10 = 8, so floor(2^123 / 10) = (2^123 - 8) / 10.
        let total = 1u128 << 123;
        assert_eq!(fee_of(total, 1_000), (total - 8) / 10);
        assert_eq!(fee_of(u128::MAX, 10_000), u128::MAX);
        assert_eq!(fee_of(u128::MAX, 0), 0);
    }

    #[test]
    fn listing_scenario_split() {
        // Sale at 100 with a 250bps fee and no royalty: fee 2, seller 98.
        let split = FundSplit::compute(100, 250, 0);
        assert_eq!(split.fee, 2);
        assert_eq!(split.royalty, 0);
        assert_eq!(split.seller, 98);
        assert_eq!(split.total(), 100);
    }

    #[test]
    fn royalty_comes_out_of_seller_leg() {
        let split = FundSplit::compute(1_000, 250, 50);
        assert_eq!(split.fee, 25);
        assert_eq!(split.royalty, 50);
        assert_eq!(split.seller, 925);
    }

    #[test]
    fn zero_fee_rate() {
        let split = FundSplit::compute(777, 0, 0);
        assert_eq!(split.fee, 0);
        assert_eq!(split.seller, 777);
    }

    #[test]
    fn split_conserves_total_over_random_inputs() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let total: u128 = rng.gen_range(0..u128::from(u64::MAX));
            let bps: u32 = rng.gen_range(0..=1_000);
            let fee = fee_of(total, bps);
            let royalty: u128 = rng.gen_range(0..=(total - fee));
            let split = FundSplit::compute(total, bps, royalty);
            assert_eq!(split.total(), total, "leak at total={total} bps={bps}");
        }
    }
}
