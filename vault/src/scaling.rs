use crate::constants::FEE_MULTIPLIER;
use soroban_sdk::{panic_with_error, Env, Vec};
use utils::math_errors::MathError;
use utils::scaled_math::WAD;

// Raw token amounts are multiplied up to 18 decimals before any pool math.
// Going back, amounts the vault receives round up and amounts it pays round down.

pub(crate) fn to_scaled18(e: &Env, amount_raw: u128, scaling_factor: u128) -> u128 {
    match amount_raw.checked_mul(scaling_factor) {
        Some(v) => v,
        None => panic_with_error!(e, MathError::NumberOverflow),
    }
}

pub(crate) fn to_scaled18_vec(e: &Env, amounts_raw: &Vec<u128>, scaling_factors: &Vec<u128>) -> Vec<u128> {
    let mut result = Vec::new(e);
    for (amount, factor) in amounts_raw.iter().zip(scaling_factors.iter()) {
        result.push_back(to_scaled18(e, amount, factor));
    }
    result
}

pub(crate) fn to_raw_round_down(amount_scaled18: u128, scaling_factor: u128) -> u128 {
    amount_scaled18 / scaling_factor
}

pub(crate) fn to_raw_round_up(amount_scaled18: u128, scaling_factor: u128) -> u128 {
    amount_scaled18.div_ceil(scaling_factor)
}

// swap fee fraction to an 18 decimal percentage
pub(crate) fn fee_percentage(swap_fee_fraction: u32) -> u128 {
    swap_fee_fraction as u128 * WAD / FEE_MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_directions() {
        let factor = 100_000_000_000;
        assert_eq!(to_raw_round_down(factor * 3 + 1, factor), 3);
        assert_eq!(to_raw_round_up(factor * 3 + 1, factor), 4);
        assert_eq!(to_raw_round_up(factor * 3, factor), 3);
    }

    #[test]
    fn test_fee_percentage() {
        // 0.3%
        assert_eq!(fee_percentage(30), 3_000_000_000_000_000);
        assert_eq!(fee_percentage(0), 0);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #510)")]
    fn test_scaling_overflow() {
        let e = Env::default();
        to_scaled18(&e, u128::MAX, 10);
    }
}
