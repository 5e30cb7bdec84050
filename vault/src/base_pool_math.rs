use crate::errors::VaultError;
use soroban_sdk::{panic_with_error, Env, Vec};
use utils::scaled_math::{complement, div_down, div_up, mul_div_down, mul_div_up, mul_down, mul_up};
use vault_interface::pool::PoolClient;
use vault_interface::types::Rounding;
use vault_validation_errors::VaultValidationError;

// Liquidity math shared by every pool type. All balances and amounts are 18 decimal scaled,
// `fee` is an 18 decimal percentage. Rounding always favours the pool.

pub(crate) fn single_token_index(e: &Env, amounts: &Vec<u128>) -> u32 {
    let mut index = None;
    for (i, amount) in amounts.iter().enumerate() {
        if amount == 0 {
            continue;
        }
        if index.is_some() {
            panic_with_error!(e, VaultError::AmbiguousSingleTokenTarget);
        }
        index = Some(i as u32);
    }
    match index {
        Some(i) => i,
        None => panic_with_error!(e, VaultError::AmbiguousSingleTokenTarget),
    }
}

pub(crate) fn proportional_amounts_in(
    e: &Env,
    balances: &Vec<u128>,
    total_supply: u128,
    share_amount_out: u128,
) -> Vec<u128> {
    let mut amounts = Vec::new(e);
    for balance in balances.iter() {
        amounts.push_back(mul_div_up(e, balance, share_amount_out, total_supply));
    }
    amounts
}

pub(crate) fn proportional_amounts_out(
    e: &Env,
    balances: &Vec<u128>,
    total_supply: u128,
    share_amount_in: u128,
) -> Vec<u128> {
    let mut amounts = Vec::new(e);
    for balance in balances.iter() {
        amounts.push_back(mul_div_down(e, balance, share_amount_in, total_supply));
    }
    amounts
}

// Shares for an arbitrary deposit. The part of each deposit above the proportional share
// is treated as an implicit swap and charged the swap fee.
pub(crate) fn add_liquidity_unbalanced(
    e: &Env,
    pool: &PoolClient,
    balances: &Vec<u128>,
    amounts_in: &Vec<u128>,
    total_supply: u128,
    fee: u128,
) -> u128 {
    let mut new_balances = Vec::new(e);
    for (balance, amount) in balances.iter().zip(amounts_in.iter()) {
        new_balances.push_back(balance + amount);
    }

    let current_invariant = pool.compute_invariant(balances, &Rounding::Up);
    let new_invariant = pool.compute_invariant(&new_balances, &Rounding::Down);
    let invariant_ratio = div_down(e, new_invariant, current_invariant);

    for i in 0..new_balances.len() {
        let proportional = mul_down(e, invariant_ratio, balances.get_unchecked(i));
        let new_balance = new_balances.get_unchecked(i);
        if new_balance > proportional {
            let fee_amount = mul_up(e, new_balance - proportional, fee);
            new_balances.set(i, new_balance - fee_amount);
        }
    }

    let invariant_with_fees = pool.compute_invariant(&new_balances, &Rounding::Down);
    if invariant_with_fees <= current_invariant {
        return 0;
    }
    mul_div_down(
        e,
        total_supply,
        invariant_with_fees - current_invariant,
        current_invariant,
    )
}

// Amount of a single token needed to mint exactly `share_amount_out`, fee included.
pub(crate) fn add_liquidity_single_token_exact_out(
    e: &Env,
    pool: &PoolClient,
    balances: &Vec<u128>,
    token_index: u32,
    share_amount_out: u128,
    total_supply: u128,
    fee: u128,
) -> u128 {
    let new_supply = share_amount_out + total_supply;
    let invariant_ratio = div_up(e, new_supply, total_supply);
    let new_balance = pool.compute_balance(balances, &token_index, &invariant_ratio);
    let balance = balances.get_unchecked(token_index);
    if new_balance < balance {
        panic_with_error!(e, VaultValidationError::InsufficientBalance);
    }
    let amount_in = new_balance - balance;

    let non_taxable_balance = mul_div_up(e, new_supply, balance, total_supply);
    let taxable_amount = new_balance.saturating_sub(non_taxable_balance);
    let fee_amount = div_up(e, taxable_amount, complement(fee)) - taxable_amount;

    amount_in + fee_amount
}

// Amount of a single token paid for burning exactly `share_amount_in`, fee deducted.
pub(crate) fn remove_liquidity_single_token_exact_in(
    e: &Env,
    pool: &PoolClient,
    balances: &Vec<u128>,
    token_index: u32,
    share_amount_in: u128,
    total_supply: u128,
    fee: u128,
) -> u128 {
    if share_amount_in > total_supply {
        panic_with_error!(e, VaultValidationError::InsufficientBalance);
    }
    let new_supply = total_supply - share_amount_in;
    let invariant_ratio = div_up(e, new_supply, total_supply);
    let new_balance = pool.compute_balance(balances, &token_index, &invariant_ratio);
    let balance = balances.get_unchecked(token_index);
    let amount_out = balance.saturating_sub(new_balance);

    let new_balance_before_tax = mul_div_up(e, new_supply, balance, total_supply);
    let taxable_amount = new_balance_before_tax.saturating_sub(new_balance);
    let fee_amount = mul_up(e, taxable_amount, fee);

    amount_out.saturating_sub(fee_amount)
}

// Shares to burn for receiving exactly `amount_out` of a single token, fee included.
pub(crate) fn remove_liquidity_single_token_exact_out(
    e: &Env,
    pool: &PoolClient,
    balances: &Vec<u128>,
    token_index: u32,
    amount_out: u128,
    total_supply: u128,
    fee: u128,
) -> u128 {
    let balance = balances.get_unchecked(token_index);
    if amount_out > balance {
        panic_with_error!(e, VaultValidationError::InsufficientBalance);
    }
    let mut new_balances = balances.clone();
    new_balances.set(token_index, balance - amount_out);

    let current_invariant = pool.compute_invariant(balances, &Rounding::Up);
    let invariant_ratio = div_up(
        e,
        pool.compute_invariant(&new_balances, &Rounding::Up),
        current_invariant,
    );

    let taxable_amount =
        mul_up(e, invariant_ratio, balance).saturating_sub(new_balances.get_unchecked(token_index));
    let fee_amount = div_up(e, taxable_amount, complement(fee)) - taxable_amount;
    let new_balance = new_balances.get_unchecked(token_index);
    if fee_amount > new_balance {
        panic_with_error!(e, VaultValidationError::InsufficientBalance);
    }
    new_balances.set(token_index, new_balance - fee_amount);

    let invariant_with_fees = pool.compute_invariant(&new_balances, &Rounding::Down);
    mul_div_up(
        e,
        total_supply,
        current_invariant.saturating_sub(invariant_with_fees),
        current_invariant,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_token_index() {
        let e = Env::default();
        assert_eq!(single_token_index(&e, &Vec::from_array(&e, [0, 0, 7])), 2);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #323)")]
    fn test_single_token_index_ambiguous() {
        let e = Env::default();
        single_token_index(&e, &Vec::from_array(&e, [1, 0, 7]));
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #323)")]
    fn test_single_token_index_empty() {
        let e = Env::default();
        single_token_index(&e, &Vec::from_array(&e, [0u128, 0]));
    }

    #[test]
    fn test_proportional_rounding() {
        let e = Env::default();
        let balances = Vec::from_array(&e, [10u128, 20]);
        assert_eq!(
            proportional_amounts_in(&e, &balances, 3, 1),
            Vec::from_array(&e, [4u128, 7])
        );
        assert_eq!(
            proportional_amounts_out(&e, &balances, 3, 1),
            Vec::from_array(&e, [3u128, 6])
        );
    }
}
