use crate::types::{PoolSwapParams, Rounding};
use soroban_sdk::{contractclient, Address, Env, Vec};

// Capabilities the vault requires from a registered pool. The pool contract is also the
// SEP-41 token of its shares, minted and burned exclusively by the vault.
#[contractclient(name = "PoolClient")]
pub trait PoolInterface {
    // Vault allowed to mint and burn shares.
    fn vault(e: Env) -> Address;

    // Pool invariant for the given scaled balances, rounded as requested.
    fn compute_invariant(e: Env, balances_scaled18: Vec<u128>, rounding: Rounding) -> u128;

    // New balance of `token_index` such that the invariant changes by `invariant_ratio`
    // (18-decimal fixed point) while all other balances stay fixed. Rounds up.
    fn compute_balance(
        e: Env,
        balances_scaled18: Vec<u128>,
        token_index: u32,
        invariant_ratio: u128,
    ) -> u128;

    // Calculated side of a swap: amount out for ExactIn, amount in for ExactOut.
    fn on_swap(e: Env, params: PoolSwapParams) -> u128;

    fn mint_shares(e: Env, to: Address, amount: u128);

    fn burn_shares(e: Env, from: Address, amount: u128);

    fn total_supply(e: Env) -> u128;
}
