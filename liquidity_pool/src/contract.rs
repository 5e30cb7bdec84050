use crate::constants::SHARE_DECIMALS;
use crate::curve::{self, PoolCurve};
use crate::storage::{get_curve, set_curve};
use access_control::access::{AccessControl, AccessControlTrait};
use access_control::role::Role;
use access_control::utils::require_minter;
use soroban_sdk::token::{self, Interface as _};
use soroban_sdk::{contract, contractimpl, contractmeta, Address, Env, String, Symbol, Vec};
use token_share::metadata::{read_metadata, write_metadata};
use vault_interface::pool::PoolInterface;
use vault_interface::types::{PoolSwapParams, Rounding};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Vault pool with constant sum or constant product curve"
);

#[contract]
pub struct LiquidityPool;

#[contractimpl]
impl LiquidityPool {
    // __constructor
    // Binds the pool to its vault and stores the pricing curve.
    //
    // Arguments:
    //   - vault: The vault contract allowed to mint and burn pool shares.
    //   - curve: Pricing curve used for swaps and liquidity math.
    //   - name: Share token name.
    //   - symbol: Share token symbol.
    pub fn __constructor(e: Env, vault: Address, curve: PoolCurve, name: String, symbol: String) {
        AccessControl::new(&e).set_role_address(&Role::Minter, &vault);
        set_curve(&e, &curve);
        write_metadata(&e, SHARE_DECIMALS, name, symbol);
    }

    // Returns the type of the pool.
    pub fn pool_type(e: Env) -> Symbol {
        match get_curve(&e) {
            PoolCurve::ConstantSum => Symbol::new(&e, "constant_sum"),
            PoolCurve::ConstantProduct => Symbol::new(&e, "constant_product"),
        }
    }

    pub fn get_curve(e: Env) -> PoolCurve {
        get_curve(&e)
    }
}

#[contractimpl]
impl PoolInterface for LiquidityPool {
    fn vault(e: Env) -> Address {
        AccessControl::new(&e).get_role(&Role::Minter)
    }

    fn compute_invariant(e: Env, balances_scaled18: Vec<u128>, rounding: Rounding) -> u128 {
        curve::compute_invariant(&e, get_curve(&e), &balances_scaled18, rounding)
    }

    fn compute_balance(
        e: Env,
        balances_scaled18: Vec<u128>,
        token_index: u32,
        invariant_ratio: u128,
    ) -> u128 {
        curve::compute_balance(
            &e,
            get_curve(&e),
            &balances_scaled18,
            token_index,
            invariant_ratio,
        )
    }

    fn on_swap(e: Env, params: PoolSwapParams) -> u128 {
        curve::on_swap(&e, get_curve(&e), &params)
    }

    // mint_shares
    // Issues pool shares. Vault only.
    //
    // Arguments:
    //   - to: Receiver of the new shares.
    //   - amount: Amount of shares to mint.
    fn mint_shares(e: Env, to: Address, amount: u128) {
        let vault = require_minter(&e);
        token_share::mint_shares(&e, vault, &to, amount);
    }

    // burn_shares
    // Destroys pool shares held by `from`. Vault only, the holder's consent is checked by the vault.
    //
    // Arguments:
    //   - from: Holder of the shares.
    //   - amount: Amount of shares to burn.
    fn burn_shares(e: Env, from: Address, amount: u128) {
        require_minter(&e);
        token_share::burn_shares(&e, &from, amount);
    }

    fn total_supply(e: Env) -> u128 {
        token_share::get_total_shares(&e)
    }
}

#[contractimpl]
impl token::Interface for LiquidityPool {
    fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        token_share::allowance(&e, from, spender)
    }

    fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        token_share::approve(&e, from, spender, amount, expiration_ledger)
    }

    fn balance(e: Env, id: Address) -> i128 {
        token_share::balance(&e, id)
    }

    fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        token_share::transfer(&e, from, to, amount)
    }

    fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        token_share::transfer_from(&e, spender, from, to, amount)
    }

    fn burn(e: Env, from: Address, amount: i128) {
        token_share::burn(&e, from, amount)
    }

    fn burn_from(e: Env, spender: Address, from: Address, amount: i128) {
        token_share::burn_from(&e, spender, from, amount)
    }

    fn decimals(e: Env) -> u32 {
        read_metadata(&e).decimal
    }

    fn name(e: Env) -> String {
        read_metadata(&e).name
    }

    fn symbol(e: Env) -> String {
        read_metadata(&e).symbol
    }
}
