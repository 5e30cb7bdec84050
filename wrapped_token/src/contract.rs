use crate::conversion::{to_assets, to_shares, total_assets};
use crate::events::{Events, WrappedTokenEvents};
use crate::storage::{get_asset, set_asset};
use soroban_sdk::token::{self, Interface as _, TokenClient as SorobanTokenClient};
use soroban_sdk::{contract, contractimpl, contractmeta, panic_with_error, Address, Env, String};
use token_share::metadata::{read_metadata, write_metadata};
use vault_interface::types::Rounding;
use vault_interface::wrapped_token::WrappedTokenInterface;
use vault_validation_errors::VaultValidationError;

contractmeta!(
    key = "Description",
    val = "Yield-bearing wrapper over a SEP-41 asset"
);

fn check_nonzero(e: &Env, amount: u128) {
    if amount == 0 {
        panic_with_error!(e, VaultValidationError::ZeroAmount);
    }
}

// Pulls `assets` from `from` using the allowance granted to the wrapper.
fn pull_assets(e: &Env, from: &Address, assets: u128) {
    let contract = e.current_contract_address();
    SorobanTokenClient::new(e, &get_asset(e)).transfer_from(
        &contract,
        from,
        &contract,
        &(assets as i128),
    );
}

fn push_assets(e: &Env, receiver: &Address, assets: u128) {
    SorobanTokenClient::new(e, &get_asset(e)).transfer(
        &e.current_contract_address(),
        receiver,
        &(assets as i128),
    );
}

#[contract]
pub struct WrappedToken;

#[contractimpl]
impl WrappedToken {
    // __constructor
    // Creates a wrapper share token over `asset`, with the same decimals as the asset.
    //
    // Arguments:
    //   - asset: Underlying SEP-41 token.
    //   - name: Share token name.
    //   - symbol: Share token symbol.
    pub fn __constructor(e: Env, asset: Address, name: String, symbol: String) {
        let decimals = SorobanTokenClient::new(&e, &asset).decimals();
        set_asset(&e, &asset);
        write_metadata(&e, decimals, name, symbol);
    }
}

#[contractimpl]
impl WrappedTokenInterface for WrappedToken {
    fn asset(e: Env) -> Address {
        get_asset(&e)
    }

    fn total_assets(e: Env) -> u128 {
        total_assets(&e)
    }

    fn convert_to_shares(e: Env, assets: u128) -> u128 {
        to_shares(&e, assets, Rounding::Down)
    }

    fn convert_to_assets(e: Env, shares: u128) -> u128 {
        to_assets(&e, shares, Rounding::Down)
    }

    fn preview_deposit(e: Env, assets: u128) -> u128 {
        to_shares(&e, assets, Rounding::Down)
    }

    fn preview_mint(e: Env, shares: u128) -> u128 {
        to_assets(&e, shares, Rounding::Up)
    }

    fn preview_withdraw(e: Env, assets: u128) -> u128 {
        to_shares(&e, assets, Rounding::Up)
    }

    fn preview_redeem(e: Env, shares: u128) -> u128 {
        to_assets(&e, shares, Rounding::Down)
    }

    // deposit
    // Wraps exactly `assets`. The wrapper must be approved to spend them.
    //
    // Returns:
    //   - Shares minted to `receiver`.
    fn deposit(e: Env, from: Address, assets: u128, receiver: Address) -> u128 {
        from.require_auth();
        check_nonzero(&e, assets);

        let shares = to_shares(&e, assets, Rounding::Down);
        pull_assets(&e, &from, assets);
        token_share::mint_shares(&e, e.current_contract_address(), &receiver, shares);

        Events::new(&e).deposit(from, receiver, assets, shares);
        shares
    }

    // mint
    // Wraps whatever is needed to mint exactly `shares`.
    //
    // Returns:
    //   - Assets pulled from `from`.
    fn mint(e: Env, from: Address, shares: u128, receiver: Address) -> u128 {
        from.require_auth();
        check_nonzero(&e, shares);

        let assets = to_assets(&e, shares, Rounding::Up);
        pull_assets(&e, &from, assets);
        token_share::mint_shares(&e, e.current_contract_address(), &receiver, shares);

        Events::new(&e).deposit(from, receiver, assets, shares);
        assets
    }

    // withdraw
    // Unwraps exactly `assets`.
    //
    // Returns:
    //   - Shares burned from `owner`.
    fn withdraw(e: Env, owner: Address, assets: u128, receiver: Address) -> u128 {
        owner.require_auth();
        check_nonzero(&e, assets);

        let shares = to_shares(&e, assets, Rounding::Up);
        token_share::burn_shares(&e, &owner, shares);
        push_assets(&e, &receiver, assets);

        Events::new(&e).withdraw(owner, receiver, assets, shares);
        shares
    }

    // redeem
    // Unwraps exactly `shares`.
    //
    // Returns:
    //   - Assets sent to `receiver`.
    fn redeem(e: Env, owner: Address, shares: u128, receiver: Address) -> u128 {
        owner.require_auth();
        check_nonzero(&e, shares);

        let assets = to_assets(&e, shares, Rounding::Down);
        token_share::burn_shares(&e, &owner, shares);
        push_assets(&e, &receiver, assets);

        Events::new(&e).withdraw(owner, receiver, assets, shares);
        assets
    }
}

#[contractimpl]
impl token::Interface for WrappedToken {
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
