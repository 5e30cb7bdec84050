use soroban_sdk::{contractclient, Address, Env};

// Yield-bearing wrapper over an underlying asset. Share price grows as assets accrue.
// previews round in favour of the wrapper, matching the executing calls exactly.
#[contractclient(name = "WrappedTokenClient")]
pub trait WrappedTokenInterface {
    fn asset(e: Env) -> Address;

    fn total_assets(e: Env) -> u128;

    fn convert_to_shares(e: Env, assets: u128) -> u128;

    fn convert_to_assets(e: Env, shares: u128) -> u128;

    // shares minted for exactly `assets` deposited
    fn preview_deposit(e: Env, assets: u128) -> u128;

    // assets needed to mint exactly `shares`
    fn preview_mint(e: Env, shares: u128) -> u128;

    // shares burned to withdraw exactly `assets`
    fn preview_withdraw(e: Env, assets: u128) -> u128;

    // assets returned for exactly `shares` redeemed
    fn preview_redeem(e: Env, shares: u128) -> u128;

    fn deposit(e: Env, from: Address, assets: u128, receiver: Address) -> u128;

    fn mint(e: Env, from: Address, shares: u128, receiver: Address) -> u128;

    fn withdraw(e: Env, owner: Address, assets: u128, receiver: Address) -> u128;

    fn redeem(e: Env, owner: Address, shares: u128, receiver: Address) -> u128;
}
