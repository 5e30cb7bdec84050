#![no_std]

//! SEP-41 share accounting shared by the pool and wrapped token contracts.
//!
//! Contracts keep their own `#[contractimpl] impl token::Interface` and delegate here, so
//! balances, allowances, supply and token events behave identically for every share token.

pub mod allowance;
pub mod balance;
pub mod errors;
pub mod metadata;
mod test;

use crate::allowance::{read_allowance, spend_allowance, write_allowance};
use crate::balance::{
    decrease_total_supply, increase_total_supply, read_balance, read_total_supply,
    receive_balance, spend_balance,
};
use crate::errors::TokenError;
use soroban_sdk::{panic_with_error, Address, Env};
use soroban_token_sdk::TokenUtils;
use utils::bump::bump_instance;

pub fn check_nonnegative_amount(e: &Env, amount: i128) {
    if amount < 0 {
        panic_with_error!(e, TokenError::NegativeNotAllowed);
    }
}

pub fn get_total_shares(e: &Env) -> u128 {
    read_total_supply(e) as u128
}

pub fn get_user_balance_shares(e: &Env, user: &Address) -> u128 {
    read_balance(e, user.clone()) as u128
}

// Issues new shares. Authorization of `minter` is the caller's responsibility.
pub fn mint_shares(e: &Env, minter: Address, to: &Address, amount: u128) {
    let amount = amount as i128;
    check_nonnegative_amount(e, amount);
    bump_instance(e);

    receive_balance(e, to.clone(), amount);
    increase_total_supply(e, amount);
    TokenUtils::new(e).events().mint(minter, to.clone(), amount);
}

// Destroys shares of `from` without its signature; only the minter may reach this.
pub fn burn_shares(e: &Env, from: &Address, amount: u128) {
    let amount = amount as i128;
    check_nonnegative_amount(e, amount);
    bump_instance(e);

    spend_balance(e, from.clone(), amount);
    decrease_total_supply(e, amount);
    TokenUtils::new(e).events().burn(from.clone(), amount);
}

pub fn allowance(e: &Env, from: Address, spender: Address) -> i128 {
    bump_instance(e);
    read_allowance(e, from, spender).amount
}

pub fn approve(e: &Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
    from.require_auth();
    check_nonnegative_amount(e, amount);
    bump_instance(e);

    write_allowance(e, from.clone(), spender.clone(), amount, expiration_ledger);
    TokenUtils::new(e)
        .events()
        .approve(from, spender, amount, expiration_ledger);
}

pub fn balance(e: &Env, id: Address) -> i128 {
    bump_instance(e);
    read_balance(e, id)
}

pub fn transfer(e: &Env, from: Address, to: Address, amount: i128) {
    from.require_auth();
    check_nonnegative_amount(e, amount);
    bump_instance(e);

    spend_balance(e, from.clone(), amount);
    receive_balance(e, to.clone(), amount);
    TokenUtils::new(e).events().transfer(from, to, amount);
}

pub fn transfer_from(e: &Env, spender: Address, from: Address, to: Address, amount: i128) {
    spender.require_auth();
    check_nonnegative_amount(e, amount);
    bump_instance(e);

    spend_allowance(e, from.clone(), spender, amount);
    spend_balance(e, from.clone(), amount);
    receive_balance(e, to.clone(), amount);
    TokenUtils::new(e).events().transfer(from, to, amount)
}

pub fn burn(e: &Env, from: Address, amount: i128) {
    from.require_auth();
    check_nonnegative_amount(e, amount);
    bump_instance(e);

    spend_balance(e, from.clone(), amount);
    decrease_total_supply(e, amount);
    TokenUtils::new(e).events().burn(from, amount);
}

pub fn burn_from(e: &Env, spender: Address, from: Address, amount: i128) {
    spender.require_auth();
    check_nonnegative_amount(e, amount);
    bump_instance(e);

    spend_allowance(e, from.clone(), spender, amount);
    spend_balance(e, from.clone(), amount);
    decrease_total_supply(e, amount);
    TokenUtils::new(e).events().burn(from, amount)
}
