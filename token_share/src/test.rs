#![cfg(test)]
extern crate std;

use crate::allowance::{read_allowance, spend_allowance, write_allowance};
use crate::metadata::{read_metadata, write_metadata};
use crate::{balance, burn_shares, get_total_shares, get_user_balance_shares, mint_shares};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{contract, contractimpl, Address, Env, String};

#[contract]
struct ShareHolder;

#[contractimpl]
impl ShareHolder {}

#[test]
fn test_mint_burn_supply() {
    let e = Env::default();
    let contract = e.register(ShareHolder, ());
    let minter = Address::generate(&e);
    let user1 = Address::generate(&e);
    let user2 = Address::generate(&e);

    e.as_contract(&contract, || {
        mint_shares(&e, minter.clone(), &user1, 1000);
        mint_shares(&e, minter.clone(), &user2, 500);
        assert_eq!(get_total_shares(&e), 1500);
        assert_eq!(balance(&e, user1.clone()), 1000);
        assert_eq!(get_user_balance_shares(&e, &user2), 500);

        burn_shares(&e, &user1, 400);
        assert_eq!(get_user_balance_shares(&e, &user1), 600);
        assert_eq!(get_total_shares(&e), 1100);
    });
}

#[test]
fn test_allowance_spend_and_expiration() {
    let e = Env::default();
    let contract = e.register(ShareHolder, ());
    let from = Address::generate(&e);
    let spender = Address::generate(&e);

    e.as_contract(&contract, || {
        let sequence = e.ledger().sequence();
        write_allowance(&e, from.clone(), spender.clone(), 200, sequence + 10);
        spend_allowance(&e, from.clone(), spender.clone(), 150);
        assert_eq!(read_allowance(&e, from.clone(), spender.clone()).amount, 50);
    });
}

#[test]
#[should_panic(expected = "Error(Contract, #602)")]
fn test_burn_more_than_balance() {
    let e = Env::default();
    let contract = e.register(ShareHolder, ());
    let minter = Address::generate(&e);
    let user = Address::generate(&e);

    e.as_contract(&contract, || {
        mint_shares(&e, minter, &user, 10);
        burn_shares(&e, &user, 11);
    });
}

#[test]
#[should_panic(expected = "Error(Contract, #603)")]
fn test_spend_without_allowance() {
    let e = Env::default();
    let contract = e.register(ShareHolder, ());
    let from = Address::generate(&e);
    let spender = Address::generate(&e);

    e.as_contract(&contract, || {
        spend_allowance(&e, from, spender, 1);
    });
}

#[test]
fn test_metadata() {
    let e = Env::default();
    let contract = e.register(ShareHolder, ());

    e.as_contract(&contract, || {
        write_metadata(
            &e,
            18,
            String::from_str(&e, "Pool Share Token"),
            String::from_str(&e, "POOL"),
        );
        let metadata = read_metadata(&e);
        assert_eq!(metadata.decimal, 18);
        assert_eq!(metadata.name, String::from_str(&e, "Pool Share Token"));
        assert_eq!(metadata.symbol, String::from_str(&e, "POOL"));
    });
}

#[test]
#[should_panic(expected = "Error(Contract, #605)")]
fn test_metadata_more_precise_than_vault() {
    let e = Env::default();
    let contract = e.register(ShareHolder, ());

    e.as_contract(&contract, || {
        write_metadata(&e, 19, String::from_str(&e, "Share"), String::from_str(&e, "SHR"));
    });
}
