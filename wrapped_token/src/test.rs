#![cfg(test)]
extern crate std;

use crate::testutils::Setup;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

#[test]
fn test_deposit_and_redeem_at_par() {
    let setup = Setup::default();
    let user = Address::generate(&setup.env);
    setup.asset_admin_client.mint(&user, &1000);

    assert_eq!(setup.wrapper.decimals(), 7);
    assert_eq!(setup.wrapper.asset(), setup.asset.address);
    assert_eq!(setup.wrapper.preview_deposit(&1000), 1000);

    let shares = setup.deposit(&user, 1000);
    assert_eq!(shares, 1000);
    assert_eq!(setup.wrapper.balance(&user), 1000);
    assert_eq!(setup.asset.balance(&user), 0);
    assert_eq!(setup.wrapper.total_assets(), 1000);

    let assets = setup.wrapper.redeem(&user, &400, &user);
    assert_eq!(assets, 400);
    assert_eq!(setup.asset.balance(&user), 400);
    assert_eq!(setup.wrapper.balance(&user), 600);
}

#[test]
fn test_yield_accrual() {
    let setup = Setup::default();
    let user = Address::generate(&setup.env);
    setup.asset_admin_client.mint(&user, &1000);
    setup.deposit(&user, 1000);

    // donation doubles the assets backing each share
    setup
        .asset_admin_client
        .mint(&setup.wrapper.address, &1000);

    // 1000 * 2001 / 1001
    assert_eq!(setup.wrapper.convert_to_assets(&1000), 1999);
    assert_eq!(setup.wrapper.preview_redeem(&1000), 1999);
    assert_eq!(setup.wrapper.preview_mint(&10), 20);
    assert_eq!(setup.wrapper.preview_withdraw(&20), 11);
    assert_eq!(setup.wrapper.convert_to_shares(&20), 10);

    let assets = setup.wrapper.redeem(&user, &1000, &user);
    assert_eq!(assets, 1999);
}

#[test]
fn test_mint_and_withdraw_match_previews() {
    let setup = Setup::default();
    let user = Address::generate(&setup.env);
    setup.asset_admin_client.mint(&user, &10_000);
    setup.deposit(&user, 3000);
    setup.asset_admin_client.mint(&setup.wrapper.address, &1000);

    let needed = setup.wrapper.preview_mint(&300);
    setup.asset.approve(
        &user,
        &setup.wrapper.address,
        &(needed as i128),
        &(setup.env.ledger().sequence() + 1),
    );
    assert_eq!(setup.wrapper.mint(&user, &300, &user), needed);

    let burned = setup.wrapper.preview_withdraw(&500);
    let shares_before = setup.wrapper.balance(&user) as u128;
    assert_eq!(setup.wrapper.withdraw(&user, &500, &user), burned);
    assert_eq!(setup.wrapper.balance(&user) as u128, shares_before - burned);
}

#[test]
#[should_panic(expected = "Error(Contract, #2018)")]
fn test_zero_deposit() {
    let setup = Setup::default();
    let user = Address::generate(&setup.env);
    setup.wrapper.deposit(&user, &0, &user);
}
