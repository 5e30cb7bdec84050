#![cfg(test)]
extern crate std;

use crate::testutils::{create_pool_contract, Setup};
use crate::PoolCurve;
use soroban_sdk::testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation};
use soroban_sdk::{Address, Env, IntoVal, String, Symbol, Vec};
use utils::scaled_math::WAD;
use vault_interface::types::{PoolSwapParams, Rounding, SwapKind};

#[test]
fn test_metadata() {
    let setup = Setup::default();
    assert_eq!(setup.pool.decimals(), 18);
    assert_eq!(
        setup.pool.name(),
        String::from_str(&setup.env, "Pool Share Token")
    );
    assert_eq!(setup.pool.symbol(), String::from_str(&setup.env, "POOL"));
    assert_eq!(setup.pool.vault(), setup.vault);
    assert_eq!(setup.pool.get_curve(), PoolCurve::ConstantProduct);
    assert_eq!(
        setup.pool.pool_type(),
        Symbol::new(&setup.env, "constant_product")
    );
}

#[test]
fn test_vault_mints_and_burns() {
    let setup = Setup::default();
    let e = &setup.env;
    let user = Address::generate(e);

    setup.pool.mint_shares(&user, &1000);
    assert_eq!(
        e.auths(),
        std::vec![(
            setup.vault.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    setup.pool.address.clone(),
                    Symbol::new(e, "mint_shares"),
                    (&user, 1000_u128).into_val(e),
                )),
                sub_invocations: std::vec![]
            }
        )]
    );
    assert_eq!(setup.pool.balance(&user), 1000);
    assert_eq!(setup.pool.total_supply(), 1000);

    setup.pool.burn_shares(&user, &400);
    assert_eq!(setup.pool.balance(&user), 600);
    assert_eq!(setup.pool.total_supply(), 600);
}

#[test]
fn test_share_transfer() {
    let setup = Setup::default();
    let e = &setup.env;
    let user1 = Address::generate(e);
    let user2 = Address::generate(e);

    setup.pool.mint_shares(&user1, &1000);
    setup.pool.transfer(&user1, &user2, &250);
    assert_eq!(setup.pool.balance(&user1), 750);
    assert_eq!(setup.pool.balance(&user2), 250);

    setup.pool.approve(&user2, &user1, &100, &(e.ledger().sequence() + 100));
    setup.pool.transfer_from(&user1, &user2, &user1, &100);
    assert_eq!(setup.pool.balance(&user1), 850);
    assert_eq!(setup.pool.allowance(&user2, &user1), 0);

    // holders may burn their own shares, supply follows
    setup.pool.burn(&user1, &50);
    assert_eq!(setup.pool.total_supply(), 950);
}

#[test]
fn test_capabilities() {
    let setup = Setup::default();
    let e = &setup.env;
    let balances = Vec::from_array(e, [100 * WAD, 400 * WAD]);

    assert_eq!(
        setup.pool.compute_invariant(&balances, &Rounding::Down),
        200 * WAD
    );
    assert_eq!(
        setup.pool.compute_balance(&balances, &1, &(2 * WAD)),
        1600 * WAD
    );
    let out = setup.pool.on_swap(&PoolSwapParams {
        kind: SwapKind::ExactIn,
        amount_given_scaled18: 100 * WAD,
        balances_scaled18: balances.clone(),
        index_in: 0,
        index_out: 1,
    });
    assert_eq!(out, 200 * WAD);

    let constant_sum = create_pool_contract(e, &setup.vault, PoolCurve::ConstantSum);
    assert_eq!(
        constant_sum.compute_invariant(&balances, &Rounding::Up),
        500 * WAD
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #2001)")]
fn test_constant_product_requires_two_tokens() {
    let setup = Setup::default();
    let balances = Vec::from_array(&setup.env, [WAD, WAD, WAD]);
    setup.pool.compute_invariant(&balances, &Rounding::Down);
}

#[test]
#[should_panic(expected = "Error(Contract, #2007)")]
fn test_swap_same_index() {
    let setup = Setup::default();
    setup.pool.on_swap(&PoolSwapParams {
        kind: SwapKind::ExactIn,
        amount_given_scaled18: WAD,
        balances_scaled18: Vec::from_array(&setup.env, [WAD, WAD]),
        index_in: 1,
        index_out: 1,
    });
}

#[test]
#[should_panic(expected = "Error(Auth, InvalidAction)")]
fn test_mint_requires_vault() {
    let e = Env::default();
    let vault = Address::generate(&e);
    let pool = create_pool_contract(&e, &vault, PoolCurve::ConstantSum);
    pool.mint_shares(&Address::generate(&e), &1);
}
