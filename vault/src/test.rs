#![cfg(test)]
extern crate std;

use crate::testutils::{create_pool_contract, Setup, ONE};
use crate::types::{AddLiquidityKind, RemoveLiquidityKind};
use soroban_liquidity_pool_contract::PoolCurve;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Vec};
use utils::test_utils::assert_approx_eq_abs;

const SHARE_SUPPLY: u128 = 1_000_000_000_000_000_000_000;
const MIN_SUPPLY: u128 = 1_000_000;

fn product_pool_setup<'a>(
    swap_fee_fraction: u32,
) -> (
    Setup<'a>,
    Address,
    Address,
    soroban_liquidity_pool_contract::LiquidityPoolClient<'a>,
) {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = setup.create_funded_pool(
        &[&token_a, &token_b],
        PoolCurve::ConstantProduct,
        swap_fee_fraction,
        &[1000 * ONE, 1000 * ONE],
    );
    (setup, token_a, token_b, pool)
}

#[test]
fn test_initialize_pool() {
    let (setup, token_a, token_b, pool) = product_pool_setup(30);
    let e = &setup.env;

    // invariant of 1000e18 * 1000e18, minus the locked minimum
    assert_eq!(pool.balance(&setup.lp), (SHARE_SUPPLY - MIN_SUPPLY) as i128);
    assert_eq!(pool.balance(&pool.address), MIN_SUPPLY as i128);
    assert_eq!(pool.total_supply(), SHARE_SUPPLY);

    let config = setup.vault.get_pool_config(&pool.address);
    assert!(config.is_initialized);
    assert_eq!(config.swap_fee_fraction, 30);
    assert_eq!(
        config.scaling_factors,
        Vec::from_array(e, [100_000_000_000u128, 100_000_000_000])
    );
    assert_eq!(
        setup.vault.get_pool_tokens(&pool.address),
        Vec::from_array(e, [token_a.clone(), token_b.clone()])
    );
    assert_eq!(
        setup.vault.get_pool_balances(&pool.address),
        Vec::from_array(e, [1000 * ONE, 1000 * ONE])
    );
    for token in [&token_a, &token_b] {
        assert_eq!(setup.vault.get_reserves(token), 1000 * ONE);
        assert_eq!(setup.balance(token, &setup.vault.address), 1000 * ONE);
        assert_eq!(setup.balance(token, &setup.lp), 0);
    }
}

#[test]
fn test_add_liquidity_proportional() {
    let (setup, token_a, token_b, pool) = product_pool_setup(0);
    let e = &setup.env;
    let user = setup.user.clone();
    setup.mint(&token_a, &user, 150 * ONE);
    setup.mint(&token_b, &user, 150 * ONE);

    let (amounts_in, shares) = setup.vault.add_liquidity(
        &user,
        &pool.address,
        &Vec::from_array(e, [150 * ONE, 150 * ONE]),
        &(SHARE_SUPPLY / 10),
        &AddLiquidityKind::Proportional,
    );
    assert_eq!(amounts_in, Vec::from_array(e, [100 * ONE, 100 * ONE]));
    assert_eq!(shares, SHARE_SUPPLY / 10);
    assert_eq!(pool.balance(&user), (SHARE_SUPPLY / 10) as i128);
    assert_eq!(setup.balance(&token_a, &user), 50 * ONE);
    assert_eq!(
        setup.vault.get_pool_balances(&pool.address),
        Vec::from_array(e, [1100 * ONE, 1100 * ONE])
    );
    assert_eq!(setup.vault.get_reserves(&token_a), 1100 * ONE);
}

#[test]
fn test_add_liquidity_unbalanced() {
    let (setup, token_a, _token_b, pool) = product_pool_setup(0);
    let e = &setup.env;
    let user = setup.user.clone();
    setup.mint(&token_a, &user, 100 * ONE);

    let (amounts_in, shares) = setup.vault.add_liquidity(
        &user,
        &pool.address,
        &Vec::from_array(e, [100 * ONE, 0]),
        &0,
        &AddLiquidityKind::Unbalanced,
    );
    assert_eq!(amounts_in, Vec::from_array(e, [100 * ONE, 0]));
    // supply * (sqrt(1.1) - 1)
    assert_approx_eq_abs(shares, 48_808_848_170_151_546_991, 1_000_000);
    assert_eq!(pool.balance(&user), shares as i128);
}

#[test]
fn test_add_liquidity_unbalanced_pays_fee() {
    let (setup, token_a, _token_b, pool) = product_pool_setup(100);
    let e = &setup.env;
    let user = setup.user.clone();
    setup.mint(&token_a, &user, 100 * ONE);

    let (_, shares) = setup.vault.add_liquidity(
        &user,
        &pool.address,
        &Vec::from_array(e, [100 * ONE, 0]),
        &0,
        &AddLiquidityKind::Unbalanced,
    );
    assert!(shares < 48_808_848_170_151_546_991);
    assert!(shares > 48_000_000_000_000_000_000);
}

#[test]
fn test_add_liquidity_single_token_exact_out() {
    let (setup, token_a, _token_b, pool) = product_pool_setup(0);
    let e = &setup.env;
    let user = setup.user.clone();
    setup.mint(&token_a, &user, 300 * ONE);

    // supply grows 10%, balance A grows 21% on a 50/50 product curve
    let (amounts_in, shares) = setup.vault.add_liquidity(
        &user,
        &pool.address,
        &Vec::from_array(e, [300 * ONE, 0]),
        &(SHARE_SUPPLY / 10),
        &AddLiquidityKind::SingleTokenExactOut,
    );
    assert_eq!(amounts_in, Vec::from_array(e, [210 * ONE, 0]));
    assert_eq!(shares, SHARE_SUPPLY / 10);
    assert_eq!(setup.balance(&token_a, &user), 90 * ONE);
}

#[test]
#[should_panic(expected = "Error(Contract, #2020)")]
fn test_add_liquidity_single_token_above_max() {
    let (setup, token_a, _token_b, pool) = product_pool_setup(0);
    setup.mint(&token_a, &setup.user, 300 * ONE);
    setup.vault.add_liquidity(
        &setup.user,
        &pool.address,
        &Vec::from_array(&setup.env, [200 * ONE, 0]),
        &(SHARE_SUPPLY / 10),
        &AddLiquidityKind::SingleTokenExactOut,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #323)")]
fn test_add_liquidity_single_token_ambiguous() {
    let (setup, token_a, token_b, pool) = product_pool_setup(0);
    setup.mint(&token_a, &setup.user, 300 * ONE);
    setup.mint(&token_b, &setup.user, 300 * ONE);
    setup.vault.add_liquidity(
        &setup.user,
        &pool.address,
        &Vec::from_array(&setup.env, [300 * ONE, 300 * ONE]),
        &(SHARE_SUPPLY / 10),
        &AddLiquidityKind::SingleTokenExactOut,
    );
}

#[test]
fn test_remove_liquidity_proportional() {
    let (setup, token_a, token_b, pool) = product_pool_setup(0);
    let e = &setup.env;
    let lp = setup.lp.clone();

    let (shares_in, amounts_out) = setup.vault.remove_liquidity(
        &lp,
        &pool.address,
        &(SHARE_SUPPLY / 10),
        &Vec::from_array(e, [100 * ONE, 100 * ONE]),
        &RemoveLiquidityKind::Proportional,
    );
    assert_eq!(shares_in, SHARE_SUPPLY / 10);
    assert_eq!(amounts_out, Vec::from_array(e, [100 * ONE, 100 * ONE]));
    assert_eq!(setup.balance(&token_a, &lp), 100 * ONE);
    assert_eq!(setup.balance(&token_b, &lp), 100 * ONE);
    assert_eq!(pool.total_supply(), SHARE_SUPPLY - SHARE_SUPPLY / 10);
    assert_eq!(setup.vault.get_reserves(&token_a), 900 * ONE);
    assert_eq!(setup.balance(&token_a, &setup.vault.address), 900 * ONE);
}

#[test]
fn test_remove_liquidity_single_token_exact_in() {
    let (setup, token_a, token_b, pool) = product_pool_setup(0);
    let e = &setup.env;

    // supply shrinks 10%, balance A shrinks 19%
    let (shares_in, amounts_out) = setup.vault.remove_liquidity(
        &setup.lp,
        &pool.address,
        &(SHARE_SUPPLY / 10),
        &Vec::from_array(e, [1, 0]),
        &RemoveLiquidityKind::SingleTokenExactIn,
    );
    assert_eq!(shares_in, SHARE_SUPPLY / 10);
    assert_eq!(amounts_out, Vec::from_array(e, [190 * ONE, 0]));
    assert_eq!(setup.balance(&token_a, &setup.lp), 190 * ONE);
    assert_eq!(setup.balance(&token_b, &setup.lp), 0);
}

#[test]
fn test_remove_liquidity_single_token_exact_in_pays_fee() {
    let (setup, _token_a, _token_b, pool) = product_pool_setup(100);
    let e = &setup.env;

    // 1% of the 90 taxable tokens stays in the pool
    let (_, amounts_out) = setup.vault.remove_liquidity(
        &setup.lp,
        &pool.address,
        &(SHARE_SUPPLY / 10),
        &Vec::from_array(e, [1, 0]),
        &RemoveLiquidityKind::SingleTokenExactIn,
    );
    assert_eq!(amounts_out, Vec::from_array(e, [189_1000000, 0]));
}

#[test]
fn test_remove_liquidity_single_token_exact_out() {
    let (setup, token_a, _token_b, pool) = product_pool_setup(0);
    let e = &setup.env;

    let (shares_in, amounts_out) = setup.vault.remove_liquidity(
        &setup.lp,
        &pool.address,
        &(SHARE_SUPPLY / 5),
        &Vec::from_array(e, [190 * ONE, 0]),
        &RemoveLiquidityKind::SingleTokenExactOut,
    );
    assert_eq!(shares_in, SHARE_SUPPLY / 10);
    assert_eq!(amounts_out, Vec::from_array(e, [190 * ONE, 0]));
    assert_eq!(setup.balance(&token_a, &setup.lp), 190 * ONE);
    assert_eq!(
        pool.balance(&setup.lp),
        (SHARE_SUPPLY - MIN_SUPPLY - SHARE_SUPPLY / 10) as i128
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #2012)")]
fn test_remove_liquidity_single_token_above_max_shares() {
    let (setup, _token_a, _token_b, pool) = product_pool_setup(0);
    setup.vault.remove_liquidity(
        &setup.lp,
        &pool.address,
        &(SHARE_SUPPLY / 20),
        &Vec::from_array(&setup.env, [190 * ONE, 0]),
        &RemoveLiquidityKind::SingleTokenExactOut,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #2006)")]
fn test_remove_liquidity_below_min_out() {
    let (setup, _token_a, _token_b, pool) = product_pool_setup(0);
    setup.vault.remove_liquidity(
        &setup.lp,
        &pool.address,
        &(SHARE_SUPPLY / 10),
        &Vec::from_array(&setup.env, [100 * ONE + 1, 100 * ONE]),
        &RemoveLiquidityKind::Proportional,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #313)")]
fn test_remove_liquidity_keeps_min_supply() {
    let (setup, _token_a, _token_b, pool) = product_pool_setup(0);
    setup.vault.remove_liquidity(
        &setup.lp,
        &pool.address,
        &(SHARE_SUPPLY - MIN_SUPPLY + 1),
        &Vec::from_array(&setup.env, [0, 0]),
        &RemoveLiquidityKind::Proportional,
    );
}

#[test]
fn test_remove_all_but_min_supply() {
    let (setup, token_a, _token_b, pool) = product_pool_setup(0);
    setup.vault.remove_liquidity(
        &setup.lp,
        &pool.address,
        &(SHARE_SUPPLY - MIN_SUPPLY),
        &Vec::from_array(&setup.env, [0, 0]),
        &RemoveLiquidityKind::Proportional,
    );
    assert_eq!(pool.total_supply(), MIN_SUPPLY);
    assert_eq!(pool.balance(&setup.lp), 0);
    // the locked shares keep a dust of every token in the pool
    assert!(setup.vault.get_reserves(&token_a) > 0);
    assert_eq!(
        setup.vault.get_reserves(&token_a),
        setup.balance(&token_a, &setup.vault.address)
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #2001)")]
fn test_add_liquidity_wrong_vec_size() {
    let (setup, _token_a, _token_b, pool) = product_pool_setup(0);
    setup.vault.add_liquidity(
        &setup.user,
        &pool.address,
        &Vec::from_array(&setup.env, [ONE]),
        &0,
        &AddLiquidityKind::Unbalanced,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #307)")]
fn test_register_pool_duplicate_token() {
    let setup = Setup::default();
    let token = setup.create_token().address;
    let pool = create_pool_contract(&setup.env, &setup.vault.address, PoolCurve::ConstantSum);
    setup.vault.register_pool(
        &setup.admin,
        &pool.address,
        &Vec::from_array(&setup.env, [token.clone(), token]),
        &0,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #2003)")]
fn test_register_pool_fee_too_high() {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = create_pool_contract(&setup.env, &setup.vault.address, PoolCurve::ConstantSum);
    setup.vault.register_pool(
        &setup.admin,
        &pool.address,
        &Vec::from_array(&setup.env, [token_a, token_b]),
        &1001,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #2001)")]
fn test_register_pool_too_many_tokens() {
    let setup = Setup::default();
    let mut tokens = Vec::new(&setup.env);
    for _ in 0..5 {
        tokens.push_back(setup.create_token().address);
    }
    let pool = create_pool_contract(&setup.env, &setup.vault.address, PoolCurve::ConstantSum);
    setup
        .vault
        .register_pool(&setup.admin, &pool.address, &tokens, &0);
}

#[test]
#[should_panic(expected = "Error(Contract, #305)")]
fn test_register_pool_of_other_vault() {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = create_pool_contract(
        &setup.env,
        &Address::generate(&setup.env),
        PoolCurve::ConstantSum,
    );
    setup.vault.register_pool(
        &setup.admin,
        &pool.address,
        &Vec::from_array(&setup.env, [token_a, token_b]),
        &0,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #301)")]
fn test_register_pool_twice() {
    let (setup, token_a, token_b, pool) = product_pool_setup(0);
    setup.vault.register_pool(
        &setup.admin,
        &pool.address,
        &Vec::from_array(&setup.env, [token_a, token_b]),
        &0,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #303)")]
fn test_initialize_pool_twice() {
    let (setup, token_a, token_b, pool) = product_pool_setup(0);
    setup.mint(&token_a, &setup.lp, ONE);
    setup.mint(&token_b, &setup.lp, ONE);
    setup.vault.initialize_pool(
        &setup.lp,
        &pool.address,
        &Vec::from_array(&setup.env, [ONE, ONE]),
        &0,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #2004)")]
fn test_initialize_pool_requires_every_token() {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    setup.mint(&token_a, &setup.lp, ONE);
    setup.create_pool(&[&token_a, &token_b], PoolCurve::ConstantSum, 0, &[ONE, 0]);
}

#[test]
#[should_panic(expected = "Error(Contract, #304)")]
fn test_add_liquidity_before_initialization() {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = create_pool_contract(&setup.env, &setup.vault.address, PoolCurve::ConstantSum);
    setup.vault.register_pool(
        &setup.admin,
        &pool.address,
        &Vec::from_array(&setup.env, [token_a, token_b]),
        &0,
    );
    setup.vault.add_liquidity(
        &setup.user,
        &pool.address,
        &Vec::from_array(&setup.env, [ONE, ONE]),
        &0,
        &AddLiquidityKind::Unbalanced,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #302)")]
fn test_unknown_pool() {
    let setup = Setup::default();
    setup
        .vault
        .get_pool_config(&Address::generate(&setup.env));
}

#[test]
#[should_panic(expected = "Error(Contract, #2011)")]
fn test_initialize_pool_below_min_shares() {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    setup.mint(&token_a, &setup.lp, ONE);
    setup.mint(&token_b, &setup.lp, ONE);
    let pool = create_pool_contract(&setup.env, &setup.vault.address, PoolCurve::ConstantSum);
    setup.vault.register_pool(
        &setup.admin,
        &pool.address,
        &Vec::from_array(&setup.env, [token_a, token_b]),
        &0,
    );
    setup.vault.initialize_pool(
        &setup.lp,
        &pool.address,
        &Vec::from_array(&setup.env, [ONE, ONE]),
        &(2 * ONE * 100_000_000_000),
    );
}
