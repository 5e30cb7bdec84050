#![cfg(test)]
extern crate std;

use crate::testutils::{exact_in_path, exact_out_path, step, transfer_events, Setup, ONE};
use soroban_liquidity_pool_contract::{LiquidityPoolClient, PoolCurve};
use soroban_sdk::{Address, Error, Vec};
use utils::test_utils::assert_approx_eq_abs;

const SHARES_100: u128 = 100_000_000_000_000_000_000;

struct Market<'a> {
    setup: Setup<'a>,
    token_a: Address,
    token_b: Address,
    token_c: Address,
    pool_ab: LiquidityPoolClient<'a>,
    pool_bc: LiquidityPoolClient<'a>,
}

fn market<'a>(curve: PoolCurve, swap_fee_fraction: u32) -> Market<'a> {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let token_c = setup.create_token().address;
    let pool_ab = setup.create_funded_pool(
        &[&token_a, &token_b],
        curve,
        swap_fee_fraction,
        &[1000 * ONE, 1000 * ONE],
    );
    let pool_bc = setup.create_funded_pool(
        &[&token_b, &token_c],
        curve,
        swap_fee_fraction,
        &[1000 * ONE, 1000 * ONE],
    );
    Market {
        setup,
        token_a,
        token_b,
        token_c,
        pool_ab,
        pool_bc,
    }
}

fn two_step_path(m: &Market, max_amount_in: u128, exact_amount_out: u128) -> Vec<crate::types::SwapPathExactAmountOut> {
    let e = &m.setup.env;
    Vec::from_array(
        e,
        [exact_out_path(
            e,
            &m.token_a,
            &[
                step(&m.pool_ab.address, &m.token_b),
                step(&m.pool_bc.address, &m.token_c),
            ],
            max_amount_in,
            exact_amount_out,
        )],
    )
}

#[test]
fn test_two_step_path() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 10 * ONE);

    let (path_amounts_in, tokens_in, amounts_in) = setup.vault.swap_exact_out(
        &setup.user,
        &two_step_path(&m, 10 * ONE, 10 * ONE),
        &setup.deadline(),
    );
    assert_eq!(path_amounts_in, Vec::from_array(e, [10 * ONE]));
    assert_eq!(tokens_in, Vec::from_array(e, [m.token_a.clone()]));
    assert_eq!(amounts_in, Vec::from_array(e, [10 * ONE]));

    assert_eq!(
        transfer_events(e, &m.token_a),
        std::vec![(setup.user.clone(), setup.vault.address.clone(), (10 * ONE) as i128)]
    );
    assert_eq!(transfer_events(e, &m.token_b), std::vec![]);
    assert_eq!(
        transfer_events(e, &m.token_c),
        std::vec![(setup.vault.address.clone(), setup.user.clone(), (10 * ONE) as i128)]
    );
    assert_eq!(setup.balance(&m.token_c, &setup.user), 10 * ONE);
}

#[test]
fn test_unused_max_is_not_pulled() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 20 * ONE);

    let (path_amounts_in, _, amounts_in) = setup.vault.swap_exact_out(
        &setup.user,
        &two_step_path(&m, 20 * ONE, 10 * ONE),
        &setup.deadline(),
    );
    assert_eq!(path_amounts_in, Vec::from_array(e, [10 * ONE]));
    assert_eq!(amounts_in, Vec::from_array(e, [10 * ONE]));
    assert_eq!(
        transfer_events(e, &m.token_a),
        std::vec![(setup.user.clone(), setup.vault.address.clone(), (10 * ONE) as i128)]
    );
    assert_eq!(setup.balance(&m.token_a, &setup.user), 10 * ONE);
}

#[test]
fn test_paths_sharing_token_in_pull_once() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 11 * ONE);

    let paths = Vec::from_array(
        e,
        [
            exact_out_path(e, &m.token_a, &[step(&m.pool_ab.address, &m.token_b)], 5 * ONE, 4 * ONE),
            exact_out_path(
                e,
                &m.token_a,
                &[
                    step(&m.pool_ab.address, &m.token_b),
                    step(&m.pool_bc.address, &m.token_c),
                ],
                6 * ONE,
                6 * ONE,
            ),
        ],
    );
    let (path_amounts_in, tokens_in, amounts_in) =
        setup
            .vault
            .swap_exact_out(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_in, Vec::from_array(e, [4 * ONE, 6 * ONE]));
    assert_eq!(tokens_in, Vec::from_array(e, [m.token_a.clone()]));
    assert_eq!(amounts_in, Vec::from_array(e, [10 * ONE]));
    assert_eq!(
        transfer_events(e, &m.token_a),
        std::vec![(setup.user.clone(), setup.vault.address.clone(), (10 * ONE) as i128)]
    );
    assert_eq!(setup.balance(&m.token_a, &setup.user), ONE);
    assert_eq!(setup.balance(&m.token_b, &setup.user), 4 * ONE);
    assert_eq!(setup.balance(&m.token_c, &setup.user), 6 * ONE);
}

#[test]
fn test_circular_paths_need_no_funds() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;

    let paths = Vec::from_array(
        e,
        [
            exact_out_path(e, &m.token_a, &[step(&m.pool_ab.address, &m.token_b)], 10 * ONE, 10 * ONE),
            exact_out_path(e, &m.token_b, &[step(&m.pool_ab.address, &m.token_a)], 10 * ONE, 10 * ONE),
        ],
    );
    let (path_amounts_in, tokens_in, amounts_in) =
        setup
            .vault
            .swap_exact_out(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_in, Vec::from_array(e, [10 * ONE, 10 * ONE]));
    assert_eq!(
        tokens_in,
        Vec::from_array(e, [m.token_a.clone(), m.token_b.clone()])
    );
    assert_eq!(amounts_in, Vec::from_array(e, [10 * ONE, 10 * ONE]));

    assert_eq!(transfer_events(e, &m.token_a), std::vec![]);
    assert_eq!(transfer_events(e, &m.token_b), std::vec![]);
    assert_eq!(setup.balance(&m.token_a, &setup.user), 0);
    assert_eq!(setup.balance(&m.token_b, &setup.user), 0);
    assert_eq!(
        setup.vault.get_pool_balances(&m.pool_ab.address),
        Vec::from_array(e, [1000 * ONE, 1000 * ONE])
    );
}

#[test]
fn test_exact_out_mirrors_exact_in() {
    let m = market(PoolCurve::ConstantProduct, 30);
    let setup = &m.setup;
    let e = &setup.env;

    let exact_in = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &m.token_a,
            &[
                step(&m.pool_ab.address, &m.token_b),
                step(&m.pool_bc.address, &m.token_c),
            ],
            10 * ONE,
            0,
        )],
    );
    let (amounts_out, _, _) = setup.vault.query_swap_exact_in(&exact_in);
    let amount_out = amounts_out.get_unchecked(0);

    let quoted = setup
        .vault
        .query_swap_exact_out(&two_step_path(&m, 0, amount_out));
    assert_approx_eq_abs(quoted.0.get_unchecked(0), 10 * ONE, 5);

    setup.mint(&m.token_a, &setup.user, 11 * ONE);
    let executed = setup.vault.swap_exact_out(
        &setup.user,
        &two_step_path(&m, 11 * ONE, amount_out),
        &setup.deadline(),
    );
    assert_eq!(quoted, executed);
    assert_eq!(setup.balance(&m.token_c, &setup.user), amount_out);
    assert_eq!(
        setup.balance(&m.token_a, &setup.user),
        11 * ONE - executed.0.get_unchecked(0)
    );
}

#[test]
fn test_max_amount_in_exceeded() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let setup = &m.setup;
    setup.mint(&m.token_a, &setup.user, 20 * ONE);

    let result = setup.vault.try_swap_exact_out(
        &setup.user,
        &two_step_path(&m, 10 * ONE, 10 * ONE),
        &setup.deadline(),
    );
    assert_eq!(result.err().unwrap().unwrap(), Error::from_contract_error(2020));
    assert_eq!(setup.balance(&m.token_a, &setup.user), 20 * ONE);
}

#[test]
fn test_mint_shares_last_step() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 300 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_out_path(
            e,
            &m.token_a,
            &[step(&m.pool_ab.address, &m.pool_ab.address)],
            300 * ONE,
            SHARES_100,
        )],
    );
    let (path_amounts_in, tokens_in, amounts_in) =
        setup
            .vault
            .swap_exact_out(&setup.user, &paths, &setup.deadline());
    // supply grows 10%, balance A grows 21%
    assert_eq!(path_amounts_in, Vec::from_array(e, [210 * ONE]));
    assert_eq!(tokens_in, Vec::from_array(e, [m.token_a.clone()]));
    assert_eq!(amounts_in, Vec::from_array(e, [210 * ONE]));

    assert_eq!(m.pool_ab.balance(&setup.user), SHARES_100 as i128);
    assert_eq!(transfer_events(e, &m.pool_ab.address), std::vec![]);
    assert_eq!(setup.balance(&m.token_a, &setup.user), 90 * ONE);
}

#[test]
fn test_burn_shares_first_step() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let setup = &m.setup;
    let e = &setup.env;
    let lp = setup.lp.clone();
    let shares_before = m.pool_ab.balance(&lp);

    let paths = Vec::from_array(
        e,
        [exact_out_path(
            e,
            &m.pool_ab.address,
            &[step(&m.pool_ab.address, &m.token_a)],
            2 * SHARES_100,
            190 * ONE,
        )],
    );
    let (path_amounts_in, tokens_in, amounts_in) =
        setup.vault.swap_exact_out(&lp, &paths, &setup.deadline());
    assert_eq!(path_amounts_in, Vec::from_array(e, [SHARES_100]));
    assert_eq!(tokens_in, Vec::from_array(e, [m.pool_ab.address.clone()]));
    assert_eq!(amounts_in, Vec::from_array(e, [SHARES_100]));

    // the whole max is pulled and what was not burned goes straight back
    assert_eq!(
        transfer_events(e, &m.pool_ab.address),
        std::vec![
            (lp.clone(), setup.vault.address.clone(), (2 * SHARES_100) as i128),
            (setup.vault.address.clone(), lp.clone(), SHARES_100 as i128),
        ]
    );
    assert_eq!(m.pool_ab.balance(&lp), shares_before - SHARES_100 as i128);
    assert_eq!(setup.balance(&m.token_a, &lp), 190 * ONE);
    assert_eq!(setup.balance(&m.pool_ab.address, &setup.vault.address), 0);
}

#[test]
fn test_nested_pool_burn_borrows_shares() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_c, &setup.lp, 100 * ONE);
    let parent = setup.create_pool(
        &[&m.pool_ab.address, &m.token_c],
        PoolCurve::ConstantSum,
        0,
        &[SHARES_100, 100 * ONE],
    );
    setup.mint(&m.token_c, &setup.user, 10 * ONE);
    let supply_before = m.pool_ab.total_supply();

    let paths = Vec::from_array(
        e,
        [exact_out_path(
            e,
            &m.token_c,
            &[
                step(&parent.address, &m.pool_ab.address),
                step(&m.pool_ab.address, &m.token_a),
            ],
            10 * ONE,
            10 * ONE,
        )],
    );
    let (path_amounts_in, _, _) =
        setup
            .vault
            .swap_exact_out(&setup.user, &paths, &setup.deadline());

    // shares for 1% of A: supply * (1 - sqrt(0.99)), bought 1:1 with C
    let shares: u128 = 5_012_562_893_380_045_266;
    assert_eq!(path_amounts_in, Vec::from_array(e, [5_0125629]));
    assert_eq!(setup.balance(&m.token_a, &setup.user), 10 * ONE);
    assert_eq!(setup.balance(&m.token_c, &setup.user), 10 * ONE - 5_0125629);
    assert_eq!(m.pool_ab.total_supply(), supply_before - shares);
    assert_eq!(
        setup.vault.get_pool_balances(&parent.address).get_unchecked(0),
        SHARES_100 - shares
    );
    for token in [&m.token_a, &m.pool_ab.address, &m.token_c] {
        assert_eq!(
            setup.vault.get_reserves(token),
            setup.balance(token, &setup.vault.address)
        );
    }
}

#[test]
fn test_mint_shares_then_swap() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_c, &setup.lp, 100 * ONE);
    let parent = setup.create_pool(
        &[&m.pool_ab.address, &m.token_c],
        PoolCurve::ConstantSum,
        0,
        &[SHARES_100, 100 * ONE],
    );
    setup.mint(&m.token_a, &setup.user, 3 * ONE);
    let supply_before = m.pool_ab.total_supply();

    let paths = Vec::from_array(
        e,
        [exact_out_path(
            e,
            &m.token_a,
            &[
                step(&m.pool_ab.address, &m.pool_ab.address),
                step(&parent.address, &m.token_c),
            ],
            3 * ONE,
            ONE,
        )],
    );
    let quoted = setup.vault.query_swap_exact_out(&paths);
    let executed = setup
        .vault
        .swap_exact_out(&setup.user, &paths, &setup.deadline());
    assert_eq!(quoted, executed);

    // one share per C, 1e18 shares lift the supply by 0.1%, balance A by 0.2001%
    let shares: u128 = 1_000_000_000_000_000_000;
    let (path_amounts_in, tokens_in, amounts_in) = executed;
    assert_eq!(path_amounts_in, Vec::from_array(e, [2_0010000]));
    assert_eq!(tokens_in, Vec::from_array(e, [m.token_a.clone()]));
    assert_eq!(amounts_in, Vec::from_array(e, [2_0010000]));

    // shares are minted to the vault and spent in the parent pool
    assert_eq!(transfer_events(e, &m.pool_ab.address), std::vec![]);
    assert_eq!(m.pool_ab.total_supply(), supply_before + shares);
    assert_eq!(
        setup.vault.get_pool_balances(&parent.address),
        Vec::from_array(e, [SHARES_100 + shares, 99 * ONE])
    );
    assert_eq!(setup.balance(&m.token_a, &setup.user), 3 * ONE - 2_0010000);
    assert_eq!(setup.balance(&m.token_c, &setup.user), ONE);
    for token in [&m.token_a, &m.pool_ab.address, &m.token_c] {
        assert_eq!(
            setup.vault.get_reserves(token),
            setup.balance(token, &setup.vault.address)
        );
    }
}

#[test]
#[should_panic(expected = "Error(Contract, #321)")]
fn test_empty_path() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.vault.swap_exact_out(
        &setup.user,
        &Vec::from_array(e, [exact_out_path(e, &m.token_a, &[], ONE, ONE)]),
        &setup.deadline(),
    );
}
