#![cfg(test)]
extern crate std;

use crate::testutils::{exact_in_path, step, transfer_events, Setup, ONE};
use soroban_liquidity_pool_contract::{LiquidityPoolClient, PoolCurve};
use soroban_sdk::{Address, Error, Vec};
use utils::test_utils::jump;

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

// pool_ab shares paired with C at 1:1
fn nested_pool<'a>(m: &Market<'a>) -> LiquidityPoolClient<'a> {
    let setup = &m.setup;
    setup.mint(&m.token_c, &setup.lp, 100 * ONE);
    setup.create_pool(
        &[&m.pool_ab.address, &m.token_c],
        PoolCurve::ConstantSum,
        0,
        &[100_000_000_000_000_000_000, 100 * ONE],
    )
}

fn assert_reserves_match_balances(setup: &Setup, tokens: &[&Address]) {
    for token in tokens {
        assert_eq!(
            setup.vault.get_reserves(token),
            setup.balance(token, &setup.vault.address)
        );
    }
}

#[test]
fn test_two_step_path() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 10 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &m.token_a,
            &[
                step(&m.pool_ab.address, &m.token_b),
                step(&m.pool_bc.address, &m.token_c),
            ],
            10 * ONE,
            10 * ONE,
        )],
    );
    let (path_amounts_out, tokens_out, amounts_out) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_out, Vec::from_array(e, [10 * ONE]));
    assert_eq!(tokens_out, Vec::from_array(e, [m.token_c.clone()]));
    assert_eq!(amounts_out, Vec::from_array(e, [10 * ONE]));

    // the intermediate token never leaves the vault
    assert_eq!(
        transfer_events(e, &m.token_a),
        std::vec![(setup.user.clone(), setup.vault.address.clone(), (10 * ONE) as i128)]
    );
    assert_eq!(transfer_events(e, &m.token_b), std::vec![]);
    assert_eq!(
        transfer_events(e, &m.token_c),
        std::vec![(setup.vault.address.clone(), setup.user.clone(), (10 * ONE) as i128)]
    );

    assert_eq!(setup.balance(&m.token_a, &setup.user), 0);
    assert_eq!(setup.balance(&m.token_c, &setup.user), 10 * ONE);
    assert_eq!(
        setup.vault.get_pool_balances(&m.pool_ab.address),
        Vec::from_array(e, [1010 * ONE, 990 * ONE])
    );
    assert_eq!(
        setup.vault.get_pool_balances(&m.pool_bc.address),
        Vec::from_array(e, [1010 * ONE, 990 * ONE])
    );
    assert_reserves_match_balances(setup, &[&m.token_a, &m.token_b, &m.token_c]);
}

#[test]
fn test_paths_sharing_token_in_pull_once() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 10 * ONE);

    let paths = Vec::from_array(
        e,
        [
            exact_in_path(e, &m.token_a, &[step(&m.pool_ab.address, &m.token_b)], 4 * ONE, 0),
            exact_in_path(
                e,
                &m.token_a,
                &[
                    step(&m.pool_ab.address, &m.token_b),
                    step(&m.pool_bc.address, &m.token_c),
                ],
                6 * ONE,
                0,
            ),
        ],
    );
    let (path_amounts_out, tokens_out, amounts_out) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_out, Vec::from_array(e, [4 * ONE, 6 * ONE]));
    assert_eq!(
        tokens_out,
        Vec::from_array(e, [m.token_b.clone(), m.token_c.clone()])
    );
    assert_eq!(amounts_out, Vec::from_array(e, [4 * ONE, 6 * ONE]));
    assert_eq!(
        transfer_events(e, &m.token_a),
        std::vec![(setup.user.clone(), setup.vault.address.clone(), (10 * ONE) as i128)]
    );
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
            exact_in_path(e, &m.token_a, &[step(&m.pool_ab.address, &m.token_b)], 10 * ONE, 0),
            exact_in_path(e, &m.token_b, &[step(&m.pool_ab.address, &m.token_a)], 10 * ONE, 0),
        ],
    );
    let (path_amounts_out, tokens_out, amounts_out) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_out, Vec::from_array(e, [10 * ONE, 10 * ONE]));
    assert_eq!(
        tokens_out,
        Vec::from_array(e, [m.token_b.clone(), m.token_a.clone()])
    );
    assert_eq!(amounts_out, Vec::from_array(e, [10 * ONE, 10 * ONE]));

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
fn test_query_matches_execution() {
    let m = market(PoolCurve::ConstantProduct, 30);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 25 * ONE);
    setup.mint(&m.token_b, &setup.user, 5 * ONE);

    let paths = Vec::from_array(
        e,
        [
            exact_in_path(
                e,
                &m.token_a,
                &[
                    step(&m.pool_ab.address, &m.token_b),
                    step(&m.pool_bc.address, &m.token_c),
                ],
                25 * ONE,
                0,
            ),
            exact_in_path(e, &m.token_b, &[step(&m.pool_bc.address, &m.token_c)], 5 * ONE, 0),
        ],
    );
    let quoted = setup.vault.query_swap_exact_in(&paths);
    // quoting leaves no trace
    assert_eq!(
        setup.vault.get_pool_balances(&m.pool_ab.address),
        Vec::from_array(e, [1000 * ONE, 1000 * ONE])
    );
    assert_eq!(setup.balance(&m.token_a, &setup.user), 25 * ONE);

    let executed = setup
        .vault
        .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(quoted, executed);

    let (path_amounts_out, _, amounts_out) = executed;
    assert_eq!(
        amounts_out.get_unchecked(0),
        path_amounts_out.get_unchecked(0) + path_amounts_out.get_unchecked(1)
    );
    // 25 in minus 0.3% fee: 24.925 * 1000 / 1024.925
    let first_hop = setup.vault.get_pool_balances(&m.pool_ab.address);
    assert_eq!(first_hop.get_unchecked(0), 1025 * ONE);
    assert!(first_hop.get_unchecked(1) < 976 * ONE);
    assert_eq!(setup.balance(&m.token_c, &setup.user), amounts_out.get_unchecked(0));
    assert_reserves_match_balances(setup, &[&m.token_a, &m.token_b, &m.token_c]);
}

#[test]
fn test_value_is_conserved() {
    let m = market(PoolCurve::ConstantProduct, 100);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 50 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &m.token_a,
            &[
                step(&m.pool_ab.address, &m.token_b),
                step(&m.pool_bc.address, &m.token_c),
            ],
            50 * ONE,
            0,
        )],
    );
    let (path_amounts_out, _, _) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());

    let ab = setup.vault.get_pool_balances(&m.pool_ab.address);
    let bc = setup.vault.get_pool_balances(&m.pool_bc.address);
    // what the pools gained and lost is exactly what the user paid and received
    assert_eq!(ab.get_unchecked(0), 1050 * ONE);
    assert_eq!(1000 * ONE - ab.get_unchecked(1), bc.get_unchecked(0) - 1000 * ONE);
    assert_eq!(1000 * ONE - bc.get_unchecked(1), path_amounts_out.get_unchecked(0));
    assert_eq!(
        setup.balance(&m.token_c, &setup.user),
        path_amounts_out.get_unchecked(0)
    );
    assert_reserves_match_balances(setup, &[&m.token_a, &m.token_b, &m.token_c]);
}

#[test]
fn test_mint_shares_last_step() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 100 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &m.token_a,
            &[step(&m.pool_ab.address, &m.pool_ab.address)],
            100 * ONE,
            0,
        )],
    );
    let (path_amounts_out, tokens_out, amounts_out) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());
    // supply * (sqrt(1.1) - 1)
    let shares = 48_808_848_170_151_546_991;
    assert_eq!(path_amounts_out, Vec::from_array(e, [shares]));
    assert_eq!(tokens_out, Vec::from_array(e, [m.pool_ab.address.clone()]));
    assert_eq!(amounts_out, Vec::from_array(e, [shares]));

    // minted straight to the sender
    assert_eq!(transfer_events(e, &m.pool_ab.address), std::vec![]);
    assert_eq!(m.pool_ab.balance(&setup.user), shares as i128);
    assert_eq!(setup.balance(&m.pool_ab.address, &setup.vault.address), 0);
}

#[test]
fn test_burn_shares_first_step() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let setup = &m.setup;
    let e = &setup.env;
    let lp = setup.lp.clone();
    let shares: u128 = 100_000_000_000_000_000_000;
    let shares_before = m.pool_ab.balance(&lp);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &m.pool_ab.address,
            &[step(&m.pool_ab.address, &m.token_a)],
            shares,
            190 * ONE,
        )],
    );
    let (path_amounts_out, tokens_out, amounts_out) =
        setup.vault.swap_exact_in(&lp, &paths, &setup.deadline());
    assert_eq!(path_amounts_out, Vec::from_array(e, [190 * ONE]));
    assert_eq!(tokens_out, Vec::from_array(e, [m.token_a.clone()]));
    assert_eq!(amounts_out, Vec::from_array(e, [190 * ONE]));

    assert_eq!(
        transfer_events(e, &m.pool_ab.address),
        std::vec![(lp.clone(), setup.vault.address.clone(), shares as i128)]
    );
    assert_eq!(m.pool_ab.balance(&lp), shares_before - shares as i128);
    assert_eq!(setup.balance(&m.pool_ab.address, &setup.vault.address), 0);
    assert_eq!(setup.balance(&m.token_a, &lp), 190 * ONE);
    assert_eq!(
        setup.vault.get_pool_balances(&m.pool_ab.address),
        Vec::from_array(e, [810 * ONE, 1000 * ONE])
    );
}

#[test]
fn test_mint_shares_then_swap() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let parent = nested_pool(&m);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 10 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &m.token_a,
            &[
                step(&m.pool_ab.address, &m.pool_ab.address),
                step(&parent.address, &m.token_c),
            ],
            10 * ONE,
            0,
        )],
    );
    let (path_amounts_out, tokens_out, _) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());

    // supply * (sqrt(1.01) - 1) shares, traded 1:1 against C
    let shares: u128 = 4_987_562_112_089_027_021;
    assert_eq!(path_amounts_out, Vec::from_array(e, [4_9875621]));
    assert_eq!(tokens_out, Vec::from_array(e, [m.token_c.clone()]));
    assert_eq!(setup.balance(&m.token_c, &setup.user), 4_9875621);
    assert_eq!(
        setup.vault.get_pool_balances(&parent.address).get_unchecked(0),
        100_000_000_000_000_000_000 + shares
    );
    assert_eq!(m.pool_ab.balance(&setup.user), 0);
    assert_reserves_match_balances(setup, &[&m.token_a, &m.pool_ab.address, &m.token_c]);
}

#[test]
fn test_swap_then_burn_shares() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let parent = nested_pool(&m);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_c, &setup.user, 10 * ONE);
    let supply_before = m.pool_ab.total_supply();

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &m.token_c,
            &[
                step(&parent.address, &m.pool_ab.address),
                step(&m.pool_ab.address, &m.token_a),
            ],
            10 * ONE,
            0,
        )],
    );
    let (path_amounts_out, tokens_out, _) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());

    // 1% of the supply burned against A alone: 1000 * (1 - 0.99^2)
    assert_eq!(path_amounts_out, Vec::from_array(e, [19_9000000]));
    assert_eq!(tokens_out, Vec::from_array(e, [m.token_a.clone()]));
    assert_eq!(setup.balance(&m.token_a, &setup.user), 19_9000000);
    assert_eq!(m.pool_ab.total_supply(), supply_before - 10_000_000_000_000_000_000);
    assert_eq!(transfer_events(e, &m.pool_ab.address), std::vec![]);
    assert_reserves_match_balances(setup, &[&m.token_a, &m.pool_ab.address, &m.token_c]);
}

#[test]
fn test_zero_amount_path() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let setup = &m.setup;
    let e = &setup.env;

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &m.token_a,
            &[
                step(&m.pool_ab.address, &m.token_b),
                step(&m.pool_bc.address, &m.token_c),
            ],
            0,
            0,
        )],
    );
    let (path_amounts_out, _, amounts_out) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_out, Vec::from_array(e, [0]));
    assert_eq!(amounts_out, Vec::from_array(e, [0]));
    assert_eq!(transfer_events(e, &m.token_a), std::vec![]);
    assert_eq!(transfer_events(e, &m.token_c), std::vec![]);
}

#[test]
#[should_panic(expected = "Error(Contract, #320)")]
fn test_deadline() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 10 * ONE);

    let deadline = setup.deadline();
    jump(e, 3601);
    setup.vault.swap_exact_in(
        &setup.user,
        &Vec::from_array(
            e,
            [exact_in_path(e, &m.token_a, &[step(&m.pool_ab.address, &m.token_b)], ONE, 0)],
        ),
        &deadline,
    );
}

#[test]
fn test_min_amount_out_reverts_batch() {
    let m = market(PoolCurve::ConstantProduct, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, 20 * ONE);

    // the first path succeeds on its own, the second cannot meet its minimum
    let paths = Vec::from_array(
        e,
        [
            exact_in_path(e, &m.token_a, &[step(&m.pool_ab.address, &m.token_b)], 10 * ONE, 0),
            exact_in_path(e, &m.token_a, &[step(&m.pool_ab.address, &m.token_b)], 10 * ONE, 10 * ONE),
        ],
    );
    let result = setup
        .vault
        .try_swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(result.err().unwrap().unwrap(), Error::from_contract_error(2006));

    assert_eq!(setup.balance(&m.token_a, &setup.user), 20 * ONE);
    assert_eq!(setup.balance(&m.token_b, &setup.user), 0);
    assert_eq!(
        setup.vault.get_pool_balances(&m.pool_ab.address),
        Vec::from_array(e, [1000 * ONE, 1000 * ONE])
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #321)")]
fn test_empty_path() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.vault.swap_exact_in(
        &setup.user,
        &Vec::from_array(e, [exact_in_path(e, &m.token_a, &[], ONE, 0)]),
        &setup.deadline(),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #322)")]
fn test_step_back_into_token_in() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, ONE);
    setup.vault.swap_exact_in(
        &setup.user,
        &Vec::from_array(
            e,
            [exact_in_path(e, &m.token_a, &[step(&m.pool_ab.address, &m.token_a)], ONE, 0)],
        ),
        &setup.deadline(),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #306)")]
fn test_token_not_in_pool() {
    let m = market(PoolCurve::ConstantSum, 0);
    let setup = &m.setup;
    let e = &setup.env;
    setup.mint(&m.token_a, &setup.user, ONE);
    setup.vault.swap_exact_in(
        &setup.user,
        &Vec::from_array(
            e,
            [exact_in_path(e, &m.token_a, &[step(&m.pool_bc.address, &m.token_c)], ONE, 0)],
        ),
        &setup.deadline(),
    );
}
