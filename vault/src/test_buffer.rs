#![cfg(test)]
extern crate std;

use crate::testutils::{
    buffer_step, create_wrapped_token_contract, exact_in_path, exact_out_path, step,
    transfer_events, Setup, ONE,
};
use crate::types::BufferData;
use soroban_liquidity_pool_contract::PoolCurve;
use soroban_sdk::Vec;

#[test]
fn test_buffer_liquidity() {
    let setup = Setup::default();
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    let lp = setup.lp.clone();

    assert_eq!(
        setup.vault.get_buffer(&wrapper.address),
        BufferData {
            underlying_token: underlying.clone(),
            underlying_balance: 1000 * ONE,
            wrapped_balance: 1000 * ONE,
        }
    );
    // first deposit is valued in underlying, with the minimum supply locked
    assert_eq!(setup.vault.get_buffer_total_shares(&wrapper.address), 2000 * ONE);
    assert_eq!(
        setup.vault.get_buffer_shares(&wrapper.address, &lp),
        2000 * ONE - 10_000
    );
    assert_eq!(setup.vault.get_reserves(&underlying), 1000 * ONE);
    assert_eq!(setup.vault.get_reserves(&wrapper.address), 1000 * ONE);

    let (underlying_out, wrapped_out) = setup.vault.remove_liquidity_from_buffer(
        &lp,
        &wrapper.address,
        &(1000 * ONE),
        &(500 * ONE),
        &(500 * ONE),
    );
    assert_eq!((underlying_out, wrapped_out), (500 * ONE, 500 * ONE));
    assert_eq!(
        setup.vault.get_buffer_balances(&wrapper.address),
        (500 * ONE, 500 * ONE)
    );
    assert_eq!(setup.balance(&underlying, &lp), 500 * ONE);
    assert_eq!(wrapper.balance(&lp), (500 * ONE) as i128);
    assert_eq!(
        setup.vault.get_buffer_shares(&wrapper.address, &lp),
        1000 * ONE - 10_000
    );
    assert_eq!(setup.vault.get_reserves(&underlying), 500 * ONE);
}

#[test]
fn test_buffer_second_deposit() {
    let setup = Setup::default();
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    let user = setup.user.clone();

    setup.mint(&underlying, &user, 100 * ONE);
    let shares = setup
        .vault
        .add_liquidity_to_buffer(&user, &wrapper.address, &(100 * ONE), &0, &(100 * ONE));
    assert_eq!(shares, 100 * ONE);
    assert_eq!(setup.vault.get_buffer_shares(&wrapper.address, &user), 100 * ONE);
    assert_eq!(setup.vault.get_buffer_total_shares(&wrapper.address), 2100 * ONE);
}

#[test]
#[should_panic(expected = "Error(Contract, #315)")]
fn test_remove_more_buffer_shares_than_owned() {
    let setup = Setup::default();
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    setup
        .vault
        .remove_liquidity_from_buffer(&setup.user, &wrapper.address, &1, &0, &0);
}

#[test]
#[should_panic(expected = "Error(Contract, #314)")]
fn test_first_buffer_deposit_too_small() {
    let setup = Setup::default();
    let underlying = setup.create_token().address;
    setup.create_buffer(&underlying, 5_000, 4_999);
}

#[test]
fn test_wrap_served_by_buffer() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    let total_assets = wrapper.total_assets();
    setup.mint(&underlying, &setup.user, 10 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &underlying,
            &[buffer_step(&wrapper.address, &wrapper.address)],
            10 * ONE,
            10 * ONE,
        )],
    );
    let (path_amounts_out, tokens_out, amounts_out) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_out, Vec::from_array(e, [10 * ONE]));
    assert_eq!(tokens_out, Vec::from_array(e, [wrapper.address.clone()]));
    assert_eq!(amounts_out, Vec::from_array(e, [10 * ONE]));

    assert_eq!(wrapper.balance(&setup.user), (10 * ONE) as i128);
    assert_eq!(
        setup.vault.get_buffer_balances(&wrapper.address),
        (1010 * ONE, 990 * ONE)
    );
    // the wrapper itself was not touched
    assert_eq!(wrapper.total_assets(), total_assets);
    assert_eq!(setup.vault.get_reserves(&underlying), 1010 * ONE);
    assert_eq!(setup.vault.get_reserves(&wrapper.address), 990 * ONE);
}

#[test]
fn test_wrap_through_wrapper() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 5 * ONE);
    setup.mint(&underlying, &setup.user, 10 * ONE);
    assert_eq!(wrapper.total_assets(), 5 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &underlying,
            &[buffer_step(&wrapper.address, &wrapper.address)],
            10 * ONE,
            0,
        )],
    );
    let (path_amounts_out, _, _) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_out, Vec::from_array(e, [10 * ONE]));

    assert_eq!(wrapper.total_assets(), 15 * ONE);
    assert_eq!(wrapper.balance(&setup.user), (10 * ONE) as i128);
    assert_eq!(
        setup.vault.get_buffer_balances(&wrapper.address),
        (1000 * ONE, 5 * ONE)
    );
    for token in [&underlying, &wrapper.address] {
        assert_eq!(
            setup.vault.get_reserves(token),
            setup.balance(token, &setup.vault.address)
        );
    }
}

#[test]
fn test_query_matches_execution_through_wrapper() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 5 * ONE);
    setup.mint(&underlying, &setup.user, 10 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &underlying,
            &[buffer_step(&wrapper.address, &wrapper.address)],
            10 * ONE,
            0,
        )],
    );
    let quoted = setup.vault.query_swap_exact_in(&paths);
    assert_eq!(wrapper.total_assets(), 5 * ONE);

    let executed = setup
        .vault
        .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(quoted, executed);
}

#[test]
fn test_unwrap_exact_out() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    setup.wrap(&wrapper, &setup.user, 10 * ONE);
    // `wrap` mints the underlying it deposits
    assert_eq!(setup.balance(&underlying, &setup.user), 0);

    let paths = Vec::from_array(
        e,
        [exact_out_path(
            e,
            &wrapper.address,
            &[buffer_step(&wrapper.address, &underlying)],
            10 * ONE,
            10 * ONE,
        )],
    );
    let (path_amounts_in, tokens_in, amounts_in) =
        setup
            .vault
            .swap_exact_out(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_in, Vec::from_array(e, [10 * ONE]));
    assert_eq!(tokens_in, Vec::from_array(e, [wrapper.address.clone()]));
    assert_eq!(amounts_in, Vec::from_array(e, [10 * ONE]));

    assert_eq!(setup.balance(&underlying, &setup.user), 10 * ONE);
    assert_eq!(wrapper.balance(&setup.user), 0);
    assert_eq!(
        setup.vault.get_buffer_balances(&wrapper.address),
        (990 * ONE, 1010 * ONE)
    );
}

#[test]
fn test_wrap_exact_out_refunds_unused_max() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    setup.mint(&underlying, &setup.user, 15 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_out_path(
            e,
            &underlying,
            &[buffer_step(&wrapper.address, &wrapper.address)],
            15 * ONE,
            10 * ONE,
        )],
    );
    let quoted = setup.vault.query_swap_exact_out(&paths);
    let executed = setup
        .vault
        .swap_exact_out(&setup.user, &paths, &setup.deadline());
    assert_eq!(quoted, executed);

    let (path_amounts_in, tokens_in, amounts_in) = executed;
    assert_eq!(path_amounts_in, Vec::from_array(e, [10 * ONE]));
    assert_eq!(tokens_in, Vec::from_array(e, [underlying.clone()]));
    // the full max is pulled up front, only the used part is reported
    assert_eq!(amounts_in, Vec::from_array(e, [10 * ONE]));

    assert_eq!(
        transfer_events(e, &underlying),
        std::vec![
            (setup.user.clone(), setup.vault.address.clone(), (15 * ONE) as i128),
            (setup.vault.address.clone(), setup.user.clone(), (5 * ONE) as i128),
        ]
    );
    assert_eq!(setup.balance(&underlying, &setup.user), 5 * ONE);
    assert_eq!(wrapper.balance(&setup.user), (10 * ONE) as i128);
    assert_eq!(setup.vault.get_reserves(&underlying), 1010 * ONE);
}

#[test]
fn test_swap_then_unwrap() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let token_b = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    setup.wrap(&wrapper, &setup.lp, 100 * ONE);
    setup.mint(&token_b, &setup.lp, 100 * ONE);
    let pool = setup.create_pool(
        &[&wrapper.address, &token_b],
        PoolCurve::ConstantSum,
        0,
        &[100 * ONE, 100 * ONE],
    );
    setup.mint(&token_b, &setup.user, 20 * ONE);
    let steps = [
        step(&pool.address, &wrapper.address),
        buffer_step(&wrapper.address, &underlying),
    ];

    let exact_in = Vec::from_array(e, [exact_in_path(e, &token_b, &steps, 10 * ONE, 10 * ONE)]);
    let quoted = setup.vault.query_swap_exact_in(&exact_in);
    let executed = setup
        .vault
        .swap_exact_in(&setup.user, &exact_in, &setup.deadline());
    assert_eq!(quoted, executed);
    assert_eq!(
        executed,
        (
            Vec::from_array(e, [10 * ONE]),
            Vec::from_array(e, [underlying.clone()]),
            Vec::from_array(e, [10 * ONE]),
        )
    );
    // the wrapped tokens move between pool and buffer inside the vault
    assert_eq!(transfer_events(e, &wrapper.address), std::vec![]);
    assert_eq!(
        transfer_events(e, &underlying),
        std::vec![(setup.vault.address.clone(), setup.user.clone(), (10 * ONE) as i128)]
    );
    assert_eq!(
        setup.vault.get_buffer_balances(&wrapper.address),
        (990 * ONE, 1010 * ONE)
    );

    let exact_out = Vec::from_array(e, [exact_out_path(e, &token_b, &steps, 10 * ONE, 10 * ONE)]);
    let quoted = setup.vault.query_swap_exact_out(&exact_out);
    let executed = setup
        .vault
        .swap_exact_out(&setup.user, &exact_out, &setup.deadline());
    assert_eq!(quoted, executed);
    assert_eq!(
        executed,
        (
            Vec::from_array(e, [10 * ONE]),
            Vec::from_array(e, [token_b.clone()]),
            Vec::from_array(e, [10 * ONE]),
        )
    );
    assert_eq!(
        setup.vault.get_buffer_balances(&wrapper.address),
        (980 * ONE, 1020 * ONE)
    );
    assert_eq!(
        setup.vault.get_pool_balances(&pool.address),
        Vec::from_array(e, [80 * ONE, 120 * ONE])
    );
    assert_eq!(setup.balance(&underlying, &setup.user), 20 * ONE);
    assert_eq!(setup.balance(&token_b, &setup.user), 0);
    for token in [&underlying, &wrapper.address, &token_b] {
        assert_eq!(
            setup.vault.get_reserves(token),
            setup.balance(token, &setup.vault.address)
        );
    }
}

#[test]
fn test_wrap_follows_wrapper_rate() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    // yield: the wrapper now holds 1100 assets for 1000 shares
    setup.mint(&underlying, &wrapper.address, 100 * ONE);
    setup.mint(&underlying, &setup.user, 11 * ONE);
    let expected = wrapper.preview_deposit(&(11 * ONE));
    assert!(expected < 10 * ONE + 10 && expected > 10 * ONE - 10);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &underlying,
            &[buffer_step(&wrapper.address, &wrapper.address)],
            11 * ONE,
            0,
        )],
    );
    let (path_amounts_out, _, _) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_out, Vec::from_array(e, [expected]));
    assert_eq!(wrapper.balance(&setup.user), expected as i128);
}

#[test]
fn test_wrap_then_swap() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let token_b = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    setup.wrap(&wrapper, &setup.lp, 100 * ONE);
    setup.mint(&token_b, &setup.lp, 100 * ONE);
    let pool = setup.create_pool(
        &[&wrapper.address, &token_b],
        PoolCurve::ConstantSum,
        0,
        &[100 * ONE, 100 * ONE],
    );
    setup.mint(&underlying, &setup.user, 10 * ONE);

    let paths = Vec::from_array(
        e,
        [exact_in_path(
            e,
            &underlying,
            &[
                buffer_step(&wrapper.address, &wrapper.address),
                step(&pool.address, &token_b),
            ],
            10 * ONE,
            10 * ONE,
        )],
    );
    let (path_amounts_out, tokens_out, _) =
        setup
            .vault
            .swap_exact_in(&setup.user, &paths, &setup.deadline());
    assert_eq!(path_amounts_out, Vec::from_array(e, [10 * ONE]));
    assert_eq!(tokens_out, Vec::from_array(e, [token_b.clone()]));
    assert_eq!(setup.balance(&token_b, &setup.user), 10 * ONE);
    assert_eq!(transfer_events(e, &wrapper.address), std::vec![]);
    assert_eq!(
        setup.vault.get_pool_balances(&pool.address),
        Vec::from_array(e, [110 * ONE, 90 * ONE])
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #310)")]
fn test_unregistered_buffer() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let wrapper = create_wrapped_token_contract(e, &underlying);
    setup.mint(&underlying, &setup.user, ONE);
    setup.vault.swap_exact_in(
        &setup.user,
        &Vec::from_array(
            e,
            [exact_in_path(
                e,
                &underlying,
                &[buffer_step(&wrapper.address, &wrapper.address)],
                ONE,
                0,
            )],
        ),
        &setup.deadline(),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #322)")]
fn test_buffer_step_with_foreign_token() {
    let setup = Setup::default();
    let e = &setup.env;
    let underlying = setup.create_token().address;
    let other = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    setup.mint(&other, &setup.user, ONE);
    setup.vault.swap_exact_in(
        &setup.user,
        &Vec::from_array(
            e,
            [exact_in_path(
                e,
                &other,
                &[buffer_step(&wrapper.address, &wrapper.address)],
                ONE,
                0,
            )],
        ),
        &setup.deadline(),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #309)")]
fn test_register_buffer_twice() {
    let setup = Setup::default();
    let underlying = setup.create_token().address;
    let wrapper = setup.create_buffer(&underlying, 1000 * ONE, 1000 * ONE);
    setup.vault.register_buffer(&setup.admin, &wrapper.address);
}
