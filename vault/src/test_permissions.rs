#![cfg(test)]
extern crate std;

use crate::testutils::{create_pool_contract, exact_in_path, step, Setup, ONE};
use soroban_liquidity_pool_contract::PoolCurve;
use soroban_sdk::testutils::{Address as _, AuthorizedFunction, AuthorizedInvocation};
use soroban_sdk::{Address, IntoVal, Symbol, Vec};

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_register_pool_not_admin() {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = create_pool_contract(&setup.env, &setup.vault.address, PoolCurve::ConstantSum);
    setup.vault.register_pool(
        &setup.user,
        &pool.address,
        &Vec::from_array(&setup.env, [token_a, token_b]),
        &0,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_register_buffer_not_admin() {
    let setup = Setup::default();
    setup
        .vault
        .register_buffer(&setup.user, &Address::generate(&setup.env));
}

#[test]
fn test_admin() {
    let setup = Setup::default();
    assert_eq!(setup.vault.get_admin(), setup.admin);
}

#[test]
fn test_swap_auth() {
    let setup = Setup::default();
    let e = &setup.env;
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = setup.create_funded_pool(
        &[&token_a, &token_b],
        PoolCurve::ConstantSum,
        0,
        &[100 * ONE, 100 * ONE],
    );
    setup.mint(&token_a, &setup.user, ONE);

    let paths = Vec::from_array(
        e,
        [exact_in_path(e, &token_a, &[step(&pool.address, &token_b)], ONE, ONE)],
    );
    let deadline = setup.deadline();
    setup.vault.swap_exact_in(&setup.user, &paths, &deadline);
    assert_eq!(
        e.auths()[0],
        (
            setup.user.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    setup.vault.address.clone(),
                    Symbol::new(e, "swap_exact_in"),
                    (setup.user.clone(), paths.clone(), deadline).into_val(e),
                )),
                sub_invocations: std::vec![AuthorizedInvocation {
                    function: AuthorizedFunction::Contract((
                        token_a.clone(),
                        Symbol::new(e, "transfer"),
                        (
                            setup.user.clone(),
                            setup.vault.address.clone(),
                            ONE as i128
                        )
                            .into_val(e),
                    )),
                    sub_invocations: std::vec![],
                }],
            }
        )
    );
}

#[test]
#[should_panic(expected = "Error(Auth, InvalidAction)")]
fn test_swap_requires_sender_auth() {
    let setup = Setup::default();
    let e = &setup.env;
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = setup.create_funded_pool(
        &[&token_a, &token_b],
        PoolCurve::ConstantSum,
        0,
        &[100 * ONE, 100 * ONE],
    );
    setup.mint(&token_a, &setup.user, ONE);

    e.set_auths(&[]);
    setup.vault.swap_exact_in(
        &setup.user,
        &Vec::from_array(
            e,
            [exact_in_path(e, &token_a, &[step(&pool.address, &token_b)], ONE, 0)],
        ),
        &setup.deadline(),
    );
}

#[test]
#[should_panic(expected = "Error(Auth, InvalidAction)")]
fn test_add_liquidity_requires_sender_auth() {
    let setup = Setup::default();
    let e = &setup.env;
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = setup.create_funded_pool(
        &[&token_a, &token_b],
        PoolCurve::ConstantSum,
        0,
        &[100 * ONE, 100 * ONE],
    );

    e.set_auths(&[]);
    setup.vault.add_liquidity(
        &setup.user,
        &pool.address,
        &Vec::from_array(e, [ONE, ONE]),
        &0,
        &crate::types::AddLiquidityKind::Unbalanced,
    );
}
