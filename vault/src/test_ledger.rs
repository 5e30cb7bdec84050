#![cfg(test)]
extern crate std;

use crate::bank::LedgerMode;
use crate::ledger::Ledger;
use crate::testutils::{Setup, ONE};
use soroban_liquidity_pool_contract::PoolCurve;

#[test]
fn test_delta_counting() {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;

    setup.env.as_contract(&setup.vault.address, || {
        let mut ledger = Ledger::unlock(&setup.env, LedgerMode::Live);
        ledger.take_debt(&token_a, 10);
        ledger.supply_credit(&token_b, 5);
        assert_eq!(ledger.non_zero_delta_count(), 2);
        assert_eq!(ledger.token_delta(&token_a), 10);
        assert_eq!(ledger.token_delta(&token_b), -5);

        ledger.supply_credit(&token_a, 4);
        assert_eq!(ledger.non_zero_delta_count(), 2);
        ledger.supply_credit(&token_a, 6);
        assert_eq!(ledger.non_zero_delta_count(), 1);
        ledger.take_debt(&token_b, 0);
        assert_eq!(ledger.non_zero_delta_count(), 1);
        ledger.take_debt(&token_b, 5);
        assert_eq!(ledger.non_zero_delta_count(), 0);
        ledger.lock();
    });
}

#[test]
#[should_panic(expected = "Error(Contract, #311)")]
fn test_lock_with_open_delta() {
    let setup = Setup::default();
    let token = setup.create_token().address;

    setup.env.as_contract(&setup.vault.address, || {
        let mut ledger = Ledger::unlock(&setup.env, LedgerMode::Live);
        ledger.take_debt(&token, 1);
        ledger.lock();
    });
}

#[test]
fn test_settle_is_capped_by_hint() {
    let setup = Setup::default();
    let token = setup.create_token().address;
    setup.mint(&token, &setup.vault.address, 100 * ONE);

    setup.env.as_contract(&setup.vault.address, || {
        let mut ledger = Ledger::unlock(&setup.env, LedgerMode::Live);
        assert_eq!(ledger.settle(&token, 60 * ONE), 60 * ONE);
        assert_eq!(ledger.token_delta(&token), -((60 * ONE) as i128));
        assert_eq!(ledger.reserves_of(&token), 100 * ONE);

        // nothing new arrived since the last sync
        assert_eq!(ledger.settle(&token, 60 * ONE), 0);

        ledger.take_debt(&token, 60 * ONE);
        ledger.lock();
    });
    assert_eq!(setup.vault.get_reserves(&token), 100 * ONE);
}

#[test]
fn test_send_to() {
    let setup = Setup::default();
    let token = setup.create_token().address;
    setup.mint(&token, &setup.vault.address, 100 * ONE);

    setup.env.as_contract(&setup.vault.address, || {
        let mut ledger = Ledger::unlock(&setup.env, LedgerMode::Live);
        ledger.settle(&token, 100 * ONE);
        ledger.send_to(&token, &setup.user, 100 * ONE);
        assert_eq!(ledger.non_zero_delta_count(), 0);
        assert_eq!(ledger.reserves_of(&token), 0);
        ledger.lock();
    });
    assert_eq!(setup.balance(&token, &setup.user), 100 * ONE);
    assert_eq!(setup.balance(&token, &setup.vault.address), 0);
    assert_eq!(setup.vault.get_reserves(&token), 0);
}

#[test]
#[should_panic(expected = "Error(Contract, #312)")]
fn test_send_more_than_reserves() {
    let setup = Setup::default();
    let token = setup.create_token().address;
    setup.mint(&token, &setup.vault.address, 100 * ONE);

    setup.env.as_contract(&setup.vault.address, || {
        let mut ledger = Ledger::unlock(&setup.env, LedgerMode::Live);
        ledger.send_to(&token, &setup.user, ONE);
    });
}

#[test]
fn test_query_session_commits_nothing() {
    let setup = Setup::default();
    let token = setup.create_token().address;
    setup.mint(&token, &setup.user, 50 * ONE);

    setup.env.as_contract(&setup.vault.address, || {
        let vault = setup.vault.address.clone();
        let mut ledger = Ledger::unlock(&setup.env, LedgerMode::Query);
        ledger.bank.transfer(&token, &setup.user, &vault, 50 * ONE);
        assert_eq!(ledger.bank.balance(&token, &setup.user), 0);
        assert_eq!(ledger.bank.balance(&token, &vault), 50 * ONE);

        assert_eq!(ledger.settle(&token, u128::MAX), 50 * ONE);
        assert_eq!(ledger.reserves_of(&token), 50 * ONE);
        // unsettled query sessions close without error
        ledger.take_debt(&token, ONE);
        ledger.lock();
    });
    assert_eq!(setup.balance(&token, &setup.user), 50 * ONE);
    assert_eq!(setup.balance(&token, &setup.vault.address), 0);
    assert_eq!(setup.vault.get_reserves(&token), 0);
}

#[test]
fn test_query_burn_tops_up_holder() {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = setup.create_funded_pool(
        &[&token_a, &token_b],
        PoolCurve::ConstantSum,
        0,
        &[100 * ONE, 100 * ONE],
    );
    let supply = pool.total_supply();
    let shares = supply / 10;

    setup.env.as_contract(&setup.vault.address, || {
        let mut ledger = Ledger::unlock(&setup.env, LedgerMode::Query);
        ledger.bank.burn_shares(&pool.address, &setup.user, shares);
        assert_eq!(ledger.bank.balance(&pool.address, &setup.user), 0);
        assert_eq!(ledger.bank.total_supply(&pool.address), supply);

        ledger.bank.mint_shares(&pool.address, &setup.user, shares);
        assert_eq!(ledger.bank.total_supply(&pool.address), supply + shares);
        ledger.lock();
    });
    assert_eq!(pool.total_supply(), supply);
    assert_eq!(pool.balance(&setup.user), 0);
}

#[test]
fn test_session_caches_until_lock() {
    let setup = Setup::default();
    let token_a = setup.create_token().address;
    let token_b = setup.create_token().address;
    let pool = setup.create_funded_pool(
        &[&token_a, &token_b],
        PoolCurve::ConstantSum,
        0,
        &[100 * ONE, 100 * ONE],
    );

    setup.env.as_contract(&setup.vault.address, || {
        let mut ledger = Ledger::unlock(&setup.env, LedgerMode::Live);
        let mut balances = ledger.pool_balances(&pool.address);
        balances.set(0, 0);
        ledger.set_pool_balances(&pool.address, &balances);
        assert_eq!(ledger.pool_balances(&pool.address).get_unchecked(0), 0);
        // dropped without lock
    });
    assert_eq!(
        setup.vault.get_pool_balances(&pool.address).get_unchecked(0),
        100 * ONE
    );
}
