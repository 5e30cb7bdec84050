#![cfg(test)]
extern crate std;

use crate::{LiquidityPool, LiquidityPoolClient, PoolCurve};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env, String};

pub(crate) struct Setup<'a> {
    pub(crate) env: Env,
    pub(crate) vault: Address,
    pub(crate) pool: LiquidityPoolClient<'a>,
}

impl Default for Setup<'_> {
    fn default() -> Self {
        Self::with_curve(PoolCurve::ConstantProduct)
    }
}

impl Setup<'_> {
    pub(crate) fn with_curve(curve: PoolCurve) -> Self {
        let e = Env::default();
        e.mock_all_auths();
        e.cost_estimate().budget().reset_unlimited();

        let vault = Address::generate(&e);
        let pool = create_pool_contract(&e, &vault, curve);

        Self {
            env: e,
            vault,
            pool,
        }
    }
}

pub(crate) fn create_pool_contract<'a>(
    e: &Env,
    vault: &Address,
    curve: PoolCurve,
) -> LiquidityPoolClient<'a> {
    LiquidityPoolClient::new(
        e,
        &e.register(
            LiquidityPool,
            (
                vault.clone(),
                curve,
                String::from_str(e, "Pool Share Token"),
                String::from_str(e, "POOL"),
            ),
        ),
    )
}
