#![cfg(test)]
extern crate std;

use crate::types::{SwapPathExactAmountIn, SwapPathExactAmountOut, SwapPathStep};
use crate::{Vault, VaultClient};
use soroban_liquidity_pool_contract::{LiquidityPool, LiquidityPoolClient, PoolCurve};
use soroban_sdk::testutils::{Address as _, Events};
use soroban_sdk::token::{
    StellarAssetClient as SorobanTokenAdminClient, TokenClient as SorobanTokenClient,
};
use soroban_sdk::{Address, Env, String, Symbol, TryFromVal, Vec};
use soroban_wrapped_token_contract::{WrappedToken, WrappedTokenClient};

// SAC tokens have 7 decimals
pub(crate) const ONE: u128 = 1_0000000;

pub(crate) struct Setup<'a> {
    pub(crate) env: Env,
    pub(crate) admin: Address,
    // seeds every pool and buffer
    pub(crate) lp: Address,
    pub(crate) user: Address,
    pub(crate) vault: VaultClient<'a>,
}

impl Default for Setup<'_> {
    fn default() -> Self {
        let e = Env::default();
        e.mock_all_auths();
        e.cost_estimate().budget().reset_unlimited();

        let admin = Address::generate(&e);
        let lp = Address::generate(&e);
        let user = Address::generate(&e);
        let vault = create_vault_contract(&e, &admin);

        Self {
            env: e,
            admin,
            lp,
            user,
            vault,
        }
    }
}

impl<'a> Setup<'a> {
    pub(crate) fn create_token(&self) -> SorobanTokenClient<'a> {
        create_token_contract(&self.env, &self.admin)
    }

    pub(crate) fn mint(&self, token: &Address, to: &Address, amount: u128) {
        SorobanTokenAdminClient::new(&self.env, token).mint(to, &(amount as i128));
    }

    pub(crate) fn balance(&self, token: &Address, owner: &Address) -> u128 {
        SorobanTokenClient::new(&self.env, token).balance(owner) as u128
    }

    // Registers and initializes a pool from `lp` funds, the lp must already hold the amounts.
    pub(crate) fn create_pool(
        &self,
        tokens: &[&Address],
        curve: PoolCurve,
        swap_fee_fraction: u32,
        amounts: &[u128],
    ) -> LiquidityPoolClient<'a> {
        let e = &self.env;
        let pool = create_pool_contract(e, &self.vault.address, curve);
        let mut tokens_vec = Vec::new(e);
        for token in tokens {
            tokens_vec.push_back((*token).clone());
        }
        self.vault
            .register_pool(&self.admin, &pool.address, &tokens_vec, &swap_fee_fraction);
        self.vault.initialize_pool(
            &self.lp,
            &pool.address,
            &Vec::from_slice(e, amounts),
            &0,
        );
        pool
    }

    // Same as `create_pool` for pools of plain tokens, minting the seed amounts first.
    pub(crate) fn create_funded_pool(
        &self,
        tokens: &[&Address],
        curve: PoolCurve,
        swap_fee_fraction: u32,
        amounts: &[u128],
    ) -> LiquidityPoolClient<'a> {
        for (token, amount) in tokens.iter().zip(amounts.iter()) {
            self.mint(token, &self.lp, *amount);
        }
        self.create_pool(tokens, curve, swap_fee_fraction, amounts)
    }

    // Wrapper over `underlying` with a registered buffer seeded with both sides.
    pub(crate) fn create_buffer(
        &self,
        underlying: &Address,
        underlying_liquidity: u128,
        wrapped_liquidity: u128,
    ) -> WrappedTokenClient<'a> {
        let wrapper = create_wrapped_token_contract(&self.env, underlying);
        self.vault.register_buffer(&self.admin, &wrapper.address);

        self.mint(underlying, &self.lp, underlying_liquidity);
        self.wrap(&wrapper, &self.lp, wrapped_liquidity);
        self.vault.add_liquidity_to_buffer(
            &self.lp,
            &wrapper.address,
            &underlying_liquidity,
            &wrapped_liquidity,
            &0,
        );
        wrapper
    }

    // Mints underlying and deposits it for `shares` wrapped tokens, the wrapper must be at par.
    pub(crate) fn wrap(&self, wrapper: &WrappedTokenClient, to: &Address, shares: u128) {
        let underlying = wrapper.asset();
        self.mint(&underlying, to, shares);
        SorobanTokenClient::new(&self.env, &underlying).approve(
            to,
            &wrapper.address,
            &(shares as i128),
            &(self.env.ledger().sequence() + 1),
        );
        wrapper.deposit(to, &shares, to);
    }

    pub(crate) fn deadline(&self) -> u64 {
        self.env.ledger().timestamp() + 3600
    }
}

pub(crate) fn create_vault_contract<'a>(e: &Env, admin: &Address) -> VaultClient<'a> {
    VaultClient::new(e, &e.register(Vault, (admin.clone(),)))
}

pub(crate) fn create_token_contract<'a>(e: &Env, admin: &Address) -> SorobanTokenClient<'a> {
    SorobanTokenClient::new(
        e,
        &e.register_stellar_asset_contract_v2(admin.clone())
            .address(),
    )
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

pub(crate) fn create_wrapped_token_contract<'a>(
    e: &Env,
    underlying: &Address,
) -> WrappedTokenClient<'a> {
    WrappedTokenClient::new(
        e,
        &e.register(
            WrappedToken,
            (
                underlying.clone(),
                String::from_str(e, "Wrapped Token"),
                String::from_str(e, "wTKN"),
            ),
        ),
    )
}

pub(crate) fn step(pool: &Address, token_out: &Address) -> SwapPathStep {
    SwapPathStep {
        pool: pool.clone(),
        token_out: token_out.clone(),
        is_buffer: false,
    }
}

pub(crate) fn buffer_step(wrapped_token: &Address, token_out: &Address) -> SwapPathStep {
    SwapPathStep {
        pool: wrapped_token.clone(),
        token_out: token_out.clone(),
        is_buffer: true,
    }
}

pub(crate) fn exact_in_path(
    e: &Env,
    token_in: &Address,
    steps: &[SwapPathStep],
    exact_amount_in: u128,
    min_amount_out: u128,
) -> SwapPathExactAmountIn {
    SwapPathExactAmountIn {
        token_in: token_in.clone(),
        steps: Vec::from_slice(e, steps),
        exact_amount_in,
        min_amount_out,
    }
}

pub(crate) fn exact_out_path(
    e: &Env,
    token_in: &Address,
    steps: &[SwapPathStep],
    max_amount_in: u128,
    exact_amount_out: u128,
) -> SwapPathExactAmountOut {
    SwapPathExactAmountOut {
        token_in: token_in.clone(),
        steps: Vec::from_slice(e, steps),
        max_amount_in,
        exact_amount_out,
    }
}

// (from, to, amount) of every transfer published by `token` during the last invocation
pub(crate) fn transfer_events(e: &Env, token: &Address) -> std::vec::Vec<(Address, Address, i128)> {
    let mut result = std::vec![];
    for (contract, topics, data) in e.events().all().iter() {
        if contract != *token || topics.len() < 3 {
            continue;
        }
        match Symbol::try_from_val(e, &topics.get_unchecked(0)) {
            Ok(name) if name == Symbol::new(e, "transfer") => {}
            _ => continue,
        }
        let from = Address::try_from_val(e, &topics.get_unchecked(1)).unwrap();
        let to = Address::try_from_val(e, &topics.get_unchecked(2)).unwrap();
        let amount = i128::try_from_val(e, &data).unwrap();
        result.push((from, to, amount));
    }
    result
}
