use crate::base_pool_math::{
    add_liquidity_single_token_exact_out, add_liquidity_unbalanced, proportional_amounts_in,
    proportional_amounts_out, remove_liquidity_single_token_exact_in,
    remove_liquidity_single_token_exact_out, single_token_index,
};
use crate::constants::POOL_MIN_TOTAL_SUPPLY;
use crate::errors::VaultError;
use crate::ledger::Ledger;
use crate::scaling::{fee_percentage, to_raw_round_down, to_raw_round_up, to_scaled18, to_scaled18_vec};
use crate::types::{AddLiquidityKind, RemoveLiquidityKind};
use soroban_sdk::{panic_with_error, Address, Env, Vec};
use vault_events::{Events, VaultEvents};
use vault_interface::pool::PoolClient;
use vault_interface::types::Rounding;
use vault_validation_errors::VaultValidationError;

pub(crate) struct AddLiquidityParams {
    pub(crate) pool: Address,
    pub(crate) to: Address,
    // sparse for single token kinds: the only non-zero entry selects the token
    pub(crate) max_amounts_in: Vec<u128>,
    pub(crate) min_share_amount_out: u128,
    pub(crate) kind: AddLiquidityKind,
}

pub(crate) struct RemoveLiquidityParams {
    pub(crate) pool: Address,
    pub(crate) from: Address,
    pub(crate) max_share_amount_in: u128,
    // sparse for single token kinds: the only non-zero entry selects the token
    pub(crate) min_amounts_out: Vec<u128>,
    pub(crate) kind: RemoveLiquidityKind,
}

impl Ledger {
    // initialize_pool
    // Seeds a registered pool. Shares equal the invariant, the first POOL_MIN_TOTAL_SUPPLY
    // of them are minted to the pool itself and never leave it.
    //
    // Returns: amount of shares minted to `to`.
    pub(crate) fn initialize_pool(
        &mut self,
        pool: &Address,
        to: &Address,
        exact_amounts_in: &Vec<u128>,
    ) -> u128 {
        let e = self.env().clone();
        let mut config = self.pool_config(pool);
        if config.is_initialized {
            panic_with_error!(&e, VaultError::PoolAlreadyInitialized);
        }
        if exact_amounts_in.len() != config.tokens.len() {
            panic_with_error!(&e, VaultValidationError::WrongInputVecSize);
        }
        for (token, amount) in config.tokens.iter().zip(exact_amounts_in.iter()) {
            if amount == 0 {
                panic_with_error!(&e, VaultValidationError::AllCoinsRequired);
            }
            self.take_debt(&token, amount);
        }

        let balances_scaled18 = to_scaled18_vec(&e, exact_amounts_in, &config.scaling_factors);
        let invariant =
            PoolClient::new(&e, pool).compute_invariant(&balances_scaled18, &Rounding::Down);
        if invariant < POOL_MIN_TOTAL_SUPPLY {
            panic_with_error!(&e, VaultError::PoolTotalSupplyTooLow);
        }

        config.is_initialized = true;
        self.set_pool_config(pool, &config);
        self.set_pool_balances(pool, exact_amounts_in);

        let share_amount = invariant - POOL_MIN_TOTAL_SUPPLY;
        self.bank.mint_shares(pool, pool, POOL_MIN_TOTAL_SUPPLY);
        self.bank.mint_shares(pool, to, share_amount);

        if self.is_live() {
            Events::new(&e).initialize_pool(pool.clone(), exact_amounts_in.clone(), share_amount);
        }
        share_amount
    }

    // add_liquidity
    // Returns: (amounts_in_raw, share_amount_out)
    pub(crate) fn add_liquidity(&mut self, params: &AddLiquidityParams) -> (Vec<u128>, u128) {
        let e = self.env().clone();
        let config = self.initialized_pool_config(&params.pool);
        let tokens_count = config.tokens.len();
        if params.max_amounts_in.len() != tokens_count {
            panic_with_error!(&e, VaultValidationError::WrongInputVecSize);
        }

        let mut balances = self.pool_balances(&params.pool);
        let balances_scaled18 = to_scaled18_vec(&e, &balances, &config.scaling_factors);
        let total_supply = self.bank.total_supply(&params.pool);
        let fee = fee_percentage(config.swap_fee_fraction);
        let pool = PoolClient::new(&e, &params.pool);

        let (amounts_in_scaled18, share_amount_out) = match params.kind {
            AddLiquidityKind::Proportional => {
                let share_amount_out = params.min_share_amount_out;
                let amounts = proportional_amounts_in(
                    &e,
                    &balances_scaled18,
                    total_supply,
                    share_amount_out,
                );
                (amounts, share_amount_out)
            }
            AddLiquidityKind::Unbalanced => {
                let amounts =
                    to_scaled18_vec(&e, &params.max_amounts_in, &config.scaling_factors);
                let share_amount_out = add_liquidity_unbalanced(
                    &e,
                    &pool,
                    &balances_scaled18,
                    &amounts,
                    total_supply,
                    fee,
                );
                (amounts, share_amount_out)
            }
            AddLiquidityKind::SingleTokenExactOut => {
                let index = single_token_index(&e, &params.max_amounts_in);
                let share_amount_out = params.min_share_amount_out;
                let amount_in = add_liquidity_single_token_exact_out(
                    &e,
                    &pool,
                    &balances_scaled18,
                    index,
                    share_amount_out,
                    total_supply,
                    fee,
                );
                (single_token_amounts(&e, tokens_count, index, amount_in), share_amount_out)
            }
        };

        if share_amount_out < params.min_share_amount_out {
            panic_with_error!(&e, VaultValidationError::SharesOutMinNotSatisfied);
        }

        let mut amounts_in_raw = Vec::new(&e);
        for i in 0..tokens_count {
            let amount_raw = to_raw_round_up(
                amounts_in_scaled18.get_unchecked(i),
                config.scaling_factors.get_unchecked(i),
            );
            if amount_raw > params.max_amounts_in.get_unchecked(i) {
                panic_with_error!(&e, VaultValidationError::InMaxNotSatisfied);
            }
            balances.set(i, balances.get_unchecked(i) + amount_raw);
            self.take_debt(&config.tokens.get_unchecked(i), amount_raw);
            amounts_in_raw.push_back(amount_raw);
        }
        self.set_pool_balances(&params.pool, &balances);
        self.bank.mint_shares(&params.pool, &params.to, share_amount_out);

        if self.is_live() {
            Events::new(&e).add_liquidity(
                params.pool.clone(),
                params.to.clone(),
                config.tokens,
                amounts_in_raw.clone(),
                share_amount_out,
            );
        }
        (amounts_in_raw, share_amount_out)
    }

    // remove_liquidity
    // Returns: (share_amount_in, amounts_out_raw)
    pub(crate) fn remove_liquidity(&mut self, params: &RemoveLiquidityParams) -> (u128, Vec<u128>) {
        let e = self.env().clone();
        let config = self.initialized_pool_config(&params.pool);
        let tokens_count = config.tokens.len();
        if params.min_amounts_out.len() != tokens_count {
            panic_with_error!(&e, VaultValidationError::WrongInputVecSize);
        }

        let mut balances = self.pool_balances(&params.pool);
        let balances_scaled18 = to_scaled18_vec(&e, &balances, &config.scaling_factors);
        let total_supply = self.bank.total_supply(&params.pool);
        let fee = fee_percentage(config.swap_fee_fraction);
        let pool = PoolClient::new(&e, &params.pool);

        let (share_amount_in, amounts_out_scaled18) = match params.kind {
            RemoveLiquidityKind::Proportional => {
                let share_amount_in = params.max_share_amount_in;
                let amounts = proportional_amounts_out(
                    &e,
                    &balances_scaled18,
                    total_supply,
                    share_amount_in,
                );
                (share_amount_in, amounts)
            }
            RemoveLiquidityKind::SingleTokenExactIn => {
                let index = single_token_index(&e, &params.min_amounts_out);
                let share_amount_in = params.max_share_amount_in;
                let amount_out = remove_liquidity_single_token_exact_in(
                    &e,
                    &pool,
                    &balances_scaled18,
                    index,
                    share_amount_in,
                    total_supply,
                    fee,
                );
                (share_amount_in, single_token_amounts(&e, tokens_count, index, amount_out))
            }
            RemoveLiquidityKind::SingleTokenExactOut => {
                let index = single_token_index(&e, &params.min_amounts_out);
                let amount_out = to_scaled18(
                    &e,
                    params.min_amounts_out.get_unchecked(index),
                    config.scaling_factors.get_unchecked(index),
                );
                let share_amount_in = remove_liquidity_single_token_exact_out(
                    &e,
                    &pool,
                    &balances_scaled18,
                    index,
                    amount_out,
                    total_supply,
                    fee,
                );
                (share_amount_in, single_token_amounts(&e, tokens_count, index, amount_out))
            }
        };

        if share_amount_in > params.max_share_amount_in {
            panic_with_error!(&e, VaultValidationError::SharesInMaxNotSatisfied);
        }
        if share_amount_in > total_supply || total_supply - share_amount_in < POOL_MIN_TOTAL_SUPPLY {
            panic_with_error!(&e, VaultError::PoolTotalSupplyTooLow);
        }

        let mut amounts_out_raw = Vec::new(&e);
        for i in 0..tokens_count {
            let amount_raw = to_raw_round_down(
                amounts_out_scaled18.get_unchecked(i),
                config.scaling_factors.get_unchecked(i),
            );
            if amount_raw < params.min_amounts_out.get_unchecked(i) {
                panic_with_error!(&e, VaultValidationError::OutMinNotSatisfied);
            }
            let balance = balances.get_unchecked(i);
            if amount_raw > balance {
                panic_with_error!(&e, VaultValidationError::InsufficientBalance);
            }
            balances.set(i, balance - amount_raw);
            self.supply_credit(&config.tokens.get_unchecked(i), amount_raw);
            amounts_out_raw.push_back(amount_raw);
        }
        self.set_pool_balances(&params.pool, &balances);
        self.bank.burn_shares(&params.pool, &params.from, share_amount_in);

        if self.is_live() {
            Events::new(&e).remove_liquidity(
                params.pool.clone(),
                params.from.clone(),
                config.tokens,
                amounts_out_raw.clone(),
                share_amount_in,
            );
        }
        (share_amount_in, amounts_out_raw)
    }
}

pub(crate) fn single_token_amounts(e: &Env, tokens_count: u32, index: u32, amount: u128) -> Vec<u128> {
    let mut amounts = Vec::new(e);
    for i in 0..tokens_count {
        amounts.push_back(if i == index { amount } else { 0 });
    }
    amounts
}
