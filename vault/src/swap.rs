use crate::errors::VaultError;
use crate::ledger::Ledger;
use crate::scaling::{fee_percentage, to_raw_round_down, to_raw_round_up, to_scaled18, to_scaled18_vec};
use crate::types::PoolConfig;
use soroban_sdk::{panic_with_error, Address, Env};
use utils::scaled_math::{complement, mul_div_up, mul_up};
use vault_events::{Events, VaultEvents};
use vault_interface::pool::PoolClient;
use vault_interface::types::{PoolSwapParams, SwapKind};
use vault_validation_errors::VaultValidationError;

pub(crate) struct VaultSwapParams {
    pub(crate) kind: SwapKind,
    pub(crate) pool: Address,
    pub(crate) token_in: Address,
    pub(crate) token_out: Address,
    pub(crate) amount_given_raw: u128,
    // min out for exact in, max in for exact out
    pub(crate) limit_raw: u128,
}

pub(crate) fn token_index(e: &Env, config: &PoolConfig, token: &Address) -> u32 {
    match config.tokens.first_index_of(token) {
        Some(index) => index,
        None => panic_with_error!(e, VaultError::TokenNotRegistered),
    }
}

impl Ledger {
    // swap
    // Trades against a registered pool. The swap fee is taken from the amount in and stays in the pool.
    //
    // Returns: (amount_calculated_raw, amount_in_raw, amount_out_raw)
    pub(crate) fn swap(&mut self, params: &VaultSwapParams) -> (u128, u128, u128) {
        let e = self.env().clone();
        let config = self.initialized_pool_config(&params.pool);
        let index_in = token_index(&e, &config, &params.token_in);
        let index_out = token_index(&e, &config, &params.token_out);
        if index_in == index_out {
            panic_with_error!(&e, VaultValidationError::CannotSwapSameToken);
        }

        if params.amount_given_raw == 0 {
            if params.kind == SwapKind::ExactIn && params.limit_raw > 0 {
                panic_with_error!(&e, VaultValidationError::OutMinNotSatisfied);
            }
            return (0, 0, 0);
        }

        let mut balances = self.pool_balances(&params.pool);
        let balances_scaled18 = to_scaled18_vec(&e, &balances, &config.scaling_factors);
        let factor_in = config.scaling_factors.get_unchecked(index_in);
        let factor_out = config.scaling_factors.get_unchecked(index_out);
        let fee = fee_percentage(config.swap_fee_fraction);
        let pool = PoolClient::new(&e, &params.pool);

        let (amount_in_raw, amount_out_raw, fee_scaled18) = match params.kind {
            SwapKind::ExactIn => {
                let given = to_scaled18(&e, params.amount_given_raw, factor_in);
                let fee_amount = mul_up(&e, given, fee);
                let amount_out_scaled18 = pool.on_swap(&PoolSwapParams {
                    kind: params.kind,
                    amount_given_scaled18: given - fee_amount,
                    balances_scaled18,
                    index_in,
                    index_out,
                });
                let amount_out_raw = to_raw_round_down(amount_out_scaled18, factor_out);
                if amount_out_raw < params.limit_raw {
                    panic_with_error!(&e, VaultValidationError::OutMinNotSatisfied);
                }
                (params.amount_given_raw, amount_out_raw, fee_amount)
            }
            SwapKind::ExactOut => {
                let given = to_scaled18(&e, params.amount_given_raw, factor_out);
                let amount_in_scaled18 = pool.on_swap(&PoolSwapParams {
                    kind: params.kind,
                    amount_given_scaled18: given,
                    balances_scaled18,
                    index_in,
                    index_out,
                });
                // gross up so that the fee is charged on the total amount in
                let fee_amount = if fee == 0 {
                    0
                } else {
                    mul_div_up(&e, amount_in_scaled18, fee, complement(fee))
                };
                let amount_in_raw = to_raw_round_up(amount_in_scaled18 + fee_amount, factor_in);
                if amount_in_raw > params.limit_raw {
                    panic_with_error!(&e, VaultValidationError::InMaxNotSatisfied);
                }
                (amount_in_raw, params.amount_given_raw, fee_amount)
            }
        };

        let balance_out = balances.get_unchecked(index_out);
        if amount_out_raw > balance_out {
            panic_with_error!(&e, VaultValidationError::InsufficientBalance);
        }
        balances.set(index_in, balances.get_unchecked(index_in) + amount_in_raw);
        balances.set(index_out, balance_out - amount_out_raw);
        self.set_pool_balances(&params.pool, &balances);

        self.take_debt(&params.token_in, amount_in_raw);
        self.supply_credit(&params.token_out, amount_out_raw);

        if self.is_live() {
            Events::new(&e).swap(
                params.pool.clone(),
                params.token_in.clone(),
                params.token_out.clone(),
                amount_in_raw,
                amount_out_raw,
                to_raw_round_down(fee_scaled18, factor_in),
            );
        }

        let amount_calculated_raw = match params.kind {
            SwapKind::ExactIn => amount_out_raw,
            SwapKind::ExactOut => amount_in_raw,
        };
        (amount_calculated_raw, amount_in_raw, amount_out_raw)
    }
}
