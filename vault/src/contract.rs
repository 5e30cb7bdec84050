use crate::bank::LedgerMode;
use crate::constants::{MAX_AMOUNT, MAX_SWAP_FEE_FRACTION, MAX_TOKENS, MIN_TOKENS};
use crate::errors::VaultError;
use crate::interface::{
    AdminInterface, BatchRouterInterface, BufferInterface, VaultLiquidityInterface,
    VaultQueriesInterface,
};
use crate::ledger::Ledger;
use crate::liquidity::{AddLiquidityParams, RemoveLiquidityParams};
use crate::router::context::SwapContext;
use crate::router::exact_in::compute_path_amounts_out;
use crate::router::exact_out::compute_path_amounts_in;
use crate::router::settlement::settle_paths;
use crate::router::transfers::{send_token_to, take_token_from};
use crate::storage;
use crate::types::{
    AddLiquidityKind, BufferData, PoolConfig, RemoveLiquidityKind, SwapPathExactAmountIn,
    SwapPathExactAmountOut,
};
use access_control::access::{AccessControl, AccessControlTrait};
use access_control::role::Role;
use access_control::utils::require_admin;
use soroban_sdk::token::TokenClient as SorobanTokenClient;
use soroban_sdk::{contract, contractimpl, contractmeta, panic_with_error, Address, Env, Vec};
use utils::scaled_math::{scaling_factor, WAD_DECIMALS};
use vault_events::{Events, VaultEvents};
use vault_interface::pool::PoolClient;
use vault_interface::wrapped_token::WrappedTokenClient;
use vault_validation_errors::VaultValidationError;

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Multi-token vault with buffers and a batch path router"
);

#[contract]
pub struct Vault;

fn check_deadline(e: &Env, deadline: u64) {
    if e.ledger().timestamp() > deadline {
        panic_with_error!(e, VaultError::DeadlineExceeded);
    }
}

#[contractimpl]
impl Vault {
    pub fn __constructor(e: Env, admin: Address) {
        AccessControl::new(&e).set_role_address(&Role::Admin, &admin);
    }

    pub fn get_admin(e: Env) -> Address {
        AccessControl::new(&e).get_role(&Role::Admin)
    }
}

#[contractimpl]
impl AdminInterface for Vault {
    // register_pool
    // Arguments:
    //   - admin: Vault admin.
    //   - pool: Pool contract, must report this vault as its vault.
    //   - tokens: 2 to 4 distinct tokens with at most 18 decimals.
    //   - swap_fee_fraction: Static swap fee, 1 = 0.01%, at most 10%.
    fn register_pool(
        e: Env,
        admin: Address,
        pool: Address,
        tokens: Vec<Address>,
        swap_fee_fraction: u32,
    ) {
        require_admin(&e, &admin);

        if storage::has_pool_config(&e, &pool) {
            panic_with_error!(&e, VaultError::PoolAlreadyRegistered);
        }
        if tokens.len() < MIN_TOKENS || tokens.len() > MAX_TOKENS {
            panic_with_error!(&e, VaultValidationError::WrongInputVecSize);
        }
        if swap_fee_fraction > MAX_SWAP_FEE_FRACTION {
            panic_with_error!(&e, VaultValidationError::FeeOutOfBounds);
        }
        if PoolClient::new(&e, &pool).vault() != e.current_contract_address() {
            panic_with_error!(&e, VaultError::PoolVaultMismatch);
        }

        let mut scaling_factors = Vec::new(&e);
        let mut balances = Vec::new(&e);
        for (i, token) in tokens.iter().enumerate() {
            if tokens.first_index_of(&token) != Some(i as u32) {
                panic_with_error!(&e, VaultError::DuplicateToken);
            }
            let decimals = SorobanTokenClient::new(&e, &token).decimals();
            if decimals > WAD_DECIMALS {
                panic_with_error!(&e, VaultError::TokenDecimalsTooHigh);
            }
            scaling_factors.push_back(scaling_factor(decimals));
            balances.push_back(0u128);
        }

        storage::set_pool_config(
            &e,
            &pool,
            &PoolConfig {
                tokens: tokens.clone(),
                scaling_factors,
                swap_fee_fraction,
                is_initialized: false,
            },
        );
        storage::set_pool_balances(&e, &pool, &balances);
        Events::new(&e).register_pool(pool, tokens, swap_fee_fraction);
    }

    fn register_buffer(e: Env, admin: Address, wrapped_token: Address) {
        require_admin(&e, &admin);

        if storage::has_buffer(&e, &wrapped_token) {
            panic_with_error!(&e, VaultError::BufferAlreadyRegistered);
        }
        let underlying_token = WrappedTokenClient::new(&e, &wrapped_token).asset();
        storage::set_buffer(
            &e,
            &wrapped_token,
            &BufferData {
                underlying_token: underlying_token.clone(),
                underlying_balance: 0,
                wrapped_balance: 0,
            },
        );
        Events::new(&e).register_buffer(wrapped_token, underlying_token);
    }
}

#[contractimpl]
impl VaultLiquidityInterface for Vault {
    fn initialize_pool(
        e: Env,
        sender: Address,
        pool: Address,
        exact_amounts_in: Vec<u128>,
        min_share_amount_out: u128,
    ) -> u128 {
        sender.require_auth();

        let mut ledger = Ledger::unlock(&e, LedgerMode::Live);
        let share_amount = ledger.initialize_pool(&pool, &sender, &exact_amounts_in);
        if share_amount < min_share_amount_out {
            panic_with_error!(&e, VaultValidationError::SharesOutMinNotSatisfied);
        }
        let tokens = ledger.pool_config(&pool).tokens;
        for (token, amount) in tokens.iter().zip(exact_amounts_in.iter()) {
            take_token_from(&mut ledger, &sender, &token, amount);
        }
        ledger.lock();
        share_amount
    }

    fn add_liquidity(
        e: Env,
        sender: Address,
        pool: Address,
        max_amounts_in: Vec<u128>,
        min_share_amount_out: u128,
        kind: AddLiquidityKind,
    ) -> (Vec<u128>, u128) {
        sender.require_auth();

        let mut ledger = Ledger::unlock(&e, LedgerMode::Live);
        let (amounts_in, share_amount_out) = ledger.add_liquidity(&AddLiquidityParams {
            pool: pool.clone(),
            to: sender.clone(),
            max_amounts_in,
            min_share_amount_out,
            kind,
        });
        let tokens = ledger.pool_config(&pool).tokens;
        for (token, amount) in tokens.iter().zip(amounts_in.iter()) {
            take_token_from(&mut ledger, &sender, &token, amount);
        }
        ledger.lock();
        (amounts_in, share_amount_out)
    }

    fn remove_liquidity(
        e: Env,
        sender: Address,
        pool: Address,
        max_share_amount_in: u128,
        min_amounts_out: Vec<u128>,
        kind: RemoveLiquidityKind,
    ) -> (u128, Vec<u128>) {
        sender.require_auth();

        let mut ledger = Ledger::unlock(&e, LedgerMode::Live);
        let (share_amount_in, amounts_out) = ledger.remove_liquidity(&RemoveLiquidityParams {
            pool: pool.clone(),
            from: sender.clone(),
            max_share_amount_in,
            min_amounts_out,
            kind,
        });
        let tokens = ledger.pool_config(&pool).tokens;
        for (token, amount) in tokens.iter().zip(amounts_out.iter()) {
            send_token_to(&mut ledger, &sender, &token, amount);
        }
        ledger.lock();
        (share_amount_in, amounts_out)
    }
}

#[contractimpl]
impl BufferInterface for Vault {
    fn add_liquidity_to_buffer(
        e: Env,
        sender: Address,
        wrapped_token: Address,
        amount_underlying: u128,
        amount_wrapped: u128,
        min_shares_out: u128,
    ) -> u128 {
        sender.require_auth();

        let mut ledger = Ledger::unlock(&e, LedgerMode::Live);
        let shares = ledger.add_liquidity_to_buffer(
            &wrapped_token,
            &sender,
            amount_underlying,
            amount_wrapped,
            min_shares_out,
        );
        let underlying_token = ledger.buffer(&wrapped_token).underlying_token;
        take_token_from(&mut ledger, &sender, &underlying_token, amount_underlying);
        take_token_from(&mut ledger, &sender, &wrapped_token, amount_wrapped);
        ledger.lock();
        shares
    }

    fn remove_liquidity_from_buffer(
        e: Env,
        sender: Address,
        wrapped_token: Address,
        shares: u128,
        min_underlying_out: u128,
        min_wrapped_out: u128,
    ) -> (u128, u128) {
        sender.require_auth();

        let mut ledger = Ledger::unlock(&e, LedgerMode::Live);
        let (underlying_out, wrapped_out) = ledger.remove_liquidity_from_buffer(
            &wrapped_token,
            &sender,
            shares,
            min_underlying_out,
            min_wrapped_out,
        );
        let underlying_token = ledger.buffer(&wrapped_token).underlying_token;
        send_token_to(&mut ledger, &sender, &underlying_token, underlying_out);
        send_token_to(&mut ledger, &sender, &wrapped_token, wrapped_out);
        ledger.lock();
        (underlying_out, wrapped_out)
    }
}

#[contractimpl]
impl BatchRouterInterface for Vault {
    // swap_exact_in
    // Arguments:
    //   - sender: Pays every path input and receives every path output.
    //   - paths: Paths with exact input and minimum output each.
    //   - deadline: Latest ledger timestamp the batch may execute at.
    fn swap_exact_in(
        e: Env,
        sender: Address,
        paths: Vec<SwapPathExactAmountIn>,
        deadline: u64,
    ) -> (Vec<u128>, Vec<Address>, Vec<u128>) {
        sender.require_auth();
        check_deadline(&e, deadline);

        let mut ledger = Ledger::unlock(&e, LedgerMode::Live);
        let mut ctx = SwapContext::new(&e);
        let path_amounts_out = compute_path_amounts_out(&mut ledger, &mut ctx, &sender, &paths);

        let (tokens_in, amounts_in) = (ctx.tokens_in(), ctx.amounts_in(&e));
        let (tokens_out, amounts_out) = (ctx.tokens_out(), ctx.amounts_out(&e));
        settle_paths(&mut ledger, &mut ctx, &sender);
        ledger.lock();

        Events::new(&e).batch_swap(
            sender,
            tokens_in,
            amounts_in,
            tokens_out.clone(),
            amounts_out.clone(),
        );
        (path_amounts_out, tokens_out, amounts_out)
    }

    // swap_exact_out
    // Arguments:
    //   - sender: Pays every path input and receives every path output.
    //   - paths: Paths with exact output and maximum input each.
    //   - deadline: Latest ledger timestamp the batch may execute at.
    fn swap_exact_out(
        e: Env,
        sender: Address,
        paths: Vec<SwapPathExactAmountOut>,
        deadline: u64,
    ) -> (Vec<u128>, Vec<Address>, Vec<u128>) {
        sender.require_auth();
        check_deadline(&e, deadline);

        let mut ledger = Ledger::unlock(&e, LedgerMode::Live);
        let mut ctx = SwapContext::new(&e);
        let path_amounts_in = compute_path_amounts_in(&mut ledger, &mut ctx, &sender, &paths);

        let (tokens_in, amounts_in) = (ctx.tokens_in(), ctx.amounts_in(&e));
        let (tokens_out, amounts_out) = (ctx.tokens_out(), ctx.amounts_out(&e));
        settle_paths(&mut ledger, &mut ctx, &sender);
        ledger.lock();

        Events::new(&e).batch_swap(
            sender,
            tokens_in.clone(),
            amounts_in.clone(),
            tokens_out,
            amounts_out,
        );
        (path_amounts_in, tokens_in, amounts_in)
    }

    fn query_swap_exact_in(
        e: Env,
        paths: Vec<SwapPathExactAmountIn>,
    ) -> (Vec<u128>, Vec<Address>, Vec<u128>) {
        let mut relaxed = Vec::new(&e);
        for mut path in paths.iter() {
            path.min_amount_out = 0;
            relaxed.push_back(path);
        }

        let mut ledger = Ledger::unlock(&e, LedgerMode::Query);
        let router = ledger.address().clone();
        let mut ctx = SwapContext::new(&e);
        let path_amounts_out = compute_path_amounts_out(&mut ledger, &mut ctx, &router, &relaxed);
        let result = (path_amounts_out, ctx.tokens_out(), ctx.amounts_out(&e));
        ledger.lock();
        result
    }

    fn query_swap_exact_out(
        e: Env,
        paths: Vec<SwapPathExactAmountOut>,
    ) -> (Vec<u128>, Vec<Address>, Vec<u128>) {
        let mut relaxed = Vec::new(&e);
        for mut path in paths.iter() {
            path.max_amount_in = MAX_AMOUNT;
            relaxed.push_back(path);
        }

        let mut ledger = Ledger::unlock(&e, LedgerMode::Query);
        let router = ledger.address().clone();
        let mut ctx = SwapContext::new(&e);
        let path_amounts_in = compute_path_amounts_in(&mut ledger, &mut ctx, &router, &relaxed);
        let result = (path_amounts_in, ctx.tokens_in(), ctx.amounts_in(&e));
        ledger.lock();
        result
    }
}

#[contractimpl]
impl VaultQueriesInterface for Vault {
    fn get_pool_config(e: Env, pool: Address) -> PoolConfig {
        Ledger::unlock(&e, LedgerMode::Query).pool_config(&pool)
    }

    fn get_pool_tokens(e: Env, pool: Address) -> Vec<Address> {
        Ledger::unlock(&e, LedgerMode::Query).pool_config(&pool).tokens
    }

    fn get_pool_balances(e: Env, pool: Address) -> Vec<u128> {
        let ledger = Ledger::unlock(&e, LedgerMode::Query);
        ledger.pool_config(&pool);
        ledger.pool_balances(&pool)
    }

    fn get_reserves(e: Env, token: Address) -> u128 {
        storage::get_reserves(&e, &token)
    }

    fn get_buffer(e: Env, wrapped_token: Address) -> BufferData {
        Ledger::unlock(&e, LedgerMode::Query).buffer(&wrapped_token)
    }

    fn get_buffer_balances(e: Env, wrapped_token: Address) -> (u128, u128) {
        let buffer = Ledger::unlock(&e, LedgerMode::Query).buffer(&wrapped_token);
        (buffer.underlying_balance, buffer.wrapped_balance)
    }

    fn get_buffer_shares(e: Env, wrapped_token: Address, owner: Address) -> u128 {
        Ledger::unlock(&e, LedgerMode::Query).buffer_shares(&wrapped_token, &owner)
    }

    fn get_buffer_total_shares(e: Env, wrapped_token: Address) -> u128 {
        storage::get_buffer_total_shares(&e, &wrapped_token)
    }
}
