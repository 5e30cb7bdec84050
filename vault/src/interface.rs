use crate::types::{
    AddLiquidityKind, BufferData, PoolConfig, RemoveLiquidityKind, SwapPathExactAmountIn,
    SwapPathExactAmountOut,
};
use soroban_sdk::{Address, Env, Vec};

pub trait AdminInterface {
    // Register a pool contract bound to this vault. Tokens order is the pool token order.
    // Fee fraction: 1 = 0.01%, up to 10%
    fn register_pool(e: Env, admin: Address, pool: Address, tokens: Vec<Address>, swap_fee_fraction: u32);

    // Register a buffer for an ERC4626-like wrapped token. The underlying is read from the wrapper.
    fn register_buffer(e: Env, admin: Address, wrapped_token: Address);
}

pub trait VaultLiquidityInterface {
    // Seed a registered pool with every token. Shares minted equal the pool invariant
    // minus a minimum supply locked forever.
    fn initialize_pool(
        e: Env,
        sender: Address,
        pool: Address,
        exact_amounts_in: Vec<u128>,
        min_share_amount_out: u128,
    ) -> u128;

    // Deposit into a pool. For single token kinds the only non-zero entry of `max_amounts_in`
    // selects the token. Returns amounts actually taken and shares minted.
    fn add_liquidity(
        e: Env,
        sender: Address,
        pool: Address,
        max_amounts_in: Vec<u128>,
        min_share_amount_out: u128,
        kind: AddLiquidityKind,
    ) -> (Vec<u128>, u128);

    // Withdraw from a pool. For single token kinds the only non-zero entry of `min_amounts_out`
    // selects the token. Returns shares burned and amounts paid out.
    fn remove_liquidity(
        e: Env,
        sender: Address,
        pool: Address,
        max_share_amount_in: u128,
        min_amounts_out: Vec<u128>,
        kind: RemoveLiquidityKind,
    ) -> (u128, Vec<u128>);
}

pub trait BufferInterface {
    // Add both sides to a buffer. Shares are valued in underlying.
    fn add_liquidity_to_buffer(
        e: Env,
        sender: Address,
        wrapped_token: Address,
        amount_underlying: u128,
        amount_wrapped: u128,
        min_shares_out: u128,
    ) -> u128;

    // Burn buffer shares for a proportional part of both sides.
    fn remove_liquidity_from_buffer(
        e: Env,
        sender: Address,
        wrapped_token: Address,
        shares: u128,
        min_underlying_out: u128,
        min_wrapped_out: u128,
    ) -> (u128, u128);
}

pub trait BatchRouterInterface {
    // Execute paths with exact amounts in.
    // Returns output amount per path, and the tokens received with their total amounts.
    fn swap_exact_in(
        e: Env,
        sender: Address,
        paths: Vec<SwapPathExactAmountIn>,
        deadline: u64,
    ) -> (Vec<u128>, Vec<Address>, Vec<u128>);

    // Execute paths with exact amounts out.
    // Returns input amount per path, and the tokens paid with their total amounts.
    fn swap_exact_out(
        e: Env,
        sender: Address,
        paths: Vec<SwapPathExactAmountOut>,
        deadline: u64,
    ) -> (Vec<u128>, Vec<Address>, Vec<u128>);

    // Estimate `swap_exact_in` without limits. Nothing is transferred or stored.
    fn query_swap_exact_in(
        e: Env,
        paths: Vec<SwapPathExactAmountIn>,
    ) -> (Vec<u128>, Vec<Address>, Vec<u128>);

    // Estimate `swap_exact_out` without limits. Nothing is transferred or stored.
    fn query_swap_exact_out(
        e: Env,
        paths: Vec<SwapPathExactAmountOut>,
    ) -> (Vec<u128>, Vec<Address>, Vec<u128>);
}

pub trait VaultQueriesInterface {
    fn get_pool_config(e: Env, pool: Address) -> PoolConfig;

    fn get_pool_tokens(e: Env, pool: Address) -> Vec<Address>;

    // Raw pool balances in token order
    fn get_pool_balances(e: Env, pool: Address) -> Vec<u128>;

    // Total vault holdings of a token that are accounted for
    fn get_reserves(e: Env, token: Address) -> u128;

    fn get_buffer(e: Env, wrapped_token: Address) -> BufferData;

    // (underlying, wrapped)
    fn get_buffer_balances(e: Env, wrapped_token: Address) -> (u128, u128);

    fn get_buffer_shares(e: Env, wrapped_token: Address, owner: Address) -> u128;

    fn get_buffer_total_shares(e: Env, wrapped_token: Address) -> u128;
}
