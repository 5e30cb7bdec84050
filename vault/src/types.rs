use soroban_sdk::{contracttype, Address, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub tokens: Vec<Address>,
    // 10^(18 - decimals) per token, raw * factor = scaled18
    pub scaling_factors: Vec<u128>,
    // 1 = 0.01%
    pub swap_fee_fraction: u32,
    pub is_initialized: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BufferData {
    pub underlying_token: Address,
    pub underlying_balance: u128,
    pub wrapped_balance: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BufferOwnerKey {
    pub wrapped_token: Address,
    pub owner: Address,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AddLiquidityKind {
    // exact shares out, every token pulled in proportion
    Proportional = 0,
    // exact amounts in, shares computed from the invariant growth
    Unbalanced = 1,
    // exact shares out paid with a single token
    SingleTokenExactOut = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RemoveLiquidityKind {
    // exact shares in, every token paid out in proportion
    Proportional = 0,
    // exact shares in, paid out in a single token
    SingleTokenExactIn = 1,
    // exact amount of a single token out
    SingleTokenExactOut = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum WrappingDirection {
    Wrap = 0,
    Unwrap = 1,
}

// One hop of a batch path. `pool` is either a pool or, for buffer steps, the wrapped token.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapPathStep {
    pub pool: Address,
    pub token_out: Address,
    pub is_buffer: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapPathExactAmountIn {
    pub token_in: Address,
    pub steps: Vec<SwapPathStep>,
    pub exact_amount_in: u128,
    pub min_amount_out: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapPathExactAmountOut {
    pub token_in: Address,
    pub steps: Vec<SwapPathStep>,
    pub max_amount_in: u128,
    pub exact_amount_out: u128,
}
