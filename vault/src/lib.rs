#![no_std]

mod bank;
mod base_pool_math;
mod buffer;
mod constants;
mod contract;
mod errors;
mod interface;
mod ledger;
mod liquidity;
mod router;
mod scaling;
mod storage;
mod swap;
mod types;

mod testutils;

mod test;
mod test_buffer;
mod test_ledger;
mod test_permissions;
mod test_router_exact_in;
mod test_router_exact_out;

pub use contract::{Vault, VaultClient};
pub use errors::VaultError;
pub use types::{
    AddLiquidityKind, BufferData, PoolConfig, RemoveLiquidityKind, SwapPathExactAmountIn,
    SwapPathExactAmountOut, SwapPathStep, WrappingDirection,
};
