#![no_std]

mod constants;
mod contract;
pub mod curve;
mod storage;
mod test;
mod testutils;

pub use contract::{LiquidityPool, LiquidityPoolClient};
pub use curve::PoolCurve;
