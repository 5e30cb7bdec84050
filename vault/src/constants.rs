pub(crate) const MAX_TOKENS: u32 = 4;
pub(crate) const MIN_TOKENS: u32 = 2;

// 1 = 0.01%
pub(crate) const FEE_MULTIPLIER: u128 = 10_000;
pub(crate) const MAX_SWAP_FEE_FRACTION: u32 = 1_000;

// locked forever on pool initialization
pub(crate) const POOL_MIN_TOTAL_SUPPLY: u128 = 1_000_000;
// locked forever on first buffer deposit, in underlying units
pub(crate) const BUFFER_MIN_TOTAL_SUPPLY: u128 = 10_000;

// largest token amount representable by SEP-41 (i128)
pub(crate) const MAX_AMOUNT: u128 = i128::MAX as u128;
