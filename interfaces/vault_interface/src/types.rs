use soroban_sdk::{contracttype, Vec};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Rounding {
    Down = 0,
    Up = 1,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SwapKind {
    ExactIn = 0,
    ExactOut = 1,
}

// Swap request as seen by a pool: balances and given amount are 18-decimal scaled, fees already
// applied by the vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSwapParams {
    pub kind: SwapKind,
    pub amount_given_scaled18: u128,
    pub balances_scaled18: Vec<u128>,
    pub index_in: u32,
    pub index_out: u32,
}
