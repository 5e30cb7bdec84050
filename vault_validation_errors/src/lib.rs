#![no_std]

use soroban_sdk::contracterror;

// Input and limit checks shared by the vault, the pools and the wrapped token.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VaultValidationError {
    WrongInputVecSize = 2001,
    FeeOutOfBounds = 2003,
    AllCoinsRequired = 2004,
    OutMinNotSatisfied = 2006,
    CannotSwapSameToken = 2007,
    TokenIndexOutOfBounds = 2008,
    EmptyPool = 2010,
    SharesOutMinNotSatisfied = 2011,
    SharesInMaxNotSatisfied = 2012,
    ZeroAmount = 2018,
    InsufficientBalance = 2019,
    InMaxNotSatisfied = 2020,
}
