use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    PoolAlreadyRegistered = 301,
    PoolNotRegistered = 302,
    PoolAlreadyInitialized = 303,
    PoolNotInitialized = 304,
    PoolVaultMismatch = 305,
    TokenNotRegistered = 306,
    DuplicateToken = 307,
    TokenDecimalsTooHigh = 308,
    BufferAlreadyRegistered = 309,
    BufferNotRegistered = 310,
    BalanceNotSettled = 311,
    ReservesMismatch = 312,
    PoolTotalSupplyTooLow = 313,
    BufferTotalSupplyTooLow = 314,
    InsufficientBufferShares = 315,

    DeadlineExceeded = 320,
    EmptyPath = 321,
    InvalidStepChain = 322,
    AmbiguousSingleTokenTarget = 323,
}
