use crate::types::{BufferData, BufferOwnerKey, PoolConfig};
use paste::paste;
use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};
use utils::bump::bump_persistent;
use utils::storage_errors::StorageError;
use utils::{
    generate_persistent_storage_getter, generate_persistent_storage_getter_and_setter,
    generate_persistent_storage_getter_and_setter_with_default,
    generate_persistent_storage_getter_with_default, generate_persistent_storage_setter,
};

#[derive(Clone)]
#[contracttype]
enum DataKey {
    PoolConfig(Address),
    PoolBalances(Address),
    Reserves(Address),
    Buffer(Address),
    BufferShares(BufferOwnerKey),
    BufferTotalShares(Address),
}

generate_persistent_storage_getter_and_setter!(
    pool_config,
    DataKey::PoolConfig,
    Address,
    PoolConfig
);
generate_persistent_storage_getter_and_setter!(
    pool_balances,
    DataKey::PoolBalances,
    Address,
    Vec<u128>
);
// everything the vault holds and has accounted for, per token
generate_persistent_storage_getter_and_setter_with_default!(
    reserves,
    DataKey::Reserves,
    Address,
    u128,
    0
);
generate_persistent_storage_getter_and_setter!(buffer, DataKey::Buffer, Address, BufferData);
generate_persistent_storage_getter_and_setter_with_default!(
    buffer_shares,
    DataKey::BufferShares,
    BufferOwnerKey,
    u128,
    0
);
generate_persistent_storage_getter_and_setter_with_default!(
    buffer_total_shares,
    DataKey::BufferTotalShares,
    Address,
    u128,
    0
);
