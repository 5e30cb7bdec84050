use crate::bank::{Bank, LedgerMode};
use crate::errors::VaultError;
use crate::storage;
use crate::types::{BufferData, BufferOwnerKey, PoolConfig};
use soroban_sdk::{panic_with_error, Address, Env, Map, Vec};

// Unlocked accounting session of the vault.
//
// Every operation run inside a session records what the caller owes (debt) and what it is owed
// (credit) per token. The session can only be closed once all deltas are back to zero.
// Storage reads are cached and writes are kept in memory until `lock` commits them,
// so a query session can run the exact same code and simply be dropped.
pub(crate) struct Ledger {
    e: Env,
    vault: Address,
    pub(crate) bank: Bank,
    deltas: Map<Address, i128>,
    non_zero_deltas: u32,
    pool_configs: Map<Address, PoolConfig>,
    pool_balances: Map<Address, Vec<u128>>,
    reserves: Map<Address, u128>,
    buffers: Map<Address, BufferData>,
    buffer_shares: Map<BufferOwnerKey, u128>,
    buffer_total_shares: Map<Address, u128>,
}

impl Ledger {
    pub(crate) fn unlock(e: &Env, mode: LedgerMode) -> Self {
        Ledger {
            e: e.clone(),
            vault: e.current_contract_address(),
            bank: Bank::new(e, mode),
            deltas: Map::new(e),
            non_zero_deltas: 0,
            pool_configs: Map::new(e),
            pool_balances: Map::new(e),
            reserves: Map::new(e),
            buffers: Map::new(e),
            buffer_shares: Map::new(e),
            buffer_total_shares: Map::new(e),
        }
    }

    // Closes the session. Live sessions must be fully settled and get committed,
    // query sessions are discarded.
    pub(crate) fn lock(self) {
        if self.bank.mode() == LedgerMode::Query {
            return;
        }
        if self.non_zero_deltas != 0 {
            panic_with_error!(&self.e, VaultError::BalanceNotSettled);
        }
        for (pool, config) in self.pool_configs.iter() {
            storage::set_pool_config(&self.e, &pool, &config);
        }
        for (pool, balances) in self.pool_balances.iter() {
            storage::set_pool_balances(&self.e, &pool, &balances);
        }
        for (token, amount) in self.reserves.iter() {
            storage::set_reserves(&self.e, &token, &amount);
        }
        for (wrapped_token, buffer) in self.buffers.iter() {
            storage::set_buffer(&self.e, &wrapped_token, &buffer);
        }
        for (key, shares) in self.buffer_shares.iter() {
            storage::set_buffer_shares(&self.e, &key, &shares);
        }
        for (wrapped_token, shares) in self.buffer_total_shares.iter() {
            storage::set_buffer_total_shares(&self.e, &wrapped_token, &shares);
        }
    }

    pub(crate) fn env(&self) -> &Env {
        &self.e
    }

    pub(crate) fn address(&self) -> &Address {
        &self.vault
    }

    pub(crate) fn is_live(&self) -> bool {
        self.bank.mode() == LedgerMode::Live
    }

    // deltas: positive is owed to the vault, negative is owed by the vault

    pub(crate) fn take_debt(&mut self, token: &Address, amount: u128) {
        self.account_delta(token, amount as i128);
    }

    pub(crate) fn supply_credit(&mut self, token: &Address, amount: u128) {
        self.account_delta(token, -(amount as i128));
    }

    fn account_delta(&mut self, token: &Address, delta: i128) {
        if delta == 0 {
            return;
        }
        let current = self.token_delta(token);
        let next = current + delta;
        if next == 0 {
            self.non_zero_deltas -= 1;
        } else if current == 0 {
            self.non_zero_deltas += 1;
        }
        self.deltas.set(token.clone(), next);
    }

    pub(crate) fn token_delta(&self, token: &Address) -> i128 {
        self.deltas.get(token.clone()).unwrap_or(0)
    }

    pub(crate) fn non_zero_delta_count(&self) -> u32 {
        self.non_zero_deltas
    }

    // reserves

    pub(crate) fn reserves_of(&self, token: &Address) -> u128 {
        match self.reserves.get(token.clone()) {
            Some(amount) => amount,
            None => storage::get_reserves(&self.e, token),
        }
    }

    pub(crate) fn set_reserves(&mut self, token: &Address, amount: u128) {
        self.reserves.set(token.clone(), amount);
    }

    // settle
    // Credits the caller with tokens that reached the vault since reserves were last synced.
    // At most `amount_hint` is credited, anything above it stays in the vault unaccounted.
    pub(crate) fn settle(&mut self, token: &Address, amount_hint: u128) -> u128 {
        let reserves_before = self.reserves_of(token);
        let current = self.bank.balance(token, &self.vault);
        // query sessions may burn shares straight out of the vault balance
        if current < reserves_before && self.is_live() {
            panic_with_error!(&self.e, VaultError::ReservesMismatch);
        }
        self.set_reserves(token, current);
        let credit = current.saturating_sub(reserves_before).min(amount_hint);
        self.supply_credit(token, credit);
        credit
    }

    // send_to
    // Pays `amount` of the caller's credit out of the vault.
    pub(crate) fn send_to(&mut self, token: &Address, to: &Address, amount: u128) {
        self.take_debt(token, amount);
        let reserves = self.reserves_of(token);
        if reserves < amount {
            panic_with_error!(&self.e, VaultError::ReservesMismatch);
        }
        self.set_reserves(token, reserves - amount);
        let vault = self.vault.clone();
        self.bank.transfer(token, &vault, to, amount);
    }

    // pools

    pub(crate) fn pool_config(&self, pool: &Address) -> PoolConfig {
        if let Some(config) = self.pool_configs.get(pool.clone()) {
            return config;
        }
        if !storage::has_pool_config(&self.e, pool) {
            panic_with_error!(&self.e, VaultError::PoolNotRegistered);
        }
        storage::get_pool_config(&self.e, pool)
    }

    pub(crate) fn initialized_pool_config(&self, pool: &Address) -> PoolConfig {
        let config = self.pool_config(pool);
        if !config.is_initialized {
            panic_with_error!(&self.e, VaultError::PoolNotInitialized);
        }
        config
    }

    pub(crate) fn set_pool_config(&mut self, pool: &Address, config: &PoolConfig) {
        self.pool_configs.set(pool.clone(), config.clone());
    }

    pub(crate) fn pool_balances(&self, pool: &Address) -> Vec<u128> {
        match self.pool_balances.get(pool.clone()) {
            Some(balances) => balances,
            None => storage::get_pool_balances(&self.e, pool),
        }
    }

    pub(crate) fn set_pool_balances(&mut self, pool: &Address, balances: &Vec<u128>) {
        self.pool_balances.set(pool.clone(), balances.clone());
    }

    // buffers

    pub(crate) fn buffer(&self, wrapped_token: &Address) -> BufferData {
        if let Some(buffer) = self.buffers.get(wrapped_token.clone()) {
            return buffer;
        }
        if !storage::has_buffer(&self.e, wrapped_token) {
            panic_with_error!(&self.e, VaultError::BufferNotRegistered);
        }
        storage::get_buffer(&self.e, wrapped_token)
    }

    pub(crate) fn set_buffer(&mut self, wrapped_token: &Address, buffer: &BufferData) {
        self.buffers.set(wrapped_token.clone(), buffer.clone());
    }

    pub(crate) fn buffer_shares(&self, wrapped_token: &Address, owner: &Address) -> u128 {
        let key = BufferOwnerKey {
            wrapped_token: wrapped_token.clone(),
            owner: owner.clone(),
        };
        match self.buffer_shares.get(key.clone()) {
            Some(shares) => shares,
            None => storage::get_buffer_shares(&self.e, &key),
        }
    }

    pub(crate) fn set_buffer_shares(&mut self, wrapped_token: &Address, owner: &Address, shares: u128) {
        let key = BufferOwnerKey {
            wrapped_token: wrapped_token.clone(),
            owner: owner.clone(),
        };
        self.buffer_shares.set(key, shares);
    }

    pub(crate) fn buffer_total_shares(&self, wrapped_token: &Address) -> u128 {
        match self.buffer_total_shares.get(wrapped_token.clone()) {
            Some(shares) => shares,
            None => storage::get_buffer_total_shares(&self.e, wrapped_token),
        }
    }

    pub(crate) fn set_buffer_total_shares(&mut self, wrapped_token: &Address, shares: u128) {
        self.buffer_total_shares.set(wrapped_token.clone(), shares);
    }
}
