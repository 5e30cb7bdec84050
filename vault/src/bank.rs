use soroban_sdk::token::TokenClient as SorobanTokenClient;
use soroban_sdk::{panic_with_error, Address, Env, Map};
use vault_interface::pool::PoolClient;
use vault_interface::types::SwapKind;
use vault_interface::wrapped_token::WrappedTokenClient;
use vault_validation_errors::VaultValidationError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LedgerMode {
    // moves real tokens, commits state on lock
    Live,
    // dry run: token movements are simulated and nothing is committed
    Query,
}

// Token movement backend of the ledger.
// In query mode balances and share supplies are tracked in memory, seeded from chain on first read.
pub(crate) struct Bank {
    e: Env,
    mode: LedgerMode,
    balances: Map<(Address, Address), u128>,
    supplies: Map<Address, u128>,
}

impl Bank {
    pub(crate) fn new(e: &Env, mode: LedgerMode) -> Self {
        Bank {
            e: e.clone(),
            mode,
            balances: Map::new(e),
            supplies: Map::new(e),
        }
    }

    pub(crate) fn mode(&self) -> LedgerMode {
        self.mode
    }

    pub(crate) fn balance(&self, token: &Address, owner: &Address) -> u128 {
        if self.mode == LedgerMode::Query {
            if let Some(balance) = self.balances.get((token.clone(), owner.clone())) {
                return balance;
            }
        }
        SorobanTokenClient::new(&self.e, token).balance(owner) as u128
    }

    fn set_balance(&mut self, token: &Address, owner: &Address, amount: u128) {
        self.balances.set((token.clone(), owner.clone()), amount);
    }

    fn debit(&mut self, token: &Address, owner: &Address, amount: u128) {
        let balance = self.balance(token, owner);
        if balance < amount {
            panic_with_error!(&self.e, VaultValidationError::InsufficientBalance);
        }
        self.set_balance(token, owner, balance - amount);
    }

    fn credit(&mut self, token: &Address, owner: &Address, amount: u128) {
        let balance = self.balance(token, owner);
        self.set_balance(token, owner, balance + amount);
    }

    pub(crate) fn transfer(&mut self, token: &Address, from: &Address, to: &Address, amount: u128) {
        if amount == 0 || from == to {
            return;
        }
        match self.mode {
            LedgerMode::Live => {
                SorobanTokenClient::new(&self.e, token).transfer(from, to, &(amount as i128))
            }
            LedgerMode::Query => {
                self.debit(token, from, amount);
                self.credit(token, to, amount);
            }
        }
    }

    pub(crate) fn total_supply(&self, pool: &Address) -> u128 {
        if self.mode == LedgerMode::Query {
            if let Some(supply) = self.supplies.get(pool.clone()) {
                return supply;
            }
        }
        PoolClient::new(&self.e, pool).total_supply()
    }

    pub(crate) fn mint_shares(&mut self, pool: &Address, to: &Address, amount: u128) {
        match self.mode {
            LedgerMode::Live => PoolClient::new(&self.e, pool).mint_shares(to, &amount),
            LedgerMode::Query => {
                let supply = self.total_supply(pool);
                self.supplies.set(pool.clone(), supply + amount);
                self.credit(pool, to, amount);
            }
        }
    }

    pub(crate) fn burn_shares(&mut self, pool: &Address, from: &Address, amount: u128) {
        match self.mode {
            LedgerMode::Live => PoolClient::new(&self.e, pool).burn_shares(from, &amount),
            LedgerMode::Query => {
                // a quote may burn shares the caller does not hold yet, top the holder up first
                let balance = self.balance(pool, from);
                if balance < amount {
                    let supply = self.total_supply(pool);
                    self.supplies.set(pool.clone(), supply + amount - balance);
                    self.set_balance(pool, from, amount);
                }
                let supply = self.total_supply(pool);
                self.supplies.set(pool.clone(), supply - amount);
                self.debit(pool, from, amount);
            }
        }
    }

    // deposit
    // Wraps underlying held by the vault through the wrapper contract.
    // Returns (underlying_in, wrapped_out). In query mode only the wrapper previews are used.
    pub(crate) fn deposit_to_wrapper(
        &mut self,
        wrapped_token: &Address,
        underlying_token: &Address,
        kind: SwapKind,
        amount_given: u128,
    ) -> (u128, u128) {
        let wrapper = WrappedTokenClient::new(&self.e, wrapped_token);
        let vault = self.e.current_contract_address();
        match (self.mode, kind) {
            (LedgerMode::Query, SwapKind::ExactIn) => {
                (amount_given, wrapper.preview_deposit(&amount_given))
            }
            (LedgerMode::Query, SwapKind::ExactOut) => {
                (wrapper.preview_mint(&amount_given), amount_given)
            }
            (LedgerMode::Live, SwapKind::ExactIn) => {
                self.approve_wrapper(underlying_token, wrapped_token, amount_given);
                let minted = wrapper.deposit(&vault, &amount_given, &vault);
                (amount_given, minted)
            }
            (LedgerMode::Live, SwapKind::ExactOut) => {
                let needed = wrapper.preview_mint(&amount_given);
                self.approve_wrapper(underlying_token, wrapped_token, needed);
                let deposited = wrapper.mint(&vault, &amount_given, &vault);
                (deposited, amount_given)
            }
        }
    }

    // withdraw
    // Unwraps wrapped tokens held by the vault. Returns (wrapped_in, underlying_out).
    pub(crate) fn withdraw_from_wrapper(
        &mut self,
        wrapped_token: &Address,
        kind: SwapKind,
        amount_given: u128,
    ) -> (u128, u128) {
        let wrapper = WrappedTokenClient::new(&self.e, wrapped_token);
        let vault = self.e.current_contract_address();
        match (self.mode, kind) {
            (LedgerMode::Query, SwapKind::ExactIn) => {
                (amount_given, wrapper.preview_redeem(&amount_given))
            }
            (LedgerMode::Query, SwapKind::ExactOut) => {
                (wrapper.preview_withdraw(&amount_given), amount_given)
            }
            (LedgerMode::Live, SwapKind::ExactIn) => {
                let withdrawn = wrapper.redeem(&vault, &amount_given, &vault);
                (amount_given, withdrawn)
            }
            (LedgerMode::Live, SwapKind::ExactOut) => {
                let burned = wrapper.withdraw(&vault, &amount_given, &vault);
                (burned, amount_given)
            }
        }
    }

    fn approve_wrapper(&self, underlying_token: &Address, wrapped_token: &Address, amount: u128) {
        SorobanTokenClient::new(&self.e, underlying_token).approve(
            &self.e.current_contract_address(),
            wrapped_token,
            &(amount as i128),
            &self.e.ledger().sequence(),
        );
    }
}
