#![no_std]

use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, Vec};

#[derive(Clone)]
pub struct Events(Env);

impl Events {
    #[inline(always)]
    pub fn env(&self) -> &Env {
        &self.0
    }

    #[inline(always)]
    pub fn new(env: &Env) -> Events {
        Events(env.clone())
    }
}

// Events published by the vault ledger and the batch router.
// Structured to ease integration with third party indexers: addresses go to topics, amounts to body.
pub trait VaultEvents {
    fn register_pool(&self, pool: Address, tokens: Vec<Address>, swap_fee_fraction: u32);

    fn initialize_pool(&self, pool: Address, amounts: Vec<u128>, share_amount: u128);

    fn add_liquidity(
        &self,
        pool: Address,
        to: Address,
        tokens: Vec<Address>,
        amounts: Vec<u128>,
        share_amount: u128,
    );

    fn remove_liquidity(
        &self,
        pool: Address,
        from: Address,
        tokens: Vec<Address>,
        amounts: Vec<u128>,
        share_amount: u128,
    );

    fn swap(
        &self,
        pool: Address,
        token_in: Address,
        token_out: Address,
        in_amount: u128,
        out_amount: u128,
        fee_amount: u128,
    );

    fn wrap(&self, wrapped_token: Address, underlying_in: u128, wrapped_out: u128);

    fn unwrap(&self, wrapped_token: Address, wrapped_in: u128, underlying_out: u128);

    fn register_buffer(&self, wrapped_token: Address, underlying_token: Address);

    fn add_buffer_liquidity(
        &self,
        wrapped_token: Address,
        owner: Address,
        underlying_amount: u128,
        wrapped_amount: u128,
        shares: u128,
    );

    fn remove_buffer_liquidity(
        &self,
        wrapped_token: Address,
        owner: Address,
        underlying_amount: u128,
        wrapped_amount: u128,
        shares: u128,
    );

    fn batch_swap(
        &self,
        sender: Address,
        tokens_in: Vec<Address>,
        amounts_in: Vec<u128>,
        tokens_out: Vec<Address>,
        amounts_out: Vec<u128>,
    );
}

fn amounts_body(e: &Env, head: u128, amounts: &Vec<u128>) -> Vec<Val> {
    let mut body: Vec<Val> = Vec::from_array(e, [(head as i128).into_val(e)]);
    for amount in amounts.iter() {
        body.push_back((amount as i128).into_val(e));
    }
    body
}

impl VaultEvents for Events {
    fn register_pool(&self, pool: Address, tokens: Vec<Address>, swap_fee_fraction: u32) {
        // topics
        // [
        //   "register_pool": Symbol, // event identifier
        //   pool: Address,           // pool contract, also the share token
        // ]
        //
        // body
        // [
        //   tokens: Vec<Address>,    // pool tokens in registration order
        //   fee_fraction: u32        // static swap fee, 1 = 0.01%
        // ]
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "register_pool"), pool),
            (tokens, swap_fee_fraction),
        );
    }

    fn initialize_pool(&self, pool: Address, amounts: Vec<u128>, share_amount: u128) {
        // topics
        // [
        //   "initialize_pool": Symbol,
        //   pool: Address,
        // ]
        //
        // body
        // [
        //   share_amount: i128, // shares minted, including the locked minimum
        //   amountA: i128,      // initial balance for each pool token
        //   ...
        // ]
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "initialize_pool"), pool),
            amounts_body(e, share_amount, &amounts),
        );
    }

    fn add_liquidity(
        &self,
        pool: Address,
        to: Address,
        tokens: Vec<Address>,
        amounts: Vec<u128>,
        share_amount: u128,
    ) {
        // topics
        // [
        //   "add_liquidity": Symbol,
        //   pool: Address,
        //   to: Address,        // receiver of the minted shares
        //   assetA: Address,    // pool tokens
        //   ...
        // ]
        //
        // body
        // [
        //   share_amount: i128, // shares minted
        //   amountA: i128,      // amounts deposited per pool token
        //   ...
        // ]
        let e = self.env();
        let mut topics: Vec<Val> = Vec::from_array(
            e,
            [
                Symbol::new(e, "add_liquidity").to_val(),
                pool.into_val(e),
                to.into_val(e),
            ],
        );
        for token in tokens.iter() {
            topics.push_back(token.into_val(e));
        }
        e.events()
            .publish(topics, amounts_body(e, share_amount, &amounts));
    }

    fn remove_liquidity(
        &self,
        pool: Address,
        from: Address,
        tokens: Vec<Address>,
        amounts: Vec<u128>,
        share_amount: u128,
    ) {
        // topics
        // [
        //   "remove_liquidity": Symbol,
        //   pool: Address,
        //   from: Address,      // owner of the burned shares
        //   assetA: Address,
        //   ...
        // ]
        //
        // body
        // [
        //   share_amount: i128, // shares burned
        //   amountA: i128,      // amounts withdrawn per pool token
        //   ...
        // ]
        let e = self.env();
        let mut topics: Vec<Val> = Vec::from_array(
            e,
            [
                Symbol::new(e, "remove_liquidity").to_val(),
                pool.into_val(e),
                from.into_val(e),
            ],
        );
        for token in tokens.iter() {
            topics.push_back(token.into_val(e));
        }
        e.events()
            .publish(topics, amounts_body(e, share_amount, &amounts));
    }

    fn swap(
        &self,
        pool: Address,
        token_in: Address,
        token_out: Address,
        in_amount: u128,
        out_amount: u128,
        fee_amount: u128,
    ) {
        // topics
        // [
        //   "swap": Symbol,        // event identifier
        //   pool: Address,         // pool the trade was routed through
        //   sold_asset: Address,   // asset sent to the pool
        //   bought_asset: Address, // asset received from the pool
        // ]
        // body
        // [
        //   sold_amount: i128,   // amount of tokens sent to the pool
        //   bought_amount: i128, // amount of tokens received from the pool
        //   fee: i128            // swap fee, in sold asset
        // ]
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "swap"), pool, token_in, token_out),
            (in_amount as i128, out_amount as i128, fee_amount as i128),
        );
    }

    fn wrap(&self, wrapped_token: Address, underlying_in: u128, wrapped_out: u128) {
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "wrap"), wrapped_token),
            (underlying_in as i128, wrapped_out as i128),
        );
    }

    fn unwrap(&self, wrapped_token: Address, wrapped_in: u128, underlying_out: u128) {
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "unwrap"), wrapped_token),
            (wrapped_in as i128, underlying_out as i128),
        );
    }

    fn register_buffer(&self, wrapped_token: Address, underlying_token: Address) {
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "register_buffer"), wrapped_token),
            (underlying_token,),
        );
    }

    fn add_buffer_liquidity(
        &self,
        wrapped_token: Address,
        owner: Address,
        underlying_amount: u128,
        wrapped_amount: u128,
        shares: u128,
    ) {
        // topics
        // [
        //   "add_buffer_liquidity": Symbol,
        //   wrapped_token: Address, // buffer identifier
        //   owner: Address,         // receiver of buffer shares
        // ]
        //
        // body
        // [
        //   underlying_amount: i128,
        //   wrapped_amount: i128,
        //   shares: i128
        // ]
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "add_buffer_liquidity"), wrapped_token, owner),
            (
                underlying_amount as i128,
                wrapped_amount as i128,
                shares as i128,
            ),
        );
    }

    fn remove_buffer_liquidity(
        &self,
        wrapped_token: Address,
        owner: Address,
        underlying_amount: u128,
        wrapped_amount: u128,
        shares: u128,
    ) {
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "remove_buffer_liquidity"), wrapped_token, owner),
            (
                underlying_amount as i128,
                wrapped_amount as i128,
                shares as i128,
            ),
        );
    }

    fn batch_swap(
        &self,
        sender: Address,
        tokens_in: Vec<Address>,
        amounts_in: Vec<u128>,
        tokens_out: Vec<Address>,
        amounts_out: Vec<u128>,
    ) {
        // topics
        // [
        //   "batch_swap": Symbol,
        //   sender: Address,        // account that paid and received
        // ]
        //
        // body
        // [
        //   tokens_in: Vec<Address>,
        //   amounts_in: Vec<u128>,  // gross amounts, before netting
        //   tokens_out: Vec<Address>,
        //   amounts_out: Vec<u128>
        // ]
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "batch_swap"), sender),
            (tokens_in, amounts_in, tokens_out, amounts_out),
        );
    }
}
