use soroban_sdk::{Address, Env, Symbol};

#[derive(Clone)]
pub(crate) struct Events(Env);

impl Events {
    #[inline(always)]
    pub(crate) fn env(&self) -> &Env {
        &self.0
    }

    #[inline(always)]
    pub(crate) fn new(env: &Env) -> Events {
        Events(env.clone())
    }
}

pub(crate) trait WrappedTokenEvents {
    fn deposit(&self, from: Address, receiver: Address, assets: u128, shares: u128);

    fn withdraw(&self, owner: Address, receiver: Address, assets: u128, shares: u128);
}

impl WrappedTokenEvents for Events {
    fn deposit(&self, from: Address, receiver: Address, assets: u128, shares: u128) {
        self.env().events().publish(
            (Symbol::new(self.env(), "deposit"), from, receiver),
            (assets as i128, shares as i128),
        );
    }

    fn withdraw(&self, owner: Address, receiver: Address, assets: u128, shares: u128) {
        self.env().events().publish(
            (Symbol::new(self.env(), "withdraw"), owner, receiver),
            (assets as i128, shares as i128),
        );
    }
}
