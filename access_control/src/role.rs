use soroban_sdk::{Env, Symbol};

#[derive(Clone)]
pub enum Role {
    Admin,
    // contract allowed to mint and burn on behalf of holders
    Minter,
}

pub trait SymbolRepresentation {
    fn as_symbol(&self, e: &Env) -> Symbol;
}

impl SymbolRepresentation for Role {
    fn as_symbol(&self, e: &Env) -> Symbol {
        match self {
            Role::Admin => Symbol::new(e, "Admin"),
            Role::Minter => Symbol::new(e, "Minter"),
        }
    }
}
