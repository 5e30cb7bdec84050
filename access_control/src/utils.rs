use crate::access::{AccessControl, AccessControlTrait};
use crate::role::Role;
use soroban_sdk::{Address, Env};

pub fn require_admin(e: &Env, address: &Address) {
    address.require_auth();
    AccessControl::new(e).assert_address_has_role(address, &Role::Admin);
}

// Minter is a contract (the vault); its auth holds whenever it is the direct invoker.
pub fn require_minter(e: &Env) -> Address {
    let minter = AccessControl::new(e).get_role(&Role::Minter);
    minter.require_auth();
    minter
}
