use crate::errors::AccessControlError;
use crate::role::Role;
use crate::storage::DataKey;
use soroban_sdk::{panic_with_error, Address, Env};
use utils::bump::bump_instance;

#[derive(Clone)]
pub struct AccessControl(Env);

impl AccessControl {
    pub fn new(env: &Env) -> AccessControl {
        AccessControl(env.clone())
    }

    fn get_key(&self, role: &Role) -> DataKey {
        match role {
            Role::Admin => DataKey::Admin,
            Role::Minter => DataKey::Minter,
        }
    }
}

pub trait AccessControlTrait {
    fn get_role_safe(&self, role: &Role) -> Option<Address>;
    fn get_role(&self, role: &Role) -> Address;
    fn set_role_address(&self, role: &Role, address: &Address);
    fn address_has_role(&self, address: &Address, role: &Role) -> bool;
    fn assert_address_has_role(&self, address: &Address, role: &Role);
}

impl AccessControlTrait for AccessControl {
    fn get_role_safe(&self, role: &Role) -> Option<Address> {
        let key = self.get_key(role);
        bump_instance(&self.0);
        self.0.storage().instance().get(&key)
    }

    fn get_role(&self, role: &Role) -> Address {
        match self.get_role_safe(role) {
            Some(address) => address,
            None => panic_with_error!(&self.0, AccessControlError::RoleNotFound),
        }
    }

    // Roles are assigned once, at construction time.
    fn set_role_address(&self, role: &Role, address: &Address) {
        if self.get_role_safe(role).is_some() {
            panic_with_error!(&self.0, AccessControlError::RoleAlreadySet);
        }
        let key = self.get_key(role);
        bump_instance(&self.0);
        self.0.storage().instance().set(&key, address);
    }

    fn address_has_role(&self, address: &Address, role: &Role) -> bool {
        match self.get_role_safe(role) {
            Some(role_address) => address == &role_address,
            None => false,
        }
    }

    fn assert_address_has_role(&self, address: &Address, role: &Role) {
        if !self.address_has_role(address, role) {
            panic_with_error!(&self.0, AccessControlError::Unauthorized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::{contract, contractimpl};

    #[contract]
    struct Dummy;

    #[contractimpl]
    impl Dummy {}

    #[test]
    fn test_roles() {
        let e = Env::default();
        let contract = e.register(Dummy, ());
        let admin = Address::generate(&e);
        let stranger = Address::generate(&e);

        e.as_contract(&contract, || {
            let access_control = AccessControl::new(&e);
            assert!(access_control.get_role_safe(&Role::Admin).is_none());
            access_control.set_role_address(&Role::Admin, &admin);
            assert_eq!(access_control.get_role(&Role::Admin), admin);
            assert!(access_control.address_has_role(&admin, &Role::Admin));
            assert!(!access_control.address_has_role(&stranger, &Role::Admin));
            assert!(!access_control.address_has_role(&admin, &Role::Minter));
        });
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #103)")]
    fn test_role_assigned_once() {
        let e = Env::default();
        let contract = e.register(Dummy, ());
        let admin = Address::generate(&e);

        e.as_contract(&contract, || {
            let access_control = AccessControl::new(&e);
            access_control.set_role_address(&Role::Admin, &admin);
            access_control.set_role_address(&Role::Admin, &admin);
        });
    }
}
