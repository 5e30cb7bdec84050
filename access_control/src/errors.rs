use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AccessControlError {
    RoleNotFound = 101,
    Unauthorized = 102,
    RoleAlreadySet = 103,
}
