use soroban_sdk::contracttype;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,  // owner - registers pools and buffers
    Minter, // share issuer - the vault for pool and wrapped tokens
}
