use crate::ledger::Ledger;
use soroban_sdk::Address;

// Pays the vault from `payer` and credits the session with what arrived.
pub(crate) fn take_token_from(ledger: &mut Ledger, payer: &Address, token: &Address, amount: u128) {
    if amount == 0 {
        return;
    }
    let vault = ledger.address().clone();
    ledger.bank.transfer(token, payer, &vault, amount);
    ledger.settle(token, amount);
}

// Pays `recipient` out of the session credit.
pub(crate) fn send_token_to(ledger: &mut Ledger, recipient: &Address, token: &Address, amount: u128) {
    if amount == 0 {
        return;
    }
    ledger.send_to(token, recipient, amount);
}

// Moves tokens into the router without touching the session, used for shares that are burned
// from the router right after.
pub(crate) fn pull_into_router(ledger: &mut Ledger, payer: &Address, token: &Address, amount: u128) {
    let router = ledger.address().clone();
    ledger.bank.transfer(token, payer, &router, amount);
}

// Counterpart of `pull_into_router` for whatever was not burned.
pub(crate) fn return_from_router(ledger: &mut Ledger, recipient: &Address, token: &Address, amount: u128) {
    let router = ledger.address().clone();
    ledger.bank.transfer(token, &router, recipient, amount);
}
