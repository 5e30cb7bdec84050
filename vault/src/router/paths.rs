use crate::errors::VaultError;
use crate::ledger::Ledger;
use crate::types::{SwapPathStep, WrappingDirection};
use soroban_sdk::{panic_with_error, Address, Env, Vec};

// What a single path step does, derived from how its addresses relate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StepKind {
    // `pool` is the wrapped token of a registered buffer
    Buffer(WrappingDirection),
    // token in is the pool share itself: remove liquidity in a single token
    BurnShares,
    // token out is the pool share itself: add liquidity with a single token
    MintShares,
    Swap,
}

pub(crate) fn check_path(e: &Env, steps: &Vec<SwapPathStep>) {
    if steps.is_empty() {
        panic_with_error!(e, VaultError::EmptyPath);
    }
}

pub(crate) fn classify_step(ledger: &Ledger, step: &SwapPathStep, token_in: &Address) -> StepKind {
    let e = ledger.env();
    if step.token_out == *token_in {
        panic_with_error!(e, VaultError::InvalidStepChain);
    }
    if step.is_buffer {
        let underlying = ledger.buffer(&step.pool).underlying_token;
        if step.pool == *token_in && step.token_out == underlying {
            StepKind::Buffer(WrappingDirection::Unwrap)
        } else if step.pool == step.token_out && *token_in == underlying {
            StepKind::Buffer(WrappingDirection::Wrap)
        } else {
            panic_with_error!(e, VaultError::InvalidStepChain)
        }
    } else if step.pool == *token_in {
        StepKind::BurnShares
    } else if step.pool == step.token_out {
        StepKind::MintShares
    } else {
        StepKind::Swap
    }
}

// Input token of step `index`: the path token in for the first step, else the previous step's output.
pub(crate) fn step_token_in(steps: &Vec<SwapPathStep>, path_token_in: &Address, index: u32) -> Address {
    if index == 0 {
        path_token_in.clone()
    } else {
        steps.get_unchecked(index - 1).token_out
    }
}
