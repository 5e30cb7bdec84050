#![no_std]

mod contract;
mod conversion;
mod events;
mod storage;
mod test;
mod testutils;

pub use contract::{WrappedToken, WrappedTokenClient};
