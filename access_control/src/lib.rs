#![no_std]
pub mod access;
pub mod errors;
pub mod role;
mod storage;
pub mod utils;
