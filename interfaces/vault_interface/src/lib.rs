#![no_std]

pub mod pool;
pub mod types;
pub mod wrapped_token;
