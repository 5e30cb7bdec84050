use crate::errors::TokenError;
use soroban_sdk::{panic_with_error, Env, String};
use soroban_token_sdk::metadata::TokenMetadata;
use soroban_token_sdk::TokenUtils;
use utils::scaled_math::WAD_DECIMALS;

// Share tokens are priced by the vault at 18 decimals and can not be more precise than that.
pub fn write_metadata(e: &Env, decimals: u32, name: String, symbol: String) {
    if decimals > WAD_DECIMALS {
        panic_with_error!(e, TokenError::DecimalTooLarge);
    }
    TokenUtils::new(e).metadata().set_metadata(&TokenMetadata {
        decimal: decimals,
        name,
        symbol,
    });
}

pub fn read_metadata(e: &Env) -> TokenMetadata {
    TokenUtils::new(e).metadata().get_metadata()
}
