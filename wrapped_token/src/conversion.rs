use crate::storage::get_asset;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::token::TokenClient as SorobanTokenClient;
use soroban_sdk::Env;
use token_share::get_total_shares;
use vault_interface::types::Rounding;

// Assets held by the wrapper, including anything donated to it. Donations are how yield accrues.
pub(crate) fn total_assets(e: &Env) -> u128 {
    SorobanTokenClient::new(e, &get_asset(e)).balance(&e.current_contract_address()) as u128
}

// Rates include one virtual share and one virtual asset.
pub(crate) fn to_shares(e: &Env, assets: u128, rounding: Rounding) -> u128 {
    let supply = get_total_shares(e) + 1;
    let assets_total = total_assets(e) + 1;
    match rounding {
        Rounding::Down => assets.fixed_mul_floor(e, &supply, &assets_total),
        Rounding::Up => assets.fixed_mul_ceil(e, &supply, &assets_total),
    }
}

pub(crate) fn to_assets(e: &Env, shares: u128, rounding: Rounding) -> u128 {
    let supply = get_total_shares(e) + 1;
    let assets_total = total_assets(e) + 1;
    match rounding {
        Rounding::Down => shares.fixed_mul_floor(e, &assets_total, &supply),
        Rounding::Up => shares.fixed_mul_ceil(e, &assets_total, &supply),
    }
}
