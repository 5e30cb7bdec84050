#![cfg(test)]
extern crate std;

use crate::{WrappedToken, WrappedTokenClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{
    StellarAssetClient as SorobanTokenAdminClient, TokenClient as SorobanTokenClient,
};
use soroban_sdk::{Address, Env, String};

pub(crate) struct Setup<'a> {
    pub(crate) env: Env,
    pub(crate) asset: SorobanTokenClient<'a>,
    pub(crate) asset_admin_client: SorobanTokenAdminClient<'a>,
    pub(crate) wrapper: WrappedTokenClient<'a>,
}

impl Default for Setup<'_> {
    fn default() -> Self {
        let e = Env::default();
        e.mock_all_auths();
        e.cost_estimate().budget().reset_unlimited();

        let admin = Address::generate(&e);
        let asset = create_token_contract(&e, &admin);
        let asset_admin_client = SorobanTokenAdminClient::new(&e, &asset.address);
        let wrapper = create_wrapped_token_contract(&e, &asset.address);

        Self {
            env: e,
            asset,
            asset_admin_client,
            wrapper,
        }
    }
}

impl Setup<'_> {
    pub(crate) fn deposit(&self, user: &Address, assets: u128) -> u128 {
        self.asset.approve(
            user,
            &self.wrapper.address,
            &(assets as i128),
            &(self.env.ledger().sequence() + 1),
        );
        self.wrapper.deposit(user, &assets, user)
    }
}

pub(crate) fn create_token_contract<'a>(e: &Env, admin: &Address) -> SorobanTokenClient<'a> {
    SorobanTokenClient::new(
        e,
        &e.register_stellar_asset_contract_v2(admin.clone())
            .address(),
    )
}

pub(crate) fn create_wrapped_token_contract<'a>(
    e: &Env,
    asset: &Address,
) -> WrappedTokenClient<'a> {
    WrappedTokenClient::new(
        e,
        &e.register(
            WrappedToken,
            (
                asset.clone(),
                String::from_str(e, "Wrapped Token"),
                String::from_str(e, "wTKN"),
            ),
        ),
    )
}
