use crate::constants::BUFFER_MIN_TOTAL_SUPPLY;
use crate::errors::VaultError;
use crate::ledger::Ledger;
use crate::types::{BufferData, WrappingDirection};
use soroban_sdk::{panic_with_error, Address, Env};
use utils::scaled_math::mul_div_down;
use vault_events::{Events, VaultEvents};
use vault_interface::types::SwapKind;
use vault_interface::wrapped_token::WrappedTokenClient;
use vault_validation_errors::VaultValidationError;

pub(crate) struct BufferWrapOrUnwrapParams {
    pub(crate) kind: SwapKind,
    pub(crate) direction: WrappingDirection,
    pub(crate) wrapped_token: Address,
    pub(crate) amount_given_raw: u128,
    pub(crate) limit_raw: u128,
}

fn check_limit(e: &Env, kind: SwapKind, amount_in: u128, amount_out: u128, limit: u128) {
    match kind {
        SwapKind::ExactIn => {
            if amount_out < limit {
                panic_with_error!(e, VaultValidationError::OutMinNotSatisfied);
            }
        }
        SwapKind::ExactOut => {
            if amount_in > limit {
                panic_with_error!(e, VaultValidationError::InMaxNotSatisfied);
            }
        }
    }
}

impl Ledger {
    // wrap_or_unwrap
    // Converts between a wrapped token and its underlying at the wrapper rate.
    // Served from the buffer reserves when they cover the output, otherwise through the wrapper itself.
    //
    // Returns: (amount_calculated_raw, amount_in_raw, amount_out_raw)
    pub(crate) fn wrap_or_unwrap(&mut self, params: &BufferWrapOrUnwrapParams) -> (u128, u128, u128) {
        let e = self.env().clone();
        let mut buffer = self.buffer(&params.wrapped_token);

        if params.amount_given_raw == 0 {
            check_limit(&e, params.kind, 0, 0, params.limit_raw);
            return (0, 0, 0);
        }

        let wrapper = WrappedTokenClient::new(&e, &params.wrapped_token);
        let given = params.amount_given_raw;
        let (amount_in, amount_out) = match params.direction {
            WrappingDirection::Wrap => {
                let (underlying_in, wrapped_out) = match params.kind {
                    SwapKind::ExactIn => (given, wrapper.preview_deposit(&given)),
                    SwapKind::ExactOut => (wrapper.preview_mint(&given), given),
                };
                if buffer.wrapped_balance >= wrapped_out {
                    buffer.underlying_balance += underlying_in;
                    buffer.wrapped_balance -= wrapped_out;
                    (underlying_in, wrapped_out)
                } else {
                    let (underlying_in, wrapped_out) = self.bank.deposit_to_wrapper(
                        &params.wrapped_token,
                        &buffer.underlying_token,
                        params.kind,
                        given,
                    );
                    self.sync_wrapper_reserves(
                        &buffer.underlying_token,
                        underlying_in,
                        &params.wrapped_token,
                        wrapped_out,
                    );
                    (underlying_in, wrapped_out)
                }
            }
            WrappingDirection::Unwrap => {
                let (wrapped_in, underlying_out) = match params.kind {
                    SwapKind::ExactIn => (given, wrapper.preview_redeem(&given)),
                    SwapKind::ExactOut => (wrapper.preview_withdraw(&given), given),
                };
                if buffer.underlying_balance >= underlying_out {
                    buffer.wrapped_balance += wrapped_in;
                    buffer.underlying_balance -= underlying_out;
                    (wrapped_in, underlying_out)
                } else {
                    let (wrapped_in, underlying_out) =
                        self.bank
                            .withdraw_from_wrapper(&params.wrapped_token, params.kind, given);
                    self.sync_wrapper_reserves(
                        &params.wrapped_token,
                        wrapped_in,
                        &buffer.underlying_token,
                        underlying_out,
                    );
                    (wrapped_in, underlying_out)
                }
            }
        };
        check_limit(&e, params.kind, amount_in, amount_out, params.limit_raw);
        self.set_buffer(&params.wrapped_token, &buffer);

        let (token_in, token_out) = match params.direction {
            WrappingDirection::Wrap => (buffer.underlying_token.clone(), params.wrapped_token.clone()),
            WrappingDirection::Unwrap => (params.wrapped_token.clone(), buffer.underlying_token.clone()),
        };
        self.take_debt(&token_in, amount_in);
        self.supply_credit(&token_out, amount_out);

        if self.is_live() {
            match params.direction {
                WrappingDirection::Wrap => {
                    Events::new(&e).wrap(params.wrapped_token.clone(), amount_in, amount_out)
                }
                WrappingDirection::Unwrap => {
                    Events::new(&e).unwrap(params.wrapped_token.clone(), amount_in, amount_out)
                }
            }
        }

        let amount_calculated = match params.kind {
            SwapKind::ExactIn => amount_out,
            SwapKind::ExactOut => amount_in,
        };
        (amount_calculated, amount_in, amount_out)
    }

    // tokens really moved through the wrapper, query sessions leave balances untouched
    fn sync_wrapper_reserves(
        &mut self,
        token_sent: &Address,
        amount_sent: u128,
        token_received: &Address,
        amount_received: u128,
    ) {
        if !self.is_live() {
            return;
        }
        let sent_reserves = self.reserves_of(token_sent);
        if sent_reserves < amount_sent {
            panic_with_error!(self.env(), VaultError::ReservesMismatch);
        }
        self.set_reserves(token_sent, sent_reserves - amount_sent);
        let received_reserves = self.reserves_of(token_received);
        self.set_reserves(token_received, received_reserves + amount_received);
    }

    // add_liquidity_to_buffer
    // Deposits both sides of a buffer. Shares are issued in underlying value terms,
    // the first BUFFER_MIN_TOTAL_SUPPLY of them are locked.
    //
    // Returns: shares issued to `owner`.
    pub(crate) fn add_liquidity_to_buffer(
        &mut self,
        wrapped_token: &Address,
        owner: &Address,
        amount_underlying: u128,
        amount_wrapped: u128,
        min_shares_out: u128,
    ) -> u128 {
        let e = self.env().clone();
        let mut buffer = self.buffer(wrapped_token);
        let wrapper = WrappedTokenClient::new(&e, wrapped_token);
        let total_shares = self.buffer_total_shares(wrapped_token);

        let added_value = amount_underlying + wrapper.convert_to_assets(&amount_wrapped);
        let (issued_shares, new_total_shares) = if total_shares == 0 {
            if added_value < BUFFER_MIN_TOTAL_SUPPLY {
                panic_with_error!(&e, VaultError::BufferTotalSupplyTooLow);
            }
            (added_value - BUFFER_MIN_TOTAL_SUPPLY, added_value)
        } else {
            let buffer_value = buffer_value(&wrapper, &buffer);
            let issued = mul_div_down(&e, added_value, total_shares, buffer_value);
            (issued, total_shares + issued)
        };
        if issued_shares < min_shares_out {
            panic_with_error!(&e, VaultValidationError::SharesOutMinNotSatisfied);
        }

        buffer.underlying_balance += amount_underlying;
        buffer.wrapped_balance += amount_wrapped;
        self.set_buffer(wrapped_token, &buffer);
        let owner_shares = self.buffer_shares(wrapped_token, owner);
        self.set_buffer_shares(wrapped_token, owner, owner_shares + issued_shares);
        self.set_buffer_total_shares(wrapped_token, new_total_shares);

        self.take_debt(&buffer.underlying_token, amount_underlying);
        self.take_debt(wrapped_token, amount_wrapped);

        Events::new(&e).add_buffer_liquidity(
            wrapped_token.clone(),
            owner.clone(),
            amount_underlying,
            amount_wrapped,
            issued_shares,
        );
        issued_shares
    }

    // remove_liquidity_from_buffer
    // Burns buffer shares for a proportional part of both sides.
    //
    // Returns: (underlying_out, wrapped_out)
    pub(crate) fn remove_liquidity_from_buffer(
        &mut self,
        wrapped_token: &Address,
        owner: &Address,
        shares: u128,
        min_underlying_out: u128,
        min_wrapped_out: u128,
    ) -> (u128, u128) {
        let e = self.env().clone();
        let mut buffer = self.buffer(wrapped_token);
        let owner_shares = self.buffer_shares(wrapped_token, owner);
        if shares > owner_shares {
            panic_with_error!(&e, VaultError::InsufficientBufferShares);
        }
        let total_shares = self.buffer_total_shares(wrapped_token);

        let underlying_out = mul_div_down(&e, buffer.underlying_balance, shares, total_shares);
        let wrapped_out = mul_div_down(&e, buffer.wrapped_balance, shares, total_shares);
        if underlying_out < min_underlying_out || wrapped_out < min_wrapped_out {
            panic_with_error!(&e, VaultValidationError::OutMinNotSatisfied);
        }

        buffer.underlying_balance -= underlying_out;
        buffer.wrapped_balance -= wrapped_out;
        self.set_buffer(wrapped_token, &buffer);
        self.set_buffer_shares(wrapped_token, owner, owner_shares - shares);
        self.set_buffer_total_shares(wrapped_token, total_shares - shares);

        self.supply_credit(&buffer.underlying_token, underlying_out);
        self.supply_credit(wrapped_token, wrapped_out);

        Events::new(&e).remove_buffer_liquidity(
            wrapped_token.clone(),
            owner.clone(),
            underlying_out,
            wrapped_out,
            shares,
        );
        (underlying_out, wrapped_out)
    }
}

// buffer reserves valued in underlying
fn buffer_value(wrapper: &WrappedTokenClient, buffer: &BufferData) -> u128 {
    buffer.underlying_balance + wrapper.convert_to_assets(&buffer.wrapped_balance)
}
