use crate::ledger::Ledger;
use crate::router::context::SwapContext;
use crate::router::transfers::{send_token_to, take_token_from};
use soroban_sdk::Address;

// settle_paths
// Turns the accumulated batch amounts into token transfers: one pull per token in,
// one push per token out. Tokens on both sides only move their net amount.
// Draining empties the context, so calling it again moves nothing.
pub(crate) fn settle_paths(ledger: &mut Ledger, ctx: &mut SwapContext, sender: &Address) {
    ctx.net_opposing_flows();

    while let Some((token, amount)) = ctx.pop_token_in() {
        take_token_from(ledger, sender, &token, amount);
    }
    while let Some((token, amount)) = ctx.pop_token_out() {
        send_token_to(ledger, sender, &token, amount);
    }
    ctx.clear_settled();
}
