use crate::buffer::BufferWrapOrUnwrapParams;
use crate::ledger::Ledger;
use crate::liquidity::{single_token_amounts, AddLiquidityParams, RemoveLiquidityParams};
use crate::router::context::SwapContext;
use crate::router::paths::{check_path, classify_step, StepKind};
use crate::router::transfers::{pull_into_router, send_token_to, take_token_from};
use crate::swap::{token_index, VaultSwapParams};
use crate::types::{AddLiquidityKind, RemoveLiquidityKind, SwapPathExactAmountIn};
use soroban_sdk::{Address, Vec};
use vault_interface::types::SwapKind;

// compute_path_amounts_out
// Runs every path forward from its exact input. Outputs of the last steps are accumulated in `ctx`
// for settlement, nothing is paid out here.
//
// Returns: output amount of each path.
pub(crate) fn compute_path_amounts_out(
    ledger: &mut Ledger,
    ctx: &mut SwapContext,
    sender: &Address,
    paths: &Vec<SwapPathExactAmountIn>,
) -> Vec<u128> {
    let e = ledger.env().clone();
    let router = ledger.address().clone();
    let mut path_amounts_out = Vec::new(&e);

    for path in paths.iter() {
        check_path(&e, &path.steps);
        let steps_count = path.steps.len();
        let first_kind = classify_step(ledger, &path.steps.get_unchecked(0), &path.token_in);

        ctx.add_token_in(&path.token_in);
        match first_kind {
            StepKind::Buffer(_) if ledger.is_live() => {
                // the wrapper pulls from the vault, so the input has to be there before the step
                take_token_from(ledger, sender, &path.token_in, path.exact_amount_in);
                ctx.add_settled_in(&path.token_in, path.exact_amount_in);
            }
            StepKind::BurnShares => ctx.add_settled_in(&path.token_in, path.exact_amount_in),
            _ => ctx.add_in_amount(&path.token_in, path.exact_amount_in),
        }

        let mut step_token_in = path.token_in.clone();
        let mut step_amount_in = path.exact_amount_in;

        for i in 0..steps_count {
            let step = path.steps.get_unchecked(i);
            let is_first = i == 0;
            let is_last = i == steps_count - 1;
            let kind = if is_first {
                first_kind
            } else {
                classify_step(ledger, &step, &step_token_in)
            };
            let min_amount_out = if is_last { path.min_amount_out } else { 0 };

            let amount_out = match kind {
                StepKind::Buffer(direction) => {
                    let (amount_out, _, _) = ledger.wrap_or_unwrap(&BufferWrapOrUnwrapParams {
                        kind: SwapKind::ExactIn,
                        direction,
                        wrapped_token: step.pool.clone(),
                        amount_given_raw: step_amount_in,
                        limit_raw: min_amount_out,
                    });
                    if is_last {
                        ctx.add_token_out(&step.token_out);
                        ctx.add_out_amount(&step.token_out, amount_out);
                    }
                    amount_out
                }
                StepKind::BurnShares => {
                    if is_first {
                        pull_into_router(ledger, sender, &step.pool, step_amount_in);
                    } else {
                        send_token_to(ledger, &router, &step.pool, step_amount_in);
                    }
                    let config = ledger.pool_config(&step.pool);
                    let index = token_index(&e, &config, &step.token_out);
                    // a zero floor would make the target token ambiguous
                    let floor = if is_last { min_amount_out.max(1) } else { 1 };
                    let (_, amounts_out) = ledger.remove_liquidity(&RemoveLiquidityParams {
                        pool: step.pool.clone(),
                        from: router.clone(),
                        max_share_amount_in: step_amount_in,
                        min_amounts_out: single_token_amounts(
                            &e,
                            config.tokens.len(),
                            index,
                            floor,
                        ),
                        kind: RemoveLiquidityKind::SingleTokenExactIn,
                    });
                    let amount_out = amounts_out.get_unchecked(index);
                    if is_last {
                        ctx.add_token_out(&step.token_out);
                        ctx.add_out_amount(&step.token_out, amount_out);
                    }
                    amount_out
                }
                StepKind::MintShares => {
                    let config = ledger.pool_config(&step.pool);
                    let index = token_index(&e, &config, &step_token_in);
                    let to = if is_last { sender.clone() } else { router.clone() };
                    let (_, share_amount_out) = ledger.add_liquidity(&AddLiquidityParams {
                        pool: step.pool.clone(),
                        to,
                        max_amounts_in: single_token_amounts(
                            &e,
                            config.tokens.len(),
                            index,
                            step_amount_in,
                        ),
                        min_share_amount_out: min_amount_out,
                        kind: AddLiquidityKind::Unbalanced,
                    });
                    if is_last {
                        // minted straight to the sender
                        ctx.add_token_out(&step.token_out);
                        ctx.add_settled_out(&step.token_out, share_amount_out);
                    } else {
                        ledger.settle(&step.pool, share_amount_out);
                    }
                    share_amount_out
                }
                StepKind::Swap => {
                    let (amount_out, _, _) = ledger.swap(&VaultSwapParams {
                        kind: SwapKind::ExactIn,
                        pool: step.pool.clone(),
                        token_in: step_token_in.clone(),
                        token_out: step.token_out.clone(),
                        amount_given_raw: step_amount_in,
                        limit_raw: min_amount_out,
                    });
                    if is_last {
                        ctx.add_token_out(&step.token_out);
                        ctx.add_out_amount(&step.token_out, amount_out);
                    }
                    amount_out
                }
            };

            step_token_in = step.token_out.clone();
            step_amount_in = amount_out;
        }
        path_amounts_out.push_back(step_amount_in);
    }
    path_amounts_out
}
