use crate::buffer::BufferWrapOrUnwrapParams;
use crate::constants::MAX_AMOUNT;
use crate::ledger::Ledger;
use crate::liquidity::{single_token_amounts, AddLiquidityParams, RemoveLiquidityParams};
use crate::router::context::SwapContext;
use crate::router::paths::{check_path, classify_step, step_token_in, StepKind};
use crate::router::transfers::{pull_into_router, return_from_router, send_token_to, take_token_from};
use crate::swap::{token_index, VaultSwapParams};
use crate::types::{AddLiquidityKind, RemoveLiquidityKind, SwapPathExactAmountOut};
use soroban_sdk::{Address, Vec};
use vault_interface::types::SwapKind;

// compute_path_amounts_in
// Runs every path backwards from its exact output. Each path books `max_amount_in` up front
// and gives back whatever the last executed step did not need. Only the amount actually used
// is reported as paid, so a live run reports the same inputs as its query.
//
// Returns: input amount of each path.
pub(crate) fn compute_path_amounts_in(
    ledger: &mut Ledger,
    ctx: &mut SwapContext,
    sender: &Address,
    paths: &Vec<SwapPathExactAmountOut>,
) -> Vec<u128> {
    let e = ledger.env().clone();
    let router = ledger.address().clone();
    let mut path_amounts_in = Vec::new(&e);

    for path in paths.iter() {
        check_path(&e, &path.steps);
        let steps_count = path.steps.len();

        ctx.add_token_in(&path.token_in);
        ctx.add_in_amount(&path.token_in, path.max_amount_in);

        let mut step_amount_out = path.exact_amount_out;

        for j in (0..steps_count).rev() {
            let step = path.steps.get_unchecked(j);
            let token_in = step_token_in(&path.steps, &path.token_in, j);
            let is_first_executed = j == steps_count - 1;
            let is_last_executed = j == 0;
            let max_amount_in = if is_last_executed {
                path.max_amount_in
            } else {
                MAX_AMOUNT
            };
            let kind = classify_step(ledger, &step, &token_in);

            if is_first_executed {
                ctx.add_token_out(&step.token_out);
                ctx.add_out_amount(&step.token_out, step_amount_out);
            }

            let amount_in = match kind {
                StepKind::Buffer(direction) => {
                    let prepaid = is_last_executed && ledger.is_live();
                    if prepaid {
                        // the wrapper pulls from the vault, so the whole max has to be there
                        take_token_from(ledger, sender, &token_in, max_amount_in);
                        ctx.sub_in_amount(&token_in, max_amount_in);
                    }
                    let (amount_in, _, _) = ledger.wrap_or_unwrap(&BufferWrapOrUnwrapParams {
                        kind: SwapKind::ExactOut,
                        direction,
                        wrapped_token: step.pool.clone(),
                        amount_given_raw: step_amount_out,
                        limit_raw: max_amount_in,
                    });
                    if prepaid {
                        // only the used part counts as paid, the rest goes back on settlement
                        ctx.add_settled_in(&token_in, amount_in);
                        let refund = max_amount_in - amount_in;
                        if refund > 0 {
                            ctx.add_token_out(&token_in);
                            ctx.add_out_amount(&token_in, refund);
                        }
                    } else if is_last_executed {
                        ctx.sub_in_amount(&token_in, max_amount_in - amount_in);
                    }
                    amount_in
                }
                StepKind::BurnShares => {
                    let config = ledger.pool_config(&step.pool);
                    let index = token_index(&e, &config, &step.token_out);
                    let min_amounts_out =
                        single_token_amounts(&e, config.tokens.len(), index, step_amount_out);

                    if is_last_executed {
                        pull_into_router(ledger, sender, &step.pool, max_amount_in);
                        let (share_amount_in, _) = ledger.remove_liquidity(&RemoveLiquidityParams {
                            pool: step.pool.clone(),
                            from: router.clone(),
                            max_share_amount_in: max_amount_in,
                            min_amounts_out,
                            kind: RemoveLiquidityKind::SingleTokenExactOut,
                        });
                        return_from_router(ledger, sender, &step.pool, max_amount_in - share_amount_in);
                        ctx.sub_in_amount(&token_in, max_amount_in);
                        ctx.add_settled_in(&token_in, share_amount_in);
                        share_amount_in
                    } else {
                        // the shares only show up as output of the next executed step,
                        // borrow everything the vault holds and give back what was not burned
                        let borrowed = ledger.reserves_of(&step.pool);
                        send_token_to(ledger, &router, &step.pool, borrowed);
                        let (share_amount_in, _) = ledger.remove_liquidity(&RemoveLiquidityParams {
                            pool: step.pool.clone(),
                            from: router.clone(),
                            max_share_amount_in: max_amount_in,
                            min_amounts_out,
                            kind: RemoveLiquidityKind::SingleTokenExactOut,
                        });
                        ledger.settle(&step.pool, borrowed - share_amount_in);
                        share_amount_in
                    }
                }
                StepKind::MintShares => {
                    let config = ledger.pool_config(&step.pool);
                    let index = token_index(&e, &config, &token_in);
                    let to = if is_first_executed {
                        sender.clone()
                    } else {
                        router.clone()
                    };
                    let (amounts_in, _) = ledger.add_liquidity(&AddLiquidityParams {
                        pool: step.pool.clone(),
                        to,
                        max_amounts_in: single_token_amounts(
                            &e,
                            config.tokens.len(),
                            index,
                            max_amount_in,
                        ),
                        min_share_amount_out: step_amount_out,
                        kind: AddLiquidityKind::SingleTokenExactOut,
                    });
                    if is_first_executed {
                        // minted straight to the sender
                        ctx.sub_out_amount(&step.token_out, step_amount_out);
                        ctx.add_settled_out(&step.token_out, step_amount_out);
                    } else {
                        ledger.settle(&step.pool, step_amount_out);
                    }
                    let amount_in = amounts_in.get_unchecked(index);
                    if is_last_executed {
                        ctx.sub_in_amount(&token_in, max_amount_in - amount_in);
                    }
                    amount_in
                }
                StepKind::Swap => {
                    let (amount_in, _, _) = ledger.swap(&VaultSwapParams {
                        kind: SwapKind::ExactOut,
                        pool: step.pool.clone(),
                        token_in: token_in.clone(),
                        token_out: step.token_out.clone(),
                        amount_given_raw: step_amount_out,
                        limit_raw: max_amount_in,
                    });
                    if is_last_executed {
                        ctx.sub_in_amount(&token_in, max_amount_in - amount_in);
                    }
                    amount_in
                }
            };

            step_amount_out = amount_in;
        }
        path_amounts_in.push_back(step_amount_out);
    }
    path_amounts_in
}
