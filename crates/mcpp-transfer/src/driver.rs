//! Iterative balance drivers (§4.5): the buyer/seller pass used by the
//! Transfer and W-Transfer handlers, and a round-robin "cycling" variant
//! for continuous multi-change operation.
//!
//! Grounded on `original_source/src/planner/cpp/continuous/handler/transfer.py`
//! (standard driver) and `original_source/src/planner/cpp/multi/transfer.py`'s
//! `AreaTransferringPlanner` (cycling driver).

use mcpp_core::{AgentIndex, LabelMatrix, McppError, McppResult};

use crate::engine::{transfer_area, transfer_area_subtree};

/// Run the buyer/seller balancing pass to convergence or `max_iter`
/// exhaustion. A pass scans agents ascending by current size; for each
/// "buyer" it looks at its bordering agents descending by current size and
/// attempts one transfer from the first eligible "seller". If a full pass
/// completes with no transfer made, the partition is considered balanced.
pub fn balance(
    labels: &mut LabelMatrix,
    n: usize,
    seeds: &[(usize, usize)],
    max_iter: usize,
) -> McppResult<()> {
    for _ in 0..max_iter {
        let sizes = labels.partition_sizes(n);
        let target = sizes.iter().sum::<usize>() / n;

        let mut buyers: Vec<AgentIndex> =
            (0..n).map(|i| AgentIndex::try_from(i).expect("agent count fits u32")).collect();
        buyers.sort_by_key(|&b| sizes[b.index()]);

        let mut made_transfer = false;
        for buyer in buyers {
            let buyer_cells = labels.cells_of(buyer);
            let border = labels.border(&buyer_cells);
            if border.is_empty() {
                continue;
            }

            let mut sellers: Vec<AgentIndex> = border.keys().copied().collect();
            sellers.sort_by_key(|&s| std::cmp::Reverse(sizes[s.index()]));

            for seller in sellers {
                let buyer_size = sizes[buyer.index()] as i64;
                let seller_size = sizes[seller.index()] as i64;
                let diff = seller_size - buyer_size;
                if diff < 1 || (diff == 1 && seller_size == target as i64 + 1) {
                    continue;
                }

                let transfer_amount = ((diff + 1) / 2) as usize;
                let moved = transfer_area(
                    labels,
                    seller,
                    buyer,
                    &border[&seller],
                    transfer_amount,
                    seeds[seller.index()],
                );
                if moved > 0 {
                    made_transfer = true;
                    break;
                }
            }
            if made_transfer {
                break;
            }
        }

        if !made_transfer {
            return Ok(());
        }
    }
    Err(McppError::BalanceUnreached { max_iter })
}

/// Round-robin cycling variant (`AreaTransferringPlanner.assign`): agents
/// take turns as buyer in index order (not by current size), each turn
/// taking cells (with orphaned subtrees in tow, via
/// [`transfer_area_subtree`]) from its largest eligible bordering seller.
/// A single run-wide consecutive-failure counter, reset on any successful
/// transfer, stops the driver once every agent in turn has failed once.
pub fn cycling_balance(labels: &mut LabelMatrix, n: usize, seeds: &[(usize, usize)], max_iter: usize) {
    let target = labels.partition_sizes(n).iter().sum::<usize>() / n;
    let mut consecutive_failures = 0usize;
    let mut buyer_turn = 0usize;

    for _ in 0..max_iter {
        let buyer = AgentIndex::try_from(buyer_turn % n).expect("agent count fits u32");
        buyer_turn += 1;

        let sizes = labels.partition_sizes(n);
        let buyer_cells = labels.cells_of(buyer);
        let border = labels.border(&buyer_cells);

        let mut sellers: Vec<AgentIndex> = border.keys().copied().collect();
        sellers.sort_by_key(|&s| std::cmp::Reverse(sizes[s.index()]));

        let mut success = false;
        if sizes[buyer.index()] <= target {
            for seller in sellers {
                let diff = sizes[seller.index()] as i64 - sizes[buyer.index()] as i64;
                if diff < 1 || (diff == 1 && sizes[seller.index()] == target + 1) {
                    continue;
                }
                let transfer_amount = ((diff + 1) / 2) as usize;
                let moved = transfer_area_subtree(
                    labels,
                    seller,
                    buyer,
                    &border[&seller],
                    transfer_amount,
                    seeds[seller.index()],
                );
                if moved > 0 {
                    success = true;
                    break;
                }
            }
        }

        if success {
            consecutive_failures = 0;
        } else {
            consecutive_failures += 1;
            if consecutive_failures >= n {
                break;
            }
        }
    }
}
