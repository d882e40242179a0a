use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use swap_core::errors::SwapResult;
use swap_core::traits::ClassificationCursor;

use super::request::{Reply, Request};
use crate::swap::Swap;

/// What the worker did before it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStats {
    /// Classifications applied from the historical cursor.
    pub historical: u64,
    /// Classifications applied from `Classify` requests.
    pub classified: u64,
    /// Gold labels applied from `SetGold` requests, conflicts included.
    pub golds: u64,
    /// Score and export requests served.
    pub queries: u64,
    /// Whether the worker stopped on an error.
    pub failed: bool,
}

/// A stopped worker and the controller it owned.
#[derive(Debug)]
pub struct StoppedWorker {
    pub stats: WorkerStats,
    pub swap: Swap,
}

pub(crate) fn run(
    mut swap: Swap,
    historical: Option<ClassificationCursor>,
    requests: Receiver<Request>,
) -> StoppedWorker {
    let mut stats = WorkerStats::default();

    if let Some(cursor) = historical {
        if let Err(err) = drain(&mut swap, cursor, &mut stats) {
            error!(error = %err, applied = stats.historical, "historical drain failed, worker stopping");
            stats.failed = true;
            return StoppedWorker { stats, swap };
        }
        info!(applied = stats.historical, "historical classifications applied");
    }

    for request in requests.iter() {
        let kind = request.kind();
        let stop = match request {
            Request::Classify {
                classification,
                reply,
            } => {
                let result = swap.classify(&classification);
                if let Err(err) = &result {
                    error!(error = %err, %classification, "classification failed, worker stopping");
                } else {
                    stats.classified += 1;
                }
                respond(kind, reply, result)
            }
            Request::SetGold { golds, overwrite, reply } => {
                let result = swap.set_gold_labels(golds, overwrite);
                match &result {
                    Ok(gold) => stats.golds += gold.assigned + gold.unchanged + gold.conflicts,
                    Err(err) => error!(error = %err, "gold labels failed, worker stopping"),
                }
                respond(kind, reply, result)
            }
            Request::Score { subject, reply } => {
                stats.queries += 1;
                // An unknown subject leaves no ledger half-updated.
                respond(kind, reply, swap.subject_score(&subject));
                false
            }
            Request::Export { reply } => {
                stats.queries += 1;
                respond(kind, reply, swap.score_export())
            }
            Request::UserExport { reply } => {
                stats.queries += 1;
                respond(kind, reply, swap.export_user_scores())
            }
            Request::Shutdown => {
                debug!("shutdown requested");
                break;
            }
        };
        if stop {
            stats.failed = true;
            break;
        }
    }

    info!(
        classified = stats.classified,
        golds = stats.golds,
        queries = stats.queries,
        failed = stats.failed,
        "online worker stopped"
    );
    StoppedWorker { stats, swap }
}

fn drain(swap: &mut Swap, cursor: ClassificationCursor, stats: &mut WorkerStats) -> SwapResult<()> {
    for classification in cursor {
        swap.process_one(&classification?)?;
        stats.historical += 1;
    }
    swap.process_changes()?;
    Ok(())
}

/// Send `result` to the caller. Returns whether it was an error, which stops
/// the worker.
fn respond<T>(kind: &str, reply: Reply<T>, result: SwapResult<T>) -> bool {
    let failed = result.is_err();
    if reply.send(result).is_err() {
        warn!(kind, "caller stopped waiting, reply dropped");
    }
    failed
}
