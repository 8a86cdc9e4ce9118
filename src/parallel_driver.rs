// THEORY:
// The `parallel_driver` module is the opt-in fan-out variant of the pairwise
// driver. Pair comparisons are embarrassingly independent — each owns its
// two grids outright — so they can be spread across a pool of worker tasks
// without any shared mutable state.
//
// Key architectural principles:
// 1.  **Dispatcher + Workers**: Tasks flow through a single dispatcher
//     channel that deals them round-robin to per-worker channels. Each
//     worker owns a clone of the (cheap, config-only) pipeline.
// 2.  **Order-Preserving Reporting**: Every submitted task carries a oneshot
//     reply channel. The driver awaits the replies in submission order, so
//     the reported sequence is identical to the sequential driver's even
//     when comparisons complete out of order.
// 3.  **Fail-Fast**: The first error ends the run, matching the sequential
//     policy. In-flight comparisons are simply dropped with the pool.

use crate::driver::PairwiseDriver;
use crate::error::CompareError;
use crate::pipeline::{ComparePipeline, PairResult};
use log::info;
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, oneshot};

/// One pair comparison queued into the pool.
struct PairTask {
    left: PathBuf,
    right: PathBuf,
    result_sender: oneshot::Sender<Result<PairResult, CompareError>>,
}

/// A pool of worker tasks that execute pair comparisons.
pub struct ComparisonPool {
    task_sender: mpsc::UnboundedSender<PairTask>,
}

impl ComparisonPool {
    /// A pool sized to the machine's logical CPU count.
    pub fn new(pipeline: ComparePipeline) -> Self {
        Self::with_workers(pipeline, num_cpus::get().max(1))
    }

    pub fn with_workers(pipeline: ComparePipeline, worker_count: usize) -> Self {
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<PairTask>();

        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<PairTask>())
            .unzip();

        // Dispatcher: deal tasks to workers round-robin.
        tokio::spawn(async move {
            let mut worker_index = 0;
            while let Some(task) = task_receiver.recv().await {
                let _ = worker_senders[worker_index].send(task);
                worker_index = (worker_index + 1) % worker_count;
            }
        });

        for mut worker_receiver in worker_receivers {
            let worker_pipeline = pipeline.clone();
            tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    let outcome = worker_pipeline
                        .compare_files(&task.left, &task.right)
                        .await;
                    let _ = task.result_sender.send(outcome);
                }
            });
        }

        Self { task_sender }
    }

    /// Queues one pair and returns the channel its result will arrive on.
    pub fn submit(
        &self,
        left: PathBuf,
        right: PathBuf,
    ) -> Result<oneshot::Receiver<Result<PairResult, CompareError>>, CompareError> {
        let (result_sender, result_receiver) = oneshot::channel();
        self.task_sender
            .send(PairTask {
                left,
                right,
                result_sender,
            })
            .map_err(|_| CompareError::WorkerPool)?;
        Ok(result_receiver)
    }
}

/// Drop-in replacement for `PairwiseDriver::run_directory` that fans pair
/// comparisons out across a worker pool while preserving reported order.
pub struct ParallelDriver {
    pipeline: ComparePipeline,
}

impl ParallelDriver {
    pub fn new(pipeline: ComparePipeline) -> Self {
        Self { pipeline }
    }

    pub async fn run_directory<F>(&self, dir: &Path, mut report: F) -> Result<(), CompareError>
    where
        F: FnMut(&PairResult),
    {
        let files = PairwiseDriver::list_images(dir).await?;
        let pairs = PairwiseDriver::pairs(&files);
        info!(
            "{} files in {:?}, {} pairs across worker pool",
            files.len(),
            dir,
            pairs.len()
        );

        let pool = ComparisonPool::new(self.pipeline.clone());
        let mut pending = Vec::with_capacity(pairs.len());
        for (left, right) in pairs {
            pending.push(pool.submit(left, right)?);
        }

        for receiver in pending {
            let result = receiver.await.map_err(|_| CompareError::WorkerPool)??;
            report(&result);
        }
        Ok(())
    }
}
