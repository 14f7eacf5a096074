// src/processing/executor.rs

//! Bounded fan-out executor for file tasks.
//!
//! Every task is spawned up front, but each one must hold a semaphore permit
//! while it decodes, resizes, encodes and writes, so at most `worker_count`
//! images are in memory at once. Codec work runs inside
//! `tokio::task::spawn_blocking` so the async runtime is never blocked.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::core::{FileOutcome, FileTask, TransformProfile};
use crate::processing::{ImageBackend, render};
use crate::utils::{ConvertError, ConvertResult, write_atomic};

// A panicking codec is only turned into a per-file failure when panics unwind
#[cfg(not(panic = "unwind"))]
compile_error!("webp-batch must be built with panic = \"unwind\"");

/// Runs file tasks against one backend with a fixed concurrency bound.
pub struct BatchExecutor<B: ImageBackend> {
    backend: Arc<B>,
    semaphore: Arc<Semaphore>,
    active_workers: Arc<AtomicUsize>,
    worker_count: usize,
}

impl<B: ImageBackend> BatchExecutor<B> {
    pub fn new(backend: Arc<B>, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        Self {
            backend,
            semaphore: Arc::new(Semaphore::new(worker_count)),
            active_workers: Arc::new(AtomicUsize::new(0)),
            worker_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Launches every task and waits for all of them to settle.
    ///
    /// Failures are logged and recorded per file; one failing file never
    /// cancels its siblings. Returns one outcome per task.
    pub async fn execute_batch(
        &self,
        tasks: Vec<FileTask>,
        profile: TransformProfile,
    ) -> Vec<FileOutcome> {
        debug!(
            "Dispatching {} tasks to {} with {} workers",
            tasks.len(),
            self.backend.name(),
            self.worker_count
        );

        let handles: Vec<_> = tasks
            .into_iter()
            .map(|task| {
                let worker = Worker {
                    backend: Arc::clone(&self.backend),
                    semaphore: Arc::clone(&self.semaphore),
                    active_workers: Arc::clone(&self.active_workers),
                    worker_count: self.worker_count,
                };
                let handle = tokio::spawn(worker.run(task.clone(), profile));
                (task, handle)
            })
            .collect();

        // Join-all barrier: every handle is awaited regardless of earlier failures
        let mut outcomes = Vec::with_capacity(handles.len());
        for (task, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let err = ConvertError::worker(format!("Task aborted: {e}"));
                    error!("Error processing {}: {}", task.source_name(), err);
                    task.failed(&err)
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// Per-task handle on the shared executor state.
struct Worker<B: ImageBackend> {
    backend: Arc<B>,
    semaphore: Arc<Semaphore>,
    active_workers: Arc<AtomicUsize>,
    worker_count: usize,
}

impl<B: ImageBackend> Worker<B> {
    async fn run(self, task: FileTask, profile: TransformProfile) -> FileOutcome {
        match self.process(&task, profile).await {
            Ok(size) => {
                info!(
                    "{}: {} -> {}",
                    profile.success_verb(),
                    task.source_name(),
                    task.output_name()
                );
                task.succeeded(size)
            }
            Err(e) => {
                error!("Error processing {}: {}", task.source_name(), e);
                task.failed(&e)
            }
        }
    }

    async fn process(&self, task: &FileTask, profile: TransformProfile) -> ConvertResult<u64> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| ConvertError::worker(format!("Failed to acquire worker: {e}")))?;

        let active = self.active_workers.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Worker started - Active: {}/{}, Task: {}",
            active,
            self.worker_count,
            task.source_name()
        );

        let result = self.transform_and_write(task, profile).await;

        let active = self.active_workers.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!("Worker finished - Active: {}/{}", active, self.worker_count);

        result
    }

    async fn transform_and_write(&self, task: &FileTask, profile: TransformProfile) -> ConvertResult<u64> {
        let backend = Arc::clone(&self.backend);
        let source = task.source_path.clone();

        let bytes = tokio::task::spawn_blocking(move || render(&*backend, &source, &profile))
            .await
            .map_err(|e| ConvertError::worker(format!("Task panicked: {e}")))??;

        write_atomic(&task.output_path, &bytes).await?;
        Ok(bytes.len() as u64)
    }
}
