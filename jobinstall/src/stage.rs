use async_trait::async_trait;
use std::{fmt, future::Future, time::Instant};
use tracing::{error, info};

/// A named unit of work whose progress is reported somewhere.
///
/// Implementations must drive `work` to completion exactly once and hand back
/// its result untouched.
#[async_trait]
pub trait Stage: Send + Sync {
    async fn perform<T, E, F>(&self, name: &str, work: F) -> Result<T, E>
    where
        T: Send,
        E: fmt::Display + Send,
        F: Future<Output = Result<T, E>> + Send;
}

/// Reports stages through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogStage;

#[async_trait]
impl Stage for LogStage {
    async fn perform<T, E, F>(&self, name: &str, work: F) -> Result<T, E>
    where
        T: Send,
        E: fmt::Display + Send,
        F: Future<Output = Result<T, E>> + Send,
    {
        info!("Started {}", name);
        let started = Instant::now();
        let result = work.await;
        let elapsed = started.elapsed();
        match &result {
            Ok(_) => info!(?elapsed, "Finished {}", name),
            Err(e) => error!(?elapsed, error = %e, "Failed {}", name),
        }
        result
    }
}

/// Runs work without reporting anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentStage;

#[async_trait]
impl Stage for SilentStage {
    async fn perform<T, E, F>(&self, _name: &str, work: F) -> Result<T, E>
    where
        T: Send,
        E: fmt::Display + Send,
        F: Future<Output = Result<T, E>> + Send,
    {
        work.await
    }
}
