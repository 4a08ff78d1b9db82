//! Deferred provider mutations.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;

use crate::error::Result;

type CorrectionFn = Box<dyn FnOnce() -> BoxFuture<'static, Result<()>> + Send>;

/// A described, not yet executed, change to live DNS state.
///
/// The action owns everything it needs (API handle, request payload) from the moment it is
/// built, so corrections created in a loop never share state. Running a correction
/// consumes it.
pub struct Correction {
    msg: String,
    action: CorrectionFn,
}

impl Correction {
    pub fn new<F, Fut>(msg: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            msg: msg.into(),
            action: Box::new(move || Box::pin(action())),
        }
    }

    /// Description shown in plan/preview output.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Performs the provider call.
    pub async fn run(self) -> Result<()> {
        (self.action)().await
    }
}

impl fmt::Debug for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Correction")
            .field("msg", &self.msg)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

/// Runs `corrections` one after another in the given order.
///
/// Stops at the first failure and returns its error; later corrections are dropped
/// unexecuted. Returns the number of corrections applied.
pub async fn apply_corrections(corrections: Vec<Correction>) -> Result<usize> {
    let total = corrections.len();
    for (i, correction) in corrections.into_iter().enumerate() {
        log::info!("[{}/{}] {}", i + 1, total, correction.msg());
        if let Err(e) = correction.run().await {
            if e.is_expected() {
                log::warn!("Correction {} of {total} failed: {e}", i + 1);
            } else {
                log::error!("Correction {} of {total} failed: {e}", i + 1);
            }
            return Err(e);
        }
    }
    Ok(total)
}
