//! Background execution of a strategy.
//!
//! A [`SearchHandle`] owns the thread a strategy runs on together with its
//! cancellation flag. Whether a search is in progress is a property of the
//! handle, so several searches can run side by side without sharing any
//! state.

use crate::error::{Result, SearchError};
use crate::ga::{GaConfig, GaResult, GaRunner};
use crate::local::{LocalSearchConfig, LocalSearchResult, LocalSearchRunner};
use crate::oracle::FitnessOracle;
use crate::sa::{SaConfig, SaResult, SaRunner};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// A strategy running on its own thread.
///
/// ```
/// use u_pathsearch::handle::SearchHandle;
/// use u_pathsearch::local::LocalSearchConfig;
/// use u_pathsearch::model::{Action, Solution};
/// use u_pathsearch::OracleError;
///
/// let oracle = |s: &Solution| -> Result<f64, OracleError> {
///     Ok(s.iter().filter(|a| **a != Action::UP).count() as f64)
/// };
/// let config = LocalSearchConfig::default().with_seed(7);
/// let handle = SearchHandle::local_search(oracle, config).unwrap();
/// let result = handle.join().unwrap();
/// assert!(result.best_score <= 6.0);
/// ```
pub struct SearchHandle<T> {
    thread: JoinHandle<Result<T>>,
    cancel: Arc<AtomicBool>,
}

impl<T: Send + 'static> SearchHandle<T> {
    /// Starts `search` on a new thread.
    ///
    /// The closure receives the cancellation flag it should poll between
    /// iterations; all runners accept it through `run_with_cancel`.
    ///
    /// # Errors
    /// [`SearchError::Spawn`] when the OS refuses to create the thread.
    pub fn spawn<F>(search: F) -> Result<Self>
    where
        F: FnOnce(Arc<AtomicBool>) -> Result<T> + Send + 'static,
    {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let thread = thread::Builder::new()
            .name("pathsearch".into())
            .spawn(move || search(flag))
            .map_err(|e| SearchError::Spawn(e.to_string()))?;
        debug!("Search thread started");
        Ok(Self { thread, cancel })
    }

    /// Whether the strategy has not returned yet.
    pub fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }

    /// Asks the strategy to stop after its current oracle call.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Waits for the strategy and returns its result.
    ///
    /// # Errors
    /// The strategy's own error, or [`SearchError::Panicked`].
    pub fn join(self) -> Result<T> {
        match self.thread.join() {
            Ok(result) => result,
            Err(_) => Err(SearchError::Panicked),
        }
    }
}

impl SearchHandle<LocalSearchResult> {
    /// Runs [`LocalSearchRunner`] in the background.
    pub fn local_search<O>(mut oracle: O, config: LocalSearchConfig) -> Result<Self>
    where
        O: FitnessOracle + Send + 'static,
    {
        Self::spawn(move |cancel| {
            LocalSearchRunner::run_with_cancel(&mut oracle, &config, Some(cancel))
        })
    }
}

impl SearchHandle<SaResult> {
    /// Runs [`SaRunner`] in the background.
    pub fn annealing<O>(mut oracle: O, config: SaConfig) -> Result<Self>
    where
        O: FitnessOracle + Send + 'static,
    {
        Self::spawn(move |cancel| SaRunner::run_with_cancel(&mut oracle, &config, Some(cancel)))
    }
}

impl SearchHandle<GaResult> {
    /// Runs [`GaRunner`] in the background.
    ///
    /// Unlike [`GaRunner::run`], an unbounded configuration is accepted:
    /// the handle's [`cancel`](SearchHandle::cancel) ends the run.
    pub fn genetic<O>(mut oracle: O, config: GaConfig) -> Result<Self>
    where
        O: FitnessOracle + Send + 'static,
    {
        Self::spawn(move |cancel| GaRunner::run_with_cancel(&mut oracle, &config, Some(cancel)))
    }
}
