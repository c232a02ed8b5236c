// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cancellable background tasks keyed by the entity they act on.
//!
//! Scheduling under a key that already has a task aborts the old one.
//! Dropping the scheduler aborts everything it still holds.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::debug;

/// What a scheduled task is for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskKey {
    /// Automatic status progression for an order id.
    OrderAdvance(String),
    /// Delayed verification for a bill id.
    BillVerification(String),
}

impl std::fmt::Display for TaskKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderAdvance(id) => write!(f, "order-advance:{id}"),
            Self::BillVerification(id) => write!(f, "bill-verification:{id}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Mutex<HashMap<TaskKey, JoinHandle<()>>>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tasks(&self) -> MutexGuard<'_, HashMap<TaskKey, JoinHandle<()>>> {
        match self.tasks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Spawns `task` under `key`, aborting any task already held for it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&self, key: TaskKey, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle: JoinHandle<()> = tokio::spawn(task);
        let mut tasks = self.tasks();
        tasks.retain(|_, existing| !existing.is_finished());
        if let Some(previous) = tasks.insert(key.clone(), handle) {
            debug!(%key, "Replacing scheduled task");
            previous.abort();
        }
    }

    /// Aborts the task held for `key`. Returns false if there was none.
    pub fn cancel(&self, key: &TaskKey) -> bool {
        self.tasks().remove(key).is_some_and(|handle| {
            let running: bool = !handle.is_finished();
            handle.abort();
            if running {
                debug!(%key, "Cancelled scheduled task");
            }
            running
        })
    }

    /// Aborts every held task and returns how many were still running.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<JoinHandle<()>> = self.tasks().drain().map(|(_, h)| h).collect();
        let running: usize = drained.iter().filter(|h| !h.is_finished()).count();
        for handle in drained {
            handle.abort();
        }
        running
    }

    #[must_use]
    pub fn is_scheduled(&self, key: &TaskKey) -> bool {
        self.tasks().get(key).is_some_and(|h| !h.is_finished())
    }

    /// Number of tasks that have not yet finished.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks().values().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
