// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Scheduler, TaskKey};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn counting_task(
    counter: &Arc<AtomicUsize>,
    delay: Duration,
) -> impl Future<Output = ()> + Send + use<> {
    let counter: Arc<AtomicUsize> = Arc::clone(counter);
    async move {
        tokio::time::sleep(delay).await;
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test(start_paused = true)]
async fn test_task_runs_when_not_cancelled() {
    let scheduler: Scheduler = Scheduler::new();
    let counter: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let key: TaskKey = TaskKey::OrderAdvance(String::from("o1"));

    scheduler.schedule(key.clone(), counting_task(&counter, Duration::from_secs(5)));
    assert!(scheduler.is_scheduled(&key));

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(scheduler.pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_rescheduling_replaces_the_previous_task() {
    let scheduler: Scheduler = Scheduler::new();
    let counter: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let key: TaskKey = TaskKey::BillVerification(String::from("b1"));

    scheduler.schedule(key.clone(), counting_task(&counter, Duration::from_secs(5)));
    scheduler.schedule(key, counting_task(&counter, Duration::from_secs(5)));

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_prevents_the_task() {
    let scheduler: Scheduler = Scheduler::new();
    let counter: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let key: TaskKey = TaskKey::OrderAdvance(String::from("o2"));

    scheduler.schedule(key.clone(), counting_task(&counter, Duration::from_secs(5)));
    assert!(scheduler.cancel(&key));
    assert!(!scheduler.cancel(&key));

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_scheduler_aborts_everything() {
    let counter: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    {
        let scheduler: Scheduler = Scheduler::new();
        for id in ["o1", "o2", "o3"] {
            scheduler.schedule(
                TaskKey::OrderAdvance(id.to_string()),
                counting_task(&counter, Duration::from_secs(5)),
            );
        }
        assert_eq!(scheduler.pending(), 3);
    }

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}
