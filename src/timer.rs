//! Cancellable scheduled tasks.
//!
//! A [`ScheduledTask`] sends an event into a channel after a delay, once or
//! repeatedly. Dropping the task aborts it, so whoever owns the task owns
//! its lifetime. Events carry the task's [`TaskId`] because an event may
//! already be queued when the task is cancelled; receivers compare ids to
//! discard those.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Hands out unique task ids.
#[derive(Debug, Default)]
pub struct TaskIds {
    next: u64,
}

impl TaskIds {
    pub fn next_id(&mut self) -> TaskId {
        self.next += 1;
        TaskId(self.next)
    }
}

#[derive(Debug)]
pub struct ScheduledTask {
    id: TaskId,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Send `event` once after `delay`.
    pub fn once<E>(id: TaskId, delay: Duration, tx: UnboundedSender<E>, event: E) -> Self
    where
        E: Send + 'static,
    {
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(event);
        });
        Self { id, handle }
    }

    /// Send `event` every `period`, starting one period from now.
    pub fn repeating<E>(id: TaskId, period: Duration, tx: UnboundedSender<E>, event: E) -> Self
    where
        E: Clone + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(event.clone()).is_err() {
                    break;
                }
            }
        });
        Self { id, handle }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
