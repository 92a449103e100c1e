//! Cooperative deferred-task queue.
//!
//! Asynchronous operations (`trigger`, the second half of `stick`, replay of
//! sticky events) never run inside the call that requested them. They are
//! queued here and run, in scheduling order, when the owner calls
//! [`Scheduler::run_pending`].
//!
//! ```rust,ignore
//! let scheduler = Scheduler::new();
//! scheduler.schedule("greet", || {
//!     println!("later");
//!     Ok(())
//! });
//! assert_eq!(scheduler.run_pending(), 1);
//! ```

use parking_lot::Mutex;
use razor_core::BoxError;
use std::{collections::VecDeque, fmt, sync::Arc};
use tracing::{error, trace};

type Task = Box<dyn FnOnce() -> Result<(), BoxError> + Send>;

struct ScheduledTask {
    label: &'static str,
    task: Task,
}

/// A FIFO queue of deferred tasks shared by cheap clones.
#[derive(Clone, Default)]
pub struct Scheduler {
    queue: Arc<Mutex<VecDeque<ScheduledTask>>>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task. `label` names the task in logs.
    pub fn schedule<F>(&self, label: &'static str, task: F)
    where
        F: FnOnce() -> Result<(), BoxError> + Send + 'static,
    {
        self.queue.lock().push_back(ScheduledTask {
            label,
            task: Box::new(task),
        });
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Returns `true` when nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Run queued tasks until the queue is empty, returning how many ran.
    ///
    /// Tasks queued by running tasks are run in the same pass. A failing task
    /// is logged and does not prevent the following ones from running.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.queue.lock().pop_front();
            let Some(ScheduledTask { label, task }) = next else {
                break;
            };
            ran += 1;
            trace!(task = label, "running scheduled task");
            if let Err(err) = task() {
                error!(task = label, error = %err, "scheduled task failed");
            }
        }
        ran
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
