use std::sync::atomic::{AtomicUsize, Ordering};

/// Execution-context collaborator for the training loop.
///
/// The epoch counter and this worker's task identity live outside the
/// training core and are reached only through this interface, so the loop
/// runs the same against a local counter or a cluster scheduler.
pub trait ExecContext {
    /// Current value of the epoch counter.
    fn iteration(&self) -> usize;

    /// Advances the epoch counter by one.
    fn inc_iteration(&self);

    /// This worker's task index within the job.
    fn task_index(&self) -> usize;

    /// Whether this worker is the designated parameter initializer.
    fn is_initializer(&self) -> bool {
        self.task_index() == 0
    }
}

/// Single-process execution context: a per-worker atomic epoch counter.
#[derive(Debug)]
pub struct LocalContext {
    task_index: usize,
    iteration: AtomicUsize,
}

impl LocalContext {
    pub fn new(task_index: usize) -> Self {
        Self {
            task_index,
            iteration: AtomicUsize::new(0),
        }
    }
}

impl ExecContext for LocalContext {
    fn iteration(&self) -> usize {
        self.iteration.load(Ordering::Acquire)
    }

    fn inc_iteration(&self) {
        self.iteration.fetch_add(1, Ordering::AcqRel);
    }

    fn task_index(&self) -> usize {
        self.task_index
    }
}
