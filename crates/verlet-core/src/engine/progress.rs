//! Best-effort progress reporting.
//!
//! The simulation emits [`Progress`] events through an optional callback; an
//! absent callback is a no-op. The callback receives plain values and returns
//! nothing, so a display collaborator can never alter simulation results.

#[derive(Debug, Clone)]
pub enum Progress {
    RunStart { total_steps: u64 },
    StepCompleted,
    RunFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
