use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::state::{lock_recorder, lock_state, Recorder};
use crate::{Filter, Warning};

/// Saves the filter stack and the active recorder, and restores both when dropped.
///
/// With recording enabled, every warning shown while the guard is alive is
/// collected instead of being logged, in emission order.
#[must_use = "warnings are only caught while the guard is alive"]
pub struct CatchWarnings {
    saved_filters: Vec<Filter>,
    saved_recorder: Option<Recorder>,
    recorder: Option<Recorder>,
}

pub fn catch_warnings(record: bool) -> CatchWarnings {
    let mut state = lock_state();
    let saved_filters = state.filters.clone();
    let saved_recorder = state.recorder.clone();
    state.filters_mutated();

    let recorder = record.then(|| Arc::new(Mutex::new(Vec::new())));
    if let Some(recorder) = &recorder {
        state.recorder = Some(Arc::clone(recorder));
    }
    trace!("Catching warnings (record: {record}).");

    CatchWarnings {
        saved_filters,
        saved_recorder,
        recorder,
    }
}

impl CatchWarnings {
    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// The warnings recorded so far. Empty when not recording.
    pub fn recorded(&self) -> Vec<Warning> {
        self.recorder.as_ref()
            .map(|recorder| lock_recorder(recorder).clone())
            .unwrap_or_default()
    }
}

impl Drop for CatchWarnings {
    fn drop(&mut self) {
        let mut state = lock_state();
        state.filters = std::mem::take(&mut self.saved_filters);
        state.recorder = self.saved_recorder.take();
        state.filters_mutated();
        trace!("Restored warning filters and recorder.");
    }
}
