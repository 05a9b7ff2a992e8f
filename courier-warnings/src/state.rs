use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;

use crate::{Action, Category, Filter, RegistryKey, WarningModule};

pub(crate) type Recorder = Arc<Mutex<Vec<Warning>>>;

lazy_static! {
    static ref STATE: Mutex<WarningState> = Mutex::new(WarningState::new());
}

/// Process-wide warning state. Lives for the whole process, never torn down.
pub(crate) struct WarningState {
    pub(crate) filters: Vec<Filter>,
    filters_version: u64,
    once_registry: BTreeSet<(String, Category)>,
    pub(crate) recorder: Option<Recorder>,
}

impl WarningState {
    fn new() -> Self {
        Self {
            filters: Vec::new(),
            filters_version: 1,
            once_registry: BTreeSet::new(),
            recorder: None,
        }
    }

    /// Invalidates every module registry filled under the previous filter stack.
    pub(crate) fn filters_mutated(&mut self) {
        self.filters_version += 1;
    }

    fn action_for(&self, category: &Category) -> Action {
        self.filters.iter()
            .find(|filter| filter.matches(category))
            .map(|filter| filter.action)
            .unwrap_or(Action::Default)
    }

    fn add_filter(&mut self, filter: Filter, append: bool) {
        if append {
            if !self.filters.contains(&filter) {
                self.filters.push(filter);
            }
        } else {
            self.filters.retain(|existing| existing != &filter);
            self.filters.insert(0, filter);
        }
        self.filters_mutated();
    }
}

pub(crate) fn lock_state() -> MutexGuard<'static, WarningState> {
    STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn lock_recorder(recorder: &Recorder) -> MutexGuard<'_, Vec<Warning>> {
    recorder.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl From<&'static std::panic::Location<'static>> for Location {
    fn from(location: &'static std::panic::Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// A single emitted warning, as shown or recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    pub category: Category,
    pub message: String,
    pub module: String,
    pub location: Location,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}: {}", self.location.file, self.location.line, self.category, self.message)
    }
}

/// Emits a warning from `module`, located at the caller.
#[track_caller]
pub fn warn(module: &WarningModule, category: Category, message: impl Into<String>) {
    let location = Location::from(std::panic::Location::caller());
    emit(module, Warning {
        category,
        message: message.into(),
        module: module.name().to_owned(),
        location,
    });
}

fn emit(module: &WarningModule, warning: Warning) {
    let mut state = lock_state();
    let action = state.action_for(&warning.category);
    let version = state.filters_version;
    let key = RegistryKey::new(warning.message.clone(), warning.category, warning.location.line);

    let once_registry = &mut state.once_registry;
    let show = module.with_registry(|slot| {
        let registry = slot.get_or_insert_with(Default::default);
        registry.ensure_version(version);

        if registry.note_repeat(&key) {
            return false;
        }

        match action {
            Action::Always => true,
            Action::Default => {
                registry.mark(key);
                true
            }
            Action::Ignore => {
                registry.mark(key);
                false
            }
            Action::Module => {
                let module_key = key.without_line();
                registry.mark(key);
                if registry.note_repeat(&module_key) {
                    false
                } else {
                    registry.mark(module_key);
                    true
                }
            }
            Action::Once => {
                registry.mark(key);
                once_registry.insert((warning.message.clone(), warning.category))
            }
        }
    });

    if show {
        show_warning(&state, warning);
    }
}

fn show_warning(state: &WarningState, warning: Warning) {
    match &state.recorder {
        Some(recorder) => lock_recorder(recorder).push(warning),
        None => tracing::warn!(
            category = %warning.category,
            module = %warning.module,
            file = warning.location.file,
            line = warning.location.line,
            "{}", warning.message
        ),
    }
}

/// Inserts a filter at the front of the stack, replacing an identical one.
pub fn simple_filter(action: Action, category: Category) {
    lock_state().add_filter(Filter::new(action, category), false);
}

/// Adds a filter at the back of the stack unless an identical one exists.
pub fn append_filter(action: Action, category: Category) {
    lock_state().add_filter(Filter::new(action, category), true);
}

/// Keeps only the filters for which `keep` returns true.
pub fn retain_filters(keep: impl FnMut(&Filter) -> bool) {
    let mut state = lock_state();
    state.filters.retain(keep);
    state.filters_mutated();
}

pub fn reset_filters() {
    let mut state = lock_state();
    state.filters.clear();
    state.filters_mutated();
}

/// A copy of the current filter stack, front first.
pub fn filters() -> Vec<Filter> {
    lock_state().filters.clone()
}
