//! Isolation of warning state for tests.
//!
//! Warnings are deduplicated per module for the lifetime of the process, so a
//! warning emitted by one test would otherwise be suppressed in the next.
//! [`CatchAllWarnings`] resets the relevant registries and shows every
//! occurrence for the duration of a test body, then puts everything back.

use std::sync::Once;

use tracing::{debug, warn};

use crate::category::{HTTP_WARNING, WARNING};
use crate::module::WeakWarningModule;
use crate::{catch_warnings, retain_filters, simple_filter, Action, Category, CatchWarnings, Registry, Warning, WarningModule};

/// Records every warning and isolates the dedup registries of the tracked modules.
///
/// On entry each tracked module's registry is copied aside and cleared, the
/// filter stack is saved and an `always` rule is pushed in front of it. On drop
/// the filter stack and recorder are restored first, then every tracked
/// module gets back exactly the registry it had at entry. Restoration happens
/// on every exit path, including unwinding. A module passed more than once
/// is tracked once.
///
/// Not meant to be nested with itself; the underlying state is process-wide.
#[must_use = "warnings are only isolated while the scope is alive"]
pub struct CatchAllWarnings {
    tracked: Vec<TrackedModule>,
    inner: Option<CatchWarnings>,
}

struct TrackedModule {
    module: WeakWarningModule,
    snapshot: Option<Registry>,
}

impl CatchAllWarnings {
    pub fn enter<'a>(modules: impl IntoIterator<Item = &'a WarningModule>) -> Self {
        let mut unique: Vec<&WarningModule> = Vec::new();
        for module in modules {
            if !unique.contains(&module) {
                unique.push(module);
            }
        }

        let tracked = unique.into_iter()
            .map(|module| TrackedModule {
                snapshot: module.with_registry(|slot| {
                    slot.as_mut().map(|registry| {
                        let snapshot = registry.clone();
                        registry.clear();
                        snapshot
                    })
                }),
                module: module.downgrade(),
            })
            .collect::<Vec<_>>();

        let inner = catch_warnings(true);
        simple_filter(Action::Always, WARNING);

        debug!("Isolating warnings for {} module(s).", tracked.len());

        Self {
            tracked,
            inner: Some(inner),
        }
    }

    /// Warnings emitted since entry, in emission order, without deduplication.
    pub fn recorded(&self) -> Vec<Warning> {
        self.inner.as_ref()
            .map(CatchWarnings::recorded)
            .unwrap_or_default()
    }
}

impl Drop for CatchAllWarnings {
    fn drop(&mut self) {
        drop(self.inner.take());

        for tracked in self.tracked.drain(..) {
            match tracked.module.upgrade() {
                Some(module) => module.with_registry(|slot| {
                    if let Some(live) = slot.as_mut() {
                        live.clear();
                    }
                    *slot = tracked.snapshot;
                }),
                None => warn!("Module '{}' went away while its warnings were isolated. Skipping restoration of its registry.", tracked.module.name()),
            }
        }

        debug!("Restored isolated warning state.");
    }
}

/// Runs `body` inside a [`CatchAllWarnings`] scope for `modules`.
pub fn isolate_warnings<'a, R>(
    modules: impl IntoIterator<Item = &'a WarningModule>,
    body: impl FnOnce(&CatchAllWarnings) -> R,
) -> R {
    let scope = CatchAllWarnings::enter(modules);
    body(&scope)
}

/// Removes every filter for `category` or its descendants and installs a single `ignore` rule for it.
pub fn suppress_category(category: Category) {
    retain_filters(|filter| !filter.category.is_subcategory_of(&category));
    simple_filter(Action::Ignore, category);
    debug!("Suppressing warnings of category {category}.");
}

/// Suite setup: silence the HTTP client's own warnings unless a test opts in.
///
/// Applied at most once per process.
pub fn setup_suite() {
    static SETUP: Once = Once::new();
    SETUP.call_once(|| suppress_category(HTTP_WARNING));
}
