use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::Registry;

/// A named origin of warnings, owning its dedup registry.
///
/// Clones share the same registry. The registry is absent until the first
/// warning is emitted from this module.
#[derive(Clone)]
pub struct WarningModule {
    inner: Arc<ModuleInner>,
}

struct ModuleInner {
    name: String,
    registry: Mutex<Option<Registry>>,
}

impl WarningModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ModuleInner {
                name: name.into(),
                registry: Mutex::new(None),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// A copy of the current dedup registry.
    pub fn registry(&self) -> Option<Registry> {
        self.lock_registry().clone()
    }

    pub fn has_registry(&self) -> bool {
        self.lock_registry().is_some()
    }

    pub(crate) fn with_registry<R>(&self, f: impl FnOnce(&mut Option<Registry>) -> R) -> R {
        f(&mut self.lock_registry())
    }

    #[cfg_attr(not(feature = "testing"), allow(dead_code))]
    pub(crate) fn downgrade(&self) -> WeakWarningModule {
        WeakWarningModule {
            name: self.inner.name.clone(),
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn lock_registry(&self) -> MutexGuard<'_, Option<Registry>> {
        self.inner.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for WarningModule {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for WarningModule {}

impl fmt::Debug for WarningModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarningModule")
            .field("name", &self.inner.name)
            .finish()
    }
}

#[cfg_attr(not(feature = "testing"), allow(dead_code))]
pub(crate) struct WeakWarningModule {
    name: String,
    inner: Weak<ModuleInner>,
}

#[cfg_attr(not(feature = "testing"), allow(dead_code))]
impl WeakWarningModule {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn upgrade(&self) -> Option<WarningModule> {
        self.inner.upgrade().map(|inner| WarningModule { inner })
    }
}
