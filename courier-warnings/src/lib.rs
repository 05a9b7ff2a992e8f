//! Process-wide warning emission for courier.
//!
//! Client code emits non-fatal diagnostics through [`warn`]. What happens to an
//! emitted warning is decided by the global filter stack and by the dedup
//! registry of the [`WarningModule`] it originates from.

pub mod category;
pub mod filter;
pub mod module;
pub mod registry;

mod catch;
mod state;

#[cfg(feature = "testing")]
pub mod testing;

pub use catch::{catch_warnings, CatchWarnings};
pub use category::Category;
pub use filter::{Action, Filter};
pub use module::WarningModule;
pub use registry::{Registry, RegistryKey};
pub use state::{append_filter, filters, reset_filters, retain_filters, simple_filter, warn, Location, Warning};
