//! Test-execution support for the courier HTTP client's test suite.
//!
//! * [`gate`] wraps test bodies with preconditions: runtime version, runtime
//!   family and network reachability. Unmet preconditions produce a
//!   [`SkipSignal`] instead of a failure.
//! * [`CatchAllWarnings`] runs a test body with deterministic, fully recorded
//!   warning emission and puts the process-wide warning state back afterwards.

use std::sync::Once;

use courier_util::logging::LoggingConfig;

pub mod failure;
pub mod fixtures;
pub mod gate;
pub mod outcome;
pub mod reachability;
pub mod runtime;
pub mod settings;

courier_util::build_info!();

pub use courier_warnings::testing::{isolate_warnings, setup_suite, suppress_category, CatchAllWarnings};
pub use failure::{MaxRetryError, NetworkFailure};
pub use gate::GateExt;
pub use outcome::{RunnableTest, SkipSignal, TestCase, TestOutcome};
pub use reachability::ReachabilityClassifier;
pub use runtime::{RuntimeEnvironment, RuntimeVersion};

static INIT_LOGGING: Once = Once::new();

/// Installs test-friendly logging once for all tests of a process.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let config = LoggingConfig { test_writer: true, ..Default::default() };
        if let Err(cause) = courier_util::logging::initialize_with_config(config) {
            tracing::debug!("Logging was not initialized for tests: {cause}");
        }
    });
}
