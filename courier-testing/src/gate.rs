//! Preconditions wrapped around a [`RunnableTest`].
//!
//! Version and family gates decide before the body runs. The network gate
//! cannot know ahead of time, so it runs the body and turns the first failure
//! caused by an unreachable network into a skip. Gated tests keep the name of
//! the test they wrap, so gates can be stacked.

use tracing::debug;

use crate::settings;
use crate::{NetworkFailure, ReachabilityClassifier, RunnableTest, RuntimeEnvironment, RuntimeVersion, SkipSignal, TestOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionRequirement {
    /// Runs only on versions strictly older than the threshold.
    Below(RuntimeVersion),
    /// Runs only on the threshold or newer.
    AtLeast(RuntimeVersion),
}

impl VersionRequirement {
    pub fn is_satisfied_by(&self, running: &RuntimeVersion) -> bool {
        match self {
            VersionRequirement::Below(threshold) => running < threshold,
            VersionRequirement::AtLeast(threshold) => running >= threshold,
        }
    }

    fn skip_reason(&self, name: &str) -> String {
        match self {
            VersionRequirement::Below(threshold) => format!("{name} only runs on runtime versions older than {threshold}"),
            VersionRequirement::AtLeast(threshold) => format!("{name} requires runtime version {threshold} or newer to run"),
        }
    }
}

pub struct VersionGated<R> {
    inner: R,
    requirement: VersionRequirement,
    running: RuntimeVersion,
}

impl<R: RunnableTest> RunnableTest for VersionGated<R> {
    type Output = R::Output;
    type Error = R::Error;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(self) -> TestOutcome<R::Output, R::Error> {
        if self.requirement.is_satisfied_by(&self.running) {
            self.inner.run()
        } else {
            let reason = self.requirement.skip_reason(self.inner.name());
            debug!("Not running test on runtime version {}: {reason}", self.running);
            TestOutcome::Skipped(SkipSignal::new(reason))
        }
    }
}

pub struct FamilyGated<R> {
    inner: R,
    major: u64,
    member: bool,
}

impl<R: RunnableTest> RunnableTest for FamilyGated<R> {
    type Output = R::Output;
    type Error = R::Error;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(self) -> TestOutcome<R::Output, R::Error> {
        if self.member {
            self.inner.run()
        } else {
            let reason = format!("{} requires runtime version {}.x to run", self.inner.name(), self.major);
            debug!("{reason}");
            TestOutcome::Skipped(SkipSignal::new(reason))
        }
    }
}

pub struct NetworkGated<R> {
    inner: R,
    classifier: ReachabilityClassifier,
}

impl<R> RunnableTest for NetworkGated<R>
where
    R: RunnableTest,
    R::Error: NetworkFailure,
{
    type Output = R::Output;
    type Error = R::Error;

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(self) -> TestOutcome<R::Output, R::Error> {
        let name = self.inner.name().to_owned();
        match self.inner.run() {
            TestOutcome::Failed(failure) if self.classifier.is_unreachable_failure(&failure) => {
                debug!(
                    "Test {name} failed with an unreachable network (code: {:?}).",
                    failure.io_cause().and_then(std::io::Error::raw_os_error),
                );
                TestOutcome::Skipped(SkipSignal::new(format!("Can't run {name} because the network is unreachable")))
            }
            outcome => outcome,
        }
    }
}

/// Skips `test` unless the running version is older than `threshold`.
pub fn only_below<R: RunnableTest>(threshold: RuntimeVersion, environment: &RuntimeEnvironment, test: R) -> VersionGated<R> {
    VersionGated {
        inner: test,
        requirement: VersionRequirement::Below(threshold),
        running: environment.version(),
    }
}

/// Skips `test` unless the running version is `threshold` or newer.
pub fn at_least<R: RunnableTest>(threshold: RuntimeVersion, environment: &RuntimeEnvironment, test: R) -> VersionGated<R> {
    VersionGated {
        inner: test,
        requirement: VersionRequirement::AtLeast(threshold),
        running: environment.version(),
    }
}

/// Skips `test` unless the environment belongs to the `major` version family.
pub fn only_family<R: RunnableTest>(major: u64, environment: &RuntimeEnvironment, test: R) -> FamilyGated<R> {
    FamilyGated {
        inner: test,
        major,
        member: environment.belongs_to_family(major),
    }
}

/// Skips `test` when it fails because the network is unreachable.
///
/// Unreachable codes come from the testing settings, see [`settings::configured_classifier`].
pub fn requires_network<R: RunnableTest>(test: R) -> NetworkGated<R> {
    requires_network_with(settings::configured_classifier(), test)
}

pub fn requires_network_with<R: RunnableTest>(classifier: ReachabilityClassifier, test: R) -> NetworkGated<R> {
    NetworkGated {
        inner: test,
        classifier,
    }
}

/// Method-style access to the gates, for chaining.
pub trait GateExt: RunnableTest + Sized {
    fn only_below(self, threshold: RuntimeVersion, environment: &RuntimeEnvironment) -> VersionGated<Self> {
        only_below(threshold, environment, self)
    }

    fn at_least(self, threshold: RuntimeVersion, environment: &RuntimeEnvironment) -> VersionGated<Self> {
        at_least(threshold, environment, self)
    }

    fn only_family(self, major: u64, environment: &RuntimeEnvironment) -> FamilyGated<Self> {
        only_family(major, environment, self)
    }

    fn requires_network(self) -> NetworkGated<Self> {
        requires_network(self)
    }

    fn requires_network_with(self, classifier: ReachabilityClassifier) -> NetworkGated<Self> {
        requires_network_with(classifier, self)
    }
}

impl<R: RunnableTest> GateExt for R {}
