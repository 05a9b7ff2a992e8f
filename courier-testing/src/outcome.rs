use tracing::info;

/// Signals that a test's precondition was not met.
///
/// Neither a pass nor a failure: the test was not conclusively run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Skipped: {reason}")]
pub struct SkipSignal {
    reason: String,
}

impl SkipSignal {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Result of running a possibly gated test.
#[derive(Debug)]
pub enum TestOutcome<T, E> {
    Ran(T),
    Failed(E),
    Skipped(SkipSignal),
}

impl<T, E> TestOutcome<T, E> {
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => TestOutcome::Ran(value),
            Err(error) => TestOutcome::Failed(error),
        }
    }

    pub fn is_ran(&self) -> bool {
        matches!(self, TestOutcome::Ran(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TestOutcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TestOutcome::Skipped(_))
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            TestOutcome::Skipped(skip) => Some(skip.reason()),
            TestOutcome::Ran(_) | TestOutcome::Failed(_) => None,
        }
    }

    /// Maps the outcome onto a `#[test]` return value.
    ///
    /// The test harness knows no skips, so a skip is logged and reported as
    /// `Ok(None)`. Failures stay errors.
    pub fn into_result(self) -> Result<Option<T>, E> {
        match self {
            TestOutcome::Ran(value) => Ok(Some(value)),
            TestOutcome::Failed(error) => Err(error),
            TestOutcome::Skipped(skip) => {
                info!("Test skipped, reported as passed. {skip}");
                Ok(None)
            }
        }
    }
}

/// A test that can be run once, reporting under its name.
pub trait RunnableTest {
    type Output;
    type Error;

    fn name(&self) -> &str;

    fn run(self) -> TestOutcome<Self::Output, Self::Error>;
}

/// A bare test body together with the name it is reported under.
pub struct TestCase<F> {
    name: String,
    body: F,
}

impl<F> TestCase<F> {
    pub fn new(name: impl Into<String>, body: F) -> Self {
        Self { name: name.into(), body }
    }
}

impl<F, T, E> RunnableTest for TestCase<F>
where
    F: FnOnce() -> Result<T, E>,
{
    type Output = T;
    type Error = E;

    fn name(&self) -> &str {
        &self.name
    }

    fn run(self) -> TestOutcome<T, E> {
        TestOutcome::from_result((self.body)())
    }
}
