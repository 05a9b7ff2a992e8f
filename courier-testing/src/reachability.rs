use std::collections::BTreeSet;
use std::io;

use crate::NetworkFailure;

/// Decides from an OS error code whether the network is unreachable.
///
/// Only the recognized codes count as unreachable. Any other code, or a
/// missing one, is a genuine failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachabilityClassifier {
    codes: BTreeSet<i32>,
}

impl Default for ReachabilityClassifier {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl ReachabilityClassifier {
    /// "Network unreachable" and "host unreachable" of the current platform.
    pub fn platform_default() -> Self {
        Self::with_codes(platform_codes())
    }

    pub fn with_codes(codes: impl IntoIterator<Item = i32>) -> Self {
        Self { codes: codes.into_iter().collect() }
    }

    pub fn with_additional_code(mut self, code: i32) -> Self {
        self.codes.insert(code);
        self
    }

    pub fn codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.codes.iter().copied()
    }

    pub fn is_unreachable_code(&self, code: Option<i32>) -> bool {
        code.is_some_and(|code| self.codes.contains(&code))
    }

    pub fn is_unreachable(&self, error: &io::Error) -> bool {
        self.is_unreachable_code(error.raw_os_error())
    }

    pub fn is_unreachable_failure<F: NetworkFailure + ?Sized>(&self, failure: &F) -> bool {
        failure.io_cause()
            .is_some_and(|cause| self.is_unreachable(cause))
    }
}

/// Classifies with the platform's default codes.
pub fn is_unreachable(error: &io::Error) -> bool {
    ReachabilityClassifier::platform_default().is_unreachable(error)
}

#[cfg(unix)]
fn platform_codes() -> Vec<i32> {
    use nix::errno::Errno;
    vec![Errno::ENETUNREACH as i32, Errno::EHOSTUNREACH as i32]
}

#[cfg(windows)]
fn platform_codes() -> Vec<i32> {
    const WSAENETUNREACH: i32 = 10051;
    const WSAEHOSTUNREACH: i32 = 10065;
    vec![WSAENETUNREACH, WSAEHOSTUNREACH]
}

#[cfg(not(any(unix, windows)))]
fn platform_codes() -> Vec<i32> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::MaxRetryError;

    #[test]
    fn should_not_classify_error_without_code() {
        let error = io::Error::new(io::ErrorKind::Other, "no code attached");

        assert_that!(is_unreachable(&error), eq(false));
    }

    #[test]
    fn should_use_configured_codes_only() {
        let classifier = ReachabilityClassifier::with_codes([7]).with_additional_code(9);

        assert_that!(classifier.codes().collect::<Vec<_>>(), elements_are![eq(7), eq(9)]);
        assert_that!(classifier.is_unreachable(&io::Error::from_raw_os_error(9)), eq(true));
        assert_that!(classifier.is_unreachable(&io::Error::from_raw_os_error(8)), eq(false));
    }

    #[test]
    fn should_classify_cause_of_exhausted_retries() {
        let classifier = ReachabilityClassifier::with_codes([7]);
        let unreachable = MaxRetryError::new("http://10.255.255.1/", io::Error::from_raw_os_error(7));
        let refused = MaxRetryError::new("http://10.255.255.1/", io::Error::from_raw_os_error(8));

        assert_that!(classifier.is_unreachable_failure(&unreachable), eq(true));
        assert_that!(classifier.is_unreachable_failure(&refused), eq(false));
    }

    #[cfg(unix)]
    mod unix {
        use googletest::prelude::*;
        use nix::errno::Errno;
        use rstest::rstest;

        use super::*;

        #[rstest]
        #[case(Errno::ENETUNREACH, true)]
        #[case(Errno::EHOSTUNREACH, true)]
        #[case(Errno::ECONNREFUSED, false)]
        #[case(Errno::ETIMEDOUT, false)]
        fn should_classify_platform_codes(#[case] errno: Errno, #[case] unreachable: bool) {
            let error = io::Error::from_raw_os_error(errno as i32);

            assert_that!(is_unreachable(&error), eq(unreachable));
        }
    }
}
