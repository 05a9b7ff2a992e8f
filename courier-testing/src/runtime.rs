use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::build_info;

/// Version of the runtime a test executes on, compared as a `(major, minor, patch)` tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuntimeVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl RuntimeVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// The version of the toolchain this crate was built with.
    pub fn current() -> Result<Self, IllegalRuntimeVersion> {
        RuntimeVersion::from_str(build_info::RUST_VERSION)
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum IllegalRuntimeVersion {
    #[error("Runtime version must not be empty.")]
    Empty,
    #[error("Runtime version '{value}' contains the invalid component '{component}'.")]
    InvalidComponent { value: String, component: String },
    #[error("Runtime version '{value}' has more than three components.")]
    TooManyComponents { value: String },
}

/// Parses `1.75.0`, `1.75`, `1.77.0-nightly` or a full `rustc 1.75.0 (82e1608df 2023-12-21)` banner.
impl FromStr for RuntimeVersion {
    type Err = IllegalRuntimeVersion;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let trimmed = trimmed.strip_prefix("rustc ").unwrap_or(trimmed);
        let token = trimmed.split_whitespace().next().ok_or(IllegalRuntimeVersion::Empty)?;
        let release = token.split(['-', '+']).next().unwrap_or(token);

        let mut components = [0u64; 3];
        for (index, component) in release.split('.').enumerate() {
            let slot = components.get_mut(index)
                .ok_or_else(|| IllegalRuntimeVersion::TooManyComponents { value: value.to_owned() })?;
            *slot = component.parse()
                .map_err(|_| IllegalRuntimeVersion::InvalidComponent {
                    value: value.to_owned(),
                    component: component.to_owned(),
                })?;
        }
        let [major, minor, patch] = components;
        Ok(Self { major, minor, patch })
    }
}

/// What the version and family gates know about the running environment.
///
/// Membership in a major-version family is a flag supplied by whoever builds
/// the environment, not derived from the version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeEnvironment {
    version: RuntimeVersion,
    families: BTreeMap<u64, bool>,
}

impl RuntimeEnvironment {
    pub fn new(version: RuntimeVersion) -> Self {
        Self { version, families: BTreeMap::new() }
    }

    /// The environment this process runs in, belonging to the family of its own major version.
    pub fn current() -> Result<Self, IllegalRuntimeVersion> {
        let version = RuntimeVersion::current()?;
        Ok(Self::new(version).with_family(version.major, true))
    }

    pub fn with_family(mut self, major: u64, member: bool) -> Self {
        self.families.insert(major, member);
        self
    }

    pub fn version(&self) -> RuntimeVersion {
        self.version
    }

    pub fn belongs_to_family(&self, major: u64) -> bool {
        self.families.get(&major).copied().unwrap_or(false)
    }
}
