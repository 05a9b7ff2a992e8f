use courier_util::settings::{load_config, Config, FileFormat, LoadError, LoadedConfig};
use tracing::warn;

use crate::{ReachabilityClassifier, RuntimeEnvironment, RuntimeVersion};

const REACHABILITY_CODES: &str = "reachability.codes";
const RUNTIME_VERSION: &str = "runtime.version";

/// Overrides for the gates, read from `testing.toml` defaults, config files and `COURIER_TESTING_*` variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestingSettings {
    pub unreachable_codes: Option<Vec<i32>>,
    pub runtime_version: Option<RuntimeVersion>,
}

pub fn load() -> Result<TestingSettings, LoadError> {
    load_with_overrides(Config::default())
}

pub fn load_with_overrides(overrides: Config) -> Result<TestingSettings, LoadError> {
    let loaded = load_config("testing", include_str!("../testing.toml"), FileFormat::Toml, overrides)?;
    TestingSettings::from_loaded(&loaded)
}

/// The classifier used by gates that are not given one explicitly.
///
/// Falls back to the platform's codes when the settings cannot be loaded.
pub fn configured_classifier() -> ReachabilityClassifier {
    match load() {
        Ok(settings) => settings.reachability_classifier(),
        Err(cause) => {
            warn!("Using the platform's unreachable codes, since the testing settings could not be loaded: {cause}");
            ReachabilityClassifier::platform_default()
        }
    }
}

/// The runtime environment the version and family gates should check against.
pub fn configured_environment() -> Result<RuntimeEnvironment, LoadError> {
    load()?.runtime_environment()
}

impl TestingSettings {
    pub fn from_loaded(loaded: &LoadedConfig) -> Result<Self, LoadError> {
        let unreachable_codes = {
            let value = loaded.get_string(REACHABILITY_CODES)?;
            let codes = value.split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(|code| code.parse::<i32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|cause| LoadError::ParseValue { field: REACHABILITY_CODES, value: value.clone(), source: Box::new(cause) })?;
            (!codes.is_empty()).then_some(codes)
        };

        let runtime_version = {
            let value = loaded.get_string(RUNTIME_VERSION)?;
            if value.trim().is_empty() {
                None
            } else {
                let version = value.parse::<RuntimeVersion>()
                    .map_err(|cause| LoadError::ParseValue { field: RUNTIME_VERSION, value: value.clone(), source: Box::new(cause) })?;
                Some(version)
            }
        };

        Ok(Self {
            unreachable_codes,
            runtime_version,
        })
    }

    pub fn reachability_classifier(&self) -> ReachabilityClassifier {
        match &self.unreachable_codes {
            Some(codes) => ReachabilityClassifier::with_codes(codes.iter().copied()),
            None => ReachabilityClassifier::platform_default(),
        }
    }

    /// The configured runtime version, or the current environment when none is configured.
    pub fn runtime_environment(&self) -> Result<RuntimeEnvironment, LoadError> {
        match self.runtime_version {
            Some(version) => Ok(RuntimeEnvironment::new(version).with_family(version.major, true)),
            None => RuntimeEnvironment::current()
                .map_err(|cause| LoadError::ParseValue { field: RUNTIME_VERSION, value: String::from(crate::build_info::RUST_VERSION), source: Box::new(cause) }),
        }
    }
}
