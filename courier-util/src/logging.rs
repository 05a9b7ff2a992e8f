use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::TestWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

pub const LOG_ENV_VAR: &str = "COURIER_LOG";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to initialize tracing: {source}")]
    TracingFilterFromEnv { #[from] source: tracing_subscriber::filter::FromEnvError },
    #[error("Unable to initialize tracing: {source}")]
    TracingFilterParse { #[from] source: tracing_subscriber::filter::ParseError },
    #[error("Unable to set initialize tracing: {source}")]
    TracingInit { #[from] source: tracing_subscriber::util::TryInitError },
    #[error("Failed to open log file at '{path}': {source}")]
    LogFile { path: PathBuf, #[source] source: std::io::Error },
}

pub fn initialize_with_config(config: LoggingConfig) -> Result<(), Error> {

    let tracing_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env()?
        .add_directive(Directive::from_str("courier=trace")?);

    let writer = if config.test_writer {
        BoxMakeWriter::new(TestWriter::new())
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    let logging_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(writer)
        .compact();

    let file_logging_layer =
        if let Some(log_file) = config.file_logging {

            let file = File::create(&log_file)
                .map_err(|source| Error::LogFile { path: log_file.clone(), source })?;

            Some(tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file))
        } else {
            None
        };

    tracing_subscriber::registry()
        .with(tracing_filter)
        .with(logging_layer)
        .with(file_logging_layer)
        .try_init()?;

    Ok(())
}

#[derive(Default)]
pub struct LoggingConfig {
    pub file_logging: Option<PathBuf>,
    /// Route output through the test harness' capture instead of stdout.
    pub test_writer: bool,
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn should_report_log_file_that_cannot_be_created() {
        let log_file = std::env::temp_dir()
            .join("courier-logging-missing-directory")
            .join("courier.log");

        let result = initialize_with_config(LoggingConfig {
            file_logging: Some(log_file.clone()),
            test_writer: true,
        });

        match result {
            Err(Error::LogFile { path, .. }) => assert_that!(path, eq(log_file)),
            other => panic!("expected the log file to be rejected, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn should_reject_invalid_filter_from_environment() {
        std::env::set_var(LOG_ENV_VAR, "courier=loudest");
        let result = initialize_with_config(LoggingConfig { test_writer: true, ..Default::default() });
        std::env::remove_var(LOG_ENV_VAR);

        assert_that!(result, err(displays_as(starts_with("Unable to initialize tracing"))));
    }
}
