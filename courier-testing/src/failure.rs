use std::io;

/// Failure of the client's retry layer once its retry budget is exhausted.
///
/// `reason` is the failure of the last attempt.
#[derive(Debug, thiserror::Error)]
#[error("Max retries exceeded with url: {url}")]
pub struct MaxRetryError {
    pub url: String,
    #[source]
    pub reason: Option<io::Error>,
}

impl MaxRetryError {
    pub fn new(url: impl Into<String>, reason: io::Error) -> Self {
        Self { url: url.into(), reason: Some(reason) }
    }

    pub fn reason(&self) -> Option<&io::Error> {
        self.reason.as_ref()
    }
}

/// A test failure the network gate can look into.
pub trait NetworkFailure {
    /// The low-level I/O failure this failure is, or wraps as the cause of an exhausted retry.
    fn io_cause(&self) -> Option<&io::Error>;
}

impl NetworkFailure for io::Error {
    fn io_cause(&self) -> Option<&io::Error> {
        Some(self)
    }
}

impl NetworkFailure for MaxRetryError {
    fn io_cause(&self) -> Option<&io::Error> {
        self.reason()
    }
}

impl NetworkFailure for anyhow::Error {
    fn io_cause(&self) -> Option<&io::Error> {
        if let Some(error) = self.downcast_ref::<io::Error>() {
            return Some(error);
        }
        self.downcast_ref::<MaxRetryError>()
            .and_then(MaxRetryError::reason)
    }
}
