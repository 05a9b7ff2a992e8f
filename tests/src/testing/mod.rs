use std::io;
use std::net::SocketAddr;

use courier_testing::fixtures;
use courier_testing::MaxRetryError;
use courier_warnings::category::INSECURE_REQUEST_WARNING;
use courier_warnings::{warn, WarningModule};
use tracing::debug;

/// Stand-in for the HTTP client: retries a connection whose outcome is injected.
pub struct FakeClient {
    pub ssl_module: WarningModule,
    pub connect_failure: Option<i32>,
    pub retries: u32,
    pub verify_certificates: bool,
}

impl FakeClient {
    pub fn failing_with(code: i32) -> Self {
        Self {
            connect_failure: Some(code),
            ..Self::default()
        }
    }

    pub fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        debug!("Connecting to {addr}.");
        match self.connect_failure {
            Some(code) => Err(io::Error::from_raw_os_error(code)),
            None => Ok(()),
        }
    }

    pub fn get(&self, url: &str) -> Result<u16, MaxRetryError> {
        if !self.verify_certificates {
            warn(&self.ssl_module, INSECURE_REQUEST_WARNING, "Unverified HTTPS request is being made.");
        }

        let mut attempts = 0;
        loop {
            match self.connect(fixtures::tarpit(443)) {
                Ok(()) => return Ok(200),
                Err(cause) if attempts >= self.retries => return Err(MaxRetryError::new(url, cause)),
                Err(_) => attempts += 1,
            }
        }
    }
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            ssl_module: WarningModule::new("courier::util::ssl"),
            connect_failure: None,
            retries: 3,
            verify_certificates: true,
        }
    }
}
