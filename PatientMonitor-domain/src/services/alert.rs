use std::io::Write;
use std::sync::Arc;

use tracing::{error, warn};

/// Channel that delivers alert messages.
///
/// Delivery is fire-and-forget: callers never learn whether a message arrived.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait SendAlertService {
    /// Deliver a single alert message
    fn send(&self, message: &str);
}

impl<T: SendAlertService + ?Sized> SendAlertService for &T {
    fn send(&self, message: &str) {
        (**self).send(message)
    }
}

impl<T: SendAlertService + ?Sized> SendAlertService for Arc<T> {
    fn send(&self, message: &str) {
        (**self).send(message)
    }
}

impl<T: SendAlertService + ?Sized> SendAlertService for Box<T> {
    fn send(&self, message: &str) {
        (**self).send(message)
    }
}

/// Alert channel that emits each message as a warning event
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingAlertService;

impl LoggingAlertService {
    /// Create a new logging alert channel
    pub fn new() -> Self {
        Self
    }
}

impl SendAlertService for LoggingAlertService {
    fn send(&self, message: &str) {
        warn!(target: "patient_monitor::alert", "{}", message);
    }
}

/// Alert channel that prints each message on its own line to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutAlertService;

impl StdoutAlertService {
    /// Create a new stdout alert channel
    pub fn new() -> Self {
        Self
    }
}

/// Write one alert as a single line
fn write_alert<W: Write>(out: &mut W, message: &str) -> std::io::Result<()> {
    writeln!(out, "{}", message)?;
    out.flush()
}

impl SendAlertService for StdoutAlertService {
    fn send(&self, message: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = write_alert(&mut handle, message) {
            // Nothing to hand the failure back to
            error!("Failed to write alert to stdout: {}", e);
        }
    }
}
