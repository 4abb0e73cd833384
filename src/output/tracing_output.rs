use crate::output::traits::{Event, Reporter, Severity};

/// Reporter that renders events as `tracing` log lines
///
/// Severities map onto tracing levels as `error → ERROR`, `warning → WARN`,
/// `info → INFO`, `verbose → DEBUG`, `debug → TRACE`. The installed
/// subscriber still applies its own filter on top of the threshold.
#[derive(Debug, Clone, Copy)]
pub struct TracingReporter {
    threshold: Severity,
}

impl TracingReporter {
    /// Creates a reporter that renders events at or above `threshold`
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }
}

impl Default for TracingReporter {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}

impl Reporter for TracingReporter {
    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn render(&self, event: &Event) {
        match event.severity() {
            Severity::Error => tracing::error!("{}", event),
            Severity::Warning => tracing::warn!("{}", event),
            Severity::Info => tracing::info!("{}", event),
            Severity::Verbose => tracing::debug!("{}", event),
            Severity::Debug => tracing::trace!("{}", event),
        }
    }
}
