//! Tracing backend validation.
//!
//! The runtime only exports traces to jaeger. Other backends are reported at startup,
//! but they never stop the service from starting.

use std::fmt;

use super::options::TracingOptions;

/// Tracing backend requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TracingBackend {
    Agent,
    Jaeger,
    Zipkin,
    Unknown(String),
}

impl TracingBackend {
    /// Classifies a backend name.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "agent" => Self::Agent,
            "jaeger" => Self::Jaeger,
            "zipkin" => Self::Zipkin,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// True if the runtime can export to this backend.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Jaeger)
    }
}

impl fmt::Display for TracingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agent => f.write_str("agent"),
            Self::Jaeger => f.write_str("jaeger"),
            Self::Zipkin => f.write_str("zipkin"),
            Self::Unknown(kind) => f.write_str(kind),
        }
    }
}

/// Logs how the configured backend will be handled.
///
/// Returns the requested backend, or `None` when tracing is disabled.
pub fn check_tracing(opts: &TracingOptions) -> Option<TracingBackend> {
    if !opts.tracing_enabled {
        tracing::debug!("Tracing is not enabled");
        return None;
    }

    let backend = TracingBackend::parse(&opts.tracing_type);
    match &backend {
        TracingBackend::Jaeger => {
            tracing::info!(backend = %backend, "configuring reva to use the jaeger tracing backend");
        }
        TracingBackend::Agent | TracingBackend::Zipkin => {
            tracing::error!(backend = %backend, "Reva only supports the jaeger tracing backend");
        }
        TracingBackend::Unknown(_) => {
            tracing::warn!(backend = %backend, "Unknown tracing backend");
        }
    }
    Some(backend)
}
