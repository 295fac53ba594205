//! Progress reporting for pipeline runs.
//!
//! Rendered output goes to stdout, so progress is reported as structured
//! logging on stderr.

mod logging;

pub(crate) use logging::LoggingReporter;
