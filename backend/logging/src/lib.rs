//! Structured logging for mdplain.
//!
//! Console output goes to stderr so converted text can stream to stdout;
//! an optional rolling NDJSON file captures the same events.

pub mod logger;

pub use logger::{build_filter, init_logger, LOG_FILE_PREFIX};
