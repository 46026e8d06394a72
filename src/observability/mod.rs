//! OpenTelemetry tracing with file-based export.
//!
//! Spans from the `tracing` macros are bridged into OpenTelemetry and written
//! as OTLP/JSON lines to a local file, so a terminal session leaves a trace
//! that can be inspected offline without a collector.
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → traces.jsonl
//! ```
//!
//! - **Location**: `traces.jsonl` in the data directory
//! - **Rotation**: at 10 MB, keeping three numbered backups
//! - **Level**: `RUST_LOG`, else `trace_level` from config, else `info`
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider and span exporter
//! - `span_formatter`: OTLP/JSON encoding
//! - `file_writer`: rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME};
