//! Diagnostic reporting.
//!
//! The [`Reporter`] turns error codes and arguments into [`Diagnostic`]
//! records and hands them to a [`DiagnosticSink`]. Detection and rendering are
//! separate: the scanner only ever talks to the reporter, and the sink decides
//! what a diagnostic looks like.
//!
//! [`Diagnostic`]: crate::error::Diagnostic

mod render;
mod reporter;
mod sink;

pub use render::render_plain;
pub use reporter::Reporter;
pub use sink::{CollectingSink, DiagnosticSink, TextSink};
