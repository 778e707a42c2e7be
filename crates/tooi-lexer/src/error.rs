//! Error catalog and diagnostic records for the Tooi front end.
//!
//! This module provides:
//! - [`ErrorCode`]: the closed set of error identifiers, namespaced by phase
//! - [`Severity`]: ordered qualitative levels driving labels and colors
//! - [`Catalog`]: the immutable table mapping each code to its [`ErrorInfo`]
//! - [`Diagnostic`]: a structured record of one reported condition
//!
//! # Overview
//!
//! Lexical problems in user source are never Rust errors. The scanner hands
//! them to a [`Reporter`](crate::Reporter), which looks the code up in a
//! [`Catalog`], formats the message template and produces a [`Diagnostic`].
//! Rust errors ([`CatalogError`], [`TemplateError`]) are reserved for
//! inconsistencies in the program itself.
//!
//! # Example
//!
//! ```
//! # use tooi_lexer::error::{Catalog, ErrorCode, Severity};
//!
//! let catalog = Catalog::standard();
//! let info = catalog.lookup(ErrorCode::ScannerInvalidNumericSuffix).unwrap();
//!
//! assert_eq!(info.short_code, "E_SCANNER_INVALID_SUFFIX");
//! assert_eq!(info.severity, Severity::Error);
//! ```

mod catalog;
mod diagnostic;
mod error_code;
mod info;
mod severity;
mod template;

pub use catalog::{Catalog, CatalogError};
pub use diagnostic::{Diagnostic, SourceLocation};
pub use error_code::ErrorCode;
pub use info::ErrorInfo;
pub use severity::Severity;
pub use template::{TemplateError, format_template};
