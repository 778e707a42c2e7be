//! The immutable error catalog.

use std::sync::OnceLock;

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use super::{ErrorCode, ErrorInfo, Severity};

/// Failure to resolve an error code.
///
/// This signals an inconsistency in the program, never a problem in the
/// user's source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown error code requested: {0}")]
    UnknownCode(u16),
}

/// Maps every [`ErrorCode`] to its [`ErrorInfo`].
///
/// A catalog is built once and never mutated. Iteration follows registration
/// order.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: IndexMap<ErrorCode, ErrorInfo>,
}

impl Catalog {
    /// Build the catalog holding every declared code.
    pub fn standard() -> Self {
        let catalog = Self::from_entries(standard_entries());
        debug!(entries = catalog.len(); "Built standard error catalog");
        catalog
    }

    /// The process-wide standard catalog, built on first access.
    ///
    /// Concurrent first accesses build it exactly once.
    pub fn global() -> &'static Catalog {
        static GLOBAL: OnceLock<Catalog> = OnceLock::new();
        GLOBAL.get_or_init(Catalog::standard)
    }

    /// Build a catalog from an arbitrary set of entries.
    ///
    /// Later entries replace earlier ones with the same id.
    pub fn from_entries(entries: impl IntoIterator<Item = ErrorInfo>) -> Self {
        let entries = entries.into_iter().map(|info| (info.id, info)).collect();
        Self { entries }
    }

    /// Look up the info registered for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCode`] if `code` was not registered.
    pub fn lookup(&self, code: ErrorCode) -> Result<&ErrorInfo, CatalogError> {
        self.entries
            .get(&code)
            .ok_or(CatalogError::UnknownCode(code.id()))
    }

    /// Look up a code by its raw numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCode`] if the id names no code, or names
    /// one this catalog does not hold.
    pub fn lookup_id(&self, id: u16) -> Result<&ErrorInfo, CatalogError> {
        self.lookup(ErrorCode::from_id(id)?)
    }

    pub fn contains(&self, code: ErrorCode) -> bool {
        self.entries.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorInfo> {
        self.entries.values()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_entries() -> [ErrorInfo; 16] {
    use ErrorCode::*;
    use Severity::*;

    [
        // --- Scanner ---
        ErrorInfo::new(
            ScannerUnexpectedCharacterSequence,
            Error,
            "E_SCANNER_UNEXP_CHAR",
            "Unexpected character sequence: '{}'.",
            "The scanner encountered a sequence of characters that does not form a valid token in the Tooi language.",
        ),
        ErrorInfo::new(
            ScannerUnterminatedString,
            Error,
            "E_SCANNER_UNTERM_STR",
            "Unterminated string literal.",
            "String literals must be closed with the same quote character that opened them. The end of the input was reached before the closing quote was found.",
        ),
        ErrorInfo::new(
            ScannerUnterminatedEscapeSequence,
            Error,
            "E_SCANNER_UNTERM_ESC",
            "Unterminated escape sequence.",
            "An escape sequence (starting with '\\') was not completed. The end of the input was reached right after the backslash.",
        ),
        ErrorInfo::new(
            ScannerInvalidEscapeSequence,
            Error,
            "E_SCANNER_INVALID_ESC",
            "Invalid escape sequence: '\\{}'.",
            "The escape sequence is not recognized. Valid escape sequences are \\n, \\t, \\\\, \\\" and \\'.",
        ),
        ErrorInfo::new(
            ScannerUnterminatedRawString,
            Error,
            "E_SCANNER_UNTERM_RAW_STR",
            "Unterminated raw string literal.",
            "Raw string literals (enclosed in backticks) must be closed with a matching backtick. The end of the input was reached before it was found.",
        ),
        ErrorInfo::new(
            ScannerUnterminatedBlockComment,
            Error,
            "E_SCANNER_UNTERM_COMMENT",
            "Unterminated block comment.",
            "A block comment (starting with /*) was not terminated with */ before the end of the input.",
        ),
        ErrorInfo::new(
            ScannerDecimalRequiresDigit,
            Error,
            "E_SCANNER_DECIMAL_REQ_DIGIT",
            "Decimal point must be followed by digits.",
            "A decimal point (.) in a number must be immediately followed by at least one digit (0-9).",
        ),
        ErrorInfo::new(
            ScannerMultipleDecimals,
            Error,
            "E_SCANNER_MULTIPLE_DECIMALS",
            "Invalid number format: multiple decimal points.",
            "Numeric literals can contain at most one decimal point.",
        ),
        ErrorInfo::new(
            ScannerInvalidNumericSuffix,
            Error,
            "E_SCANNER_INVALID_SUFFIX",
            "Invalid numeric suffix: '{}'.",
            "The suffix used for the numeric literal is not recognized. Valid suffixes are i, u, f, d, i32, i64, u32 and u64.",
        ),
        ErrorInfo::new(
            ScannerIntegerSuffixWithDecimal,
            Error,
            "E_SCANNER_INT_SUFFIX_DECIMAL",
            "Cannot use integer suffix '{}' with a decimal point.",
            "Integer type suffixes (i, u, i32, i64, u32, u64) cannot be applied to numbers containing a decimal point.",
        ),
        ErrorInfo::new(
            ScannerNumberParseInvalid,
            Error,
            "E_SCANNER_PARSE_INVALID",
            "Invalid number format for specified type (suffix: '{}').",
            "The numeric literal could not be parsed into the type indicated by its suffix (or the default type).",
        ),
        ErrorInfo::new(
            ScannerNumberParseOutOfRange,
            Error,
            "E_SCANNER_PARSE_RANGE",
            "Number out of range for specified type (suffix: '{}').",
            "The numeric literal's value is too large to fit into the type indicated by its suffix (or the default type).",
        ),
        // --- Interpreter ---
        ErrorInfo::new(
            InterpreterStreamReadError,
            Error,
            "E_INTERPRETER_STREAM_READ",
            "Error reading input stream: {}.",
            "Failed to read from the input stream. This can be caused by file system errors or an invalid stream state.",
        ),
        ErrorInfo::new(
            InterpreterHaltingLexical,
            Fatal,
            "F_INTERPRETER_HALTING_LEXICAL",
            "Halting due to lexical errors.",
            "The run is stopping because the scanner detected one or more lexical errors.",
        ),
        // --- Registry ---
        ErrorInfo::new(
            RegistryUnknownErrorCode,
            Internal,
            "X_REGISTRY_UNKNOWN",
            "Unknown internal error code encountered: {}.",
            "An undefined error code was requested from the error catalog.",
        ),
        ErrorInfo::new(
            RegistryMessageFormatFailure,
            Internal,
            "X_REGISTRY_FORMAT",
            "Failed to format message for error code {}: {}.",
            "A message template could not be formatted with the arguments supplied for it.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::format_template;

    #[test]
    fn test_every_code_is_registered() {
        let catalog = Catalog::standard();

        for code in ErrorCode::ALL {
            let info = catalog.lookup(code).expect("registered");
            assert_eq!(info.id, code);
        }
        assert_eq!(catalog.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let catalog = Catalog::standard();
        let ids: Vec<ErrorCode> = catalog.iter().map(|info| info.id).collect();

        assert_eq!(ids, ErrorCode::ALL.to_vec());
    }

    #[test]
    fn test_short_codes_are_unique() {
        let catalog = Catalog::standard();
        let infos: Vec<&ErrorInfo> = catalog.iter().collect();

        for (i, a) in infos.iter().enumerate() {
            for b in &infos[i + 1..] {
                assert_ne!(a.short_code, b.short_code);
            }
        }
    }

    #[test]
    fn test_severities() {
        let catalog = Catalog::standard();
        let severity = |code| catalog.lookup(code).map(|info| info.severity);

        assert_eq!(
            severity(ErrorCode::ScannerUnterminatedString),
            Ok(Severity::Error)
        );
        assert_eq!(
            severity(ErrorCode::InterpreterHaltingLexical),
            Ok(Severity::Fatal)
        );
        assert_eq!(
            severity(ErrorCode::RegistryUnknownErrorCode),
            Ok(Severity::Internal)
        );
    }

    #[test]
    fn test_lookup_missing_code_fails() {
        let catalog = Catalog::from_entries([ErrorInfo::new(
            ErrorCode::ScannerUnterminatedString,
            Severity::Error,
            "E_TEST",
            "test",
            "test",
        )]);

        assert!(catalog.contains(ErrorCode::ScannerUnterminatedString));
        assert_eq!(
            catalog.lookup(ErrorCode::ScannerMultipleDecimals),
            Err(CatalogError::UnknownCode(
                ErrorCode::ScannerMultipleDecimals.id()
            ))
        );
    }

    #[test]
    fn test_lookup_id() {
        let catalog = Catalog::standard();

        assert_eq!(
            catalog.lookup_id(101).map(|info| info.id),
            Ok(ErrorCode::ScannerUnterminatedString)
        );
        assert_eq!(catalog.lookup_id(7), Err(CatalogError::UnknownCode(7)));
        assert_eq!(
            CatalogError::UnknownCode(7).to_string(),
            "unknown error code requested: 7"
        );
    }

    #[test]
    fn test_global_is_shared() {
        let a = Catalog::global();
        let b = Catalog::global();

        assert!(std::ptr::eq(a, b));
        assert_eq!(a.len(), ErrorCode::ALL.len());
    }

    #[test]
    fn test_templates_are_well_formed() {
        // Every template must format when given enough arguments.
        let args: [&dyn std::fmt::Display; 2] = [&"x", &"y"];
        for info in Catalog::standard().iter() {
            let needed = info.message_template.matches("{}").count();
            let result = format_template(info.message_template, &args[..needed]);
            assert!(result.is_ok(), "{}: {:?}", info.id, result);
        }
    }
}
