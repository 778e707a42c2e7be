//! Error codes for the Tooi diagnostic system.
//!
//! Codes are organized by phase, and each carries a stable numeric id:
//! - `1xx` - Scanner errors
//! - `5xx` - Interpreter errors
//! - `9xx` - Registry (catalog integrity) errors

use std::fmt;

use super::CatalogError;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // =========================================================================
    // Scanner Errors (1xx)
    // =========================================================================
    /// A run of characters that cannot start any token.
    ScannerUnexpectedCharacterSequence = 100,

    /// A `"` or `'` string reached end of input before its closing quote.
    ScannerUnterminatedString = 101,

    /// A backslash was the last character of the input.
    ScannerUnterminatedEscapeSequence = 102,

    /// A backslash followed by a character with no escape meaning.
    ///
    /// Valid escapes are: `\n`, `\t`, `\\`, `\"`, `\'`.
    ScannerInvalidEscapeSequence = 103,

    /// A backtick string reached end of input before its closing backtick.
    ScannerUnterminatedRawString = 104,

    /// A `/*` comment reached end of input before `*/`.
    ScannerUnterminatedBlockComment = 105,

    /// A decimal point not followed by a digit, as in `1.`.
    ScannerDecimalRequiresDigit = 110,

    /// More than one decimal point, as in `1.2.3`.
    ScannerMultipleDecimals = 111,

    /// A numeric suffix outside the recognized set.
    ScannerInvalidNumericSuffix = 112,

    /// An integer suffix on a literal with a decimal point, as in `1.2i32`.
    ScannerIntegerSuffixWithDecimal = 113,

    /// The digit text could not be converted to a number.
    ScannerNumberParseInvalid = 114,

    /// The value does not fit the target representation.
    ScannerNumberParseOutOfRange = 115,

    // =========================================================================
    // Interpreter Errors (5xx)
    // =========================================================================
    /// The input stream could not be read.
    InterpreterStreamReadError = 500,

    /// A run is stopping because lexical errors were found.
    InterpreterHaltingLexical = 501,

    // =========================================================================
    // Registry Errors (9xx)
    // =========================================================================
    /// Fallback entry for codes missing from the catalog.
    RegistryUnknownErrorCode = 900,

    /// A message template could not be formatted with the given arguments.
    RegistryMessageFormatFailure = 901,
}

impl ErrorCode {
    /// Every declared code, in declaration order.
    pub const ALL: [ErrorCode; 16] = [
        ErrorCode::ScannerUnexpectedCharacterSequence,
        ErrorCode::ScannerUnterminatedString,
        ErrorCode::ScannerUnterminatedEscapeSequence,
        ErrorCode::ScannerInvalidEscapeSequence,
        ErrorCode::ScannerUnterminatedRawString,
        ErrorCode::ScannerUnterminatedBlockComment,
        ErrorCode::ScannerDecimalRequiresDigit,
        ErrorCode::ScannerMultipleDecimals,
        ErrorCode::ScannerInvalidNumericSuffix,
        ErrorCode::ScannerIntegerSuffixWithDecimal,
        ErrorCode::ScannerNumberParseInvalid,
        ErrorCode::ScannerNumberParseOutOfRange,
        ErrorCode::InterpreterStreamReadError,
        ErrorCode::InterpreterHaltingLexical,
        ErrorCode::RegistryUnknownErrorCode,
        ErrorCode::RegistryMessageFormatFailure,
    ];

    /// The stable numeric id of this code.
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Resolve a code from its numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCode`] if no code has this id.
    pub fn from_id(id: u16) -> Result<ErrorCode, CatalogError> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.id() == id)
            .ok_or(CatalogError::UnknownCode(id))
    }

    /// Returns the variant name as a string (e.g., `"ScannerMultipleDecimals"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ScannerUnexpectedCharacterSequence => "ScannerUnexpectedCharacterSequence",
            ErrorCode::ScannerUnterminatedString => "ScannerUnterminatedString",
            ErrorCode::ScannerUnterminatedEscapeSequence => "ScannerUnterminatedEscapeSequence",
            ErrorCode::ScannerInvalidEscapeSequence => "ScannerInvalidEscapeSequence",
            ErrorCode::ScannerUnterminatedRawString => "ScannerUnterminatedRawString",
            ErrorCode::ScannerUnterminatedBlockComment => "ScannerUnterminatedBlockComment",
            ErrorCode::ScannerDecimalRequiresDigit => "ScannerDecimalRequiresDigit",
            ErrorCode::ScannerMultipleDecimals => "ScannerMultipleDecimals",
            ErrorCode::ScannerInvalidNumericSuffix => "ScannerInvalidNumericSuffix",
            ErrorCode::ScannerIntegerSuffixWithDecimal => "ScannerIntegerSuffixWithDecimal",
            ErrorCode::ScannerNumberParseInvalid => "ScannerNumberParseInvalid",
            ErrorCode::ScannerNumberParseOutOfRange => "ScannerNumberParseOutOfRange",
            ErrorCode::InterpreterStreamReadError => "InterpreterStreamReadError",
            ErrorCode::InterpreterHaltingLexical => "InterpreterHaltingLexical",
            ErrorCode::RegistryUnknownErrorCode => "RegistryUnknownErrorCode",
            ErrorCode::RegistryMessageFormatFailure => "RegistryMessageFormatFailure",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
