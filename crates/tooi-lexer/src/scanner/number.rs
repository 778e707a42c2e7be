//! Numeric literals.
//!
//! A number is a run of digits with at most one decimal point, optionally
//! followed (without whitespace) by a suffix:
//!
//! | Shape     | Suffix                               | Stored as  |
//! |-----------|--------------------------------------|------------|
//! | `123`     | none, `i`, `u`, `i32`, `i64`, `u32`, `u64` | magnitude  |
//! | `123`     | `f`, `d`                             | double     |
//! | `1.5`     | none, `f`, `d`                       | double     |
//!
//! Magnitudes are always 64-bit unsigned whatever width the suffix requests.
//! Checking a magnitude against the requested width belongs to a later
//! stage.

use std::num::IntErrorKind;

use log::trace;
use winnow::{
    Parser as _,
    combinator::opt,
    stream::Location,
    token::take_while,
};

use super::{Input, LexError, PResult, Piece, fail, is_word_char};
use crate::{
    error::ErrorCode,
    token::{Literal, TokenKind},
};

const INTEGER_SUFFIXES: [&str; 7] = ["", "i", "u", "i32", "i64", "u32", "u64"];
const FLOAT_SUFFIXES: [&str; 3] = ["", "f", "d"];

enum Representation {
    Magnitude,
    Double,
}

/// Why the numeric text could not be converted.
enum ParseFailure {
    Invalid,
    OutOfRange,
}

fn digit_run<'src>(input: &mut Input<'src>) -> PResult<&'src str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

/// Fail with `code` over everything consumed since `start`.
fn reject(input: &Input<'_>, start: usize, code: ErrorCode, args: &[&str]) -> PResult<Piece> {
    let error = args.iter().fold(
        LexError::new(code, start, input.current_token_start()),
        |error, arg| error.with_arg(arg),
    );
    fail(input, [error])
}

/// Parse a number literal with its suffix
pub(super) fn number(input: &mut Input<'_>) -> PResult<Piece> {
    let start = input.current_token_start();
    let digits = (digit_run, opt(('.', digit_run))).take().parse_next(input)?;
    let has_decimal = digits.contains('.');

    if opt('.').parse_next(input)?.is_some() {
        if !has_decimal {
            return reject(input, start, ErrorCode::ScannerDecimalRequiresDigit, &[]);
        }
        take_while(0.., |c: char| c.is_ascii_digit() || c == '.').parse_next(input)?;
        return reject(input, start, ErrorCode::ScannerMultipleDecimals, &[]);
    }

    let suffix = take_while(0.., is_word_char).parse_next(input)?;
    trace!(digits, suffix; "Classifying number");

    let representation = match (has_decimal, suffix) {
        (false, s) if INTEGER_SUFFIXES.contains(&s) => Representation::Magnitude,
        (false, "f" | "d") => Representation::Double,
        (true, s) if FLOAT_SUFFIXES.contains(&s) => Representation::Double,
        (true, s) if INTEGER_SUFFIXES.contains(&s) => {
            return reject(input, start, ErrorCode::ScannerIntegerSuffixWithDecimal, &[s]);
        }
        (_, s) => return reject(input, start, ErrorCode::ScannerInvalidNumericSuffix, &[s]),
    };

    let parsed = match representation {
        Representation::Magnitude => parse_magnitude(digits).map(Literal::Magnitude),
        Representation::Double => parse_double(digits).map(Literal::Double),
    };

    match parsed {
        Ok(literal) => Ok(Piece::literal(TokenKind::Number, literal)),
        Err(ParseFailure::Invalid) => {
            reject(input, start, ErrorCode::ScannerNumberParseInvalid, &[suffix])
        }
        Err(ParseFailure::OutOfRange) => {
            reject(input, start, ErrorCode::ScannerNumberParseOutOfRange, &[suffix])
        }
    }
}

fn parse_magnitude(digits: &str) -> Result<u64, ParseFailure> {
    digits.parse::<u64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => ParseFailure::OutOfRange,
        _ => ParseFailure::Invalid,
    })
}

fn parse_double(digits: &str) -> Result<f64, ParseFailure> {
    let value = digits.parse::<f64>().map_err(|_| ParseFailure::Invalid)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseFailure::OutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use winnow::{error::ErrMode, stream::LocatingSlice};

    use super::*;
    use crate::{
        error::Catalog,
        report::{CollectingSink, Reporter},
        scanner::Scanner,
    };

    fn scan(source: &str) -> (Vec<(TokenKind, String, Literal)>, CollectingSink) {
        let catalog = Catalog::standard();
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());
        let tokens = Scanner::new(source, &mut reporter)
            .scan_tokens()
            .iter()
            .map(|t| (t.kind(), t.lexeme().to_string(), t.literal().clone()))
            .collect();
        (tokens, reporter.into_sink())
    }

    fn single(source: &str) -> Literal {
        let (tokens, sink) = scan(source);
        assert!(sink.is_empty(), "{source}: {:?}", sink.diagnostics());
        assert_eq!(tokens.len(), 2, "{source}: {tokens:?}");
        assert_eq!(tokens[0].0, TokenKind::Number);
        assert_eq!(tokens[0].1, source);
        tokens[0].2.clone()
    }

    fn failure(source: &str) -> (ErrorCode, String, usize) {
        let (tokens, sink) = scan(source);
        assert_eq!(tokens[0].0, TokenKind::Error, "{source}");
        assert_eq!(sink.len(), 1, "{source}: {:?}", sink.diagnostics());
        let diag = &sink.diagnostics()[0];
        let code = diag.code().expect("code");
        let span_len = diag.location().map_or(0, |l| l.span_len());
        (code, diag.message().to_string(), span_len)
    }

    #[test]
    fn test_number_parser_stops_at_suffix_end() {
        let mut input = LocatingSlice::new("42u32;");

        assert_eq!(
            number(&mut input).ok(),
            Some(Piece::literal(TokenKind::Number, Literal::Magnitude(42)))
        );
        assert_eq!(input.to_string(), ";");
    }

    #[test]
    fn test_number_parser_rejects_non_digit() {
        let mut input = LocatingSlice::new(".5");

        assert!(matches!(number(&mut input), Err(ErrMode::Backtrack(_))));
        assert_eq!(input.to_string(), ".5");
    }

    #[test]
    fn test_number_parser_failure_range() {
        let mut input = LocatingSlice::new("1.2.3;");

        let errors: Vec<LexError> = match number(&mut input) {
            Err(ErrMode::Cut(context)) => context.context().cloned().collect(),
            other => panic!("expected a committed failure, got {other:?}"),
        };
        assert_eq!(input.to_string(), ";");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::ScannerMultipleDecimals);
        assert_eq!((errors[0].start, errors[0].end), (0, 5));
    }

    #[test]
    fn test_integer_suffixes_store_magnitude() {
        for source in ["42", "42i", "42u", "42i32", "42i64", "42u32", "42u64"] {
            assert_eq!(single(source), Literal::Magnitude(42), "{source}");
        }
    }

    #[test]
    fn test_float_suffix_on_integer_shape() {
        assert_eq!(single("7f"), Literal::Double(7.0));
        assert_eq!(single("7d"), Literal::Double(7.0));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_decimal_literals_store_double() {
        for source in ["3.14", "3.14f", "3.14d"] {
            assert_eq!(single(source), Literal::Double(3.14), "{source}");
        }
    }

    #[test]
    fn test_width_is_not_checked() {
        assert_eq!(single("4294967296u32"), Literal::Magnitude(4_294_967_296));
        assert_eq!(single("300i32"), Literal::Magnitude(300));
    }

    #[test]
    fn test_max_magnitude() {
        assert_eq!(single("18446744073709551615"), Literal::Magnitude(u64::MAX));
    }

    #[test]
    fn test_magnitude_out_of_range() {
        let (code, message, span_len) = failure("18446744073709551616u64");

        assert_eq!(code, ErrorCode::ScannerNumberParseOutOfRange);
        assert_eq!(message, "Number out of range for specified type (suffix: 'u64').");
        assert_eq!(span_len, 23);
    }

    #[test]
    fn test_out_of_range_without_suffix_uses_empty_context() {
        let (code, message, _) = failure("99999999999999999999");

        assert_eq!(code, ErrorCode::ScannerNumberParseOutOfRange);
        assert_eq!(message, "Number out of range for specified type (suffix: '').");
    }

    #[test]
    fn test_double_out_of_range() {
        let source = format!("{}.0", "9".repeat(400));
        let (code, _, _) = failure(&source);

        assert_eq!(code, ErrorCode::ScannerNumberParseOutOfRange);
    }

    #[test]
    fn test_integer_suffix_with_decimal() {
        let (code, message, span_len) = failure("1.2i32");

        assert_eq!(code, ErrorCode::ScannerIntegerSuffixWithDecimal);
        assert_eq!(message, "Cannot use integer suffix 'i32' with a decimal point.");
        assert_eq!(span_len, 6);
    }

    #[test]
    fn test_invalid_suffix() {
        let (code, message, span_len) = failure("123xyz");

        assert_eq!(code, ErrorCode::ScannerInvalidNumericSuffix);
        assert_eq!(message, "Invalid numeric suffix: 'xyz'.");
        assert_eq!(span_len, 6);

        let (code, _, _) = failure("1.5q");
        assert_eq!(code, ErrorCode::ScannerInvalidNumericSuffix);
    }

    #[test]
    fn test_multiple_decimals_consume_whole_run() {
        let (tokens, sink) = scan("1.2.3.4;");

        assert_eq!(tokens[0].0, TokenKind::Error);
        assert_eq!(tokens[0].1, "1.2.3.4");
        assert_eq!(tokens[1].0, TokenKind::Semicolon);
        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink.diagnostics()[0].code(),
            Some(ErrorCode::ScannerMultipleDecimals)
        );
    }

    #[test]
    fn test_trailing_dot() {
        let (tokens, sink) = scan("1. x");

        assert_eq!(tokens[0].0, TokenKind::Error);
        assert_eq!(tokens[0].1, "1.");
        assert_eq!(tokens[1].0, TokenKind::Identifier);
        assert_eq!(
            sink.diagnostics()[0].code(),
            Some(ErrorCode::ScannerDecimalRequiresDigit)
        );
        assert_eq!(sink.diagnostics()[0].location().map(|l| l.span_len()), Some(2));
    }

    #[test]
    fn test_dot_then_identifier_is_trailing_dot() {
        let (code, _, _) = failure("1.foo");

        assert_eq!(code, ErrorCode::ScannerDecimalRequiresDigit);
    }

    #[test]
    fn test_minus_is_separate_token() {
        let (tokens, _) = scan("-5");

        assert_eq!(tokens[0].0, TokenKind::Minus);
        assert_eq!(tokens[1].2, Literal::Magnitude(5));
    }
}
