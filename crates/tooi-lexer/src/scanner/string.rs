//! String literals.
//!
//! Quoted strings open with `"` or `'` and close with the same quote.
//! Recognized escapes are `\n`, `\t`, `\\`, `\"` and `\'`. An unknown escape
//! is reported and kept verbatim, backslash included. Physical newlines are
//! allowed inside the literal.
//!
//! Raw strings sit between backticks and are taken verbatim.

use winnow::{
    Parser as _,
    combinator::{alt, opt, repeat, terminated},
    stream::Location,
    token::{any, one_of, take_until, take_while},
};

use super::{Input, LexError, PResult, Piece, fail, rest_of_input};
use crate::{
    error::ErrorCode,
    token::{Literal, TokenKind},
};

/// A piece of a quoted string body.
#[derive(Debug, Clone, PartialEq)]
enum Fragment<'src> {
    Text(&'src str),
    Char(char),
    /// An unknown escape; `at` is the backslash offset.
    Invalid { at: usize, escaped: char },
    /// A backslash at the end of input.
    Dangling { at: usize },
}

#[derive(Debug, Default)]
struct StringBody {
    text: String,
    errors: Vec<LexError>,
    dangling: Option<usize>,
}

impl StringBody {
    fn push(mut self, fragment: Fragment<'_>) -> Self {
        match fragment {
            Fragment::Text(text) => self.text.push_str(text),
            Fragment::Char(c) => self.text.push(c),
            Fragment::Invalid { at, escaped } => {
                self.text.push('\\');
                self.text.push(escaped);
                self.errors.push(
                    LexError::new(
                        ErrorCode::ScannerInvalidEscapeSequence,
                        at,
                        at + 1 + escaped.len_utf8(),
                    )
                    .with_arg(escaped.escape_debug()),
                );
            }
            Fragment::Dangling { at } => self.dangling = Some(at),
        }
        self
    }
}

/// Parse an escape sequence starting with backslash
fn escape<'src>(input: &mut Input<'src>) -> PResult<Fragment<'src>> {
    let at = input.current_token_start();
    '\\'.parse_next(input)?;

    let fragment = match opt(any).parse_next(input)? {
        Some('n') => Fragment::Char('\n'),
        Some('t') => Fragment::Char('\t'),
        Some(c @ ('\\' | '"' | '\'')) => Fragment::Char(c),
        Some(escaped) => Fragment::Invalid { at, escaped },
        None => Fragment::Dangling { at },
    };
    Ok(fragment)
}

/// Parse a quoted string literal.
///
/// Invalid escapes travel with the token. An unterminated literal or escape
/// fails with every error found so far.
pub(super) fn string_literal<'src>(input: &mut Input<'src>) -> PResult<Piece> {
    let start = input.current_token_start();
    let quote = one_of(['"', '\'']).parse_next(input)?;

    let mut body = repeat(
        0..,
        alt((
            escape,
            take_while(1.., move |c: char| c != quote && c != '\\').map(Fragment::Text),
        )),
    )
    .fold(StringBody::default, StringBody::push)
    .parse_next(input)?;

    if let Some(at) = body.dangling {
        body.errors.push(LexError::new(
            ErrorCode::ScannerUnterminatedEscapeSequence,
            at,
            at + 1,
        ));
        return fail(input, body.errors);
    }

    if opt(one_of(quote)).parse_next(input)?.is_none() {
        body.errors.push(LexError::new(
            ErrorCode::ScannerUnterminatedString,
            start,
            start + 1,
        ));
        return fail(input, body.errors);
    }

    Ok(Piece::Token {
        kind: TokenKind::String,
        literal: Literal::Text(body.text),
        errors: body.errors,
    })
}

/// Parse a raw string between backticks
pub(super) fn raw_string(input: &mut Input<'_>) -> PResult<Piece> {
    let start = input.current_token_start();
    '`'.parse_next(input)?;

    match opt(terminated(take_until(0.., '`'), '`')).parse_next(input)? {
        Some(content) => Ok(Piece::literal(
            TokenKind::String,
            Literal::Text(content.to_string()),
        )),
        None => {
            rest_of_input(input)?;
            fail(
                input,
                [LexError::new(ErrorCode::ScannerUnterminatedRawString, start, start + 1)],
            )
        }
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

    struct Scanned {
        tokens: Vec<(TokenKind, String, Literal, usize)>,
        sink: CollectingSink,
    }

    fn scan(source: &str) -> Scanned {
        let catalog = Catalog::standard();
        let mut reporter = Reporter::new(&catalog, CollectingSink::new());
        let tokens = Scanner::new(source, &mut reporter)
            .scan_tokens()
            .iter()
            .map(|t| (t.kind(), t.lexeme().to_string(), t.literal().clone(), t.line()))
            .collect();
        Scanned {
            tokens,
            sink: reporter.into_sink(),
        }
    }

    fn text(s: &str) -> Literal {
        Literal::Text(s.to_string())
    }

    fn failed(result: PResult<Piece>) -> Vec<LexError> {
        match result {
            Err(ErrMode::Cut(context)) => context.context().cloned().collect(),
            other => panic!("expected a committed failure, got {other:?}"),
        }
    }

    #[test]
    fn test_escape_fragments() {
        let mut input = LocatingSlice::new("\\t\\q\\");

        assert_eq!(escape(&mut input).ok(), Some(Fragment::Char('\t')));
        assert_eq!(
            escape(&mut input).ok(),
            Some(Fragment::Invalid { at: 2, escaped: 'q' })
        );
        assert_eq!(escape(&mut input).ok(), Some(Fragment::Dangling { at: 4 }));
    }

    #[test]
    fn test_string_literal_stops_after_closing_quote() {
        let mut input = LocatingSlice::new("'a\"b' rest");

        let piece = string_literal(&mut input).ok();
        assert_eq!(piece, Some(Piece::literal(TokenKind::String, text("a\"b"))));
        assert_eq!(input.to_string(), " rest");
    }

    #[test]
    fn test_invalid_escape_then_unterminated() {
        let mut input = LocatingSlice::new("\"\\q");

        let errors = failed(string_literal(&mut input));
        let codes: Vec<ErrorCode> = errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::ScannerInvalidEscapeSequence,
                ErrorCode::ScannerUnterminatedString
            ]
        );
        assert!(input.to_string().is_empty());
    }

    #[test]
    fn test_raw_string_parser() {
        let mut input = LocatingSlice::new("`a\\b`c");

        assert_eq!(
            raw_string(&mut input).ok(),
            Some(Piece::literal(TokenKind::String, text("a\\b")))
        );
        assert_eq!(input.to_string(), "c");
    }

    #[test]
    fn test_both_quote_styles() {
        let scanned = scan(r#""double" 'single'"#);

        assert_eq!(scanned.tokens[0].0, TokenKind::String);
        assert_eq!(scanned.tokens[0].1, "\"double\"");
        assert_eq!(scanned.tokens[0].2, text("double"));
        assert_eq!(scanned.tokens[1].2, text("single"));
        assert!(scanned.sink.is_empty());
    }

    #[test]
    fn test_other_quote_needs_no_escape() {
        let scanned = scan(r#""it's" 'say "hi"'"#);

        assert_eq!(scanned.tokens[0].2, text("it's"));
        assert_eq!(scanned.tokens[1].2, text("say \"hi\""));
    }

    #[test]
    fn test_escapes_are_decoded() {
        let scanned = scan(r#""a\nb\tc\\d\"e\'f""#);

        assert_eq!(scanned.tokens[0].2, text("a\nb\tc\\d\"e'f"));
        assert!(scanned.sink.is_empty());
    }

    #[test]
    fn test_invalid_escape_is_kept_and_reported() {
        let scanned = scan(r#"  "a\qb""#);

        assert_eq!(scanned.tokens[0].0, TokenKind::String);
        assert_eq!(scanned.tokens[0].2, text("a\\qb"));

        let diag = &scanned.sink.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::ScannerInvalidEscapeSequence));
        assert_eq!(diag.message(), "Invalid escape sequence: '\\q'.");
        let location = diag.location().expect("location");
        assert_eq!(location.column(), 5);
        assert_eq!(location.span_len(), 2);
    }

    #[test]
    fn test_escaped_line_break_message_stays_on_one_line() {
        let scanned = scan("\"a\\\nb\"");

        assert_eq!(scanned.tokens[0].0, TokenKind::String);
        assert_eq!(scanned.tokens[0].2, text("a\\\nb"));

        let diag = &scanned.sink.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::ScannerInvalidEscapeSequence));
        assert_eq!(diag.message(), "Invalid escape sequence: '\\\\n'.");
        assert!(!diag.message().contains('\n'));
    }

    #[test]
    fn test_multiline_string_reports_closing_line() {
        let scanned = scan("\"one\ntwo\"");

        assert_eq!(scanned.tokens[0].2, text("one\ntwo"));
        assert_eq!(scanned.tokens[0].3, 2);
        assert_eq!(scanned.tokens[1].0, TokenKind::EndOfFile);
        assert_eq!(scanned.tokens[1].3, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let scanned = scan("x = \"abc");

        let kinds: Vec<TokenKind> = scanned.tokens.iter().map(|t| t.0).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Error,
                TokenKind::EndOfFile
            ]
        );
        assert_eq!(scanned.tokens[2].1, "\"abc");

        let diag = &scanned.sink.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::ScannerUnterminatedString));
        let location = diag.location().expect("location");
        assert_eq!(location.column(), 5);
        assert_eq!(location.span_len(), 1);
    }

    #[test]
    fn test_unterminated_escape_reports_once() {
        let scanned = scan("\"abc\\");

        assert_eq!(scanned.tokens[0].0, TokenKind::Error);
        assert_eq!(scanned.sink.len(), 1);

        let diag = &scanned.sink.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::ScannerUnterminatedEscapeSequence));
        assert_eq!(diag.location().map(|l| l.column()), Some(5));
    }

    #[test]
    fn test_raw_string_is_verbatim() {
        let scanned = scan(r"`a\nb`");

        assert_eq!(scanned.tokens[0].0, TokenKind::String);
        assert_eq!(scanned.tokens[0].1, r"`a\nb`");
        assert_eq!(scanned.tokens[0].2, text(r"a\nb"));
    }

    #[test]
    fn test_empty_raw_string() {
        let scanned = scan("``");

        assert_eq!(scanned.tokens[0].2, text(""));
    }

    #[test]
    fn test_raw_string_then_unterminated_raw_string() {
        let scanned = scan("`raw` `unterminated");

        assert_eq!(scanned.tokens[0].0, TokenKind::String);
        assert_eq!(scanned.tokens[0].2, text("raw"));
        assert_eq!(scanned.tokens[1].0, TokenKind::Error);
        assert_eq!(scanned.tokens[2].0, TokenKind::EndOfFile);

        assert_eq!(scanned.sink.len(), 1);
        let diag = &scanned.sink.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::ScannerUnterminatedRawString));
        assert_eq!(diag.location().map(|l| l.column()), Some(7));
    }
}
