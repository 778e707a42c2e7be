//! The Tooi scanner.
//!
//! Every token shape is a small winnow parser over a [`LocatingSlice`]. The
//! [`Scanner`] runs them in a recovery loop: a parser either yields a
//! [`Piece`] or fails with the lexical errors it found, leaving the input
//! just past the offending text. A failure is reported once through the
//! [`Reporter`], a [`TokenKind::Error`] token marks the region, and scanning
//! resumes where the parser stopped.

mod comment;
mod lines;
mod number;
mod string;

use std::fmt::Display;

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::alt,
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, one_of, take_while},
};

use crate::{
    error::{ErrorCode, SourceLocation},
    report::{DiagnosticSink, Reporter},
    span::Span,
    token::{Literal, Token, TokenKind},
};

use lines::LineIndex;

type Input<'src> = LocatingSlice<&'src str>;
type PResult<O> = ModalResult<O, ContextError<LexError>>;

/// Characters that start a punctuation, operator or string token.
const PUNCTUATION: &str = "()[]{},.-+;/*@#$?:^%&|~!=<>\"'`";

/// Identifier and numeric-suffix characters.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// A character that cannot begin any token.
fn is_invalid(c: char) -> bool {
    !c.is_whitespace() && !is_word_char(c) && !PUNCTUATION.contains(c)
}

/// A lexical error found by one of the parsers.
///
/// Attached to winnow errors as context. `start..end` is the byte range the
/// diagnostic points at, which is not always the whole consumed text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexError {
    code: ErrorCode,
    start: usize,
    end: usize,
    args: Vec<String>,
    /// Whether the consumed text becomes an ERROR token.
    error_token: bool,
}

impl LexError {
    fn new(code: ErrorCode, start: usize, end: usize) -> Self {
        Self {
            code,
            start,
            end,
            args: Vec::new(),
            error_token: true,
        }
    }

    fn with_arg(mut self, arg: impl Display) -> Self {
        self.args.push(arg.to_string());
        self
    }

    fn without_token(mut self) -> Self {
        self.error_token = false;
        self
    }
}

/// Commit to a failure carrying `errors` in report order. The last error
/// decides whether an ERROR token is emitted.
fn fail<O>(input: &Input<'_>, errors: impl IntoIterator<Item = LexError>) -> PResult<O> {
    let checkpoint = input.checkpoint();
    let err = errors
        .into_iter()
        .fold(ContextError::new(), |err, context| {
            err.add_context(input, &checkpoint, context)
        });
    Err(ErrMode::Cut(err))
}

/// Consume everything up to the end of input.
fn rest_of_input<'src>(input: &mut Input<'src>) -> PResult<&'src str> {
    take_while(0.., |_: char| true).parse_next(input)
}

/// What a single parser step produced.
#[derive(Debug, Clone, PartialEq)]
enum Piece {
    /// Whitespace or a comment.
    Trivia,
    /// A token, plus errors that did not stop it from being formed.
    Token {
        kind: TokenKind,
        literal: Literal,
        errors: Vec<LexError>,
    },
}

impl Piece {
    fn token(kind: TokenKind) -> Self {
        Self::literal(kind, Literal::None)
    }

    fn literal(kind: TokenKind, literal: Literal) -> Self {
        Piece::Token {
            kind,
            literal,
            errors: Vec::new(),
        }
    }
}

/// Parse identifiers and keywords
fn identifier(input: &mut Input<'_>) -> PResult<Piece> {
    (one_of(is_word_start), take_while(0.., is_word_char))
        .take()
        .map(|text: &str| match TokenKind::keyword(text) {
            Some(kind) => Piece::token(kind),
            None => Piece::literal(TokenKind::Identifier, Literal::Text(text.to_string())),
        })
        .parse_next(input)
}

/// Parse two-character operators
fn multi_char_operator(input: &mut Input<'_>) -> PResult<Piece> {
    alt((
        literal("!=").value(TokenKind::BangEqual),
        literal("==").value(TokenKind::EqualEqual),
        literal("=>").value(TokenKind::EqualGreater),
        literal("<=").value(TokenKind::LessEqual),
        literal(">=").value(TokenKind::GreaterEqual),
        literal(">>").value(TokenKind::GreaterGreater),
        literal("->").value(TokenKind::MinusGreater),
        literal("::").value(TokenKind::ColonColon),
    ))
    .map(Piece::token)
    .parse_next(input)
}

fn single_char_kind(c: char) -> Option<TokenKind> {
    let kind = match c {
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '{' => TokenKind::LeftBrace,
        '}' => TokenKind::RightBrace,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Dot,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        ';' => TokenKind::Semicolon,
        '/' => TokenKind::Slash,
        '*' => TokenKind::Asterisk,
        '@' => TokenKind::At,
        '#' => TokenKind::Hashtag,
        '$' => TokenKind::Dollar,
        '?' => TokenKind::Question,
        ':' => TokenKind::Colon,
        '^' => TokenKind::Caret,
        '%' => TokenKind::Percent,
        '&' => TokenKind::Ampersand,
        '|' => TokenKind::Pipe,
        '~' => TokenKind::Tilde,
        '!' => TokenKind::Bang,
        '=' => TokenKind::Equal,
        '<' => TokenKind::Less,
        '>' => TokenKind::Greater,
        _ => return None,
    };
    Some(kind)
}

/// Parse single character tokens
fn single_char_token(input: &mut Input<'_>) -> PResult<Piece> {
    any.verify_map(single_char_kind)
        .map(Piece::token)
        .parse_next(input)
}

/// Swallow one character no other parser accepts, plus any run of characters
/// that cannot start a token, and fail with a single error for all of it.
fn unexpected_sequence(input: &mut Input<'_>) -> PResult<Piece> {
    let start = input.current_token_start();
    let text = (any, take_while(0.., is_invalid)).take().parse_next(input)?;
    let end = input.current_token_start();
    fail(
        input,
        [LexError::new(ErrorCode::ScannerUnexpectedCharacterSequence, start, end).with_arg(text)],
    )
}

/// Parse one piece of source text
fn piece(input: &mut Input<'_>) -> PResult<Piece> {
    alt((
        comment::trivia,         // Must come before single char '/'
        string::string_literal,  // Must come before any single char
        string::raw_string,
        number::number,
        identifier,
        multi_char_operator,     // Must come before single char operators
        single_char_token,
        unexpected_sequence,     // Accepts anything left
    ))
    .parse_next(input)
}

/// One scanning run over a complete source string.
pub struct Scanner<'src, 'r, 'c, S> {
    source: &'src str,
    lines: LineIndex<'src>,
    tokens: Vec<Token<'src>>,
    reporter: &'r mut Reporter<'c, S>,
}

impl<'src, 'r, 'c, S: DiagnosticSink> Scanner<'src, 'r, 'c, S> {
    pub fn new(source: &'src str, reporter: &'r mut Reporter<'c, S>) -> Self {
        Self {
            source,
            lines: LineIndex::new(source),
            tokens: Vec::new(),
            reporter,
        }
    }

    /// Scan the whole source.
    ///
    /// The result always ends with exactly one [`TokenKind::EndOfFile`].
    pub fn scan_tokens(mut self) -> Vec<Token<'src>> {
        debug!(bytes = self.source.len(); "Scanning source");

        let mut input = LocatingSlice::new(self.source);
        while !input.is_empty() {
            let start = input.current_token_start();
            let checkpoint = input.checkpoint();

            match piece(&mut input) {
                Ok(Piece::Trivia) => {}
                Ok(Piece::Token {
                    kind,
                    literal,
                    errors,
                }) => {
                    for error in &errors {
                        self.report(error);
                    }
                    self.push_token(kind, literal, start, input.current_token_start());
                }
                Err(err) => {
                    let context = match err {
                        ErrMode::Backtrack(context) | ErrMode::Cut(context) => context,
                        ErrMode::Incomplete(_) => ContextError::new(),
                    };
                    let mut errors: Vec<LexError> = context.context().cloned().collect();

                    if errors.is_empty() || input.current_token_start() == start {
                        // Nothing usable: skip one character so scanning moves on.
                        input.reset(&checkpoint);
                        input.next_token();
                        let end = input.current_token_start();
                        errors = vec![
                            LexError::new(ErrorCode::ScannerUnexpectedCharacterSequence, start, end)
                                .with_arg(&self.source[start..end]),
                        ];
                    }
                    self.recover(&errors, start, input.current_token_start());
                }
            }
        }

        let len = self.source.len();
        self.tokens
            .push(Token::end_of_file(self.lines.line_of(len), len));

        debug!(
            tokens = self.tokens.len(),
            had_error = self.reporter.had_error();
            "Scan complete"
        );
        self.tokens
    }

    /// Report every error of a failed parser and mark `start..end` with an
    /// ERROR token unless the last error says otherwise.
    fn recover(&mut self, errors: &[LexError], start: usize, end: usize) {
        for error in errors {
            self.report(error);
        }
        if errors.last().is_some_and(|error| error.error_token) {
            self.push_token(TokenKind::Error, Literal::None, start, end);
        }
    }

    fn push_token(&mut self, kind: TokenKind, literal: Literal, start: usize, end: usize) {
        let token = Token::new(
            kind,
            &self.source[start..end],
            literal,
            self.lines.line_of(end),
            Span::new(start..end),
        );
        trace!(token:%; "Scanned token");
        self.tokens.push(token);
    }

    fn report(&mut self, error: &LexError) {
        let location = SourceLocation::new(
            self.lines.line_of(error.start),
            self.lines.column(error.start),
            self.source[error.start..error.end].chars().count(),
            self.lines.line_text(error.start),
        )
        .with_span(Span::new(error.start..error.end));
        let args: Vec<&dyn Display> = error.args.iter().map(|arg| arg as &dyn Display).collect();

        debug!(code:% = error.code, line = location.line(); "Lexical error");
        self.reporter.report(location, error.code, &args);
    }
}
