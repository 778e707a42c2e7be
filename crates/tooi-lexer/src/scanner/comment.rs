//! Whitespace and comments.

use winnow::{
    Parser as _,
    combinator::{alt, opt, preceded},
    stream::Location,
    token::{take_until, take_while},
};

use super::{Input, LexError, PResult, Piece, fail, rest_of_input};
use crate::error::ErrorCode;

/// Parse one run of whitespace, a line comment or a block comment
pub(super) fn trivia(input: &mut Input<'_>) -> PResult<Piece> {
    alt((whitespace, line_comment, block_comment))
        .value(Piece::Trivia)
        .parse_next(input)
}

fn whitespace(input: &mut Input<'_>) -> PResult<()> {
    take_while(1.., [' ', '\t', '\r', '\n'])
        .void()
        .parse_next(input)
}

/// Parse line comment starting with '//'
fn line_comment(input: &mut Input<'_>) -> PResult<()> {
    preceded("//", take_while(0.., |c| c != '\n'))
        .void()
        .parse_next(input)
}

/// Parse a non-nesting `/* ... */` comment.
///
/// An unterminated comment runs to the end of input and is reported at its
/// opening marker. It produces no token.
fn block_comment(input: &mut Input<'_>) -> PResult<()> {
    let start = input.current_token_start();
    "/*".parse_next(input)?;

    if opt((take_until(0.., "*/"), "*/"))
        .parse_next(input)?
        .is_some()
    {
        return Ok(());
    }

    rest_of_input(input)?;
    fail(
        input,
        [LexError::new(ErrorCode::ScannerUnterminatedBlockComment, start, start + 2).without_token()],
    )
}
