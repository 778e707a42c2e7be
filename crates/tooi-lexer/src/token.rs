//! Token types for the Tooi language.
//!
//! A [`Token`] pairs a [`TokenKind`] with the exact source slice that produced
//! it, the decoded [`Literal`] value (if any) and the line it ended on.

use std::fmt;

use crate::span::Span;

/// Lexical categories of the Tooi language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,
    Dot,          // .
    Minus,        // -
    Plus,         // +
    Semicolon,    // ;
    Slash,        // /
    Asterisk,     // *
    At,           // @
    Hashtag,      // #
    Dollar,       // $
    Question,     // ?
    Colon,        // :
    Caret,        // ^
    Percent,      // %
    Ampersand,    // &
    Pipe,         // |
    Tilde,        // ~

    // One or two character tokens
    Bang,           // !
    BangEqual,      // !=
    Equal,          // =
    EqualEqual,     // ==
    Greater,        // >
    GreaterEqual,   // >=
    Less,           // <
    LessEqual,      // <=
    ColonColon,     // ::
    MinusGreater,   // ->
    EqualGreater,   // =>
    GreaterGreater, // >>

    // Literals
    Identifier,
    String,
    Number,

    // Control flow and literal keywords
    If,
    Else,
    For,
    While,
    Done,
    Skip,
    True,
    False,
    Nil,
    And,
    Or,
    Not,

    // Operation and declaration keywords
    Add,
    Export,
    With,
    SelfKw,
    As,
    Call,
    Let,
    Set,
    New,
    Do,
    Be,
    Of,
    In,

    // Modifier keywords
    Public,
    Private,
    Runnable,
    Pure,
    Param,

    // Primitive type keywords
    Int,
    Float,
    Byte,
    StringType,
    Bool,
    Uint,
    Proto,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float32,
    Float64,

    /// A lexical error was recovered from at this position.
    Error,
    /// End of input.
    EndOfFile,
}

impl TokenKind {
    /// Resolve an identifier-shaped word against the keyword table.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "while" => TokenKind::While,
            "done" => TokenKind::Done,
            "skip" => TokenKind::Skip,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "nil" => TokenKind::Nil,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,

            "add" => TokenKind::Add,
            "export" => TokenKind::Export,
            "with" => TokenKind::With,
            "self" => TokenKind::SelfKw,
            "as" => TokenKind::As,
            "call" => TokenKind::Call,
            "let" => TokenKind::Let,
            "set" => TokenKind::Set,
            "new" => TokenKind::New,
            "do" => TokenKind::Do,
            "be" => TokenKind::Be,
            "of" => TokenKind::Of,
            "in" => TokenKind::In,

            "public" => TokenKind::Public,
            "private" => TokenKind::Private,
            "runnable" => TokenKind::Runnable,
            "pure" => TokenKind::Pure,
            "param" => TokenKind::Param,

            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "byte" => TokenKind::Byte,
            "string" => TokenKind::StringType,
            "bool" => TokenKind::Bool,
            "uint" => TokenKind::Uint,
            "proto" => TokenKind::Proto,
            "int32" => TokenKind::Int32,
            "int64" => TokenKind::Int64,
            "uint32" => TokenKind::Uint32,
            "uint64" => TokenKind::Uint64,
            "float32" => TokenKind::Float32,
            "float64" => TokenKind::Float64,

            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for keyword categories.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Done
                | TokenKind::Skip
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::Add
                | TokenKind::Export
                | TokenKind::With
                | TokenKind::SelfKw
                | TokenKind::As
                | TokenKind::Call
                | TokenKind::Let
                | TokenKind::Set
                | TokenKind::New
                | TokenKind::Do
                | TokenKind::Be
                | TokenKind::Of
                | TokenKind::In
                | TokenKind::Public
                | TokenKind::Private
                | TokenKind::Runnable
                | TokenKind::Pure
                | TokenKind::Param
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Byte
                | TokenKind::StringType
                | TokenKind::Bool
                | TokenKind::Uint
                | TokenKind::Proto
                | TokenKind::Int32
                | TokenKind::Int64
                | TokenKind::Uint32
                | TokenKind::Uint64
                | TokenKind::Float32
                | TokenKind::Float64
        )
    }

    /// Returns the stable upper-snake name of this kind (e.g. `"LEFT_PAREN"`).
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Slash => "SLASH",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::At => "AT",
            TokenKind::Hashtag => "HASHTAG",
            TokenKind::Dollar => "DOLLAR",
            TokenKind::Question => "QUESTION",
            TokenKind::Colon => "COLON",
            TokenKind::Caret => "CARET",
            TokenKind::Percent => "PERCENT",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::Pipe => "PIPE",
            TokenKind::Tilde => "TILDE",

            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::ColonColon => "COLON_COLON",
            TokenKind::MinusGreater => "MINUS_GREATER",
            TokenKind::EqualGreater => "EQUAL_GREATER",
            TokenKind::GreaterGreater => "GREATER_GREATER",

            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",

            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::While => "WHILE",
            TokenKind::Done => "DONE",
            TokenKind::Skip => "SKIP",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Nil => "NIL",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Add => "ADD",
            TokenKind::Export => "EXPORT",
            TokenKind::With => "WITH",
            TokenKind::SelfKw => "SELF",
            TokenKind::As => "AS",
            TokenKind::Call => "CALL",
            TokenKind::Let => "LET",
            TokenKind::Set => "SET",
            TokenKind::New => "NEW",
            TokenKind::Do => "DO",
            TokenKind::Be => "BE",
            TokenKind::Of => "OF",
            TokenKind::In => "IN",
            TokenKind::Public => "PUBLIC",
            TokenKind::Private => "PRIVATE",
            TokenKind::Runnable => "RUNNABLE",
            TokenKind::Pure => "PURE",
            TokenKind::Param => "PARAM",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Byte => "BYTE",
            TokenKind::StringType => "STRING_TYPE",
            TokenKind::Bool => "BOOL",
            TokenKind::Uint => "UINT",
            TokenKind::Proto => "PROTO",
            TokenKind::Int32 => "INT32",
            TokenKind::Int64 => "INT64",
            TokenKind::Uint32 => "UINT32",
            TokenKind::Uint64 => "UINT64",
            TokenKind::Float32 => "FLOAT32",
            TokenKind::Float64 => "FLOAT64",

            TokenKind::Error => "ERROR",
            TokenKind::EndOfFile => "END_OF_FILE",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The decoded value carried by a token.
///
/// Integer literals are always stored as an unsigned magnitude, whatever
/// width or signedness their suffix requests; a leading minus is its own
/// token. Width checks belong to a later stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Literal {
    #[default]
    None,
    /// Decoded string or identifier content.
    Text(String),
    /// Integer magnitude.
    Magnitude(u64),
    /// Any literal with a fractional form or a floating-point suffix.
    Double(f64),
}

impl Literal {
    /// Returns the text content, if this is a text literal.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the magnitude, if this is an integer literal.
    pub fn as_magnitude(&self) -> Option<u64> {
        match self {
            Literal::Magnitude(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value, if this is a floating-point literal.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Literal::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns `true` if this literal is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Magnitude(_) | Literal::Double(_))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => write!(f, "<none>"),
            Literal::Text(text) => write!(f, "\"{text}\""),
            Literal::Magnitude(value) => write!(f, "{value}u64"),
            Literal::Double(value) => write!(f, "{value}d"),
        }
    }
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    kind: TokenKind,
    lexeme: &'src str,
    literal: Literal,
    line: usize,
    span: Span,
}

impl<'src> Token<'src> {
    pub fn new(
        kind: TokenKind,
        lexeme: &'src str,
        literal: Literal,
        line: usize,
        span: Span,
    ) -> Self {
        Self {
            kind,
            lexeme,
            literal,
            line,
            span,
        }
    }

    /// Create the end-of-file token for input of `len` bytes ending on `line`.
    pub fn end_of_file(line: usize, len: usize) -> Self {
        Self::new(TokenKind::EndOfFile, "", Literal::None, line, Span::new(len..len))
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The verbatim source slice that produced this token.
    pub fn lexeme(&self) -> &'src str {
        self.lexeme
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    /// 1-based line on which the token ended.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token [Type: {}, Lexeme: '{}', Literal: {}, Line: {}]",
            self.kind, self.lexeme, self.literal, self.line
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("self"), Some(TokenKind::SelfKw));
        assert_eq!(TokenKind::keyword("float64"), Some(TokenKind::Float64));
        assert_eq!(TokenKind::keyword("While"), None);
        assert_eq!(TokenKind::keyword("whilst"), None);
    }

    #[test]
    fn test_keyword_lookup_agrees_with_is_keyword() {
        for word in ["if", "nil", "runnable", "proto", "uint32"] {
            let kind = TokenKind::keyword(word).expect("keyword");
            assert!(kind.is_keyword(), "{word} should be a keyword");
        }
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(!TokenKind::EndOfFile.is_keyword());
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::None.to_string(), "<none>");
        assert_eq!(Literal::Text("hi".to_string()).to_string(), "\"hi\"");
        assert_eq!(Literal::Magnitude(42).to_string(), "42u64");
        assert_eq!(Literal::Double(3.5).to_string(), "3.5d");
    }

    #[test]
    fn test_literal_accessors() {
        assert_eq!(Literal::Magnitude(7).as_magnitude(), Some(7));
        assert_eq!(Literal::Magnitude(7).as_double(), None);
        assert_eq!(Literal::Double(0.5).as_double(), Some(0.5));
        assert_eq!(Literal::Text("x".into()).as_text(), Some("x"));
        assert!(Literal::Double(1.0).is_numeric());
        assert!(!Literal::None.is_numeric());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(
            TokenKind::Number,
            "42",
            Literal::Magnitude(42),
            3,
            Span::new(0..2),
        );

        assert_eq!(
            token.to_string(),
            "Token [Type: NUMBER, Lexeme: '42', Literal: 42u64, Line: 3]"
        );
    }

    #[test]
    fn test_end_of_file_token() {
        let eof = Token::end_of_file(4, 17);

        assert_eq!(eof.kind(), TokenKind::EndOfFile);
        assert_eq!(eof.lexeme(), "");
        assert_eq!(eof.line(), 4);
        assert_eq!(eof.span(), Span::new(17..17));
    }
}
