//! Token types for the lexer.

use std::borrow::Cow;

use serde::{Serialize, Serializer};

use super::Range;

/// Keywords of the query language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Use,
    Select,
    From,
    Where,
    Is,
    Not,
    Null,
    And,
    Or,
    Like,
    Order,
    By,
    Insert,
    Into,
    Values,
    Delete,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "use" => Some(Self::Use),
            "select" => Some(Self::Select),
            "from" => Some(Self::From),
            "where" => Some(Self::Where),
            "is" => Some(Self::Is),
            "not" => Some(Self::Not),
            "null" => Some(Self::Null),
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "like" => Some(Self::Like),
            "order" => Some(Self::Order),
            "by" => Some(Self::By),
            "insert" => Some(Self::Insert),
            "into" => Some(Self::Into),
            "values" => Some(Self::Values),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Returns the SQL representation of the keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Use => "USE",
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Is => "IS",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Delete => "DELETE",
        }
    }

    /// Returns the lowercase tag used as the token kind.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Use => "use",
            Self::Select => "select",
            Self::From => "from",
            Self::Where => "where",
            Self::Is => "is",
            Self::Not => "not",
            Self::Null => "null",
            Self::And => "and",
            Self::Or => "or",
            Self::Like => "like",
            Self::Order => "order",
            Self::By => "by",
            Self::Insert => "insert",
            Self::Into => "into",
            Self::Values => "values",
            Self::Delete => "delete",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A keyword such as `SELECT`.
    Keyword(Keyword),
    /// A bare or quoted identifier.
    Identifier,
    /// An integer literal. The digits are kept as text.
    Int,
    /// A quoted string literal.
    String,

    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// .
    Dot,
    /// ;
    Semicolon,
    /// *
    Star,
    /// +
    Plus,
    /// -
    Minus,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,

    /// Any other single character. The parser reports it as unexpected.
    Other(char),

    /// End of input. Never produced by the lexer, only synthesized by the
    /// parser when it reads past the last token.
    Eof,
}

impl TokenKind {
    /// Classifies a single character that does not start any longer token.
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        match c {
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            ',' => Self::Comma,
            '.' => Self::Dot,
            ';' => Self::Semicolon,
            '*' => Self::Star,
            '+' => Self::Plus,
            '-' => Self::Minus,
            '/' => Self::Slash,
            '%' => Self::Percent,
            '=' => Self::Eq,
            '<' => Self::Lt,
            '>' => Self::Gt,
            other => Self::Other(other),
        }
    }

    /// Returns the string tag of this kind: the lowercase keyword,
    /// `identifier`, `int`, `string`, `eof` or the operator text.
    #[must_use]
    pub fn tag(&self) -> Cow<'static, str> {
        let tag = match self {
            Self::Keyword(kw) => kw.tag(),
            Self::Identifier => "identifier",
            Self::Int => "int",
            Self::String => "string",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Star => "*",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eof => "eof",
            Self::Other(c) => return Cow::Owned(c.to_string()),
        };
        Cow::Borrowed(tag)
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

/// A token with its decoded contents and its location in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// For quoted strings and identifiers, the text without quotes and with
    /// doubled quotes collapsed. For everything else, the exact lexeme.
    pub contents: String,
    /// The location in the source code.
    pub location: Range,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, contents: impl Into<String>, location: Range) -> Self {
        Self {
            kind,
            contents: contents.into(),
            location,
        }
    }

    /// Creates the synthetic end-of-input token.
    #[must_use]
    pub fn eof(location: Range) -> Self {
        Self::new(TokenKind::Eof, "", location)
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
