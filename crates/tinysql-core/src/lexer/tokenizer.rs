//! Tokenizer implementation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use super::{Keyword, Point, Range, Token, TokenKind};
use crate::diagnostic::{self, Diagnostic};
use crate::dialect::Dialect;

static IDENTIFIER_START: LazyLock<Regex> = LazyLock::new(|| {
    // Emoji_Presentation rather than Emoji: the latter also matches ASCII
    // digits, which only render as emoji with a modifier.
    Regex::new(r"^[_\p{Alphabetic}\p{Lo}\p{Emoji_Presentation}]$")
        .expect("identifier start pattern is valid")
});

static IDENTIFIER_CONTINUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[_\p{Alphabetic}\p{Lo}\p{Emoji_Presentation}\p{Nd}]$")
        .expect("identifier continuation pattern is valid")
});

// U+FEFF is not White_Space but shows up as a byte order mark.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{White_Space}\x{FEFF}]$").expect("whitespace pattern is valid")
});

fn matches_char(pattern: &Regex, c: char) -> bool {
    let mut buf = [0; 4];
    pattern.is_match(c.encode_utf8(&mut buf))
}

/// Returns true if `c` can start an unquoted identifier or keyword.
#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    matches_char(&IDENTIFIER_START, c)
}

/// Returns true if `c` can continue an unquoted identifier or keyword.
#[must_use]
pub fn is_identifier_continue(c: char) -> bool {
    matches_char(&IDENTIFIER_CONTINUE, c)
}

/// Returns true if `c` is Unicode whitespace, including non-breaking spaces
/// and the byte order mark.
#[must_use]
pub fn is_space(c: char) -> bool {
    matches_char(&WHITESPACE, c)
}

/// The output of the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LexResult {
    /// Tokens in source order. There is no trailing EOF token.
    pub tokens: Vec<Token>,
    /// Style warnings.
    pub warnings: Vec<Diagnostic>,
    /// Lexical errors.
    pub errors: Vec<Diagnostic>,
}

/// A lexer that tokenizes query source text.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// Decides what a double quote delimits.
    dialect: Dialect,
    /// The current byte position.
    pos: usize,
    /// Current line, 1-indexed.
    line: u32,
    /// Current column in code points, 0-indexed.
    column: u32,
    /// Where the next token's range starts.
    last: Point,
    warnings: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str, dialect: Dialect) -> Self {
        Self {
            input,
            dialect,
            pos: 0,
            line: 1,
            column: 0,
            last: Point::start(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn current_point(&self) -> Point {
        Point::new(self.line, self.column)
    }

    /// Skips whitespace and comments, moving the start of the next token past
    /// them.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(is_space) {
                self.advance();
            }

            // Single-line comments (-- ...)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Block comments (/* ... */), not nested. An unterminated one
            // runs to the end of input.
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
        self.last = self.current_point();
    }

    /// Creates a range from the end of the previous token to the current
    /// position.
    fn make_location(&mut self) -> Range {
        let here = self.current_point();
        let location = Range::new(self.last, here);
        self.last = here;
        location
    }

    fn warn(&mut self, message: &str, location: Range) {
        trace!(diagnostic = message, ?location, "lexer warning");
        self.warnings.push(Diagnostic::new(message, location));
    }

    fn error(&mut self, message: &str, location: Range) {
        trace!(diagnostic = message, ?location, "lexer error");
        self.errors.push(Diagnostic::new(message, location));
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_continue) {
            self.advance();
        }

        let text = &input[start..self.pos];
        let location = self.make_location();

        match Keyword::from_str(text) {
            Some(keyword) => {
                if text != text.to_uppercase() {
                    self.warn(diagnostic::KEYWORD_CASE, location);
                }
                Token::new(TokenKind::Keyword(keyword), text, location)
            }
            None => Token::new(TokenKind::Identifier, text, location),
        }
    }

    /// Scans an integer. Any number of digits is accepted, the value is never
    /// converted.
    fn scan_int(&mut self) -> Token {
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        let location = self.make_location();
        Token::new(TokenKind::Int, &input[start..self.pos], location)
    }

    /// Scans a quoted string or identifier. A doubled quote stands for one
    /// quote character.
    fn scan_quoted(&mut self, quote: char, kind: TokenKind) -> Token {
        self.advance(); // consume opening quote
        let mut contents = String::new();

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        contents.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => {
                    contents.push(c);
                    self.advance();
                }
                None => {
                    let location = self.make_location();
                    self.error(diagnostic::UNCLOSED_QUOTE, location);
                    return Token::new(kind, contents, location);
                }
            }
        }

        self.advance(); // consume closing quote
        let location = self.make_location();
        Token::new(kind, contents, location)
    }

    /// Scans one operator or punctuation character, or one of the two
    /// character operators `<=`, `<>` and `>=`.
    fn scan_symbol(&mut self, c: char) -> Token {
        let input = self.input;
        let start = self.pos;
        self.advance();
        let kind = match (c, self.peek()) {
            ('<', Some('=')) => Some(TokenKind::LtEq),
            ('<', Some('>')) => Some(TokenKind::NotEq),
            ('>', Some('=')) => Some(TokenKind::GtEq),
            _ => None,
        };
        let kind = match kind {
            Some(kind) => {
                self.advance();
                kind
            }
            None => TokenKind::from_char(c),
        };
        let location = self.make_location();
        Token::new(kind, &input[start..self.pos], location)
    }

    /// Scans the next token, or returns `None` at the end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace_and_comments();

        let c = self.peek()?;
        let token = if is_identifier_start(c) {
            self.scan_identifier()
        } else if c.is_ascii_digit() {
            self.scan_int()
        } else if let Some(kind) = self.dialect.quoted_kind(c) {
            self.scan_quoted(c, kind)
        } else {
            // Unknown characters are passed on as-is; the parser reports them
            // as unexpected input.
            self.scan_symbol(c)
        };
        Some(token)
    }

    /// Tokenizes the entire input.
    #[must_use]
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        debug!(
            dialect = %self.dialect,
            tokens = tokens.len(),
            warnings = self.warnings.len(),
            errors = self.errors.len(),
            "lexed input"
        );
        LexResult {
            tokens,
            warnings: self.warnings,
            errors: self.errors,
        }
    }
}

/// Tokenizes `source` using the quoting rules of `dialect`.
#[must_use]
pub fn lex(source: &str, dialect: Dialect) -> LexResult {
    Lexer::new(source, dialect).lex()
}
