//! Statement parser with per-statement error recovery.

use serde::Serialize;
use tracing::debug;

use super::error::SyntaxError;
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op,
};
use crate::ast::{
    BinaryOperator, Column, Command, ConstantExpr, DeleteCommand, Expr, InsertCommand,
    IntLiteral, Now, Null, SelectColumns, SelectCommand, StringLiteral, TableName,
    UnaryOperator, UseCommand,
};
use crate::dialect::Dialect;
use crate::diagnostic::{Diagnostic, CONSTANT_VALUES_ONLY, ONLY_NOW_SUPPORTED};
use crate::lexer::{lex, Keyword, LexResult, Point, Range, Token, TokenKind};

/// Maximum nesting depth of a single expression, both while parsing and in
/// the height of the resulting tree.
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// Where the statement loop is between two commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The next token must start a command.
    ReadyForCommand,
    /// A command was parsed; it must be followed by `;` or the end of input.
    ExpectingSeparator,
    /// A syntax error occurred; skip to the next `;`.
    Recovering,
}

/// Parser over a lexed token list.
///
/// The parser never fails as a whole. A syntax error discards the statement
/// it occurs in and parsing resumes after the next `;`.
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    /// Returned by `peek` once all tokens are consumed.
    eof: Token,
    errors: Vec<Diagnostic>,
    remaining_depth: usize,
}

impl Parser {
    /// Creates a parser over `tokens`, which must not contain an EOF token.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map_or_else(Point::start, |token| token.location.to);
        Self {
            tokens,
            index: 0,
            eof: Token::eof(Range::empty_at(end)),
            errors: Vec::new(),
            remaining_depth: MAX_EXPRESSION_DEPTH,
        }
    }

    /// Parses all commands, returning them together with the errors found.
    #[must_use]
    pub fn parse(mut self) -> (Vec<Command>, Vec<Diagnostic>) {
        let mut commands = Vec::new();
        let mut state = State::ReadyForCommand;

        loop {
            state = match state {
                State::ReadyForCommand => {
                    if self.at_end() {
                        break;
                    }
                    self.remaining_depth = MAX_EXPRESSION_DEPTH;
                    match self.parse_command() {
                        Ok(command) => {
                            debug!(
                                kind = command.kind(),
                                line = command.location().from.line,
                                "parsed command"
                            );
                            commands.push(command);
                            State::ExpectingSeparator
                        }
                        Err(error) => {
                            self.errors.push(error.into());
                            State::Recovering
                        }
                    }
                }
                State::ExpectingSeparator => {
                    if self.at_end() {
                        break;
                    }
                    match self.expect(TokenKind::Semicolon, "';' or the end of input") {
                        Ok(_) => State::ReadyForCommand,
                        Err(error) => {
                            self.errors.push(error.into());
                            State::Recovering
                        }
                    }
                }
                State::Recovering => {
                    let start = self.index;
                    while !self.at_end() && !self.check(TokenKind::Semicolon) {
                        self.index += 1;
                    }
                    // The separator belongs to the discarded statement.
                    if !self.at_end() {
                        self.index += 1;
                    }
                    debug!(discarded = self.index - start, "skipped to next statement");
                    State::ReadyForCommand
                }
            };
        }

        (commands, self.errors)
    }

    // --- Commands ---

    fn parse_command(&mut self) -> Result<Command, SyntaxError> {
        match self.peek().kind {
            TokenKind::Keyword(Keyword::Use) => Ok(Command::Use(self.parse_use()?)),
            TokenKind::Keyword(Keyword::Select) => Ok(Command::Select(self.parse_select()?)),
            TokenKind::Keyword(Keyword::Insert) => Ok(Command::Insert(self.parse_insert()?)),
            TokenKind::Keyword(Keyword::Delete) => Ok(Command::Delete(self.parse_delete()?)),
            _ => Err(SyntaxError::unexpected(
                self.peek(),
                "command (USE, SELECT, INSERT or DELETE)",
            )),
        }
    }

    fn parse_use(&mut self) -> Result<UseCommand, SyntaxError> {
        let keyword = self.advance();
        let database = self.expect(TokenKind::Identifier, "identifier")?;
        Ok(UseCommand {
            location: Range::between(keyword.location, database.location),
            database: database.contents,
        })
    }

    fn parse_select(&mut self) -> Result<SelectCommand, SyntaxError> {
        let keyword = self.advance();
        let columns = if self.check(TokenKind::Star) {
            self.advance();
            SelectColumns::All
        } else {
            SelectColumns::List(self.parse_column_list()?)
        };
        self.expect(TokenKind::Keyword(Keyword::From), "FROM clause")?;
        let table = self.parse_table_name()?;
        let where_condition = self.parse_where_opt()?;
        let order_by = self.parse_order_by_opt()?;

        let end = order_by
            .last()
            .map(|column| column.location)
            .or_else(|| where_condition.as_ref().map(Expr::location))
            .unwrap_or(table.location);
        Ok(SelectCommand {
            location: Range::between(keyword.location, end),
            table,
            columns,
            where_condition,
            order_by,
        })
    }

    fn parse_insert(&mut self) -> Result<InsertCommand, SyntaxError> {
        let keyword = self.advance();
        self.expect(TokenKind::Keyword(Keyword::Into), "'INTO'")?;
        let table = self.parse_table_name()?;
        self.expect(TokenKind::LeftParen, "'('")?;
        let columns = self.parse_column_list()?;
        self.expect(TokenKind::RightParen, "')'")?;
        self.expect(TokenKind::Keyword(Keyword::Values), "'VALUES'")?;
        self.expect(TokenKind::LeftParen, "'('")?;
        let values = self.parse_value_list()?;
        let closing = self.expect(TokenKind::RightParen, "')'")?;
        Ok(InsertCommand {
            location: Range::between(keyword.location, closing.location),
            table,
            columns,
            values,
        })
    }

    fn parse_delete(&mut self) -> Result<DeleteCommand, SyntaxError> {
        let keyword = self.advance();
        self.expect(TokenKind::Keyword(Keyword::From), "FROM clause")?;
        let table = self.parse_table_name()?;
        let where_condition = self.parse_where_opt()?;
        let end = where_condition
            .as_ref()
            .map_or(table.location, Expr::location);
        Ok(DeleteCommand {
            location: Range::between(keyword.location, end),
            table,
            where_condition,
        })
    }

    // --- Clauses ---

    fn parse_where_opt(&mut self) -> Result<Option<Expr>, SyntaxError> {
        if matches!(
            self.peek().kind,
            TokenKind::Eof | TokenKind::Semicolon | TokenKind::Keyword(Keyword::Order)
        ) {
            return Ok(None);
        }
        self.expect(
            TokenKind::Keyword(Keyword::Where),
            "WHERE clause or ORDER BY clause or end of command",
        )?;
        Ok(Some(self.parse_expression(0)?))
    }

    fn parse_order_by_opt(&mut self) -> Result<Vec<Column>, SyntaxError> {
        if matches!(self.peek().kind, TokenKind::Eof | TokenKind::Semicolon) {
            return Ok(Vec::new());
        }
        self.expect(
            TokenKind::Keyword(Keyword::Order),
            "ORDER BY clause or end of command",
        )?;
        self.expect(TokenKind::Keyword(Keyword::By), "'BY'")?;
        self.parse_column_list()
    }

    /// Parses a non-empty comma separated list of columns.
    fn parse_column_list(&mut self) -> Result<Vec<Column>, SyntaxError> {
        let mut columns = vec![self.parse_column()?];
        while self.check(TokenKind::Comma) {
            self.advance();
            columns.push(self.parse_column()?);
        }
        Ok(columns)
    }

    /// Parses the value list of an `INSERT`. Non-constant values are
    /// reported and dropped without aborting the statement.
    fn parse_value_list(&mut self) -> Result<Vec<ConstantExpr>, SyntaxError> {
        let mut values = Vec::new();
        loop {
            let expr = self.parse_expression(0)?;
            match ConstantExpr::try_from(expr) {
                Ok(value) => values.push(value),
                Err(expr) => self
                    .errors
                    .push(Diagnostic::new(CONSTANT_VALUES_ONLY, expr.location())),
            }
            if !self.check(TokenKind::Comma) {
                return Ok(values);
            }
            self.advance();
        }
    }

    // --- Names ---

    /// Parses `name` or `database.name`.
    fn parse_table_name(&mut self) -> Result<TableName, SyntaxError> {
        let first = self.expect(TokenKind::Identifier, "identifier")?;
        if !self.check(TokenKind::Dot) {
            return Ok(TableName {
                database: None,
                name: first.contents,
                location: first.location,
            });
        }
        self.advance();
        let name = self.expect(TokenKind::Identifier, "identifier")?;
        Ok(TableName {
            location: Range::between(first.location, name.location),
            database: Some(first.contents),
            name: name.contents,
        })
    }

    fn parse_column(&mut self) -> Result<Column, SyntaxError> {
        let first = self.expect(TokenKind::Identifier, "identifier or '*'")?;
        self.parse_qualified_column(first)
    }

    /// Parses the rest of `column`, `table.column` or
    /// `database.table.column` after its first identifier.
    fn parse_qualified_column(&mut self, first: Token) -> Result<Column, SyntaxError> {
        let mut name = first;
        let mut qualifiers = Vec::new();
        while qualifiers.len() < 2 && self.check(TokenKind::Dot) {
            self.advance();
            let next = self.expect(TokenKind::Identifier, "identifier")?;
            qualifiers.push(std::mem::replace(&mut name, next));
        }

        let start = qualifiers.first().map_or(name.location, |token| token.location);
        let location = Range::between(start, name.location);
        let mut qualifiers = qualifiers.into_iter();
        let table = match (qualifiers.next(), qualifiers.next()) {
            (Some(database), Some(table)) => Some(TableName {
                location: Range::between(database.location, table.location),
                database: Some(database.contents),
                name: table.contents,
            }),
            (Some(table), None) => Some(TableName {
                database: None,
                name: table.contents,
                location: table.location,
            }),
            _ => None,
        };
        Ok(Column {
            table,
            name: name.contents,
            location,
        })
    }

    // --- Expressions ---

    /// Parses an expression whose operators all bind at least as tightly as
    /// `min_bp`.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, SyntaxError> {
        self.parse_nested(min_bp).map(|(expr, _)| expr)
    }

    /// Parses an expression and returns it together with the height of its
    /// tree.
    fn parse_nested(&mut self, min_bp: u8) -> Result<(Expr, usize), SyntaxError> {
        if self.remaining_depth == 0 {
            return Err(SyntaxError::nested_too_deeply(self.peek().location));
        }
        self.remaining_depth -= 1;
        let result = self.parse_expression_inner(min_bp);
        self.remaining_depth += 1;
        result
    }

    fn parse_expression_inner(&mut self, min_bp: u8) -> Result<(Expr, usize), SyntaxError> {
        let (mut lhs, mut height) = self.parse_prefix(min_bp)?;

        loop {
            let kind = self.peek().kind;
            let Some((l_bp, r_bp)) = infix_binding_power(&kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let operator_location = self.peek().location;

            match kind {
                TokenKind::Keyword(Keyword::Is) => {
                    self.advance();
                    let (operator, null) = if self.check(TokenKind::Keyword(Keyword::Not)) {
                        self.advance();
                        let null = self.expect(TokenKind::Keyword(Keyword::Null), "'NULL'")?;
                        (UnaryOperator::IsNotNull, null)
                    } else {
                        let null =
                            self.expect(TokenKind::Keyword(Keyword::Null), "'NULL' or 'NOT'")?;
                        (UnaryOperator::IsNull, null)
                    };
                    height = grow(height, 0, operator_location)?;
                    let location = Range::between(lhs.location(), null.location);
                    lhs = Expr::unary(operator, lhs, location);
                }
                TokenKind::Keyword(Keyword::Not) => {
                    self.advance();
                    self.expect(TokenKind::Keyword(Keyword::Like), "'LIKE'")?;
                    let (rhs, rhs_height) = self.parse_nested(r_bp)?;
                    height = grow(height, rhs_height, operator_location)?;
                    lhs = Expr::binary(BinaryOperator::NotLike, lhs, rhs);
                }
                _ => {
                    let Some(operator) = token_to_binary_op(&kind) else {
                        break;
                    };
                    self.advance();
                    let (rhs, rhs_height) = self.parse_nested(r_bp)?;
                    height = grow(height, rhs_height, operator_location)?;
                    lhs = Expr::binary(operator, lhs, rhs);
                }
            }
        }

        Ok((lhs, height))
    }

    /// Parses a prefix operator application or a primary expression.
    ///
    /// A prefix operator that binds more loosely than `min_bp` cannot start
    /// an operand here, so `a = NOT b` is rejected.
    fn parse_prefix(&mut self, min_bp: u8) -> Result<(Expr, usize), SyntaxError> {
        let token = self.peek();
        let (Some(operator), Some(bp)) = (
            token_to_unary_op(&token.kind),
            prefix_binding_power(&token.kind),
        ) else {
            return self.parse_primary();
        };
        if bp < min_bp {
            return Err(SyntaxError::unexpected(token, "expression"));
        }

        let token = self.advance();
        let (operand, operand_height) = self.parse_nested(bp)?;
        let height = grow(operand_height, 0, token.location)?;
        let location = Range::between(token.location, operand.location());
        Ok((Expr::unary(operator, operand, location), height))
    }

    fn parse_primary(&mut self) -> Result<(Expr, usize), SyntaxError> {
        let expr = match self.peek().kind {
            TokenKind::Int => {
                let token = self.advance();
                Expr::IntLiteral(IntLiteral {
                    value: token.contents,
                    location: token.location,
                })
            }
            TokenKind::String => {
                let token = self.advance();
                Expr::StringLiteral(StringLiteral {
                    value: token.contents,
                    location: token.location,
                })
            }
            TokenKind::Keyword(Keyword::Null) => {
                let token = self.advance();
                Expr::Null(Null {
                    location: token.location,
                })
            }
            TokenKind::Identifier => {
                let token = self.advance();
                if self.check(TokenKind::LeftParen) {
                    self.parse_call(token)?
                } else {
                    Expr::Column(self.parse_qualified_column(token)?)
                }
            }
            TokenKind::LeftParen => {
                self.advance();
                let nested = self.parse_nested(0)?;
                self.expect(TokenKind::RightParen, "infix operator or ')'")?;
                return Ok(nested);
            }
            _ => return Err(SyntaxError::unexpected(self.peek(), "expression")),
        };
        Ok((expr, 1))
    }

    /// Parses a function call. Anything but `NOW()` is reported and replaced
    /// by a reference to a column named like the function; its arguments are
    /// skipped without being parsed.
    fn parse_call(&mut self, name: Token) -> Result<Expr, SyntaxError> {
        self.advance();
        if name.contents.eq_ignore_ascii_case("now") && self.check(TokenKind::RightParen) {
            let closing = self.advance();
            return Ok(Expr::Now(Now {
                location: Range::between(name.location, closing.location),
            }));
        }

        self.skip_arguments();
        self.expect(TokenKind::RightParen, "')'")?;
        self.errors
            .push(Diagnostic::new(ONLY_NOW_SUPPORTED, name.location));
        Ok(Expr::Column(Column {
            table: None,
            name: name.contents,
            location: name.location,
        }))
    }

    /// Moves to the `)` closing the current call, or to the end of the
    /// statement if there is none.
    fn skip_arguments(&mut self) {
        let mut open = 0usize;
        loop {
            match self.peek().kind {
                TokenKind::Semicolon | TokenKind::Eof => break,
                TokenKind::RightParen if open == 0 => break,
                TokenKind::RightParen => open -= 1,
                TokenKind::LeftParen => open += 1,
                _ => {}
            }
            self.index += 1;
        }
    }

    // --- Helper methods ---

    fn at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    /// Returns the current token, or the synthetic EOF token past the end.
    fn peek(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.at_end() {
            self.index += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes the current token if it is of the given kind. A mismatching
    /// token is left in place.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(SyntaxError::unexpected(self.peek(), expected))
        }
    }
}

/// Height of a node whose children have the given heights.
///
/// Trees taller than [`MAX_EXPRESSION_DEPTH`] are rejected, whether they come
/// from nesting or from long operator chains.
fn grow(first: usize, second: usize, location: Range) -> Result<usize, SyntaxError> {
    let height = first.max(second) + 1;
    if height > MAX_EXPRESSION_DEPTH {
        return Err(SyntaxError::nested_too_deeply(location));
    }
    Ok(height)
}

/// Commands and diagnostics of one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// The commands that parsed successfully, in source order.
    pub commands: Vec<Command>,
    /// Lexer warnings, unchanged.
    pub warnings: Vec<Diagnostic>,
    /// Lexer errors followed by parser errors.
    pub errors: Vec<Diagnostic>,
}

/// Parses the output of the lexer.
#[must_use]
pub fn parse(lex_result: LexResult) -> ParseResult {
    let LexResult {
        tokens,
        warnings,
        mut errors,
    } = lex_result;
    let (commands, parse_errors) = Parser::new(tokens).parse();
    errors.extend(parse_errors);
    debug!(
        commands = commands.len(),
        errors = errors.len(),
        "parse finished"
    );
    ParseResult {
        commands,
        warnings,
        errors,
    }
}

/// Lexes and parses `source`.
#[must_use]
pub fn parse_source(source: &str, dialect: Dialect) -> ParseResult {
    parse(lex(source, dialect))
}
