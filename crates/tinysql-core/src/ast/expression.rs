//! Expression AST types.

use core::fmt;

use serde::Serialize;

use crate::lexer::{is_identifier_continue, is_identifier_start, Keyword, Range};

/// A possibly database-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableName {
    /// Database name (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Table name.
    pub name: String,
    /// Source range.
    pub location: Range,
}

/// A column reference, optionally qualified with a table name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "column")]
pub struct Column {
    /// Qualifying table (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableName>,
    /// Column name.
    pub name: String,
    /// Source range.
    pub location: Range,
}

/// An integer literal. The digits are kept as written so that integers of
/// any width survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "intLiteral")]
pub struct IntLiteral {
    pub value: String,
    pub location: Range,
}

/// A string literal with quotes removed and escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "stringLiteral")]
pub struct StringLiteral {
    pub value: String,
    pub location: Range,
}

/// A call to `NOW()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "now")]
pub struct Now {
    pub location: Range,
}

/// The `NULL` literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "null")]
pub struct Null {
    pub location: Range,
}

/// Unary operators, including the postfix null checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    /// Logical NOT
    #[serde(rename = "not")]
    Not,
    /// Negation (-)
    #[serde(rename = "-")]
    Neg,
    /// `IS NULL`
    #[serde(rename = "is null")]
    IsNull,
    /// `IS NOT NULL`
    #[serde(rename = "is not null")]
    IsNotNull,
}

impl UnaryOperator {
    /// Returns the tag used when serializing the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Neg => "-",
            Self::IsNull => "is null",
            Self::IsNotNull => "is not null",
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    // Logical
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "and")]
    And,

    // Comparison
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "not like")]
    NotLike,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<>")]
    NotEq,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,

    // Arithmetic
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
}

impl BinaryOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::GtEq => ">=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }
}

/// A unary operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "unary")]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Expr>,
    pub location: Range,
}

/// A binary operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "binary")]
pub struct BinaryOperation {
    pub operator: BinaryOperator,
    #[serde(rename = "leftOperand")]
    pub left: Box<Expr>,
    #[serde(rename = "rightOperand")]
    pub right: Box<Expr>,
    pub location: Range,
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Expr {
    Column(Column),
    IntLiteral(IntLiteral),
    StringLiteral(StringLiteral),
    Now(Now),
    Null(Null),
    Unary(UnaryOperation),
    Binary(BinaryOperation),
}

impl Expr {
    /// Returns the source range of the expression.
    #[must_use]
    pub const fn location(&self) -> Range {
        match self {
            Self::Column(e) => e.location,
            Self::IntLiteral(e) => e.location,
            Self::StringLiteral(e) => e.location,
            Self::Now(e) => e.location,
            Self::Null(e) => e.location,
            Self::Unary(e) => e.location,
            Self::Binary(e) => e.location,
        }
    }

    /// Builds a unary operation covering `location`.
    #[must_use]
    pub fn unary(operator: UnaryOperator, operand: Self, location: Range) -> Self {
        Self::Unary(UnaryOperation {
            operator,
            operand: Box::new(operand),
            location,
        })
    }

    /// Builds a binary operation spanning both operands.
    #[must_use]
    pub fn binary(operator: BinaryOperator, left: Self, right: Self) -> Self {
        let location = Range::between(left.location(), right.location());
        Self::Binary(BinaryOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            location,
        })
    }

    /// Returns true for the expression forms allowed in a value list.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(
            self,
            Self::IntLiteral(_) | Self::StringLiteral(_) | Self::Now(_) | Self::Null(_)
        )
    }
}

/// The expression forms allowed inside an `INSERT` value list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConstantExpr {
    IntLiteral(IntLiteral),
    StringLiteral(StringLiteral),
    Now(Now),
    Null(Null),
}

impl ConstantExpr {
    /// Returns the source range of the expression.
    #[must_use]
    pub const fn location(&self) -> Range {
        match self {
            Self::IntLiteral(e) => e.location,
            Self::StringLiteral(e) => e.location,
            Self::Now(e) => e.location,
            Self::Null(e) => e.location,
        }
    }
}

impl From<ConstantExpr> for Expr {
    fn from(value: ConstantExpr) -> Self {
        match value {
            ConstantExpr::IntLiteral(e) => Self::IntLiteral(e),
            ConstantExpr::StringLiteral(e) => Self::StringLiteral(e),
            ConstantExpr::Now(e) => Self::Now(e),
            ConstantExpr::Null(e) => Self::Null(e),
        }
    }
}

impl TryFrom<Expr> for ConstantExpr {
    type Error = Expr;

    /// Narrows an expression to a constant, handing it back unchanged if it
    /// is not one.
    fn try_from(value: Expr) -> Result<Self, Self::Error> {
        match value {
            Expr::IntLiteral(e) => Ok(Self::IntLiteral(e)),
            Expr::StringLiteral(e) => Ok(Self::StringLiteral(e)),
            Expr::Now(e) => Ok(Self::Now(e)),
            Expr::Null(e) => Ok(Self::Null(e)),
            other => Err(other),
        }
    }
}

// --- SQL rendering ---

/// Writes `name` bare if it would lex back as the same identifier, quoted
/// with backticks otherwise.
pub(crate) fn write_identifier(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let mut chars = name.chars();
    let bare = chars.next().is_some_and(is_identifier_start)
        && chars.all(is_identifier_continue)
        && Keyword::from_str(name).is_none();
    if bare {
        f.write_str(name)
    } else {
        write!(f, "`{}`", name.replace('`', "``"))
    }
}

/// Writes an operand, parenthesizing operations so that the rendering parses
/// back into the same tree.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Unary(_) | Expr::Binary(_) => write!(f, "({expr})"),
        _ => write!(f, "{expr}"),
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(database) = &self.database {
            write_identifier(f, database)?;
            f.write_str(".")?;
        }
        write_identifier(f, &self.name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            write!(f, "{table}.")?;
        }
        write_identifier(f, &self.name)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => write!(f, "{column}"),
            Self::IntLiteral(int) => f.write_str(&int.value),
            Self::StringLiteral(string) => write!(f, "'{}'", string.value.replace('\'', "''")),
            Self::Now(_) => f.write_str("NOW()"),
            Self::Null(_) => f.write_str("NULL"),
            Self::Unary(op) => match op.operator {
                UnaryOperator::Not => {
                    f.write_str("NOT ")?;
                    write_operand(f, &op.operand)
                }
                UnaryOperator::Neg => {
                    f.write_str("-")?;
                    write_operand(f, &op.operand)
                }
                UnaryOperator::IsNull => {
                    write_operand(f, &op.operand)?;
                    f.write_str(" IS NULL")
                }
                UnaryOperator::IsNotNull => {
                    write_operand(f, &op.operand)?;
                    f.write_str(" IS NOT NULL")
                }
            },
            Self::Binary(op) => {
                write_operand(f, &op.left)?;
                write!(f, " {} ", op.operator.as_sql())?;
                write_operand(f, &op.right)
            }
        }
    }
}

impl fmt::Display for ConstantExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Expr::from(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Point;

    fn at(column: u32, len: u32) -> Range {
        Range::new(Point::new(1, column), Point::new(1, column + len))
    }

    fn column(name: &str, start: u32) -> Expr {
        Expr::Column(Column {
            table: None,
            name: name.to_string(),
            location: at(start, u32::try_from(name.len()).unwrap()),
        })
    }

    #[test]
    fn test_binary_location_spans_operands() {
        let expr = Expr::binary(BinaryOperator::Add, column("a", 0), column("b", 4));
        assert_eq!(expr.location(), at(0, 5));
    }

    #[test]
    fn test_constant_conversion() {
        let null = Expr::Null(Null { location: at(0, 4) });
        let constant = ConstantExpr::try_from(null.clone()).unwrap();
        assert_eq!(Expr::from(constant), null);

        let col = column("a", 0);
        assert_eq!(ConstantExpr::try_from(col.clone()), Err(col));
    }

    #[test]
    fn test_serialize_binary() {
        let expr = Expr::binary(BinaryOperator::NotLike, column("a", 0), column("b", 11));
        let value = serde_json::to_value(&expr).unwrap();
        assert_eq!(value["kind"], "binary");
        assert_eq!(value["operator"], "not like");
        assert_eq!(value["leftOperand"]["kind"], "column");
        assert_eq!(value["rightOperand"]["name"], "b");
        assert!(value["leftOperand"].get("table").is_none());
    }

    #[test]
    fn test_display_quotes_when_needed() {
        assert_eq!(column("user id", 0).to_string(), "`user id`");
        assert_eq!(column("select", 0).to_string(), "`select`");
        assert_eq!(column("a`b", 0).to_string(), "`a``b`");
        assert_eq!(column("größe", 0).to_string(), "größe");
    }

    #[test]
    fn test_display_parenthesizes_operands() {
        let inner = Expr::binary(BinaryOperator::Mul, column("b", 4), column("c", 8));
        let expr = Expr::binary(BinaryOperator::Add, column("a", 0), inner);
        assert_eq!(expr.to_string(), "a + (b * c)");

        let negated = Expr::unary(UnaryOperator::Not, expr.clone(), at(0, 13));
        assert_eq!(negated.to_string(), "NOT (a + (b * c))");

        let string = Expr::StringLiteral(StringLiteral {
            value: "it's".to_string(),
            location: at(0, 7),
        });
        assert_eq!(string.to_string(), "'it''s'");
    }
}
