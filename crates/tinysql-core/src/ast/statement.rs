//! Command AST types.

use core::fmt;

use serde::{Serialize, Serializer};

use super::expression::{write_identifier, Column, ConstantExpr, Expr, TableName};
use crate::lexer::Range;

/// The column list of a `SELECT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectColumns {
    /// `SELECT *`
    All,
    /// An explicit list of columns.
    List(Vec<Column>),
}

impl Serialize for SelectColumns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("*"),
            Self::List(columns) => columns.serialize(serializer),
        }
    }
}

/// `USE <database>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "use")]
pub struct UseCommand {
    /// Database name.
    pub database: String,
    /// Source range.
    pub location: Range,
}

/// A `SELECT` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "select", rename_all = "camelCase")]
pub struct SelectCommand {
    /// The table after `FROM`.
    pub table: TableName,
    /// The selected columns.
    pub columns: SelectColumns,
    /// WHERE clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub where_condition: Option<Expr>,
    /// ORDER BY columns, empty when there is no ORDER BY clause.
    pub order_by: Vec<Column>,
    /// Source range.
    pub location: Range,
}

/// An `INSERT` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "insert")]
pub struct InsertCommand {
    /// Target table.
    pub table: TableName,
    /// Target columns.
    pub columns: Vec<Column>,
    /// Values. Non-constant values are reported and left out.
    pub values: Vec<ConstantExpr>,
    /// Source range.
    pub location: Range,
}

/// A `DELETE` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename = "delete", rename_all = "camelCase")]
pub struct DeleteCommand {
    /// Target table.
    pub table: TableName,
    /// WHERE clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub where_condition: Option<Expr>,
    /// Source range.
    pub location: Range,
}

/// A top-level command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Command {
    Use(UseCommand),
    Select(SelectCommand),
    Insert(InsertCommand),
    Delete(DeleteCommand),
}

impl Command {
    /// Returns the source range of the whole command.
    #[must_use]
    pub const fn location(&self) -> Range {
        match self {
            Self::Use(c) => c.location,
            Self::Select(c) => c.location,
            Self::Insert(c) => c.location,
            Self::Delete(c) => c.location,
        }
    }

    /// Returns the lowercase name of the command.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Use(_) => "use",
            Self::Select(_) => "select",
            Self::Insert(_) => "insert",
            Self::Delete(_) => "delete",
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for UseCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("USE ")?;
        write_identifier(f, &self.database)
    }
}

impl fmt::Display for SelectCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        match &self.columns {
            SelectColumns::All => f.write_str("*")?,
            SelectColumns::List(columns) => write_list(f, columns)?,
        }
        write!(f, " FROM {}", self.table)?;
        if let Some(condition) = &self.where_condition {
            write!(f, " WHERE {condition}")?;
        }
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            write_list(f, &self.order_by)?;
        }
        Ok(())
    }
}

impl fmt::Display for InsertCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {} (", self.table)?;
        write_list(f, &self.columns)?;
        f.write_str(") VALUES (")?;
        write_list(f, &self.values)?;
        f.write_str(")")
    }
}

impl fmt::Display for DeleteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(condition) = &self.where_condition {
            write!(f, " WHERE {condition}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Use(c) => write!(f, "{c}"),
            Self::Select(c) => write!(f, "{c}"),
            Self::Insert(c) => write!(f, "{c}"),
            Self::Delete(c) => write!(f, "{c}"),
        }
    }
}
