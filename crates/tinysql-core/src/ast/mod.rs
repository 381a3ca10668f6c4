//! Abstract Syntax Tree (AST) types for commands and expressions.
//!
//! Every node carries the source [`Range`](crate::lexer::Range) it was parsed
//! from, serializes to a `kind`-tagged JSON object, and displays as
//! canonical SQL.

mod expression;
mod statement;

pub use expression::{
    BinaryOperation, BinaryOperator, Column, ConstantExpr, Expr, IntLiteral, Now, Null,
    StringLiteral, TableName, UnaryOperation, UnaryOperator,
};
pub use statement::{
    Command, DeleteCommand, InsertCommand, SelectColumns, SelectCommand, UseCommand,
};
