#![allow(dead_code)]

use serde_json::{json, Value};
use tinysql_core::ast::{Command, DeleteCommand, Expr, InsertCommand, SelectCommand};
use tinysql_core::{lex, parse_source, to_json_value, Dialect, Locations, ParseResult};

pub fn parse_with(sql: &str, dialect: Dialect) -> ParseResult {
    parse_source(sql, dialect)
}

/// Parses `sql` and panics if there are any errors.
pub fn parse(sql: &str) -> Vec<Command> {
    let result = parse_source(sql, Dialect::DoubleQuotedStrings);
    assert!(
        result.errors.is_empty(),
        "Failed to parse: {sql}\nErrors: {:?}",
        result.errors
    );
    result.commands
}

pub fn parse_one(sql: &str) -> Command {
    let mut commands = parse(sql);
    assert_eq!(commands.len(), 1, "Expected one command for: {sql}");
    commands.remove(0)
}

/// Error messages produced for `sql`, lexer errors first.
pub fn error_messages(sql: &str) -> Vec<String> {
    parse_source(sql, Dialect::DoubleQuotedStrings)
        .errors
        .into_iter()
        .map(|e| e.message)
        .collect()
}

pub fn parse_select(sql: &str) -> SelectCommand {
    match parse_one(sql) {
        Command::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertCommand {
    match parse_one(sql) {
        Command::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteCommand {
    match parse_one(sql) {
        Command::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

/// Parses the WHERE condition of `SELECT * FROM t WHERE <condition>`.
pub fn parse_condition(condition: &str) -> Expr {
    parse_select(&format!("SELECT * FROM t WHERE {condition}"))
        .where_condition
        .unwrap_or_else(|| panic!("Expected a WHERE condition: {condition}"))
}

/// The commands of `sql` as JSON, without locations.
pub fn ast_json(sql: &str, dialect: Dialect) -> Value {
    let result = parse_source(sql, dialect);
    to_json_value(&result.commands, Locations::Strip).unwrap()
}

/// The tokens of `sql` as `{kind, contents}` objects.
pub fn token_json(sql: &str, dialect: Dialect) -> Value {
    lex(sql, dialect)
        .tokens
        .iter()
        .map(|t| json!({"kind": t.kind, "contents": t.contents}))
        .collect()
}

/// Builds a `{from, to}` location object.
pub fn range(from: (u32, u32), to: (u32, u32)) -> Value {
    json!({
        "from": {"line": from.0, "column": from.1},
        "to": {"line": to.0, "column": to.1}
    })
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    let rendered1 = render(&parse(sql));
    let rendered2 = render(&parse(&rendered1));
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}

fn render(commands: &[Command]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";\n")
}
