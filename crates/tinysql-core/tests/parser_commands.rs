//! Tests for the four commands and their source locations.

mod common;
use common::*;

use tinysql_core::ast::{Command, ConstantExpr, SelectColumns};
use tinysql_core::{Point, Range};

fn at(line: u32, from: u32, to: u32) -> Range {
    Range::new(Point::new(line, from), Point::new(line, to))
}

#[test]
fn use_command() {
    let Command::Use(command) = parse_one("USE `my db`") else {
        panic!("Expected USE");
    };
    assert_eq!(command.database, "my db");
    assert_eq!(command.location, at(1, 0, 11));
}

#[test]
fn select_star() {
    let select = parse_select("SELECT * FROM t");
    assert_eq!(select.columns, SelectColumns::All);
    assert!(select.where_condition.is_none());
    assert!(select.order_by.is_empty());
    assert_eq!(select.location, at(1, 0, 15));
}

#[test]
fn select_columns() {
    let select = parse_select("SELECT a, t.b, db.t.c FROM db.t");
    let SelectColumns::List(columns) = &select.columns else {
        panic!("Expected column list");
    };
    let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(select.table.database.as_deref(), Some("db"));
    assert_eq!(select.table.location, at(1, 27, 31));
}

#[test]
fn select_location_ends_at_last_clause() {
    assert_eq!(parse_select("SELECT a FROM t").location, at(1, 0, 15));
    assert_eq!(
        parse_select("SELECT a FROM t WHERE x = 1").location,
        at(1, 0, 27)
    );
    assert_eq!(
        parse_select("SELECT a FROM t ORDER BY a, b").location,
        at(1, 0, 29)
    );
}

#[test]
fn select_order_by_without_where() {
    let select = parse_select("SELECT * FROM t ORDER BY a, t.b");
    assert!(select.where_condition.is_none());
    assert_eq!(select.order_by.len(), 2);
    assert_eq!(select.order_by[1].table.as_ref().unwrap().name, "t");
}

#[test]
fn insert_command() {
    let insert = parse_insert("INSERT INTO db.t (a, `b c`) VALUES (1, 'x', NULL, NOW())");
    assert_eq!(insert.table.to_string(), "db.t");
    assert_eq!(insert.columns.len(), 2);
    assert_eq!(insert.columns[1].name, "b c");
    assert!(matches!(
        &insert.values[..],
        [
            ConstantExpr::IntLiteral(_),
            ConstantExpr::StringLiteral(_),
            ConstantExpr::Null(_),
            ConstantExpr::Now(_)
        ]
    ));
    assert_eq!(insert.location, at(1, 0, 56));
}

#[test]
fn delete_command() {
    let delete = parse_delete("DELETE FROM logs");
    assert!(delete.where_condition.is_none());
    assert_eq!(delete.location, at(1, 0, 16));

    let delete = parse_delete("DELETE FROM logs WHERE id < 1000");
    assert!(delete.where_condition.is_some());
    assert_eq!(delete.location, at(1, 0, 32));
}

#[test]
fn multiple_commands_across_lines() {
    let commands = parse("USE db;\nSELECT * FROM t;\n\nDELETE FROM t;");
    let kinds: Vec<_> = commands.iter().map(Command::kind).collect();
    assert_eq!(kinds, ["use", "select", "delete"]);
    assert_eq!(commands[2].location(), at(4, 0, 13));
}

#[test]
fn command_ranges_contain_children() {
    let commands = parse(
        "SELECT a FROM t WHERE b = 1 ORDER BY c; INSERT INTO t (a) VALUES (1); DELETE FROM t WHERE x",
    );
    for command in &commands {
        let location = command.location();
        match command {
            Command::Select(s) => {
                assert!(location.contains(&s.table.location));
                assert!(location.contains(&s.where_condition.as_ref().unwrap().location()));
                assert!(s.order_by.iter().all(|c| location.contains(&c.location)));
            }
            Command::Insert(i) => {
                assert!(location.contains(&i.table.location));
                assert!(i.values.iter().all(|v| location.contains(&v.location())));
            }
            Command::Delete(d) => {
                assert!(location.contains(&d.where_condition.as_ref().unwrap().location()));
            }
            Command::Use(_) => unreachable!(),
        }
    }
}

#[test]
fn keywords_are_case_insensitive() {
    let commands = parse("use db; Select * From t Where a Is Not Null Order By a");
    assert_eq!(commands.len(), 2);
}
