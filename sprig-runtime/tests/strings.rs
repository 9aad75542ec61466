mod common;

use anyhow::{ensure, Result};
use common::{items, list, map, num, numbers, text, Harness};
use sprig_runtime::{ErrorKind, Value};

fn split(h: &mut Harness, s: &str, delimiter: &str, max_count: f64) -> Result<Vec<Value>> {
    Ok(items(&h.call("split", vec![text(s), text(delimiter), num(max_count)])?))
}

/// split handles delimiters, max counts and empty input
#[test]
fn split_examples() -> Result<()> {
    let mut h = Harness::new();
    ensure!(split(&mut h, "a,,b", ",", -1.0)? == vec![text("a"), text(""), text("b")]);
    ensure!(split(&mut h, "abc", "", -1.0)? == vec![text("a"), text("b"), text("c")]);
    ensure!(split(&mut h, "a b ", " ", -1.0)? == vec![text("a"), text("b"), text("")]);
    ensure!(split(&mut h, "one two three", " ", 2.0)? == vec![text("one"), text("two three")]);
    ensure!(split(&mut h, "", " ", -1.0)?.is_empty());

    let defaults = h.call("split", vec![text("x y")])?;
    ensure!(items(&defaults) == vec![text("x"), text("y")]);
    Ok(())
}

/// join renders elements with their display forms
#[test]
fn join_uses_display_forms() -> Result<()> {
    let mut h = Harness::new();
    let l = list(vec![num(1.0), Value::Null, text("c"), num(0.5)]);
    ensure!(h.call("join", vec![l.clone()])? == text("1  c 0.5"));
    ensure!(h.call("join", vec![l, text("-")])? == text("1--c-0.5"));

    let nested = list(vec![numbers(&[1.0, 2.0]), text("x")]);
    ensure!(h.call("join", vec![nested, text("|")])? == text("[1, 2]|x"));

    let s = text("not a list");
    ensure!(h.call("join", vec![s.clone()])?.ref_equals(&s));
    Ok(())
}

/// code and char convert between characters and code points
#[test]
fn code_and_char_round_trip() -> Result<()> {
    let mut h = Harness::new();
    ensure!(h.call("code", vec![text("A")])? == num(65.0));
    ensure!(h.call("code", vec![text("")])? == num(0.0));
    ensure!(h.call("code", vec![Value::Null])? == num(0.0));
    ensure!(h.call("code", vec![num(7.0)])? == num(55.0));
    ensure!(h.call("char", vec![])? == text("A"));

    for s in ["z", "é", "😀"] {
        let code = h.call("code", vec![text(s)])?;
        ensure!(h.call("char", vec![code])? == text(s), "char(code({s})) != {s}");
    }

    let err = h.call("char", vec![num(-5.0)]).unwrap_err();
    ensure!(err.kind() == ErrorKind::Argument);
    let err = h.call("char", vec![num(f64::from(0xD800))]).unwrap_err();
    ensure!(err.kind() == ErrorKind::Argument);
    Ok(())
}

/// lower and upper pass non-strings through
#[test]
fn case_conversion_passes_non_strings_through() -> Result<()> {
    let mut h = Harness::new();
    ensure!(h.call("upper", vec![text("Héllo")])? == text("HÉLLO"));
    ensure!(h.call("lower", vec![text("Héllo")])? == text("héllo"));
    let l = numbers(&[1.0]);
    ensure!(h.call("upper", vec![l.clone()])?.ref_equals(&l));
    ensure!(h.call("lower", vec![num(2.0)])? == num(2.0));
    Ok(())
}

/// val parses the leading number of a string
#[test]
fn val_parses_leading_numbers() -> Result<()> {
    let mut h = Harness::new();
    ensure!(h.call("val", vec![text("42")])? == num(42.0));
    ensure!(h.call("val", vec![text(" -1.5e2xyz")])? == num(-150.0));
    ensure!(h.call("val", vec![text("abc")])? == num(0.0));
    ensure!(h.call("val", vec![num(3.25)])? == num(3.25));
    ensure!(h.call("val", vec![])? == num(0.0));
    ensure!(h.call("val", vec![list(vec![])])?.is_null());
    Ok(())
}

/// str formats numbers, containers and null
#[test]
fn str_formats_values() -> Result<()> {
    let mut h = Harness::new();
    ensure!(h.call("str", vec![num(3.0)])? == text("3"));
    ensure!(h.call("str", vec![num(0.1)])? == text("0.1"));
    ensure!(h.call("str", vec![num(1.0 / 3.0)])? == text("0.333333"));
    ensure!(h.call("str", vec![num(1e-7)])? == text("1.000000E-07"));
    ensure!(h.call("str", vec![Value::Null])? == text(""));
    ensure!(h.call("str", vec![list(vec![text("a"), num(1.0)])])? == text("[\"a\", 1]"));
    ensure!(h.call("str", vec![map(vec![(text("k"), Value::Null)])])? == text("{\"k\": null}"));

    let empty = h.call("str", vec![])?;
    let also_empty = h.call("str", vec![Value::Null])?;
    ensure!(empty.ref_equals(&also_empty), "empty strings share one instance");
    Ok(())
}

/// String methods return new strings and leave the receiver alone
#[test]
fn string_receivers_return_new_strings() -> Result<()> {
    let mut h = Harness::new();
    let s = text("one two one");
    let replaced = h.call("replace", vec![s.clone(), text("one"), text("1"), num(1.0)])?;
    ensure!(replaced == text("1 two one"));
    ensure!(h.call("remove", vec![s.clone(), text("one")])? == text(" two one"));
    ensure!(s == text("one two one"));
    Ok(())
}
