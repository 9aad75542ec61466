mod common;

use std::collections::BTreeSet;

use anyhow::{ensure, Result};
use common::{items, num, text, Harness, TestContext};
use sprig_runtime::{types, TypeKind, Value};

fn method_names(table: &Value) -> BTreeSet<String> {
    match table {
        Value::Map(entries) => entries.borrow().keys().map(Value::to_display_string).collect(),
        _ => BTreeSet::new(),
    }
}

fn expected(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Each type table holds its fixed method set
#[test]
fn tables_hold_the_fixed_method_sets() -> Result<()> {
    let mut h = Harness::new();
    let list = h.call("list", vec![])?;
    ensure!(
        method_names(&list)
            == expected(&[
                "hasIndex", "indexes", "indexOf", "insert", "join", "len", "pop", "pull", "push",
                "shuffle", "sort", "sum", "remove", "replace", "values",
            ])
    );
    let string = h.call("string", vec![])?;
    ensure!(
        method_names(&string)
            == expected(&[
                "hasIndex", "indexes", "indexOf", "insert", "code", "len", "lower", "val", "remove",
                "replace", "split", "upper", "values",
            ])
    );
    let map = h.call("map", vec![])?;
    ensure!(
        method_names(&map)
            == expected(&[
                "hasIndex", "indexes", "indexOf", "len", "pop", "push", "shuffle", "sort", "sum",
                "remove", "replace", "values",
            ])
    );
    ensure!(method_names(&h.call("number", vec![])?).is_empty());
    ensure!(method_names(&h.call("funcRef", vec![])?).is_empty());

    for kind in TypeKind::ALL {
        let table = h.call(kind.intrinsic_name(), vec![])?;
        ensure!(types::methods(kind).len() == method_names(&table).len());
    }
    Ok(())
}

/// Table entries are the registered function values
#[test]
fn method_values_are_the_registered_functions() -> Result<()> {
    let mut h = Harness::new();
    let table = h.call("string", vec![])?;
    let upper = h.runtime.lookup("upper")?.function_value();
    ensure!(table.lookup(&text("upper")).ref_equals(&upper));
    ensure!(table.lookup(&text("sort")).is_null(), "strings have no sort method");
    Ok(())
}

/// Each context caches its own copy of a table
#[test]
fn each_context_caches_its_own_copy() -> Result<()> {
    let mut h = Harness::new();
    let first = h.call("list", vec![])?;
    ensure!(h.call("list", vec![])?.ref_equals(&first));
    ensure!(h.context.types.contains_key(&TypeKind::List));

    // A script adding a method only changes its own engine's table.
    if let Value::Map(entries) = &first {
        entries.borrow_mut().insert(text("extra"), num(1.0));
    }
    let other_context = std::mem::replace(&mut h.context, TestContext::default());
    let second = h.call("list", vec![])?;
    ensure!(!second.ref_equals(&first));
    ensure!(second.lookup(&text("extra")).is_null());
    ensure!(other_context.types[&TypeKind::List].lookup(&text("extra")) == num(1.0));

    let keys = items(&h.call("indexes", vec![second])?);
    ensure!(keys.len() == types::methods(TypeKind::List).len());
    Ok(())
}
