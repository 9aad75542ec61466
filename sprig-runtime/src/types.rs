//! Per-type method tables.
//!
//! Each value type exposes a map from method name to intrinsic function
//! value. The runtime builds each table once from the registry; every
//! execution context receives its own copy the first time a script asks for
//! it, so a script that adds methods to `list` only affects its own engine.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::context::TypeKind;
use crate::error::Result;
use crate::registry::Registry;
use crate::result::IntrinsicResult;
use crate::runtime::Call;
use crate::value::Value;

const LIST_METHODS: &[&str] = &[
    "hasIndex", "indexes", "indexOf", "insert", "join", "len", "pop", "pull", "push", "shuffle",
    "sort", "sum", "remove", "replace", "values",
];

const STRING_METHODS: &[&str] = &[
    "hasIndex", "indexes", "indexOf", "insert", "code", "len", "lower", "val", "remove", "replace",
    "split", "upper", "values",
];

const MAP_METHODS: &[&str] = &[
    "hasIndex", "indexes", "indexOf", "len", "pop", "push", "shuffle", "sort", "sum", "remove",
    "replace", "values",
];

/// Method names installed in the table for `kind`.
pub fn methods(kind: TypeKind) -> &'static [&'static str] {
    match kind {
        TypeKind::List => LIST_METHODS,
        TypeKind::String => STRING_METHODS,
        TypeKind::Map => MAP_METHODS,
        TypeKind::Number | TypeKind::Function => &[],
    }
}

#[derive(Default)]
pub(crate) struct TypeTables {
    templates: HashMap<TypeKind, Value>,
}

impl TypeTables {
    /// A fresh copy of the table for `kind`, building the template on first use.
    pub(crate) fn get(&mut self, kind: TypeKind, registry: &Registry) -> Value {
        let template = self
            .templates
            .entry(kind)
            .or_insert_with(|| build_table(kind, registry));
        match template {
            Value::Map(entries) => Value::map(entries.borrow().clone()),
            other => other.clone(),
        }
    }
}

fn build_table(kind: TypeKind, registry: &Registry) -> Value {
    let mut entries = IndexMap::new();
    for &name in methods(kind) {
        match registry.get_by_name(name) {
            Some(intrinsic) => {
                entries.insert(Value::string(name), intrinsic.function_value());
            }
            None => warn!(method = name, table = ?kind, "method intrinsic is not registered"),
        }
    }
    debug!(table = ?kind, methods = entries.len(), "built type table");
    Value::map(entries)
}

fn type_table(call: &mut Call<'_>, kind: TypeKind) -> Result<IntrinsicResult> {
    if let Some(table) = call.context().type_slot(kind) {
        return Ok(IntrinsicResult::done(table));
    }
    let table = call.type_table(kind);
    call.context().set_type_slot(kind, table.clone());
    Ok(IntrinsicResult::done(table))
}

pub fn list(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    type_table(call, TypeKind::List)
}

pub fn string(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    type_table(call, TypeKind::String)
}

pub fn map(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    type_table(call, TypeKind::Map)
}

pub fn number(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    type_table(call, TypeKind::Number)
}

pub fn func_ref(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    type_table(call, TypeKind::Function)
}
