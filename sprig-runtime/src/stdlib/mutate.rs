use std::cmp::Ordering;

use sprig_intrinsics::{seq, string};

use crate::error::{IntrinsicError, Result};
use crate::result::IntrinsicResult;
use crate::runtime::Call;
use crate::value::Value;

fn null_argument(operation: &str) -> IntrinsicError {
    IntrinsicError::argument(operation, format!("argument to '{operation}' must not be null"))
}

pub fn insert(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let receiver = call.arg("self");
    let index = match call.arg("index") {
        Value::Number(index) => index as i64,
        Value::Null => return Err(IntrinsicError::argument("insert", "index argument required")),
        _ => return Err(IntrinsicError::argument("insert", "number required for index argument")),
    };
    let value = call.arg("value");
    match &receiver {
        Value::List(items) => {
            let position = seq::insert_position(items.borrow().len(), index)?;
            items.borrow_mut().insert(position, value);
            Ok(IntrinsicResult::done(receiver))
        }
        Value::String(text) => {
            let position = seq::insert_position(string::char_len(text), index)?;
            let inserted = string::insert_at(text, position, &value.to_display_string());
            Ok(IntrinsicResult::string(inserted))
        }
        _ => Err(IntrinsicError::wrong_type("insert", "list or string")),
    }
}

pub fn remove(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let receiver = call.arg("self");
    let key = call.arg("k");
    match &receiver {
        Value::Null => Err(null_argument("remove")),
        Value::Map(entries) => {
            let removed = entries.borrow_mut().shift_remove(&key).is_some();
            Ok(IntrinsicResult::truth(removed))
        }
        Value::List(items) => {
            let index = match key {
                Value::Number(index) => index as i64,
                Value::Null => return Err(null_argument("remove")),
                _ => {
                    return Err(IntrinsicError::argument(
                        "remove",
                        "number required for index argument",
                    ));
                }
            };
            let position = seq::element_position(items.borrow().len(), index)?;
            items.borrow_mut().remove(position);
            Ok(IntrinsicResult::NULL)
        }
        Value::String(text) => {
            if key.is_null() {
                return Err(null_argument("remove"));
            }
            match string::remove_first(text, &key.to_display_string()) {
                Some(remaining) => Ok(IntrinsicResult::string(remaining)),
                None => Ok(IntrinsicResult::done(receiver.clone())),
            }
        }
        _ => Err(IntrinsicError::wrong_type("remove", "map, list, or string")),
    }
}

pub fn replace(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let receiver = call.arg("self");
    if receiver.is_null() {
        return Err(null_argument("replace"));
    }
    let old_value = call.arg("oldval");
    let new_value = call.arg("newval");
    let max_count = call.arg("maxCount");
    let max_count = if max_count.is_null() {
        None
    } else {
        let limit = max_count.int_value();
        if limit < 1 {
            return Ok(IntrinsicResult::done(receiver));
        }
        Some(limit as usize)
    };
    let within_limit = |count: usize| max_count.map_or(true, |limit| count < limit);

    match &receiver {
        Value::Map(entries) => {
            let mut keys = Vec::new();
            for (key, value) in entries.borrow().iter() {
                if !within_limit(keys.len()) {
                    break;
                }
                if *value == old_value {
                    keys.push(key.clone());
                }
            }
            let mut entries = entries.borrow_mut();
            for key in keys {
                if let Some(slot) = entries.get_mut(&key) {
                    *slot = new_value.clone();
                }
            }
        }
        Value::List(items) => {
            let mut positions = Vec::new();
            for (position, item) in items.borrow().iter().enumerate() {
                if !within_limit(positions.len()) {
                    break;
                }
                if *item == old_value {
                    positions.push(position);
                }
            }
            let mut items = items.borrow_mut();
            for position in positions {
                items[position] = new_value.clone();
            }
        }
        Value::String(text) => {
            let search = old_value.to_display_string();
            if search.is_empty() {
                return Err(IntrinsicError::argument("replace", "oldval argument is empty"));
            }
            let replacement = new_value.to_display_string();
            let (replaced, _) = string::replace_n(text, &search, &replacement, max_count);
            return Ok(IntrinsicResult::string(replaced));
        }
        _ => return Err(IntrinsicError::wrong_type("replace", "map, list, or string")),
    }
    Ok(IntrinsicResult::done(receiver))
}

pub fn push(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let receiver = call.arg("self");
    let value = call.arg("value");
    match &receiver {
        Value::List(items) => items.borrow_mut().push(value),
        Value::Map(entries) => {
            entries.borrow_mut().insert(value, Value::Number(1.0));
        }
        _ => return Ok(IntrinsicResult::NULL),
    }
    Ok(IntrinsicResult::done(receiver))
}

pub fn pop(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let popped = match call.arg("self") {
        Value::List(items) => items.borrow_mut().pop(),
        Value::Map(entries) => entries.borrow_mut().shift_remove_index(0).map(|(key, _)| key),
        _ => None,
    };
    Ok(IntrinsicResult::done(popped.unwrap_or_default()))
}

pub fn pull(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let pulled = match call.arg("self") {
        Value::List(items) => {
            let mut items = items.borrow_mut();
            if items.is_empty() {
                None
            } else {
                Some(items.remove(0))
            }
        }
        Value::Map(entries) => entries.borrow_mut().shift_remove_index(0).map(|(key, _)| key),
        _ => None,
    };
    Ok(IntrinsicResult::done(pulled.unwrap_or_default()))
}

pub fn sort(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let receiver = call.arg("self");
    let Value::List(items) = &receiver else {
        return Ok(IntrinsicResult::done(receiver.clone()));
    };
    if items.borrow().len() < 2 {
        return Ok(IntrinsicResult::done(receiver.clone()));
    }
    let by_key = call.arg("byKey");
    let ascending = call.arg("ascending").bool_value();
    let order = |a: &Value, b: &Value| -> Ordering {
        if ascending {
            a.compare(b)
        } else {
            b.compare(a)
        }
    };

    let snapshot: Vec<Value> = items.borrow().clone();
    let sorted = if by_key.is_null() {
        let mut sorted = snapshot;
        sorted.sort_by(|a, b| order(a, b));
        sorted
    } else {
        let key_index = by_key.int_value();
        let mut keyed: Vec<(Value, Value)> = snapshot
            .into_iter()
            .map(|element| (sort_key(&element, &by_key, key_index), element))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| order(a, b));
        keyed.into_iter().map(|(_, element)| element).collect()
    };
    *items.borrow_mut() = sorted;
    Ok(IntrinsicResult::done(receiver.clone()))
}

fn sort_key(element: &Value, by_key: &Value, key_index: i64) -> Value {
    match element {
        Value::Map(_) => element.lookup(by_key),
        Value::List(inner) => {
            let inner = inner.borrow();
            seq::lookup_position(inner.len(), key_index)
                .map(|position| inner[position].clone())
                .unwrap_or_default()
        }
        other => other.clone(),
    }
}
