use sprig_intrinsics::{seq, string};

use crate::error::Result;
use crate::result::IntrinsicResult;
use crate::runtime::Call;
use crate::value::Value;

pub fn len(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let count = match call.arg("self") {
        Value::List(items) => items.borrow().len(),
        Value::String(text) => string::char_len(&text),
        Value::Map(entries) => entries.borrow().len(),
        _ => return Ok(IntrinsicResult::NULL),
    };
    Ok(IntrinsicResult::number(count as f64))
}

pub fn has_index(
    call: &mut Call<'_>,
    _partial: Option<IntrinsicResult>,
) -> Result<IntrinsicResult> {
    let index = call.arg("index");
    let count = match call.arg("self") {
        Value::List(items) => items.borrow().len(),
        Value::String(text) => string::char_len(&text),
        Value::Map(entries) => {
            return Ok(IntrinsicResult::truth(entries.borrow().contains_key(&index)));
        }
        _ => return Ok(IntrinsicResult::NULL),
    };
    match index {
        Value::Number(i) if i.is_finite() => {
            Ok(IntrinsicResult::truth(seq::has_index(count, i as i64)))
        }
        _ => Ok(IntrinsicResult::FALSE),
    }
}

pub fn indexes(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let count = match call.arg("self") {
        Value::Map(entries) => {
            let keys: Vec<Value> = entries.borrow().keys().cloned().collect();
            return Ok(IntrinsicResult::done(Value::list(keys)));
        }
        Value::List(items) => items.borrow().len(),
        Value::String(text) => string::char_len(&text),
        _ => return Ok(IntrinsicResult::NULL),
    };
    let indexes = (0..count).map(Value::from).collect();
    Ok(IntrinsicResult::done(Value::list(indexes)))
}

pub fn values(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    match call.arg("self") {
        Value::Map(entries) => {
            let values: Vec<Value> = entries.borrow().values().cloned().collect();
            Ok(IntrinsicResult::done(Value::list(values)))
        }
        Value::String(text) => {
            let chars = text.chars().map(|c| Value::string(c.to_string())).collect();
            Ok(IntrinsicResult::done(Value::list(chars)))
        }
        other => Ok(IntrinsicResult::done(other)),
    }
}

pub fn index_of(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let value = call.arg("value");
    let after = call.arg("after");
    let after_index = (!after.is_null()).then(|| after.int_value());
    match call.arg("self") {
        Value::List(items) => {
            let items = items.borrow();
            let Some(start) = seq::search_start(items.len(), after_index) else {
                return Ok(IntrinsicResult::NULL);
            };
            let found = items.iter().skip(start).position(|item| *item == value);
            Ok(found.map_or(IntrinsicResult::NULL, |offset| {
                IntrinsicResult::number((start + offset) as f64)
            }))
        }
        Value::String(text) => {
            let needle = value.to_display_string();
            let Some(start) = seq::search_start(string::char_len(&text), after_index) else {
                return Ok(IntrinsicResult::NULL);
            };
            let found = string::find_from(&text, &needle, start);
            Ok(found.map_or(IntrinsicResult::NULL, |index| IntrinsicResult::number(index as f64)))
        }
        Value::Map(entries) => {
            let entries = entries.borrow();
            let mut passed_after = after.is_null();
            for (key, entry) in entries.iter() {
                if passed_after {
                    if *entry == value {
                        return Ok(IntrinsicResult::done(key.clone()));
                    }
                } else if *key == after {
                    passed_after = true;
                }
            }
            Ok(IntrinsicResult::NULL)
        }
        _ => Ok(IntrinsicResult::NULL),
    }
}

pub fn sum(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let total: f64 = match call.arg("self") {
        Value::List(items) => items.borrow().iter().map(Value::double_value).sum(),
        Value::Map(entries) => entries.borrow().values().map(Value::double_value).sum(),
        _ => 0.0,
    };
    Ok(IntrinsicResult::number(total))
}

pub fn slice(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let from = call.arg("from").int_value();
    let to = call.arg("to");
    let to = (!to.is_null()).then(|| to.int_value());
    match call.arg("seq") {
        Value::List(items) => {
            let items = items.borrow();
            let bounds = seq::slice_bounds(items.len(), from, to);
            Ok(IntrinsicResult::done(Value::list(items[bounds].to_vec())))
        }
        Value::String(text) => {
            let bounds = seq::slice_bounds(string::char_len(&text), from, to);
            Ok(IntrinsicResult::string(string::substring(&text, bounds.start, bounds.end)))
        }
        _ => Ok(IntrinsicResult::NULL),
    }
}

pub fn join(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let items = match call.arg("self") {
        Value::List(items) => items,
        other => return Ok(IntrinsicResult::done(other)),
    };
    let delimiter = call.arg("delimiter").to_display_string();
    let tokens: Vec<String> = items.borrow().iter().map(Value::to_display_string).collect();
    Ok(IntrinsicResult::string(tokens.join(&delimiter)))
}

pub fn split(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let text = call.arg("self").to_display_string();
    let delimiter = call.arg("delimiter").to_display_string();
    let max_count = call.arg("maxCount").int_value();
    let parts = string::split(&text, &delimiter, max_count)
        .into_iter()
        .map(Value::from)
        .collect();
    Ok(IntrinsicResult::done(Value::list(parts)))
}
