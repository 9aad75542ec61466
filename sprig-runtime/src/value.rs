use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;
use sprig_intrinsics::math::format_number;

use crate::registry::IntrinsicId;

pub type ListRef = Rc<RefCell<Vec<Value>>>;
pub type MapRef = Rc<RefCell<IndexMap<Value, Value>>>;

/// How deep equality and hashing descend into nested containers.
const RECURSION_LIMIT: usize = 16;

/// Results for container pairs already compared, keyed by both addresses and
/// the remaining depth, so shared and cyclic structure is walked once per level.
type EqualityMemo = HashMap<(usize, usize, usize), bool>;

/// Digests of containers already hashed, keyed by address and remaining depth.
type HashMemo = HashMap<(usize, usize), u64>;

/// How many container levels the code form prints before eliding.
const CODE_FORM_DEPTH: usize = 3;

thread_local! {
    static EMPTY_STRING: Rc<str> = Rc::from("");
}

/// A declared parameter: its name and the value used when a call omits it.
#[derive(Clone, Debug)]
pub struct Param {
    pub name: String,
    pub default: Option<Value>,
}

impl Param {
    pub fn new(name: impl Into<String>, default: Option<Value>) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}

/// A callable value. Functions produced by the registry carry the id of the
/// intrinsic they invoke; script functions are the engine's business.
#[derive(Debug)]
pub struct Function {
    pub params: Vec<Param>,
    pub intrinsic: Option<IntrinsicId>,
}

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Number(f64),
    String(Rc<str>),
    List(ListRef),
    Map(MapRef),
    Function(Rc<Function>),
}

impl Value {
    pub fn number(value: f64) -> Self {
        Value::Number(value)
    }

    pub fn truth(flag: bool) -> Self {
        Value::Number(if flag { 1.0 } else { 0.0 })
    }

    /// String value; the empty string is a shared instance.
    pub fn string(text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        if text.is_empty() {
            Self::empty_string()
        } else {
            Value::String(Rc::from(text))
        }
    }

    pub fn empty_string() -> Self {
        Value::String(EMPTY_STRING.with(Rc::clone))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn map(entries: IndexMap<Value, Value>) -> Self {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    pub fn function(function: Function) -> Self {
        Value::Function(Rc::new(function))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Function(_) => "function",
        }
    }

    /// Numeric coercion: numbers are themselves, everything else is 0.
    pub fn double_value(&self) -> f64 {
        match self {
            Value::Number(value) => *value,
            _ => 0.0,
        }
    }

    /// Integer coercion, truncating toward zero.
    pub fn int_value(&self) -> i64 {
        self.double_value() as i64
    }

    pub fn bool_value(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Number(value) => *value != 0.0,
            Value::String(text) => !text.is_empty(),
            Value::List(items) => items.try_borrow().map(|l| !l.is_empty()).unwrap_or(true),
            Value::Map(entries) => entries.try_borrow().map(|m| !m.is_empty()).unwrap_or(true),
            Value::Function(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(&**text),
            _ => None,
        }
    }

    /// The string form script code sees: strings are raw, null is empty,
    /// containers use their code form.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Number(value) => format_number(*value),
            Value::String(text) => text.to_string(),
            _ => self.code_form(CODE_FORM_DEPTH),
        }
    }

    /// Source-like rendering with quoted strings, eliding containers nested
    /// deeper than `depth`.
    pub fn code_form(&self, depth: usize) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Number(value) => format_number(*value),
            Value::String(text) => format!("\"{}\"", text.replace('"', "\"\"")),
            Value::List(items) => {
                let Ok(items) = items.try_borrow() else {
                    return "[...]".to_string();
                };
                if items.is_empty() {
                    return "[]".to_string();
                }
                if depth == 0 {
                    return "[...]".to_string();
                }
                let parts: Vec<String> =
                    items.iter().map(|item| item.code_form(depth - 1)).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Map(entries) => {
                let Ok(entries) = entries.try_borrow() else {
                    return "{...}".to_string();
                };
                if depth == 0 {
                    return "{...}".to_string();
                }
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| {
                        format!("{}: {}", key.code_form(depth - 1), value.code_form(depth - 1))
                    })
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Function(function) => {
                let params: Vec<String> = function
                    .params
                    .iter()
                    .map(|param| match &param.default {
                        Some(default) if !default.is_null() => {
                            format!("{}={}", param.name, default.code_form(depth))
                        }
                        _ => param.name.clone(),
                    })
                    .collect();
                format!("FUNCTION({})", params.join(", "))
            }
        }
    }

    /// Identity comparison: numbers by value, null by nullness, everything
    /// else by reference.
    pub fn ref_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Looks `key` up in a map value; null for missing keys and non-maps.
    pub fn lookup(&self, key: &Value) -> Value {
        match self {
            Value::Map(entries) => entries
                .try_borrow()
                .ok()
                .and_then(|entries| entries.get(key).cloned())
                .unwrap_or_default(),
            _ => Value::Null,
        }
    }

    /// The hash exposed to script code through `hash(obj)`.
    pub fn hash_code(&self) -> f64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        f64::from(hasher.finish() as u32)
    }

    /// Sort order: null lowest, then numbers ascending, then strings
    /// lexicographically, then containers and functions (all mutually equal).
    pub fn compare(&self, other: &Value) -> Ordering {
        fn rank(value: &Value) -> u8 {
            match value {
                Value::Null => 0,
                Value::Number(_) => 1,
                Value::String(_) => 2,
                Value::List(_) | Value::Map(_) | Value::Function(_) => 3,
            }
        }
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => match (a.is_nan(), b.is_nan()) {
                (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
            },
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }

    fn equals(&self, other: &Value, depth: usize, seen: &mut EqualityMemo) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let slot = (Rc::as_ptr(a) as usize, Rc::as_ptr(b) as usize, depth);
                if let Some(&known) = seen.get(&slot) {
                    return known;
                }
                let (Ok(a), Ok(b)) = (a.try_borrow(), b.try_borrow()) else {
                    return false;
                };
                let same = if a.len() != b.len() {
                    false
                } else if depth == 0 {
                    true
                } else {
                    a.iter().zip(b.iter()).all(|(x, y)| x.equals(y, depth - 1, seen))
                };
                seen.insert(slot, same);
                same
            }
            (Value::Map(a), Value::Map(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let slot = (Rc::as_ptr(a) as usize, Rc::as_ptr(b) as usize, depth);
                if let Some(&known) = seen.get(&slot) {
                    return known;
                }
                let (Ok(a), Ok(b)) = (a.try_borrow(), b.try_borrow()) else {
                    return false;
                };
                let same = if a.len() != b.len() {
                    false
                } else if depth == 0 {
                    true
                } else {
                    a.iter().all(|(key, value)| match b.get(key) {
                        Some(other) => value.equals(other, depth - 1, seen),
                        None => false,
                    })
                };
                seen.insert(slot, same);
                same
            }
            _ => false,
        }
    }

    fn hash_into<H: Hasher>(&self, state: &mut H, depth: usize, seen: &mut HashMemo) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Number(value) => {
                state.write_u8(1);
                let normalized = if *value == 0.0 { 0.0 } else { *value };
                state.write_u64(normalized.to_bits());
            }
            Value::String(text) => {
                state.write_u8(2);
                text.hash(state);
            }
            Value::List(items) => {
                let slot = (Rc::as_ptr(items) as usize, depth);
                if let Some(&digest) = seen.get(&slot) {
                    state.write_u64(digest);
                    return;
                }
                let mut hasher = DefaultHasher::new();
                hasher.write_u8(3);
                if let Ok(items) = items.try_borrow() {
                    hasher.write_usize(items.len());
                    if depth > 0 {
                        for item in items.iter() {
                            item.hash_into(&mut hasher, depth - 1, seen);
                        }
                    }
                }
                let digest = hasher.finish();
                seen.insert(slot, digest);
                state.write_u64(digest);
            }
            Value::Map(entries) => {
                let slot = (Rc::as_ptr(entries) as usize, depth);
                if let Some(&digest) = seen.get(&slot) {
                    state.write_u64(digest);
                    return;
                }
                let mut hasher = DefaultHasher::new();
                hasher.write_u8(4);
                if let Ok(entries) = entries.try_borrow() {
                    hasher.write_usize(entries.len());
                    if depth > 0 {
                        // Entry hashes are combined order-independently, matching
                        // map equality which ignores insertion order.
                        let mut combined: u64 = 0;
                        for (key, value) in entries.iter() {
                            let mut entry = DefaultHasher::new();
                            key.hash_into(&mut entry, depth - 1, seen);
                            value.hash_into(&mut entry, depth - 1, seen);
                            combined = combined.wrapping_add(entry.finish());
                        }
                        hasher.write_u64(combined);
                    }
                }
                let digest = hasher.finish();
                seen.insert(slot, digest);
                state.write_u64(digest);
            }
            Value::Function(function) => {
                state.write_u8(5);
                std::ptr::hash(Rc::as_ptr(function), state);
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, RECURSION_LIMIT, &mut EqualityMemo::new())
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_into(state, RECURSION_LIMIT, &mut HashMemo::new());
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code_form(CODE_FORM_DEPTH))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::string(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}
