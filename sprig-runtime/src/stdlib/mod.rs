//! The standard intrinsic library.
//!
//! Every built-in is declared once in [`STANDARD_LIBRARY`], in the order the
//! ids are assigned. Implementations live in one module per category.

pub mod container;
pub mod host;
pub mod math;
pub mod mutate;
pub mod random;
pub mod sequence;
pub mod string;

use crate::error::RegistryError;
use crate::registry::{IntrinsicImpl, Registry};
use crate::types;

/// Default of a declared parameter.
#[derive(Clone, Copy, Debug)]
enum ParamDefault {
    Null,
    Number(f64),
    Text(&'static str),
}

use ParamDefault::{Null, Number, Text};

struct Declaration {
    name: &'static str,
    params: &'static [(&'static str, ParamDefault)],
    code: IntrinsicImpl,
}

const fn declare(
    name: &'static str,
    params: &'static [(&'static str, ParamDefault)],
    code: IntrinsicImpl,
) -> Declaration {
    Declaration { name, params, code }
}

const STANDARD_LIBRARY: &[Declaration] = &[
    declare("abs", &[("x", Number(0.0))], math::abs),
    declare("acos", &[("x", Number(0.0))], math::acos),
    declare("asin", &[("x", Number(0.0))], math::asin),
    declare("atan", &[("y", Number(0.0)), ("x", Number(1.0))], math::atan),
    declare("bitAnd", &[("i", Number(0.0)), ("j", Number(0.0))], math::bit_and),
    declare("bitOr", &[("i", Number(0.0)), ("j", Number(0.0))], math::bit_or),
    declare("bitXor", &[("i", Number(0.0)), ("j", Number(0.0))], math::bit_xor),
    declare("char", &[("codePoint", Number(65.0))], string::chr),
    declare("ceil", &[("x", Number(0.0))], math::ceil),
    declare("code", &[("self", Null)], string::code),
    declare("cos", &[("radians", Number(0.0))], math::cos),
    declare("floor", &[("x", Number(0.0))], math::floor),
    declare("funcRef", &[], types::func_ref),
    declare("hash", &[("obj", Null)], host::hash),
    declare("hasIndex", &[("self", Null), ("index", Null)], container::has_index),
    declare("indexes", &[("self", Null)], container::indexes),
    declare("indexOf", &[("self", Null), ("value", Null), ("after", Null)], container::index_of),
    declare("insert", &[("self", Null), ("index", Null), ("value", Null)], mutate::insert),
    declare("intrinsics", &[], host::intrinsics),
    declare("join", &[("self", Null), ("delimiter", Text(" "))], container::join),
    declare("len", &[("self", Null)], container::len),
    declare("list", &[], types::list),
    declare("log", &[("x", Number(0.0)), ("base", Number(10.0))], math::log),
    declare("lower", &[("self", Null)], string::lower),
    declare("map", &[], types::map),
    declare("number", &[], types::number),
    declare("pi", &[], math::pi),
    declare("print", &[("s", Null), ("delimiter", Text("\n"))], host::print),
    declare("pop", &[("self", Null)], mutate::pop),
    declare("pull", &[("self", Null)], mutate::pull),
    declare("push", &[("self", Null), ("value", Null)], mutate::push),
    declare(
        "range",
        &[("from", Number(0.0)), ("to", Number(0.0)), ("step", Null)],
        sequence::range,
    ),
    declare("refEquals", &[("a", Null), ("b", Null)], host::ref_equals),
    declare("remove", &[("self", Null), ("k", Null)], mutate::remove),
    declare(
        "replace",
        &[("self", Null), ("oldval", Null), ("newval", Null), ("maxCount", Null)],
        mutate::replace,
    ),
    declare("round", &[("x", Number(0.0)), ("decimalPlaces", Number(0.0))], math::round),
    declare("rnd", &[("seed", Null)], random::rnd),
    declare("sign", &[("x", Number(0.0))], math::sign),
    declare("sin", &[("radians", Number(0.0))], math::sin),
    declare("slice", &[("seq", Null), ("from", Number(0.0)), ("to", Null)], container::slice),
    declare(
        "sort",
        &[("self", Null), ("byKey", Null), ("ascending", Number(1.0))],
        mutate::sort,
    ),
    declare(
        "split",
        &[("self", Null), ("delimiter", Text(" ")), ("maxCount", Number(-1.0))],
        container::split,
    ),
    declare("sqrt", &[("x", Number(0.0))], math::sqrt),
    declare("stackTrace", &[], host::stack_trace),
    declare("str", &[("x", Text(""))], string::str_value),
    declare("string", &[], types::string),
    declare("shuffle", &[("self", Null)], random::shuffle),
    declare("sum", &[("self", Null)], container::sum),
    declare("tan", &[("radians", Number(0.0))], math::tan),
    declare("time", &[], host::time),
    declare("upper", &[("self", Null)], string::upper),
    declare("val", &[("self", Number(0.0))], string::val),
    declare("values", &[("self", Null)], container::values),
    declare("version", &[], host::version),
    declare("wait", &[("seconds", Number(1.0))], host::wait),
    declare("yield", &[], host::yield_now),
];

/// Names of every standard intrinsic, in id order.
pub fn names() -> impl Iterator<Item = &'static str> {
    STANDARD_LIBRARY.iter().map(|declaration| declaration.name)
}

/// Declares the standard library in `registry`.
pub fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    for declaration in STANDARD_LIBRARY {
        let intrinsic = registry.create(declaration.name)?;
        for &(name, default) in declaration.params {
            match default {
                Null => intrinsic.add_param(name),
                Number(value) => intrinsic.add_param_number(name, value),
                Text(text) => intrinsic.add_param_str(name, text),
            };
        }
        intrinsic.set_code(declaration.code);
    }
    Ok(())
}
