use sprig_intrinsics::string;

use crate::error::{IntrinsicError, Result};
use crate::result::IntrinsicResult;
use crate::runtime::Call;
use crate::value::Value;

pub fn code(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let receiver = call.arg("self");
    if receiver.is_null() {
        return Ok(IntrinsicResult::number(0.0));
    }
    let code_point = string::code_point(&receiver.to_display_string());
    Ok(IntrinsicResult::number(f64::from(code_point)))
}

pub fn chr(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let code_point = call.arg("codePoint").int_value();
    match string::from_code_point(code_point) {
        Some(text) => Ok(IntrinsicResult::string(text)),
        None => Err(IntrinsicError::argument(
            "char",
            format!("{code_point} is not a valid code point"),
        )),
    }
}

pub fn lower(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    match call.arg("self") {
        Value::String(text) => Ok(IntrinsicResult::string(text.to_lowercase())),
        other => Ok(IntrinsicResult::done(other)),
    }
}

pub fn upper(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    match call.arg("self") {
        Value::String(text) => Ok(IntrinsicResult::string(text.to_uppercase())),
        other => Ok(IntrinsicResult::done(other)),
    }
}

pub fn val(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    match call.arg("self") {
        number @ Value::Number(_) => Ok(IntrinsicResult::done(number)),
        Value::String(text) => Ok(IntrinsicResult::number(string::parse_number(&text))),
        _ => Ok(IntrinsicResult::NULL),
    }
}

pub fn str_value(
    call: &mut Call<'_>,
    _partial: Option<IntrinsicResult>,
) -> Result<IntrinsicResult> {
    match call.arg("x") {
        text @ Value::String(_) => Ok(IntrinsicResult::done(text)),
        other => Ok(IntrinsicResult::string(other.to_display_string())),
    }
}
