use sprig_intrinsics::math;

use crate::error::Result;
use crate::result::IntrinsicResult;
use crate::runtime::Call;

pub fn abs(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("x").double_value().abs()))
}

pub fn acos(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("x").double_value().acos()))
}

pub fn asin(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("x").double_value().asin()))
}

pub fn atan(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let y = call.arg("y").double_value();
    let x = call.arg("x").double_value();
    Ok(IntrinsicResult::number(math::atan(y, x)))
}

pub fn ceil(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("x").double_value().ceil()))
}

pub fn cos(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("radians").double_value().cos()))
}

pub fn floor(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("x").double_value().floor()))
}

pub fn log(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let x = call.arg("x").double_value();
    let base = call.arg("base").double_value();
    Ok(IntrinsicResult::number(math::log(x, base)))
}

pub fn pi(_call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(std::f64::consts::PI))
}

pub fn round(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let x = call.arg("x").double_value();
    let places = call.arg("decimalPlaces").int_value();
    let places = places.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    Ok(IntrinsicResult::number(math::round(x, places)))
}

pub fn sign(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(math::sign(call.arg("x").double_value())))
}

pub fn sin(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("radians").double_value().sin()))
}

pub fn sqrt(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("x").double_value().sqrt()))
}

pub fn tan(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("radians").double_value().tan()))
}

pub fn bit_and(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let (i, j) = (call.arg("i").double_value(), call.arg("j").double_value());
    Ok(IntrinsicResult::number(math::bit_and(i, j)))
}

pub fn bit_or(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let (i, j) = (call.arg("i").double_value(), call.arg("j").double_value());
    Ok(IntrinsicResult::number(math::bit_or(i, j)))
}

pub fn bit_xor(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let (i, j) = (call.arg("i").double_value(), call.arg("j").double_value());
    Ok(IntrinsicResult::number(math::bit_xor(i, j)))
}
