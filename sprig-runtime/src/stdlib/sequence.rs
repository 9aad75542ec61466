use sprig_intrinsics::seq;

use crate::error::{IntrinsicError, Result};
use crate::result::IntrinsicResult;
use crate::runtime::Call;
use crate::value::Value;

/// `range(from, to, step)`: every value from `from` toward `to` inclusive.
///
/// The element count is projected before anything is allocated and checked
/// against the configured maximum list size, and storage is reserved
/// fallibly, so oversized requests come back as limit errors.
pub fn range(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let from = call.arg("from").double_value();
    let to = call.arg("to").double_value();
    let step = match call.arg("step") {
        Value::Number(step) => step,
        _ => seq::default_step(from, to),
    };
    if step == 0.0 {
        return Err(IntrinsicError::argument("range", "step==0"));
    }

    let count = seq::range_count(from, to, step);
    let max_list_size = call.config().max_list_size;
    if count > max_list_size as i64 {
        return Err(IntrinsicError::limit("range", "list too large"));
    }
    let expected = count.max(0) as usize;
    let values = seq::range_values(from, to, step, expected)
        .map_err(|err| IntrinsicError::limit("range", err))?;
    let values = values.into_iter().map(Value::Number).collect();
    Ok(IntrinsicResult::done(Value::list(values)))
}
