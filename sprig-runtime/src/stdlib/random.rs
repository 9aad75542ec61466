use rand::Rng;
use sprig_intrinsics::seq;

use crate::error::Result;
use crate::result::IntrinsicResult;
use crate::runtime::Call;
use crate::value::Value;

/// `rnd(seed)`: a uniform number in `[0, 1)`. A seed argument restarts the
/// shared generator deterministically before drawing.
pub fn rnd(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let seed = call.arg("seed");
    if let Value::Number(_) = seed {
        call.reseed(seed.int_value() as u64);
    }
    let value: f64 = call.rng().gen();
    Ok(IntrinsicResult::number(value))
}

pub fn shuffle(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    match call.arg("self") {
        Value::List(items) => {
            let mut shuffled = items.borrow().clone();
            let rng = call.rng();
            seq::shuffle(&mut shuffled, |i| rng.gen_range(0..=i));
            *items.borrow_mut() = shuffled;
        }
        Value::Map(entries) => {
            // Keys stay where they are; only the values move between them.
            let mut values: Vec<Value> = entries.borrow().values().cloned().collect();
            let rng = call.rng();
            seq::shuffle(&mut values, |i| rng.gen_range(0..=i));
            let mut entries = entries.borrow_mut();
            for (slot, value) in entries.values_mut().zip(values) {
                *slot = value;
            }
        }
        _ => {}
    }
    Ok(IntrinsicResult::NULL)
}
