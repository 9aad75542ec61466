use crate::value::Value;

/// What an intrinsic hands back to the engine.
///
/// `done == false` means the call is still in progress: the engine keeps the
/// result and passes it back as the partial result on the next invocation of
/// the same call site, so `value` can carry whatever state the intrinsic
/// needs to resume (for `wait`, the target time).
#[derive(Clone, Debug, PartialEq)]
pub struct IntrinsicResult {
    pub done: bool,
    pub value: Value,
}

impl IntrinsicResult {
    pub const NULL: IntrinsicResult = IntrinsicResult::done(Value::Null);
    pub const TRUE: IntrinsicResult = IntrinsicResult::done(Value::Number(1.0));
    pub const FALSE: IntrinsicResult = IntrinsicResult::done(Value::Number(0.0));
    pub const WAITING: IntrinsicResult = IntrinsicResult::pending(Value::Null);

    pub const fn new(value: Value, done: bool) -> Self {
        Self { done, value }
    }

    pub const fn done(value: Value) -> Self {
        Self::new(value, true)
    }

    pub const fn pending(value: Value) -> Self {
        Self::new(value, false)
    }

    pub fn number(value: f64) -> Self {
        Self::done(Value::Number(value))
    }

    pub fn string(text: impl AsRef<str>) -> Self {
        Self::done(Value::string(text))
    }

    pub fn empty_string() -> Self {
        Self::done(Value::empty_string())
    }

    pub fn truth(flag: bool) -> Self {
        if flag {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }
}

impl Default for IntrinsicResult {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<Value> for IntrinsicResult {
    fn from(value: Value) -> Self {
        Self::done(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_complete_except_waiting() {
        assert!(IntrinsicResult::NULL.done);
        assert!(IntrinsicResult::TRUE.done);
        assert!(!IntrinsicResult::WAITING.done);
        assert_eq!(IntrinsicResult::truth(false).value.double_value(), 0.0);
    }

    #[test]
    fn empty_strings_share_one_instance() {
        let a = IntrinsicResult::string("");
        let b = IntrinsicResult::empty_string();
        assert!(a.value.ref_equals(&b.value));
    }
}
