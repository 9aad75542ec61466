use indexmap::IndexMap;
use tracing::trace;

use crate::error::Result;
use crate::result::IntrinsicResult;
use crate::runtime::Call;
use crate::value::Value;

/// Date this crate was compiled, stamped by the build script.
const BUILD_DATE: &str = env!("SPRIG_BUILD_DATE");

pub fn print(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let text = match call.arg("s") {
        Value::Null => "null".to_string(),
        other => other.to_display_string(),
    };
    match call.arg("delimiter") {
        Value::Null => call.context().standard_output(&text, false),
        Value::String(delimiter) if &*delimiter == "\n" => {
            call.context().standard_output(&text, true)
        }
        delimiter => {
            let line = format!("{text}{}", delimiter.to_display_string());
            call.context().standard_output(&line, false);
        }
    }
    Ok(IntrinsicResult::NULL)
}

pub fn time(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.context().run_time()))
}

/// `wait(seconds)`: suspends the calling script until the clock has passed
/// the target computed on the first tick.
pub fn wait(call: &mut Call<'_>, partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    let now = call.context().run_time();
    match partial {
        Some(pending) if !pending.done => {
            let target = pending.value.double_value();
            if now > target {
                trace!(now, target, "wait finished");
                Ok(IntrinsicResult::NULL)
            } else {
                Ok(pending)
            }
        }
        _ => {
            let target = now + call.arg("seconds").double_value();
            trace!(now, target, "wait started");
            Ok(IntrinsicResult::pending(Value::Number(target)))
        }
    }
}

pub fn yield_now(
    call: &mut Call<'_>,
    _partial: Option<IntrinsicResult>,
) -> Result<IntrinsicResult> {
    trace!("yield requested");
    call.request_yield();
    Ok(IntrinsicResult::NULL)
}

pub fn version(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    if let Some(map) = call.context().version_map() {
        return Ok(IntrinsicResult::done(map));
    }
    let config = call.config();
    let mut entries = IndexMap::new();
    entries.insert(Value::string("miniscript"), Value::string(&config.engine_version));
    entries.insert(Value::string("buildDate"), Value::string(BUILD_DATE));
    entries.insert(Value::string("host"), Value::Number(config.host.version));
    entries.insert(Value::string("hostName"), Value::string(&config.host.name));
    entries.insert(Value::string("hostInfo"), Value::string(&config.host.info));
    let map = Value::map(entries);
    call.context().set_version_map(map.clone());
    Ok(IntrinsicResult::done(map))
}

pub fn stack_trace(
    call: &mut Call<'_>,
    _partial: Option<IntrinsicResult>,
) -> Result<IntrinsicResult> {
    let frames = call
        .context()
        .stack_trace()
        .into_iter()
        .map(Value::from)
        .collect();
    Ok(IntrinsicResult::done(Value::list(frames)))
}

pub fn intrinsics(
    call: &mut Call<'_>,
    _partial: Option<IntrinsicResult>,
) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::done(call.intrinsics_map()))
}

pub fn hash(call: &mut Call<'_>, _partial: Option<IntrinsicResult>) -> Result<IntrinsicResult> {
    Ok(IntrinsicResult::number(call.arg("obj").hash_code()))
}

pub fn ref_equals(
    call: &mut Call<'_>,
    _partial: Option<IntrinsicResult>,
) -> Result<IntrinsicResult> {
    let (a, b) = (call.arg("a"), call.arg("b"));
    Ok(IntrinsicResult::truth(a.ref_equals(&b)))
}
